//! wolf-talk CLI: parse and normalize Werewolf utterances.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};

use wolf_talk::grammar::{ParseContext, parse_with, try_parse};
use wolf_talk::{AgentRegistry, Content, GrammarConfig};

#[derive(Parser)]
#[command(name = "wolf-talk", version, about = "Werewolf utterance grammar")]
struct Cli {
    /// Grammar config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fail on unparseable input instead of reading it as `Skip`.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one utterance and print its canonical form.
    Parse {
        /// Utterance text, e.g. "REQUEST Agent[02] (VOTE Agent[03])".
        text: String,

        /// Print the full tree as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Normalize utterances line by line.
    Normalize {
        /// Read from a file instead of stdin.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List every agent mentioned in the input.
    Agents {
        /// Read from a file instead of stdin.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GrammarConfig::load(path)?,
        None => GrammarConfig::default(),
    };
    config.strict |= cli.strict;

    match cli.command {
        Commands::Parse { text, json } => {
            let ctx = ParseContext::from_config(&config, None);
            let content = parse_line(&text, &ctx, config.strict)?;
            if json {
                let out = serde_json::to_string_pretty(&content.view()).into_diagnostic()?;
                println!("{out}");
            } else {
                println!("{content}");
            }
        }

        Commands::Normalize { file } => {
            let ctx = ParseContext::from_config(&config, None);
            for (n, line) in read_lines(file.as_deref())?.iter().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let content = parse_line(line, &ctx, config.strict)
                    .wrap_err_with(|| format!("line {}", n + 1))?;
                println!("{content}");
            }
        }

        Commands::Agents { file } => {
            let registry = AgentRegistry::new();
            let ctx = ParseContext::from_config(&config, Some(&registry));
            for (n, line) in read_lines(file.as_deref())?.iter().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                parse_line(line, &ctx, config.strict)
                    .wrap_err_with(|| format!("line {}", n + 1))?;
            }

            if registry.is_empty() {
                println!("No agents mentioned.");
            } else {
                println!("Agents ({}):", registry.len());
                for meta in registry.all() {
                    println!("  {}", meta.label);
                }
            }
        }
    }

    Ok(())
}

fn parse_line(text: &str, ctx: &ParseContext<'_>, strict: bool) -> Result<Content> {
    if strict {
        Ok(try_parse(text, ctx)?)
    } else {
        Ok(parse_with(text, ctx))
    }
}

fn read_lines(file: Option<&Path>) -> Result<Vec<String>> {
    match file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading {}", path.display()))?;
            Ok(content.lines().map(str::to_string).collect())
        }
        None => std::io::stdin()
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .into_diagnostic(),
    }
}
