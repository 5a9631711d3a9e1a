//! End-to-end tests for the wolf-talk grammar.
//!
//! These exercise the public API only: parsing, building, subject
//! completion, normalization, and the pieces around them (registry,
//! config, records) working together.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use wolf_talk::grammar::{
    GrammarError, ParseContext, Role, Species, Topic, UtteranceRef, builder, normalize, parse,
    parse_with, strip_subject, try_parse,
};
use wolf_talk::{Agent, AgentRegistry, Content, GrammarConfig, Operator, Utterance};

fn agent(i: u32) -> Agent {
    Agent::from_index(i).unwrap()
}

// ---------------------------------------------------------------------------
// Canonicalization
// ---------------------------------------------------------------------------

#[test]
fn request_subject_propagates_to_target() {
    let c = parse("REQUEST Agent[02] (VOTE Agent[03])");
    assert_eq!(c.topic(), Topic::Operator);
    assert_eq!(c.operator(), Some(Operator::Request));
    assert_eq!(c.children()[0].subject(), agent(2));
    assert_eq!(c.text(), "REQUEST Agent[02] (VOTE Agent[03])");
}

#[test]
fn because_keeps_foreign_subject_and_elides_own() {
    let text = "Agent[01] BECAUSE (Agent[02] ESTIMATE Agent[03] WEREWOLF) (VOTE Agent[03])";
    let c = parse(text);
    assert_eq!(c.text(), text);
    assert_eq!(c.children()[0].subject(), agent(2));
    assert_eq!(c.children()[1].subject(), agent(1));
}

#[test]
fn normalization_is_idempotent_on_samples() {
    let samples = [
        "Skip",
        "Over",
        "Agent[01] AGREE TALK day1 ID:3",
        "COMINGOUT Agent[05] SEER",
        "Agent[02]  DIVINED   Agent[03] HUMAN",
        "ANY VOTE Agent[04]",
        "Agent[01] INQUIRE Agent[02] (Agent[02] ESTIMATE Agent[01] POSSESSED)",
        "Agent[01] OR (Agent[01] GUARD Agent[02]) (Agent[03] GUARD Agent[04])",
        "DAY 2 (Agent[01] XOR (VOTE Agent[02]) (VOTE Agent[03]))",
        "NOT (NOT (NOT (ATTACK ANY)))",
        "Agent[01] REQUEST (Agent[04] DIVINATION Agent[05])",
    ];
    for text in samples {
        let once = normalize(text);
        let twice = normalize(&once);
        assert_eq!(once, twice, "not idempotent for {text:?}");
        assert_eq!(parse(&once), parse(text));
    }
}

#[test]
fn equality_follows_canonical_text() {
    let explicit = parse("Agent[01] AND (Agent[01] VOTE Agent[02]) (Agent[01] VOTE Agent[03])");
    let implicit = parse("Agent[01] AND (VOTE Agent[02]) (VOTE Agent[03])");
    assert_eq!(explicit, implicit);

    let set: HashSet<Content> = [explicit, implicit, parse("VOTE Agent[02]")]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn lenient_fallback_is_skip() {
    let c = parse("not a real utterance");
    assert_eq!(c.topic(), Topic::Skip);
    assert_eq!(c.text(), "Skip");
}

#[test]
fn strict_parse_explains_failure() {
    let ctx = ParseContext::default();
    let err = try_parse("not a real utterance", &ctx).unwrap_err();
    assert!(matches!(err, GrammarError::ParseFailed { .. }));
    assert!(err.to_string().contains("not a real utterance"));
}

// ---------------------------------------------------------------------------
// Generic REQUEST fallback
// ---------------------------------------------------------------------------

#[test]
fn targetless_request_with_subject_clause() {
    let c = parse("REQUEST (Agent[02] GUARD Agent[01])");
    assert_eq!(c.target(), agent(2));
    assert_eq!(c.text(), "REQUEST Agent[02] (GUARD Agent[01])");
}

#[test]
fn targetless_request_with_bare_clause_addresses_any() {
    let c = parse("Agent[01] REQUEST (VOTE Agent[03])");
    assert_eq!(c.target(), Agent::ANY);
    assert_eq!(c.children()[0].subject(), Agent::ANY);
    assert_eq!(c.text(), "Agent[01] REQUEST ANY (VOTE Agent[03])");
}

#[test]
fn targetless_request_rejects_two_clauses() {
    assert!(parse("REQUEST (VOTE Agent[01]) (VOTE Agent[02])").is_skip());
    let err = try_parse(
        "REQUEST (VOTE Agent[01]) (VOTE Agent[02])",
        &ParseContext::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        GrammarError::ArityMismatch {
            operator: Operator::Request,
            actual: 2,
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Builder / parser agreement
// ---------------------------------------------------------------------------

#[test]
fn builder_matches_parser() {
    let built = builder::because(
        agent(1),
        builder::divined(Agent::NONE, agent(3), Species::Werewolf),
        builder::request(Agent::NONE, Agent::ANY, builder::vote(Agent::NONE, agent(3))),
    );
    let parsed = parse("Agent[01] BECAUSE (DIVINED Agent[03] WEREWOLF) (REQUEST ANY (VOTE Agent[03]))");
    assert_eq!(built, parsed);
    assert_eq!(built.children()[1].children()[0].subject(), Agent::ANY);
}

#[test]
fn every_shape_builds_its_literal() {
    let (a1, a2, a3) = (agent(1), agent(2), agent(3));
    let n = Agent::NONE;
    let cases: Vec<(Content, &str)> = vec![
        (builder::skip(), "Skip"),
        (builder::over(), "Over"),
        (builder::agree(a1, UtteranceRef::talk(1, 2)), "Agent[01] AGREE TALK day1 ID:2"),
        (builder::disagree(n, UtteranceRef::whisper(2, 0)), "DISAGREE WHISPER day2 ID:0"),
        (builder::estimate(a1, a2, Role::Villager), "Agent[01] ESTIMATE Agent[02] VILLAGER"),
        (builder::coming_out(a1, a1, Role::Bodyguard), "Agent[01] COMINGOUT Agent[01] BODYGUARD"),
        (builder::divined(a1, a2, Species::Human), "Agent[01] DIVINED Agent[02] HUMAN"),
        (builder::identified(a1, a2, Species::Werewolf), "Agent[01] IDENTIFIED Agent[02] WEREWOLF"),
        (builder::divination(a1, a2), "Agent[01] DIVINATION Agent[02]"),
        (builder::guard(a1, a2), "Agent[01] GUARD Agent[02]"),
        (builder::guarded(a1, a2), "Agent[01] GUARDED Agent[02]"),
        (builder::vote(a1, a2), "Agent[01] VOTE Agent[02]"),
        (builder::voted(a1, a2), "Agent[01] VOTED Agent[02]"),
        (builder::attack(a1, a2), "Agent[01] ATTACK Agent[02]"),
        (builder::attacked(a1, a2), "Agent[01] ATTACKED Agent[02]"),
        (
            builder::request(a1, a2, builder::vote(n, a3)),
            "Agent[01] REQUEST Agent[02] (Agent[02] VOTE Agent[03])",
        ),
        (
            builder::inquire(a1, Agent::ANY, builder::guard(n, a3)),
            "Agent[01] INQUIRE ANY (ANY GUARD Agent[03])",
        ),
        (
            builder::because(a1, builder::divined(n, a3, Species::Werewolf), builder::vote(n, a3)),
            "Agent[01] BECAUSE (Agent[01] DIVINED Agent[03] WEREWOLF) (Agent[01] VOTE Agent[03])",
        ),
        (
            builder::xor(a1, builder::vote(n, a2), builder::vote(n, a3)),
            "Agent[01] XOR (VOTE Agent[02]) (VOTE Agent[03])",
        ),
        (
            builder::and(a1, [builder::vote(n, a2), builder::vote(a2, a3)]).unwrap(),
            "Agent[01] AND (VOTE Agent[02]) (Agent[02] VOTE Agent[03])",
        ),
        (
            builder::or(n, [builder::attack(n, a2)]).unwrap(),
            "OR (ATTACK Agent[02])",
        ),
        (builder::not(a1, builder::guard(n, a2)), "Agent[01] NOT (GUARD Agent[02])"),
        (
            builder::day(a1, 3, builder::voted(n, a2)),
            "Agent[01] DAY 3 (VOTED Agent[02])",
        ),
    ];
    for (built, literal) in cases {
        assert_eq!(built.text(), parse(literal).text(), "mismatch for {literal:?}");
    }
}

#[test]
fn builder_reports_misuse() {
    let err = builder::or(agent(1), std::iter::empty::<Content>()).unwrap_err();
    assert!(matches!(err, GrammarError::EmptyOperands { .. }));
    let err = builder::compose(agent(1), Operator::Xor, Agent::ANY, 0, vec![builder::skip()]).unwrap_err();
    assert!(matches!(err, GrammarError::ArityMismatch { .. }));
}

#[test]
fn with_subject_fills_unattributed_clauses() {
    let plain = parse("AND (VOTE Agent[02]) (Agent[05] VOTE Agent[03])");
    let owned = plain.with_subject(agent(4));
    assert_eq!(owned.children()[0].subject(), agent(4));
    assert_eq!(owned.children()[1].subject(), agent(5));
    assert_eq!(
        owned.text(),
        "Agent[04] AND (VOTE Agent[02]) (Agent[05] VOTE Agent[03])"
    );
    assert_eq!(strip_subject(owned.text()), plain.text());
}

// ---------------------------------------------------------------------------
// Randomized round-trip
// ---------------------------------------------------------------------------

fn random_agent(rng: &mut StdRng) -> Agent {
    match rng.gen_range(0..6) {
        0 => Agent::NONE,
        1 => Agent::ANY,
        _ => agent(rng.gen_range(1..=15)),
    }
}

fn random_clauses(rng: &mut StdRng, depth: usize, count: usize) -> Vec<Content> {
    (0..count).map(|_| random_content(rng, depth - 1)).collect()
}

fn random_content(rng: &mut StdRng, depth: usize) -> Content {
    let subject = random_agent(rng);
    let target = random_agent(rng);
    let choice = if depth == 0 {
        rng.gen_range(0..9)
    } else {
        rng.gen_range(0..17)
    };
    match choice {
        0 => builder::skip(),
        1 => builder::over(),
        2 => builder::agree(
            subject,
            UtteranceRef::talk(rng.gen_range(-1..5), rng.gen_range(0..40)),
        ),
        3 => builder::disagree(
            subject,
            UtteranceRef::whisper(rng.gen_range(0..5), rng.gen_range(-1..40)),
        ),
        4 => builder::estimate(subject, target, *Role::ALL.choose(rng).unwrap()),
        5 => builder::coming_out(subject, target, *Role::ALL.choose(rng).unwrap()),
        6 => builder::divined(subject, target, *Species::ALL.choose(rng).unwrap()),
        7 => builder::identified(subject, target, *Species::ALL.choose(rng).unwrap()),
        8 => {
            let actions: [fn(Agent, Agent) -> Content; 7] = [
                builder::vote,
                builder::voted,
                builder::guard,
                builder::guarded,
                builder::attack,
                builder::attacked,
                builder::divination,
            ];
            actions.choose(rng).unwrap()(subject, target)
        }
        9 => builder::request(subject, target, random_content(rng, depth - 1)),
        10 => builder::inquire(subject, target, random_content(rng, depth - 1)),
        11 => builder::because(
            subject,
            random_content(rng, depth - 1),
            random_content(rng, depth - 1),
        ),
        12 => builder::xor(
            subject,
            random_content(rng, depth - 1),
            random_content(rng, depth - 1),
        ),
        13 => {
            let n = rng.gen_range(1..=3);
            builder::and(subject, random_clauses(rng, depth, n)).unwrap()
        }
        14 => {
            let n = rng.gen_range(1..=3);
            builder::or(subject, random_clauses(rng, depth, n)).unwrap()
        }
        15 => builder::not(subject, random_content(rng, depth - 1)),
        _ => builder::day(subject, rng.gen_range(0..15), random_content(rng, depth - 1)),
    }
}

#[test]
fn random_trees_round_trip_through_text() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0f_f0e5);
    let ctx = ParseContext::default();
    for _ in 0..500 {
        let built = random_content(&mut rng, 3);
        let reparsed = try_parse(built.text(), &ctx)
            .unwrap_or_else(|e| panic!("{:?} failed to parse: {e}", built.text()));
        assert_eq!(reparsed, built);
        assert_eq!(normalize(reparsed.text()), built.text());
    }
}

// ---------------------------------------------------------------------------
// Registry, config, records
// ---------------------------------------------------------------------------

#[test]
fn registry_collects_agents_across_lines() {
    let registry = AgentRegistry::new();
    let ctx = ParseContext::with_registry(&registry);
    for line in [
        "Agent[01] COMINGOUT Agent[01] SEER",
        "Agent[01] DIVINED Agent[07] WEREWOLF",
        "REQUEST ANY (VOTE Agent[07])",
        "gibberish Agent[09]",
    ] {
        parse_with(line, &ctx);
    }
    let labels: Vec<String> = registry.all().into_iter().map(|m| m.label).collect();
    assert_eq!(labels, vec!["Agent[01]", "Agent[07]"]);
    assert_eq!(registry.lookup("Agent[7]").unwrap(), Some(agent(7)));
    assert_eq!(registry.lookup("Agent[09]").unwrap(), None);
}

#[test]
fn config_file_drives_depth_limit() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("grammar.toml");
    std::fs::write(&path, "max_depth = 1\n").unwrap();

    let config = GrammarConfig::load(&path).unwrap();
    let ctx = ParseContext::from_config(&config, None);
    assert!(try_parse("NOT (VOTE Agent[01])", &ctx).is_ok());
    assert!(matches!(
        try_parse("NOT (NOT (VOTE Agent[01]))", &ctx),
        Err(GrammarError::DepthExceeded { max_depth: 1 })
    ));
    assert_eq!(
        parse_with("NOT (NOT (VOTE Agent[01]))", &ctx).text(),
        "NOT (NOT (Skip))"
    );
}

#[test]
fn content_serde_uses_text() {
    let c = parse("Agent[03] INQUIRE Agent[04] (Agent[04] COMINGOUT Agent[04] MEDIUM)");
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"Agent[03] INQUIRE Agent[04] (COMINGOUT Agent[04] MEDIUM)\"");
    let back: Content = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);

    let junk: Content = serde_json::from_str("\"??\"").unwrap();
    assert!(junk.is_skip());
}

#[test]
fn talk_log_round_trip() {
    let log = r#"[
        {"idx": 0, "day": 1, "turn": 0, "agent": 1, "text": "COMINGOUT Agent[01] SEER"},
        {"idx": 1, "day": 1, "turn": 0, "agent": 2, "text": "Agent[01] AGREE TALK day1 ID:0"},
        {"idx": 2, "day": 1, "turn": 1, "agent": 3, "text": "Over"}
    ]"#;
    let talks: Vec<Utterance> = serde_json::from_str(log).unwrap();
    let contents: Vec<Content> = talks.iter().map(Utterance::attributed_content).collect();
    assert_eq!(contents[0].text(), "Agent[01] COMINGOUT Agent[01] SEER");
    assert_eq!(talks[0].content().text(), "COMINGOUT Agent[01] SEER");
    assert_eq!(contents[1].utterance(), Some(talks[0].reference()));
    assert_eq!(contents[2].topic(), Topic::Over);
    assert!(talks[2].is_over());
}
