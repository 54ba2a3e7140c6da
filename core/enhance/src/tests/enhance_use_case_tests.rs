//! 強化ユースケースの振る舞い（判定・戦略の順序・失敗時の素通し）

use std::time::Duration;

use super::support::{mode, use_case, StubClassifier};
use crate::domain::{
    Eligibility, EnhanceMode, EnhanceOutcome, PassthroughReason, PersonaCatalog, PersonaId,
    Unavailable, TASK_MARKER,
};
use crate::ports::inbound::EnhancePrompt;

const VALID_REMOTE: &str = "/dev You are a Senior Developer focused on caching layers.\n\n**Task**: add caching to the user api";

#[test]
fn test_heuristic_renders_business_analyst_for_prd() {
    let remote = StubClassifier::answering("unused");
    let uc = use_case(mode(EnhanceMode::Heuristic), remote.clone());
    let input = "Create a PRD for the checkout flow";
    let outcome = uc.enhance(input);

    let catalog = PersonaCatalog::standard().unwrap();
    let ba = catalog.get(PersonaId::BusinessAnalyst).unwrap();
    assert_eq!(
        outcome,
        EnhanceOutcome::Enhanced {
            text: format!("/business {}\n\n**Task**: {}", ba.context, input),
            strategy: "heuristic",
            persona: Some(PersonaId::BusinessAnalyst),
        }
    );
    assert_eq!(remote.calls(), 0, "heuristic mode never calls the remote classifier");
}

#[test]
fn test_heuristic_output_contains_original_verbatim() {
    let uc = use_case(mode(EnhanceMode::Heuristic), StubClassifier::answering("unused"));
    for input in [
        "  fix the flaky test in ci  ",
        "グラフを描く script を書いて",
        "write a blog post about \"quotes\" & symbols",
    ] {
        let text = uc.enhance(input).into_text();
        let task = format!("{} {}", TASK_MARKER, input);
        assert!(text.ends_with(&task), "{:?} lost the original input", text);
    }
}

#[test]
fn test_short_and_reserved_inputs_pass_through() {
    let uc = use_case(mode(EnhanceMode::Heuristic), StubClassifier::answering("unused"));
    assert_eq!(
        uc.enhance("hi"),
        EnhanceOutcome::Passthrough {
            text: "hi".to_string(),
            reason: PassthroughReason::Ineligible(Eligibility::TooShort { len: 2, min_len: 5 }),
        }
    );
    for input in ["/commit all staged changes", "@src/main.rs explain this", "help me write tests"] {
        let outcome = uc.enhance(input);
        assert!(outcome.is_passthrough(), "{} should pass through", input);
        assert_eq!(outcome.text(), input);
    }
}

#[test]
fn test_remote_mode_short_input_skips_classifier() {
    let remote = StubClassifier::answering(VALID_REMOTE);
    let uc = use_case(mode(EnhanceMode::Remote), remote.clone());
    let outcome = uc.enhance("fix tests");
    assert_eq!(outcome.text(), "fix tests");
    assert!(outcome.is_passthrough());
    assert_eq!(remote.calls(), 0);
}

#[test]
fn test_remote_valid_response_is_used_verbatim() {
    let remote = StubClassifier::answering(VALID_REMOTE);
    let uc = use_case(mode(EnhanceMode::Remote), remote.clone());
    let outcome = uc.enhance("add caching to the user api");
    assert_eq!(
        outcome,
        EnhanceOutcome::Enhanced {
            text: VALID_REMOTE.to_string(),
            strategy: "remote",
            persona: None,
        }
    );
    assert_eq!(remote.calls(), 1);
}

#[test]
fn test_remote_unavailable_returns_original() {
    let reasons = [
        Unavailable::MissingCredential("GEMINI_API_KEY".to_string()),
        Unavailable::Timeout(Duration::from_secs(15)),
        Unavailable::NotInstalled("gemini".to_string()),
        Unavailable::RateLimited("429".to_string()),
        Unavailable::Transport("broken pipe".to_string()),
    ];
    for reason in reasons {
        let uc = use_case(mode(EnhanceMode::Remote), StubClassifier::failing(reason));
        assert_eq!(
            uc.enhance("add caching to the user api"),
            EnhanceOutcome::Passthrough {
                text: "add caching to the user api".to_string(),
                reason: PassthroughReason::Exhausted,
            }
        );
    }
}

#[test]
fn test_remote_refusal_returns_original() {
    let uc = use_case(
        mode(EnhanceMode::Remote),
        StubClassifier::answering("Error: quota exceeded for project 1234"),
    );
    assert_eq!(uc.enhance("add caching to the user api").text(), "add caching to the user api");

    let uc = use_case(mode(EnhanceMode::Remote), StubClassifier::answering("I cannot help with that request today"));
    assert!(uc.enhance("add caching to the user api").is_passthrough());

    let uc = use_case(mode(EnhanceMode::Remote), StubClassifier::answering("ok"));
    assert!(uc.enhance("add caching to the user api").is_passthrough());
}

#[test]
fn test_hybrid_falls_back_to_heuristic() {
    let remote = StubClassifier::failing(Unavailable::Timeout(Duration::from_secs(30)));
    let uc = use_case(mode(EnhanceMode::Hybrid), remote.clone());
    let outcome = uc.enhance("Deploy the api to kubernetes");
    assert_eq!(remote.calls(), 1);
    match outcome {
        EnhanceOutcome::Enhanced { text, strategy, persona } => {
            assert_eq!(strategy, "heuristic");
            assert_eq!(persona, Some(PersonaId::Devops));
            assert!(text.starts_with("/devops "));
        }
        other => panic!("expected heuristic fallback, got {:?}", other),
    }
}

#[test]
fn test_hybrid_prefers_valid_remote_response() {
    let uc = use_case(mode(EnhanceMode::Hybrid), StubClassifier::answering(VALID_REMOTE));
    assert_eq!(uc.enhance("add caching to the user api").text(), VALID_REMOTE);
    assert_eq!(uc.strategy_names(), vec!["remote", "heuristic"]);
}

#[test]
fn test_forced_persona_skips_classification() {
    let mut config = mode(EnhanceMode::Remote);
    config.forced_persona = Some(PersonaId::Security);
    let remote = StubClassifier::answering(VALID_REMOTE);
    let uc = use_case(config, remote.clone());
    let text = uc.enhance("write a haiku about autumn").into_text();
    assert!(text.starts_with("/security "));
    assert!(text.ends_with("**Task**: write a haiku about autumn"));
    assert_eq!(remote.calls(), 0);
}

#[test]
fn test_same_input_gives_same_output() {
    let uc = use_case(mode(EnhanceMode::Heuristic), StubClassifier::answering("unused"));
    let input = "write a creative story for the marketing blog";
    let first = uc.enhance(input);
    for _ in 0..5 {
        assert_eq!(uc.enhance(input), first);
    }
}

#[test]
fn test_suggest_reports_without_rewriting() {
    let uc = use_case(mode(EnhanceMode::Heuristic), StubClassifier::answering("unused"));
    let suggestion = uc.suggest("Review the parser and fix what you find");
    assert_eq!(suggestion.persona.id, PersonaId::CodeReviewer);
    assert!(suggestion.eligibility.is_eligible());
    let workflow = suggestion.workflow.as_ref().expect("review and fix workflow");
    assert_eq!(workflow.pattern.sequence, [PersonaId::CodeReviewer, PersonaId::SeniorDev]);

    let report = suggestion.to_string();
    assert!(report.contains("Recommended persona: Code Reviewer (/review)"));
    assert!(report.contains("Workflow: "));
}

#[test]
fn test_suggest_notes_ineligible_input() {
    let uc = use_case(mode(EnhanceMode::Remote), StubClassifier::answering("unused"));
    let suggestion = uc.suggest("fix it");
    assert_eq!(
        suggestion.eligibility,
        Eligibility::TooShort { len: 6, min_len: 10 }
    );
    assert!(suggestion.to_string().contains("Note: input is too short"));
}
