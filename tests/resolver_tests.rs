
use wiki_navigator::encyclopedia::{EncyclopediaCall, MockEncyclopedia};
use wiki_navigator::resolver::{LookupOutcome, TopicResolver, MAX_CANDIDATES};

use crate::test_utils::{fixture_encyclopedia, BERLIN_TEXT};

fn resolver() -> TopicResolver<MockEncyclopedia> {
    TopicResolver::new(fixture_encyclopedia())
}

#[tokio::test]
async fn exact_title_resolves_with_content_and_url() {
    let resolver = resolver();

    let outcome = resolver.resolve("Berlin").await;

    match outcome {
        LookupOutcome::Resolved { title, content, url } => {
            assert_eq!(title, "Berlin");
            assert_eq!(content, BERLIN_TEXT);
            let parsed = reqwest::Url::parse(&url).expect("well-formed URL");
            assert_eq!(parsed.scheme(), "https");
            assert_eq!(parsed.path(), "/wiki/Berlin");
        }
        other => panic!("expected Resolved, got {other:?}"),
    }
    assert_eq!(resolver.service().calls(), vec![EncyclopediaCall::Page("Berlin".into())]);
}

#[tokio::test]
async fn surrounding_whitespace_is_ignored() {
    let outcome = resolver().resolve("   Berlin   ").await;
    assert!(outcome.is_resolved());
}

#[tokio::test]
async fn ambiguous_topic_lists_ranked_search_hits() {
    let resolver = resolver();

    let outcome = resolver.resolve("Bank").await;

    assert_eq!(
        outcome,
        LookupOutcome::Ambiguous {
            candidates: vec![
                "Bank (Kreditinstitut)".into(),
                "Bank (Möbel)".into(),
                "Sandbank".into(),
                "Bank (Geologie)".into(),
                "Datenbank".into(),
            ]
        }
    );
    assert_eq!(outcome.candidates().len(), MAX_CANDIDATES);
    // No suggestion exists, so there is no second page lookup
    assert_eq!(
        resolver.service().calls(),
        vec![
            EncyclopediaCall::Page("Bank".into()),
            EncyclopediaCall::Search("Bank".into()),
            EncyclopediaCall::Suggest("Bank".into()),
        ]
    );
}

#[tokio::test]
async fn ambiguous_topic_without_search_hits_keeps_link_order() {
    let encyclopedia = MockEncyclopedia::new().with_disambiguation(
        "Kiefer",
        &["Kiefer (Botanik)", "Kiefer (Anatomie)", "Kiefer (Familienname)", "A", "B", "C"],
    );
    let resolver = TopicResolver::new(encyclopedia);

    let outcome = resolver.resolve("Kiefer").await;

    assert_eq!(
        outcome.candidates(),
        ["Kiefer (Botanik)", "Kiefer (Anatomie)", "Kiefer (Familienname)", "A", "B"].map(String::from)
    );
}

#[tokio::test]
async fn ambiguous_topic_follows_suggestion_once() {
    let resolver = resolver();

    let outcome = resolver.resolve("Merkur").await;

    match outcome {
        LookupOutcome::Resolved { title, .. } => assert_eq!(title, "Merkur (Planet)"),
        other => panic!("expected Resolved via suggestion, got {other:?}"),
    }
    let pages: Vec<_> = resolver
        .service()
        .calls()
        .into_iter()
        .filter(|c| matches!(c, EncyclopediaCall::Page(_)))
        .collect();
    assert_eq!(pages.len(), 2);
}

#[tokio::test]
async fn misspelling_is_corrected_by_suggestion() {
    let outcome = resolver().resolve("Berln").await;
    match outcome {
        LookupOutcome::Resolved { title, .. } => assert_eq!(title, "Berlin"),
        other => panic!("expected Resolved, got {other:?}"),
    }
}

#[tokio::test]
async fn lowercase_suggestion_is_capitalized() {
    let encyclopedia = MockEncyclopedia::new()
        .with_article("Photosynthese", "Photosynthese ist ...")
        .with_suggestion("Photosynthse", "photosynthese");
    let resolver = TopicResolver::new(encyclopedia);

    let outcome = resolver.resolve("Photosynthse").await;

    assert!(outcome.is_resolved(), "got {outcome:?}");
    assert!(resolver.service().calls().contains(&EncyclopediaCall::Page("Photosynthese".into())));
}

#[tokio::test]
async fn unknown_topic_without_suggestion_returns_search_results() {
    let outcome = resolver().resolve("Hausbaum").await;
    match outcome {
        LookupOutcome::NotFound { candidates } => {
            assert_eq!(candidates.len(), MAX_CANDIDATES);
            assert_eq!(candidates[0], "Baum");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn nonsense_topic_returns_empty_not_found() {
    let outcome = resolver().resolve("Xyztkrplmn").await;
    assert_eq!(outcome, LookupOutcome::NotFound { candidates: vec![] });
}

#[tokio::test]
async fn attempts_are_capped_at_two() {
    // Each suggestion points at yet another missing title
    let encyclopedia = MockEncyclopedia::new()
        .with_suggestion("Goethee", "Goethe")
        .with_suggestion("Goethe", "Göthe")
        .with_search_results("Goethe", &["Johann Wolfgang von Goethe", "Goethe-Institut"]);
    let resolver = TopicResolver::new(encyclopedia);

    let outcome = resolver.resolve("Goethee").await;

    assert_eq!(
        outcome,
        LookupOutcome::NotFound {
            candidates: vec!["Johann Wolfgang von Goethe".into(), "Goethe-Institut".into()]
        }
    );
    assert_eq!(
        resolver.service().calls(),
        vec![
            EncyclopediaCall::Page("Goethee".into()),
            EncyclopediaCall::Suggest("Goethee".into()),
            EncyclopediaCall::Page("Goethe".into()),
            EncyclopediaCall::Search("Goethe".into()),
        ]
    );
}

#[tokio::test]
async fn ambiguous_retry_keeps_earlier_ambiguity_when_retry_finds_none() {
    let encyclopedia = MockEncyclopedia::new()
        .with_disambiguation("Stern", &["Stern (Astronomie)", "Stern (Zeitschrift)"])
        .with_suggestion("Stern", "Sterne");
    let resolver = TopicResolver::new(encyclopedia);

    let outcome = resolver.resolve("Stern").await;

    assert_eq!(
        outcome,
        LookupOutcome::Ambiguous {
            candidates: vec!["Stern (Astronomie)".into(), "Stern (Zeitschrift)".into()]
        }
    );
}

#[tokio::test]
async fn suggestion_equal_to_topic_is_not_retried() {
    let encyclopedia = MockEncyclopedia::new()
        .with_disambiguation("Jaguar", &["Jaguar (Tier)", "Jaguar (Automarke)"])
        .with_suggestion("Jaguar", "jaguar");
    let resolver = TopicResolver::new(encyclopedia);

    let outcome = resolver.resolve("Jaguar").await;

    assert!(matches!(outcome, LookupOutcome::Ambiguous { ref candidates } if candidates.len() == 2));
    // Page, search for candidates, suggestion; no second page lookup
    assert_eq!(resolver.service().call_count(), 3);
}

#[tokio::test]
async fn service_failure_is_reported_distinctly() {
    let resolver = TopicResolver::new(MockEncyclopedia::new().unavailable());

    let outcome = resolver.resolve("Berlin").await;

    match outcome {
        LookupOutcome::ServiceUnavailable { detail } => assert!(detail.contains("connection refused")),
        other => panic!("expected ServiceUnavailable, got {other:?}"),
    }
    assert_eq!(resolver.service().call_count(), 1);
}

#[tokio::test]
async fn failure_during_suggestion_retry_is_not_reported_as_not_found() {
    // Page("Berln") and Suggest("Berln") succeed, the retried Page("Berlin") fails
    let resolver = TopicResolver::new(fixture_encyclopedia().unavailable_after(2));

    let outcome = resolver.resolve("Berln").await;

    match outcome {
        LookupOutcome::ServiceUnavailable { detail } => assert!(detail.contains("connection refused")),
        other => panic!("expected ServiceUnavailable, got {other:?}"),
    }
    assert_eq!(resolver.service().call_count(), 3);
}

#[tokio::test]
async fn failure_during_ambiguity_retry_keeps_the_candidates() {
    // Page, Search and Suggest for "Merkur" succeed, the retried page lookup fails
    let resolver = TopicResolver::new(fixture_encyclopedia().unavailable_after(3));

    let outcome = resolver.resolve("Merkur").await;

    assert_eq!(
        outcome,
        LookupOutcome::Ambiguous {
            candidates: vec![
                "Merkur (Mythologie)".into(),
                "Merkur (Planet)".into(),
                "Merkur (Zeitschrift)".into(),
            ]
        }
    );
}

#[tokio::test]
async fn failure_while_ranking_ambiguity_candidates_is_reported() {
    let resolver = TopicResolver::new(fixture_encyclopedia().unavailable_after(1));

    let outcome = resolver.resolve("Bank").await;

    assert!(matches!(outcome, LookupOutcome::ServiceUnavailable { .. }));
}
