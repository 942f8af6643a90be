
use wiki_navigator::clients::{FlexibleClient, MockResponse};
use wiki_navigator::config::AppConfig;
use wiki_navigator::console::Console;
use wiki_navigator::core::ChatClient;
use wiki_navigator::encyclopedia::{EncyclopediaService, MockEncyclopedia};
use wiki_navigator::Navigator;

use crate::test_utils::{fixture_encyclopedia, fixture_navigator, valid_three_question_payload};

const BERLIN_SUMMARY: &str = "Berlin ist die Hauptstadt von Deutschland. Dort leben viele Menschen.";

async fn drive<E, C>(navigator: &Navigator<E, C>, input: &str) -> String
where
    E: EncyclopediaService,
    C: ChatClient + Clone,
{
    let mut console = Console::new(input.as_bytes(), Vec::new(), 80).without_color();
    console.run(navigator).await.expect("console I/O on buffers");
    String::from_utf8(console.into_output()).expect("utf-8 output")
}

#[tokio::test]
async fn quit_says_goodbye() {
    let (navigator, encyclopedia, handle) = fixture_navigator(vec![]);

    let out = drive(&navigator, "2\n").await;

    assert!(out.contains("1. Search an article"));
    assert!(out.contains("Goodbye!"));
    assert_eq!(encyclopedia.call_count(), 0);
    assert_eq!(handle.call_count(), 0);
}

#[tokio::test]
async fn end_of_input_exits_cleanly() {
    let (navigator, _encyclopedia, _handle) = fixture_navigator(vec![]);

    let out = drive(&navigator, "").await;

    assert!(out.contains("Goodbye!"));
}

#[tokio::test]
async fn invalid_menu_choice_is_reported() {
    let (navigator, _encyclopedia, _handle) = fixture_navigator(vec![]);

    let out = drive(&navigator, "7\n2\n").await;

    assert!(out.contains("Invalid input. Please choose 1 or 2."));
    assert!(out.contains("Goodbye!"));
}

#[tokio::test]
async fn blank_topic_makes_no_requests() {
    let (navigator, encyclopedia, handle) = fixture_navigator(vec![]);

    let out = drive(&navigator, "1\n\n1\n   \n2\n").await;

    assert_eq!(out.matches("Please enter a topic.").count(), 2);
    assert_eq!(encyclopedia.call_count(), 0);
    assert_eq!(handle.call_count(), 0);
}

#[tokio::test]
async fn resolved_topic_shows_summary_and_link() {
    let (navigator, _encyclopedia, handle) =
        fixture_navigator(vec![MockResponse::Success(BERLIN_SUMMARY.into())]);

    let out = drive(&navigator, "1\nBerlin\nn\n2\n").await;

    assert!(out.contains("SUMMARY"));
    assert!(out.contains("Berlin ist die Hauptstadt von Deutschland."));
    assert!(out.contains("https://de.wikipedia.org/wiki/Berlin"));
    assert!(out.contains("Would you like a short quiz? (y/n): "));
    assert!(!out.contains("QUIZ"));
    assert_eq!(handle.call_count(), 1);
}

#[tokio::test]
async fn accepted_quiz_is_scored() {
    let (navigator, _encyclopedia, handle) = fixture_navigator(vec![
        MockResponse::Success(BERLIN_SUMMARY.into()),
        MockResponse::Success(valid_three_question_payload()),
    ]);

    let out = drive(&navigator, "1\nBerlin\nj\nb\nq\na\nD\n\n2\n").await;

    assert!(out.contains("Q1: Was ist Berlin?"));
    assert!(out.contains("B) Die Hauptstadt"));
    assert!(out.contains("Please enter only A, B, C or D."));
    assert!(out.contains("Correct: 3/3 (100%)"));
    assert!(out.contains("Very good!"));
    assert!(out.contains("Goodbye!"));

    let requests = handle.requests();
    assert_eq!(requests.len(), 2);
    // The quiz is generated from the summary, not from the article
    assert!(requests[1].user.contains(BERLIN_SUMMARY));
}

#[tokio::test]
async fn partly_wrong_quiz_shows_lower_tier() {
    let (navigator, _encyclopedia, _handle) = fixture_navigator(vec![
        MockResponse::Success(BERLIN_SUMMARY.into()),
        MockResponse::Success(valid_three_question_payload()),
    ]);

    let out = drive(&navigator, "1\nBerlin\nyes\nA\nA\nA\n\n2\n").await;

    assert!(out.contains("Correct: 1/3 (33%)"));
    assert!(out.contains("Maybe read the summary once more."));
}

#[tokio::test]
async fn result_waits_for_enter_before_the_menu() {
    let (navigator, _encyclopedia, _handle) = fixture_navigator(vec![
        MockResponse::Success(BERLIN_SUMMARY.into()),
        MockResponse::Success(valid_three_question_payload()),
    ]);

    // The line after the last answer is swallowed by the pause, not read as a menu choice
    let out = drive(&navigator, "1\nBerlin\nj\nB\nA\nD\n7\n2\n").await;

    let result_at = out.find("Correct: 3/3 (100%)").expect("result shown");
    let pause_at = out.find("Press Enter to return to menu...").expect("pause shown");
    assert!(pause_at > result_at);
    assert!(!out.contains("Invalid input"));
    assert_eq!(out.matches("Please choose an option:").count(), 2);
    assert!(out.contains("Goodbye!"));
}

#[tokio::test]
async fn malformed_quiz_is_skipped_silently() {
    let (navigator, _encyclopedia, handle) = fixture_navigator(vec![
        MockResponse::Success(BERLIN_SUMMARY.into()),
        MockResponse::Success("Here are some questions: 1) ...".into()),
    ]);

    let out = drive(&navigator, "1\nBerlin\nj\n2\n").await;

    assert_eq!(handle.call_count(), 2);
    assert!(!out.contains("Q1:"));
    assert!(!out.contains("Correct:"));
    assert!(out.contains("Goodbye!"));
}

#[tokio::test]
async fn apology_summary_skips_quiz_offer() {
    let (navigator, _encyclopedia, handle) =
        fixture_navigator(vec![MockResponse::Error("service down".into())]);

    let out = drive(&navigator, "1\nBerlin\n2\n").await;

    assert!(out.contains("Sorry, the AI is currently unavailable."));
    assert!(out.contains("service down"));
    assert!(!out.contains("Would you like a short quiz?"));
    assert_eq!(handle.call_count(), 1);
}

#[tokio::test]
async fn ambiguous_topic_lists_candidates_without_ai_calls() {
    let (navigator, _encyclopedia, handle) = fixture_navigator(vec![]);

    let out = drive(&navigator, "1\nBank\n2\n").await;

    assert!(out.contains("The topic is ambiguous. Did you mean:"));
    assert!(out.contains("  - Bank (Möbel)"));
    assert!(out.contains("  - Datenbank"));
    assert!(!out.contains("Bankwesen"));
    assert_eq!(handle.call_count(), 0);
}

#[tokio::test]
async fn unknown_topic_lists_search_results() {
    let (navigator, _encyclopedia, handle) = fixture_navigator(vec![]);

    let out = drive(&navigator, "1\nHausbaum\n1\nXyztkrplmn\n2\n").await;

    assert_eq!(out.matches("No matching article found.").count(), 2);
    assert_eq!(out.matches("Search results:").count(), 1);
    assert!(out.contains("  - Baum"));
    assert_eq!(handle.call_count(), 0);
}

#[tokio::test]
async fn unreachable_encyclopedia_is_reported() {
    let (client, handle) = FlexibleClient::mock();
    let navigator = Navigator::new(MockEncyclopedia::new().unavailable(), client, &AppConfig::default());

    let out = drive(&navigator, "1\nBerlin\n2\n").await;

    assert!(out.contains("Wikipedia is not reachable right now"));
    assert!(out.contains("Goodbye!"));
    assert_eq!(handle.call_count(), 0);
}

#[tokio::test]
async fn outage_during_spelling_retry_is_not_shown_as_missing_article() {
    let (client, _handle) = FlexibleClient::mock();
    let navigator = Navigator::new(fixture_encyclopedia().unavailable_after(2), client, &AppConfig::default());

    let out = drive(&navigator, "1\nBerln\n2\n").await;

    assert!(out.contains("Wikipedia is not reachable right now"));
    assert!(!out.contains("No matching article found."));
}

#[tokio::test]
async fn input_closing_mid_quiz_ends_without_score() {
    let (navigator, _encyclopedia, _handle) = fixture_navigator(vec![
        MockResponse::Success(BERLIN_SUMMARY.into()),
        MockResponse::Success(valid_three_question_payload()),
    ]);

    let out = drive(&navigator, "1\nBerlin\nj\nb\n").await;

    assert!(out.contains("Q2:"));
    assert!(!out.contains("Correct:"));
    assert!(out.contains("Goodbye!"));
}
