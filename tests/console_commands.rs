//! 控制台前端测试

mod fixtures;

use std::sync::Arc;

use fixtures::{assistant, Scripted, ScriptedService};
use folio_assistant::core::assistant::{CHAT_FAILED, SUMMARY_UNAVAILABLE};
use folio_assistant::{Console, ConsoleCommand, Flow};

fn text(flow: Flow) -> String {
    match flow {
        Flow::Continue(text) => text,
        Flow::Exit => panic!("console exited"),
    }
}

#[tokio::test]
async fn test_summary_is_cached_per_project() {
    let service = Arc::new(ScriptedService::replying("A tidy paragraph."));
    let mut console = Console::new(assistant(service.clone()));

    let first = text(console.handle(ConsoleCommand::Summary("chain-clash".into())).await);
    let second = text(console.handle(ConsoleCommand::Summary("chain-clash".into())).await);

    assert_eq!(first, "A tidy paragraph.");
    assert_eq!(second, first);
    assert_eq!(service.call_count(), 1);
    assert_eq!(console.cached_summary("chain-clash"), Some("A tidy paragraph."));
}

#[tokio::test]
async fn test_summary_failure_shows_retry_and_is_not_cached() {
    let service = Arc::new(ScriptedService::new([
        Scripted::Empty,
        Scripted::Reply("Second time lucky.".to_string()),
    ]));
    let mut console = Console::new(assistant(service.clone()));

    let failed = text(console.handle(ConsoleCommand::Summary("audit-gpt".into())).await);
    assert_eq!(failed, SUMMARY_UNAVAILABLE);
    assert_eq!(console.summary_error("audit-gpt"), Some(SUMMARY_UNAVAILABLE));
    assert!(console.cached_summary("audit-gpt").is_none());

    let retried = text(console.handle(ConsoleCommand::Summary("audit-gpt".into())).await);
    assert_eq!(retried, "Second time lucky.");
    assert!(console.summary_error("audit-gpt").is_none());
    assert_eq!(service.call_count(), 2);
}

#[tokio::test]
async fn test_unknown_project_makes_no_request() {
    let service = Arc::new(ScriptedService::echo());
    let mut console = Console::new(assistant(service.clone()));

    let out = text(console.handle(ConsoleCommand::DeepDive("nope".into())).await);
    assert!(out.contains("No project with id 'nope'"));
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_deep_dive_is_titled_and_cached() {
    let service = Arc::new(ScriptedService::replying("## 🔧 System Architecture\nRaft."));
    let mut console = Console::new(assistant(service.clone()));

    let out = text(console.handle(ConsoleCommand::DeepDive("rust-raft-consensus".into())).await);
    assert!(out.starts_with("# Distributed Log Store\n\n"));
    assert!(out.contains("Raft."));

    console.handle(ConsoleCommand::DeepDive("rust-raft-consensus".into())).await;
    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn test_blog_draft_is_prepended_to_feed() {
    let service = Arc::new(ScriptedService::replying(
        "# Proofs Without Secrets\n\nZK in two hundred words.",
    ));
    let mut console = Console::new(assistant(service));
    assert_eq!(console.feed().len(), 2);

    let out = text(console.handle(ConsoleCommand::Blog("Zero Knowledge Proofs".into())).await);
    assert!(out.contains("AI Generated, Tech"));

    let newest = &console.feed().posts()[0];
    assert_eq!(console.feed().len(), 3);
    assert_eq!(newest.title, "Proofs Without Secrets");
    assert!(newest.id.starts_with("ai-gen-"));
    assert_eq!(newest.date.len(), 10);
}

#[tokio::test]
async fn test_empty_blog_topic_is_rejected() {
    let service = Arc::new(ScriptedService::echo());
    let mut console = Console::new(assistant(service.clone()));

    let out = text(console.handle(ConsoleCommand::Blog("   ".into())).await);
    assert!(out.starts_with("Enter a topic"));
    assert_eq!(service.call_count(), 0);
    assert_eq!(console.feed().len(), 2);
}

#[tokio::test]
async fn test_failed_blog_draft_is_not_published() {
    let service = Arc::new(ScriptedService::new([Scripted::NetworkFailure]));
    let mut console = Console::new(assistant(service));

    let out = text(console.handle(ConsoleCommand::Blog("Rust".into())).await);
    assert_eq!(out, "Could not generate blog post at this time.");
    assert_eq!(console.feed().len(), 2);
}

#[tokio::test]
async fn test_chat_transcript_flags_errors() {
    let service = Arc::new(ScriptedService::new([
        Scripted::Reply("Hello there.".to_string()),
        Scripted::NetworkFailure,
    ]));
    let mut console = Console::new(assistant(service));

    assert_eq!(text(console.handle(ConsoleCommand::parse("hi")).await), "Hello there.");
    assert_eq!(text(console.handle(ConsoleCommand::parse("still there?")).await), CHAT_FAILED);

    let transcript = console.transcript();
    assert_eq!(transcript.len(), 4);
    assert!(!transcript[1].is_error);
    assert!(transcript[3].is_error);

    let history = text(console.handle(ConsoleCommand::History).await);
    assert!(history.contains("assistant (error): Sorry"));
}

#[tokio::test]
async fn test_run_loop_reads_until_quit() {
    let service = Arc::new(ScriptedService::echo());
    let mut console = Console::new(assistant(service.clone()));

    let input: &[u8] = b"/posts\nhello\n/quit\nignored\n";
    let mut output = Vec::new();
    console.run(input, &mut output).await.unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("web3-future"));
    assert!(printed.contains("echo: hello"));
    assert!(!printed.contains("ignored"));
    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn test_listing_commands_make_no_requests() {
    let service = Arc::new(ScriptedService::echo());
    let mut console = Console::new(assistant(service.clone()));

    let projects = text(console.handle(ConsoleCommand::Projects).await);
    assert!(projects.contains("chain-clash"));
    assert!(projects.contains("[Rust, Linera SDK, Wasm, React]"));

    let hackathons = text(console.handle(ConsoleCommand::Hackathons).await);
    assert!(hackathons.contains("https://dorahacks.io/hacker/dinitheth"));

    let profile = text(console.handle(ConsoleCommand::Profile).await);
    assert!(profile.starts_with("Dinith Tharindu"));

    let post = text(console.handle(ConsoleCommand::Post("rust-for-ai".into())).await);
    assert!(post.contains("## Why Rust Matters"));

    assert_eq!(console.handle(ConsoleCommand::Quit).await, Flow::Exit);
    assert_eq!(service.call_count(), 0);
}
