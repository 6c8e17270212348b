//! Network-facing CLI commands: chat, ask, health and index.

use color_eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::cli_output::{
    icons, print_error_banner, print_header, print_hint, print_message, print_prompt,
    print_replies, print_result_line, print_status,
};
use crate::client::AssistantClient;
use crate::config::ClientConfig;
use crate::session::{QuerySession, TurnOutcome};
use crate::traits::HttpClient;

use super::version::VERSION;

/// Lines that end a chat.
const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

fn open_session(config: &ClientConfig) -> Result<QuerySession> {
    let client = AssistantClient::from_config(config)?;
    Ok(QuerySession::new(client, Some(config.greeting())).with_idle_timeout(config.idle_timeout))
}

/// Run one turn, cancelling it if Ctrl+C arrives first.
///
/// Each new non-empty status is handed to `on_status` from this task, so
/// nothing is reported once the turn has returned.
async fn run_turn<H, F>(
    session: &mut QuerySession<H>,
    input: &str,
    mut on_status: F,
) -> TurnOutcome
where
    H: HttpClient,
    F: FnMut(&str),
{
    let cancel = CancellationToken::new();
    let mut snapshots = session.subscribe();
    let mut watching = true;
    let mut last_status = String::new();

    let turn = session.submit(input, &cancel);
    tokio::pin!(turn);

    loop {
        tokio::select! {
            biased;
            outcome = &mut turn => return outcome,
            changed = snapshots.changed(), if watching => {
                if changed.is_err() {
                    watching = false;
                    continue;
                }
                let status = snapshots.borrow_and_update().current_status.clone();
                if !status.is_empty() && status != last_status {
                    on_status(&status);
                }
                last_status = status;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Ctrl+C received, cancelling turn");
                cancel.cancel();
            }
        }
    }
}

/// Suggested next step for a failed turn; cancellations need none.
fn failure_hint(outcome: &TurnOutcome) -> Option<&'static str> {
    match outcome {
        TurnOutcome::Failed(err) if !err.is_cancellation() => Some(err.recovery_hint()),
        _ => None,
    }
}

/// Print replies and the banner for a finished turn. Returns true when the
/// turn produced no error of any kind.
fn report_turn<H: HttpClient>(session: &QuerySession<H>, printed: usize, outcome: &TurnOutcome) -> bool {
    let state = session.state();
    print_replies(state.log.messages().iter().skip(printed));

    match outcome {
        TurnOutcome::Rejected(reason) => {
            print_error_banner(&reason.to_string());
            false
        }
        _ => match &state.last_error {
            Some(message) => {
                print_error_banner(message);
                if let Some(hint) = failure_hint(outcome) {
                    print_hint(hint);
                }
                false
            }
            None => outcome.is_completed(),
        },
    }
}

/// Interactive conversation on stdin.
pub async fn run_chat(config: ClientConfig) -> Result<()> {
    let mut session = open_session(&config)?;

    print_header(&format!("REPLOIT {}", VERSION));
    for message in session.state().log.messages() {
        print_message(message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt();
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!();
            break;
        };

        let input = line.trim();
        if QUIT_COMMANDS.contains(&input) {
            break;
        }
        if input.is_empty() {
            continue;
        }

        let printed = session.state().log.len();
        let outcome = run_turn(&mut session, input, print_status).await;
        report_turn(&session, printed, &outcome);
    }

    Ok(())
}

/// Ask one question. Returns false when the turn failed or the agent
/// reported an error.
pub async fn run_ask(config: ClientConfig, question: &str) -> Result<bool> {
    let mut session = open_session(&config)?;
    let printed = session.state().log.len();

    let outcome = run_turn(&mut session, question, |_| {}).await;
    Ok(report_turn(&session, printed, &outcome))
}

/// Probe the backend. Returns false when it is unreachable.
pub async fn run_health(config: ClientConfig) -> Result<bool> {
    let client = AssistantClient::from_config(&config)?;

    match client.service_status().await {
        Ok(status) => {
            print_result_line(
                icons::SUCCESS,
                &format!("{}: {}", client.base_url(), status.status),
            );
            Ok(true)
        }
        Err(e) => {
            tracing::debug!("Health probe failed: {}", e);
            print_result_line(
                icons::FAILURE,
                &format!("{}: {}", client.base_url(), e.user_message()),
            );
            Ok(false)
        }
    }
}

/// Ask the backend to index `repo_url`.
pub async fn run_index(config: ClientConfig, repo_url: &str) -> Result<bool> {
    let client = AssistantClient::from_config(&config)?;

    match client.index_repository(repo_url).await {
        Ok(ack) => {
            print_result_line(icons::SUCCESS, &ack.message);
            Ok(true)
        }
        Err(e) => {
            print_error_banner(&e.user_message());
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;
    use bytes::Bytes;

    fn session(response: MockResponse) -> QuerySession<MockHttpClient> {
        let mock = MockHttpClient::new();
        mock.set_default_response(response);
        QuerySession::new(AssistantClient::with_http("http://test", mock), None)
    }

    #[tokio::test]
    async fn test_report_completed_turn() {
        let mut session = session(MockResponse::Stream(vec![Bytes::from(
            "data: {\"type\":\"final_answer\",\"data\":{\"answer\":\"ok\"}}\n\n",
        )]));
        let outcome = session.submit("q", &CancellationToken::new()).await;
        assert!(report_turn(&session, 0, &outcome));
    }

    #[tokio::test]
    async fn test_report_backend_error_is_failure() {
        let mut session = session(MockResponse::Stream(vec![Bytes::from(
            "data: {\"type\":\"error\",\"data\":{\"message\":\"index not found\"}}\n\n",
        )]));
        let outcome = session.submit("q", &CancellationToken::new()).await;
        assert!(outcome.is_completed());
        assert!(!report_turn(&session, 0, &outcome));
    }

    #[tokio::test]
    async fn test_report_transport_failure() {
        let mut session = session(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let outcome = session.submit("q", &CancellationToken::new()).await;
        assert!(!report_turn(&session, 0, &outcome));
    }

    #[tokio::test]
    async fn test_failed_turn_gets_recovery_hint() {
        let mut session = session(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let outcome = session.submit("q", &CancellationToken::new()).await;
        let hint = failure_hint(&outcome).unwrap();
        assert!(hint.contains("backend"));
    }

    #[tokio::test]
    async fn test_no_hint_for_cancelled_or_completed_turn() {
        let mut session = session(MockResponse::Stream(vec![]));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let cancelled = session.submit("q", &cancel).await;
        assert!(matches!(cancelled, TurnOutcome::Failed(_)));
        assert_eq!(failure_hint(&cancelled), None);

        let completed = session.submit("q", &CancellationToken::new()).await;
        assert!(completed.is_completed());
        assert_eq!(failure_hint(&completed), None);
    }

    #[tokio::test]
    async fn test_run_turn_reports_status_before_returning() {
        let mut session = session(MockResponse::Stream(vec![
            Bytes::from("data: {\"type\":\"status_update\",\"data\":{\"node\":\"retriever\"}}\n\n"),
            Bytes::from("data: {\"type\":\"status_update\",\"data\":{\"node\":\"retriever\"}}\n\n"),
            Bytes::from("data: {\"type\":\"final_answer\",\"data\":{\"answer\":\"ok\"}}\n\n"),
        ]));
        let mut seen = Vec::new();

        let outcome = run_turn(&mut session, "q", |status| seen.push(status.to_string())).await;

        assert!(outcome.is_completed());
        assert!(seen.iter().all(|s| s == "Agent is: retriever"));
        assert!(seen.len() <= 1);
        assert!(session.state().current_status.is_empty());
    }
}
