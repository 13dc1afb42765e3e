//! Client execution logic with reconnection support.

use std::time::Duration;

use super::{
    error::ClientError,
    session::{run_client_session, validate_family_id},
    ui::spawn_input_reader,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Number of consecutive failed attempts after a session ended with `error`
///
/// A session that was established and then dropped starts a fresh streak, so
/// the limit applies to failures in a row rather than over the client's lifetime.
fn failures_after(failures: u32, error: &ClientError) -> u32 {
    match error {
        ClientError::ConnectionLost(_) => 1,
        _ => failures + 1,
    }
}

/// Run the WebSocket client with reconnection logic
///
/// Messages relayed while the client is reconnecting are not replayed.
pub async fn run_client(url: String, family_id: String) -> Result<(), ClientError> {
    let family_id = validate_family_id(&family_id)?;
    let mut input_rx = spawn_input_reader(family_id.as_str());
    let mut failures = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} for family '{}' (attempt {}/{})",
            url,
            family_id,
            failures + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &family_id, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If connection ended normally (user exit), don't reconnect
                return Ok(());
            }
            Err(e @ ClientError::InvalidFamilyId(_)) => return Err(e),
            Err(e) => {
                tracing::warn!("{}", e);
                failures = failures_after(failures, &e);

                if failures >= MAX_RECONNECT_ATTEMPTS {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    failures + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_failures_accumulate() {
        // テスト項目: 接続できない失敗は連続回数として加算される
        // given (前提条件):
        let error = ClientError::ConnectionError("refused".to_string());

        // when (操作):
        let failures = (0..3).fold(0, |n, _| failures_after(n, &error));

        // then (期待する結果):
        assert_eq!(failures, 3);
    }

    #[test]
    fn test_drop_after_connect_resets_streak() {
        // テスト項目: 一度接続できたセッションが切れた場合、失敗回数はリセットされる
        // given (前提条件): 4 回連続で接続に失敗した後
        let refused = ClientError::ConnectionError("refused".to_string());
        let failures = (0..4).fold(0, |n, _| failures_after(n, &refused));

        // when (操作): 接続に成功し、その後切断された
        let lost = ClientError::ConnectionLost("server closed the connection".to_string());
        let failures = failures_after(failures, &lost);

        // then (期待する結果): 上限に達せず、再接続を続ける
        assert_eq!(failures, 1);
        assert!(failures < MAX_RECONNECT_ATTEMPTS);
    }

    #[test]
    fn test_many_drops_never_exhaust_attempts() {
        // テスト項目: 長時間動作するクライアントが何度切断されても終了しない
        // given (前提条件):
        let lost = ClientError::ConnectionLost("reset".to_string());

        // when (操作):
        let failures = (0..20).fold(0, |n, _| failures_after(n, &lost));

        // then (期待する結果):
        assert!(failures < MAX_RECONNECT_ATTEMPTS);
    }
}
