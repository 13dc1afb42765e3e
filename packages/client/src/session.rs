//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use kinnren_server::{
    domain::FamilyId,
    infrastructure::dto::websocket::{InboundMessage, OutboundMessage},
};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use super::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Validate a family id with the relay's own rules before it is put in a URL
///
/// Only `[A-Za-z0-9_-]` is accepted, so a valid id never needs escaping.
pub fn validate_family_id(raw: &str) -> Result<FamilyId, ClientError> {
    FamilyId::try_from(raw.to_string()).map_err(|e| {
        tracing::debug!("Family id '{}' is invalid: {}", raw, e);
        ClientError::InvalidFamilyId(raw.to_string())
    })
}

/// Build the relay URL for a family
pub fn session_url(url: &str, family_id: &FamilyId) -> String {
    format!("{}?family_id={}", url, family_id.as_str())
}

/// Run one WebSocket client session
///
/// Returns `Ok(())` when the user closes the input. `ConnectionError` means
/// the connection could not be opened, `ConnectionLost` that it dropped after
/// being established.
pub async fn run_client_session(
    url: &str,
    family_id: &FamilyId,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let url = session_url(url, family_id);

    let (ws_stream, _response) = match connect_async(&url).await {
        Ok(result) => result,
        Err(tungstenite::Error::Http(response)) if response.status().as_u16() == 400 => {
            return Err(ClientError::InvalidFamilyId(family_id.to_string()));
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to relay at {}", url);
    println!("{}", MessageFormatter::format_welcome(family_id.as_str()));

    let (mut write, mut read) = ws_stream.split();

    let family_id_for_read = family_id.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<OutboundMessage>(text.as_str()) {
                        Ok(msg) => MessageFormatter::format_anonymous_message(&msg),
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&family_id_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    let write_loop = async {
        while let Some(line) = input_rx.recv().await {
            let json = match serde_json::to_string(&InboundMessage { content: line }) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                return Err(ClientError::ConnectionLost(e.to_string()));
            }
        }

        // Input closed by the user
        write.send(Message::Close(None)).await.ok();
        Ok(())
    };

    tokio::select! {
        _ = &mut read_task => {
            Err(ClientError::ConnectionLost("server closed the connection".to_string()))
        }
        result = write_loop => {
            read_task.abort();
            result
        }
    }
}
