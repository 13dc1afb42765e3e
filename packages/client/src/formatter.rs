//! Message formatting utilities for client display.

use chrono::{DateTime, Local};
use kinnren_server::infrastructure::dto::websocket::OutboundMessage;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a relayed anonymous message as `[HH:MM:SS] #id content`
    ///
    /// The server timestamp is shown in local time; an unparsable timestamp is
    /// shown as sent.
    pub fn format_anonymous_message(message: &OutboundMessage) -> String {
        let time = DateTime::parse_from_rfc3339(&message.created_at)
            .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|_| message.created_at.clone());
        format!("\n[{}] #{} {}\n", time, message.id, message.content)
    }

    /// Format a text frame that is not an anonymous message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }

    /// Format the banner shown after connecting
    pub fn format_welcome(family_id: &str) -> String {
        format!(
            "\nConnected to family '{}' anonymously. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
            family_id
        )
    }
}
