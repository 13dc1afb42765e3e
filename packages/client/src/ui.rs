//! Terminal input and prompt utilities for the client.

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use std::io::Write;

/// Redisplay the prompt after printing an incoming message
pub fn redisplay_prompt(family_id: &str) {
    print!("{}> ", family_id);
    std::io::stdout().flush().ok();
}

/// Read lines from the terminal on a dedicated thread
///
/// rustyline is synchronous, so the editor lives on its own OS thread and
/// forwards every non-blank line over the returned channel. The channel closes
/// on Ctrl+C, Ctrl+D or a terminal error. The reader outlives individual
/// connections so that reconnecting does not start a second reader on stdin.
pub fn spawn_input_reader(family_id: &str) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = format!("{}> ", family_id);

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str()).ok();
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
