//! UseCase layer: the relay's lifecycle callbacks and read-side queries.

mod connect_participant;
mod disconnect_participant;
mod error;
mod get_anonymous_messages;
mod get_connection_stats;
mod relay_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{GetAnonymousMessagesError, RelayError};
pub use get_anonymous_messages::GetAnonymousMessagesUseCase;
pub use get_connection_stats::GetConnectionStatsUseCase;
pub use relay_message::{RelayMessageUseCase, RelayOutcome};
