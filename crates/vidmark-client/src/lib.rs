//! Display-agnostic controller for the vidmark client application.
//!
//! The browser UI is a thin shell; everything it decides lives here as an
//! explicit state machine. [`state::ClientState`] holds the last-fetched
//! marker list and the current edit target, and is mutated only through
//! [`state::ClientState::update`], which maps an incoming [`state::Event`]
//! to a list of [`state::Effect`] descriptions. Network effects are executed
//! sequentially by [`api::drive`]; everything else (form fill, confirm
//! dialogs, file download) is handed back to the shell as data.
//!
//! This split keeps every flow — create, edit, delete, export, import,
//! clear — unit-testable without a display surface.

pub mod api;
pub mod error;
pub mod state;
pub mod time;
pub mod transfer;
pub mod url;

pub use api::{drive, ApiClient, Driven};
pub use error::ClientError;
pub use state::{
    ClientState, ConfirmAction, Effect, Event, Feedback, FeedbackKind, FormInput, FEEDBACK_TTL,
};

/// Generates a fresh marker id. Collisions are accepted as a non-risk
/// (UUID v4), matching the client-assigned-id contract of the API.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
