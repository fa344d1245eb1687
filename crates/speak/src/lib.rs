//! Speech output with ordered backend fallback.
//!
//! A [`SpeechDispatcher`] owns a list of [`SpeechBackend`]s and one worker
//! thread. Jobs run one at a time in arrival order; each job walks the
//! backends until one succeeds.

pub mod backend;
pub mod dispatcher;
pub mod error;

pub use backend::{CommandBackend, FileBackend, LogBackend, SpeechBackend, backend_by_name};
pub use dispatcher::{SpeechDispatcher, SpeechReceipt, SpeechTicket};
pub use error::SpeechError;
