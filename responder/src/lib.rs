//! Chat reply generation.
//!
//! [`Responder::generate_response`] decides how a chat message is answered:
//! semantic matching against the stored Q&A bank, matching against a Q&A
//! document uploaded into the session, or forwarding free text to the local
//! LLM. Rendering of matches lives in [`format`].

pub mod cfg;
pub mod completion;
mod error;
pub mod format;
mod pipeline;
pub mod prompt;

pub use cfg::ResponderConfig;
pub use completion::{CompletionProvider, LlmCompletion, error_reply};
pub use error::ResponderError;
pub use format::{NO_MATCH_MESSAGE, QNA_ONLY_MESSAGE, format_matches};
pub use pipeline::{ReplySource, ResponseOutcome, ResponseRequest, Responder};
