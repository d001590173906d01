//! Session bookkeeping for the Q&A assistant.
//!
//! - [`SessionStore`]: get/put/delete/update interface keyed by an opaque session token;
//!   the in-memory implementation can later be replaced by an external cache.
//! - [`SessionState`]: chat history and uploaded document text of one session.
//! - [`SessionId`]: the opaque token itself.

mod session_id;
mod state;
mod store;

pub use session_id::SessionId;
pub use state::{DEFAULT_MAX_HISTORY_ITEMS, SessionState};
pub use store::{BoxFuture, InMemorySessionStore, Mutation, SessionStore};
