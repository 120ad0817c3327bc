//! Sessions: per-user state and the orchestrator
//!
//! A [`Session`] is an isolated value owning one user's dataset cache
//! ([`SessionState`]) and per-context phases. Nothing here is global: a
//! host serving many users creates one `Session` per connection and drops
//! it at teardown.

mod orchestrator;
mod state;

pub use orchestrator::{Phase, RunOutput, Session};
pub use state::SessionState;
