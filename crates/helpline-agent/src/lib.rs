//! HTTP client for the hosted chat agent backend.
//!
//! The backend is an opaque collaborator: every call forwards a request
//! and relays the JSON body that comes back, verbatim. No retries, no
//! caching, and no validation of the response shape — whatever the
//! backend returns is passed through.

mod client;
mod error;

pub use client::{AgentClient, DEFAULT_BASE_URL};
pub use error::AgentError;
