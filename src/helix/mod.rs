//! Twitch Helix API client.
//!
//! This module is the outbound collaborator surface of the server: a thin,
//! typed HTTP client plus one endpoint module per API domain. The client owns
//! the base URL, auth headers, and connection pool; endpoint functions pair a
//! typed request with a single HTTP round trip. Nothing above this layer
//! builds URLs or headers.

pub mod api;
mod client;
mod error;

pub use client::{Credentials, DataEnvelope, HelixClient, Pagination};
pub use error::{HelixError, HelixResult};
