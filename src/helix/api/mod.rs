//! Helix endpoint modules, one per API domain.
//!
//! Each module pairs typed request structs with endpoint functions. The
//! request structs double as MCP tool input schemas (via `schemars`), so the
//! fields a handler decodes are exactly the fields advertised to clients.

pub mod bits;
pub mod channels;
pub mod chat;
pub mod clips;
pub mod moderation;
pub mod polls;
pub mod predictions;
pub mod raids;
pub mod search;
pub mod streams;
pub mod subscriptions;
pub mod users;
pub mod videos;
pub mod whispers;
