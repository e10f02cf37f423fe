//! Tools domain module.
//!
//! Everything needed to expose Twitch operations as MCP tools:
//!
//! - `module.rs` - the `CapabilityModule` contract and handler plumbing
//! - `modules/` - one capability module per Twitch API domain
//! - `registry.rs` - aggregation of modules into catalog + dispatch map
//! - `dispatch.rs` - the single entry point for tool calls
//! - `error.rs` - handler and dispatch error taxonomy
//!
//! ## Adding a new tool
//!
//! 1. Add the request struct and endpoint function under `src/helix/api/`
//! 2. Add the descriptor and handler to the domain's capability module in
//!    `modules/` (or create a new module and list it in `modules::all`)
//!
//! Nothing else changes: the registry and server pick the tool up from the
//! module list.

pub mod dispatch;
mod error;
mod module;
pub mod modules;
mod registry;

pub use dispatch::dispatch;
pub use error::{DispatchError, HandlerError};
pub use module::{CapabilityModule, Handler, HandlerOutput, decode, handler, tool};
pub use registry::ToolRegistry;
