//! Shared types for the peerctl workspace.
//!
//! Keep wire DTOs and the few derived predicates on them here so the API
//! client, controllers, and views all agree on one definition.

#![warn(missing_docs)]

/// Wire DTOs mirroring the management server's JSON surface.
pub mod api;
