//! Stateful orchestration between the API client and the presentation layer.
//!
//! Controllers own cached server state and a single error slot. Each method
//! takes `&mut self`, so concurrent mutation is impossible by construction;
//! callers sequence operations rather than lock.

mod peers;
mod session;

pub use peers::PeerListController;
pub use session::SessionController;
