//! Session module tracking the one open game per player and kind.
//!
//! This module implements:
//! - Race-free session creation (conflict check and insert under one lock)
//! - Per-session locking so moves on one game are serialized
//! - Inactivity expiry, checked on access and by a periodic sweep
//!
//! Expiring a session never touches the ledger: a stake taken at start is
//! not refunded.

pub mod errors;
pub mod models;
pub mod registry;

pub use errors::{SessionError, SessionResult};
pub use models::{Session, SessionId, SessionKey, SessionTimeouts};
pub use registry::{SessionGuard, SessionRegistry};
