//! Authentication module for credentials and the process session.
//!
//! This module provides:
//! - `Credentials`: username/password loaded from a local JSON file
//! - `SessionData`: the single in-memory session token for the process
//!
//! The token is never written to disk; it lives for the lifetime of the
//! process and is re-acquired only by restarting.

pub mod credentials;
pub mod session;

pub use credentials::Credentials;
pub use session::SessionData;
