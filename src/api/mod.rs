//! HTTP client module for the bassinet vendor's private API.
//!
//! This module provides the `DeviceClient` for the one-shot login
//! exchange and for issuing authenticated command requests with the
//! resulting bearer token.

pub mod client;
pub mod error;

pub use client::DeviceClient;
pub use error::ApiError;
