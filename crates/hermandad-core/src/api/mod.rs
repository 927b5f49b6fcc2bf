//! REST API client module for the hermandad membership service.
//!
//! This module provides the `ApiClient` for communicating with the
//! membership API to fetch and update member records, the interest-area
//! catalog and the paginated registry listing.
//!
//! Admin and listing calls carry a JWT bearer token; the host obtains
//! the token through its login surface and hands it to the client.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, FieldError, Redirect};
