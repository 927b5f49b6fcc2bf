//! Authentication module for managing the member's session.
//!
//! This module provides `Session`, token-based session state persisted
//! through the injected cache store. A 401 from the server or an
//! explicit logout clears the session together with every cached
//! snapshot.

pub mod session;

pub use session::{Session, SessionData};
