//! Page-level controllers for the three membership views.
//!
//! Each controller owns the data flow of one page and nothing visual:
//! paint from the local cache if a snapshot exists, fetch the canonical
//! record, reconcile, and push edits back on an explicit save.
//!
//! - `ProfilePage`: member self-edit (contact data + subscriptions)
//! - `MemberEditPage`: admin edit of any member record
//! - `DirectoryPage`: admin paginated registry listing
//!
//! All network work happens inside `async` methods awaited by the host
//! UI. A page navigated away from mid-fetch simply drops the future, so
//! no state write can land after teardown.

pub mod admin;
pub mod directory;
pub mod profile;

pub use admin::MemberEditPage;
pub use directory::{DirectoryOutcome, DirectoryPage};
pub use profile::ProfilePage;

use chrono::{DateTime, Duration, Utc};

/// Lifetime of the save confirmation before it self-clears.
const FEEDBACK_LIFETIME_SECS: i64 = 3;

/// Transient "saved" confirmation shown after a successful commit. The
/// UI polls `is_expired` and drops the message after three seconds.
#[derive(Debug, Clone)]
pub struct SaveFeedback {
    shown_at: DateTime<Utc>,
}

impl SaveFeedback {
    fn now() -> Self {
        Self {
            shown_at: Utc::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() - self.shown_at > Duration::seconds(FEEDBACK_LIFETIME_SECS)
    }
}
