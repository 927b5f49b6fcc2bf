//! Admin paginated registry listing.

use crate::api::{ApiClient, Redirect};
use crate::auth::Session;
use crate::cache::CacheStore;
use crate::listing::{Listing, LoadOutcome};
use crate::models::MemberProfile;

/// What the host UI should do after a listing operation settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryOutcome {
    /// Page data is in place.
    Ready,
    /// The user must be sent to login or home; the session has already
    /// been cleared when the target is login.
    Redirect(Redirect),
    /// The load failed; the previous page's data is still shown.
    Failed,
}

/// Controller for the admin member-registry listing.
pub struct DirectoryPage {
    api: ApiClient,
    listing: Listing<MemberProfile>,
}

impl DirectoryPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            listing: Listing::new(),
        }
    }

    /// Load one page of the registry. A 401 clears the session and every
    /// cached snapshot before redirecting to login; a 403 redirects
    /// home; any other failure keeps the previous page visible.
    pub async fn load_page(
        &mut self,
        page: u32,
        session: &mut Session,
        store: &dyn CacheStore,
    ) -> DirectoryOutcome {
        let outcome = self.listing.load(&self.api, page).await;
        Self::settle(outcome, session, store)
    }

    /// Move to the next page if the server supplied a next cursor.
    pub async fn next_page(
        &mut self,
        session: &mut Session,
        store: &dyn CacheStore,
    ) -> Option<DirectoryOutcome> {
        let outcome = self.listing.next(&self.api).await?;
        Some(Self::settle(outcome, session, store))
    }

    /// Move to the previous page if the server supplied a previous
    /// cursor.
    pub async fn previous_page(
        &mut self,
        session: &mut Session,
        store: &dyn CacheStore,
    ) -> Option<DirectoryOutcome> {
        let outcome = self.listing.previous(&self.api).await?;
        Some(Self::settle(outcome, session, store))
    }

    fn settle(
        outcome: LoadOutcome,
        session: &mut Session,
        store: &dyn CacheStore,
    ) -> DirectoryOutcome {
        match outcome {
            LoadOutcome::Loaded => DirectoryOutcome::Ready,
            LoadOutcome::Unauthenticated => {
                let _ = session.clear(store);
                DirectoryOutcome::Redirect(Redirect::Login)
            }
            LoadOutcome::Forbidden => DirectoryOutcome::Redirect(Redirect::Home),
            LoadOutcome::Failed => DirectoryOutcome::Failed,
        }
    }

    pub fn members(&self) -> &[MemberProfile] {
        self.listing.items()
    }

    pub fn page(&self) -> u32 {
        self.listing.page()
    }

    pub fn count(&self) -> u64 {
        self.listing.count()
    }

    pub fn total_pages(&self) -> u64 {
        self.listing.total_pages()
    }

    pub fn has_next(&self) -> bool {
        self.listing.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.listing.has_previous()
    }

    /// True while a page request is in flight; the UI disables the
    /// navigation controls.
    pub fn is_loading(&self) -> bool {
        self.listing.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionData;
    use crate::cache::{CacheStore, MemoryStore};

    #[test]
    fn unauthenticated_outcome_clears_session_and_redirects_to_login() {
        let store = MemoryStore::new();
        store.set("profile", "{}").expect("set should succeed");
        let mut session = Session::new();
        session.update(SessionData::new(
            "tok".to_string(),
            1,
            true,
            "admin".to_string(),
        ));

        let outcome = DirectoryPage::settle(LoadOutcome::Unauthenticated, &mut session, &store);
        assert_eq!(outcome, DirectoryOutcome::Redirect(Redirect::Login));
        assert!(session.token().is_none());
        assert!(store.get("profile").is_none());
    }

    #[test]
    fn forbidden_outcome_redirects_home_and_keeps_session() {
        let store = MemoryStore::new();
        let mut session = Session::new();
        session.update(SessionData::new(
            "tok".to_string(),
            1,
            false,
            "maria".to_string(),
        ));

        let outcome = DirectoryPage::settle(LoadOutcome::Forbidden, &mut session, &store);
        assert_eq!(outcome, DirectoryOutcome::Redirect(Redirect::Home));
        assert_eq!(session.token(), Some("tok"));
    }

    #[test]
    fn failure_outcome_is_reported_without_redirect() {
        let store = MemoryStore::new();
        let mut session = Session::new();
        let outcome = DirectoryPage::settle(LoadOutcome::Failed, &mut session, &store);
        assert_eq!(outcome, DirectoryOutcome::Failed);
    }
}
