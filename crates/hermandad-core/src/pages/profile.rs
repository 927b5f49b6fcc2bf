//! Member self-edit page: own contact data and subscriptions.

use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::cache::{self, CacheStore, PROFILE_KEY};
use crate::models::{sort_areas, ContactUpdate, InterestArea, MemberProfile};
use crate::subscriptions::Subscriptions;

use super::SaveFeedback;

/// Controller for the member's own edit page.
///
/// Identity fields never leave this surface: the PATCH payload type only
/// carries contact data, an optional password and the subscription set.
pub struct ProfilePage {
    api: ApiClient,
    pub subscriptions: Subscriptions,
    profile: Option<MemberProfile>,
    catalog: Vec<InterestArea>,
    saving: bool,
    feedback: Option<SaveFeedback>,
}

impl ProfilePage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            subscriptions: Subscriptions::new(),
            profile: None,
            catalog: Vec::new(),
            saving: false,
            feedback: None,
        }
    }

    /// Paint the page from the locally cached snapshot, if any, before
    /// the network round trip finishes. Read-only.
    pub fn paint_from_cache(&mut self, store: &dyn CacheStore) -> bool {
        self.subscriptions.hydrate_from_cache(store);
        match cache::load::<MemberProfile>(store, PROFILE_KEY) {
            Some(snapshot) => {
                debug!(age_minutes = snapshot.age_minutes(), "Painting profile from cache");
                self.profile = Some(snapshot.data);
                true
            }
            None => false,
        }
    }

    /// Fetch the canonical profile and the interest-area catalog
    /// concurrently, then build the draft from both. The fetched profile
    /// supersedes the cache and becomes the new snapshot.
    pub async fn load(&mut self, store: &dyn CacheStore) -> Result<(), ApiError> {
        let (profile_res, catalog_res) = tokio::join!(
            self.api.fetch_own_profile(),
            self.api.fetch_interest_areas()
        );
        let profile = profile_res?;
        let mut catalog = catalog_res?;

        sort_areas(&mut catalog);
        self.subscriptions
            .hydrate_from_server(profile.interest_areas.clone());

        if let Err(e) = cache::save(store, PROFILE_KEY, &profile) {
            warn!(error = %e, "Failed to cache fetched profile");
        }

        self.profile = Some(profile);
        self.catalog = catalog;
        Ok(())
    }

    /// Flip one interest area in the draft. No network effect.
    pub fn toggle_area(&mut self, key: &str) {
        self.subscriptions.toggle(key);
    }

    /// Save the contact form together with the current subscription
    /// draft. On failure the draft and the caller's form state stay
    /// untouched.
    pub async fn save_contact(
        &mut self,
        store: &dyn CacheStore,
        update: ContactUpdate,
    ) -> Result<(), ApiError> {
        if self.saving {
            debug!("Ignoring save while one is already in flight");
            return Ok(());
        }

        let mut update = update;
        update.password = update.password.filter(|p| !p.is_empty());
        update.interest_areas = Some(self.subscriptions.payload());

        self.saving = true;
        let result = self.api.update_own_profile(&update).await;
        self.saving = false;

        let profile = result?;
        self.subscriptions.confirm(profile.interest_areas.clone());
        if let Err(e) = cache::save(store, PROFILE_KEY, &profile) {
            warn!(error = %e, "Failed to cache saved profile");
        }
        self.profile = Some(profile);
        self.feedback = Some(SaveFeedback::now());
        Ok(())
    }

    /// Save only the subscription draft, leaving the rest of the form
    /// alone.
    pub async fn save_areas(&mut self, store: &dyn CacheStore) -> Result<(), ApiError> {
        if self.saving {
            debug!("Ignoring save while one is already in flight");
            return Ok(());
        }

        self.saving = true;
        let result = self.subscriptions.commit(&self.api, store).await.map(|_| ());
        self.saving = false;

        result?;
        self.feedback = Some(SaveFeedback::now());
        Ok(())
    }

    pub fn profile(&self) -> Option<&MemberProfile> {
        self.profile.as_ref()
    }

    /// The catalog in display order: mandatory area first, rest by name.
    pub fn catalog(&self) -> &[InterestArea] {
        &self.catalog
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// The pending save confirmation, dropped automatically once its
    /// three-second lifetime has passed.
    pub fn feedback(&mut self) -> Option<&SaveFeedback> {
        if self.feedback.as_ref().is_some_and(SaveFeedback::is_expired) {
            self.feedback = None;
        }
        self.feedback.as_ref()
    }
}
