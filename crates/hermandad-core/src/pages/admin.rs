//! Admin edit page for any member record.

use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::models::{sort_areas, AdminUpdate, InterestArea, MemberProfile};
use crate::subscriptions::Subscriptions;

use super::SaveFeedback;

/// Controller for the admin member-edit page. All field groups are
/// writable here, including identity and registry data.
///
/// Only the authenticated member's own profile is cached locally, so
/// this page never paints from cache; it starts from the fetch.
pub struct MemberEditPage {
    api: ApiClient,
    member_id: i64,
    pub subscriptions: Subscriptions,
    record: Option<MemberProfile>,
    catalog: Vec<InterestArea>,
    saving: bool,
    feedback: Option<SaveFeedback>,
}

impl MemberEditPage {
    pub fn new(api: ApiClient, member_id: i64) -> Self {
        Self {
            api,
            member_id,
            subscriptions: Subscriptions::new(),
            record: None,
            catalog: Vec::new(),
            saving: false,
            feedback: None,
        }
    }

    /// Fetch the member record and the interest-area catalog
    /// concurrently, then build the draft from both.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        let (record_res, catalog_res) = tokio::join!(
            self.api.fetch_member(self.member_id),
            self.api.fetch_interest_areas()
        );
        let record = record_res?;
        let mut catalog = catalog_res?;

        sort_areas(&mut catalog);
        self.subscriptions
            .hydrate_from_server(record.interest_areas.clone());

        self.record = Some(record);
        self.catalog = catalog;
        Ok(())
    }

    /// Flip one interest area in the draft. No network effect.
    pub fn toggle_area(&mut self, key: &str) {
        self.subscriptions.toggle(key);
    }

    /// Save the admin form together with the current subscription draft.
    /// On failure the draft and the caller's form state stay untouched.
    pub async fn save(&mut self, update: AdminUpdate) -> Result<(), ApiError> {
        if self.saving {
            debug!("Ignoring save while one is already in flight");
            return Ok(());
        }

        let mut update = update;
        update.interest_areas = Some(self.subscriptions.payload());

        self.saving = true;
        let result = self.api.update_member(self.member_id, &update).await;
        self.saving = false;

        let record = result?;
        self.subscriptions.confirm(record.interest_areas.clone());
        self.record = Some(record);
        self.feedback = Some(SaveFeedback::now());
        Ok(())
    }

    pub fn member_id(&self) -> i64 {
        self.member_id
    }

    pub fn record(&self) -> Option<&MemberProfile> {
        self.record.as_ref()
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
