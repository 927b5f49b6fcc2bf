//! Reconciliation of a member's interest-area subscriptions.
//!
//! Three views of the subscription set coexist while an edit page is
//! open: the locally cached snapshot (paint hint), the last
//! server-confirmed set (canonical) and the in-progress draft. The
//! mandatory area is part of every view at all times and cannot be
//! toggled off. The cache itself is a passive blob; the invariant is
//! enforced here and nowhere else.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::api::ApiError;
use crate::cache::{self, CacheStore, PROFILE_KEY};
use crate::models::{MemberProfile, MANDATORY_AREA};

/// Server seam for persisting a subscription set. The real
/// implementation lives on `ApiClient`; tests substitute a fake.
pub trait SubscriptionBackend {
    /// Replace the member's subscription set on the server and return
    /// the set the server actually accepted. The server may normalize or
    /// reject individual keys.
    async fn save_subscriptions(&self, areas: &[String]) -> Result<Vec<String>, ApiError>;
}

/// The subscription reconciler for one edit page.
#[derive(Debug, Clone)]
pub struct Subscriptions {
    mandatory: String,
    cached: Option<BTreeSet<String>>,
    canonical: BTreeSet<String>,
    draft: BTreeSet<String>,
}

impl Default for Subscriptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::with_mandatory(MANDATORY_AREA)
    }

    /// Build a reconciler around a different mandatory key. The default
    /// constructor uses [`MANDATORY_AREA`].
    pub fn with_mandatory(mandatory: impl Into<String>) -> Self {
        let mandatory = mandatory.into();
        let mut draft = BTreeSet::new();
        draft.insert(mandatory.clone());
        Self {
            mandatory,
            cached: None,
            canonical: BTreeSet::new(),
            draft,
        }
    }

    /// Paint the draft from the locally persisted profile snapshot, if
    /// one exists and parses. Read-only against the store; absent or
    /// unparseable snapshots leave the draft untouched and return `None`.
    pub fn hydrate_from_cache(&mut self, store: &dyn CacheStore) -> Option<&BTreeSet<String>> {
        let snapshot = cache::load::<MemberProfile>(store, PROFILE_KEY)?;
        let set: BTreeSet<String> = snapshot.data.interest_areas.into_iter().collect();
        debug!(areas = set.len(), "Painting subscriptions from cache");

        self.draft = self.with_mandatory_key(set.clone());
        self.cached = Some(set);
        Some(&self.draft)
    }

    /// Adopt the server's reported subscription set as both canonical
    /// and draft, injecting the mandatory key if the server omitted it.
    /// Always supersedes whatever `hydrate_from_cache` produced.
    pub fn hydrate_from_server(
        &mut self,
        fetched: impl IntoIterator<Item = String>,
    ) -> &BTreeSet<String> {
        self.canonical = self.with_mandatory_key(fetched.into_iter().collect());
        self.draft = self.canonical.clone();
        self.cached = Some(self.canonical.clone());
        &self.draft
    }

    /// Flip membership of `key` in the draft. Toggling the mandatory key
    /// is a no-op. Pure draft mutation; nothing is sent anywhere.
    pub fn toggle(&mut self, key: &str) -> &BTreeSet<String> {
        if key == self.mandatory {
            debug!(key, "Ignoring toggle of mandatory area");
            return &self.draft;
        }
        if !self.draft.remove(key) {
            self.draft.insert(key.to_string());
        }
        &self.draft
    }

    /// Send the draft to the server, at most once per call. On success
    /// the accepted set becomes canonical, draft and cached (persisted
    /// into the profile snapshot when one exists). On failure the draft
    /// is left untouched and the error is surfaced verbatim.
    pub async fn commit<B: SubscriptionBackend>(
        &mut self,
        backend: &B,
        store: &dyn CacheStore,
    ) -> Result<&BTreeSet<String>, ApiError> {
        let payload = self.payload();
        let accepted = backend.save_subscriptions(&payload).await?;
        self.confirm(accepted);
        self.persist_canonical(store);
        Ok(&self.draft)
    }

    /// Adopt a server-accepted set after a successful save. Used by
    /// `commit` and by the page controllers whose save endpoint returns
    /// the whole profile.
    pub fn confirm(&mut self, accepted: impl IntoIterator<Item = String>) {
        self.canonical = self.with_mandatory_key(accepted.into_iter().collect());
        self.draft = self.canonical.clone();
        self.cached = Some(self.canonical.clone());
    }

    /// The set to send on save: draft plus the mandatory key.
    pub fn payload(&self) -> Vec<String> {
        self.with_mandatory_key(self.draft.clone())
            .into_iter()
            .collect()
    }

    /// Derived display ordering over the draft: mandatory key first, the
    /// rest lexicographic. Does not touch the underlying set.
    pub fn display_order(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.draft.len());
        if self.draft.contains(&self.mandatory) {
            keys.push(self.mandatory.clone());
        }
        keys.extend(self.draft.iter().filter(|k| **k != self.mandatory).cloned());
        keys
    }

    pub fn draft(&self) -> &BTreeSet<String> {
        &self.draft
    }

    pub fn canonical(&self) -> &BTreeSet<String> {
        &self.canonical
    }

    pub fn cached(&self) -> Option<&BTreeSet<String>> {
        self.cached.as_ref()
    }

    pub fn is_subscribed(&self, key: &str) -> bool {
        self.draft.contains(key)
    }

    /// Whether the draft has diverged from the last confirmed set.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.canonical
    }

    fn with_mandatory_key(&self, mut set: BTreeSet<String>) -> BTreeSet<String> {
        set.insert(self.mandatory.clone());
        set
    }

    /// Mirror the canonical set into the persisted profile snapshot.
    /// Cache write failures are logged and swallowed; the server save
    /// already succeeded.
    fn persist_canonical(&self, store: &dyn CacheStore) {
        let Some(snapshot) = cache::load::<MemberProfile>(store, PROFILE_KEY) else {
            return;
        };
        let mut profile = snapshot.data;
        profile.interest_areas = self.canonical.iter().cloned().collect();
        if let Err(e) = cache::save(store, PROFILE_KEY, &profile) {
            warn!(error = %e, "Failed to persist confirmed subscriptions");
        }
    }
}
