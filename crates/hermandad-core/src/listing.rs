//! Page navigation for a server-paginated collection.
//!
//! The server owns pagination: each page response carries opaque
//! next/previous cursor tokens and a total count. The controller never
//! parses or constructs cursors; it only moves to an adjacent page when
//! the matching cursor is present. Page size is fixed at 20 by server
//! convention and total pages are derived from the count.

use serde::Deserialize;
use tracing::warn;

use crate::api::ApiError;

/// Items per listing page, fixed by server convention.
pub const PAGE_SIZE: u64 = 20;

/// One page of a server-paginated collection, in the envelope the
/// listing endpoints return. The cursor tokens are opaque.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSlice<T> {
    pub results: Vec<T>,
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// Server seam for fetching one listing page. Implemented by
/// `ApiClient` for the member registry; tests substitute a fake.
pub trait PageFetcher<T> {
    async fn fetch_page(&self, page: u32) -> Result<PageSlice<T>, ApiError>;
}

/// How a finished `load` should be handled by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// New page data is in place.
    Loaded,
    /// 401: the caller must clear the session and return to login.
    Unauthenticated,
    /// 403: the caller must redirect to a permission-denied surface.
    Forbidden,
    /// Any other failure: logged, previous page data retained.
    Failed,
}

/// Listing controller for one paginated view.
///
/// State machine: `idle -> loading -> idle` on every load. There is no
/// error resting state; failures report an outcome and the controller
/// returns to idle with the previous data intact.
#[derive(Debug)]
pub struct Listing<T> {
    items: Vec<T>,
    page: u32,
    count: u64,
    next: Option<String>,
    previous: Option<String>,
    loading: bool,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Listing<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            count: 0,
            next: None,
            previous: None,
            loading: false,
        }
    }

    /// Request one page and replace the in-memory slice wholesale on
    /// success. On failure the previous page's data stays visible.
    pub async fn load<F: PageFetcher<T>>(&mut self, fetcher: &F, page: u32) -> LoadOutcome {
        self.loading = true;
        let result = fetcher.fetch_page(page).await;
        self.loading = false;

        match result {
            Ok(slice) => {
                self.items = slice.results;
                self.count = slice.count;
                self.next = slice.next;
                self.previous = slice.previous;
                self.page = page;
                LoadOutcome::Loaded
            }
            Err(ApiError::Unauthorized) => LoadOutcome::Unauthenticated,
            Err(ApiError::Forbidden(detail)) => {
                warn!(page, detail = %detail, "Listing page forbidden");
                LoadOutcome::Forbidden
            }
            Err(e) => {
                warn!(page, error = %e, "Failed to load listing page");
                LoadOutcome::Failed
            }
        }
    }

    /// Move to the next page. A no-op unless the server supplied a next
    /// cursor and no load is in flight.
    pub async fn next<F: PageFetcher<T>>(&mut self, fetcher: &F) -> Option<LoadOutcome> {
        if self.loading || self.next.is_none() {
            return None;
        }
        Some(self.load(fetcher, self.page + 1).await)
    }

    /// Move to the previous page. A no-op unless the server supplied a
    /// previous cursor and no load is in flight.
    pub async fn previous<F: PageFetcher<T>>(&mut self, fetcher: &F) -> Option<LoadOutcome> {
        if self.loading || self.previous.is_none() || self.page <= 1 {
            return None;
        }
        Some(self.load(fetcher, self.page - 1).await)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Current 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total item count as last reported by the server.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Derived page count: ceil(count / page size).
    pub fn total_pages(&self) -> u64 {
        self.count.div_ceil(PAGE_SIZE)
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// True from request start to settle; the UI disables navigation
    /// controls while set.
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Fake registry of 45 numbered members across 3 pages, recording
    /// requested page numbers.
    struct FakeFetcher {
        requested: Mutex<Vec<u32>>,
        fail_with: Option<fn() -> ApiError>,
        total: u64,
    }

    impl FakeFetcher {
        fn new() -> Self {
            Self {
                requested: Mutex::new(Vec::new()),
                fail_with: None,
                total: 45,
            }
        }

        fn with_total(total: u64) -> Self {
            Self {
                total,
                ..Self::new()
            }
        }

        fn failing(fail_with: fn() -> ApiError) -> Self {
            Self {
                fail_with: Some(fail_with),
                ..Self::new()
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().expect("fetcher lock poisoned").clone()
        }
    }

    impl PageFetcher<u64> for FakeFetcher {
        async fn fetch_page(&self, page: u32) -> Result<PageSlice<u64>, ApiError> {
            self.requested
                .lock()
                .expect("fetcher lock poisoned")
                .push(page);
            if let Some(fail) = self.fail_with {
                return Err(fail());
            }

            let start = u64::from(page - 1) * PAGE_SIZE;
            let end = (start + PAGE_SIZE).min(self.total);
            let last_page = self.total.div_ceil(PAGE_SIZE);
            Ok(PageSlice {
                results: (start..end).collect(),
                count: self.total,
                next: (u64::from(page) < last_page).then(|| format!("cursor-{}", page + 1)),
                previous: (page > 1).then(|| format!("cursor-{}", page - 1)),
            })
        }
    }

    #[test]
    fn total_pages_is_derived_from_count() {
        let mut listing: Listing<u64> = Listing::new();
        listing.count = 45;
        assert_eq!(listing.total_pages(), 3);

        listing.count = 40;
        assert_eq!(listing.total_pages(), 2);

        listing.count = 0;
        assert_eq!(listing.total_pages(), 0);
    }

    #[tokio::test]
    async fn load_replaces_items_wholesale() {
        let fetcher = FakeFetcher::new();
        let mut listing = Listing::new();

        assert_eq!(listing.load(&fetcher, 1).await, LoadOutcome::Loaded);
        assert_eq!(listing.items().len(), 20);
        assert_eq!(listing.count(), 45);
        assert_eq!(listing.total_pages(), 3);
        assert!(listing.has_next());
        assert!(!listing.has_previous());
        assert!(!listing.is_loading());
    }

    #[tokio::test]
    async fn next_is_a_no_op_on_the_last_page() {
        let fetcher = FakeFetcher::new();
        let mut listing = Listing::new();
        listing.load(&fetcher, 3).await;
        assert!(!listing.has_next());

        assert!(listing.next(&fetcher).await.is_none());
        assert_eq!(listing.page(), 3);
        assert_eq!(fetcher.requested(), vec![3]);
    }

    #[tokio::test]
    async fn previous_is_a_no_op_on_page_one() {
        let fetcher = FakeFetcher::new();
        let mut listing = Listing::new();
        listing.load(&fetcher, 1).await;

        assert!(listing.previous(&fetcher).await.is_none());
        assert_eq!(listing.page(), 1);
        assert_eq!(fetcher.requested(), vec![1]);
    }

    #[tokio::test]
    async fn previous_from_page_two_loads_page_one() {
        let fetcher = FakeFetcher::new();
        let mut listing = Listing::new();
        listing.load(&fetcher, 2).await;
        assert!(listing.has_previous());

        let outcome = listing.previous(&fetcher).await;
        assert_eq!(outcome, Some(LoadOutcome::Loaded));
        assert_eq!(listing.page(), 1);
        assert_eq!(fetcher.requested(), vec![2, 1]);
    }

    #[tokio::test]
    async fn last_page_with_previous_cursor_only_navigates_backwards() {
        // 25 items: page 2 is the last page, so the server reports
        // next: null and a previous cursor.
        let fetcher = FakeFetcher::with_total(25);
        let mut listing = Listing::new();
        listing.load(&fetcher, 2).await;
        assert!(!listing.has_next());
        assert!(listing.has_previous());

        assert!(listing.next(&fetcher).await.is_none());
        assert_eq!(listing.previous(&fetcher).await, Some(LoadOutcome::Loaded));
        assert_eq!(listing.page(), 1);
        assert_eq!(fetcher.requested(), vec![2, 1]);
    }

    #[tokio::test]
    async fn next_walks_forward_until_the_cursor_runs_out() {
        let fetcher = FakeFetcher::new();
        let mut listing = Listing::new();
        listing.load(&fetcher, 1).await;

        assert_eq!(listing.next(&fetcher).await, Some(LoadOutcome::Loaded));
        assert_eq!(listing.page(), 2);
        assert_eq!(listing.next(&fetcher).await, Some(LoadOutcome::Loaded));
        assert_eq!(listing.page(), 3);
        assert!(listing.next(&fetcher).await.is_none());
    }

    #[tokio::test]
    async fn failure_retains_previous_page_data() {
        let good = FakeFetcher::new();
        let mut listing = Listing::new();
        listing.load(&good, 1).await;
        let items_before = listing.items().to_vec();

        let bad = FakeFetcher::failing(|| ApiError::ServerError("500".to_string()));
        assert_eq!(listing.load(&bad, 2).await, LoadOutcome::Failed);
        assert_eq!(listing.items(), items_before.as_slice());
        assert_eq!(listing.page(), 1);
        assert!(!listing.is_loading());
    }

    #[tokio::test]
    async fn auth_failures_map_to_redirect_outcomes() {
        let unauthorized = FakeFetcher::failing(|| ApiError::Unauthorized);
        let mut listing: Listing<u64> = Listing::new();
        assert_eq!(
            listing.load(&unauthorized, 1).await,
            LoadOutcome::Unauthenticated
        );

        let forbidden = FakeFetcher::failing(|| ApiError::Forbidden("no".to_string()));
        assert_eq!(listing.load(&forbidden, 1).await, LoadOutcome::Forbidden);
    }

    #[tokio::test]
    async fn navigation_is_gated_while_a_load_is_pending() {
        let fetcher = FakeFetcher::new();
        let mut listing = Listing::new();
        listing.load(&fetcher, 1).await;

        listing.loading = true;
        assert!(listing.next(&fetcher).await.is_none());
        assert!(listing.previous(&fetcher).await.is_none());
        assert_eq!(fetcher.requested(), vec![1]);
    }
}
