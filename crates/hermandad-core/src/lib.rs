//! Core library for the hermandad membership apps.
//!
//! This crate holds everything the UI front ends share: the REST API
//! client, the member and interest-area models, local snapshot caching,
//! session state, the subscription reconciler and the paginated listing
//! controller, plus the data-flow controllers for the three membership
//! pages (member self-edit, admin member edit, admin registry listing).
//!
//! Rendering, routing and the login surface live in the host apps.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod listing;
pub mod models;
pub mod pages;
pub mod subscriptions;

pub use api::{ApiClient, ApiError, FieldError, Redirect};
pub use auth::{Session, SessionData};
pub use cache::{CacheStore, CachedData, FileStore, MemoryStore};
pub use config::Config;
pub use listing::{Listing, LoadOutcome, PageFetcher, PageSlice, PAGE_SIZE};
pub use models::{
    area_info, AdminUpdate, AreaInfo, ContactUpdate, InterestArea, MemberProfile, MemberStatus,
    MANDATORY_AREA,
};
pub use pages::{DirectoryOutcome, DirectoryPage, MemberEditPage, ProfilePage, SaveFeedback};
pub use subscriptions::{SubscriptionBackend, Subscriptions};
