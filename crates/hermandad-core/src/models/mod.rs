//! Data models for hermandad entities.
//!
//! This module contains the data structures exchanged with the membership
//! API:
//!
//! - `MemberProfile`, `MemberStatus`: one administered person
//! - `ContactUpdate`, `AdminUpdate`: partial PATCH payloads for the member
//!   and admin surfaces
//! - `InterestArea`, `AreaInfo`: communication channels and their display
//!   metadata

pub mod interest;
pub mod member;

pub use interest::{area_info, sort_areas, AreaInfo, InterestArea, MANDATORY_AREA};
pub use member::{AdminUpdate, ContactUpdate, MemberProfile, MemberStatus};
