//! API client for the hermandad membership REST service.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests against the member, catalog and registry endpoints.

use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::listing::{PageFetcher, PageSlice};
use crate::models::{AdminUpdate, ContactUpdate, InterestArea, MemberProfile};
use crate::subscriptions::SubscriptionBackend;

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the membership service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token, e.g. after logout.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidResponse(format!("Invalid token: {e}")))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error built from the
    /// status and body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "PATCH");

        let response = self
            .client
            .patch(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    // ===== Member-facing endpoints =====

    /// Fetch the authenticated member's own profile
    pub async fn fetch_own_profile(&self) -> Result<MemberProfile, ApiError> {
        self.get("/api/me/").await
    }

    /// Send a partial update of the member's own contact data and
    /// subscriptions. Returns the updated profile.
    pub async fn update_own_profile(
        &self,
        update: &ContactUpdate,
    ) -> Result<MemberProfile, ApiError> {
        self.patch("/api/me/", update).await
    }

    /// Fetch the catalog of interest areas
    pub async fn fetch_interest_areas(&self) -> Result<Vec<InterestArea>, ApiError> {
        self.get("/api/areas-interes/").await
    }

    // ===== Admin endpoints =====

    /// Fetch one page of the member registry listing
    pub async fn fetch_member_page(&self, page: u32) -> Result<PageSlice<MemberProfile>, ApiError> {
        self.get(&format!("/api/hermanos/listado/?page={}", page))
            .await
    }

    /// Fetch the full record of one member for the admin edit surface
    pub async fn fetch_member(&self, member_id: i64) -> Result<MemberProfile, ApiError> {
        self.get(&format!("/api/hermanos/{}/gestion/", member_id))
            .await
    }

    /// Send a partial admin update of one member's record
    pub async fn update_member(
        &self,
        member_id: i64,
        update: &AdminUpdate,
    ) -> Result<MemberProfile, ApiError> {
        self.patch(&format!("/api/hermanos/{}/gestion/", member_id), update)
            .await
    }
}

impl SubscriptionBackend for ApiClient {
    /// Persist the member's own subscription set via a partial profile
    /// update carrying only `areas_interes`.
    async fn save_subscriptions(&self, areas: &[String]) -> Result<Vec<String>, ApiError> {
        let update = ContactUpdate {
            interest_areas: Some(areas.to_vec()),
            ..Default::default()
        };
        let profile = self.update_own_profile(&update).await?;
        Ok(profile.interest_areas)
    }
}

impl PageFetcher<MemberProfile> for ApiClient {
    async fn fetch_page(&self, page: u32) -> Result<PageSlice<MemberProfile>, ApiError> {
        self.fetch_member_page(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = ApiClient::new("https://gestion.example.org/").expect("client should build");
        assert_eq!(api.url("/api/me/"), "https://gestion.example.org/api/me/");
    }

    #[test]
    fn listing_url_carries_page_number_only() {
        let api = ApiClient::new("https://gestion.example.org").expect("client should build");
        assert_eq!(
            api.url("/api/hermanos/listado/?page=3"),
            "https://gestion.example.org/api/hermanos/listado/?page=3"
        );
    }

    #[test]
    fn with_token_keeps_base_url() {
        let api = ApiClient::new("https://gestion.example.org").expect("client should build");
        let authed = api.with_token("abc".to_string());
        assert_eq!(authed.url("/api/me/"), "https://gestion.example.org/api/me/");
        assert!(authed.token.is_some());
    }
}
