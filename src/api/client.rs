//! Blocking HTTP client for the haiku backend

use std::collections::BTreeSet;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::{error_message, ApiError};
use crate::feed::{FetchError, PageSource};
use crate::model::{NewPost, Post, PostId, User, UserId};

/// Response of `POST /token`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
struct LikeResponse {
    liked: bool,
}

#[derive(Debug, Deserialize)]
struct IsLikedResponse {
    is_liked: bool,
}

/// Client for the haiku REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach (or clear) the bearer token used for authenticated calls
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path (which must start with `/`)
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn require_token(&self) -> Result<(), ApiError> {
        if self.token.is_none() {
            return Err(ApiError::Unauthenticated);
        }
        Ok(())
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.authorize(request).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = error_message(status.as_u16(), &body);
            tracing::debug!("api: {} -> {}", status, message);
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json()?)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!("api: GET {}", path);
        self.send(self.http.get(self.endpoint(path)))
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Exchange credentials for an access token (`username` is the email)
    pub fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        tracing::debug!("api: POST /token");
        let request = self
            .http
            .post(self.endpoint("/token"))
            .form(&[("username", email), ("password", password)]);
        self.send(request)
    }

    /// Create an account, then sign in with it
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        tracing::debug!("api: POST /register");
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let _created: User = self.send(self.http.post(self.endpoint("/register")).json(&body))?;
        self.login(email, password)
    }

    pub fn me(&self) -> Result<User, ApiError> {
        self.require_token()?;
        self.get("/users/me")
    }

    // =========================================================================
    // Posts
    // =========================================================================

    /// One page of published posts, oldest first
    pub fn fetch_posts(
        &self,
        skip: usize,
        limit: usize,
        tags: &BTreeSet<String>,
    ) -> Result<Vec<Post>, ApiError> {
        let mut query: Vec<(&str, String)> =
            vec![("skip", skip.to_string()), ("limit", limit.to_string())];
        query.extend(tags.iter().map(|t| ("tags", t.clone())));

        tracing::debug!("api: GET /haikus/ skip={} limit={} tags={:?}", skip, limit, tags);
        self.send(self.http.get(self.endpoint("/haikus/")).query(&query))
    }

    pub fn post(&self, id: PostId) -> Result<Post, ApiError> {
        self.get(&format!("/haikus/{}", id))
    }

    pub fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        self.require_token()?;
        tracing::debug!("api: POST /haikus/ (draft={})", post.is_draft);
        self.send(self.http.post(self.endpoint("/haikus/")).json(post))
    }

    pub fn my_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.require_token()?;
        self.get("/haikus/mine/")
    }

    pub fn drafts(&self) -> Result<Vec<Post>, ApiError> {
        self.require_token()?;
        self.get("/haikus/drafts/")
    }

    pub fn liked(&self) -> Result<Vec<Post>, ApiError> {
        self.require_token()?;
        self.get("/haikus/liked/")
    }

    /// Toggle the caller's like; returns whether the post is now liked
    pub fn toggle_like(&self, id: PostId) -> Result<bool, ApiError> {
        self.require_token()?;
        tracing::debug!("api: POST /haikus/{}/like/", id);
        let response: LikeResponse =
            self.send(self.http.post(self.endpoint(&format!("/haikus/{}/like/", id))))?;
        Ok(response.liked)
    }

    pub fn is_liked(&self, id: PostId) -> Result<bool, ApiError> {
        self.require_token()?;
        let response: IsLikedResponse = self.get(&format!("/haikus/{}/is-liked", id))?;
        Ok(response.is_liked)
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub fn user_profile(&self, id: UserId) -> Result<User, ApiError> {
        self.get(&format!("/users/{}", id))
    }

    /// Published posts of a user (drafts are never included)
    pub fn user_posts(&self, id: UserId) -> Result<Vec<Post>, ApiError> {
        self.get(&format!("/users/{}/haikus/", id))
    }
}

impl PageSource for ApiClient {
    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
        tags: &BTreeSet<String>,
    ) -> Result<Vec<Post>, FetchError> {
        self.fetch_posts(offset, limit, tags).map_err(FetchError::from)
    }
}
