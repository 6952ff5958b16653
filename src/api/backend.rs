//! The seam between the runtime and the network

use crate::feed::PageSource;
use crate::model::{NewPost, Post, PostId, ProfileData, ProfileTarget, User};
use crate::session::Session;

use super::client::ApiClient;
use super::error::ApiError;

/// Everything the runtime asks of the backend.
///
/// Implementations are cloned into worker threads, one clone per request.
pub trait Backend: PageSource + Clone + Send + 'static {
    /// A copy that authenticates as `session`
    fn authorized(&self, session: &Session) -> Self;

    /// Exchange credentials for an access token
    fn sign_in(&self, email: &str, password: &str) -> Result<String, ApiError>;

    /// Create an account and return a token for it
    fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<String, ApiError>;

    fn current_user(&self) -> Result<User, ApiError>;

    fn publish(&self, post: &NewPost) -> Result<Post, ApiError>;

    /// Toggle the like; returns the new state
    fn like(&self, post_id: PostId) -> Result<bool, ApiError>;

    fn profile(&self, target: ProfileTarget) -> Result<ProfileData, ApiError>;
}

impl Backend for ApiClient {
    fn authorized(&self, session: &Session) -> Self {
        self.clone().with_token(session.token.clone())
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<String, ApiError> {
        Ok(self.login(email, password)?.access_token)
    }

    fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<String, ApiError> {
        Ok(self.register(username, email, password)?.access_token)
    }

    fn current_user(&self) -> Result<User, ApiError> {
        self.me()
    }

    fn publish(&self, post: &NewPost) -> Result<Post, ApiError> {
        self.create_post(post)
    }

    fn like(&self, post_id: PostId) -> Result<bool, ApiError> {
        self.toggle_like(post_id)
    }

    fn profile(&self, target: ProfileTarget) -> Result<ProfileData, ApiError> {
        match target {
            ProfileTarget::Me => Ok(ProfileData {
                user: self.me()?,
                posts: self.my_posts()?,
                liked: self.liked()?,
                drafts: self.drafts()?,
                is_self: true,
            }),
            ProfileTarget::User(id) => Ok(ProfileData {
                user: self.user_profile(id)?,
                posts: self.user_posts(id)?,
                liked: Vec::new(),
                drafts: Vec::new(),
                is_self: false,
            }),
        }
    }
}
