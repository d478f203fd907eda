//! Signed-in user state
//!
//! [`AuthContext`] replaces ambient auth globals: whoever drives the UI owns one and passes
//! it to the flows that need it.

use resumeai_api_client::ApiClient;
use resumeai_core::models::{AuthResponse, User};
use resumeai_core::ClientResult;

pub struct AuthContext {
    client: ApiClient,
    user: Option<User>,
}

impl AuthContext {
    pub fn new(client: ApiClient) -> Self {
        Self { client, user: None }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Load the session user from the profile endpoint.
    ///
    /// Any failure (no cookie, expired session, backend down) leaves the context signed out.
    pub async fn init(&mut self) -> Option<&User> {
        self.user = match self.client.get_profile().await {
            Ok(response) => user_from(response),
            Err(e) => {
                tracing::debug!(error = %e, "No active session");
                None
            }
        };
        self.user.as_ref()
    }

    /// Log in, then refresh the user from the profile.
    ///
    /// Returns `true` when this call moved the context from signed out to signed in.
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<bool> {
        let was_authenticated = self.is_authenticated();
        let response = self.client.login(email, password).await?;
        let from_login = user_from(response);

        // The login payload carries only the identity; plan and credits come from the profile
        self.user = match self.client.get_profile().await {
            Ok(profile) => user_from(profile).or(from_login),
            Err(e) => {
                tracing::warn!(error = %e, "Profile refresh after login failed");
                from_login
            }
        };

        if let Some(user) = &self.user {
            tracing::info!(user_id = %user.id, plan = ?user.plan, credits = user.credits, "Logged in");
        }

        Ok(!was_authenticated && self.is_authenticated())
    }

    /// Register a new account. The account starts on the free plan with signup credits.
    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> ClientResult<bool> {
        let was_authenticated = self.is_authenticated();
        let response = self.client.signup(name, email, password).await?;
        self.user = user_from(response);

        if let Some(user) = &self.user {
            tracing::info!(user_id = %user.id, "Account created");
        }

        Ok(!was_authenticated && self.is_authenticated())
    }

    /// Log out. The local user is cleared even when the backend call fails.
    pub async fn logout(&mut self) -> ClientResult<()> {
        let result = self.client.logout().await;
        self.user = None;
        result.map(|_| ())
    }

    /// Overwrite the cached credit balance, e.g. with the count returned by an analysis.
    pub fn update_credits(&mut self, credits: i64) {
        if let Some(user) = self.user.as_mut() {
            user.credits = credits;
        }
    }
}

fn user_from(response: AuthResponse) -> Option<User> {
    response.data.map(User::from_details)
}
