//! Sign-in, sign-up and session renewal.

use reqwest::Method;
use secrecy::ExposeSecret;
use serde::de::IgnoredAny;
use storedash_core::{LoginRequest, RefreshRequest, RegisterRequest, TokenPair, User};
use tracing::{info, instrument, warn};

use super::client::ApiClient;
use super::request::RequestOptions;
use crate::error::{ApiError, ValidationError};
use crate::forms::{RegisterForm, Validate};

impl ApiClient {
    /// Sign in and start a session.
    ///
    /// The returned token pair is stored: the access token becomes the
    /// bearer credential, the refresh token and profile (when present) are
    /// persisted for later runs.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if either field is blank,
    /// `ApiError::Unauthorized` for bad credentials, or any request error.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        if email.trim().is_empty() {
            return Err(ValidationError::Required { field: "email" }.into());
        }
        if password.is_empty() {
            return Err(ValidationError::Required { field: "password" }.into());
        }

        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let pair: TokenPair = self.post("/auth/login", &body).await?;
        self.start_session(&pair).await;

        info!("Signed in");
        Ok(pair)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid, or any request
    /// error.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn register(&self, form: RegisterForm) -> Result<User, ApiError> {
        form.validate()?;
        let body = RegisterRequest::from(form);
        self.post("/auth/register", &body).await
    }

    /// End the session.
    ///
    /// The local session is cleared even when the backend call fails, so the
    /// operator is always signed out locally. The backend error, if any, is
    /// still returned.
    ///
    /// # Errors
    ///
    /// Returns the error of the backend call after the session is cleared.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = if self.has_token().await {
            self.request::<IgnoredAny>("/auth/logout", RequestOptions::new().method(Method::POST))
                .await
                .map(|_| ())
        } else {
            Ok(())
        };

        self.clear_token().await;
        match &result {
            Ok(()) => info!("Signed out"),
            Err(e) => warn!(error = %e, "Logout call failed, session cleared locally"),
        }
        result
    }

    /// Exchange the stored refresh token for a new token pair.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if no refresh token is stored, or
    /// any request error.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<TokenPair, ApiError> {
        let refresh_token = self
            .refresh_token()
            .ok_or_else(|| ApiError::Unauthorized("no refresh token stored".to_string()))?;

        let body = RefreshRequest {
            refresh_token: refresh_token.expose_secret().to_string(),
        };
        let pair: TokenPair = self.post("/auth/refresh", &body).await?;
        self.start_session(&pair).await;
        Ok(pair)
    }

    /// Fetch the signed-in user's profile and cache it.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User, ApiError> {
        let user: User = self.get("/auth/me").await?;
        self.cache_user(&user);
        Ok(user)
    }

    async fn start_session(&self, pair: &TokenPair) {
        self.set_token(pair.access_token.trim()).await;
        if let Some(refresh_token) = pair.refresh_token.as_deref() {
            self.set_refresh_token(refresh_token);
        }
        if let Some(user) = &pair.user {
            self.cache_user(user);
        }
    }
}
