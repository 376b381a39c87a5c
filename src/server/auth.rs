use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use tracing::{debug, warn};

use super::{AppState, ApiError};
use crate::provider::AuthUser;

/// A request made by an authenticated admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl AdminUser {
    /// Resolves the bearer token in `headers` and checks the user's role.
    ///
    /// A missing or rejected token is 401, a non-admin user is 403. Failures
    /// reaching the provider are 500.
    pub async fn authorize(state: &AppState, headers: &HeaderMap) -> Result<Self, ApiError> {
        let token = bearer_token(headers)
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        let user = state
            .provider
            .user_for_token(token)
            .await
            .map_err(|e| match e.status() {
                Some(400..=499) => {
                    debug!("Token rejected by auth provider: {e}");
                    ApiError::Unauthorized("Invalid or expired token".to_string())
                }
                _ => ApiError::provider("verify user", e),
            })?;

        let role = state
            .provider
            .admin_role(user.id)
            .await
            .map_err(|e| ApiError::provider("verify user role", e))?;

        if !role.is_admin() {
            warn!("User {} attempted an admin action", user.id);
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }
        Ok(AdminUser(user))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AdminUser::authorize(state, &parts.headers).await
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
