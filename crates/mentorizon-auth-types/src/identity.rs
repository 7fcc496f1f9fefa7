//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use mentorizon_domain::user::UserRole;

pub const USER_ID_HEADER: &str = "x-mentorizon-user-id";
pub const USER_ROLE_HEADER: &str = "x-mentorizon-user-role";

/// Authenticated actor injected by the gateway via `x-mentorizon-user-id` and
/// `x-mentorizon-user-role` headers.
///
/// Returns 401 if `x-mentorizon-user-id` is absent or cannot be parsed as UUID.
/// A missing role header means [`UserRole::Member`]; an unknown role is rejected.
/// Authorization (403 or silent no-op) is decided by use cases after extraction,
/// always from this header role and never from the stored user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send`; extract values
    // synchronously and return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let user_role = match parts.headers.get(USER_ROLE_HEADER) {
            None => Some(UserRole::Member),
            Some(v) => v
                .to_str()
                .ok()
                .and_then(|s| s.parse::<u8>().ok())
                .and_then(UserRole::from_u8),
        };

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let user_role = user_role.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id, user_role })
        }
    }
}
