//! Mock auth helpers for integration tests.
//!
//! The service receives `x-mentorizon-user-id` + `x-mentorizon-user-role` headers
//! injected by the gateway. In tests, `MockAuth` produces these headers directly
//! so no real gateway or login session is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use mentorizon_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use mentorizon_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: UserRole) -> Self {
        Self { user_id, user_role }
    }

    pub fn member(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::Member)
    }

    pub fn staff(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::Staff)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from(u16::from(self.user_role.as_u8())),
        );
        map
    }
}
