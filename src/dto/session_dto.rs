use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::session::{Role, Session};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    pub role: Role,

    #[validate(length(min = 1, max = 64))]
    pub username: String,

    /// Required by the login form but never checked.
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub logged_in: bool,
    pub session: Option<Session>,
}

impl From<Option<Session>> for SessionResponse {
    fn from(session: Option<Session>) -> Self {
        SessionResponse {
            logged_in: session.is_some(),
            session,
        }
    }
}
