use crate::features::auth::types::LoginResponse;
use secrecy::{ExposeSecret, SecretString};

/// Scheme label the backend issues for its tokens.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// The authenticated user held by the session store.
///
/// The token is kept in a `SecretString` so `Debug` output and logs never
/// reveal it.
#[derive(Clone, Debug)]
pub struct SessionIdentity {
    pub token: SecretString,
    pub token_type: String,
    pub user_id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

impl SessionIdentity {
    /// Value for the `Authorization` header: `<type> <token>`.
    #[must_use]
    pub fn authorization(&self) -> SecretString {
        let scheme = if self.token_type.trim().is_empty() {
            DEFAULT_TOKEN_TYPE
        } else {
            self.token_type.trim()
        };
        SecretString::from(format!("{scheme} {}", self.token.expose_secret()))
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<LoginResponse> for SessionIdentity {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: SecretString::from(response.token),
            token_type: response.token_type,
            user_id: response.id,
            username: response.username,
            first_name: response.first_name,
            last_name: response.last_name,
            is_admin: response.admin,
        }
    }
}
