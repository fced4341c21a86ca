//! Request and response payloads for the auth endpoints. Passwords and tokens
//! travel in these types, so they must never be logged.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl LoginRequest {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// Body of a successful `POST /api/auth/login`.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,
    pub id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub admin: bool,
}

fn default_token_type() -> String {
    crate::session::DEFAULT_TOKEN_TYPE.to_string()
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_request_serializes_password() {
        let request = LoginRequest::new("yoga@studio.com", "test!1234");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"email": "yoga@studio.com", "password": "test!1234"})
        );
        assert!(!format!("{request:?}").contains("test!1234"));
    }

    #[test]
    fn register_request_uses_camel_case() {
        let request = RegisterRequest {
            email: "yoga@studio.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password: SecretString::from("pass123"),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "email": "yoga@studio.com",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "password": "pass123"
            })
        );
    }

    #[test]
    fn login_response_decodes_backend_body() {
        let response: LoginResponse = serde_json::from_value(json!({
            "token": "jwt",
            "type": "Bearer",
            "id": 3,
            "username": "yoga@studio.com",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "admin": true
        }))
        .unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.id, 3);
        assert!(response.admin);
        assert!(!format!("{response:?}").contains("jwt"));
    }

    #[test]
    fn login_response_defaults_type_and_admin() {
        let response: LoginResponse = serde_json::from_value(json!({
            "token": "jwt",
            "id": 3,
            "username": "yoga@studio.com",
            "firstName": "Ada",
            "lastName": "Lovelace"
        }))
        .unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert!(!response.admin);
    }
}
