use serde::{Deserialize, Serialize};

/// Login endpoint used when none is configured.
pub const DEFAULT_LOGIN_ENDPOINT: &str = "/v1/login";

/// Username and password exchanged for a [Session].
///
/// Neither value is validated locally, empty strings are sent as-is.
#[derive(Clone, Default, Serialize)]
pub struct Credentials {
    #[serde(rename = "user_name")]
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// An authenticated session holding the access token returned by login.
#[derive(Clone)]
pub struct Session {
    access_token: String,
}

impl Session {
    /// The token to send in the `Authorization` header.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    accesstoken: String,
}

/// Read the session out of a login response body.
pub(crate) fn parse_login_response(body: &str) -> Result<Session, String> {
    let response: LoginResponse = serde_json::from_str(body)
        .map_err(|e| format!("could not read access token from login response: {e}"))?;

    if response.accesstoken.is_empty() {
        return Err("login response contained an empty access token".to_string());
    }

    Ok(Session {
        access_token: response.accesstoken,
    })
}
