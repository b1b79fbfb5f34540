//! Access token to bearer token exchange
//!
//! The compound access token (`refreshToken:clientId`) is validated and
//! split before any network activity, then exchanged for a short-lived
//! bearer token with a single POST to the server's `/auth` endpoint.
//! The bearer token lives only for the one deploy invocation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AuthError, CLIENT_API_VERSION};

const TOKEN_PART_SEPARATOR: char = ':';

/// Exchanges an access token for a bearer token
#[derive(Debug)]
pub struct TokenExchanger {
    api_server_url: String,
    refresh_token: String,
    client_id: String,
}

/// Request payload for the auth endpoint
#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    client_id: &'a str,
    refresh_token: &'a str,
}

/// Successful auth response
#[derive(Debug, Deserialize)]
struct AuthResponse {
    jwt: String,
}

/// Error payload returned with a 400 response
#[derive(Debug, Deserialize)]
struct AuthErrorPayload {
    error_code: i64,
    error_message: String,
}

impl TokenExchanger {
    /// Validate an access token and prepare an exchanger
    ///
    /// The token must have exactly two parts separated by a single `:`;
    /// anything else fails here, before any network call.
    pub fn new(api_server_url: &str, access_token: &str) -> Result<Self, AuthError> {
        if access_token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }

        let parts: Vec<&str> = access_token.split(TOKEN_PART_SEPARATOR).collect();
        if parts.len() != 2 {
            return Err(AuthError::MalformedToken);
        }

        Ok(Self {
            api_server_url: clean_api_server_url(api_server_url),
            refresh_token: parts[0].to_string(),
            client_id: parts[1].to_string(),
        })
    }

    /// The refresh token half of the access token
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// The client id half of the access token
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Perform the exchange, returning the bearer token (a JWT)
    pub async fn exchange(&self, client: &reqwest::Client) -> Result<String, AuthError> {
        let url = format!("{}/auth", self.api_server_url);
        debug!("Requesting a bearer token from {}", url);

        let request = AuthRequest {
            client_id: &self.client_id,
            refresh_token: &self.refresh_token,
        };

        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("ClientApiVersion", CLIENT_API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|source| AuthError::Exchange {
                url: url.clone(),
                source,
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::BAD_REQUEST {
            let detail: AuthErrorPayload = match response.json().await {
                Ok(detail) => detail,
                Err(_) => {
                    return Err(AuthError::UnparseableRejection {
                        url,
                        status: status.as_u16(),
                    })
                }
            };
            return Err(AuthError::Rejected {
                url,
                status: status.as_u16(),
                code: detail.error_code,
                message: detail.error_message,
            });
        }

        if status != reqwest::StatusCode::OK {
            return Err(AuthError::ResponseNotOk {
                url,
                status: status.as_u16(),
            });
        }

        let payload: AuthResponse = response
            .json()
            .await
            .map_err(|source| AuthError::InvalidResponse { url, source })?;

        Ok(payload.jwt)
    }
}

fn clean_api_server_url(api_server_url: &str) -> String {
    api_server_url.trim().trim_end_matches('/').to_string()
}
