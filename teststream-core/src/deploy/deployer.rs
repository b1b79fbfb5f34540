//! Catalog deployment orchestration
//!
//! Runs the full deploy sequence: bootstrap load, URL calculation,
//! optional token exchange, and the catalog PUT. All-or-nothing with no
//! partial success state; the host decides which preconditions merely
//! skip the operation.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{error, info};

use super::{
    bootstrap, calculate_api_server_url, calculate_test_catalog_url, DeployError, TokenExchanger,
    CLIENT_API_VERSION,
};

/// Deploys a merged test catalog to an ecosystem server
pub struct CatalogDeployer {
    client: reqwest::Client,
}

impl CatalogDeployer {
    /// Create a deployer with a default HTTP client
    pub fn new() -> Result<Self, DeployError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("teststream/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DeployError::HttpClient)?;

        Ok(Self { client })
    }

    /// Create a deployer with a caller-supplied HTTP client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Deploy a catalog document to the stream's test catalog store
    ///
    /// Supplying no access token is legal: the catalog is sent anonymously
    /// with no Authorization header and the auth exchange is skipped.
    pub async fn deploy(
        &self,
        bootstrap_url: &str,
        stream: &str,
        access_token: Option<&str>,
        catalog: Vec<u8>,
    ) -> Result<(), DeployError> {
        let properties = bootstrap::load_bootstrap_properties(&self.client, bootstrap_url).await?;

        let api_server_url = calculate_api_server_url(&properties, bootstrap_url)?;
        let test_catalog_url = calculate_test_catalog_url(&api_server_url, stream)?;

        let bearer_token = match access_token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => {
                let exchanger = TokenExchanger::new(&api_server_url, token)?;
                info!("Exchanging the access token for a bearer token");
                let jwt = exchanger.exchange(&self.client).await?;
                info!("Bearer token obtained from the ecosystem server OK");
                Some(jwt)
            }
            None => None,
        };

        self.publish(&test_catalog_url, bearer_token.as_deref(), catalog)
            .await
    }

    /// PUT the catalog bytes to the test catalog endpoint
    async fn publish(
        &self,
        test_catalog_url: &str,
        bearer_token: Option<&str>,
        catalog: Vec<u8>,
    ) -> Result<(), DeployError> {
        let mut request = self
            .client
            .put(test_catalog_url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header("ClientApiVersion", CLIENT_API_VERSION);

        match bearer_token {
            Some(jwt) => {
                request = request.header(AUTHORIZATION, format!("Bearer {jwt}"));
            }
            None => {
                info!("Not sending a bearer token to the server, as no access token was supplied");
            }
        }

        let response = request.body(catalog).send().await.map_err(|source| {
            DeployError::Transport {
                url: test_catalog_url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!("Deploy to the test catalog store failed:-");
            error!(
                "{} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
            if !body.is_empty() {
                error!("{}", body);
            }
            return Err(DeployError::ServerRejected {
                url: test_catalog_url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        info!("Test catalog successfully deployed to {}", test_catalog_url);
        Ok(())
    }
}
