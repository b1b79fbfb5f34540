//! Deployment error types with clear, actionable messages

use thiserror::Error;

/// Errors raised while exchanging an access token for a bearer token
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token was supplied at all
    #[error("No access token supplied. Obtain an access token from your ecosystem server.")]
    MissingToken,

    /// The token does not split into refresh token and client id
    #[error("The access token supplied is not a valid authentication token. It should have exactly two parts separated by a single ':' but it does not.")]
    MalformedToken,

    /// The auth request never produced a response
    #[error("Failed to exchange the access token for a bearer token using URL '{url}'")]
    Exchange {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server rejected the token with a parseable error payload
    #[error("Failed to exchange the access token for a bearer token using URL '{url}'. Response from server ({status}) was not OK. Error details: code: {code}, message: {message}")]
    Rejected {
        url: String,
        status: u16,
        code: i64,
        message: String,
    },

    /// A 400 response whose error payload could not be parsed
    #[error("Failed to exchange the access token for a bearer token using URL '{url}'. Response from server ({status}) was not OK. Could not parse the returned payload.")]
    UnparseableRejection { url: String, status: u16 },

    /// Any other non-200 response
    #[error("Failed to exchange the access token for a bearer token using URL '{url}'. Response from server ({status}) was not OK.")]
    ResponseNotOk { url: String, status: u16 },

    /// A 200 response whose body could not be parsed
    #[error("Failed to parse the bearer token response from URL '{url}'")]
    InvalidResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors raised while deploying a test catalog
#[derive(Debug, Error)]
pub enum DeployError {
    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client")]
    HttpClient(#[source] reqwest::Error),

    /// The bootstrap resource could not be fetched over HTTP
    #[error("Unable to load bootstrap properties from '{url}'")]
    BootstrapFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The bootstrap resource could not be read from the filesystem
    #[error("Unable to load bootstrap properties from '{url}'")]
    BootstrapRead {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The bootstrap server replied with a non-success status
    #[error("Unable to load bootstrap properties from '{url}'. Response from server ({status}) was not OK.")]
    BootstrapNotOk { url: String, status: u16 },

    /// The override property does not end with the required suffix
    #[error("Unable to calculate the URL to the API server, the framework.testcatalog.url value '{url}' does not end in /testcatalog")]
    TestCatalogSuffix { url: String },

    /// The bootstrap URL does not end with the required suffix
    #[error("Unable to calculate the URL to the API server, the bootstrap url '{url}' does not end with /bootstrap, need a framework.testcatalog.url property in the bootstrap properties")]
    BootstrapSuffix { url: String },

    /// The calculated test catalog URL is not a valid URL
    #[error("Problem publishing the test catalog. Badly formed URL to the ecosystem server: '{url}': {message}")]
    MalformedUrl { url: String, message: String },

    /// Token exchange failed
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The catalog PUT never produced a response
    #[error("Problem publishing the test catalog. Could not send the catalog to '{url}'")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server did not accept the catalog
    #[error("Failed to deploy the test catalog to '{url}'. The server did not reply with OK (200). Status {status}: {body}")]
    ServerRejected {
        url: String,
        status: u16,
        body: String,
    },
}
