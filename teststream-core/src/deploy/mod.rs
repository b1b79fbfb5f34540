//! Catalog deployment to an ecosystem server
//!
//! A deploy invocation performs at most three sequential round-trips,
//! each gating the next:
//!
//! ```text
//! bootstrap properties (GET or file read)
//!     │
//!     ▼
//! API server URL + test catalog URL calculation
//!     │
//!     ▼
//! POST /auth ── access token exchanged for a bearer token (optional)
//!     │
//!     ▼
//! PUT /testcatalog/{stream} ── the merged catalog document
//! ```
//!
//! Nothing is retried; any failure raises a [`DeployError`] to the host.

mod auth;
mod bootstrap;
mod deployer;
mod error;
mod url;

pub use auth::TokenExchanger;
pub use bootstrap::{load_bootstrap_properties, BootstrapProperties};
pub use deployer::CatalogDeployer;
pub use error::{AuthError, DeployError};
pub use url::{calculate_api_server_url, calculate_test_catalog_url};

/// The server API version this client was coded against, sent on every request
pub const CLIENT_API_VERSION: &str = "0.32.0";

/// Bootstrap property overriding the derived test catalog URL
pub const TESTCATALOG_URL_PROPERTY: &str = "framework.testcatalog.url";
