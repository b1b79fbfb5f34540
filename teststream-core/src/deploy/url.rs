//! API server and test catalog URL calculation

use super::{BootstrapProperties, DeployError, TESTCATALOG_URL_PROPERTY};

const TESTCATALOG_SUFFIX: &str = "/testcatalog";
const BOOTSTRAP_SUFFIX: &str = "/bootstrap";

/// Derive the API server base URL
///
/// A non-blank `framework.testcatalog.url` bootstrap property takes
/// precedence and must end with `/testcatalog`; otherwise the base URL is
/// derived from the bootstrap URL, which must end with `/bootstrap`.
pub fn calculate_api_server_url(
    properties: &BootstrapProperties,
    bootstrap_url: &str,
) -> Result<String, DeployError> {
    let testcatalog_override = properties
        .get(TESTCATALOG_URL_PROPERTY)
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match testcatalog_override {
        Some(value) => {
            // Derive the API server URL from the explicit test catalog URL.
            let url = clean_url(value);
            match url.strip_suffix(TESTCATALOG_SUFFIX) {
                Some(base) => Ok(base.to_string()),
                None => Err(DeployError::TestCatalogSuffix {
                    url: url.to_string(),
                }),
            }
        }
        None => {
            // Derive the API server URL from the bootstrap URL itself.
            let url = clean_url(bootstrap_url);
            match url.strip_suffix(BOOTSTRAP_SUFFIX) {
                Some(base) => Ok(base.to_string()),
                None => Err(DeployError::BootstrapSuffix {
                    url: url.to_string(),
                }),
            }
        }
    }
}

/// The deploy endpoint for a stream: `{apiServerUrl}/testcatalog/{stream}`
pub fn calculate_test_catalog_url(
    api_server_url: &str,
    stream: &str,
) -> Result<String, DeployError> {
    let url = format!("{api_server_url}{TESTCATALOG_SUFFIX}/{stream}");

    // Validate early so a badly formed URL fails before any network call.
    reqwest::Url::parse(&url).map_err(|e| DeployError::MalformedUrl {
        url: url.clone(),
        message: e.to_string(),
    })?;

    Ok(url)
}

/// Strip leading/trailing whitespace and a single trailing slash
fn clean_url(url: &str) -> &str {
    let url = url.trim();
    url.strip_suffix('/').unwrap_or(url)
}
