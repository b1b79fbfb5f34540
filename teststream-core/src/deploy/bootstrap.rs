//! Bootstrap properties loading
//!
//! The bootstrap resource is Java `.properties`-style text reachable over
//! HTTP or from the local filesystem. It is fetched once per deploy
//! invocation and never persisted.

use std::collections::HashMap;
use tracing::info;

use super::DeployError;

/// A flat, string-keyed property set loaded from a bootstrap resource
#[derive(Debug, Clone, Default)]
pub struct BootstrapProperties {
    values: HashMap<String, String>,
}

impl BootstrapProperties {
    /// Parse properties text
    ///
    /// Supports the subset of the format the bootstrap actually uses:
    /// `#`/`!` comment lines, blank lines, and `key=value` or `key:value`
    /// pairs with surrounding whitespace trimmed. Line continuations and
    /// unicode escapes are not supported.
    pub fn parse(content: &str) -> Self {
        let mut values = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            match line.find(['=', ':']) {
                Some(index) => {
                    let key = line[..index].trim();
                    let value = line[index + 1..].trim();
                    if !key.is_empty() {
                        values.insert(key.to_string(), value.to_string());
                    }
                }
                None => {
                    values.insert(line.to_string(), String::new());
                }
            }
        }

        Self { values }
    }

    /// Look up a property value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Number of properties loaded
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no properties were loaded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Load the bootstrap properties resource
///
/// `http`/`https` URLs are fetched with the supplied client; `file` URLs
/// and plain paths are read from the filesystem.
pub async fn load_bootstrap_properties(
    client: &reqwest::Client,
    bootstrap_url: &str,
) -> Result<BootstrapProperties, DeployError> {
    let content = if bootstrap_url.starts_with("http://") || bootstrap_url.starts_with("https://") {
        let response = client
            .get(bootstrap_url)
            .send()
            .await
            .map_err(|source| DeployError::BootstrapFetch {
                url: bootstrap_url.to_string(),
                source,
            })?;

        info!("Connected to bootstrap at {}", bootstrap_url);

        let status = response.status();
        if !status.is_success() {
            return Err(DeployError::BootstrapNotOk {
                url: bootstrap_url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| DeployError::BootstrapFetch {
                url: bootstrap_url.to_string(),
                source,
            })?
    } else {
        let path = bootstrap_url.strip_prefix("file://").unwrap_or(bootstrap_url);
        std::fs::read_to_string(path).map_err(|source| DeployError::BootstrapRead {
            url: bootstrap_url.to_string(),
            source,
        })?
    };

    let properties = BootstrapProperties::parse(&content);
    info!("Bootstrap properties loaded: {} entries", properties.len());
    Ok(properties)
}
