use async_trait::async_trait;
use log::{debug, info};
use mockall::automock;
use reqwest::Client;
use serde_json::Value;

/// Uniform failure signal for any controller call: network, authentication,
/// HTTP status or undecodable body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct TransportFailure {
    pub reason: String,
}

impl TransportFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::new(format!("HTTP {status}: {e}")),
            None => Self::new(e.to_string()),
        }
    }
}

/// Read and partial-update access to one controller, authentication and TLS
/// policy already applied.
#[automock]
#[async_trait]
pub trait ControllerTransport: Send + Sync {
    async fn read(&self, resource: &str) -> Result<Value, TransportFailure>;
    async fn update(&self, resource: &str, document: String) -> Result<(), TransportFailure>;
}

pub struct RestconfSession {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl RestconfSession {
    pub fn new(client: Client, base_url: String, username: String, password: String) -> Self {
        Self {
            client,
            base_url,
            username,
            password,
        }
    }

    fn url(&self, resource: &str) -> String {
        format!("{}{}", self.base_url, resource)
    }
}

#[async_trait]
impl ControllerTransport for RestconfSession {
    async fn read(&self, resource: &str) -> Result<Value, TransportFailure> {
        let url = self.url(resource);
        debug!("GET {url}");

        let res = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?
            .error_for_status()?;

        Ok(res.json::<Value>().await?)
    }

    async fn update(&self, resource: &str, document: String) -> Result<(), TransportFailure> {
        let url = self.url(resource);
        debug!("PATCH {url}");

        self.client
            .patch(url)
            .basic_auth(&self.username, Some(&self.password))
            .body(document)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// Logs every update instead of sending it. Reads are never performed.
pub struct DryRunTransport {
    address: String,
}

impl DryRunTransport {
    pub fn new(address: String) -> Self {
        Self { address }
    }
}

#[async_trait]
impl ControllerTransport for DryRunTransport {
    async fn read(&self, resource: &str) -> Result<Value, TransportFailure> {
        Err(TransportFailure::new(format!(
            "dry run, not reading {resource} from {}",
            self.address
        )))
    }

    async fn update(&self, resource: &str, document: String) -> Result<(), TransportFailure> {
        info!("[dry-run] PATCH {} {resource}\n{document}", self.address);
        Ok(())
    }
}
