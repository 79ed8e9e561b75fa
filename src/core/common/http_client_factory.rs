use std::time::Duration;

use log::{debug, warn};
use mockall::automock;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client,
};

use super::transport::{ControllerTransport, DryRunTransport, RestconfSession, TransportFailure};
use crate::core::configuration::{sections::ControllerConfiguration, DEFAULT_TIMEOUT_SECS};

const YANG_DATA_JSON: &str = "application/yang-data+json";

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Opens a controller session for one AP/controller pair.
#[automock]
pub trait SessionFactory: Send + Sync {
    fn open(&self, address: &str) -> Result<Box<dyn ControllerTransport>, TransportFailure>;
}

/// Builds the HTTP client used for RESTCONF calls.
pub fn restconf_client(tls_verify: bool, timeout: u64) -> Result<Client, TransportFailure> {
    debug!("creating RESTCONF http client");

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(YANG_DATA_JSON));
    headers.insert(ACCEPT, HeaderValue::from_static(YANG_DATA_JSON));

    if !tls_verify {
        warn!("TLS verification is disabled for controller sessions");
    }

    let client = reqwest::ClientBuilder::new()
        .danger_accept_invalid_certs(!tls_verify)
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout))
        .user_agent(APP_USER_AGENT)
        .build()?;

    Ok(client)
}

/// Builds the HTTP client used for inventory lookups.
pub fn inventory_client(token: Option<&str>, timeout: u64) -> Result<Client, reqwest::Error> {
    debug!("creating inventory http client");

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(token) = token {
        match HeaderValue::from_str(&format!("Token {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("inventory token contains invalid characters, ignoring it"),
        }
    }

    reqwest::ClientBuilder::new()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout))
        .user_agent(APP_USER_AGENT)
        .build()
}

pub struct RestconfSessionFactory {
    username: String,
    password: String,
    tls_verify: bool,
    timeout: u64,
}

impl RestconfSessionFactory {
    pub fn new(conf: &ControllerConfiguration) -> Self {
        Self {
            username: conf.username.clone().unwrap_or_default(),
            password: conf.password.clone().unwrap_or_default(),
            tls_verify: conf.tls_verify.unwrap_or(true),
            timeout: conf.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SessionFactory for RestconfSessionFactory {
    fn open(&self, address: &str) -> Result<Box<dyn ControllerTransport>, TransportFailure> {
        let client = restconf_client(self.tls_verify, self.timeout)?;

        Ok(Box::new(RestconfSession::new(
            client,
            format!("https://{address}/restconf/"),
            self.username.clone(),
            self.password.clone(),
        )))
    }
}

pub struct DryRunSessionFactory;

impl SessionFactory for DryRunSessionFactory {
    fn open(&self, address: &str) -> Result<Box<dyn ControllerTransport>, TransportFailure> {
        Ok(Box::new(DryRunTransport::new(address.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        matchers::{header, method},
        Mock, MockServer, ResponseTemplate,
    };

    use super::{inventory_client, DryRunSessionFactory, SessionFactory};

    #[tokio::test]
    async fn dry_run_session_accepts_updates_only() {
        let transport = DryRunSessionFactory.open("wlc-01.example.com").unwrap();

        assert!(transport.update("data/foo:bar", "{}".to_string()).await.is_ok());
        assert!(transport.read("data/foo:bar").await.is_err());
    }

    #[tokio::test]
    async fn inventory_client_sends_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("Authorization", "Token abc"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = inventory_client(Some("abc"), 5).unwrap();
        let res = client.get(server.uri()).send().await.unwrap();

        assert!(res.status().is_success());
    }
}
