//! Broker client for a Kafka REST Proxy (v3 produce API).

use super::{BrokerClient, PublishError};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use relay_sdk::objects::{Envelope, FlattenedPayload, Header};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RestProxyConfig {
    /// Base URL of the REST proxy, e.g. `http://localhost:8082`.
    pub url: Url,
    pub cluster_id: String,
    pub credentials: Option<BasicAuth>,
    pub timeout: Option<Duration>,
}

/// Publishes envelopes through `POST /v3/clusters/{cluster}/topics/{topic}/records`.
pub struct RestProxyBroker {
    base: Url,
    cluster_id: String,
    credentials: Option<BasicAuth>,
    http_client: reqwest::Client,
}

impl RestProxyBroker {
    pub fn new(config: RestProxyConfig) -> Self {
        let mut base = config.url;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            base,
            cluster_id: config.cluster_id,
            credentials: config.credentials,
            http_client: reqwest::Client::builder()
                .timeout(config.timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Produce endpoint for a topic.
    pub fn records_url(&self, topic: &str) -> Result<Url, PublishError> {
        let path = format!(
            "v3/clusters/{}/topics/{}/records",
            urlencoding::encode(&self.cluster_id),
            urlencoding::encode(topic)
        );
        Ok(self.base.join(&path)?)
    }
}

#[async_trait]
impl BrokerClient for RestProxyBroker {
    async fn send(&self, envelope: Envelope) -> Result<(), PublishError> {
        let url = self.records_url(&envelope.topic)?;
        let body = serde_json::to_vec(&produce_body(&envelope.payload, &envelope.headers))?;

        let mut request = self
            .http_client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body);
        if let Some(auth) = &self.credentials {
            request = request.basic_auth(&auth.username, auth.password.as_ref());
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            debug!(topic = %envelope.topic, status = %status, "Record accepted by REST proxy");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(topic = %envelope.topic, status = %status, "REST proxy rejected record");
            Err(PublishError::Rejected {
                topic: envelope.topic,
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[derive(Debug, Serialize)]
struct ProduceRecord<'a> {
    value: ProduceValue<'a>,
    headers: Vec<ProduceHeader<'a>>,
}

#[derive(Debug, Serialize)]
struct ProduceValue<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    data: &'a FlattenedPayload,
}

#[derive(Debug, Serialize)]
struct ProduceHeader<'a> {
    name: &'a str,
    /// Base64 of the raw header bytes.
    value: String,
}

/// Request body for a single record. The key is left out so the proxy
/// produces the record without one.
fn produce_body<'a>(payload: &'a FlattenedPayload, headers: &'a [Header]) -> ProduceRecord<'a> {
    ProduceRecord {
        value: ProduceValue {
            kind: "JSON",
            data: payload,
        },
        headers: headers
            .iter()
            .map(|h| ProduceHeader {
                name: h.name.as_str(),
                value: STANDARD.encode(&h.value),
            })
            .collect(),
    }
}
