use super::{BrokerClient, PublishError};
use async_trait::async_trait;
use relay_sdk::objects::Envelope;
use tokio::sync::Mutex;

/// Broker client that keeps every envelope in memory.
///
/// Used by tests and for dry runs. Sends to `fail_topic` are rejected with
/// status 503 and not recorded.
#[derive(Debug, Default)]
pub struct InMemoryBroker {
    sent: Mutex<Vec<Envelope>>,
    fail_topic: Option<String>,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(topic: impl Into<String>) -> Self {
        Self {
            sent: Mutex::default(),
            fail_topic: Some(topic.into()),
        }
    }

    /// Envelopes accepted so far, in send order.
    pub async fn sent(&self) -> Vec<Envelope> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl BrokerClient for InMemoryBroker {
    async fn send(&self, envelope: Envelope) -> Result<(), PublishError> {
        if self.fail_topic.as_deref() == Some(envelope.topic.as_str()) {
            return Err(PublishError::Rejected {
                topic: envelope.topic,
                status: 503,
                body: "broker unavailable".to_string(),
            });
        }
        self.sent.lock().await.push(envelope);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_sdk::objects::FlattenedPayload;

    fn envelope(topic: &str) -> Envelope {
        Envelope {
            topic: topic.to_string(),
            key: None,
            payload: FlattenedPayload::new(),
            headers: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_records_in_send_order() {
        let broker = InMemoryBroker::new();
        broker.send(envelope("a")).await.unwrap();
        broker.send(envelope("b")).await.unwrap();

        let topics: Vec<String> = broker.sent().await.into_iter().map(|e| e.topic).collect();
        assert_eq!(topics, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_failing_topic_is_rejected() {
        let broker = InMemoryBroker::failing_on("orders");
        let err = broker.send(envelope("orders")).await.unwrap_err();
        assert!(matches!(err, PublishError::Rejected { status: 503, .. }));
        assert!(broker.sent().await.is_empty());
    }
}
