//! Defines the message queue capability used by handlers that
//! forward records downstream, and its SQS implementation.

use anyhow::{Context, Result};
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

/// The provider's acknowledgement of one delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendConfirmation {
    pub message_id: Option<String>,
}

/// A capability that delivers one message body to a named queue.
#[cfg_attr(test, automock)]
pub trait MessageQueue {
    async fn send(&self, queue_url: &str, body: &str) -> Result<SendConfirmation>;
}

impl MessageQueue for aws_sdk_sqs::Client {
    async fn send(&self, queue_url: &str, body: &str) -> Result<SendConfirmation> {
        let response = self
            .send_message()
            .queue_url(queue_url)
            .message_body(body)
            .send()
            .await
            .with_context(|| format!("Failed to send message to queue {:?}", queue_url))?;
        Ok(SendConfirmation {
            message_id: response.message_id().map(String::from),
        })
    }
}
