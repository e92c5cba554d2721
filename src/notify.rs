//! Defines the notify-user example handler: keep the accepted order
//! events out of a converted batch and forward each one to the user
//! email queue. This is the end-to-end exercise of the adapter
//! contract, not part of the reusable core.

use crate::adapter::Handler;
use crate::conf::Settings;
use crate::queue::{MessageQueue, SendConfirmation};
use anyhow::Result;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::{info, instrument};

/// Forwards accepted order events to the configured queue.
pub struct NotifyUser<Q> {
    queue: Q,
}

impl<Q> NotifyUser<Q> {
    pub fn new(queue: Q) -> Self {
        NotifyUser { queue }
    }
}

impl<Q: MessageQueue> Handler<Value, Settings> for NotifyUser<Q> {
    type Output = Vec<SendConfirmation>;

    #[instrument(skip_all)]
    async fn run(&self, orders: Vec<Value>, settings: &Settings) -> Result<Vec<SendConfirmation>> {
        let accepted = orders
            .iter()
            .filter(|order| order["eventType"] == "accepted")
            .map(|order| serde_json::to_string(order))
            .collect::<Result<Vec<String>, _>>()?;
        info!("Forwarding {} accepted order events", accepted.len());
        try_join_all(
            accepted
                .iter()
                .map(|body| self.queue.send(&settings.user_email_queue_url, body)),
        )
        .await
    }
}
