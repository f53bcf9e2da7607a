//! Background task forwarding revalidation signals to the frontend.
//!
//! [`Revalidator`] subscribes to the [`RevalidationBus`](crate::bus::RevalidationBus)
//! and hands every signal to the webhook. It shuts down when the bus is
//! dropped.

use tokio::sync::broadcast;

use crate::bus::RevalidationEvent;
use crate::delivery::RevalidationWebhook;

/// Background service draining the revalidation bus.
pub struct Revalidator;

impl Revalidator {
    /// Run the delivery loop.
    ///
    /// Without a webhook the signals are logged and dropped. Delivery
    /// failures are logged; they never reach the request that caused them.
    pub async fn run(
        mut receiver: broadcast::Receiver<RevalidationEvent>,
        webhook: Option<RevalidationWebhook>,
    ) {
        loop {
            match receiver.recv().await {
                Ok(event) => Self::forward(webhook.as_ref(), &event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Revalidator lagged, some pages may stay stale"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Revalidation bus closed, revalidator shutting down");
                    break;
                }
            }
        }
    }

    async fn forward(webhook: Option<&RevalidationWebhook>, event: &RevalidationEvent) {
        let Some(webhook) = webhook else {
            tracing::debug!(
                kind = ?event.kind,
                action = ?event.action,
                paths = ?event.paths,
                "No revalidation webhook configured, dropping signal"
            );
            return;
        };

        match webhook.deliver(&event.paths).await {
            Ok(()) => tracing::debug!(
                entity_id = event.entity_id,
                paths = ?event.paths,
                "Revalidation signal delivered"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                url = webhook.url(),
                entity_id = event.entity_id,
                paths = ?event.paths,
                "Revalidation webhook failed"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use vowreel_core::content::ContentKind;

    use super::*;
    use crate::bus::{MutationAction, RevalidationBus};

    #[tokio::test]
    async fn exits_when_bus_is_dropped() {
        let bus = RevalidationBus::default();
        let handle = tokio::spawn(Revalidator::run(bus.subscribe(), None));

        bus.publish(RevalidationEvent::new(
            ContentKind::Film,
            MutationAction::Created,
            1,
            ["a"],
        ));
        drop(bus);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("revalidator should stop once the bus is gone")
            .unwrap();
    }

    #[tokio::test]
    async fn unreachable_webhook_does_not_stop_the_loop() {
        let bus = RevalidationBus::default();
        // Port 9 (discard) on localhost is not listening; delivery fails fast.
        let webhook = RevalidationWebhook::new("http://127.0.0.1:9/revalidate", None).unwrap();
        let handle = tokio::spawn(Revalidator::run(bus.subscribe(), Some(webhook)));

        for id in 0..3 {
            bus.publish(RevalidationEvent::new(
                ContentKind::Venue,
                MutationAction::Updated,
                id,
                ["v"],
            ));
        }
        drop(bus);

        tokio::time::timeout(Duration::from_secs(30), handle)
            .await
            .expect("revalidator should drain and stop")
            .unwrap();
    }
}
