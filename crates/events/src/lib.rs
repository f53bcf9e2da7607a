//! Cache revalidation signals for the public site.
//!
//! Every successful content mutation names the public routes whose rendered
//! pages are now stale. This crate carries those signals off the request
//! path:
//!
//! - [`RevalidationBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`RevalidationEvent`] -- the signal envelope (what changed, which paths).
//! - [`RevalidationWebhook`] -- single-attempt POST to the frontend's
//!   revalidation endpoint.
//! - [`Revalidator`] -- background task draining the bus into the webhook.

pub mod bus;
pub mod delivery;
pub mod revalidator;

pub use bus::{MutationAction, RevalidationBus, RevalidationEvent};
pub use delivery::{RevalidationWebhook, WebhookError};
pub use revalidator::Revalidator;
