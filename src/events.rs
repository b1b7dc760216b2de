use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::models::BillingEvent;
use crate::provider::{Notifier, PurchaseProvider};
use crate::DonateService;

/// Feeds billing events to the service one at a time, in arrival order.
///
/// Provider round-trips (acknowledgements) block, so events are handled on a
/// dedicated thread instead of the thread that delivered them.
pub struct EventWorker {
    sender: mpsc::UnboundedSender<BillingEvent>,
    handle: JoinHandle<()>,
}

impl EventWorker {
    pub fn spawn<P, N>(service: Arc<DonateService<P, N>>) -> crate::Result<Self>
    where
        P: PurchaseProvider + 'static,
        N: Notifier + 'static,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel::<BillingEvent>();
        let handle = thread::Builder::new()
            .name("donate-billing-events".into())
            .spawn(move || {
                while let Some(event) = receiver.blocking_recv() {
                    service.handle_event(event);
                }
                debug!("billing event worker stopped");
            })?;
        Ok(Self { sender, handle })
    }

    pub fn push(&self, event: BillingEvent) {
        if self.sender.send(event).is_err() {
            warn!("billing event worker is gone, dropping event");
        }
    }

    /// Stops accepting events and waits until the queued ones are handled.
    pub fn shutdown(self) {
        drop(self.sender);
        if self.handle.join().is_err() {
            warn!("billing event worker panicked");
        }
    }
}
