use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, warn};

use crate::catalog;
use crate::models::*;
use crate::provider::{Notifier, PurchaseProvider};

pub const THANK_YOU_MESSAGE: &str = "Thanks for your donation, highly appreciated!";
pub const INCOMPLETE_MESSAGE: &str = "Your donation could not be completed";
pub const FAILURE_MESSAGE: &str =
    "Could not finalize donation due to error, please contact the developer.";

/// Donation flow on top of a [`PurchaseProvider`].
pub struct DonateService<P, N> {
    provider: P,
    notifier: N,
    connected: AtomicBool,
}

impl<P: PurchaseProvider, N: Notifier> DonateService<P, N> {
    pub fn new(provider: P, notifier: N) -> Self {
        Self {
            provider,
            notifier,
            connected: AtomicBool::new(false),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Single connection attempt, no retries.
    pub fn setup_connection(&self) -> bool {
        let connected = match self.provider.connect() {
            Ok(result) if result.is_ok() => true,
            Ok(result) => {
                error!(
                    code = result.response_code.code(),
                    debug_message = %result.debug_message,
                    "billing setup failed"
                );
                false
            }
            Err(err) => {
                error!(error = %err, "billing setup failed");
                false
            }
        };
        self.connected.store(connected, Ordering::Release);
        connected
    }

    pub fn on_service_disconnected(&self) {
        info!("billing service disconnected");
        self.connected.store(false, Ordering::Release);
    }

    /// Metadata for the catalog products the user does not own yet.
    pub fn list_available_products(&self) -> Vec<ProductDetails> {
        if !self.is_connected() {
            warn!("product query before billing connection was set up");
            return Vec::new();
        }

        let remaining = match self.provider.query_purchases(ProductType::Inapp) {
            Ok(response) => {
                if !response.billing_result.is_ok() {
                    warn!(
                        code = response.billing_result.response_code.code(),
                        debug_message = %response.billing_result.debug_message,
                        "owned purchases query failed"
                    );
                }
                catalog::unpurchased(&response.purchases)
            }
            Err(err) => {
                error!(error = %err, "owned purchases query failed");
                return Vec::new();
            }
        };

        if remaining.is_empty() {
            return Vec::new();
        }

        match self.provider.query_product_details(&remaining, ProductType::Inapp) {
            Ok(response) if response.billing_result.is_ok() => response.product_details,
            Ok(response) => {
                error!(
                    code = response.billing_result.response_code.code(),
                    debug_message = %response.billing_result.debug_message,
                    "product details query failed"
                );
                Vec::new()
            }
            Err(err) => {
                error!(error = %err, "product details query failed");
                Vec::new()
            }
        }
    }

    pub fn launch_purchase(&self, product: &ProductDetails) -> crate::Result<()> {
        let result = self.provider.launch_billing_flow(product)?;
        if !result.is_ok() {
            warn!(
                product_id = %product.product_id,
                code = result.response_code.code(),
                debug_message = %result.debug_message,
                "billing flow was not launched"
            );
        }
        Ok(())
    }

    /// Routes a notification pushed by the billing client.
    pub fn handle_event(&self, event: BillingEvent) {
        match event {
            BillingEvent::PurchasesUpdated {
                billing_result,
                purchases,
            } => self.on_purchases_updated(&billing_result, purchases.as_deref()),
            BillingEvent::ServiceDisconnected => self.on_service_disconnected(),
        }
    }

    pub fn on_purchases_updated(&self, result: &BillingResult, purchases: Option<&[Purchase]>) {
        match (result.response_code, purchases) {
            (BillingResponseCode::Ok, Some(purchases)) => {
                for purchase in purchases {
                    self.handle_purchase(purchase);
                }
            }
            (BillingResponseCode::UserCanceled, _) => {
                debug!("donation cancelled by user");
            }
            (code, _) => {
                warn!(
                    code = code.code(),
                    debug_message = %result.debug_message,
                    "donation failed"
                );
                self.notifier.show_toast(FAILURE_MESSAGE, ToastDuration::Short);
            }
        }
    }

    fn handle_purchase(&self, purchase: &Purchase) {
        match purchase.purchase_state {
            PurchaseState::Purchased if !purchase.is_acknowledged => self.acknowledge(purchase),
            PurchaseState::Purchased => {}
            PurchaseState::Pending => {
                self.notifier.show_toast(THANK_YOU_MESSAGE, ToastDuration::Long)
            }
            PurchaseState::Unspecified => {
                self.notifier.show_toast(INCOMPLETE_MESSAGE, ToastDuration::Short)
            }
        }
    }

    // A failed acknowledgement is only logged, the user is not told.
    fn acknowledge(&self, purchase: &Purchase) {
        match self.provider.acknowledge_purchase(&purchase.purchase_token) {
            Ok(result) if result.is_ok() => {
                info!(products = ?purchase.products, "donation acknowledged");
                self.notifier.show_toast(THANK_YOU_MESSAGE, ToastDuration::Long);
            }
            Ok(result) => error!(
                code = result.response_code.code(),
                debug_message = %result.debug_message,
                "acknowledging purchase failed"
            ),
            Err(err) => error!(error = %err, "acknowledging purchase failed"),
        }
    }
}
