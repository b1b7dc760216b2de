use std::sync::Arc;

use serde::de::DeserializeOwned;
use tauri::{plugin::PluginApi, AppHandle, Emitter, Runtime};
use tracing::{info, warn};

use crate::models::*;
use crate::provider::{Notifier, PurchaseProvider};
use crate::DonateService;

pub const NOTICE_EVENT: &str = "donate://notice";

const UNSUPPORTED: &str = "In-app billing is not supported on this platform";

pub type Service<R> = DonateService<Unsupported, EventNotifier<R>>;

pub fn init<R: Runtime, C: DeserializeOwned>(
    app: &AppHandle<R>,
    _api: PluginApi<R, C>,
) -> crate::Result<Arc<Service<R>>> {
    Ok(Arc::new(DonateService::new(Unsupported, EventNotifier(app.clone()))))
}

/// Backend for targets without a billing client. Queries answer billing
/// unavailable; launching a purchase is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

fn unavailable() -> BillingResult {
    BillingResult::new(BillingResponseCode::BillingUnavailable, UNSUPPORTED)
}

impl PurchaseProvider for Unsupported {
    fn connect(&self) -> crate::Result<BillingResult> {
        Ok(unavailable())
    }

    fn query_purchases(&self, _product_type: ProductType) -> crate::Result<QueryPurchasesResponse> {
        Ok(QueryPurchasesResponse {
            billing_result: unavailable(),
            purchases: Vec::new(),
        })
    }

    fn query_product_details(
        &self,
        _product_ids: &[String],
        _product_type: ProductType,
    ) -> crate::Result<QueryProductDetailsResponse> {
        Ok(QueryProductDetailsResponse {
            billing_result: unavailable(),
            product_details: Vec::new(),
        })
    }

    fn launch_billing_flow(&self, _product: &ProductDetails) -> crate::Result<BillingResult> {
        Err(crate::Error::from(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            UNSUPPORTED,
        )))
    }

    fn acknowledge_purchase(&self, _purchase_token: &str) -> crate::Result<BillingResult> {
        Ok(unavailable())
    }
}

/// Sends notices to the frontend as `donate://notice` events.
pub struct EventNotifier<R: Runtime>(AppHandle<R>);

impl<R: Runtime> Notifier for EventNotifier<R> {
    fn show_toast(&self, message: &str, duration: ToastDuration) {
        info!(toast = message, ?duration, "donation notice");
        let notice = ShowToastRequest {
            message: message.to_string(),
            duration,
        };
        if let Err(err) = self.0.emit(NOTICE_EVENT, notice) {
            warn!(error = %err, "could not emit donation notice");
        }
    }
}
