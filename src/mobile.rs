use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tauri::{
    ipc::{Channel, InvokeResponseBody},
    plugin::{PluginApi, PluginHandle},
    AppHandle, Runtime,
};
use tracing::{info, warn};

use crate::models::*;
use crate::provider::{Notifier, PurchaseProvider};
use crate::events::EventWorker;
use crate::{Config, DonateService};

const PLUGIN_IDENTIFIER: &str = "app.tauri.donate";

pub type Service<R> = DonateService<PlayBilling<R>, PlayBilling<R>>;

// registers the Kotlin plugin and wires its billing events into the service
pub fn init<R: Runtime>(
    _app: &AppHandle<R>,
    api: PluginApi<R, Option<Config>>,
) -> crate::Result<Arc<Service<R>>> {
    let config = api.config().clone().unwrap_or_default();
    let handle = api.register_android_plugin(PLUGIN_IDENTIFIER, "DonatePlugin")?;
    let billing = PlayBilling { handle, config };

    let service = Arc::new(DonateService::new(billing.clone(), billing.clone()));
    billing.set_event_handler(Arc::clone(&service))?;
    info!("play billing bridge registered");
    Ok(service)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventHandler {
    handler: Channel,
}

/// Play Billing client living on the Kotlin side of the plugin.
pub struct PlayBilling<R: Runtime> {
    handle: PluginHandle<R>,
    config: Config,
}

impl<R: Runtime> Clone for PlayBilling<R> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R: Runtime> PlayBilling<R> {
    // Events reach the service through a single worker so a late
    // disconnect can never overtake the purchase updates sent before it.
    fn set_event_handler(&self, service: Arc<Service<R>>) -> crate::Result<()> {
        let worker = EventWorker::spawn(service)?;
        let channel = Channel::new(move |body: InvokeResponseBody| {
            match body.deserialize::<BillingEvent>() {
                Ok(event) => worker.push(event),
                Err(err) => warn!(error = %err, "dropping undecodable billing event"),
            }
            Ok(())
        });

        self.handle
            .run_mobile_plugin::<()>("setEventHandler", EventHandler { handler: channel })
            .map_err(Into::into)
    }

    fn call<T: Serialize, O: DeserializeOwned>(
        &self,
        command: &str,
        payload: T,
    ) -> crate::Result<O> {
        self.handle
            .run_mobile_plugin(command, payload)
            .map_err(Into::into)
    }
}

impl<R: Runtime> PurchaseProvider for PlayBilling<R> {
    fn connect(&self) -> crate::Result<BillingResult> {
        self.call(
            "connect",
            ConnectRequest {
                enable_pending_purchases: self.config.enable_pending_purchases,
            },
        )
    }

    fn query_purchases(&self, product_type: ProductType) -> crate::Result<QueryPurchasesResponse> {
        self.call("queryPurchases", QueryPurchasesRequest { product_type })
    }

    fn query_product_details(
        &self,
        product_ids: &[String],
        product_type: ProductType,
    ) -> crate::Result<QueryProductDetailsResponse> {
        self.call(
            "queryProductDetails",
            QueryProductDetailsRequest {
                product_ids: product_ids.to_vec(),
                product_type,
            },
        )
    }

    fn launch_billing_flow(&self, product: &ProductDetails) -> crate::Result<BillingResult> {
        self.call(
            "launchBillingFlow",
            LaunchBillingFlowRequest {
                product_id: product.product_id.clone(),
                product_type: product.product_type,
            },
        )
    }

    fn acknowledge_purchase(&self, purchase_token: &str) -> crate::Result<BillingResult> {
        self.call(
            "acknowledgePurchase",
            AcknowledgePurchaseRequest {
                purchase_token: purchase_token.to_string(),
            },
        )
    }
}

impl<R: Runtime> Notifier for PlayBilling<R> {
    fn show_toast(&self, message: &str, duration: ToastDuration) {
        let request = ShowToastRequest {
            message: message.to_string(),
            duration,
        };
        if let Err(err) = self.call::<_, ()>("showToast", request) {
            warn!(error = %err, toast = message, "could not show toast");
        }
    }
}
