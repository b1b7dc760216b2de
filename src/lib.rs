use std::{ops::Deref, sync::Arc};

use serde::{Deserialize, Serialize};
use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

pub use models::*;

#[cfg(target_os = "android")]
mod mobile;
#[cfg(not(target_os = "android"))]
mod desktop;

mod commands;
mod error;
mod models;

pub mod catalog;
pub mod events;
pub mod provider;
pub mod service;

pub use error::{Error, Result};
pub use provider::{Notifier, PurchaseProvider};
pub use service::DonateService;

#[cfg(target_os = "android")]
pub use mobile::PlayBilling;
#[cfg(not(target_os = "android"))]
pub use desktop::{EventNotifier, Unsupported, NOTICE_EVENT};

#[cfg(target_os = "android")]
use mobile::Service;
#[cfg(not(target_os = "android"))]
use desktop::Service;

/// Plugin configuration, read from `plugins.donate` in `tauri.conf.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Lets the billing client report purchases that are still being paid.
    #[serde(default = "default_enable_pending_purchases")]
    pub enable_pending_purchases: bool,
}

fn default_enable_pending_purchases() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_pending_purchases: default_enable_pending_purchases(),
        }
    }
}

/// Access to the donation APIs.
pub struct Donate<R: Runtime>(Arc<Service<R>>);

impl<R: Runtime> Deref for Donate<R> {
    type Target = Service<R>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extensions to [`tauri::App`], [`tauri::AppHandle`] and [`tauri::Window`] to access the
/// donation APIs.
pub trait DonateExt<R: Runtime> {
    fn donate(&self) -> &Donate<R>;
}

impl<R: Runtime, T: Manager<R>> crate::DonateExt<R> for T {
    fn donate(&self) -> &Donate<R> {
        self.state::<Donate<R>>().inner()
    }
}

/// Initializes the plugin.
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<Config>> {
    Builder::<R, Option<Config>>::new("donate")
        .invoke_handler(tauri::generate_handler![
            commands::setup_connection,
            commands::list_available_products,
            commands::launch_purchase,
        ])
        .setup(|app, api| {
            #[cfg(target_os = "android")]
            let service = mobile::init(app, api)?;
            #[cfg(not(target_os = "android"))]
            let service = desktop::init(app, api)?;
            app.manage(Donate(service));
            Ok(())
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_purchases_enabled_by_default() {
        assert!(Config::default().enable_pending_purchases);
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.enable_pending_purchases);
        let config: Config = serde_json::from_str(r#"{"enablePendingPurchases":false}"#).unwrap();
        assert!(!config.enable_pending_purchases);
    }
}
