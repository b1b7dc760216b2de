use tauri::{command, AppHandle, Runtime};

use crate::models::*;
use crate::{DonateExt, Result};

#[command]
pub(crate) async fn setup_connection<R: Runtime>(app: AppHandle<R>) -> Result<bool> {
    Ok(app.donate().setup_connection())
}

#[command]
pub(crate) async fn list_available_products<R: Runtime>(
    app: AppHandle<R>,
) -> Result<ListProductsResponse> {
    Ok(ListProductsResponse {
        products: app.donate().list_available_products(),
    })
}

#[command]
pub(crate) async fn launch_purchase<R: Runtime>(
    app: AppHandle<R>,
    payload: LaunchPurchaseRequest,
) -> Result<()> {
    app.donate().launch_purchase(&payload.product)
}
