use crate::models::*;

/// The in-app purchasing backend.
///
/// Every call is a round-trip to the billing client. `Err` means the bridge
/// to the client failed; an answer from the client, even a failing one, comes
/// back as `Ok` with its [`BillingResult`].
pub trait PurchaseProvider: Send + Sync {
    fn connect(&self) -> crate::Result<BillingResult>;

    fn query_purchases(&self, product_type: ProductType) -> crate::Result<QueryPurchasesResponse>;

    fn query_product_details(
        &self,
        product_ids: &[String],
        product_type: ProductType,
    ) -> crate::Result<QueryProductDetailsResponse>;

    /// Presents the provider's purchase UI. The outcome is reported later as
    /// a purchases update.
    fn launch_billing_flow(&self, product: &ProductDetails) -> crate::Result<BillingResult>;

    fn acknowledge_purchase(&self, purchase_token: &str) -> crate::Result<BillingResult>;
}

/// Short-lived user notices.
pub trait Notifier: Send + Sync {
    fn show_toast(&self, message: &str, duration: ToastDuration);
}

macro_rules! forward_provider {
    ($($ty:ty),*) => {$(
        impl<T: PurchaseProvider + ?Sized> PurchaseProvider for $ty {
            fn connect(&self) -> crate::Result<BillingResult> {
                (**self).connect()
            }

            fn query_purchases(
                &self,
                product_type: ProductType,
            ) -> crate::Result<QueryPurchasesResponse> {
                (**self).query_purchases(product_type)
            }

            fn query_product_details(
                &self,
                product_ids: &[String],
                product_type: ProductType,
            ) -> crate::Result<QueryProductDetailsResponse> {
                (**self).query_product_details(product_ids, product_type)
            }

            fn launch_billing_flow(
                &self,
                product: &ProductDetails,
            ) -> crate::Result<BillingResult> {
                (**self).launch_billing_flow(product)
            }

            fn acknowledge_purchase(&self, purchase_token: &str) -> crate::Result<BillingResult> {
                (**self).acknowledge_purchase(purchase_token)
            }
        }

        impl<T: Notifier + ?Sized> Notifier for $ty {
            fn show_toast(&self, message: &str, duration: ToastDuration) {
                (**self).show_toast(message, duration)
            }
        }
    )*};
}

forward_provider!(&T, std::sync::Arc<T>);
