use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// One-time products. Donations are always of this type.
    #[default]
    Inapp,
    Subs,
}

/// Response codes reported by Play Billing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingResponseCode {
    ServiceTimeout,
    FeatureNotSupported,
    ServiceDisconnected,
    Ok,
    UserCanceled,
    ServiceUnavailable,
    BillingUnavailable,
    ItemUnavailable,
    DeveloperError,
    Error,
    ItemAlreadyOwned,
    ItemNotOwned,
    NetworkError,
    /// A code this crate does not know about yet.
    Other(i32),
}

impl BillingResponseCode {
    pub fn from_code(code: i32) -> Self {
        match code {
            -3 => Self::ServiceTimeout,
            -2 => Self::FeatureNotSupported,
            -1 => Self::ServiceDisconnected,
            0 => Self::Ok,
            1 => Self::UserCanceled,
            2 => Self::ServiceUnavailable,
            3 => Self::BillingUnavailable,
            4 => Self::ItemUnavailable,
            5 => Self::DeveloperError,
            6 => Self::Error,
            7 => Self::ItemAlreadyOwned,
            8 => Self::ItemNotOwned,
            12 => Self::NetworkError,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::ServiceTimeout => -3,
            Self::FeatureNotSupported => -2,
            Self::ServiceDisconnected => -1,
            Self::Ok => 0,
            Self::UserCanceled => 1,
            Self::ServiceUnavailable => 2,
            Self::BillingUnavailable => 3,
            Self::ItemUnavailable => 4,
            Self::DeveloperError => 5,
            Self::Error => 6,
            Self::ItemAlreadyOwned => 7,
            Self::ItemNotOwned => 8,
            Self::NetworkError => 12,
            Self::Other(code) => code,
        }
    }
}

impl Serialize for BillingResponseCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for BillingResponseCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i32::deserialize(deserializer).map(Self::from_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingResult {
    pub response_code: BillingResponseCode,
    #[serde(default)]
    pub debug_message: String,
}

impl BillingResult {
    pub fn new(response_code: BillingResponseCode, debug_message: impl Into<String>) -> Self {
        Self {
            response_code,
            debug_message: debug_message.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new(BillingResponseCode::Ok, "")
    }

    pub fn is_ok(&self) -> bool {
        self.response_code == BillingResponseCode::Ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseState {
    Unspecified = 0,
    Purchased = 1,
    Pending = 2,
}

impl Serialize for PurchaseState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(*self as i32)
    }
}

impl<'de> Deserialize<'de> for PurchaseState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        match value {
            0 => Ok(PurchaseState::Unspecified),
            1 => Ok(PurchaseState::Purchased),
            2 => Ok(PurchaseState::Pending),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid purchase state: {value}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub product_id: String,
    #[serde(default)]
    pub product_type: ProductType,
    pub title: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_amount_micros: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub order_id: Option<String>,
    pub package_name: String,
    pub products: Vec<String>,
    pub purchase_time: i64,
    pub purchase_token: String,
    pub purchase_state: PurchaseState,
    pub is_acknowledged: bool,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastDuration {
    Short,
    Long,
}

// Bridge payloads exchanged with the Kotlin plugin.

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub enable_pending_purchases: bool,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPurchasesRequest {
    pub product_type: ProductType,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPurchasesResponse {
    pub billing_result: BillingResult,
    #[serde(default)]
    pub purchases: Vec<Purchase>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryProductDetailsRequest {
    pub product_ids: Vec<String>,
    pub product_type: ProductType,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryProductDetailsResponse {
    pub billing_result: BillingResult,
    #[serde(default)]
    pub product_details: Vec<ProductDetails>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchBillingFlowRequest {
    pub product_id: String,
    pub product_type: ProductType,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgePurchaseRequest {
    pub purchase_token: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowToastRequest {
    pub message: String,
    pub duration: ToastDuration,
}

/// Asynchronous notifications pushed by the billing client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BillingEvent {
    #[serde(rename_all = "camelCase")]
    PurchasesUpdated {
        billing_result: BillingResult,
        purchases: Option<Vec<Purchase>>,
    },
    ServiceDisconnected,
}

// Command payloads.

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchPurchaseRequest {
    pub product: ProductDetails,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsResponse {
    pub products: Vec<ProductDetails>,
}
