use std::collections::HashSet;

use crate::models::Purchase;

pub const THANK_YOU: &str = "thank_you";
pub const BUY_A_COFFEE: &str = "buy_a_coffee";
pub const BUY_A_COFFEE_AND_CAKE: &str = "buy_a_coffee_and_cake";

/// Every donation product offered, in display order.
pub const PRODUCTS: [&str; 3] = [THANK_YOU, BUY_A_COFFEE, BUY_A_COFFEE_AND_CAKE];

/// Catalog entries not covered by any of `owned`, keeping catalog order.
pub fn unpurchased(owned: &[Purchase]) -> Vec<String> {
    let bought: HashSet<&str> = owned
        .iter()
        .flat_map(|purchase| purchase.products.iter().map(String::as_str))
        .collect();

    PRODUCTS
        .iter()
        .filter(|id| !bought.contains(*id))
        .map(|id| id.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PurchaseState;

    fn owned(products: &[&str]) -> Purchase {
        Purchase {
            order_id: None,
            package_name: "app".into(),
            products: products.iter().map(|p| p.to_string()).collect(),
            purchase_time: 0,
            purchase_token: "token".into(),
            purchase_state: PurchaseState::Purchased,
            is_acknowledged: true,
            quantity: 1,
        }
    }

    #[test]
    fn nothing_owned_leaves_full_catalog() {
        assert_eq!(unpurchased(&[]), PRODUCTS.to_vec());
    }

    #[test]
    fn multi_product_purchases_and_foreign_ids() {
        let remaining = unpurchased(&[
            owned(&[THANK_YOU, "retired_sku"]),
            owned(&[BUY_A_COFFEE_AND_CAKE]),
        ]);
        assert_eq!(remaining, vec![BUY_A_COFFEE.to_string()]);
    }

    #[test]
    fn everything_owned() {
        assert!(unpurchased(&[owned(&PRODUCTS)]).is_empty());
    }
}
