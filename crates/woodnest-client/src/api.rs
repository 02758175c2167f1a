//! # Storefront API Seam
//!
//! The operations the client needs from the storefront backend.
//!
//! ```text
//! CartService / OrderService / SuggestionDebouncer
//!                      │
//!                      ▼  Arc<dyn StorefrontApi>
//!        ┌─────────────┴──────────────┐
//!        │                            │
//!  HttpStorefrontApi            test fakes
//!  (reqwest, http.rs)
//! ```

use async_trait::async_trait;
use woodnest_core::{AddToCartRequest, Cart, Order, Product, ProductSuggestion, UpdateCartItemRequest};

use crate::error::ClientResult;

/// Remote catalog, cart and order operations.
///
/// Every method issues at most one request. Mutations return the cart as the
/// backend sees it afterwards.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    async fn fetch_product(&self, product_id: &str) -> ClientResult<Product>;

    async fn search_suggestions(&self, query: &str) -> ClientResult<Vec<ProductSuggestion>>;

    async fn fetch_cart(&self) -> ClientResult<Cart>;

    async fn add_to_cart(&self, request: &AddToCartRequest) -> ClientResult<Cart>;

    async fn update_cart_item(
        &self,
        line_id: &str,
        request: &UpdateCartItemRequest,
    ) -> ClientResult<Cart>;

    async fn remove_cart_item(&self, line_id: &str) -> ClientResult<Cart>;

    async fn clear_cart(&self) -> ClientResult<()>;

    async fn fetch_orders(&self) -> ClientResult<Vec<Order>>;
}

// =============================================================================
// Test Fake
// =============================================================================

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use tokio::sync::Notify;
    use woodnest_core::{CartLine, Money};

    use super::*;
    use crate::error::ClientError;

    /// In-memory backend that counts calls and can hold `add_to_cart` open.
    #[derive(Default)]
    pub struct FakeStorefront {
        pub products: Mutex<HashMap<String, Product>>,
        pub suggestions: Mutex<Vec<ProductSuggestion>>,
        pub cart: Mutex<Cart>,
        pub orders: Mutex<Vec<Order>>,
        pub added: Mutex<Vec<AddToCartRequest>>,
        pub queries: Mutex<Vec<String>>,
        calls: Mutex<HashMap<&'static str, usize>>,
        fail_with: Mutex<Option<(u16, String)>>,
        hold_add: Mutex<Option<(std::sync::Arc<Notify>, std::sync::Arc<Notify>)>>,
    }

    impl FakeStorefront {
        pub fn calls(&self, op: &str) -> usize {
            self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
        }

        pub fn total_calls(&self) -> usize {
            self.calls.lock().unwrap().values().sum()
        }

        /// Makes every following call fail with this status.
        pub fn fail_with(&self, status: u16, message: &str) {
            *self.fail_with.lock().unwrap() = Some((status, message.to_string()));
        }

        /// Makes `add_to_cart` signal `entered`, then wait for `release`.
        pub fn hold_add(&self, entered: std::sync::Arc<Notify>, release: std::sync::Arc<Notify>) {
            *self.hold_add.lock().unwrap() = Some((entered, release));
        }

        pub fn stop_holding(&self) {
            *self.hold_add.lock().unwrap() = None;
        }

        fn record(&self, op: &'static str) -> ClientResult<()> {
            *self.calls.lock().unwrap().entry(op).or_default() += 1;
            match self.fail_with.lock().unwrap().clone() {
                Some((status, message)) => Err(ClientError::Remote { status, message }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl StorefrontApi for FakeStorefront {
        async fn fetch_product(&self, product_id: &str) -> ClientResult<Product> {
            self.record("fetch_product")?;
            self.products
                .lock()
                .unwrap()
                .get(product_id)
                .cloned()
                .ok_or_else(|| ClientError::Remote {
                    status: 404,
                    message: "Product not found".to_string(),
                })
        }

        async fn search_suggestions(&self, query: &str) -> ClientResult<Vec<ProductSuggestion>> {
            self.record("search_suggestions")?;
            self.queries.lock().unwrap().push(query.to_string());
            let needle = query.to_lowercase();
            Ok(self
                .suggestions
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.name.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }

        async fn fetch_cart(&self) -> ClientResult<Cart> {
            self.record("fetch_cart")?;
            Ok(self.cart.lock().unwrap().clone())
        }

        async fn add_to_cart(&self, request: &AddToCartRequest) -> ClientResult<Cart> {
            let hold = self.hold_add.lock().unwrap().clone();
            if let Some((entered, release)) = hold {
                entered.notify_one();
                release.notified().await;
            }
            self.record("add_to_cart")?;
            self.added.lock().unwrap().push(request.clone());

            let unit_price = request
                .size_variant
                .as_ref()
                .map(|v| v.price)
                .or_else(|| request.custom_size.as_ref().map(|c| c.calculated_price))
                .unwrap_or(Money::zero());

            let mut cart = self.cart.lock().unwrap();
            let id = format!("line-{}", cart.items.len() + 1);
            cart.items.push(CartLine {
                id,
                product_id: request.product_id.clone(),
                name: request.product_id.clone(),
                quantity: request.quantity,
                unit_price,
                size_variant: request.size_variant.clone(),
                custom_size: request.custom_size.clone(),
            });
            cart.total = None;
            Ok(cart.clone())
        }

        async fn update_cart_item(
            &self,
            line_id: &str,
            request: &UpdateCartItemRequest,
        ) -> ClientResult<Cart> {
            self.record("update_cart_item")?;
            let mut cart = self.cart.lock().unwrap();
            if let Some(line) = cart.items.iter_mut().find(|l| l.id == line_id) {
                line.quantity = request.quantity;
            }
            Ok(cart.clone())
        }

        async fn remove_cart_item(&self, line_id: &str) -> ClientResult<Cart> {
            self.record("remove_cart_item")?;
            let mut cart = self.cart.lock().unwrap();
            cart.items.retain(|l| l.id != line_id);
            Ok(cart.clone())
        }

        async fn clear_cart(&self) -> ClientResult<()> {
            self.record("clear_cart")?;
            *self.cart.lock().unwrap() = Cart::new();
            Ok(())
        }

        async fn fetch_orders(&self) -> ClientResult<Vec<Order>> {
            self.record("fetch_orders")?;
            Ok(self.orders.lock().unwrap().clone())
        }
    }
}
