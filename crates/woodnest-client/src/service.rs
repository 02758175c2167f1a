//! # Cart and Order Services
//!
//! Orchestrates cart mutations against the backend and keeps the
//! [`CartStore`] in step with it.
//!
//! ## Add-to-Cart Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SizeSelection ──► compose_add_to_cart ──► ValidationError? ── return   │
//! │                                │                (no request, store      │
//! │                                ▼                 untouched)             │
//! │                       in-flight guard taken? ── SubmissionInFlight      │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                      POST cart/add (exactly one)                        │
//! │                       │                    │                            │
//! │                   success               failure                         │
//! │                       ▼                    ▼                            │
//! │          CartAction::Replace(cart)   CartAction::SetError(msg)          │
//! │                                      (previous cart kept)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guard covers every cart mutation, so a quantity change cannot race an
//! add. It is released by `Drop`, including when the caller's future is
//! cancelled mid-request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};
use woodnest_core::validation::validate_quantity;
use woodnest_core::{
    compose_add_to_cart, AddToCartRequest, Cart, Order, SizeSelection, UpdateCartItemRequest,
    ValidationError,
};

use crate::api::StorefrontApi;
use crate::error::{ClientError, ClientResult};
use crate::store::{CartAction, CartStore};

// =============================================================================
// In-Flight Guard
// =============================================================================

/// Held while a cart mutation is outstanding.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { flag: flag.clone() })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// =============================================================================
// Cart Service
// =============================================================================

/// Cart operations for one shopper session.
///
/// Cheap to clone; clones share the API, the store and the in-flight flag.
#[derive(Clone)]
pub struct CartService {
    api: Arc<dyn StorefrontApi>,
    store: Arc<CartStore>,
    in_flight: Arc<AtomicBool>,
}

impl CartService {
    pub fn new(api: Arc<dyn StorefrontApi>, store: Arc<CartStore>) -> Self {
        Self {
            api,
            store,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn store(&self) -> &Arc<CartStore> {
        &self.store
    }

    /// True while a cart mutation is outstanding ("Add to Cart" shows a spinner).
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Reloads the cart from the backend.
    pub async fn refresh(&self) -> ClientResult<Cart> {
        self.store.dispatch(CartAction::SetLoading(true));
        let result = self.api.fetch_cart().await;
        self.apply(result, "refresh cart")
    }

    /// Validates the selection and adds it to the cart.
    ///
    /// Validation failures return before any request and leave the store
    /// untouched.
    pub async fn add_to_cart(
        &self,
        selection: &SizeSelection<'_>,
        quantity: u32,
    ) -> ClientResult<Cart> {
        let request = compose_add_to_cart(selection, quantity)?;
        self.submit(request).await
    }

    /// Sends an already composed add-to-cart payload.
    pub async fn submit(&self, request: AddToCartRequest) -> ClientResult<Cart> {
        let _guard = self.begin("add to cart")?;
        let result = self.api.add_to_cart(&request).await;
        if result.is_ok() {
            info!(
                product_id = %request.product_id,
                quantity = request.quantity,
                custom = request.custom_size.is_some(),
                "Added to cart"
            );
        }
        self.apply(result, "add to cart")
    }

    /// Changes the quantity of a cart line.
    pub async fn update_quantity(&self, line_id: &str, quantity: u32) -> ClientResult<Cart> {
        require_line_id(line_id)?;
        validate_quantity(quantity)?;

        let _guard = self.begin("update cart line")?;
        let result = self
            .api
            .update_cart_item(line_id, &UpdateCartItemRequest { quantity })
            .await;
        if result.is_ok() {
            info!(line_id, quantity, "Cart line updated");
        }
        self.apply(result, "update cart line")
    }

    pub async fn remove_line(&self, line_id: &str) -> ClientResult<Cart> {
        require_line_id(line_id)?;

        let _guard = self.begin("remove cart line")?;
        let result = self.api.remove_cart_item(line_id).await;
        if result.is_ok() {
            info!(line_id, "Cart line removed");
        }
        self.apply(result, "remove cart line")
    }

    pub async fn clear(&self) -> ClientResult<()> {
        let _guard = self.begin("clear cart")?;
        match self.api.clear_cart().await {
            Ok(()) => {
                info!("Cart cleared");
                self.store.dispatch(CartAction::Clear);
                Ok(())
            }
            Err(e) => Err(self.record_failure(e, "clear cart")),
        }
    }

    fn begin(&self, operation: &str) -> ClientResult<InFlightGuard> {
        match InFlightGuard::acquire(&self.in_flight) {
            Some(guard) => {
                self.store.dispatch(CartAction::SetLoading(true));
                Ok(guard)
            }
            None => {
                warn!(operation, "Rejected cart update while another is in flight");
                Err(ClientError::SubmissionInFlight)
            }
        }
    }

    fn apply(&self, result: ClientResult<Cart>, operation: &str) -> ClientResult<Cart> {
        match result {
            Ok(cart) => {
                self.store.dispatch(CartAction::Replace(cart.clone()));
                Ok(cart)
            }
            Err(e) => Err(self.record_failure(e, operation)),
        }
    }

    fn record_failure(&self, err: ClientError, operation: &str) -> ClientError {
        warn!(operation, error = %err, "Cart operation failed");
        self.store.dispatch(CartAction::SetError(err.to_string()));
        err
    }
}

fn require_line_id(line_id: &str) -> ClientResult<()> {
    if line_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "lineId".to_string(),
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Order Service
// =============================================================================

/// Read-only access to the customer's order history.
#[derive(Clone)]
pub struct OrderService {
    api: Arc<dyn StorefrontApi>,
}

impl OrderService {
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self { api }
    }

    /// Orders, newest first.
    pub async fn history(&self) -> ClientResult<Vec<Order>> {
        let mut orders = self.api.fetch_orders().await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}
