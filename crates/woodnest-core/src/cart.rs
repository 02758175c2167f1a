//! # Cart Composition
//!
//! Builds the add-to-cart payload from a size selection, and models the cart
//! the backend returns.
//!
//! ## Payload Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Simple product        { productId, quantity }                          │
//! │                                                                         │
//! │  READY_MADE_SELECTED   { productId, quantity,                           │
//! │                          sizeVariant: { variantId, name,                │
//! │                                         dimensions, price } }           │
//! │                                                                         │
//! │  CUSTOM_COMPLETE       { productId, quantity,                           │
//! │                          customSize: { isCustom: true, measurements,    │
//! │                                        calculatedPrice, notes? } }      │
//! │                                                                         │
//! │  anything else         ValidationError, nothing is sent                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `calculatedPrice` is recomputed here at submission time from the
//! measurements being sent; a price shown earlier in the UI is never reused.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::calculate_price;
use crate::selection::{SizeMode, SizeSelection};
use crate::types::{Dimensions, Measurements, SizeVariant};
use crate::validation::{
    require_measurements, validate_notes, validate_product_id, validate_quantity,
    ValidationResult,
};

// =============================================================================
// Line Item Payloads
// =============================================================================

/// The ready-made variant carried on a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectedVariant {
    pub variant_id: String,
    pub name: String,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[ts(as = "f64")]
    pub price: Money,
}

impl From<&SizeVariant> for SelectedVariant {
    fn from(variant: &SizeVariant) -> Self {
        SelectedVariant {
            variant_id: variant.id.clone(),
            name: variant.name.clone(),
            dimensions: variant.dimensions.clone(),
            price: variant.price,
        }
    }
}

/// A custom measurement set carried on a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomSize {
    pub is_custom: bool,
    pub measurements: Measurements,
    #[ts(as = "f64")]
    pub calculated_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
}

/// Body of the add-to-cart request.
///
/// At most one of `size_variant` / `custom_size` is present; absent ones are
/// omitted from the JSON rather than sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub size_variant: Option<SelectedVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub custom_size: Option<CustomSize>,
}

/// Body of the update-line request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}

/// Validates the selection and builds the add-to-cart payload.
///
/// ## Rules
/// - Product id non-empty, quantity in `1..=999`
/// - Not customizable: product and quantity only
/// - Ready-made tab: the chosen variant, else `SizeNotSelected`
/// - Custom tab: every required field > 0, else `MissingMeasurements`;
///   only required fields are sent and the price is recomputed
///
/// Pure: the same selection and quantity always yield the same payload.
pub fn compose_add_to_cart(
    selection: &SizeSelection<'_>,
    quantity: u32,
) -> ValidationResult<AddToCartRequest> {
    let product = selection.product();
    validate_product_id(&product.id)?;
    validate_quantity(quantity)?;

    let mut request = AddToCartRequest {
        product_id: product.id.clone(),
        quantity,
        size_variant: None,
        custom_size: None,
    };

    if !product.is_customizable() {
        return Ok(request);
    }

    match selection.mode() {
        SizeMode::ReadyMade => {
            let variant = selection
                .selected_variant()
                .filter(|v| v.in_stock)
                .ok_or(ValidationError::SizeNotSelected)?;
            request.size_variant = Some(SelectedVariant::from(variant));
        }
        SizeMode::Custom => {
            let config = product
                .custom_size()
                .ok_or(ValidationError::CustomSizeUnavailable)?;
            let fields = config.required_fields();
            require_measurements(selection.measurements(), &fields)?;

            let measurements = selection.measurements().retain_fields(&fields);
            let calculated_price = calculate_price(Some(&measurements), Some(config));
            request.custom_size = Some(CustomSize {
                is_custom: true,
                measurements,
                calculated_price,
                notes: validate_notes(selection.notes())?,
            });
        }
    }

    Ok(request)
}

// =============================================================================
// Cart Read Model
// =============================================================================

/// A line in the backend cart (also used for order items).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    /// Price of one unit: the variant price, the custom price, or the base price.
    #[ts(as = "f64")]
    pub unit_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub size_variant: Option<SelectedVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub custom_size: Option<CustomSize>,
}

impl CartLine {
    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The shopper's cart as last returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Required on the wire, so an acknowledgement without a cart body is
    /// never read as an empty cart.
    pub items: Vec<CartLine>,

    /// Backend-computed total (may include discounts/shipping). Falls back to
    /// the subtotal when the backend omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<f64>")]
    pub total: Option<Money>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.items.iter().find(|l| l.id == line_id)
    }

    /// Returns the number of lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|l| l.quantity as u64).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// Backend total, or the subtotal when none was sent.
    pub fn total(&self) -> Money {
        self.total.unwrap_or_else(|| self.subtotal())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart totals summary for the header badge and checkout summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    #[ts(as = "f64")]
    pub total_quantity: u64,
    #[ts(as = "f64")]
    pub subtotal: Money,
    #[ts(as = "f64")]
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
