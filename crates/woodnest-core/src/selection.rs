//! # Size Selection
//!
//! Tracks the shopper's size choice on a product page: a ready-made size
//! variant or a custom measurement set.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                    select_variant (in stock)                            │
//! │   ┌──────────────┐ ─────────────────────────► ┌───────────────────────┐ │
//! │   │ NO_SELECTION │                            │ READY_MADE_SELECTED   │ │
//! │   └──────┬───────┘ ◄──── (no default) ─────── └──────────┬────────────┘ │
//! │          │                                       ▲       │             │
//! │          │ switch_to_custom        select_variant│       │switch_to_   │
//! │          ▼                                       │       ▼custom       │
//! │   ┌─────────────────┐  all required > 0   ┌─────────────────┐          │
//! │   │ CUSTOM_ENTERING │ ──────────────────► │ CUSTOM_COMPLETE │          │
//! │   └─────────────────┘ ◄────────────────── └─────────────────┘          │
//! │                         a field cleared                                 │
//! │                                                                         │
//! │   "Add to Cart" enabled only in READY_MADE_SELECTED / CUSTOM_COMPLETE   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The state is derived from the inputs on every read, so it can never
//! disagree with the measurements actually typed.

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{self, PriceQuote};
use crate::types::{MeasurementField, Measurements, Product, SizeVariant};
use crate::validation::{missing_fields, ValidationResult};

/// Where the product-page size picker currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionState {
    NoSelection,
    ReadyMadeSelected,
    CustomEntering,
    CustomComplete,
}

/// Which tab of the size picker is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SizeMode {
    #[default]
    ReadyMade,
    Custom,
}

/// Size selection for one product-detail session.
///
/// Borrows the product it was opened for. Measurements survive switching
/// between tabs so the shopper never has to retype them.
#[derive(Debug, Clone)]
pub struct SizeSelection<'p> {
    product: &'p Product,
    mode: SizeMode,
    variant_id: Option<String>,
    measurements: Measurements,
    notes: Option<String>,
}

impl<'p> SizeSelection<'p> {
    /// Opens a selection, preselecting the product's default variant when it
    /// exists and is in stock.
    pub fn new(product: &'p Product) -> Self {
        SizeSelection {
            product,
            mode: SizeMode::ReadyMade,
            variant_id: product.default_variant().map(|v| v.id.clone()),
            measurements: Measurements::default(),
            notes: None,
        }
    }

    pub fn product(&self) -> &'p Product {
        self.product
    }

    pub fn mode(&self) -> SizeMode {
        self.mode
    }

    pub fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// The chosen ready-made variant, if any.
    pub fn selected_variant(&self) -> Option<&'p SizeVariant> {
        let product = self.product;
        self.variant_id.as_deref().and_then(|id| product.variant(id))
    }

    /// Current state, derived from mode and inputs.
    pub fn state(&self) -> SelectionState {
        match self.mode {
            SizeMode::ReadyMade if self.variant_id.is_some() => SelectionState::ReadyMadeSelected,
            SizeMode::ReadyMade => SelectionState::NoSelection,
            SizeMode::Custom if self.missing_fields().is_empty() => SelectionState::CustomComplete,
            SizeMode::Custom => SelectionState::CustomEntering,
        }
    }

    /// Picks a size-variant tile.
    ///
    /// Unknown and out-of-stock variants are rejected and leave the
    /// selection untouched; the UI may ignore the error.
    pub fn select_variant(&mut self, variant_id: &str) -> CoreResult<()> {
        let product = self.product;
        let variant = product
            .variant(variant_id)
            .ok_or_else(|| CoreError::VariantNotFound {
                product_id: product.id.clone(),
                variant_id: variant_id.to_string(),
            })?;

        if !variant.in_stock {
            return Err(CoreError::VariantOutOfStock {
                variant_id: variant_id.to_string(),
            });
        }

        self.mode = SizeMode::ReadyMade;
        self.variant_id = Some(variant.id.clone());
        Ok(())
    }

    /// Switches to the custom-size tab.
    pub fn switch_to_custom(&mut self) -> ValidationResult<()> {
        if self.product.custom_size().is_none() {
            return Err(ValidationError::CustomSizeUnavailable);
        }
        self.mode = SizeMode::Custom;
        Ok(())
    }

    /// Switches back to the ready-made tab, restoring any earlier variant pick.
    pub fn switch_to_ready_made(&mut self) {
        self.mode = SizeMode::ReadyMade;
    }

    pub fn set_measurement(&mut self, field: MeasurementField, value: Option<f64>) {
        self.measurements.set(field, value);
    }

    /// Sets a measurement from raw form input; bad input clears the field.
    pub fn set_measurement_input(&mut self, field: MeasurementField, input: &str) {
        self.measurements.set_from_input(field, input);
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    /// Required custom fields still absent or ≤ 0. Empty outside custom sizing.
    pub fn missing_fields(&self) -> Vec<MeasurementField> {
        match self.product.custom_size() {
            Some(config) => missing_fields(&self.measurements, &config.required_fields()),
            None => Vec::new(),
        }
    }

    /// Whether the "Add to Cart" control should be enabled.
    pub fn can_add_to_cart(&self) -> bool {
        !self.product.is_customizable()
            || matches!(
                self.state(),
                SelectionState::ReadyMadeSelected | SelectionState::CustomComplete
            )
    }

    /// Price shown next to the picker.
    ///
    /// Custom tab: recomputed from the current measurements. Ready-made tab:
    /// the variant's catalog price, or the product's base price before a pick.
    pub fn display_price(&self) -> Money {
        match self.mode {
            SizeMode::Custom => {
                pricing::calculate_price(Some(&self.measurements), self.product.custom_size())
            }
            SizeMode::ReadyMade => self
                .selected_variant()
                .map(|v| v.price)
                .unwrap_or(self.product.price),
        }
    }

    /// Area/price breakdown for the custom tab.
    pub fn quote(&self) -> Option<PriceQuote> {
        pricing::quote(self.product, &self.measurements)
    }
}
