//! # Custom-Size Pricing
//!
//! Converts raw measurements into a billable price using the product's
//! custom-size configuration.
//!
//! ## Area Rules (first applicable rule wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. area > 0 given            → area                                    │
//! │  2. length and width given    → length × width                          │
//! │  3. diameter given            → π × (diameter / 2)²                     │
//! │  4. otherwise                 → 0                                       │
//! │                                                                         │
//! │  price = max(area × price_per_unit, minimum_charge)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only values that are finite and > 0 count as "given". Pricing never
//! fails: incomplete input prices at the minimum charge (or zero), and
//! completeness is checked separately when the line is added to the cart.
//!
//! The diameter rule assumes a circular piece. The catalog does not say what
//! shape a diameter-configured product has.
//!
//! ## Example
//! ```rust
//! use woodnest_core::pricing::calculate_price;
//! use woodnest_core::{CustomSizeConfig, MeasurementField, Measurements, Money};
//!
//! let config = CustomSizeConfig {
//!     enabled: true,
//!     fields: vec![MeasurementField::Length, MeasurementField::Width],
//!     unit: "ft".to_string(),
//!     price_per_unit: 50.0,
//!     minimum_charge: Money::from_major(500.0),
//! };
//! let m = Measurements { length: Some(4.0), width: Some(3.0), ..Default::default() };
//!
//! assert_eq!(calculate_price(Some(&m), Some(&config)), Money::from_major(600.0));
//! ```

use serde::Serialize;
use std::f64::consts::PI;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CustomSizeConfig, MeasurementField, Measurements, Product};

/// Area covered by the measurements, in the configuration's unit squared.
///
/// Always finite and ≥ 0.
pub fn area(measurements: &Measurements) -> f64 {
    let area = if let Some(area) = measurements.positive(MeasurementField::Area) {
        area
    } else if let (Some(length), Some(width)) = (
        measurements.positive(MeasurementField::Length),
        measurements.positive(MeasurementField::Width),
    ) {
        length * width
    } else if let Some(diameter) = measurements.positive(MeasurementField::Diameter) {
        let radius = diameter / 2.0;
        PI * radius * radius
    } else {
        0.0
    };

    // Products of huge finite inputs can overflow to infinity
    area.min(f64::MAX)
}

/// `area × rate` in money, saturating instead of collapsing to zero when the
/// product overflows.
fn area_price(area: f64, rate: f64) -> Money {
    let amount = area * rate;
    if amount.is_infinite() && amount > 0.0 {
        Money::from_cents(i64::MAX)
    } else {
        Money::from_major(amount).non_negative()
    }
}

/// Price of a custom-size line: `max(area × price_per_unit, minimum_charge)`.
///
/// Missing measurements or a missing configuration price at zero. The result
/// is never negative.
pub fn calculate_price(
    measurements: Option<&Measurements>,
    config: Option<&CustomSizeConfig>,
) -> Money {
    let (Some(measurements), Some(config)) = (measurements, config) else {
        return Money::zero();
    };

    area_price(area(measurements), config.effective_price_per_unit())
        .max(config.effective_minimum_charge())
}

// =============================================================================
// Price Quote
// =============================================================================

/// A priced custom-size configuration, for display next to the inputs.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub area: f64,
    pub unit: String,
    #[ts(as = "f64")]
    pub price: Money,
    /// True when the minimum charge set the price.
    pub minimum_charge_applied: bool,
}

/// Quotes a custom size for a product.
///
/// Returns `None` when the product has no enabled custom-size configuration.
pub fn quote(product: &Product, measurements: &Measurements) -> Option<PriceQuote> {
    let config = product.custom_size()?;
    let area = area(measurements);
    let by_area = area_price(area, config.effective_price_per_unit());
    let price = calculate_price(Some(measurements), Some(config));

    Some(PriceQuote {
        area,
        unit: config.unit.clone(),
        price,
        minimum_charge_applied: price > by_area,
    })
}
