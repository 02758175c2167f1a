//! # Domain Types
//!
//! Catalog types consumed by pricing and size selection.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────────┐      ┌──────────────────────┐                 │
//! │  │      Product        │ 0..N │     SizeVariant      │                 │
//! │  │  ─────────────────  │─────►│  ──────────────────  │                 │
//! │  │  id, name, price    │      │  id, name, price     │                 │
//! │  │  default_variant_id │      │  dimensions, in_stock│                 │
//! │  └─────────┬───────────┘      └──────────────────────┘                 │
//! │            │ 0..1                                                       │
//! │            ▼                                                            │
//! │  ┌─────────────────────┐      ┌──────────────────────┐                 │
//! │  │  CustomSizeConfig   │      │    Measurements      │                 │
//! │  │  ─────────────────  │      │  ──────────────────  │                 │
//! │  │  fields, unit       │─────►│  length? width?      │                 │
//! │  │  price_per_unit     │      │  height? area?       │                 │
//! │  │  minimum_charge     │      │  diameter?           │                 │
//! │  └─────────────────────┘      └──────────────────────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names are camelCase to match the storefront backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cart::CartLine;
use crate::money::Money;

// =============================================================================
// Measurement Field
// =============================================================================

/// A measurement a custom-size product can collect.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementField {
    Length,
    Width,
    Height,
    Area,
    Diameter,
}

impl MeasurementField {
    /// All fields, in display order.
    pub const ALL: [MeasurementField; 5] = [
        MeasurementField::Length,
        MeasurementField::Width,
        MeasurementField::Height,
        MeasurementField::Area,
        MeasurementField::Diameter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementField::Length => "length",
            MeasurementField::Width => "width",
            MeasurementField::Height => "height",
            MeasurementField::Area => "area",
            MeasurementField::Diameter => "diameter",
        }
    }
}

impl fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MeasurementField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "length" => Ok(MeasurementField::Length),
            "width" => Ok(MeasurementField::Width),
            "height" => Ok(MeasurementField::Height),
            "area" => Ok(MeasurementField::Area),
            "diameter" => Ok(MeasurementField::Diameter),
            other => Err(format!("unknown measurement field '{}'", other)),
        }
    }
}

// =============================================================================
// Measurements
// =============================================================================

/// User-entered measurements for a custom-size line.
///
/// A fixed record with optional fields. Which ones matter is decided by the
/// product's [`CustomSizeConfig::fields`], never by the record itself.
///
/// Stored values are whatever the user typed that parsed as a number; use
/// [`Measurements::positive`] to read a value that may contribute to area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    #[serde(default, deserialize_with = "lenient_measure", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub length: Option<f64>,

    #[serde(default, deserialize_with = "lenient_measure", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub width: Option<f64>,

    #[serde(default, deserialize_with = "lenient_measure", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub height: Option<f64>,

    #[serde(default, deserialize_with = "lenient_measure", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub area: Option<f64>,

    #[serde(default, deserialize_with = "lenient_measure", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub diameter: Option<f64>,
}

impl Measurements {
    /// Returns the raw stored value of a field.
    pub fn get(&self, field: MeasurementField) -> Option<f64> {
        match field {
            MeasurementField::Length => self.length,
            MeasurementField::Width => self.width,
            MeasurementField::Height => self.height,
            MeasurementField::Area => self.area,
            MeasurementField::Diameter => self.diameter,
        }
    }

    /// Returns the value of a field only if it is finite and > 0.
    ///
    /// Negative, zero and non-numeric input is treated as absent everywhere
    /// in pricing and validation.
    pub fn positive(&self, field: MeasurementField) -> Option<f64> {
        self.get(field).filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Sets or clears a field.
    pub fn set(&mut self, field: MeasurementField, value: Option<f64>) {
        let slot = match field {
            MeasurementField::Length => &mut self.length,
            MeasurementField::Width => &mut self.width,
            MeasurementField::Height => &mut self.height,
            MeasurementField::Area => &mut self.area,
            MeasurementField::Diameter => &mut self.diameter,
        };
        *slot = value;
    }

    /// Sets a field from raw form input. Unparseable or empty input clears it.
    pub fn set_from_input(&mut self, field: MeasurementField, input: &str) {
        let value = input.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        self.set(field, value);
    }

    /// Returns a copy holding only the given fields.
    pub fn retain_fields(&self, fields: &[MeasurementField]) -> Measurements {
        let mut kept = Measurements::default();
        for field in fields {
            kept.set(*field, self.get(*field));
        }
        kept
    }

    /// True when no field holds a value.
    pub fn is_empty(&self) -> bool {
        MeasurementField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// Accepts a JSON number or a numeric string; anything else becomes `None`.
fn lenient_measure<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

// =============================================================================
// Custom Size Configuration
// =============================================================================

/// Custom-size pricing configuration attached to a product by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomSizeConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Measurements collected from the user. Duplicates are ignored.
    #[serde(default)]
    pub fields: Vec<MeasurementField>,

    /// Display unit for the measurements ("ft", "cm").
    #[serde(default)]
    pub unit: String,

    /// Price per unit of area, in major currency units.
    #[serde(default)]
    pub price_per_unit: f64,

    /// Floor applied per line item when area pricing falls below it.
    #[serde(default)]
    #[ts(as = "f64")]
    pub minimum_charge: Money,
}

impl CustomSizeConfig {
    /// Required fields, deduplicated, in declaration order.
    pub fn required_fields(&self) -> Vec<MeasurementField> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            if !fields.contains(field) {
                fields.push(*field);
            }
        }
        fields
    }

    /// Rate used by pricing: absent, negative or non-finite rates are zero.
    pub fn effective_price_per_unit(&self) -> f64 {
        if self.price_per_unit.is_finite() && self.price_per_unit > 0.0 {
            self.price_per_unit
        } else {
            0.0
        }
    }

    /// Minimum charge used by pricing, floored at zero.
    pub fn effective_minimum_charge(&self) -> Money {
        self.minimum_charge.non_negative()
    }
}

// =============================================================================
// Size Variant
// =============================================================================

/// Physical dimensions of a ready-made size variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub height: Option<f64>,
    #[serde(default)]
    pub unit: String,
}

/// A predefined, catalog-priced size option ("6ft x 4ft").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SizeVariant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[ts(as = "f64")]
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<f64>")]
    pub original_price: Option<Money>,
    #[serde(default)]
    pub in_stock: bool,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    pub name: String,

    /// Base price. For customizable products this is the "from" price.
    #[ts(as = "f64")]
    pub price: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<f64>")]
    pub original_price: Option<Money>,

    #[serde(default = "default_true")]
    pub in_stock: bool,

    #[serde(default)]
    pub size_variants: Vec<SizeVariant>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub custom_size_config: Option<CustomSizeConfig>,

    /// Variant preselected on the product page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub default_variant_id: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// The custom-size configuration, only when it is enabled.
    pub fn custom_size(&self) -> Option<&CustomSizeConfig> {
        self.custom_size_config.as_ref().filter(|c| c.enabled)
    }

    /// A customizable product offers size variants and/or custom sizes.
    pub fn is_customizable(&self) -> bool {
        !self.size_variants.is_empty() || self.custom_size().is_some()
    }

    /// Looks up a size variant by id.
    pub fn variant(&self, variant_id: &str) -> Option<&SizeVariant> {
        self.size_variants.iter().find(|v| v.id == variant_id)
    }

    /// The preselected variant, only if it exists and is in stock.
    pub fn default_variant(&self) -> Option<&SizeVariant> {
        self.default_variant_id
            .as_deref()
            .and_then(|id| self.variant(id))
            .filter(|v| v.in_stock)
    }
}

/// A search-as-you-type hit from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSuggestion {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<f64>")]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub category: Option<String>,
}

// =============================================================================
// Order
// =============================================================================

/// Lifecycle status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// An order from the customer's order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[ts(as = "f64")]
    pub total: Money,
}

impl Order {
    /// Total number of units across all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| i.quantity as u64).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rug() -> Product {
        serde_json::from_value(serde_json::json!({
            "id": "rug-1",
            "name": "Hand-knotted Rug",
            "price": 4999,
            "sizeVariants": [
                { "id": "s", "name": "Small", "price": 4999, "inStock": true,
                  "dimensions": { "length": 5, "width": 3, "unit": "ft" } },
                { "id": "l", "name": "Large", "price": 9999, "inStock": false,
                  "dimensions": { "length": 9, "width": 6, "unit": "ft" } }
            ],
            "customSizeConfig": {
                "enabled": true,
                "fields": ["length", "width", "length"],
                "unit": "ft",
                "pricePerUnit": 50,
                "minimumCharge": 500
            },
            "defaultVariantId": "l"
        }))
        .unwrap()
    }

    #[test]
    fn test_product_deserializes_catalog_record() {
        let product = rug();
        assert!(product.in_stock);
        assert!(product.is_customizable());
        assert_eq!(product.price.cents(), 499_900);

        let config = product.custom_size().unwrap();
        assert_eq!(config.minimum_charge.cents(), 50_000);
        assert_eq!(
            config.required_fields(),
            vec![MeasurementField::Length, MeasurementField::Width]
        );
    }

    #[test]
    fn test_default_variant_must_be_in_stock() {
        let mut product = rug();
        assert!(product.default_variant().is_none());

        product.default_variant_id = Some("s".to_string());
        assert_eq!(product.default_variant().unwrap().name, "Small");
    }

    #[test]
    fn test_disabled_custom_size_is_ignored() {
        let mut product = rug();
        product.size_variants.clear();
        product.custom_size_config.as_mut().unwrap().enabled = false;

        assert!(product.custom_size().is_none());
        assert!(!product.is_customizable());
    }

    #[test]
    fn test_measurements_lenient_deserialization() {
        let m: Measurements = serde_json::from_value(serde_json::json!({
            "length": "4",
            "width": 3,
            "height": "tall",
            "diameter": null
        }))
        .unwrap();

        assert_eq!(m.length, Some(4.0));
        assert_eq!(m.width, Some(3.0));
        assert_eq!(m.height, None);
        assert_eq!(m.diameter, None);
    }

    #[test]
    fn test_measurements_positive_filters_bad_values() {
        let mut m = Measurements::default();
        m.set(MeasurementField::Length, Some(-2.0));
        m.set(MeasurementField::Width, Some(0.0));
        m.set_from_input(MeasurementField::Height, " 2.5 ");
        m.set_from_input(MeasurementField::Area, "abc");

        assert_eq!(m.positive(MeasurementField::Length), None);
        assert_eq!(m.positive(MeasurementField::Width), None);
        assert_eq!(m.positive(MeasurementField::Height), Some(2.5));
        assert_eq!(m.get(MeasurementField::Area), None);
    }

    #[test]
    fn test_retain_fields_and_serialization_omits_absent() {
        let m = Measurements {
            length: Some(4.0),
            width: Some(3.0),
            height: Some(1.0),
            ..Default::default()
        };
        let kept = m.retain_fields(&[MeasurementField::Length, MeasurementField::Width]);

        let json = serde_json::to_value(&kept).unwrap();
        assert_eq!(json, serde_json::json!({ "length": 4.0, "width": 3.0 }));
    }

    #[test]
    fn test_measurement_field_parsing() {
        assert_eq!("Diameter".parse::<MeasurementField>(), Ok(MeasurementField::Diameter));
        assert!("depth".parse::<MeasurementField>().is_err());
    }

    #[test]
    fn test_order_total_quantity() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "o-1",
            "status": "shipped",
            "createdAt": "2026-03-01T10:00:00Z",
            "items": [
                { "id": "l1", "productId": "p1", "name": "Chair", "quantity": 2, "unitPrice": 100 },
                { "id": "l2", "productId": "p2", "name": "Table", "quantity": 1, "unitPrice": 400 }
            ],
            "total": 600
        }))
        .unwrap();

        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total_quantity(), 3);
    }
}
