//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Size selection (selection.rs)                                │
//! │  └── Enables/disables "Add to Cart" as the user types                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart composition (cart.rs)                                   │
//! │  └── THIS MODULE: re-checks everything at submission time              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Stock, pricing and ownership rules (out of our hands)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every completeness check on custom measurements goes through
//! [`missing_fields`]; there are no per-field checks anywhere else.

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{MeasurementField, Measurements, Product};
use crate::{MAX_ITEM_QUANTITY, MAX_NOTES_LEN, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Measurement Validators
// =============================================================================

/// Returns the required fields that are absent or not > 0.
///
/// An empty result means the measurement set is complete.
///
/// ## Example
/// ```rust
/// use woodnest_core::validation::missing_fields;
/// use woodnest_core::{MeasurementField, Measurements};
///
/// let fields = [MeasurementField::Length, MeasurementField::Width];
/// let m = Measurements { length: Some(4.0), width: Some(0.0), ..Default::default() };
///
/// assert_eq!(missing_fields(&m, &fields), vec![MeasurementField::Width]);
/// ```
pub fn missing_fields(
    measurements: &Measurements,
    fields: &[MeasurementField],
) -> Vec<MeasurementField> {
    let mut missing = Vec::new();
    for field in fields {
        if measurements.positive(*field).is_none() && !missing.contains(field) {
            missing.push(*field);
        }
    }
    missing
}

/// Fails with `MissingMeasurements` unless every required field is present and > 0.
pub fn require_measurements(
    measurements: &Measurements,
    fields: &[MeasurementField],
) -> ValidationResult<()> {
    let missing = missing_fields(measurements, fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingMeasurements { fields: missing })
    }
}

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates a product id.
pub fn validate_product_id(product_id: &str) -> ValidationResult<()> {
    if product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "productId".to_string(),
        });
    }
    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Normalizes custom-size notes.
///
/// Trims whitespace; blank notes become `None`. Notes longer than
/// MAX_NOTES_LEN characters are rejected.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(Some(notes.to_string()))
}

/// Validates a search query.
///
/// ## Returns
/// The trimmed query string (possibly empty).
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Sanity-checks a product record received from the catalog.
///
/// ## Rules
/// - Id must not be empty
/// - Base and variant prices must be non-negative
/// - Variant ids must be unique within the product
pub fn validate_product(product: &Product) -> CoreResult<()> {
    validate_product_id(&product.id)?;

    let invalid = |reason: String| CoreError::InvalidProduct {
        product_id: product.id.clone(),
        reason,
    };

    if product.price.is_negative() {
        return Err(invalid("negative price".to_string()));
    }

    let mut seen = HashSet::new();
    for variant in &product.size_variants {
        if !seen.insert(variant.id.as_str()) {
            return Err(invalid(format!("duplicate size variant id '{}'", variant.id)));
        }
        if variant.price.is_negative() {
            return Err(invalid(format!("negative price on size variant '{}'", variant.id)));
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
