//! # Error Types
//!
//! Domain-specific error types for woodnest-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  woodnest-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Selection/input incomplete at submission       │
//! │                                                                         │
//! │  woodnest-client errors (separate crate)                               │
//! │  └── ClientError      - Network, remote and config failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → Storefront UI       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field names, product IDs)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::MeasurementField;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent catalog or selection problems that are not plain input
/// validation. They are caught by the client and shown as inline messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Variant id is not part of the product's size variants.
    #[error("Size variant {variant_id} not found on product {product_id}")]
    VariantNotFound {
        product_id: String,
        variant_id: String,
    },

    /// Variant exists but cannot be selected.
    #[error("Size variant {variant_id} is out of stock")]
    VariantOutOfStock { variant_id: String },

    /// Product record is unusable (e.g. negative catalog price).
    #[error("Invalid product {product_id}: {reason}")]
    InvalidProduct { product_id: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when the selection state is incomplete at submission time. A
/// validation error never reaches the network layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Customizable product submitted without a chosen size variant.
    #[error("size not selected")]
    SizeNotSelected,

    /// Custom size submitted while required measurements are absent or ≤ 0.
    ///
    /// ## User Workflow
    /// ```text
    /// Custom tab: length = 4, width = (empty)
    ///      │
    ///      ▼
    /// Add to Cart
    ///      │
    ///      ▼
    /// MissingMeasurements { fields: [Width] }
    ///      │
    ///      ▼
    /// UI shows: "missing measurements" next to the width input
    /// ```
    #[error("missing measurements")]
    MissingMeasurements { fields: Vec<MeasurementField> },

    /// Custom mode requested on a product without an enabled custom-size config.
    #[error("custom size is not available for this product")]
    CustomSizeUnavailable,

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
