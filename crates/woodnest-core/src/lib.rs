//! # woodnest-core: Pure Storefront Logic for Woodnest
//!
//! Pricing, size selection and cart composition for the furniture
//! storefront, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Woodnest Storefront                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │    Product page ──► Size picker ──► Cart ──► Order history     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                woodnest-client (HTTP + stores)                  │   │
//! │  │    CartService, CartStore, SuggestionDebouncer, ClientConfig    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ woodnest-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌──────────┐        │   │
//! │  │   │  types   │ │ pricing  │ │ selection │ │   cart   │        │   │
//! │  │   │ Product  │ │  area    │ │ SizeSel-  │ │ compose_ │        │   │
//! │  │   │ Variant  │ │  price   │ │  ection   │ │ add_to_  │        │   │
//! │  │   └──────────┘ └──────────┘ └───────────┘ └──────────┘        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, SizeVariant, CustomSizeConfig, Order)
//! - [`money`] - Money type held in integer cents
//! - [`pricing`] - Custom-size area and price calculation
//! - [`selection`] - Size picker state machine
//! - [`cart`] - Add-to-cart payload composition and the cart read model
//! - [`validation`] - Submission-time checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use woodnest_core::{compose_add_to_cart, Product, SizeSelection};
//!
//! let product: Product = serde_json::from_str(r#"{
//!     "id": "rug-1",
//!     "name": "Jute Rug",
//!     "price": 500,
//!     "customSizeConfig": {
//!         "enabled": true,
//!         "fields": ["length", "width"],
//!         "unit": "ft",
//!         "pricePerUnit": 50,
//!         "minimumCharge": 500
//!     }
//! }"#).unwrap();
//!
//! let mut selection = SizeSelection::new(&product);
//! selection.switch_to_custom().unwrap();
//! selection.set_measurement_input("length".parse().unwrap(), "4");
//! selection.set_measurement_input("width".parse().unwrap(), "3");
//!
//! let request = compose_add_to_cart(&selection, 1).unwrap();
//! assert_eq!(request.custom_size.unwrap().calculated_price.cents(), 60_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{
    compose_add_to_cart, AddToCartRequest, Cart, CartLine, CartTotals, CustomSize,
    SelectedVariant, UpdateCartItemRequest,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{area, calculate_price, PriceQuote};
pub use selection::{SelectionState, SizeMode, SizeSelection};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Catches typos like 1000 instead of 10 before they reach the backend.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Maximum length of custom-size notes, in characters.
pub const MAX_NOTES_LEN: usize = 500;

/// Maximum length of a search query, in characters.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
