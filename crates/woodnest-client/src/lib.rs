//! # woodnest-client: Storefront Client
//!
//! Everything in the storefront that touches the outside world: the
//! backend REST API, configuration files and environment, and the stores the
//! UI subscribes to. Business rules live in `woodnest-core`.
//!
//! ## Module Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  config   ClientConfig: defaults → TOML → WOODNEST_* env → validate     │
//! │  api      StorefrontApi trait (the I/O seam)                            │
//! │  http     HttpStorefrontApi: reqwest implementation                     │
//! │  store    Store<R>, CartStore: read / dispatch / subscribe              │
//! │  service  CartService (in-flight guard), OrderService                   │
//! │  search   SuggestionDebouncer                                           │
//! │  error    ClientError                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wiring
//! ```rust,no_run
//! use std::sync::Arc;
//! use woodnest_client::{CartService, CartStore, ClientConfig, HttpStorefrontApi};
//!
//! # async fn run() -> woodnest_client::ClientResult<()> {
//! let config = ClientConfig::load(None)?;
//! let api = Arc::new(HttpStorefrontApi::new(&config)?);
//! let cart = CartService::new(api, Arc::new(CartStore::default()));
//! cart.refresh().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod search;
pub mod service;
pub mod store;

pub use api::StorefrontApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpStorefrontApi;
pub use search::SuggestionDebouncer;
pub use service::{CartService, OrderService};
pub use store::{CartAction, CartReducer, CartState, CartStore, Reducer, Store};
