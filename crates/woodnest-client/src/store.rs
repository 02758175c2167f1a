//! # Stores
//!
//! Explicit, injectable state containers for the storefront UI.
//!
//! ## Store Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store<R: Reducer>                               │
//! │                                                                         │
//! │  Service ── dispatch(action) ──► R::reduce(&mut state, action)          │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                              watch::Sender<State>                       │
//! │                               │                 │                       │
//! │                     state() snapshot     subscribe() receivers          │
//! │                                                                         │
//! │  NOTE: reducers are synchronous and never perform I/O.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A store is created once and handed (as `Arc<Store<_>>`) to every service
//! and view that needs it.

use std::marker::PhantomData;

use serde::Serialize;
use tokio::sync::watch;
use ts_rs::TS;
use woodnest_core::{Cart, CartTotals};

/// State transition function for a [`Store`].
pub trait Reducer {
    type State: Clone + Send + Sync + 'static;
    type Action;

    fn reduce(state: &mut Self::State, action: Self::Action);
}

/// Observable state container.
pub struct Store<R: Reducer> {
    tx: watch::Sender<R::State>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer> Store<R> {
    pub fn new(initial: R::State) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Store {
            tx,
            _reducer: PhantomData,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> R::State {
        self.tx.borrow().clone()
    }

    /// Applies an action and notifies subscribers.
    pub fn dispatch(&self, action: R::Action) {
        self.tx.send_modify(|state| R::reduce(state, action));
    }

    /// Receiver that observes every state published after this call.
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.tx.subscribe()
    }
}

impl<R: Reducer> Default for Store<R>
where
    R::State: Default,
{
    fn default() -> Self {
        Store::new(R::State::default())
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// What the cart UI renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    pub cart: Cart,
    pub loading: bool,
    /// Last failed cart operation, shown until the next success.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl CartState {
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }
}

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Backend returned an authoritative cart.
    Replace(Cart),
    Clear,
    SetLoading(bool),
    /// A cart operation failed; the previous cart is kept.
    SetError(String),
}

pub struct CartReducer;

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;

    fn reduce(state: &mut CartState, action: CartAction) {
        match action {
            CartAction::Replace(cart) => {
                state.cart = cart;
                state.loading = false;
                state.error = None;
            }
            CartAction::Clear => {
                state.cart = Cart::new();
                state.loading = false;
                state.error = None;
            }
            CartAction::SetLoading(loading) => state.loading = loading,
            CartAction::SetError(message) => {
                state.loading = false;
                state.error = Some(message);
            }
        }
    }
}

pub type CartStore = Store<CartReducer>;
