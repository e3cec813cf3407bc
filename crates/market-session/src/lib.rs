//! # market-session: Observable Session State for Fashion Market
//!
//! The single authoritative owner of the user's cart, favorites, and login
//! flag. Presentation surfaces (screens) invoke its operations and render its
//! observable snapshots; nothing else in the system may mutate these
//! collections.
//!
//! ## Module Organization
//! ```text
//! market_session/
//! ├── lib.rs          ◄─── You are here (re-exports)
//! ├── session.rs      ◄─── Session: operations + snapshot broadcast
//! ├── config.rs       ◄─── SessionConfig (selection policy, currency display)
//! └── auth.rs         ◄─── Credentials + stubbed login collaborator
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Management                             │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐  │
//! │  │                        Session                                    │  │
//! │  │                                                                   │  │
//! │  │   Mutex<Inner>                 watch::Sender<CartSnapshot>        │  │
//! │  │   ├── cart: Cart               watch::Sender<FavoritesSnapshot>   │  │
//! │  │   ├── favorites: HashSet       (broadcast: current value +        │  │
//! │  │   └── user: Option<User>        every subsequent change)          │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • Every mutation locks the Mutex: read-modify-write-publish is one     │
//! │    critical section, so observers never see a torn state                │
//! │  • Catalog data is read-only and shared without synchronization         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use market_core::Catalog;
//! use market_session::Session;
//!
//! let session = Session::new(Catalog::sample());
//! let cart_updates = session.watch_cart();
//!
//! session.add_to_cart("1", 2, Some("M"), None).unwrap();
//!
//! assert_eq!(session.cart_item_count(), 2);
//! assert_eq!(cart_updates.borrow().totals.item_count, 2);
//! ```

pub mod auth;
pub mod config;
pub mod session;

pub use auth::Credentials;
pub use config::{SelectionPolicy, SessionConfig};
pub use session::{CartSnapshot, FavoritesSnapshot, Session};

// Core types that appear in this crate's public API, re-exported so callers
// don't need a direct market-core dependency.
pub use market_core::{
    Cart, CartLine, CartTotals, Catalog, CoreError, CoreResult, Order, Price, Product, User,
};
