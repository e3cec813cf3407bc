//! # market-core: Pure Business Logic for Fashion Market
//!
//! This crate is the **heart** of Fashion Market. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Fashion Market Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation Surfaces (external callers)           │   │
//! │  │    Home ──► Search ──► Product Detail ──► Cart ──► Profile      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots / operations                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    market-session                               │   │
//! │  │    add_to_cart, toggle_favorite, login, watch_cart, ...         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ market-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   price   │  │   cart    │  │  catalog  │   │   │
//! │  │   │  Product  │  │   Price   │  │   Cart    │  │  lookup   │   │   │
//! │  │   │   Order   │  │ discounts │  │ CartLine  │  │  search   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, User, Order, etc.)
//! - [`price`] - Price type carrying unrounded amounts
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`cart`] - Cart collection logic
//! - [`catalog`] - Immutable product catalog with lookup and search
//!
//! ## Example Usage
//!
//! ```rust
//! use market_core::{Cart, Catalog};
//!
//! let catalog = Catalog::sample();
//! let product = catalog.get("1").unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_line(product, 2, Some("M".to_string()), None).unwrap();
//!
//! assert_eq!(cart.item_count(), 2);
//! // Stored totals keep full precision; `Display` rounds for presentation.
//! assert_eq!(cart.total().to_string(), "$49.78");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod price;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use market_core::Price` instead of
// `use market_core::price::Price`

pub use cart::{Cart, CartLine, CartTotals};
pub use catalog::{sample_orders, Catalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use price::Price;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// Prevents runaway carts; a line is a `(product, size, color)` combination,
/// so one product may occupy several lines.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single cart line.
///
/// Guards against accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: u32 = 999;
