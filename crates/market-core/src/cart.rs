//! # Cart
//!
//! The cart collection: ordered lines, merge-on-add, totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller Action            Operation               Cart Change           │
//! │  ─────────────            ─────────               ───────────           │
//! │                                                                         │
//! │  Tap "Add to Cart" ──────► add_line() ──────────► merge or push         │
//! │                                                                         │
//! │  Stepper +/- ────────────► update_quantity() ───► lines[i].qty = n      │
//! │                                                                         │
//! │  Swipe to delete ────────► remove_line() ───────► lines.retain(..)      │
//! │                                                                         │
//! │  "Clear cart" ───────────► clear() ─────────────► lines.clear()         │
//! │                                                                         │
//! │  Lines merge on the (product, size, color) combination: the same        │
//! │  product in two sizes occupies two lines.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::price::Price;
use crate::types::Product;
use crate::validation::validate_quantity;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One line in the cart.
///
/// ## Design Notes
/// - `id`: generated at creation, the handle for remove/update operations
/// - `product_id`: reference to the catalog product (the source of truth)
/// - `name`/`image_url`/`unit_price`: frozen copies of product data at add
///   time, for display without a catalog lookup. The unit price freezes the
///   product's *final* (post-discount) price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line id (UUID v4), unique within the session.
    pub id: String,

    /// Catalog product id this line references.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Primary image at time of adding (frozen).
    pub image_url: String,

    /// Final price per unit at time of adding (frozen, unrounded).
    pub unit_price: Price,

    /// Quantity in cart. Always ≥ 1.
    pub quantity: u32,

    /// Chosen size, when the caller picked one.
    pub size: Option<String>,

    /// Chosen color, when the caller picked one.
    pub color: Option<String>,

    /// When this line was added to the cart.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new cart line from a product, freezing its display data.
    pub fn from_product(
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> Self {
        CartLine {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            unit_price: product.final_price(),
            quantity,
            size,
            color,
            added_at: Utc::now(),
        }
    }

    /// Line total: unit price × quantity (unrounded).
    pub fn line_total(&self) -> Price {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Whether this line holds the given `(product, size, color)` combination.
    fn matches(&self, product_id: &str, size: Option<&str>, color: Option<&str>) -> bool {
        self.product_id == product_id
            && self.size.as_deref() == size
            && self.color.as_deref() == color
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `(product_id, size, color)`; adding the same
///   combination again increases its quantity
/// - Every line quantity is ≥ 1 and ≤ `MAX_LINE_QUANTITY`
/// - Insertion order is preserved (display order)
/// - At most `MAX_CART_LINES` lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart, in insertion order.
    pub lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart, merging with an existing line when the
    /// `(product, size, color)` combination is already present.
    ///
    /// ## Behavior
    /// - Same combination in cart: its quantity increases by `quantity`
    /// - Otherwise: a new line with a fresh id is appended at the end
    ///
    /// ## Errors
    /// - `Validation` for a zero quantity
    /// - `QuantityTooLarge` when the (merged) quantity would exceed the cap
    /// - `CartTooLarge` when a new line would exceed the line cap
    pub fn add_line(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> CoreResult<()> {
        validate_quantity(quantity)?;

        // Merge with an existing line for the same combination
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(&product.id, size.as_deref(), color.as_deref()))
        {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines
            .push(CartLine::from_product(product, quantity, size, color));
        Ok(())
    }

    /// Replaces the quantity of the line with the given id.
    ///
    /// ## Behavior
    /// - Quantity must be ≥ 1; zero is rejected, not treated as removal
    /// - Unknown `line_id` is a silent no-op (idempotent-retry friendly)
    ///
    /// ## Returns
    /// `Ok(true)` when a line was updated, `Ok(false)` when no line matched.
    pub fn update_quantity(&mut self, line_id: &str, quantity: u32) -> CoreResult<bool> {
        validate_quantity(quantity)?;

        match self.lines.iter_mut().find(|l| l.id == line_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the line with the given id.
    ///
    /// Unknown ids are a silent no-op.
    ///
    /// ## Returns
    /// Whether a line was removed.
    pub fn remove_line(&mut self, line_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.id != line_id);
        self.lines.len() != initial_len
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    ///
    /// Distinct from [`line_count`](Cart::line_count): two units of one
    /// product count as 2 here and 1 there.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Cart total: sum of line totals, stored unrounded.
    pub fn total(&self) -> Price {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Finds a line by id.
    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct lines in the cart.
    pub line_count: usize,

    /// Total quantity across all lines.
    pub item_count: u32,

    /// Sum of line totals (unrounded; format via `Display` for currency).
    pub total: Price,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    fn catalog() -> Catalog {
        Catalog::sample()
    }

    #[test]
    fn test_add_line() {
        let catalog = catalog();
        let mut cart = Cart::new();

        cart.add_line(catalog.get("2").unwrap(), 2, None, None).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 2);
        // Denim Jacket: 79.99, no discount
        assert!(cart.total().approx_eq(Price::new(159.98)));
    }

    #[test]
    fn test_add_same_combination_merges() {
        let catalog = catalog();
        let product = catalog.get("1").unwrap();
        let mut cart = Cart::new();

        cart.add_line(product, 2, Some("M".to_string()), None).unwrap();
        cart.add_line(product, 3, Some("M".to_string()), None).unwrap();

        assert_eq!(cart.line_count(), 1); // still one line
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.lines[0].quantity, 5);
    }

    #[test]
    fn test_different_size_gets_own_line() {
        let catalog = catalog();
        let product = catalog.get("1").unwrap();
        let mut cart = Cart::new();

        cart.add_line(product, 1, Some("M".to_string()), None).unwrap();
        cart.add_line(product, 1, Some("L".to_string()), None).unwrap();
        cart.add_line(product, 1, None, None).unwrap();

        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_line_freezes_final_price() {
        let catalog = catalog();
        let mut cart = Cart::new();

        // Product "1": 29.99 at 17% off = 24.8917 per unit
        cart.add_line(catalog.get("1").unwrap(), 2, None, None).unwrap();

        let line = &cart.lines[0];
        assert!(line.unit_price.approx_eq(Price::new(24.8917)));
        assert!(line.line_total().approx_eq(Price::new(49.7834)));
        assert_eq!(cart.total().to_string(), "$49.78");
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let catalog = catalog();
        let mut cart = Cart::new();

        let err = cart
            .add_line(catalog.get("1").unwrap(), 0, None, None)
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_line(catalog.get("1").unwrap(), 2, None, None).unwrap();
        let line_id = cart.lines[0].id.clone();

        assert!(cart.update_quantity(&line_id, 7).unwrap());
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_update_quantity_zero_rejected_and_state_intact() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_line(catalog.get("1").unwrap(), 2, None, None).unwrap();
        let line_id = cart.lines[0].id.clone();

        let err = cart.update_quantity(&line_id, 0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(cart.lines[0].quantity, 2); // prior quantity intact
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_line(catalog.get("1").unwrap(), 2, None, None).unwrap();

        let before = cart.clone();
        assert!(!cart.update_quantity("no-such-line", 5).unwrap());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_line_unknown_id_is_noop() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_line(catalog.get("1").unwrap(), 2, None, None).unwrap();

        let before = cart.clone();
        assert!(!cart.remove_line("no-such-line"));
        assert_eq!(cart, before);

        let line_id = cart.lines[0].id.clone();
        assert!(cart.remove_line(&line_id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_line(catalog.get("1").unwrap(), 2, None, None).unwrap();
        cart.add_line(catalog.get("2").unwrap(), 1, None, None).unwrap();

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_merge_respects_quantity_cap() {
        let catalog = catalog();
        let product = catalog.get("1").unwrap();
        let mut cart = Cart::new();

        cart.add_line(product, 998, None, None).unwrap();
        cart.add_line(product, 1, None, None).unwrap(); // exactly at cap

        let err = cart.add_line(product, 1, None, None).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        assert_eq!(cart.item_count(), 999);
    }

    #[test]
    fn test_totals_summary() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_line(catalog.get("1").unwrap(), 2, None, None).unwrap();
        cart.add_line(catalog.get("2").unwrap(), 1, None, None).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 3);
        // 2 × 24.8917 + 79.99
        assert!(totals.total.approx_eq(Price::new(129.7734)));
    }
}
