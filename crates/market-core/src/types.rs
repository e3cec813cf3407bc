//! # Domain Types
//!
//! Core domain types used throughout Fashion Market.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      User       │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (String)    │   │  id             │   │  id             │       │
//! │  │  price          │   │  full_name      │   │  lines          │       │
//! │  │  discount %     │   │  email          │   │  status         │       │
//! │  │  sizes/colors   │   │  join_date      │   │  total          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │   OrderStatus   │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name, icon │   │  Pending..      │   │  CreditCard..   │       │
//! │  └─────────────────┘   │  Cancelled      │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are loaded once at startup and immutable thereafter; every other
//! type here is plain data handed to presentation surfaces.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::price::Price;

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// Immutable after catalog load — there are no product mutation operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short marketing description.
    pub description: String,

    /// Base price. Used directly unless a discount applies.
    pub price: Price,

    /// Pre-discount price, when the product is on sale.
    pub original_price: Option<Price>,

    /// Discount percentage (0-100) applied to `original_price`.
    pub discount_percentage: Option<u8>,

    /// Category label (matches a `Category::name`).
    pub category: String,

    /// Primary image reference.
    pub image_url: String,

    /// Additional image references for gallery views.
    pub images: Vec<String>,

    /// Available colors. Non-empty.
    pub colors: Vec<String>,

    /// Available sizes. Non-empty.
    pub sizes: Vec<String>,

    /// Average review rating (0.0 - 5.0).
    pub rating: f64,

    /// Number of reviews behind the rating.
    pub review_count: u32,

    /// Whether the product is a new arrival.
    pub is_new: bool,

    /// Units in stock.
    pub stock: u32,

    /// Free-form tags used by search.
    pub tags: Vec<String>,
}

impl Product {
    /// Returns the effective selling price.
    ///
    /// ## Derivation
    /// `original_price × (1 - discount_percentage / 100)` when **both** the
    /// original price and the discount are present; otherwise `price`.
    /// The result is stored unrounded (see [`Price`]).
    ///
    /// ## Example
    /// ```rust
    /// use market_core::{Catalog, Price};
    ///
    /// let catalog = Catalog::sample();
    /// // Product "1": price 24.99, original 29.99, 17% off
    /// let final_price = catalog.get("1").unwrap().final_price();
    /// assert!(final_price.approx_eq(Price::new(24.8917)));
    /// ```
    pub fn final_price(&self) -> Price {
        match (self.original_price, self.discount_percentage) {
            (Some(original), Some(pct)) => original.apply_discount(pct),
            _ => self.price,
        }
    }

    /// Whether the product is currently discounted.
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some() && self.discount_percentage.is_some()
    }

    /// Amount saved versus the original price, zero when not discounted.
    pub fn discount_amount(&self) -> Price {
        match self.original_price {
            Some(original) if self.is_discounted() => original - self.final_price(),
            _ => Price::zero(),
        }
    }

    /// Checks whether `size` is one of the product's declared sizes.
    ///
    /// Comparison ignores ASCII case ("m" matches "M").
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s.eq_ignore_ascii_case(size))
    }

    /// Checks whether `color` is one of the product's declared colors.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c.eq_ignore_ascii_case(color))
    }

    /// Whether any stock remains.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Category
// =============================================================================

/// A browsing category shown on the home grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    /// Emoji glyph used as the category tile icon.
    pub icon: String,
}

// =============================================================================
// User
// =============================================================================

/// The signed-in user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub profile_image: Option<String>,
    /// Human-readable membership date, e.g. "January 2024".
    pub join_date: String,
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a past order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Display label for the status badge.
    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a past order was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    CashOnDelivery,
}

impl PaymentMethod {
    /// Display label for the payment method.
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }
}

// =============================================================================
// Address
// =============================================================================

/// A shipping address attached to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

// =============================================================================
// Order
// =============================================================================

/// One line of a past order. References the product by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// A past order in the user's history. Read-only data; order creation and
/// fulfillment happen outside this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub lines: Vec<OrderLine>,
    pub total: Price,
    /// Order date as recorded, `YYYY-MM-DD`.
    pub order_date: String,
    pub status: OrderStatus,
    pub shipping_address: Option<Address>,
    pub payment_method: Option<PaymentMethod>,
}

impl Order {
    /// Formats the order date for display, e.g. "Jan 10, 2024".
    ///
    /// Falls back to the raw stored string when it doesn't parse.
    pub fn formatted_date(&self) -> String {
        match NaiveDate::parse_from_str(&self.order_date, "%Y-%m-%d") {
            Ok(date) => date.format("%b %d, %Y").to_string(),
            Err(_) => self.order_date.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_product() -> Product {
        Product {
            id: "1".to_string(),
            name: "Classic White T-Shirt".to_string(),
            description: "Premium cotton white t-shirt".to_string(),
            price: Price::new(24.99),
            original_price: None,
            discount_percentage: None,
            category: "T-Shirts".to_string(),
            image_url: "https://example.com/tee.jpg".to_string(),
            images: vec![],
            colors: vec!["Black".to_string(), "White".to_string()],
            sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
            rating: 4.5,
            review_count: 128,
            is_new: true,
            stock: 10,
            tags: vec!["cotton".to_string()],
        }
    }

    #[test]
    fn test_final_price_without_discount() {
        let product = bare_product();
        assert!(product.final_price().approx_eq(Price::new(24.99)));
        assert!(!product.is_discounted());
        assert!(product.discount_amount().is_zero());
    }

    #[test]
    fn test_final_price_with_discount() {
        let mut product = bare_product();
        product.original_price = Some(Price::new(29.99));
        product.discount_percentage = Some(17);

        assert!(product.final_price().approx_eq(Price::new(24.8917)));
        assert!(product.is_discounted());
        assert!(product
            .discount_amount()
            .approx_eq(Price::new(29.99 - 24.8917)));
    }

    #[test]
    fn test_final_price_ignores_partial_discount_data() {
        // An original price without a discount percentage (or vice versa)
        // sells at the base price.
        let mut product = bare_product();
        product.original_price = Some(Price::new(29.99));
        assert!(product.final_price().approx_eq(Price::new(24.99)));

        let mut product = bare_product();
        product.discount_percentage = Some(17);
        assert!(product.final_price().approx_eq(Price::new(24.99)));
    }

    #[test]
    fn test_size_color_lookup_is_case_insensitive() {
        let product = bare_product();
        assert!(product.has_size("M"));
        assert!(product.has_size("m"));
        assert!(!product.has_size("XXL"));
        assert!(product.has_color("white"));
        assert!(!product.has_color("Teal"));
    }

    #[test]
    fn test_order_status_display_names() {
        assert_eq!(OrderStatus::Pending.display_name(), "Pending");
        assert_eq!(OrderStatus::Delivered.display_name(), "Delivered");
        assert_eq!(PaymentMethod::Paypal.display_name(), "PayPal");
        assert_eq!(
            PaymentMethod::CashOnDelivery.display_name(),
            "Cash on Delivery"
        );
    }

    #[test]
    fn test_order_date_formatting() {
        let order = Order {
            id: "ORD001".to_string(),
            lines: vec![],
            total: Price::new(114.98),
            order_date: "2024-01-10".to_string(),
            status: OrderStatus::Delivered,
            shipping_address: None,
            payment_method: None,
        };
        assert_eq!(order.formatted_date(), "Jan 10, 2024");
    }

    #[test]
    fn test_order_date_formatting_falls_back_to_raw() {
        let order = Order {
            id: "ORD002".to_string(),
            lines: vec![],
            total: Price::zero(),
            order_date: "sometime last winter".to_string(),
            status: OrderStatus::Pending,
            shipping_address: None,
            payment_method: None,
        };
        assert_eq!(order.formatted_date(), "sometime last winter");
    }
}
