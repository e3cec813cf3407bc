//! # Catalog
//!
//! The immutable product catalog: validated at load, then read-only for the
//! life of the process.
//!
//! ## Catalog Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Lifecycle                                   │
//! │                                                                         │
//! │  Startup:  Catalog::sample()  (or Catalog::new with external data)      │
//! │                │                                                        │
//! │                ▼  every product validated, ids deduplicated             │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  products: Vec<Product>      (display order)                     │   │
//! │  │  index: HashMap<id, usize>   (O(1) lookup)                       │   │
//! │  │  categories: Vec<Category>                                       │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                │                                                        │
//! │                ▼  read-only: shared freely across threads               │
//! │  get / search / by_category / new_arrivals / on_sale                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog source is an external collaborator; the embedded sample data
//! here stands in for a file or remote fetch in a real deployment.

use std::collections::HashMap;

use crate::error::{CoreResult, ValidationError};
use crate::price::Price;
use crate::types::{
    Address, Category, Order, OrderLine, OrderStatus, PaymentMethod, Product,
};
use crate::validation::validate_product;

// =============================================================================
// Catalog
// =============================================================================

/// The immutable product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    /// Product id → index into `products`.
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from externally supplied data, validating every
    /// product and rejecting duplicate ids.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> CoreResult<Self> {
        for product in &products {
            validate_product(product)?;
        }

        let mut index = HashMap::with_capacity(products.len());
        for (i, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), i).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.clone(),
                }
                .into());
            }
        }

        Ok(Catalog {
            products,
            categories,
            index,
        })
    }

    /// Looks up a product by id. O(1).
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    /// Checks whether a product id exists. O(1).
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All products, in catalog display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All browsing categories.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Case-insensitive substring search over name, description, category,
    /// and tags.
    ///
    /// An empty (or all-whitespace) query returns every product.
    ///
    /// ## Example
    /// ```rust
    /// use market_core::Catalog;
    ///
    /// let catalog = Catalog::sample();
    /// let hits = catalog.search("dress");
    /// assert!(hits.iter().all(|p| p.name.contains("Dress")
    ///     || p.description.to_lowercase().contains("dress")
    ///     || p.category == "Dresses"));
    /// ```
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Products in the given category (exact label match).
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Products flagged as new arrivals.
    pub fn new_arrivals(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_new).collect()
    }

    /// Products currently discounted.
    pub fn on_sale(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_discounted()).collect()
    }

    // =========================================================================
    // Sample Data
    // =========================================================================

    /// The embedded demo catalog.
    ///
    /// Stands in for the external catalog source; the data is known-valid
    /// (a test pins that `Catalog::new` accepts it).
    pub fn sample() -> Self {
        let products = sample_products();
        let categories = sample_categories();

        let index = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        Catalog {
            products,
            categories,
            index,
        }
    }
}

/// Base product with the defaults shared by the whole sample range.
fn sample_base(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    image_url: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Price::new(price),
        original_price: None,
        discount_percentage: None,
        category: category.to_string(),
        image_url: image_url.to_string(),
        images: vec![image_url.to_string()],
        colors: vec![
            "Black".to_string(),
            "White".to_string(),
            "Red".to_string(),
            "Blue".to_string(),
        ],
        sizes: vec![
            "S".to_string(),
            "M".to_string(),
            "L".to_string(),
            "XL".to_string(),
        ],
        rating: 0.0,
        review_count: 0,
        is_new: false,
        stock: 10,
        tags: Vec::new(),
    }
}

fn sample_products() -> Vec<Product> {
    vec![
        Product {
            original_price: Some(Price::new(29.99)),
            discount_percentage: Some(17),
            images: vec![
                "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400".to_string(),
                "https://images.unsplash.com/photo-1581655353564-df123a1eb820?w=400".to_string(),
            ],
            rating: 4.5,
            review_count: 128,
            is_new: true,
            tags: vec!["cotton".to_string(), "basics".to_string()],
            ..sample_base(
                "1",
                "Classic White T-Shirt",
                "Premium cotton white t-shirt for everyday wear",
                24.99,
                "T-Shirts",
                "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400",
            )
        },
        Product {
            rating: 4.8,
            review_count: 256,
            tags: vec!["denim".to_string(), "vintage".to_string()],
            ..sample_base(
                "2",
                "Denim Jacket",
                "Vintage style denim jacket with modern fit",
                79.99,
                "Jackets",
                "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=400",
            )
        },
        Product {
            original_price: Some(Price::new(59.99)),
            discount_percentage: Some(17),
            rating: 4.3,
            review_count: 89,
            is_new: true,
            tags: vec!["floral".to_string(), "summer".to_string()],
            ..sample_base(
                "3",
                "Summer Dress",
                "Floral print summer dress for beach and casual wear",
                49.99,
                "Dresses",
                "https://images.unsplash.com/photo-1567095761054-7a02e69e5c43?w=400",
            )
        },
        Product {
            rating: 4.7,
            review_count: 312,
            tags: vec!["running".to_string(), "sport".to_string()],
            ..sample_base(
                "4",
                "Sneakers",
                "Comfortable running sneakers with cushion technology",
                89.99,
                "Shoes",
                "https://images.unsplash.com/photo-1549298916-b41d501d3772?w=400",
            )
        },
        Product {
            original_price: Some(Price::new(159.99)),
            discount_percentage: Some(19),
            rating: 4.9,
            review_count: 167,
            tags: vec!["winter".to_string(), "waterproof".to_string()],
            ..sample_base(
                "5",
                "Winter Coat",
                "Warm winter coat with waterproof material",
                129.99,
                "Coats",
                "https://images.unsplash.com/photo-1551488831-00ddcb6c6bd3?w=400",
            )
        },
        Product {
            rating: 4.4,
            review_count: 94,
            tags: vec!["office".to_string(), "casual".to_string()],
            ..sample_base(
                "6",
                "Casual Pants",
                "Comfortable casual pants for office and leisure",
                44.99,
                "Pants",
                "https://images.unsplash.com/photo-1594633312681-425c7b97ccd1?w=400",
            )
        },
        Product {
            original_price: Some(Price::new(129.99)),
            discount_percentage: Some(23),
            rating: 4.6,
            review_count: 203,
            tags: vec!["leather".to_string()],
            ..sample_base(
                "7",
                "Leather Handbag",
                "Genuine leather handbag with multiple compartments",
                99.99,
                "Bags",
                "https://images.unsplash.com/photo-1584917865442-de89df76afd3?w=400",
            )
        },
        Product {
            rating: 4.8,
            review_count: 421,
            tags: vec!["sport".to_string(), "waterproof".to_string()],
            ..sample_base(
                "8",
                "Sports Watch",
                "Waterproof sports watch with heart rate monitor",
                149.99,
                "Accessories",
                "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=400",
            )
        },
    ]
}

fn sample_categories() -> Vec<Category> {
    [
        (1, "T-Shirts", "👕"),
        (2, "Jackets", "🧥"),
        (3, "Dresses", "👗"),
        (4, "Shoes", "👟"),
        (5, "Coats", "🧥"),
        (6, "Pants", "👖"),
        (7, "Accessories", "🧣"),
        (8, "Bags", "👜"),
    ]
    .into_iter()
    .map(|(id, name, icon)| Category {
        id,
        name: name.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

/// The embedded demo order history shown on the profile screen.
///
/// Read-only data; order creation is out of scope.
pub fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: "ORD001".to_string(),
            lines: vec![
                OrderLine {
                    product_id: "1".to_string(),
                    quantity: 1,
                    size: None,
                    color: None,
                },
                OrderLine {
                    product_id: "4".to_string(),
                    quantity: 1,
                    size: None,
                    color: None,
                },
            ],
            total: Price::new(114.98),
            order_date: "2024-01-10".to_string(),
            status: OrderStatus::Delivered,
            shipping_address: Some(Address {
                id: "addr_001".to_string(),
                full_name: "Alex Johnson".to_string(),
                phone: "+1234567890".to_string(),
                address_line1: "123 Main Street".to_string(),
                address_line2: None,
                city: "New York".to_string(),
                state: "NY".to_string(),
                zip_code: "10001".to_string(),
                country: "USA".to_string(),
            }),
            payment_method: Some(PaymentMethod::CreditCard),
        },
        Order {
            id: "ORD002".to_string(),
            lines: vec![OrderLine {
                product_id: "5".to_string(),
                quantity: 1,
                size: None,
                color: None,
            }],
            total: Price::new(129.99),
            order_date: "2024-01-05".to_string(),
            status: OrderStatus::Shipped,
            shipping_address: None,
            payment_method: None,
        },
        Order {
            id: "ORD003".to_string(),
            lines: vec![OrderLine {
                product_id: "2".to_string(),
                quantity: 2,
                size: None,
                color: None,
            }],
            total: Price::new(159.98),
            order_date: "2023-12-20".to_string(),
            status: OrderStatus::Delivered,
            shipping_address: None,
            payment_method: None,
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_passes_validation() {
        // sample() skips per-product validation; pin that it would pass.
        let catalog = Catalog::new(sample_products(), sample_categories()).unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.categories().len(), 8);
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::sample();

        let product = catalog.get("1").unwrap();
        assert_eq!(product.name, "Classic White T-Shirt");
        assert!(catalog.contains("8"));
        assert!(!catalog.contains("999"));
        assert!(catalog.get("999").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut products = sample_products();
        products.push(products[0].clone());

        let err = Catalog::new(products, sample_categories()).unwrap_err();
        assert!(matches!(
            err,
            crate::CoreError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_invalid_product_rejected() {
        let mut products = sample_products();
        products[0].rating = 9.0;

        assert!(Catalog::new(products, sample_categories()).is_err());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::sample();

        let hits = catalog.search("DENIM");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");

        // Matches description text too
        let hits = catalog.search("heart rate");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "8");
    }

    #[test]
    fn test_search_matches_tags() {
        let catalog = Catalog::sample();

        // "waterproof" tags the coat and the watch; also in both descriptions
        let hits = catalog.search("waterproof");
        let ids: Vec<&str> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "8"]);
    }

    #[test]
    fn test_empty_search_returns_everything() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.search("").len(), 8);
        assert_eq!(catalog.search("   ").len(), 8);
    }

    #[test]
    fn test_search_no_hits() {
        let catalog = Catalog::sample();
        assert!(catalog.search("tuxedo").is_empty());
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::sample();

        let jackets = catalog.by_category("Jackets");
        assert_eq!(jackets.len(), 1);
        assert_eq!(jackets[0].id, "2");

        assert!(catalog.by_category("Hats").is_empty());
    }

    #[test]
    fn test_curated_views() {
        let catalog = Catalog::sample();

        let new_ids: Vec<&str> = catalog.new_arrivals().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(new_ids, vec!["1", "3"]);

        let sale_ids: Vec<&str> = catalog.on_sale().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(sale_ids, vec!["1", "3", "5", "7"]);
    }

    #[test]
    fn test_sample_orders() {
        let orders = sample_orders();
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].status, OrderStatus::Delivered);
        assert!(orders[0].total.approx_eq(Price::new(114.98)));
        assert_eq!(orders[0].formatted_date(), "Jan 10, 2024");

        // Every order line references a real catalog product
        let catalog = Catalog::sample();
        for order in &orders {
            for line in &order.lines {
                assert!(catalog.contains(&line.product_id));
            }
        }
    }
}
