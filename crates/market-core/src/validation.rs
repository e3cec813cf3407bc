//! # Validation Module
//!
//! Input validation utilities for Fashion Market.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation surface                                          │
//! │  ├── Basic format checks (empty fields, length)                         │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Session operations (market-session)                           │
//! │  └── THIS MODULE: business rule validation before any state change      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog load (market-core)                                    │
//! │  └── Structural invariants on every product before the catalog exists   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use market_core::validation::{validate_quantity, validate_search_query};
//!
//! // Validate quantity before a cart operation
//! validate_quantity(5).unwrap();
//!
//! // Queries are trimmed; over-long ones are rejected
//! assert_eq!(validate_search_query("  dress  ").unwrap(), "dress");
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::Product;
use crate::MAX_LINE_QUANTITY;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (≥ 1)
/// - Must not exceed `MAX_LINE_QUANTITY` (999)
///
/// ## Example
/// ```rust
/// use market_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(1000).is_err());
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY as i64,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a login email.
///
/// ## Rules
/// - Must not be blank (the presentation surface owns richer format checks)
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    Ok(())
}

/// Validates a login password.
///
/// ## Rules
/// - Must not be blank
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Selection Validators
// =============================================================================

/// Validates a chosen size/color against the product's declared options.
///
/// Only called when the session runs with strict selection checking; the
/// default lenient mode accepts any selection, so a `None` choice is always
/// valid.
///
/// ## Example
/// ```rust
/// use market_core::{validation::validate_selection, Catalog};
///
/// let catalog = Catalog::sample();
/// let product = catalog.get("1").unwrap();
///
/// assert!(validate_selection(product, Some("M"), None).is_ok());
/// assert!(validate_selection(product, Some("XXXL"), None).is_err());
/// ```
pub fn validate_selection(
    product: &Product,
    size: Option<&str>,
    color: Option<&str>,
) -> ValidationResult<()> {
    if let Some(size) = size {
        if !product.has_size(size) {
            return Err(ValidationError::NotAllowed {
                field: "size".to_string(),
                value: size.to_string(),
                allowed: product.sizes.clone(),
            });
        }
    }

    if let Some(color) = color {
        if !product.has_color(color) {
            return Err(ValidationError::NotAllowed {
                field: "color".to_string(),
                value: color.to_string(),
                allowed: product.colors.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Catalog Load Validators
// =============================================================================

/// Validates a product's structural invariants at catalog load.
///
/// ## Rules
/// - `id` and `name` must not be empty
/// - `price` (and `original_price` when present) must be non-negative
/// - `discount_percentage` must be ≤ 100, and the resulting final price ≥ 0
/// - `rating` must be within 0.0 - 5.0
/// - `colors` and `sizes` must be non-empty
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        });
    }

    if product.price.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if let Some(original) = product.original_price {
        if original.is_negative() {
            return Err(ValidationError::MustBePositive {
                field: "original price".to_string(),
            });
        }
    }

    if let Some(pct) = product.discount_percentage {
        if pct > 100 {
            return Err(ValidationError::OutOfRange {
                field: "discount percentage".to_string(),
                min: 0,
                max: 100,
            });
        }
    }

    // Covers the combination case: a valid price and discount can never
    // produce a negative final price, but guard the invariant directly.
    if product.final_price().is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "final price".to_string(),
        });
    }

    if !(0.0..=5.0).contains(&product.rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }

    if product.colors.is_empty() {
        return Err(ValidationError::Required {
            field: "colors".to_string(),
        });
    }

    if product.sizes.is_empty() {
        return Err(ValidationError::Required {
            field: "sizes".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  dress ").unwrap(), "dress");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_credentials_fields() {
        assert!(validate_email("alex@example.com").is_ok());
        assert!(validate_email("   ").is_err());
        assert!(validate_password("hunter2").is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_selection() {
        let catalog = Catalog::sample();
        let product = catalog.get("1").unwrap();

        assert!(validate_selection(product, None, None).is_ok());
        assert!(validate_selection(product, Some("M"), Some("White")).is_ok());

        let err = validate_selection(product, Some("XXXL"), None).unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));

        let err = validate_selection(product, None, Some("Chartreuse")).unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_validate_product_rejects_bad_data() {
        let catalog = Catalog::sample();
        let good = catalog.get("1").unwrap().clone();
        assert!(validate_product(&good).is_ok());

        let mut p = good.clone();
        p.price = crate::Price::new(-1.0);
        assert!(validate_product(&p).is_err());

        let mut p = good.clone();
        p.discount_percentage = Some(120);
        assert!(validate_product(&p).is_err());

        let mut p = good.clone();
        p.rating = 5.5;
        assert!(validate_product(&p).is_err());

        let mut p = good.clone();
        p.sizes.clear();
        assert!(validate_product(&p).is_err());

        let mut p = good;
        p.id = "  ".to_string();
        assert!(validate_product(&p).is_err());
    }
}
