//! # Session
//!
//! The catalog & cart state manager: every mutable collection of the active
//! session lives here, behind one lock, with each mutation broadcast as an
//! immutable snapshot.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operation Flow                               │
//! │                                                                         │
//! │  Caller Action            Session Operation        Broadcast            │
//! │  ─────────────            ─────────────────        ─────────            │
//! │                                                                         │
//! │  Tap product ────────────► add_to_cart() ────────► cart snapshot        │
//! │                                                                         │
//! │  Quantity stepper ───────► update_quantity() ────► cart snapshot        │
//! │                                                                         │
//! │  Swipe line away ────────► remove_from_cart() ───► cart snapshot        │
//! │                                                                         │
//! │  Tap heart icon ─────────► toggle_favorite() ────► favorites snapshot   │
//! │                                                                         │
//! │  Sign out ───────────────► logout() ─────────────► empty cart snapshot  │
//! │                                                                         │
//! │  Every operation locks, mutates, snapshots, and publishes inside one    │
//! │  critical section: publication order equals mutation order.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use market_core::validation::validate_selection;
use market_core::{
    sample_orders, Cart, CartLine, CartTotals, Catalog, CoreError, CoreResult, Order, Price, Product,
    User,
};

use crate::auth::{self, Credentials};
use crate::config::{SelectionPolicy, SessionConfig};

// =============================================================================
// Snapshots
// =============================================================================

/// An immutable, point-in-time copy of the cart, published after each
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Cart lines in insertion order.
    pub lines: Vec<CartLine>,

    /// Derived totals for the lines above.
    pub totals: CartTotals,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            lines: cart.lines.clone(),
            totals: CartTotals::from(cart),
        }
    }
}

/// An immutable copy of the favorites, published after each toggle.
///
/// Products appear in catalog order, so repeated snapshots of the same
/// membership are identical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesSnapshot {
    pub products: Vec<Product>,
}

impl FavoritesSnapshot {
    /// Number of favorited products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether no product is favorited.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Session
// =============================================================================

/// Mutable session state guarded by the session lock.
struct Inner {
    cart: Cart,
    favorites: HashSet<String>,
    user: Option<User>,
}

/// The session state manager.
///
/// ## Ownership
/// One instance per active session, owned by the composition root and passed
/// explicitly to consumers (no global singleton). All mutating operations
/// take `&self` and serialize internally, so a shared reference (or an
/// `Arc<Session>`) is all a caller needs.
///
/// ## Observability
/// [`watch_cart`](Session::watch_cart) and
/// [`watch_favorites`](Session::watch_favorites) hand out receivers carrying
/// the current snapshot plus every subsequent change, for any number of
/// concurrent observers. Polling accessors ([`cart`](Session::cart),
/// [`favorites`](Session::favorites)) serve callers without a task to park.
pub struct Session {
    catalog: Catalog,
    config: SessionConfig,
    /// Demo order history surfaced on the profile screen. Read-only.
    orders: Vec<Order>,
    inner: Mutex<Inner>,
    cart_tx: watch::Sender<CartSnapshot>,
    favorites_tx: watch::Sender<FavoritesSnapshot>,
}

impl Session {
    /// Creates a session over the given catalog with default configuration.
    pub fn new(catalog: Catalog) -> Self {
        Session::with_config(catalog, SessionConfig::default())
    }

    /// Creates a session with explicit configuration.
    ///
    /// The session starts signed out with an empty cart and no favorites.
    pub fn with_config(catalog: Catalog, config: SessionConfig) -> Self {
        let cart = Cart::new();
        let (cart_tx, _) = watch::channel(CartSnapshot::from(&cart));
        let (favorites_tx, _) = watch::channel(FavoritesSnapshot::default());

        info!(products = catalog.len(), "session initialized");

        Session {
            catalog,
            config,
            orders: sample_orders(),
            inner: Mutex::new(Inner {
                cart,
                favorites: HashSet::new(),
                user: None,
            }),
            cart_tx,
            favorites_tx,
        }
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - Unknown product id: `ProductNotFound`
    /// - Existing `(product, size, color)` line: quantity increases
    /// - Otherwise: new line appended, unit price frozen at the product's
    ///   current final price
    /// - Under [`SelectionPolicy::Strict`], size/color must be among the
    ///   product's declared options
    ///
    /// ## Returns
    /// The published cart snapshot.
    pub fn add_to_cart(
        &self,
        product_id: &str,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) -> CoreResult<CartSnapshot> {
        debug!(product_id, quantity, ?size, ?color, "add_to_cart");

        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        if self.config.selection_policy == SelectionPolicy::Strict {
            validate_selection(product, size, color)?;
        }

        let mut inner = self.lock();
        inner.cart.add_line(
            product,
            quantity,
            size.map(str::to_string),
            color.map(str::to_string),
        )?;
        Ok(self.publish_cart(&inner))
    }

    /// Removes a cart line by id.
    ///
    /// Unknown ids are a silent no-op (the returned and published snapshot
    /// then equals the previous one), keeping retried removals idempotent.
    pub fn remove_from_cart(&self, line_id: &str) -> CartSnapshot {
        debug!(line_id, "remove_from_cart");

        let mut inner = self.lock();
        if !inner.cart.remove_line(line_id) {
            warn!(line_id, "remove_from_cart: no such line, ignoring");
        }
        self.publish_cart(&inner)
    }

    /// Replaces a cart line's quantity.
    ///
    /// ## Behavior
    /// - Quantity must be ≥ 1: zero fails validation and leaves the line
    ///   untouched (it is not shorthand for removal)
    /// - Unknown `line_id` is a silent no-op
    pub fn update_quantity(&self, line_id: &str, quantity: u32) -> CoreResult<CartSnapshot> {
        debug!(line_id, quantity, "update_quantity");

        let mut inner = self.lock();
        if !inner.cart.update_quantity(line_id, quantity)? {
            warn!(line_id, "update_quantity: no such line, ignoring");
        }
        Ok(self.publish_cart(&inner))
    }

    /// Empties the cart unconditionally and publishes the empty snapshot.
    pub fn clear_cart(&self) -> CartSnapshot {
        debug!("clear_cart");

        let mut inner = self.lock();
        inner.cart.clear();
        self.publish_cart(&inner)
    }

    /// Cart total: sum of line totals, stored unrounded.
    ///
    /// Format for display via [`SessionConfig::format_price`] or the
    /// `Display` impl on [`Price`].
    pub fn cart_total(&self) -> Price {
        self.lock().cart.total()
    }

    /// Total quantity across all cart lines (not the number of lines).
    pub fn cart_item_count(&self) -> u32 {
        self.lock().cart.item_count()
    }

    /// Current cart snapshot (polling accessor).
    pub fn cart(&self) -> CartSnapshot {
        CartSnapshot::from(&self.lock().cart)
    }

    /// Subscribes to cart snapshots: the current value, then one per
    /// mutation.
    pub fn watch_cart(&self) -> watch::Receiver<CartSnapshot> {
        self.cart_tx.subscribe()
    }

    // =========================================================================
    // Favorites Operations
    // =========================================================================

    /// Toggles a product's membership in the favorites set.
    ///
    /// ## Behavior
    /// - Unknown product id: `ProductNotFound`
    /// - Already favorited: removed; otherwise added. Applying the toggle
    ///   twice restores the original state.
    ///
    /// ## Returns
    /// The published favorites snapshot.
    pub fn toggle_favorite(&self, product_id: &str) -> CoreResult<FavoritesSnapshot> {
        if !self.catalog.contains(product_id) {
            return Err(CoreError::ProductNotFound(product_id.to_string()));
        }

        let mut inner = self.lock();
        let favorited = if inner.favorites.remove(product_id) {
            false
        } else {
            inner.favorites.insert(product_id.to_string());
            true
        };
        debug!(product_id, favorited, "toggle_favorite");

        Ok(self.publish_favorites(&inner))
    }

    /// Whether the product is currently favorited. O(1).
    pub fn is_favorite(&self, product_id: &str) -> bool {
        self.lock().favorites.contains(product_id)
    }

    /// Current favorites snapshot (polling accessor).
    pub fn favorites(&self) -> FavoritesSnapshot {
        self.favorites_snapshot(&self.lock())
    }

    /// Subscribes to favorites snapshots.
    pub fn watch_favorites(&self) -> watch::Receiver<FavoritesSnapshot> {
        self.favorites_tx.subscribe()
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Signs in against the stubbed authentication collaborator.
    ///
    /// Blank credentials fail validation; anything else succeeds and installs
    /// the profile. The cart is untouched.
    pub fn login(&self, credentials: &Credentials) -> CoreResult<User> {
        let user = auth::authenticate(credentials)?;

        let mut inner = self.lock();
        inner.user = Some(user.clone());
        info!(user_id = %user.id, "login");

        Ok(user)
    }

    /// Signs out and clears the cart.
    ///
    /// Clearing the cart on logout is a business rule, not incidental: a
    /// signed-out session must not retain the previous user's cart.
    pub fn logout(&self) -> CartSnapshot {
        let mut inner = self.lock();
        inner.user = None;
        inner.cart.clear();
        info!("logout, cart cleared");
        self.publish_cart(&inner)
    }

    /// Whether a user is signed in.
    pub fn is_logged_in(&self) -> bool {
        self.lock().user.is_some()
    }

    /// The signed-in user's profile, if any.
    pub fn current_user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    /// The demo order history (read-only; order creation is out of scope).
    pub fn order_history(&self) -> &[Order] {
        &self.orders
    }

    // =========================================================================
    // Read-Only Collaborators
    // =========================================================================

    /// The immutable catalog this session serves.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("session state mutex poisoned")
    }

    /// Snapshots the cart and broadcasts it. Called with the lock held so
    /// publication order equals mutation order.
    fn publish_cart(&self, inner: &Inner) -> CartSnapshot {
        let snapshot = CartSnapshot::from(&inner.cart);
        self.cart_tx.send_replace(snapshot.clone());
        snapshot
    }

    /// Snapshots the favorites (catalog order) and broadcasts them.
    fn publish_favorites(&self, inner: &Inner) -> FavoritesSnapshot {
        let snapshot = self.favorites_snapshot(inner);
        self.favorites_tx.send_replace(snapshot.clone());
        snapshot
    }

    fn favorites_snapshot(&self, inner: &Inner) -> FavoritesSnapshot {
        let products = self
            .catalog
            .products()
            .iter()
            .filter(|p| inner.favorites.contains(&p.id))
            .cloned()
            .collect();
        FavoritesSnapshot { products }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Catalog::sample())
    }

    #[test]
    fn test_add_to_cart_returns_snapshot() {
        let session = session();

        let snapshot = session.add_to_cart("1", 2, None, None).unwrap();
        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.totals.item_count, 2);
        assert_eq!(session.cart_item_count(), 2);
    }

    #[test]
    fn test_add_unknown_product_fails() {
        let session = session();

        let err = session.add_to_cart("999", 1, None, None).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
        assert!(session.cart().lines.is_empty());
    }

    #[test]
    fn test_toggle_favorite_unknown_product_fails() {
        let session = session();
        let err = session.toggle_favorite("999").unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }

    #[test]
    fn test_logout_clears_cart_and_user() {
        let session = session();
        session
            .login(&Credentials::new("alex@example.com", "secret"))
            .unwrap();
        session.add_to_cart("1", 2, None, None).unwrap();

        let snapshot = session.logout();

        assert!(snapshot.lines.is_empty());
        assert!(!session.is_logged_in());
        assert!(session.current_user().is_none());
        assert_eq!(session.cart_item_count(), 0);
    }

    #[test]
    fn test_order_history_is_exposed() {
        let session = session();
        assert_eq!(session.order_history().len(), 3);
    }
}
