//! The in-memory cart aggregate.
//!
//! The cart lives only for the lifetime of the client process and is
//! unrelated to any backend cart entity. It is an ordered list of
//! (product snapshot, quantity) lines; the total is recomputed on every
//! read and never cached.
//!
//! Adding the same product twice appends two separate quantity-1 lines
//! rather than merging them. Order-history display does merge same-product
//! lines, so the asymmetry looks unintentional, but it is the observed
//! behavior of the running system and is kept as-is.

use maple_market_core::Price;

use crate::models::Product;

/// One (product snapshot, quantity) entry. `quantity` is always >= 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// `price x quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Ordered list of cart lines, owned by the composition root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a new quantity-1 line for the product. Never merges with an
    /// existing line for the same product.
    pub fn add(&mut self, product: Product) {
        self.lines.push(CartLine {
            product,
            quantity: 1,
        });
    }

    /// Remove exactly the line at `index`, preserving the order of the
    /// remaining lines. Out-of-range positions are a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<CartLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Empty the cart (called after a successful checkout).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price x quantity` over the held lines, recomputed on every
    /// call. Non-negative by construction of [`Price`].
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
