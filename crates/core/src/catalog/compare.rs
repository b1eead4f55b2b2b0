//! Two-slot compare selection.

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// Maximum number of products compared side by side.
pub const MAX_COMPARE: usize = 2;

/// What a [`CompareSet::toggle`] call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// The product was appended.
    Added,
    /// The product was already selected and has been removed.
    Removed,
    /// The selection was full; the oldest entry was evicted.
    Replaced { evicted: ProductId },
}

/// Ordered selection of at most [`MAX_COMPARE`] distinct products.
///
/// Behaves as a sliding window: selecting a third product drops the oldest
/// one rather than refusing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompareSet {
    items: Vec<Product>,
}

impl CompareSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a selection from products in selection order.
    ///
    /// Duplicates keep their first position; only the newest
    /// [`MAX_COMPARE`] entries survive.
    #[must_use]
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut items: Vec<Product> = Vec::with_capacity(MAX_COMPARE);
        for product in products {
            if items.iter().any(|p| p.id == product.id) {
                continue;
            }
            items.push(product);
        }
        if items.len() > MAX_COMPARE {
            items.drain(..items.len() - MAX_COMPARE);
        }
        Self { items }
    }

    /// Select or deselect a product.
    pub fn toggle(&mut self, product: Product) -> ToggleOutcome {
        if self.remove(&product.id) {
            return ToggleOutcome::Removed;
        }
        if self.items.len() < MAX_COMPARE {
            self.items.push(product);
            return ToggleOutcome::Added;
        }
        let evicted = self.items.remove(0).id;
        self.items.push(product);
        ToggleOutcome::Replaced { evicted }
    }

    /// Remove a product by ID. Returns whether it was selected.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|p| &p.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// True when exactly two products are selected, which enables
    /// comparison and analysis.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.items.len() == MAX_COMPARE
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|p| p.id.clone()).collect()
    }

    /// Both products when the selection is complete.
    #[must_use]
    pub fn pair(&self) -> Option<(&Product, &Product)> {
        match self.items.as_slice() {
            [a, b] => Some((a, b)),
            _ => None,
        }
    }

    /// Label for the compare button.
    #[must_use]
    pub fn status_label(&self) -> String {
        if self.is_complete() {
            "Compare".to_string()
        } else {
            format!("{}/{MAX_COMPARE} Compare", self.items.len())
        }
    }
}
