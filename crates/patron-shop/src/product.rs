//! Product catalog: what the shop can sell, and at what price.
//!
//! The catalog is immutable reference data. Shelf stock, claims and sales
//! live in [`crate::Inventory`]; a [`Product`] only describes a SKU.

use std::fmt;

use patron_core::{Money, ProductId};

/// Broad category of a product. Flavour only: pricing and purchase logic
/// never branch on the kind, but it shows up in logs and output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProductKind {
    Miniature,
    Paint,
    Rulebook,
    Dice,
    Terrain,
    Scenery,
}

impl ProductKind {
    /// Stable lowercase name, matching the catalog CSV `kind` column.
    pub fn name(self) -> &'static str {
        match self {
            ProductKind::Miniature => "miniature",
            ProductKind::Paint => "paint",
            ProductKind::Rulebook => "rulebook",
            ProductKind::Dice => "dice",
            ProductKind::Terrain => "terrain",
            ProductKind::Scenery => "scenery",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One sellable SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub kind: ProductKind,
}

/// Immutable product catalog, indexed by [`ProductId`].
///
/// Ids are dense: a catalog of `n` products holds ids `0..n`. The CSV
/// loader enforces this; [`Catalog::new`] asserts it in debug builds.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products already carrying dense ids.
    pub fn new(products: Vec<Product>) -> Self {
        debug_assert!(
            products.iter().enumerate().all(|(i, p)| p.id.index() == i),
            "catalog products must carry dense ids in order"
        );
        Catalog { products }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look a product up by id.
    #[inline]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(id.index())
    }

    /// Look a product up by its exact name. Linear scan; the catalog is
    /// small and this only runs while stocking shelves.
    pub fn by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Lowest price in the catalog, if any. Useful as a floor when
    /// deciding whether a budget can buy anything at all.
    pub fn cheapest_price(&self) -> Option<Money> {
        self.products.iter().map(|p| p.price).min()
    }
}
