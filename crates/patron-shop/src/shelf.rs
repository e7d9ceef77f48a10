//! Shelf slots and the items that sit on them.

use patron_core::{ItemId, Money, Point3, ProductId, ShelfId};

/// One physical product instance sitting on a shelf (or in the returns
/// bin). The price is copied out of the catalog at stocking time so an
/// item keeps the price it was shelved at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StockedItem {
    pub item: ItemId,
    pub product: ProductId,
    pub price: Money,
}

/// A shelf slot on the shop floor. Holds zero or one [`StockedItem`].
///
/// `position` is where a browsing customer walks to. It does not have to
/// be walkable itself: customers route to the nearest walkable point, the
/// way you stand in front of a shelf rather than inside it.
#[derive(Debug, Clone)]
pub struct ShelfSlot {
    id: ShelfId,
    position: Point3,
    item: Option<StockedItem>,
}

impl ShelfSlot {
    pub(crate) fn new(id: ShelfId, position: Point3) -> Self {
        ShelfSlot { id, position, item: None }
    }

    #[inline]
    pub fn id(&self) -> ShelfId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// The item currently on this shelf, if any.
    #[inline]
    pub fn stocked(&self) -> Option<&StockedItem> {
        self.item.as_ref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    pub(crate) fn put(&mut self, item: StockedItem) {
        debug_assert!(self.item.is_none(), "put on occupied shelf {}", self.id);
        self.item = Some(item);
    }

    pub(crate) fn take(&mut self) -> Option<StockedItem> {
        self.item.take()
    }
}

/// An item a customer has taken off a shelf.
///
/// Existence of a `ClaimedItem` value IS the claim: the item is out of the
/// inventory's shelves and cannot be claimed by anyone else. It ends its
/// life in exactly one of two calls — [`crate::Inventory::mark_sold`] or
/// [`crate::Inventory::return_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClaimedItem {
    pub item: ItemId,
    pub product: ProductId,
    pub price: Money,
    /// The shelf the item came off, for restocking on return.
    pub shelf: ShelfId,
}
