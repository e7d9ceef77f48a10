//! The single authority over shelf stock and item claims.
//!
//! Every pick-up goes through [`Inventory::try_claim`], which removes the
//! item from its shelf and records the claimant in one call. Two customers
//! deciding on the same shelf in the same tick therefore cannot both walk
//! away with the item: the first claim empties the shelf and the second
//! call observes it empty and returns `None`. There is no "reserved"
//! state to leak — a claim either exists or it does not.

use patron_core::{CustomerId, ItemId, Point3, ShelfId};
use rustc_hash::FxHashMap;

use crate::error::{ShopError, ShopResult};
use crate::product::Product;
use crate::shelf::{ClaimedItem, ShelfSlot, StockedItem};

/// Shelf stock, outstanding claims, and the returns bin.
#[derive(Debug, Default)]
pub struct Inventory {
    slots: Vec<ShelfSlot>,
    /// Who currently holds each claimed item. Entries are removed by
    /// `mark_sold` and `return_item`; anything left at end of day is a
    /// leaked claim.
    claims: FxHashMap<ItemId, CustomerId>,
    /// Items that came back after their origin shelf was restocked.
    returns: Vec<StockedItem>,
    next_item: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Inventory::default()
    }

    // ── Shelf layout ────────────────────────────────────────────────────

    /// Register a shelf slot at `position`. Ids are minted densely in
    /// registration order.
    pub fn add_shelf(&mut self, position: Point3) -> ShelfId {
        let id = ShelfId(self.slots.len() as u32);
        self.slots.push(ShelfSlot::new(id, position));
        id
    }

    #[inline]
    pub fn shelf(&self, id: ShelfId) -> Option<&ShelfSlot> {
        self.slots.get(id.index())
    }

    #[inline]
    pub fn shelf_count(&self) -> usize {
        self.slots.len()
    }

    pub fn shelves(&self) -> impl Iterator<Item = &ShelfSlot> {
        self.slots.iter()
    }

    // ── Stocking ────────────────────────────────────────────────────────

    /// Place a fresh instance of `product` on an empty shelf, minting a
    /// new [`ItemId`].
    pub fn stock(&mut self, shelf: ShelfId, product: &Product) -> ShopResult<ItemId> {
        let slot = self
            .slots
            .get_mut(shelf.index())
            .ok_or(ShopError::NoSuchShelf(shelf))?;
        if !slot.is_empty() {
            return Err(ShopError::ShelfOccupied(shelf));
        }
        let item = ItemId(self.next_item);
        self.next_item += 1;
        slot.put(StockedItem { item, product: product.id, price: product.price });
        Ok(item)
    }

    /// Shelves that currently hold an item — the browse targets.
    pub fn stocked_shelves(&self) -> impl Iterator<Item = &ShelfSlot> {
        self.slots.iter().filter(|s| !s.is_empty())
    }

    pub fn stocked_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    // ── Claims ──────────────────────────────────────────────────────────

    /// Take the item off `shelf` for `customer`. Returns `None` if the
    /// shelf is empty (or unknown) — the caller lost the race and should
    /// pick another shelf.
    pub fn try_claim(&mut self, shelf: ShelfId, customer: CustomerId) -> Option<ClaimedItem> {
        let slot = self.slots.get_mut(shelf.index())?;
        let stocked = slot.take()?;
        self.claims.insert(stocked.item, customer);
        Some(ClaimedItem {
            item: stocked.item,
            product: stocked.product,
            price: stocked.price,
            shelf,
        })
    }

    /// Put a claimed item back: onto its origin shelf if that is still
    /// empty, otherwise into the returns bin. Either way the claim is
    /// closed.
    pub fn return_item(&mut self, claimed: ClaimedItem) {
        self.claims.remove(&claimed.item);
        let stocked = StockedItem {
            item: claimed.item,
            product: claimed.product,
            price: claimed.price,
        };
        match self.slots.get_mut(claimed.shelf.index()) {
            Some(slot) if slot.is_empty() => slot.put(stocked),
            _ => self.returns.push(stocked),
        }
    }

    /// Close a claim as sold. The item leaves the inventory for good.
    pub fn mark_sold(&mut self, claimed: &ClaimedItem, customer: CustomerId) {
        let holder = self.claims.remove(&claimed.item);
        debug_assert_eq!(
            holder,
            Some(customer),
            "sold {} without a claim held by {}",
            claimed.item,
            customer
        );
    }

    /// Who holds the claim on `item`, if anyone.
    pub fn claim_holder(&self, item: ItemId) -> Option<CustomerId> {
        self.claims.get(&item).copied()
    }

    /// Number of claims not yet sold or returned. Zero once the shop has
    /// drained at end of day.
    pub fn open_claims(&self) -> usize {
        self.claims.len()
    }

    /// Items waiting to be re-shelved by staff.
    pub fn returns_bin(&self) -> &[StockedItem] {
        &self.returns
    }
}
