//! The customer's cart and budget.

use patron_core::Money;
use patron_shop::ClaimedItem;

/// Claimed items plus the budget they must fit inside.
///
/// Invariant: `total() <= budget()` at all times. [`Cart::try_add`] is the
/// only way in, and it refuses any item that would break the bound — a
/// $50 budget holding a $30 item will take a $15 rulebook but hand back a
/// $25 one.
#[derive(Debug)]
pub struct Cart {
    budget: Money,
    items: Vec<ClaimedItem>,
}

impl Cart {
    pub fn new(budget: Money) -> Self {
        Cart { budget, items: Vec::new() }
    }

    #[inline]
    pub fn budget(&self) -> Money {
        self.budget
    }

    /// Sum of the prices in the cart.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.price).sum()
    }

    /// Budget left after what is already in the cart.
    pub fn remaining(&self) -> Money {
        self.budget.saturating_sub(self.total())
    }

    /// Would one more item at `price` still fit the budget?
    pub fn can_afford(&self, price: Money) -> bool {
        self.total().saturating_add(price) <= self.budget
    }

    /// Add an item, or hand it back untouched if it would bust the budget.
    pub fn try_add(&mut self, item: ClaimedItem) -> Result<(), ClaimedItem> {
        if self.can_afford(item.price) {
            self.items.push(item);
            Ok(())
        } else {
            Err(item)
        }
    }

    /// Re-insert items that were briefly handed out (e.g. a staging call
    /// that bounced). Skips the budget check: the items were already in
    /// the cart under this budget.
    pub(crate) fn restore(&mut self, items: Vec<ClaimedItem>) {
        self.items.extend(items);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn items(&self) -> &[ClaimedItem] {
        &self.items
    }

    /// Empty the cart, handing ownership of every item to the caller.
    pub fn take_all(&mut self) -> Vec<ClaimedItem> {
        std::mem::take(&mut self.items)
    }
}
