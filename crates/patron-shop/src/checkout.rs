//! Checkout desks: strict-FIFO queues with tick-counted service.
//!
//! A desk owns its queue. Customers interact through a narrow API —
//! [`CheckoutDesk::join`], [`CheckoutDesk::place_items`],
//! [`CheckoutDesk::take_receipt`], [`CheckoutDesk::leave`] — and poll
//! their 1-based queue position each tick rather than being called back.
//! Service time is counted in ticks from the moment the head customer's
//! items are staged, so a paused or fast-forwarded simulation charges
//! exactly the same service time as a real-time one.

use std::collections::VecDeque;

use patron_core::{CustomerId, DeskId, Money, Point3, Tick};
use rustc_hash::FxHashMap;

use crate::shelf::ClaimedItem;

/// How long a desk takes to ring a customer up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceRate {
    /// Fixed ticks per transaction.
    pub base_ticks: u64,
    /// Additional ticks per item rung up.
    pub per_item_ticks: u64,
}

impl Default for ServiceRate {
    /// 20 + 15/item; at the default 0.1 s tick that is 2 s plus 1.5 s an
    /// item.
    fn default() -> Self {
        ServiceRate { base_ticks: 20, per_item_ticks: 15 }
    }
}

/// Proof of a completed purchase, handed to the customer by
/// [`CheckoutDesk::take_receipt`]. Carries the sold items so the customer
/// can close their claims with the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub customer: CustomerId,
    pub desk: DeskId,
    pub items: Vec<ClaimedItem>,
    pub total: Money,
    pub completed_at: Tick,
}

impl Receipt {
    #[inline]
    pub fn item_count(&self) -> u32 {
        self.items.len() as u32
    }
}

#[derive(Debug, Clone, Copy)]
struct Serving {
    customer: CustomerId,
    done_at: Tick,
}

/// One checkout desk and its queue.
#[derive(Debug)]
pub struct CheckoutDesk {
    id: DeskId,
    position: Point3,
    rate: ServiceRate,
    queue: VecDeque<CustomerId>,
    staged: Vec<ClaimedItem>,
    staged_by: Option<CustomerId>,
    serving: Option<Serving>,
    /// Completed receipts awaiting pickup, keyed by customer.
    ready: FxHashMap<CustomerId, Receipt>,
}

impl CheckoutDesk {
    pub fn new(id: DeskId, position: Point3, rate: ServiceRate) -> Self {
        CheckoutDesk {
            id,
            position,
            rate,
            queue: VecDeque::new(),
            staged: Vec::new(),
            staged_by: None,
            serving: None,
            ready: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> DeskId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Point3 {
        self.position
    }

    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Join the back of the queue and get a 1-based position. Joining
    /// while already queued is a no-op that reports the current position.
    pub fn join(&mut self, customer: CustomerId) -> u32 {
        if let Some(pos) = self.position_of(customer) {
            return pos;
        }
        self.queue.push_back(customer);
        self.queue.len() as u32
    }

    /// 1-based queue position, or `None` if not queued. Position 1 is the
    /// head being (or about to be) served.
    pub fn position_of(&self, customer: CustomerId) -> Option<u32> {
        self.queue
            .iter()
            .position(|&c| c == customer)
            .map(|i| i as u32 + 1)
    }

    #[inline]
    pub fn at_head(&self, customer: CustomerId) -> bool {
        self.queue.front() == Some(&customer)
    }

    /// Stage `items` for ringing up. Only the head customer may stage;
    /// anyone else gets their items handed straight back in the `Err`.
    ///
    /// Staging is idempotent per item: an [`ClaimedItem`] whose id is
    /// already on the belt is dropped rather than duplicated, so a
    /// re-sent batch cannot double-charge.
    pub fn place_items(
        &mut self,
        customer: CustomerId,
        items: Vec<ClaimedItem>,
    ) -> Result<(), Vec<ClaimedItem>> {
        if !self.at_head(customer) {
            return Err(items);
        }
        if let Some(by) = self.staged_by {
            if by != customer {
                // Previous head left mid-stage without taking their items
                // back; should be unreachable via `leave`.
                debug_assert!(false, "stale staging by {by} at desk {}", self.id);
                return Err(items);
            }
        }
        self.staged_by = Some(customer);
        for item in items {
            if !self.staged.iter().any(|s| s.item == item.item) {
                self.staged.push(item);
            }
        }
        Ok(())
    }

    /// Advance the desk by one tick: finish a due transaction and start
    /// the next one. Returns the customer whose receipt became ready this
    /// tick, if any.
    pub fn service(&mut self, now: Tick) -> Option<CustomerId> {
        let mut completed = None;

        if let Some(serving) = self.serving {
            if now >= serving.done_at {
                debug_assert_eq!(
                    self.queue.front(),
                    Some(&serving.customer),
                    "serving a customer who is not at the head of desk {}",
                    self.id
                );
                self.serving = None;
                self.queue.pop_front();
                let items = std::mem::take(&mut self.staged);
                self.staged_by = None;
                let total = items.iter().map(|i| i.price).sum();
                self.ready.insert(
                    serving.customer,
                    Receipt {
                        customer: serving.customer,
                        desk: self.id,
                        items,
                        total,
                        completed_at: now,
                    },
                );
                completed = Some(serving.customer);
            }
        }

        if self.serving.is_none() {
            if let (Some(&head), Some(by)) = (self.queue.front(), self.staged_by) {
                if by == head {
                    let ticks = self.rate.base_ticks
                        + self.rate.per_item_ticks * self.staged.len() as u64;
                    self.serving = Some(Serving { customer: head, done_at: now + ticks });
                }
            }
        }

        completed
    }

    /// Collect a finished receipt. `None` until service completes.
    pub fn take_receipt(&mut self, customer: CustomerId) -> Option<Receipt> {
        self.ready.remove(&customer)
    }

    /// Leave the queue from any position, taking back everything the desk
    /// holds for this customer: staged items, and the items inside an
    /// uncollected receipt. The caller is responsible for returning them
    /// to the inventory.
    pub fn leave(&mut self, customer: CustomerId) -> Vec<ClaimedItem> {
        if let Some(index) = self.queue.iter().position(|&c| c == customer) {
            self.queue.remove(index);
        }
        if self.serving.is_some_and(|s| s.customer == customer) {
            self.serving = None;
        }
        let mut items = Vec::new();
        if self.staged_by == Some(customer) {
            items.append(&mut self.staged);
            self.staged_by = None;
        }
        if let Some(receipt) = self.ready.remove(&customer) {
            items.extend(receipt.items);
        }
        items
    }

    /// Whether a transaction is in progress.
    #[inline]
    pub fn is_serving(&self) -> bool {
        self.serving.is_some()
    }
}

/// All the desks in the shop.
#[derive(Debug, Default)]
pub struct Checkouts {
    desks: Vec<CheckoutDesk>,
}

impl Checkouts {
    pub fn new() -> Self {
        Checkouts::default()
    }

    /// Register a desk. Ids are minted densely in registration order.
    pub fn add_desk(&mut self, position: Point3, rate: ServiceRate) -> DeskId {
        let id = DeskId(self.desks.len() as u16);
        self.desks.push(CheckoutDesk::new(id, position, rate));
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.desks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.desks.is_empty()
    }

    #[inline]
    pub fn get(&self, id: DeskId) -> Option<&CheckoutDesk> {
        self.desks.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: DeskId) -> Option<&mut CheckoutDesk> {
        self.desks.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CheckoutDesk> {
        self.desks.iter()
    }

    /// The desk a new customer should queue at: shortest queue, ties
    /// broken by lowest desk id so the choice is deterministic. `None`
    /// when the shop has no desks at all.
    pub fn shortest_queue(&self) -> Option<DeskId> {
        self.desks
            .iter()
            .min_by_key(|d| (d.queue_len(), d.id()))
            .map(|d| d.id())
    }

    /// Advance every desk by one tick. Completed customers are reported
    /// in desk order.
    pub fn service_all(&mut self, now: Tick) -> Vec<CustomerId> {
        self.desks
            .iter_mut()
            .filter_map(|desk| desk.service(now))
            .collect()
    }

    /// Customers queued across all desks.
    pub fn total_queued(&self) -> usize {
        self.desks.iter().map(|d| d.queue_len()).sum()
    }
}
