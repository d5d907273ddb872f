pub mod cost;
mod error;
mod ledger;
mod mutations;
mod queries;
pub mod search;

pub use cost::{pairwise_cost, path_cost};
pub use error::EngineError;
pub use search::find_optimal_assignment;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::RwLock;
use ulid::Generator;

use crate::model::*;
use crate::notify::NotifyHub;

/// Everything a write touches, behind one lock so that search and commit of a
/// booking see the same snapshot.
pub(super) struct LedgerState {
    pub(super) inventory: Inventory,
    pub(super) ids: Generator,
    pub(super) rng: StdRng,
    pub(super) last_booking: Option<Booking>,
}

/// Single-owner store for one hotel's inventory.
pub struct Engine {
    pub(super) state: RwLock<LedgerState>,
    pub notify: Arc<NotifyHub>,
}

/// Apply an event to the inventory. Caller holds the write lock.
fn apply_to_inventory(inventory: &mut Inventory, event: &Event) -> Result<(), EngineError> {
    match event {
        Event::RoomsBooked {
            booking_id, rooms, ..
        } => inventory.book(rooms, *booking_id),
        Event::RoomsOccupied { rooms } => inventory.occupy(rooms),
        Event::InventoryReset => {
            inventory.reset();
            Ok(())
        }
    }
}

impl Engine {
    /// Fresh inventory. `seed` makes random occupancy reproducible.
    pub fn new(notify: Arc<NotifyHub>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: RwLock::new(LedgerState {
                inventory: Inventory::new(),
                ids: Generator::new(),
                rng,
                last_booking: None,
            }),
            notify,
        }
    }

    /// Apply + notify + gauge update in one call.
    pub(super) fn apply_and_notify(
        &self,
        state: &mut LedgerState,
        event: &Event,
    ) -> Result<(), EngineError> {
        apply_to_inventory(&mut state.inventory, event)?;
        self.publish(&state.inventory, event);
        Ok(())
    }

    /// Notify watchers of an already-applied event and refresh the gauge.
    pub(super) fn publish(&self, inventory: &Inventory, event: &Event) {
        match event {
            Event::RoomsBooked { rooms, .. } | Event::RoomsOccupied { rooms } => {
                self.notify.send_to_rooms(rooms, event);
            }
            Event::InventoryReset => self.notify.send_all(event),
        }
        metrics::gauge!(crate::observability::ROOMS_AVAILABLE)
            .set(inventory.stats().available as f64);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Arc::new(NotifyHub::new()), None)
    }
}
