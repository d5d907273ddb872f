use ulid::Ulid;

use crate::model::*;

use super::search::find_optimal_assignment;
use super::{Engine, EngineError};

impl Engine {
    /// Run the assignment search without committing anything.
    pub async fn find_assignment(&self, count: usize) -> Result<Assignment, EngineError> {
        let guard = self.state.read().await;
        find_optimal_assignment(&guard.inventory, count)
    }

    pub async fn stats(&self) -> Stats {
        self.state.read().await.inventory.stats()
    }

    /// All rooms, or only those on `floor`, in room-number order.
    pub async fn rooms(&self, floor: Option<Floor>) -> Vec<Room> {
        let guard = self.state.read().await;
        guard
            .inventory
            .iter()
            .filter(|r| floor.is_none_or(|f| r.floor == f))
            .cloned()
            .collect()
    }

    pub async fn available_rooms(&self) -> Vec<Room> {
        let guard = self.state.read().await;
        guard
            .inventory
            .available_rooms()
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn bookings(&self) -> Vec<BookingInfo> {
        self.state.read().await.inventory.bookings()
    }

    pub async fn rooms_for_booking(&self, booking_id: Ulid) -> Vec<RoomNumber> {
        self.state.read().await.inventory.rooms_for_booking(booking_id)
    }

    /// The most recent booking, cleared by reset and random occupancy.
    pub async fn last_booking(&self) -> Option<Booking> {
        self.state.read().await.last_booking.clone()
    }

    /// Point-in-time copy of the whole inventory.
    pub async fn snapshot(&self) -> Inventory {
        self.state.read().await.inventory.clone()
    }
}
