use std::time::Instant;

use tracing::{debug, info};

use crate::model::*;
use crate::observability::*;

use super::cost::path_cost;
use super::search::{find_optimal_assignment, validate_request};
use super::{Engine, EngineError, LedgerState};

impl Engine {
    /// Find and commit the cheapest `count` rooms as one booking.
    ///
    /// Search and commit run under the same write lock, so a concurrent caller
    /// can never be handed an overlapping room set.
    pub async fn book(&self, count: usize) -> Result<Booking, EngineError> {
        let mut guard = self.state.write().await;

        let start = Instant::now();
        let assignment = match find_optimal_assignment(&guard.inventory, count) {
            Ok(a) => a,
            Err(e) => {
                metrics::counter!(BOOKINGS_TOTAL, "status" => "rejected").increment(1);
                return Err(e);
            }
        };
        metrics::histogram!(SEARCH_DURATION_SECONDS, "phase" => assignment.phase.label())
            .record(start.elapsed().as_secs_f64());
        debug!(
            phase = assignment.phase.label(),
            travel_time = assignment.travel_time,
            "assignment found"
        );

        self.commit_booking(&mut guard, assignment.rooms, assignment.travel_time)
    }

    /// Book an explicit room sequence. Travel time is costed in the order given.
    pub async fn book_rooms(&self, rooms: &[RoomNumber]) -> Result<Booking, EngineError> {
        validate_request(rooms.len())?;
        let mut guard = self.state.write().await;

        let resolved = rooms
            .iter()
            .map(|&n| guard.inventory.get(n).ok_or(EngineError::UnknownRoom(n)))
            .collect::<Result<Vec<_>, _>>()?;
        let travel_time = path_cost(resolved);

        self.commit_booking(&mut guard, rooms.to_vec(), travel_time)
    }

    fn commit_booking(
        &self,
        state: &mut LedgerState,
        rooms: Vec<RoomNumber>,
        travel_time: Cost,
    ) -> Result<Booking, EngineError> {
        let booking_id = state
            .ids
            .generate()
            .map_err(|_| EngineError::LimitExceeded("booking id space exhausted"))?;

        let event = Event::RoomsBooked {
            booking_id,
            rooms: rooms.clone(),
            travel_time,
        };
        if let Err(e) = self.apply_and_notify(state, &event) {
            metrics::counter!(BOOKINGS_TOTAL, "status" => "rejected").increment(1);
            return Err(e);
        }
        metrics::counter!(BOOKINGS_TOTAL, "status" => "committed").increment(1);

        let booking = Booking {
            id: booking_id,
            rooms,
            travel_time,
            created_at: booking_id.timestamp_ms() as Ms,
        };
        info!(
            booking_id = %booking.id,
            rooms = ?booking.rooms,
            travel_time,
            "booking committed"
        );
        state.last_booking = Some(booking.clone());
        Ok(booking)
    }

    /// Return every room to available and forget the last booking.
    pub async fn reset(&self) {
        let mut guard = self.state.write().await;
        guard.inventory.reset();
        guard.last_booking = None;
        self.publish(&guard.inventory, &Event::InventoryReset);
        metrics::counter!(RESETS_TOTAL).increment(1);
        info!("inventory reset");
    }

    /// Mark a random 20–40% of rooms occupied, drawn only from available rooms.
    /// Returns the rooms that were occupied.
    pub async fn occupy_random(&self) -> Result<Vec<RoomNumber>, EngineError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let rooms = state.inventory.random_vacancies(&mut state.rng);
        let event = Event::RoomsOccupied {
            rooms: rooms.clone(),
        };
        self.apply_and_notify(state, &event)?;
        state.last_booking = None;

        metrics::counter!(ROOMS_OCCUPIED_TOTAL).increment(rooms.len() as u64);
        info!(count = rooms.len(), "random occupancy applied");
        Ok(rooms)
    }
}
