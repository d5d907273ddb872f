use std::collections::{BTreeMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use ulid::Ulid;

use crate::model::*;

use super::EngineError;

/// Random occupancy marks between 20% and 40% of all rooms.
pub const OCCUPY_MIN_FRACTION: f64 = 0.2;
pub const OCCUPY_SPREAD: f64 = 0.2;

// ── Ledger transitions ───────────────────────────────────────────

impl Inventory {
    pub fn available_rooms(&self) -> Vec<&Room> {
        self.iter().filter(|r| r.is_available()).collect()
    }

    /// Mark `rooms` as booked under `booking_id`. All-or-nothing: every room is
    /// validated before any is touched.
    pub fn book(&mut self, rooms: &[RoomNumber], booking_id: Ulid) -> Result<(), EngineError> {
        if rooms.is_empty() {
            return Err(EngineError::InvalidRequest("no rooms to book"));
        }
        let mut seen = HashSet::with_capacity(rooms.len());
        for &number in rooms {
            if !seen.insert(number) {
                return Err(EngineError::InvalidRequest("duplicate room in booking"));
            }
            let room = self.get(number).ok_or(EngineError::UnknownRoom(number))?;
            if !room.is_available() {
                return Err(EngineError::InvalidTransition {
                    room: number,
                    status: room.status,
                });
            }
        }

        for number in rooms {
            if let Some(room) = self.rooms.get_mut(number) {
                room.status = RoomStatus::Booked { booking_id };
            }
        }
        Ok(())
    }

    /// Every room back to available, all booking ids cleared.
    pub fn reset(&mut self) {
        for room in self.rooms.values_mut() {
            room.status = RoomStatus::Available;
        }
    }

    /// Mark `rooms` as externally occupied. Only available rooms may be occupied;
    /// validated in full before any room changes.
    pub fn occupy(&mut self, rooms: &[RoomNumber]) -> Result<(), EngineError> {
        for &number in rooms {
            let room = self.get(number).ok_or(EngineError::UnknownRoom(number))?;
            if !room.is_available() {
                return Err(EngineError::InvalidTransition {
                    room: number,
                    status: room.status,
                });
            }
        }
        for number in rooms {
            if let Some(room) = self.rooms.get_mut(number) {
                room.status = RoomStatus::Occupied;
            }
        }
        Ok(())
    }

    /// Pick a random 20–40% share of the inventory from the rooms that are
    /// currently available (capped at that count). Ascending order.
    pub fn random_vacancies<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<RoomNumber> {
        let total = self.len() as f64;
        let target =
            (rng.r#gen::<f64>() * total * OCCUPY_SPREAD + total * OCCUPY_MIN_FRACTION) as usize;

        let mut candidates: Vec<RoomNumber> =
            self.available_rooms().iter().map(|r| r.number).collect();
        let count = target.min(candidates.len());
        let (chosen, _) = candidates.partial_shuffle(rng, count);
        let mut chosen = chosen.to_vec();
        chosen.sort_unstable();
        chosen
    }

    /// Occupy a random share of the available rooms; bookings are never overwritten.
    pub fn occupy_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<RoomNumber> {
        let chosen = self.random_vacancies(rng);
        for number in &chosen {
            if let Some(room) = self.rooms.get_mut(number) {
                room.status = RoomStatus::Occupied;
            }
        }
        chosen
    }

    pub fn stats(&self) -> Stats {
        let mut stats = Stats {
            total: self.len(),
            ..Stats::default()
        };
        for room in self.iter() {
            match room.status {
                RoomStatus::Available => stats.available += 1,
                RoomStatus::Booked { .. } => stats.booked += 1,
                RoomStatus::Occupied => stats.occupied += 1,
            }
        }
        stats
    }

    pub fn rooms_for_booking(&self, booking_id: Ulid) -> Vec<RoomNumber> {
        self.iter()
            .filter(|r| r.booking_id() == Some(booking_id))
            .map(|r| r.number)
            .collect()
    }

    /// Live bookings reconstructed from room statuses, oldest first.
    pub fn bookings(&self) -> Vec<BookingInfo> {
        let mut grouped: BTreeMap<Ulid, Vec<RoomNumber>> = BTreeMap::new();
        for room in self.iter() {
            if let Some(id) = room.booking_id() {
                grouped.entry(id).or_default().push(room.number);
            }
        }
        grouped
            .into_iter()
            .map(|(id, rooms)| BookingInfo {
                id,
                rooms,
                created_at: id.timestamp_ms() as Ms,
            })
            .collect()
    }
}
