use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unix milliseconds.
pub type Ms = i64;

/// `floor * 100 + position` on floors 1–9, `1000 + position` on floor 10.
pub type RoomNumber = u16;

pub type Floor = u8;

pub type Position = u8;

/// Travel time in minutes.
pub type Cost = u32;

/// Where a room stands in the booking flow.
///
/// A booking id only exists on `Booked`; occupied rooms come from outside the
/// booking flow and never carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    Available,
    Booked { booking_id: Ulid },
    Occupied,
}

impl RoomStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Booked { .. } => "booked",
            RoomStatus::Occupied => "occupied",
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub number: RoomNumber,
    pub floor: Floor,
    pub position: Position,
    pub status: RoomStatus,
}

impl Room {
    pub fn new(number: RoomNumber, floor: Floor, position: Position) -> Self {
        Self {
            number,
            floor,
            position,
            status: RoomStatus::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }

    pub fn booking_id(&self) -> Option<Ulid> {
        match self.status {
            RoomStatus::Booked { booking_id } => Some(booking_id),
            _ => None,
        }
    }
}

/// The complete room map, keyed and iterated in ascending room-number order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub(crate) rooms: BTreeMap<RoomNumber, Room>,
}

impl Inventory {
    /// Fresh inventory with every room available.
    pub fn new() -> Self {
        crate::topology::build_topology()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get(&self, number: RoomNumber) -> Option<&Room> {
        self.rooms.get(&number)
    }

    /// All rooms in ascending room-number order.
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

/// Which search phase produced an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPhase {
    SameFloor,
    CrossFloor,
}

impl SearchPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SearchPhase::SameFloor => "same_floor",
            SearchPhase::CrossFloor => "cross_floor",
        }
    }
}

/// A chosen room sequence and its path cost in visiting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub rooms: Vec<RoomNumber>,
    pub travel_time: Cost,
    pub phase: SearchPhase,
}

/// A committed assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Ulid,
    pub rooms: Vec<RoomNumber>,
    pub travel_time: Cost,
    pub created_at: Ms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub available: usize,
    pub booked: usize,
    pub occupied: usize,
}

/// Ledger transitions, broadcast to watchers of the affected rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    RoomsBooked {
        booking_id: Ulid,
        rooms: Vec<RoomNumber>,
        travel_time: Cost,
    },
    RoomsOccupied {
        rooms: Vec<RoomNumber>,
    },
    InventoryReset,
}

// ── Query result types ───────────────────────────────────────────

/// A booking as reconstructed from the ledger (rooms in ascending order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    pub id: Ulid,
    pub rooms: Vec<RoomNumber>,
    pub created_at: Ms,
}
