use std::collections::BTreeMap;

use crate::model::*;

// Ten floors: ten rooms on floors 1-9, seven on the top floor.

pub const FLOORS: Floor = 10;
pub const TOP_FLOOR: Floor = 10;
pub const ROOMS_PER_FLOOR: Position = 10;
pub const TOP_FLOOR_ROOMS: Position = 7;

/// 9 × 10 + 7.
pub const TOTAL_ROOMS: usize = 97;

/// Number of rooms on a floor, or 0 for a floor outside the building.
pub fn rooms_on_floor(floor: Floor) -> Position {
    match floor {
        1..=9 => ROOMS_PER_FLOOR,
        TOP_FLOOR => TOP_FLOOR_ROOMS,
        _ => 0,
    }
}

/// Room number for `(floor, position)`; `None` if the slot doesn't exist.
pub fn room_number(floor: Floor, position: Position) -> Option<RoomNumber> {
    if position == 0 || position > rooms_on_floor(floor) {
        return None;
    }
    let number = if floor == TOP_FLOOR {
        1000 + position as RoomNumber
    } else {
        floor as RoomNumber * 100 + position as RoomNumber
    };
    Some(number)
}

/// Inverse of [`room_number`].
pub fn coordinates(number: RoomNumber) -> Option<(Floor, Position)> {
    let (floor, position) = if number > 1000 {
        (TOP_FLOOR, number - 1000)
    } else {
        ((number / 100) as Floor, number % 100)
    };
    let position = Position::try_from(position).ok()?;
    room_number(floor, position).map(|_| (floor, position))
}

/// Build the full inventory, every room available.
pub fn build_topology() -> Inventory {
    let mut rooms = BTreeMap::new();
    for floor in 1..=FLOORS {
        for position in 1..=rooms_on_floor(floor) {
            if let Some(number) = room_number(floor, position) {
                rooms.insert(number, Room::new(number, floor, position));
            }
        }
    }
    Inventory { rooms }
}
