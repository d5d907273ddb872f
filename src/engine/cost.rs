use crate::model::*;

/// Minutes per floor of vertical travel.
pub const FLOOR_COST: Cost = 2;

/// Minutes per room of corridor travel.
pub const POSITION_COST: Cost = 1;

pub fn pairwise_cost(a: &Room, b: &Room) -> Cost {
    FLOOR_COST * a.floor.abs_diff(b.floor) as Cost
        + POSITION_COST * a.position.abs_diff(b.position) as Cost
}

/// Sum of pairwise costs over consecutive rooms, in the order given.
///
/// The sequence is never reordered: two orderings of the same set may cost differently.
pub fn path_cost<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> Cost {
    let mut total = 0;
    let mut prev: Option<&Room> = None;
    for room in rooms {
        if let Some(p) = prev {
            total += pairwise_cost(p, room);
        }
        prev = Some(room);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::coordinates;

    fn room(number: RoomNumber) -> Room {
        let (floor, position) = coordinates(number).unwrap();
        Room::new(number, floor, position)
    }

    #[test]
    fn same_floor_cost() {
        assert_eq!(pairwise_cost(&room(101), &room(105)), 4);
    }

    #[test]
    fn vertical_cost() {
        assert_eq!(pairwise_cost(&room(105), &room(205)), 2);
        assert_eq!(pairwise_cost(&room(101), &room(1001)), 18);
    }

    #[test]
    fn mixed_cost_is_symmetric() {
        let a = room(203);
        let b = room(708);
        assert_eq!(pairwise_cost(&a, &b), 2 * 5 + 5);
        assert_eq!(pairwise_cost(&a, &b), pairwise_cost(&b, &a));
    }

    #[test]
    fn path_of_fewer_than_two_is_free() {
        assert_eq!(path_cost(std::iter::empty()), 0);
        assert_eq!(path_cost([&room(507)]), 0);
    }

    #[test]
    fn path_sums_consecutive_pairs() {
        let rooms = [room(101), room(102), room(103)];
        assert_eq!(path_cost(&rooms), 2);
    }

    #[test]
    fn path_respects_given_order() {
        let ascending = [room(101), room(102), room(110)];
        let zigzag = [room(101), room(110), room(102)];
        assert_eq!(path_cost(&ascending), 9);
        assert_eq!(path_cost(&zigzag), 17);
    }
}
