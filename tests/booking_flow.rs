use std::sync::Arc;

use roomplan::command::parse_command;
use roomplan::console::{execute_command, Reply};
use roomplan::engine::{find_optimal_assignment, path_cost, Engine, EngineError};
use roomplan::model::*;
use roomplan::notify::NotifyHub;
use roomplan::topology::{self, TOTAL_ROOMS};

// ── Test infrastructure ──────────────────────────────────────

fn engine(seed: u64) -> Engine {
    Engine::new(Arc::new(NotifyHub::new()), Some(seed))
}

async fn run(engine: &Engine, line: &str) -> Result<Reply, EngineError> {
    let cmd = parse_command(line).unwrap_or_else(|e| panic!("parse {line:?}: {e}"));
    execute_command(engine, cmd).await
}

// ── Pure core ────────────────────────────────────────────────

#[test]
fn topology_numbering_is_exact() {
    let inv = Inventory::new();
    assert_eq!(inv.len(), TOTAL_ROOMS);
    let numbers: Vec<RoomNumber> = inv.iter().map(|r| r.number).collect();
    let mut expected = Vec::new();
    for floor in 1..=9u16 {
        expected.extend((1..=10).map(|p| floor * 100 + p));
    }
    expected.extend(1001..=1007);
    assert_eq!(numbers, expected);
}

#[test]
fn path_cost_examples() {
    let inv = Inventory::new();
    let rooms = |ns: &[RoomNumber]| -> Vec<Room> {
        ns.iter().map(|&n| inv.get(n).unwrap().clone()).collect()
    };
    assert_eq!(path_cost(&rooms(&[101, 105])), 4);
    assert_eq!(path_cost(&rooms(&[105, 205])), 2);
    assert_eq!(path_cost(&rooms(&[101, 1001])), 18);
    assert_eq!(path_cost(&rooms(&[101, 102, 103])), 2);
}

#[test]
fn search_does_not_mutate() {
    let inv = Inventory::new();
    let before = inv.clone();
    let a = find_optimal_assignment(&inv, 5).unwrap();
    assert_eq!(a.rooms, vec![101, 102, 103, 104, 105]);
    assert_eq!(a.travel_time, 4);
    assert_eq!(inv, before);
}

#[test]
fn book_then_reset_restores_inventory() {
    let mut inv = Inventory::new();
    let a = find_optimal_assignment(&inv, 4).unwrap();
    inv.book(&a.rooms, ulid::Ulid::new()).unwrap();
    assert_eq!(inv.stats().booked, 4);

    inv.reset();
    assert_eq!(inv, Inventory::new());
    let stats = inv.stats();
    assert_eq!(stats.available, stats.total);
}

// ── Console flow ─────────────────────────────────────────────

#[tokio::test]
async fn full_session() {
    let engine = engine(3);

    let Reply::Booked(first) = run(&engine, "book 2").await.unwrap() else {
        panic!("expected booking");
    };
    assert_eq!(first.rooms, vec![101, 102]);

    let Reply::Booked(second) = run(&engine, "book 3").await.unwrap() else {
        panic!("expected booking");
    };
    assert_eq!(second.rooms, vec![103, 104, 105]);

    let Reply::Stats(stats) = run(&engine, "stats").await.unwrap() else {
        panic!("expected stats");
    };
    assert_eq!(stats.booked, 5);
    assert_eq!(stats.total, 97);

    let Reply::Bookings(list) = run(&engine, "bookings").await.unwrap() else {
        panic!("expected bookings");
    };
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, first.id);

    let Reply::Occupied(occupied) = run(&engine, "random").await.unwrap() else {
        panic!("expected occupancy");
    };
    assert!(occupied.iter().all(|r| !first.rooms.contains(r) && !second.rooms.contains(r)));

    run(&engine, "reset").await.unwrap();
    let Reply::Stats(stats) = run(&engine, "stats").await.unwrap() else {
        panic!("expected stats");
    };
    assert_eq!(stats.available, 97);
}

#[tokio::test]
async fn fragmented_hotel_falls_back_across_floors() {
    let engine = engine(9);
    // Fill every floor down to a single free room at position 10 (floor 10: 1007).
    for floor in 1..=10u8 {
        let last = topology::rooms_on_floor(floor);
        let rooms: Vec<String> = (1..last)
            .filter_map(|p| topology::room_number(floor, p))
            .map(|n| n.to_string())
            .collect();
        for chunk in rooms.chunks(5) {
            run(&engine, &format!("reserve {}", chunk.join(" ")))
                .await
                .unwrap();
        }
    }
    assert_eq!(engine.stats().await.available, 10);

    let Reply::Preview(a) = run(&engine, "preview 2").await.unwrap() else {
        panic!("expected preview");
    };
    assert_eq!(a.phase, SearchPhase::CrossFloor);
    assert_eq!(a.rooms, vec![110, 210]);
    assert_eq!(a.travel_time, 2);
}

#[tokio::test]
async fn exhausted_hotel_reports_not_enough_rooms() {
    let engine = engine(5);
    while engine.stats().await.available >= 5 {
        run(&engine, "book 5").await.unwrap();
    }
    let available = engine.stats().await.available;
    let before = engine.snapshot().await;

    let err = run(&engine, "book 5").await.err().unwrap();
    assert_eq!(
        err,
        EngineError::NotEnoughRooms {
            requested: 5,
            available
        }
    );
    assert_eq!(engine.snapshot().await, before);
}
