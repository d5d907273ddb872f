use std::fmt;

use tokio::sync::broadcast;

use crate::command::{Command, HELP};
use crate::engine::{Engine, EngineError};
use crate::model::*;
use crate::observability::{command_label, COMMANDS_TOTAL};

pub enum Reply {
    Booked(Booking),
    Preview(Assignment),
    Reset,
    Occupied(Vec<RoomNumber>),
    Stats(Stats),
    Rooms(Vec<Room>),
    Free(Vec<Room>),
    Bookings(Vec<BookingInfo>),
    Last(Option<Booking>),
    Watching {
        room: RoomNumber,
        events: broadcast::Receiver<Event>,
    },
    Help,
    Quit,
}

pub async fn execute_command(engine: &Engine, cmd: Command) -> Result<Reply, EngineError> {
    let label = command_label(&cmd);
    let result = dispatch(engine, cmd).await;
    let status = if result.is_ok() { "ok" } else { "error" };
    metrics::counter!(COMMANDS_TOTAL, "command" => label, "status" => status).increment(1);
    if let Err(ref e) = result {
        tracing::warn!(command = label, "command failed: {e}");
    }
    result
}

async fn dispatch(engine: &Engine, cmd: Command) -> Result<Reply, EngineError> {
    match cmd {
        Command::Book { count } => engine.book(count).await.map(Reply::Booked),
        Command::BookRooms { rooms } => engine.book_rooms(&rooms).await.map(Reply::Booked),
        Command::Preview { count } => engine.find_assignment(count).await.map(Reply::Preview),
        Command::Reset => {
            engine.reset().await;
            Ok(Reply::Reset)
        }
        Command::Random => engine.occupy_random().await.map(Reply::Occupied),
        Command::Stats => Ok(Reply::Stats(engine.stats().await)),
        Command::Rooms { floor } => Ok(Reply::Rooms(engine.rooms(floor).await)),
        Command::Free => Ok(Reply::Free(engine.available_rooms().await)),
        Command::Bookings => Ok(Reply::Bookings(engine.bookings().await)),
        Command::Last => Ok(Reply::Last(engine.last_booking().await)),
        Command::Watch { room } => Ok(Reply::Watching {
            room,
            events: engine.notify.subscribe(room),
        }),
        Command::Help => Ok(Reply::Help),
        Command::Quit => Ok(Reply::Quit),
    }
}

/// One event as a JSON line tagged with the watched room.
pub fn render_event(room: RoomNumber, event: &Event) -> String {
    match serde_json::to_string(event) {
        Ok(json) => format!("[{room}] {json}"),
        Err(e) => format!("[{room}] <unserializable event: {e}>"),
    }
}

fn join_rooms(rooms: &[RoomNumber]) -> String {
    rooms
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_booking(f: &mut fmt::Formatter<'_>, b: &Booking) -> fmt::Result {
    write!(
        f,
        "booking {}: rooms {} (travel time {} min)",
        b.id,
        join_rooms(&b.rooms),
        b.travel_time
    )
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Booked(b) => write_booking(f, b),
            Reply::Preview(a) => write!(
                f,
                "would assign rooms {} (travel time {} min, {})",
                join_rooms(&a.rooms),
                a.travel_time,
                a.phase.label().replace('_', " ")
            ),
            Reply::Reset => write!(f, "all rooms available"),
            Reply::Occupied(rooms) => write!(f, "occupied {} rooms", rooms.len()),
            Reply::Stats(s) => write!(
                f,
                "total {}  available {}  booked {}  occupied {}",
                s.total, s.available, s.booked, s.occupied
            ),
            Reply::Rooms(rooms) => {
                let mut floor = None;
                for room in rooms {
                    if floor != Some(room.floor) {
                        if floor.is_some() {
                            writeln!(f)?;
                        }
                        write!(f, "floor {:>2}:", room.floor)?;
                        floor = Some(room.floor);
                    }
                    let mark = match room.status {
                        RoomStatus::Available => '.',
                        RoomStatus::Booked { .. } => 'B',
                        RoomStatus::Occupied => 'x',
                    };
                    write!(f, " {}{mark}", room.number)?;
                }
                Ok(())
            }
            Reply::Free(rooms) if rooms.is_empty() => write!(f, "no rooms available"),
            Reply::Free(rooms) => {
                let numbers: Vec<RoomNumber> = rooms.iter().map(|r| r.number).collect();
                write!(f, "{} available: {}", numbers.len(), join_rooms(&numbers))
            }
            Reply::Bookings(list) if list.is_empty() => write!(f, "no bookings"),
            Reply::Bookings(list) => {
                for (i, b) in list.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}: rooms {}", b.id, join_rooms(&b.rooms))?;
                }
                Ok(())
            }
            Reply::Last(Some(b)) => write_booking(f, b),
            Reply::Last(None) => write!(f, "no recent booking"),
            Reply::Watching { room, .. } => write!(f, "watching room {room}"),
            Reply::Help => f.write_str(HELP),
            Reply::Quit => write!(f, "bye"),
        }
    }
}
