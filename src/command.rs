use crate::limits::MAX_COMMAND_LEN;
use crate::model::*;
use crate::topology::{self, FLOORS};

/// Parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Book { count: usize },
    BookRooms { rooms: Vec<RoomNumber> },
    Preview { count: usize },
    Reset,
    Random,
    Stats,
    Rooms { floor: Option<Floor> },
    Free,
    Bookings,
    Last,
    Watch { room: RoomNumber },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    TooLong,
    Unknown(String),
    WrongArity(&'static str, usize, usize),
    BadNumber(String),
    BadRoom(String),
    BadFloor(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Empty => write!(f, "empty command"),
            CommandError::TooLong => write!(f, "command longer than {MAX_COMMAND_LEN} bytes"),
            CommandError::Unknown(word) => write!(f, "unknown command: {word} (try 'help')"),
            CommandError::WrongArity(cmd, expected, got) => {
                write!(f, "{cmd}: expected {expected} argument(s), got {got}")
            }
            CommandError::BadNumber(s) => write!(f, "not a number: {s}"),
            CommandError::BadRoom(s) => write!(f, "no such room: {s}"),
            CommandError::BadFloor(s) => write!(f, "no such floor: {s} (1-{FLOORS})"),
        }
    }
}

impl std::error::Error for CommandError {}

pub const HELP: &str = "\
commands:
  book <n>            book the n rooms (1-5) with the least travel time
  reserve <room>...   book specific rooms, costed in the order given
  preview <n>         show the assignment `book <n>` would make
  reset               make every room available again
  random              occupy a random 20-40% of the available rooms
  stats               room counts by status
  rooms [floor]       list rooms and their status
  free                list available rooms
  bookings            list live bookings
  last                show the most recent booking
  watch <room>        print events for a room as they happen
  help                this text
  quit                leave";

pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    if input.len() > MAX_COMMAND_LEN {
        return Err(CommandError::TooLong);
    }
    let mut words = input.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = words.collect();

    match head.to_ascii_lowercase().as_str() {
        "book" => {
            let [count] = exact::<1>("book", &args)?;
            Ok(Command::Book {
                count: parse_count(count)?,
            })
        }
        "reserve" => {
            if args.is_empty() {
                return Err(CommandError::WrongArity("reserve", 1, 0));
            }
            let rooms = args
                .iter()
                .map(|s| parse_room(s))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Command::BookRooms { rooms })
        }
        "preview" => {
            let [count] = exact::<1>("preview", &args)?;
            Ok(Command::Preview {
                count: parse_count(count)?,
            })
        }
        "reset" => exact::<0>("reset", &args).map(|_| Command::Reset),
        "random" => exact::<0>("random", &args).map(|_| Command::Random),
        "stats" => exact::<0>("stats", &args).map(|_| Command::Stats),
        "rooms" => match args.as_slice() {
            [] => Ok(Command::Rooms { floor: None }),
            [floor] => Ok(Command::Rooms {
                floor: Some(parse_floor(floor)?),
            }),
            _ => Err(CommandError::WrongArity("rooms", 1, args.len())),
        },
        "free" => exact::<0>("free", &args).map(|_| Command::Free),
        "bookings" => exact::<0>("bookings", &args).map(|_| Command::Bookings),
        "last" => exact::<0>("last", &args).map(|_| Command::Last),
        "watch" => {
            let [room] = exact::<1>("watch", &args)?;
            Ok(Command::Watch {
                room: parse_room(room)?,
            })
        }
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn exact<'a, const N: usize>(
    cmd: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], CommandError> {
    <[&'a str; N]>::try_from(args).map_err(|_| CommandError::WrongArity(cmd, N, args.len()))
}

/// Any non-negative integer; the 1–5 range is enforced by the engine.
fn parse_count(s: &str) -> Result<usize, CommandError> {
    s.parse().map_err(|_| CommandError::BadNumber(s.to_string()))
}

fn parse_room(s: &str) -> Result<RoomNumber, CommandError> {
    s.parse::<RoomNumber>()
        .ok()
        .filter(|&n| topology::coordinates(n).is_some())
        .ok_or_else(|| CommandError::BadRoom(s.to_string()))
}

fn parse_floor(s: &str) -> Result<Floor, CommandError> {
    s.parse::<Floor>()
        .ok()
        .filter(|f| (1..=FLOORS).contains(f))
        .ok_or_else(|| CommandError::BadFloor(s.to_string()))
}
