use crate::model::{RoomNumber, RoomStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    NotEnoughRooms {
        requested: usize,
        available: usize,
    },
    InvalidTransition {
        room: RoomNumber,
        status: RoomStatus,
    },
    InvalidRequest(&'static str),
    UnknownRoom(RoomNumber),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotEnoughRooms {
                requested,
                available,
            } => write!(
                f,
                "not enough rooms available: requested {requested}, available {available}"
            ),
            EngineError::InvalidTransition { room, status } => {
                write!(f, "room {room} is {status}, cannot book")
            }
            EngineError::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            EngineError::UnknownRoom(room) => write!(f, "unknown room: {room}"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
