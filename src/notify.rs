use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::model::{Event, RoomNumber};

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub for ledger events per room.
pub struct NotifyHub {
    channels: DashMap<RoomNumber, broadcast::Sender<Event>>,
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to events touching a room. Creates the channel if needed.
    pub fn subscribe(&self, room: RoomNumber) -> broadcast::Receiver<Event> {
        let sender = self
            .channels
            .entry(room)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send a notification. No-op if nobody is listening.
    pub fn send(&self, room: RoomNumber, event: &Event) {
        if let Some(sender) = self.channels.get(&room) {
            let _ = sender.send(event.clone());
        }
    }

    pub fn send_to_rooms(&self, rooms: &[RoomNumber], event: &Event) {
        for &room in rooms {
            self.send(room, event);
        }
    }

    /// Send to every room that has a channel.
    pub fn send_all(&self, event: &Event) {
        for entry in self.channels.iter() {
            let _ = entry.value().send(event.clone());
        }
    }

    /// Drop channels whose receivers are all gone.
    pub fn prune(&self) {
        self.channels.retain(|_, sender| sender.receiver_count() > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribe_and_receive() {
        let hub = NotifyHub::new();
        let mut rx = hub.subscribe(101);

        let event = Event::RoomsOccupied { rooms: vec![101] };
        hub.send_to_rooms(&[101, 102], &event);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn send_without_subscribers_is_noop() {
        let hub = NotifyHub::new();
        // No subscriber, must not panic
        hub.send(101, &Event::InventoryReset);
    }

    #[tokio::test]
    async fn send_all_reaches_every_room() {
        let hub = NotifyHub::new();
        let mut a = hub.subscribe(101);
        let mut b = hub.subscribe(1007);

        hub.send_all(&Event::InventoryReset);
        assert_eq!(a.recv().await.unwrap(), Event::InventoryReset);
        assert_eq!(b.recv().await.unwrap(), Event::InventoryReset);
    }

    #[tokio::test]
    async fn other_rooms_not_notified() {
        let hub = NotifyHub::new();
        let mut rx = hub.subscribe(305);
        hub.send_to_rooms(&[101], &Event::RoomsOccupied { rooms: vec![101] });
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn prune_drops_dead_channels() {
        let hub = NotifyHub::new();
        let rx = hub.subscribe(101);
        let _keep = hub.subscribe(102);
        drop(rx);
        hub.prune();
        assert_eq!(hub.channels.len(), 1);
        assert!(hub.channels.contains_key(&102));
    }
}
