//! Live updates for the notes list
//!
//! Every committed create, update, or delete publishes one event to the
//! shared notes-list topic. Delivery is fire-and-forget: publishing never
//! blocks the response path, and subscribers that lag behind the channel
//! capacity miss events instead of slowing anyone down.

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::notes::Note;

/// Capacity of the notes-list channel, per subscriber
const CHANNEL_CAPACITY: usize = 100;

/// A change to the notes list, as seen by subscribers
#[derive(Clone, Debug)]
pub enum NoteEvent {
    /// A new note was created, append it to the list
    Append(Note),

    /// An existing note changed, replace its list item
    Replace(Note),

    /// A note was deleted, remove its list item
    Remove(Uuid),
}

/// The notes-list topic
///
/// Cloning shares the underlying channel, all clones publish to the same
/// subscribers
#[derive(Clone, Debug)]
pub struct Broadcaster {
    sender: broadcast::Sender<NoteEvent>,
}

impl Broadcaster {
    /// Create a new topic without subscribers
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);

        Self { sender }
    }

    /// Subscribe to the topic
    ///
    /// Only events published after this call are received
    pub fn subscribe(&self) -> broadcast::Receiver<NoteEvent> {
        self.sender.subscribe()
    }

    /// Publish a created note
    pub fn publish_append(&self, note: &Note) {
        self.publish(NoteEvent::Append(note.clone()));
    }

    /// Publish an updated note
    pub fn publish_replace(&self, note: &Note) {
        self.publish(NoteEvent::Replace(note.clone()));
    }

    /// Publish a deleted note
    pub fn publish_remove(&self, id: &Uuid) {
        self.publish(NoteEvent::Remove(*id));
    }

    fn publish(&self, event: NoteEvent) {
        // a send only fails when nobody is subscribed
        if self.sender.send(event).is_err() {
            tracing::trace!("No subscribers on the notes list");
        }
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}
