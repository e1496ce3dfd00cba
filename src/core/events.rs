use crate::core::ObjectId;
use std::collections::VecDeque;

/// Types of object events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectEventType {
    /// An object has been added to the manager
    Added,

    /// An object has been removed from the manager
    Removed,

    /// An object's motion type has been changed through the manager
    MotionTypeChanged,

    /// The dynamics engine moved an object
    TransformChanged,

    /// An object has gone to sleep
    Sleep,

    /// An object has been awakened
    Awake,
}

/// An event related to a single object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectEvent {
    /// The type of object event
    pub event_type: ObjectEventType,

    /// The object that the event refers to
    pub object: ObjectId,
}

/// A queue of physics events, oldest first
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<ObjectEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    pub(crate) fn push(&mut self, event_type: ObjectEventType, object: ObjectId) {
        self.events.push_back(ObjectEvent { event_type, object });
    }

    /// Gets the next event from the queue
    pub fn next_event(&mut self) -> Option<ObjectEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Removes and returns every queued event
    pub fn drain(&mut self) -> impl Iterator<Item = ObjectEvent> + '_ {
        self.events.drain(..)
    }

    /// Gets all events of a specific type
    pub fn get_events_of_type(&self, event_type: ObjectEventType) -> Vec<&ObjectEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Gets all events for a specific object
    pub fn get_events_for_object(&self, object: ObjectId) -> Vec<&ObjectEvent> {
        self.events
            .iter()
            .filter(|e| e.object == object)
            .collect()
    }
}
