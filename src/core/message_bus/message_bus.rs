//=========================================================================
// Message Bus
//=========================================================================
//
// Typed per-frame message bus between the controller and its consumers.
//
// Architecture:
//   Subsystems → push<M>() → HashMap<TypeId, Vec<M>>
//                                  ↓
//   UI / renderer / tests ← read<M>() (shared, any number of readers)
//                                  ↓
//   Controller ───────────→ clear<NavigationEvent>() at the next frame start
//
// Two message kinds flow through it: outgoing notifications
// (NavigationEvent) and incoming commands from UI buttons (TourCommand).
// Commands are drained with take<M>() so each is applied exactly once.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use log::error;

//=== Internal Dependencies ===============================================

use super::message_queue::MessageQueue;

//=== Public API ==========================================================

/// Marker trait for types that can be sent through the MessageBus.
///
/// Automatically implemented for all types that are Send + 'static.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=========================================================================

/// Per-type message queues with frame-scoped lifetime.
///
/// # Examples
///
/// ```
/// use campus_tour::core::message_bus::MessageBus;
///
/// #[derive(Debug, PartialEq)]
/// struct Arrived(usize);
///
/// let mut bus = MessageBus::new();
/// bus.push(Arrived(2));
///
/// assert_eq!(bus.read::<Arrived>(), &[Arrived(2)]);
/// bus.clear_all();
/// assert!(bus.read::<Arrived>().is_empty());
/// ```
#[derive(Default)]
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    /// Creates a new empty message bus.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Message Operations -----------------------------------------------

    /// Appends a message to the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        match self.queue_mut::<M>() {
            Some(queue) => queue.push(msg),
            None => error!(
                target: "nav::controller",
                "Message queue for {} has the wrong element type, message dropped",
                std::any::type_name::<M>()
            ),
        }
    }

    /// Returns all messages of type M queued this frame, in push order.
    ///
    /// Reading does not consume; every consumer sees the same slice until
    /// the queue is cleared.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Removes and returns all messages of type M, in push order.
    ///
    /// The queue keeps its allocation for the next frame.
    pub fn take<M: Message>(&mut self) -> Vec<M> {
        self.queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
            .map(|v| v.drain(..).collect())
            .unwrap_or_default()
    }

    //--- Query API --------------------------------------------------------

    /// Returns true if there are any messages of type M queued.
    pub fn has_messages<M: Message>(&self) -> bool {
        !self.read::<M>().is_empty()
    }

    /// Returns the number of messages of type M currently queued.
    pub fn count<M: Message>(&self) -> usize {
        self.read::<M>().len()
    }

    //--- Clearing ---------------------------------------------------------

    /// Clears all messages of type M, preserving allocated capacity.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears every queue, preserving entries and capacity.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue_mut<M: Message>(&mut self) -> Option<&mut Vec<M>> {
        self.queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()))
            .as_any_mut()
            .downcast_mut::<Vec<M>>()
    }
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending: usize = self.queues.values().map(|q| q.len()).sum();
        f.debug_struct("MessageBus")
            .field("queues", &self.queues.len())
            .field("pending", &pending)
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Clone)]
    struct ZoneNotice {
        id: String,
    }

    #[derive(Debug, PartialEq, Clone, Copy)]
    enum Command {
        Next,
        GoTo(usize),
    }

    fn notice(id: &str) -> ZoneNotice {
        ZoneNotice { id: id.to_string() }
    }

    //=====================================================================
    // Push / Read
    //=====================================================================

    #[test]
    fn new_bus_is_empty() {
        let bus = MessageBus::new();
        assert!(!bus.has_messages::<ZoneNotice>());
        assert_eq!(bus.count::<ZoneNotice>(), 0);
        assert!(bus.read::<ZoneNotice>().is_empty());
    }

    #[test]
    fn read_preserves_push_order() {
        let mut bus = MessageBus::new();
        bus.push(notice("library"));
        bus.push(notice("main"));

        let ids: Vec<_> = bus.read::<ZoneNotice>().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["library", "main"]);
    }

    #[test]
    fn separate_queues_per_type() {
        let mut bus = MessageBus::new();
        bus.push(notice("main"));
        bus.push(Command::Next);
        bus.push(Command::GoTo(3));

        assert_eq!(bus.count::<ZoneNotice>(), 1);
        assert_eq!(bus.count::<Command>(), 2);
    }

    #[test]
    fn multiple_readers_see_same_messages() {
        let mut bus = MessageBus::new();
        bus.push(notice("main"));

        assert_eq!(bus.read::<ZoneNotice>().len(), 1);
        assert_eq!(bus.read::<ZoneNotice>().len(), 1, "Reading must not consume");
    }

    //=====================================================================
    // Take
    //=====================================================================

    #[test]
    fn take_drains_in_order() {
        let mut bus = MessageBus::new();
        bus.push(Command::GoTo(1));
        bus.push(Command::Next);

        assert_eq!(bus.take::<Command>(), vec![Command::GoTo(1), Command::Next]);
        assert!(bus.take::<Command>().is_empty());
    }

    #[test]
    fn take_unknown_type_is_empty() {
        let mut bus = MessageBus::new();
        assert!(bus.take::<Command>().is_empty());
    }

    //=====================================================================
    // Clearing
    //=====================================================================

    #[test]
    fn clear_only_affects_one_type() {
        let mut bus = MessageBus::new();
        bus.push(notice("main"));
        bus.push(Command::Next);

        bus.clear::<ZoneNotice>();

        assert!(!bus.has_messages::<ZoneNotice>());
        assert!(bus.has_messages::<Command>());
    }

    #[test]
    fn clear_all_then_reuse() {
        let mut bus = MessageBus::new();
        for i in 0..20 {
            bus.push(Command::GoTo(i));
        }

        bus.clear_all();
        assert_eq!(bus.count::<Command>(), 0);

        bus.push(Command::Next);
        assert_eq!(bus.read::<Command>(), &[Command::Next]);
    }

    #[test]
    fn debug_reports_pending_count() {
        let mut bus = MessageBus::new();
        bus.push(Command::Next);
        assert!(format!("{:?}", bus).contains("pending: 1"));
    }
}
