//=========================================================================
// Message Bus
//
// Frame-scoped typed queues: notifications out of the controller,
// commands into it.
//
//=========================================================================

mod message_bus;
mod message_queue;

pub use message_bus::{Message, MessageBus};
