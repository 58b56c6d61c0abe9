//=========================================================================
// Input Buffer
//
// Collects keyboard/focus events between two redraws so they cross the
// bridge channel as one ordered batch per frame.
//
// Responsibilities:
// - Preserve arrival order (a tap inside one frame is down then up)
// - Drop consecutive duplicates
// - Hand the whole frame over via `drain()`
// - Take back undelivered batches via `requeue()`
//
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

/// Transient event store for one frame of input.
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    /// Appends an event unless it repeats the previous one.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    /// Takes this frame's events, or `None` if nothing arrived.
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.events.is_empty() {
            return None;
        }
        let capacity = self.events.capacity();
        Some(std::mem::replace(&mut self.events, Vec::with_capacity(capacity)))
    }

    /// Puts back a batch that could not be delivered, ahead of anything
    /// buffered since.
    pub(crate) fn requeue(&mut self, mut batch: Vec<InputEvent>) {
        for event in self.events.drain(..) {
            if batch.last() != Some(&event) {
                batch.push(event);
            }
        }
        self.events = batch;
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    #[test]
    fn consecutive_duplicates_are_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::KeyDown(KeyCode::KeyA));
        buffer.push(InputEvent::KeyDown(KeyCode::KeyA));
        buffer.push(InputEvent::KeyDown(KeyCode::KeyB));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn order_is_preserved() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::KeyDown(KeyCode::Space));
        buffer.push(InputEvent::KeyUp(KeyCode::Space));

        assert_eq!(
            buffer.drain(),
            Some(vec![InputEvent::KeyDown(KeyCode::Space), InputEvent::KeyUp(KeyCode::Space)])
        );
    }

    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::FocusLost);

        assert!(buffer.drain().is_some());
        assert_eq!(buffer.len(), 0);
        assert!(buffer.drain().is_none(), "Empty frames produce no batch");
    }

    #[test]
    fn requeued_batch_goes_first() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::KeyUp(KeyCode::KeyW));
        let undelivered = buffer.drain().unwrap_or_default();

        buffer.push(InputEvent::KeyDown(KeyCode::KeyA));
        buffer.requeue(undelivered);

        assert_eq!(
            buffer.drain(),
            Some(vec![InputEvent::KeyUp(KeyCode::KeyW), InputEvent::KeyDown(KeyCode::KeyA)])
        );
    }
}
