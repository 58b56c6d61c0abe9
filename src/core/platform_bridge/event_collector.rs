//=========================================================================
// Event Collector
//=========================================================================
//
// Controller-side end of the bridge channels, drained once per frame.
//
// Architecture:
//   window Receiver ─┐                  ┌─ key batches   → tick()
//                    ├─ collect_frame() ┼─ touch (folded) → set_touch()
//   UI Receiver ─────┘                  ├─ mode / tour    → set_mode() / request_tour()
//                                       └─ TickControl
//
// At most MAX_EVENTS_PER_FRAME messages are taken from each channel per
// frame so a flooding overlay cannot stall the redraw; the rest wait a
// frame. Touch patches are last-write-wins per axis, so one folded patch
// per frame carries the same state as the sequence.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::events::TourCommand;
use crate::core::input::{InputEvent, TouchPatch};
use crate::core::motion::NavigationMode;

const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Whether the frame loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    window: Receiver<PlatformEvent>,
    ui: Receiver<PlatformEvent>,

    key_batches: Vec<Vec<InputEvent>>,
    touch: Option<TouchPatch>,
    mode: Option<NavigationMode>,
    tour: Vec<TourCommand>,
}

impl EventCollector {
    pub(crate) fn new(window: Receiver<PlatformEvent>, ui: Receiver<PlatformEvent>) -> Self {
        Self {
            window,
            ui,
            key_batches: Vec::with_capacity(4),
            touch: None,
            mode: None,
            tour: Vec::new(),
        }
    }

    /// Sorts this frame's messages from both channels.
    ///
    /// Returns `Exit` on `WindowClosed` or once the window side is gone.
    /// The UI side closing (every `InputSender` dropped) is not an exit.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.key_batches.clear();
        self.touch = None;
        self.mode = None;
        self.tour.clear();

        if self.drain(Source::Window) == TickControl::Exit {
            return TickControl::Exit;
        }
        self.drain(Source::Ui)
    }

    /// Keyboard/focus batches, in arrival order.
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.key_batches
    }

    /// This frame's touch updates folded into one patch.
    pub(crate) fn touch_patch(&self) -> Option<TouchPatch> {
        self.touch
    }

    /// Last mode requested this frame.
    pub(crate) fn mode(&self) -> Option<NavigationMode> {
        self.mode
    }

    /// Tour commands, oldest first.
    pub(crate) fn tour_commands(&self) -> &[TourCommand] {
        &self.tour
    }

    //--- Internal Helpers -------------------------------------------------

    fn drain(&mut self, source: Source) -> TickControl {
        let receiver = match source {
            Source::Window => &self.window,
            Source::Ui => &self.ui,
        };

        let mut events = Vec::new();
        let mut control = TickControl::Continue;
        while events.len() < MAX_EVENTS_PER_FRAME {
            match receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if source == Source::Window {
                        control = TickControl::Exit;
                    }
                    break;
                }
            }
        }

        if events.len() == MAX_EVENTS_PER_FRAME && !receiver.is_empty() {
            warn!(
                target: "platform",
                "{:?} backlog: {} events this frame, {} left for the next",
                source,
                MAX_EVENTS_PER_FRAME,
                receiver.len()
            );
        }

        for event in events {
            if self.sort(event) == TickControl::Exit {
                return TickControl::Exit;
            }
        }
        control
    }

    fn sort(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs(events) if events.is_empty() => {}
            PlatformEvent::Inputs(events) => self.key_batches.push(events),
            PlatformEvent::Touch(patch) => {
                self.touch = Some(match self.touch {
                    Some(earlier) => earlier.then(patch),
                    None => patch,
                });
            }
            PlatformEvent::Mode(mode) => self.mode = Some(mode),
            PlatformEvent::Tour(command) => {
                trace!(target: "platform::input", "Tour command received: {:?}", command);
                self.tour.push(command);
            }
            PlatformEvent::WindowClosed => return TickControl::Exit,
        }
        TickControl::Continue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Window,
    Ui,
}

//=========================================================================
// Unit Tests
//=========================================================================
