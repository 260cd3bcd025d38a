//! Page-wide input state.
//!
//! The frontend forwards window events to one [`InputHub`]; visual elements
//! subscribe to it instead of attaching their own window listeners. Raw
//! events are only recorded on dispatch and committed by [`InputHub::flush`],
//! which runs once at the start of every frame.

use crate::sampler::{PointerOffset, PointerSampler, ScrollSampler, ViewportSize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove { client_x: f64, client_y: f64 },
    PointerLeave,
    Scroll { offset: f64, document_height: f64 },
    Resize { width: f64, height: f64 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Channels {
    pub pointer: bool,
    pub scroll: bool,
    pub viewport: bool,
}

impl Channels {
    pub const NONE: Self = Self {
        pointer: false,
        scroll: false,
        viewport: false,
    };
    pub const POINTER: Self = Self {
        pointer: true,
        scroll: false,
        viewport: false,
    };
    pub const SCROLL: Self = Self {
        pointer: false,
        scroll: true,
        viewport: false,
    };
    pub const VIEWPORT: Self = Self {
        pointer: false,
        scroll: false,
        viewport: true,
    };

    pub fn union(self, other: Self) -> Self {
        Self {
            pointer: self.pointer || other.pointer,
            scroll: self.scroll || other.scroll,
            viewport: self.viewport || other.viewport,
        }
    }

    pub fn intersects(self, other: Self) -> bool {
        (self.pointer && other.pointer)
            || (self.scroll && other.scroll)
            || (self.viewport && other.viewport)
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

/// Committed input state as seen by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSample {
    pub frame: u64,
    pub pointer: PointerOffset,
    pub scroll_offset: f64,
    pub scroll_progress: f64,
    pub viewport: ViewportSize,
    pub changed: Channels,
}

type Callback = Rc<RefCell<dyn FnMut(&InputSample)>>;

struct Listener {
    channels: Channels,
    callback: Callback,
}

struct HubState {
    pointer: PointerSampler,
    scroll: ScrollSampler,
    viewport: ViewportSize,
    pending_viewport: Option<ViewportSize>,
    pointer_left: bool,
    listeners: BTreeMap<u64, Listener>,
    next_id: u64,
    frame: u64,
}

impl HubState {
    fn sample(&self, changed: Channels) -> InputSample {
        InputSample {
            frame: self.frame,
            pointer: self.pointer.latest(),
            scroll_offset: self.scroll.offset(),
            scroll_progress: self.scroll.progress(),
            viewport: self.viewport,
            changed,
        }
    }

    fn commit(&mut self) -> Channels {
        let mut changed = Channels::NONE;

        if let Some(viewport) = self.pending_viewport.take() {
            if viewport != self.viewport {
                self.viewport = viewport;
                changed.viewport = true;
                changed.pointer |= self.pointer.resize(viewport).is_some();
                changed.scroll |= self.scroll.resize(viewport.height);
            }
        }

        if self.pointer_left {
            self.pointer_left = false;
            changed.pointer |= self.pointer.reset().is_some();
        } else {
            changed.pointer |= self.pointer.commit().is_some();
        }

        changed.scroll |= self.scroll.commit();
        changed
    }
}

#[derive(Clone)]
pub struct InputHub {
    state: Rc<RefCell<HubState>>,
}

impl InputHub {
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            state: Rc::new(RefCell::new(HubState {
                pointer: PointerSampler::new(viewport),
                scroll: ScrollSampler::new(viewport.height),
                viewport,
                pending_viewport: None,
                pointer_left: false,
                listeners: BTreeMap::new(),
                next_id: 1,
                frame: 0,
            })),
        }
    }

    /// Records a raw event. Nothing is recomputed until the next flush.
    pub fn dispatch(&self, event: InputEvent) {
        let mut state = self.state.borrow_mut();
        match event {
            InputEvent::PointerMove { client_x, client_y } => {
                state.pointer_left = false;
                state.pointer.record(client_x, client_y);
            }
            InputEvent::PointerLeave => state.pointer_left = true,
            InputEvent::Scroll {
                offset,
                document_height,
            } => state.scroll.record(offset, document_height),
            InputEvent::Resize { width, height } => {
                state.pending_viewport = Some(ViewportSize::new(width, height));
            }
        }
    }

    pub fn subscribe<F>(&self, channels: Channels, callback: F) -> Subscription
    where
        F: FnMut(&InputSample) + 'static,
    {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.insert(
            id,
            Listener {
                channels,
                callback: Rc::new(RefCell::new(callback)),
            },
        );

        Subscription {
            id,
            hub: Rc::downgrade(&self.state),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn snapshot(&self) -> InputSample {
        self.state.borrow().sample(Channels::NONE)
    }

    /// Commits pending samples and notifies the listeners whose channels
    /// changed. Returns `None` when nothing changed this frame.
    pub fn flush(&self) -> Option<InputSample> {
        let (sample, recipients) = {
            let mut state = self.state.borrow_mut();
            state.frame += 1;
            let changed = state.commit();
            if changed.is_empty() {
                return None;
            }

            let recipients: Vec<u64> = state
                .listeners
                .iter()
                .filter(|(_, listener)| listener.channels.intersects(changed))
                .map(|(id, _)| *id)
                .collect();
            (state.sample(changed), recipients)
        };

        for id in recipients {
            // A listener cancelled by an earlier callback in this flush must
            // not see the sample.
            let callback = self
                .state
                .borrow()
                .listeners
                .get(&id)
                .map(|listener| Rc::clone(&listener.callback));

            if let Some(callback) = callback {
                (callback.borrow_mut())(&sample);
            }
        }

        Some(sample)
    }
}

/// Removes its listener when cancelled or dropped.
pub struct Subscription {
    id: u64,
    hub: Weak<RefCell<HubState>>,
}

impl Subscription {
    pub fn cancel(self) {}

    pub fn is_active(&self) -> bool {
        self.hub
            .upgrade()
            .is_some_and(|state| state.borrow().listeners.contains_key(&self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(state) = self.hub.upgrade() else {
            return;
        };
        // The listener is dropped after the borrow ends; its closure may own
        // other subscriptions.
        let removed = state.borrow_mut().listeners.remove(&self.id);
        drop(removed);
    }
}
