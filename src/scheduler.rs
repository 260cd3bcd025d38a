use crate::input::InputHub;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

const FIRST_FRAME_DELTA: f64 = 1.0 / 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    Animating,
    Settled,
}

/// Per-frame work for one visual element: smoothing, mapping and writing the
/// result to its render target.
pub trait FrameTask {
    fn advance(&mut self, dt: f64) -> Activity;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub dt: f64,
    pub input_changed: bool,
    pub advanced: usize,
    pub animating: usize,
}

struct TaskSlot {
    task: Rc<RefCell<dyn FrameTask>>,
    awake: bool,
}

struct SchedulerState {
    tasks: BTreeMap<u64, TaskSlot>,
    next_id: u64,
    frame: u64,
    last_timestamp_ms: Option<f64>,
}

/// Within a tick the input hub is flushed (and its listeners notified)
/// before any task advances. Tasks that report [`Activity::Settled`] are
/// skipped until the next input change.
#[derive(Clone)]
pub struct FrameScheduler {
    hub: InputHub,
    max_frame_delta: f64,
    state: Rc<RefCell<SchedulerState>>,
}

impl FrameScheduler {
    pub fn new(hub: InputHub, max_frame_delta: f64) -> Self {
        Self {
            hub,
            max_frame_delta,
            state: Rc::new(RefCell::new(SchedulerState {
                tasks: BTreeMap::new(),
                next_id: 1,
                frame: 0,
                last_timestamp_ms: None,
            })),
        }
    }

    pub fn hub(&self) -> &InputHub {
        &self.hub
    }

    pub fn register(&self, task: Rc<RefCell<dyn FrameTask>>) -> FrameRegistration {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.tasks.insert(id, TaskSlot { task, awake: true });

        FrameRegistration {
            id,
            scheduler: Rc::downgrade(&self.state),
        }
    }

    pub fn scheduled_count(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    pub fn needs_frame(&self) -> bool {
        self.state.borrow().tasks.values().any(|slot| slot.awake)
    }

    pub fn wake_all(&self) {
        for slot in self.state.borrow_mut().tasks.values_mut() {
            slot.awake = true;
        }
    }

    /// Forgets the previous timestamp so the next tick uses a nominal step,
    /// e.g. after the loop was paused.
    pub fn reset_clock(&self) {
        self.state.borrow_mut().last_timestamp_ms = None;
    }

    pub fn tick(&self, now_ms: f64) -> FrameReport {
        let (frame, dt) = {
            let mut state = self.state.borrow_mut();
            state.frame += 1;
            let dt = match state.last_timestamp_ms {
                Some(last) => ((now_ms - last) / 1_000.0).clamp(0.0, self.max_frame_delta),
                None => FIRST_FRAME_DELTA.min(self.max_frame_delta),
            };
            state.last_timestamp_ms = Some(now_ms);
            (state.frame, dt)
        };

        let input_changed = self.hub.flush().is_some();
        if input_changed {
            self.wake_all();
        }

        let awake: Vec<u64> = self
            .state
            .borrow()
            .tasks
            .iter()
            .filter(|(_, slot)| slot.awake)
            .map(|(id, _)| *id)
            .collect();

        let mut report = FrameReport {
            frame,
            dt,
            input_changed,
            ..FrameReport::default()
        };

        for id in awake {
            let task = self
                .state
                .borrow()
                .tasks
                .get(&id)
                .map(|slot| Rc::clone(&slot.task));
            let Some(task) = task else {
                continue;
            };

            let activity = task.borrow_mut().advance(dt);
            report.advanced += 1;

            if activity == Activity::Animating {
                report.animating += 1;
            } else if let Some(slot) = self.state.borrow_mut().tasks.get_mut(&id) {
                slot.awake = false;
            }
        }

        report
    }
}

/// Unregisters its task when cancelled or dropped.
pub struct FrameRegistration {
    id: u64,
    scheduler: Weak<RefCell<SchedulerState>>,
}

impl FrameRegistration {
    pub fn cancel(self) {}

    pub fn is_active(&self) -> bool {
        self.scheduler
            .upgrade()
            .is_some_and(|state| state.borrow().tasks.contains_key(&self.id))
    }
}

impl Drop for FrameRegistration {
    fn drop(&mut self) {
        let Some(state) = self.scheduler.upgrade() else {
            return;
        };
        let removed = state.borrow_mut().tasks.remove(&self.id);
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Channels, InputEvent};
    use crate::sampler::ViewportSize;

    struct Countdown {
        remaining: usize,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl FrameTask for Countdown {
        fn advance(&mut self, dt: f64) -> Activity {
            self.log.borrow_mut().push(format!("advance {dt:.4}"));
            if self.remaining == 0 {
                return Activity::Settled;
            }
            self.remaining -= 1;
            Activity::Animating
        }
    }

    fn scheduler() -> FrameScheduler {
        FrameScheduler::new(InputHub::new(ViewportSize::new(1000.0, 800.0)), 0.1)
    }

    fn countdown(remaining: usize, log: &Rc<RefCell<Vec<String>>>) -> Rc<RefCell<Countdown>> {
        Rc::new(RefCell::new(Countdown {
            remaining,
            log: Rc::clone(log),
        }))
    }

    #[test]
    fn input_is_flushed_before_tasks_advance() {
        let scheduler = scheduler();
        let log = Rc::new(RefCell::new(Vec::new()));

        let listener_log = Rc::clone(&log);
        let _subscription = scheduler
            .hub()
            .subscribe(Channels::POINTER, move |_| listener_log.borrow_mut().push("input".into()));
        let _registration = scheduler.register(countdown(5, &log));

        scheduler.hub().dispatch(InputEvent::PointerMove {
            client_x: 1.0,
            client_y: 1.0,
        });
        scheduler.tick(0.0);

        assert_eq!(*log.borrow(), vec!["input".to_string(), "advance 0.0167".to_string()]);
    }

    #[test]
    fn time_step_is_measured_and_clamped() {
        let scheduler = scheduler();
        let log = Rc::new(RefCell::new(Vec::new()));
        let _registration = scheduler.register(countdown(10, &log));

        scheduler.tick(1_000.0);
        let normal = scheduler.tick(1_020.0);
        let stalled = scheduler.tick(9_000.0);
        let backwards = scheduler.tick(8_000.0);

        assert!((normal.dt - 0.02).abs() < 1e-12);
        assert_eq!(stalled.dt, 0.1);
        assert_eq!(backwards.dt, 0.0);
    }

    #[test]
    fn settled_tasks_sleep_until_input_changes() {
        let scheduler = scheduler();
        let log = Rc::new(RefCell::new(Vec::new()));
        let _registration = scheduler.register(countdown(1, &log));

        assert_eq!(scheduler.tick(0.0).animating, 1);
        assert_eq!(scheduler.tick(16.0).advanced, 1);
        assert!(!scheduler.needs_frame());
        assert_eq!(scheduler.tick(32.0).advanced, 0);

        scheduler.hub().dispatch(InputEvent::Scroll {
            offset: 40.0,
            document_height: 2_000.0,
        });
        let woken = scheduler.tick(48.0);

        assert!(woken.input_changed);
        assert_eq!(woken.advanced, 1);
    }

    #[test]
    fn dropped_registration_is_never_advanced_again() {
        let scheduler = scheduler();
        let log = Rc::new(RefCell::new(Vec::new()));
        let registration = scheduler.register(countdown(100, &log));
        scheduler.tick(0.0);
        assert_eq!(scheduler.scheduled_count(), 1);
        assert!(registration.is_active());

        registration.cancel();
        let before = log.borrow().len();
        let report = scheduler.tick(16.0);

        assert_eq!(scheduler.scheduled_count(), 0);
        assert_eq!(report.advanced, 0);
        assert_eq!(log.borrow().len(), before);
        assert!(!scheduler.needs_frame());
    }
}
