use crate::config::MotionConfig;
use crate::input::{Channels, InputEvent, InputHub, InputSample, Subscription};
use crate::sampler::ViewportSize;
use crate::scheduler::{FrameRegistration, FrameReport, FrameScheduler, FrameTask};
use crate::telemetry::{log_event, LogLevel};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

/// A visual element driven by the frame loop.
pub trait MotionElement: FrameTask {
    /// Input channels the element listens to. Elements fed directly by their
    /// own DOM events return [`Channels::NONE`].
    fn channels(&self) -> Channels;

    fn on_input(&mut self, sample: &InputSample);

    /// Called once at mount with the current input, before any frame.
    fn seed(&mut self, sample: &InputSample) {
        self.on_input(sample);
    }
}

/// Keeps an element subscribed and scheduled. Dropping it detaches both,
/// synchronously.
pub struct Mount {
    subscription: Option<Subscription>,
    registration: FrameRegistration,
}

impl Mount {
    pub fn is_active(&self) -> bool {
        self.registration.is_active()
            && self
                .subscription
                .as_ref()
                .map_or(true, Subscription::is_active)
    }
}

/// Input hub plus frame scheduler, shared by every element on the page.
#[derive(Clone)]
pub struct MotionRuntime {
    scheduler: FrameScheduler,
    config: Rc<MotionConfig>,
    reduced_motion: bool,
}

impl PartialEq for MotionRuntime {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
    }
}

impl MotionRuntime {
    pub fn new(viewport: ViewportSize, config: MotionConfig, reduced_motion: bool) -> Self {
        let scheduler = FrameScheduler::new(InputHub::new(viewport), config.max_frame_delta);
        Self {
            scheduler,
            config: Rc::new(config),
            reduced_motion,
        }
    }

    pub fn hub(&self) -> &InputHub {
        self.scheduler.hub()
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Commits input that exists before the first element mounts, such as a
    /// scroll position restored on reload, so elements seed from it instead
    /// of animating toward it.
    pub fn prime(&self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.hub().dispatch(event);
        }
        self.hub().flush();
    }

    pub fn mount<E>(&self, element: Rc<RefCell<E>>) -> Mount
    where
        E: MotionElement + 'static,
    {
        let channels = element.borrow().channels();
        element.borrow_mut().seed(&self.hub().snapshot());

        let subscription = (!channels.is_empty()).then(|| {
            let listener = Rc::clone(&element);
            self.hub()
                .subscribe(channels, move |sample| listener.borrow_mut().on_input(sample))
        });
        let registration = self.scheduler.register(element);

        log_event(
            LogLevel::Debug,
            "element_mounted",
            json!({
                "listeners": self.listener_count(),
                "scheduled": self.scheduled_count(),
            }),
        );

        Mount {
            subscription,
            registration,
        }
    }

    /// Wakes settled elements after a change that did not come through the
    /// hub, such as a hover flag or a card-local pointer move.
    pub fn wake(&self) {
        self.scheduler.wake_all();
    }

    pub fn tick(&self, now_ms: f64) -> FrameReport {
        self.scheduler.tick(now_ms)
    }

    pub fn needs_frame(&self) -> bool {
        self.scheduler.needs_frame()
    }

    pub fn reset_clock(&self) {
        self.scheduler.reset_clock();
    }

    pub fn listener_count(&self) -> usize {
        self.hub().listener_count()
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduler.scheduled_count()
    }
}
