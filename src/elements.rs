//! Visual elements: each one turns committed input into a [`Transform`] per
//! frame and hands it to a [`Sink`] that writes the render target.

use crate::error::MotionError;
use crate::input::{Channels, InputSample};
use crate::mapper::RangeMap;
use crate::runtime::MotionElement;
use crate::sampler::{ElementRect, PointerOffset, ViewportSize};
use crate::scheduler::{Activity, FrameTask};
use crate::spring::{Spring, Spring2, SpringConfig, SpringPhase};
use crate::timeline::Timeline;
use crate::transform::Transform;

/// Receives an element's output whenever it changes.
pub type Sink<T> = Box<dyn FnMut(&T)>;

const TILT_INPUT: (f64, f64) = (-0.5, 0.5);
const TILT_DEGREES: f64 = 7.0;
const HEADER_FADE_DISTANCE: (f64, f64) = (0.0, 100.0);
const HEADER_OPACITY: (f64, f64) = (0.95, 0.98);
const HEADER_BLUR_PX: (f64, f64) = (8.0, 16.0);

fn activity(phase: SpringPhase) -> Activity {
    if phase.is_animating() {
        Activity::Animating
    } else {
        Activity::Settled
    }
}

fn emit<T: Copy + PartialEq>(last: &mut Option<T>, next: T, sink: &mut Sink<T>) {
    if last.as_ref() == Some(&next) {
        return;
    }
    *last = Some(next);
    sink(&next);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParallaxDepth {
    Heavy,
    Light,
    VeryLight,
}

impl ParallaxDepth {
    pub const ALL: [Self; 3] = [Self::Heavy, Self::Light, Self::VeryLight];

    /// Largest offset in px, reached with the pointer at a viewport edge.
    pub fn amplitude(self) -> f64 {
        match self {
            Self::Heavy => 20.0,
            Self::Light => 10.0,
            Self::VeryLight => 5.0,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Heavy => 0,
            Self::Light => 1,
            Self::VeryLight => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParallaxFrame {
    layers: [Transform; 3],
}

impl ParallaxFrame {
    pub fn layer(&self, depth: ParallaxDepth) -> Transform {
        self.layers[depth.index()]
    }
}

#[derive(Clone, Copy, Debug)]
struct DepthMap {
    x: RangeMap,
    y: RangeMap,
}

impl DepthMap {
    fn for_viewport(viewport: ViewportSize, depth: ParallaxDepth) -> Result<Self, MotionError> {
        let (half_width, half_height) = viewport.half_extents();
        Ok(Self {
            x: RangeMap::symmetric(half_width, depth.amplitude())?,
            y: RangeMap::symmetric(half_height, depth.amplitude())?,
        })
    }

    fn apply(&self, (x, y): (f64, f64)) -> Transform {
        Transform::translate(self.x.apply(x), self.y.apply(y))
    }
}

fn depth_maps(viewport: ViewportSize) -> Result<[DepthMap; 3], MotionError> {
    Ok([
        DepthMap::for_viewport(viewport, ParallaxDepth::Heavy)?,
        DepthMap::for_viewport(viewport, ParallaxDepth::Light)?,
        DepthMap::for_viewport(viewport, ParallaxDepth::VeryLight)?,
    ])
}

/// The maps are unclamped so a pointer outside the viewport (e.g. over a
/// scrollbar) keeps extrapolating instead of sticking at the amplitude.
pub struct HeroParallax {
    spring: Spring2,
    maps: [DepthMap; 3],
    reduced_motion: bool,
    last: Option<ParallaxFrame>,
    sink: Sink<ParallaxFrame>,
}

impl HeroParallax {
    pub fn new(
        viewport: ViewportSize,
        spring: SpringConfig,
        reduced_motion: bool,
        sink: Sink<ParallaxFrame>,
    ) -> Result<Self, MotionError> {
        Ok(Self {
            spring: Spring2::new((0.0, 0.0), spring)?,
            maps: depth_maps(viewport)?,
            reduced_motion,
            last: None,
            sink,
        })
    }

    pub fn frame(&self) -> ParallaxFrame {
        let position = self.spring.position();
        ParallaxFrame {
            layers: self.maps.map(|map| map.apply(position)),
        }
    }

    fn rebuild(&mut self, viewport: ViewportSize) {
        if let Ok(maps) = depth_maps(viewport) {
            self.maps = maps;
        }
    }
}

impl FrameTask for HeroParallax {
    fn advance(&mut self, dt: f64) -> Activity {
        let phase = self.spring.step(dt);
        let frame = self.frame();
        emit(&mut self.last, frame, &mut self.sink);
        activity(phase)
    }
}

impl MotionElement for HeroParallax {
    fn channels(&self) -> Channels {
        Channels::POINTER.union(Channels::VIEWPORT)
    }

    fn on_input(&mut self, sample: &InputSample) {
        if sample.changed.viewport {
            self.rebuild(sample.viewport);
        }
        if !self.reduced_motion {
            self.spring.set_target((sample.pointer.x, sample.pointer.y));
        }
    }

    fn seed(&mut self, sample: &InputSample) {
        self.rebuild(sample.viewport);
        if !self.reduced_motion {
            self.spring.snap((sample.pointer.x, sample.pointer.y));
        }
    }
}

/// The offset is mapped to degrees before smoothing and saturates halfway to
/// an edge. Fed by the card's own mouse events, so the caller wakes the
/// runtime after each one.
pub struct TiltCard {
    angles: Spring2,
    rotate_x: RangeMap,
    rotate_y: RangeMap,
    pending: Option<PointerOffset>,
    reduced_motion: bool,
    last: Option<Transform>,
    sink: Sink<Transform>,
}

impl TiltCard {
    pub fn new(
        spring: SpringConfig,
        reduced_motion: bool,
        sink: Sink<Transform>,
    ) -> Result<Self, MotionError> {
        Ok(Self {
            angles: Spring2::new((0.0, 0.0), spring)?,
            rotate_x: RangeMap::new(TILT_INPUT, (TILT_DEGREES, -TILT_DEGREES))?.clamped(),
            rotate_y: RangeMap::new(TILT_INPUT, (-TILT_DEGREES, TILT_DEGREES))?.clamped(),
            pending: None,
            reduced_motion,
            last: None,
            sink,
        })
    }

    pub fn pointer_move(&mut self, rect: ElementRect, client_x: f64, client_y: f64) {
        self.pending = Some(PointerOffset::relative_to(rect, client_x, client_y));
    }

    pub fn pointer_leave(&mut self) {
        self.pending = Some(PointerOffset::ZERO);
    }

    pub fn transform(&self) -> Transform {
        let (rotate_x, rotate_y) = self.angles.position();
        Transform {
            rotate_x,
            rotate_y,
            ..Transform::IDENTITY
        }
    }
}

impl FrameTask for TiltCard {
    fn advance(&mut self, dt: f64) -> Activity {
        if let Some(offset) = self.pending.take() {
            if !self.reduced_motion {
                self.angles
                    .set_target((self.rotate_x.apply(offset.y), self.rotate_y.apply(offset.x)));
            }
        }
        let phase = self.angles.step(dt);
        let transform = self.transform();
        emit(&mut self.last, transform, &mut self.sink);
        activity(phase)
    }
}

impl MotionElement for TiltCard {
    fn channels(&self) -> Channels {
        Channels::NONE
    }

    fn on_input(&mut self, _sample: &InputSample) {}
}

pub struct ProgressBar {
    spring: Spring,
    scale: RangeMap,
    reduced_motion: bool,
    last: Option<Transform>,
    sink: Sink<Transform>,
}

impl ProgressBar {
    pub fn new(
        spring: SpringConfig,
        reduced_motion: bool,
        sink: Sink<Transform>,
    ) -> Result<Self, MotionError> {
        Ok(Self {
            spring: Spring::new(0.0, spring)?,
            scale: RangeMap::new((0.0, 1.0), (0.0, 1.0))?.clamped(),
            reduced_motion,
            last: None,
            sink,
        })
    }

    pub fn width_percent(&self) -> f64 {
        self.scale.apply(self.spring.position()) * 100.0
    }

    pub fn transform(&self) -> Transform {
        Transform {
            scale_x: self.scale.apply(self.spring.position()),
            ..Transform::IDENTITY
        }
    }
}

impl FrameTask for ProgressBar {
    fn advance(&mut self, dt: f64) -> Activity {
        let phase = self.spring.step(dt);
        let transform = self.transform();
        emit(&mut self.last, transform, &mut self.sink);
        activity(phase)
    }
}

impl MotionElement for ProgressBar {
    fn channels(&self) -> Channels {
        Channels::SCROLL
    }

    fn on_input(&mut self, sample: &InputSample) {
        if self.reduced_motion {
            self.spring.snap(sample.scroll_progress);
        } else {
            self.spring.set_target(sample.scroll_progress);
        }
    }

    fn seed(&mut self, sample: &InputSample) {
        self.spring.snap(sample.scroll_progress);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderFrame {
    pub scrolled: bool,
    pub background_opacity: f64,
    pub blur_px: f64,
}

impl HeaderFrame {
    pub fn to_css(&self) -> String {
        format!(
            "--header-alpha: {:.3}; --header-blur: {:.1}px;",
            self.background_opacity, self.blur_px
        )
    }
}

/// No spring: the stylesheet transitions between frames.
pub struct HeaderChrome {
    threshold: f64,
    opacity: RangeMap,
    blur: RangeMap,
    frame: HeaderFrame,
    last: Option<HeaderFrame>,
    sink: Sink<HeaderFrame>,
}

impl HeaderChrome {
    pub fn new(threshold: f64, sink: Sink<HeaderFrame>) -> Result<Self, MotionError> {
        let opacity = RangeMap::new(HEADER_FADE_DISTANCE, HEADER_OPACITY)?.clamped();
        let blur = RangeMap::new(HEADER_FADE_DISTANCE, HEADER_BLUR_PX)?.clamped();

        Ok(Self {
            threshold,
            frame: HeaderFrame {
                scrolled: false,
                background_opacity: opacity.apply(0.0),
                blur_px: blur.apply(0.0),
            },
            opacity,
            blur,
            last: None,
            sink,
        })
    }

    pub fn frame(&self) -> HeaderFrame {
        self.frame
    }
}

impl FrameTask for HeaderChrome {
    fn advance(&mut self, _dt: f64) -> Activity {
        emit(&mut self.last, self.frame, &mut self.sink);
        Activity::Settled
    }
}

impl MotionElement for HeaderChrome {
    fn channels(&self) -> Channels {
        Channels::SCROLL
    }

    fn on_input(&mut self, sample: &InputSample) {
        let offset = sample.scroll_offset;
        self.frame = HeaderFrame {
            scrolled: offset > self.threshold,
            background_opacity: self.opacity.apply(offset),
            blur_px: self.blur.apply(offset),
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressStyle {
    pub hover_scale: f64,
    pub hover_lift: f64,
    pub tap_scale: f64,
}

impl PressStyle {
    pub const BUTTON: Self = Self {
        hover_scale: 1.05,
        hover_lift: -2.0,
        tap_scale: 0.95,
    };
    pub const SOCIAL: Self = Self {
        hover_scale: 1.1,
        hover_lift: -2.0,
        tap_scale: 0.95,
    };
    pub const LOGO: Self = Self {
        hover_scale: 1.02,
        hover_lift: 0.0,
        tap_scale: 1.0,
    };
    pub const TILE: Self = Self {
        hover_scale: 1.08,
        hover_lift: 0.0,
        tap_scale: 0.95,
    };
}

/// Spring-driven response to hover and press. A press overrides the hover
/// scale; the lift stays while the pointer is over the element.
pub struct PressState {
    style: PressStyle,
    scale: Spring,
    lift: Spring,
    hovered: bool,
    pressed: bool,
    reduced_motion: bool,
    last: Option<Transform>,
    sink: Sink<Transform>,
}

impl PressState {
    pub fn new(
        style: PressStyle,
        spring: SpringConfig,
        reduced_motion: bool,
        sink: Sink<Transform>,
    ) -> Result<Self, MotionError> {
        Ok(Self {
            style,
            scale: Spring::new(1.0, spring)?,
            lift: Spring::new(0.0, spring)?,
            hovered: false,
            pressed: false,
            reduced_motion,
            last: None,
            sink,
        })
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
        if !hovered {
            self.pressed = false;
        }
        self.retarget();
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
        self.retarget();
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translate_y: self.lift.position(),
            scale: self.scale.position(),
            ..Transform::IDENTITY
        }
    }

    fn targets(&self) -> (f64, f64) {
        let lift = if self.hovered { self.style.hover_lift } else { 0.0 };
        let scale = match (self.pressed, self.hovered) {
            (true, _) => self.style.tap_scale,
            (false, true) => self.style.hover_scale,
            (false, false) => 1.0,
        };
        (scale, lift)
    }

    fn retarget(&mut self) {
        let (scale, lift) = self.targets();
        if self.reduced_motion {
            self.scale.snap(scale);
            self.lift.snap(lift);
        } else {
            self.scale.set_target(scale);
            self.lift.set_target(lift);
        }
    }
}

impl FrameTask for PressState {
    fn advance(&mut self, dt: f64) -> Activity {
        let phase = self.scale.step(dt).merge(self.lift.step(dt));
        let transform = self.transform();
        emit(&mut self.last, transform, &mut self.sink);
        activity(phase)
    }
}

impl MotionElement for PressState {
    fn channels(&self) -> Channels {
        Channels::NONE
    }

    fn on_input(&mut self, _sample: &InputSample) {}
}

/// A timeline played against the frame clock, independent of input.
///
/// Looping timelines never settle. Under reduced motion the resting state is
/// written once and the element goes idle.
pub struct Decoration {
    timeline: Timeline,
    base: Transform,
    elapsed: f64,
    enabled: bool,
    playing: bool,
    last: Option<Transform>,
    sink: Sink<Transform>,
}

impl Decoration {
    pub fn new(timeline: Timeline, reduced_motion: bool, sink: Sink<Transform>) -> Self {
        Self {
            timeline,
            base: Transform::IDENTITY,
            elapsed: 0.0,
            enabled: !reduced_motion,
            playing: true,
            last: None,
            sink,
        }
    }

    /// Holds the resting state until [`Decoration::replay`], for animations
    /// triggered by an event rather than by mounting.
    pub fn paused(mut self) -> Self {
        self.playing = false;
        self
    }

    pub fn replay(&mut self) {
        self.elapsed = 0.0;
        self.playing = true;
    }

    pub fn with_base(mut self, base: Transform) -> Self {
        self.base = base;
        self
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn transform(&self) -> Transform {
        let animated = if self.enabled && self.playing {
            self.timeline.sample(self.elapsed)
        } else {
            self.timeline.resting()
        };
        self.base.compose(&animated)
    }
}

impl FrameTask for Decoration {
    fn advance(&mut self, dt: f64) -> Activity {
        let running = self.enabled && self.playing;
        if running {
            self.elapsed += dt;
        }
        let transform = self.transform();
        emit(&mut self.last, transform, &mut self.sink);

        if running && !self.timeline.is_finished(self.elapsed) {
            Activity::Animating
        } else {
            Activity::Settled
        }
    }
}

impl MotionElement for Decoration {
    fn channels(&self) -> Channels {
        Channels::NONE
    }

    fn on_input(&mut self, _sample: &InputSample) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotionConfig;
    use crate::input::InputEvent;
    use crate::runtime::MotionRuntime;
    use crate::timeline::{Property, Track};
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME_MS: f64 = 16.0;

    struct Clock {
        now: f64,
    }

    impl Clock {
        fn new() -> Self {
            Self { now: 0.0 }
        }

        fn run(&mut self, runtime: &MotionRuntime, frames: usize) {
            for _ in 0..frames {
                runtime.tick(self.now);
                self.now += FRAME_MS;
            }
        }
    }

    fn runtime(width: f64, height: f64, reduced_motion: bool) -> MotionRuntime {
        MotionRuntime::new(
            ViewportSize::new(width, height),
            MotionConfig::default(),
            reduced_motion,
        )
    }

    fn recorder<T: Copy + 'static>() -> (Rc<RefCell<Vec<T>>>, Sink<T>) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let writer = Rc::clone(&frames);
        let sink: Sink<T> = Box::new(move |frame: &T| writer.borrow_mut().push(*frame));
        (frames, sink)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn pointer_elements_start_neutral() {
        let runtime = runtime(1_000.0, 800.0, false);
        let config = runtime.config().clone();
        let (hero_frames, hero_sink) = recorder();
        let (tilt_frames, tilt_sink) = recorder();
        let (press_frames, press_sink) = recorder();

        let hero = HeroParallax::new(
            ViewportSize::new(1_000.0, 800.0),
            config.pointer_spring,
            false,
            hero_sink,
        )
        .expect("valid hero");
        let tilt = TiltCard::new(config.tilt_spring, false, tilt_sink).expect("valid card");
        let press = PressState::new(PressStyle::BUTTON, config.press_spring, false, press_sink)
            .expect("valid button");

        let _mounts = [
            runtime.mount(Rc::new(RefCell::new(hero))),
            runtime.mount(Rc::new(RefCell::new(tilt))),
            runtime.mount(Rc::new(RefCell::new(press))),
        ];
        Clock::new().run(&runtime, 3);

        let hero_frames = hero_frames.borrow();
        assert_eq!(hero_frames.len(), 1);
        for depth in ParallaxDepth::ALL {
            assert_eq!(hero_frames[0].layer(depth).to_css(), "transform: none;");
        }
        assert_eq!(*tilt_frames.borrow(), vec![Transform::IDENTITY]);
        assert_eq!(*press_frames.borrow(), vec![Transform::IDENTITY]);
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn hero_layers_follow_the_pointer_within_their_amplitude() {
        let runtime = runtime(1_000.0, 800.0, false);
        let (frames, sink) = recorder();
        let hero = HeroParallax::new(
            ViewportSize::new(1_000.0, 800.0),
            SpringConfig::POINTER,
            false,
            sink,
        )
        .expect("valid hero");
        let _mount = runtime.mount(Rc::new(RefCell::new(hero)));
        let mut clock = Clock::new();

        runtime.hub().dispatch(InputEvent::PointerMove {
            client_x: 1_000.0,
            client_y: 0.0,
        });
        clock.run(&runtime, 300);

        let frames = frames.borrow();
        for frame in frames.iter() {
            let heavy = frame.layer(ParallaxDepth::Heavy);
            assert!(heavy.translate_x.abs() <= 20.0 + 1e-9);
            assert!(heavy.translate_y.abs() <= 20.0 + 1e-9);
        }
        let settled = frames.last().copied().expect("hero rendered");
        assert!(close(settled.layer(ParallaxDepth::Heavy).translate_x, 20.0));
        assert!(close(settled.layer(ParallaxDepth::Heavy).translate_y, -20.0));
        assert!(close(settled.layer(ParallaxDepth::Light).translate_x, 10.0));
        assert!(close(settled.layer(ParallaxDepth::VeryLight).translate_y, -5.0));
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn hero_rebuilds_its_ranges_on_resize() {
        let runtime = runtime(1_000.0, 800.0, false);
        let (frames, sink) = recorder();
        let hero = HeroParallax::new(
            ViewportSize::new(1_000.0, 800.0),
            SpringConfig::POINTER,
            false,
            sink,
        )
        .expect("valid hero");
        let _mount = runtime.mount(Rc::new(RefCell::new(hero)));
        let mut clock = Clock::new();

        runtime.hub().dispatch(InputEvent::Resize {
            width: 2_000.0,
            height: 800.0,
        });
        runtime.hub().dispatch(InputEvent::PointerMove {
            client_x: 1_500.0,
            client_y: 400.0,
        });
        clock.run(&runtime, 300);

        let settled = frames.borrow().last().copied().expect("hero rendered");
        assert!(close(settled.layer(ParallaxDepth::Heavy).translate_x, 10.0));
        assert!(close(settled.layer(ParallaxDepth::Heavy).translate_y, 0.0));
    }

    #[test]
    fn reduced_motion_keeps_the_hero_still() {
        let runtime = runtime(1_000.0, 800.0, true);
        let (frames, sink) = recorder();
        let hero = HeroParallax::new(
            ViewportSize::new(1_000.0, 800.0),
            SpringConfig::POINTER,
            true,
            sink,
        )
        .expect("valid hero");
        let _mount = runtime.mount(Rc::new(RefCell::new(hero)));

        runtime.hub().dispatch(InputEvent::PointerMove {
            client_x: 900.0,
            client_y: 100.0,
        });
        Clock::new().run(&runtime, 30);

        assert_eq!(frames.borrow().len(), 1);
        assert!(frames.borrow()[0].layer(ParallaxDepth::Heavy) == Transform::IDENTITY);
    }

    #[test]
    fn progress_bar_fills_monotonically_over_a_long_page() {
        let runtime = runtime(1_000.0, 1_000.0, false);
        let bar = Rc::new(RefCell::new(
            ProgressBar::new(SpringConfig::PROGRESS, false, Box::new(|_| {}))
                .expect("valid bar"),
        ));
        let _mount = runtime.mount(Rc::clone(&bar));
        let mut clock = Clock::new();
        let mut widths = Vec::new();

        for step in 0..=50 {
            runtime.hub().dispatch(InputEvent::Scroll {
                offset: f64::from(step) * 20.0,
                document_height: 2_000.0,
            });
            clock.run(&runtime, 1);
            widths.push(bar.borrow().width_percent());
        }
        for _ in 0..600 {
            clock.run(&runtime, 1);
            widths.push(bar.borrow().width_percent());
        }

        assert_eq!(widths[0], 0.0);
        for pair in widths.windows(2) {
            assert!(pair[1] >= pair[0] - 1e-9, "{} then {}", pair[0], pair[1]);
            assert!((0.0..=100.0).contains(&pair[1]));
        }
        assert!(close(*widths.last().expect("widths recorded"), 100.0));
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn progress_bar_snaps_under_reduced_motion() {
        let runtime = runtime(1_000.0, 1_000.0, true);
        let (frames, sink) = recorder();
        let bar = ProgressBar::new(SpringConfig::PROGRESS, true, sink).expect("valid bar");
        let _mount = runtime.mount(Rc::new(RefCell::new(bar)));

        runtime.hub().dispatch(InputEvent::Scroll {
            offset: 500.0,
            document_height: 2_000.0,
        });
        Clock::new().run(&runtime, 1);

        let last = frames.borrow().last().copied().expect("bar rendered");
        assert_eq!(last.scale_x, 0.5);
    }

    #[test]
    fn tilt_leans_toward_the_pointer_and_resets_on_leave() {
        let runtime = runtime(1_000.0, 800.0, false);
        let card = Rc::new(RefCell::new(
            TiltCard::new(SpringConfig::TILT, false, Box::new(|_| {})).expect("valid card"),
        ));
        let _mount = runtime.mount(Rc::clone(&card));
        let mut clock = Clock::new();
        let rect = ElementRect {
            left: 100.0,
            top: 100.0,
            width: 200.0,
            height: 100.0,
        };

        card.borrow_mut().pointer_move(rect, 300.0, 100.0);
        runtime.wake();
        clock.run(&runtime, 300);

        let leaning = card.borrow().transform();
        assert!(close(leaning.rotate_y, 7.0));
        assert!(close(leaning.rotate_x, 7.0));

        card.borrow_mut().pointer_move(rect, 225.0, 162.5);
        runtime.wake();
        clock.run(&runtime, 300);

        let partial = card.borrow().transform();
        assert!(close(partial.rotate_y, 3.5));
        assert!(close(partial.rotate_x, -3.5));

        card.borrow_mut().pointer_leave();
        runtime.wake();
        clock.run(&runtime, 300);

        assert!(card.borrow().transform() == Transform::IDENTITY);
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn header_firms_up_past_the_scroll_threshold() {
        let runtime = runtime(1_000.0, 800.0, false);
        let header = Rc::new(RefCell::new(
            HeaderChrome::new(50.0, Box::new(|_| {})).expect("valid header"),
        ));
        let _mount = runtime.mount(Rc::clone(&header));
        let mut clock = Clock::new();
        let mut scroll_to = |offset: f64| {
            runtime.hub().dispatch(InputEvent::Scroll {
                offset,
                document_height: 5_000.0,
            });
            clock.run(&runtime, 1);
            header.borrow().frame()
        };

        let top = scroll_to(0.0);
        assert!(!top.scrolled);
        assert_eq!(top.background_opacity, 0.95);
        assert_eq!(top.blur_px, 8.0);

        assert!(!scroll_to(50.0).scrolled);
        let halfway = scroll_to(51.0);
        assert!(halfway.scrolled);
        assert!(halfway.blur_px > 8.0 && halfway.blur_px < 16.0);

        let far = scroll_to(400.0);
        assert!(close(far.background_opacity, 0.98));
        assert_eq!(far.blur_px, 16.0);
        assert_eq!(far.to_css(), "--header-alpha: 0.980; --header-blur: 16.0px;");
    }

    #[test]
    fn press_overrides_hover_scale_and_release_returns_to_rest() {
        let runtime = runtime(1_000.0, 800.0, false);
        let button = Rc::new(RefCell::new(
            PressState::new(PressStyle::BUTTON, SpringConfig::PRESS, false, Box::new(|_| {}))
                .expect("valid button"),
        ));
        let _mount = runtime.mount(Rc::clone(&button));
        let mut clock = Clock::new();

        button.borrow_mut().set_hovered(true);
        runtime.wake();
        clock.run(&runtime, 300);
        let hovered = button.borrow().transform();
        assert!(close(hovered.scale, 1.05));
        assert!(close(hovered.translate_y, -2.0));

        button.borrow_mut().set_pressed(true);
        runtime.wake();
        clock.run(&runtime, 300);
        let pressed = button.borrow().transform();
        assert!(close(pressed.scale, 0.95));
        assert!(close(pressed.translate_y, -2.0));

        button.borrow_mut().set_hovered(false);
        runtime.wake();
        clock.run(&runtime, 300);
        assert!(button.borrow().transform() == Transform::IDENTITY);
    }

    #[test]
    fn looping_decoration_never_settles() {
        let runtime = runtime(1_000.0, 800.0, false);
        let (frames, sink) = recorder();
        let pulse = Timeline::new(vec![Track::keyframes(Property::Scale, [1.0, 1.3, 1.0], 2.0)
            .expect("valid track")
            .forever()]);
        let _mount = runtime.mount(Rc::new(RefCell::new(Decoration::new(pulse, false, sink))));

        let mut clock = Clock::new();
        for _ in 0..2_000 {
            clock.run(&runtime, 1);
            assert!(runtime.needs_frame());
        }

        let frames = frames.borrow();
        assert!(frames.len() > 1_000);
        assert!(frames
            .iter()
            .all(|frame| frame.scale >= 1.0 - 1e-9 && frame.scale <= 1.3 + 1e-9));
    }

    #[test]
    fn entrance_settles_on_its_final_frame() {
        let runtime = runtime(1_000.0, 800.0, false);
        let (frames, sink) = recorder();
        let entrance = Timeline::new(vec![
            Track::tween(Property::Opacity, 0.0, 1.0, 0.6).expect("valid track"),
            Track::tween(Property::TranslateY, 30.0, 0.0, 0.6).expect("valid track"),
        ]);
        let _mount = runtime.mount(Rc::new(RefCell::new(Decoration::new(entrance, false, sink))));

        Clock::new().run(&runtime, 120);

        let last = frames.borrow().last().copied().expect("entrance rendered");
        assert_eq!(last.opacity, Some(1.0));
        assert_eq!(last.translate_y, 0.0);
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn paused_decoration_waits_for_replay_and_settles_again() {
        let runtime = runtime(1_000.0, 800.0, false);
        let (frames, sink) = recorder();
        let wobble = Timeline::new(vec![Track::keyframes(
            Property::Rotate,
            [0.0, -2.0, 2.0, 0.0],
            0.4,
        )
        .expect("valid track")]);
        let tile = Rc::new(RefCell::new(Decoration::new(wobble, false, sink).paused()));
        let _mount = runtime.mount(Rc::clone(&tile));
        let mut clock = Clock::new();

        clock.run(&runtime, 10);
        assert_eq!(*frames.borrow(), vec![Transform::IDENTITY]);
        assert!(!runtime.needs_frame());

        tile.borrow_mut().replay();
        runtime.wake();
        clock.run(&runtime, 60);

        let frames = frames.borrow();
        assert!(frames.len() > 2);
        assert!(frames.iter().any(|frame| frame.rotate < -1.0));
        assert!(frames.iter().any(|frame| frame.rotate > 1.0));
        assert_eq!(frames.last().map(|frame| frame.rotate), Some(0.0));
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn reduced_motion_renders_decorations_at_rest() {
        let runtime = runtime(1_000.0, 800.0, true);
        let (frames, sink) = recorder();
        let twinkle = Timeline::new(vec![Track::keyframes(Property::Opacity, [0.3, 1.0, 0.3], 2.0)
            .expect("valid track")
            .forever()]);
        let diamond = Decoration::new(twinkle, true, sink).with_base(Transform {
            rotate: 45.0,
            ..Transform::IDENTITY
        });
        let _mount = runtime.mount(Rc::new(RefCell::new(diamond)));

        Clock::new().run(&runtime, 10);

        assert_eq!(frames.borrow().len(), 1);
        assert_eq!(frames.borrow()[0].rotate, 45.0);
        assert_eq!(frames.borrow()[0].opacity, Some(0.3));
        assert!(!runtime.needs_frame());
    }
}
