//! Declarative animation tracks.
//!
//! A [`Track`] is plain data: a property, keyframes, a duration, an easing and
//! a repeat policy. Sampling is a pure function of time so looping
//! decorations can be stepped deterministically in tests.

use crate::error::MotionError;
use crate::transform::Transform;

const BEZIER_ITERATIONS: usize = 24;
const BEZIER_PRECISION: f64 = 1e-7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property {
    TranslateX,
    TranslateY,
    Scale,
    ScaleX,
    Rotate,
    Opacity,
}

impl Property {
    fn write(self, transform: &mut Transform, value: f64) {
        match self {
            Self::TranslateX => transform.translate_x = value,
            Self::TranslateY => transform.translate_y = value,
            Self::Scale => transform.scale = value,
            Self::ScaleX => transform.scale_x = value,
            Self::Rotate => transform.rotate = value,
            Self::Opacity => transform.opacity = Some(value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    pub const EXPO_OUT: Self = Self::CubicBezier(0.16, 1.0, 0.3, 1.0);

    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Self::Linear => t,
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_axis(u: f64, a1: f64, a2: f64) -> f64 {
    (((1.0 - 3.0 * a2 + 3.0 * a1) * u + (3.0 * a2 - 6.0 * a1)) * u + 3.0 * a1) * u
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x1 == y1 && x2 == y2 {
        return x;
    }

    let (mut low, mut high) = (0.0, 1.0);
    let mut u = x;
    for _ in 0..BEZIER_ITERATIONS {
        u = (low + high) / 2.0;
        let estimate = bezier_axis(u, x1, x2) - x;
        if estimate.abs() < BEZIER_PRECISION {
            break;
        }
        if estimate > 0.0 {
            high = u;
        } else {
            low = u;
        }
    }

    bezier_axis(u, y1, y2)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Repeat {
    Once,
    /// Loops forever, holding the last keyframe for `gap` seconds between
    /// cycles.
    Forever { gap: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    property: Property,
    keyframes: Vec<f64>,
    duration: f64,
    easing: Easing,
    delay: f64,
    repeat: Repeat,
}

impl Track {
    /// Keyframes are spaced evenly over `duration` seconds.
    pub fn keyframes(
        property: Property,
        keyframes: impl Into<Vec<f64>>,
        duration: f64,
    ) -> Result<Self, MotionError> {
        let keyframes = keyframes.into();
        if keyframes.len() < 2 {
            return Err(MotionError::InvalidTrack("at least two keyframes are required"));
        }
        if keyframes.iter().any(|value| !value.is_finite()) {
            return Err(MotionError::InvalidTrack("keyframes must be finite"));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(MotionError::InvalidTrack("duration must be positive"));
        }

        Ok(Self {
            property,
            keyframes,
            duration,
            easing: Easing::EaseInOut,
            delay: 0.0,
            repeat: Repeat::Once,
        })
    }

    pub fn tween(property: Property, from: f64, to: f64, duration: f64) -> Result<Self, MotionError> {
        Self::keyframes(property, vec![from, to], duration)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_delay(mut self, delay: f64) -> Result<Self, MotionError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(MotionError::InvalidTrack("delay must be non-negative"));
        }
        self.delay = delay;
        Ok(self)
    }

    pub fn forever(self) -> Self {
        Self {
            repeat: Repeat::Forever { gap: 0.0 },
            ..self
        }
    }

    pub fn forever_with_gap(mut self, gap: f64) -> Result<Self, MotionError> {
        if !gap.is_finite() || gap < 0.0 {
            return Err(MotionError::InvalidTrack("repeat gap must be non-negative"));
        }
        self.repeat = Repeat::Forever { gap };
        Ok(self)
    }

    pub fn first(&self) -> f64 {
        self.keyframes[0]
    }

    pub fn last(&self) -> f64 {
        self.keyframes[self.keyframes.len() - 1]
    }

    /// Value shown when motion is reduced: where a single run ends, or where
    /// a loop starts.
    pub fn resting_value(&self) -> f64 {
        match self.repeat {
            Repeat::Once => self.last(),
            Repeat::Forever { .. } => self.first(),
        }
    }

    /// Time of the final keyframe, or `None` when the track loops forever.
    pub fn end_time(&self) -> Option<f64> {
        match self.repeat {
            Repeat::Once => Some(self.delay + self.duration),
            Repeat::Forever { .. } => None,
        }
    }

    pub fn sample(&self, time: f64) -> f64 {
        let local = time - self.delay;
        if local.is_nan() || local <= 0.0 {
            return self.first();
        }

        let cycle_time = match self.repeat {
            Repeat::Once => local,
            Repeat::Forever { gap } => local % (self.duration + gap),
        };
        if cycle_time >= self.duration {
            return self.last();
        }

        let segments = self.keyframes.len() - 1;
        let scaled = cycle_time / self.duration * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        let eased = self.easing.apply(scaled - index as f64);
        let (from, to) = (self.keyframes[index], self.keyframes[index + 1]);
        from + (to - from) * eased
    }

    /// Lazily yields `(time, value)` pairs every `step` seconds.
    pub fn frames(&self, step: f64) -> Result<Frames<'_>, MotionError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(MotionError::InvalidTrack("frame step must be positive"));
        }
        Ok(Frames {
            track: self,
            step,
            index: 0,
        })
    }
}

/// Restartable sampler over a track. Infinite for looping tracks.
#[derive(Clone, Debug)]
pub struct Frames<'a> {
    track: &'a Track,
    step: f64,
    index: u64,
}

impl Frames<'_> {
    pub fn restart(&mut self) {
        self.index = 0;
    }
}

impl Iterator for Frames<'_> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let time = self.index as f64 * self.step;
        if let Some(end) = self.track.end_time() {
            if time > end + self.step {
                return None;
            }
        }
        self.index += 1;
        Some((time, self.track.sample(time)))
    }
}

/// Parent-driven entrance delays: the first child starts after
/// `delay_children`, each following one `stagger` seconds later.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    pub delay_children: f64,
    pub stagger: f64,
}

impl Stagger {
    pub fn delay_for(&self, index: usize) -> f64 {
        self.delay_children + self.stagger * index as f64
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    tracks: Vec<Track>,
}

impl Timeline {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn is_finished(&self, time: f64) -> bool {
        self.tracks
            .iter()
            .all(|track| track.end_time().is_some_and(|end| time >= end))
    }

    pub fn sample(&self, time: f64) -> Transform {
        let mut transform = Transform::IDENTITY;
        for track in &self.tracks {
            track.property.write(&mut transform, track.sample(time));
        }
        transform
    }

    pub fn resting(&self) -> Transform {
        let mut transform = Transform::IDENTITY;
        for track in &self.tracks {
            track.property.write(&mut transform, track.resting_value());
        }
        transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn easing_curves_fix_their_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::EXPO_OUT,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_about_the_midpoint() {
        assert!(close(Easing::EaseInOut.apply(0.5), 0.5));
        let early = Easing::EaseInOut.apply(0.25);
        let late = Easing::EaseInOut.apply(0.75);
        assert!(close(early + late, 1.0));
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }

    #[test]
    fn three_keyframes_are_evenly_spaced() {
        let float = Track::keyframes(Property::TranslateY, [0.0, -20.0, 0.0], 4.0)
            .expect("valid track")
            .with_easing(Easing::Linear);

        assert_eq!(float.sample(0.0), 0.0);
        assert!(close(float.sample(1.0), -10.0));
        assert!(close(float.sample(2.0), -20.0));
        assert!(close(float.sample(3.0), -10.0));
    }

    #[test]
    fn once_holds_the_last_keyframe_after_finishing() {
        let entrance = Track::tween(Property::Opacity, 0.0, 1.0, 0.6)
            .expect("valid track")
            .with_delay(0.3)
            .expect("valid delay");

        assert_eq!(entrance.sample(0.1), 0.0);
        assert_eq!(entrance.sample(0.95), 1.0);
        assert_eq!(entrance.sample(120.0), 1.0);
        assert!(entrance.end_time().is_some_and(|end| close(end, 0.9)));
    }

    #[test]
    fn looping_track_repeats_with_its_period() {
        let pulse = Track::keyframes(Property::Scale, [1.0, 1.3, 1.0], 2.0)
            .expect("valid track")
            .forever();

        for time in [0.25, 0.7, 1.1, 1.9] {
            assert!(close(pulse.sample(time), pulse.sample(time + 2.0)));
            assert!(close(pulse.sample(time), pulse.sample(time + 200.0)));
        }
    }

    #[test]
    fn repeat_gap_holds_the_last_keyframe() {
        let shimmer = Track::tween(Property::TranslateX, -100.0, 100.0, 2.0)
            .expect("valid track")
            .forever_with_gap(1.0)
            .expect("valid gap");

        assert_eq!(shimmer.sample(2.5), 100.0);
        assert_eq!(shimmer.sample(3.0), -100.0);
    }

    #[test]
    fn invalid_tracks_are_rejected() {
        assert!(Track::keyframes(Property::Scale, [1.0], 1.0).is_err());
        assert!(Track::tween(Property::Scale, 1.0, f64::NAN, 1.0).is_err());
        assert!(Track::tween(Property::Scale, 1.0, 2.0, 0.0).is_err());
        let track = Track::tween(Property::Scale, 1.0, 2.0, 1.0).expect("valid track");
        assert!(track.clone().with_delay(-1.0).is_err());
        assert!(track.clone().forever_with_gap(f64::INFINITY).is_err());
        assert!(track.frames(0.0).is_err());
    }

    #[test]
    fn looping_frames_never_terminate_and_restart_from_zero() {
        let twinkle = Track::keyframes(Property::Opacity, [0.3, 1.0, 0.3], 2.0)
            .expect("valid track")
            .forever();
        let mut frames = twinkle.frames(1.0 / 60.0).expect("valid step");

        let taken: Vec<(f64, f64)> = frames.by_ref().take(10_000).collect();
        assert_eq!(taken.len(), 10_000);
        assert!(taken
            .iter()
            .all(|(_, value)| *value >= 0.3 - 1e-9 && *value <= 1.0 + 1e-9));
        assert!(frames.next().is_some());

        frames.restart();
        assert_eq!(frames.next(), Some((0.0, 0.3)));
    }

    #[test]
    fn single_run_frames_are_finite() {
        let entrance = Track::tween(Property::TranslateY, 20.0, 0.0, 0.5).expect("valid track");

        let frames: Vec<(f64, f64)> = entrance.frames(0.1).expect("valid step").collect();

        assert!(frames.len() >= 6 && frames.len() <= 8);
        assert_eq!(frames.last().map(|(_, value)| *value), Some(0.0));
    }

    #[test]
    fn stagger_offsets_children() {
        let stagger = Stagger {
            delay_children: 0.3,
            stagger: 0.08,
        };

        assert!(close(stagger.delay_for(0), 0.3));
        assert!(close(stagger.delay_for(5), 0.7));
    }

    #[test]
    fn timeline_writes_each_track_into_one_transform() {
        let ring = Timeline::new(vec![
            Track::tween(Property::Rotate, 0.0, 360.0, 20.0)
                .expect("valid track")
                .with_easing(Easing::Linear)
                .forever(),
            Track::keyframes(Property::Scale, [1.0, 1.1, 1.0], 6.0)
                .expect("valid track")
                .forever(),
        ]);

        let transform = ring.sample(5.0);

        assert!(close(transform.rotate, 90.0));
        assert!(transform.scale > 1.0 && transform.scale < 1.1);
        assert!(!ring.is_finished(1_000.0));
    }

    #[test]
    fn resting_state_ends_entrances_and_starts_loops() {
        let timeline = Timeline::new(vec![
            Track::tween(Property::Opacity, 0.0, 1.0, 0.6).expect("valid track"),
            Track::keyframes(Property::Scale, [1.0, 1.3, 1.0], 2.0)
                .expect("valid track")
                .forever(),
            Track::keyframes(Property::TranslateY, [0.0, -20.0, 0.0], 4.0)
                .expect("valid track")
                .forever(),
        ]);

        let resting = timeline.resting();

        assert_eq!(resting.opacity, Some(1.0));
        assert_eq!(resting.scale, 1.0);
        assert_eq!(resting.translate_y, 0.0);
    }
}
