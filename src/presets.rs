use crate::error::MotionError;
use crate::timeline::{Easing, Property, Stagger, Timeline, Track};

pub const HERO_BLOCKS: Stagger = Stagger {
    delay_children: 0.0,
    stagger: 0.3,
};

pub const HEADLINE_WORDS: Stagger = Stagger {
    delay_children: 0.3,
    stagger: 0.08,
};

pub const PROJECT_CARDS: Stagger = Stagger {
    delay_children: 0.0,
    stagger: 0.15,
};

pub const ARCHIVE_TILES: Stagger = Stagger {
    delay_children: 0.0,
    stagger: 0.08,
};

fn looping(
    property: Property,
    keyframes: [f64; 3],
    duration: f64,
    delay: f64,
) -> Result<Track, MotionError> {
    Ok(Track::keyframes(property, keyframes, duration)?
        .with_delay(delay)?
        .forever())
}

pub fn entrance(rise: f64, duration: f64, delay: f64, easing: Easing) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![
        Track::tween(Property::Opacity, 0.0, 1.0, duration)?
            .with_easing(easing)
            .with_delay(delay)?,
        Track::tween(Property::TranslateY, rise, 0.0, duration)?
            .with_easing(easing)
            .with_delay(delay)?,
    ]))
}

pub fn pop_in(from_scale: f64, duration: f64, delay: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![
        Track::tween(Property::Opacity, 0.0, 1.0, duration)?.with_delay(delay)?,
        Track::tween(Property::Scale, from_scale, 1.0, duration)?.with_delay(delay)?,
    ]))
}

pub fn tile_in(delay: f64) -> Result<Timeline, MotionError> {
    let settle = |property, from: f64, to: f64| -> Result<Track, MotionError> {
        Track::tween(property, from, to, 0.5)?
            .with_easing(Easing::EXPO_OUT)
            .with_delay(delay)
    };
    Ok(Timeline::new(vec![
        settle(Property::Opacity, 0.0, 1.0)?,
        settle(Property::Scale, 0.85, 1.0)?,
        settle(Property::TranslateY, 20.0, 0.0)?,
    ]))
}

pub fn drop_in() -> Result<Timeline, MotionError> {
    entrance(-100.0, 0.6, 0.0, Easing::EXPO_OUT)
}

pub fn draw_line(duration: f64, delay: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![Track::tween(
        Property::ScaleX,
        0.0,
        1.0,
        duration,
    )?
    .with_easing(Easing::EaseOut)
    .with_delay(delay)?]))
}

pub fn headline(words: usize) -> Result<Vec<Timeline>, MotionError> {
    (0..words)
        .map(|index| entrance(25.0, 0.5, HEADLINE_WORDS.delay_for(index), Easing::EaseOut))
        .collect()
}

pub fn pulse(peak: f64, duration: f64, delay: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![looping(
        Property::Scale,
        [1.0, peak, 1.0],
        duration,
        delay,
    )?]))
}

pub fn twinkle(low: f64, high: f64, duration: f64, delay: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![looping(
        Property::Opacity,
        [low, high, low],
        duration,
        delay,
    )?]))
}

pub fn beacon(peak: f64, delay: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![
        looping(Property::Opacity, [0.3, 1.0, 0.3], 2.0, delay)?,
        looping(Property::Scale, [1.0, peak, 1.0], 2.0, delay)?,
    ]))
}

pub fn float(rise: f64, opacity: (f64, f64), duration: f64, delay: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![
        looping(Property::TranslateY, [0.0, -rise, 0.0], duration, delay)?,
        looping(
            Property::Opacity,
            [opacity.0, opacity.1, opacity.0],
            duration,
            delay,
        )?,
    ]))
}

pub fn breathe(peak: f64, opacity: (f64, f64), duration: f64, delay: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![
        looping(Property::Scale, [1.0, peak, 1.0], duration, delay)?,
        looping(
            Property::Opacity,
            [opacity.0, opacity.1, opacity.0],
            duration,
            delay,
        )?,
    ]))
}

pub fn drift(peak: f64, offset: (f64, f64), duration: f64, delay: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![
        looping(Property::Scale, [1.0, peak, 1.0], duration, delay)?,
        looping(Property::TranslateX, [0.0, offset.0, 0.0], duration, delay)?,
        looping(Property::TranslateY, [0.0, offset.1, 0.0], duration, delay)?,
    ]))
}

/// A ring turning at constant speed while it pulses. Negative `turn` spins
/// counter-clockwise.
pub fn orbit(
    turn: f64,
    turn_duration: f64,
    peak: f64,
    pulse_duration: f64,
    pulse_delay: f64,
) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![
        Track::tween(Property::Rotate, 0.0, turn, turn_duration)?
            .with_easing(Easing::Linear)
            .forever(),
        looping(Property::Scale, [1.0, peak, 1.0], pulse_duration, pulse_delay)?,
    ]))
}

pub fn nudge(property: Property, distance: f64, duration: f64, delay: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![looping(
        property,
        [0.0, distance, 0.0],
        duration,
        delay,
    )?]))
}

/// A highlight sweeping across a button, pausing `gap` seconds between
/// passes.
pub fn shimmer(travel: f64, duration: f64, gap: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![Track::tween(
        Property::TranslateX,
        -travel,
        travel,
        duration,
    )?
    .forever_with_gap(gap)?]))
}

pub fn sparkle(angle: f64, peak: f64, duration: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![
        looping(Property::Rotate, [0.0, angle, 0.0], duration, 0.0)?,
        looping(Property::Scale, [1.0, peak, 1.0], duration, 0.0)?,
    ]))
}

pub fn wobble(angle: f64, duration: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![Track::keyframes(
        Property::Rotate,
        [0.0, -angle, angle, 0.0],
        duration,
    )?]))
}

pub fn glint(angle: f64, opacity: (f64, f64), duration: f64) -> Result<Timeline, MotionError> {
    Ok(Timeline::new(vec![
        looping(Property::Rotate, [0.0, angle, 0.0], duration, 0.0)?,
        looping(
            Property::Opacity,
            [opacity.0, opacity.1, opacity.0],
            duration,
            0.0,
        )?,
    ]))
}
