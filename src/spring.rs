//! Spring smoothing for pointer and scroll driven values.
//!
//! Each step evaluates the closed-form solution of a damped harmonic
//! oscillator, so the result does not depend on frame rate and stays stable
//! for any non-negative `dt`.

use crate::error::MotionError;

const CRITICAL_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub rest_delta: f64,
    pub rest_speed: f64,
}

impl SpringConfig {
    /// Scroll progress bar, over-damped so the bar never runs backwards.
    pub const PROGRESS: Self = Self::new(100.0, 30.0).with_rest_delta(0.001);
    pub const TILT: Self = Self::new(150.0, 20.0);
    pub const PRESS: Self = Self::new(400.0, 10.0);
    pub const POINTER: Self = Self::new(120.0, 24.0);

    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }

    pub const fn with_rest_delta(mut self, rest_delta: f64) -> Self {
        self.rest_delta = rest_delta;
        self
    }

    pub const fn with_rest_speed(mut self, rest_speed: f64) -> Self {
        self.rest_speed = rest_speed;
        self
    }

    pub const fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn validate(&self) -> Result<(), MotionError> {
        let positive = [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("mass", self.mass),
            ("rest_delta", self.rest_delta),
            ("rest_speed", self.rest_speed),
        ];

        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(MotionError::InvalidSpring { field, value });
            }
        }

        Ok(())
    }

    /// `1.0` is critically damped; above it the spring never overshoots.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpringPhase {
    /// No target has been set yet; the initial value is shown.
    Idle,
    Tracking,
    /// Within the rest thresholds of the target. No work until retargeted.
    Settled,
}

impl SpringPhase {
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Tracking)
    }

    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Tracking, _) | (_, Self::Tracking) => Self::Tracking,
            (Self::Idle, Self::Idle) => Self::Idle,
            _ => Self::Settled,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
    phase: SpringPhase,
}

impl Spring {
    pub fn new(initial: f64, config: SpringConfig) -> Result<Self, MotionError> {
        config.validate()?;

        Ok(Self {
            position: initial,
            velocity: 0.0,
            target: initial,
            config,
            phase: SpringPhase::Idle,
        })
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn phase(&self) -> SpringPhase {
        self.phase
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }

        self.target = target;

        if self.phase == SpringPhase::Tracking {
            return;
        }

        if (target - self.position).abs() > self.config.rest_delta {
            self.phase = SpringPhase::Tracking;
        } else {
            self.snap(target);
        }
    }

    pub fn snap(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
        self.phase = SpringPhase::Settled;
    }

    pub fn step(&mut self, dt: f64) -> SpringPhase {
        if self.phase != SpringPhase::Tracking || dt.is_nan() || dt <= 0.0 {
            return self.phase;
        }

        let (displacement, velocity) =
            oscillate(&self.config, self.position - self.target, self.velocity, dt);

        if displacement.abs() < self.config.rest_delta && velocity.abs() < self.config.rest_speed {
            self.snap(self.target);
        } else {
            self.position = self.target + displacement;
            self.velocity = velocity;
        }

        self.phase
    }
}

/// Displacement and velocity after `t` seconds for a spring released at
/// displacement `x0` with velocity `v0`.
fn oscillate(config: &SpringConfig, x0: f64, v0: f64, t: f64) -> (f64, f64) {
    let omega = config.natural_frequency();
    let zeta = config.damping_ratio();

    if (zeta - 1.0).abs() < CRITICAL_EPSILON {
        let decay = (-omega * t).exp();
        let b = v0 + omega * x0;
        return (decay * (x0 + b * t), decay * (v0 - omega * b * t));
    }

    if zeta < 1.0 {
        let decay_rate = zeta * omega;
        let damped = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-decay_rate * t).exp();
        let (sin, cos) = (damped * t).sin_cos();
        let x = decay * (x0 * cos + (v0 + decay_rate * x0) / damped * sin);
        let v = decay * (v0 * cos - (decay_rate * v0 + omega * omega * x0) / damped * sin);
        return (x, v);
    }

    let root = (zeta * zeta - 1.0).sqrt();
    let r1 = -omega * (zeta - root);
    let r2 = -omega * (zeta + root);
    let c1 = (v0 - r2 * x0) / (r1 - r2);
    let c2 = x0 - c1;
    let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
    (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
}

#[derive(Clone, Debug)]
pub struct Spring2 {
    x: Spring,
    y: Spring,
}

impl Spring2 {
    pub fn new(initial: (f64, f64), config: SpringConfig) -> Result<Self, MotionError> {
        Ok(Self {
            x: Spring::new(initial.0, config)?,
            y: Spring::new(initial.1, config)?,
        })
    }

    pub fn set_target(&mut self, target: (f64, f64)) {
        self.x.set_target(target.0);
        self.y.set_target(target.1);
    }

    pub fn snap(&mut self, value: (f64, f64)) {
        self.x.snap(value.0);
        self.y.snap(value.1);
    }

    pub fn step(&mut self, dt: f64) -> SpringPhase {
        self.x.step(dt).merge(self.y.step(dt))
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x.position(), self.y.position())
    }

    pub fn phase(&self) -> SpringPhase {
        self.x.phase().merge(self.y.phase())
    }
}
