use crate::content::SiteContent;
use crate::error::SiteError;
use crate::spring::SpringConfig;
use crate::telemetry::LogLevel;
use serde::Deserialize;
use serde_json::Value;

pub const SITE_JSON: &str = include_str!("../config/site.json");

const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_MAX_FRAME_DELTA_MS: f64 = 100.0;
const DEFAULT_HEADER_SCROLL_THRESHOLD: f64 = 50.0;

const MAX_FRAME_DELTA_MS_BOUNDS: (f64, f64) = (16.0, 1_000.0);
const HEADER_SCROLL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const STIFFNESS_BOUNDS: (f64, f64) = (1.0, 2_000.0);
const DAMPING_BOUNDS: (f64, f64) = (0.1, 500.0);
const MASS_BOUNDS: (f64, f64) = (0.05, 50.0);
const REST_THRESHOLD_BOUNDS: (f64, f64) = (0.000_01, 10.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReducedMotion {
    /// Follow the `prefers-reduced-motion` media query.
    Auto,
    Always,
    Never,
}

impl ReducedMotion {
    pub fn resolve(self, system_prefers_reduced: bool) -> bool {
        match self {
            Self::Auto => system_prefers_reduced,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub log_level: LogLevel,
    /// Upper bound for one frame's time step, in seconds.
    pub max_frame_delta: f64,
    pub header_scroll_threshold: f64,
    pub reduced_motion: ReducedMotion,
    pub pointer_spring: SpringConfig,
    pub progress_spring: SpringConfig,
    pub tilt_spring: SpringConfig,
    pub press_spring: SpringConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA_MS / 1_000.0,
            header_scroll_threshold: DEFAULT_HEADER_SCROLL_THRESHOLD,
            reduced_motion: ReducedMotion::Auto,
            pointer_spring: SpringConfig::POINTER,
            progress_spring: SpringConfig::PROGRESS,
            tilt_spring: SpringConfig::TILT,
            press_spring: SpringConfig::PRESS,
        }
    }
}

impl MotionConfig {
    /// Reads the `motion` section. Missing, malformed or out-of-bounds values
    /// keep their defaults.
    pub fn from_value(section: &Value) -> Self {
        let defaults = Self::default();

        Self {
            log_level: read_log_level(section, "logLevel", defaults.log_level),
            max_frame_delta: read_f64_with_bounds(
                section,
                "maxFrameDeltaMs",
                DEFAULT_MAX_FRAME_DELTA_MS,
                MAX_FRAME_DELTA_MS_BOUNDS,
            ) / 1_000.0,
            header_scroll_threshold: read_f64_with_bounds(
                section,
                "headerScrollThreshold",
                DEFAULT_HEADER_SCROLL_THRESHOLD,
                HEADER_SCROLL_THRESHOLD_BOUNDS,
            ),
            reduced_motion: read_reduced_motion(section, "reducedMotion", defaults.reduced_motion),
            pointer_spring: read_spring(section, "pointerSpring", defaults.pointer_spring),
            progress_spring: read_spring(section, "progressSpring", defaults.progress_spring),
            tilt_spring: read_spring(section, "tiltSpring", defaults.tilt_spring),
            press_spring: read_spring(section, "pressSpring", defaults.press_spring),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub content: SiteContent,
    pub motion: MotionConfig,
}

#[derive(Deserialize)]
struct RawSite {
    #[serde(flatten)]
    content: SiteContent,
    #[serde(default)]
    motion: Value,
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        let site: RawSite = serde_json::from_str(raw)?;

        Ok(Self {
            content: site.content,
            motion: MotionConfig::from_value(&site.motion),
        })
    }

    pub fn embedded() -> Result<Self, SiteError> {
        Self::from_json(SITE_JSON)
    }
}

fn read_f64_with_bounds(section: &Value, key: &str, default: f64, bounds: (f64, f64)) -> f64 {
    section
        .get(key)
        .and_then(Value::as_f64)
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn read_log_level(section: &Value, key: &str, default: LogLevel) -> LogLevel {
    section
        .get(key)
        .and_then(Value::as_str)
        .and_then(LogLevel::parse)
        .unwrap_or(default)
}

fn read_reduced_motion(section: &Value, key: &str, default: ReducedMotion) -> ReducedMotion {
    match section
        .get(key)
        .and_then(Value::as_str)
        .map(|value| value.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("auto") => ReducedMotion::Auto,
        Some("always") => ReducedMotion::Always,
        Some("never") => ReducedMotion::Never,
        _ => default,
    }
}

fn read_spring(section: &Value, key: &str, default: SpringConfig) -> SpringConfig {
    let Some(spring) = section.get(key) else {
        return default;
    };

    let config = SpringConfig::new(
        read_f64_with_bounds(spring, "stiffness", default.stiffness, STIFFNESS_BOUNDS),
        read_f64_with_bounds(spring, "damping", default.damping, DAMPING_BOUNDS),
    )
    .with_mass(read_f64_with_bounds(spring, "mass", default.mass, MASS_BOUNDS))
    .with_rest_delta(read_f64_with_bounds(
        spring,
        "restDelta",
        default.rest_delta,
        REST_THRESHOLD_BOUNDS,
    ))
    .with_rest_speed(read_f64_with_bounds(
        spring,
        "restSpeed",
        default.rest_speed,
        REST_THRESHOLD_BOUNDS,
    ));

    if config.validate().is_ok() {
        config
    } else {
        default
    }
}
