use std::cmp::Ordering;
use std::sync::atomic::{AtomicU8, Ordering as AtomicOrdering};

static LOG_THRESHOLD: AtomicU8 = AtomicU8::new(LogLevel::Info.rank());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl LogLevel {
    const fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warn => 2,
        }
    }

    fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Self::Debug,
            1 => Self::Info,
            _ => Self::Warn,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }

    fn to_log(self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warn => log::Level::Warn,
        }
    }
}

pub fn set_threshold(level: LogLevel) {
    LOG_THRESHOLD.store(level.rank(), AtomicOrdering::Relaxed);
    log::set_max_level(level.to_log().to_level_filter());
}

pub fn threshold() -> LogLevel {
    LogLevel::from_rank(LOG_THRESHOLD.load(AtomicOrdering::Relaxed))
}

/// Installs the browser console logger and panic hook.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LogLevel) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(level.to_log());
    set_threshold(level);
}

pub fn event_payload(level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "level".to_string(),
        serde_json::Value::String(level.as_str().to_string()),
    );
    payload.insert(
        "event".to_string(),
        serde_json::Value::String(event.to_string()),
    );

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

/// Emits one structured event as a single JSON object.
pub fn log_event(level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < threshold() {
        return;
    }

    log::log!(level.to_log(), "{}", event_payload(level, event, fields));
}
