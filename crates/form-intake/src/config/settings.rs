use std::env;

pub const PING_MESSAGE_VAR: &str = "PING_MESSAGE";
pub const DEFAULT_PING_MESSAGE: &str = "ping";

/// Settings that are resolved on every request rather than once at startup.
///
/// Implementations must tolerate concurrent readers; a reader sees either the old or the
/// new value, never a mix.
pub trait RuntimeSettings: Send + Sync {
    fn ping_message(&self) -> String;
}

/// Reads settings from the process environment at call time.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings;

impl RuntimeSettings for EnvSettings {
    fn ping_message(&self) -> String {
        env::var(PING_MESSAGE_VAR).unwrap_or_else(|_| DEFAULT_PING_MESSAGE.to_string())
    }
}

/// Settings pinned to fixed values for tests.
#[derive(Debug, Clone)]
pub struct FixedSettings {
    ping_message: String,
}

impl FixedSettings {
    pub fn new(ping_message: impl Into<String>) -> Self {
        Self {
            ping_message: ping_message.into(),
        }
    }
}

impl Default for FixedSettings {
    fn default() -> Self {
        Self::new(DEFAULT_PING_MESSAGE)
    }
}

impl RuntimeSettings for FixedSettings {
    fn ping_message(&self) -> String {
        self.ping_message.clone()
    }
}
