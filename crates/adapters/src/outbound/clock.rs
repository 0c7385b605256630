//! Time adapters.
//!
//! Code crash if there is a physical inconsistency (unrecoverable state).

use application::ports::outbound::Clock;

/// System clock using the OS time.
#[derive(Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time before Unix epoch")
            .as_secs()
    }
}
