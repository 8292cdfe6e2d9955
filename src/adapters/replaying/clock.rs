//! Replaying adapter for the Clock port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let output = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            replayer.next_interaction("clock", "now").output
        };
        serde_json::from_value(output).expect("clock::now: failed to deserialize DateTime<Utc>")
    }
}
