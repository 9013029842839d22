//! Countdown contract between the server and a client with its own clock.
//!
//! The server hands out the transition target together with the server time
//! the target was computed at. The client measures its drift against that
//! server time once, on load, and from then on counts down against its own
//! clock minus the drift. A client clock that is minutes off still shows the
//! right remaining time.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::SessionState;

/// Target and reference instants captured from one computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownTicket {
    pub is_open: bool,
    pub label: String,
    pub target: DateTime<Utc>,
    pub server_now: DateTime<Utc>,
}

impl CountdownTicket {
    pub fn new(state: SessionState, server_now: DateTime<Utc>) -> Self {
        Self {
            is_open: state.is_open,
            label: state.label,
            target: state.next_transition,
            server_now,
        }
    }

    /// The session state the ticket was cut from.
    pub fn state(&self) -> SessionState {
        SessionState {
            is_open: self.is_open,
            label: self.label.clone(),
            next_transition: self.target,
        }
    }

    /// Time left as seen from the server at issue time.
    pub fn remaining_at_issue(&self) -> Duration {
        clamp_non_negative(self.target - self.server_now)
    }

    /// Time left at `local_now` on a client clock with the given drift.
    pub fn remaining(&self, local_now: DateTime<Utc>, drift: &ClockDrift) -> Duration {
        clamp_non_negative(self.target - drift.corrected_now(local_now))
    }

    pub fn is_elapsed(&self, local_now: DateTime<Utc>, drift: &ClockDrift) -> bool {
        self.target <= drift.corrected_now(local_now)
    }
}

/// How far a client clock runs ahead of the server (negative when behind).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockDrift(Duration);

impl ClockDrift {
    /// Measures drift once, when the ticket is received.
    pub fn measure(local_at_load: DateTime<Utc>, server_now: DateTime<Utc>) -> Self {
        Self(local_at_load - server_now)
    }

    pub fn offset(&self) -> Duration {
        self.0
    }

    /// The client's reading translated onto the server clock.
    pub fn corrected_now(&self, local_now: DateTime<Utc>) -> DateTime<Utc> {
        local_now - self.0
    }
}

fn clamp_non_negative(duration: Duration) -> Duration {
    if duration < Duration::zero() {
        Duration::zero()
    } else {
        duration
    }
}

/// Renders a remaining duration as `HH:MM:SS`, prefixed with `Nd ` when at
/// least a day remains. Sub-second remainders are dropped; negatives render
/// as `00:00:00`.
pub fn format_countdown(remaining: Duration) -> String {
    let mut secs = clamp_non_negative(remaining).num_seconds();
    let days = secs / 86_400;
    secs %= 86_400;
    let hours = secs / 3_600;
    secs %= 3_600;
    let minutes = secs / 60;
    secs %= 60;

    if days > 0 {
        format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, secs)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}
