//! Open/closed state machine over a trading calendar.
//!
//! There is no stored state: every call recomputes from the instant it is
//! given, so the clock is a pure function of `now` and the calendar.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

use super::{CountdownTicket, SessionState, TradingCalendar};
use crate::utils::time_utils::resolve_local;

fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first trading day strictly after `date`.
fn next_trading_day(date: NaiveDate) -> NaiveDate {
    let mut day = date;
    loop {
        day = match day.succ_opt() {
            Some(next) => next,
            None => return day,
        };
        if is_trading_day(day) {
            return day;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    calendar: TradingCalendar,
}

impl SessionClock {
    pub fn new(calendar: TradingCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &TradingCalendar {
        &self.calendar
    }

    /// Session state at `now`, evaluated in the exchange timezone.
    pub fn current_state(&self, now: DateTime<Utc>) -> SessionState {
        let tz = self.calendar.timezone;
        let local = now.with_timezone(&tz);
        let today = local.date_naive();
        let time = local.time();
        let trading_day = is_trading_day(today);

        if trading_day && time >= self.calendar.open && time < self.calendar.close {
            return SessionState::open_until(resolve_local(
                tz,
                today.and_time(self.calendar.close),
            ));
        }

        let open_day = if trading_day && time < self.calendar.open {
            today
        } else {
            next_trading_day(today)
        };
        SessionState::closed_until(resolve_local(tz, open_day.and_time(self.calendar.open)))
    }

    /// Computes the session state and pairs it with the `now` it was computed
    /// from, for drift-corrected client countdowns.
    pub fn countdown(&self, now: DateTime<Utc>) -> CountdownTicket {
        CountdownTicket::new(self.current_state(now), now)
    }

    /// "NASDAQ OPEN" / "NASDAQ CLOSED"
    pub fn status_text(&self, state: &SessionState) -> String {
        format!(
            "{} {}",
            self.calendar.exchange,
            if state.is_open { "OPEN" } else { "CLOSED" }
        )
    }
}
