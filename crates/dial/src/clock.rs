use chrono::Timelike;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MINUTES_PER_HALF_DAY: u32 = 12 * 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("hour {0} is outside 0..=23")]
    Hour(u32),
    #[error("minute {0} is outside 0..=59")]
    Minute(u32),
    #[error("expected HH:MM, got {0:?}")]
    Format(String),
}

/// Hour and minute of the local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WallClock {
    hour24: u32,
    minute: u32,
}

impl WallClock {
    pub fn new(hour24: u32, minute: u32) -> Result<Self, ClockError> {
        if hour24 > 23 {
            return Err(ClockError::Hour(hour24));
        }
        if minute > 59 {
            return Err(ClockError::Minute(minute));
        }
        Ok(Self { hour24, minute })
    }

    pub fn from_time(time: &impl Timelike) -> Self {
        Self {
            hour24: time.hour(),
            minute: time.minute(),
        }
    }

    pub fn now() -> Self {
        Self::from_time(&chrono::Local::now())
    }

    pub fn hour24(&self) -> u32 {
        self.hour24
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Minutes elapsed since the last 12 o'clock.
    pub fn minutes_into_half_day(&self) -> u32 {
        (self.hour24 % 12) * 60 + self.minute
    }

    pub fn next_hour24(&self) -> u32 {
        (self.hour24 + 1) % 24
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour24, self.minute)
    }
}

impl FromStr for WallClock {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| ClockError::Format(s.to_string()))?;
        let parse = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| ClockError::Format(s.to_string()))
        };
        Self::new(parse(h)?, parse(m)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(WallClock::new(24, 0), Err(ClockError::Hour(24)));
        assert_eq!(WallClock::new(0, 60), Err(ClockError::Minute(60)));
        assert!(WallClock::new(23, 59).is_ok());
    }

    #[test]
    fn test_from_chrono_time() {
        let time = NaiveTime::from_hms_opt(14, 30, 45).unwrap();
        let clock = WallClock::from_time(&time);
        assert_eq!(clock.hour24(), 14);
        assert_eq!(clock.minute(), 30);
        assert_eq!(clock.minutes_into_half_day(), 150);
    }

    #[test]
    fn test_parse() {
        let cases = vec![
            ("14:30", Ok(WallClock::new(14, 30).unwrap())),
            (" 0:05 ", Ok(WallClock::new(0, 5).unwrap())),
            ("25:00", Err(ClockError::Hour(25))),
            ("noon", Err(ClockError::Format("noon".to_string()))),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<WallClock>(), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_next_hour_wraps() {
        assert_eq!(WallClock::new(23, 10).unwrap().next_hour24(), 0);
        assert_eq!(WallClock::new(9, 10).unwrap().next_hour24(), 10);
    }
}
