use crate::events::AppEvent;
use async_channel::Sender;
use chrono::{Local, NaiveTime, Timelike};
use std::time::Duration;

const MINUTE: Duration = Duration::from_secs(60);

/// Sends one tick right away and then one at every wall-clock minute
/// boundary.
pub async fn run_ticker(tx: Sender<AppEvent>) {
    loop {
        let now = Local::now().naive_local();
        if tx.send(AppEvent::Tick(now)).await.is_err() {
            break;
        }
        tokio::time::sleep(until_next_minute(now.time())).await;
    }
}

pub fn until_next_minute(time: NaiveTime) -> Duration {
    // chrono encodes a leap second as nanos >= 1e9
    let into_minute = Duration::new(
        time.second() as u64,
        time.nanosecond() % 1_000_000_000,
    );
    MINUTE.saturating_sub(into_minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_until_next_minute() {
        let cases = vec![
            (NaiveTime::from_hms_opt(10, 0, 0).unwrap(), MINUTE),
            (
                NaiveTime::from_hms_opt(10, 0, 59).unwrap(),
                Duration::from_secs(1),
            ),
            (
                NaiveTime::from_hms_milli_opt(23, 59, 30, 250).unwrap(),
                Duration::from_millis(29_750),
            ),
            (
                NaiveTime::from_hms_milli_opt(23, 59, 59, 1_500).unwrap(),
                Duration::from_millis(500),
            ),
        ];

        for (time, expected) in cases {
            assert_eq!(until_next_minute(time), expected, "{time}");
        }
    }
}
