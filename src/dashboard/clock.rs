use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Datelike, Local, TimeZone};
use serde::Serialize;
use tauri::async_runtime::{self, JoinHandle};
use tokio::{sync::Mutex, time};

use crate::attendance::normalize::weekday_label;

pub const CLOCK_EVENT: &str = "clock-tick";

/// Wall-clock reading shown on the welcome card.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClockReading {
    pub weekday: String,
    pub date: String,
    pub time: String,
}

impl ClockReading {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            weekday: weekday_label(now.weekday()).to_string(),
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M:%S").to_string(),
        }
    }

    pub fn now() -> Self {
        Self::at(&Local::now())
    }
}

/// Repeating one-second tick feeding the displayed date and time.
#[derive(Clone)]
pub struct ClockTicker {
    handle: Arc<Mutex<Option<JoinHandle<()>>>>,
    tick_interval: Duration,
}

impl Default for ClockTicker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl ClockTicker {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            handle: Arc::new(Mutex::new(None)),
            tick_interval,
        }
    }

    /// Starts ticking, replacing any ticker already running.
    pub async fn start<F>(&self, on_tick: F)
    where
        F: Fn(ClockReading) + Send + 'static,
    {
        let mut guard = self.handle.lock().await;
        if let Some(previous) = guard.take() {
            previous.abort();
        }

        let tick_interval = self.tick_interval;
        *guard = Some(async_runtime::spawn(async move {
            let mut interval = time::interval(tick_interval);
            loop {
                interval.tick().await;
                on_tick(ClockReading::now());
            }
        }));
    }

    pub async fn stop(&self) {
        if let Some(handle) = self.handle.lock().await.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use std::sync::mpsc;

    #[test]
    fn formats_reading_in_spanish() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let moment = offset.with_ymd_and_hms(2024, 5, 4, 7, 5, 9).unwrap();
        let reading = ClockReading::at(&moment);
        assert_eq!(reading.weekday, "Sábado");
        assert_eq!(reading.date, "2024-05-04");
        assert_eq!(reading.time, "07:05:09");
    }

    #[tokio::test]
    async fn ticks_until_stopped() {
        let (tx, rx) = mpsc::channel();
        let ticker = ClockTicker::new(Duration::from_millis(10));
        ticker
            .start(move |reading| {
                let _ = tx.send(reading);
            })
            .await;

        for _ in 0..3 {
            rx.recv_timeout(Duration::from_secs(2)).unwrap();
        }
        ticker.stop().await;
    }
}
