//! Daily trigger for the morning broadcast.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone};

use crate::bot::transport::Transport;
use crate::bot::Bot;
use crate::feed::FeedFetch;

/// The first instant strictly after `now` whose wall-clock time is `at`.
///
/// A day on which `at` does not exist (a DST gap) is skipped.
pub fn next_run_after<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> DateTime<Tz> {
    let tz = now.timezone();
    let mut date = now.date_naive();
    loop {
        if let Some(run) = tz.from_local_datetime(&date.and_time(at)).earliest() {
            if run > *now {
                return run;
            }
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => return now.clone() + TimeDelta::days(1),
        }
    }
}

/// Runs the daily broadcast at `at` local time, forever.
pub async fn run_daily<F: FeedFetch, T: Transport>(bot: Arc<Bot<F, T>>, at: NaiveTime) {
    loop {
        let now = Local::now();
        let next = next_run_after(&now, at);
        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        tracing::info!(next = %next, wait_secs = wait.as_secs(), "Next daily article scheduled");

        tokio::time::sleep(wait).await;
        bot.send_daily().await;
    }
}
