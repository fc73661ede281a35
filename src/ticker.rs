//! Per-minute re-validation for the create-task form

use crate::event::{AppEvent, SessionEvent};
use chrono::{Local, Timelike};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Sends [`AppEvent::MinuteElapsed`] whenever the local minute changes.
/// Events carry the owning form session. The background task is aborted
/// when the ticker is dropped.
#[derive(Debug)]
pub struct MinuteTicker {
    handle: JoinHandle<()>,
}

impl MinuteTicker {
    pub fn spawn(events: UnboundedSender<SessionEvent>, session: u64) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(POLL_INTERVAL);
            let mut last_minute = Local::now().minute();
            loop {
                interval.tick().await;
                if minute_changed(&mut last_minute, Local::now().minute())
                    && events
                        .send(SessionEvent {
                            session,
                            event: AppEvent::MinuteElapsed,
                        })
                        .is_err()
                {
                    break;
                }
            }
        });
        tracing::debug!(session, "Minute ticker started");
        Self { handle }
    }
}

impl Drop for MinuteTicker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("Minute ticker stopped");
    }
}

fn minute_changed(last_minute: &mut u32, minute: u32) -> bool {
    if minute == *last_minute {
        return false;
    }
    *last_minute = minute;
    true
}
