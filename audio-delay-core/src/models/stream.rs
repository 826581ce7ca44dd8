use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle to a live capture stream, minted by the host when the stream opens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamHandle {
    pub id: Uuid,
    pub device_id: String,
}

impl StreamHandle {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            device_id: device_id.into(),
        }
    }
}

/// The stream currently owned by a session, with the delay captured at start.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveStream {
    pub handle: StreamHandle,
    pub delay_secs: f64,
    pub started_at: DateTime<Utc>,
}

impl ActiveStream {
    pub(crate) fn new(handle: StreamHandle, delay_secs: f64) -> Self {
        Self {
            handle,
            delay_secs,
            started_at: Utc::now(),
        }
    }

    pub(crate) fn summarize(self) -> StreamSummary {
        let ended_at = Utc::now();
        let duration_secs = (ended_at - self.started_at)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        StreamSummary {
            stream_id: self.handle.id,
            device_id: self.handle.device_id,
            delay_secs: self.delay_secs,
            started_at: self.started_at,
            duration_secs,
        }
    }
}

/// What a finished stream looked like, returned when it is torn down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSummary {
    pub stream_id: Uuid,
    pub device_id: String,
    pub delay_secs: f64,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
}
