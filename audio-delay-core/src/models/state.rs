use uuid::Uuid;

/// Session state machine.
///
/// ```text
/// Idle → (start) → Streaming → (stop | switch device) → Idle
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Streaming {
        stream_id: Uuid,
        device_id: String,
        delay_secs: f64,
    },
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::Streaming { .. })
    }

    /// The device being captured, if streaming.
    pub fn device_id(&self) -> Option<&str> {
        match self {
            Self::Streaming { device_id, .. } => Some(device_id),
            Self::Idle => None,
        }
    }
}
