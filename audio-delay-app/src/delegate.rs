use std::sync::Arc;

use audio_delay_core::{Capability, MediaDevice, SessionDelegate, SessionError, SessionState};

/// SessionDelegate that forwards session events to the log.
pub struct LogDelegate;

impl LogDelegate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

impl SessionDelegate for LogDelegate {
    fn on_capability_changed(&self, capability: &Capability) {
        log::debug!("capability: {:?}", capability);
    }

    fn on_devices_changed(&self, devices: &[MediaDevice]) {
        for device in devices {
            log::debug!("input device {:?} ({})", device.id, device.label);
        }
    }

    fn on_selection_changed(&self, device_id: Option<&str>) {
        log::debug!("selection: {}", device_id.unwrap_or("<none>"));
    }

    fn on_state_changed(&self, state: &SessionState) {
        match state {
            SessionState::Idle => log::info!("state: idle"),
            SessionState::Streaming {
                device_id,
                delay_secs,
                ..
            } => log::info!("state: streaming {} at {:.1}s", device_id, delay_secs),
        }
    }

    fn on_error(&self, error: &SessionError) {
        log::warn!("session error: {}", error);
    }
}
