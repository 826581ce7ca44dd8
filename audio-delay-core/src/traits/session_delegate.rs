use crate::models::audio_models::{Capability, MediaDevice};
use crate::models::error::SessionError;
use crate::models::state::SessionState;

/// Event delegate for session notifications.
///
/// Methods are called synchronously on the thread driving the session.
pub trait SessionDelegate: Send + Sync {
    /// Called once the capability probe has a result.
    fn on_capability_changed(&self, capability: &Capability);

    /// Called after the input device list was replaced.
    fn on_devices_changed(&self, devices: &[MediaDevice]);

    /// Called after the selected device id changed.
    fn on_selection_changed(&self, device_id: Option<&str>);

    /// Called when the session enters Idle or Streaming.
    fn on_state_changed(&self, state: &SessionState);

    /// Called for failures the session swallows (permission, enumeration).
    fn on_error(&self, error: &SessionError);
}
