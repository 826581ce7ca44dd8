use std::sync::Arc;

use crate::models::audio_models::{Capability, MediaDevice};
use crate::models::config::SessionConfiguration;
use crate::models::delay::DelaySetting;
use crate::models::error::SessionError;
use crate::models::state::SessionState;
use crate::models::stream::{ActiveStream, StreamSummary};
use crate::session::probe;
use crate::traits::media_host::MediaHost;
use crate::traits::session_delegate::SessionDelegate;

/// Capture-and-playback session over an injected [`MediaHost`].
///
/// Owns the device list, the selected device id, the delay setting and the
/// single active stream. All transitions go through named operations:
///
/// ```text
/// [probe] → [refresh_devices] → [switch_device] → [start] ⇄ [stop]
/// ```
///
/// At most one stream is active. The delay is captured when a stream starts
/// and cannot change until it stops.
pub struct DelaySession<H: MediaHost> {
    host: H,
    capability: Capability,
    devices: Vec<MediaDevice>,
    selected_device_id: Option<String>,
    delay: DelaySetting,
    active: Option<ActiveStream>,
    delegate: Option<Arc<dyn SessionDelegate>>,
}

impl<H: MediaHost> DelaySession<H> {
    pub fn new(host: H, config: SessionConfiguration) -> Result<Self, SessionError> {
        let delay = DelaySetting::from_config(&config)?;

        Ok(Self {
            host,
            capability: Capability::Unknown,
            devices: Vec::new(),
            selected_device_id: None,
            delay,
            active: None,
            delegate: None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    pub fn devices(&self) -> &[MediaDevice] {
        &self.devices
    }

    pub fn selected_device_id(&self) -> Option<&str> {
        self.selected_device_id.as_deref()
    }

    /// The selected device, if it is still in the current list.
    pub fn selected_device(&self) -> Option<&MediaDevice> {
        let id = self.selected_device_id.as_deref()?;
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn delay(&self) -> &DelaySetting {
        &self.delay
    }

    pub fn active_stream(&self) -> Option<&ActiveStream> {
        self.active.as_ref()
    }

    pub fn is_streaming(&self) -> bool {
        self.active.is_some()
    }

    pub fn state(&self) -> SessionState {
        match &self.active {
            Some(active) => SessionState::Streaming {
                stream_id: active.handle.id,
                device_id: active.handle.device_id.clone(),
                delay_secs: active.delay_secs,
            },
            None => SessionState::Idle,
        }
    }

    /// Probe the host once and record the result.
    pub fn probe(&mut self) -> &Capability {
        let capability = probe::probe(&self.host);
        match &capability {
            Capability::Supported => log::info!("Host supports audio capture and delayed playback"),
            Capability::Unsupported(message) => log::warn!("Host unsupported: {}", message),
            Capability::Unknown => {}
        }

        self.capability = capability;
        if let Some(ref delegate) = self.delegate {
            delegate.on_capability_changed(&self.capability);
        }
        &self.capability
    }

    /// Request capture permission and replace the list with the host's
    /// audio inputs, in host order.
    ///
    /// Permission or enumeration failures are reported to the delegate and
    /// leave the previous list in place.
    pub fn refresh_devices(&mut self) -> Result<&[MediaDevice], SessionError> {
        self.ensure_supported()?;

        if let Err(e) = self.host.request_capture_permission() {
            log::warn!("Capture permission not granted: {}", e);
            self.report_error(&e);
            return Ok(&self.devices);
        }

        let all = match self.host.enumerate_devices() {
            Ok(devices) => devices,
            Err(e) => {
                log::warn!("Device enumeration failed: {}", e);
                self.report_error(&e);
                return Ok(&self.devices);
            }
        };

        let total = all.len();
        self.devices = all
            .into_iter()
            .filter(|d| d.kind.is_audio_input())
            .enumerate()
            .map(|(i, mut d)| {
                if d.label.trim().is_empty() {
                    d.label = format!("Input device {}", i + 1);
                }
                d
            })
            .collect();
        log::info!("Found {} audio inputs ({} devices total)", self.devices.len(), total);

        if let Some(id) = self.selected_device_id.as_deref() {
            if !self.devices.iter().any(|d| d.id == id) {
                log::debug!("Selected device {} is no longer listed", id);
            }
        }

        if let Some(ref delegate) = self.delegate {
            delegate.on_devices_changed(&self.devices);
        }
        Ok(&self.devices)
    }

    /// Set the delay, clamped into range. Returns the stored value.
    pub fn set_delay(&mut self, delay_secs: f64) -> Result<f64, SessionError> {
        if self.is_streaming() {
            return Err(SessionError::DelayLocked);
        }
        let value = self.delay.set(delay_secs)?;
        log::debug!("Delay set to {:.2}s", value);
        Ok(value)
    }

    /// Move the delay by `steps` increments, clamped into range.
    pub fn nudge_delay(&mut self, steps: i32) -> Result<f64, SessionError> {
        if self.is_streaming() {
            return Err(SessionError::DelayLocked);
        }
        let value = self.delay.nudge(steps);
        log::debug!("Delay set to {:.2}s", value);
        Ok(value)
    }

    /// Stop any active stream, then select `device_id`.
    ///
    /// Never restarts capture. An empty id clears the selection.
    pub fn switch_device(&mut self, device_id: &str) -> Result<Option<StreamSummary>, SessionError> {
        self.ensure_supported()?;

        let stopped = self.stop();

        self.selected_device_id = if device_id.is_empty() {
            None
        } else {
            Some(device_id.to_string())
        };
        log::info!("Selected device: {}", device_id);

        if let Some(ref delegate) = self.delegate {
            delegate.on_selection_changed(self.selected_device_id.as_deref());
        }
        Ok(stopped)
    }

    /// Start capturing from the selected device.
    /// Transitions: idle → streaming.
    pub fn start(&mut self) -> Result<ActiveStream, SessionError> {
        let device_id = match self.selected_device_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(SessionError::MissingDevice),
        };
        self.ensure_supported()?;
        if self.is_streaming() {
            return Err(SessionError::AlreadyStreaming);
        }

        let delay_secs = self.delay.value();
        let handle = self.host.open_capture_stream(&device_id)?;

        if let Err(e) = self.host.build_delay_graph(&handle, delay_secs) {
            log::error!("Failed to build delay graph for {}: {}", device_id, e);
            self.host.stop_tracks(&handle);
            return Err(e);
        }

        let active = ActiveStream::new(handle, delay_secs);
        log::info!(
            "Capture started on {} with {:.2}s delay (stream {})",
            device_id,
            delay_secs,
            active.handle.id
        );
        self.active = Some(active.clone());
        self.notify_state();
        Ok(active)
    }

    /// Select `device_id` and start capturing from it.
    pub fn start_device(&mut self, device_id: &str) -> Result<ActiveStream, SessionError> {
        if self.is_streaming() {
            return Err(SessionError::AlreadyStreaming);
        }
        if device_id.is_empty() {
            return Err(SessionError::MissingDevice);
        }
        self.switch_device(device_id)?;
        self.start()
    }

    /// Stop the active stream, if any.
    /// Transitions: streaming → idle. No-op when idle.
    pub fn stop(&mut self) -> Option<StreamSummary> {
        let active = self.active.take()?;
        self.host.stop_tracks(&active.handle);

        let summary = active.summarize();
        log::info!(
            "Capture stopped on {} after {:.1}s",
            summary.device_id,
            summary.duration_secs
        );
        self.notify_state();
        Some(summary)
    }

    // --- Internal helpers ---

    fn ensure_supported(&self) -> Result<(), SessionError> {
        match &self.capability {
            Capability::Supported => Ok(()),
            Capability::Unsupported(message) => Err(SessionError::Unsupported(message.clone())),
            Capability::Unknown => Err(SessionError::Unsupported("capability probe has not run".into())),
        }
    }

    fn notify_state(&self) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&self.state());
        }
    }

    fn report_error(&self, error: &SessionError) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(error);
        }
    }
}

impl<H: MediaHost> Drop for DelaySession<H> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            log::debug!("Stopping stream {} on drop", active.handle.id);
            self.host.stop_tracks(&active.handle);
        }
    }
}
