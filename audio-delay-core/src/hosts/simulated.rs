//! In-memory media host.
//!
//! Behaves like a real host from the session's point of view: it mints
//! stream handles, tracks which streams have a live delay graph and tears
//! them down on request. Every call is appended to a shared [`HostJournal`]
//! so callers can assert on ordering after the host has been moved into a
//! session.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::models::audio_models::{DeviceKind, MediaDevice};
use crate::models::error::SessionError;
use crate::models::stream::StreamHandle;
use crate::traits::media_host::MediaHost;

/// A single call made against a [`SimulatedHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    RequestPermission,
    EnumerateDevices,
    OpenCaptureStream { device_id: String },
    BuildDelayGraph { device_id: String, delay_secs: f64 },
    StopTracks { device_id: String },
}

/// Shared, append-only record of host calls.
#[derive(Debug, Clone, Default)]
pub struct HostJournal {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl HostJournal {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().push(call);
    }
}

#[derive(Debug, Clone)]
struct LiveStream {
    device_id: String,
    delay_secs: Option<f64>,
}

/// Simulated host with configurable capabilities and failures.
#[derive(Debug)]
pub struct SimulatedHost {
    media_devices: bool,
    audio_processing: bool,
    deny_permission: bool,
    fail_graph: bool,
    devices: Vec<MediaDevice>,
    failing_devices: HashSet<String>,
    live: HashMap<Uuid, LiveStream>,
    journal: HostJournal,
}

impl SimulatedHost {
    /// A fully capable host with no devices attached.
    pub fn new() -> Self {
        Self {
            media_devices: true,
            audio_processing: true,
            deny_permission: false,
            fail_graph: false,
            devices: Vec::new(),
            failing_devices: HashSet::new(),
            live: HashMap::new(),
            journal: HostJournal::default(),
        }
    }

    /// A host with a typical mix of devices, used by the demo mode.
    pub fn demo() -> Self {
        Self::new().with_devices(vec![
            MediaDevice::audio_input("default", "Default"),
            MediaDevice::audio_input("mic-1", "Built-in Microphone"),
            MediaDevice::audio_output("speakers", "Built-in Speakers"),
            MediaDevice::audio_input("mic-2", "USB Mic"),
            MediaDevice {
                id: "cam-1".into(),
                label: "FaceTime Camera".into(),
                kind: DeviceKind::VideoInput,
                group_id: None,
            },
        ])
    }

    pub fn with_devices(mut self, devices: Vec<MediaDevice>) -> Self {
        self.devices = devices;
        self
    }

    pub fn without_media_devices(mut self) -> Self {
        self.media_devices = false;
        self
    }

    pub fn without_audio_processing(mut self) -> Self {
        self.audio_processing = false;
        self
    }

    pub fn denying_permission(mut self) -> Self {
        self.deny_permission = true;
        self
    }

    /// Opening a stream for `device_id` fails with `StreamFailed`.
    pub fn failing_device(mut self, device_id: impl Into<String>) -> Self {
        self.failing_devices.insert(device_id.into());
        self
    }

    /// Every delay graph construction fails with `GraphFailed`.
    pub fn failing_graph(mut self) -> Self {
        self.fail_graph = true;
        self
    }

    /// Replace the device list, as if devices were plugged or unplugged.
    pub fn set_devices(&mut self, devices: Vec<MediaDevice>) {
        self.devices = devices;
    }

    pub fn journal(&self) -> HostJournal {
        self.journal.clone()
    }

    /// Number of streams that are open and not yet stopped.
    pub fn live_stream_count(&self) -> usize {
        self.live.len()
    }

    /// Delay the graph for `stream_id` was built with, if it is live.
    pub fn live_delay(&self, stream_id: &Uuid) -> Option<f64> {
        self.live.get(stream_id).and_then(|s| s.delay_secs)
    }

    /// Device a live stream is bound to.
    pub fn live_device(&self, stream_id: &Uuid) -> Option<&str> {
        self.live.get(stream_id).map(|s| s.device_id.as_str())
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaHost for SimulatedHost {
    fn has_media_devices(&self) -> bool {
        self.media_devices
    }

    fn has_audio_processing(&self) -> bool {
        self.audio_processing
    }

    fn request_capture_permission(&mut self) -> Result<(), SessionError> {
        self.journal.record(HostCall::RequestPermission);
        if self.deny_permission {
            return Err(SessionError::PermissionDenied);
        }
        Ok(())
    }

    fn enumerate_devices(&mut self) -> Result<Vec<MediaDevice>, SessionError> {
        self.journal.record(HostCall::EnumerateDevices);
        Ok(self.devices.clone())
    }

    fn open_capture_stream(&mut self, device_id: &str) -> Result<StreamHandle, SessionError> {
        self.journal.record(HostCall::OpenCaptureStream {
            device_id: device_id.to_string(),
        });

        if self.deny_permission {
            return Err(SessionError::PermissionDenied);
        }
        let known = self
            .devices
            .iter()
            .any(|d| d.kind.is_audio_input() && d.id == device_id);
        if !known {
            return Err(SessionError::DeviceNotAvailable(device_id.to_string()));
        }
        if self.failing_devices.contains(device_id) {
            return Err(SessionError::StreamFailed(format!("could not open {device_id}")));
        }

        let handle = StreamHandle::new(device_id);
        self.live.insert(
            handle.id,
            LiveStream {
                device_id: device_id.to_string(),
                delay_secs: None,
            },
        );
        Ok(handle)
    }

    fn build_delay_graph(&mut self, stream: &StreamHandle, delay_secs: f64) -> Result<(), SessionError> {
        self.journal.record(HostCall::BuildDelayGraph {
            device_id: stream.device_id.clone(),
            delay_secs,
        });

        if self.fail_graph {
            return Err(SessionError::GraphFailed("simulated graph failure".into()));
        }
        let live = self
            .live
            .get_mut(&stream.id)
            .ok_or_else(|| SessionError::GraphFailed("stream is not open".into()))?;
        live.delay_secs = Some(delay_secs);
        Ok(())
    }

    fn stop_tracks(&mut self, stream: &StreamHandle) {
        self.journal.record(HostCall::StopTracks {
            device_id: stream.device_id.clone(),
        });
        self.live.remove(&stream.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_build_stop_lifecycle() {
        let mut host = SimulatedHost::demo();
        let handle = host.open_capture_stream("mic-2").unwrap();
        assert_eq!(host.live_device(&handle.id), Some("mic-2"));
        assert_eq!(host.live_delay(&handle.id), None);

        host.build_delay_graph(&handle, 2.0).unwrap();
        assert_eq!(host.live_delay(&handle.id), Some(2.0));

        host.stop_tracks(&handle);
        assert_eq!(host.live_stream_count(), 0);
        assert_eq!(
            host.journal().calls(),
            vec![
                HostCall::OpenCaptureStream { device_id: "mic-2".into() },
                HostCall::BuildDelayGraph { device_id: "mic-2".into(), delay_secs: 2.0 },
                HostCall::StopTracks { device_id: "mic-2".into() },
            ]
        );
    }

    #[test]
    fn unknown_or_non_input_devices_cannot_open() {
        let mut host = SimulatedHost::demo();
        assert_eq!(
            host.open_capture_stream("speakers"),
            Err(SessionError::DeviceNotAvailable("speakers".into()))
        );
        assert!(host.open_capture_stream("nope").is_err());
        assert_eq!(host.live_stream_count(), 0);
    }

    #[test]
    fn configured_failures_surface() {
        let mut host = SimulatedHost::demo().failing_device("mic-1").denying_permission();
        assert_eq!(host.request_capture_permission(), Err(SessionError::PermissionDenied));
        assert_eq!(host.open_capture_stream("mic-2"), Err(SessionError::PermissionDenied));

        let mut host = SimulatedHost::demo().failing_device("mic-1");
        assert!(matches!(
            host.open_capture_stream("mic-1"),
            Err(SessionError::StreamFailed(_))
        ));
    }

    #[test]
    fn journal_is_shared_across_clones() {
        let mut host = SimulatedHost::new();
        let journal = host.journal();
        assert!(journal.is_empty());
        host.enumerate_devices().unwrap();
        assert_eq!(journal.len(), 1);
        journal.clear();
        assert!(host.journal().is_empty());
    }
}
