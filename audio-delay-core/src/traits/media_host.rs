use crate::models::audio_models::MediaDevice;
use crate::models::error::SessionError;
use crate::models::stream::StreamHandle;

/// Host-provided device and audio primitives.
///
/// Implemented by:
/// - `CpalHost` (native devices, `audio-delay-cpal`)
/// - `SimulatedHost` (in-memory, tests and demo mode)
///
/// All calls arrive from the thread that owns the session.
pub trait MediaHost {
    /// Whether the host exposes media-device enumeration and capture.
    fn has_media_devices(&self) -> bool;

    /// Whether the host can build an audio processing graph.
    fn has_audio_processing(&self) -> bool;

    /// Ask for capture permission. Hosts without a permission model succeed.
    fn request_capture_permission(&mut self) -> Result<(), SessionError> {
        Ok(())
    }

    /// List every media device the host knows about, in host order.
    fn enumerate_devices(&mut self) -> Result<Vec<MediaDevice>, SessionError>;

    /// Open a capture stream for `device_id`.
    fn open_capture_stream(&mut self, device_id: &str) -> Result<StreamHandle, SessionError>;

    /// Route `stream` through a fixed delay of `delay_secs` into the default output.
    fn build_delay_graph(&mut self, stream: &StreamHandle, delay_secs: f64) -> Result<(), SessionError>;

    /// Halt every track of `stream` and release its graph.
    fn stop_tracks(&mut self, stream: &StreamHandle);
}
