use std::collections::HashMap;

use cpal::traits::HostTrait;

use audio_delay_core::models::audio_models::MediaDevice;
use audio_delay_core::models::error::SessionError;
use audio_delay_core::models::stream::StreamHandle;
use audio_delay_core::traits::media_host::MediaHost;

use crate::capability;
use crate::device_enumerator::DeviceEnumerator;
use crate::graph::CaptureGraph;

/// Settings for the native host.
#[derive(Debug, Clone, PartialEq)]
pub struct CpalHostConfig {
    /// Spare delay-line capacity on top of the delay, in seconds (default: 0.5).
    pub headroom_secs: f64,
}

impl Default for CpalHostConfig {
    fn default() -> Self {
        Self { headroom_secs: 0.5 }
    }
}

/// Native media host backed by the platform's default cpal host.
///
/// Stream handles map to [`CaptureGraph`]s; dropping the host drops every
/// graph and with it the underlying device streams.
pub struct CpalHost {
    host: cpal::Host,
    config: CpalHostConfig,
    graphs: HashMap<StreamHandle, CaptureGraph>,
}

impl CpalHost {
    pub fn new(config: CpalHostConfig) -> Self {
        let host = cpal::default_host();
        log::info!("Using audio host {:?}", host.id());
        Self {
            host,
            config,
            graphs: HashMap::new(),
        }
    }

    pub fn enumerator(&self) -> DeviceEnumerator<'_> {
        DeviceEnumerator::new(&self.host)
    }
}

impl Default for CpalHost {
    fn default() -> Self {
        Self::new(CpalHostConfig::default())
    }
}

impl MediaHost for CpalHost {
    fn has_media_devices(&self) -> bool {
        capability::has_input_enumeration(&self.host)
    }

    fn has_audio_processing(&self) -> bool {
        capability::has_default_output(&self.host)
    }

    fn request_capture_permission(&mut self) -> Result<(), SessionError> {
        if capability::check_microphone_access(&self.host) {
            Ok(())
        } else {
            Err(SessionError::PermissionDenied)
        }
    }

    fn enumerate_devices(&mut self) -> Result<Vec<MediaDevice>, SessionError> {
        let devices = self.enumerator().list_all()?;
        log::debug!("cpal reported {} devices", devices.len());
        Ok(devices)
    }

    fn open_capture_stream(&mut self, device_id: &str) -> Result<StreamHandle, SessionError> {
        let device = self.enumerator().find_input(device_id)?;
        let graph = CaptureGraph::open(&device, device_id)?;

        let handle = StreamHandle::new(device_id);
        self.graphs.insert(handle.clone(), graph);
        Ok(handle)
    }

    fn build_delay_graph(&mut self, stream: &StreamHandle, delay_secs: f64) -> Result<(), SessionError> {
        let graph = self
            .graphs
            .get_mut(stream)
            .ok_or_else(|| SessionError::GraphFailed(format!("stream {} is not open", stream.id)))?;
        graph
            .connect(&self.host, delay_secs, self.config.headroom_secs)
            .map_err(|e| e.into_graph_error())
    }

    fn stop_tracks(&mut self, stream: &StreamHandle) {
        match self.graphs.remove(stream) {
            Some(mut graph) => {
                graph.stop();
                log::debug!("Released capture stream on {}", graph.device_id());
            }
            None => log::debug!("Stream {} already released", stream.id),
        }
    }
}
