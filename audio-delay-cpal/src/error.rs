use thiserror::Error;

use audio_delay_core::models::error::SessionError;

/// Failures from the cpal layer, before they are folded into `SessionError`.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to list devices: {0}")]
    Devices(#[from] cpal::DevicesError),

    #[error("failed to read device name: {0}")]
    DeviceName(#[from] cpal::DeviceNameError),

    #[error("no usable stream config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("failed to start stream: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("unsupported sample format: {0:?}")]
    SampleFormat(cpal::SampleFormat),

    #[error("input device not found: {0}")]
    InputNotFound(String),

    #[error("no default output device")]
    NoOutputDevice,
}

impl BackendError {
    /// Map a failure while wiring the delay stage and output.
    pub fn into_graph_error(self) -> SessionError {
        match self {
            Self::NoOutputDevice => SessionError::DeviceNotAvailable("default output".into()),
            other => SessionError::GraphFailed(other.to_string()),
        }
    }
}

impl From<BackendError> for SessionError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::InputNotFound(id) => SessionError::DeviceNotAvailable(id),
            BackendError::NoOutputDevice => SessionError::DeviceNotAvailable("default output".into()),
            BackendError::Build(cpal::BuildStreamError::DeviceNotAvailable) => {
                SessionError::DeviceNotAvailable("device disappeared while opening".into())
            }
            other => SessionError::StreamFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_devices_map_to_device_not_available() {
        assert_eq!(
            SessionError::from(BackendError::InputNotFound("USB Mic".into())),
            SessionError::DeviceNotAvailable("USB Mic".into())
        );
        assert!(matches!(
            BackendError::NoOutputDevice.into_graph_error(),
            SessionError::DeviceNotAvailable(_)
        ));
    }

    #[test]
    fn other_failures_keep_their_message() {
        let err = SessionError::from(BackendError::SampleFormat(cpal::SampleFormat::F64));
        assert!(matches!(err, SessionError::StreamFailed(ref m) if m.contains("F64")));

        let graph = BackendError::SampleFormat(cpal::SampleFormat::I8).into_graph_error();
        assert!(matches!(graph, SessionError::GraphFailed(_)));
    }
}
