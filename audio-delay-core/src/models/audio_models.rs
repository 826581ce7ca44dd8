use serde::{Deserialize, Serialize};

/// Kind of media device reported by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    AudioInput,
    AudioOutput,
    VideoInput,
}

impl DeviceKind {
    pub fn is_audio_input(&self) -> bool {
        matches!(self, Self::AudioInput)
    }
}

/// A media device as enumerated by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDevice {
    pub id: String,
    pub label: String,
    pub kind: DeviceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl MediaDevice {
    pub fn audio_input(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: DeviceKind::AudioInput,
            group_id: None,
        }
    }

    pub fn audio_output(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: DeviceKind::AudioOutput,
            group_id: None,
        }
    }
}

/// Result of probing the host for the audio features the session needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Capability {
    #[default]
    Unknown,
    Supported,
    Unsupported(String),
}

impl Capability {
    pub const UNSUPPORTED_MESSAGE: &'static str =
        "The audio features required are not found on this host.";

    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported)
    }

    pub fn unsupported_message(&self) -> Option<&str> {
        match self {
            Self::Unsupported(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_kind_uses_host_names() {
        let json = serde_json::to_string(&MediaDevice::audio_input("mic-1", "Built-in")).unwrap();
        assert_eq!(json, r#"{"id":"mic-1","label":"Built-in","kind":"audioinput"}"#);

        let parsed: MediaDevice =
            serde_json::from_str(r#"{"id":"cam","label":"Camera","kind":"videoinput","group_id":"g1"}"#)
                .unwrap();
        assert_eq!(parsed.kind, DeviceKind::VideoInput);
        assert_eq!(parsed.group_id.as_deref(), Some("g1"));
    }

    #[test]
    fn capability_message_only_when_unsupported() {
        assert!(Capability::Unknown.unsupported_message().is_none());
        assert!(Capability::Supported.is_supported());
        let unsupported = Capability::Unsupported(Capability::UNSUPPORTED_MESSAGE.into());
        assert_eq!(
            unsupported.unsupported_message(),
            Some("The audio features required are not found on this host.")
        );
    }
}
