use crate::models::audio_models::Capability;
use crate::traits::media_host::MediaHost;

/// Check once whether `host` exposes both media-device access and an audio
/// processing context.
pub fn probe<H: MediaHost + ?Sized>(host: &H) -> Capability {
    let media_devices = host.has_media_devices();
    let audio_processing = host.has_audio_processing();
    log::debug!(
        "Capability probe: media_devices={}, audio_processing={}",
        media_devices,
        audio_processing
    );

    if media_devices && audio_processing {
        Capability::Supported
    } else {
        Capability::Unsupported(Capability::UNSUPPORTED_MESSAGE.into())
    }
}
