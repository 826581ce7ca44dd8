//! Text rendering of the session: status, toggle, delay control, device list.

use std::fmt::Write;

use audio_delay_core::{Capability, DelaySession, MediaHost};

/// Which controls are usable right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub refresh_enabled: bool,
    pub record_enabled: bool,
    pub stop_enabled: bool,
    pub delay_enabled: bool,
}

impl Controls {
    pub fn of<H: MediaHost>(session: &DelaySession<H>) -> Self {
        let supported = session.capability().is_supported();
        let streaming = session.is_streaming();
        Self {
            refresh_enabled: supported,
            record_enabled: supported && !streaming && session.selected_device_id().is_some(),
            stop_enabled: supported && streaming,
            delay_enabled: supported && !streaming,
        }
    }
}

/// Render the whole screen for the current session state.
pub fn render<H: MediaHost>(session: &DelaySession<H>) -> String {
    let mut out = String::new();

    match session.capability() {
        Capability::Unknown => {
            out.push_str("Checking host for audio APIs\n");
            return out;
        }
        Capability::Unsupported(message) => {
            let _ = writeln!(out, "Unsupported: {}", message);
            return out;
        }
        Capability::Supported => {}
    }

    let controls = Controls::of(session);
    let devices = session.devices();

    out.push_str("Record from an audio input device and play it back with a delay.\n");
    out.push_str("Do not monitor through the same device you record from unless you want a feedback loop.\n\n");

    if devices.is_empty() {
        out.push_str("No devices detected  [devices] Detect available devices\n");
        return out;
    }

    if let Some(active) = session.active_stream() {
        let _ = writeln!(
            out,
            "Recording from {} with {:.1}s delay  [stop] Stop",
            active.handle.device_id, active.delay_secs
        );
    } else if controls.record_enabled {
        out.push_str("Not recording  [record] Record\n");
    } else {
        out.push_str("Not recording  (select a device to record)\n");
    }

    let delay = session.delay();
    let _ = writeln!(
        out,
        "Delay: {:.1}s ({:.1}-{:.1}s){}",
        delay.value(),
        delay.min(),
        delay.max(),
        if controls.delay_enabled { "" } else { "  [locked while recording]" }
    );

    out.push_str("\nDevices  [devices] Refresh\n");
    let selected = session.selected_device_id();
    for (i, device) in devices.iter().enumerate() {
        let marker = if selected == Some(device.id.as_str()) { '*' } else { ' ' };
        let _ = writeln!(out, "{} {}. {}", marker, i + 1, device.label);
    }
    out
}
