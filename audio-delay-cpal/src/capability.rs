//! Host capability checks.
//!
//! cpal has no permission prompt of its own. On macOS the OS asks for
//! microphone consent the first time an input stream is opened; on Linux and
//! Windows a blocked microphone surfaces as a failure to read the device's
//! input config.

use std::fmt::Display;

use cpal::traits::{DeviceTrait, HostTrait};

/// Whether the host can enumerate capture devices.
pub fn has_input_enumeration(host: &cpal::Host) -> bool {
    match host.input_devices() {
        Ok(_) => true,
        Err(e) => {
            log::debug!("Input enumeration unavailable: {}", e);
            false
        }
    }
}

/// Whether the host has a default output to play the delayed signal on.
pub fn has_default_output(host: &cpal::Host) -> bool {
    host.default_output_device().is_some()
}

/// Check whether any capture device can be queried.
///
/// A privacy block shows up as every input failing to report its config.
/// Hosts with no inputs at all are not blocked; enumeration reports the
/// empty list.
pub fn check_microphone_access(host: &cpal::Host) -> bool {
    match host.input_devices() {
        Ok(devices) => any_input_accessible(devices.map(|device| device.default_input_config())),
        Err(e) => {
            log::debug!("Input enumeration unavailable: {}", e);
            true
        }
    }
}

/// `true` if the list is empty or at least one input config was readable.
pub(crate) fn any_input_accessible<T, E, I>(configs: I) -> bool
where
    E: Display,
    I: IntoIterator<Item = Result<T, E>>,
{
    let mut seen = 0;
    for config in configs {
        seen += 1;
        match config {
            Ok(_) => return true,
            Err(e) => log::warn!("Input device {} is not accessible: {}", seen, e),
        }
    }
    seen == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broken_default_does_not_hide_a_working_mic() {
        let configs: Vec<Result<(), &str>> = vec![Err("device busy"), Ok(())];
        assert!(any_input_accessible(configs));
    }

    #[test]
    fn every_input_failing_means_blocked() {
        let configs: Vec<Result<(), String>> =
            vec![Err("permission denied".into()), Err("permission denied".into())];
        assert!(!any_input_accessible(configs));
    }

    #[test]
    fn no_inputs_is_not_a_denial() {
        assert!(any_input_accessible(Vec::<Result<(), &str>>::new()));
    }
}
