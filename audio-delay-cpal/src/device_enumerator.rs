//! Audio device enumeration through cpal.
//!
//! cpal has no stable device identifier, so the device name doubles as the
//! id. Devices sharing a name get a ` (2)`, ` (3)` ... suffix in enumeration
//! order so every id stays unique and can be resolved back to a device.

use cpal::traits::{DeviceTrait, HostTrait};

use audio_delay_core::models::audio_models::{DeviceKind, MediaDevice};

use crate::error::BackendError;

/// Lists input and output devices of a cpal host.
pub struct DeviceEnumerator<'a> {
    host: &'a cpal::Host,
}

impl<'a> DeviceEnumerator<'a> {
    pub fn new(host: &'a cpal::Host) -> Self {
        Self { host }
    }

    /// Input devices first, then outputs, each in host order.
    pub fn list_all(&self) -> Result<Vec<MediaDevice>, BackendError> {
        let mut devices: Vec<MediaDevice> = self
            .list_input_devices()?
            .into_iter()
            .map(|(device, _)| device)
            .collect();

        match self.list_output_devices() {
            Ok(outputs) => devices.extend(outputs),
            Err(e) => log::warn!("Output device enumeration failed: {}", e),
        }
        Ok(devices)
    }

    /// Active capture devices paired with their cpal handle.
    pub fn list_input_devices(&self) -> Result<Vec<(MediaDevice, cpal::Device)>, BackendError> {
        let devices: Vec<cpal::Device> = self.host.input_devices()?.collect();
        let names = device_names(&devices);
        let ids = unique_ids(&names);

        Ok(ids
            .into_iter()
            .zip(names)
            .zip(devices)
            .map(|((id, name), device)| {
                (
                    MediaDevice {
                        id,
                        label: name,
                        kind: DeviceKind::AudioInput,
                        group_id: None,
                    },
                    device,
                )
            })
            .collect())
    }

    /// Active render devices.
    pub fn list_output_devices(&self) -> Result<Vec<MediaDevice>, BackendError> {
        let devices: Vec<cpal::Device> = self.host.output_devices()?.collect();
        let names = device_names(&devices);
        let ids = unique_ids(&names);

        Ok(ids
            .into_iter()
            .zip(names)
            .map(|(id, label)| MediaDevice {
                id,
                label,
                kind: DeviceKind::AudioOutput,
                group_id: None,
            })
            .collect())
    }

    /// Resolve an id produced by [`list_input_devices`](Self::list_input_devices).
    pub fn find_input(&self, device_id: &str) -> Result<cpal::Device, BackendError> {
        self.list_input_devices()?
            .into_iter()
            .find(|(device, _)| device.id == device_id)
            .map(|(_, device)| device)
            .ok_or_else(|| BackendError::InputNotFound(device_id.to_string()))
    }
}

fn device_names(devices: &[cpal::Device]) -> Vec<String> {
    devices
        .iter()
        .enumerate()
        .map(|(i, device)| match device.name() {
            Ok(name) => name,
            Err(e) => {
                log::debug!("Device {} has no readable name: {}", i, e);
                String::new()
            }
        })
        .collect()
}

/// Derive unique ids from possibly duplicated names, keeping order.
fn unique_ids(names: &[String]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("device-{}", i + 1)
        } else {
            name.clone()
        };
        let mut candidate = base.clone();
        let mut n = 2;
        while ids.contains(&candidate) {
            candidate = format!("{} ({})", base, n);
            n += 1;
        }
        ids.push(candidate);
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn distinct_names_are_used_verbatim() {
        assert_eq!(
            unique_ids(&names(&["Built-in", "USB Mic"])),
            names(&["Built-in", "USB Mic"])
        );
    }

    #[test]
    fn duplicate_names_get_suffixes_in_order() {
        assert_eq!(
            unique_ids(&names(&["Headset", "Headset", "Built-in", "Headset"])),
            names(&["Headset", "Headset (2)", "Built-in", "Headset (3)"])
        );
    }

    #[test]
    fn unnamed_devices_get_positional_ids() {
        assert_eq!(
            unique_ids(&names(&["", "Mic", " "])),
            names(&["device-1", "Mic", "device-3"])
        );
    }
}
