//! Input device listing and selection.

use crate::models::audio_models::AudioDevice;
use crate::models::error::CaptureError;
use crate::traits::audio_host::AudioHost;

/// Keep only devices with at least one input channel, preserving order
/// and host indices.
pub fn filter_input_devices(devices: &[AudioDevice]) -> Vec<AudioDevice> {
    devices.iter().filter(|d| d.is_input()).cloned().collect()
}

/// List input-capable devices in host-enumeration order.
pub fn list_input_devices<H: AudioHost + ?Sized>(host: &H) -> Result<Vec<AudioDevice>, CaptureError> {
    let devices = host.devices()?;
    let inputs = filter_input_devices(&devices);
    log::debug!("{} of {} devices accept input", inputs.len(), devices.len());
    Ok(inputs)
}

/// Resolve a user-entered id against the host's devices.
///
/// Fails when the id is negative, matches no device, or names a device
/// without input channels.
pub fn select_device(id: i64, devices: &[AudioDevice]) -> Result<AudioDevice, CaptureError> {
    let index = usize::try_from(id)
        .map_err(|_| CaptureError::InvalidSelection(format!("device id {} is negative", id)))?;

    let device = devices
        .iter()
        .find(|d| d.index == index)
        .ok_or_else(|| CaptureError::InvalidSelection(format!("no device with id {}", id)))?;

    if !device.is_input() {
        return Err(CaptureError::InvalidSelection(format!(
            "device {} ({}) has no input channels",
            id, device.name
        )));
    }

    Ok(device.clone())
}

/// Parse a device id typed at the prompt.
pub fn parse_selection(input: &str) -> Result<i64, CaptureError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| CaptureError::InvalidSelection(format!("'{}' is not a device id", trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{device, MockHost};

    fn speaker_and_mic() -> Vec<AudioDevice> {
        vec![device(0, "Speaker", 0), device(1, "Mic", 2)]
    }

    #[test]
    fn speaker_is_rejected_mic_is_selected() {
        let devices = speaker_and_mic();

        assert!(matches!(
            select_device(0, &devices),
            Err(CaptureError::InvalidSelection(_))
        ));

        let mic = select_device(1, &devices).unwrap();
        assert_eq!(mic.name, "Mic");
        assert_eq!(mic.max_input_channels, 2);
    }

    #[test]
    fn negative_and_out_of_range_ids_are_rejected() {
        let devices = speaker_and_mic();
        for id in [-1, -100, 2, 99, i64::MAX] {
            assert!(
                matches!(select_device(id, &devices), Err(CaptureError::InvalidSelection(_))),
                "id {} should be rejected",
                id
            );
        }
        assert!(select_device(0, &[]).is_err());
    }

    #[test]
    fn listing_skips_output_only_devices_without_renumbering() {
        let host = MockHost::new(vec![
            device(0, "HDMI", 0),
            device(1, "Headset", 1),
            device(2, "Speakers", 0),
            device(3, "Array Mic", 4),
        ]);

        let inputs = list_input_devices(&host).unwrap();
        let indices: Vec<usize> = inputs.iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![1, 3]);
        assert!(inputs.iter().all(|d| d.max_input_channels > 0));
    }

    #[test]
    fn listing_propagates_query_failure() {
        let host = MockHost::new(vec![]).fail_devices(CaptureError::DeviceQuery("host gone".into()));
        assert_eq!(
            list_input_devices(&host),
            Err(CaptureError::DeviceQuery("host gone".into()))
        );
    }

    #[test]
    fn selection_from_filtered_list_keeps_host_index() {
        let inputs = filter_input_devices(&[device(0, "Out", 0), device(1, "In", 1)]);
        assert_eq!(select_device(1, &inputs).unwrap().name, "In");
        assert!(select_device(0, &inputs).is_err());
    }

    #[test]
    fn parse_prompt_input() {
        assert_eq!(parse_selection("3\n"), Ok(3));
        assert_eq!(parse_selection("  -2 "), Ok(-2));
        assert!(matches!(parse_selection(""), Err(CaptureError::InvalidSelection(_))));
        assert!(matches!(parse_selection("mic"), Err(CaptureError::InvalidSelection(_))));
    }
}
