//! Video-input device enumeration.

use tracing::debug;

use crate::errors::CaptureError;
use crate::types::DeviceDescriptor;

/// Lists the attached cameras in OS order. Queries the OS on every call.
///
/// Duplicate names are kept as separate entries.
#[cfg(feature = "native-camera")]
pub fn list_devices() -> Result<Vec<DeviceDescriptor>, CaptureError> {
    use nokhwa::utils::ApiBackend;

    let cameras = nokhwa::query(ApiBackend::Auto).map_err(|e| CaptureError::Enumeration {
        reason: e.to_string(),
    })?;

    let devices = cameras
        .iter()
        .enumerate()
        .map(|(position, info)| {
            // Backends that address devices by path fall back to list order.
            let index = info
                .index()
                .as_index()
                .unwrap_or_else(|_| u32::try_from(position).unwrap_or(u32::MAX));
            DeviceDescriptor::new(info.human_name(), index)
        })
        .collect::<Vec<_>>();

    debug!("Enumerated {} camera(s)", devices.len());
    Ok(devices)
}

#[cfg(not(feature = "native-camera"))]
pub fn list_devices() -> Result<Vec<DeviceDescriptor>, CaptureError> {
    debug!("Built without native-camera — no devices");
    Ok(Vec::new())
}
