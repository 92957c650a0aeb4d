use crate::config::FormatRequest;
use crate::errors::CaptureError;
use crate::types::{Frame, PixelFormat, Resolution};

// MARK: - Backend traits

/// Opens camera streams by OS device index.
///
/// Implementations:
/// - [`NativeBackend`] — `nokhwa` (V4L2 / Media Foundation / AVFoundation)
pub trait CameraBackend {
    /// Opens device `index`, accepting the closest format to `request`.
    fn open(
        &mut self,
        index: u32,
        request: FormatRequest,
    ) -> Result<Box<dyn CameraStream>, CaptureError>;
}

/// One open device handle. Dropping it releases the device.
pub trait CameraStream {
    /// Negotiated frame size.
    fn resolution(&self) -> Resolution;

    /// Negotiated wire format.
    fn pixel_format(&self) -> PixelFormat;

    /// Blocks until the next frame arrives and decodes it to RGB.
    fn read_frame(&mut self) -> Result<Frame, CaptureError>;

    /// Rate as reported by the driver; 0 or negative when unknown.
    fn frame_rate(&self) -> f64;
}

// MARK: - NativeBackend

/// The platform camera stack. Without the `native-camera` feature every open
/// fails with [`CaptureError::BackendUnavailable`].
#[derive(Debug, Default)]
pub struct NativeBackend;

impl CameraBackend for NativeBackend {
    #[cfg(feature = "native-camera")]
    fn open(
        &mut self,
        index: u32,
        request: FormatRequest,
    ) -> Result<Box<dyn CameraStream>, CaptureError> {
        Ok(Box::new(native::NokhwaStream::open(index, request)?))
    }

    #[cfg(not(feature = "native-camera"))]
    fn open(
        &mut self,
        index: u32,
        _request: FormatRequest,
    ) -> Result<Box<dyn CameraStream>, CaptureError> {
        tracing::warn!("NativeBackend::open({index}) — built without native-camera");
        Err(CaptureError::BackendUnavailable)
    }
}

// ── nokhwa implementation ─────────────────────────────────────────────────────

#[cfg(feature = "native-camera")]
mod native {
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    };
    use nokhwa::Camera;
    use tracing::{debug, info};

    use super::CameraStream;
    use crate::config::FormatRequest;
    use crate::errors::CaptureError;
    use crate::types::{Frame, PixelFormat, Resolution};

    /// Nominal rate attached to the format request; drivers pick the closest.
    const REQUESTED_FPS: u32 = 30;

    pub(super) struct NokhwaStream {
        camera: Camera,
        index: u32,
    }

    impl NokhwaStream {
        pub(super) fn open(index: u32, request: FormatRequest) -> Result<Self, CaptureError> {
            let target = CameraFormat::new(
                nokhwa::utils::Resolution::new(
                    request.resolution.width,
                    request.resolution.height,
                ),
                to_frame_format(request.pixel_format),
                REQUESTED_FPS,
            );
            let requested =
                RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(target));

            let mut camera = Camera::new(CameraIndex::Index(index), requested).map_err(|e| {
                CaptureError::DeviceUnavailable {
                    index,
                    reason: e.to_string(),
                }
            })?;

            camera
                .open_stream()
                .map_err(|e| CaptureError::StreamFailed {
                    index,
                    reason: e.to_string(),
                })?;

            info!(
                "Camera {} opened: {} {}x{} {:?} @ {} fps",
                index,
                camera.info().human_name(),
                camera.resolution().width(),
                camera.resolution().height(),
                camera.frame_format(),
                camera.frame_rate()
            );
            Ok(Self { camera, index })
        }
    }

    impl CameraStream for NokhwaStream {
        fn resolution(&self) -> Resolution {
            let res = self.camera.resolution();
            Resolution::new(res.width(), res.height())
        }

        fn pixel_format(&self) -> PixelFormat {
            from_frame_format(self.camera.frame_format())
        }

        fn read_frame(&mut self) -> Result<Frame, CaptureError> {
            let buffer = self.camera.frame().map_err(|e| CaptureError::ReadFailed {
                reason: e.to_string(),
            })?;
            let decoded = buffer
                .decode_image::<RgbFormat>()
                .map_err(|e| CaptureError::ReadFailed {
                    reason: e.to_string(),
                })?;

            let (width, height) = (decoded.width(), decoded.height());
            Frame::from_raw(width, height, decoded.into_raw()).ok_or_else(|| {
                CaptureError::ReadFailed {
                    reason: format!("decoded buffer does not fit {width}x{height} RGB"),
                }
            })
        }

        fn frame_rate(&self) -> f64 {
            f64::from(self.camera.frame_rate())
        }
    }

    impl Drop for NokhwaStream {
        fn drop(&mut self) {
            let _ = self.camera.stop_stream();
            debug!("Camera {} stream stopped", self.index);
        }
    }

    fn to_frame_format(format: PixelFormat) -> FrameFormat {
        match format {
            PixelFormat::Mjpeg => FrameFormat::MJPEG,
            PixelFormat::Yuyv => FrameFormat::YUYV,
            PixelFormat::Nv12 => FrameFormat::NV12,
            PixelFormat::Rgb => FrameFormat::RAWRGB,
            PixelFormat::Gray => FrameFormat::GRAY,
        }
    }

    fn from_frame_format(format: FrameFormat) -> PixelFormat {
        match format {
            FrameFormat::MJPEG => PixelFormat::Mjpeg,
            FrameFormat::YUYV => PixelFormat::Yuyv,
            FrameFormat::NV12 => PixelFormat::Nv12,
            FrameFormat::GRAY => PixelFormat::Gray,
            _ => PixelFormat::Rgb,
        }
    }
}
