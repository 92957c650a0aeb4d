//! Capture session: at most one open camera, frames pulled on demand.
//!
//! There is no frame queue. Each [`CaptureSession::get_frame`] call blocks on
//! the device and returns whatever it produced; a slow consumer simply skips
//! frames inside the driver's own buffer.

use tracing::{info, warn};

use crate::backend::{CameraBackend, CameraStream, NativeBackend};
use crate::config::FormatRequest;
use crate::types::{CapturedFrame, FrameRate, PixelFormat, Resolution};

// ── State ─────────────────────────────────────────────────────────────────────

enum SessionState {
    Closed,
    Open(OpenCamera),
}

struct OpenCamera {
    index: u32,
    resolution: Resolution,
    pixel_format: PixelFormat,
    stream: Box<dyn CameraStream>,
}

/// Observable summary of the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Closed,
    Open {
        index: u32,
        resolution: Resolution,
        pixel_format: PixelFormat,
    },
}

// ── CaptureSession ────────────────────────────────────────────────────────────

pub struct CaptureSession {
    backend: Box<dyn CameraBackend>,
    request: FormatRequest,
    state: SessionState,
    read_failures: u64,
}

impl CaptureSession {
    pub fn new(backend: Box<dyn CameraBackend>, request: FormatRequest) -> Self {
        Self {
            backend,
            request,
            state: SessionState::Closed,
            read_failures: 0,
        }
    }

    /// Session backed by the platform camera stack.
    pub fn native(request: FormatRequest) -> Self {
        Self::new(Box::new(NativeBackend), request)
    }

    /// Releases any open handle, then opens `index`. Returns whether the
    /// session is now open; failures are logged, never raised.
    pub fn start(&mut self, index: u32) -> bool {
        self.release();
        self.read_failures = 0;

        match self.backend.open(index, self.request) {
            Ok(stream) => {
                let resolution = stream.resolution();
                let pixel_format = stream.pixel_format();
                info!(
                    "Capture session open on camera {} ({} {}, requested {} {})",
                    index,
                    resolution,
                    pixel_format,
                    self.request.resolution,
                    self.request.pixel_format
                );
                self.state = SessionState::Open(OpenCamera {
                    index,
                    resolution,
                    pixel_format,
                    stream,
                });
                true
            }
            Err(e) => {
                warn!("Camera {} could not be started: {}", index, e);
                false
            }
        }
    }

    /// Pulls the next frame. `None` when closed or when the read fails.
    ///
    /// With `with_fps` the device-reported rate is sampled alongside.
    pub fn get_frame(&mut self, with_fps: bool) -> Option<CapturedFrame> {
        let SessionState::Open(open) = &mut self.state else {
            return None;
        };

        match open.stream.read_frame() {
            Ok(frame) => {
                self.read_failures = 0;
                let fps = with_fps.then(|| FrameRate::from_reported(open.stream.frame_rate()));
                Some(CapturedFrame { frame, fps })
            }
            Err(e) => {
                self.read_failures += 1;
                // First failure, then every ~second at a 10ms tick.
                if self.read_failures == 1 || self.read_failures % 100 == 0 {
                    warn!(
                        "Camera {} read failed ({} in a row): {}",
                        open.index, self.read_failures, e
                    );
                }
                None
            }
        }
    }

    /// Closes the device handle. Safe to call on a closed session.
    pub fn release(&mut self) {
        if let SessionState::Open(open) = std::mem::replace(&mut self.state, SessionState::Closed)
        {
            info!("Releasing camera {}", open.index);
            drop(open.stream);
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open(_))
    }

    pub fn status(&self) -> SessionStatus {
        match &self.state {
            SessionState::Closed => SessionStatus::Closed,
            SessionState::Open(open) => SessionStatus::Open {
                index: open.index,
                resolution: open.resolution,
                pixel_format: open.pixel_format,
            },
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted in-memory camera used by the session and screenshot tests.

    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use crate::backend::{CameraBackend, CameraStream};
    use crate::config::FormatRequest;
    use crate::errors::CaptureError;
    use crate::types::{Frame, PixelFormat, Resolution};

    #[derive(Default)]
    pub struct Handles {
        pub open: Cell<u32>,
        pub max_open: Cell<u32>,
        pub opened_total: Cell<u32>,
        pub last_request: Cell<Option<FormatRequest>>,
    }

    /// Devices by index with their reported frame rate.
    pub struct FakeBackend {
        pub devices: HashMap<u32, f64>,
        pub handles: Rc<Handles>,
        pub fail_reads: Rc<Cell<bool>>,
        pub frames: Rc<RefCell<u8>>,
    }

    impl FakeBackend {
        pub fn with_devices(devices: &[(u32, f64)]) -> Self {
            Self {
                devices: devices.iter().copied().collect(),
                handles: Rc::default(),
                fail_reads: Rc::default(),
                frames: Rc::default(),
            }
        }
    }

    impl CameraBackend for FakeBackend {
        fn open(
            &mut self,
            index: u32,
            request: FormatRequest,
        ) -> Result<Box<dyn CameraStream>, CaptureError> {
            self.handles.last_request.set(Some(request));
            let Some(&rate) = self.devices.get(&index) else {
                return Err(CaptureError::DeviceUnavailable {
                    index,
                    reason: "no such device".into(),
                });
            };
            let handles = Rc::clone(&self.handles);
            handles.open.set(handles.open.get() + 1);
            handles.max_open.set(handles.max_open.get().max(handles.open.get()));
            handles.opened_total.set(handles.opened_total.get() + 1);
            Ok(Box::new(FakeStream {
                rate,
                handles,
                fail_reads: Rc::clone(&self.fail_reads),
                frames: Rc::clone(&self.frames),
            }))
        }
    }

    pub struct FakeStream {
        rate: f64,
        handles: Rc<Handles>,
        fail_reads: Rc<Cell<bool>>,
        frames: Rc<RefCell<u8>>,
    }

    impl CameraStream for FakeStream {
        fn resolution(&self) -> Resolution {
            Resolution::new(4, 2)
        }

        fn pixel_format(&self) -> PixelFormat {
            PixelFormat::Mjpeg
        }

        fn read_frame(&mut self) -> Result<Frame, CaptureError> {
            if self.fail_reads.get() {
                return Err(CaptureError::ReadFailed {
                    reason: "unplugged".into(),
                });
            }
            let mut n = self.frames.borrow_mut();
            *n = n.wrapping_add(1);
            Ok(Frame::from_pixel(4, 2, image::Rgb([*n, 10, 200])))
        }

        fn frame_rate(&self) -> f64 {
            self.rate
        }
    }

    impl Drop for FakeStream {
        fn drop(&mut self) {
            self.handles.open.set(self.handles.open.get() - 1);
        }
    }
}
