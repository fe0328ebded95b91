use std::{error, fmt, io, path::PathBuf};

/// An error that prevents the window from opening or continuing to render.
#[derive(Debug)]
#[allow(missing_docs)]
pub enum WindowError {
    LogFile { path: PathBuf, error: io::Error },
    EventLoop(winit::error::EventLoopError),
    CreateWindow(winit::error::OsError),
    CreateSurface(wgpu::CreateSurfaceError),
    NoCompatibleAdapter,
    RequestDevice(wgpu::RequestDeviceError),
    /// The surface reports no formats for the chosen adapter.
    UnsupportedSurface,
    /// A validation error raised while building the render pipelines,
    /// typically a shader that failed to compile.
    Pipeline(wgpu::Error),
    SurfaceOutOfMemory,
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::LogFile { path, error } => {
                write!(f, "failed to open log file {}: {}", path.display(), error)
            }
            WindowError::EventLoop(error) => write!(f, "event loop error: {}", error),
            WindowError::CreateWindow(error) => write!(f, "failed to create window: {}", error),
            WindowError::CreateSurface(error) => {
                write!(f, "failed to create surface: {}", error)
            }
            WindowError::NoCompatibleAdapter => write!(f, "no compatible GPU adapter"),
            WindowError::RequestDevice(error) => {
                write!(f, "failed to request GPU device: {}", error)
            }
            WindowError::UnsupportedSurface => {
                write!(f, "surface is not supported by the GPU adapter")
            }
            WindowError::Pipeline(error) => {
                write!(f, "shader compilation error:\n{}", error)
            }
            WindowError::SurfaceOutOfMemory => {
                write!(f, "out of memory while acquiring the next frame")
            }
        }
    }
}

impl error::Error for WindowError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            WindowError::LogFile { error, .. } => Some(error),
            WindowError::EventLoop(error) => Some(error),
            WindowError::CreateWindow(error) => Some(error),
            WindowError::CreateSurface(error) => Some(error),
            WindowError::RequestDevice(error) => Some(error),
            WindowError::Pipeline(error) => Some(error),
            WindowError::NoCompatibleAdapter
            | WindowError::UnsupportedSurface
            | WindowError::SurfaceOutOfMemory => None,
        }
    }
}

impl From<winit::error::EventLoopError> for WindowError {
    fn from(v: winit::error::EventLoopError) -> Self {
        Self::EventLoop(v)
    }
}

impl From<winit::error::OsError> for WindowError {
    fn from(v: winit::error::OsError) -> Self {
        Self::CreateWindow(v)
    }
}

impl From<wgpu::CreateSurfaceError> for WindowError {
    fn from(v: wgpu::CreateSurfaceError) -> Self {
        Self::CreateSurface(v)
    }
}

impl From<wgpu::RequestDeviceError> for WindowError {
    fn from(v: wgpu::RequestDeviceError) -> Self {
        Self::RequestDevice(v)
    }
}

#[cfg(test)]
mod test {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            WindowError::NoCompatibleAdapter.to_string(),
            "no compatible GPU adapter"
        );
        assert_eq!(
            WindowError::SurfaceOutOfMemory.to_string(),
            "out of memory while acquiring the next frame"
        );

        let error = WindowError::LogFile {
            path: PathBuf::from("missing/log.txt"),
            error: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let message = error.to_string();
        assert!(message.starts_with("failed to open log file "));
        assert!(message.ends_with(": not found"));
        assert!(error.source().is_some());
    }
}
