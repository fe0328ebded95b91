use std::{
    env,
    path::{Path, PathBuf},
};

use winit::window::Icon;

/// Configuration for the window and application environment.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    root_dir: PathBuf,
    relative_log_file_path: PathBuf,

    title: String,
    inner_size: [u32; 2],
    maximized: bool,
    icon: Option<Icon>,
    always_on_top: bool,
}

static_assertions::assert_impl_all!(Config: Send, Sync);

impl Default for Config {
    fn default() -> Self {
        let root_dir = if cfg!(debug_assertions) {
            env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        } else {
            env::current_exe()
                .ok()
                .and_then(|path| path.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."))
        };

        Self {
            root_dir,
            relative_log_file_path: "log.txt".into(),

            title: String::new(),
            inner_size: [800, 600],
            maximized: false,
            icon: None,
            always_on_top: false,
        }
    }
}

impl Config {
    /// Returns the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the directory that log files should be saved.
    ///
    /// By default:
    /// - In debug mode, this is the current working directory.
    /// - In release mode, this is the directory containing the executable.
    pub fn root_dir(&self) -> &Path {
        self.root_dir.as_path()
    }

    /// Sets the directory that log files should be saved.
    pub fn with_root_dir(mut self, root_dir: impl AsRef<Path>) -> Self {
        self.root_dir = root_dir.as_ref().to_path_buf();
        self
    }

    /// Gets the log file path relative to the root directory.
    pub fn relative_log_file_path(&self) -> &Path {
        self.relative_log_file_path.as_path()
    }

    /// Sets the log file path relative to the root directory.
    pub fn with_relative_log_file_path(mut self, path: impl AsRef<Path>) -> Self {
        self.relative_log_file_path = path.as_ref().to_path_buf();
        self
    }

    /// Returns the absolute log file path.
    pub fn log_file_path(&self) -> PathBuf {
        self.root_dir.join(&self.relative_log_file_path)
    }

    /// Returns the window title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Returns the initial logical size of the window's client area.
    pub fn inner_size(&self) -> [u32; 2] {
        self.inner_size
    }

    /// Sets the initial logical size of the window's client area.
    ///
    /// Zero dimensions are raised to 1.
    pub fn with_inner_size(mut self, width: u32, height: u32) -> Self {
        self.inner_size = [width.max(1), height.max(1)];
        self
    }

    /// Returns whether the window should start maximized.
    pub fn maximized(&self) -> bool {
        self.maximized
    }

    /// Sets whether the window should start maximized.
    pub fn with_maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }

    /// Returns the window icon.
    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    /// Sets the window icon (ignored on platforms without window icons).
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Returns whether the window should stay on top of other windows.
    pub fn always_on_top(&self) -> bool {
        self.always_on_top
    }

    /// Sets whether the window should stay on top of other windows.
    pub fn with_always_on_top(mut self, always_on_top: bool) -> Self {
        self.always_on_top = always_on_top;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.title(), "");
        assert_eq!(config.inner_size(), [800, 600]);
        assert_eq!(config.relative_log_file_path(), Path::new("log.txt"));
        assert!(!config.maximized());
        assert!(!config.always_on_top());
        assert!(config.icon().is_none());
    }

    #[test]
    fn test_builder() {
        let config = Config::new()
            .with_title("Rotating Triangle")
            .with_root_dir("/tmp/trispin")
            .with_relative_log_file_path("logs/run.txt")
            .with_inner_size(1024, 0)
            .with_maximized(true)
            .with_always_on_top(true);

        assert_eq!(config.title(), "Rotating Triangle");
        assert_eq!(
            config.log_file_path(),
            Path::new("/tmp/trispin").join("logs/run.txt")
        );
        assert_eq!(config.inner_size(), [1024, 1]);
        assert!(config.maximized());
        assert!(config.always_on_top());
    }
}
