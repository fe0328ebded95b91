use std::{
    any::Any,
    backtrace::Backtrace,
    fmt, fs,
    io::Write,
    panic::{self, Location},
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
};

use once_cell::sync::{Lazy, OnceCell};
use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::Context, layer::SubscriberExt, registry::LookupSpan, Layer};

use crate::WindowError;

static LOG_FILE: OnceCell<Mutex<fs::File>> = OnceCell::new();
static RECENT_PANIC_DETAILS: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));

/// Sends log output to stderr and to the given file (appending), and installs
/// a panic hook that logs panics.
///
/// Calling this more than once keeps the first log file.
pub fn init(log_file_path: &Path) -> Result<(), WindowError> {
    let log_file_error = |error| WindowError::LogFile {
        path: log_file_path.to_path_buf(),
        error,
    };

    if let Some(dir) = log_file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(log_file_error)?;
    }
    let log_file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_file_path)
        .map_err(log_file_error)?;
    if LOG_FILE.set(Mutex::new(log_file)).is_err() {
        tracing::warn!("logging already initialized");
        return Ok(());
    }

    panic::set_hook(Box::new(|info| {
        let details = panic_details(info.location(), info.payload());
        *lock(&RECENT_PANIC_DETAILS) = Some(details.clone());
        tracing::error!("{}", details);
    }));

    // Another logger may already be installed, e.g. by a test harness.
    if let Err(error) = install_subscriber() {
        let message = format!("tracing subscriber already set, not logging to file: {}", error);
        print_to_log_file(&message);
        tracing::warn!("{}", message);
    }
    if let Err(error) = LogTracer::init() {
        tracing::warn!("log records are not forwarded to tracing: {}", error);
    }
    Ok(())
}

fn install_subscriber() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    tracing::subscriber::set_global_default(tracing_subscriber::Registry::default().with(LogLayer))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes a raw line to the log file, if logging has been initialized.
pub fn print_to_log_file(line: &str) {
    if let Some(log_file) = LOG_FILE.get() {
        let mut log_file = lock(log_file);
        let _ = writeln!(log_file, "{}", line);
        let _ = log_file.flush();
    }
}

fn format_line(timestamp: &str, level: Level, message: &str) -> String {
    format!("[{}] [{}] {}", timestamp, level, message)
}

fn log_callback(level: Level, message: &str) {
    if level <= Level::INFO {
        let timestamp = chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S%.3f")
            .to_string();

        let line = format_line(&timestamp, level, message);

        eprintln!("{}", line);
        print_to_log_file(&line);
    }
}

/// Graphics backends log a lot at info level.
fn is_suppressed(target: &str, level: Level) -> bool {
    (target.starts_with("wgpu") || target.starts_with("naga")) && level >= Level::INFO
}

/// Return details of the most recent panic, clearing them.
pub fn take_recent_panic_details() -> Option<String> {
    lock(&RECENT_PANIC_DETAILS).take()
}

fn panic_details(location: Option<&Location<'_>>, payload: &(dyn Any + Send)) -> String {
    let location = location.map_or_else(|| "<unknown>".to_string(), |l| l.to_string());
    let msg = match payload.downcast_ref::<&'static str>() {
        Some(s) => *s,
        None => match payload.downcast_ref::<String>() {
            Some(s) => &s[..],
            None => "Box<Any>",
        },
    };
    let backtrace = Backtrace::force_capture();

    format!("Panicked at {}: {}\n{}", location, msg, backtrace)
}

struct LogLayer;

#[derive(Default)]
struct MessageVisitor {
    message: String,
    log_target: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "log.target" => self.log_target = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

impl<S> Layer<S> for LogLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let span = if let Some(scope) = ctx.event_scope(event) {
            format!(
                "[{}] ",
                scope
                    .from_root()
                    .map(|span| span.name())
                    .collect::<Vec<_>>()
                    .join(".")
            )
        } else {
            String::new()
        };

        let metadata = event.metadata();

        let target = visitor
            .log_target
            .unwrap_or_else(|| metadata.target().to_string());

        if is_suppressed(&target, *metadata.level()) {
            return;
        }

        let message = format!("{}[{}] {}", span, target, visitor.message);

        log_callback(*metadata.level(), &message);
    }
}
