use {
    chrono::Utc,
    log::{LevelFilter, Log, Metadata, Record},
    std::{
        env,
        fs::{self, File, OpenOptions},
        io::Write,
        path::{Path, PathBuf},
        sync::Mutex,
    },
};

/// A logger that writes to stdout.
pub struct StdoutLogger;

/// A logger that writes to date-named files with automatic day rollover.
pub struct FileLogger {
    state: Mutex<FileLoggerState>,
}

struct FileLoggerState {
    dir: PathBuf,
    current_date: String,
    file: File,
}

fn open_day_file(dir: &Path, date: &str) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(log_file_name(date)))
}

/// Name of the log file for `date`, e.g. `ikshana-2024-03-01.log`.
pub fn log_file_name(date: &str) -> String {
    format!("ikshana-{}.log", date)
}

fn format_record(record: &Record) -> String {
    format!(
        "{} [{}] [thread:{:?}] {}:{} - {}",
        format_timestamp(),
        record.level(),
        std::thread::current().id(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

impl FileLogger {
    /// Create a new FileLogger that writes to the specified directory.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let current_date = format_today();
        let file = open_day_file(&dir, &current_date)?;
        Ok(FileLogger {
            state: Mutex::new(FileLoggerState {
                dir,
                current_date,
                file,
            }),
        })
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        println!("{}", format_record(record));
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let today = format_today();
        if today != state.current_date {
            match open_day_file(&state.dir, &today) {
                Ok(file) => {
                    state.file = file;
                    state.current_date = today;
                }
                Err(error) => {
                    // keep writing to the old file
                    eprintln!("Failed to open log file for {}: {}", today, error);
                }
            }
        }

        let line = format_record(record);
        if let Err(error) = writeln!(state.file, "{}", line) {
            eprintln!("Failed to write to log file: {}", error);
            eprintln!("{}", line);
        }
    }

    fn flush(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.file.flush().ok();
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Current UTC date as `YYYY-MM-DD`.
pub fn format_today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Environment variable overriding the log level, e.g. `warn` or `trace`.
pub const LEVEL_VAR: &str = "IKSHANA_LOG_LEVEL";

/// Level from `setting` if it names one, else Debug in debug builds and Info
/// in release builds.
pub fn resolve_level(setting: Option<&str>) -> LevelFilter {
    match setting.map(str::parse::<LevelFilter>) {
        Some(Ok(level)) => level,
        _ if cfg!(debug_assertions) => LevelFilter::Debug,
        _ => LevelFilter::Info,
    }
}

fn install(logger: &'static dyn Log) {
    let setting = env::var(LEVEL_VAR).ok();
    if log::set_logger(logger).is_ok() {
        log::set_max_level(resolve_level(setting.as_deref()));
    }
}

/// Install [`StdoutLogger`] as the global logger at the level from
/// [`resolve_level`]. Only the first logger installed in a process counts.
pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger;
    install(&LOGGER);
}

/// Install a [`FileLogger`] writing into `dir` as the global logger.
///
/// Fails if the directory or today's file cannot be created.
pub fn init_file_logger(dir: impl Into<PathBuf>) -> std::io::Result<()> {
    let logger = FileLogger::new(dir)?;
    // set_logger needs a &'static; this runs once per process
    install(Box::leak(Box::new(logger)));
    Ok(())
}

/// Log a fatal error and exit the process with status 1.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
        $crate::log::logger().flush();
        std::process::exit(1);
    }};
}
