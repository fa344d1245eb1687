use std::fs;
use base::{FileLogger, StdoutLogger, init_file_logger, init_stdout_logger, log_file_name};
use log::{Level, Log, Record};

fn with_record(level: Level, line: u32, message: std::fmt::Arguments<'_>, f: impl FnOnce(&Record)) {
    f(&Record::builder()
        .level(level)
        .target("pipeline")
        .file(Some("controller.rs"))
        .line(Some(line))
        .args(message)
        .build());
}

#[test]
fn test_stdout_logger_accepts_records() {
    let logger = StdoutLogger;
    let metadata = log::Metadata::builder().level(Level::Trace).target("pipeline").build();
    assert!(logger.enabled(&metadata));
    with_record(Level::Warn, 7, format_args!("speech backend espeak failed"), |record| {
        logger.log(record)
    });
    logger.flush();
}

#[test]
fn test_file_logger_makes_missing_dirs() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("var").join("ikshana");
    FileLogger::new(&dir).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn test_file_logger_line_format() {
    let dir = tempfile::tempdir().unwrap();
    let logger = FileLogger::new(dir.path()).unwrap();

    with_record(Level::Error, 100, format_args!("camera went away"), |record| {
        logger.log(record)
    });
    with_record(Level::Info, 101, format_args!("stopping pipeline"), |record| {
        logger.log(record)
    });
    logger.flush();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("ikshana-"));
    assert!(names[0].ends_with(".log"));

    let content = fs::read_to_string(dir.path().join(&names[0])).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[ERROR] [thread:"));
    assert!(lines[0].ends_with("controller.rs:100 - camera went away"));
    assert!(lines[1].contains("[INFO]"));
    assert!(lines[1].ends_with("stopping pipeline"));
}

#[test]
fn test_log_file_name() {
    assert_eq!(log_file_name("2024-03-01"), "ikshana-2024-03-01.log");
}

#[test]
fn test_global_logger_installs_once() {
    init_stdout_logger();
    init_stdout_logger();
    assert!(log::max_level() >= log::LevelFilter::Error);
    log::info!("logger installed");
}

#[test]
fn test_file_logger_rejects_file_as_dir() {
    let root = tempfile::tempdir().unwrap();
    let blocker = root.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();
    assert!(init_file_logger(blocker.join("logs")).is_err());
}
