use crate::options::{LoggerOptions, LoggerPatch};
use crate::scope::Region;
use crate::severity::Severity;
use crate::sink::{DefaultSinkFactory, RollingFileSink, Sink, SinkFactory};
use std::fs;

fn date_key() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn file_options(dir: &std::path::Path, max_size: &str) -> LoggerOptions {
    let mut options = LoggerOptions::default();
    LoggerPatch::new()
        .with_file(true)
        .with_file_path(dir.to_string_lossy())
        .with_file_max_size(max_size)
        .apply(&mut options);
    options
}

#[test]
fn writes_land_in_a_dated_file() {
    let dir = tempfile::tempdir().unwrap();
    let options = file_options(dir.path(), "20m");
    let sink = RollingFileSink::new(Severity::Info, &options);
    sink.write(Severity::Info, "first line");
    sink.write(Severity::Error, "second line");
    let contents =
        fs::read_to_string(dir.path().join(format!("info-{}.log", date_key()))).unwrap();
    assert_eq!(contents, "first line\nsecond line\n");
}

#[test]
fn sink_filters_below_its_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let options = file_options(dir.path(), "20m");
    let sink = RollingFileSink::new(Severity::Warn, &options);
    sink.write(Severity::Info, "dropped");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    sink.write(Severity::Warn, "kept");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn oversized_files_rotate_aside() {
    let dir = tempfile::tempdir().unwrap();
    let options = file_options(dir.path(), "8b");
    let sink = RollingFileSink::new(Severity::Error, &options).without_compression();
    sink.write(Severity::Error, "0123456789");
    sink.write(Severity::Error, "next");
    let active =
        fs::read_to_string(dir.path().join(format!("error-{}.log", date_key()))).unwrap();
    let rotated =
        fs::read_to_string(dir.path().join(format!("error-{}.1.log", date_key()))).unwrap();
    assert_eq!(rotated, "0123456789\n");
    assert_eq!(active, "next\n");
}

#[test]
fn stale_rotated_files_are_pruned_on_roll() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("info-2000-01-01.log"), "old").unwrap();
    let options = file_options(dir.path(), "20m");
    let sink = RollingFileSink::new(Severity::Info, &options);
    sink.write(Severity::Info, "fresh");
    assert!(!dir.path().join("info-2000-01-01.log").exists());
    assert!(dir.path().join(format!("info-{}.log", date_key())).exists());
}

#[test]
fn count_retention_keeps_newest_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("debug-2001-01-01.log"), "a").unwrap();
    fs::write(dir.path().join("debug-2002-01-01.log"), "b").unwrap();
    let mut options = file_options(dir.path(), "20m");
    options.file_max_date = "1".to_string();
    let sink = RollingFileSink::new(Severity::Debug, &options);
    sink.write(Severity::Debug, "fresh");
    assert!(!dir.path().join("debug-2001-01-01.log").exists());
    assert!(!dir.path().join("debug-2002-01-01.log").exists());
    assert!(dir.path().join(format!("debug-{}.log", date_key())).exists());
}

#[test]
fn pruning_ignores_other_sinks_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("error-2000-01-01.log"), "other sink").unwrap();
    let options = file_options(dir.path(), "20m");
    let sink = RollingFileSink::new(Severity::Info, &options);
    sink.write(Severity::Info, "fresh");
    assert!(dir.path().join("error-2000-01-01.log").exists());
}

#[test]
fn default_factory_builds_console_and_per_severity_file_sinks() {
    let mut options = LoggerOptions::default();
    options.enable_file = true;
    options.level = Severity::Info;
    let sinks = DefaultSinkFactory.build(&options, &Region::global());
    // Console plus info/warn/error files.
    assert_eq!(sinks.len(), 4);

    options.enable_console = false;
    options.level = Severity::Error;
    let sinks = DefaultSinkFactory.build(&options, &Region::global());
    assert_eq!(sinks.len(), 1);

    options.enable_file = false;
    let sinks = DefaultSinkFactory.build(&options, &Region::global());
    assert!(sinks.is_empty());
}
