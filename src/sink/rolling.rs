//! Rotating file sink.
//!
//! One active file per sink, keyed by the current date
//! (`<name>-<YYYY-MM-DD>.log`). The file rotates when the date key
//! changes or when the active file exceeds the configured size; size
//! overflow moves the active file aside to `<name>-<date>.<index>.log`.
//! On date rollover the sink prunes rotated files outside the retention
//! window and compresses the previous day's files on a background
//! thread.

use super::Sink;
use crate::options::{LoggerOptions, Retention, parse_retention_spec, parse_size_spec};
use crate::severity::Severity;
use chrono::{Local, NaiveDate};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
const DATE_KEY_LEN: usize = 10;

// Rotation specs are validated at configure time; fallbacks cover direct
// construction with unchecked options.
const FALLBACK_MAX_SIZE: u64 = 20 * 1024 * 1024;
const FALLBACK_RETENTION: Retention = Retention::Days(30);

/// Rotating file sink for a single severity threshold.
pub struct RollingFileSink {
    name: &'static str,
    min_level: Severity,
    dir: PathBuf,
    max_size: u64,
    retention: Retention,
    compress: bool,
    state: Mutex<WriterState>,
}

#[derive(Default)]
struct WriterState {
    date_key: String,
    index: u32,
    written: u64,
    file: Option<File>,
}

impl RollingFileSink {
    /// Builds the sink for `severity` from a resolved configuration.
    ///
    /// The sink is named by the severity label and only accepts messages
    /// at or above that severity.
    pub fn new(severity: Severity, options: &LoggerOptions) -> Self {
        Self {
            name: severity.as_str(),
            min_level: severity,
            dir: PathBuf::from(&options.file_path),
            max_size: parse_size_spec(&options.file_max_size).unwrap_or(FALLBACK_MAX_SIZE),
            retention: parse_retention_spec(&options.file_max_date).unwrap_or(FALLBACK_RETENTION),
            compress: true,
            state: Mutex::new(WriterState::default()),
        }
    }

    /// Disables compression of rotated files.
    pub fn without_compression(mut self) -> Self {
        self.compress = false;
        self
    }

    fn active_path(&self, date_key: &str) -> PathBuf {
        self.dir.join(format!("{}-{}.log", self.name, date_key))
    }

    fn rotated_path(&self, date_key: &str, index: u32) -> PathBuf {
        self.dir.join(format!("{}-{}.{}.log", self.name, date_key, index))
    }

    fn write_line(&self, state: &mut WriterState, line: &str) -> std::io::Result<()> {
        let today = Local::now().format(DATE_KEY_FORMAT).to_string();
        if state.file.is_none() || state.date_key != today {
            self.roll_to(state, today)?;
        } else if state.written >= self.max_size {
            self.roll_oversize(state)?;
        }
        if let Some(file) = state.file.as_mut() {
            file.write_all(line.as_bytes())?;
            file.write_all(b"\n")?;
            state.written += line.len() as u64 + 1;
        }
        Ok(())
    }

    /// Opens the active file for `date_key`, compressing the previous
    /// day's files and pruning files outside the retention window.
    fn roll_to(&self, state: &mut WriterState, date_key: String) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let previous = std::mem::take(&mut state.date_key);
        state.file = None;
        if self.compress && !previous.is_empty() && previous != date_key {
            self.compress_day(&previous);
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.active_path(&date_key))?;
        state.written = file.metadata().map(|meta| meta.len()).unwrap_or(0);
        state.date_key = date_key;
        state.index = 0;
        state.file = Some(file);
        if let Err(err) = prune_rotated(&self.dir, self.name, self.retention) {
            tracing::warn!(
                target: "nexus_log",
                sink = self.name,
                error = %err,
                "pruning rotated files failed"
            );
        }
        Ok(())
    }

    /// Moves the oversized active file aside and reopens a fresh one.
    fn roll_oversize(&self, state: &mut WriterState) -> std::io::Result<()> {
        state.file = None;
        let mut index = state.index + 1;
        while self.rotated_path(&state.date_key, index).exists() {
            index += 1;
        }
        state.index = index;
        let active = self.active_path(&state.date_key);
        fs::rename(&active, self.rotated_path(&state.date_key, index))?;
        let file = OpenOptions::new().create(true).append(true).open(&active)?;
        state.written = 0;
        state.file = Some(file);
        Ok(())
    }

    fn compress_day(&self, date_key: &str) {
        let dir = self.dir.clone();
        let prefix = format!("{}-{}", self.name, date_key);
        std::thread::spawn(move || {
            if let Err(err) = compress_matching(&dir, &prefix) {
                tracing::warn!(
                    target: "nexus_log",
                    error = %err,
                    "rotated file compression failed"
                );
            }
        });
    }
}

impl Sink for RollingFileSink {
    fn write(&self, severity: Severity, line: &str) {
        if !self.min_level.enables(severity) {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = self.write_line(&mut state, line) {
            tracing::warn!(
                target: "nexus_log",
                sink = self.name,
                error = %err,
                "file sink write failed"
            );
        }
    }
}

fn compress_matching(dir: &Path, prefix: &str) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(prefix) && name.ends_with(".log") {
            let source = entry.path();
            let target = source.with_extension("log.zst");
            let reader = File::open(&source)?;
            let writer = File::create(&target)?;
            zstd::stream::copy_encode(reader, writer, 0)?;
            fs::remove_file(&source)?;
        }
    }
    Ok(())
}

/// Removes rotated files for `stem` that fall outside the retention
/// window. File dates are taken from the `<stem>-<date>` name prefix.
fn prune_rotated(dir: &Path, stem: &str, retention: Retention) -> std::io::Result<()> {
    let today = Local::now().date_naive();
    let prefix = format!("{stem}-");
    let mut dated: Vec<(NaiveDate, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(rest) = name.strip_prefix(&prefix) else { continue };
        let Some(date_part) = rest.get(..DATE_KEY_LEN) else { continue };
        let Ok(date) = NaiveDate::parse_from_str(date_part, DATE_KEY_FORMAT) else {
            continue;
        };
        dated.push((date, entry.path()));
    }
    match retention {
        Retention::Days(days) => {
            for (date, path) in dated {
                if (today - date).num_days() > i64::from(days) {
                    fs::remove_file(path)?;
                }
            }
        }
        Retention::Count(count) => {
            if dated.len() > count as usize {
                dated.sort_by(|a, b| b.0.cmp(&a.0));
                for (_, path) in dated.into_iter().skip(count as usize) {
                    fs::remove_file(path)?;
                }
            }
        }
    }
    Ok(())
}
