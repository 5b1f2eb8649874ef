//! Append-only run log shared by every invocation of the tool.
//!
//! Several processes may stamp files at once, so each append takes an
//! exclusive advisory lock on the log file itself (`flock` on Unix,
//! `LockFileEx` on Windows) and writes the whole line in one call.

use crate::error::Error;
use chrono::Local;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

#[derive(Clone, Debug)]
pub struct Journal {
    path: PathBuf,
}

/// Holds the exclusive lock; released on drop, including on write failure.
struct LockedLog<'a> {
    file: &'a File,
}

impl<'a> LockedLog<'a> {
    fn acquire(file: &'a File) -> std::io::Result<Self> {
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for LockedLog<'_> {
    fn drop(&mut self) {
        let _ = FileExt::unlock(self.file);
    }
}

pub fn format_line(message: &str) -> String {
    format!("{}\t{}\n", Local::now().format(TIMESTAMP_FORMAT), message)
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, message: &str) -> Result<(), Error> {
        let line = format_line(message);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(Error::file("open log", &self.path))?;

        let guard = LockedLog::acquire(&file).map_err(Error::file("lock log", &self.path))?;
        let mut out = &file;
        let written = out
            .write_all(line.as_bytes())
            .and_then(|()| out.flush())
            .map_err(Error::file("write log", &self.path));
        drop(guard);

        tracing::debug!(log = %self.path.display(), %message, "journal line appended");
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lines_are_tab_separated_and_appended() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("log.txt"));
        journal.append("first").unwrap();
        journal.append("second").unwrap();

        let text = fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("\tfirst"));
        assert!(lines[1].ends_with("\tsecond"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn timestamp_shape() {
        let line = format_line("m");
        let (stamp, rest) = line.split_once('\t').unwrap();
        assert_eq!(rest, "m\n");
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn existing_content_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "older line\n").unwrap();
        Journal::new(&path).append("newer").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("older line\n"));
        assert!(text.trim_end().ends_with("\tnewer"));
    }

    #[test]
    fn unwritable_location_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("missing").join("log.txt"));
        let err = journal.append("x").unwrap_err();
        assert!(err.to_string().contains("open log"));
    }

    #[test]
    fn threads_never_interleave_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let journal = Journal::new(&path);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        journal.append(&format!("worker {t} line {i} {}", "x".repeat(200))).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 200);
        for line in text.lines() {
            let (_, msg) = line.split_once('\t').unwrap();
            assert!(msg.starts_with("worker "));
            assert!(msg.ends_with(&"x".repeat(200)));
        }
    }
}
