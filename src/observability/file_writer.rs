//! Size-rotated append-only file writer for trace output.
//!
//! When the trace file grows past its size limit it is shifted into numbered
//! backups (`serpdeck-otlp.json.1` is the newest) and a fresh file is started.
//! Only [`MAX_BACKUP_FILES`] backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of numbered backups retained.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating line writer.
///
/// The file handle is opened lazily on the first write, so construction never
/// fails.
pub struct FileWriter {
    file_path: PathBuf,
    max_size: u64,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_max_size(file_path, MAX_FILE_SIZE_BYTES)
    }

    /// Creates a writer that rotates once the file exceeds `max_size` bytes.
    pub const fn with_max_size(file_path: PathBuf, max_size: u64) -> Self {
        Self {
            file_path,
            max_size,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is too large.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if rotation, opening or writing fails, or if the
    /// internal lock is poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        let file = match writer.as_mut() {
            Some(file) => file,
            None => writer.insert(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            ),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_size)
    }

    /// Shifts `file.N` to `file.N+1`, dropping the oldest, then moves the
    /// current file to `file.1`.
    fn rotate(&self) -> io::Result<()> {
        let oldest = backup_path(&self.file_path, MAX_BACKUP_FILES);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..MAX_BACKUP_FILES).rev() {
            let from = backup_path(&self.file_path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.file_path, index + 1))?;
            }
        }

        if self.file_path.exists() {
            fs::rename(&self.file_path, backup_path(&self.file_path, 1))?;
        }

        tracing::trace!(path = %self.file_path.display(), "rotated trace file");
        Ok(())
    }
}

/// Path of the `index`th backup of `path`.
#[must_use]
pub fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_max_size(path.clone(), 4);

        writer.write_line("first").unwrap();
        writer.write_line("second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap(), "first\n");
    }

    #[test]
    fn keeps_at_most_three_backups() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_max_size(path.clone(), 1);

        for line in ["l1", "l2", "l3", "l4", "l5", "l6"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "l6\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap(), "l5\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 3)).unwrap(), "l3\n");
        assert!(!backup_path(&path, 4).exists());
    }
}
