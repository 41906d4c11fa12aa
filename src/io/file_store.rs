//! File-backed line store
//!
//! Reads and writes the card store as a plain text file, one record per line.
//!
//! # Design
//!
//! - A missing file loads as an empty store (first run of a new machine)
//! - Lines are read with either `\n` or `\r\n` terminators; bytes that are not
//!   valid UTF-8 are replaced rather than failing the load, and the registry
//!   then skips the damaged record
//! - Saving writes every line followed by `\r\n` into a temp file in the same
//!   directory and persists it over the target, so the store is either fully
//!   replaced or left untouched

use crate::core::traits::LineStore;
use crate::types::AtmError;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Line terminator written after every saved record
pub const LINE_TERMINATOR: &str = "\r\n";

/// Line store backed by a single text file
///
/// # Examples
///
/// ```no_run
/// use atm_simulator::core::LineStore;
/// use atm_simulator::io::FileLineStore;
///
/// let store = FileLineStore::new("cards.txt");
/// let lines = store.load().unwrap();
/// store.save(&lines).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileLineStore {
    path: PathBuf,
}

impl FileLineStore {
    /// Create a store for the file at `path`
    ///
    /// The file is not touched until `load` or `save` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLineStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the store lives in (`.` for a bare file name)
    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// Decode one raw line, dropping a trailing `\r`
fn decode_line(mut raw: Vec<u8>) -> String {
    if raw.last() == Some(&b'\r') {
        raw.pop();
    }
    match String::from_utf8(raw) {
        Ok(line) => line,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

impl LineStore for FileLineStore {
    /// Load every line of the file in order
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - The lines without terminators; empty if the file does not exist
    /// * `Err(AtmError::Io)` - The file exists but could not be read
    ///
    /// Invalid UTF-8 is decoded lossily, never reported as an error.
    fn load(&self) -> Result<Vec<String>, AtmError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "card store not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(AtmError::io(&self.path, e)),
        };

        let lines = BufReader::new(file)
            .split(b'\n')
            .map(|raw| raw.map(decode_line))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AtmError::io(&self.path, e))?;

        debug!(path = %self.path.display(), lines = lines.len(), "read card store");
        Ok(lines)
    }

    /// Replace the file's contents with `lines`
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns `AtmError::Io` if the directory, temp file, write or final
    /// rename fails. The temp file is removed on every failure.
    fn save(&self, lines: &[String]) -> Result<(), AtmError> {
        let directory = self.directory();
        fs::create_dir_all(directory).map_err(|e| AtmError::io(directory, e))?;

        let temp = NamedTempFile::new_in(directory).map_err(|e| AtmError::io(directory, e))?;

        let mut writer = BufWriter::new(temp);
        for line in lines {
            write!(writer, "{}{}", line, LINE_TERMINATOR)
                .map_err(|e| AtmError::io(&self.path, e))?;
        }
        let temp = writer
            .into_inner()
            .map_err(|e| AtmError::io(&self.path, e.into_error()))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| AtmError::io(&self.path, e))?;

        temp.persist(&self.path)
            .map_err(|e| AtmError::io(&self.path, e.error))?;

        info!(path = %self.path.display(), lines = lines.len(), "saved card store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLineStore::new(temp_dir.path().join("cards.txt"));

        assert_eq!(store.load().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_load_handles_both_terminators() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cards.txt");
        fs::write(&path, "first\r\nsecond\nthird").unwrap();

        let store = FileLineStore::new(&path);

        assert_eq!(store.load().unwrap(), lines(&["first", "second", "third"]));
    }

    #[test]
    fn test_load_decodes_invalid_utf8_lossily() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cards.txt");
        fs::write(
            &path,
            b"AAAA-BBBB-1111-2222 4321 500\r\n\xff\xfe garbage 1 2\r\nCCCC-DDDD-3333-4444 9999 7\r\n",
        )
        .unwrap();

        let loaded = FileLineStore::new(&path).load().unwrap();

        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0], "AAAA-BBBB-1111-2222 4321 500");
        assert_eq!(loaded[1], "\u{FFFD}\u{FFFD} garbage 1 2");
        assert_eq!(loaded[2], "CCCC-DDDD-3333-4444 9999 7");
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLineStore::new(temp_dir.path());

        let result = store.load();
        assert!(matches!(result, Err(AtmError::Io { .. })));
    }

    #[test]
    fn test_save_writes_crlf_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cards.txt");
        let store = FileLineStore::new(&path);

        store
            .save(&lines(&["AAAA-BBBB-1111-2222 4321 500", "cccc-dddd-3333-4444 9999 0"]))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "AAAA-BBBB-1111-2222 4321 500\r\ncccc-dddd-3333-4444 9999 0\r\n"
        );
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLineStore::new(temp_dir.path().join("cards.txt"));
        let data = lines(&["a 1 2", "b 3 4"]);

        store.save(&data).unwrap();

        assert_eq!(store.load().unwrap(), data);
    }

    #[test]
    fn test_save_truncates_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cards.txt");
        fs::write(&path, "old 1 2\r\nolder 3 4\r\n").unwrap();

        let store = FileLineStore::new(&path);
        store.save(&lines(&["new 5 6"])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new 5 6\r\n");
    }

    #[test]
    fn test_save_empty_creates_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cards.txt");

        FileLineStore::new(&path).save(&[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("cards.txt");

        FileLineStore::new(&path).save(&lines(&["a 1 2"])).unwrap();

        assert!(path.exists());
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cards.txt");
        let store = FileLineStore::new(&path);

        store.save(&lines(&["a 1 2"])).unwrap();

        assert_eq!(entries(temp_dir.path()), vec!["cards.txt"]);
    }

    #[test]
    fn test_failed_save_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cards.txt");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let result = FileLineStore::new(&path).save(&lines(&["a 1 2"]));

        assert!(matches!(result, Err(AtmError::Io { .. })));
        assert_eq!(entries(temp_dir.path()), vec!["cards.txt"]);
    }
}
