use std::fs;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use crate::model::ticket::{Ticket, parse_ticket_name, title_of};

/// Name of the counter file holding the next available ticket number.
pub const COUNTER_FILE: &str = "next_ticket_number.txt";

/// Error type for ticket store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read ticket directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid number in ticket counter file {path}: {source}")]
    BadCounter {
        path: PathBuf,
        source: ParseIntError,
    },
    #[error("could not write ticket file {path}: {source}")]
    WriteTicket {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not update ticket counter file {path}: {source}")]
    WriteCounter {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not delete ticket {path}: {source}")]
    Delete {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A directory of numbered `.txt` ticket files plus the counter file.
///
/// Creation and deletion are single-attempt whole-file operations. There is
/// no locking: two concurrent writers can race on the counter file
/// (last-writer-wins), which is acceptable for a single-user local tool.
#[derive(Debug, Clone)]
pub struct TicketStore {
    dir: PathBuf,
    counter_path: PathBuf,
}

impl TicketStore {
    /// Store rooted at an explicit directory. The counter file lives inside
    /// the same directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let counter_path = dir.join(COUNTER_FILE);
        TicketStore { dir, counter_path }
    }

    /// Default store: tickets in the working directory, counter file beside
    /// the executable (falling back to the working directory when the
    /// executable path is unavailable).
    pub fn from_env() -> Self {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let counter_path = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| dir.clone())
            .join(COUNTER_FILE);
        TicketStore { dir, counter_path }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn counter_path(&self) -> &Path {
        &self.counter_path
    }

    /// Path of the file for a ticket number.
    pub fn ticket_path(&self, number: u64) -> PathBuf {
        self.dir.join(Ticket::file_name(number))
    }

    // -----------------------------------------------------------------------
    // Scanning
    // -----------------------------------------------------------------------

    /// Load all tickets, sorted ascending by number (numeric order, so
    /// `2.txt` sorts before `10.txt`).
    ///
    /// Only regular files named `<integer>.txt` count. Entries that fail to
    /// parse or read are skipped without comment; stray files in the
    /// directory are tolerated. Failing to read the directory itself is an
    /// error.
    pub fn scan(&self) -> Result<Vec<Ticket>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::ReadDir {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut tickets = Vec::new();
        for entry in entries {
            let Ok(entry) = entry else { continue };
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(number) = parse_ticket_name(name) else {
                continue;
            };
            let path = entry.path();
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            let title = title_of(&content).to_string();
            tickets.push(Ticket {
                number,
                path,
                title,
                content,
            });
        }

        tickets.sort_by_key(|t| t.number);
        Ok(tickets)
    }

    // -----------------------------------------------------------------------
    // Counter
    // -----------------------------------------------------------------------

    /// Read the next ticket number. A missing or unreadable counter file
    /// defaults to 1; contents that fail to parse as a decimal integer are
    /// an error.
    pub fn next_number(&self) -> Result<u64, StoreError> {
        let Ok(data) = fs::read_to_string(&self.counter_path) else {
            return Ok(1);
        };
        data.parse().map_err(|e| StoreError::BadCounter {
            path: self.counter_path.clone(),
            source: e,
        })
    }

    fn write_next_number(&self, n: u64) -> Result<(), StoreError> {
        fs::write(&self.counter_path, n.to_string()).map_err(|e| StoreError::WriteCounter {
            path: self.counter_path.clone(),
            source: e,
        })
    }

    // -----------------------------------------------------------------------
    // Create / delete
    // -----------------------------------------------------------------------

    /// Create a new ticket from a title and description, returning its
    /// number.
    ///
    /// The file holds `title`, a blank line, then the description, with all
    /// line endings normalized to CRLF. The ticket write strictly precedes
    /// the counter update, so a failed ticket write never advances the
    /// counter. A failed counter update after a successful ticket write can
    /// reuse the number on a later run; that risk is not corrected here.
    pub fn create(&self, title: &str, description: &str) -> Result<u64, StoreError> {
        let n = self.next_number()?;
        let path = self.ticket_path(n);
        let text = normalize_crlf(&format!("{}\n\n{}", title, description));
        fs::write(&path, text).map_err(|e| StoreError::WriteTicket { path, source: e })?;
        self.write_next_number(n + 1)?;
        Ok(n)
    }

    /// Remove a ticket file.
    pub fn delete(&self, ticket: &Ticket) -> Result<(), StoreError> {
        fs::remove_file(&ticket.path).map_err(|e| StoreError::Delete {
            path: ticket.path.clone(),
            source: e,
        })
    }
}

/// Normalize all line endings in `s` to CRLF.
pub fn normalize_crlf(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\n', "\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store() -> (TempDir, TicketStore) {
        let tmp = TempDir::new().unwrap();
        let store = TicketStore::new(tmp.path());
        (tmp, store)
    }

    // --- normalize_crlf ---

    #[test]
    fn crlf_from_bare_newlines() {
        assert_eq!(normalize_crlf("a\nb\nc"), "a\r\nb\r\nc");
    }

    #[test]
    fn crlf_is_idempotent() {
        let once = normalize_crlf("a\r\nb\nc");
        assert_eq!(normalize_crlf(&once), once);
        assert_eq!(once, "a\r\nb\r\nc");
    }

    // --- counter ---

    #[test]
    fn missing_counter_defaults_to_one() {
        let (_tmp, store) = store();
        assert_eq!(store.next_number().unwrap(), 1);
    }

    #[test]
    fn counter_reads_plain_integer() {
        let (tmp, store) = store();
        fs::write(tmp.path().join(COUNTER_FILE), "17").unwrap();
        assert_eq!(store.next_number().unwrap(), 17);
    }

    #[test]
    fn malformed_counter_is_an_error() {
        let (tmp, store) = store();
        fs::write(tmp.path().join(COUNTER_FILE), "seventeen").unwrap();
        assert!(matches!(
            store.next_number(),
            Err(StoreError::BadCounter { .. })
        ));
    }

    #[test]
    fn counter_with_trailing_newline_is_an_error() {
        // The counter holds a bare integer with no surrounding whitespace.
        let (tmp, store) = store();
        fs::write(tmp.path().join(COUNTER_FILE), "17\n").unwrap();
        assert!(store.next_number().is_err());
    }

    // --- create ---

    #[test]
    fn create_with_missing_counter_writes_ticket_one() {
        let (tmp, store) = store();
        let n = store.create("Title", "Description\n...").unwrap();
        assert_eq!(n, 1);

        let content = fs::read_to_string(tmp.path().join("1.txt")).unwrap();
        assert_eq!(content, "Title\r\n\r\nDescription\r\n...");

        let counter = fs::read_to_string(tmp.path().join(COUNTER_FILE)).unwrap();
        assert_eq!(counter, "2");
    }

    #[test]
    fn create_advances_counter_from_k_to_k_plus_one() {
        let (tmp, store) = store();
        fs::write(tmp.path().join(COUNTER_FILE), "41").unwrap();

        let n = store.create("Buy milk", "Get milk from store").unwrap();
        assert_eq!(n, 41);
        assert!(tmp.path().join("41.txt").exists());
        assert_eq!(
            fs::read_to_string(tmp.path().join(COUNTER_FILE)).unwrap(),
            "42"
        );
    }

    #[test]
    fn create_normalizes_mixed_line_endings() {
        let (tmp, store) = store();
        store.create("Title", "one\ntwo\r\nthree").unwrap();
        let content = fs::read_to_string(tmp.path().join("1.txt")).unwrap();
        assert_eq!(content, "Title\r\n\r\none\r\ntwo\r\nthree");
    }

    #[test]
    fn failed_ticket_write_leaves_counter_untouched() {
        let tmp = TempDir::new().unwrap();
        // Ticket directory does not exist, so the ticket write fails, but
        // the counter path is valid.
        let store = TicketStore {
            dir: tmp.path().join("missing"),
            counter_path: tmp.path().join(COUNTER_FILE),
        };
        let err = store.create("Title", "body").unwrap_err();
        assert!(matches!(err, StoreError::WriteTicket { .. }));
        assert!(!tmp.path().join(COUNTER_FILE).exists());
    }

    #[test]
    fn malformed_counter_aborts_create() {
        let (tmp, store) = store();
        fs::write(tmp.path().join(COUNTER_FILE), "not a number").unwrap();
        assert!(store.create("Title", "body").is_err());
        assert!(!tmp.path().join("1.txt").exists());
    }

    // --- scan ---

    #[test]
    fn scan_empty_directory() {
        let (_tmp, store) = store();
        assert!(store.scan().unwrap().is_empty());
    }

    #[test]
    fn scan_orders_numerically_not_lexically() {
        let (tmp, store) = store();
        for n in [10, 9, 2, 100, 1] {
            fs::write(tmp.path().join(format!("{}.txt", n)), "t").unwrap();
        }
        let numbers: Vec<u64> = store.scan().unwrap().iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![1, 2, 9, 10, 100]);
    }

    #[test]
    fn scan_skips_non_ticket_files() {
        let (tmp, store) = store();
        fs::write(tmp.path().join("5.txt"), "real").unwrap();
        fs::write(tmp.path().join("notes.txt"), "stray").unwrap();
        fs::write(tmp.path().join("7.md"), "stray").unwrap();
        fs::write(tmp.path().join(COUNTER_FILE), "6").unwrap();
        fs::create_dir(tmp.path().join("8.txt")).unwrap();

        let tickets = store.scan().unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].number, 5);
    }

    #[test]
    fn scan_extracts_title_and_content() {
        let (tmp, store) = store();
        fs::write(
            tmp.path().join("5.txt"),
            "Buy milk\r\n\r\nGet milk from store",
        )
        .unwrap();

        let tickets = store.scan().unwrap();
        assert_eq!(tickets[0].title, "Buy milk");
        assert_eq!(tickets[0].content, "Buy milk\r\n\r\nGet milk from store");
        assert_eq!(tickets[0].path, tmp.path().join("5.txt"));
    }

    #[test]
    fn scan_of_missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let store = TicketStore::new(tmp.path().join("nowhere"));
        assert!(matches!(store.scan(), Err(StoreError::ReadDir { .. })));
    }

    // --- delete ---

    #[test]
    fn delete_removes_the_file() {
        let (tmp, store) = store();
        fs::write(tmp.path().join("5.txt"), "Buy milk\r\n\r\nbody").unwrap();
        let tickets = store.scan().unwrap();

        store.delete(&tickets[0]).unwrap();
        assert!(!tmp.path().join("5.txt").exists());
    }

    #[test]
    fn delete_of_missing_file_is_an_error() {
        let (tmp, store) = store();
        fs::write(tmp.path().join("5.txt"), "t").unwrap();
        let tickets = store.scan().unwrap();
        fs::remove_file(tmp.path().join("5.txt")).unwrap();

        assert!(matches!(
            store.delete(&tickets[0]),
            Err(StoreError::Delete { .. })
        ));
    }
}
