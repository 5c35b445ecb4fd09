use chrono::{DateTime, Local};
use linktrail_scanner::normalize::netloc;
use linktrail_scanner::{ScanError, VisitedSet};
use rusqlite::{Connection, OptionalExtension, Result, params};
use std::path::{Path, PathBuf};
use tracing::debug;

/// SQLite-backed set of every URL discovered during one run.
///
/// Each `record` runs in autocommit mode, so a URL is on disk by the time the
/// call returns. The connection holds an exclusive lock for its lifetime.
pub struct VisitedStore {
    conn: Connection,
    path: PathBuf,
}

impl VisitedStore {
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    /// Opens (creating if needed) the store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA locking_mode = EXCLUSIVE;
            PRAGMA journal_mode = DELETE;
            PRAGMA synchronous = FULL;
            ",
        )?;

        let store = VisitedStore {
            conn,
            path: path.to_path_buf(),
        };
        store.init_schema()?;
        debug!("Opened visited store at {}", path.display());
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch("CREATE TABLE IF NOT EXISTS urls (url TEXT NOT NULL UNIQUE);")?;
        Ok(())
    }

    pub fn contains(&self, url: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM urls WHERE url = ?1", params![url], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Inserts `url` unless it is already there. Returns whether it was new.
    pub fn record(&self, url: &str) -> Result<bool> {
        let inserted = self
            .conn
            .execute("INSERT OR IGNORE INTO urls (url) VALUES (?1)", params![url])?;
        Ok(inserted == 1)
    }

    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM urls", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// All recorded URLs, oldest first.
    pub fn urls(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT url FROM urls ORDER BY rowid")?;
        let urls = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>>>()?;
        Ok(urls)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits anything outstanding and releases the file.
    pub fn close(self) -> Result<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        self.conn.close().map_err(|(_, e)| e)?;
        debug!("Closed visited store at {}", self.path.display());
        Ok(())
    }
}

impl VisitedSet for VisitedStore {
    fn contains(&self, url: &str) -> linktrail_scanner::error::Result<bool> {
        VisitedStore::contains(self, url).map_err(ScanError::storage)
    }

    fn record(&mut self, url: &str) -> linktrail_scanner::error::Result<bool> {
        VisitedStore::record(self, url).map_err(ScanError::storage)
    }
}

/// Path for a new store named `filename` under `dir`. If that file is
/// already there (two runs in the same second), `_1`, `_2`, ... is appended
/// to the stem until the name is free.
pub fn fresh_store_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !VisitedStore::exists(&candidate) {
        return candidate;
    }

    let (stem, ext) = filename.rsplit_once('.').unwrap_or((filename, "db"));
    (1..)
        .map(|n| dir.join(format!("{}_{}.{}", stem, n, ext)))
        .find(|path| !VisitedStore::exists(path))
        .unwrap_or(candidate)
}

/// Name of the store file for a crawl of `seed` started at `started`:
/// the seed's network location without a leading `www.`, dots turned into
/// underscores, then the timestamp. `https://www.example.com/` at
/// 2024-03-01 09:15:00 gives `example_com_20240301091500.db`.
pub fn store_filename(seed: &str, started: DateTime<Local>) -> String {
    let host = netloc(seed);
    let host = host.rsplit_once('@').map_or(host, |(_, host)| host);
    let host = host.strip_prefix("www.").unwrap_or(host);
    format!(
        "{}_{}.db",
        host.replace('.', "_"),
        started.format("%Y%m%d%H%M%S")
    )
}
