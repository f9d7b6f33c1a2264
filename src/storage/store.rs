//! The record store: a single CSV file behind a mutex.
//!
//! Every operation takes the same async lock for its whole read-modify-write
//! sequence, so a duplicate check and the append that follows it cannot
//! interleave with another capture, and a compaction rewrite cannot drop an
//! append that lands between its read and its write. Other processes writing
//! the same file are not coordinated with.

use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::config::CSV_HEADER;
use crate::error_handling::StoreError;

use super::record::{date_portion, key_fields, split_contents, VisitorRecord};

/// Result of [`RecordStore::append_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The record was appended.
    Inserted,
    /// A record for the same IP on the same day already exists; nothing was written.
    AlreadyExists,
}

impl AppendOutcome {
    pub fn inserted(self) -> bool {
        matches!(self, AppendOutcome::Inserted)
    }
}

/// Summary of a [`RecordStore::rewrite_filtered`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteOutcome {
    /// Record lines written back.
    pub kept: usize,
    /// Record lines dropped by the predicate.
    pub removed: usize,
    /// False when the store held no records and the file was left untouched.
    pub rewritten: bool,
}

/// Append-only visitor log with per-day de-duplication.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl RecordStore {
    /// Opens the store at `path`, creating parent directories and a
    /// header-only file if it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Create {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let exists = fs::try_exists(&path)
            .await
            .map_err(|source| StoreError::Read {
                path: path.clone(),
                source,
            })?;
        if !exists {
            fs::write(&path, format!("{}\n", CSV_HEADER))
                .await
                .map_err(|source| StoreError::Create {
                    path: path.clone(),
                    source,
                })?;
            log::info!("Created empty visitor log at {}", path.display());
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns every well-formed record in file order (oldest first).
    ///
    /// Lines with fewer than four fields are skipped and logged.
    pub async fn read_all(&self) -> Result<Vec<VisitorRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        let contents = self.read_contents().await?;
        let (_, lines) = split_contents(&contents);

        let mut records = Vec::with_capacity(lines.len());
        for (index, line) in lines.into_iter().enumerate() {
            match VisitorRecord::from_line(line) {
                Some(record) => records.push(record),
                None => log::warn!(
                    "Skipping malformed line {} in {}: {:?}",
                    index + 2,
                    self.path.display(),
                    line
                ),
            }
        }
        Ok(records)
    }

    /// Appends `record` unless one with the same IP and calendar day exists.
    ///
    /// The first record of the day wins; later captures with a different
    /// region or coordinates are not merged in.
    pub async fn append_if_absent(
        &self,
        record: &VisitorRecord,
    ) -> Result<AppendOutcome, StoreError> {
        let _guard = self.lock.lock().await;
        let contents = self.read_contents().await?;
        let (_, lines) = split_contents(&contents);

        let current_date = record.date_key();
        let duplicate = lines.iter().filter_map(|line| key_fields(line)).any(
            |(existing_ip, existing_date_time)| {
                existing_ip == record.ip && date_portion(existing_date_time) == current_date
            },
        );
        if duplicate {
            return Ok(AppendOutcome::AlreadyExists);
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(|source| self.write_error(source))?;
        file.write_all(format!("{}\n", record.to_line()).as_bytes())
            .await
            .map_err(|source| self.write_error(source))?;
        file.flush().await.map_err(|source| self.write_error(source))?;

        Ok(AppendOutcome::Inserted)
    }

    /// Rewrites the file keeping only the record lines `keep` accepts.
    ///
    /// The header is preserved. The new contents go to a sibling temp file
    /// that is renamed over the log, so readers never observe a partial file.
    /// A store without records is left untouched.
    pub async fn rewrite_filtered<F>(&self, mut keep: F) -> Result<RewriteOutcome, StoreError>
    where
        F: FnMut(&str) -> bool,
    {
        let _guard = self.lock.lock().await;
        let contents = self.read_contents().await?;
        let (header, lines) = split_contents(&contents);

        if lines.is_empty() {
            return Ok(RewriteOutcome::default());
        }

        let total = lines.len();
        let kept: Vec<&str> = lines.into_iter().filter(|line| keep(*line)).collect();

        let header = if header.is_empty() { CSV_HEADER } else { header };
        let mut output = format!("{}\n{}", header, kept.join("\n"));
        if !kept.is_empty() {
            output.push('\n');
        }

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, output)
            .await
            .map_err(|source| self.write_error(source))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|source| self.write_error(source))?;

        Ok(RewriteOutcome {
            kept: kept.len(),
            removed: total - kept.len(),
            rewritten: true,
        })
    }

    /// Raw bytes of the persisted file, header included.
    pub async fn read_raw(&self) -> Result<Vec<u8>, StoreError> {
        let _guard = self.lock.lock().await;
        fs::read(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })
    }

    /// File contents as text. Invalid UTF-8 is replaced rather than failing
    /// every later request.
    async fn read_contents(&self) -> Result<String, StoreError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;
        match String::from_utf8(bytes) {
            Ok(contents) => Ok(contents),
            Err(err) => {
                log::warn!(
                    "{} contains invalid UTF-8; replacing bad bytes",
                    self.path.display()
                );
                Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
            }
        }
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
