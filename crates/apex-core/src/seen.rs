//! Durable record of news ids already relayed to the news group.

use std::{
    collections::HashSet,
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{errors::Error, ports::SeenLog, Result};

/// Flat file, one id per line, append-only.
#[derive(Clone, Debug)]
pub struct FileSeenLog {
    path: PathBuf,
}

impl FileSeenLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> Error {
        Error::SeenLog {
            path: self.path.clone(),
            source,
        }
    }
}

impl SeenLog for FileSeenLog {
    fn load(&mut self) -> Result<Vec<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    fn append(&mut self, id: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;
        writeln!(file, "{id}").map_err(|e| self.io_err(e))?;
        file.flush().map_err(|e| self.io_err(e))?;
        file.sync_data().map_err(|e| self.io_err(e))
    }
}

/// In-memory set of seen ids backed by a [`SeenLog`].
///
/// Ids are only ever added. `mark_seen` persists before it updates memory, so
/// a failed write leaves the id unseen (a possible resend, never a lost id).
pub struct SeenSet {
    log: Box<dyn SeenLog>,
    ids: HashSet<String>,
}

impl SeenSet {
    pub fn open(mut log: Box<dyn SeenLog>) -> Result<Self> {
        let ids: HashSet<String> = log.load()?.into_iter().collect();
        info!(count = ids.len(), "loaded seen news ids");
        Ok(Self { log, ids })
    }

    pub fn is_seen(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn mark_seen(&mut self, id: &str) -> Result<()> {
        if self.ids.contains(id) {
            return Ok(());
        }
        self.log.append(id)?;
        self.ids.insert(id.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
