use std::fs;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, PersistenceResult};
use crate::stroke::{Stroke, StrokeRef};

/// File extension of saved ink
pub const INK_EXTENSION: &str = ".fdw";

pub const QUICK_SAVE_PREFIX: &str = "QuickSave_";
pub const EXIT_SAVE_PREFIX: &str = "ExitingAutoSave_";

/// On-disk form of a stroke collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeFile {
    /// Version of the application that wrote the file
    pub version: String,
    /// Seconds since the UNIX epoch
    pub timestamp: i64,
    pub strokes: Vec<Stroke>,
}

impl StrokeFile {
    pub fn new(strokes: &[StrokeRef]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().timestamp(),
            strokes: strokes.iter().map(|s| Stroke::clone(s)).collect(),
        }
    }
}

/// Write the strokes to `writer`. An empty collection is not saved.
pub fn save_strokes<W: Write>(writer: W, strokes: &[StrokeRef]) -> PersistenceResult<()> {
    if strokes.is_empty() {
        return Err(PersistenceError::NothingToSave);
    }
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer(&mut writer, &StrokeFile::new(strokes))?;
    writer.flush()?;
    Ok(())
}

/// Read a stroke collection. Strokes without points are dropped.
pub fn load_strokes<R: Read>(reader: R) -> PersistenceResult<Vec<StrokeRef>> {
    let file: StrokeFile = serde_json::from_reader(BufReader::new(reader))?;
    if file.version != env!("CARGO_PKG_VERSION") {
        log::warn!(
            "Stroke file version {} differs from current version {}",
            file.version,
            env!("CARGO_PKG_VERSION")
        );
    }
    Ok(file
        .strokes
        .into_iter()
        .filter(|s| !s.points().is_empty())
        .map(Arc::new)
        .collect())
}

/// `<prefix>yyyyMMdd-HHmmss<ext>` in local time
pub fn generate_file_name(prefix: &str, ext: &str) -> String {
    format!("{}{}{}", prefix, chrono::Local::now().format("%Y%m%d-%H%M%S"), ext)
}

/// The directory holding quick saves and auto saves
#[derive(Debug, Clone)]
pub struct StrokeStore {
    dir: PathBuf,
}

impl StrokeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Fresh timestamped path for a save with the given prefix
    pub fn save_path(&self, prefix: &str, ext: &str) -> PathBuf {
        self.dir.join(generate_file_name(prefix, ext))
    }

    pub fn save_to(&self, path: &Path, strokes: &[StrokeRef]) -> PersistenceResult<()> {
        if strokes.is_empty() {
            return Err(PersistenceError::NothingToSave);
        }
        fs::create_dir_all(&self.dir)?;
        save_strokes(fs::File::create(path)?, strokes)?;
        log::info!("Saved {} stroke(s) to {}", strokes.len(), path.display());
        Ok(())
    }

    pub fn load_from(path: &Path) -> PersistenceResult<Vec<StrokeRef>> {
        let strokes = load_strokes(fs::File::open(path)?)?;
        log::info!("Loaded {} stroke(s) from {}", strokes.len(), path.display());
        Ok(strokes)
    }

    /// Find the most recently modified ink file in the store
    pub fn find_latest(&self) -> PersistenceResult<Option<PathBuf>> {
        if !self.dir.exists() {
            return Ok(None);
        }
        let mut latest = None;
        let mut latest_time = std::time::SystemTime::UNIX_EPOCH;

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.to_string_lossy().ends_with(INK_EXTENSION) {
                continue;
            }
            if let Ok(modified) = entry.metadata().and_then(|meta| meta.modified()) {
                if latest.is_none() || modified > latest_time {
                    latest_time = modified;
                    latest = Some(path);
                }
            }
        }

        Ok(latest)
    }
}

/// Work running on a background thread whose result is picked up by the UI
/// thread. Nothing here touches the canvas; the owner applies the result.
#[derive(Debug)]
pub struct PendingTask<T> {
    receiver: oneshot::Receiver<PersistenceResult<T>>,
}

impl<T: Send + 'static> PendingTask<T> {
    pub fn spawn<F>(name: &str, work: F) -> Self
    where
        F: FnOnce() -> PersistenceResult<T> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let spawned = std::thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || {
                // The receiver may be gone if the app shut down meanwhile
                let _ = sender.send(work());
            });
        if let Err(err) = spawned {
            log::error!("Failed to spawn {} thread: {}", name, err);
        }
        Self { receiver }
    }

    /// Non-blocking check for the result; `None` while the work is still running.
    pub fn poll(&mut self) -> Option<PersistenceResult<T>> {
        match self.receiver.try_recv() {
            Ok(result) => result,
            Err(oneshot::Canceled) => Some(Err(PersistenceError::Cancelled)),
        }
    }

    /// Block until the result arrives
    pub fn wait(self) -> PersistenceResult<T> {
        futures::executor::block_on(self.receiver).unwrap_or(Err(PersistenceError::Cancelled))
    }
}
