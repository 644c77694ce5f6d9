use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::error::PersistenceError;
use crate::state::EditorContext;
use crate::state::export::{EXPORT_PREFIX, PNG_EXTENSION, export_png};
use crate::state::persistence::{
    EXIT_SAVE_PREFIX, INK_EXTENSION, PendingTask, QUICK_SAVE_PREFIX, StrokeStore,
};
use crate::stroke::StrokeRef;

enum Job {
    Save { revision: u64, task: PendingTask<PathBuf> },
    Load(PendingTask<Vec<StrokeRef>>),
    Export(PendingTask<PathBuf>),
}

/// Save, load and export work in flight.
///
/// Jobs run off the UI thread on a snapshot of the canvas. Their results are
/// applied to the [`EditorContext`] by [`IoJobs::poll`], which the host calls
/// once per frame.
pub struct IoJobs {
    store: StrokeStore,
    jobs: Vec<Job>,
}

impl std::fmt::Debug for IoJobs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IoJobs")
            .field("store", &self.store)
            .field("jobs", &self.jobs.len())
            .finish()
    }
}

impl IoJobs {
    pub fn new(store: StrokeStore) -> Self {
        Self { store, jobs: Vec::new() }
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn is_busy(&self) -> bool {
        !self.jobs.is_empty()
    }

    /// Save the canvas under a fresh `QuickSave_` name
    pub fn quick_save(&mut self, context: &EditorContext) -> bool {
        self.save_with_prefix(context, QUICK_SAVE_PREFIX)
    }

    fn save_with_prefix(&mut self, context: &EditorContext, prefix: &str) -> bool {
        let (revision, strokes) = context.snapshot();
        if strokes.is_empty() {
            context.notify("Nothing to save");
            return false;
        }
        let store = self.store.clone();
        let path = store.save_path(prefix, INK_EXTENSION);
        let task = PendingTask::spawn("ink-save", move || {
            store.save_to(&path, &strokes)?;
            Ok(path)
        });
        self.jobs.push(Job::Save { revision, task });
        true
    }

    /// Load the newest ink file in the save directory
    pub fn load_latest(&mut self) {
        let store = self.store.clone();
        let task = PendingTask::spawn("ink-load", move || match store.find_latest()? {
            Some(path) => StrokeStore::load_from(&path),
            None => Err(PersistenceError::NothingToLoad),
        });
        self.jobs.push(Job::Load(task));
    }

    pub fn load_file(&mut self, path: &Path) {
        let path = path.to_path_buf();
        let task = PendingTask::spawn("ink-load", move || StrokeStore::load_from(&path));
        self.jobs.push(Job::Load(task));
    }

    /// Render the canvas to a PNG in the save directory
    pub fn export(&mut self, context: &EditorContext) -> bool {
        let (_, strokes) = context.snapshot();
        if strokes.is_empty() {
            context.notify("Nothing to export");
            return false;
        }
        let bounds = context.bounds();
        let (width, height) = (bounds.width.max(1.0) as u32, bounds.bottom().max(1.0) as u32);
        let background = context.config().export_background;
        let path = self.store.save_path(EXPORT_PREFIX, PNG_EXTENSION);
        let task = PendingTask::spawn("ink-export", move || {
            export_png(&path, &strokes, width, height, background)?;
            Ok(path)
        });
        self.jobs.push(Job::Export(task));
        true
    }

    /// Apply every finished job to the context
    pub fn poll(&mut self, context: &mut EditorContext) {
        let mut still_running = Vec::with_capacity(self.jobs.len());
        for job in self.jobs.drain(..) {
            match job {
                Job::Save { revision, mut task } => match task.poll() {
                    None => still_running.push(Job::Save { revision, task }),
                    Some(Ok(path)) => {
                        context.mark_saved_at(revision);
                        info!("Ink saved to {}", path.display());
                        context.notify("Ink saved");
                    }
                    Some(Err(err)) => {
                        error!("Save failed: {}", err);
                        context.notify("Fail to save");
                    }
                },
                Job::Load(mut task) => match task.poll() {
                    None => still_running.push(Job::Load(task)),
                    Some(Ok(strokes)) => context.load_strokes(strokes),
                    Some(Err(PersistenceError::NothingToLoad)) => {
                        context.notify("No saved ink");
                    }
                    Some(Err(err)) => {
                        error!("Load failed: {}", err);
                        context.notify("Fail to load");
                    }
                },
                Job::Export(mut task) => match task.poll() {
                    None => still_running.push(Job::Export(task)),
                    Some(Ok(path)) => {
                        info!("Image exported to {}", path.display());
                        context.notify("Image exported");
                    }
                    Some(Err(err)) => {
                        error!("Export failed: {}", err);
                        context.notify("Fail to export");
                    }
                },
            }
        }
        self.jobs = still_running;
    }

    /// Save unsaved ink before the process exits. Blocks until the write is done.
    pub fn save_on_exit(&mut self, context: &mut EditorContext) {
        if !context.is_unsaved() {
            return;
        }
        if !self.save_with_prefix(context, EXIT_SAVE_PREFIX) {
            return;
        }
        // Wait for every job so nothing is cut off by the exit
        for job in std::mem::take(&mut self.jobs) {
            let result = match job {
                Job::Save { revision, task } => task.wait().map(|_| context.mark_saved_at(revision)),
                Job::Load(task) => task.wait().map(|_| ()),
                Job::Export(task) => task.wait().map(|_| ()),
            };
            if let Err(err) = result {
                warn!("Background job failed during exit: {}", err);
            }
        }
    }
}
