//! Asynchronous asset loading seam.
//!
//! Loading itself belongs to an external collaborator implementing
//! [`AssetLoader`]. Each load completes independently, in any order, and
//! reports through a channel; the frame loop drains finished loads with
//! [`LoadQueue::drain`] on the main thread and binds them to the rig.

use flume::{Receiver, Sender};

use croak_core::{CroakError, Result};
use croak_scene::{NodeHandle, Rig};

use crate::binding::{BindingTable, bind_asset};

/// Raw bytes of a finished load.
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub path: String,
    pub bytes: Vec<u8>,
}

/// A loaded asset together with the rig node it was bound to. Handed on to
/// the renderer, which turns the bytes into a mesh under that node.
#[derive(Debug, Clone)]
pub struct BoundAsset {
    pub node: NodeHandle,
    pub asset: LoadedAsset,
}

/// Outcome of one load.
pub type LoadResult = Result<LoadedAsset>;

/// Completion channel handed to each load.
pub type LoadSender = Sender<LoadResult>;

/// Starts loads and reports each outcome on `done`.
pub trait AssetLoader {
    /// Begins loading `path`. Exactly one result must eventually be sent
    /// on `done`; it may be sent before this call returns.
    fn load(&self, path: &str, done: LoadSender);
}

/// Counts of requested, bound and failed loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub requested: usize,
    pub loaded: usize,
    pub failed: usize,
}

impl LoadProgress {
    /// Fraction of requests that have completed, successfully or not.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.requested == 0 {
            return 1.0;
        }
        (self.loaded + self.failed) as f32 / self.requested as f32
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.loaded + self.failed >= self.requested
    }
}

/// Collects load completions and binds them to the rig.
pub struct LoadQueue {
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
    progress: LoadProgress,
}

impl Default for LoadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadQueue {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            tx,
            rx,
            progress: LoadProgress::default(),
        }
    }

    /// Requests every path from `loader`.
    pub fn request_all<L: AssetLoader + ?Sized>(&mut self, loader: &L, paths: &[&str]) {
        for path in paths {
            self.progress.requested += 1;
            loader.load(path, self.tx.clone());
        }
        log::info!("Requested {} assets", paths.len());
    }

    #[must_use]
    pub fn progress(&self) -> LoadProgress {
        self.progress
    }

    /// Binds every load that has completed since the last call.
    ///
    /// Failed loads and assets without a rig slot are logged and skipped;
    /// the matching part simply never appears.
    pub fn drain(&mut self, rig: &mut Rig, table: &BindingTable) -> Vec<BoundAsset> {
        let mut bound = Vec::new();

        for result in self.rx.try_iter() {
            match result.and_then(|asset| bind_asset(rig, table, &asset.path).map(|node| (node, asset))) {
                Ok((node, asset)) => {
                    self.progress.loaded += 1;
                    bound.push(BoundAsset { node, asset });
                }
                Err(e) => {
                    self.progress.failed += 1;
                    log::error!("{e}");
                }
            }
            log::info!("{:.0}% loaded", self.progress.fraction() * 100.0);
        }

        bound
    }
}

/// Reads asset files from a base directory on a tokio runtime.
///
/// The loader owns a small multi-threaded runtime; reads run concurrently
/// and each completion is sent back over the load channel. Dropping the
/// loader cancels reads still in flight.
#[cfg(not(target_arch = "wasm32"))]
pub struct FsAssetLoader {
    base_dir: std::path::PathBuf,
    runtime: tokio::runtime::Runtime,
}

#[cfg(not(target_arch = "wasm32"))]
impl FsAssetLoader {
    /// Creates a loader rooted at `base_dir`.
    ///
    /// # Errors
    ///
    /// Fails if the runtime cannot be started.
    pub fn new(base_dir: impl Into<std::path::PathBuf>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("croak-assets")
            .enable_all()
            .build()?;
        Ok(Self {
            base_dir: base_dir.into(),
            runtime,
        })
    }

    #[inline]
    #[must_use]
    pub fn base_dir(&self) -> &std::path::Path {
        &self.base_dir
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetLoader for FsAssetLoader {
    fn load(&self, path: &str, done: LoadSender) {
        let full = self.base_dir.join(path);
        let path = path.to_string();
        self.runtime.spawn(async move {
            let result = match tokio::fs::read(&full).await {
                Ok(bytes) => Ok(LoadedAsset { path, bytes }),
                Err(e) => Err(CroakError::AssetLoad {
                    path,
                    reason: e.to_string(),
                }),
            };
            // The queue may already be gone at shutdown.
            let _ = done.send(result);
        });
    }
}
