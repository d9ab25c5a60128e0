//! Toolpath document: the state a viewer control loop drives
//!
//! Holds the watched source, the selection ring, and the statistics of the
//! current snapshot. [`ToolpathDocument::poll_reload`] applies the
//! double-buffer discipline: the new snapshot is read first, the selection
//! is carried over while old and new are both alive, and only then is the
//! old snapshot released.

use crate::camera::CameraPlacement;
use crate::geometry::Ray;
use crate::picking::{pick_nearest, Pick, PickFilter};
use crate::reload::correspond;
use crate::selection::SelectionRing;
use crate::stats::BoundingStats;
use crate::utils::{write_exports, Snapshot, ToolpathSource};
use gcodeview_core::{Result, ViewerConfig};
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub struct ToolpathDocument {
    source: ToolpathSource,
    selection: SelectionRing,
    stats: BoundingStats,
    config: ViewerConfig,
    /// Set whenever the rendered toolpath or selection changes
    dirty: bool,
}

impl ToolpathDocument {
    /// Open a G-code file
    pub fn open(path: impl AsRef<Path>, config: ViewerConfig) -> Result<Self> {
        Ok(Self::from_source(ToolpathSource::open(path)?, config))
    }

    pub fn from_source(source: ToolpathSource, config: ViewerConfig) -> Self {
        let stats = BoundingStats::compute_with_window(source.snapshot(), config.trim_window);
        Self {
            source,
            selection: SelectionRing::with_capacity(config.selection_capacity),
            stats,
            config,
            dirty: true,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.source.snapshot()
    }

    pub fn source(&self) -> &ToolpathSource {
        &self.source
    }

    pub fn selection(&self) -> &SelectionRing {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionRing {
        self.dirty = true;
        &mut self.selection
    }

    pub fn stats(&self) -> &BoundingStats {
        &self.stats
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn camera(&self) -> CameraPlacement {
        CameraPlacement::from_stats(&self.stats, self.config.camera_offset_factor)
    }

    /// Returns true if the toolpath or selection needs re-rendering
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Nearest segment to `ray` using the configured pick filter
    pub fn pick(&self, ray: &Ray) -> Option<Pick> {
        self.pick_with(ray, PickFilter::from(self.config.pick))
    }

    pub fn pick_with(&self, ray: &Ray, filter: PickFilter) -> Option<Pick> {
        pick_nearest(self.snapshot(), ray, &self.selection, filter)
    }

    /// Toggle the selection state of the nearest pickable segment
    pub fn toggle_at(&mut self, ray: &Ray) -> Option<Pick> {
        let pick = self.pick(ray)?;
        self.selection_mut().toggle(pick.index);
        Some(pick)
    }

    /// Reload the source if it changed on disk; returns true on reload.
    pub fn poll_reload(&mut self) -> Result<bool> {
        let Some(old) = self.source.poll()? else {
            return Ok(false);
        };

        let new = self.source.snapshot();
        self.selection = correspond(&old, new, &self.selection);
        self.stats = BoundingStats::compute_with_window(new, self.config.trim_window);
        drop(old);

        info!(
            "Reloaded {}: {} selected segments carried over",
            self.source.path().display(),
            self.selection.count()
        );
        self.dirty = true;
        Ok(true)
    }

    /// Write the stream and selection tables to the configured paths
    pub fn export(&self) -> Result<(usize, usize)> {
        write_exports(&self.config.export, self.snapshot(), &self.selection)
    }
}
