pub mod edit;
pub mod export;
pub mod init;
pub mod sections;
pub mod show;

pub use edit::{add, move_page, pin, remove, rename, unpin, AddArgs, MoveArgs, PinArgs, PageArg, RenameArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use sections::{reorder, sections, ReorderArgs, SectionsArgs};
pub use show::{show, ShowArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use pagemap_editor::{DirectoryExporter, EditorSurface, FileStore, HierarchyDocument, HostShell};
use std::path::Path;
use tracing::{debug, info};

/// A loaded project: config, the editor surface and its persistence.
pub struct Project {
    pub config: Config,
    pub surface: EditorSurface,
    pub host: HostShell<FileStore, DirectoryExporter>,
}

impl Project {
    /// Open the project in `cwd`. Without a saved document the built-in
    /// structure is used.
    pub fn open(cwd: &Path) -> Result<Self> {
        let config = Config::load(cwd)?;
        debug!(store = %config.store_path(cwd).display(), direction = %config.direction, "Opening project");
        let mut surface = EditorSurface::with_document(HierarchyDocument::default_structure(), config.direction)?;
        let mut host = HostShell::new(
            FileStore::new(config.store_path(cwd)),
            DirectoryExporter::new(config.export_path(cwd)),
        );
        let restored = host
            .load(&mut surface)
            .with_context(|| format!("Could not load saved document from {}", config.store_dir))?;
        info!(restored, pages = surface.document().page_count(), "Opened project");

        Ok(Self { config, surface, host })
    }

    pub fn save(&mut self) -> Result<()> {
        self.host.save(&self.surface)?;
        debug!(version = self.surface.version(), "Saved project");
        Ok(())
    }
}
