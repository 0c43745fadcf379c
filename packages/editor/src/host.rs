//! Save, load and export for an [`EditorSurface`].

use pagemap_model::{parse, serialize, serialize_pretty};
use tracing::{info, instrument, warn};

use crate::errors::EditorError;
use crate::storage::{FileExporter, KeyValueStore};
use crate::surface::EditorSurface;

/// Key the document is saved under
pub const STORAGE_KEY: &str = "pageStructure";

/// File name offered on export
pub const EXPORT_FILE_NAME: &str = "structure.json";

pub struct HostShell<S, E> {
    store: S,
    exporter: E,
}

impl<S: KeyValueStore, E: FileExporter> HostShell<S, E> {
    pub fn new(store: S, exporter: E) -> Self {
        Self { store, exporter }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    /// Load the saved document into `surface`.
    ///
    /// Returns `Ok(false)` when nothing was saved. A stored value that does
    /// not parse is reported and the surface is left as it was.
    #[instrument(skip(self, surface))]
    pub fn load(&mut self, surface: &mut EditorSurface) -> Result<bool, EditorError> {
        let Some(raw) = self.store.get(STORAGE_KEY)? else {
            return Ok(false);
        };

        let document = parse(&raw).map_err(|e| {
            warn!(error = %e, "Stored document rejected");
            EditorError::from(e)
        })?;
        surface.inject(document)?;

        info!(pages = surface.document().page_count(), "Loaded document");
        Ok(true)
    }

    #[instrument(skip(self, surface))]
    pub fn save(&mut self, surface: &EditorSurface) -> Result<(), EditorError> {
        let json = serialize(surface.document())?;
        self.store.set(STORAGE_KEY, &json)?;
        info!(bytes = json.len(), "Saved document");
        Ok(())
    }

    #[instrument(skip(self, surface))]
    pub fn export(&mut self, surface: &EditorSurface) -> Result<(), EditorError> {
        let json = serialize_pretty(surface.document())?;
        self.exporter.export(EXPORT_FILE_NAME, &json)?;
        info!(file = EXPORT_FILE_NAME, "Exported document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::Mutation;
    use crate::storage::{FileStore, MemoryExporter, MemoryStore, StorageError};
    use pagemap_model::{HierarchyDocument, PageNode, Position, MAX_DEPTH};

    fn shell() -> HostShell<MemoryStore, MemoryExporter> {
        HostShell::new(MemoryStore::new(), MemoryExporter::default())
    }

    #[test]
    fn test_load_without_saved_value() {
        let mut shell = shell();
        let mut surface = EditorSurface::new().unwrap();

        assert!(!shell.load(&mut surface).unwrap());
        assert_eq!(surface.document(), &HierarchyDocument::default_structure());
    }

    #[test]
    fn test_save_then_load() {
        let mut shell = shell();
        let mut edited = EditorSurface::new().unwrap();
        edited
            .apply(Mutation::RenamePage {
                page_id: "home".to_string(),
                label: "Start".to_string(),
            })
            .unwrap();
        shell.save(&edited).unwrap();

        let mut fresh = EditorSurface::new().unwrap();
        assert!(shell.load(&mut fresh).unwrap());
        assert_eq!(fresh.document(), edited.document());
    }

    #[test]
    fn test_malformed_value_leaves_surface() {
        let mut shell = shell();
        shell.store_mut().set(STORAGE_KEY, "not json").unwrap();
        let mut surface = EditorSurface::new().unwrap();

        let err = shell.load(&mut surface).unwrap_err();
        assert!(matches!(err, EditorError::MalformedDocument(_)));
        assert_eq!(surface.document(), &HierarchyDocument::default_structure());
    }

    #[test]
    fn test_export_is_pretty_json() {
        let mut shell = shell();
        let surface = EditorSurface::new().unwrap();
        shell.export(&surface).unwrap();

        let (name, contents) = &shell.exporter().files[0];
        assert_eq!(name, EXPORT_FILE_NAME);
        assert!(contents.contains("\n  \"pages\""));
        assert_eq!(&parse(contents).unwrap(), surface.document());
    }

    #[test]
    fn test_deepest_editable_chain_survives_save_and_load() {
        let mut shell = shell();
        let mut edited = EditorSurface::new().unwrap();

        // about sits at depth 2; grow a chain until the next add is refused
        let mut parent = "about".to_string();
        for depth in 3..=MAX_DEPTH {
            let id = format!("d{depth}");
            edited
                .apply(Mutation::AddPage {
                    parent_id: parent.clone(),
                    index: 0,
                    page: PageNode::new(id.clone(), "Deep", depth as u32),
                })
                .unwrap();
            parent = id;
        }
        let refused = edited.apply(Mutation::AddPage {
            parent_id: parent.clone(),
            index: 0,
            page: PageNode::new("too-deep", "Too deep", 1),
        });
        assert!(matches!(refused, Err(EditorError::Mutation(_))));

        edited
            .apply(Mutation::PinPage {
                page_id: parent,
                position: Position::new(-5.0, 7.5),
            })
            .unwrap();
        shell.save(&edited).unwrap();

        let mut fresh = EditorSurface::new().unwrap();
        assert!(shell.load(&mut fresh).unwrap());
        assert_eq!(fresh.document(), edited.document());
    }

    #[test]
    fn test_overly_deep_stored_value_is_rejected() {
        let mut node = PageNode::new("leaf", "Leaf", 1);
        for depth in 0..MAX_DEPTH {
            node = PageNode::new(format!("n{depth}"), "Nested", 1).with_children(vec![node]);
        }
        let raw = serde_json::to_string(&HierarchyDocument::new(node, Vec::new())).unwrap();

        let mut shell = shell();
        shell.store_mut().set(STORAGE_KEY, &raw).unwrap();
        let mut surface = EditorSurface::new().unwrap();

        let err = shell.load(&mut surface).unwrap_err();
        assert!(matches!(err, EditorError::TooDeep(id) if id == "leaf"));
        assert_eq!(surface.document(), &HierarchyDocument::default_structure());
    }

    #[test]
    fn test_store_failure_surfaces_as_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let mut shell = HostShell::new(FileStore::new(blocker.join("store")), MemoryExporter::default());
        let surface = EditorSurface::new().unwrap();

        let err = shell.save(&surface).unwrap_err();
        assert!(matches!(err, EditorError::Storage(StorageError::Io { .. })));
        assert!(shell.exporter().files.is_empty());
    }
}
