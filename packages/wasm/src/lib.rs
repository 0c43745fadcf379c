use pagemap_editor::{
    EdgeChange, EditorError, EditorSurface, HierarchyDocument, LayoutDirection, Mutation, NodeChange, SectionDrop,
};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserDownload, LocalStorageStore};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_direction(direction: Option<String>) -> Result<LayoutDirection, String> {
    direction.map_or(Ok(LayoutDirection::default()), |d| d.parse())
}

fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, EditorError> {
    serde_json::from_str(json).map_err(|e| EditorError::MalformedDocument(e.to_string()))
}

/// The editor surface as seen from JavaScript. Structured values cross the
/// boundary as JSON strings.
#[wasm_bindgen]
pub struct PageMapEditor {
    surface: EditorSurface,
}

#[wasm_bindgen]
impl PageMapEditor {
    /// Editor showing the built-in structure. `direction` is "TB" or "LR".
    #[wasm_bindgen(constructor)]
    pub fn new(direction: Option<String>) -> Result<PageMapEditor, JsValue> {
        let direction = parse_direction(direction).map_err(js_error)?;
        let surface =
            EditorSurface::with_document(HierarchyDocument::default_structure(), direction).map_err(js_error)?;
        Ok(Self { surface })
    }

    /// Positioned nodes and edges for the renderer
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.surface.rendered()).map_err(js_error)
    }

    /// The saved form of the current document
    #[wasm_bindgen(js_name = documentJson)]
    pub fn document_json(&self) -> Result<String, JsValue> {
        pagemap_editor::serialize(self.surface.document()).map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> u64 {
        self.surface.version()
    }

    #[wasm_bindgen(getter)]
    pub fn direction(&self) -> String {
        self.surface.direction().to_string()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.surface.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.surface.can_redo()
    }

    /// Replace the document with one in wire format
    pub fn inject(&mut self, json: &str) -> Result<(), JsValue> {
        let doc = pagemap_editor::parse(json).map_err(js_error)?;
        self.surface.inject(doc).map_err(js_error)
    }

    /// Apply a mutation such as `{"type":"renamePage","pageId":"about","label":"Us"}`
    #[wasm_bindgen(js_name = applyMutation)]
    pub fn apply_mutation(&mut self, json: &str) -> Result<u64, JsValue> {
        self.apply_mutation_inner(json).map_err(js_error)
    }

    /// Handle `{"activeId":"section-0","overId":"section-3"}` from the drag engine
    #[wasm_bindgen(js_name = dropSection)]
    pub fn drop_section(&mut self, json: &str) -> Result<bool, JsValue> {
        let drop: SectionDrop = from_json(json).map_err(js_error)?;
        self.surface.drop_section(&drop).map_err(js_error)
    }

    #[wasm_bindgen(js_name = reorderSections)]
    pub fn reorder_sections(&mut self, dragged: &str, target: &str) -> Result<bool, JsValue> {
        self.surface.reorder_sections(dragged, target).map_err(js_error)
    }

    #[wasm_bindgen(js_name = applyNodeChanges)]
    pub fn apply_node_changes(&mut self, json: &str) -> Result<(), JsValue> {
        let changes: Vec<NodeChange> = from_json(json).map_err(js_error)?;
        self.surface.apply_node_changes(&changes);
        Ok(())
    }

    #[wasm_bindgen(js_name = applyEdgeChanges)]
    pub fn apply_edge_changes(&mut self, json: &str) -> Result<(), JsValue> {
        let changes: Vec<EdgeChange> = from_json(json).map_err(js_error)?;
        self.surface.apply_edge_changes(&changes);
        Ok(())
    }

    #[wasm_bindgen(js_name = setDirection)]
    pub fn set_direction(&mut self, direction: &str) -> Result<(), JsValue> {
        let direction: LayoutDirection = direction.parse().map_err(js_error)?;
        self.surface.set_direction(direction).map_err(js_error)
    }

    pub fn undo(&mut self) -> Result<bool, JsValue> {
        self.surface.undo().map_err(js_error)
    }

    pub fn redo(&mut self) -> Result<bool, JsValue> {
        self.surface.redo().map_err(js_error)
    }

    /// Load from `localStorage`. Resolves to false when nothing was saved.
    #[cfg(target_arch = "wasm32")]
    pub fn load(&mut self) -> Result<bool, JsValue> {
        browser_host()?.load(&mut self.surface).map_err(js_error)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), JsValue> {
        browser_host()?.save(&self.surface).map_err(js_error)
    }

    /// Download the document as `structure.json`
    #[cfg(target_arch = "wasm32")]
    pub fn export(&self) -> Result<(), JsValue> {
        browser_host()?.export(&self.surface).map_err(js_error)
    }
}

impl PageMapEditor {
    fn apply_mutation_inner(&mut self, json: &str) -> Result<u64, EditorError> {
        let mutation: Mutation = from_json(json)?;
        self.surface.apply(mutation)
    }

    pub fn surface(&self) -> &EditorSurface {
        &self.surface
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_host() -> Result<pagemap_editor::HostShell<LocalStorageStore, BrowserDownload>, JsValue> {
    let store = LocalStorageStore::new().map_err(js_error)?;
    Ok(pagemap_editor::HostShell::new(store, BrowserDownload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> PageMapEditor {
        PageMapEditor::new(None).unwrap()
    }

    #[test]
    fn test_snapshot_shape() {
        let snapshot: serde_json::Value = serde_json::from_str(&editor().snapshot().unwrap()).unwrap();

        let home = &snapshot["nodes"][0];
        assert_eq!(home["id"], "home");
        assert_eq!(home["type"], "custom");
        assert_eq!(home["className"], "level-1");
        assert_eq!(home["position"]["y"], 0.0);
        assert_eq!(home["sourcePosition"], "bottom");
        assert_eq!(home["targetPosition"], "top");
        assert_eq!(home["data"]["sections"].as_array().unwrap().len(), 5);
        assert_eq!(snapshot["edges"][0]["type"], "smoothstep");
    }

    #[test]
    fn test_lr_constructor() {
        let editor = PageMapEditor::new(Some("LR".to_string())).unwrap();
        assert_eq!(editor.direction(), "LR");
    }

    #[test]
    fn test_apply_mutation_json() {
        let mut editor = editor();
        let version = editor
            .apply_mutation(r#"{"type":"renamePage","pageId":"about","label":"About us"}"#)
            .unwrap();

        assert_eq!(version, 1);
        assert_eq!(editor.surface().document().find("about").unwrap().label, "About us");
        assert!(editor.can_undo());
    }

    #[test]
    fn test_bad_mutation_json_is_malformed() {
        let mut editor = editor();
        let err = editor.apply_mutation_inner("{\"type\":\"explode\"}").unwrap_err();
        assert!(matches!(err, EditorError::MalformedDocument(_)));
    }

    #[test]
    fn test_drop_section_json() {
        let mut editor = editor();
        assert!(editor
            .drop_section(r#"{"activeId":"section-4","overId":"section-0"}"#)
            .unwrap());
        assert_eq!(editor.surface().document().home_sections[0], "Footer");
    }

    #[test]
    fn test_node_changes_leave_document() {
        let mut editor = editor();
        let before = editor.document_json().unwrap();
        editor
            .apply_node_changes(r#"[{"type":"position","id":"about","position":{"x":5,"y":5}}]"#)
            .unwrap();

        assert_eq!(editor.document_json().unwrap(), before);
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn test_inject_round_trip() {
        let mut source = editor();
        source
            .apply_mutation(r#"{"type":"setHomeSections","sections":["Hero"]}"#)
            .unwrap();

        let mut target = editor();
        target.inject(&source.document_json().unwrap()).unwrap();
        assert_eq!(target.surface().document(), source.surface().document());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(parse_direction(None), Ok(LayoutDirection::TB));
        assert_eq!(parse_direction(Some("lr".to_string())), Ok(LayoutDirection::LR));
        assert!(parse_direction(Some("diagonal".to_string())).is_err());
    }
}
