use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::data::{FileRecord, MappingNode, Selection, SelectionComposite};
use super::files::FileRegistry;
use crate::api::MappingSource;
use crate::error::FetchError;

/// Owns the mapping tree and the single current selection.
///
/// The tree is always rooted at the synthetic root node and is replaced
/// wholesale; the selection is recomputed on every `update_selected`.
#[derive(Debug, Clone)]
pub struct MappingStore {
    mappings: MappingNode,
    selected: SelectionComposite,
    /// False until the first `update_selected`
    has_selection: bool,
}

impl Default for MappingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingStore {
    pub fn new() -> Self {
        Self {
            mappings: MappingNode::root(Vec::new()),
            selected: SelectionComposite::placeholder(),
            has_selection: false,
        }
    }

    /// Request half of a mapping fetch.
    ///
    /// Holds no borrow of the store, so it runs as a background task while
    /// the tree stays readable; its output goes to [`MappingStore::apply_fetch`].
    pub fn fetch_mappings(
        source: Arc<dyn MappingSource>,
    ) -> impl Future<Output = Result<Vec<MappingNode>, FetchError>> + Send + 'static {
        async move { source.fetch_mappings().await }
    }

    /// Replace half of a mapping fetch.
    ///
    /// On error the stored tree is untouched and the error is returned.
    pub fn apply_fetch(&mut self, result: Result<Vec<MappingNode>, FetchError>) -> Result<(), FetchError> {
        match result {
            Ok(nodes) => {
                self.set_mappings(nodes);
                Ok(())
            }
            Err(e) => {
                warn!("Keeping previous mapping tree: {}", e);
                Err(e)
            }
        }
    }

    /// Wrap `nodes` in the synthetic root and swap it in.
    pub fn set_mappings(&mut self, nodes: Vec<MappingNode>) {
        self.mappings = MappingNode::root(nodes);
        info!("Mapping tree replaced ({} nodes)", self.mappings.node_count() - 1);
    }

    /// Join `selection` with the registry and make it the current selection.
    ///
    /// Never fails: unknown ids get the placeholder record, and the payload
    /// is stored as given either way.
    pub fn update_selected(&mut self, registry: &FileRegistry, selection: Selection) {
        let fs_data = match registry.lookup(&selection.id) {
            Some(record) => record.clone(),
            None => {
                debug!("No file record for mapping {}", selection.id);
                FileRecord::placeholder()
            }
        };
        debug!("Selected mapping {} ({})", selection.id, selection.path);
        self.selected = SelectionComposite {
            fs_data,
            is_data: selection,
        };
        self.has_selection = true;
    }

    /// Whether `selected_mapping` reflects a real selection rather than the placeholder
    pub fn has_selection(&self) -> bool {
        self.has_selection
    }

    pub fn all_mappings(&self) -> &MappingNode {
        &self.mappings
    }

    pub fn selected_mapping(&self) -> &SelectionComposite {
        &self.selected
    }
}

/// A visible row of the tree view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRow<'a> {
    pub node: &'a MappingNode,
    pub depth: usize,
}

/// Pre-order rows of `root`, hiding the children of collapsed nodes.
pub fn flatten_visible<'a>(root: &'a MappingNode, collapsed: &HashSet<String>) -> Vec<FlatRow<'a>> {
    let mut rows = Vec::new();
    push_rows(root, 0, collapsed, &mut rows);
    rows
}

fn push_rows<'a>(
    node: &'a MappingNode,
    depth: usize,
    collapsed: &HashSet<String>,
    rows: &mut Vec<FlatRow<'a>>,
) {
    rows.push(FlatRow { node, depth });
    if collapsed.contains(&node.id) {
        return;
    }
    for child in &node.children {
        push_rows(child, depth + 1, collapsed, rows);
    }
}
