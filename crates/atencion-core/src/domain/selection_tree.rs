//! Hierarchical Selection
//!
//! Lazily loaded drill-down trees (clasificación → tipo → subtipo and
//! SET → alimentador). Nodes live in an arena and refer to each other by
//! index; each level keeps its own ordered selection.
//!
//! Invariant: a node stays selected only while its ancestors' selections
//! have not been removed. Unchecking any node runs `remove_subtree`.

use serde::{Deserialize, Serialize};

use super::error::ApiResult;
use super::lookup::{list, LookupBundle, LookupItem, LookupRequest};
use super::sample_data::sample_rows;

/// Arena index of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

/// Which drill-down this tree backs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeKind {
    Classification,
    Electrical,
}

impl TreeKind {
    /// List name per level, root first
    pub fn levels(&self) -> &'static [&'static str] {
        match self {
            TreeKind::Classification => &[list::CLASIFICACIONES, list::TIPOS, list::SUBTIPOS],
            TreeKind::Electrical => &[list::SETS, list::ALIMENTACIONES],
        }
    }

    pub fn depth(&self) -> usize {
        self.levels().len()
    }
}

/// What to show when a level fails to load or comes back empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Fill the level with embedded sample rows
    #[default]
    SampleData,
    /// Leave it unloaded and flag the failure
    Explicit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub item: LookupItem,
    pub level: usize,
    pub parent: Option<NodeId>,
    pub expanded: bool,
    /// `None` until the first successful load
    pub children: Option<Vec<NodeId>>,
    loading: bool,
    load_failed: bool,
}

impl TreeNode {
    fn new(item: LookupItem, level: usize, parent: Option<NodeId>) -> Self {
        Self {
            item,
            level,
            parent,
            expanded: false,
            children: None,
            loading: false,
            load_failed: false,
        }
    }
}

/// A children load the caller must perform and hand back to `resolve_children`
#[derive(Debug, Clone, PartialEq)]
pub struct ChildFetch {
    pub node: NodeId,
    pub list: &'static str,
    pub request: LookupRequest,
}

/// Accepted result of the classification drill-down
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationSelection {
    #[serde(rename = "clasificaciones")]
    pub classifications: Vec<String>,
    #[serde(rename = "tipos")]
    pub types: Vec<String>,
    #[serde(rename = "subtipos")]
    pub subtypes: Vec<String>,
}

impl ClassificationSelection {
    pub fn is_empty(&self) -> bool {
        self.classifications.is_empty() && self.types.is_empty() && self.subtypes.is_empty()
    }
}

impl From<&SelectionTree> for ClassificationSelection {
    fn from(tree: &SelectionTree) -> Self {
        Self {
            classifications: tree.selected_codes(0),
            types: tree.selected_codes(1),
            subtypes: tree.selected_codes(2),
        }
    }
}

/// Accepted result of the SET / alimentador drill-down
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeederSelection {
    pub sets: Vec<String>,
    #[serde(rename = "alimentadores")]
    pub feeders: Vec<String>,
}

impl FeederSelection {
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty() && self.feeders.is_empty()
    }
}

impl From<&SelectionTree> for FeederSelection {
    fn from(tree: &SelectionTree) -> Self {
        Self {
            sets: tree.selected_codes(0),
            feeders: tree.selected_codes(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionTree {
    kind: TreeKind,
    fallback: FallbackPolicy,
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
    roots_failed: bool,
    selected: Vec<Vec<NodeId>>,
}

impl SelectionTree {
    pub fn new(kind: TreeKind, fallback: FallbackPolicy) -> Self {
        Self {
            kind,
            fallback,
            nodes: Vec::new(),
            roots: Vec::new(),
            roots_failed: false,
            selected: vec![Vec::new(); kind.depth()],
        }
    }

    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    // ========================
    // Loading
    // ========================

    /// Request for the root level
    pub fn root_request(&self) -> LookupRequest {
        LookupRequest::new().all(self.kind.levels()[0])
    }

    /// Install the root list from a fetch result
    pub fn resolve_roots(&mut self, result: ApiResult<LookupBundle>) {
        let name = self.kind.levels()[0];
        let items = self.items_or_fallback(name, result);
        self.nodes.clear();
        self.roots.clear();
        self.selected.iter_mut().for_each(Vec::clear);
        self.roots_failed = items.is_none();
        if let Some(items) = items {
            self.roots = self.attach(items, 0, None);
        }
    }

    /// Flip a node open or closed. Returns the children load to run when the
    /// node opens for the first time; repeat toggles and in-flight loads
    /// never produce a second request.
    pub fn toggle_expand(&mut self, id: NodeId) -> Option<ChildFetch> {
        let depth = self.kind.depth();
        let node = self.nodes.get_mut(id.0)?;
        if node.level + 1 >= depth {
            return None;
        }
        node.expanded = !node.expanded;
        if !node.expanded || node.children.is_some() || node.loading {
            return None;
        }

        let child_list = self.kind.levels()[node.level + 1];
        match LookupRequest::children_of(child_list, &node.item.code) {
            Some(request) => {
                node.loading = true;
                node.load_failed = false;
                Some(ChildFetch {
                    node: id,
                    list: child_list,
                    request,
                })
            }
            None => {
                log::warn!(
                    "Código no numérico '{}', no se pueden cargar {}",
                    node.item.code,
                    child_list
                );
                node.loading = true;
                self.resolve_children(id, Ok(LookupBundle::new()));
                None
            }
        }
    }

    /// Attach the result of a `ChildFetch`. Results for nodes that are not
    /// waiting on a load are dropped.
    pub fn resolve_children(&mut self, id: NodeId, result: ApiResult<LookupBundle>) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        if !node.loading {
            return;
        }
        let level = node.level + 1;
        let name = self.kind.levels()[level];
        let items = self.items_or_fallback(name, result);

        let children = items.map(|items| self.attach(items, level, Some(id)));
        let node = &mut self.nodes[id.0];
        node.loading = false;
        node.load_failed = children.is_none();
        node.children = children;
    }

    fn items_or_fallback(&self, name: &str, result: ApiResult<LookupBundle>) -> Option<Vec<LookupItem>> {
        let items = match result {
            Ok(mut bundle) => bundle.take(name),
            Err(e) => {
                log::error!("Error al cargar {}: {}", name, e);
                Vec::new()
            }
        };
        if !items.is_empty() {
            return Some(items);
        }
        match self.fallback {
            FallbackPolicy::SampleData => {
                log::info!("Usando datos de ejemplo para {}", name);
                Some(sample_rows(name))
            }
            FallbackPolicy::Explicit => None,
        }
    }

    fn attach(&mut self, items: Vec<LookupItem>, level: usize, parent: Option<NodeId>) -> Vec<NodeId> {
        items
            .into_iter()
            .map(|item| {
                let id = NodeId(self.nodes.len());
                self.nodes.push(TreeNode::new(item, level, parent));
                id
            })
            .collect()
    }

    // ========================
    // Queries
    // ========================

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn roots_failed(&self) -> bool {
        self.roots_failed
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .and_then(|n| n.children.as_deref())
            .unwrap_or(&[])
    }

    pub fn is_expandable(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.level + 1 < self.kind.depth())
    }

    pub fn is_loading(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.loading)
    }

    pub fn load_failed(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.load_failed)
    }

    /// First node at `level` with `code`
    pub fn find(&self, level: usize, code: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.level == level && n.item.code == code)
            .map(NodeId)
    }

    /// Expanded tree flattened depth-first as (node, depth) pairs
    pub fn visible_rows(&self) -> Vec<(NodeId, usize)> {
        fn collect(tree: &SelectionTree, ids: &[NodeId], result: &mut Vec<(NodeId, usize)>) {
            for &id in ids {
                let node = &tree.nodes[id.0];
                result.push((id, node.level));
                if node.expanded {
                    collect(tree, tree.children(id), result);
                }
            }
        }

        let mut result = Vec::new();
        collect(self, &self.roots, &mut result);
        result
    }

    // ========================
    // Selection
    // ========================

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.node(id)
            .is_some_and(|n| self.selected[n.level].contains(&id))
    }

    /// Check is idempotent; uncheck cascades to every selected descendant
    pub fn toggle_select(&mut self, id: NodeId, checked: bool) {
        let Some(level) = self.node(id).map(|n| n.level) else {
            return;
        };
        if checked {
            if !self.selected[level].contains(&id) {
                self.selected[level].push(id);
            }
        } else {
            self.remove_subtree(id);
        }
    }

    /// Level/code form of `toggle_select`. Codes repeat across parents, so
    /// every node at `level` carrying `code` is affected.
    pub fn toggle_select_code(&mut self, level: usize, code: &str, checked: bool) {
        let ids: Vec<NodeId> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.level == level && n.item.code == code)
            .map(|(i, _)| NodeId(i))
            .collect();
        for id in ids {
            self.toggle_select(id, checked);
        }
    }

    pub fn is_selected_code(&self, level: usize, code: &str) -> bool {
        self.selected
            .get(level)
            .is_some_and(|ids| ids.iter().any(|id| self.nodes[id.0].item.code == code))
    }

    /// Deselect `id` and all of its loaded descendants
    pub fn remove_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current.0) else {
                continue;
            };
            self.selected[node.level].retain(|s| *s != current);
            if let Some(children) = &node.children {
                stack.extend(children.iter().copied());
            }
        }
    }

    /// Selected codes at `level`, in selection order, without repeats
    pub fn selected_codes(&self, level: usize) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for id in self.selected.get(level).map(Vec::as_slice).unwrap_or(&[]) {
            let code = &self.nodes[id.0].item.code;
            if !codes.contains(code) {
                codes.push(code.clone());
            }
        }
        codes
    }

    pub fn selection_count(&self) -> usize {
        self.selected.iter().map(Vec::len).sum()
    }

    pub fn clear_selection(&mut self) {
        self.selected.iter_mut().for_each(Vec::clear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiError;

    fn bundle(name: &str, rows: &[(&str, &str)]) -> ApiResult<LookupBundle> {
        let mut b = LookupBundle::new();
        b.insert(name, rows.iter().map(|(c, l)| LookupItem::new(*c, *l)).collect());
        Ok(b)
    }

    fn classification_tree() -> SelectionTree {
        let mut tree = SelectionTree::new(TreeKind::Classification, FallbackPolicy::SampleData);
        tree.resolve_roots(bundle(list::CLASIFICACIONES, &[("1", "APC"), ("2", "C")]));
        tree
    }

    #[test]
    fn test_first_expand_fetches_once() {
        let mut tree = classification_tree();
        let apc = tree.find(0, "1").unwrap();

        let fetch = tree.toggle_expand(apc).expect("first expand loads children");
        assert_eq!(fetch.list, list::TIPOS);
        assert_eq!(fetch.request.get(list::TIPOS), Some(1));
        assert!(tree.is_loading(apc));

        // double click while in flight
        assert!(tree.toggle_expand(apc).is_none());
        assert!(tree.toggle_expand(apc).is_none());

        tree.resolve_children(apc, bundle(list::TIPOS, &[("10", "M - MASIVOS")]));
        assert!(!tree.is_loading(apc));
        assert_eq!(tree.children(apc).len(), 1);

        // collapse / expand cycles reuse the cache
        assert!(tree.node(apc).unwrap().expanded);
        assert!(tree.toggle_expand(apc).is_none());
        assert!(tree.toggle_expand(apc).is_none());
        assert!(tree.node(apc).unwrap().expanded);
    }

    #[test]
    fn test_leaf_level_never_expands() {
        let mut tree = SelectionTree::new(TreeKind::Electrical, FallbackPolicy::SampleData);
        tree.resolve_roots(bundle(list::SETS, &[("4", "SET 004")]));
        let set = tree.roots()[0];
        let fetch = tree.toggle_expand(set).unwrap();
        assert_eq!(fetch.request.get(list::ALIMENTACIONES), Some(4));
        tree.resolve_children(set, bundle(list::ALIMENTACIONES, &[("8", "ALIM 8")]));

        let feeder = tree.children(set)[0];
        assert!(!tree.is_expandable(feeder));
        assert!(tree.toggle_expand(feeder).is_none());
        assert!(!tree.node(feeder).unwrap().expanded);
    }

    #[test]
    fn test_uncheck_classification_cascades_to_type_and_subtype() {
        let mut tree = classification_tree();
        let apc = tree.find(0, "1").unwrap();
        tree.toggle_expand(apc);
        tree.resolve_children(apc, bundle(list::TIPOS, &[("M", "M - MASIVOS"), ("R", "R - RUTINA")]));

        // "M" is not a numeric id, so its subtypes come from the samples
        let masivos = tree.find(1, "M").unwrap();
        assert!(tree.toggle_expand(masivos).is_none());
        let sub = tree.find(2, "1").unwrap();
        assert_eq!(tree.node(sub).unwrap().parent, Some(masivos));

        tree.toggle_select(apc, true);
        tree.toggle_select(masivos, true);
        tree.toggle_select(sub, true);
        assert!(tree.is_selected_code(1, "M"));
        assert!(tree.is_selected_code(2, "1"));

        tree.toggle_select_code(0, "1", false);
        assert!(!tree.is_selected(apc));
        assert!(!tree.is_selected_code(1, "M"));
        assert!(!tree.is_selected_code(2, "1"));
        assert_eq!(tree.selection_count(), 0);
    }

    #[test]
    fn test_uncheck_type_leaves_siblings_and_parent() {
        let mut tree = classification_tree();
        let apc = tree.find(0, "1").unwrap();
        tree.toggle_expand(apc);
        tree.resolve_children(apc, bundle(list::TIPOS, &[("10", "M"), ("11", "R")]));
        let m = tree.find(1, "10").unwrap();
        let r = tree.find(1, "11").unwrap();
        tree.toggle_expand(m);
        tree.resolve_children(m, bundle(list::SUBTIPOS, &[("100", "A"), ("101", "B")]));

        tree.toggle_select(apc, true);
        tree.toggle_select(m, true);
        tree.toggle_select(r, true);
        for code in ["100", "101"] {
            tree.toggle_select_code(2, code, true);
        }

        tree.toggle_select(m, false);
        assert!(tree.is_selected(apc));
        assert!(tree.is_selected(r));
        assert!(tree.selected_codes(2).is_empty());

        let selection = ClassificationSelection::from(&tree);
        assert_eq!(selection.classifications, vec!["1"]);
        assert_eq!(selection.types, vec!["11"]);
    }

    #[test]
    fn test_unchecking_leaf_only_removes_itself() {
        let mut tree = SelectionTree::new(TreeKind::Electrical, FallbackPolicy::SampleData);
        tree.resolve_roots(bundle(list::SETS, &[("1", "SET 001")]));
        let set = tree.roots()[0];
        tree.toggle_expand(set);
        tree.resolve_children(set, bundle(list::ALIMENTACIONES, &[("7", "A7"), ("8", "A8")]));

        tree.toggle_select(set, true);
        tree.toggle_select_code(1, "7", true);
        tree.toggle_select_code(1, "8", true);
        tree.toggle_select_code(1, "8", true);
        tree.toggle_select_code(1, "7", false);

        let selection = FeederSelection::from(&tree);
        assert_eq!(selection.sets, vec!["1"]);
        assert_eq!(selection.feeders, vec!["8"]);
    }

    #[test]
    fn test_failed_roots_fall_back_to_samples() {
        let mut tree = SelectionTree::new(TreeKind::Electrical, FallbackPolicy::SampleData);
        tree.resolve_roots(Err(ApiError::Network("timeout".into())));
        assert!(!tree.roots_failed());
        assert_eq!(tree.roots().len(), 3);
        assert_eq!(tree.node(tree.roots()[0]).unwrap().item.label, "SET 001 - Zona Norte");
    }

    #[test]
    fn test_empty_children_fall_back_to_samples() {
        let mut tree = classification_tree();
        let apc = tree.find(0, "1").unwrap();
        tree.toggle_expand(apc);
        tree.resolve_children(apc, Ok(LookupBundle::new()));
        let labels: Vec<_> = tree
            .children(apc)
            .iter()
            .map(|id| tree.node(*id).unwrap().item.label.clone())
            .collect();
        assert_eq!(labels, vec!["M - MASIVOS", "R - RUTINA"]);
    }

    #[test]
    fn test_explicit_policy_flags_failure_and_allows_retry() {
        let mut tree = SelectionTree::new(TreeKind::Classification, FallbackPolicy::Explicit);
        tree.resolve_roots(Err(ApiError::Auth("sin token".into())));
        assert!(tree.roots_failed());
        assert!(tree.roots().is_empty());

        tree.resolve_roots(bundle(list::CLASIFICACIONES, &[("2", "C - CONSULTAS")]));
        let c = tree.roots()[0];
        tree.toggle_expand(c).unwrap();
        tree.resolve_children(c, Err(ApiError::Network("HTTP 500".into())));
        assert!(tree.load_failed(c));
        assert!(tree.children(c).is_empty());

        // collapse, reopen: a new request goes out
        assert!(tree.toggle_expand(c).is_none());
        assert!(tree.toggle_expand(c).is_some());
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut tree = classification_tree();
        let apc = tree.find(0, "1").unwrap();
        tree.resolve_children(apc, bundle(list::TIPOS, &[("10", "M")]));
        assert!(tree.node(apc).unwrap().children.is_none());
    }

    #[test]
    fn test_visible_rows_follow_expansion() {
        let mut tree = classification_tree();
        let apc = tree.find(0, "1").unwrap();
        tree.toggle_expand(apc);
        tree.resolve_children(apc, bundle(list::TIPOS, &[("10", "M"), ("11", "R")]));
        let m = tree.find(1, "10").unwrap();
        tree.toggle_expand(m);
        tree.resolve_children(m, bundle(list::SUBTIPOS, &[("100", "A")]));

        let rows: Vec<_> = tree
            .visible_rows()
            .into_iter()
            .map(|(id, depth)| (tree.node(id).unwrap().item.code.clone(), depth))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("1".to_string(), 0),
                ("10".to_string(), 1),
                ("100".to_string(), 2),
                ("11".to_string(), 1),
                ("2".to_string(), 0),
            ]
        );

        tree.toggle_expand(apc);
        assert_eq!(tree.visible_rows().len(), 2);
    }

    #[test]
    fn test_selection_serializes_with_wire_names() {
        let selection = ClassificationSelection {
            classifications: vec!["1".into()],
            types: vec![],
            subtypes: vec!["3".into()],
        };
        let value = serde_json::to_value(&selection).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "clasificaciones": ["1"], "tipos": [], "subtipos": ["3"] })
        );
    }
}
