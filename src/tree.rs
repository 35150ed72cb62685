//! Organization Hierarchy
//!
//! The static position tree behind the org chart, plus the traversal
//! helpers used by the tree, grid and breadcrumb views.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::fuzzy_match;
use crate::view_state::Language;

/// Hand-authored hierarchy, embedded at compile time
const ORG_CHART_JSON: &str = include_str!("../assets/org_chart.json");

/// Bilingual title pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Titles {
    pub en: String,
    pub fr: String,
}

impl Titles {
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Fr => &self.fr,
        }
    }
}

/// A node in the organizational tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionNode {
    pub id: String,
    pub titles: Titles,
    #[serde(default)]
    pub holder: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Depth in the tree, 0 = root
    pub level: u32,
    #[serde(default)]
    pub children: Vec<PositionNode>,
}

impl PositionNode {
    pub fn title(&self, lang: Language) -> &str {
        self.titles.get(lang)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Breadcrumb projection of a node
#[derive(Debug, Clone, PartialEq)]
pub struct BreadcrumbItem {
    pub id: String,
    pub titles: Titles,
    pub level: u32,
}

impl From<&PositionNode> for BreadcrumbItem {
    fn from(node: &PositionNode) -> Self {
        Self {
            id: node.id.clone(),
            titles: node.titles.clone(),
            level: node.level,
        }
    }
}

/// Flattened node used by the grid view and the expansion-gated tree rows
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub id: String,
    pub titles: Titles,
    pub holder: Option<String>,
    pub department: Option<String>,
    pub level: u32,
    pub depth: usize,
    pub parent_id: Option<String>,
    pub child_count: usize,
}

impl GridRow {
    fn new(node: &PositionNode, parent_id: Option<&str>, depth: usize) -> Self {
        Self {
            id: node.id.clone(),
            titles: node.titles.clone(),
            holder: node.holder.clone(),
            department: node.department.clone(),
            level: node.level,
            depth,
            parent_id: parent_id.map(str::to_string),
            child_count: node.children.len(),
        }
    }
}

#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("malformed org chart data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate position id: {0}")]
    DuplicateId(String),
}

/// Load the embedded org chart
pub fn org_chart() -> Result<PositionNode, HierarchyError> {
    let root: PositionNode = serde_json::from_str(ORG_CHART_JSON)?;
    validate(&root)?;
    Ok(root)
}

/// Check that every id appears exactly once
pub fn validate(root: &PositionNode) -> Result<(), HierarchyError> {
    fn walk<'a>(node: &'a PositionNode, seen: &mut HashSet<&'a str>) -> Result<(), HierarchyError> {
        if !seen.insert(node.id.as_str()) {
            return Err(HierarchyError::DuplicateId(node.id.clone()));
        }
        node.children.iter().try_for_each(|child| walk(child, seen))
    }
    walk(root, &mut HashSet::new())
}

/// Depth-first search for `id`, returning the root-to-node path
pub fn find_path<'a>(root: &'a PositionNode, id: &str) -> Option<Vec<&'a PositionNode>> {
    fn walk<'a>(node: &'a PositionNode, id: &str, path: &mut Vec<&'a PositionNode>) -> bool {
        path.push(node);
        if node.id == id {
            return true;
        }
        if node.children.iter().any(|child| walk(child, id, path)) {
            return true;
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

pub fn find_node<'a>(root: &'a PositionNode, id: &str) -> Option<&'a PositionNode> {
    find_path(root, id).and_then(|path| path.last().copied())
}

/// Breadcrumb path from the root to `id`
pub fn breadcrumb(root: &PositionNode, id: &str) -> Option<Vec<BreadcrumbItem>> {
    find_path(root, id).map(|path| path.into_iter().map(BreadcrumbItem::from).collect())
}

/// Pre-order walk collecting rows; `descend` decides whether a node's
/// children are visited
fn collect_rows(root: &PositionNode, descend: &dyn Fn(&PositionNode) -> bool) -> Vec<GridRow> {
    fn collect(
        node: &PositionNode,
        parent_id: Option<&str>,
        depth: usize,
        descend: &dyn Fn(&PositionNode) -> bool,
        result: &mut Vec<GridRow>,
    ) {
        result.push(GridRow::new(node, parent_id, depth));
        if descend(node) {
            for child in &node.children {
                collect(child, Some(&node.id), depth + 1, descend, result);
            }
        }
    }

    let mut result = Vec::new();
    collect(root, None, 0, descend, &mut result);
    result
}

/// Every node in display order (grid view)
pub fn flatten(root: &PositionNode) -> Vec<GridRow> {
    collect_rows(root, &|_: &PositionNode| true)
}

/// Rows whose ancestors are all expanded; the root is always visible
pub fn visible_rows(root: &PositionNode, expanded: &HashSet<String>) -> Vec<GridRow> {
    collect_rows(root, &|node: &PositionNode| expanded.contains(&node.id))
}

pub fn node_count(root: &PositionNode) -> usize {
    1 + root.children.iter().map(node_count).sum::<usize>()
}

/// Number of edges on the longest root-to-leaf path
pub fn max_depth(root: &PositionNode) -> usize {
    root.children.iter().map(|c| 1 + max_depth(c)).max().unwrap_or(0)
}

pub fn all_ids(root: &PositionNode) -> Vec<String> {
    flatten(root).into_iter().map(|row| row.id).collect()
}

/// Ids of children whose level is not exactly one below their parent
pub fn level_gaps(root: &PositionNode) -> Vec<String> {
    fn walk(node: &PositionNode, gaps: &mut Vec<String>) {
        for child in &node.children {
            if child.level != node.level + 1 {
                gaps.push(child.id.clone());
            }
            walk(child, gaps);
        }
    }

    let mut gaps = Vec::new();
    walk(root, &mut gaps);
    gaps
}

/// Nodes whose title, holder or department fuzzy-match `query`, in display order
pub fn search<'a>(root: &'a PositionNode, query: &str, lang: Language) -> Vec<&'a PositionNode> {
    fn walk<'a>(node: &'a PositionNode, query: &str, lang: Language, hits: &mut Vec<&'a PositionNode>) {
        let matches = fuzzy_match(query, node.title(lang))
            || node.holder.as_deref().is_some_and(|h| fuzzy_match(query, h))
            || node.department.as_deref().is_some_and(|d| fuzzy_match(query, d));
        if matches {
            hits.push(node);
        }
        for child in &node.children {
            walk(child, query, lang, hits);
        }
    }

    let query = query.trim();
    let mut hits = Vec::new();
    if !query.is_empty() {
        walk(root, query, lang, &mut hits);
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, level: u32, children: Vec<PositionNode>) -> PositionNode {
        PositionNode {
            id: id.to_string(),
            titles: Titles {
                en: format!("Title {}", id),
                fr: format!("Titre {}", id),
            },
            holder: None,
            department: None,
            level,
            children,
        }
    }

    fn small_tree() -> PositionNode {
        node("a", 0, vec![
            node("b", 1, vec![node("d", 2, vec![])]),
            node("c", 1, vec![]),
        ])
    }

    #[test]
    fn embedded_chart_loads() {
        let root = org_chart().unwrap();
        assert_eq!(root.id, "pm");
        assert_eq!(node_count(&root), 28);
        assert_eq!(max_depth(&root), 4);
        assert!(level_gaps(&root).is_empty());
    }

    #[test]
    fn path_exists_for_every_node() {
        let root = org_chart().unwrap();
        for id in all_ids(&root) {
            let path = find_path(&root, &id).unwrap();
            assert_eq!(path.first().unwrap().id, root.id);
            assert_eq!(path.last().unwrap().id, id);
            assert_eq!(path.len() as u32, path.last().unwrap().level + 1);
        }
    }

    #[test]
    fn path_for_absent_id_is_none() {
        let root = org_chart().unwrap();
        assert!(find_path(&root, "no-such-position").is_none());
        assert!(breadcrumb(&root, "").is_none());
    }

    #[test]
    fn breadcrumb_follows_ancestors() {
        let root = org_chart().unwrap();
        let crumbs = breadcrumb(&root, "dir-forecasting").unwrap();
        let ids: Vec<&str> = crumbs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["pm", "min-finance", "dm-finance", "adm-economic-policy", "dir-forecasting"]);
        assert_eq!(crumbs[3].titles.fr, "Sous-ministre adjoint, Politique économique");
    }

    #[test]
    fn flatten_is_preorder() {
        let rows = flatten(&small_tree());
        let order: Vec<(&str, usize)> = rows.iter().map(|r| (r.id.as_str(), r.depth)).collect();
        assert_eq!(order, [("a", 0), ("b", 1), ("d", 2), ("c", 1)]);
        assert_eq!(rows[2].parent_id.as_deref(), Some("b"));
        assert_eq!(rows[0].child_count, 2);
    }

    #[test]
    fn visible_rows_respect_expansion() {
        let tree = small_tree();
        let mut expanded = HashSet::new();
        assert_eq!(visible_rows(&tree, &expanded).len(), 1);

        expanded.insert("a".to_string());
        let ids: Vec<String> = visible_rows(&tree, &expanded).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        // Expanded descendant under a collapsed ancestor stays hidden
        expanded.remove("a");
        expanded.insert("b".to_string());
        assert_eq!(visible_rows(&tree, &expanded).len(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let tree = node("a", 0, vec![node("b", 1, vec![]), node("b", 1, vec![])]);
        assert!(matches!(validate(&tree), Err(HierarchyError::DuplicateId(id)) if id == "b"));
    }

    #[test]
    fn level_gaps_are_reported() {
        let tree = node("a", 0, vec![node("b", 2, vec![node("c", 3, vec![])])]);
        assert_eq!(level_gaps(&tree), ["b"]);
    }

    #[test]
    fn search_matches_titles_holders_and_departments() {
        let root = org_chart().unwrap();
        let ids = |q: &str, lang| -> Vec<String> {
            search(&root, q, lang).into_iter().map(|n| n.id.clone()).collect()
        };
        assert!(ids("minister of finance", Language::En).contains(&"min-finance".to_string()));
        assert!(ids("ministre des finances", Language::Fr).contains(&"min-finance".to_string()));
        assert_eq!(ids("Maya Chen", Language::En), ["dir-forecasting"]);
        assert!(ids("   ", Language::En).is_empty());
    }
}
