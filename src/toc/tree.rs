//! Arena-backed table-of-contents tree.
//!
//! A [`TocTree`] owns every node of one book's TOC in a vector. Nodes are
//! addressed through [`TocNodeId`] handles returned by
//! [`TocTree::append`]; a handle remembers which tree issued it, so passing
//! a handle from another tree is detected and rejected instead of silently
//! attaching the child somewhere unrelated.
//!
//! Nodes are only ever appended. A node's parent is fixed when it is created
//! and the children of a node keep their insertion order, which is the
//! reading order shown in the navigation pane.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{HelpdexError, Result};
use crate::locator::Locator;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable handle to a node of a specific [`TocTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TocNodeId {
    tree: u64,
    index: usize,
}

impl TocNodeId {
    /// Position of the node in creation order (the root is 0).
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One entry of the table of contents.
#[derive(Debug)]
pub struct TocNode {
    id: TocNodeId,
    title: String,
    locator: Option<Locator>,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl TocNode {
    pub fn id(&self) -> TocNodeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Destination of this entry. Only the root has none.
    pub fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// The TOC of one book.
#[derive(Debug)]
pub struct TocTree {
    id: u64,
    nodes: Vec<TocNode>,
}

impl TocTree {
    /// Create a tree holding only a root titled `title`.
    pub fn create_root<S: Into<String>>(title: S) -> Self {
        let id = NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed);
        let root = TocNode {
            id: TocNodeId { tree: id, index: 0 },
            title: title.into(),
            locator: None,
            parent: None,
            children: Vec::new(),
        };
        TocTree {
            id,
            nodes: vec![root],
        }
    }

    /// Handle of the root node.
    pub fn root(&self) -> TocNodeId {
        self.nodes[0].id
    }

    pub fn root_node(&self) -> &TocNode {
        &self.nodes[0]
    }

    /// Append a child at the end of `parent`'s children.
    ///
    /// Fails with [`HelpdexError::InvalidParent`] when `parent` was issued by
    /// another tree; the tree is left unchanged in that case.
    pub fn append<S: Into<String>>(
        &mut self,
        parent: TocNodeId,
        title: S,
        locator: Locator,
    ) -> Result<TocNodeId> {
        let parent_index = self.resolve(parent)?;
        let index = self.nodes.len();
        let id = TocNodeId {
            tree: self.id,
            index,
        };
        self.nodes.push(TocNode {
            id,
            title: title.into(),
            locator: Some(locator),
            parent: Some(parent_index),
            children: Vec::new(),
        });
        self.nodes[parent_index].children.push(index);
        Ok(id)
    }

    /// Whether `id` was issued by this tree.
    pub fn contains(&self, id: TocNodeId) -> bool {
        id.tree == self.id && id.index < self.nodes.len()
    }

    pub fn node(&self, id: TocNodeId) -> Option<&TocNode> {
        if self.contains(id) {
            Some(&self.nodes[id.index])
        } else {
            None
        }
    }

    /// Total number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Parent of `id`, or `None` for the root and foreign handles.
    pub fn parent(&self, id: TocNodeId) -> Option<&TocNode> {
        let node = self.node(id)?;
        node.parent.map(|index| &self.nodes[index])
    }

    /// Children of `id` in reading order.
    pub fn children(&self, id: TocNodeId) -> impl Iterator<Item = &TocNode> + '_ {
        let indices: &[usize] = match self.node(id) {
            Some(node) => &node.children,
            None => &[],
        };
        indices.iter().map(move |&index| &self.nodes[index])
    }

    /// Ancestors of `id`, nearest first, ending with the root.
    pub fn ancestors(&self, id: TocNodeId) -> Ancestors<'_> {
        let next = self.node(id).and_then(|node| node.parent);
        Ancestors { tree: self, next }
    }

    /// Nodes from the root down to `id` inclusive, i.e. the breadcrumb trail.
    pub fn path_to(&self, id: TocNodeId) -> Vec<&TocNode> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        let mut path: Vec<&TocNode> = self.ancestors(id).collect();
        path.reverse();
        path.push(node);
        path
    }

    /// Depth of `id` (the root is 0).
    pub fn depth(&self, id: TocNodeId) -> Option<usize> {
        self.node(id).map(|_| self.ancestors(id).count())
    }

    /// Pre-order walk yielding `(depth, node)`.
    ///
    /// The walk is lazy and finite. Calling `flatten` again (or cloning the
    /// iterator) restarts it. A tree with only a root yields just the root.
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten {
            tree: self,
            stack: vec![(0, 0)],
        }
    }

    /// First node in pre-order whose locator equals `locator`.
    pub fn find_by_locator(&self, locator: &Locator) -> Option<&TocNode> {
        self.flatten()
            .map(|(_, node)| node)
            .find(|node| node.locator.as_ref() == Some(locator))
    }

    /// First node in pre-order pointing anywhere on `page_id`.
    ///
    /// Used to highlight the TOC entry of the page currently displayed when
    /// the exact anchor has no entry of its own.
    pub fn find_by_page(&self, page_id: &str) -> Option<&TocNode> {
        self.flatten().map(|(_, node)| node).find(|node| {
            node.locator
                .as_ref()
                .is_some_and(|locator| locator.is_on_page(page_id))
        })
    }

    /// Exact locator match, falling back to the first entry on the same page.
    pub fn sync_to(&self, locator: &Locator) -> Option<&TocNode> {
        self.find_by_locator(locator)
            .or_else(|| self.find_by_page(locator.page_id()))
    }

    fn resolve(&self, id: TocNodeId) -> Result<usize> {
        if id.tree != self.id {
            return Err(HelpdexError::invalid_parent(format!(
                "node {} belongs to another tree",
                id.index
            )));
        }
        if id.index >= self.nodes.len() {
            return Err(HelpdexError::invalid_parent(format!(
                "node {} does not exist",
                id.index
            )));
        }
        Ok(id.index)
    }
}

/// Pre-order iterator returned by [`TocTree::flatten`].
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    tree: &'a TocTree,
    stack: Vec<(usize, usize)>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = (usize, &'a TocNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, index) = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.nodes[index];
        self.stack
            .extend(node.children.iter().rev().map(|&child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Iterator returned by [`TocTree::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    tree: &'a TocTree,
    next: Option<usize>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TocNode;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let node = &tree.nodes[self.next?];
        self.next = node.parent;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(wire: &str) -> Locator {
        Locator::parse(wire).unwrap()
    }

    fn titles(tree: &TocTree) -> Vec<(usize, String)> {
        tree.flatten()
            .map(|(depth, node)| (depth, node.title().to_string()))
            .collect()
    }

    #[test]
    fn test_flatten_scenario() {
        let mut tree = TocTree::create_root("Overview");
        let root = tree.root();
        tree.append(root, "Installing", loc("bookA#2")).unwrap();
        tree.append(root, "Using", loc("bookA#3")).unwrap();

        assert_eq!(
            titles(&tree),
            vec![
                (0, "Overview".to_string()),
                (1, "Installing".to_string()),
                (1, "Using".to_string()),
            ]
        );
    }

    #[test]
    fn test_flatten_is_preorder() {
        let mut tree = TocTree::create_root("Book");
        let root = tree.root();
        let a = tree.append(root, "A", loc("a")).unwrap();
        let b = tree.append(root, "B", loc("b")).unwrap();
        tree.append(a, "A.1", loc("a#1")).unwrap();
        let a2 = tree.append(a, "A.2", loc("a#2")).unwrap();
        tree.append(a2, "A.2.1", loc("a#21")).unwrap();
        tree.append(b, "B.1", loc("b#1")).unwrap();

        assert_eq!(
            titles(&tree),
            vec![
                (0, "Book".to_string()),
                (1, "A".to_string()),
                (2, "A.1".to_string()),
                (2, "A.2".to_string()),
                (3, "A.2.1".to_string()),
                (1, "B".to_string()),
                (2, "B.1".to_string()),
            ]
        );
    }

    #[test]
    fn test_flatten_restarts() {
        let mut tree = TocTree::create_root("Book");
        let root = tree.root();
        tree.append(root, "A", loc("a")).unwrap();

        let walk = tree.flatten();
        let first: Vec<_> = walk.clone().map(|(_, n)| n.title()).collect();
        let second: Vec<_> = walk.map(|(_, n)| n.title()).collect();
        assert_eq!(first, second);
        assert_eq!(tree.flatten().count(), 2);
    }

    #[test]
    fn test_empty_book_yields_root() {
        let tree = TocTree::create_root("Empty");
        assert_eq!(titles(&tree), vec![(0, "Empty".to_string())]);
        assert!(tree.root_node().is_leaf());
        assert!(tree.find_by_locator(&loc("x")).is_none());
    }

    #[test]
    fn test_foreign_parent_is_rejected() {
        let other = TocTree::create_root("Other");
        let mut tree = TocTree::create_root("Book");

        let result = tree.append(other.root(), "Stray", loc("x"));
        assert!(matches!(result, Err(HelpdexError::InvalidParent(_))));
        assert_eq!(tree.node_count(), 1);
        assert!(tree.root_node().is_leaf());
    }

    #[test]
    fn test_find_by_locator_prefers_first_preorder_match() {
        let mut tree = TocTree::create_root("Book");
        let root = tree.root();
        let a = tree.append(root, "A", loc("p#x")).unwrap();
        tree.append(a, "A child", loc("shared")).unwrap();
        tree.append(root, "B", loc("shared")).unwrap();

        let found = tree.find_by_locator(&loc("shared")).unwrap();
        assert_eq!(found.title(), "A child");
    }

    #[test]
    fn test_sync_falls_back_to_page() {
        let mut tree = TocTree::create_root("Book");
        let root = tree.root();
        tree.append(root, "Intro", loc("intro")).unwrap();
        tree.append(root, "Setup", loc("setup#top")).unwrap();

        assert_eq!(tree.sync_to(&loc("setup#top")).unwrap().title(), "Setup");
        assert_eq!(tree.sync_to(&loc("setup#later")).unwrap().title(), "Setup");
        assert!(tree.sync_to(&loc("missing#a")).is_none());
    }

    #[test]
    fn test_navigation_helpers() {
        let mut tree = TocTree::create_root("Book");
        let root = tree.root();
        let ch = tree.append(root, "Chapter", loc("c")).unwrap();
        let sec = tree.append(ch, "Section", loc("c#s")).unwrap();

        assert_eq!(tree.depth(sec), Some(2));
        assert_eq!(tree.parent(sec).unwrap().title(), "Chapter");
        assert!(tree.parent(root).is_none());
        assert!(tree.root_node().is_root());
        assert!(!tree.node(ch).unwrap().is_root());
        assert_eq!(tree.root_node().child_count(), 1);
        assert_eq!(tree.node(ch).unwrap().child_count(), 1);
        assert_eq!(tree.node(sec).unwrap().child_count(), 0);

        let path: Vec<_> = tree.path_to(sec).iter().map(|n| n.title()).collect();
        assert_eq!(path, vec!["Book", "Chapter", "Section"]);

        let children: Vec<_> = tree.children(root).map(|n| n.title()).collect();
        assert_eq!(children, vec!["Chapter"]);
        assert_eq!(
            tree.node(sec).unwrap().locator().unwrap().to_string(),
            "c#s"
        );
    }
}
