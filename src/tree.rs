use log::debug;
use petgraph::{
    stable_graph::{NodeIndex, StableGraph},
    visit::EdgeRef,
    Direction::{Incoming, Outgoing},
};
use serde::{Deserialize, Serialize};

use crate::{error::DatasetError, NodeKind};

/// Nested attack tree record as supplied by the application shell.
///
/// A missing `children` field and an empty list both mean the node is a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AttackNode>,
}

impl AttackNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = AttackNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Counts every node of the nested record, root included.
pub fn count_nodes(root: &AttackNode) -> usize {
    let mut count = 0;
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        count += 1;
        stack.extend(n.children.iter());
    }
    count
}

/// Name and kind of a single tree entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub kind: NodeKind,
}

/// Arena that owns every entry of an attack tree.
///
/// Edges point from parent to child and carry the child's ordinal among its
/// siblings, so children always come back in source order. Indices handed out
/// by the tree are plain handles: parents are found by walking incoming edges.
#[derive(Debug, Clone)]
pub struct AttackTree {
    g: StableGraph<Entry, usize>,
    root: NodeIndex,
}

impl From<&AttackNode> for AttackTree {
    fn from(root: &AttackNode) -> Self {
        Self::new(root)
    }
}

impl AttackTree {
    pub fn new(root: &AttackNode) -> Self {
        let mut g = StableGraph::with_capacity(count_nodes(root), 0);
        let root_idx = g.add_node(Entry {
            name: root.name.clone(),
            kind: root.kind,
        });

        let mut stack = vec![(root, root_idx)];
        while let Some((node, idx)) = stack.pop() {
            for (ordinal, child) in node.children.iter().enumerate() {
                let child_idx = g.add_node(Entry {
                    name: child.name.clone(),
                    kind: child.kind,
                });
                g.add_edge(idx, child_idx, ordinal);
                stack.push((child, child_idx));
            }
        }

        debug!("built attack tree with {} nodes", g.node_count());

        Self { g, root: root_idx }
    }

    /// Parses a nested JSON record and checks that only the root is a goal.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::Json`] if `json` is not a valid attack node record.
    /// - [`DatasetError::RootNotGoal`] if the root is not a goal.
    /// - [`DatasetError::NestedGoal`] if any node below the root is a goal.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let root: AttackNode = serde_json::from_str(json)?;
        validate(&root)?;
        Ok(Self::new(&root))
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn entry(&self, idx: NodeIndex) -> Option<&Entry> {
        self.g.node_weight(idx)
    }

    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }

    /// Indices of all entries in ascending index order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.g.node_indices()
    }

    /// Children of `idx` in source order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children = self
            .g
            .edges_directed(idx, Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect::<Vec<_>>();
        children.sort_unstable_by_key(|(ordinal, _)| *ordinal);
        children.into_iter().map(|(_, target)| target).collect()
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.g.neighbors_directed(idx, Incoming).next()
    }

    pub fn is_leaf(&self, idx: NodeIndex) -> bool {
        self.g.neighbors_directed(idx, Outgoing).next().is_none()
    }

    pub fn depth(&self, idx: NodeIndex) -> usize {
        let mut depth = 0;
        let mut curr = idx;
        while let Some(parent) = self.parent(curr) {
            depth += 1;
            curr = parent;
        }
        depth
    }

    /// All indices in depth-first pre-order, siblings in source order.
    pub fn preorder(&self) -> Vec<NodeIndex> {
        let mut res = Vec::with_capacity(self.g.node_count());
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            res.push(idx);
            stack.extend(self.children(idx).into_iter().rev());
        }
        res
    }

    pub fn max_depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0)];
        while let Some((idx, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(self.children(idx).into_iter().map(|c| (c, depth + 1)));
        }
        max
    }

    /// Rebuilds the nested record rooted at `idx`.
    pub fn to_node(&self, idx: NodeIndex) -> Option<AttackNode> {
        let entry = self.entry(idx)?;
        let children = self
            .children(idx)
            .into_iter()
            .filter_map(|c| self.to_node(c))
            .collect();

        Some(AttackNode {
            name: entry.name.clone(),
            kind: entry.kind,
            children,
        })
    }

    /// Case-insensitive substring search over entry names. An empty or
    /// blank query matches nothing.
    pub fn find(&self, query: &str) -> Vec<NodeIndex> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.preorder()
            .into_iter()
            .filter(|idx| {
                self.entry(*idx)
                    .is_some_and(|e| e.name.to_lowercase().contains(&query))
            })
            .collect()
    }
}

fn validate(root: &AttackNode) -> Result<(), DatasetError> {
    if root.kind != NodeKind::Goal {
        return Err(DatasetError::RootNotGoal(root.kind));
    }

    let mut stack = root.children.iter().collect::<Vec<_>>();
    while let Some(n) = stack.pop() {
        if n.kind == NodeKind::Goal {
            return Err(DatasetError::NestedGoal(n.name.clone()));
        }
        stack.extend(n.children.iter());
    }

    Ok(())
}
