//! Arena representation of a subject hierarchy and the rows it renders to.
//!
//! The backend may send nodes nested (`children`) or flat (`parentId`).
//! [`Forest::from_nodes`] accepts either, links nodes by index and repairs
//! malformed input: unknown or self-referencing parents become roots, and a
//! parent cycle is cut at the first node of the cycle in input order. All
//! traversals use an explicit stack.

use payloads::responses::HierarchyNode;
use payloads::{LevelType, NodeId};
use std::collections::{HashMap, HashSet};

/// Horizontal indentation per depth level.
pub const INDENT_PX: usize = 24;

/// Rows deeper than this are collapsed into a single "truncated" marker.
pub const MAX_RENDER_DEPTH: usize = 12;

pub fn indent_px(depth: usize) -> usize {
    depth * INDENT_PX
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Forest {
    /// Nodes in input order, with `children` emptied.
    nodes: Vec<HierarchyNode>,
    index: HashMap<NodeId, usize>,
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl Forest {
    pub fn from_nodes(input: &[HierarchyNode]) -> Forest {
        let mut forest = Forest::default();

        // Flatten, remembering the enclosing node of nested children
        let mut declared_parent: Vec<Option<NodeId>> = Vec::new();
        let mut stack: Vec<(&HierarchyNode, Option<&NodeId>)> =
            input.iter().rev().map(|node| (node, None)).collect();
        while let Some((node, enclosing)) = stack.pop() {
            if forest.index.contains_key(&node.id) {
                tracing::warn!("Duplicate hierarchy node {}", node.id);
                continue;
            }
            forest.index.insert(node.id.clone(), forest.nodes.len());
            declared_parent
                .push(node.parent_id.clone().or_else(|| enclosing.cloned()));
            forest.nodes.push(HierarchyNode {
                children: Vec::new(),
                ..node.clone()
            });
            stack.extend(node.children.iter().rev().map(|c| (c, Some(&node.id))));
        }

        let count = forest.nodes.len();
        forest.parent = vec![None; count];
        forest.children = vec![Vec::new(); count];

        for (idx, parent_id) in declared_parent.iter().enumerate() {
            let parent = parent_id
                .as_ref()
                .and_then(|id| forest.index.get(id).copied())
                .filter(|&parent| parent != idx);
            match parent {
                Some(parent) => {
                    forest.parent[idx] = Some(parent);
                    forest.children[parent].push(idx);
                }
                None => forest.roots.push(idx),
            }
        }

        forest.break_cycles();
        forest.record_parents();
        forest.sort_siblings();
        forest
    }

    /// Store the resolved parent on every node, so a node that arrived
    /// nested (or was promoted to a root) reports the parent it is shown
    /// under.
    fn record_parents(&mut self) {
        for idx in 0..self.nodes.len() {
            let parent_id = self.parent[idx].map(|p| self.nodes[p].id.clone());
            self.nodes[idx].parent_id = parent_id;
        }
    }

    /// Nodes that cannot be reached from a root sit on a parent cycle.
    /// Promote the first of them to a root until everything is reachable.
    fn break_cycles(&mut self) {
        let mut reachable = vec![false; self.nodes.len()];
        let mut pending: Vec<usize> = self.roots.clone();

        loop {
            while let Some(idx) = pending.pop() {
                if reachable[idx] {
                    continue;
                }
                reachable[idx] = true;
                pending.extend(self.children[idx].iter().copied());
            }

            let Some(orphan) = reachable.iter().position(|seen| !seen) else {
                break;
            };
            tracing::warn!(
                "Hierarchy node {} is part of a parent cycle",
                self.nodes[orphan].id
            );
            if let Some(parent) = self.parent[orphan].take() {
                self.children[parent].retain(|&child| child != orphan);
            }
            self.roots.push(orphan);
            pending.push(orphan);
        }
    }

    fn sort_siblings(&mut self) {
        let nodes = &self.nodes;
        let key = |&idx: &usize| (nodes[idx].order_index, idx);
        self.roots.sort_by_key(key);
        for children in &mut self.children {
            children.sort_by_key(key);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &NodeId) -> Option<&HierarchyNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn roots(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.roots.iter().map(|&idx| &self.nodes[idx])
    }

    pub fn children_of(&self, id: &NodeId) -> Vec<&HierarchyNode> {
        self.index
            .get(id)
            .map(|&idx| {
                self.children[idx].iter().map(|&c| &self.nodes[c]).collect()
            })
            .unwrap_or_default()
    }

    pub fn has_children(&self, id: &NodeId) -> bool {
        self.index
            .get(id)
            .is_some_and(|&idx| !self.children[idx].is_empty())
    }

    pub fn parent_of(&self, id: &NodeId) -> Option<&HierarchyNode> {
        let idx = *self.index.get(id)?;
        self.parent[idx].map(|parent| &self.nodes[parent])
    }

    pub fn depth(&self, id: &NodeId) -> Option<usize> {
        let mut idx = *self.index.get(id)?;
        let mut depth = 0;
        while let Some(parent) = self.parent[idx] {
            depth += 1;
            idx = parent;
        }
        Some(depth)
    }

    /// Ids of every node below `id`, excluding `id` itself.
    pub fn descendants(&self, id: &NodeId) -> HashSet<NodeId> {
        let mut found = HashSet::new();
        let Some(&start) = self.index.get(id) else {
            return found;
        };
        let mut stack = self.children[start].clone();
        while let Some(idx) = stack.pop() {
            found.insert(self.nodes[idx].id.clone());
            stack.extend(self.children[idx].iter().copied());
        }
        found
    }

    /// Every node in display order with its depth, as if fully expanded.
    pub fn flatten(&self) -> Vec<(&HierarchyNode, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, usize)> =
            self.roots.iter().rev().map(|&idx| (idx, 0)).collect();
        while let Some((idx, depth)) = stack.pop() {
            out.push((&self.nodes[idx], depth));
            stack.extend(
                self.children[idx].iter().rev().map(|&c| (c, depth + 1)),
            );
        }
        out
    }

    /// Nodes a node may be moved under: everything except the node itself
    /// and its descendants. `None` means a node that does not exist yet.
    pub fn parent_candidates(
        &self,
        node: Option<&NodeId>,
    ) -> Vec<(&HierarchyNode, usize)> {
        let excluded = match node {
            Some(id) => {
                let mut excluded = self.descendants(id);
                excluded.insert(id.clone());
                excluded
            }
            None => HashSet::new(),
        };
        self.flatten()
            .into_iter()
            .filter(|(node, _)| !excluded.contains(&node.id))
            .collect()
    }

    /// Order index that places a new node after its future siblings.
    pub fn next_order_index(&self, parent: Option<&NodeId>) -> i32 {
        let siblings = match parent.and_then(|id| self.index.get(id)) {
            Some(&idx) => &self.children[idx],
            None => &self.roots,
        };
        siblings
            .iter()
            .map(|&idx| self.nodes[idx].order_index)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Suggested level of a new node. Children go one level deeper than
    /// their parent; new roots match the existing roots.
    pub fn suggested_level(&self, parent: Option<&NodeId>) -> LevelType {
        match parent.and_then(|id| self.get(id)) {
            Some(parent) => parent.level_type.next(),
            None => self
                .roots()
                .next()
                .map_or(LevelType::Standard, |root| root.level_type),
        }
    }

    /// Rows to render for the given expansion state.
    pub fn visible_rows(&self, expanded: &ExpansionSet) -> Vec<TreeRow<'_>> {
        enum Visit {
            Node(usize, usize),
            Truncated(usize, usize),
        }

        let mut rows = Vec::new();
        let mut stack: Vec<Visit> = self
            .roots
            .iter()
            .rev()
            .map(|&idx| Visit::Node(idx, 0))
            .collect();

        while let Some(visit) = stack.pop() {
            let (idx, depth) = match visit {
                Visit::Node(idx, depth) => (idx, depth),
                Visit::Truncated(depth, hidden) => {
                    rows.push(TreeRow::Truncated { depth, hidden });
                    continue;
                }
            };
            let node = &self.nodes[idx];
            let has_children = !self.children[idx].is_empty();
            let is_expanded = has_children && expanded.is_expanded(&node.id);
            rows.push(TreeRow::Node {
                node,
                depth,
                has_children,
                expanded: is_expanded,
            });

            if !is_expanded {
                continue;
            }
            if depth + 1 >= MAX_RENDER_DEPTH {
                let hidden = self.descendants(&node.id).len();
                stack.push(Visit::Truncated(depth + 1, hidden));
            } else {
                stack.extend(
                    self.children[idx]
                        .iter()
                        .rev()
                        .map(|&c| Visit::Node(c, depth + 1)),
                );
            }
        }

        rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreeRow<'a> {
    Node {
        node: &'a HierarchyNode,
        depth: usize,
        has_children: bool,
        expanded: bool,
    },
    /// Stand-in for `hidden` nodes below the depth limit.
    Truncated { depth: usize, hidden: usize },
}

/// Ids of expanded nodes. Everything starts collapsed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpansionSet(HashSet<NodeId>);

impl ExpansionSet {
    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.0.contains(id)
    }

    pub fn toggled(&self, id: &NodeId) -> ExpansionSet {
        let mut next = self.clone();
        if !next.0.remove(id) {
            next.0.insert(id.clone());
        }
        next
    }

    pub fn with_expanded(&self, id: &NodeId) -> ExpansionSet {
        let mut next = self.clone();
        next.0.insert(id.clone());
        next
    }

    pub fn all(forest: &Forest) -> ExpansionSet {
        ExpansionSet(
            forest
                .nodes
                .iter()
                .enumerate()
                .filter(|(idx, _)| !forest.children[*idx].is_empty())
                .map(|(_, node)| node.id.clone())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::SubjectId;

    fn node(
        id: &str,
        parent: Option<&str>,
        level: LevelType,
        order: i32,
    ) -> HierarchyNode {
        HierarchyNode {
            id: NodeId::from(id),
            subject_id: SubjectId::from("s1"),
            level_name: id.to_uppercase(),
            level_type: level,
            parent_id: parent.map(NodeId::from),
            order_index: order,
            is_active: true,
            children: Vec::new(),
        }
    }

    fn ids(rows: &[TreeRow<'_>]) -> Vec<String> {
        rows.iter()
            .map(|row| match row {
                TreeRow::Node { node, .. } => node.id.to_string(),
                TreeRow::Truncated { hidden, .. } => format!("+{hidden}"),
            })
            .collect()
    }

    /// class6 ─┬─ fractions ── halves
    ///         └─ decimals
    /// class7
    fn sample() -> Forest {
        Forest::from_nodes(&[
            node("class7", None, LevelType::Class, 1),
            node("decimals", Some("class6"), LevelType::Chapter, 1),
            node("class6", None, LevelType::Class, 0),
            node("halves", Some("fractions"), LevelType::Topic, 0),
            node("fractions", Some("class6"), LevelType::Chapter, 0),
        ])
    }

    #[test]
    fn siblings_follow_order_index() {
        let forest = sample();
        let roots: Vec<_> = forest.roots().map(|n| n.id.to_string()).collect();
        assert_eq!(roots, ["class6", "class7"]);

        let rows = forest.visible_rows(&ExpansionSet::all(&forest));
        assert_eq!(
            ids(&rows),
            ["class6", "fractions", "halves", "decimals", "class7"]
        );
    }

    #[test]
    fn nested_input_matches_flat_input() {
        let mut class6 = node("class6", None, LevelType::Class, 0);
        let mut fractions = node("fractions", None, LevelType::Chapter, 0);
        fractions.children = vec![node("halves", None, LevelType::Topic, 0)];
        class6.children = vec![
            node("decimals", None, LevelType::Chapter, 1),
            fractions,
        ];
        let nested = Forest::from_nodes(&[
            class6,
            node("class7", None, LevelType::Class, 1),
        ]);

        let flat = sample();
        let all = ExpansionSet::all(&flat);
        assert_eq!(ids(&nested.visible_rows(&all)), ids(&flat.visible_rows(&all)));
        assert_eq!(
            nested.parent_of(&NodeId::from("halves")).map(|n| n.id.to_string()),
            Some("fractions".to_string())
        );
        assert_eq!(
            nested.get(&NodeId::from("halves")).and_then(|n| n.parent_id.clone()),
            Some(NodeId::from("fractions"))
        );
    }

    #[test]
    fn collapsed_by_default_and_leaves_have_no_toggle() {
        let forest = sample();
        let rows = forest.visible_rows(&ExpansionSet::default());
        assert_eq!(ids(&rows), ["class6", "class7"]);
        assert!(matches!(
            rows[1],
            TreeRow::Node { has_children: false, expanded: false, .. }
        ));

        // Expanding a leaf changes nothing
        let leaf = ExpansionSet::default().toggled(&NodeId::from("class7"));
        let rows = forest.visible_rows(&leaf);
        assert!(matches!(rows[1], TreeRow::Node { has_children: false, expanded: false, .. }));
    }

    #[test]
    fn toggling_twice_restores_the_rows() {
        let forest = sample();
        let id = NodeId::from("class6");
        let collapsed = ExpansionSet::default();
        let expanded = collapsed.toggled(&id);
        assert_eq!(
            ids(&forest.visible_rows(&expanded)),
            ["class6", "fractions", "decimals", "class7"]
        );
        let again = expanded.toggled(&id);
        assert_eq!(again, collapsed);
        assert_eq!(
            forest.visible_rows(&again),
            forest.visible_rows(&collapsed)
        );
    }

    #[test]
    fn depths_and_indentation() {
        let forest = sample();
        assert_eq!(forest.depth(&NodeId::from("halves")), Some(2));
        assert_eq!(indent_px(2), 48);
        let rows = forest.visible_rows(&ExpansionSet::all(&forest));
        assert!(matches!(rows[2], TreeRow::Node { depth: 2, .. }));
    }

    #[test]
    fn self_parent_and_unknown_parent_become_roots() {
        let forest = Forest::from_nodes(&[
            node("a", Some("a"), LevelType::Class, 0),
            node("b", Some("missing"), LevelType::Class, 1),
        ]);
        let roots: Vec<_> = forest.roots().map(|n| n.id.to_string()).collect();
        assert_eq!(roots, ["a", "b"]);
    }

    #[test]
    fn parent_cycles_are_cut() {
        let forest = Forest::from_nodes(&[
            node("root", None, LevelType::Class, 0),
            node("x", Some("y"), LevelType::Chapter, 0),
            node("y", Some("x"), LevelType::Chapter, 1),
        ]);
        let rows = forest.visible_rows(&ExpansionSet::all(&forest));
        let mut seen = ids(&rows);
        seen.sort();
        assert_eq!(seen, ["root", "x", "y"]);
        // x was promoted, y stays below it
        assert!(forest.parent_of(&NodeId::from("x")).is_none());
        assert_eq!(
            forest.parent_of(&NodeId::from("y")).map(|n| n.id.to_string()),
            Some("x".to_string())
        );
    }

    #[test]
    fn deep_chains_are_truncated() {
        let chain: Vec<_> = (0..20)
            .map(|i| {
                let parent = (i > 0).then(|| format!("n{}", i - 1));
                node(&format!("n{i}"), parent.as_deref(), LevelType::Topic, 0)
            })
            .collect();
        let forest = Forest::from_nodes(&chain);
        let rows = forest.visible_rows(&ExpansionSet::all(&forest));

        assert_eq!(rows.len(), MAX_RENDER_DEPTH + 1);
        assert_eq!(
            rows.last(),
            Some(&TreeRow::Truncated {
                depth: MAX_RENDER_DEPTH,
                hidden: 20 - MAX_RENDER_DEPTH,
            })
        );
    }

    #[test]
    fn a_node_cannot_move_below_itself() {
        let forest = sample();
        let candidates: Vec<_> = forest
            .parent_candidates(Some(&NodeId::from("class6")))
            .into_iter()
            .map(|(n, _)| n.id.to_string())
            .collect();
        assert_eq!(candidates, ["class7"]);
        assert_eq!(forest.parent_candidates(None).len(), forest.len());
    }

    #[test]
    fn new_children_get_suggested_level_and_order() {
        let forest = sample();
        let class6 = NodeId::from("class6");
        assert_eq!(forest.suggested_level(Some(&class6)), LevelType::Chapter);
        assert_eq!(forest.suggested_level(None), LevelType::Class);
        assert_eq!(forest.next_order_index(Some(&class6)), 2);
        assert_eq!(forest.next_order_index(None), 2);
        assert_eq!(
            forest.next_order_index(Some(&NodeId::from("halves"))),
            0
        );
        assert_eq!(
            Forest::default().suggested_level(None),
            LevelType::Standard
        );
    }
}
