use std::iter::successors;

use itertools::Itertools;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;

use crate::board::Board;
use crate::moves::Move;

/// Arena of the boards the search currently holds, linked by the moves applied between them.
///
/// Every board except the root has exactly one incoming edge: its source is the parent board and its weight is the move that produced the child.
/// The search only ever extends or trims the lineage of the board it is working on,
/// so a [`NodeIndex`] is dropped as soon as its board leaves the tree and never refers to a reused slot.
pub struct SearchTree {
    graph: StableDiGraph<Board, Move>,
    root: NodeIndex,
}

impl SearchTree {
    /// A tree holding only `root`.
    pub fn new(root: Board) -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(root);
        Self { graph, root }
    }

    /// The board the search started from.
    #[inline]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// # Panics
    /// If `node` is no longer in the tree.
    pub fn board(&self, node: NodeIndex) -> &Board {
        &self.graph[node]
    }

    /// # Panics
    /// If `node` is no longer in the tree.
    pub fn board_mut(&mut self, node: NodeIndex) -> &mut Board {
        &mut self.graph[node]
    }

    /// Number of boards held.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the tree holds no boards. Never the case, as the root is never removed.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// The board `node` was derived from, and the move that did it. `None` for the root.
    pub fn parent(&self, node: NodeIndex) -> Option<(NodeIndex, Move)> {
        let parent = self.graph.neighbors_directed(node, Direction::Incoming).next()?;
        let edge = self.graph.find_edge(parent, node)?;
        Some((parent, self.graph[edge]))
    }

    /// `node`, its parent, and so on up to the root.
    pub fn lineage(&self, node: NodeIndex) -> impl Iterator<Item=NodeIndex> + '_ {
        successors(Some(node), |current| self.parent(*current).map(|(parent, _)| parent))
    }

    /// Add `board` as the successor of `parent` reached through `mv`.
    pub fn attach(&mut self, parent: NodeIndex, mv: Move, board: Board) -> NodeIndex {
        let child = self.graph.add_node(board);
        self.graph.add_edge(parent, child, mv);
        child
    }

    /// Remove the leaf `node`, returning its parent and the move that led to it.
    /// The root is never removed; `None` is returned for it.
    pub fn detach(&mut self, node: NodeIndex) -> Option<(NodeIndex, Move)> {
        debug_assert!(self.graph.neighbors_directed(node, Direction::Outgoing).next().is_none(), "only leaves can be detached");

        let parent = self.parent(node)?;
        self.graph.remove_node(node);
        Some(parent)
    }

    /// Drop every board but the root.
    pub fn prune_to_root(&mut self) {
        let root = self.root;
        self.graph.retain_nodes(|_, node| node == root);
    }

    /// The moves leading from the root to `node`, in the order they were applied.
    pub fn path_to(&self, node: NodeIndex) -> Vec<Move> {
        let mut path = self.lineage(node)
            .filter_map(|current| self.parent(current).map(|(_, mv)| mv))
            .collect_vec();
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::PourRank;
    use crate::tube::Tube;

    fn chain() -> (SearchTree, Vec<NodeIndex>) {
        let mut tube = Tube::new();
        tube.push(1);
        tube.push(2);
        let mut root = Board::from_tubes(vec![tube, Tube::new(), Tube::new()]);
        root.generate_moves(&PourRank);

        let mut tree = SearchTree::new(root);
        let mut nodes = vec![tree.root()];
        for _ in 0..2 {
            let parent = *nodes.last().unwrap();
            let mv = *tree.board(parent).current_move().unwrap();
            let mut child = tree.board(parent).clone();
            child.transfer(mv.from, mv.to, mv.count);
            child.generate_moves(&PourRank);
            nodes.push(tree.attach(parent, mv, child));
        }

        (tree, nodes)
    }

    #[test]
    fn lineage_walks_to_root() {
        let (tree, nodes) = chain();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.lineage(nodes[2]).collect_vec(), vec![nodes[2], nodes[1], nodes[0]]);
        assert!(tree.parent(tree.root()).is_none());
    }

    #[test]
    fn path_is_in_applied_order() {
        let (tree, nodes) = chain();
        let path = tree.path_to(nodes[2]);
        assert_eq!(path.len(), 2);
        assert_eq!(tree.parent(nodes[1]).unwrap().1, path[0]);
        assert_eq!(tree.parent(nodes[2]).unwrap().1, path[1]);
        assert!(tree.path_to(tree.root()).is_empty());
    }

    #[test]
    fn detach_climbs_one_level() {
        let (mut tree, nodes) = chain();
        let (parent, mv) = tree.detach(nodes[2]).unwrap();
        assert_eq!(parent, nodes[1]);
        assert_eq!(tree.board(nodes[1]).current_move(), Some(&mv));
        assert_eq!(tree.len(), 2);

        assert!(tree.detach(nodes[1]).is_some());
        assert!(tree.detach(tree.root()).is_none());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn prune_keeps_only_root() {
        let (mut tree, nodes) = chain();
        tree.prune_to_root();
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.lineage(nodes[0]).count(), 1);
    }
}
