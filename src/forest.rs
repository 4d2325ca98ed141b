//! Tree snapshots of a packed heap
//!
//! A [`Tree`] is an explicit reconstruction of the implicit tree stored in a
//! heap's array. It is built breadth-first: array index `i` becomes a node
//! whose children are the nodes built from indices
//! `arity * i + 1 ..= arity * i + arity`.
//!
//! **Memory Model**: nodes live in an arena owned by the tree and refer to each
//! other by [`NodeId`]. The parent link is a navigation aid, never an owner,
//! and nothing points back into the heap: a tree is a copy, so mutating the
//! heap afterwards leaves it untouched.

use std::collections::VecDeque;
use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::array::child_range;
use crate::handle::Handle;

/// Index of a node inside the [`Tree`] that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the tree's breadth-first order
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of a [`Tree`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<V, P> {
    handle: Handle<V, P>,
    parent: Option<NodeId>,
    /// Binary heaps never spill this to the heap allocator
    children: SmallVec<[NodeId; 2]>,
}

impl<V, P> TreeNode<V, P> {
    #[inline]
    pub fn value(&self) -> &V {
        self.handle.value()
    }

    #[inline]
    pub fn priority(&self) -> &P {
        self.handle.priority()
    }

    #[inline]
    pub fn handle(&self) -> &Handle<V, P> {
        &self.handle
    }

    /// `None` for the root
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A read-only tree rebuilt from a heap's packed array
///
/// A tree always has at least one node (its root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<V, P> {
    /// Nodes in breadth-first order; the root is at index 0
    nodes: Vec<TreeNode<V, P>>,
}

impl<V, P> Tree<V, P> {
    /// Rebuilds the tree rooted at `packed[0]`, or `None` if `packed` is empty
    pub(crate) fn from_packed<H, F>(packed: &[H], arity: usize, transform: &mut F) -> Option<Self>
    where
        F: FnMut(&H) -> Handle<V, P>,
    {
        if packed.is_empty() {
            return None;
        }

        let mut nodes: Vec<TreeNode<V, P>> = Vec::with_capacity(packed.len());
        let mut queue: VecDeque<(usize, Option<NodeId>)> = VecDeque::new();
        queue.push_back((0, None));

        while let Some((index, parent)) = queue.pop_front() {
            let id = NodeId(nodes.len());
            nodes.push(TreeNode {
                handle: transform(&packed[index]),
                parent,
                children: SmallVec::new(),
            });
            if let Some(parent) = parent {
                nodes[parent.0].children.push(id);
            }

            for child in child_range(index, arity, packed.len()) {
                queue.push_back((child, Some(id)));
            }
        }

        Some(Self { nodes })
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node for `id`
    ///
    /// # Panics
    /// Panics if `id` was produced by a different, smaller tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode<V, P> {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&TreeNode<V, P>> {
        self.nodes.get(id.0)
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Number of nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges between `id` and the root
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Number of levels in the tree
    pub fn height(&self) -> usize {
        // Breadth-first order puts a deepest node last
        self.depth(NodeId(self.nodes.len() - 1)) + 1
    }

    /// Iterates nodes in breadth-first order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode<V, P>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Builds a tree of the same shape with every handle translated by `f`
    pub fn map<V2, P2, F>(&self, mut f: F) -> Tree<V2, P2>
    where
        F: FnMut(&Handle<V, P>) -> Handle<V2, P2>,
    {
        Tree {
            nodes: self
                .nodes
                .iter()
                .map(|node| TreeNode {
                    handle: f(&node.handle),
                    parent: node.parent,
                    children: node.children.clone(),
                })
                .collect(),
        }
    }
}

/// Lazy sequence of trees produced by `to_forest`
///
/// A packed heap has a single root, so this yields at most one tree. The tree
/// is built when `next` is first called.
pub struct Forest<'a, H, V, P, F> {
    packed: Option<&'a [H]>,
    arity: usize,
    transform: F,
    _marker: PhantomData<fn() -> Tree<V, P>>,
}

impl<'a, H, V, P, F> Forest<'a, H, V, P, F> {
    pub(crate) fn new(packed: &'a [H], arity: usize, transform: F) -> Self {
        Self {
            packed: Some(packed),
            arity,
            transform,
            _marker: PhantomData,
        }
    }
}

impl<'a, H, V, P, F> Iterator for Forest<'a, H, V, P, F>
where
    F: FnMut(&H) -> Handle<V, P>,
{
    type Item = Tree<V, P>;

    fn next(&mut self) -> Option<Tree<V, P>> {
        let packed = self.packed.take()?;
        Tree::from_packed(packed, self.arity, &mut self.transform)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.packed {
            Some(packed) if !packed.is_empty() => (1, Some(1)),
            _ => (0, Some(0)),
        }
    }
}
