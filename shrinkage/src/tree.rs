//! Lazily expanded shrink trees for inspecting the whole candidate space.
//!
//! Each node holds a value and, once asked, the subtrees for every shrink
//! candidate of that value. Children are computed at most once per node.
//! The tree can be arbitrarily deep, so every traversal takes an explicit
//! node or depth limit.

use std::cell::OnceCell;
use std::collections::VecDeque;
use std::fmt::{self, Debug, Write};

use crate::shrinker::Shrinker;

/// A node in a lazily expanded shrink tree
pub struct ShrinkTree<'s, A, S: ?Sized> {
    value: A,
    source: &'s S,
    children: OnceCell<Vec<ShrinkTree<'s, A, S>>>,
}

impl<'s, A, S> ShrinkTree<'s, A, S>
where
    S: Shrinker<A> + ?Sized,
{
    /// Create an unexpanded tree rooted at `value`
    pub fn new(source: &'s S, value: A) -> Self {
        Self {
            value,
            source,
            children: OnceCell::new(),
        }
    }

    /// The value at this node
    pub fn value(&self) -> &A {
        &self.value
    }

    /// Consume the node and return its value
    pub fn into_value(self) -> A {
        self.value
    }

    /// Subtrees for each shrink candidate, expanded on first access
    pub fn children(&self) -> &[ShrinkTree<'s, A, S>] {
        self.children.get_or_init(|| {
            self.source
                .shrink(&self.value)
                .into_iter()
                .map(|candidate| ShrinkTree::new(self.source, candidate))
                .collect()
        })
    }

    /// Whether the children of this node have been computed
    pub fn is_expanded(&self) -> bool {
        self.children.get().is_some()
    }

    /// Whether this node's value is minimal
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Values in breadth-first order, visiting at most `max_nodes` nodes
    pub fn breadth_first(&self, max_nodes: usize) -> Vec<&A> {
        let mut values = Vec::new();
        let mut queue = VecDeque::from([self]);

        while let Some(node) = queue.pop_front() {
            if values.len() >= max_nodes {
                break;
            }
            values.push(node.value());
            if values.len() < max_nodes {
                queue.extend(node.children());
            }
        }

        values
    }

    /// Number of nodes at depth `0..=max_depth`
    pub fn count_nodes(&self, max_depth: usize) -> usize {
        if max_depth == 0 {
            return 1;
        }
        1 + self
            .children()
            .iter()
            .map(|child| child.count_nodes(max_depth - 1))
            .sum::<usize>()
    }

    /// Indented rendering down to `max_depth`, one node per line
    pub fn render(&self, max_depth: usize) -> String
    where
        A: Debug,
    {
        let mut out = String::new();
        self.render_into(&mut out, 0, max_depth);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize, max_depth: usize)
    where
        A: Debug,
    {
        // writing to a String cannot fail
        let _ = writeln!(out, "{}{:?}", "  ".repeat(depth), self.value);
        if depth < max_depth {
            for child in self.children() {
                child.render_into(out, depth + 1, max_depth);
            }
        }
    }
}

impl<A: Debug, S: ?Sized> Debug for ShrinkTree<'_, A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShrinkTree")
            .field("value", &self.value)
            .field("children", &self.children.get())
            .finish()
    }
}
