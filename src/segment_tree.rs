use std::fmt;

use log::{debug, trace};

use crate::{Result, SegtreeError};

/// A node of the tree
///
/// It covers the inclusive range `[start, end]` of the source sequence and holds
/// the aggregate of every element in that range. A leaf has `start == end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub start: usize,
    pub end: usize,
    pub value: T,
}

impl<T> Node<T> {
    /// 数组中没有用到的位置，范围为空
    fn vacant(value: T) -> Self {
        Node {
            start: 1,
            end: 0,
            value,
        }
    }

    fn is_vacant(&self) -> bool {
        self.start > self.end
    }

    pub fn is_leaf(&self) -> bool {
        self.start == self.end
    }

    fn overlaps(&self, lo: usize, hi: usize) -> bool {
        lo <= hi && self.start <= hi && self.end >= lo
    }

    fn within(&self, lo: usize, hi: usize) -> bool {
        lo <= self.start && self.end <= hi
    }
}

/// A segment tree answering range-aggregate queries over a fixed sequence.
///
/// Nodes live in one flat array with the heap layout: the root sits at index 0,
/// and the children of `i` sit at `2i + 1` and `2i + 2`.
///
/// `combine` must be associative. It is always called with the lower-index
/// operand first, so it does not need to be commutative. `empty` is returned
/// for ranges that miss the tree entirely; it should be an identity of
/// `combine` if results are combined again by the caller.
///
/// Examples:
/// ```rust
/// # use segtree::SegmentTree;
/// let sum = |a: &i32, b: &i32| a + b;
/// let mut tree = SegmentTree::build(&[3, 5, 10, 20, 45, 60], sum, 0).unwrap();
/// assert_eq!(tree.query(2, 5), 135);
/// tree.update(4, 5, |x| x + 1);
/// assert_eq!(tree.query(2, 5), 137);
/// ```
pub struct SegmentTree<T, F>
where
    F: Fn(&T, &T) -> T,
{
    nodes: Vec<Node<T>>,
    len: usize,
    combine: F,
    empty: T,
}

fn left(si: usize) -> usize {
    2 * si + 1
}

fn right(si: usize) -> usize {
    2 * si + 2
}

/// Backing array length for `len` elements: one slot for a single element,
/// otherwise a full binary tree over the next power of two.
fn capacity_for(len: usize) -> usize {
    if len == 1 {
        1
    } else {
        2 * len.next_power_of_two() - 1
    }
}

impl<T, F> SegmentTree<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Build a tree over `values`.
    ///
    /// Returns `SegtreeError::EmptyInput` if `values` is empty.
    pub fn build(values: &[T], combine: F, empty: T) -> Result<Self> {
        if values.is_empty() {
            return Err(SegtreeError::EmptyInput);
        }
        let len = values.len();
        let capacity = capacity_for(len);
        debug!(
            "Creating segment tree for {} elements with {} slots",
            len, capacity
        );

        let nodes = (0..capacity).map(|_| Node::vacant(empty.clone())).collect();
        let mut tree = SegmentTree {
            nodes,
            len,
            combine,
            empty,
        };
        tree.construct(values, 0, len - 1, 0);
        Ok(tree)
    }

    // 后序遍历：先建左右子树，再合并
    fn construct(&mut self, values: &[T], start: usize, end: usize, si: usize) {
        if start == end {
            self.nodes[si] = Node {
                start,
                end,
                value: values[start].clone(),
            };
            return;
        }
        let mid = (start + end) / 2;
        self.construct(values, start, mid, left(si));
        self.construct(values, mid + 1, end, right(si));
        let value = (self.combine)(&self.nodes[left(si)].value, &self.nodes[right(si)].value);
        self.nodes[si] = Node { start, end, value };
    }

    /// Aggregate of every element whose index lies in `[lo, hi]`.
    ///
    /// An inverted range, or one that misses `[0, len - 1]`, yields the empty value.
    pub fn query(&self, lo: usize, hi: usize) -> T {
        debug!("Query range {} to {}", lo, hi);
        self.query_at(0, lo, hi)
    }

    fn query_at(&self, si: usize, lo: usize, hi: usize) -> T {
        let node = &self.nodes[si];
        if !node.overlaps(lo, hi) {
            trace!("[{}, {}] is ignored", node.start, node.end);
            return self.empty.clone();
        }
        if node.within(lo, hi) {
            trace!("[{}, {}] is selected", node.start, node.end);
            return node.value.clone();
        }
        trace!("[{}, {}] is being looked into", node.start, node.end);
        let lv = self.query_at(left(si), lo, hi);
        let rv = self.query_at(right(si), lo, hi);
        (self.combine)(&lv, &rv)
    }

    /// Replace every element `x` in `[lo, hi]` with `apply(x)` and recompute the
    /// aggregates above them. Returns the root aggregate afterwards.
    ///
    /// Each leaf in range is visited, so a full-range update costs `O(n)`.
    pub fn update<A>(&mut self, lo: usize, hi: usize, mut apply: A) -> T
    where
        A: FnMut(&T) -> T,
    {
        debug!("Update range {} to {}", lo, hi);
        self.update_at(0, lo, hi, &mut apply);
        self.nodes[0].value.clone()
    }

    fn update_at<A>(&mut self, si: usize, lo: usize, hi: usize, apply: &mut A)
    where
        A: FnMut(&T) -> T,
    {
        let node = &self.nodes[si];
        if !node.overlaps(lo, hi) {
            trace!("[{}, {}] is ignored", node.start, node.end);
            return;
        }
        if node.is_leaf() {
            trace!("[{}, {}] is being updated", node.start, node.end);
            let value = apply(&node.value);
            self.nodes[si].value = value;
            return;
        }
        trace!("[{}, {}] is being looked into", node.start, node.end);
        self.update_at(left(si), lo, hi, apply);
        self.update_at(right(si), lo, hi, apply);
        let value = (self.combine)(&self.nodes[left(si)].value, &self.nodes[right(si)].value);
        self.nodes[si].value = value;
    }

    /// Current element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let mut si = 0;
        loop {
            let node = &self.nodes[si];
            if node.is_leaf() {
                return Some(&node.value);
            }
            let mid = (node.start + node.end) / 2;
            si = if index <= mid { left(si) } else { right(si) };
        }
    }
}

impl<T, F> SegmentTree<T, F>
where
    F: Fn(&T, &T) -> T,
{
    /// Number of source elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// A tree is never empty; `build` rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of edges from the root to the deepest leaf
    pub fn height(&self) -> usize {
        self.len.next_power_of_two().trailing_zeros() as usize
    }

    /// Length of the backing array, unused slots included
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn empty_value(&self) -> &T {
        &self.empty
    }

    /// The node stored at backing index `si`, if that slot was constructed.
    pub fn node(&self, si: usize) -> Option<&Node<T>> {
        self.nodes.get(si).filter(|node| !node.is_vacant())
    }

    /// Every constructed node with its backing index, in array order.
    pub fn nodes(&self) -> impl Iterator<Item = (usize, &Node<T>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.is_vacant())
    }
}

impl<T, F> fmt::Debug for SegmentTree<T, F>
where
    T: fmt::Debug,
    F: Fn(&T, &T) -> T,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("len", &self.len)
            .field("empty", &self.empty)
            .field("nodes", &self.nodes().collect::<Vec<_>>())
            .finish()
    }
}
