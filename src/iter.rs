use std::iter::FusedIterator;

use crate::arena::{Arena, Handle};
use crate::node::Node;

/// Walks the base level from the first element to the last. Create a new one
/// with `SkipListMap::iter` to start over.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    nodes_: &'a Arena<Node<K, V>>,
    current_: Option<Handle>,
    remaining_: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(nodes: &'a Arena<Node<K, V>>, first: Option<Handle>, length: usize) -> Iter<'a, K, V> {
        Iter {
            nodes_: nodes,
            current_: first,
            remaining_: length,
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes_: self.nodes_,
            current_: self.current_,
            remaining_: self.remaining_,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.current_?;
        let node = self.nodes_.get(handle);
        self.current_ = node.next(0);
        self.remaining_ -= 1;
        Some(node.key_value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining_, Some(self.remaining_))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}
