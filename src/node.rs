use crate::arena::Handle;

/// One level of a node's tower: where the level continues, and how many
/// base-level positions that hop covers. A link with no successor spans up to
/// one past the last element, so the spans along any level sum to `len + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Link {
    pub next: Option<Handle>,
    pub span: usize,
}

impl Link {
    /// Link of an empty level. Its span reaches from rank 0 to rank 1.
    pub const EMPTY: Link = Link {
        next: None,
        span: 1,
    };
}

/// A place a search can stand on: the ghost head or a real node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Position {
    Head,
    Node(Handle),
}

#[derive(Debug)]
pub(crate) struct Node<K, V> {
    key_: K,
    value_: V,
    // One entry per level this node takes part in, so the vector length is the
    // node's height. It is sized exactly when the node is built and never
    // grows afterwards.
    links_: Vec<Link>,
}

impl<K, V> Node<K, V> {
    pub fn new(key: K, value: V, links: Vec<Link>) -> Node<K, V> {
        debug_assert!(!links.is_empty());
        Node {
            key_: key,
            value_: value,
            links_: links,
        }
    }

    pub fn height(&self) -> usize {
        self.links_.len()
    }

    /// Returns the link at `level`, or `None` if the node is not that tall.
    #[inline(always)]
    pub fn link(&self, level: usize) -> Option<&Link> {
        self.links_.get(level)
    }

    #[inline(always)]
    pub fn link_mut(&mut self, level: usize) -> Option<&mut Link> {
        self.links_.get_mut(level)
    }

    /// Successor at `level`, if any.
    #[inline(always)]
    pub fn next(&self, level: usize) -> Option<Handle> {
        self.links_.get(level).and_then(|link| link.next)
    }

    #[inline(always)]
    pub fn key(&self) -> &K {
        &self.key_
    }

    #[inline(always)]
    pub fn value(&self) -> &V {
        &self.value_
    }

    #[inline(always)]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value_
    }

    pub fn key_value(&self) -> (&K, &V) {
        (&self.key_, &self.value_)
    }

    pub fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value_, value)
    }

    pub fn into_entry(self) -> (K, V) {
        (self.key_, self.value_)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tower(height: usize) -> Vec<Link> {
        vec![Link::EMPTY; height]
    }

    #[test]
    fn new() {
        let key = 3;
        let value = 12;
        let height = 5;
        let node = Node::new(key, value, tower(height));
        assert_eq!(*node.key(), key);
        assert_eq!(*node.value(), value);
        assert_eq!(node.height(), height);
    }

    #[test]
    fn next_out_of_bounds() {
        let mut node = Node::new(3, 12, tower(5));
        assert!(node.next(10).is_none());
        assert!(node.link(5).is_none());
        assert!(node.link_mut(10).is_none());
    }

    #[test]
    fn next_empty() {
        let height = 5;
        let node = Node::new(3, 42, tower(height));
        for level in 0..height {
            assert!(node.next(level).is_none());
            assert_eq!(node.link(level).map(|link| link.span), Some(1));
        }
    }

    #[test]
    fn link_singleton() {
        let target = Handle::from_index(7);
        let mut node = Node::new(4, 12312, tower(5));
        {
            let link = node.link_mut(0).unwrap();
            link.next = Some(target);
            link.span = 3;
        }

        for level in 0..node.height() {
            if level == 0 {
                assert_eq!(node.next(level), Some(target));
                assert_eq!(node.link(level).unwrap().span, 3);
            } else {
                assert!(node.next(level).is_none());
            }
        }
    }

    #[test]
    fn replace_and_take() {
        let mut node = Node::new("k", 1, tower(1));
        assert_eq!(node.replace_value(2), 1);
        *node.value_mut() += 1;
        assert_eq!(node.key_value(), (&"k", &3));
        assert_eq!(node.into_entry(), ("k", 3));
    }
}
