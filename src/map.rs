use std::borrow::Borrow;
use std::fmt;

use log::{debug, trace};

use crate::arena::{Arena, Handle};
use crate::compare::{Comparator, Discard, Disposer, Natural};
use crate::config::{Config, MAX_HEIGHT_LIMIT};
use crate::error::Error;
use crate::height_control::HeightControl;
use crate::iter::Iter;
use crate::node::{Link, Node, Position};
use crate::search::Path;

/// An ordered multimap backed by a skip list whose links carry spans, so
/// elements can be reached by key or by their 1-based rank in sorted order,
/// both in expected O(log n).
///
/// Equal keys are allowed. A new duplicate is placed in front of the ones
/// already present, so it is the one `get` finds and it has the lowest rank
/// among its equals.
pub struct SkipListMap<K, V, C = Natural, D = Discard>
where
    D: Disposer<K, V>,
{
    /// Every real node lives here. Links are handles into the arena.
    pub(crate) nodes_: Arena<Node<K, V>>,

    /// Tower of the ghost head node. It is as tall as `max_height_`, holds no
    /// entry and sits at rank 0. Searches for nodes all begin here.
    pub(crate) head_: Vec<Link>,

    /// Number of elements in the list.
    pub(crate) length_: usize,

    /// Number of levels in use, at least 1. The head has no successor on any
    /// level at or above this one.
    pub(crate) height_: usize,

    /// Maximum height the `controller_` can generate. Kept here so the hot
    /// paths don't have to go through the trait object.
    max_height_: usize,

    /// Used to generate the height for any given node when inserting data.
    controller_: Box<dyn HeightControl + Send + Sync>,

    pub(crate) comparator_: C,

    disposer_: D,
}

impl<K: Ord, V> SkipListMap<K, V> {
    /// Creates an empty list ordered by `K: Ord` with the default
    /// configuration.
    pub fn new() -> SkipListMap<K, V> {
        let config = Config::default();
        let controller = config.height_control();
        SkipListMap::assemble(controller, Natural, Discard)
    }

    pub fn with_config(config: Config) -> Result<SkipListMap<K, V>, Error> {
        SkipListMap::with_parts(config, Natural, Discard)
    }
}

impl<K: Ord, V> Default for SkipListMap<K, V> {
    fn default() -> Self {
        SkipListMap::new()
    }
}

impl<K, V, C: Comparator<K>> SkipListMap<K, V, C> {
    /// Creates an empty list ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> SkipListMap<K, V, C> {
        let controller = Config::default().height_control();
        SkipListMap::assemble(controller, comparator, Discard)
    }
}

impl<K, V, C, D> SkipListMap<K, V, C, D>
where
    C: Comparator<K>,
    D: Disposer<K, V>,
{
    /// Creates an empty list from every piece the caller may customise:
    /// configuration, key order, and what to do with entries the list drops.
    pub fn with_parts(config: Config, comparator: C, disposer: D) -> Result<Self, Error> {
        config.validate()?;
        debug!(
            "creating skip list with max height {}, upgrade probability {}, seed {:?}",
            config.max_height(),
            config.upgrade_probability(),
            config.seed()
        );
        Ok(SkipListMap::assemble(config.height_control(), comparator, disposer))
    }

    /// Like `with_parts`, but node heights come from `controller`.
    pub fn with_height_control(
        controller: Box<dyn HeightControl + Send + Sync>,
        comparator: C,
        disposer: D,
    ) -> Result<Self, Error> {
        let max_height = controller.max_height();
        if max_height == 0 || max_height > MAX_HEIGHT_LIMIT {
            return Err(Error::InvalidMaxHeight(max_height));
        }

        debug!("creating skip list with custom height control, max height {}", max_height);
        Ok(SkipListMap::assemble(controller, comparator, disposer))
    }

    fn assemble(controller: Box<dyn HeightControl + Send + Sync>, comparator: C, disposer: D) -> Self {
        let max_height = controller.max_height();

        SkipListMap {
            nodes_: Arena::new(),
            // This is the ghost node mentioned above.
            head_: vec![Link::EMPTY; max_height],
            length_: 0,
            height_: 1,
            max_height_: max_height,
            // The only direct call to controller_ should be done in the
            // `SkipListMap::try_insert` function.
            controller_: controller,
            comparator_: comparator,
            disposer_: disposer,
        }
    }

    /// Inserts `key` with `value`. Existing equal keys are kept; the new entry
    /// goes in front of them.
    ///
    /// # Panics
    ///
    /// Panics if memory for the node cannot be allocated. Use `try_insert` to
    /// handle that case.
    pub fn insert(&mut self, key: K, value: V) {
        if let Err(error) = self.try_insert(key, value) {
            panic!("`SkipListMap::insert()` - {}", error);
        }
    }

    /// Inserts `key` with `value`, reporting allocation failure instead of
    /// panicking. On error the list is unchanged and the entry is dropped.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), Error> {
        let mut path = self.find_path(&key);
        let height = self.controller_.get_height().max(1).min(self.max_height_);

        // Everything that can fail happens before the first link is touched.
        let mut links = Vec::new();
        links.try_reserve_exact(height)?;
        self.nodes_.try_reserve()?;

        if height > self.height_ {
            for level in self.height_..height {
                // Empty levels span the whole list from the head.
                path.record(level, Position::Head, 0);
                self.head_[level].span = self.length_ + 1;
            }

            trace!("active levels grow from {} to {}", self.height_, height);
            self.height_ = height;
        }

        // The hop leaving each predecessor gets split in two: one part ending
        // at the new node, one continuing from it to the old successor.
        let rank = path.rank(0);
        for level in 0..height {
            let skipped = rank - path.rank(level);
            let predecessor = self.link_mut(path.predecessor(level), level);
            links.push(Link {
                next: predecessor.next,
                span: predecessor.span - skipped,
            });
            predecessor.span = skipped + 1;
        }

        // Taller hops pass over the new node.
        for level in height..self.height_ {
            self.link_mut(path.predecessor(level), level).span += 1;
        }

        let handle = self.nodes_.alloc(Node::new(key, value, links));
        for level in 0..height {
            self.link_mut(path.predecessor(level), level).next = Some(handle);
        }

        self.length_ += 1;
        debug_assert_eq!(self.nodes_.get(handle).height(), height);
        debug_assert_eq!(self.nodes_.len(), self.length_);
        Ok(())
    }

    /// Unlinks `removal`, the base-level successor of `path.predecessor(0)`,
    /// from every level and hands its entry back.
    fn unlink(&mut self, path: &Path, removal: Handle) -> (K, V) {
        for level in 0..self.height_ {
            let removed = self.nodes_.get(removal).link(level).copied();
            let predecessor = self.link_mut(path.predecessor(level), level);

            match removed {
                Some(removed) if predecessor.next == Some(removal) => {
                    predecessor.span += removed.span - 1;
                    predecessor.next = removed.next;
                }
                // The hop passes over the removed node.
                _ => predecessor.span -= 1,
            }
        }

        self.length_ -= 1;
        self.nodes_.take(removal).into_entry()
    }

    /// Drops unused levels from the top, keeping at least one.
    fn shrink(&mut self) {
        let height = self.height_;

        while self.height_ > 1 && self.head_[self.height_ - 1].next.is_none() {
            self.height_ -= 1;
        }

        if height != self.height_ {
            trace!("active levels shrink from {} to {}", height, self.height_);
        }
    }

    /// Removes every entry whose key equals `key`, passing each one to the
    /// disposer. Returns how many were removed.
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        // Removing a match leaves the predecessors and their ranks valid, so
        // duplicates are drained without searching again.
        let path = self.find_path(key);
        let mut removed = 0;

        while let Some(removal) = self.find_equal(path.predecessor(0), key) {
            let (removed_key, removed_value) = self.unlink(&path, removal);
            // The list is consistent again before caller code runs, even if
            // the disposer panics.
            self.shrink();
            self.disposer_.dispose(removed_key, removed_value);
            removed += 1;
        }

        removed
    }

    /// Removes the entry at 1-based `rank` and returns it. The entry goes
    /// back to the caller, so the disposer is not involved.
    pub fn remove_at(&mut self, rank: usize) -> Option<(K, V)> {
        let (path, found) = self.find_rank_path(rank);
        if !found {
            return None;
        }

        let removal = self.successor(path.predecessor(0))?;
        let entry = self.unlink(&path, removal);
        self.shrink();
        Some(entry)
    }

    /// Returns a const reference to the value of the first entry with key
    /// `key`, if it exists.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let lower_bound = self.find_lower_bound(key);
        self.find_equal(lower_bound, key)
            .map(|handle| self.nodes_.get(handle).value())
    }

    /// Returns a mutable reference to the value of the first entry with key
    /// `key`, if it exists.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let lower_bound = self.find_lower_bound(key);
        let handle = self.find_equal(lower_bound, key)?;
        Some(self.nodes_.get_mut(handle).value_mut())
    }

    /// Returns true if `key` is in the list.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.get(key).is_some()
    }

    /// 1-based rank of the first entry with key `key`.
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let path = self.find_path(key);
        self.find_equal(path.predecessor(0), key)
            .map(|_| path.rank(0) + 1)
    }

    /// Entry at 1-based `rank` in ascending key order.
    pub fn entry_at(&self, rank: usize) -> Option<(&K, &V)> {
        self.find_rank(rank)
            .map(|handle| self.nodes_.get(handle).key_value())
    }

    pub fn key_at(&self, rank: usize) -> Option<&K> {
        self.entry_at(rank).map(|(key, _)| key)
    }

    pub fn value_at(&self, rank: usize) -> Option<&V> {
        self.entry_at(rank).map(|(_, value)| value)
    }

    pub fn value_at_mut(&mut self, rank: usize) -> Option<&mut V> {
        let handle = self.find_rank(rank)?;
        Some(self.nodes_.get_mut(handle).value_mut())
    }

    /// Replaces the value at 1-based `rank` and returns the old one. When the
    /// rank is out of range nothing changes and `value` is dropped.
    pub fn update_at(&mut self, rank: usize, value: V) -> Option<V> {
        let handle = self.find_rank(rank)?;
        Some(self.nodes_.get_mut(handle).replace_value(value))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.entry_at(self.length_)
    }
}

impl<K, V, C, D> SkipListMap<K, V, C, D>
where
    D: Disposer<K, V>,
{
    #[inline(always)]
    pub(crate) fn link(&self, at: Position, level: usize) -> Link {
        match at {
            Position::Head => self.head_[level],
            Position::Node(handle) => match self.nodes_.get(handle).link(level) {
                Some(link) => *link,
                None => panic!("`SkipListMap::link()` - node is shorter than level {}", level),
            },
        }
    }

    #[inline(always)]
    pub(crate) fn link_mut(&mut self, at: Position, level: usize) -> &mut Link {
        match at {
            Position::Head => &mut self.head_[level],
            Position::Node(handle) => match self.nodes_.get_mut(handle).link_mut(level) {
                Some(link) => link,
                None => panic!("`SkipListMap::link_mut()` - node is shorter than level {}", level),
            },
        }
    }

    #[inline(always)]
    pub(crate) fn successor(&self, at: Position) -> Option<Handle> {
        self.link(at, 0).next
    }

    /// Returns the number of elements stored in the structure.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length_
    }

    /// Returns `true` if there are no elements stored within the structure.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length_ == 0
    }

    /// Number of levels currently in use.
    pub fn height(&self) -> usize {
        self.height_
    }

    /// Returns the maximum reachable height of the list.
    pub fn max_height(&self) -> usize {
        self.max_height_
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.head_[0]
            .next
            .map(|handle| self.nodes_.get(handle).key_value())
    }

    /// Calls `visit` on every entry in ascending key order.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self.iter() {
            visit(key, value);
        }
    }

    /// Gives every entry to the disposer and releases all nodes, leaving the
    /// list empty but usable.
    pub fn clear(&mut self) {
        debug!("clearing skip list of {} elements", self.length_);
        self.dispose();
    }

    fn dispose(&mut self) {
        let mut current = self.head_[0].next;

        while let Some(handle) = current {
            let node = self.nodes_.take(handle);
            current = node.next(0);
            let (key, value) = node.into_entry();
            self.disposer_.dispose(key, value);
        }

        self.nodes_.clear();
        for link in self.head_.iter_mut() {
            *link = Link::EMPTY;
        }
        self.length_ = 0;
        self.height_ = 1;
    }

    pub fn iter(&self) -> Iter<K, V> {
        Iter::new(&self.nodes_, self.head_[0].next, self.length_)
    }
}

impl<K, V, C, D> Drop for SkipListMap<K, V, C, D>
where
    D: Disposer<K, V>,
{
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<'a, K, V, C, D> IntoIterator for &'a SkipListMap<K, V, C, D>
where
    D: Disposer<K, V>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C, D> fmt::Display for SkipListMap<K, V, C, D>
where
    K: fmt::Display,
    V: fmt::Display,
    D: Disposer<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut printed = self.len();

        write!(f, "[")?;

        for (key, value) in self.iter() {
            printed -= 1;

            if printed >= 1 {
                write!(f, "{}: {}, ", key, value)?;
            } else {
                write!(f, "{}: {}", key, value)?;
            }
        }

        write!(f, "]")
    }
}

impl<K, V, C, D> fmt::Debug for SkipListMap<K, V, C, D>
where
    K: fmt::Debug,
    V: fmt::Debug,
    D: Disposer<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
