use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::arena::Handle;
use crate::compare::{Comparator, Disposer};
use crate::config::MAX_HEIGHT_LIMIT;
use crate::map::SkipListMap;
use crate::node::Position;

/// Result of descending the list towards a target: for every level, the last
/// position strictly before the target and that position's rank (the head has
/// rank 0). Levels that were not visited keep the head at rank 0.
///
/// Each search returns its own `Path`, so concurrent readers never share any
/// scratch state.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Path {
    predecessors_: [Position; MAX_HEIGHT_LIMIT],
    ranks_: [usize; MAX_HEIGHT_LIMIT],
}

impl Path {
    pub(crate) fn new() -> Path {
        Path {
            predecessors_: [Position::Head; MAX_HEIGHT_LIMIT],
            ranks_: [0; MAX_HEIGHT_LIMIT],
        }
    }

    #[inline(always)]
    pub(crate) fn predecessor(&self, level: usize) -> Position {
        self.predecessors_[level]
    }

    #[inline(always)]
    pub(crate) fn rank(&self, level: usize) -> usize {
        self.ranks_[level]
    }

    #[inline(always)]
    pub(crate) fn record(&mut self, level: usize, predecessor: Position, rank: usize) {
        self.predecessors_[level] = predecessor;
        self.ranks_[level] = rank;
    }
}

impl<K, V, C, D> SkipListMap<K, V, C, D>
where
    C: Comparator<K>,
    D: Disposer<K, V>,
{
    #[inline(always)]
    fn is_before<Q>(&self, handle: Handle, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.comparator_.compare(self.nodes_.get(handle).key().borrow(), key) == Ordering::Less
    }

    /// Returns the node holding the first key equal to `key`, if any.
    pub(crate) fn find_equal<Q>(&self, predecessor: Position, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.successor(predecessor).filter(|&handle| {
            self.comparator_.compare(self.nodes_.get(handle).key().borrow(), key) == Ordering::Equal
        })
    }

    /// Finds the last position whose key is strictly less than `key`. Its
    /// base-level successor is the first element not less than `key`.
    pub(crate) fn find_lower_bound<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut current = Position::Head;

        for level in (0..self.height_).rev() {
            while let Some(next) = self.link(current, level).next {
                if self.is_before(next, key) {
                    current = Position::Node(next);
                } else {
                    break;
                }
            }
        }

        current
    }

    /// Same descent as `find_lower_bound`, but keeps the predecessor and its
    /// rank at every level, which is what insertion and removal need to
    /// splice links and repair spans.
    pub(crate) fn find_path<Q>(&self, key: &Q) -> Path
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut path = Path::new();
        let mut current = Position::Head;
        let mut rank = 0;

        for level in (0..self.height_).rev() {
            loop {
                let link = self.link(current, level);
                match link.next {
                    Some(next) if self.is_before(next, key) => {
                        rank += link.span;
                        current = Position::Node(next);
                    }
                    _ => break,
                }
            }

            path.record(level, current, rank);
        }

        path
    }

    /// Descends using spans instead of keys. On return the base-level
    /// successor of `path.predecessor(0)` sits at `rank`, when the returned
    /// flag is true. Ranks are 1-based; 0 and anything past `len()` are
    /// reported as missing.
    pub(crate) fn find_rank_path(&self, rank: usize) -> (Path, bool) {
        let mut path = Path::new();
        let mut current = Position::Head;
        let mut place = 0;

        for level in (0..self.height_).rev() {
            loop {
                let link = self.link(current, level);
                match link.next {
                    Some(next) if place + link.span < rank => {
                        place += link.span;
                        current = Position::Node(next);
                    }
                    _ => break,
                }
            }

            path.record(level, current, place);
        }

        // Exactly one step must remain. Walking off the end also leaves one
        // step for `len() + 1`, hence the extra successor check.
        let found = rank.checked_sub(place) == Some(1) && self.successor(current).is_some();
        (path, found)
    }

    /// Node at 1-based `rank`, if it exists.
    pub(crate) fn find_rank(&self, rank: usize) -> Option<Handle> {
        match self.find_rank_path(rank) {
            (path, true) => self.successor(path.predecessor(0)),
            _ => None,
        }
    }
}
