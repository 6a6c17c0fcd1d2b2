//! Caller supplied capabilities: how keys are ordered and what happens to an
//! entry once the list lets go of it.

use std::cmp::Ordering;

/// A total order over keys. It must stay the same for as long as the list
/// lives; changing it behind the list's back corrupts the structure.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;
}

/// Orders keys by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline(always)]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline(always)]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self(lhs, rhs)
    }
}

/// Receives every entry removed by key, cleared, or still present when the
/// list is dropped. Called exactly once per entry.
pub trait Disposer<K, V> {
    fn dispose(&mut self, key: K, value: V);
}

/// Simply drops the entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Discard;

impl<K, V> Disposer<K, V> for Discard {
    #[inline(always)]
    fn dispose(&mut self, _key: K, _value: V) {}
}

impl<K, V, F> Disposer<K, V> for F
where
    F: FnMut(K, V),
{
    #[inline(always)]
    fn dispose(&mut self, key: K, value: V) {
        self(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
        assert_eq!(Natural.compare(&7u8, &7u8), Ordering::Equal);
    }

    #[test]
    fn closure_order() {
        let reversed = |lhs: &i32, rhs: &i32| rhs.cmp(lhs);
        assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
        assert_eq!(reversed.compare(&2, &2), Ordering::Equal);
    }

    #[test]
    fn closure_disposer() {
        let mut seen = Vec::new();
        {
            let mut disposer = |key: u32, value: &'static str| seen.push((key, value));
            disposer.dispose(4, "four");
            disposer.dispose(2, "two");
        }
        assert_eq!(seen, vec![(4, "four"), (2, "two")]);
    }
}
