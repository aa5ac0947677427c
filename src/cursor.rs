use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Included, Unbounded};

use crate::error::{Error, Result};
use crate::search::SearchStrategy;

// ---------- SEEKABLE CURSORS ----------
/// A forward-only, seekable position in one ascending sequence of keys.
///
/// Positions never move backwards. `key` and `at_end` must be O(1); `seek`
/// should be sub-linear in the distance it moves.
pub trait Cursor {
    // Keys get copied around a lot during a join, so we insist on Copy. For
    // sequences of non-Copy values, sort a slice of references instead.
    type Key: Ord + Copy;

    fn at_end(&self) -> bool;

    /// Fails with `OutOfBounds` if `at_end()`.
    fn key(&self) -> Result<Self::Key>;

    /// Moves past the current key to the next strictly greater one. Fails with
    /// `OutOfBounds` if `at_end()`.
    fn advance(&mut self) -> Result<()>;

    /// Moves forward to the first key `>= target`, or to the end. Seeking to the
    /// current key is a no-op; seeking below it fails with `NonMonotonicSeek`
    /// and leaves the cursor where it was.
    fn seek(&mut self, target: Self::Key) -> Result<()>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Key = C::Key;
    fn at_end(&self) -> bool { (**self).at_end() }
    fn key(&self) -> Result<C::Key> { (**self).key() }
    fn advance(&mut self) -> Result<()> { (**self).advance() }
    fn seek(&mut self, target: C::Key) -> Result<()> { (**self).seek(target) }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Key = C::Key;
    fn at_end(&self) -> bool { (**self).at_end() }
    fn key(&self) -> Result<C::Key> { (**self).key() }
    fn advance(&mut self) -> Result<()> { (**self).advance() }
    fn seek(&mut self, target: C::Key) -> Result<()> { (**self).seek(target) }
}

/// Lets a join mix cursors over different backing structures.
pub type DynCursor<'a, K> = Box<dyn Cursor<Key = K> + 'a>;

// Shared precondition check for seek(): returns the current key.
fn check_seek<K: Ord + Copy>(current: Option<K>, target: K) -> Result<K> {
    let key = current.ok_or(Error::OutOfBounds)?;
    if target < key { return Err(Error::NonMonotonicSeek) }
    Ok(key)
}


// ---------- CURSOR OVER A SORTED SLICE ----------
// Duplicates are allowed in the slice; advance() skips the whole run.
#[derive(Clone, Debug)]
pub struct SliceCursor<'a, T> {
    // invariant: elems is sorted
    elems: &'a [T],
    posn: usize,
    strategy: SearchStrategy,
}

impl<'a, T: Ord + Copy> SliceCursor<'a, T> {
    pub fn new(elems: &'a [T]) -> Self {
        Self::with_strategy(elems, SearchStrategy::default())
    }

    pub fn with_strategy(elems: &'a [T], strategy: SearchStrategy) -> Self {
        debug_assert!(elems.is_sorted());
        SliceCursor { elems, posn: 0, strategy }
    }

    pub fn position(&self) -> usize { self.posn }

    fn current(&self) -> Option<T> { self.elems.get(self.posn).copied() }
}

impl<'a, T: Ord + Copy> Cursor for SliceCursor<'a, T> {
    type Key = T;

    fn at_end(&self) -> bool { self.posn >= self.elems.len() }

    fn key(&self) -> Result<T> { self.current().ok_or(Error::OutOfBounds) }

    fn advance(&mut self) -> Result<()> {
        let key = self.key()?;
        self.posn += 1;
        self.posn += self.strategy.search(&self.elems[self.posn..], |x| *x <= key);
        Ok(())
    }

    fn seek(&mut self, target: T) -> Result<()> {
        check_seek(self.current(), target)?;
        self.posn += self.strategy.search(&self.elems[self.posn..], |x| *x < target);
        debug_assert!(self.posn == self.elems.len() || target <= self.elems[self.posn]);
        Ok(())
    }
}


// ---------- CURSOR OVER A BTREESET ----------
#[derive(Clone, Debug)]
pub struct BTreeCursor<'a, T> {
    set: &'a BTreeSet<T>,
    current: Option<T>,         // None means we are done
}

impl<'a, T: Ord + Copy> BTreeCursor<'a, T> {
    pub fn new(set: &'a BTreeSet<T>) -> Self {
        BTreeCursor { set, current: set.first().copied() }
    }
}

impl<'a, T: Ord + Copy> Cursor for BTreeCursor<'a, T> {
    type Key = T;

    fn at_end(&self) -> bool { self.current.is_none() }

    fn key(&self) -> Result<T> { self.current.ok_or(Error::OutOfBounds) }

    fn advance(&mut self) -> Result<()> {
        let key = self.key()?;
        self.current = self.set.range((Excluded(&key), Unbounded)).next().copied();
        Ok(())
    }

    fn seek(&mut self, target: T) -> Result<()> {
        if check_seek(self.current, target)? == target { return Ok(()) }
        self.current = self.set.range((Included(&target), Unbounded)).next().copied();
        Ok(())
    }
}
