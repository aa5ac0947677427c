use log::{debug, error, trace};

use crate::cursor::{Cursor, SliceCursor};
use crate::error::{Error, Result};
use crate::search::SearchStrategy;

// ---------- LEAPFROG INTERSECTION ----------
/// Work counters for one join. Only cursor moves are counted: a seek to the
/// current key is not a seek, and finding the same match again is not a match.
/// Total seeks + advances stay within the sum of the input lengths; that's the
/// worst-case optimality bound.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct JoinStats {
    pub seeks: u64,
    pub advances: u64,
    pub matches: u64,
}

/// Lazily intersects K >= 1 sorted sequences.
///
/// All cursors are ordered once by their first key; after that `pos` just
/// rotates around `order`. Between calls, the cursor at `order[pos - 1]` holds
/// the largest key of the current pass, and when the join is not at its end
/// every cursor agrees on `key()`.
#[derive(Debug)]
pub struct Leapfrog<C> {
    cursors: Box<[C]>,
    order: Box<[usize]>,
    pos: Option<usize>,         // None means we are done
    stats: JoinStats,
}

impl<C: Cursor> Leapfrog<C> {
    pub fn new(cursors: Vec<C>) -> Result<Self> {
        if cursors.is_empty() { return Err(Error::InvalidArity) }
        let n = cursors.len();
        let mut lf = Leapfrog {
            cursors: cursors.into_boxed_slice(),
            order: (0..n).collect(),
            pos: None,
            stats: JoinStats::default(),
        };
        lf.init()?;
        Ok(lf)
    }

    fn init(&mut self) -> Result<()> {
        // If any cursor is already done, so are we.
        if let Some(i) = self.cursors.iter().position(|c| c.at_end()) {
            debug!("leapfrog over {} cursors: input {i} is empty", self.arity());
            return Ok(());
        }
        debug!("leapfrog over {} cursors", self.arity());
        let keys = self.cursors.iter().map(|c| c.key()).collect::<Result<Vec<_>>>()?;
        self.order.sort_unstable_by_key(|&i| keys[i]);
        self.pos = Some(0);
        self.search()
    }

    fn search(&mut self) -> Result<()> {
        let mut pos = self.pos.ok_or(Error::OutOfBounds)?;
        let n = self.order.len();
        let mut hi = self.cursors[self.order[(pos + n - 1) % n]].key()?;
        loop {
            // Keep pos current, so a failing cursor leaves us mid-pass rather
            // than pointing at a stale match.
            self.pos = Some(pos);
            let cursor = &mut self.cursors[self.order[pos]];
            if cursor.key()? == hi {   // all cursors at same key
                self.stats.matches += 1;
                trace!("leapfrog match after {} seeks", self.stats.seeks);
                return Ok(());
            }
            cursor.seek(hi)?;
            self.stats.seeks += 1;
            if cursor.at_end() {
                self.finish();
                return Ok(());
            }
            hi = cursor.key()?;
            pos = (pos + 1) % n;
        }
    }

    // Rotate past the cursor we just moved and look for the next match.
    fn step(&mut self, pos: usize) -> Result<()> {
        if self.cursors[self.order[pos]].at_end() {
            self.finish();
            return Ok(());
        }
        self.pos = Some((pos + 1) % self.order.len());
        self.search()
    }

    fn finish(&mut self) {
        trace!("leapfrog exhausted after {} matches", self.stats.matches);
        self.pos = None;
    }

    pub fn at_end(&self) -> bool { self.pos.is_none() }

    pub fn key(&self) -> Result<C::Key> {
        let pos = self.pos.ok_or(Error::OutOfBounds)?;
        self.cursors[self.order[pos]].key()
    }

    /// Moves to the next key present in every input.
    pub fn advance(&mut self) -> Result<()> {
        let pos = self.pos.ok_or(Error::OutOfBounds)?;
        // Every cursor is at the same key, so moving any one of them breaks
        // the tie; search() drags the rest forward.
        self.cursors[self.order[pos]].advance()?;
        self.stats.advances += 1;
        self.step(pos)
    }

    /// Moves to the first common key `>= target`. Fails with `NonMonotonicSeek`
    /// if `target` is below the current key.
    pub fn seek(&mut self, target: C::Key) -> Result<()> {
        let pos = self.pos.ok_or(Error::OutOfBounds)?;
        let cursor = &mut self.cursors[self.order[pos]];
        if cursor.key()? == target { return Ok(()) }
        cursor.seek(target)?;
        self.stats.seeks += 1;
        self.step(pos)
    }

    pub fn arity(&self) -> usize { self.cursors.len() }

    pub fn stats(&self) -> JoinStats { self.stats }

    pub fn into_cursors(self) -> Vec<C> { self.cursors.into_vec() }
}

impl<'a, T: Ord + Copy> Leapfrog<SliceCursor<'a, T>> {
    pub fn from_slices<I>(slices: I) -> Result<Self>
    where I: IntoIterator<Item = &'a [T]>
    { Self::from_slices_with(slices, SearchStrategy::default()) }

    pub fn from_slices_with<I>(slices: I, strategy: SearchStrategy) -> Result<Self>
    where I: IntoIterator<Item = &'a [T]>
    {
        Self::new(slices.into_iter().map(|s| SliceCursor::with_strategy(s, strategy)).collect())
    }
}

// A join is itself a cursor, so joins nest.
impl<C: Cursor> Cursor for Leapfrog<C> {
    type Key = C::Key;
    fn at_end(&self) -> bool { Leapfrog::at_end(self) }
    fn key(&self) -> Result<C::Key> { Leapfrog::key(self) }
    fn advance(&mut self) -> Result<()> { Leapfrog::advance(self) }
    fn seek(&mut self, target: C::Key) -> Result<()> { Leapfrog::seek(self, target) }
}

impl<C: Cursor> Iterator for Leapfrog<C> {
    type Item = C::Key;
    // Assumes every cursor keeps its contract; use key()/advance() directly to
    // see errors from cursors that might not.
    fn next(&mut self) -> Option<C::Key> {
        if self.at_end() { return None }
        match Leapfrog::key(self).and_then(|k| Leapfrog::advance(self).map(|()| k)) {
            Ok(k) => Some(k),
            Err(err) => {
                error!("leapfrog iteration stopped: cursor broke its contract: {err}");
                debug_assert!(false, "cursor broke its contract: {err}");
                None
            }
        }
    }
}

/// Collects the intersection of some sorted slices.
pub fn intersect<'a, T, I>(slices: I) -> Result<Vec<T>>
where T: Ord + Copy + 'a, I: IntoIterator<Item = &'a [T]>
{
    let mut join = Leapfrog::from_slices(slices)?;
    let mut out = Vec::new();
    while !join.at_end() {
        out.push(join.key()?);
        join.advance()?;
    }
    Ok(out)
}
