// Functions for searching in sorted slices.
//
// Every search takes a predicate that is true on some prefix of the slice and
// false afterwards, and returns the length of that prefix (same contract as
// slice::partition_point).

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum SearchStrategy {
    // Exponential probing from the front, then binary search. O(log k) where k
    // is the distance moved, which is what we want for cursors that mostly
    // take short hops.
    #[default]
    Gallop,
    // Plain binary search over the whole remaining slice. O(log n).
    Binary,
}

impl SearchStrategy {
    #[inline]
    pub fn search<X, F: FnMut(&X) -> bool>(self, elems: &[X], test: F) -> usize {
        match self {
            SearchStrategy::Gallop => gallop(elems, test),
            SearchStrategy::Binary => elems.partition_point(test),
        }
    }
}

// Based on DataFrog's gallop(),
// https://github.com/rust-lang/datafrog/blob/07bf407c740db506a56bcb4af3eb474eb83ca815/src/join.rs#L137
pub fn gallop<X, F: FnMut(&X) -> bool>(elems: &[X], mut test: F) -> usize {
    let n = elems.len();
    if n == 0 || !test(&elems[0]) { return 0 }
    // invariant: test(&elems[lo])
    let mut lo = 0;
    let mut step = 1;
    while step < n - lo && test(&elems[lo + step]) {
        lo += step;
        step <<= 1;
    }
    // Now the answer is in (lo, lo + step], clamped to n.
    let hi = (lo + step).min(n);
    return lo + 1 + elems[lo + 1 .. hi].partition_point(test);
}
