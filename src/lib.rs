pub mod error;
pub mod search;
pub mod cursor;
pub mod leapfrog;

pub use error::{Error, Result};
pub use search::SearchStrategy;
pub use cursor::{Cursor, DynCursor, SliceCursor, BTreeCursor};
pub use leapfrog::{Leapfrog, JoinStats, intersect};
pub use leapfrog_macros::join;
