mod checked;
pub mod error;
pub mod iter;
mod slot;
pub mod table;
pub use error::{ProbeError, Result};
pub use iter::Iter;
pub use table::{DEFAULT_CAPACITY, GROWTH_FACTOR, ProbingTable};
