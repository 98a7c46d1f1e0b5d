// ----- standard library imports
// ----- extra library imports
// ----- local modules
pub mod amounts;
// ----- local imports

// ----- end imports
pub use crate::amounts::{format_amount, from_smallest_units, parse_amount, to_smallest_units};
