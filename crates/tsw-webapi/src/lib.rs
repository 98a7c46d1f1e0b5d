// ----- standard library imports
// ----- extra library imports
// ----- local modules
pub mod quotes;
pub mod swap;
pub mod tokens;
#[cfg(feature = "test-utils")]
pub mod test_utils;

// ----- end imports
