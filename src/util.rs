/// Numeric conversion helpers.
///
/// Numbers in the language are `f64`. These helpers convert them to list
/// positions without silently truncating fractional or out-of-range values.
pub mod num;
