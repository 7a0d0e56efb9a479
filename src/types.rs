/// Position of a record in the log. Unique per entry.
pub type Offset = i64;

/// Opaque payload stored under an offset.
pub type Entry = Vec<u8>;

/// Upper bound on the number of levels a skip log can grow to.
///
/// With a fair coin the expected height for `n` entries is `log2(n)`,
/// so 25 levels stay efficient up to ~33M entries.
pub const MAX_LEVEL: usize = 25;
