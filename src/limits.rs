/// Smallest number of rooms a single request may ask for.
pub const MIN_ROOMS_PER_REQUEST: usize = 1;

/// Largest number of rooms a single request may ask for.
pub const MAX_ROOMS_PER_REQUEST: usize = 5;

/// Upper bound on subsets the cross-floor fallback is allowed to evaluate.
///
/// The fallback only runs when no floor can satisfy the request on its own, so with
/// at most `MAX_ROOMS_PER_REQUEST - 1` free rooms per floor the candidate pool is
/// at most 40 rooms and C(40, 5) = 658_008 stays well below this.
pub const MAX_FALLBACK_SUBSETS: u64 = 5_000_000;

/// Max length of a console input line.
pub const MAX_COMMAND_LEN: usize = 256;
