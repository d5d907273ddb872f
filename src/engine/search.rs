use std::collections::BTreeMap;

use tracing::debug;

use crate::limits::*;
use crate::model::*;

use super::cost::path_cost;
use super::EngineError;

// ── Assignment search ─────────────────────────────────────────────

/// Find the cheapest set of `requested` available rooms.
///
/// Same-floor phase: for every floor with enough free rooms, slide a window of
/// `requested` over the floor's free rooms (by position) and keep the cheapest.
/// If any floor qualifies, that result is final; it is never weighed against a
/// cross-floor candidate.
///
/// Cross-floor phase: otherwise, evaluate every `requested`-subset of all free
/// rooms in ascending room-number order.
///
/// Candidates are costed in generation order and the first minimum wins ties.
pub fn find_optimal_assignment(
    inventory: &Inventory,
    requested: usize,
) -> Result<Assignment, EngineError> {
    validate_request(requested)?;

    let available = inventory.available_rooms();
    if available.len() < requested {
        return Err(EngineError::NotEnoughRooms {
            requested,
            available: available.len(),
        });
    }

    if let Some(assignment) = best_same_floor(&available, requested) {
        return Ok(assignment);
    }
    let mut evaluated = 0;
    let result = best_cross_floor(&available, requested, &mut evaluated);
    metrics::counter!(crate::observability::FALLBACK_SUBSETS_TOTAL).increment(evaluated);
    result
}

pub(crate) fn validate_request(requested: usize) -> Result<(), EngineError> {
    if requested < MIN_ROOMS_PER_REQUEST {
        return Err(EngineError::InvalidRequest("room count must be at least 1"));
    }
    if requested > MAX_ROOMS_PER_REQUEST {
        return Err(EngineError::InvalidRequest("room count must be at most 5"));
    }
    Ok(())
}

fn best_same_floor(available: &[&Room], requested: usize) -> Option<Assignment> {
    let mut by_floor: BTreeMap<Floor, Vec<&Room>> = BTreeMap::new();
    for &room in available {
        by_floor.entry(room.floor).or_default().push(room);
    }

    for floor_rooms in by_floor.values_mut() {
        floor_rooms.sort_by_key(|r| r.position);
    }

    let mut best: Option<(Cost, &[&Room])> = None;
    for floor_rooms in by_floor.values() {
        if floor_rooms.len() < requested {
            continue;
        }
        for window in floor_rooms.windows(requested) {
            let cost = path_cost(window.iter().copied());
            if best.is_none_or(|(best_cost, _)| cost < best_cost) {
                best = Some((cost, window));
            }
        }
    }

    best.map(|(travel_time, window)| Assignment {
        rooms: window.iter().map(|r| r.number).collect(),
        travel_time,
        phase: SearchPhase::SameFloor,
    })
}

/// `evaluated` counts the subsets actually costed.
fn best_cross_floor(
    available: &[&Room],
    requested: usize,
    evaluated: &mut u64,
) -> Result<Assignment, EngineError> {
    let subsets = binomial(available.len() as u64, requested as u64);
    if subsets > MAX_FALLBACK_SUBSETS {
        return Err(EngineError::LimitExceeded("too many cross-floor candidates"));
    }
    debug!(
        candidates = available.len(),
        requested, subsets, "no single floor fits, searching across floors"
    );

    let mut best: Option<(Cost, Vec<usize>)> = None;
    let mut combos = Combinations::new(available.len(), requested);
    while let Some(indices) = combos.next_indices() {
        *evaluated += 1;
        let cost = path_cost(indices.iter().map(|&i| available[i]));
        if best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
            best = Some((cost, indices.to_vec()));
        }
    }

    // `available.len() >= requested >= 1`, so at least one subset exists.
    let (travel_time, indices) = best.ok_or(EngineError::NotEnoughRooms {
        requested,
        available: available.len(),
    })?;
    Ok(Assignment {
        rooms: indices.iter().map(|&i| available[i].number).collect(),
        travel_time,
        phase: SearchPhase::CrossFloor,
    })
}

/// C(n, k), saturating.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        // Exact at every step: result * (n - i) is divisible by (i + 1).
        result = match result.checked_mul(n - i) {
            Some(v) => v / (i + 1),
            None => return u64::MAX,
        };
    }
    result
}

/// Lexicographic k-subsets of `0..n`, same order as head/tail recursion:
/// `[0,1,2], [0,1,3], ..., [0,n-2,n-1], [1,2,3], ...`.
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }

    /// Advance to the next subset; the returned slice is only valid until the next call.
    pub fn next_indices(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }

        let k = self.indices.len();
        // Rightmost slot that can still move right.
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) else {
            self.done = true;
            return None;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(&self.indices)
    }
}
