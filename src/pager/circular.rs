//! Circular movements of 0-based indexes.
//!
//! Every function reduces to the same formula, moving `start` by `offset` and
//! wrapping into `[0, upper_bound)`. Offsets may be negative in all of them.

use super::DomainError;

/// Move `start` by `offset` positions, wrapping around `upper_bound`.
pub fn circularly_move(
    offset: isize,
    start: usize,
    upper_bound: usize,
) -> Result<usize, DomainError> {
    move_by(offset as i128, start, upper_bound)
}

// i128 holds any usize plus or minus any isize without overflowing
fn move_by(offset: i128, start: usize, upper_bound: usize) -> Result<usize, DomainError> {
    if upper_bound == 0 {
        return Err(DomainError::ZeroUpperBound);
    }

    let moved = (start as i128 + offset).rem_euclid(upper_bound as i128);
    Ok(moved as usize)
}

pub fn move_forward_by_many(
    offset: isize,
    current: usize,
    upper_bound: usize,
) -> Result<usize, DomainError> {
    circularly_move(offset, current, upper_bound)
}

pub fn move_back_by_many(
    offset: isize,
    current: usize,
    upper_bound: usize,
) -> Result<usize, DomainError> {
    move_by(-(offset as i128), current, upper_bound)
}

pub fn move_forward_by_one(current: usize, upper_bound: usize) -> Result<usize, DomainError> {
    move_forward_by_many(1, current, upper_bound)
}

pub fn move_back_by_one(current: usize, upper_bound: usize) -> Result<usize, DomainError> {
    move_back_by_many(1, current, upper_bound)
}

/// Absolute positioning: `position` is kept when in range, wrapped otherwise.
pub fn set_position(position: isize, upper_bound: usize) -> Result<usize, DomainError> {
    circularly_move(position, 0, upper_bound)
}
