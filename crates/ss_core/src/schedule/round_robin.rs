//! Round-robin pairing via the circle method.
//!
//! Competitors sit in two rows; each week pairs the rows column by column,
//! then everyone except `top[0]` moves one seat around the circle. An odd
//! field gets a bye seat at the end of the top row so the rows stay equal.

use super::{Pairing, Schedule, Slot};
use crate::error::{LeagueError, Result};

/// Rotates `items` right by `n` positions (negative `n` rotates left).
///
/// `rotate(&[1, 2, 3], 1)` yields `[3, 1, 2]`.
pub fn rotate<T: Clone>(items: &[T], n: isize) -> Vec<T> {
    let mut rotated = items.to_vec();
    if !rotated.is_empty() {
        let shift = n.rem_euclid(rotated.len() as isize) as usize;
        rotated.rotate_right(shift);
    }
    rotated
}

pub fn generate_round_robin(competitor_count: usize) -> Result<Schedule> {
    if competitor_count < 2 {
        return Err(LeagueError::invalid(format!(
            "a round robin needs at least 2 competitors, got {}",
            competitor_count
        )));
    }

    let half = competitor_count / 2;
    let mut top: Vec<Slot> = (0..half).map(Slot::Team).collect();
    let mut bottom: Vec<Slot> = (half..competitor_count).map(Slot::Team).collect();
    if competitor_count % 2 == 1 {
        top.push(Slot::Bye);
    }

    let total_weeks = top.len() + bottom.len() - 1;
    let mut weeks = Vec::with_capacity(total_weeks);

    for week in 1..=total_weeks {
        let pairings: Vec<Pairing> =
            top.iter().zip(&bottom).map(|(home, away)| Pairing::new(*home, *away)).collect();
        weeks.push(pairings);

        if week < total_weeks {
            advance_rows(&mut top, &mut bottom);
        }
    }

    tracing::debug!(competitor_count, total_weeks, "generated round robin schedule");
    Ok(Schedule::from_vec(weeks))
}

// top[0] stays put; the rest of the top row turns right, the bottom row
// turns left, and the seats at the hinge trade places.
fn advance_rows(top: &mut [Slot], bottom: &mut [Slot]) {
    debug_assert!(top.len() >= 2 && top.len() == bottom.len());

    top[1..].rotate_right(1);
    bottom.rotate_left(1);

    let last = bottom.len() - 1;
    std::mem::swap(&mut top[1], &mut bottom[last]);
}
