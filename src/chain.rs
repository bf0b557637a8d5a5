//! Chronological ordering of hops

use chrono::TimeDelta;

use crate::hop::Hop;

/// Sort hops by time and fill in the delay between neighbours.
///
/// The sort is stable: hops with equal timestamps stay in the order they
/// were extracted, so the result is reproducible for a given input.
#[must_use]
pub fn order_hops(mut hops: Vec<Hop>) -> Vec<Hop> {
    hops.sort_by_key(|hop| hop.time);

    let mut previous = None;
    for hop in &mut hops {
        hop.delay = previous.map_or(TimeDelta::zero(), |time| hop.time - time);
        previous = Some(hop.time);
    }

    hops
}

/// Time between the earliest and latest hop
#[must_use]
pub fn total_transit(hops: &[Hop]) -> TimeDelta {
    match (hops.first(), hops.last()) {
        (Some(first), Some(last)) => last.time - first.time,
        _ => TimeDelta::zero(),
    }
}
