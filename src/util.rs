use crate::router::INFINITY;
use std::cmp::min;

/// Adds two route costs, saturating at [`INFINITY`]
///
/// # Arguments
///
/// * `cost_a`: First one
/// * `cost_b`: Second one
///
/// returns: u16
///
/// # Examples
///
/// ```
/// assert_eq!(dvroute::util::sum_inf(3, 5), 8);
/// assert_eq!(dvroute::util::sum_inf(15, 4), dvroute::router::INFINITY);
///
/// assert_eq!(dvroute::util::sum_inf(dvroute::router::INFINITY, 0), dvroute::router::INFINITY);
/// ```
pub fn sum_inf(cost_a: u16, cost_b: u16) -> u16 {
    min(INFINITY as u32, cost_a as u32 + cost_b as u32) as u16
}

/// Clamps a cost received off the wire into the valid 0..=INFINITY range
pub fn clamp_cost(cost: u16) -> u16 {
    min(cost, INFINITY)
}

/// Whether a total cost still denotes a usable route
pub fn is_reachable(cost: u16) -> bool {
    cost < INFINITY
}
