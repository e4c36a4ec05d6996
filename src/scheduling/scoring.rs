use std::collections::HashMap;

use rand::Rng;
use uuid::Uuid;

use crate::database::models::{ContractType, Position, Shift};
use crate::scheduling::snapshot::Candidate;

pub const FULL_TIME_WEIGHT: f64 = 50.0;
pub const PART_TIME_PAIR_WEIGHT: f64 = 25.0;
pub const PART_TIME_SINGLE_WEIGHT: f64 = 10.0;

pub const PRIORITY_POSITION_WEIGHT: f64 = 30.0;
pub const STANDARD_POSITION_WEIGHT: f64 = 15.0;

pub const PRIOR_HOURS_WEIGHT_CAP: f64 = 20.0;

pub const FIRST_CHOICE_WEIGHT: f64 = 15.0;
pub const SECOND_CHOICE_WEIGHT: f64 = 10.0;
pub const OTHER_CHOICE_WEIGHT: f64 = 5.0;

pub const LOAD_BALANCE_WEIGHT_CAP: f64 = 15.0;

pub const FULL_TIME_PAIR_BONUS: f64 = 25.0;
pub const PART_TIME_PAIR_BONUS: f64 = 15.0;
pub const SINGLE_SHIFT_BONUS: f64 = 5.0;

pub const TIEBREAKER_RANGE: f64 = 5.0;

/// Desirability of giving `candidate` this (shift, position) slot.
/// Higher is better; ties fall to the random term. `pair_pass` marks a
/// candidate being evaluated as one half of a consecutive two-shift combo.
pub fn score_candidate<R: Rng + ?Sized>(
    candidate: &Candidate,
    shift: &Shift,
    position_id: Uuid,
    pair_pass: bool,
    current_week_hours: f64,
    positions: &HashMap<Uuid, Position>,
    rng: &mut R,
) -> f64 {
    let contract_weight = match candidate.contract_type {
        ContractType::FullTime => FULL_TIME_WEIGHT,
        ContractType::PartTime if pair_pass => PART_TIME_PAIR_WEIGHT,
        ContractType::PartTime | ContractType::Other => PART_TIME_SINGLE_WEIGHT,
    };

    let position_weight = if positions.get(&position_id).is_some_and(|p| p.is_priority) {
        PRIORITY_POSITION_WEIGHT
    } else {
        STANDARD_POSITION_WEIGHT
    };

    let prior_hours_weight = (candidate.previous_month_hours / 10.0).min(PRIOR_HOURS_WEIGHT_CAP);

    let preference_weight = match candidate.preference_order(shift.id, position_id) {
        Some(1) => FIRST_CHOICE_WEIGHT,
        Some(2) => SECOND_CHOICE_WEIGHT,
        _ => OTHER_CHOICE_WEIGHT,
    };

    let load_balance_weight = (LOAD_BALANCE_WEIGHT_CAP - current_week_hours / 10.0).max(0.0);

    let consecutive_weight = if pair_pass {
        match candidate.contract_type {
            ContractType::FullTime => FULL_TIME_PAIR_BONUS,
            _ => PART_TIME_PAIR_BONUS,
        }
    } else {
        SINGLE_SHIFT_BONUS
    };

    let tiebreaker = rng.random_range(0.0..TIEBREAKER_RANGE);

    contract_weight
        + position_weight
        + prior_hours_weight
        + preference_weight
        + load_balance_weight
        + consecutive_weight
        + tiebreaker
}
