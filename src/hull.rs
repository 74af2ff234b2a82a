//! Convex-hull pruner
//!
//! For each unit independently: sort its options by cost ascending, then
//! run a Graham-scan-style stack pass that keeps only the upper-left
//! (cost, reward) convex hull among the positive-reward points. Everything
//! below that hull is strictly dominated by some combination of cheaper and
//! more effective options and can never be selected by the greedy path
//! builder, so discarding it up front shrinks the work the builder's heap
//! has to do by orders of magnitude on typical inputs.

#![forbid(unsafe_code)]

use crate::Arm;

/// Sentinel used as the "j" point (two-below-top) when the hull stack has
/// fewer than two entries — see the domination predicate below.
const SENTINEL: Arm = Arm { treatment_id: 0, reward: 0.0, cost: 0.0 };

/// Prune every unit's option vector down to its (cost, reward) convex hull,
/// in place.
pub fn prune(units: &mut [Vec<Arm>]) {
    for unit in units.iter_mut() {
        prune_unit(unit);
    }
}

fn prune_unit(unit: &mut Vec<Arm>) {
    unit.sort_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(std::cmp::Ordering::Equal));

    // Skip the leading prefix of non-positive-reward options (step 2).
    let first_positive = unit.iter().position(|o| o.reward > 0.0);
    let Some(first_positive) = first_positive else {
        unit.clear();
        return;
    };

    let mut stack: Vec<Arm> = Vec::with_capacity(unit.len() - first_positive);
    stack.push(unit[first_positive]);

    for &candidate in &unit[first_positive + 1..] {
        while let Some(&top) = stack.last() {
            let j = if stack.len() >= 2 { stack[stack.len() - 2] } else { SENTINEL };
            if dominates(j, top, candidate) {
                stack.pop();
            } else {
                break;
            }
        }
        let top_reward = stack.last().map(|o| o.reward);
        if candidate.reward > 0.0 && (top_reward.is_none() || candidate.reward > top_reward.unwrap()) {
            stack.push(candidate);
        }
    }

    debug_assert!(hull_postconditions_hold(&stack), "hull pruning postconditions violated");
    *unit = stack;
}

/// Does candidate `l` dominate the current hull top `k` (with second-to-top
/// `j`, or the zero sentinel if the stack has fewer than two entries)?
///
/// `k.reward <= 0` means `k` was only ever provisional (pushed past the
/// sentinel transition) and is always dominated. Otherwise the cross-
/// multiplied slope comparison `(r_l-r_k)/(c_l-c_k) > (r_k-r_j)/(c_k-c_j)`
/// avoids division; equality is *not* domination (ties keep the earlier
/// option).
#[inline]
fn dominates(j: Arm, k: Arm, l: Arm) -> bool {
    if k.reward <= 0.0 {
        return true;
    }
    (l.reward - k.reward) * (k.cost - j.cost) > (k.reward - j.reward) * (l.cost - k.cost)
}

/// Debug-only postcondition check matching §3's "Pruned Unit" invariants:
/// strictly increasing cost, strictly increasing reward, non-increasing
/// marginal slope, all rewards positive.
fn hull_postconditions_hold(hull: &[Arm]) -> bool {
    for pair in hull.windows(2) {
        if !(pair[1].cost > pair[0].cost && pair[1].reward > pair[0].reward) {
            return false;
        }
    }
    for triple in hull.windows(3) {
        let (j, k, l) = (triple[0], triple[1], triple[2]);
        let slope_jk = (k.reward - j.reward) / (k.cost - j.cost);
        let slope_kl = (l.reward - k.reward) / (l.cost - k.cost);
        if slope_kl > slope_jk {
            return false;
        }
    }
    hull.iter().all(|o| o.reward > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm(treatment_id: u32, cost: f64, reward: f64) -> Arm {
        Arm { treatment_id, cost, reward }
    }

    #[test]
    fn empty_unit_stays_empty() {
        let mut units = vec![Vec::new()];
        prune(&mut units);
        assert!(units[0].is_empty());
    }

    #[test]
    fn all_non_positive_rewards_yields_empty_unit() {
        let mut units = vec![vec![arm(0, 1.0, -5.0), arm(1, 2.0, 0.0)]];
        prune(&mut units);
        assert!(units[0].is_empty());
    }

    #[test]
    fn dominated_middle_option_is_pruned() {
        // scenario 3: rewards [10,12,30], costs [5,10,15] -> id 1 (reward 12) dominated
        let mut units = vec![vec![arm(1, 5.0, 10.0), arm(2, 10.0, 12.0), arm(3, 15.0, 30.0)]];
        prune(&mut units);
        let ids: Vec<u32> = units[0].iter().map(|o| o.treatment_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn constant_slope_triple_is_fully_kept() {
        // scenario 4: rewards [10,15,20], costs [1,2,3], all slopes = 5
        let mut units = vec![vec![arm(0, 1.0, 10.0), arm(1, 2.0, 15.0), arm(2, 3.0, 20.0)]];
        prune(&mut units);
        assert_eq!(units[0].len(), 3);
    }

    #[test]
    fn concave_triple_drops_dominated_middle() {
        // scenario 5: rewards [8,12,18], costs [1,2,3], slopes 8,4,6 -> middle dominated
        let mut units = vec![vec![arm(0, 1.0, 8.0), arm(1, 2.0, 12.0), arm(2, 3.0, 18.0)]];
        prune(&mut units);
        let ids: Vec<u32> = units[0].iter().map(|o| o.treatment_id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn negative_and_zero_reward_prefix_is_filtered() {
        // scenario 6: rewards [-5,0,10,20], costs [1,2,3,4]
        // slope (0,0)->(3,10) = 10/3 ~3.33; slope (0,0)->(4,20) = 5; (3,10) dominated by going straight to (4,20)
        let mut units =
            vec![vec![arm(0, 1.0, -5.0), arm(1, 2.0, 0.0), arm(2, 3.0, 10.0), arm(3, 4.0, 20.0)]];
        prune(&mut units);
        let ids: Vec<u32> = units[0].iter().map(|o| o.treatment_id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn out_of_order_input_is_sorted_by_cost_first() {
        let mut units = vec![vec![arm(2, 3.0, 20.0), arm(0, 1.0, 5.0), arm(1, 2.0, 12.0)]];
        prune(&mut units);
        for pair in units[0].windows(2) {
            assert!(pair[1].cost > pair[0].cost);
        }
    }

    #[test]
    fn postconditions_hold_on_a_random_small_case() {
        let mut units = vec![vec![
            arm(0, 2.0, 3.0),
            arm(1, 5.0, 4.0),
            arm(2, 1.0, 1.0),
            arm(3, 8.0, 9.0),
            arm(4, 3.0, -1.0),
        ]];
        prune(&mut units);
        assert!(hull_postconditions_hold(&units[0]));
    }
}
