//! Path builder
//!
//! Global greedy allocation: a max-heap keyed by marginal reward-per-cost
//! repeatedly commits the single best available upgrade across every unit
//! until the budget is exhausted or no unit has a further positive-marginal
//! upgrade. Each commit may *replace* a unit's previous assignment — the
//! prior cost and reward are refunded before the new ones are added, which
//! is what makes this a path over increasingly generous per-unit treatments
//! rather than a one-shot knapsack pick.

#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{Arm, TreatmentId};

/// The emitted Qini path: four parallel, append-only sequences plus a
/// completion flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionPath {
    /// Cumulative cost after each step (non-decreasing).
    pub cost_path: Vec<f64>,
    /// Cumulative reward after each step (non-decreasing).
    pub reward_path: Vec<f64>,
    /// Which unit received a new or upgraded assignment at each step.
    pub unit_path: Vec<u32>,
    /// The dense treatment id now active for that unit at each step.
    pub treatment_path: Vec<TreatmentId>,
    /// True iff the loop stopped because no positive-marginal upgrade
    /// remained anywhere, as opposed to stopping because the budget was hit.
    pub complete: bool,
}

impl SolutionPath {
    /// Number of steps emitted.
    #[inline]
    pub fn len(&self) -> usize {
        self.cost_path.len()
    }

    /// True if no step was emitted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cost_path.is_empty()
    }
}

/// One entry in the builder's max-heap: `(unit, option_index)` — an index
/// pair rather than a borrowed pointer into `units`. This is the safe
/// encoding the original design notes call out as the right substitute for a
/// borrowed-reference heap in a language with an ownership discipline: it
/// lets `units` stay immutably borrowed (read-only) for the whole build
/// without any lifetime entanglement with the heap.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    unit: u32,
    option_index: u32,
    priority: f64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // The pruning postconditions forbid NaN priorities (see module docs
        // on hull.rs and the crate-level invariants); `Equal` is an
        // unreachable fallback kept only so this never panics.
        self.priority.partial_cmp(&other.priority).unwrap_or(Ordering::Equal)
    }
}

/// Build the Qini path for `units` (already hull-pruned) under `budget`.
pub fn build_path(units: &[Vec<Arm>], budget: f64) -> SolutionPath {
    let mut active_index: Vec<u32> = vec![0; units.len()];
    let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();

    for (u, options) in units.iter().enumerate() {
        if let Some(first) = options.first() {
            push_entry(&mut heap, u as u32, 0, first);
        }
    }

    let mut spend = 0.0f64;
    let mut gain = 0.0f64;
    let mut path = SolutionPath::default();

    while spend < budget {
        let Some(top) = heap.pop() else { break };

        let u = top.unit as usize;
        let option_index = top.option_index as usize;
        let candidate = units[u][option_index];

        if active_index[u] > 0 {
            let previous = units[u][active_index[u] as usize - 1];
            spend -= previous.cost;
            gain -= previous.reward;
        }

        spend += candidate.cost;
        gain += candidate.reward;
        active_index[u] = option_index as u32 + 1;

        path.cost_path.push(spend);
        path.reward_path.push(gain);
        path.unit_path.push(top.unit);
        path.treatment_path.push(candidate.treatment_id);

        if let Some(next) = units[u].get(active_index[u] as usize) {
            push_upgrade(&mut heap, top.unit, active_index[u], &candidate, next);
        }
    }

    path.complete = heap.is_empty();
    path
}

#[inline]
fn push_entry(heap: &mut BinaryHeap<HeapEntry>, unit: u32, option_index: u32, option: &Arm) {
    let priority = option.reward / option.cost;
    debug_assert!(!priority.is_nan(), "initial priority must not be NaN");
    heap.push(HeapEntry { unit, option_index, priority });
}

#[inline]
fn push_upgrade(heap: &mut BinaryHeap<HeapEntry>, unit: u32, option_index: u32, current: &Arm, next: &Arm) {
    let priority = (next.reward - current.reward) / (next.cost - current.cost);
    debug_assert!(!priority.is_nan(), "upgrade priority must not be NaN");
    heap.push(HeapEntry { unit, option_index, priority });
}
