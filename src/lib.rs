//! Multi-armed Qini: budget-constrained greedy treatment allocation.
//!
//! A solve takes a set of units, each offering a small set of mutually
//! exclusive treatment "arms" (a cost and an expected reward apiece), and a
//! total budget. It returns the Qini path: the sequence of increasingly
//! generous, strictly budget-increasing allocations a greedy spender would
//! walk through on the way to exhausting that budget, each step swapping in
//! the single best available marginal upgrade across every unit.
//!
//! The pipeline has four stages, each its own module:
//!
//! 1. [`ingest`] — take ownership of the caller's flat input buffers.
//! 2. [`preprocess`] — interning (see [`intern`]) plus unflattening into
//!    per-unit arm vectors.
//! 3. [`hull`] — prune each unit's arms down to its cost/reward convex hull.
//! 4. [`path`] — the greedy max-heap path builder.
//! 5. [`assemble`] — pair the path with the interning table into one result.
//!
//! [`solve`] drives all five stages with a default configuration;
//! [`solve_with_config`] and [`solve_with_observer`] give a caller control
//! over tuning and phase timing respectively.

#![forbid(unsafe_code)]

pub mod assemble;
pub mod config;
pub mod hull;
pub mod ingest;
pub mod intern;
pub mod path;
pub mod preprocess;
pub mod profiling;

pub use assemble::SolveOutput;
pub use config::SolveConfig;
pub use ingest::{FlatBuffers, IngestError};
pub use intern::InterningTable;
pub use path::SolutionPath;
pub use profiling::{init_tracing_from_env, NullObserver, PhaseObserver, TracingObserver};

/// Dense, zero-based identifier for a treatment, assigned by the interner in
/// first-sighting order. Distinct from an option's position within a unit's
/// arm list, which is transient and never exposed to callers.
pub type TreatmentId = u32;

/// One treatment option available to a unit: a fixed cost and the expected
/// reward of taking it. `PartialEq` compares all three fields exactly —
/// arms are produced deterministically from the input buffers, never from
/// floating-point arithmetic, so exact comparison is meaningful in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arm {
    pub treatment_id: TreatmentId,
    pub reward: f64,
    pub cost: f64,
}

/// Run a solve with the default [`SolveConfig`] and a silent observer.
pub fn solve(buffers: FlatBuffers) -> SolveOutput {
    solve_with_config(buffers, SolveConfig::default())
}

/// Run a solve with an explicit [`SolveConfig`]. If `config.profile` is set,
/// phase timings are reported through [`TracingObserver`]; otherwise phases
/// run unobserved.
pub fn solve_with_config(buffers: FlatBuffers, config: SolveConfig) -> SolveOutput {
    if config.profile {
        solve_with_observer(buffers, config, &TracingObserver)
    } else {
        solve_with_observer(buffers, config, &NullObserver)
    }
}

/// Run a solve with an explicit [`SolveConfig`] and a caller-supplied
/// [`PhaseObserver`], wiring every pipeline stage end to end.
///
/// Every stage is infallible given well-formed buffers (the specification's
/// external contract places that burden on the caller; see
/// [`FlatBuffers::validate`] for an opt-in check before calling this).
pub fn solve_with_observer(
    buffers: FlatBuffers,
    config: SolveConfig,
    observer: &dyn PhaseObserver,
) -> SolveOutput {
    let budget = buffers.budget;

    let (mut units, interning) = profiling::timed_phase(observer, "preprocess", || {
        preprocess::preprocess(buffers, config.intern_capacity_hint)
    });

    profiling::timed_phase(observer, "hull", || {
        hull::prune(&mut units);
    });

    let path = profiling::timed_phase(observer, "path", || path::build_path(&units, budget));

    profiling::timed_phase(observer, "assemble", || assemble::assemble(path, interning))
}
