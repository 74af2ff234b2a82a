//! Per-phase observability
//!
//! This module replaces the historical "single `PROFILE=1` conditional"
//! pattern with a pluggable observer interface, per the original design
//! notes' stated preference: each phase owns its own timer and reports to
//! whatever [`PhaseObserver`] the caller installed, rather than every phase
//! consulting a global environment variable directly.
//!
//! The default observer ([`TracingObserver`]) emits a `tracing::debug!` event
//! per phase; visibility is controlled the ordinary way, via `RUST_LOG` /
//! `EnvFilter`. [`init_tracing_from_env`] is an opt-in convenience that keeps
//! the legacy `PROFILE` environment variable working as a coarse filter-level
//! shim for callers that have not wired up their own subscriber.

#![forbid(unsafe_code)]

use std::time::Duration;

/// Receives a `(phase name, elapsed)` pair after each pipeline phase completes.
///
/// Implementors must not panic: a misbehaving observer must not be able to
/// abort an otherwise-successful solve.
pub trait PhaseObserver {
    /// Called once per phase, in pipeline order, after the phase finishes.
    fn on_phase(&self, name: &'static str, elapsed: Duration);
}

/// An observer that discards all phase timings. Used when no profiling is
/// requested.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl PhaseObserver for NullObserver {
    #[inline]
    fn on_phase(&self, _name: &'static str, _elapsed: Duration) {}
}

/// The default observer: emits one `tracing::debug!` event per phase.
///
/// Enabling output is a matter of ordinary `tracing` filtering (`RUST_LOG`),
/// not a bespoke mechanism — the "pluggable observer interface is preferred
/// [to an env-var conditional] in a rewrite" design note is satisfied by this
/// struct existing at all; `init_tracing_from_env` below is purely a
/// convenience for callers who have not already installed a subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PhaseObserver for TracingObserver {
    fn on_phase(&self, name: &'static str, elapsed: Duration) {
        tracing::debug!(phase = name, elapsed_us = elapsed.as_micros() as u64, "phase complete");
    }
}

/// Run `f`, timing it, and report the elapsed duration to `observer` under `name`.
pub(crate) fn timed_phase<T>(
    observer: &dyn PhaseObserver,
    name: &'static str,
    f: impl FnOnce() -> T,
) -> T {
    let start = std::time::Instant::now();
    let out = f();
    observer.on_phase(name, start.elapsed());
    out
}

/// Opt-in convenience: install a `tracing-subscriber` `fmt` layer driven by
/// `RUST_LOG`, with the legacy `PROFILE` variable (any truthy value: `1`,
/// `true`, `yes`) raising this crate's default filter to `debug` when
/// `RUST_LOG` is unset. Observational only — it has no effect on results,
/// matching the original `PROFILE` contract.
///
/// Safe to call more than once; subsequent calls are no-ops (the underlying
/// `tracing` global subscriber can only be set once per process).
pub fn init_tracing_from_env() {
    use tracing_subscriber::EnvFilter;

    let default_level = if profile_env_truthy() { "maq=debug" } else { "maq=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn profile_env_truthy() -> bool {
    matches!(
        std::env::var("PROFILE").ok().as_deref(),
        Some("1") | Some("true") | Some("True") | Some("TRUE") | Some("yes") | Some("y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_observer_is_silent() {
        // Just exercises the trait object path; nothing to assert beyond "doesn't panic".
        let obs: &dyn PhaseObserver = &NullObserver;
        obs.on_phase("preprocess", Duration::from_millis(1));
    }

    #[test]
    fn timed_phase_returns_the_closure_value() {
        let obs = NullObserver;
        let v = timed_phase(&obs, "prune", || 1 + 1);
        assert_eq!(v, 2);
    }
}
