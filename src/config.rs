//! Solve-time configuration
//!
//! A small, ergonomic knob set for `solve`, mirroring the reference repo's
//! `ProverBuilder`/`Tuning` shape: safe defaults, a handful of overridable
//! fields, nothing that the core algorithm itself requires to be correct.

#![forbid(unsafe_code)]

/// Tuning knobs for a single `solve` call.
///
/// `SolveConfig::default()` reproduces the historical zero-configuration
/// behavior: no profiling output, no capacity hints.
#[derive(Clone, Copy, Debug)]
pub struct SolveConfig {
    /// Install the default [`crate::profiling::TracingObserver`] for this solve.
    ///
    /// Equivalent to the legacy `PROFILE=1` environment-variable toggle, but
    /// expressed as an explicit, pluggable setting rather than an implicit
    /// global read.
    pub profile: bool,
    /// Pre-size the interning hash table when the caller has an estimate of
    /// the distinct-identifier count. Avoids rehashing on the hot path when
    /// the estimate is accurate; a poor estimate only costs a larger initial
    /// allocation, never correctness.
    pub intern_capacity_hint: Option<usize>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self { profile: false, intern_capacity_hint: None }
    }
}

impl SolveConfig {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the default tracing-based phase observer.
    pub fn profile(mut self, on: bool) -> Self {
        self.profile = on;
        self
    }

    /// Set the interning table's capacity hint.
    pub fn intern_capacity_hint(mut self, n: usize) -> Self {
        self.intern_capacity_hint = Some(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unconfigured() {
        let cfg = SolveConfig::default();
        assert!(!cfg.profile);
        assert_eq!(cfg.intern_capacity_hint, None);
    }

    #[test]
    fn builder_chains() {
        let cfg = SolveConfig::new().profile(true).intern_capacity_hint(1024);
        assert!(cfg.profile);
        assert_eq!(cfg.intern_capacity_hint, Some(1024));
    }
}
