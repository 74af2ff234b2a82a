//! Flat-buffer ingest adapter
//!
//! Accepts the six flat buffers (plus budget) described by the external
//! interface contract and takes ownership of them. The adapter performs no
//! validation beyond accepting the buffers — it exists to enforce a
//! zero-copy boundary: once [`FlatBuffers`] is constructed, nothing outside
//! the crate can read or mutate these buffers again.
//!
//! A cautious caller may opt into the cheap, O(1)/O(U) structural checks via
//! [`FlatBuffers::validate`] before handing the buffers to [`crate::solve`];
//! this is never invoked implicitly on the hot path.

#![forbid(unsafe_code)]

/// Owned input buffers for one solve.
///
/// All fields are `pub` because this struct is a thin data-transfer object:
/// the real invariants live in [`FlatBuffers::validate`], not in field
/// access control.
#[derive(Debug, Clone)]
pub struct FlatBuffers {
    /// Number of units, `U`.
    pub num_units: i64,
    /// Per-unit cumulative option count; `U+1` entries, `list_offsets[0] == 0`,
    /// `list_offsets[U] == T`.
    pub list_offsets: Vec<i32>,
    /// Flat reward values, `T` entries.
    pub rewards_flat: Vec<f64>,
    /// Flat cost values, `T` entries.
    pub costs_flat: Vec<f64>,
    /// Per-option cumulative byte offset into `str_data`; `T+1` entries.
    pub str_offsets: Vec<i32>,
    /// Concatenated UTF-8 bytes of every option's treatment identifier.
    pub str_data: Vec<u8>,
    /// Budget for this solve.
    pub budget: f64,
}

/// Structural problems [`FlatBuffers::validate`] can detect.
///
/// These are exactly the invariants the specification states must hold;
/// violating them without calling `validate()` first is undefined behavior
/// per the external contract, not a panic.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum IngestError {
    #[error("num_units must be non-negative (got {0})")]
    NegativeUnitCount(i64),
    #[error("list_offsets must have U+1={expected} entries (got {got})")]
    BadListOffsetsLen { expected: usize, got: usize },
    #[error("list_offsets[0] must be 0 (got {0})")]
    ListOffsetsNotZeroStarting(i32),
    #[error("list_offsets[U]={last} must equal the flat length T={t}")]
    ListOffsetsEndMismatch { last: i32, t: usize },
    #[error("rewards_flat and costs_flat must have equal length (rewards={rewards}, costs={costs})")]
    RewardCostLenMismatch { rewards: usize, costs: usize },
    #[error("str_offsets must have T+1={expected} entries (got {got})")]
    BadStrOffsetsLen { expected: usize, got: usize },
    #[error("str_offsets[T]={last} must equal str_data.len()={len}")]
    StrOffsetsEndMismatch { last: i32, len: usize },
}

impl FlatBuffers {
    /// Construct from owned buffers with no validation. Matches §4.1's
    /// "the adapter performs no validation beyond accepting the buffers."
    pub fn new(
        num_units: i64,
        list_offsets: Vec<i32>,
        rewards_flat: Vec<f64>,
        costs_flat: Vec<f64>,
        str_offsets: Vec<i32>,
        str_data: Vec<u8>,
        budget: f64,
    ) -> Self {
        Self { num_units, list_offsets, rewards_flat, costs_flat, str_offsets, str_data, budget }
    }

    /// Opt-in structural validation of the §3 invariants. Cheap: O(1) plus a
    /// handful of length/endpoint reads, never a full monotonicity scan
    /// (which the preprocessor's own O(T) walk would duplicate).
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.num_units < 0 {
            return Err(IngestError::NegativeUnitCount(self.num_units));
        }
        let u = self.num_units as usize;

        if self.list_offsets.len() != u + 1 {
            return Err(IngestError::BadListOffsetsLen { expected: u + 1, got: self.list_offsets.len() });
        }
        if self.list_offsets[0] != 0 {
            return Err(IngestError::ListOffsetsNotZeroStarting(self.list_offsets[0]));
        }
        let t = self.rewards_flat.len();
        let last_offset = self.list_offsets[u];
        if last_offset as i64 != t as i64 {
            return Err(IngestError::ListOffsetsEndMismatch { last: last_offset, t });
        }
        if self.rewards_flat.len() != self.costs_flat.len() {
            return Err(IngestError::RewardCostLenMismatch {
                rewards: self.rewards_flat.len(),
                costs: self.costs_flat.len(),
            });
        }
        if self.str_offsets.len() != t + 1 {
            return Err(IngestError::BadStrOffsetsLen { expected: t + 1, got: self.str_offsets.len() });
        }
        let last_str_offset = self.str_offsets[t];
        if last_str_offset as i64 != self.str_data.len() as i64 {
            return Err(IngestError::StrOffsetsEndMismatch {
                last: last_str_offset,
                len: self.str_data.len(),
            });
        }
        Ok(())
    }

    /// Flat length `T`, i.e. the total option count across all units.
    #[inline]
    pub fn flat_len(&self) -> usize {
        self.rewards_flat.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed() -> FlatBuffers {
        // Two units: [ "a" ], [ "b", "c" ]
        FlatBuffers::new(
            2,
            vec![0, 1, 3],
            vec![1.0, 2.0, 3.0],
            vec![1.0, 1.0, 1.0],
            vec![0, 1, 2, 3],
            b"abc".to_vec(),
            10.0,
        )
    }

    #[test]
    fn validate_accepts_well_formed_buffers() {
        assert!(well_formed().validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_unit_count() {
        let mut b = well_formed();
        b.num_units = -1;
        assert_eq!(b.validate(), Err(IngestError::NegativeUnitCount(-1)));
    }

    #[test]
    fn validate_rejects_bad_list_offsets_len() {
        let mut b = well_formed();
        b.list_offsets.pop();
        assert_eq!(b.validate(), Err(IngestError::BadListOffsetsLen { expected: 3, got: 2 }));
    }

    #[test]
    fn validate_rejects_nonzero_start() {
        let mut b = well_formed();
        b.list_offsets[0] = 1;
        assert_eq!(b.validate(), Err(IngestError::ListOffsetsNotZeroStarting(1)));
    }

    #[test]
    fn validate_rejects_end_mismatch() {
        let mut b = well_formed();
        *b.list_offsets.last_mut().unwrap() = 99;
        assert_eq!(b.validate(), Err(IngestError::ListOffsetsEndMismatch { last: 99, t: 3 }));
    }

    #[test]
    fn validate_rejects_str_offsets_end_mismatch() {
        let mut b = well_formed();
        *b.str_offsets.last_mut().unwrap() = 99;
        assert_eq!(b.validate(), Err(IngestError::StrOffsetsEndMismatch { last: 99, len: 3 }));
    }

    #[test]
    fn empty_input_is_well_formed() {
        let b = FlatBuffers::new(0, vec![0], vec![], vec![], vec![0], vec![], 10.0);
        assert!(b.validate().is_ok());
        assert_eq!(b.flat_len(), 0);
    }
}
