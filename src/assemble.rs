//! Result assembly
//!
//! The last pipeline stage: pairs the path builder's output with the
//! interning table produced by preprocessing so a caller can turn dense
//! treatment ids back into the original identifier strings without holding
//! onto any other intermediate state from the solve.

#![forbid(unsafe_code)]

use crate::intern::InterningTable;
use crate::path::SolutionPath;

/// The full result of one solve: the path plus the table needed to decode
/// its `treatment_path` ids back into identifier strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveOutput {
    pub path: SolutionPath,
    pub interning: InterningTable,
}

impl SolveOutput {
    /// Resolve the treatment identifier assigned at step `i` of the path.
    ///
    /// Panics if `i` is out of range for `path` — see [`SolutionPath::len`].
    pub fn treatment_at(&self, i: usize) -> &str {
        self.interning.get(self.path.treatment_path[i])
    }
}

pub fn assemble(path: SolutionPath, interning: InterningTable) -> SolveOutput {
    SolveOutput { path, interning }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arm, path::build_path, preprocess::preprocess, ingest::FlatBuffers};

    #[test]
    fn assembled_output_resolves_identifiers_by_step() {
        let buffers = FlatBuffers::new(
            1,
            vec![0, 2],
            vec![5.0, 9.0],
            vec![1.0, 3.0],
            vec![0, 1, 2],
            b"ab".to_vec(),
            100.0,
        );
        let (mut units, interning) = preprocess(buffers, None);
        crate::hull::prune(&mut units);
        let path = build_path(&units, 100.0);
        let output = assemble(path, interning);
        assert_eq!(output.treatment_at(0), "a");
        let last = output.path.len() - 1;
        assert_eq!(output.treatment_at(last), "b");
    }

    #[test]
    fn arm_is_just_a_plain_data_carrier() {
        let a = Arm { treatment_id: 3, reward: 1.0, cost: 2.0 };
        assert_eq!(a.treatment_id, 3);
    }
}
