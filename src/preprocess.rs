//! Preprocessor
//!
//! Walks the flat input buffers unit-major, option-minor, interning each
//! treatment identifier into a dense `0..N-1` id space and materializing a
//! per-unit `Vec<Arm>`. This function is pure given its input buffers: it
//! consults no external state, and consumes (drops) the input buffers it is
//! handed so peak memory does not carry both the flat and the per-unit
//! representations at once.

#![forbid(unsafe_code)]

use crate::ingest::FlatBuffers;
use crate::intern::{InterningTable, Interner};
use crate::Arm;

/// Walk `buffers` and emit the per-unit option vectors plus the interning
/// table. `buffers` is consumed: all six input vectors are dropped when this
/// function returns (the last read of each happens inside this body).
///
/// `intern_capacity_hint`, if given, pre-sizes the interning hash table to
/// avoid rehashing when the caller has an estimate of the distinct-id count.
pub fn preprocess(buffers: FlatBuffers, intern_capacity_hint: Option<usize>) -> (Vec<Vec<Arm>>, InterningTable) {
    let FlatBuffers { num_units, list_offsets, rewards_flat, costs_flat, str_offsets, str_data, budget: _ } =
        buffers;

    let num_units = num_units.max(0) as usize;
    let mut interner = Interner::with_capacity(intern_capacity_hint.unwrap_or(0));
    let mut units: Vec<Vec<Arm>> = Vec::with_capacity(num_units);

    for i in 0..num_units {
        let start = list_offsets[i] as usize;
        let end = list_offsets[i + 1] as usize;
        let mut unit: Vec<Arm> = Vec::with_capacity(end - start);

        for j in start..end {
            let str_start = str_offsets[j] as usize;
            let str_end = str_offsets[j + 1] as usize;
            let raw = &str_data[str_start..str_end];
            // Conformant UTF-8 is a caller precondition (see DESIGN.md); a
            // non-conformant slice here is the undefined-behavior case the
            // specification explicitly assigns to the caller, so we do not
            // reach for `unsafe` to special-case it away.
            let s = std::str::from_utf8(raw).expect("treatment identifier bytes must be valid UTF-8");
            let treatment_id = interner.intern(s);
            unit.push(Arm { treatment_id, reward: rewards_flat[j], cost: costs_flat[j] });
        }

        units.push(unit);
    }

    (units, interner.into_table())
}
