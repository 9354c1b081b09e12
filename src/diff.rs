//! Changed-range detection for differential page flushing
//!
//! A flush never retransmits whole pages: each page's current bytes are
//! compared against the last-transmitted shadow copy and only the changed
//! ranges go out. Every transmitted range costs a fixed position-set command
//! plus its payload, so nearby single-byte changes are batched into one
//! range. Batching stops at 16 bytes to keep individual data writes inside
//! the controllers' write-pointer auto-increment window.

use alloc::vec::Vec;

/// One contiguous byte range of a page that differs from the shadow copy.
///
/// Recomputed on every flush; never outlives it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Run {
    /// First differing column.
    pub start: usize,
    /// Number of bytes to transmit.
    pub len: usize,
}

/// Maximum distance between two runs that still get batched together.
const MERGE_GAP: usize = 5;

/// A right-hand run that has already grown to this size is not merged into.
const MERGE_CAP: usize = 16;

/// Collect the byte ranges where `new` differs from `old`.
///
/// Every differing byte starts as a length-1 run; a single right-to-left
/// sweep then folds run `i + 1` into run `i` when the two are within
/// [`MERGE_GAP`] bytes and the right run is still under [`MERGE_CAP`]. The
/// sweep visits each boundary once: a freshly merged run is not re-examined
/// against its new right neighbor.
pub(crate) fn changed_runs(new: &[u8], old: &[u8]) -> Vec<Run> {
    let mut runs: Vec<Run> = new
        .iter()
        .zip(old)
        .enumerate()
        .filter(|(_, (n, o))| n != o)
        .map(|(i, _)| Run { start: i, len: 1 })
        .collect();
    for i in (0..runs.len().saturating_sub(1)).rev() {
        let start = runs[i].start;
        let next = runs[i + 1];
        if start + MERGE_GAP >= next.start && next.len < MERGE_CAP {
            runs[i].len = next.len + (next.start - start);
            runs.remove(i + 1);
        }
    }
    runs
}
