//! # Answer-Key Pattern Analysis
//!
//! Measures how "streaky" an answer key is: the longest stretch of
//! consecutive questions sharing the same correct letter. Long runs are a
//! tell that test-takers can exploit, so the engine can flag them.

/// Length of the longest run of equal adjacent elements.
///
/// Single left-to-right pass. Returns 0 for an empty sequence and 1 for a
/// sequence with no repeats.
pub fn longest_run<T: PartialEq>(sequence: &[T]) -> usize {
    let Some(first) = sequence.first() else {
        return 0;
    };

    let mut best = 1;
    let mut current = 1;
    let mut previous = first;
    for item in &sequence[1..] {
        if item == previous {
            current += 1;
            best = best.max(current);
        } else {
            current = 1;
        }
        previous = item;
    }
    best
}
