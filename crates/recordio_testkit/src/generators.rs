//! Property-based test generators using proptest.

use proptest::prelude::*;

/// Strategy for generating arbitrary payloads, including empty ones.
pub fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..1024)
}

/// Strategy for generating payloads that compress well.
///
/// A short random pattern repeated many times.
pub fn compressible_payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    (prop::collection::vec(any::<u8>(), 1..8), 1usize..512)
        .prop_map(|(pattern, repeats)| pattern.repeat(repeats))
}

/// Strategy for generating a sequence of payloads for one stream.
pub fn payload_batch_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(
        prop_oneof![payload_strategy(), compressible_payload_strategy()],
        0..16,
    )
}

/// Strategy for generating per-call I/O limits for short-read and
/// short-write simulation.
pub fn io_chunk_strategy() -> impl Strategy<Value = usize> {
    1usize..64
}
