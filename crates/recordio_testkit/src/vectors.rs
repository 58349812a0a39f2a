//! Wire-format test vectors.
//!
//! Each vector pins the exact bytes of a stream, so any implementation of
//! the record format can be checked against the same cases. Vectors
//! serialize to JSON for sharing outside Rust.

use recordio_compress::CodecKind;
use recordio_core::{RecordError, RecordReader, RecordWriter};
use recordio_stream::{InMemorySink, InMemorySource};
use serde::{Deserialize, Serialize};

/// A test vector that can be shared across implementations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Codec name, as understood by [`CodecKind`].
    pub codec: String,
    /// Logical payloads (hex-encoded), in stream order.
    ///
    /// For a failing vector, the payloads read before the failure.
    pub payloads_hex: Vec<String>,
    /// The complete stream (hex-encoded).
    pub stream_hex: String,
    /// Expected error kind (if reading should fail), see [`error_kind`].
    pub expected_error: Option<String>,
}

impl TestVector {
    /// Returns the decoded payloads.
    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.payloads_hex.iter().map(|p| hex_decode(p)).collect()
    }

    /// Returns the decoded stream bytes.
    pub fn stream(&self) -> Vec<u8> {
        hex_decode(&self.stream_hex)
    }

    /// Returns `true` if reading this stream should end in an error.
    pub fn is_failure(&self) -> bool {
        self.expected_error.is_some()
    }
}

const MAGIC_HEX: &str = "e0c3f92500000000";

fn vector(
    id: &str,
    description: &str,
    codec: &str,
    payloads: &[&[u8]],
    stream_hex: String,
    expected_error: Option<&str>,
) -> TestVector {
    TestVector {
        id: id.into(),
        description: description.into(),
        codec: codec.into(),
        payloads_hex: payloads.iter().map(|p| hex_encode(p)).collect(),
        stream_hex,
        expected_error: expected_error.map(Into::into),
    }
}

/// Streams that encode and decode cleanly.
pub fn stream_vectors() -> Vec<TestVector> {
    vec![
        vector(
            "stream_empty",
            "Empty stream holds no records",
            "none",
            &[],
            String::new(),
            None,
        ),
        vector(
            "stream_hello",
            "Single uncompressed record 'Hello!'",
            "none",
            &[b"Hello!"],
            format!("{MAGIC_HEX}0600000000000000{}", hex_encode(b"Hello!")),
            None,
        ),
        vector(
            "stream_one_two",
            "Two uncompressed records in write order",
            "none",
            &[b"One", b"Two"],
            format!(
                "{MAGIC_HEX}0300000000000000{}{MAGIC_HEX}0300000000000000{}",
                hex_encode(b"One"),
                hex_encode(b"Two")
            ),
            None,
        ),
        vector(
            "stream_empty_payload",
            "Record with an empty payload is a bare header",
            "none",
            &[b""],
            format!("{MAGIC_HEX}0000000000000000"),
            None,
        ),
        vector(
            "stream_hello_lz4",
            "Single LZ4 record: size prefix, one literal-only sequence",
            "lz4",
            &[b"Hello!"],
            format!(
                "{MAGIC_HEX}0b000000000000000600000060{}",
                hex_encode(b"Hello!")
            ),
            None,
        ),
        vector(
            "stream_hello_snappy",
            "Single Snappy record: varint length, one literal element",
            "snappy",
            &[b"Hello!"],
            format!("{MAGIC_HEX}08000000000000000614{}", hex_encode(b"Hello!")),
            None,
        ),
    ]
}

/// Streams that must fail to read.
pub fn malformed_vectors() -> Vec<TestVector> {
    vec![
        vector(
            "malformed_bad_magic",
            "Zeroed header has the wrong magic",
            "none",
            &[],
            "00000000000000000000000000000000".into(),
            Some("format"),
        ),
        vector(
            "malformed_negative_size",
            "Compressed size of -1",
            "none",
            &[],
            format!("{MAGIC_HEX}ffffffffffffffff"),
            Some("format"),
        ),
        vector(
            "malformed_partial_magic",
            "Stream ends inside the magic",
            "none",
            &[],
            "e0c3f925".into(),
            Some("truncated_record"),
        ),
        vector(
            "malformed_partial_size",
            "Stream ends inside the size field",
            "none",
            &[],
            format!("{MAGIC_HEX}0600"),
            Some("truncated_record"),
        ),
        vector(
            "malformed_partial_payload",
            "Stream ends inside the payload",
            "none",
            &[],
            format!("{MAGIC_HEX}0600000000000000{}", hex_encode(b"Hel")),
            Some("truncated_record"),
        ),
        vector(
            "malformed_second_record_cut",
            "First record intact, second cut after its magic",
            "none",
            &[b"One"],
            format!("{MAGIC_HEX}0300000000000000{}{MAGIC_HEX}", hex_encode(b"One")),
            Some("truncated_record"),
        ),
        vector(
            "malformed_lz4_payload",
            "Well-framed record whose LZ4 block is cut short",
            "lz4",
            &[],
            format!("{MAGIC_HEX}050000000000000010000000ff"),
            Some("decompression"),
        ),
        vector(
            "malformed_lz4_size_mismatch",
            "LZ4 prefix declares 6 bytes, the block decodes to 3",
            "lz4",
            &[],
            format!(
                "{MAGIC_HEX}08000000000000000600000030{}",
                hex_encode(b"Hel")
            ),
            Some("decompression"),
        ),
        vector(
            "malformed_snappy_size_mismatch",
            "Snappy header declares 6 bytes, the block decodes to 3",
            "snappy",
            &[],
            format!("{MAGIC_HEX}05000000000000000608{}", hex_encode(b"Hel")),
            Some("decompression"),
        ),
    ]
}

/// Returns every vector.
pub fn all_vectors() -> Vec<TestVector> {
    let mut vectors = stream_vectors();
    vectors.extend(malformed_vectors());
    vectors
}

/// Serializes vectors to pretty-printed JSON.
pub fn vectors_to_json(vectors: &[TestVector]) -> String {
    serde_json::to_string_pretty(vectors).expect("Failed to serialize test vectors")
}

/// Parses vectors from JSON.
pub fn vectors_from_json(json: &str) -> serde_json::Result<Vec<TestVector>> {
    serde_json::from_str(json)
}

/// Returns the vector name of an error kind.
pub fn error_kind(err: &RecordError) -> &'static str {
    match err {
        RecordError::Compression(_) => "compression",
        RecordError::Decompression(_) => "decompression",
        RecordError::Write(_) | RecordError::ShortWrite { .. } => "write",
        RecordError::Read(_) => "read",
        RecordError::EndOfStream => "end_of_stream",
        RecordError::TruncatedRecord { .. } => "truncated_record",
        RecordError::Format { .. } => "format",
        RecordError::Close(_) => "close",
        RecordError::Closed => "closed",
    }
}

/// Checks a vector against this implementation.
///
/// Clean vectors are encoded from their payloads and compared byte for
/// byte, then decoded back. Failing vectors are decoded and must yield the
/// listed payloads followed by the expected error.
pub fn verify_vector(vector: &TestVector) -> Result<(), String> {
    let kind: CodecKind = vector
        .codec
        .parse()
        .map_err(|e| format!("{}: {e}", vector.id))?;
    let payloads = vector.payloads();
    let stream = vector.stream();

    if !vector.is_failure() {
        let sink = InMemorySink::new();
        let buffer = sink.buffer();
        let mut writer = RecordWriter::with_codec(sink, kind.build());
        for payload in &payloads {
            writer
                .write_record(payload)
                .map_err(|e| format!("{}: write failed: {e}", vector.id))?;
        }
        writer
            .close()
            .map_err(|e| format!("{}: close failed: {e}", vector.id))?;
        let encoded = buffer.data();
        if encoded != stream {
            return Err(format!(
                "{}: expected {}, encoded {}",
                vector.id,
                vector.stream_hex,
                hex_encode(&encoded)
            ));
        }
    }

    let mut reader = RecordReader::with_codec(InMemorySource::with_data(stream), kind.build());
    let mut decoded = Vec::new();
    let failure = loop {
        match reader.read_next() {
            Ok(payload) => decoded.push(payload),
            Err(e) => break e,
        }
    };

    if decoded != payloads {
        return Err(format!(
            "{}: decoded {} payloads, expected {}",
            vector.id,
            decoded.len(),
            payloads.len()
        ));
    }

    let expected = vector.expected_error.as_deref().unwrap_or("end_of_stream");
    let actual = error_kind(&failure);
    if actual != expected {
        return Err(format!(
            "{}: expected {expected}, got {actual} ({failure})",
            vector.id
        ));
    }
    Ok(())
}

/// Encodes bytes as hexadecimal string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decodes hexadecimal string to bytes.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    let hex = hex.replace([' ', '\n', '\r'], "");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex"))
        .collect()
}
