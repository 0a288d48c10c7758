//! Stream decoding throughput.

use bytes::BytesMut;
use irondis_core::{RecordCodec, WireRecord};
use std::time::{Duration, Instant};
use tokio_util::codec::Decoder;

/// Result of decoding one buffered stream of records.
#[derive(Debug, Clone)]
pub struct ThroughputResult {
    /// Records decoded.
    pub records: u64,
    /// Bytes consumed.
    pub bytes: u64,
    /// Total duration.
    pub duration: Duration,
}

impl ThroughputResult {
    /// Returns records per second.
    #[must_use]
    pub fn records_per_second(&self) -> f64 {
        self.records as f64 / self.duration.as_secs_f64()
    }

    /// Returns megabytes per second.
    #[must_use]
    pub fn mb_per_second(&self) -> f64 {
        self.bytes as f64 / self.duration.as_secs_f64() / (1024.0 * 1024.0)
    }
}

/// Frames and decodes every record in `stream` with a strict codec.
///
/// Stops at the first failure; `records` then counts what decoded before it.
pub fn decode_stream<R: WireRecord>(stream: &[u8]) -> ThroughputResult {
    let mut codec = RecordCodec::<R>::new();
    let mut buf = BytesMut::from(stream);
    let start = Instant::now();

    while let Ok(Some(record)) = codec.decode(&mut buf) {
        std::hint::black_box(record);
    }

    let duration = start.elapsed();
    ThroughputResult {
        records: codec.records_decoded(),
        bytes: codec.records_decoded() * R::WIRE_SIZE as u64,
        duration,
    }
}
