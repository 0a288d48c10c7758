//! Record fixtures and timing helpers for codec benchmarks.

use irondis_core::{SliceReader, SliceWriter, WireRecord};
use irondis_records::StorageFuelReload;
use std::time::{Duration, Instant};

/// Builds `count` distinct reload records.
#[must_use]
pub fn sample_reloads(count: usize) -> Vec<StorageFuelReload> {
    (0..count)
        .map(|i| {
            let n = i as u32;
            StorageFuelReload {
                standard_quantity: 1000 + n,
                maximum_quantity: 5000 + n * 2,
                standard_quantity_reload_time: (n % 60) as u8,
                maximum_quantity_reload_time: (n % 120) as u8,
                fuel_measurement_units: 1,
                fuel_type: (n % 4) as u8,
                fuel_location: (n % 8) as u8,
                padding: 0,
            }
        })
        .collect()
}

/// Encodes `records` back to back into one contiguous buffer.
#[must_use]
pub fn encode_all<R: WireRecord>(records: &[R]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(records.len() * R::WIRE_SIZE);
    for record in records {
        // Writes into a Vec cannot fail.
        let _ = record.write_fields(&mut buf);
    }
    buf
}

/// Times `iterations` encodes of `record` into a fixed stack buffer.
pub fn benchmark_encode<R: WireRecord>(iterations: usize, record: &R) -> Duration {
    let mut buffer = [0u8; 256];
    let start = Instant::now();

    for _ in 0..iterations {
        let mut writer = SliceWriter::new(&mut buffer);
        let _ = std::hint::black_box(record).write_fields(&mut writer);
    }

    start.elapsed()
}

/// Times `iterations` decodes of one record from `data`.
pub fn benchmark_decode<R: WireRecord>(iterations: usize, data: &[u8]) -> Duration {
    let start = Instant::now();

    for _ in 0..iterations {
        let mut reader = SliceReader::new(std::hint::black_box(data));
        let mut record = R::default();
        let _ = record.read_fields(&mut reader);
        std::hint::black_box(record);
    }

    start.elapsed()
}
