//! Reads a stream of StorageFuelReload records, skipping damaged input.
//!
//! Run with: `RUST_LOG=debug cargo run --example stream`
//!
//! A handful of records are written through one end of an in-memory pipe with
//! a truncated record at the end. The reader frames them with a best-effort
//! `RecordCodec`, so the damaged tail is reported and the stream still ends
//! cleanly.

use futures::{SinkExt, StreamExt};
use irondis::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::AsyncWriteExt;
use tokio_util::codec::{FramedRead, FramedWrite};

const RECORDS: u32 = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (client, server) = tokio::io::duplex(256);

    let writer = tokio::spawn(async move {
        let mut framed = FramedWrite::new(client, RecordCodec::<StorageFuelReload>::new());
        for i in 0..RECORDS {
            let record = StorageFuelReload {
                standard_quantity: 1000 * (i + 1),
                maximum_quantity: 5000 * (i + 1),
                standard_quantity_reload_time: 30,
                maximum_quantity_reload_time: 90,
                fuel_measurement_units: 1,
                fuel_type: 2,
                fuel_location: 3,
                padding: 0,
            };
            framed.send(record).await?;
        }
        let mut inner = framed.into_inner();
        inner.write_all(&[0x00, 0x00, 0x03]).await?;
        inner.shutdown().await?;
        anyhow::Ok(())
    });

    let dropped = Arc::new(AtomicUsize::new(0));
    let mut failures = FailureChannel::new();
    let counter = Arc::clone(&dropped);
    failures.subscribe(move |e| {
        counter.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(error = %e, "record dropped");
    });

    let codec = RecordCodec::<StorageFuelReload>::new().with_failures(failures);
    let mut framed = FramedRead::new(server, codec);
    while let Some(record) = framed.next().await {
        let record = record?;
        println!(
            "standard={} maximum={} hash={:#010x}",
            record.standard_quantity,
            record.maximum_quantity,
            record.wire_hash()
        );
    }
    writer.await??;

    let codec = framed.decoder();
    println!(
        "decoded {} records, dropped {}",
        codec.records_decoded(),
        dropped.load(Ordering::Relaxed)
    );
    Ok(())
}
