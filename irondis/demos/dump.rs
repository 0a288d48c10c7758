//! Decodes a StorageFuelReload record from hex and prints its dump.
//!
//! Run with: `cargo run --example dump -- 000003E8 00001388 1E 5A 01 02 03 00`
//!
//! Whitespace between hex digits is ignored. With no arguments a sample
//! record is used.

use anyhow::{Context, bail};
use irondis::prelude::*;

const SAMPLE: &str = "000003E8000013881E5A01020300";

fn parse_hex(text: &str) -> anyhow::Result<Vec<u8>> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        bail!("odd number of hex digits: {}", digits.len());
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .with_context(|| format!("invalid hex byte at offset {}", i / 2))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let input = if args.is_empty() {
        SAMPLE.to_string()
    } else {
        args.join(" ")
    };
    let bytes = parse_hex(&input)?;
    tracing::info!(bytes = bytes.len(), "decoding StorageFuelReload");

    let mut record = Observed::new(StorageFuelReload::default());
    record.on_failure(|e| tracing::error!(error = %e, "decode failed"));

    let mut reader = SliceReader::new(&bytes);
    if !record.unmarshal(Some(&mut reader)) {
        bail!(
            "need {} bytes, got {}",
            StorageFuelReload::WIRE_SIZE,
            bytes.len()
        );
    }
    if !reader.is_exhausted() {
        tracing::warn!(trailing = reader.remaining(), "ignoring trailing bytes");
    }

    print!("{}", record.dump());
    println!("hash: {:#010x}", record.wire_hash());
    Ok(())
}
