//! Records defined downstream, through the facade crate only.

use bytes::BytesMut;
use futures::StreamExt;
use irondis::prelude::*;
use tokio_util::codec::{Decoder, FramedRead};

/// Depends on `irondis` alone, so the derive needs the facade path.
#[derive(Debug, Clone, Copy, Default, WireRecord)]
#[wire(crate = "::irondis::core", name = "FuelGauge")]
struct Gauge {
    #[wire(rename = "tank")]
    tank_id: u16,
    level: i16,
    #[wire(padding)]
    reserved: u16,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_custom_record_codec() {
    let gauge = Gauge {
        tank_id: 2,
        level: -100,
        reserved: 0,
    };
    assert_eq!(Gauge::NAME, "FuelGauge");
    assert_eq!(Gauge::WIRE_SIZE, 6);
    assert_eq!(gauge.to_bytes(), [0x00, 0x02, 0xFF, 0x9C, 0x00, 0x00]);
    assert!(gauge.dump().contains("<tank type=\"uint16\">2</tank>"));
    assert_eq!(Gauge::from_bytes(&gauge.to_bytes()).unwrap(), gauge);
}

#[test]
fn test_mixed_records_as_trait_objects() {
    let records: Vec<Box<dyn AnyRecord>> = vec![
        Box::new(Gauge::default()),
        Box::new(StorageFuelReload::default()),
        Box::new(EntityId::new(1, 2, 3)),
    ];

    let mut buf = Vec::new();
    for record in &records {
        record.dyn_encode(Some(&mut buf)).unwrap();
    }
    assert_eq!(buf.len(), 6 + 14 + 6);

    let same: Box<dyn AnyRecord> = Box::new(EntityId::new(1, 2, 3));
    assert!(*records[0] != *records[1]);
    assert!(*records[2] == *same);
}

#[test]
fn test_strict_codec_rejects_truncated_stream() {
    let mut codec = RecordCodec::<StorageFuelReload>::new();
    let mut buf = BytesMut::from(&StorageFuelReload::default().to_bytes()[..9]);
    assert!(codec.decode(&mut buf).unwrap().is_none());
    let err = codec.decode_eof(&mut buf).unwrap_err();
    assert!(err.is_insufficient_data());
}

#[tokio::test]
async fn test_best_effort_stream() {
    init_tracing();
    let mut bytes = Vec::new();
    for level in [10i16, 20, 30] {
        let gauge = Gauge {
            tank_id: 1,
            level,
            reserved: 0,
        };
        gauge.encode(Some(&mut bytes)).unwrap();
    }
    bytes.push(0x7F);

    let mut failures = FailureChannel::new();
    let errors = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = std::sync::Arc::clone(&errors);
    failures.subscribe(move |e| sink.lock().unwrap().push(e.to_string()));

    let codec = RecordCodec::<Gauge>::new().with_failures(failures);
    let levels: Vec<i16> = FramedRead::new(&bytes[..], codec)
        .map(|item| item.map(|g| g.level))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(levels, [10, 20, 30]);
    let errors = errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("insufficient data"));
}
