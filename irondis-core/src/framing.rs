//! Stream framing for fixed-size records.
//!
//! Records have no length prefix: every frame is exactly `R::WIRE_SIZE`
//! bytes, so a continuous byte stream splits into records by size alone.
//! [`RecordCodec`] plugs that into `tokio_util`'s `FramedRead`/`FramedWrite`.

use crate::error::{CodecError, Result};
use crate::failure::FailureChannel;
use crate::record::WireRecord;
use bytes::BytesMut;
use std::fmt;
use std::marker::PhantomData;
use tokio_util::codec::{Decoder, Encoder};

/// Framing codec for a stream of records of type `R`.
///
/// By default a record that fails to decode, or a truncated record at end of
/// stream, terminates the stream with an error. With a [`FailureChannel`]
/// attached the codec is best-effort: the failure is reported, the bad bytes
/// are dropped and decoding carries on with the next record.
pub struct RecordCodec<R> {
    failures: Option<FailureChannel>,
    decoded: u64,
    failed: u64,
    _record: PhantomData<fn() -> R>,
}

impl<R: WireRecord> RecordCodec<R> {
    /// Creates a strict codec.
    #[must_use]
    pub fn new() -> Self {
        Self {
            failures: None,
            decoded: 0,
            failed: 0,
            _record: PhantomData,
        }
    }

    /// Switches to best-effort mode, reporting failures to `channel`.
    #[must_use]
    pub fn with_failures(mut self, channel: FailureChannel) -> Self {
        self.failures = Some(channel);
        self
    }

    /// Returns the attached failure channel, if any.
    pub fn failures_mut(&mut self) -> Option<&mut FailureChannel> {
        self.failures.as_mut()
    }

    /// Returns true if failures are reported instead of returned.
    #[must_use]
    pub fn is_best_effort(&self) -> bool {
        self.failures.is_some()
    }

    /// Returns the number of records decoded successfully.
    #[must_use]
    pub fn records_decoded(&self) -> u64 {
        self.decoded
    }

    /// Returns the number of records that failed to decode.
    #[must_use]
    pub fn records_failed(&self) -> u64 {
        self.failed
    }

    fn fail(&mut self, error: CodecError) -> Result<()> {
        self.failed += 1;
        match self.failures.as_mut() {
            Some(channel) => {
                tracing::warn!(record = R::NAME, error = %error, "dropping malformed record");
                channel.report(R::NAME, &error);
                Ok(())
            }
            None => Err(error),
        }
    }
}

impl<R: WireRecord> Default for RecordCodec<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: WireRecord> Decoder for RecordCodec<R> {
    type Item = R;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<R>> {
        // A record without fields carries no bytes to frame on.
        if R::WIRE_SIZE == 0 {
            return Ok(None);
        }
        loop {
            if src.len() < R::WIRE_SIZE {
                src.reserve(R::WIRE_SIZE - src.len());
                return Ok(None);
            }

            let mut frame = src.split_to(R::WIRE_SIZE);
            let mut record = R::default();
            match record.read_fields(&mut frame) {
                Ok(()) => {
                    self.decoded += 1;
                    return Ok(Some(record));
                }
                Err(e) => self.fail(e)?,
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<R>> {
        if let Some(record) = self.decode(src)? {
            return Ok(Some(record));
        }
        if src.is_empty() {
            return Ok(None);
        }

        let error = CodecError::insufficient_data(R::WIRE_SIZE, src.len());
        src.clear();
        self.fail(error)?;
        Ok(None)
    }
}

impl<R: WireRecord> Encoder<R> for RecordCodec<R> {
    type Error = CodecError;

    fn encode(&mut self, item: R, dst: &mut BytesMut) -> Result<()> {
        <Self as Encoder<&R>>::encode(self, &item, dst)
    }
}

impl<'a, R: WireRecord> Encoder<&'a R> for RecordCodec<R> {
    type Error = CodecError;

    fn encode(&mut self, item: &'a R, dst: &mut BytesMut) -> Result<()> {
        dst.reserve(R::WIRE_SIZE);
        item.write_fields(dst)
    }
}

impl<R: WireRecord> fmt::Debug for RecordCodec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordCodec")
            .field("record", &R::NAME)
            .field("best_effort", &self.is_best_effort())
            .field("decoded", &self.decoded)
            .field("failed", &self.failed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{WireReader, WireWriter};
    use crate::types::{FieldDescriptor, FieldValue, WireType};
    use bytes::BufMut;
    use futures::StreamExt;
    use irondis_derive::WireRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio_util::codec::FramedRead;

    #[derive(Debug, Clone, Copy, Default, WireRecord)]
    struct Tick {
        sequence: u32,
        level: u8,
    }

    /// Hand-written record that rejects anything but 0 or 1.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    struct Flag {
        value: u8,
    }

    impl WireRecord for Flag {
        const NAME: &'static str = "Flag";
        const FIELDS: &'static [FieldDescriptor] =
            &[FieldDescriptor::new("value", WireType::Uint8, 0, false)];

        fn write_fields<W: WireWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
            writer.write_u8(self.value)
        }

        fn read_fields<R: WireReader + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
            let value = reader.read_u8()?;
            if value > 1 {
                return Err(CodecError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("flag out of range: {value}"),
                )));
            }
            self.value = value;
            Ok(())
        }

        fn field_values(&self) -> Vec<FieldValue> {
            vec![FieldValue::U8(self.value)]
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_encode_decode() {
        let mut codec = RecordCodec::<Tick>::new();
        let mut buf = BytesMut::new();

        let tick = Tick {
            sequence: 42,
            level: 3,
        };
        codec.encode(tick, &mut buf).unwrap();
        assert_eq!(buf.len(), Tick::WIRE_SIZE);
        assert_eq!(&buf[..], &[0, 0, 0, 42, 3]);

        let decoded = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(decoded, tick);
        assert!(buf.is_empty());
        assert_eq!(codec.records_decoded(), 1);
    }

    #[test]
    fn test_partial_record() {
        let mut codec = RecordCodec::<Tick>::new();
        let mut buf = BytesMut::new();

        buf.put_u16(0);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.put_u16(7);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.put_u8(1);
        let decoded = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(decoded.sequence, 7);
        assert_eq!(decoded.level, 1);
    }

    #[test]
    fn test_multiple_records() {
        let mut codec = RecordCodec::<Tick>::new();
        let mut buf = BytesMut::new();

        for sequence in 1..=3 {
            let tick = Tick {
                sequence,
                level: 0,
            };
            codec.encode(&tick, &mut buf).unwrap();
        }

        for sequence in 1..=3 {
            assert_eq!(codec.decode(&mut buf).unwrap().unwrap().sequence, sequence);
        }
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_truncated_tail_strict() {
        let mut codec = RecordCodec::<Tick>::new();
        let mut buf = BytesMut::from(&[0u8, 0, 1][..]);

        let err = codec.decode_eof(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InsufficientData {
                required: 5,
                available: 3
            }
        ));
        assert!(buf.is_empty());
        assert_eq!(codec.records_failed(), 1);
    }

    #[test]
    fn test_truncated_tail_best_effort() {
        init_tracing();
        let reported = Arc::new(AtomicUsize::new(0));
        let mut channel = FailureChannel::new();
        let counter = Arc::clone(&reported);
        channel.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut codec = RecordCodec::<Tick>::new().with_failures(channel);
        let mut buf = BytesMut::from(&[0u8, 0, 1][..]);
        assert!(codec.decode_eof(&mut buf).unwrap().is_none());
        assert_eq!(reported.load(Ordering::SeqCst), 1);
        assert_eq!(codec.failures_mut().map(|c| c.reported()), Some(1));
    }

    #[test]
    fn test_malformed_record_strict() {
        let mut codec = RecordCodec::<Flag>::new();
        let mut buf = BytesMut::from(&[1u8, 9, 0][..]);

        assert_eq!(codec.decode(&mut buf).unwrap(), Some(Flag { value: 1 }));
        assert!(codec.decode(&mut buf).unwrap_err().is_io());
    }

    #[test]
    fn test_malformed_record_skipped() {
        init_tracing();
        let mut codec = RecordCodec::<Flag>::new().with_failures(FailureChannel::new());
        let mut buf = BytesMut::from(&[1u8, 9, 7, 0][..]);

        assert_eq!(codec.decode(&mut buf).unwrap(), Some(Flag { value: 1 }));
        assert_eq!(codec.decode(&mut buf).unwrap(), Some(Flag { value: 0 }));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(codec.records_decoded(), 2);
        assert_eq!(codec.records_failed(), 2);
    }

    #[tokio::test]
    async fn test_framed_read_keeps_going() {
        init_tracing();
        let mut bytes = Vec::new();
        for sequence in 10..13 {
            let tick = Tick {
                sequence,
                level: 1,
            };
            tick.encode(Some(&mut bytes)).unwrap();
        }
        bytes.extend_from_slice(&[0xAA, 0xBB]);

        let codec = RecordCodec::<Tick>::new().with_failures(FailureChannel::new());
        let mut framed = FramedRead::new(&bytes[..], codec);

        let mut sequences = Vec::new();
        while let Some(item) = framed.next().await {
            sequences.push(item.unwrap().sequence);
        }

        assert_eq!(sequences, [10, 11, 12]);
        assert_eq!(framed.decoder().records_failed(), 1);
    }
}
