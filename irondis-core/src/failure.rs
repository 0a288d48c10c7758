//! Failure observation for best-effort record streams.
//!
//! Codec operations return ordinary [`Result`](crate::Result)s. When a caller
//! prefers to keep a stream going past a bad record, it routes those results
//! through a [`FailureChannel`]: registered observers are notified
//! synchronously and the caller only gets a success flag back.
//!
//! With no observer registered, failures are swallowed (and logged at debug
//! level in debug builds).

use crate::cursor::{WireReader, WireWriter};
use crate::error::CodecError;
use crate::record::WireRecord;
use std::fmt;
use std::ops::{Deref, DerefMut};

type Observer = Box<dyn FnMut(&CodecError) + Send>;

/// Handle returned by [`FailureChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// List of observers notified when a codec operation fails.
#[derive(Default)]
pub struct FailureChannel {
    observers: Vec<(ObserverId, Observer)>,
    next_id: u64,
    reported: u64,
}

impl FailureChannel {
    /// Creates a channel with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer.
    ///
    /// Observers run synchronously, in registration order, on the thread
    /// that hit the failure.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&CodecError) + Send + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Returns true if at least one observer is registered.
    #[must_use]
    pub fn is_observed(&self) -> bool {
        !self.observers.is_empty()
    }

    /// Returns how many failures have been reported through this channel.
    #[must_use]
    pub fn reported(&self) -> u64 {
        self.reported
    }

    /// Notifies every observer of a failure.
    ///
    /// # Arguments
    /// * `record` - Name of the record being processed, for logging
    /// * `error` - The failure
    pub fn report(&mut self, record: &str, error: &CodecError) {
        self.reported += 1;
        if self.observers.is_empty() {
            if cfg!(debug_assertions) {
                tracing::debug!(record, error = %error, "unobserved codec failure");
            }
            return;
        }
        for (_, observer) in &mut self.observers {
            observer(error);
        }
    }

    /// Encodes `record`, reporting any failure instead of returning it.
    ///
    /// Returns true on success, including the no-op case of an absent writer.
    pub fn encode<R: WireRecord>(
        &mut self,
        record: &R,
        writer: Option<&mut dyn WireWriter>,
    ) -> bool {
        match record.encode(writer) {
            Ok(_) => true,
            Err(e) => {
                self.report(R::NAME, &e);
                false
            }
        }
    }

    /// Decodes into `record`, reporting any failure instead of returning it.
    ///
    /// Returns true on success. After a reported failure the record may be
    /// partially populated and should be discarded.
    pub fn decode_into<R: WireRecord>(
        &mut self,
        record: &mut R,
        reader: Option<&mut dyn WireReader>,
    ) -> bool {
        match record.decode_into(reader) {
            Ok(()) => true,
            Err(e) => {
                self.report(R::NAME, &e);
                false
            }
        }
    }
}

impl fmt::Debug for FailureChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureChannel")
            .field("observers", &self.observers.len())
            .field("reported", &self.reported)
            .finish()
    }
}

/// A record bundled with its own failure channel.
///
/// `marshal` and `unmarshal` never return errors; failures go to the
/// channel's observers. Equality compares the wrapped records only.
#[derive(Default)]
pub struct Observed<R: WireRecord> {
    record: R,
    failures: FailureChannel,
}

impl<R: WireRecord> Observed<R> {
    /// Wraps a record with an empty failure channel.
    pub fn new(record: R) -> Self {
        Self {
            record,
            failures: FailureChannel::new(),
        }
    }

    /// Registers a failure observer; see [`FailureChannel::subscribe`].
    pub fn on_failure<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&CodecError) + Send + 'static,
    {
        self.failures.subscribe(observer)
    }

    /// Returns the failure channel.
    pub fn failures(&mut self) -> &mut FailureChannel {
        &mut self.failures
    }

    /// Marshals the record. Returns false if a failure was reported.
    pub fn marshal(&mut self, writer: Option<&mut dyn WireWriter>) -> bool {
        self.failures.encode(&self.record, writer)
    }

    /// Unmarshals into the record. Returns false if a failure was reported.
    pub fn unmarshal(&mut self, reader: Option<&mut dyn WireReader>) -> bool {
        self.failures.decode_into(&mut self.record, reader)
    }

    /// Returns the wrapped record.
    pub fn record(&self) -> &R {
        &self.record
    }

    /// Unwraps the record, dropping the channel.
    pub fn into_inner(self) -> R {
        self.record
    }
}

impl<R: WireRecord> From<R> for Observed<R> {
    fn from(record: R) -> Self {
        Self::new(record)
    }
}

impl<R: WireRecord> Deref for Observed<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

impl<R: WireRecord> DerefMut for Observed<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.record
    }
}

impl<R: WireRecord> PartialEq for Observed<R> {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl<R: WireRecord> Eq for Observed<R> {}

impl<R: WireRecord> fmt::Debug for Observed<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observed")
            .field("record", &self.record)
            .field("failures", &self.failures)
            .finish()
    }
}
