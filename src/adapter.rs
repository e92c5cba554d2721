//! Defines the event adapter: the binding of one input converter and
//! one handler into an entry point with the `(event, context)`
//! signature the Lambda runtime invokes.

use crate::convert::InputConverter;
use crate::event::RecordBatch;
use anyhow::Result;
use futures::future::try_join_all;
use tracing::{debug, instrument};

/// A capability invoked with the full batch of converted records and
/// a read-only context. Whatever it returns (or raises) becomes the
/// adapter's result, unmodified.
pub trait Handler<T, Cx> {
    type Output;

    async fn run(&self, records: Vec<T>, cx: &Cx) -> Result<Self::Output>;
}

/// Binds one input converter and one handler, fixed at construction.
/// Instances hold no per-invocation state and are meant to be built
/// once at startup and reused across invocations.
pub struct EventAdapter<C, H> {
    converter: C,
    handler: H,
}

impl<C, H> EventAdapter<C, H> {
    pub fn new(converter: C, handler: H) -> Self {
        EventAdapter { converter, handler }
    }

    /// Converts every record of the event concurrently and hands the
    /// results, in delivery order, to the handler. The join is
    /// fail-fast: the first conversion error aborts the invocation,
    /// the remaining in-flight conversions are dropped, and the
    /// handler is never invoked.
    #[instrument(skip_all)]
    pub async fn handle<E, Cx>(&self, event: E, cx: &Cx) -> Result<H::Output>
    where
        E: RecordBatch<Record = C::Record>,
        C: InputConverter,
        H: Handler<C::Output, Cx>,
    {
        let records = event.into_records();
        debug!("Converting {} event records", records.len());
        let converted = try_join_all(
            records
                .into_iter()
                .map(|record| self.converter.convert(record)),
        )
        .await?;
        self.handler.run(converted, cx).await
    }
}
