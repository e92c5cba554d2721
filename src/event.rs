//! Defines the extraction of the ordered record sequence out of each
//! supported provider event shape. The provider field names are owned
//! by `aws_lambda_events`; all that is added here is a common way to
//! take the records out.

use aws_lambda_events::event::kinesis::{KinesisEvent, KinesisEventRecord};
use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
use aws_lambda_events::event::sns::{SnsEvent, SnsRecord};
use aws_lambda_events::event::sqs::{SqsEvent, SqsMessage};

/// An event payload carrying an ordered batch of records.
pub trait RecordBatch {
    type Record;

    /// Consumes the event and yields its records in delivery order.
    fn into_records(self) -> Vec<Self::Record>;
}

impl RecordBatch for SqsEvent {
    type Record = SqsMessage;

    fn into_records(self) -> Vec<SqsMessage> {
        self.records
    }
}

impl RecordBatch for SnsEvent {
    type Record = SnsRecord;

    fn into_records(self) -> Vec<SnsRecord> {
        self.records
    }
}

impl RecordBatch for KinesisEvent {
    type Record = KinesisEventRecord;

    fn into_records(self) -> Vec<KinesisEventRecord> {
        self.records
    }
}

impl RecordBatch for S3Event {
    type Record = S3EventRecord;

    fn into_records(self) -> Vec<S3EventRecord> {
        self.records
    }
}
