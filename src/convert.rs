//! Defines the input converter capability and the JSON body
//! converters for queue, notification and stream records.

use crate::error::AdapterError;
use aws_lambda_events::event::kinesis::KinesisEventRecord;
use aws_lambda_events::event::sns::SnsRecord;
use aws_lambda_events::event::sqs::SqsMessage;
use serde_json::Value;

/// A capability that turns one raw provider record into the value the
/// handler will receive. Conversion may perform I/O (the storage
/// converters do), so it is asynchronous.
pub trait InputConverter {
    type Record;
    type Output;

    async fn convert(&self, record: Self::Record) -> Result<Self::Output, AdapterError>;
}

/// Parses the body of an SQS message as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqsJsonConverter;

impl InputConverter for SqsJsonConverter {
    type Record = SqsMessage;
    type Output = Value;

    async fn convert(&self, record: SqsMessage) -> Result<Value, AdapterError> {
        let body = record
            .body
            .ok_or(AdapterError::MalformedRecord("an SQS message body"))?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Parses the message of an SNS notification as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnsJsonConverter;

impl InputConverter for SnsJsonConverter {
    type Record = SnsRecord;
    type Output = Value;

    async fn convert(&self, record: SnsRecord) -> Result<Value, AdapterError> {
        Ok(serde_json::from_str(&record.sns.message)?)
    }
}

/// Parses the data of a Kinesis record as JSON. The record data
/// arrives base64-encoded on the wire and is already decoded by the
/// event deserializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct KinesisJsonConverter;

impl InputConverter for KinesisJsonConverter {
    type Record = KinesisEventRecord;
    type Output = Value;

    async fn convert(&self, record: KinesisEventRecord) -> Result<Value, AdapterError> {
        Ok(serde_json::from_slice(record.kinesis.data.as_slice())?)
    }
}
