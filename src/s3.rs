//! Defines the conversion strategies for storage-change notifications
//! and their configuration-validated adapter constructors. A change
//! can be surfaced as bare metadata, as the changed object's content,
//! or as that content parsed as JSON.

use crate::adapter::EventAdapter;
use crate::convert::InputConverter;
use crate::error::AdapterError;
use crate::store::ObjectStore;
use aws_lambda_events::event::s3::S3EventRecord;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

/// Metadata describing one storage-change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectChange {
    pub bucket: String,
    pub key: String,
    pub event_name: String,
}

impl ObjectChange {
    fn from_record(record: S3EventRecord) -> Result<Self, AdapterError> {
        let bucket = record
            .s3
            .bucket
            .name
            .ok_or(AdapterError::MalformedRecord("a bucket name"))?;
        let key = record
            .s3
            .object
            .key
            .ok_or(AdapterError::MalformedRecord("an object key"))?;
        Ok(ObjectChange {
            bucket,
            key,
            event_name: record.event_name.unwrap_or_default(),
        })
    }
}

/// Passes the change metadata through without touching storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct S3EventConverter;

impl InputConverter for S3EventConverter {
    type Record = S3EventRecord;
    type Output = ObjectChange;

    async fn convert(&self, record: S3EventRecord) -> Result<ObjectChange, AdapterError> {
        ObjectChange::from_record(record)
    }
}

/// Fetches the changed object and yields its raw content.
pub struct S3StreamConverter<S> {
    store: S,
}

impl<S: ObjectStore> InputConverter for S3StreamConverter<S> {
    type Record = S3EventRecord;
    type Output = Bytes;

    async fn convert(&self, record: S3EventRecord) -> Result<Bytes, AdapterError> {
        let change = ObjectChange::from_record(record)?;
        self.store.fetch(&change.bucket, &change.key).await
    }
}

/// Fetches the changed object and parses its content as JSON.
pub struct S3JsonConverter<S> {
    store: S,
}

impl<S: ObjectStore> InputConverter for S3JsonConverter<S> {
    type Record = S3EventRecord;
    type Output = Value;

    async fn convert(&self, record: S3EventRecord) -> Result<Value, AdapterError> {
        let change = ObjectChange::from_record(record)?;
        let content = self.store.fetch(&change.bucket, &change.key).await?;
        Ok(serde_json::from_slice(&content)?)
    }
}

/// Configuration for the storage-change adapters. The storage client
/// is injected here by the caller; the content-fetching strategies
/// refuse to build without one.
pub struct S3AdapterConfig<S> {
    pub store: Option<S>,
}

impl<S> S3AdapterConfig<S> {
    pub fn with_store(store: S) -> Self {
        S3AdapterConfig { store: Some(store) }
    }

    fn require_store(self) -> Result<S, AdapterError> {
        self.store
            .ok_or(AdapterError::Configuration("a storage client"))
    }
}

impl<S> Default for S3AdapterConfig<S> {
    fn default() -> Self {
        S3AdapterConfig { store: None }
    }
}

/// Builds an adapter that hands change metadata to the handler
/// without any storage call.
pub fn event_only_adapter<H>(handler: H) -> EventAdapter<S3EventConverter, H> {
    EventAdapter::new(S3EventConverter, handler)
}

/// Builds an adapter that hands each changed object's raw content to
/// the handler. Fails when no storage client was configured.
pub fn stream_adapter<S, H>(
    config: S3AdapterConfig<S>,
    handler: H,
) -> Result<EventAdapter<S3StreamConverter<S>, H>, AdapterError> {
    let store = config.require_store()?;
    Ok(EventAdapter::new(S3StreamConverter { store }, handler))
}

/// Builds an adapter that hands each changed object's content, parsed
/// as JSON, to the handler. Fails when no storage client was
/// configured.
pub fn json_adapter<S, H>(
    config: S3AdapterConfig<S>,
    handler: H,
) -> Result<EventAdapter<S3JsonConverter<S>, H>, AdapterError> {
    let store = config.require_store()?;
    Ok(EventAdapter::new(S3JsonConverter { store }, handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Handler;
    use crate::store::MockObjectStore;
    use anyhow::Result;
    use aws_lambda_events::event::s3::S3Event;
    use mockall::predicate::eq;
    use serde_json::json;

    fn s3_record(bucket: &str, key: &str) -> serde_json::Value {
        json!({
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventTime": "2019-09-03T19:37:27.192Z",
            "eventName": "ObjectCreated:Put",
            "userIdentity": {"principalId": "AWS:AIDAINPONIXQXHT3IKHL2"},
            "requestParameters": {"sourceIPAddress": "205.255.255.255"},
            "responseElements": {
                "x-amz-request-id": "D82B88E5F771F645",
                "x-amz-id-2": "vlR7PnpV2Ce81l0PRw6jlUpck7Jo5ZsQjryTjKlc5aLW"
            },
            "s3": {
                "s3SchemaVersion": "1.0",
                "configurationId": "828aa6fc-f7b5-4305-8584-487c791949c1",
                "bucket": {
                    "name": bucket,
                    "ownerIdentity": {"principalId": "A3I5XTEXAMAI3E"},
                    "arn": format!("arn:aws:s3:::{}", bucket)
                },
                "object": {
                    "key": key,
                    "size": 1305107,
                    "eTag": "b21b84d653bb07b05b1e6b33684dc11b",
                    "sequencer": "0C0F6F405D6ED209E1"
                }
            }
        })
    }

    fn s3_event(records: Vec<serde_json::Value>) -> S3Event {
        serde_json::from_value(json!({ "Records": records }))
            .expect("sample S3 event should deserialize")
    }

    /// Hands the converted batch straight back.
    struct Collect;

    impl<T> Handler<T, ()> for Collect {
        type Output = Vec<T>;

        async fn run(&self, records: Vec<T>, _cx: &()) -> Result<Vec<T>> {
            Ok(records)
        }
    }

    #[tokio::test]
    async fn event_only_yields_metadata_without_touching_storage() {
        let adapter = event_only_adapter(Collect);
        let changes = adapter
            .handle(s3_event(vec![s3_record("b", "k")]), &())
            .await
            .unwrap();
        assert_eq!(
            changes,
            vec![ObjectChange {
                bucket: "b".to_string(),
                key: "k".to_string(),
                event_name: "ObjectCreated:Put".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn a_record_without_a_bucket_name_is_malformed() {
        let mut record = s3_record("b", "k");
        record["s3"]["bucket"]["name"] = serde_json::Value::Null;
        let adapter = event_only_adapter(Collect);
        let error = adapter
            .handle(s3_event(vec![record]), &())
            .await
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<AdapterError>(),
            Some(AdapterError::MalformedRecord(_))
        ));
    }

    #[tokio::test]
    async fn stream_strategy_yields_the_fetched_content() {
        let mut store = MockObjectStore::new();
        store
            .expect_fetch()
            .with(eq("b"), eq("k"))
            .times(1)
            .returning(|_, _| Ok(Bytes::from_static(b"raw content")));
        let adapter = stream_adapter(S3AdapterConfig::with_store(store), Collect).unwrap();
        let contents = adapter
            .handle(s3_event(vec![s3_record("b", "k")]), &())
            .await
            .unwrap();
        assert_eq!(contents, vec![Bytes::from_static(b"raw content")]);
    }

    #[tokio::test]
    async fn json_strategy_round_trips_the_stored_object() {
        let stored = json!({"eventType": "accepted", "total": 12.5, "items": ["a", "b"]});
        let serialized = serde_json::to_vec(&stored).unwrap();
        let mut store = MockObjectStore::new();
        store
            .expect_fetch()
            .with(eq("b"), eq("k"))
            .times(1)
            .returning(move |_, _| Ok(Bytes::from(serialized.clone())));
        let adapter = json_adapter(S3AdapterConfig::with_store(store), Collect).unwrap();
        let parsed = adapter
            .handle(s3_event(vec![s3_record("b", "k")]), &())
            .await
            .unwrap();
        assert_eq!(parsed, vec![stored]);
    }

    #[tokio::test]
    async fn json_strategy_reports_unparsable_content() {
        let mut store = MockObjectStore::new();
        store
            .expect_fetch()
            .returning(|_, _| Ok(Bytes::from_static(b"not json")));
        let adapter = json_adapter(S3AdapterConfig::with_store(store), Collect).unwrap();
        let error = adapter
            .handle(s3_event(vec![s3_record("b", "k")]), &())
            .await
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<AdapterError>(),
            Some(AdapterError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn fetch_failures_carry_the_object_coordinates() {
        let mut store = MockObjectStore::new();
        store.expect_fetch().returning(|bucket, key| {
            Err(AdapterError::Fetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source: "no such key".into(),
            })
        });
        let adapter = stream_adapter(S3AdapterConfig::with_store(store), Collect).unwrap();
        let error = adapter
            .handle(s3_event(vec![s3_record("b", "k")]), &())
            .await
            .unwrap_err();
        match error.downcast_ref::<AdapterError>() {
            Some(AdapterError::Fetch { bucket, key, .. }) => {
                assert_eq!(bucket, "b");
                assert_eq!(key, "k");
            }
            other => panic!("expected a fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn content_strategies_refuse_to_build_without_a_store() {
        let stream = stream_adapter(S3AdapterConfig::<MockObjectStore>::default(), Collect);
        assert!(matches!(
            stream.map(|_| ()),
            Err(AdapterError::Configuration(_))
        ));
        let json = json_adapter(S3AdapterConfig::<MockObjectStore>::default(), Collect);
        assert!(matches!(
            json.map(|_| ()),
            Err(AdapterError::Configuration(_))
        ));
    }
}
