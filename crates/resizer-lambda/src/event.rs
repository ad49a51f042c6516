//! The subset of the S3 event notification the handler reads.
//!
//! See <https://docs.aws.amazon.com/AmazonS3/latest/userguide/notification-content-structure.html>.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// An S3 event notification, as delivered to the function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecord {
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub aws_region: Option<String>,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Object {
    /// Object key, URL-encoded the way S3 delivers it (spaces as `+`).
    pub key: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub e_tag: Option<String>,
}

/// Bucket and decoded key of an object named by an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl S3Event {
    /// The object named by the first record, if any.
    ///
    /// Notifications for object creation carry a single record; any further
    /// records are ignored.
    pub fn first_object(&self) -> Option<ObjectRef> {
        let record = self.records.first()?;
        Some(ObjectRef {
            bucket: record.s3.bucket.name.clone(),
            key: decode_key(&record.s3.object.key),
        })
    }
}

/// Undo the form encoding S3 applies to keys in notifications.
///
/// Keys whose escapes don't decode to UTF-8 are returned as delivered.
pub fn decode_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match percent_decode_str(&spaced).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUT_EVENT: &str = r#"{
        "Records": [
            {
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "eu-west-1",
                "eventTime": "2024-05-01T12:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "resize",
                    "bucket": {
                        "name": "photos",
                        "arn": "arn:aws:s3:::photos"
                    },
                    "object": {
                        "key": "holiday/beach+day%281%29.jpg",
                        "size": 1024,
                        "eTag": "0123456789abcdef",
                        "sequencer": "0A1B2C3D4E5F678901"
                    }
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_put_event() {
        let event: S3Event = serde_json::from_str(PUT_EVENT).unwrap();

        assert_eq!(event.records.len(), 1);
        let record = &event.records[0];
        assert_eq!(record.event_name.as_deref(), Some("ObjectCreated:Put"));
        assert_eq!(record.aws_region.as_deref(), Some("eu-west-1"));
        assert_eq!(record.s3.bucket.name, "photos");
        assert_eq!(record.s3.object.size, Some(1024));
        assert_eq!(record.s3.object.e_tag.as_deref(), Some("0123456789abcdef"));
    }

    #[test]
    fn test_first_object_decodes_key() {
        let event: S3Event = serde_json::from_str(PUT_EVENT).unwrap();

        assert_eq!(
            event.first_object(),
            Some(ObjectRef {
                bucket: "photos".to_string(),
                key: "holiday/beach day(1).jpg".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_event() {
        let event: S3Event = serde_json::from_str("{}").unwrap();
        assert!(event.records.is_empty());
        assert_eq!(event.first_object(), None);

        let event: S3Event = serde_json::from_str(r#"{ "Records": [] }"#).unwrap();
        assert_eq!(event.first_object(), None);
    }

    #[test]
    fn test_decode_key() {
        assert_eq!(decode_key("plain.jpg"), "plain.jpg");
        assert_eq!(decode_key("a+b.jpg"), "a b.jpg");
        assert_eq!(decode_key("a%2Bb.jpg"), "a+b.jpg");
        assert_eq!(decode_key("caf%C3%A9.png"), "café.png");
    }

    #[test]
    fn test_decode_key_invalid_utf8_is_kept() {
        assert_eq!(decode_key("bad%FF.jpg"), "bad%FF.jpg");
    }
}
