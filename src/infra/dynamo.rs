use std::collections::HashMap;

use anyhow::Result;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::feedback::{FeedbackRecord, FeedbackStore};

/// Writes feedback records to a DynamoDB table keyed by `feedbackId`.
#[derive(Clone)]
pub struct DynamoFeedbackStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoFeedbackStore {
    pub fn new(config: &aws_config::SdkConfig, table_name: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_dynamodb::Client::new(config),
            table_name: table_name.into(),
        }
    }
}

#[async_trait::async_trait]
impl FeedbackStore for DynamoFeedbackStore {
    #[tracing::instrument(skip(self, record), fields(table = %self.table_name, feedback_id = %record.feedback_id))]
    async fn put(&self, record: &FeedbackRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(record)))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("DynamoDB PutItem failed: {}", DisplayErrorContext(&e)))?;

        Ok(())
    }
}

/// Converts a record into DynamoDB attributes. Every field is a scalar; the
/// comment attribute is omitted when there is no comment.
pub fn to_item(record: &FeedbackRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::from([
        ("feedbackId".to_string(), AttributeValue::S(record.feedback_id.clone())),
        ("sessionId".to_string(), AttributeValue::S(record.session_id.clone())),
        ("message".to_string(), AttributeValue::S(record.message.clone())),
        ("userId".to_string(), AttributeValue::S(record.user_id.clone())),
        (
            "feedbackType".to_string(),
            AttributeValue::S(record.feedback_type.as_str().to_string()),
        ),
        ("timestamp".to_string(), AttributeValue::N(record.timestamp.to_string())),
    ]);

    if let Some(comment) = record.comment.as_ref().filter(|c| !c.is_empty()) {
        item.insert("comment".to_string(), AttributeValue::S(comment.clone()));
    }

    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackType;

    fn record(comment: Option<&str>) -> FeedbackRecord {
        FeedbackRecord {
            feedback_id: "f-1".into(),
            session_id: "abc-123".into(),
            message: "Hi".into(),
            user_id: "user1".into(),
            feedback_type: FeedbackType::Negative,
            timestamp: 1_700_000_000_123,
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn test_item_attributes() {
        let item = to_item(&record(Some("wrong answer")));

        assert_eq!(item.len(), 7);
        assert_eq!(item["feedbackId"], AttributeValue::S("f-1".into()));
        assert_eq!(item["userId"], AttributeValue::S("user1".into()));
        assert_eq!(item["feedbackType"], AttributeValue::S("negative".into()));
        assert_eq!(item["timestamp"], AttributeValue::N("1700000000123".into()));
        assert_eq!(item["comment"], AttributeValue::S("wrong answer".into()));
    }

    #[test]
    fn test_item_omits_missing_comment() {
        assert!(!to_item(&record(None)).contains_key("comment"));
        assert!(!to_item(&record(Some(""))).contains_key("comment"));
    }
}
