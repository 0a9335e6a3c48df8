//! AWS-backed implementations of the crate's storage and lookup traits.

pub mod dynamo;
pub mod keys;

use aws_config::{BehaviorVersion, Region};

/// SDK configuration and the clients built from it, created once per process
/// and handed to each component.
#[derive(Clone)]
pub struct AwsClients {
    pub config: aws_config::SdkConfig,
    pub parameters: keys::SsmParameterStore,
    pub secrets: keys::SecretsManagerStore,
}

impl AwsClients {
    /// Loads the ambient AWS configuration (credentials chain, etc.) pinned to `region`.
    pub async fn load(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            parameters: keys::SsmParameterStore::new(&config),
            secrets: keys::SecretsManagerStore::new(&config),
            config,
        }
    }

    pub fn feedback_store(&self, table_name: &str) -> dynamo::DynamoFeedbackStore {
        dynamo::DynamoFeedbackStore::new(&self.config, table_name)
    }
}
