// src/store.rs
//! Read-side seam to the metrics store. The store itself (and its query
//! language) is an external collaborator; the pipeline only needs one
//! identity read per request.

use std::collections::HashMap;

use anyhow::Result;

use crate::snapshot::TopicRecord;

#[async_trait::async_trait]
pub trait TopicStore: Send + Sync {
    /// Resolve a topic id to its identity row. `Ok(None)` means the topic is
    /// absent, which short-circuits the whole pipeline.
    async fn read(&self, topic_id: u64) -> Result<Option<TopicRecord>>;
}

/// Map-backed store for demos and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    topics: HashMap<u64, TopicRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topic(mut self, topic_id: u64, record: TopicRecord) -> Self {
        self.topics.insert(topic_id, record);
        self
    }
}

#[async_trait::async_trait]
impl TopicStore for InMemoryStore {
    async fn read(&self, topic_id: u64) -> Result<Option<TopicRecord>> {
        Ok(self.topics.get(&topic_id).cloned())
    }
}
