//! Per-subscriber state held for the lifetime of the process.
//!
//! The [`SessionStore`] maps each chat to its [`Subscriber`] record. Each
//! subscriber owns its own [`TopicSet`]; nothing is shared between chats.
//! The store is internally locked so triggers from different chats can
//! mutate it concurrently.

mod topics;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Mutex, MutexGuard};

pub use topics::{
    slugify, TopicError, TopicFeedBaseError, TopicFeeds, TopicSet, DEFAULT_TOPIC_FEED_BASE,
};

/// Identifies a subscriber and the chat its messages go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    pub chat_id: ChatId,
    pub topics: TopicSet,
}

impl Subscriber {
    fn new(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            topics: TopicSet::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    subscribers: Mutex<HashMap<ChatId, Subscriber>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Every write is a single insert, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<ChatId, Subscriber>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a chat as a subscriber. Returns `true` if it was new.
    pub fn register(&self, chat_id: ChatId) -> bool {
        let mut subscribers = self.lock();
        if subscribers.contains_key(&chat_id) {
            return false;
        }
        subscribers.insert(chat_id, Subscriber::new(chat_id));
        tracing::info!(chat_id = %chat_id, "New subscriber");
        true
    }

    /// Whether the chat has registered or added a topic.
    pub fn is_registered(&self, chat_id: ChatId) -> bool {
        self.lock().contains_key(&chat_id)
    }

    /// Adds a topic for `chat_id`, registering the chat if needed.
    ///
    /// On [`TopicError::Empty`] the store is left unchanged.
    pub fn add_topic(&self, chat_id: ChatId, raw: &str) -> Result<String, TopicError> {
        let mut subscribers = self.lock();
        let label = match subscribers.get_mut(&chat_id) {
            Some(subscriber) => subscriber.topics.add(raw)?,
            None => {
                let mut subscriber = Subscriber::new(chat_id);
                let label = subscriber.topics.add(raw)?;
                subscribers.insert(chat_id, subscriber);
                label
            }
        };
        tracing::debug!(chat_id = %chat_id, topic = %label, "Topic added");
        Ok(label)
    }

    /// The chat's topics; empty for an unknown chat.
    pub fn list_topics(&self, chat_id: ChatId) -> HashSet<String> {
        self.lock()
            .get(&chat_id)
            .map(|s| s.topics.as_set().clone())
            .unwrap_or_default()
    }

    /// The chat's topics in display order.
    pub fn sorted_topics(&self, chat_id: ChatId) -> Vec<String> {
        self.lock()
            .get(&chat_id)
            .map(|s| s.topics.sorted().into_iter().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Snapshot of every known chat, in ascending id order.
    pub fn subscribers(&self) -> Vec<ChatId> {
        let mut ids: Vec<ChatId> = self.lock().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of known subscribers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
