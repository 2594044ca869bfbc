//! Delivery orchestration: turns chat input into articles and replies.
//!
//! The [`Bot`] owns nothing but wiring. Subscriber state lives in the
//! injected [`SessionStore`], article selection in [`ArticleSelector`], and
//! delivery behind the [`Transport`] trait.

pub mod render;
pub mod transport;

use std::sync::Arc;

use crate::feed::{ArticleSelector, Category, FeedFetch};
use crate::session::{ChatId, SessionStore, TopicError, TopicFeeds};
use transport::{OutgoingMessage, Transport, TransportError};

pub use render::DEFAULT_SUMMARY_MAX_CHARS;

/// Callback data carried by inline buttons.
pub mod callback {
    pub const MENU: &str = "menu";
    pub const BACK: &str = "back";
    pub const HINT_ADD_TOPIC: &str = "hint_addtopic";
    pub const MY_TOPICS: &str = "custom";
    pub const TOPIC_PREFIX: &str = "topic:";

    pub fn topic(label: &str) -> String {
        format!("{TOPIC_PREFIX}{label}")
    }
}

/// What a chat asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Help,
    /// `/addtopic` followed by the topic words
    AddTopic(String),
    /// `/addtopic` with nothing after it
    AddTopicUsage,
    UnknownCommand(String),
    Menu,
    Back,
    AddTopicHint,
    MyTopics,
    ShowTopic(String),
    ShowCategory(Category),
}

impl Intent {
    /// Parses a slash command such as `/addtopic ai tools`.
    ///
    /// A `@botname` suffix on the command is ignored. Arguments are split on
    /// whitespace and re-joined with single spaces.
    pub fn from_command(text: &str) -> Self {
        let mut words = text.split_whitespace();
        let command = words.next().unwrap_or_default();
        let name = command
            .strip_prefix('/')
            .unwrap_or(command)
            .split('@')
            .next()
            .unwrap_or_default();

        match name {
            "start" => Intent::Start,
            "help" => Intent::Help,
            "addtopic" => {
                let args: Vec<&str> = words.collect();
                if args.is_empty() {
                    Intent::AddTopicUsage
                } else {
                    Intent::AddTopic(args.join(" "))
                }
            }
            _ => Intent::UnknownCommand(command.to_string()),
        }
    }

    /// Parses inline button callback data.
    ///
    /// Data that matches nothing else selects from the general category.
    pub fn from_callback(data: &str) -> Self {
        if let Some(topic) = data.strip_prefix(callback::TOPIC_PREFIX) {
            return Intent::ShowTopic(topic.to_string());
        }
        match data {
            callback::MENU => Intent::Menu,
            callback::BACK => Intent::Back,
            callback::HINT_ADD_TOPIC => Intent::AddTopicHint,
            callback::MY_TOPICS => Intent::MyTopics,
            other => Intent::ShowCategory(Category::from_key(other).unwrap_or(Category::Random)),
        }
    }
}

/// Outcome of one daily broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    /// No article could be loaded for the subscriber
    pub skipped: usize,
    pub failed: usize,
}

/// Tunables the bot reads on every reply.
#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Where a subscriber's topic is looked up
    pub topic_feeds: TopicFeeds,
    /// Caption budget for an article summary, in characters
    pub summary_max_chars: usize,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            topic_feeds: TopicFeeds::default(),
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
        }
    }
}

pub struct Bot<F, T> {
    selector: ArticleSelector<F>,
    sessions: Arc<SessionStore>,
    transport: T,
    settings: BotSettings,
}

impl<F: FeedFetch, T: Transport> Bot<F, T> {
    /// Wires a bot around an existing session store.
    ///
    /// The store is shared so the binary can register the console chat up
    /// front and the scheduler can read the same subscribers.
    pub fn new(
        fetcher: F,
        transport: T,
        sessions: Arc<SessionStore>,
        settings: BotSettings,
    ) -> Self {
        Self {
            selector: ArticleSelector::new(fetcher),
            sessions,
            transport,
            settings,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handles one trigger from a chat.
    ///
    /// The chat becomes a subscriber on its first interaction. Only transport
    /// failures are returned; a missing article is answered with a reply.
    pub async fn handle(&self, chat_id: ChatId, intent: Intent) -> Result<(), TransportError> {
        self.sessions.register(chat_id);
        tracing::debug!(chat_id = %chat_id, intent = ?intent, "Handling intent");

        match intent {
            Intent::Start => self.send(chat_id, render::greeting()).await,
            Intent::Help => self.reply(chat_id, render::HELP).await,
            Intent::AddTopic(raw) => self.add_topic(chat_id, &raw).await,
            Intent::AddTopicUsage => self.reply(chat_id, render::ADD_TOPIC_USAGE).await,
            Intent::UnknownCommand(command) => {
                tracing::debug!(chat_id = %chat_id, command = %command, "Unknown command");
                self.reply(chat_id, render::UNKNOWN_COMMAND).await
            }
            Intent::Menu => {
                let has_topics = !self.sessions.list_topics(chat_id).is_empty();
                let menu = render::menu(has_topics);
                self.edit_or_send(chat_id, menu).await
            }
            Intent::Back => self.send(chat_id, render::greeting_again()).await,
            Intent::AddTopicHint => self.reply(chat_id, render::ADD_TOPIC_HINT).await,
            Intent::MyTopics => {
                let topics = render::topics(&self.sessions.sorted_topics(chat_id));
                self.edit_or_send(chat_id, topics).await
            }
            Intent::ShowTopic(topic) => self.show_topic(chat_id, &topic).await,
            Intent::ShowCategory(category) => self.show_category(chat_id, category).await,
        }
    }

    /// Sends a general-category article to every known subscriber.
    ///
    /// Works on a snapshot of the subscriber list. Each subscriber gets its
    /// own selection; a subscriber with no article is skipped and a failed
    /// delivery is logged without stopping the loop.
    pub async fn send_daily(&self) -> BroadcastReport {
        let subscribers = self.sessions.subscribers();
        let mut report = BroadcastReport::default();
        tracing::info!(subscribers = subscribers.len(), "Starting daily broadcast");

        for chat_id in subscribers {
            let Some(article) = self.selector.select(Category::Random.feeds()).await else {
                tracing::warn!(chat_id = %chat_id, "No daily article available, skipping");
                report.skipped += 1;
                continue;
            };

            let message = render::daily_article(&article, self.settings.summary_max_chars);
            match self.transport.send(chat_id, &message).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        chat_id = %chat_id,
                        error = %e,
                        "Failed to deliver daily article"
                    );
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            delivered = report.delivered,
            skipped = report.skipped,
            failed = report.failed,
            "Daily broadcast finished"
        );
        report
    }

    async fn add_topic(&self, chat_id: ChatId, raw: &str) -> Result<(), TransportError> {
        match self.sessions.add_topic(chat_id, raw) {
            Ok(label) => self.send(chat_id, render::topic_added(&label)).await,
            Err(TopicError::Empty) => self.reply(chat_id, render::EMPTY_TOPIC).await,
        }
    }

    async fn show_category(
        &self,
        chat_id: ChatId,
        category: Category,
    ) -> Result<(), TransportError> {
        let message = match self.selector.select(category.feeds()).await {
            Some(article) => render::category_article(&article, self.settings.summary_max_chars),
            None => OutgoingMessage::text(render::NOT_FOUND),
        };
        self.send(chat_id, message).await
    }

    /// A topic has exactly one feed, so a failure there has no fallback.
    async fn show_topic(&self, chat_id: ChatId, topic: &str) -> Result<(), TransportError> {
        let feed_url = self.settings.topic_feeds.feed_url(topic);
        let message = match self.selector.select(&[feed_url]).await {
            Some(article) => render::topic_article(&article, self.settings.summary_max_chars),
            None => render::topic_not_found(topic),
        };
        self.send(chat_id, message).await
    }

    async fn send(&self, chat_id: ChatId, message: OutgoingMessage) -> Result<(), TransportError> {
        self.transport.send(chat_id, &message).await
    }

    async fn reply(&self, chat_id: ChatId, text: &str) -> Result<(), TransportError> {
        self.send(chat_id, OutgoingMessage::text(text)).await
    }

    async fn edit_or_send(
        &self,
        chat_id: ChatId,
        message: OutgoingMessage,
    ) -> Result<(), TransportError> {
        match self.transport.edit(chat_id, &message).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::debug!(
                    chat_id = %chat_id,
                    error = %e,
                    "Edit failed, sending a new message"
                );
                self.transport.send(chat_id, &message).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Intent::from_command("/start"), Intent::Start);
        assert_eq!(Intent::from_command("/help"), Intent::Help);
        assert_eq!(Intent::from_command("/start@ReadBot"), Intent::Start);
        assert_eq!(Intent::from_command("/addtopic"), Intent::AddTopicUsage);
        assert_eq!(Intent::from_command("/addtopic   "), Intent::AddTopicUsage);
        assert_eq!(
            Intent::from_command("/addtopic  ai   tools "),
            Intent::AddTopic("ai tools".to_string())
        );
        assert_eq!(
            Intent::from_command("/weather"),
            Intent::UnknownCommand("/weather".to_string())
        );
    }

    #[test]
    fn test_parse_callbacks() {
        assert_eq!(Intent::from_callback("menu"), Intent::Menu);
        assert_eq!(Intent::from_callback("back"), Intent::Back);
        assert_eq!(Intent::from_callback("hint_addtopic"), Intent::AddTopicHint);
        assert_eq!(Intent::from_callback("custom"), Intent::MyTopics);
        assert_eq!(
            Intent::from_callback("topic:AI Tools"),
            Intent::ShowTopic("AI Tools".to_string())
        );
        assert_eq!(
            Intent::from_callback("devops"),
            Intent::ShowCategory(Category::DevOps)
        );
        assert_eq!(
            Intent::from_callback("setup"),
            Intent::ShowCategory(Category::Setup)
        );
        assert_eq!(
            Intent::from_callback("anything else"),
            Intent::ShowCategory(Category::Random)
        );
    }

    #[test]
    fn test_topic_callback_round_trip() {
        let data = callback::topic("c++ tips");
        assert_eq!(
            Intent::from_callback(&data),
            Intent::ShowTopic("c++ tips".to_string())
        );
    }
}
