//! Reply texts, captions and keyboards.

use crate::bot::callback;
use crate::bot::transport::{Button, InlineKeyboard, OutgoingMessage};
use crate::content::escape_markdown;
use crate::feed::{Article, Category};
use crate::util::truncate_chars;

/// Default caption budget for the article summary, in characters.
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 500;

pub const GREETING: &str = "👋 Hi!\nWant to read something interesting?";
pub const GREETING_AGAIN: &str = "👋 Hi again,\nWant to read some more?";
pub const MENU_PROMPT: &str = "📚 What are we reading today?";
pub const TOPICS_PROMPT: &str = "🎯 Your topics:";
pub const ADD_TOPIC_USAGE: &str = "✏️ Usage: /addtopic <topic>\nFor example: /addtopic ai tools";
pub const ADD_TOPIC_HINT: &str = "➕ Add a topic: /addtopic <topic>";
pub const EMPTY_TOPIC: &str = "✏️ The topic is empty. Usage: /addtopic <topic>";
pub const NOT_FOUND: &str = "❌ Could not load an article.";
pub const UNKNOWN_COMMAND: &str = "🤔 Unknown command. See /help for the list of commands.";
pub const MORNING_GREETING: &str = "☀️ Good morning!";

pub const HELP: &str = concat!(
    "📘 Commands\n\n",
    "🆕 /start: open the reading menu\n",
    "➕ /addtopic <topic>: add a topic of your own (for example /addtopic ai-tools)\n",
    "📖 /help: show this message\n\n",
    "📚 Menu categories:\n",
    "  🧠 DevOps\n",
    "  🌿 Setup\n",
    "  🎲 Random\n",
    "  🎯 My topics: the topics you added\n\n",
    "☕ A fresh article arrives every morning.",
);

pub fn greeting() -> OutgoingMessage {
    OutgoingMessage::text(GREETING).with_keyboard(read_keyboard())
}

pub fn greeting_again() -> OutgoingMessage {
    OutgoingMessage::text(GREETING_AGAIN).with_keyboard(read_keyboard())
}

fn read_keyboard() -> InlineKeyboard {
    InlineKeyboard::new(vec![vec![Button::callback("📰 Read", callback::MENU)]])
}

/// Category menu; "My topics" appears only once the subscriber has any.
pub fn menu(has_topics: bool) -> OutgoingMessage {
    let mut rows: Vec<Vec<Button>> = Category::ALL
        .into_iter()
        .map(|category| vec![Button::callback(category_label(category), category.key())])
        .collect();
    if has_topics {
        rows.push(vec![Button::callback("🎯 My topics", callback::MY_TOPICS)]);
    }
    rows.push(vec![Button::callback("↩️ Back", callback::BACK)]);
    OutgoingMessage::text(MENU_PROMPT).with_keyboard(InlineKeyboard::new(rows))
}

pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::DevOps => "🧠 DevOps",
        Category::Setup => "🌿 Setup",
        Category::Random => "🎲 Random",
    }
}

/// Topic buttons two per row, in the order given.
pub fn topics(sorted_topics: &[String]) -> OutgoingMessage {
    if sorted_topics.is_empty() {
        let keyboard = InlineKeyboard::new(vec![
            vec![Button::callback("➕ Add topic", callback::HINT_ADD_TOPIC)],
            vec![Button::callback("↩️ Back", callback::MENU)],
        ]);
        return OutgoingMessage::text(TOPICS_PROMPT).with_keyboard(keyboard);
    }

    let mut rows: Vec<Vec<Button>> = sorted_topics
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|topic| Button::callback(topic, callback::topic(topic)))
                .collect()
        })
        .collect();
    rows.push(vec![Button::callback("↩️ To menu", callback::MENU)]);
    OutgoingMessage::text(TOPICS_PROMPT).with_keyboard(InlineKeyboard::new(rows))
}

pub fn topic_added(topic: &str) -> OutgoingMessage {
    let text = format!(
        "{} *{}* {}",
        escape_markdown("✅ Topic"),
        escape_markdown(topic),
        escape_markdown("added!\nIt will appear in your topic list.")
    );
    let keyboard = InlineKeyboard::new(vec![
        vec![Button::callback("🎯 My topics", callback::MY_TOPICS)],
        vec![Button::callback("↩️ Back to menu", callback::MENU)],
    ]);
    OutgoingMessage::markdown(text).with_keyboard(keyboard)
}

pub fn topic_not_found(topic: &str) -> OutgoingMessage {
    OutgoingMessage::text(format!("❌ Could not load an article for the topic «{topic}»."))
}

/// MarkdownV2 caption: bold title, blank line, summary.
///
/// The summary is truncated to `max_summary_chars` before escaping.
pub fn article_caption(article: &Article, max_summary_chars: usize) -> String {
    let title = escape_markdown(&article.title);
    let summary = escape_markdown(&truncate_chars(&article.summary, max_summary_chars));
    format!("*{title}*\n\n💡 {summary}")
}

pub fn category_article(article: &Article, max_summary_chars: usize) -> OutgoingMessage {
    let mut rows = read_original_row(&article.link);
    rows.push(vec![Button::callback("⬅️ Back", callback::MENU)]);
    OutgoingMessage::photo(&article.image, article_caption(article, max_summary_chars))
        .with_keyboard(InlineKeyboard::new(rows))
}

pub fn topic_article(article: &Article, max_summary_chars: usize) -> OutgoingMessage {
    let mut rows = read_original_row(&article.link);
    rows.push(vec![Button::callback("⬅️ To topics", callback::MY_TOPICS)]);
    rows.push(vec![Button::callback("🏠 Menu", callback::MENU)]);
    OutgoingMessage::photo(&article.image, article_caption(article, max_summary_chars))
        .with_keyboard(InlineKeyboard::new(rows))
}

pub fn daily_article(article: &Article, max_summary_chars: usize) -> OutgoingMessage {
    let caption = format!(
        "{}\n\n{}",
        escape_markdown(MORNING_GREETING),
        article_caption(article, max_summary_chars)
    );
    let rows = if article.link.is_empty() {
        Vec::new()
    } else {
        vec![vec![Button::url("🔗 Read the article", &article.link)]]
    };
    OutgoingMessage::photo(&article.image, caption).with_keyboard(InlineKeyboard::new(rows))
}

// A URL button with an empty link is rejected by chat APIs, so it is left out.
fn read_original_row(link: &str) -> Vec<Vec<Button>> {
    if link.is_empty() {
        Vec::new()
    } else {
        vec![vec![Button::url("🔗 Read original", link)]]
    }
}
