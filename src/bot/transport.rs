//! The boundary between the bot and a chat network.
//!
//! A real deployment implements [`Transport`] for its messaging API. The
//! crate ships [`ConsoleTransport`] for local use and [`RecordingTransport`]
//! for tests and dry runs.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::future::Future;
use std::sync::Mutex;

use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::session::ChatId;

/// One inline button under a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    /// Sends `data` back to the bot as a callback when pressed
    Callback { label: String, data: String },
    /// Opens `url` in the user's browser
    Url { label: String, url: String },
}

impl Button {
    pub fn callback(label: &str, data: impl Into<String>) -> Self {
        Button::Callback {
            label: label.to_string(),
            data: data.into(),
        }
    }

    pub fn url(label: &str, url: impl Into<String>) -> Self {
        Button::Url {
            label: label.to_string(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<Button>>,
}

impl InlineKeyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// Callback data of every callback button, in display order.
    pub fn callbacks(&self) -> Vec<&str> {
        self.buttons()
            .filter_map(|b| match b {
                Button::Callback { data, .. } => Some(data.as_str()),
                Button::Url { .. } => None,
            })
            .collect()
    }
}

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Body text, or the caption when `photo` is set
    pub text: String,
    pub photo: Option<String>,
    /// `text` is MarkdownV2 and already escaped
    pub markdown: bool,
    pub keyboard: InlineKeyboard,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            photo: None,
            markdown: false,
            keyboard: InlineKeyboard::default(),
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            markdown: true,
            ..Self::text(text)
        }
    }

    pub fn photo(image: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            photo: Some(image.into()),
            ..Self::markdown(caption)
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboard) -> Self {
        self.keyboard = keyboard;
        self
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Delivery to chat {chat_id} failed: {reason}")]
    Delivery { chat_id: ChatId, reason: String },
    #[error("Editing messages is not supported by this transport")]
    EditUnsupported,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait Transport: Send + Sync {
    /// Sends a new message to the chat.
    fn send(
        &self,
        chat_id: ChatId,
        message: &OutgoingMessage,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Replaces the message the user last interacted with.
    fn edit(
        &self,
        chat_id: ChatId,
        message: &OutgoingMessage,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Prints messages to stdout, one block per message.
///
/// Editing is not supported; the bot falls back to sending.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleTransport;

impl Transport for ConsoleTransport {
    async fn send(&self, chat_id: ChatId, message: &OutgoingMessage) -> Result<(), TransportError> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format_console(chat_id, message).as_bytes())
            .await?;
        stdout.flush().await?;
        Ok(())
    }

    async fn edit(&self, _: ChatId, _: &OutgoingMessage) -> Result<(), TransportError> {
        Err(TransportError::EditUnsupported)
    }
}

/// Renders a message as plain console text.
///
/// Callback buttons show the input that presses them, e.g. `[📰 Read] menu`.
pub fn format_console(chat_id: ChatId, message: &OutgoingMessage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "── chat {chat_id} ──");
    if let Some(photo) = &message.photo {
        let _ = writeln!(out, "🖼  {photo}");
    }
    let _ = writeln!(out, "{}", message.text);
    for row in &message.keyboard.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|button| match button {
                Button::Callback { label, data } => format!("[{label}] {data}"),
                Button::Url { label, url } => format!("[{label}] {url}"),
            })
            .collect();
        let _ = writeln!(out, "  {}", cells.join("   "));
    }
    out.push('\n');
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryKind {
    Sent,
    Edited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub chat_id: ChatId,
    pub kind: DeliveryKind,
    pub message: OutgoingMessage,
}

/// Keeps every delivered message in memory.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    deliveries: Mutex<Vec<Delivery>>,
    failing_chats: Mutex<HashSet<ChatId>>,
    reject_edits: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose `edit` always fails, like [`ConsoleTransport`].
    pub fn without_edits() -> Self {
        Self {
            reject_edits: true,
            ..Self::default()
        }
    }

    /// Makes every delivery to `chat_id` fail from now on.
    pub fn fail_chat(&self, chat_id: ChatId) {
        self.failing_chats
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(chat_id);
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn deliveries_to(&self, chat_id: ChatId) -> Vec<Delivery> {
        self.deliveries()
            .into_iter()
            .filter(|d| d.chat_id == chat_id)
            .collect()
    }

    pub fn last(&self) -> Option<Delivery> {
        self.deliveries().pop()
    }

    fn record(
        &self,
        chat_id: ChatId,
        kind: DeliveryKind,
        message: &OutgoingMessage,
    ) -> Result<(), TransportError> {
        let failing = self
            .failing_chats
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&chat_id);
        if failing {
            return Err(TransportError::Delivery {
                chat_id,
                reason: "chat unavailable".to_string(),
            });
        }
        self.deliveries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Delivery {
                chat_id,
                kind,
                message: message.clone(),
            });
        Ok(())
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, chat_id: ChatId, message: &OutgoingMessage) -> Result<(), TransportError> {
        self.record(chat_id, DeliveryKind::Sent, message)
    }

    async fn edit(&self, chat_id: ChatId, message: &OutgoingMessage) -> Result<(), TransportError> {
        if self.reject_edits {
            return Err(TransportError::EditUnsupported);
        }
        self.record(chat_id, DeliveryKind::Edited, message)
    }
}
