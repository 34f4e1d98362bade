//! Append-only chat transcript.
//!
//! Every append gets the next ordinal and is published to subscribers
//! before the call returns. Messages are never edited or removed.

use std::sync::Mutex;

use awab_core::types::{Author, Timestamp};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::error::ChatError;
use crate::types::ChatMessage;

/// Buffered messages per subscriber before a slow reader starts lagging.
const SUBSCRIBER_CAPACITY: usize = 256;

/// Ordered log of user and assistant messages for one session.
pub struct Transcript {
    session_id: Uuid,
    messages: Mutex<Vec<ChatMessage>>,
    sender: broadcast::Sender<ChatMessage>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(SUBSCRIBER_CAPACITY);
        Self {
            session_id: Uuid::new_v4(),
            messages: Mutex::new(Vec::new()),
            sender,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn append_user_message(&self, text: &str) -> Result<ChatMessage, ChatError> {
        self.append(Author::User, text)
    }

    pub fn append_assistant_message(&self, text: &str) -> Result<ChatMessage, ChatError> {
        self.append(Author::Assistant, text)
    }

    fn append(&self, author: Author, text: &str) -> Result<ChatMessage, ChatError> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|e| ChatError::TranscriptUnavailable(format!("lock poisoned: {}", e)))?;

        let message = ChatMessage {
            id: Uuid::new_v4(),
            ordinal: messages.len() as u64,
            author,
            text: text.to_string(),
            created_at: Timestamp::now(),
        };
        messages.push(message.clone());

        // Published under the lock so subscribers see ordinal order.
        // No subscribers is fine.
        let _ = self.sender.send(message.clone());

        tracing::trace!(ordinal = message.ordinal, author = %author, "Message appended");
        Ok(message)
    }

    /// Receive every message appended after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatMessage> {
        self.sender.subscribe()
    }

    /// Snapshot of the whole transcript.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Messages with an ordinal greater than or equal to `ordinal`.
    pub fn since(&self, ordinal: u64) -> Vec<ChatMessage> {
        self.messages
            .lock()
            .map(|m| m.iter().skip(ordinal as usize).cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<ChatMessage> {
        self.messages.lock().ok().and_then(|m| m.last().cloned())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transcript_is_empty() {
        let t = Transcript::new();
        assert!(t.is_empty());
        assert!(t.last().is_none());
        assert_ne!(t.session_id(), Uuid::nil());
    }

    #[test]
    fn test_ordinals_increase_by_one() {
        let t = Transcript::new();
        let a = t.append_user_message("رجوع").unwrap();
        let b = t.append_assistant_message("↩️ تم الرجوع").unwrap();
        let c = t.append_user_message("هوم").unwrap();
        assert_eq!((a.ordinal, b.ordinal, c.ordinal), (0, 1, 2));
        assert_eq!(a.author, Author::User);
        assert_eq!(b.author, Author::Assistant);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_append_is_immediately_visible() {
        let t = Transcript::new();
        t.append_assistant_message("first").unwrap();
        assert_eq!(t.last().unwrap().text, "first");
        assert_eq!(t.messages()[0].text, "first");
    }

    #[test]
    fn test_since() {
        let t = Transcript::new();
        for text in ["a", "b", "c", "d"] {
            t.append_user_message(text).unwrap();
        }
        let tail: Vec<String> = t.since(2).into_iter().map(|m| m.text).collect();
        assert_eq!(tail, vec!["c", "d"]);
        assert!(t.since(10).is_empty());
    }

    #[test]
    fn test_empty_text_is_appended() {
        let t = Transcript::new();
        let msg = t.append_user_message("").unwrap();
        assert_eq!(msg.text, "");
        assert_eq!(t.len(), 1);
    }

    #[tokio::test]
    async fn test_subscriber_receives_in_order() {
        let t = Transcript::new();
        let mut rx = t.subscribe();
        t.append_user_message("one").unwrap();
        t.append_assistant_message("two").unwrap();

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.ordinal, 0);
        assert_eq!(second.ordinal, 1);
        assert_eq!(second.text, "two");
    }

    #[tokio::test]
    async fn test_subscriber_misses_earlier_messages() {
        let t = Transcript::new();
        t.append_user_message("before").unwrap();
        let mut rx = t.subscribe();
        t.append_user_message("after").unwrap();
        assert_eq!(rx.recv().await.unwrap().text, "after");
    }

    #[test]
    fn test_concurrent_appends_keep_unique_ordinals() {
        use std::sync::Arc;
        use std::thread;

        let t = Arc::new(Transcript::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let t = Arc::clone(&t);
                thread::spawn(move || {
                    for j in 0..10 {
                        t.append_user_message(&format!("{}-{}", i, j)).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let ordinals: Vec<u64> = t.messages().iter().map(|m| m.ordinal).collect();
        assert_eq!(ordinals, (0..80).collect::<Vec<u64>>());
    }
}
