use super::reply::{Payload, Reply};
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::mpsc;

/// Receiving end of a message's reply channel
pub type ReplyReceiver = mpsc::UnboundedReceiver<Reply>;

/// One-shot reply channel state
#[derive(Debug, Default)]
struct ReplyChannel {
    subscriber: Option<mpsc::UnboundedSender<Reply>>,
    closed: bool,
}

/// An inbound chat message plus the channel used to answer it.
///
/// The reply channel is open until `done` is called. After that every
/// `send` is a no-op and the subscriber sees the end of the stream.
#[derive(Debug)]
pub struct Message {
    pub id: String,
    pub channel: String,
    pub botname: String,
    pub text: String,
    pub received_at: DateTime<Utc>,
    replies: Mutex<ReplyChannel>,
}

impl Message {
    pub fn new(
        channel: impl Into<String>,
        botname: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel: channel.into(),
            botname: botname.into(),
            text: text.into(),
            received_at: Utc::now(),
            replies: Mutex::new(ReplyChannel::default()),
        }
    }

    /// Attach the (single) reply subscriber, replacing any earlier one.
    /// On a closed message the returned receiver is already finished.
    pub fn subscribe(&self) -> ReplyReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state();
        if !state.closed {
            state.subscriber = Some(tx);
        }
        rx
    }

    /// Emit one reply built from the default envelope and `payload`
    pub fn send(&self, payload: impl Into<Payload>) {
        let state = self.state();
        if state.closed {
            tracing::debug!("[{}] reply dropped, channel closed", self.channel);
            return;
        }
        let Some(subscriber) = state.subscriber.as_ref() else {
            return;
        };

        let reply = Reply::envelope(&self.channel, &self.botname).merge(payload.into());
        if subscriber.send(reply).is_err() {
            tracing::debug!("[{}] reply subscriber went away", self.channel);
        }
    }

    /// Optionally send a final reply, then close the channel for good
    pub fn done(&self, reply: Option<Payload>) {
        if let Some(payload) = reply.filter(|p| !p.is_empty()) {
            self.send(payload);
        }
        let mut state = self.state();
        state.subscriber = None;
        state.closed = true;
    }

    /// Send `reply` and close
    pub fn reply(&self, reply: impl Into<Payload>) {
        self.done(Some(reply.into()));
    }

    /// Close without replying
    pub fn close(&self) {
        self.done(None);
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    fn state(&self) -> MutexGuard<'_, ReplyChannel> {
        self.replies.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
