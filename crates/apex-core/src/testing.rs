//! Fakes shared by the core's unit tests.

use std::{collections::HashSet, sync::Mutex};

use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{port::MessagingPort, types::OutgoingMessage},
    ports::{FeedEntry, FeedSource},
    Result,
};

#[derive(Default)]
pub struct FakeFeed {
    pub entries: Mutex<Vec<FeedEntry>>,
    pub fail: bool,
}

#[async_trait]
impl FeedSource for FakeFeed {
    async fn fetch(&self) -> Result<Vec<FeedEntry>> {
        if self.fail {
            return Err(Error::Feed("connection reset".to_string()));
        }
        Ok(self.entries.lock().unwrap().clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sent {
    Send(ChatId, OutgoingMessage),
    Reply(MessageRef, OutgoingMessage),
    Edit(MessageRef, OutgoingMessage),
    Answer(String),
}

#[derive(Default)]
pub struct FakeMessenger {
    next_id: Mutex<i32>,
    log: Mutex<Vec<Sent>>,
    failing: Mutex<HashSet<ChatId>>,
}

impl FakeMessenger {
    /// Every delivery into `chat` fails from now on.
    pub fn fail_chat(&self, chat: ChatId) {
        self.failing.lock().unwrap().insert(chat);
    }

    pub fn log(&self) -> Vec<Sent> {
        self.log.lock().unwrap().clone()
    }

    /// Chats that received a `send` (not replies or edits), in order.
    pub fn sent_to(&self) -> Vec<ChatId> {
        self.log()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Send(chat, _) => Some(chat),
                _ => None,
            })
            .collect()
    }

    pub fn sent_messages(&self) -> Vec<OutgoingMessage> {
        self.log()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Send(_, m) | Sent::Reply(_, m) | Sent::Edit(_, m) => Some(m),
                Sent::Answer(_) => None,
            })
            .collect()
    }

    fn check(&self, chat: ChatId) -> Result<()> {
        if self.failing.lock().unwrap().contains(&chat) {
            return Err(Error::Delivery(format!("chat {chat} not found")));
        }
        Ok(())
    }

    fn alloc(&self, chat_id: ChatId) -> MessageRef {
        let mut guard = self.next_id.lock().unwrap();
        *guard += 1;
        MessageRef {
            chat_id,
            message_id: MessageId(*guard),
        }
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    async fn send(&self, chat_id: ChatId, msg: &OutgoingMessage) -> Result<MessageRef> {
        self.check(chat_id)?;
        self.log
            .lock()
            .unwrap()
            .push(Sent::Send(chat_id, msg.clone()));
        Ok(self.alloc(chat_id))
    }

    async fn reply(&self, to: MessageRef, msg: &OutgoingMessage) -> Result<MessageRef> {
        self.check(to.chat_id)?;
        self.log.lock().unwrap().push(Sent::Reply(to, msg.clone()));
        Ok(self.alloc(to.chat_id))
    }

    async fn edit(&self, target: MessageRef, msg: &OutgoingMessage) -> Result<()> {
        self.check(target.chat_id)?;
        self.log
            .lock()
            .unwrap()
            .push(Sent::Edit(target, msg.clone()));
        Ok(())
    }

    async fn answer_callback_query(&self, callback_id: &str, _text: Option<&str>) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(Sent::Answer(callback_id.to_string()));
        Ok(())
    }
}
