use std::collections::HashSet;

use crate::domain::ChatId;

/// Chats eligible for the periodic broadcast.
///
/// Populated opportunistically from group activity and pruned when delivery
/// fails. Not persisted: it starts empty after a restart and refills as
/// groups talk again.
#[derive(Debug, Default)]
pub struct AudienceRegistry {
    chats: HashSet<ChatId>,
}

impl AudienceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the chat was not registered before.
    pub fn register(&mut self, chat: ChatId) -> bool {
        self.chats.insert(chat)
    }

    /// Returns `true` if the chat was registered.
    pub fn unregister(&mut self, chat: ChatId) -> bool {
        self.chats.remove(&chat)
    }

    pub fn contains(&self, chat: ChatId) -> bool {
        self.chats.contains(&chat)
    }

    /// Snapshot for iteration, sorted so sends happen in a stable order.
    pub fn all(&self) -> Vec<ChatId> {
        let mut out: Vec<ChatId> = self.chats.iter().copied().collect();
        out.sort();
        out
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }
}
