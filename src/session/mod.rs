//! Conversation session - append-only chat log and dispatch over it

pub mod dispatch;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{GenerationConfig, PhotoshootConfig};
use crate::error::AppError;
use crate::gateway::Gateway;
use crate::profiles::ProfileStore;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

/// Lifecycle of a model message: inserted as a loading placeholder,
/// terminal once done or errored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Loading,
    Error,
    Done,
}

/// One entry of the chat feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    /// Image data URIs attached to the message
    #[serde(default)]
    pub images: Vec<String>,
    pub status: MessageStatus,
}

/// Append-only ordered log of exchanged messages. Messages are never
/// deleted; placeholders are mutated in place by id.
#[derive(Default)]
pub struct ChatLog {
    messages: RwLock<Vec<ChatMessage>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the user message plus its loading placeholder. Returns the
    /// placeholder's id for later updates.
    pub fn push_pair(&self, user_text: &str, user_images: Vec<String>, loading_text: &str) -> String {
        let user_message = ChatMessage {
            id: format!("user-{}", Uuid::new_v4()),
            role: Role::User,
            text: user_text.to_string(),
            images: user_images,
            status: MessageStatus::Done,
        };
        let model_id = format!("model-{}", Uuid::new_v4());
        let placeholder = ChatMessage {
            id: model_id.clone(),
            role: Role::Model,
            text: loading_text.to_string(),
            images: Vec::new(),
            status: MessageStatus::Loading,
        };
        let mut messages = self.messages.write();
        messages.push(user_message);
        messages.push(placeholder);
        model_id
    }

    /// Append a standalone model message (system notices).
    pub fn push_notice(&self, text: &str) {
        self.messages.write().push(ChatMessage {
            id: format!("sys-{}", Uuid::new_v4()),
            role: Role::Model,
            text: text.to_string(),
            images: Vec::new(),
            status: MessageStatus::Done,
        });
    }

    /// Mutate a message in place by id.
    pub fn update(&self, id: &str, apply: impl FnOnce(&mut ChatMessage)) -> bool {
        let mut messages = self.messages.write();
        match messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                apply(message);
                true
            }
            None => false,
        }
    }

    /// Mark a placeholder resolved with its final text and images.
    pub fn set_done(&self, id: &str, text: String, images: Vec<String>) {
        self.update(id, |m| {
            m.text = text;
            m.images = images;
            m.status = MessageStatus::Done;
        });
    }

    /// Replace a placeholder with a terminal error text.
    pub fn set_error(&self, id: &str, text: String) {
        self.update(id, |m| {
            m.text = text;
            m.status = MessageStatus::Error;
        });
    }

    /// Progress update while the placeholder is still loading.
    pub fn set_progress(&self, id: &str, text: Option<String>, images: Option<Vec<String>>) {
        self.update(id, |m| {
            if let Some(text) = text {
                m.text = text;
            }
            if let Some(images) = images {
                m.images = images;
            }
            m.status = MessageStatus::Loading;
        });
    }

    pub fn get(&self, id: &str) -> Option<ChatMessage> {
        self.messages.read().iter().find(|m| m.id == id).cloned()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

/// Outcome of a submission: the placeholder's id plus the error, if the
/// request failed. The error text is already recorded in the message; the
/// typed error lets callers run credential recovery.
#[derive(Debug)]
pub struct SendOutcome {
    pub message_id: String,
    pub error: Option<AppError>,
}

/// Top-level session: owns the chat log and the mutable generation config,
/// shares the profile store, and dispatches prompts through the gateway.
pub struct Session {
    pub(crate) gateway: Gateway,
    pub(crate) profiles: Arc<ProfileStore>,
    pub(crate) log: ChatLog,
    generation: RwLock<GenerationConfig>,
    pub(crate) shot_delay: Duration,
    pub(crate) default_shots: u32,
}

impl Session {
    pub fn new(
        gateway: Gateway,
        profiles: Arc<ProfileStore>,
        generation: GenerationConfig,
        photoshoot: &PhotoshootConfig,
    ) -> Self {
        Self {
            gateway,
            profiles,
            log: ChatLog::new(),
            generation: RwLock::new(generation),
            shot_delay: Duration::from_millis(photoshoot.shot_delay_ms),
            default_shots: photoshoot.default_shots,
        }
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn generation_config(&self) -> GenerationConfig {
        self.generation.read().clone()
    }

    pub fn set_generation_config(&self, config: GenerationConfig) {
        *self.generation.write() = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pair_creates_loading_placeholder() {
        let log = ChatLog::new();
        let id = log.push_pair("oi", vec![], "");
        let messages = log.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].status, MessageStatus::Done);
        assert_eq!(messages[1].id, id);
        assert_eq!(messages[1].role, Role::Model);
        assert_eq!(messages[1].status, MessageStatus::Loading);
    }

    #[test]
    fn test_updates_address_only_their_message() {
        let log = ChatLog::new();
        let first = log.push_pair("a", vec![], "");
        let second = log.push_pair("b", vec![], "");

        log.set_done(&first, "done a".to_string(), vec![]);
        log.set_error(&second, "failed b".to_string());

        assert_eq!(log.get(&first).unwrap().status, MessageStatus::Done);
        assert_eq!(log.get(&second).unwrap().status, MessageStatus::Error);
        assert_eq!(log.get(&second).unwrap().text, "failed b");
        // Append-only: nothing was removed
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let log = ChatLog::new();
        assert!(!log.update("model-missing", |m| m.text.clear()));
    }
}
