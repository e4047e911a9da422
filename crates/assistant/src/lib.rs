//! Chat-completions integration for the warranty assistant.
//!
//! The completion service is an opaque collaborator: [`client`] forwards a
//! message list and returns the reply text with no interpretation, and
//! [`prompt`] builds that message list (system context line + recent
//! history) as pure, clock-free functions.

pub mod client;
pub mod prompt;

pub use client::{AssistantClient, AssistantConfig, AssistantError, ChatMessage};
