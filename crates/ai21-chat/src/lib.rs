//! ai21-chat - Chat message adapters for the AI21 Studio J2 and Jamba APIs.
//!
//! Conversations are built from neutral [`message::ChatMessage`] values and
//! converted into one of the provider's two wire formats by a [`chat::Chat`]
//! adapter. The adapter then calls an [`client::Ai21Client`] and hands back
//! the first completion as a neutral assistant message.

pub mod chat;
pub mod client;
pub mod config;
pub mod message;
