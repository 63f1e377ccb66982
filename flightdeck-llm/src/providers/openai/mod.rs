//! OpenAI-compatible chat-completions provider

mod chat;
mod client;
mod types;

pub use chat::OpenAiChatProvider;
pub use client::OpenAiClient;
