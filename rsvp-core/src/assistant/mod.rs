//! The tour assistant: a hosted language model primed with the tour details.

mod gemini;
mod message;

pub use gemini::GeminiAssistant;
pub use message::{ChatMessage, Role};

/// A running chat, opened with the assistant's welcome line.
pub struct Conversation {
    assistant: GeminiAssistant,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(assistant: GeminiAssistant, welcome: impl Into<String>) -> Self {
        Conversation {
            assistant,
            messages: vec![ChatMessage::model(welcome)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send `prompt` with everything said so far and record both turns.
    /// Blank prompts are ignored.
    pub async fn ask(&mut self, prompt: &str) -> Option<&ChatMessage> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return None;
        }

        let reply = self.assistant.reply(&self.messages, prompt).await;
        self.messages.push(ChatMessage::user(prompt));
        self.messages.push(ChatMessage::model(reply));
        self.messages.last()
    }
}
