use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;
use rsvp_core::app_config::AssistantConfig;
use rsvp_core::assistant::{ChatMessage, Conversation, GeminiAssistant, Role};
use rsvp_core::tour::Tour;

use crate::utils::tui;

/// One-shot question, no history.
pub async fn ask(config: &AssistantConfig, tour: &Tour, question: &str) -> Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("Ask something, e.g. `rsvp ask \"What time does the shuttle leave?\"`");
    }

    let assistant = GeminiAssistant::new(config, tour)?;
    let answer = tui::with_spinner("Thinking", assistant.reply(&[], question.trim())).await;
    println!("{}", render_message(&ChatMessage::model(answer)));

    Ok(())
}

/// Interactive chat. A blank line or `exit` ends it.
pub async fn chat(config: &AssistantConfig, tour: &Tour) -> Result<()> {
    let assistant = GeminiAssistant::new(config, tour)?;
    let mut conversation = Conversation::new(assistant, tour.welcome_message());

    if let Some(welcome) = conversation.messages().first() {
        println!("{}", render_message(welcome));
    }
    println!("{}", "Blank line or `exit` to leave.".dimmed());

    loop {
        println!();
        let prompt: String = Input::new()
            .with_prompt("  You")
            .allow_empty(true)
            .interact_text()?;

        if is_exit(&prompt) {
            break;
        }

        if let Some(reply) = tui::with_spinner("Thinking", conversation.ask(&prompt)).await {
            println!("{}", render_message(reply));
        }
    }

    Ok(())
}

fn is_exit(prompt: &str) -> bool {
    let prompt = prompt.trim();
    prompt.is_empty() || prompt.eq_ignore_ascii_case("exit") || prompt.eq_ignore_ascii_case("quit")
}

fn render_message(message: &ChatMessage) -> String {
    match message.role {
        Role::Model => format!("{} {}", "🥃".yellow(), message.text),
        Role::User => format!("{} {}", "›".dimmed(), message.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_exit() {
        assert!(is_exit(""));
        assert!(is_exit("   "));
        assert!(is_exit("exit"));
        assert!(is_exit(" EXIT "));
        assert!(!is_exit("What time is lunch?"));
    }
}
