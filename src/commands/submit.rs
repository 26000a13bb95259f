use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use rsvp_core::attendee::AttendeeDraft;
use rsvp_core::constants::MAX_PARTY_SIZE;
use rsvp_core::sync::{Delivery, SyncOrchestrator};
use rsvp_core::tour::Tour;

use crate::render::render_seats;
use crate::utils::tui;

#[derive(Args, Debug, Default)]
pub struct SubmitArgs {
    /// Full name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,

    /// Party size, including yourself
    #[arg(short, long)]
    pub guests: Option<u32>,

    /// Company (optional)
    #[arg(long)]
    pub company: Option<String>,

    /// Job title (optional)
    #[arg(long)]
    pub title: Option<String>,

    /// Dietary restrictions or notes (optional)
    #[arg(long)]
    pub dietary: Option<String>,
}

pub async fn run(sync: SyncOrchestrator, tour: &Tour, args: SubmitArgs) -> Result<()> {
    tui::with_spinner("Checking seats", sync.load()).await;
    let remaining = sync.remaining_seats().await;

    println!("{}", "Secure Your Spot".bold());
    println!("{}", render_seats(remaining));

    if remaining == 0 {
        println!();
        println!("{}", "We are currently at capacity.".bold());
        println!(
            "{}",
            format!("Contact {} to be added to the waitlist.", tour.contact).dimmed()
        );
        return Ok(());
    }

    let interactive = args.name.is_none() || args.email.is_none();
    println!();

    // --- Name ---
    let name = match args.name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("  Full Name")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Name is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };

    // --- Email ---
    let email = match args.email {
        Some(e) if is_valid_email(&e) => e,
        Some(e) => anyhow::bail!("'{}' is not a valid email address", e),
        None => Input::<String>::new()
            .with_prompt("  Email Address")
            .validate_with(|input: &String| -> Result<(), &str> {
                if is_valid_email(input) {
                    Ok(())
                } else {
                    Err("Please enter a valid email address")
                }
            })
            .interact_text()?,
    };

    let company = optional_field(args.company, "  Company (skip)", interactive)?;
    let title = optional_field(args.title, "  Title (skip)", interactive)?;

    // --- Party size ---
    let guests = match args.guests {
        Some(g) => g,
        None => prompt_party_size(remaining)?,
    };

    let dietary_notes = optional_field(args.dietary, "  Dietary restrictions (skip)", interactive)?;

    let draft = AttendeeDraft {
        name,
        email,
        company,
        title,
        guests,
        dietary_notes,
    };

    let outcome = tui::with_spinner("Processing", sync.submit(draft))
        .await
        .context("Could not complete your RSVP")?;

    println!();
    println!("{}", "Registration Confirmed!".green().bold());
    println!("We've saved a spot for you on the shuttle. See you in Kentucky!");

    match outcome.delivery {
        Delivery::Local => {}
        Delivery::Remote => {
            if let Some(reconcile) = outcome.reconcile {
                match tui::with_spinner("Syncing with the guest sheet", reconcile).await {
                    Ok(roster) if roster.contains(&outcome.attendee.id) => {
                        println!("{}", "✓ On the shared guest list".green());
                    }
                    Ok(_) => println!(
                        "{}",
                        "Sent to the guest sheet; it will show up on the next refresh.".dimmed()
                    ),
                    Err(e) => tracing::warn!(error = %e, "Reconcile task failed"),
                }
            }
        }
        Delivery::LocalFallback => println!(
            "{}",
            "The guest sheet could not be reached, so this RSVP is saved on this device only."
                .yellow()
        ),
    }

    println!("{}", render_seats(sync.remaining_seats().await));

    Ok(())
}

/// Party sizes the form offers: 1 through 4, never more than the seats left.
pub fn party_size_choices(remaining: u32) -> Vec<u32> {
    (1..=MAX_PARTY_SIZE.min(remaining)).collect()
}

fn prompt_party_size(remaining: u32) -> Result<u32> {
    let choices = party_size_choices(remaining);
    let items: Vec<String> = choices
        .iter()
        .map(|n| {
            if *n == 1 {
                "Just me".to_string()
            } else {
                format!("{} People", n)
            }
        })
        .collect();

    let selection = Select::new()
        .with_prompt("  Party Size")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(choices[selection])
}

fn optional_field(value: Option<String>, prompt: &str, interactive: bool) -> Result<Option<String>> {
    if let Some(v) = value {
        return Ok(Some(v));
    }
    if !interactive {
        return Ok(None);
    }

    let input: String = Input::new()
        .with_prompt(prompt)
        .default(String::new())
        .show_default(false)
        .interact_text()?;

    Ok(if input.trim().is_empty() { None } else { Some(input) })
}

/// Just enough to catch typos: something before and after a single `@`.
pub fn is_valid_email(input: &str) -> bool {
    match input.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("  ada@example.com "));
        assert!(!is_valid_email("ada.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("a@b@c"));
    }

    #[test]
    fn test_party_size_choices_capped_at_four() {
        assert_eq!(party_size_choices(22), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_party_size_choices_limited_by_remaining() {
        assert_eq!(party_size_choices(2), vec![1, 2]);
        assert!(party_size_choices(0).is_empty());
    }
}
