use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(80);

pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(TICK);
    spinner
}

/// Show a spinner while `fut` runs, clearing it afterwards.
pub async fn with_spinner<F: Future>(message: impl Into<String>, fut: F) -> F::Output {
    let spinner = create_spinner(message);
    let output = fut.await;
    spinner.finish_and_clear();
    output
}
