//! Confirmation prompts before writing to composer.json

use std::io::{BufRead, IsTerminal, Write};

#[cfg(test)]
use mockall::automock;
use tracing::warn;

/// Asks the user a yes/no question
#[cfg_attr(test, automock)]
pub trait Confirmer: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}

/// Prompts on stdout and reads the answer from stdin
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, question: &str) -> bool {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = write!(stdout, "{question} [y/N] ").and_then(|_| stdout.flush()) {
            warn!("Failed to write prompt: {}", e);
            return false;
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                warn!("Failed to read answer: {}", e);
                false
            }
        }
    }
}

/// Never approves anything; used for automated runs
pub struct NonInteractive;

impl Confirmer for NonInteractive {
    fn confirm(&self, _question: &str) -> bool {
        false
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Returns true when a human can answer prompts: both stdin and stdout are
/// terminals and no CI environment is detected.
pub fn is_interactive() -> bool {
    interactive_with_env(
        std::io::stdin().is_terminal() && std::io::stdout().is_terminal(),
        std::env::var_os("CI").is_some(),
    )
}

fn interactive_with_env(is_terminal: bool, is_ci: bool) -> bool {
    is_terminal && !is_ci
}
