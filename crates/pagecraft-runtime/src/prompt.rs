// crates/pagecraft-runtime/src/prompt.rs
use tracing::{info, warn};

/// Blocking questions and notices the session needs from the user.
pub trait UserPrompt {
    /// Yes/no question. `false` cancels whatever asked.
    fn confirm(&mut self, message: &str) -> bool;
    fn notify_error(&mut self, message: &str);
}

/// Answers every question the same way and logs notices. Useful for headless
/// hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    pub answer: bool,
    pub questions: Vec<String>,
    pub errors: Vec<String>,
}

impl ScriptedPrompt {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        info!("Confirm: {} -> {}", message, self.answer);
        self.questions.push(message.to_string());
        self.answer
    }

    fn notify_error(&mut self, message: &str) {
        warn!("{}", message);
        self.errors.push(message.to_string());
    }
}
