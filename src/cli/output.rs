use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    pub quiet_mode: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

/// Errors are never silenced; quiet mode only drops stdout chatter.
fn should_skip(kind: MessageKind, prefs: &OutputPreferences) -> bool {
    prefs.quiet_mode && !matches!(kind, MessageKind::Error)
}

/// Renders a message. Error lines keep the plain `Error: ` prefix that
/// scripts grep for.
pub fn format_message(kind: MessageKind, message: impl fmt::Display) -> String {
    match kind {
        MessageKind::Error => format!("Error: {message}"),
        MessageKind::Info => message.to_string(),
        MessageKind::Success => message.to_string().bright_green().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = preferences();
    if should_skip(kind, &prefs) {
        return;
    }
    let formatted = format_message(kind, message);
    match kind {
        MessageKind::Error => eprintln!("{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_lines_are_prefixed_and_unstyled() {
        assert_eq!(
            format_message(MessageKind::Error, "year must be a number"),
            "Error: year must be a number"
        );
    }

    #[test]
    fn quiet_mode_never_hides_errors() {
        let prefs = OutputPreferences { quiet_mode: true };
        assert!(should_skip(MessageKind::Success, &prefs));
        assert!(!should_skip(MessageKind::Error, &prefs));
    }
}
