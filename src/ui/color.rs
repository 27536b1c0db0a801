//! Color, emoji, and formatting utilities for terminal output

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";

    pub const BRIGHT_RED: &'static str = "\x1b[91m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &'static str = "\x1b[93m";
    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
    pub const BRIGHT_WHITE: &'static str = "\x1b[97m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Bold label followed by a highlighted value, e.g. `Concurrency: 10`
pub fn label_value(label: &str, value: &str) -> String {
    let label_style = format!("{}{}", Colors::BOLD, Colors::BRIGHT_CYAN);
    format!(
        "{}: {}",
        colorize(label, &label_style),
        colorize(value, Colors::BRIGHT_WHITE)
    )
}

/// Terminal capability detection
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Disable formatting when running tests
    if cfg!(test) || env::var("RUST_TEST_TIME_UNIT").is_ok() {
        return false;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) if term == "dumb" || term.is_empty() => false,
        Ok(term) => {
            term.contains("color")
                || term.contains("256")
                || term.starts_with("xterm")
                || term.starts_with("screen")
                || term.starts_with("tmux")
                || term == "linux"
        }
        Err(_) => matches!(
            env::var("TERM_PROGRAM").as_deref(),
            Ok("Apple_Terminal" | "iTerm.app" | "vscode" | "Alacritty" | "kitty" | "WezTerm")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_is_plain_under_test() {
        assert_eq!(colorize("test", Colors::RED), "test");
        assert_eq!(colorize("", Colors::GREEN), "");
        assert_eq!(
            colorize("Mozilla/5.0 (X11; Linux x86_64)", Colors::BRIGHT_CYAN),
            "Mozilla/5.0 (X11; Linux x86_64)"
        );
    }

    #[test]
    fn test_label_value_plain() {
        let rendered = label_value("Concurrency", "10");
        assert_eq!(rendered, "Concurrency: 10");
        assert!(!rendered.contains('\x1b'));
    }

    #[test]
    fn test_supports_formatting_disabled_in_tests() {
        assert!(!supports_formatting());
    }

    #[test]
    fn test_color_constants_are_escape_sequences() {
        let constants = [
            Colors::RESET,
            Colors::BOLD,
            Colors::RED,
            Colors::GREEN,
            Colors::YELLOW,
            Colors::BRIGHT_RED,
            Colors::BRIGHT_GREEN,
            Colors::BRIGHT_YELLOW,
            Colors::BRIGHT_CYAN,
            Colors::BRIGHT_WHITE,
        ];

        let mut unique = std::collections::HashSet::new();
        for constant in constants {
            assert!(constant.starts_with('\x1b'));
            assert!(unique.insert(constant), "duplicate color constant");
        }
    }
}
