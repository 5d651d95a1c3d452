//! Terminal rendering of batch outcomes.
//!
//! Successful (app, locale) results go to stdout; diagnostic lines for
//! failures go to stderr, tagged with the offending app identifier and
//! locale.

use std::io::IsTerminal;

use crate::driver::{LocaleResult, Outcome};

const UNKNOWN_APP: &str = "Unknown App";
const RULE_WIDTH: usize = 40;

const BOLD_CYAN: &str = "\x1b[1;36m";
const MAGENTA: &str = "\x1b[35m";
const GREEN: &str = "\x1b[32m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

/// Color is disabled by `--no-color`, the `NO_COLOR` environment variable,
/// or a non-terminal stdout.
fn color_enabled(no_color_flag: bool, no_color_env: bool, stdout_is_tty: bool) -> bool {
    !no_color_flag && !no_color_env && stdout_is_tty
}

impl Renderer {
    pub fn new(no_color_flag: bool) -> Self {
        Self::with_color(color_enabled(
            no_color_flag,
            std::env::var_os("NO_COLOR").is_some(),
            std::io::stdout().is_terminal(),
        ))
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    pub fn print(&self, outcome: &Outcome) {
        match outcome {
            Outcome::App { input, error } => {
                eprintln!("error: {}: {}", input, error);
            }
            Outcome::Locale {
                input,
                id_label,
                result,
            } => {
                if let Some(error) = &result.error {
                    eprintln!("error: {} [{}]: {}", input, result.locale, error);
                } else {
                    self.print_locale(id_label, result);
                }
            }
        }
    }

    fn print_locale(&self, id_label: &str, result: &LocaleResult) {
        let name = result.name.as_deref().unwrap_or(UNKNOWN_APP);
        if self.color {
            println!(
                "Name: {BOLD_CYAN}{}{RESET} {MAGENTA}{}{RESET} {GREEN}[{}]{RESET}",
                name, id_label, result.locale
            );
        } else {
            println!("Name: {} {} [{}]", name, id_label, result.locale);
        }
        println!("{}", "=".repeat(RULE_WIDTH));

        match result.keywords.as_deref().map(str::trim) {
            Some(keywords) if !keywords.is_empty() => println!("{}", keywords),
            _ if self.color => println!("{DIM}(no keywords){RESET}"),
            _ => println!("(no keywords)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_flag_wins() {
        assert!(!color_enabled(true, false, true));
    }

    #[test]
    fn test_no_color_env_wins() {
        assert!(!color_enabled(false, true, true));
    }

    #[test]
    fn test_non_terminal_stdout_disables_color() {
        assert!(!color_enabled(false, false, false));
        assert!(!Renderer::with_color(false).color);
    }

    #[test]
    fn test_color_on_interactive_stdout() {
        assert!(color_enabled(false, false, true));
        assert!(Renderer::with_color(true).color);
    }
}
