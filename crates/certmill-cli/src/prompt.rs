//! Interactive confirmation of the certificate identity.

use std::io::IsTerminal;

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

/// Confirm or override a detected value, looping until the user keeps one.
///
/// The detected value is kept as-is when `assume_yes` is set or stdin is not
/// a terminal, so scripted runs never block on a prompt.
pub fn confirm_value(what: &str, mut value: String, assume_yes: bool) -> Result<String> {
    if assume_yes || !std::io::stdin().is_terminal() {
        return Ok(value);
    }

    loop {
        println!(
            "The {what} used for the server certificate will be: {}",
            value.cyan()
        );
        let keep = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Keep this {what}?"))
            .default(true)
            .interact()?;
        if keep {
            return Ok(value);
        }

        value = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("New {what}"))
            .interact_text()?;
    }
}
