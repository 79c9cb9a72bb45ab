//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::error::{Pep723Error, Result};

use super::Prompt;

fn map_dialoguer_err(e: dialoguer::Error) -> Pep723Error {
    Pep723Error::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Ask a yes/no question on `term`.
pub fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<bool> {
    Confirm::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .default(prompt.default)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialoguer_errors_become_io_errors() {
        let err = dialoguer::Error::IO(std::io::Error::new(
            std::io::ErrorKind::Interrupted,
            "interrupted",
        ));
        assert!(matches!(map_dialoguer_err(err), Pep723Error::Io(_)));
    }

    #[test]
    fn theme_drops_prompt_prefix() {
        let theme = prompt_theme();
        assert_eq!(theme.prompt_prefix.to_string(), "");
    }
}
