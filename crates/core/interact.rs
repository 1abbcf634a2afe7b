use dialoguer::Input;
use eyre::{eyre, Context, Result};
use refconv::format::FormatKind;

pub fn user_select<S: ToString>(prompt: &str, items: &[S]) -> Result<usize> {
    let selection = dialoguer::Select::with_theme(&dialoguer::theme::ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()
        .wrap_err_with(|| eyre!("User selection cancelled"))?;

    if let Some(index) = selection {
        Ok(index)
    } else {
        Err(eyre!("No selection made - cancelling operation"))
    }
}

pub fn user_select_format() -> Result<FormatKind> {
    let items = FormatKind::ALL.map(FormatKind::tag);
    user_select("Choose the input format", &items).map(|i| FormatKind::ALL[i])
}

pub fn user_input(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new();
    input.with_prompt(prompt);
    if let Some(default) = default {
        input.default(default.to_owned());
    }

    input
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}
