//! Line-oriented command parsing: one stdin line becomes one shell action.

use tagsmith_core::{InputKind, ItemId, Msg, PromptField};

/// Everything the main loop can receive, from stdin or from the client.
#[derive(Debug)]
pub enum Input {
    Shell(ShellCommand),
    Core(Msg),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Messages to run through the core, in order.
    Dispatch(Vec<Msg>),
    /// Re-render the current view.
    Render,
    Help,
    Quit,
    /// Cancel the running processing exchange.
    Cancel,
    /// Deletion wants an explicit confirmation first.
    DeleteRequested(ItemId),
    Confirm,
    Deny,
    Unknown(String),
}

pub fn parse(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Render;
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "url" => submit(InputKind::Url, rest),
        "text" => submit(InputKind::Text, rest),
        "new" => ShellCommand::Dispatch(vec![Msg::NewClicked]),
        "list" => ShellCommand::Render,
        "refresh" => ShellCommand::Dispatch(vec![Msg::RefreshHistoryClicked]),
        "open" => with_id(rest, |id| {
            ShellCommand::Dispatch(vec![Msg::ItemSelected { id }])
        }),
        "delete" => with_id(rest, ShellCommand::DeleteRequested),
        "rename" => parse_rename(rest),
        "prompts" => ShellCommand::Dispatch(vec![Msg::PromptsRequested]),
        "prompt" => parse_prompt_edit(rest),
        "prompts-save" => ShellCommand::Dispatch(vec![Msg::PromptsSaveClicked]),
        "export" => ShellCommand::Dispatch(vec![Msg::ExportClicked]),
        "cancel" => ShellCommand::Cancel,
        "yes" => ShellCommand::Confirm,
        "no" => ShellCommand::Deny,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.to_string()),
    }
}

/// Empty content is dispatched anyway; the core owns the validation message.
fn submit(kind: InputKind, content: &str) -> ShellCommand {
    ShellCommand::Dispatch(vec![
        Msg::ModeSelected(kind),
        Msg::InputChanged(content.to_string()),
        Msg::SubmitClicked,
    ])
}

fn with_id(rest: &str, build: impl FnOnce(ItemId) -> ShellCommand) -> ShellCommand {
    match rest.parse::<ItemId>() {
        Ok(id) => build(id),
        Err(_) => ShellCommand::Unknown(rest.to_string()),
    }
}

fn parse_rename(rest: &str) -> ShellCommand {
    let Some((id_str, title)) = rest.split_once(char::is_whitespace) else {
        return ShellCommand::Unknown(rest.to_string());
    };
    with_id(id_str, |id| {
        ShellCommand::Dispatch(vec![Msg::TitleSubmitted {
            id,
            title: title.trim().to_string(),
        }])
    })
}

fn parse_prompt_edit(rest: &str) -> ShellCommand {
    let Some((field, value)) = rest.split_once(char::is_whitespace) else {
        return ShellCommand::Unknown(rest.to_string());
    };
    let field = match field {
        "openai-system" => PromptField::OpenAiSystem,
        "openai-user" => PromptField::OpenAiUser,
        "anthropic-system" => PromptField::AnthropicSystem,
        "anthropic-user" => PromptField::AnthropicUser,
        other => return ShellCommand::Unknown(other.to_string()),
    };
    ShellCommand::Dispatch(vec![Msg::PromptFieldEdited {
        field,
        value: value.trim().to_string(),
    }])
}
