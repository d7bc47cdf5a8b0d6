//! Plain-text rendering of the view model.

use tagsmith_core::{AppViewModel, InputKind, Screen};

pub fn render(view: &AppViewModel) {
    println!();
    match view.screen {
        Screen::Input => {
            let mode = match view.input_kind {
                InputKind::Url => "url",
                InputKind::Text => "text",
            };
            println!("[input mode: {mode}]");
        }
        Screen::Processing => {
            println!("[processing...]");
        }
        Screen::Result => {
            if let Some(result) = &view.result {
                let marker = if result.saved { "" } else { " (not saved)" };
                println!("== {}{marker} ==", result.title);
                println!("{}", result.output);
            }
        }
    }

    if let Some(prompts) = &view.prompts {
        println!("prompts:");
        println!("  openai-system:    {}", preview(&prompts.openai_system));
        println!("  openai-user:      {}", preview(&prompts.openai_user));
        println!("  anthropic-system: {}", preview(&prompts.anthropic_system));
        println!("  anthropic-user:   {}", preview(&prompts.anthropic_user));
    }

    if !view.history.is_empty() {
        println!("history:");
        for row in &view.history {
            let kind = match row.kind {
                InputKind::Url => "url",
                InputKind::Text => "text",
            };
            println!("  [{}] {} ({}, {kind})", row.id, row.title, row.date_str);
        }
    }

    if let Some(status) = &view.status {
        println!("* {status}");
    }
}

pub fn print_help() {
    println!("commands:");
    println!("  url <address>           process a web page");
    println!("  text <words...>         process pasted text");
    println!("  new                     back to a fresh input screen");
    println!("  list                    show the current view again");
    println!("  refresh                 refetch history from the server");
    println!("  open <id>               view a history item");
    println!("  rename <id> <title>     change an item's title");
    println!("  delete <id>             delete an item (asks for 'yes')");
    println!("  export                  write the open result to disk");
    println!("  prompts                 show the prompt configuration");
    println!("  prompt <field> <text>   edit one prompt field");
    println!("  prompts-save            push edited prompts to the server");
    println!("  cancel                  abort the running process");
    println!("  quit                    leave");
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 60;
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= LIMIT {
        flat
    } else {
        let cut: String = flat.chars().take(LIMIT).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn preview_flattens_and_truncates() {
        assert_eq!(preview("short\ntext"), "short text");
        let long = "x".repeat(80);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 63);
    }
}
