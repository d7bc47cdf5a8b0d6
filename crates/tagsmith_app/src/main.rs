mod command;
mod config;
mod effects;
mod logging;
mod render;

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use client_logging::client_info;
use tagsmith_core::{update, AppState, ItemId, Msg};

use command::{Input, ShellCommand};
use effects::EffectRunner;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);
    let config = config::AppConfig::load();
    client_info!("Starting tagsmith against {}", config.api_base_url);

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    let runner =
        EffectRunner::new(&config, input_tx.clone()).context("could not start the api client")?;
    spawn_stdin_reader(input_tx);

    println!("tagsmith (backend: {})", config.api_base_url);
    render::print_help();

    let mut state = AppState::new();
    dispatch(&mut state, Msg::RefreshHistoryClicked, &runner);

    // Deletion confirmations are shell state; the core only sees confirmed ones.
    let mut pending_delete: Option<ItemId> = None;

    for input in input_rx {
        match input {
            Input::Shell(ShellCommand::Quit) => break,
            Input::Shell(ShellCommand::Help) => render::print_help(),
            Input::Shell(ShellCommand::Render) => render::render(&state.view()),
            Input::Shell(ShellCommand::Cancel) => runner.cancel_process(),
            Input::Shell(ShellCommand::DeleteRequested(id)) => {
                pending_delete = Some(id);
                println!("Delete item {id}? Type 'yes' to confirm, 'no' to keep it.");
            }
            Input::Shell(ShellCommand::Confirm) => match pending_delete.take() {
                Some(id) => dispatch(&mut state, Msg::DeleteConfirmed { id }, &runner),
                None => println!("Nothing waiting for confirmation."),
            },
            Input::Shell(ShellCommand::Deny) => {
                if pending_delete.take().is_some() {
                    println!("Kept.");
                }
            }
            Input::Shell(ShellCommand::Unknown(line)) => {
                println!("Unrecognized command: {line} (try 'help')");
            }
            Input::Shell(ShellCommand::Dispatch(msgs)) => {
                for msg in msgs {
                    dispatch(&mut state, msg, &runner);
                }
            }
            Input::Core(msg) => dispatch(&mut state, msg, &runner),
        }

        if state.consume_dirty() {
            render::render(&state.view());
        }
    }

    client_info!("Shutting down");
    Ok(())
}

fn dispatch(state: &mut AppState, msg: Msg, runner: &EffectRunner) {
    let current = std::mem::take(state);
    let (next, effects) = update(current, msg);
    *state = next;
    runner.enqueue(effects);
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let command = match line {
                Ok(line) => command::parse(&line),
                Err(_) => ShellCommand::Quit,
            };
            let quit = command == ShellCommand::Quit;
            if input_tx.send(Input::Shell(command)).is_err() || quit {
                break;
            }
        }
        // Stdin closed; tell the loop to wind down.
        let _ = input_tx.send(Input::Shell(ShellCommand::Quit));
    });
}
