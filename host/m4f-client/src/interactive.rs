use crate::client::Client;
use console::style;
use dialoguer::Input;
use eyre::{Result, WrapErr};
use m4f_common::COMMAND_HELP;
use nix::errno::Errno;
use std::io;
use std::time::Duration;

const INTERRUPTED: &str = "\nInterrupted. Type 'quit' to exit.";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Action<'a> {
    Skip,
    Quit,
    Send(&'a str),
}

fn classify(line: &str) -> Action<'_> {
    let line = line.trim();
    if line.is_empty() {
        Action::Skip
    } else if ["quit", "exit", "q"]
        .iter()
        .any(|word| line.eq_ignore_ascii_case(word))
    {
        Action::Quit
    } else {
        Action::Send(line)
    }
}

/// Ctrl-C shows up as an interrupted read at the prompt, or as `EINTR` from `poll`.
fn is_interrupted(e: &eyre::Report) -> bool {
    e.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::Interrupted)
            || cause.downcast_ref::<Errno>() == Some(&Errno::EINTR)
    })
}

/// Prompt for commands until the user quits or stdin closes.
pub fn run(client: &mut Client, timeout: Duration) -> Result<()> {
    // Ctrl-C only interrupts the current prompt or exchange
    ctrlc::set_handler(|| tracing::debug!("SIGINT"))
        .wrap_err("failed to install Ctrl-C handler")?;

    println!("\n=== M4F Interactive Mode ===");
    println!("Commands: {COMMAND_HELP}, quit");
    println!("Type your command and press Enter\n");

    loop {
        let line = match Input::<String>::new()
            .with_prompt("M4F")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => {
                println!("{INTERRUPTED}");
                continue;
            }
            Err(e) => {
                tracing::debug!("prompt closed: {e}");
                println!("\nExiting...");
                return Ok(());
            }
        };

        match classify(&line) {
            Action::Skip => continue,
            Action::Quit => {
                println!("Exiting...");
                return Ok(());
            }
            Action::Send(cmd) => match client.send_and_receive(cmd, timeout) {
                Ok(Some(_)) => {}
                Ok(None) => println!("{}", style("⚠ No response from M4F (timeout)").yellow()),
                Err(e) if is_interrupted(&e) => println!("{INTERRUPTED}"),
                Err(e) => tracing::error!("{e:#}"),
            },
        }
        println!();
    }
}
