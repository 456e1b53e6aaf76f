// src/bin/kvv.rs
//! kvv: terminal front end: runs the startup gate, then a small command loop

use std::io::{self, Write};

use anyhow::{Context, Result};
use keyvalue_vault::{load_config, AuthGate, CoreError, Entry, GateStatus, Session};
use rpassword::prompt_password;
use tracing::info;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  list                 show all keys
  get <key>            show the values of one entry
  add <key>            create an entry
  update <key>         change values/description (empty keeps, `-` clears)
  delete <key>         remove an entry
  help                 this text
  quit                 leave";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = load_config().context("Failed to load configuration")?;
    let store = config
        .open_store()
        .with_context(|| format!("Failed to open {}", config.paths.database.display()))?;
    info!(db = %store.path().display(), "Key Value Manager");

    let gate = AuthGate::new(store);
    let Some(session) = run_gate(&gate)? else {
        return Ok(());
    };

    println!("Unlocked. Type `help` for commands.");
    command_loop(&session)
}

/// Read one line from stdin; `None` on EOF
fn prompt_line(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(|c| c == '\r' || c == '\n').to_owned()))
}

fn run_gate(gate: &AuthGate) -> Result<Option<Session>> {
    match gate.status().context("Failed to read gate state")? {
        GateStatus::Uninitialized => first_run(gate).map(Some),
        GateStatus::Initialized => login_loop(gate),
    }
}

fn first_run(gate: &AuthGate) -> Result<Session> {
    println!("=== First run: set a password ===");
    loop {
        let password = prompt_password("Enter password: ")?;
        let confirm = prompt_password("Confirm password: ")?;

        match gate.run_first_run_setup(&password, &confirm) {
            Ok(first) => {
                println!();
                println!("Your reset key (store it somewhere safe, it is shown only once):");
                println!("  {}", first.reset_secret.expose_secret());
                println!();
                return Ok(first.session);
            }
            Err(CoreError::Validation(msg)) => println!("  → {msg}"),
            Err(e) => return Err(e).context("First-run setup failed"),
        }
    }
}

fn login_loop(gate: &AuthGate) -> Result<Option<Session>> {
    loop {
        let attempt = prompt_password("Password (empty to reset): ")?;
        if attempt.is_empty() {
            if let Some(session) = reset_flow(gate)? {
                return Ok(Some(session));
            }
            continue;
        }

        match gate.unlock(&attempt) {
            Ok(Some(session)) => return Ok(Some(session)),
            Ok(None) => println!("  → Invalid password."),
            Err(CoreError::Validation(msg)) => println!("  → {msg}"),
            Err(e) => return Err(e).context("Login failed"),
        }
    }
}

fn reset_flow(gate: &AuthGate) -> Result<Option<Session>> {
    println!("=== Reset password ===");
    let reset_key = prompt_password("Reset key: ")?;
    let password = prompt_password("New password: ")?;
    let confirm = prompt_password("Confirm new password: ")?;

    match gate.reset_password(&password, &confirm, &reset_key) {
        Ok(true) => {
            println!("  → Password reset.");
            Ok(gate.unlock(&password)?)
        }
        Ok(false) => {
            println!("  → Invalid reset key.");
            Ok(None)
        }
        Err(CoreError::Validation(msg)) => {
            println!("  → {msg}");
            Ok(None)
        }
        Err(e) => Err(e).context("Password reset failed"),
    }
}

/// Input meaning "empty this field" during `update`
const CLEAR: &str = "-";

/// Split a command line into the command word and the rest of the line as key
///
/// Keys may contain inner spaces; surrounding whitespace is dropped.
fn parse_command(line: &str) -> (&str, Option<&str>) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => {
            let key = rest.trim();
            (command, (!key.is_empty()).then_some(key))
        }
        None => (line, None),
    }
}

fn command_loop(session: &Session) -> Result<()> {
    while let Some(line) = prompt_line("kvv> ")? {
        let (command, key) = parse_command(&line);

        let outcome = match (command, key) {
            ("", _) => Ok(()),
            ("help", _) => {
                println!("{HELP}");
                Ok(())
            }
            ("quit" | "exit", _) => break,
            ("list", _) => list(session),
            ("get", Some(key)) => show(session, key),
            ("add", Some(key)) => add(session, key),
            ("update", Some(key)) => update(session, key),
            ("delete", Some(key)) => delete(session, key),
            _ => {
                println!("Unknown command. Type `help`.");
                Ok(())
            }
        };

        // Store errors are reported and the loop carries on; I/O errors end it
        if let Err(e) = outcome {
            match e.downcast_ref::<CoreError>() {
                Some(core) => println!("  → error: {core}"),
                None => return Err(e),
            }
        }
    }
    Ok(())
}

fn list(session: &Session) -> Result<()> {
    let entries = session.list_entries()?;
    if entries.is_empty() {
        println!("(no entries)");
    }
    for e in entries {
        let touched = e.updated_at.unwrap_or(e.created_at);
        println!(
            "{:<24} {:<32} {}",
            e.key,
            e.description,
            touched.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

fn show(session: &Session, key: &str) -> Result<()> {
    match session.get_entry(key)? {
        Some(e) => {
            println!("key:         {}", e.key);
            for slot in 1..=3 {
                println!("value{slot}:      {}", e.value(slot).unwrap_or_default());
            }
            println!("description: {}", e.description);
            println!("created:     {}", e.created_at.to_rfc3339());
            if let Some(updated) = e.updated_at {
                println!("updated:     {}", updated.to_rfc3339());
            }
        }
        None => println!("  → no entry '{key}'"),
    }
    Ok(())
}

fn add(session: &Session, key: &str) -> Result<()> {
    let value1 = prompt_password("value1: ")?;
    let value2 = prompt_password("value2: ")?;
    let value3 = prompt_password("value3: ")?;
    let description = prompt_line("description: ")?.unwrap_or_default();

    let entry = Entry::new(key)
        .with_values(value1, value2, value3)
        .with_description(description);
    session.add_entry(&entry)?;
    println!("  → added '{key}'");
    Ok(())
}

/// Empty input keeps the old value, `-` clears it, anything else replaces it
fn edit_field(old: String, input: String) -> String {
    match input.as_str() {
        "" => old,
        CLEAR => String::new(),
        _ => input,
    }
}

fn update(session: &Session, key: &str) -> Result<()> {
    let Some(mut entry) = session.get_entry(key)? else {
        println!("  → no entry '{key}'");
        return Ok(());
    };

    println!("  (empty keeps the current value, `{CLEAR}` clears it)");
    entry.value1 = edit_field(entry.value1, prompt_password("value1: ")?);
    entry.value2 = edit_field(entry.value2, prompt_password("value2: ")?);
    entry.value3 = edit_field(entry.value3, prompt_password("value3: ")?);
    let description = prompt_line(&format!("description [{}]: ", entry.description))?;
    entry.description = edit_field(entry.description, description.unwrap_or_default());

    session.update_entry(&entry)?;
    println!("  → updated '{key}'");
    Ok(())
}

fn delete(session: &Session, key: &str) -> Result<()> {
    let answer = prompt_line(&format!("Delete '{key}'? [y/N] "))?.unwrap_or_default();
    if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        session.delete_entry(key)?;
        println!("  → deleted '{key}'");
    } else {
        println!("  → kept");
    }
    Ok(())
}
