use anyhow::{Context, Result};
use std::{env, path::Path};

use data_profile::validate_profile;
use profile_store::{AppState, FileKind, SubmitOutcome};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        println!("Usage:");
        println!(" cargo run --example cli show <path>");
        println!(" cargo run --example cli set <path> <field> <value>");
        println!(" cargo run --example cli submit <path>");
        return Ok(());
    }

    let command = &args[1];
    let path = Path::new(&args[2]);
    let mut state = AppState::open("cli", path)
        .context("Failed to open profile storage")?;

    match command.as_str() {
        "show" => show_command(&state),
        "set" => {
            if args.len() < 5 {
                println!("Usage: cargo run --example cli set <path> <field> <value>");
                return Ok(());
            }
            state
                .set_field(&args[3], &args[4])
                .context("Failed to persist the field")?;
            if let Some(err) = data_profile::validate_field(&args[3], &args[4])
            {
                println!("Warning: {}", err);
            }
            Ok(())
        }
        "submit" => match state.submit().context("Failed to submit")? {
            SubmitOutcome::Saved => {
                println!("Profile saved successfully!");
                Ok(())
            }
            SubmitOutcome::Rejected(errors) => {
                for err in errors {
                    println!("{}", err);
                }
                Ok(())
            }
        },
        _ => {
            eprintln!("Invalid command. Use 'show', 'set' or 'submit'.");
            Ok(())
        }
    }
}

fn show_command(
    state: &AppState<fs_storage::file_storage::FileStorage<String, String>>,
) -> Result<()> {
    let profile = state.profile();
    println!("name: {}", profile.name);
    println!("lastname: {}", profile.lastname);
    println!("jobTitle: {}", profile.job_title);
    println!("phone: {}", profile.phone);
    println!("email: {}", profile.email);
    println!("address: {}", profile.address);
    println!("pitch: {}", profile.pitch);
    println!("visibility: {:?}", profile.profile_visibility);
    println!("tags: {:?}", profile.tags.as_slice());
    println!("potential tags: {:?}", profile.potential_tags.as_slice());
    for entry in profile.links.as_slice() {
        println!("link: {} -> {}", entry.site_name, entry.link);
    }
    for kind in [FileKind::Project, FileKind::Task] {
        for file in state.files(kind) {
            println!(
                "{}: {} ({} bytes, {})",
                kind.storage_key(),
                file.name,
                file.size,
                file.mime
            );
        }
    }

    let errors = validate_profile(profile);
    if errors.is_empty() {
        println!("profile is valid");
    } else {
        for err in errors {
            println!("invalid - {}", err);
        }
    }
    Ok(())
}
