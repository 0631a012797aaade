//! CLI command implementations

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

use crate::cli::args::{ConfigCommand, TranscriptArgs};
use crate::config::Settings;
use crate::llm::{build_client, build_summary_prompt, GenerationFailure, GenerationOutcome};
use crate::share::{build_dispatcher, ShareRequest};

/// Print the rendered prompt without contacting the endpoint
pub fn render_prompt(settings: &Settings, input: TranscriptArgs) -> Result<()> {
    let transcript = read_input(input.transcript.as_deref())?;
    let instructions = resolve_instructions(settings, input.instructions);

    let prompt = build_summary_prompt(&transcript, &instructions)?;
    println!("{}", prompt);

    Ok(())
}

/// Generate a summary, then optionally edit, save and share it
pub async fn summarize(
    settings: &Settings,
    input: TranscriptArgs,
    edit: bool,
    output: Option<PathBuf>,
    share: Option<String>,
) -> Result<()> {
    let transcript = read_input(input.transcript.as_deref())?;
    let instructions = resolve_instructions(settings, input.instructions);

    let prompt = build_summary_prompt(&transcript, &instructions)
        .context("Please provide a meeting transcript")?;
    let client = build_client(settings)?;

    tracing::info!("Generating summary...");
    let mut summary = match client.generate(&prompt).await {
        GenerationOutcome::Success(text) => text,
        GenerationOutcome::Failure(GenerationFailure::ExhaustedRetries {
            attempts,
            last_error,
        }) => {
            anyhow::bail!(
                "Failed to generate summary after {} attempts (last error: {}). Please try again later.",
                attempts,
                last_error
            );
        }
        GenerationOutcome::Failure(failure) => return Err(failure.into()),
    };

    if summary.trim().is_empty() {
        tracing::warn!("The generated summary is empty");
    }

    if edit {
        summary = edit_in_editor(&summary)?;
    }

    match output {
        Some(path) => {
            std::fs::write(&path, &summary)
                .with_context(|| format!("Failed to write summary to {}", path.display()))?;
            eprintln!("Summary saved to {}", path.display());
        }
        None => println!("{}", summary),
    }

    if let Some(recipient) = share {
        send_summary(settings, summary, &recipient).await?;
    }

    Ok(())
}

/// Send a previously saved summary
pub async fn share_summary(settings: &Settings, to: &str, summary: Option<PathBuf>) -> Result<()> {
    let summary = read_input(summary.as_deref())?;
    send_summary(settings, summary, to).await
}

async fn send_summary(settings: &Settings, summary: String, recipient: &str) -> Result<()> {
    let dispatcher = build_dispatcher(settings)?;

    dispatcher
        .send(ShareRequest::new(summary, recipient))
        .await
        .into_result()
        .context("Failed to send email. Please try again.")?;

    eprintln!("Email sent successfully to {}", recipient.trim());
    Ok(())
}

/// Configuration commands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = "********".to_string();
            }
            let toml = toml::to_string_pretty(&shown)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Read a file, or stdin when the path is absent or `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn resolve_instructions(settings: &Settings, instructions: Option<String>) -> String {
    instructions.unwrap_or_else(|| settings.prompt.default_instructions.clone())
}

/// Let the user revise `text` in `$VISUAL`/`$EDITOR` and return the result.
fn edit_in_editor(text: &str) -> Result<String> {
    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());

    let path = std::env::temp_dir().join(format!("meetnotes-{}.md", Uuid::new_v4()));
    std::fs::write(&path, text)
        .with_context(|| format!("Failed to write draft to {}", path.display()))?;

    let edited = run_editor(&editor, &path);
    let _ = std::fs::remove_file(&path);
    edited
}

fn run_editor(editor: &str, path: &Path) -> Result<String> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().context("Editor command is empty")?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;

    if !status.success() {
        anyhow::bail!("Editor '{}' exited with {}", editor, status);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read edited draft {}", path.display()))
}
