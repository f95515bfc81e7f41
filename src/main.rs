//! Quillkit - inspect Quill Delta documents through a headless editor.
//!
//! # Usage
//!
//! ```bash
//! quillkit note.json
//! quillkit --index 10 --length 5 note.json
//! quillkit --markdown note.json
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use quillkit::adapter::EditorAdapter;
use quillkit::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags, ConfigFlags, SpawnConfig, Theme,
};
use quillkit::delta::Delta;
use quillkit::markdown;
use quillkit::surface::{HeadlessHost, MountTarget};

const DEFAULT_MOUNT: &str = "#editor";

/// Inspect Quill Delta documents through a headless editor
#[derive(Parser, Debug)]
#[command(name = "quillkit", version, about, long_about = None)]
struct Cli {
    /// Delta JSON file to inspect
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Start of the content range (character position)
    #[arg(short, long)]
    index: Option<usize>,

    /// Length of the content range; requires --index
    #[arg(short, long)]
    length: Option<usize>,

    /// Render the content as Markdown instead of Delta JSON
    #[arg(short, long)]
    markdown: bool,

    /// Mount target for the editing surface
    #[arg(long, value_name = "SELECTOR")]
    mount: Option<String>,

    /// Placeholder text shown by an empty editing surface
    #[arg(long, value_name = "TEXT")]
    placeholder: Option<String>,

    /// Visual theme for the editing surface
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Save current command-line flags as defaults in .quillkitrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .quillkitrc
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Verify file exists
    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }
    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let document = Delta::from_json(&source)
        .with_context(|| format!("Failed to parse delta document {}", cli.file.display()))?;

    let mount: MountTarget = effective
        .mount
        .as_deref()
        .unwrap_or(DEFAULT_MOUNT)
        .parse()?;
    let host = HeadlessHost::with_mount(mount.clone());
    let mut adapter = EditorAdapter::new(host, mount);
    adapter
        .spawn(effective.apply(SpawnConfig::default()))
        .context("Failed to spawn editing surface")?;
    adapter.surface_mut()?.set_contents(document);

    let content = match (cli.index, cli.length) {
        (Some(index), Some(length)) => adapter.content_range(index, length)?,
        (Some(index), None) => adapter.content_from(index)?,
        (None, Some(_)) => anyhow::bail!("--length requires --index"),
        (None, None) => adapter.content()?,
    };

    if effective.markdown {
        print!("{}", markdown::render_json(&content)?);
    } else {
        println!("{content}");
    }
    Ok(())
}
