//! Command handlers: logger init, message parsing, history management.

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

use chrono::Local;

use crate::cli::{Args, Commands, HistorySubcommand, OutputFormat, RenderArgs};
use crate::core::config::{self, Config, ConfigError};
use crate::core::history::{HistoryError, HistoryStore};
use crate::core::segment;
use crate::core::transcript;
use crate::render::{self, RenderOptions, syntax};

/// Errors surfaced to the user by a command.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// What the process should exit with after a successful command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// `check` found no code block.
    NoCodeBlock,
}

/// Initialize env_logger on stderr so stdout stays machine-readable.
pub fn init_logger(args: &Args) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level()),
    )
    .target(env_logger::Target::Stderr)
    .try_init();
}

/// Read a message from `path`, or stdin when it is None or '-'.
fn read_input(path: Option<&Path>) -> Result<String, AppError> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p).map_err(|source| AppError::Read {
            path: p.display().to_string(),
            source,
        }),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(|source| AppError::Read {
                path: "stdin".to_string(),
                source,
            })?;
            Ok(buf)
        }
    }
}

fn render_options(render: &RenderArgs, config: &Config) -> RenderOptions {
    RenderOptions {
        width: render.width,
        color: !render.no_color && io::stdout().is_terminal(),
        theme: config.theme.clone(),
    }
}

fn run_parse(input: Option<&Path>, render: &RenderArgs, config: &Config) -> Result<(), AppError> {
    let content = read_input(input)?;
    let parsed = segment::parse_message(&content);
    let mut stdout = io::stdout().lock();
    match render.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &parsed)?;
            writeln!(stdout)?;
        }
        OutputFormat::Terminal => {
            let opts = render_options(render, config);
            write!(stdout, "{}", render::render_message(&parsed, &opts))?;
        }
        OutputFormat::Plain => writeln!(stdout, "{}", parsed.clipboard_text())?,
        OutputFormat::Speech => writeln!(stdout, "{}", parsed.speakable_text())?,
    }
    Ok(())
}

fn run_check(input: Option<&Path>) -> Result<Outcome, AppError> {
    let content = read_input(input)?;
    let found = segment::has_code_block(&content);
    println!("{}", found);
    Ok(if found {
        Outcome::Success
    } else {
        Outcome::NoCodeBlock
    })
}

fn run_history_list(store: &HistoryStore, limit: Option<usize>) -> Result<(), AppError> {
    let sessions = store.list()?;
    if sessions.is_empty() {
        println!("No saved chat sessions.");
        return Ok(());
    }
    let limit = limit.unwrap_or(usize::MAX);
    for s in sessions.iter().take(limit) {
        println!(
            "{}  {}  {:>3} msgs  {:>2} code  {}",
            s.id,
            s.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            s.messages.len(),
            s.code_block_count(),
            s.title
        );
    }
    Ok(())
}

/// Per-message output of `history show` in the text formats.
#[derive(Clone, Copy)]
enum MessageBody {
    Rendered,
    Clipboard,
    Speech,
}

fn run_history_show(
    store: &HistoryStore,
    id: &str,
    render: &RenderArgs,
    config: &Config,
) -> Result<(), AppError> {
    let session = store.require(id)?;
    let mut stdout = io::stdout().lock();
    let opts = render_options(render, config);
    let body_format = match render.format {
        OutputFormat::Json => {
            let parsed: Vec<_> = session.messages.iter().map(|m| m.parsed()).collect();
            serde_json::to_writer_pretty(&mut stdout, &parsed)?;
            writeln!(stdout)?;
            return Ok(());
        }
        OutputFormat::Terminal => MessageBody::Rendered,
        OutputFormat::Plain => MessageBody::Clipboard,
        OutputFormat::Speech => MessageBody::Speech,
    };
    writeln!(stdout, "# {}", session.title)?;
    for msg in &session.messages {
        writeln!(
            stdout,
            "\n[{} · {}]",
            msg.role.label(),
            msg.timestamp.with_timezone(&Local).format("%H:%M")
        )?;
        let parsed = msg.parsed();
        match body_format {
            MessageBody::Rendered => write!(stdout, "{}", render::render_message(&parsed, &opts))?,
            MessageBody::Clipboard => writeln!(stdout, "{}", parsed.clipboard_text())?,
            MessageBody::Speech => writeln!(stdout, "{}", parsed.speakable_text())?,
        }
    }
    Ok(())
}

fn run_history_import(store: &HistoryStore, file: &Path) -> Result<(), AppError> {
    let data = read_input(Some(file))?;
    let session = transcript::session_from_json(&data)?;
    let id = session.id.clone();
    store.save(session)?;
    log::info!("imported chat session {} into {}", id, store.path().display());
    println!("{}", id);
    Ok(())
}

fn run_history(subcommand: &HistorySubcommand, config: &Config) -> Result<(), AppError> {
    let store = HistoryStore::from_config(config)?;
    match subcommand {
        HistorySubcommand::List { limit } => run_history_list(&store, *limit),
        HistorySubcommand::Show { id, render } => run_history_show(&store, id, render, config),
        HistorySubcommand::Import { file } => run_history_import(&store, file),
        HistorySubcommand::Delete { id } => {
            if !store.delete(id)? {
                return Err(HistoryError::NotFound(id.clone()).into());
            }
            println!("Deleted {}", id);
            Ok(())
        }
        HistorySubcommand::Clear => {
            store.clear()?;
            println!("History cleared.");
            Ok(())
        }
    }
}

fn run_config(config: &Config) {
    let data_dir = config
        .data_dir
        .as_ref()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "(unavailable)".to_string());
    let history_file = HistoryStore::from_config(config)
        .map(|s| s.path().display().to_string())
        .unwrap_or_else(|_| "(unavailable)".to_string());
    println!("Data dir:       {}", data_dir);
    println!("History file:   {}", history_file);
    println!("History limit:  {}", config.history_limit);
    println!("Theme:          {}", config.theme);
    println!("Themes:         {}", syntax::theme_names().join(", "));
}

/// Dispatch a parsed command line.
pub fn run(args: &Args) -> Result<Outcome, AppError> {
    if let Commands::Completions { shell } = &args.command {
        use clap::CommandFactory;
        let mut cmd = Args::command();
        crate::cli::generate(*shell, &mut cmd, crate::core::app::NAME, &mut io::stdout());
        return Ok(Outcome::Success);
    }
    if let Commands::Check { input } = &args.command {
        return run_check(input.as_deref());
    }

    let config = config::load()?;
    match &args.command {
        Commands::Parse { input, render } => run_parse(input.as_deref(), render, &config)?,
        Commands::History { subcommand } => run_history(subcommand, &config)?,
        Commands::Config => run_config(&config),
        Commands::Check { .. } | Commands::Completions { .. } => {}
    }
    Ok(Outcome::Success)
}
