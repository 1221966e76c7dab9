//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  chat-segmenter parse reply.md              Render a message in the terminal
  chat-segmenter parse --format json -       Segment stdin, print JSON
  chat-segmenter check reply.md              Exit 0 if the message has a code block
  chat-segmenter history import chat.json    Add a chat session to history
  chat-segmenter history list                List saved chat sessions
  chat-segmenter history show <ID>           Render a saved chat session
  chat-segmenter config                      Show config paths and settings
  chat-segmenter completions bash            Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Split chat messages into prose and fenced code segments",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Output format for segmented messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Wrapped prose and labelled, highlighted code blocks
    Terminal,
    /// Segments as JSON
    Json,
    /// Every segment joined by blank lines, as copied to a clipboard
    Plain,
    /// Prose only with markdown punctuation removed, for text-to-speech
    Speech,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Wrap width for prose (0 disables wrapping)
    #[arg(short, long, default_value_t = 80)]
    pub width: usize,

    /// Disable ANSI colours and syntax highlighting
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Segment one message into text and code
    Parse {
        /// File holding the message ('-' or omitted reads stdin)
        input: Option<PathBuf>,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Report whether a message contains a complete fenced code block
    Check {
        /// File holding the message ('-' or omitted reads stdin)
        input: Option<PathBuf>,
    },
    /// Manage saved chat sessions
    History {
        #[command(subcommand)]
        subcommand: HistorySubcommand,
    },
    /// Show config paths and settings
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum HistorySubcommand {
    /// List chat sessions, most recent first
    List {
        /// Maximum number of sessions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Render every message of a session
    Show {
        id: String,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Import a chat session, or a bare list of messages, from a JSON file ('-' reads stdin)
    Import { file: PathBuf },
    /// Delete a session
    Delete { id: String },
    /// Delete all sessions
    Clear,
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}
