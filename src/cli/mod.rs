use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use promptfolio::model::Platform;
use promptfolio::provider::ProviderKind;
use promptfolio::template::parse_assignment;

#[derive(Parser, Debug)]
#[command(name = "promptfolio", version, about = "Store prompt templates, fill in {{variables}} and compare LLM outputs side by side")]
pub struct Args {
    /// Config file (defaults to <config_dir>/promptfolio/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data file, overrides the config
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage prompt templates
    Prompt {
        #[command(subcommand)]
        action: PromptAction,
    },
    /// Manage folders
    Folder {
        #[command(subcommand)]
        action: FolderAction,
    },
    /// Show a prompt with filled and unfilled variables highlighted
    Preview {
        id: String,
        #[command(flatten)]
        vars: VarArgs,
    },
    /// Print the prompt with variables substituted
    Compile {
        id: String,
        #[command(flatten)]
        vars: VarArgs,
    },
    /// Run a prompt against two providers and compare
    Arena(ArenaArgs),
    /// List saved comparison runs
    Runs,
    /// Manage provider API keys
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },
    /// Discard all data and restore the bundled examples
    Reset {
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(ClapArgs, Debug, Default)]
pub struct VarArgs {
    /// Variable value as name=value (repeatable)
    #[arg(long = "var", short = 'v', value_parser = parse_assignment)]
    pub vars: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
pub enum PromptAction {
    /// List prompts, newest first
    List {
        /// Match title or content
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long)]
        platform: Option<Platform>,
        /// Only prompts in this folder
        #[arg(long, conflicts_with = "uncategorized")]
        folder: Option<String>,
        /// Only prompts without a folder
        #[arg(long)]
        uncategorized: bool,
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,
        /// Require every --tag instead of any
        #[arg(long)]
        all_tags: bool,
    },
    /// Show one prompt and its variables
    Show { id: String },
    /// Create a prompt
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        content: Option<String>,
        /// Read content from a file
        #[arg(long, short)]
        file: Option<PathBuf>,
        #[arg(long = "tag", short = 't', value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(long, default_value = "ChatGPT")]
        platform: Platform,
        #[arg(long)]
        folder: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Change fields of a prompt; omitted fields are kept
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,
        #[arg(long, short)]
        file: Option<PathBuf>,
        /// Replace the tag set
        #[arg(long = "tag", short = 't', value_delimiter = ',')]
        tags: Option<Vec<String>>,
        #[arg(long)]
        platform: Option<Platform>,
        #[arg(long, conflicts_with = "no_folder")]
        folder: Option<String>,
        #[arg(long)]
        no_folder: bool,
        #[arg(long, conflicts_with = "no_color")]
        color: Option<String>,
        #[arg(long)]
        no_color: bool,
    },
    /// Delete a prompt
    Delete {
        id: String,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum FolderAction {
    /// List folders with prompt counts
    List,
    /// Create a folder
    Create { name: String },
    /// Delete a folder; its prompts become uncategorized
    Delete {
        id: String,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(ClapArgs, Debug)]
pub struct ArenaArgs {
    pub id: String,
    #[command(flatten)]
    pub vars: VarArgs,
    /// Provider for slot A (openai, anthropic, gemini)
    #[arg(long)]
    pub model_a: Option<ProviderKind>,
    /// Provider for slot B
    #[arg(long)]
    pub model_b: Option<ProviderKind>,
    /// Only run slot A or B
    #[arg(long, value_parser = ["a", "b", "A", "B"])]
    pub only: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rate_a: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rate_b: Option<u8>,
    /// Save the comparison to run history
    #[arg(long)]
    pub save: bool,
}

#[derive(Subcommand, Debug)]
pub enum KeysAction {
    /// Show which keys are set (masked)
    Show,
    /// Set one or more keys; others are left as they are
    Set {
        #[arg(long)]
        openai: Option<String>,
        #[arg(long)]
        anthropic: Option<String>,
        #[arg(long)]
        gemini: Option<String>,
    },
    /// Send a short test prompt with the stored key
    Test { provider: ProviderKind },
}
