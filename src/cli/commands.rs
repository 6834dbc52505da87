//! CLI commands and argument parsing

use crate::decode::DecoderFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Convert JSON-like documents into struct definitions
#[derive(Parser, Debug)]
#[command(name = "togo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "go")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer records from documents and render them
    Generate {
        #[command(flatten)]
        build: BuildArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Package name for Go output
        #[arg(long)]
        package: Option<String>,
    },

    /// Print `level<TAB>name` for every record in emission order
    Levels {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Load and validate the configuration file
    ValidateConfig,
}

/// Arguments shared by commands that run a schema build
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Input documents
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Name of the root record (defaults to the file stem with several inputs)
    #[arg(long)]
    pub root_name: Option<String>,

    /// Suffix record names instead of merging same-named shapes
    #[arg(long)]
    pub unique: bool,

    /// Input format (guessed from the file extension when omitted)
    #[arg(long)]
    pub input_format: Option<InputFormat>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Go struct declarations
    Go,
    /// Pretty JSON description of the records
    Json,
}

/// Input document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Json,
    Jsonl,
    Yaml,
}

impl From<InputFormat> for DecoderFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => DecoderFormat::Json,
            InputFormat::Jsonl => DecoderFormat::Jsonl,
            InputFormat::Yaml => DecoderFormat::Yaml,
        }
    }
}
