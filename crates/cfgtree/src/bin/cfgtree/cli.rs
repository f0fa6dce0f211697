//! cfgtree cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a configuration dump into a tree
    ///
    /// Reads the dump from stdin unless --input-file is provided
    Parse(ParseCommand),

    /// List the context names a dump declares, in declaration order
    Contexts(ContextsCommand),

    /// Print debug information for development
    Dev(DevCommand),
}

#[derive(Parser, Debug)]
pub struct ParseCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    /// Only output the tree of one region (a context name, or "global")
    #[clap(short = 'c', long = "context")]
    pub context: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ContextsCommand {
    #[clap(flatten)]
    pub input: InputArgs,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Read the dump from a file instead of stdin
    #[clap(short = 'f', long = "input-file")]
    pub file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

#[derive(Parser, Debug)]
pub struct DevCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[command(subcommand)]
    pub command: DevSubCommand,
}

#[derive(Subcommand, Debug)]
pub enum DevSubCommand {
    /// Print the raw region map before section parsing
    Regions,
    /// Print the parsed tree's debug representation
    Tree,
}
