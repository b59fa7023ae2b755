//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reportgen")]
#[command(version, about = "Render report documents from job data and template specs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to reportgen.toml (default: search upwards from the current directory)
    #[arg(long, global = true, env = "REPORTGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Flags every command can see
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn global(&self) -> GlobalArgs {
        GlobalArgs {
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render every spec for a job and write the documents
    Render(RenderArgs),

    /// Report template placeholders the job data cannot supply
    Lint {
        /// Job file (.yaml, .yml or .json)
        #[arg(long)]
        job: PathBuf,

        /// Template spec directory
        #[arg(long)]
        specs: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Check a job file against the job schema
    Validate {
        /// Job file (.yaml, .yml or .json)
        #[arg(long)]
        job: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// List the loaded template specs
    Specs {
        /// Template spec directory
        #[arg(long)]
        specs: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// List the worksheets of a spreadsheet
    Sheets {
        /// Spreadsheet file (.xlsx, .xls or .ods)
        file: PathBuf,
    },

    /// Print the node coordinate keys parsed from a worksheet
    Nodes {
        /// Spreadsheet file (.xlsx, .xls or .ods)
        file: PathBuf,

        /// Worksheet name
        #[arg(long)]
        sheet: String,

        /// Only these nodes (comma separated)
        #[arg(long, value_delimiter = ',')]
        nodes: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Convert a job file between YAML and JSON
    Convert {
        /// Source job file
        input: PathBuf,

        /// Destination job file; format follows its extension
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Job file (.yaml, .yml or .json)
    #[arg(long)]
    pub job: PathBuf,

    /// Template spec directory
    #[arg(long)]
    pub specs: Option<PathBuf>,

    /// Output directory
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Also write every output into one zip archive
    #[arg(long, num_args = 0..=1, value_name = "NAME")]
    pub zip: Option<Option<String>>,

    /// Spreadsheet with node coordinates to merge into the job
    #[arg(long, requires = "sheet_name")]
    pub sheet: Option<PathBuf>,

    /// Worksheet holding the node rows
    #[arg(long, requires = "sheet")]
    pub sheet_name: Option<String>,

    /// Only these nodes (comma separated)
    #[arg(long, value_delimiter = ',', requires = "sheet")]
    pub nodes: Vec<String>,
}
