use clap::{Parser, Subcommand};
use std::path::PathBuf;
use texreport::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug, Clone)]
#[command(name = "texreport")]
#[command(about = "Assemble a LaTeX report from tables, figures and mapping tables, then render it")]
#[command(version)]
pub struct CliArgs {
    /// Report configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_FILE, value_name = "FILE")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the project directory skeleton
    Init,

    /// Apply the config's fragment lists and render the report
    Build {
        /// Only write the composed .tex source; do not run the compiler
        #[arg(long)]
        tex_only: bool,

        /// Leave out the Figures and Tables parts
        #[arg(long)]
        sections_only: bool,

        /// Print the render result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a placeholder section file
    Section {
        name: String,

        /// Heading depth: 1 = section, 2 = subsection, 3 = subsubsection
        #[arg(long, short = 'l', default_value = "1")]
        level: u8,

        /// Rewrite the file even if it exists
        #[arg(long = "override")]
        override_existing: bool,
    },

    /// Copy an image into the project's figures
    Figure {
        name: String,

        /// Image file to copy
        #[arg(long, value_name = "PNG")]
        source: Option<PathBuf>,

        #[arg(long, default_value = "")]
        caption: String,

        /// \includegraphics options, e.g. "scale=0.5"
        #[arg(long, default_value = "")]
        option: String,

        #[arg(long = "override")]
        override_existing: bool,
    },

    /// Render one or more CSV files (joined on their first column) into a table fragment
    Table {
        name: String,

        #[arg(required = true, num_args = 1.., value_name = "CSV")]
        files: Vec<PathBuf>,

        #[arg(long, default_value = "")]
        caption: String,

        #[arg(long = "override")]
        override_existing: bool,
    },

    /// Copy a 2- or 3-column mapping CSV into the appendix
    Mapping {
        file: PathBuf,

        #[arg(long = "override")]
        override_existing: bool,
    },
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Section { level, .. } if !(1..=3).contains(level) => {
                Err(format!("Section level must be 1, 2 or 3 (got {})", level))
            }
            Command::Figure { source: Some(source), .. } if source.as_os_str().is_empty() => {
                Err("--source must not be empty; omit it to keep an existing image".to_string())
            }
            _ => Ok(()),
        }
    }
}
