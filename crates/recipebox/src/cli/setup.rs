use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recipebox", bin_name = "recipebox", version)]
#[command(about = "Keep a local recipe collection and search it", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the recipe snapshot (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to load instead of the default recipebox.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results as JSON envelopes
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all recipes
    #[command(alias = "ls")]
    List,

    /// Show one recipe in full
    #[command(alias = "view")]
    Show { slug: String },

    /// Add a recipe from a JSON file ("-" reads stdin)
    Add { file: PathBuf },

    /// Replace a recipe from a JSON file ("-" reads stdin)
    Update { file: PathBuf },

    /// Delete a recipe
    #[command(alias = "rm")]
    Delete { slug: String },

    /// Search recipe titles
    Search {
        /// Words to search for; joined with spaces
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Print the edit form for a recipe (blank if it does not exist)
    Edit { slug: String },

    /// Create or update a recipe from an edit form file ("-" reads stdin)
    Save { slug: String, file: PathBuf },

    /// Print the path of the snapshot file
    Path,
}
