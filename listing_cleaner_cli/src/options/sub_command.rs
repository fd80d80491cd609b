use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// clean one description read from a file or standard input.
    Clean {
        /// File holding the markup. Reads standard input when omitted.
        #[clap(short, long)]
        input: Option<PathBuf>,
    },
    /// clean a JSON array of descriptions, printing the cleaned array.
    Batch {
        /// JSON file with an array of strings. `null` entries clean to "".
        #[clap(short, long)]
        input: PathBuf,
    },
    /// rewrite every product description of an XML feed.
    Feed {
        /// The feed to rewrite.
        #[clap(short, long)]
        input: PathBuf,
        /// Where to write the rewritten feed. Prints to standard output when omitted.
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}
