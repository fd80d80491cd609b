use crate::options::sub_command::Commands;
use clap::Parser;
use listing_cleaner::configuration::parse_rule_list;
use listing_cleaner::CleaningConfig;
use std::path::PathBuf;

/// program to clean product description markup with a set of rules.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Build main sub commands
    #[clap(subcommand)]
    pub command: Option<Commands>,
    /// Comma seperated list of tags to keep, ex: "p,b,ul,li".
    #[clap(short, long, global = true)]
    pub allowed_tags: Option<String>,
    /// Comma seperated list of caption phrases removed next to images and tables.
    #[clap(short = 'p', long, global = true)]
    pub orphan_phrases: Option<String>,
    /// Convert tables into lists instead of removing them.
    #[clap(short, long, global = true)]
    pub tables_to_lists: bool,
    /// How many siblings after an image block are searched for a caption.
    #[clap(long, global = true)]
    pub caption_scan_limit: Option<usize>,
    /// Comma seperated list of tags removed together with their content.
    #[clap(long, global = true)]
    pub remove_tags: Option<String>,
    /// JSON rule file. Flags given on the command line take precedence.
    #[clap(short, long, global = true)]
    pub rules: Option<PathBuf>,
    /// Start from the marketplace feed rules.
    #[clap(short, long, global = true, conflicts_with = "rules")]
    pub marketplace: bool,
    /// Log cleaning progress on standard error
    #[clap(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// The rules for this run: the rule file or preset, then the flags.
    pub fn config(&self) -> Result<CleaningConfig, Box<dyn std::error::Error>> {
        let mut config: CleaningConfig = match &self.rules {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None if self.marketplace => CleaningConfig::marketplace(),
            None => CleaningConfig::default(),
        };

        if let Some(allowed_tags) = &self.allowed_tags {
            config.with_allowed_tags(parse_rule_list(allowed_tags));
        }
        if let Some(orphan_phrases) = &self.orphan_phrases {
            config.with_orphan_phrases(parse_rule_list(orphan_phrases));
        }
        if let Some(remove_tags) = &self.remove_tags {
            config.with_remove_tags(parse_rule_list(remove_tags));
        }
        if let Some(caption_scan_limit) = self.caption_scan_limit {
            config.with_caption_scan_limit(caption_scan_limit);
        }
        if self.tables_to_lists {
            config.with_tables_to_lists(true);
        }

        Ok(config)
    }
}
