//! The cleaning pipeline.
//!
//! A fragment goes through five passes in a fixed order, each one working on
//! the tree the previous pass left behind:
//!
//! 1. [`media`] drops images (and tables unless they are flattened) together
//!    with orphaned captions around them.
//! 2. [`tables`] turns the remaining tables into lists.
//! 3. [`whitelist`] unwraps disallowed elements and strips attributes.
//! 4. [`empty_blocks`] prunes paragraphs and divisions left without text.
//! 5. [`bare_text`] wraps top level text in paragraphs.

use aho_corasick::AhoCorasick;
use hashbrown::HashSet;
use log::{debug, warn};
use rayon::prelude::*;

use crate::configuration::CleaningConfig;
use crate::error::{Error, Result};
use crate::packages::fragment::Fragment;
use crate::utils::{normalize_nbsp, trim_text};

pub mod bare_text;
pub mod empty_blocks;
pub mod media;
pub mod tables;
pub mod whitelist;

/// Case-insensitive "contains any phrase" test for caption candidates.
#[derive(Debug, Clone)]
pub enum OrphanMatcher {
    /// No phrases configured, nothing is an orphan.
    Empty,
    /// Multi-pattern automaton over the lowercase phrases.
    Automaton(AhoCorasick),
    /// Plain substring scan, used when the automaton cannot be built.
    Phrases(Vec<String>),
}

impl OrphanMatcher {
    /// Compile the phrases. Blank phrases are ignored.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        if phrases.is_empty() {
            return OrphanMatcher::Empty;
        }

        match AhoCorasick::new(&phrases) {
            Ok(automaton) => OrphanMatcher::Automaton(automaton),
            Err(e) => {
                warn!("orphan phrase automaton unavailable, scanning phrases one by one: {e}");
                OrphanMatcher::Phrases(phrases)
            }
        }
    }

    /// True when the trimmed, lowercased text contains any phrase.
    pub fn is_orphan(&self, text: &str) -> bool {
        let haystack = || trim_text(text).to_lowercase();

        match self {
            OrphanMatcher::Empty => false,
            OrphanMatcher::Automaton(automaton) => automaton.is_match(&haystack()),
            OrphanMatcher::Phrases(phrases) => {
                let haystack = haystack();
                phrases.iter().any(|p| haystack.contains(p.as_str()))
            }
        }
    }
}

/// Compiled cleaning rules, reusable across any number of fragments.
#[derive(Debug, Clone)]
pub struct Cleaner {
    /// Tags that survive the whitelist pass.
    pub allowed_tags: HashSet<String>,
    /// Tags removed with their content during the media pass.
    pub remove_tags: HashSet<String>,
    /// Caption matcher.
    pub orphans: OrphanMatcher,
    /// Flatten tables into lists.
    pub tables_to_lists: bool,
    /// Forward caption scan bound.
    pub caption_scan_limit: usize,
}

/// Per pass counters of one cleaning run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    /// Nodes deleted by the media pass.
    pub removed: usize,
    /// Tables converted to lists.
    pub flattened: usize,
    /// Elements unwrapped by the whitelist pass.
    pub unwrapped: usize,
    /// Empty blocks pruned.
    pub pruned: usize,
    /// Top level text nodes wrapped in paragraphs.
    pub wrapped: usize,
}

impl Cleaner {
    /// Compile a configuration. Tag names and phrases are normalized again so
    /// configurations deserialized from rule files behave like built ones.
    pub fn new(config: &CleaningConfig) -> Self {
        let lower = |set: &HashSet<String>| -> HashSet<String> {
            set.iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect()
        };

        Cleaner {
            allowed_tags: lower(&config.allowed_tags),
            remove_tags: lower(&config.remove_tags),
            orphans: OrphanMatcher::new(&config.orphan_phrases),
            tables_to_lists: config.tables_to_lists,
            caption_scan_limit: config.caption_scan_limit,
        }
    }

    /// Run every pass over a parsed fragment.
    pub fn run_passes(&self, fragment: &mut Fragment) -> PassStats {
        let removed = media::strip_media(fragment, self);
        let flattened = if self.tables_to_lists {
            tables::flatten_tables(fragment)
        } else {
            0
        };
        let unwrapped = whitelist::normalize_tags(fragment, &self.allowed_tags);
        let pruned = empty_blocks::prune_empty_blocks(fragment);
        let wrapped = bare_text::wrap_bare_text(fragment);

        PassStats {
            removed,
            flattened,
            unwrapped,
            pruned,
            wrapped,
        }
    }

    /// Clean one fragment of markup.
    ///
    /// Blank input yields an empty string without parsing.
    pub fn clean(&self, html: &str) -> Result<String> {
        let html = trim_text(html);

        if html.is_empty() {
            return Ok(String::new());
        }

        let mut fragment = Fragment::parse(html);
        let stats = self.run_passes(&mut fragment);

        debug!(
            "cleaned fragment: removed={} flattened={} unwrapped={} pruned={} wrapped={}",
            stats.removed, stats.flattened, stats.unwrapped, stats.pruned, stats.wrapped
        );

        let serialized = fragment.inner_html().map_err(Error::Serialize)?;

        Ok(trim_text(&normalize_nbsp(&serialized)).to_string())
    }

    /// Clean many fragments in parallel. Output order follows input order.
    pub fn clean_batch<S>(&self, htmls: &[S]) -> Vec<Result<String>>
    where
        S: AsRef<str> + Sync,
    {
        htmls.par_iter().map(|html| self.clean(html.as_ref())).collect()
    }
}
