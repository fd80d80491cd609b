use hashbrown::HashSet;

/// Tags kept when no rule set is supplied.
pub const DEFAULT_ALLOWED_TAGS: [&str; 12] = [
    "p", "b", "strong", "ul", "li", "br", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// How many siblings after the block ancestor of a removed image or table are
/// searched for a caption.
pub const DEFAULT_CAPTION_SCAN_LIMIT: usize = 8;

/// Caption phrases of the marketplace preset.
const MARKETPLACE_ORPHAN_PHRASES: [&str; 9] = [
    "velikostní tabulka",
    "tabulka velikostí",
    "rozměry",
    "viz foto",
    "viz obrázek",
    "viz obrázek níže",
    "viz foto níže",
    "velikostní tabulka viz",
    "rozměry viz",
];

/// Tags the marketplace preset drops together with their content.
const MARKETPLACE_REMOVE_TAGS: [&str; 6] = ["iframe", "script", "object", "video", "style", "form"];

/// Rules for a cleaning run.
///
/// The configuration is read only while cleaning, so one value can be shared
/// by any number of concurrent calls.
///
/// ```
/// use listing_cleaner::CleaningConfig;
///
/// let mut config = CleaningConfig::default();
/// config
///     .with_allowed_tags(["p", "UL", "li"])
///     .with_orphan_phrases(["See Photo"])
///     .with_tables_to_lists(true);
///
/// assert!(config.allowed_tags.contains("ul"));
/// assert_eq!(config.orphan_phrases, vec!["see photo".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CleaningConfig {
    /// Lowercase tag names that survive cleaning. Everything else is unwrapped.
    pub allowed_tags: HashSet<String>,
    /// Lowercase phrases marking a block as the caption of removed media.
    pub orphan_phrases: Vec<String>,
    /// Convert tables into `ul`/`li` lists instead of dropping them.
    pub tables_to_lists: bool,
    /// Siblings searched for a caption after the block holding removed media.
    pub caption_scan_limit: usize,
    /// Tags removed together with their content before any other rule runs.
    pub remove_tags: HashSet<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        CleaningConfig {
            allowed_tags: DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect(),
            orphan_phrases: Vec::new(),
            tables_to_lists: false,
            caption_scan_limit: DEFAULT_CAPTION_SCAN_LIMIT,
            remove_tags: HashSet::new(),
        }
    }
}

/// Trim, lowercase and drop empty entries.
fn normalize_entries<I, S>(entries: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

/// Split a comma separated rule field into normalized entries.
pub fn parse_rule_list(value: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for entry in normalize_entries(value.split(',')) {
        if !out.contains(&entry) {
            out.push(entry);
        }
    }
    out
}

impl CleaningConfig {
    /// Build a configuration from the comma separated rule inputs of the
    /// cleaning wizard, e.g. `"p, b, ul, li"` and `"see photo, size chart"`.
    pub fn from_rule_strings(allowed_tags: &str, orphan_phrases: &str) -> Self {
        let mut config = CleaningConfig::default();
        config
            .with_allowed_tags(parse_rule_list(allowed_tags))
            .with_orphan_phrases(parse_rule_list(orphan_phrases));
        config
    }

    /// Rules used for marketplace product feeds: default formatting tags,
    /// common Czech caption phrases and active content dropped outright.
    pub fn marketplace() -> Self {
        let mut config = CleaningConfig::default();
        config
            .with_orphan_phrases(MARKETPLACE_ORPHAN_PHRASES)
            .with_remove_tags(MARKETPLACE_REMOVE_TAGS);
        config
    }

    /// Replace the allowed tag set.
    pub fn with_allowed_tags<I, S>(&mut self, allowed_tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_tags = normalize_entries(allowed_tags).collect();
        self
    }

    /// Replace the orphan caption phrases.
    pub fn with_orphan_phrases<I, S>(&mut self, orphan_phrases: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.orphan_phrases = normalize_entries(orphan_phrases).collect();
        self
    }

    /// Flatten tables into lists instead of removing them.
    pub fn with_tables_to_lists(&mut self, tables_to_lists: bool) -> &mut Self {
        self.tables_to_lists = tables_to_lists;
        self
    }

    /// Bound the forward caption search.
    pub fn with_caption_scan_limit(&mut self, caption_scan_limit: usize) -> &mut Self {
        self.caption_scan_limit = caption_scan_limit;
        self
    }

    /// Replace the set of tags dropped with their content.
    pub fn with_remove_tags<I, S>(&mut self, remove_tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.remove_tags = normalize_entries(remove_tags).collect();
        self
    }
}
