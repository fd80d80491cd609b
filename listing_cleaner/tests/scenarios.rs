use listing_cleaner::{clean_batch, clean_description, clean_optional, CleaningConfig};
use pretty_assertions::assert_eq;

fn config(allowed: &[&str], phrases: &[&str], tables_to_lists: bool) -> CleaningConfig {
    let mut config = CleaningConfig::default();
    config
        .with_allowed_tags(allowed.iter())
        .with_orphan_phrases(phrases.iter())
        .with_tables_to_lists(tables_to_lists);
    config
}

fn clean(html: &str, config: &CleaningConfig) -> String {
    clean_description(html, config).unwrap()
}

#[test]
fn disallowed_inline_tags_are_unwrapped() {
    let config = config(&["p"], &[], false);
    assert_eq!(clean("<p>Hello <b>World</b></p>", &config), "<p>Hello World</p>");
}

#[test]
fn image_caption_in_parent_is_removed() {
    let config = config(&["p"], &["photo above"], false);
    assert_eq!(
        clean(r#"<p><img src="x.jpg"><br>see photo above</p>"#, &config),
        ""
    );
}

#[test]
fn table_becomes_list() {
    let config = config(&["ul", "li"], &[], true);
    assert_eq!(
        clean("<table><tr><td>A</td><td>B</td></tr></table>", &config),
        "<ul><li>A – B</li></ul>"
    );
}

#[test]
fn plain_text_is_wrapped() {
    let config = config(&["p"], &[], false);
    assert_eq!(
        clean("Plain text with no tags", &config),
        "<p>Plain text with no tags</p>"
    );
}

#[test]
fn hollow_blocks_are_pruned() {
    let config = config(&["p", "div"], &[], false);
    assert_eq!(clean("<div></div><p>   </p><p>Keep</p>", &config), "<p>Keep</p>");
}

#[test]
fn blank_and_missing_input() {
    let config = CleaningConfig::default();
    assert_eq!(clean("", &config), "");
    assert_eq!(clean("   ", &config), "");
    assert_eq!(clean_optional(None, &config).unwrap(), "");
    assert_eq!(
        clean_optional(Some("<b>x</b>"), &config).unwrap(),
        "<b>x</b>"
    );
}

#[test]
fn tables_removed_when_not_flattened() {
    let config = config(&["p", "table", "tr", "td"], &[], false);
    assert_eq!(
        clean("<p>before</p><table><tr><td>cell</td></tr></table><p>after</p>", &config),
        "<p>before</p><p>after</p>"
    );
}

#[test]
fn caption_after_table_is_removed_when_flattening() {
    let config = config(&["p", "ul", "li"], &["table above"], true);
    assert_eq!(
        clean(
            "<table><tr><th>Size</th><th>Chest</th></tr><tr><td>M</td><td>96</td></tr></table><p>See the table above.</p><p>Cotton</p>",
            &config
        ),
        "<ul><li>Size – Chest</li><li>M – 96</li></ul><p>Cotton</p>"
    );
}

#[test]
fn forward_caption_scan_stops_at_first_match() {
    let config = config(&["p"], &["viz foto"], false);
    let html = "<div><p><img src=a.jpg></p></div><p>Bavlna</p><p>Viz foto</p><p>viz foto</p>";
    // the image paragraph has no following sibling, the scan starts after the div
    assert_eq!(
        clean(html, &config),
        "<p>Bavlna</p><p>viz foto</p>"
    );
}

#[test]
fn anchor_around_image_goes_with_it() {
    let config = config(&["p"], &[], false);
    assert_eq!(
        clean(r#"<p>Zoom: <a href="big.jpg"><img src="small.jpg"> click</a></p>"#, &config),
        "<p>Zoom: </p>"
    );
}

#[test]
fn attributes_are_stripped_and_nbsp_normalized() {
    let config = CleaningConfig::default();
    assert_eq!(
        clean(
            r#"<p style="margin:0" class="MsoNormal">Soft&nbsp;<strong data-x="1">wool</strong></p>"#,
            &config
        ),
        "<p>Soft <strong>wool</strong></p>"
    );
}

#[test]
fn wrapper_paragraph_even_when_nothing_is_allowed() {
    let config = config(&[], &[], false);
    assert_eq!(clean("<span>x</span><div>y</div>", &config), "<p>x</p><p>y</p>");
}

#[test]
fn text_survives_unwrapping() {
    let config = config(&["p"], &[], false);
    assert_eq!(
        clean(
            "<div><font face=Arial><i>Warm</i> <u>winter</u></font> hat</div>",
            &config
        ),
        "<p>Warm</p> <p>winter</p><p>hat</p>"
    );
}

#[test]
fn remove_tags_drop_their_text() {
    let config = CleaningConfig::marketplace();
    assert_eq!(
        clean(
            "<p>Text<script>var a = 1;</script></p><iframe src=x></iframe><form><p>Buy</p></form>",
            &config
        ),
        "<p>Text</p>"
    );
}

#[test]
fn rule_strings_drive_cleaning() {
    let config = CleaningConfig::from_rule_strings("P, LI, UL", "Size Chart");
    assert_eq!(
        clean(
            "<ul><li>one</li></ul><img src=a.png><p>Size chart above</p>",
            &config
        ),
        "<ul><li>one</li></ul>"
    );
}

#[test]
fn batch_matches_single_calls() {
    let config = config(&["p", "b"], &["photo"], false);
    let inputs = vec![
        "<p><b>a</b></p>".to_string(),
        "".to_string(),
        "<div><img src=a></div><p>photo</p><p>z</p>".to_string(),
    ];
    let expected: Vec<String> = inputs.iter().map(|h| clean(h, &config)).collect();
    let batch: Vec<String> = clean_batch(&inputs, &config)
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(batch, expected);
}
