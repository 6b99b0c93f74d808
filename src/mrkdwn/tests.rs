use std::collections::HashMap;

use super::*;
use crate::highlight::DEFAULT_THEME;
use crate::style::StyleSpec;

fn users() -> HashMap<String, String> {
    HashMap::from([("U42".to_string(), "grace".to_string())])
}

fn channels() -> HashMap<String, String> {
    HashMap::from([("C7".to_string(), "deploys".to_string())])
}

fn render_default(text: &str) -> String {
    render(text, &users(), &channels(), true, DEFAULT_THEME, &Styles::default())
}

fn render_disabled(text: &str) -> String {
    render(text, &users(), &channels(), false, DEFAULT_THEME, &Styles::default())
}

#[test]
fn test_bold_has_open_and_reset_and_no_asterisks() {
    let out = render_default("*bold*");
    assert_eq!(out, "[::b]bold[::B]");
    assert!(!out.contains('*'));
}

#[test]
fn test_inline_code_keeps_emphasis_literal() {
    let styles = Styles::default();
    let out = render_default("`*not bold*`");
    assert_eq!(out, styles.inline_code.wrap("*not bold*"));
    assert!(!out.contains("[::b]"));
}

#[test]
fn test_labeled_mention_without_directory_entry() {
    let out = render(
        "<@U1|Alice> hi",
        &HashMap::new(),
        &HashMap::new(),
        true,
        DEFAULT_THEME,
        &Styles::default(),
    );
    assert_eq!(out, "[yellow::b]Alice[-::B] hi");
    for hidden in ["<", "@", "U1", ">"] {
        assert!(!out.contains(hidden), "{hidden:?} leaked into {out:?}");
    }
}

#[test]
fn test_unknown_emoji_is_unchanged() {
    assert_eq!(render_default(":not_a_real_emoji:"), ":not_a_real_emoji:");
}

#[test]
fn test_known_emoji_is_replaced() {
    assert_eq!(render_default("ship it :rocket:"), "ship it 🚀");
}

#[test]
fn test_underscored_shortcodes_are_not_italic() {
    assert_eq!(render_default(":white_check_mark: ok"), "✅ ok");
    assert_eq!(render_default("_a_ :x_y_z:"), "[::i]a[::I] :x_y_z:");
}

#[test]
fn test_shortcode_inside_italic() {
    assert_eq!(
        render_default("_done :white_check_mark:_"),
        "[::i]done ✅[::I]"
    );
}

#[test]
fn test_escaped_brackets_survive_later_passes() {
    assert_eq!(
        render_default("[:tada:] and [a_b_]"),
        "[:tada:[] and [a_b_[]"
    );
    assert_eq!(render_default("*[red]*"), "[::b][red[][::B]");
}

#[test]
fn test_unknown_theme_falls_back_to_default() {
    let styles = Styles::default();
    let text = "```go\ncode\n```";
    let fallback = render(text, &users(), &channels(), true, "no-such-theme", &styles);
    let default = render(text, &users(), &channels(), true, DEFAULT_THEME, &styles);
    assert_eq!(fallback, default);
    assert!(fallback.starts_with(&styles.code_fence.wrap("```go")));
    assert!(fallback.ends_with(&styles.code_fence.wrap("```")));
    assert!(fallback.contains("code"));
}

#[test]
fn test_disabled_mode_resolves_tokens_without_styling() {
    let out = render(
        "*x* <@U1|Alice>",
        &HashMap::new(),
        &HashMap::new(),
        false,
        DEFAULT_THEME,
        &Styles::default(),
    );
    assert_eq!(out, "*x* Alice");
}

#[test]
fn test_disabled_mode_escapes_and_uses_directories() {
    assert_eq!(
        render_disabled("[red] <@U42> in <#C7> `code` > quote"),
        "[red[] grace in #deploys `code` > quote"
    );
}

#[test]
fn test_tag_like_text_is_escaped() {
    assert_eq!(render_default("see [red]here"), "see [red[]here");
}

#[test]
fn test_escaped_display_text_in_labels() {
    let out = render_default("<https://x.test|[blue]click>");
    assert_eq!(out, "[cyan::u][blue[]click[-::U]");
}

#[test]
fn test_directory_name_wins() {
    assert_eq!(render_default("<@U42>"), "[yellow::b]grace[-::B]");
    assert_eq!(render_default("<#C7|old>"), "[lightblue::b]#deploys[-::B]");
}

#[test]
fn test_unknown_mention_shows_raw_id() {
    assert_eq!(render_default("<@U999>"), "[yellow::b]U999[-::B]");
}

#[test]
fn test_special_mentions() {
    assert_eq!(render_default("<!here>"), "[lightred::b]@here[-::B]");
    assert_eq!(
        render_default("<!subteam^S1|@oncall>"),
        "[lightred::b]@oncall[-::B]"
    );
}

#[test]
fn test_mention_inside_bold() {
    assert_eq!(
        render_default("*hi <@U42>*"),
        "[::b]hi [yellow::b]grace[-::B][::B]"
    );
}

#[test]
fn test_emphasis_delimiters_inside_mentions_are_ignored() {
    let out = render_default("<https://x.test/a_b_c|a*b*c>");
    assert_eq!(out, "[cyan::u]a*b*c[-::U]");
}

#[test]
fn test_emphasis_order_and_nesting() {
    assert_eq!(render_default("_it_"), "[::i]it[::I]");
    assert_eq!(render_default("~gone~"), "[::s]gone[::S]");
    assert_eq!(
        render_default("*_both_*"),
        "[::b][::i]both[::I][::B]"
    );
}

#[test]
fn test_overlapping_emphasis_resolves_by_pass_order() {
    assert_eq!(render_default("*a _b* c_"), "[::b]a [::i]b[::B] c[::I]");
}

#[test]
fn test_emphasis_does_not_cross_lines() {
    assert_eq!(render_default("*a\nb*"), "*a\nb*");
}

#[test]
fn test_unterminated_constructs_stay_literal() {
    assert_eq!(render_default("<@U42 `tick *star"), "<@U42 `tick *star");
}

#[test]
fn test_blockquote() {
    let styles = Styles::default();
    let out = render_default("> hello");
    assert_eq!(
        out,
        format!(
            "{} {}hello{}",
            styles.quote_mark.wrap("▌"),
            styles.quote_text.open_tag(),
            styles.quote_text.close_tag()
        )
    );
}

#[test]
fn test_blockquote_encoded_marker_is_literal() {
    assert_eq!(render_default("&gt; hello"), "&gt; hello");
}

#[test]
fn test_quote_marker_is_not_emphasis() {
    let out = render_default("> a > b");
    assert!(out.ends_with("a > b[::I]"));
}

#[test]
fn test_text_around_code_block() {
    let styles = Styles::default();
    let out = render_default("before *b*\n```\nx = [1]\n```\nafter");
    let expected = format!(
        "before [::b]b[::B]\n{}\nx = [1[]\n{}\nafter",
        styles.code_fence.wrap("```"),
        styles.code_fence.wrap("```")
    );
    assert_eq!(out, expected);
}

#[test]
fn test_code_block_without_trailing_newline_gets_one() {
    let styles = Styles::default();
    let out = render_default("```inline *code*```");
    assert_eq!(
        out,
        format!(
            "{}\ninline *code*\n{}",
            styles.code_fence.wrap("```"),
            styles.code_fence.wrap("```")
        )
    );
}

#[test]
fn test_code_block_escapes_tag_like_text() {
    let out = render_default("```\n[red]\n```");
    assert!(out.contains("[red[]"));
}

#[test]
fn test_empty_input() {
    assert_eq!(render_default(""), "");
    assert_eq!(render_disabled(""), "");
}

#[test]
fn test_custom_styles_flow_through() {
    let styles = Styles {
        bold: StyleSpec::new().bold().underline(),
        ..Styles::default()
    };
    let out = render("*x*", &users(), &channels(), true, DEFAULT_THEME, &styles);
    assert_eq!(out, "[::bu]x[::BU]");
}

#[test]
fn test_segment_reexport_matches_render_split() {
    let text = "a```b```c";
    let segments = segment(text);
    assert_eq!(segments.len(), 3);
    assert!(segments[1].is_code());
}

#[test]
fn test_render_is_usable_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|n| std::thread::spawn(move || render_default(&format!("*{n}* :tada:"))))
        .collect();
    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("[::b]{n}[::B] 🎉"));
    }
}
