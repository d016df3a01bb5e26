//! Entity-reference resolution in content and attribute values.

mod support;

use pretty_assertions::assert_eq;
use support::{scan_source, scan_text};
use tagsoup::{Config, InputSource};

#[test]
fn named_references_resolve() {
    assert_eq!(
        scan_text("a&lt;b&gt;c&amp;d"),
        ["StartDocument", "Characters(a<b>c&d)", "EndDocument"]
    );
}

#[test]
fn named_references_are_case_sensitive() {
    assert_eq!(
        scan_text("&Agrave;&agrave;"),
        ["StartDocument", "Characters(Àà)", "EndDocument"]
    );
}

#[test]
fn decimal_reference() {
    assert_eq!(
        scan_text("&#65;&#233;"),
        ["StartDocument", "Characters(Aé)", "EndDocument"]
    );
}

#[test]
fn hex_reference() {
    assert_eq!(
        scan_text("&#x41;&#xE9;&#X2014;"),
        ["StartDocument", "Characters(Aé\u{2014})", "EndDocument"]
    );
}

#[test]
fn unknown_named_reference_is_literal() {
    let (events, reports) = scan_source(Config::default(), InputSource::from_text("&nosuch; text"));
    assert_eq!(
        events,
        ["StartDocument", "Characters(&nosuch; text)", "EndDocument"]
    );
    assert_eq!(reports, ["W HTML1006 nosuch"]);
}

#[test]
fn unterminated_reference_is_literal() {
    let (events, reports) = scan_source(Config::default(), InputSource::from_text("a &b c"));
    assert_eq!(
        events,
        ["StartDocument", "Characters(a &b c)", "EndDocument"]
    );
    assert_eq!(reports, ["E HTML1004"]);
}

#[test]
fn reference_cut_off_at_eof_is_literal() {
    let (events, reports) = scan_source(Config::default(), InputSource::from_text("x&amp"));
    assert_eq!(
        events,
        ["StartDocument", "Characters(x&amp)", "EndDocument"]
    );
    assert_eq!(reports, ["E HTML1004"]);
}

#[test]
fn bare_ampersand_semicolon_is_literal() {
    let (events, _) = scan_source(Config::default(), InputSource::from_text("a&;b"));
    assert_eq!(
        events,
        ["StartDocument", "Characters(a&;b)", "EndDocument"]
    );
}

#[test]
fn malformed_numeric_reference_is_literal() {
    let (events, reports) = scan_source(Config::default(), InputSource::from_text("&#xZZ;&#99999999;"));
    assert_eq!(
        events,
        [
            "StartDocument",
            "Characters(&#xZZ;&#99999999;)",
            "EndDocument",
        ]
    );
    assert_eq!(
        reports,
        ["E HTML1005 #xZZ", "E HTML1005 #99999999"]
    );
}

#[test]
fn surrogate_codepoint_is_malformed() {
    let (events, reports) = scan_source(Config::default(), InputSource::from_text("&#xD800;"));
    assert_eq!(
        events,
        ["StartDocument", "Characters(&#xD800;)", "EndDocument"]
    );
    assert_eq!(reports, ["E HTML1005 #xD800"]);
}

#[test]
fn char_ref_notification_wraps_numeric_references() {
    let mut config = Config::default();
    config.notify_char_refs = true;
    let (events, _) = scan_source(config, InputSource::from_text("x&#x41;y"));
    assert_eq!(
        events,
        [
            "StartDocument",
            "Characters(x)",
            "StartEntity(#x41)",
            "Characters(A)",
            "EndEntity(#x41)",
            "Characters(y)",
            "EndDocument",
        ]
    );
}

#[test]
fn xml_builtin_notification_covers_the_five_builtins_only() {
    let mut config = Config::default();
    config.notify_xml_builtin_refs = true;
    let (events, _) = scan_source(config, InputSource::from_text("&amp;&copy;"));
    assert_eq!(
        events,
        [
            "StartDocument",
            "StartEntity(amp)",
            "Characters(&)",
            "EndEntity(amp)",
            "Characters(©)",
            "EndDocument",
        ]
    );
}

#[test]
fn html_builtin_notification_covers_named_references() {
    let mut config = Config::default();
    config.notify_html_builtin_refs = true;
    let (events, _) = scan_source(config, InputSource::from_text("&copy;"));
    assert_eq!(
        events,
        [
            "StartDocument",
            "StartEntity(copy)",
            "Characters(©)",
            "EndEntity(copy)",
            "EndDocument",
        ]
    );
}

#[test]
fn numeric_references_resolve_inside_quoted_values() {
    assert_eq!(
        scan_text(r#"<a b="&#x26;&lt;">"#),
        [
            "StartDocument",
            r#"StartElement(a [b="&<"])"#,
            "EndDocument",
        ]
    );
}

#[test]
fn attribute_values_never_produce_entity_events() {
    let mut config = Config::default();
    config.notify_char_refs = true;
    config.notify_html_builtin_refs = true;
    let (events, _) = scan_source(config, InputSource::from_text(r#"<a b="&amp;&#65;">"#));
    assert_eq!(
        events,
        [
            "StartDocument",
            r#"StartElement(a [b="&A"])"#,
            "EndDocument",
        ]
    );
}

#[test]
fn unresolved_reference_in_quoted_value_keeps_raw_text() {
    let (events, reports) = scan_source(
        Config::default(),
        InputSource::from_text(r#"<a b="&unknown;&#bad;">"#),
    );
    assert_eq!(
        events,
        [
            "StartDocument",
            r#"StartElement(a [b="&unknown;&#bad;"])"#,
            "EndDocument",
        ]
    );
    assert_eq!(reports, ["W HTML1006 unknown", "E HTML1005 #bad"]);
}
