//! The HTML element catalog.
//!
//! The scanner needs two facts about an element: whether its content is
//! raw text up to its own end tag (a "special" element such as SCRIPT),
//! and where it sits by default so the byte replay buffer can be
//! released once body content begins.

/// Catalog entry for one HTML element.
#[derive(Debug)]
pub struct Element {
    /// Canonical uppercase name.
    pub name: &'static str,
    /// Content is opaque text until the matching end tag.
    pub special: bool,
    /// Default parent element, when the element has a conventional one.
    pub parent: Option<&'static str>,
}

const fn body(name: &'static str) -> Element {
    Element {
        name,
        special: false,
        parent: Some("BODY"),
    }
}

const fn head(name: &'static str) -> Element {
    Element {
        name,
        special: false,
        parent: Some("HEAD"),
    }
}

const fn nested(name: &'static str, parent: &'static str) -> Element {
    Element {
        name,
        special: false,
        parent: Some(parent),
    }
}

const fn special(name: &'static str, parent: &'static str) -> Element {
    Element {
        name,
        special: true,
        parent: Some(parent),
    }
}

static ELEMENTS: &[Element] = &[
    Element { name: "HTML", special: false, parent: None },
    nested("HEAD", "HTML"),
    nested("BODY", "HTML"),
    nested("FRAMESET", "HTML"),
    // head content
    head("BASE"),
    head("BASEFONT"),
    head("ISINDEX"),
    head("LINK"),
    head("META"),
    head("TITLE"),
    special("SCRIPT", "HEAD"),
    special("STYLE", "HEAD"),
    // raw-text body content
    special("COMMENT", "BODY"),
    special("XMP", "BODY"),
    special("TEXTAREA", "BODY"),
    // table structure
    nested("CAPTION", "TABLE"),
    nested("COLGROUP", "TABLE"),
    nested("COL", "COLGROUP"),
    nested("THEAD", "TABLE"),
    nested("TBODY", "TABLE"),
    nested("TFOOT", "TABLE"),
    nested("TR", "TBODY"),
    nested("TD", "TR"),
    nested("TH", "TR"),
    // list structure
    nested("LI", "UL"),
    nested("DT", "DL"),
    nested("DD", "DL"),
    // forms
    nested("OPTION", "SELECT"),
    nested("OPTGROUP", "SELECT"),
    nested("LEGEND", "FIELDSET"),
    nested("AREA", "MAP"),
    nested("PARAM", "OBJECT"),
    nested("FRAME", "FRAMESET"),
    // body flow
    body("A"),
    body("ABBR"),
    body("ACRONYM"),
    body("ADDRESS"),
    body("APPLET"),
    body("B"),
    body("BDO"),
    body("BIG"),
    body("BLOCKQUOTE"),
    body("BR"),
    body("BUTTON"),
    body("CENTER"),
    body("CITE"),
    body("CODE"),
    body("DEL"),
    body("DFN"),
    body("DIR"),
    body("DIV"),
    body("DL"),
    body("EM"),
    body("FIELDSET"),
    body("FONT"),
    body("FORM"),
    body("H1"),
    body("H2"),
    body("H3"),
    body("H4"),
    body("H5"),
    body("H6"),
    body("HR"),
    body("I"),
    body("IFRAME"),
    body("IMG"),
    body("INPUT"),
    body("INS"),
    body("KBD"),
    body("LABEL"),
    body("MAP"),
    body("MENU"),
    body("NOBR"),
    body("NOFRAMES"),
    body("NOSCRIPT"),
    body("OBJECT"),
    body("OL"),
    body("P"),
    body("PRE"),
    body("Q"),
    body("S"),
    body("SAMP"),
    body("SELECT"),
    body("SMALL"),
    body("SPAN"),
    body("STRIKE"),
    body("STRONG"),
    body("SUB"),
    body("SUP"),
    body("TABLE"),
    body("TT"),
    body("U"),
    body("UL"),
    body("VAR"),
    body("WBR"),
];

/// Looks up an element by name, ASCII case-insensitively. Unknown
/// elements return `None`: they are neither special nor positioned.
pub fn get(name: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(get("script").unwrap().name, "SCRIPT");
        assert_eq!(get("Script").unwrap().name, "SCRIPT");
        assert_eq!(get("SCRIPT").unwrap().name, "SCRIPT");
    }

    #[test]
    fn raw_text_elements() {
        assert!(get("script").unwrap().special);
        assert!(get("style").unwrap().special);
        assert!(get("comment").unwrap().special);
        assert!(get("xmp").unwrap().special);
        assert!(!get("div").unwrap().special);
        assert!(!get("title").unwrap().special);
    }

    #[test]
    fn default_parents() {
        assert_eq!(get("p").unwrap().parent, Some("BODY"));
        assert_eq!(get("meta").unwrap().parent, Some("HEAD"));
        assert_eq!(get("td").unwrap().parent, Some("TR"));
        assert_eq!(get("html").unwrap().parent, None);
    }

    #[test]
    fn unknown_elements() {
        assert!(get("custom-widget").is_none());
        assert!(get("").is_none());
    }
}
