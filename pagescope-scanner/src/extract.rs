//! Pure extractors over a [`Document`]. None of these perform I/O.

use crate::document::{Document, Node, NodeId};
use crate::result::{HeadingCounts, HeadingLevel, HtmlVersion};

/// Substrings that mark markup as part of a sign-in flow. Matched against
/// lower-cased text, so they must stay lower-case.
pub const LOGIN_KEYWORDS: [&str; 6] = [
    "login", "log in", "sign in", "password", "email", "username",
];

const LOGIN_TAGS: [&str; 4] = ["form", "input", "button", "label"];

/// `Html5` when any content-type value mentions `html` (case-sensitive).
/// This looks at the response headers, not at the doctype.
pub fn detect_html_version<S: AsRef<str>>(content_types: &[S]) -> HtmlVersion {
    if content_types.iter().any(|ct| ct.as_ref().contains("html")) {
        HtmlVersion::Html5
    } else {
        HtmlVersion::Unknown
    }
}

/// Text of the first `<title>` that has any children, untrimmed.
pub fn extract_title(doc: &Document) -> String {
    doc.elements()
        .find(|(_, el)| el.name == "title" && !el.children.is_empty())
        .map(|(_, el)| match doc.node(el.children[0]) {
            Node::Text(text) => text.clone(),
            Node::Element(_) => String::new(),
        })
        .unwrap_or_default()
}

pub fn count_headings(doc: &Document) -> HeadingCounts {
    let mut counts = HeadingCounts::new();
    for (_, el) in doc.elements() {
        if let Some(level) = HeadingLevel::from_tag(&el.name) {
            *counts.entry(level).or_insert(0) += 1;
        }
    }
    counts
}

/// Heuristic: does any form control, or its label, mention a login keyword?
///
/// Every `form`, `input`, `button` and `label` element is checked against
/// its own attribute values and the text beneath it. The walk stops at the
/// first hit.
pub fn contains_login_form(doc: &Document) -> bool {
    doc.elements()
        .filter(|(_, el)| LOGIN_TAGS.contains(&el.name.as_str()))
        .any(|(id, _)| element_mentions_login(doc, id))
}

fn element_mentions_login(doc: &Document, id: NodeId) -> bool {
    let Some(el) = doc.node(id).as_element() else {
        return false;
    };

    if el.attrs.iter().any(|(_, value)| has_login_keyword(value)) {
        return true;
    }

    doc.descendants_of(id)
        .filter_map(|child| doc.node(child).as_text())
        .any(has_login_keyword)
}

fn has_login_keyword(value: &str) -> bool {
    let lowered = value.to_lowercase();
    LOGIN_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Test Page</title></head>
<body>
	<h1>Main</h1><h2>Sub</h2><h3>SubSub</h3>
	<form><input type="password"/></form>
	<a href="/internal">Internal</a>
</body>
</html>
"#;

    #[test]
    fn test_detect_html_version() {
        assert_eq!(detect_html_version(&["text/html"]), HtmlVersion::Html5);
        assert_eq!(
            detect_html_version(&["application/json", "application/xhtml+xml"]),
            HtmlVersion::Html5
        );
        assert_eq!(
            detect_html_version(&["application/json"]),
            HtmlVersion::Unknown
        );
        assert_eq!(detect_html_version::<&str>(&[]), HtmlVersion::Unknown);
    }

    #[test]
    fn test_detect_html_version_is_case_sensitive() {
        assert_eq!(detect_html_version(&["TEXT/HTML"]), HtmlVersion::Unknown);
    }

    #[test]
    fn test_extract_title() {
        let doc = Document::parse(TEST_HTML);
        assert_eq!(extract_title(&doc), "Test Page");
    }

    #[test]
    fn test_extract_title_keeps_whitespace() {
        let doc = Document::parse("<title>  Spaced  </title>");
        assert_eq!(extract_title(&doc), "  Spaced  ");
    }

    #[test]
    fn test_extract_title_first_non_empty_wins() {
        let doc = Document::parse(
            "<html><head><title></title><title>Second</title></head><body></body></html>",
        );
        assert_eq!(extract_title(&doc), "Second");
    }

    #[test]
    fn test_extract_title_element_first_child_is_empty() {
        let doc = Document::parse(
            "<html><body><svg><title><tspan>Chart</tspan></title></svg></body></html>",
        );
        assert_eq!(extract_title(&doc), "");
    }

    #[test]
    fn test_extract_title_missing() {
        let doc = Document::parse("<html><body><h1>No title</h1></body></html>");
        assert_eq!(extract_title(&doc), "");
    }

    #[test]
    fn test_count_headings() {
        let doc = Document::parse(TEST_HTML);
        let counts = count_headings(&doc);
        assert_eq!(counts.get(&HeadingLevel::H1), Some(&1));
        assert_eq!(counts.get(&HeadingLevel::H2), Some(&1));
        assert_eq!(counts.get(&HeadingLevel::H3), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_count_headings_nested_and_repeated() {
        let doc = Document::parse(
            "<body><section><h2>a</h2><div><h2>b</h2><h6>c</h6></div></section><h2>d</h2></body>",
        );
        let counts = count_headings(&doc);
        assert_eq!(counts.get(&HeadingLevel::H2), Some(&3));
        assert_eq!(counts.get(&HeadingLevel::H6), Some(&1));
        assert!(counts.values().all(|&n| n > 0));
        assert!(!counts.contains_key(&HeadingLevel::H1));
    }

    #[test]
    fn test_login_form_detected_from_password_input() {
        let doc = Document::parse(TEST_HTML);
        assert!(contains_login_form(&doc));
    }

    #[test]
    fn test_login_form_detected_from_form_attribute() {
        let doc = Document::parse(r#"<form id="Login-Form"><input type="text"></form>"#);
        assert!(contains_login_form(&doc));
    }

    #[test]
    fn test_login_form_detected_from_label_text() {
        let doc = Document::parse("<label>Your Password</label>");
        assert!(contains_login_form(&doc));
    }

    #[test]
    fn test_login_form_detected_from_nested_button_text() {
        let doc = Document::parse("<button><span>Sign In</span></button>");
        assert!(contains_login_form(&doc));
    }

    #[test]
    fn test_login_form_ignores_text_outside_form_controls() {
        let doc = Document::parse("<p>Please sign in to continue</p><div class='login'></div>");
        assert!(!contains_login_form(&doc));
    }

    #[test]
    fn test_login_form_absent_without_keywords() {
        let doc = Document::parse(
            r#"<form action="/search"><input type="text" name="q"><button>Search</button></form>"#,
        );
        assert!(!contains_login_form(&doc));
    }
}
