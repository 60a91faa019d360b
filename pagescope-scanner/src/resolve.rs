use url::Url;

/// Resolve `href` against `base` following RFC 3986 reference resolution.
///
/// Falls back to returning `href` untouched when either side does not parse,
/// so callers never have to handle a failure here.
pub fn resolve_url(href: &str, base: &str) -> String {
    let Ok(base_url) = Url::parse(base) else {
        return href.to_string();
    };

    match base_url.join(href) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

/// An href that only points somewhere inside the current page.
pub fn is_fragment_only(href: &str) -> bool {
    href.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_root_relative() {
        assert_eq!(
            resolve_url("/path", "https://example.com"),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_resolve_path_relative_merges_with_base_directory() {
        assert_eq!(
            resolve_url("c", "https://example.com/a/b"),
            "https://example.com/a/c"
        );
        assert_eq!(
            resolve_url("../d", "https://example.com/a/b/"),
            "https://example.com/a/d"
        );
    }

    #[test]
    fn test_resolve_absolute_reference_is_kept() {
        assert_eq!(
            resolve_url("https://other.com/x?q=1", "https://example.com/a"),
            "https://other.com/x?q=1"
        );
    }

    #[test]
    fn test_resolve_scheme_relative() {
        assert_eq!(
            resolve_url("//cdn.example.net/lib.js", "https://example.com/"),
            "https://cdn.example.net/lib.js"
        );
    }

    #[test]
    fn test_resolve_fragment_reference() {
        assert_eq!(
            resolve_url("#top", "https://example.com/page"),
            "https://example.com/page#top"
        );
        assert!(is_fragment_only("#top"));
        assert!(!is_fragment_only("/page#top"));
    }

    #[test]
    fn test_resolve_invalid_base_returns_href() {
        assert_eq!(resolve_url("/about", "not a url"), "/about");
    }

    #[test]
    fn test_resolve_invalid_href_returns_href() {
        assert_eq!(
            resolve_url("http://[::1", "https://example.com"),
            "http://[::1"
        );
    }
}
