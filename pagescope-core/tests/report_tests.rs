// Tests for report generation functionality

use pagescope_core::analyze::PageReport;
use pagescope_core::report::{
    ReportFormat, ReportSummary, generate_json_report, generate_report, generate_text_report,
    save_report,
};
use pagescope_scanner::{AnalysisResult, HeadingLevel, HtmlVersion, LinkAnalysis};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn sample_analysis() -> AnalysisResult {
    let mut headings_count = BTreeMap::new();
    headings_count.insert(HeadingLevel::H1, 1);
    headings_count.insert(HeadingLevel::H3, 4);

    AnalysisResult {
        html_version: HtmlVersion::Html5,
        title: "Sign in - Example".to_string(),
        headings_count,
        login_form_exists: true,
        link_analysis: LinkAnalysis {
            internal_links: 5,
            external_links: 2,
            inaccessible_links: 1,
        },
    }
}

fn sample_pages() -> Vec<PageReport> {
    vec![
        PageReport::success("https://example.com/login".to_string(), sample_analysis()),
        PageReport::failure(
            "https://down.example.org/".to_string(),
            "Connection failed for https://down.example.org/: refused".to_string(),
        ),
    ]
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str_text() {
    let format = ReportFormat::from_str("text");
    assert!(matches!(format, Some(ReportFormat::Text)));
}

#[test]
fn test_report_format_from_str_json() {
    let format = ReportFormat::from_str("json");
    assert!(matches!(format, Some(ReportFormat::Json)));
}

#[test]
fn test_report_format_from_str_case_insensitive() {
    assert!(matches!(
        ReportFormat::from_str("TEXT"),
        Some(ReportFormat::Text)
    ));
    assert!(matches!(
        ReportFormat::from_str("Json"),
        Some(ReportFormat::Json)
    ));
}

#[test]
fn test_report_format_from_str_unknown() {
    assert!(ReportFormat::from_str("markdown").is_none());
    assert!(ReportFormat::from_str("").is_none());
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_summary_counts_successes_and_failures() {
    let summary = ReportSummary::from_pages(&sample_pages());

    assert_eq!(summary.pages_analyzed, 1);
    assert_eq!(summary.pages_failed, 1);
    assert_eq!(summary.internal_links, 5);
    assert_eq!(summary.external_links, 2);
    assert_eq!(summary.inaccessible_links, 1);
    assert_eq!(summary.login_forms, 1);
}

// ============================================================================
// Text Report Tests
// ============================================================================

#[test]
fn test_text_report_contents() {
    let report = generate_text_report(&sample_pages());

    assert!(report.contains("# Summary:"));
    assert!(report.contains("Pages analyzed: 1"));
    assert!(report.contains("Pages failed: 1"));
    assert!(report.contains("## example.com"));
    assert!(report.contains("## down.example.org"));
    assert!(report.contains("HTML version:       HTML5"));
    assert!(report.contains("Title:              Sign in - Example"));
    assert!(report.contains("Headings:           h1: 1, h3: 4"));
    assert!(report.contains("Login form:         yes"));
    assert!(report.contains("Inaccessible links: 1"));
    assert!(report.contains("error: Connection failed"));
}

#[test]
fn test_text_report_keeps_input_host_order() {
    let report = generate_text_report(&sample_pages());
    let first = report.find("## example.com").unwrap();
    let second = report.find("## down.example.org").unwrap();
    assert!(first < second);
}

#[test]
fn test_text_report_empty_title_and_headings() {
    let analysis = AnalysisResult {
        html_version: HtmlVersion::Unknown,
        title: String::new(),
        headings_count: BTreeMap::new(),
        login_form_exists: false,
        link_analysis: LinkAnalysis::default(),
    };
    let report = generate_text_report(&[PageReport::success("http://x/".into(), analysis)]);

    assert!(report.contains("HTML version:       Unknown"));
    assert!(report.contains("Title:              (none)"));
    assert!(report.contains("Headings:           none"));
    assert!(report.contains("Login form:         no"));
}

// ============================================================================
// JSON Report Tests
// ============================================================================

#[test]
fn test_json_report_structure() {
    let json = generate_json_report(&sample_pages()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let report = &value["report"];
    assert_eq!(report["metadata"]["generator"], "pagescope");
    assert_eq!(report["metadata"]["format"], "json");
    assert!(report["metadata"]["generated_at"].is_string());
    assert_eq!(report["summary"]["pages_analyzed"], 1);

    let pages = report["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["analysis"]["title"], "Sign in - Example");
    assert_eq!(pages[0]["analysis"]["headings_count"]["h3"], 4);
    assert_eq!(pages[0]["analysis"]["link_analysis"]["internal_links"], 5);
    assert!(pages[0].get("error").is_none());
    assert!(pages[1].get("analysis").is_none());
    assert!(pages[1]["error"].as_str().unwrap().contains("refused"));
}

#[test]
fn test_generate_report_dispatches_on_format() {
    let pages = sample_pages();
    let text = generate_report(&pages, ReportFormat::Text).unwrap();
    let json = generate_report(&pages, ReportFormat::Json).unwrap();

    assert!(text.starts_with("━"));
    assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
}

// ============================================================================
// Save Report Tests
// ============================================================================

#[test]
fn test_save_report() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.txt");

    save_report("hello report", &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello report");
}

#[test]
fn test_save_report_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("report.txt");

    assert!(save_report("x", &path).is_err());
}
