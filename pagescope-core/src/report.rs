// Report generation from analysis results

use crate::analyze::{PageReport, extract_host};
use pagescope_scanner::{AnalysisResult, HeadingLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Totals across every successfully analyzed page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub pages_analyzed: usize,
    pub pages_failed: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub inaccessible_links: usize,
    pub login_forms: usize,
}

impl ReportSummary {
    pub fn from_pages(pages: &[PageReport]) -> Self {
        pages.iter().fold(Self::default(), |mut summary, page| {
            match page.analysis {
                Some(ref analysis) => {
                    summary.pages_analyzed += 1;
                    summary.internal_links += analysis.link_analysis.internal_links;
                    summary.external_links += analysis.link_analysis.external_links;
                    summary.inaccessible_links += analysis.link_analysis.inaccessible_links;
                    if analysis.login_form_exists {
                        summary.login_forms += 1;
                    }
                }
                None => summary.pages_failed += 1,
            }
            summary
        })
    }
}

/// Render a report in the requested format
pub fn generate_report(
    pages: &[PageReport],
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(pages)),
        ReportFormat::Json => generate_json_report(pages),
    }
}

/// Generate a human-readable report, pages grouped by host in input order
pub fn generate_text_report(pages: &[PageReport]) -> String {
    let summary = ReportSummary::from_pages(pages);

    let mut report = String::new();
    report.push_str(DIVIDER);
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Pages analyzed: {}\n", summary.pages_analyzed));
    report.push_str(&format!("  Pages failed: {}\n", summary.pages_failed));
    report.push_str(&format!("  Internal links: {}\n", summary.internal_links));
    report.push_str(&format!("  External links: {}\n", summary.external_links));
    report.push_str(&format!(
        "  Inaccessible links: {}\n",
        summary.inaccessible_links
    ));
    report.push_str(&format!(
        "  Pages with a login form: {}\n",
        summary.login_forms
    ));
    report.push('\n');
    report.push_str(DIVIDER);

    let mut hosts: Vec<String> = Vec::new();
    let mut by_host: BTreeMap<String, Vec<&PageReport>> = BTreeMap::new();
    for page in pages {
        let host = extract_host(&page.url);
        if !by_host.contains_key(&host) {
            hosts.push(host.clone());
        }
        by_host.entry(host).or_default().push(page);
    }

    for host in hosts {
        let host_pages = &by_host[&host];
        report.push_str(&format!("## {}\n", host));
        report.push_str(&format!("  {} page(s)\n\n", host_pages.len()));

        for page in host_pages {
            report.push_str(&format!("  {}\n", page.url));
            match (&page.analysis, &page.error) {
                (Some(analysis), _) => push_analysis(&mut report, analysis),
                (None, Some(error)) => report.push_str(&format!("    error: {}\n", error)),
                (None, None) => report.push_str("    error: no result\n"),
            }
            report.push('\n');
        }
    }

    report
}

fn push_analysis(report: &mut String, analysis: &AnalysisResult) {
    let title = if analysis.title.is_empty() {
        "(none)"
    } else {
        analysis.title.as_str()
    };
    let links = &analysis.link_analysis;

    report.push_str(&format!("    HTML version:       {}\n", analysis.html_version));
    report.push_str(&format!("    Title:              {}\n", title));
    report.push_str(&format!(
        "    Headings:           {}\n",
        format_headings(analysis)
    ));
    report.push_str(&format!(
        "    Login form:         {}\n",
        if analysis.login_form_exists { "yes" } else { "no" }
    ));
    report.push_str(&format!("    Internal links:     {}\n", links.internal_links));
    report.push_str(&format!("    External links:     {}\n", links.external_links));
    report.push_str(&format!(
        "    Inaccessible links: {}\n",
        links.inaccessible_links
    ));
}

fn format_headings(analysis: &AnalysisResult) -> String {
    let parts: Vec<String> = HeadingLevel::ALL
        .iter()
        .filter_map(|level| {
            analysis
                .headings_count
                .get(level)
                .map(|count| format!("{}: {}", level.as_str(), count))
        })
        .collect();

    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

/// Generate a JSON report with generator metadata
pub fn generate_json_report(pages: &[PageReport]) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "pagescope",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "summary": ReportSummary::from_pages(pages),
            "pages": pages
        }
    });

    serde_json::to_string_pretty(&json_report)
}

/// Save report to file
pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing_is_case_insensitive() {
        assert_eq!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_str("Text"), Some(ReportFormat::Text));
        assert_eq!(ReportFormat::from_str("csv"), None);
    }

    #[test]
    fn test_summary_of_empty_batch() {
        assert_eq!(ReportSummary::from_pages(&[]), ReportSummary::default());
    }
}
