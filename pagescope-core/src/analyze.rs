use indicatif::{ProgressBar, ProgressStyle};
use pagescope_scanner::{AnalysisResult, Analyzer, AnalyzerConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Options for configuring a batch analysis
pub struct AnalyzeOptions {
    pub urls: Vec<String>,
    pub config: AnalyzerConfig,
    pub show_progress_bars: bool,
}

/// Callback for reporting analysis progress
pub type AnalyzeProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Outcome of analyzing one URL. Exactly one of `analysis` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageReport {
    pub fn success(url: String, analysis: AnalysisResult) -> Self {
        Self {
            url,
            analysis: Some(analysis),
            error: None,
        }
    }

    pub fn failure(url: String, error: String) -> Self {
        Self {
            url,
            analysis: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.analysis.is_some()
    }
}

/// Extract the host component from a URL
pub fn extract_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| url.to_string())
}

/// Analyze each URL in turn. A failing page is recorded in its
/// [`PageReport`] and does not stop the batch.
pub async fn execute_analysis(
    options: AnalyzeOptions,
    progress_callback: Option<AnalyzeProgressCallback>,
) -> Result<Vec<PageReport>, String> {
    let AnalyzeOptions {
        urls,
        config,
        show_progress_bars,
    } = options;

    if urls.is_empty() {
        return Err("No URLs provided".to_string());
    }

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting analysis...");
        Some(pb)
    } else {
        None
    };

    let analyzer = Analyzer::try_with_config(config).map_err(|e| e.to_string())?;
    let mut reports = Vec::with_capacity(urls.len());

    for (idx, url) in urls.iter().enumerate() {
        if let Some(ref pb) = progress_bar {
            pb.set_message(format!(
                "Analyzing {}/{}: {}",
                idx + 1,
                urls.len(),
                extract_host(url)
            ));
        }
        if let Some(ref callback) = progress_callback
            && urls.len() > 1
        {
            callback(format!("Analyzing page {}/{}: {}", idx + 1, urls.len(), url));
        }

        match analyzer.analyze(url).await {
            Ok(analysis) => reports.push(PageReport::success(url.clone(), analysis)),
            Err(e) => {
                if let Some(ref callback) = progress_callback {
                    callback(format!("[!]  Failed to analyze {}: {}", url, e));
                }
                reports.push(PageReport::failure(url.clone(), e.to_string()));
            }
        }
    }

    if let Some(ref pb) = progress_bar {
        let failed = reports.iter().filter(|r| !r.is_success()).count();
        pb.finish_with_message(format!(
            "Analysis complete! {} page(s), {} failed",
            reports.len(),
            failed
        ));
    }

    Ok(reports)
}
