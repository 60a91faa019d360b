use crate::config::{AnalyzerConfig, DEFAULT_USER_AGENT, ProbeLimits};
use crate::document::Document;
use crate::error::{AnalyzeError, Result};
use crate::extract::{contains_login_form, count_headings, detect_html_version, extract_title};
use crate::links::analyze_links;
use crate::probe::{HttpProbe, ReachabilityProbe};
use crate::result::AnalysisResult;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// What the fetcher hands to the engine.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL exactly as the caller gave it. Used as the link base.
    pub url: String,
    pub status_code: u16,
    pub content_types: Vec<String>,
    pub body: String,
    pub response_time: Duration,
}

/// Fetches a page and runs every extractor over it.
#[derive(Debug, Clone)]
pub struct Analyzer {
    client: Client,
    probe: HttpProbe,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Like [`Analyzer::try_with_config`], but a user agent the HTTP client
    /// rejects is replaced by the default one (with a warning).
    pub fn with_config(config: AnalyzerConfig) -> Self {
        match Self::try_with_config(config.clone()) {
            Ok(analyzer) => analyzer,
            Err(e) => {
                warn!("{}; using the default user agent", e);
                let config = AnalyzerConfig {
                    user_agent: DEFAULT_USER_AGENT.to_string(),
                    ..config
                };
                Self::try_with_config(config).expect("Failed to create HTTP client")
            }
        }
    }

    pub fn try_with_config(config: AnalyzerConfig) -> Result<Self> {
        let client = build_client(&config.user_agent)?;
        Ok(Self {
            probe: HttpProbe::new(client.clone()),
            client,
            config,
        })
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.config.probe_timeout = timeout;
        self
    }

    pub fn with_probe_workers(mut self, workers: usize) -> Self {
        self.config.probe_workers = workers;
        self
    }

    pub fn with_link_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.config.link_deadline = deadline;
        self
    }

    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        let mut config = self.config;
        config.user_agent = user_agent.into();
        Self::with_config(config)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Fetch `url` and analyze it. Links are resolved against, and
    /// classified relative to, `url` as given minus surrounding whitespace.
    pub async fn analyze(&self, url: &str) -> Result<AnalysisResult> {
        let url = url.trim();
        validate_url(url)?;
        info!("Analyzing {}", url);

        let started = Instant::now();
        let page = self.fetch(url).await?;
        let doc = Document::parse(&page.body);
        debug!("Parsed {} nodes from {}", doc.len(), url);

        let result = self
            .analyze_document(&doc, &page.content_types, &page.url)
            .await;

        info!(
            "Analysis of {} complete in {:?}: {} internal, {} external, {} inaccessible",
            url,
            started.elapsed(),
            result.link_analysis.internal_links,
            result.link_analysis.external_links,
            result.link_analysis.inaccessible_links
        );
        Ok(result)
    }

    /// Analyze markup that was obtained elsewhere.
    pub async fn analyze_html<S: AsRef<str>>(
        &self,
        html: &str,
        content_types: &[S],
        base_url: &str,
    ) -> AnalysisResult {
        let doc = Document::parse(html);
        self.analyze_document(&doc, content_types, base_url).await
    }

    pub async fn analyze_document<S: AsRef<str>>(
        &self,
        doc: &Document,
        content_types: &[S],
        base_url: &str,
    ) -> AnalysisResult {
        analyze_document(
            doc,
            content_types,
            base_url,
            &self.probe,
            &self.config.probe_limits(),
        )
        .await
    }

    /// GET the page. Anything but a 2xx answer is an error.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .timeout(self.config.fetch_timeout)
            .send()
            .await
            .map_err(|e| AnalyzeError::from_fetch(url, e))?;
        let response_time = start.elapsed();

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_types = response
            .headers()
            .get_all(CONTENT_TYPE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .collect();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                AnalyzeError::Timeout(format!("{}: {}", url, e))
            } else {
                AnalyzeError::ParseError(format!("could not read body of {}: {}", url, e))
            }
        })?;

        Ok(FetchedPage {
            url: url.to_string(),
            status_code: status.as_u16(),
            content_types,
            body,
            response_time,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the five extractors over one document and collect their output.
pub async fn analyze_document<S, P>(
    doc: &Document,
    content_types: &[S],
    base_url: &str,
    probe: &P,
    limits: &ProbeLimits,
) -> AnalysisResult
where
    S: AsRef<str>,
    P: ReachabilityProbe,
{
    AnalysisResult {
        html_version: detect_html_version(content_types),
        title: extract_title(doc),
        headings_count: count_headings(doc),
        login_form_exists: contains_login_form(doc),
        link_analysis: analyze_links(doc, base_url, probe, limits).await,
    }
}

fn validate_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(AnalyzeError::InvalidUrl("URL is empty".to_string()));
    }

    let parsed =
        Url::parse(url).map_err(|e| AnalyzeError::InvalidUrl(format!("{}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AnalyzeError::InvalidUrl(format!(
            "unsupported scheme '{}' in {}",
            other, url
        ))),
    }
}

fn build_client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .pool_max_idle_per_host(50)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| AnalyzeError::Other(format!("could not build HTTP client: {}", e)))
}
