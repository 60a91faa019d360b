use crate::config::ProbeLimits;
use crate::document::Document;
use crate::probe::{Reachability, ReachabilityProbe};
use crate::resolve::{is_fragment_only, resolve_url};
use crate::result::LinkAnalysis;
use futures::StreamExt;
use futures::future;
use futures::stream;
use std::collections::HashSet;
use tokio::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkClass {
    Internal,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub url: String,
    pub class: LinkClass,
}

/// Internal means the resolved URL literally starts with the base URL string.
///
/// This is a text prefix test, not a host comparison: `https://example.com`
/// does not cover `https://www.example.com/` or `http://example.com/`, and a
/// base with a trailing slash does not cover the bare origin.
pub fn classify_link(resolved: &str, base_url: &str) -> LinkClass {
    if resolved.starts_with(base_url) {
        LinkClass::Internal
    } else {
        LinkClass::External
    }
}

/// Unique outbound links of the page, in document order. No I/O.
///
/// Empty and fragment-only hrefs are skipped; the rest are resolved against
/// `base_url` and deduplicated on the resolved string.
pub fn collect_links(doc: &Document, base_url: &str) -> Vec<ResolvedLink> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for (_, el) in doc.elements().filter(|(_, el)| el.name == "a") {
        let Some(href) = el.attr("href") else {
            continue;
        };
        if href.is_empty() || is_fragment_only(href) {
            continue;
        }

        let absolute_url = resolve_url(href, base_url);
        if !seen.insert(absolute_url.clone()) {
            continue;
        }

        let class = classify_link(&absolute_url, base_url);
        debug!("Found link: {} ({:?})", absolute_url, class);
        links.push(ResolvedLink {
            url: absolute_url,
            class,
        });
    }

    links
}

/// Probe every link with at most `limits.workers` requests in flight.
/// Returns how many were unreachable.
///
/// Probes run inside the returned future, so dropping it cancels them.
pub async fn count_unreachable<P: ReachabilityProbe>(
    links: &[ResolvedLink],
    probe: &P,
    limits: &ProbeLimits,
) -> usize {
    let deadline = limits.deadline.map(|d| Instant::now() + d);

    // Collected first so the returned future stays `Send` for any borrow.
    let probes: Vec<_> = links
        .iter()
        .map(|link| probe_within(probe, &link.url, limits.timeout, deadline))
        .collect();

    stream::iter(probes)
        .buffer_unordered(limits.workers.max(1))
        .fold(0, |unreachable, reachability| {
            future::ready(match reachability {
                Reachability::Unreachable => unreachable + 1,
                Reachability::Reachable => unreachable,
            })
        })
        .await
}

async fn probe_within<P: ReachabilityProbe>(
    probe: &P,
    url: &str,
    timeout: Duration,
    deadline: Option<Instant>,
) -> Reachability {
    let mut until = Instant::now() + timeout;
    if let Some(deadline) = deadline {
        until = until.min(deadline);
    }

    match tokio::time::timeout_at(until, probe.probe(url)).await {
        Ok(reachability) => reachability,
        Err(_) => {
            debug!("Probe {} timed out", url);
            Reachability::Unreachable
        }
    }
}

/// Full link analysis: collect, classify, then probe concurrently.
pub async fn analyze_links<P: ReachabilityProbe>(
    doc: &Document,
    base_url: &str,
    probe: &P,
    limits: &ProbeLimits,
) -> LinkAnalysis {
    let links = collect_links(doc, base_url);

    let internal_links = links
        .iter()
        .filter(|link| link.class == LinkClass::Internal)
        .count();
    let external_links = links.len() - internal_links;
    let inaccessible_links = count_unreachable(&links, probe, limits).await;

    LinkAnalysis {
        internal_links,
        external_links,
        inaccessible_links,
    }
}
