use reqwest::Client;
use std::future::Future;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    Unreachable,
}

/// Checks whether a link can be followed.
///
/// Implementations must not fail: every error is reported as
/// [`Reachability::Unreachable`].
pub trait ReachabilityProbe: Send + Sync {
    fn probe(&self, url: &str) -> impl Future<Output = Reachability> + Send;
}

/// Sends a `HEAD` request. Transport errors and status >= 400 are unreachable.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ReachabilityProbe for HttpProbe {
    async fn probe(&self, url: &str) -> Reachability {
        match self.client.head(url).send().await {
            Ok(response) if response.status().as_u16() < 400 => Reachability::Reachable,
            Ok(response) => {
                debug!("Probe {} -> {}", url, response.status());
                Reachability::Unreachable
            }
            Err(e) => {
                debug!("Probe {} failed: {}", url, e);
                Reachability::Unreachable
            }
        }
    }
}
