pub mod analyzer;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod links;
pub mod probe;
pub mod resolve;
pub mod result;

pub use analyzer::{Analyzer, FetchedPage, analyze_document};
pub use config::{AnalyzerConfig, ProbeLimits};
pub use document::Document;
pub use error::{AnalyzeError, FailureKind};
pub use probe::{HttpProbe, Reachability, ReachabilityProbe};
pub use result::{AnalysisResult, HeadingLevel, HtmlVersion, LinkAnalysis};
