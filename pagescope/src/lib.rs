// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    analyzer_config_from_args, expand_output_path, load_urls_from_file, load_urls_from_source,
    parse_url_line,
};

// Re-export analysis functionality from pagescope-core
pub use pagescope_core::analyze::{
    AnalyzeOptions, AnalyzeProgressCallback, PageReport, execute_analysis, extract_host,
};
pub use pagescope_core::report::{ReportFormat, generate_report};
