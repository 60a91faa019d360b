use colored::Colorize;

pub mod analyze;
pub mod report;
pub mod server;

const BANNER: &str = r#"

   ___  ___ ____ ____ ___ ____ ___  ___  ___
  / _ \/ _ `/ _ `/ -_|_-</ __/ _ \/ _ \/ -_)
 / .__/\_,_/\_, /\__/___/\__/\___/ .__/\__/
/_/        /___/                /_/
"#;

/// Print the startup banner
pub fn print_banner() {
    println!("{}", BANNER.bright_cyan().bold());
    println!(
        "  {} v{} - structural analysis for web pages\n",
        "pagescope".bright_white().bold(),
        env!("CARGO_PKG_VERSION")
    );
}
