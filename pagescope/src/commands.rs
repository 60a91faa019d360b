use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("pagescope")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("pagescope")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Emit debug logging to stderr")
                .required(false)
                .global(true)
                .conflicts_with("quiet"),
        )
        .subcommand_required(false)
        .subcommand(tuning_args(
            command!("analyze")
                .about(
                    "Fetch one or more pages and report HTML version, title, headings, login \
                forms and link reachability.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("The page to analyze")
                        .conflicts_with("hosts-file"),
                )
                .arg(
                    arg!(-H --"hosts-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of pages to analyze")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        ))
        .subcommand(tuning_args(
            command!("serve")
                .about("Run the JSON analysis service (POST /analyze, GET /health)")
                .arg(
                    arg!(--"host" <HOST>)
                        .required(false)
                        .help("Address to bind")
                        .default_value("127.0.0.1"),
                )
                .arg(
                    arg!(-p --"port" <PORT>)
                        .required(false)
                        .help("Port to listen on")
                        .value_parser(clap::value_parser!(u16))
                        .default_value("8080"),
                )
                .arg(
                    arg!(--"allow-origin" <ORIGIN>)
                        .required(false)
                        .help("Origin allowed by CORS")
                        .default_value("http://localhost:3000"),
                ),
        ))
}

/// Engine tuning flags shared by `analyze` and `serve`
fn tuning_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        arg!(-t --"threads" <NUM_WORKERS>)
            .required(false)
            .help("The number of concurrent link probes per page")
            .value_parser(clap::value_parser!(usize))
            .default_value("10"),
    )
    .arg(
        arg!(--"timeout" <SECONDS>)
            .required(false)
            .help("Page fetch timeout in seconds")
            .value_parser(clap::value_parser!(u64))
            .default_value("10"),
    )
    .arg(
        arg!(--"probe-timeout" <SECONDS>)
            .required(false)
            .help("Timeout for each link reachability probe in seconds")
            .value_parser(clap::value_parser!(u64))
            .default_value("5"),
    )
    .arg(
        arg!(--"deadline" <SECONDS>)
            .required(false)
            .help("Overall budget for probing a page's links in seconds (0 disables it)")
            .value_parser(clap::value_parser!(u64))
            .default_value("60"),
    )
}
