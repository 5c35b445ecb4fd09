use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("linktrail")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linktrail")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Breadth-first crawl from a seed URL, recording every discovered link once \
                in a fresh SQLite database.",
                )
                .arg(
                    arg!([URL])
                        .required(false)
                        .help("The seed URL to start from (prompted for when omitted)"),
                )
                .arg(
                    arg!(-d --"output-dir" <PATH>)
                        .required(false)
                        .help("Directory to create the visited-URL database in")
                        .default_value("."),
                )
                .arg(
                    arg!(-l --"log-file" <PATH>)
                        .required(false)
                        .help("Append-only log file; fetch failures are written here")
                        .default_value(linktrail_core::logging::DEFAULT_LOG_FILE),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"user-agent" <AGENT>)
                        .required(false)
                        .help("User-Agent header sent with every request"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
}
