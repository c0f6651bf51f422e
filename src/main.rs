// Main CLI entry point for pvreplace
// Uses clap for argument parsing

use clap::parser::ValueSource;
use clap::error::ErrorKind;
use clap::{crate_description, crate_name, Arg, ArgAction, ArgMatches, Command};
use log::{error, warn};
use pvreplace::banner::{print_banner, print_version};
use pvreplace::defaults::DefaultPaths;
use pvreplace::driver::{Driver, RawDriver};
use pvreplace::error::{FuzzError, PvError};
use pvreplace::models::{FuzzingSpec, SourceParser};
use pvreplace::parsers::{PayloadParser, RawRequestParser};
use pvreplace::remote::AssetFetcher;
use pvreplace::settings::{
    resolve_ignore_lines, resolve_output_dir, resolve_specs, CliOptions, InputSource,
};
use std::fs::File;
use std::io::{self, BufReader, Write};

/// Long flags taking a value, may also be written with a single dash (`-payload`)
const VALUE_FLAGS: &[&str] = &[
    "payload",
    "list",
    "raw",
    "ignore-lines",
    "fuzzing-mode",
    "fuzzing-type",
    "fuzzing-part",
    "config",
    "output",
];

const SWITCH_FLAGS: &[&str] = &["silent", "version", "verbose", "help"];

const FUZZING_FLAGS: [(&str, &str); 3] = [
    ("fuzzing_mode", "-fuzzing-mode"),
    ("fuzzing_type", "-fuzzing-type"),
    ("fuzzing_part", "-fuzzing-part"),
];

/// Whether `arg` is a flag whose value is the next token
fn expects_value(arg: &str) -> bool {
    if arg == "-u" {
        return true;
    }
    let name = arg.trim_start_matches('-');
    arg.starts_with('-') && !name.contains('=') && VALUE_FLAGS.contains(&name)
}

/// Rewrite `-flag` / `-flag=value` to `--flag` for every known long flag in
/// flag position. Values following a flag are passed through untouched.
fn normalize_args<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    let mut normalized = Vec::new();
    let mut value_next = false;
    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || value_next || arg.starts_with("--") || !arg.starts_with('-') {
            value_next = !value_next && i != 0 && expects_value(&arg);
            normalized.push(arg);
            continue;
        }
        value_next = expects_value(&arg);
        let name = arg[1..].split('=').next().unwrap_or_default();
        if VALUE_FLAGS.contains(&name) || SWITCH_FLAGS.contains(&name) {
            normalized.push(format!("-{}", arg));
        } else {
            normalized.push(arg);
        }
    }
    normalized
}

/// Exit code for an argument error: help and version output are not failures
fn clap_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn build_cli() -> Command {
    Command::new(crate_name!())
        .about(crate_description!())
        .after_help("EXAMPLES:\n  pvreplace -u 'http://x.com/a.php?id=1&q=2' -payload FUZZ\n  cat urls.txt | pvreplace -payload payloads.txt -fuzzing-mode single\n  pvreplace -raw requests/ -payload \"'\\\"><svg>\" -output out/")
        .arg(Arg::new("payload")
            .long("payload")
            .num_args(1)
            .default_value("FUZZ")
            .allow_hyphen_values(true)
            .help("Comma-separated list of payloads or a .txt file with payloads"))
        .arg(Arg::new("url")
            .short('u')
            .num_args(1)
            .help("The URL to process"))
        .arg(Arg::new("list")
            .long("list")
            .num_args(1)
            .help("File containing URLs to process"))
        .arg(Arg::new("raw")
            .long("raw")
            .num_args(1)
            .help("File or directory containing Burp Suite raw request data to process"))
        .arg(Arg::new("ignore_lines")
            .long("ignore-lines")
            .num_args(1)
            .allow_hyphen_values(true)
            .help("Comma-separated list or .txt file of line prefixes to leave untouched in raw data"))
        .arg(Arg::new("fuzzing_mode")
            .long("fuzzing-mode")
            .num_args(1)
            .default_value("multiple")
            .value_parser(["single", "multiple"])
            .help("Fuzzing mode"))
        .arg(Arg::new("fuzzing_type")
            .long("fuzzing-type")
            .num_args(1)
            .default_value("replace")
            .value_parser(["replace", "prefix", "postfix"])
            .help("Fuzzing type"))
        .arg(Arg::new("fuzzing_part")
            .long("fuzzing-part")
            .num_args(1)
            .default_value("param-value")
            .value_parser([
                "param-value",
                "param-name",
                "path-suffix",
                "path-suffix-slash",
                "path-segment",
                "path-ext",
                "headers",
                "all",
            ])
            .help("Fuzzing part"))
        .arg(Arg::new("config")
            .long("config")
            .num_args(1)
            .help("Path to YAML config file with fuzzing configurations"))
        .arg(Arg::new("output")
            .long("output")
            .num_args(1)
            .help("Directory to save modified requests (default: ~/.config/pvreplace/modified_request)"))
        .arg(Arg::new("silent")
            .long("silent")
            .action(ArgAction::SetTrue)
            .help("Silent mode"))
        .arg(Arg::new("version")
            .long("version")
            .action(ArgAction::SetTrue)
            .help("Print the version of the tool and exit"))
        .arg(Arg::new("verbose")
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Show detailed information about what's being processed"))
}

fn options_from_matches(matches: &ArgMatches) -> Result<CliOptions, FuzzError> {
    let string = |id: &str| matches.get_one::<String>(id).cloned();
    let required = |id: &str| string(id).unwrap_or_default();

    let flag_spec = FuzzingSpec::new(
        required("fuzzing_part").parse()?,
        required("fuzzing_type").parse()?,
        required("fuzzing_mode").parse()?,
    );
    let explicit_fuzzing_flags = FUZZING_FLAGS
        .iter()
        .filter(|(id, _)| matches.value_source(id) == Some(ValueSource::CommandLine))
        .map(|(_, flag)| flag.to_string())
        .collect();

    Ok(CliOptions {
        payload: required("payload"),
        url: string("url"),
        list: string("list"),
        raw: string("raw"),
        ignore_lines: string("ignore_lines"),
        config: string("config"),
        output: string("output"),
        flag_spec,
        explicit_fuzzing_flags,
        silent: matches.get_flag("silent"),
        version: matches.get_flag("version"),
        verbose: matches.get_flag("verbose"),
    })
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "warn,pvreplace=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

async fn run(opts: &CliOptions) -> Result<(), PvError> {
    let paths = match DefaultPaths::from_home() {
        Ok(paths) => Some(paths),
        Err(e) => {
            warn!("{}, default assets are unavailable", e);
            None
        }
    };
    let fetcher = AssetFetcher::new();

    match opts.input() {
        InputSource::Raw(raw) => {
            let files = RawRequestParser.parse(&raw)?;
            let payloads = PayloadParser.parse(&opts.payload)?;
            let classifier = resolve_ignore_lines(opts, paths.as_ref(), &fetcher).await?;
            let output_dir = resolve_output_dir(opts, paths.as_ref())?;

            let driver = RawDriver::new(payloads, classifier, output_dir);
            let mut out = io::stdout().lock();
            driver.run(&files, &mut out)?;
            out.flush()?;
        }
        source => {
            let payloads = PayloadParser.parse(&opts.payload)?;
            let specs = resolve_specs(opts, paths.as_ref(), &fetcher).await?;
            let driver = Driver::new(payloads, specs);

            let mut out = io::stdout().lock();
            match source {
                InputSource::Url(url) => {
                    driver.run_url(&url, &mut out)?;
                }
                InputSource::List(list) => {
                    let file = File::open(&list).map_err(|source| PvError::Read {
                        what: "URL list",
                        path: list.clone(),
                        source,
                    })?;
                    driver.run_lines(BufReader::new(file), &mut out)?;
                }
                _ => {
                    driver.run_lines(io::stdin().lock(), &mut out)?;
                }
            }
            out.flush()?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let matches = match build_cli().try_get_matches_from(normalize_args(std::env::args())) {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            std::process::exit(clap_exit_code(&e));
        }
    };

    let opts = options_from_matches(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    init_logging(opts.verbose);

    if opts.version {
        print_banner();
        print_version();
        return;
    }
    if !opts.silent {
        print_banner();
    }

    if let Err(e) = opts.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&opts).await {
        error!("{}", e);
    }
}
