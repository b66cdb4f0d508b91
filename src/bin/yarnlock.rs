//! Command-line interface for yarn lockfiles
//! This binary is used to inspect and re-serialize yarn v1 lockfiles.
//!
//! Usage:
//!   yarnlock json `<path>`                        - Print the lockfile as sorted JSON
//!   yarnlock yaml `<path>`                        - Print the lockfile as YAML
//!   yarnlock dump `<path>` [--output `<path>`]    - Re-serialize in canonical form
//!   yarnlock packages `<path>` [--format `<fmt>`] - List derived packages (tsv or json)
//!
//! Log verbosity follows `RUST_LOG` (default `warn`); logs go to stderr.

use clap::{Arg, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use yarn_lockfile::yarn::loader::LockfileLoader;
use yarn_lockfile::{Error, Lockfile};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path_arg = || {
        Arg::new("path")
            .help("Path to the yarn.lock file")
            .required(true)
            .index(1)
    };

    let matches = Command::new("yarnlock")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and rewriting yarn v1 lockfiles")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("json")
                .about("Print the parsed lockfile as JSON with sorted keys")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("yaml")
                .about("Print the parsed lockfile as YAML")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("dump")
                .about("Re-serialize the lockfile in canonical form")
                .arg(path_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("packages")
                .about("List the packages derived from top-level entries")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["tsv", "json"])
                        .default_value("tsv"),
                ),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (name, sub) = matches
        .subcommand()
        .expect("subcommand_required guarantees a subcommand");
    let path = sub
        .get_one::<String>("path")
        .expect("path is a required argument");
    let lock = LockfileLoader::from_path(path)?.lockfile()?;

    match name {
        "json" => println!("{}", lock.to_json()?),
        "yaml" => print!("{}", lock.to_yaml()?),
        "dump" => match sub.get_one::<String>("output") {
            Some(output) => lock.to_path(output)?,
            None => print!("{}", lock),
        },
        "packages" => {
            let format = sub
                .get_one::<String>("format")
                .map(String::as_str)
                .unwrap_or("tsv");
            handle_packages_command(&lock, format)?;
        }
        _ => unreachable!(),
    }
    Ok(())
}

/// One package per line: name, version, then url and checksum when present.
fn handle_packages_command(lock: &Lockfile, format: &str) -> Result<(), Error> {
    let packages = lock.packages()?;
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(());
    }

    for package in &packages {
        let mut columns = vec![package.name(), package.version()];
        columns.extend(package.url());
        columns.extend(package.checksum());
        println!("{}", columns.join("\t"));
    }
    Ok(())
}
