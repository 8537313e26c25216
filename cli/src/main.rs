use option_schema_core::{
    ArraySyntax, CommandSpec, LabeledValue, OptionParser, OptionSpec, ParameterSpec, ParseError,
    SchemaError,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Florbs known to the tool.
const FLORBS: &[&str] = &["blue", "green", "red"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Format {
    #[default]
    Text,
    Json,
}

impl LabeledValue for Format {
    const LABELS: &'static [(&'static str, Self)] =
        &[("text", Format::Text), ("json", Format::Json)];
}

#[derive(Debug, Clone, Default)]
struct Global {
    format: Format,
}

#[derive(Debug)]
struct RunArgs {
    global: Global,
    florbs: Vec<String>,
    zarcks: Vec<i64>,
}

#[derive(Debug)]
struct RemoteArgs {
    global: Global,
    name: String,
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    florb: &'a str,
    zarcks: &'a [i64],
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let parser = match build_parser() {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = parser.parse_env() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn build_parser() -> Result<OptionParser<Global>, SchemaError> {
    let list = CommandSpec::builder("list", "List available florbs.", |global: Global| global)
        .with_action(run_list)
        .build()?;

    let run = CommandSpec::builder(
        "run",
        "Run selected florbs on some specific zarcks.",
        run_args,
    )
    .with_option(OptionSpec::array(
        "florbs",
        "<name>",
        ArraySyntax::UpToNextOption,
        "The florbs to run (default: all)",
        |args: &mut RunArgs| &mut args.florbs,
    ))
    .with_parameter(ParameterSpec::repeating(
        "<zarck>",
        "The zarks on which to run the selected florbs.",
        |args: &mut RunArgs| &mut args.zarcks,
    ))
    .with_action(run_florbs)
    .build()?;

    let add = CommandSpec::builder("add", "Register a remote florb source.", remote_args)
        .with_parameter(ParameterSpec::required(
            "<name>",
            "Name of the remote.",
            |args: &mut RemoteArgs, v: String| args.name = v,
        ))
        .with_parameter(ParameterSpec::required(
            "<url>",
            "Location of the remote.",
            |args: &mut RemoteArgs, v: String| args.url = Some(v),
        ))
        .with_action(run_remote_add)
        .build()?;

    let remove = CommandSpec::builder("remove", "Forget a remote florb source.", remote_args)
        .with_parameter(ParameterSpec::required(
            "<name>",
            "Name of the remote.",
            |args: &mut RemoteArgs, v: String| args.name = v,
        ))
        .with_action(run_remote_remove)
        .build()?;

    let remote = CommandSpec::builder(
        "remote",
        "Manage remote florb sources.",
        |global: Global| global,
    )
    .with_command(add)
    .with_command(remove)
    .build()?;

    OptionParser::builder("Handle florbs, with support for zarcks.", Global::default())
        .with_option(OptionSpec::value(
            "format",
            "text|json",
            "Output format. (Default: text)",
            |global: &mut Global, v: Format| global.format = v,
        ))
        .with_option(OptionSpec::action(
            "version",
            "Print version information and exit.",
            print_version,
        ))
        .with_command(list)
        .with_command(run)
        .with_command(remote)
        .build()
}

fn print_version() -> Result<(), ParseError> {
    println!("florb {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn run_args(global: Global) -> RunArgs {
    RunArgs {
        global,
        florbs: Vec::new(),
        zarcks: Vec::new(),
    }
}

fn remote_args(global: Global) -> RemoteArgs {
    RemoteArgs {
        global,
        name: String::new(),
        url: None,
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ParseError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| ParseError::custom(format!("Failed to encode output: {err}")))
}

fn run_list(global: Global) -> Result<(), ParseError> {
    match global.format {
        Format::Text => FLORBS.iter().for_each(|florb| println!("{florb}")),
        Format::Json => println!("{}", to_json(&FLORBS)?),
    }
    Ok(())
}

fn run_florbs(args: RunArgs) -> Result<(), ParseError> {
    debug!(florbs = ?args.florbs, zarcks = ?args.zarcks, "Running florbs");

    let selected: Vec<&str> = if args.florbs.is_empty() {
        FLORBS.to_vec()
    } else {
        args.florbs.iter().map(String::as_str).collect()
    };
    if let Some(unknown) = selected.iter().find(|&&name| !FLORBS.contains(&name)) {
        return Err(ParseError::custom(format!("Unknown florb '{unknown}'")));
    }

    let reports: Vec<RunReport<'_>> = selected
        .iter()
        .map(|&florb| RunReport {
            florb,
            zarcks: &args.zarcks,
        })
        .collect();
    match args.global.format {
        Format::Text => {
            for report in &reports {
                let zarcks: Vec<String> = report.zarcks.iter().map(i64::to_string).collect();
                println!("{}: {}", report.florb, zarcks.join(" "));
            }
        }
        Format::Json => println!("{}", to_json(&reports)?),
    }
    Ok(())
}

fn run_remote_add(args: RemoteArgs) -> Result<(), ParseError> {
    let url = args.url.unwrap_or_default();
    match args.global.format {
        Format::Text => println!("Added remote {} ({url})", args.name),
        Format::Json => println!(
            "{}",
            to_json(&serde_json::json!({ "added": args.name, "url": url }))?
        ),
    }
    Ok(())
}

fn run_remote_remove(args: RemoteArgs) -> Result<(), ParseError> {
    match args.global.format {
        Format::Text => println!("Removed remote {}", args.name),
        Format::Json => println!("{}", to_json(&serde_json::json!({ "removed": args.name }))?),
    }
    Ok(())
}
