use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{debug, Level};

use crate::args::Argument;
use crate::config::RunConfig;
use crate::error::HarnessError;
use crate::logging::{init_logging, LogConfig};
use crate::output::format_results;
use crate::runner::{Outcome, Runner};

/// Line printed on stdout when a run traps
pub const TRAP_LINE: &str = "!trap";

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    PrintConfig,
    Run(CliArgs),
}

#[derive(Debug, PartialEq)]
struct CliArgs {
    module: PathBuf,
    args: Vec<String>,
    trace: bool,
    config: Option<PathBuf>,
}

impl Command {
    /// Flags are only recognised before the module path; everything after it
    /// belongs to the program.
    fn parse(args: &[String]) -> Result<Self, HarnessError> {
        let prog = args.first().map(String::as_str).unwrap_or("weerun");
        let mut trace = false;
        let mut config = None;
        let mut rest = args.iter().skip(1);

        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "-h" | "--help" | "-help" => return Ok(Command::Help),
                "-print-config" | "--print-config" => return Ok(Command::PrintConfig),
                "-trace" | "--trace" => trace = true,
                "-config" | "--config" => match rest.next() {
                    Some(path) => config = Some(PathBuf::from(path)),
                    None => {
                        return Err(HarnessError::Usage(format!(
                            "{} requires a path\n\n{}",
                            arg,
                            usage(prog)
                        )))
                    }
                },
                opt if opt.starts_with('-') && opt.len() > 1 => {
                    return Err(HarnessError::Usage(format!(
                        "Unknown option: {}\n\n{}",
                        opt,
                        usage(prog)
                    )))
                }
                module => {
                    return Ok(Command::Run(CliArgs {
                        module: PathBuf::from(module),
                        args: rest.cloned().collect(),
                        trace,
                        config,
                    }))
                }
            }
        }

        Err(HarnessError::Usage(format!("No module specified\n\n{}", usage(prog))))
    }
}

fn usage(prog: &str) -> String {
    format!(
        "weerun - run a compiled WeeWasm module\n\n\
        USAGE:\n    {} [OPTIONS] <module> [args...]\n\n\
        OPTIONS:\n    \
        -h, --help         Print help information\n    \
        -trace             Enable trace logging to stderr\n    \
        -config <path>     Use this configuration file\n    \
        -print-config      Print the default configuration\n\n\
        ARGUMENTS:\n    \
        Integers are passed as i32; a trailing `d` passes an f64 (e.g. 2.5d).\n\n\
        EXAMPLES:\n    \
        {} sum.wee.wasm 3 4\n    \
        {} average_d.wee.wasm 1.5d 2.5d",
        prog, prog, prog
    )
}

/// Print a run outcome: the result line, or `!trap` plus a diagnostic
///
/// A result with no fixed-point form is reported as a trap.
pub fn print_outcome<O, E>(
    outcome: &Outcome,
    fixed: Option<usize>,
    out: &mut O,
    diag: &mut E,
) -> io::Result<()>
where
    O: Write,
    E: Write,
{
    let line = match outcome {
        Outcome::Returned(values) => format_results(values, fixed),
        Outcome::Trap(description) => Err(description.clone()),
    };

    match line {
        Ok(line) => writeln!(out, "{}", line)?,
        Err(description) => {
            writeln!(out, "{}", TRAP_LINE)?;
            out.flush()?;
            writeln!(diag, "Error: {}", description)?;
        }
    }
    out.flush()
}

/// Entry point of the `weerun` binary
///
/// A trap is a completed run and returns `Ok`; only harness failures
/// (usage, config, load, instantiate) are errors.
pub fn cli_main(args: Vec<String>) -> Result<(), HarnessError> {
    let cli = match Command::parse(&args)? {
        Command::Help => {
            let prog = args.first().map(String::as_str).unwrap_or("weerun");
            println!("{}", usage(prog));
            return Ok(());
        }
        Command::PrintConfig => {
            print!("{}", RunConfig::generate_default());
            return Ok(());
        }
        Command::Run(cli) => cli,
    };

    let config = RunConfig::resolve(cli.config.as_deref())?;
    let mut log_config = LogConfig::from_settings(&config.log);
    if cli.trace {
        log_config = log_config.with_level(Level::TRACE);
    }
    let _guard = init_logging(log_config);

    debug!(module = %cli.module.display(), args = ?cli.args, "configuration loaded");

    let runner = Runner::new(config)?;
    let module = runner.load(&cli.module)?;
    let harness = &runner.config().harness;
    let args = Argument::parse_all(&cli.args, &harness.float_suffix);
    let fixed = runner.config().fixed_point_for(&cli.module);

    let report = runner.run(&module, &args, io::stdout())?;
    if let Outcome::Trap(description) = &report.outcome {
        debug!(module = %cli.module.display(), %description, "trap");
    }
    debug!(objects = report.objects, "run finished");

    let mut out = report.sink;
    print_outcome(&report.outcome, fixed, &mut out, &mut io::stderr())?;
    Ok(())
}
