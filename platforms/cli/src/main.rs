mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use markov::{
    analyze, Halt, Limits, MarkovMachine, Program, ProgramLoader, ProgramManager, RunReport,
};
use std::io::{self, Read};
use std::path::PathBuf;

/// The program halted by a terminal rule or because no rule applied.
const EXIT_COMPLETED: i32 = 0;
/// Loading or running failed.
const EXIT_ERROR: i32 = 1;
/// The step bound ran out before the program halted.
const EXIT_DIVERGED: i32 = 2;

/// Runs a Markov algorithm (normal algorithm) program.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  markov-cli demos/binary-to-unary.markov --log
  printf 'abc\\na -> b\\n' | markov-cli
  markov-cli --builtin sort-ab --input bbbaaa")]
struct Cli {
    /// Path to a Markov program file (.markov).
    /// If not provided, the program is read from stdin when it is piped.
    program: Option<PathBuf>,

    /// Run a built-in program by name
    #[clap(short, long, conflicts_with = "program")]
    builtin: Option<String>,

    /// List the built-in programs and exit
    #[clap(long)]
    list: bool,

    /// Replace the program's initial tape
    #[clap(short, long)]
    input: Option<String>,

    /// Print the tape after every step
    #[clap(short, long, conflicts_with = "json")]
    log: bool,

    /// Print the rule table before running
    #[clap(short, long)]
    rules: bool,

    /// Print analysis warnings for the rules instead of running
    #[clap(long)]
    check: bool,

    /// Print the run report as JSON
    #[clap(long)]
    json: bool,

    /// JSON file with interpreter limits
    #[clap(long)]
    limits: Option<PathBuf>,

    /// Maximum number of rewrites before the run counts as diverged
    #[clap(long)]
    max_steps: Option<usize>,

    /// Maximum tape length in bytes
    #[clap(long)]
    tape_capacity: Option<usize>,

    /// Maximum number of rules to load
    #[clap(long)]
    max_rules: Option<usize>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if cli.list {
        for name in ProgramManager::list_program_names() {
            println!("{}", name);
        }
        return Ok(EXIT_COMPLETED);
    }

    let limits = load_limits(&cli)?;
    let program = load_program(&cli, &limits)?;

    if cli.check {
        let warnings = analyze(&program.rules);
        if warnings.is_empty() {
            println!("No warnings.");
        }
        for warning in warnings {
            println!("warning: {}", warning);
        }
        return Ok(EXIT_COMPLETED);
    }

    if cli.rules {
        print!("{}", program.rules);
    }

    let mut machine = MarkovMachine::new(program);
    if let Some(input) = &cli.input {
        machine.set_tape(input).context("Invalid --input")?;
    }

    let report = if cli.log {
        println!("[start] {}", machine.tape());
        let report = machine
            .run_with_trace(limits.step_bound, |step, tape| {
                println!("[step {}] {}", step, tape)
            })
            .context("Run failed")?;
        println!("[end] {}", machine.tape());
        report
    } else {
        machine.run(limits.step_bound).context("Run failed")?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.is_diverged() {
        EXIT_DIVERGED
    } else {
        EXIT_COMPLETED
    })
}

fn print_report(report: &RunReport) {
    println!("Result: '{}'", report.tape);
    match report.halt {
        Halt::Normal => println!("Halted by a terminal rule after {} steps.", report.steps),
        Halt::Stuck => println!("Halted after {} steps: no rule applies.", report.steps),
        Halt::Divergent => println!(
            "Did not halt within {} steps; the program may not terminate.",
            report.steps
        ),
    }
}

/// Builds the limits from the optional limits file and the per-field overrides.
fn load_limits(cli: &Cli) -> Result<Limits> {
    let mut limits = match &cli.limits {
        Some(path) => Limits::load(path)?,
        None => Limits::default(),
    };

    if let Some(steps) = cli.max_steps {
        limits.step_bound = steps;
    }
    if let Some(capacity) = cli.tape_capacity {
        limits.tape_capacity = capacity;
    }
    if let Some(rules) = cli.max_rules {
        limits.max_rules = rules;
    }

    limits.validate()?;
    Ok(limits)
}

/// Loads the program from a file path, a built-in name, or stdin, in that order.
fn load_program(cli: &Cli, limits: &Limits) -> Result<Program> {
    if let Some(path) = &cli.program {
        ProgramLoader::load_program_with_limits(path, limits)
            .with_context(|| format!("Failed to load program '{}'", path.display()))
    } else if let Some(name) = &cli.builtin {
        let builtin = ProgramManager::get_builtin_by_name(name)?;
        ProgramLoader::load_program_from_string_with_limits(builtin.source, limits)
            .with_context(|| format!("Failed to load built-in program '{}'", name))
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        ProgramLoader::load_program_from_string_with_limits(&buffer, limits)
            .context("Failed to load program from stdin")
    } else {
        bail!("No program given. Pass a file, pipe one on stdin, or use --builtin (see --list).")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_and_json_conflict() {
        let result = Cli::try_parse_from(["markov-cli", "--log", "--json", "demo.markov"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_and_json_accepted_alone() {
        let cli = Cli::try_parse_from(["markov-cli", "--log", "demo.markov"]).unwrap();
        assert!(cli.log && !cli.json);

        let cli = Cli::try_parse_from(["markov-cli", "--json", "demo.markov"]).unwrap();
        assert!(cli.json && !cli.log);
    }

    #[test]
    fn test_builtin_conflicts_with_program() {
        let result = Cli::try_parse_from(["markov-cli", "--builtin", "sort-ab", "demo.markov"]);
        assert!(result.is_err());
    }
}
