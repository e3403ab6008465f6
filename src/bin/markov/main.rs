//! Command-line host for the Markov algorithm interpreter.
//!
//! Reads a rule file, runs it on an input string, and prints every visited
//! state as `step: state`. Stepping stops on termination, when no rule
//! applies, on a repeated state, or at the step limit.

mod logging;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use markov_engine::core::Markov;
use markov_engine::host::{RunConfig, RunOutcome, Runner, Session, StepEvent, MAX_SPEED, MIN_SPEED};
use markov_engine::programs;

const EXIT_CYCLE: u8 = 2;
const EXIT_STEP_LIMIT: u8 = 3;

#[derive(Parser)]
#[command(name = "markov", version, about = "Run Markov algorithms")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program on an input string.
    Run {
        /// Rule file, or `-` for stdin.
        #[arg(required_unless_present = "example", conflicts_with = "example")]
        file: Option<PathBuf>,

        /// Run a built-in sample program instead of a file.
        #[arg(short, long)]
        example: Option<String>,

        /// Input string (defaults to the sample input with --example).
        #[arg(short, long)]
        input: Option<String>,

        /// Stop after this many steps.
        #[arg(long, default_value_t = 100_000, conflicts_with = "unlimited")]
        max_steps: usize,

        /// Never stop on step count.
        #[arg(long)]
        unlimited: bool,

        /// Keep going when a state repeats.
        #[arg(long)]
        no_cycle_check: bool,

        /// Print states as they are produced, pausing between steps.
        #[arg(long)]
        animate: bool,

        /// Animation speed.
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(i64::from(MIN_SPEED)..=i64::from(MAX_SPEED)))]
        speed: u32,

        /// Print only the final state.
        #[arg(short, long)]
        quiet: bool,
    },
    /// Parse a program and list its rules.
    Check {
        /// Rule file, or `-` for stdin.
        file: PathBuf,
    },
    /// List the built-in sample programs.
    Examples,
}

fn main() -> ExitCode {
    logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version come through here too, on stdout.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Run {
            file,
            example,
            input,
            max_steps,
            unlimited,
            no_cycle_check,
            animate,
            speed,
            quiet,
        } => {
            let (source, sample_input) = match (&file, &example) {
                (_, Some(name)) => {
                    let Some(program) = programs::find(name) else {
                        bail!("unknown example {name:?} (see `markov examples`)");
                    };
                    (program.source.to_string(), program.sample_input)
                }
                (Some(path), None) => (read_source(path)?, ""),
                (None, None) => bail!("a rule file or --example is required"),
            };

            let markov = Markov::new()
                .parse_source(&source)
                .context("invalid program")?
                .set_initial_state(input.as_deref().unwrap_or(sample_input));

            let config = RunConfig::default()
                .with_max_steps((!unlimited).then_some(max_steps))
                .with_cycle_detection(!no_cycle_check)
                .with_speed(speed);

            let outcome = if animate {
                cmd_animate(markov, &config, quiet)?
            } else {
                cmd_run(markov, config, quiet)?
            };

            eprintln!("{outcome}");
            Ok(match outcome {
                RunOutcome::Cycle(_) => ExitCode::from(EXIT_CYCLE),
                RunOutcome::StepLimit(_) => ExitCode::from(EXIT_STEP_LIMIT),
                _ => ExitCode::SUCCESS,
            })
        }
        Command::Check { file } => {
            cmd_check(&file)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Examples => {
            for program in programs::all() {
                println!("{:<16} {}", program.name, program.description);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("read program from stdin")?;
        return Ok(source);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn cmd_run(markov: Markov, config: RunConfig, quiet: bool) -> Result<RunOutcome> {
    let report = Runner::new(config).run(markov);

    let mut out = io::stdout().lock();
    if quiet {
        writeln!(out, "{}", report.markov.state())?;
    } else {
        write!(out, "{}", report.log)?;
    }
    Ok(report.outcome)
}

fn cmd_animate(markov: Markov, config: &RunConfig, quiet: bool) -> Result<RunOutcome> {
    let interval = config.step_interval();
    let mut session = Session::from_markov(markov).with_cycle_detection(config.detect_cycles);
    let mut out = io::stdout().lock();

    if !quiet {
        writeln!(out, "0: {}", session.markov().state())?;
    }

    let outcome = if session.play() {
        animate(&mut session, config, interval, quiet, &mut out)?
    } else {
        RunOutcome::AlreadyTerminated
    };

    if quiet {
        writeln!(out, "{}", session.markov().state())?;
    }
    Ok(outcome)
}

fn animate(
    session: &mut Session,
    config: &RunConfig,
    interval: Duration,
    quiet: bool,
    out: &mut impl Write,
) -> Result<RunOutcome> {
    let mut steps = 0;
    loop {
        if config.max_steps.is_some_and(|max| steps >= max) {
            return Ok(RunOutcome::StepLimit(steps));
        }

        let Some(event) = session.tick() else {
            bail!("session paused unexpectedly");
        };

        if matches!(event, StepEvent::Moved | StepEvent::Terminated | StepEvent::Cycle(_)) {
            steps += 1;
            if !quiet {
                writeln!(out, "{}: {}", session.log().len() - 1, session.markov().state())?;
                out.flush()?;
            }
        }

        let outcome = match event {
            StepEvent::Moved => {
                thread::sleep(interval);
                continue;
            }
            StepEvent::Terminated => RunOutcome::Terminated,
            StepEvent::Halted => RunOutcome::Halted,
            StepEvent::Idle => RunOutcome::AlreadyTerminated,
            StepEvent::Cycle(cycle) => RunOutcome::Cycle(cycle),
        };
        return Ok(outcome);
    }
}

fn cmd_check(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let markov = Markov::new()
        .parse_source(&source)
        .with_context(|| format!("invalid program {}", path.display()))?;

    let mut out = io::stdout().lock();
    for (index, rule) in markov.rules().iter().enumerate() {
        let kind = if rule.is_terminating { "halt" } else { "    " };
        writeln!(out, "{index:>4} {kind} {rule}")?;
    }
    writeln!(out, "{} rules", markov.rules().len())?;
    Ok(())
}
