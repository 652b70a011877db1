//! Command-line driver (spec §6). This binary is intentionally thin: it
//! parses flags, reads a DIMACS file, calls into the library, and prints a
//! result. It carries no CDCL or bandit logic of its own.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use cdcl_bandit::dimacs;
use cdcl_bandit::sat::baseline;
use cdcl_bandit::sat::rl::{self, RlConfig};
use cdcl_bandit::{HeuristicKind, SolveStatus};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    Rl,
    Baseline,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum HeuristicArg {
    Vsids,
    Jw,
    Dlis,
    Random,
}

impl From<HeuristicArg> for HeuristicKind {
    fn from(h: HeuristicArg) -> Self {
        match h {
            HeuristicArg::Vsids => HeuristicKind::Vsids,
            HeuristicArg::Jw => HeuristicKind::JeroslowWang,
            HeuristicArg::Dlis => HeuristicKind::Dlis,
            HeuristicArg::Random => HeuristicKind::Random,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "solve", about = "CDCL SAT solver with a LinUCB bandit branching controller")]
struct Cli {
    #[arg(long, value_enum, default_value = "rl")]
    mode: Mode,

    #[arg(long, value_enum)]
    heuristic: Option<HeuristicArg>,

    #[arg(long)]
    cnf: PathBuf,

    #[arg(long, default_value_t = 50)]
    epoch: u64,

    #[arg(long, default_value_t = 200)]
    restart: u64,

    #[arg(long, default_value_t = 0.3)]
    alpha: f64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long)]
    timeout: Option<f64>,

    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(0)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let file = File::open(&cli.cnf).with_context(|| format!("opening {}", cli.cnf.display()))?;
    let cnf = dimacs::parse(BufReader::new(file), false).context("parsing DIMACS input")?;

    info!(
        "parsed {} variables, {} clauses from {}",
        cnf.num_vars,
        cnf.clauses.len(),
        cli.cnf.display()
    );

    // Checked between CDCL steps inside each driver loop, not after it
    // returns — the core has no clock of its own (spec §5), so a deadline
    // set here is the only thing that can cut a runaway solve short.
    let deadline = cli.timeout.map(|t| Instant::now() + Duration::from_secs_f64(t));

    match cli.mode {
        Mode::Baseline => {
            let heuristic: HeuristicKind = cli.heuristic.unwrap_or(HeuristicArg::Vsids).into();
            let result = baseline::solve(
                cnf.num_vars,
                &cnf.clauses,
                heuristic,
                cli.restart,
                cli.seed,
                deadline,
            );
            print_stats(result.stats, result.elapsed_seconds);
            match result.status {
                SolveStatus::Sat(model) => {
                    if !dimacs::validate_model(&cnf, &model) {
                        eprintln!("error: internal self-check failed, model does not satisfy input");
                        return Ok(ExitCode::from(0));
                    }
                    println!("SATISFIABLE");
                    Ok(ExitCode::from(10))
                }
                SolveStatus::Unsat => {
                    println!("UNSATISFIABLE");
                    Ok(ExitCode::from(20))
                }
                SolveStatus::Timeout => {
                    eprintln!("error: timeout exceeded");
                    Ok(ExitCode::from(0))
                }
            }
        }

        Mode::Rl => {
            let config = RlConfig {
                epoch_size: cli.epoch,
                restart_interval: cli.restart,
                alpha: cli.alpha,
                seed: cli.seed,
                ..RlConfig::default()
            };
            let result = rl::solve(cnf.num_vars, &cnf.clauses, config, deadline);
            print_stats(result.stats, result.elapsed_seconds);

            if let Some(path) = &cli.csv {
                write_epoch_csv(path, &result.epochs)?;
            }

            match result.status {
                SolveStatus::Sat(model) => {
                    if !dimacs::validate_model(&cnf, &model) {
                        eprintln!("error: internal self-check failed, model does not satisfy input");
                        return Ok(ExitCode::from(0));
                    }
                    println!("SATISFIABLE");
                    Ok(ExitCode::from(10))
                }
                SolveStatus::Unsat => {
                    println!("UNSATISFIABLE");
                    Ok(ExitCode::from(20))
                }
                SolveStatus::Timeout => {
                    eprintln!("error: timeout exceeded");
                    Ok(ExitCode::from(0))
                }
            }
        }
    }
}

fn print_stats(stats: cdcl_bandit::Stats, elapsed: f64) {
    info!("conflicts     : {}", stats.conflicts);
    info!("decisions     : {}", stats.decisions);
    info!("propagations  : {}", stats.propagations);
    info!("restarts      : {}", stats.restarts);
    info!("CPU time      : {elapsed:.3} s");
}

fn write_epoch_csv(path: &PathBuf, epochs: &[rl::EpochRecord]) -> anyhow::Result<()> {
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write!(
        f,
        "epoch_index,arm,reward,conflicts_in_epoch,propagations_in_epoch,decisions_in_epoch,avg_lbd_in_epoch"
    )?;
    for i in 0..cdcl_bandit::sat::context::CONTEXT_DIM {
        write!(f, ",ctx_{i}")?;
    }
    writeln!(f)?;
    for e in epochs {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            e.epoch_index,
            e.arm,
            e.reward,
            e.conflicts_in_epoch,
            e.propagations_in_epoch,
            e.decisions_in_epoch,
            e.avg_lbd_in_epoch
        )?;
        for c in &e.context {
            write!(f, ",{c}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}
