//! Command-line front end for the split ledger.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use splitbook::codec::{self, format_delta, format_record, format_time};
use splitbook::{
    DEFAULT_RECORD_FILE, FinalizeOutcome, LedgerError, LedgerSettings, RunLedger, Splitbook, SplitStatus, StorageBackend,
    WipeScope,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Speedrun split ledger", long_about = None)]
struct Cli {
    /// Record file to read and write
    #[arg(long, global = true, env = "SPLITBOOK_DATA", default_value = DEFAULT_RECORD_FILE)]
    data: PathBuf,

    /// Stages in a complete run
    #[arg(long, global = true, default_value_t = splitbook::settings::DEFAULT_STAGES_PER_RUN)]
    stages: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Time a run interactively: enter cumulative times, `end`, `reset` or `quit`
    Run,
    /// Show the selected season's personal best and dream run
    Show,
    /// List stage categories and their recorded seasons
    Seasons,
    /// Reset the selected season record
    Wipe {
        /// Keep best splits; only reset the personal best and run counter
        #[arg(long)]
        keep_dream: bool,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
    /// Select a stage category and/or season
    Switch {
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        season: Option<u32>,
    },
    /// Show how a time entry is read
    Parse { input: String },
    /// Format a number of seconds as a time
    Format {
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();

    let cli = Cli::parse();
    let settings = LedgerSettings::default().with_stages_per_run(cli.stages);

    match cli.command {
        Command::Parse { input } => {
            let seconds = codec::parse_time(&input)?;
            println!("{seconds} s ({})", format_time(seconds));
            Ok(())
        }
        Command::Format { seconds } => {
            println!("{}", format_time(seconds));
            Ok(())
        }
        command => {
            let mut ledger = Splitbook::open_with(&cli.data, settings)
                .with_context(|| format!("failed to open records at {}", cli.data.display()))?;
            debug!(path = %cli.data.display(), "Record file opened");
            let stdin = io::stdin();
            let stdout = io::stdout();
            dispatch(command, &mut ledger, &mut stdin.lock(), &mut stdout.lock())
        }
    }
}

fn dispatch<B, R, W>(command: Command, ledger: &mut RunLedger<B>, input: &mut R, out: &mut W) -> Result<()>
where
    B: StorageBackend,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Run => run_session(ledger, input, out),
        Command::Show => show(ledger, out),
        Command::Seasons => list_seasons(ledger, out),
        Command::Wipe { keep_dream, yes } => {
            let scope = if keep_dream { WipeScope::PbOnly } else { WipeScope::Full };
            let (stage, season) = ledger.active_context();
            let target = format!("{stage} season {season}");
            if !yes && !confirm(&format!("Wipe {target} ({scope:?})? [y/N] "), input, out)? {
                writeln!(out, "Cancelled")?;
                return Ok(());
            }
            ledger.wipe_season_record(scope)?;
            writeln!(out, "Wiped {target}")?;
            Ok(())
        }
        Command::Switch { stage, season } => {
            if stage.is_none() && season.is_none() {
                bail!("nothing to switch: pass --stage and/or --season");
            }
            ledger.switch_context(stage.as_deref(), season)?;
            let (stage, season) = ledger.active_context();
            writeln!(out, "Now tracking {stage} season {season}")?;
            Ok(())
        }
        Command::Parse { .. } | Command::Format { .. } => Ok(()),
    }
}

fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn run_session<B, R, W>(ledger: &mut RunLedger<B>, input: &mut R, out: &mut W) -> Result<()>
where
    B: StorageBackend,
    R: BufRead,
    W: Write,
{
    let (stage, season) = ledger.active_context();
    writeln!(out, "{stage} season {season}, PB {}", format_record(ledger.season_record().personal_best))?;

    let mut line = String::new();
    loop {
        match ledger.next_stage() {
            Some(stage) => write!(out, "stage {stage}> ")?,
            None => write!(out, "run complete, type `end`> ")?,
        }
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "quit" | "exit" => break,
            "reset" => {
                ledger.reset_run();
                writeln!(out, "Run discarded")?;
            }
            "end" => match ledger.finalize_run() {
                Ok(outcome) => announce_finish(out, &outcome)?,
                Err(e) => {
                    report(out, &e)?;
                    // The run was still finalized in memory; only the save failed.
                    if let (true, Some(outcome)) = (e.is_retryable(), ledger.last_finalized()) {
                        announce_finish(out, outcome)?;
                    }
                }
            },
            entry => match ledger.append_stage_time(entry) {
                Ok(Some(outcome)) => {
                    let split = format_time(outcome.entry.split_time_seconds());
                    let verdict = match outcome.status {
                        SplitStatus::NewBest { .. } => "new best split".to_string(),
                        SplitStatus::MatchesBest => "matches best".to_string(),
                        SplitStatus::Behind { delta } => format_delta(delta),
                    };
                    writeln!(
                        out,
                        "stage {} total {} split {split} ({verdict})",
                        outcome.entry.stage(),
                        format_time(outcome.entry.total_time_seconds()),
                    )?;
                }
                Ok(None) => {}
                Err(e) => report(out, &e)?,
            },
        }
    }

    if !ledger.current_run().is_empty() {
        writeln!(out, "Unfinished run of {} stages discarded", ledger.current_run().len())?;
        ledger.reset_run();
    }
    if ledger.is_dirty() {
        ledger.flush().context("records still unsaved at exit")?;
    }
    Ok(())
}

fn announce_finish<W: Write>(out: &mut W, outcome: &FinalizeOutcome) -> Result<()> {
    writeln!(out, "Run #{} finished in {}", outcome.run_count, format_time(outcome.total))?;
    if outcome.new_personal_best {
        writeln!(out, "New personal best! (was {})", format_record(outcome.previous_best))?;
    } else if !outcome.complete {
        writeln!(out, "Incomplete run ({} stages), counted only", outcome.stages_completed)?;
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, error: &LedgerError) -> Result<()> {
    writeln!(out, "error: {error}")?;
    for hint in error.recovery_suggestions() {
        writeln!(out, "  hint: {hint}")?;
    }
    Ok(())
}

fn show<B: StorageBackend, W: Write>(ledger: &RunLedger<B>, out: &mut W) -> Result<()> {
    let (stage, season) = ledger.active_context();
    let record = ledger.season_record();
    writeln!(out, "{stage} season {season}")?;
    writeln!(out, "Runs:          {}", record.run_count)?;
    writeln!(out, "Personal best: {}", format_record(record.personal_best))?;

    let pb = ledger.personal_best_splits();
    if !pb.is_empty() {
        writeln!(out, "\nStage  PB split   PB total")?;
        for row in &pb {
            writeln!(out, "{:>5}  {:>9}  {:>9}", row.stage, format_time(row.split), format_time(row.total))?;
        }
    }

    match ledger.dream_run() {
        Some(dream) => {
            writeln!(out, "\nStage  Best split")?;
            for row in &dream.splits {
                writeln!(out, "{:>5}  {:>10}", row.stage, format_time(row.split))?;
            }
            let suffix = if dream.complete { "" } else { " (partial)" };
            writeln!(out, "Dream run: {}{suffix}", format_time(dream.total))?;
        }
        None => writeln!(out, "Dream run: {}", codec::NO_TIME)?,
    }
    Ok(())
}

fn list_seasons<B: StorageBackend, W: Write>(ledger: &RunLedger<B>, out: &mut W) -> Result<()> {
    let store = ledger.store();
    let (current_stage, current_season) = ledger.active_context();
    for category in store.categories() {
        let seasons = store.seasons_for(category);
        let listed: Vec<String> = seasons
            .iter()
            .map(|season| {
                if category == current_stage && *season == current_season {
                    format!("[{season}]")
                } else {
                    season.to_string()
                }
            })
            .collect();
        writeln!(out, "{category}: {}", if listed.is_empty() { "-".to_string() } else { listed.join(" ") })?;
    }
    Ok(())
}
