//! Main entry point for the `rubig` CLI application.
//!
//! `rubig` lists the mounted volumes, asks which ones to scan and how, then
//! writes the largest files it finds to `relatorio_discos.txt` and
//! `relatorio_arquivos.csv`.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Sets up logging
//! - Installs the Ctrl-C handler before the first prompt
//! - Maps interrupts and errors to the exit status
//!
//! # Exit status
//! - `0` on success
//! - `130` when interrupted with Ctrl-C
//! - `1` on any other error

use anyhow::Result;
use clap::Parser;
use rubig::app::{self, RunOutcome};
use rubig::interrupt::{CANCELLED_MESSAGE, INTERRUPTED_EXIT_CODE, Interrupt};
use rubig::observer::{ConsoleObserver, ScanObserver, TracingObserver};
use rubig::{Args, logging};
use std::io::{self, Write};
use std::process::ExitCode;

fn run(args: &Args, interrupt: &Interrupt) -> Result<RunOutcome> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    interrupt.install_ctrlc_handler()?;
    let plan = app::configure(args, stdin.lock(), &mut stdout)?;

    let observer: Box<dyn ScanObserver> = if args.quiet {
        Box::new(TracingObserver)
    } else {
        Box::new(ConsoleObserver::new())
    };
    app::execute(plan, args, &mut stdout, observer.as_ref(), interrupt)
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = logging::init(args.verbose, args.quiet) {
        eprintln!("{:#}", err);
    }

    let interrupt = Interrupt::new();
    match run(&args, &interrupt) {
        Ok(outcome) if outcome.summary.interrupted || interrupt.is_triggered() => {
            let _ = io::stdout().flush();
            tracing::warn!("Operação cancelada pelo usuário");
            println!("\n\n{}", CANCELLED_MESSAGE);
            ExitCode::from(INTERRUPTED_EXIT_CODE)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Erro fatal: {:?}", err);
            println!("\n❌ Erro: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
