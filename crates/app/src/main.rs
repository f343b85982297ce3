use std::io;
use std::process::ExitCode;

use clap::Parser;
use hotkeys_core::model::SessionSummary;
use services::{Clock, SessionLoopService, TutorSession};
use storage::repository::Storage;
use tracing::{error, info};
use ui::vm::SessionSummaryVm;
use ui::{Frontend, FrontendError, KeysFrontend, PlainFrontend, ScreenFrontend, run_tutor};

mod cli;
mod logging;

use cli::{Args, Mode};

async fn drive<F: Frontend>(
    mut frontend: F,
    service: &SessionLoopService,
    session: &mut TutorSession,
) -> Result<SessionSummary, FrontendError> {
    let summary = run_tutor(&mut frontend, service, session).await;
    // Restore the terminal before anything else is printed.
    drop(frontend);
    summary
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let (progress_path, defaulted) = args.progress_path();
    if defaulted {
        println!(
            "Learning results file path not passed, using default \"{}\"",
            progress_path.display()
        );
    }

    let storage = Storage::yaml(&args.definitions, &progress_path);
    let service = SessionLoopService::from_storage(Clock::default(), &storage);
    let mut session = service.start_session().await?;
    info!(
        definitions = %args.definitions.display(),
        progress = %progress_path.display(),
        mode = ?args.mode,
        "tutor starting"
    );
    if defaulted {
        service.save(&session).await?;
    }

    println!("Learning hotkeys for {}", session.app_name());
    let summary = match args.mode {
        Mode::Plain => {
            let frontend = PlainFrontend::new(io::stdin().lock(), io::stdout());
            drive(frontend, &service, &mut session).await
        }
        Mode::Keys => drive(KeysFrontend::terminal()?, &service, &mut session).await,
        Mode::Screen => drive(ScreenFrontend::terminal()?, &service, &mut session).await,
    }?;

    for line in SessionSummaryVm::from(&summary).lines() {
        println!("{line}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = logging::init(args.debug, args.log_file.as_deref()) {
        eprintln!("cannot open log file: {err}");
        return ExitCode::from(2);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "tutor failed");
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}
