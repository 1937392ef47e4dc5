use std::env;
use std::io::{stdin, stdout, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info, warn};
use rust_how_core::command_definitions::CommandCandidate;
use rust_how_core::config::{self, Settings};
use rust_how_core::detection::Detector;
use rust_how_core::error::{Error, Result};
use rust_how_core::interaction::Clipboard;
use rust_how_core::rendering::apply;
use rust_how_core::session::{CustomizationSession, Outcome, SessionStart};
use rust_how_core::suggestions::Suggester;
use rust_how_core::{execution, file_handling, safety};

use rust_how_cli::arguments::process_presets;
use rust_how_cli::cli_args::Args;
use rust_how_cli::clipboard::SystemClipboard;
use rust_how_cli::command_selection::{
    confirm_command_should_run, prompt_for_command_choice, write_command_summary, CommandChoice,
    RunChoice,
};
use rust_how_cli::customization::{self, listing, SessionOptions};

/// Where to go after one candidate has been handled.
enum Flow {
    Done,
    BackToList,
}

/// Everything that stays fixed while the user works through candidates.
struct Context<'a> {
    args: &'a Args,
    settings: &'a Settings,
    options: SessionOptions,
    interactive: bool,
}

/// Detection with filesystem suggestions from the candidate's working
/// directory, or the current one, when probing is enabled.
fn build_detector(settings: &Settings, candidate: &CommandCandidate) -> Detector {
    if !settings.customization.probe_filesystem {
        return Detector::default();
    }

    let directory = match config::expand_working_directory(&candidate.working_directory) {
        Some(directory) => PathBuf::from(directory),
        None => match env::current_dir() {
            Ok(directory) => directory,
            Err(e) => {
                warn!("Cannot read the current directory, suggestions will not probe it: {e}");
                return Detector::default();
            }
        },
    };

    debug!("Probing `{}` for suggestions", directory.display());
    Detector::new(Suggester::probing(directory))
}

/// Picks the candidate to customize, `None` if the user quit.
fn choose_candidate(
    context: &Context,
    candidates: &[CommandCandidate],
    preselected: Option<usize>,
) -> Result<Option<usize>> {
    if preselected.is_some() {
        return Ok(preselected);
    }

    if candidates.len() == 1 {
        return Ok(Some(0));
    }

    if context.interactive {
        match prompt_for_command_choice(candidates) {
            Ok(CommandChoice::Index(index)) => return Ok(Some(index)),
            Ok(CommandChoice::Quit) => return Ok(None),
            Err(Error::Terminal(e)) => warn!("Cannot show the command list: {e}"),
            Err(e) => return Err(e),
        }
    }

    println!("Commands (pass --choice to pick another than the first):");
    for (index, candidate) in candidates.iter().enumerate() {
        println!("[{}] {candidate}", index + 1);
    }
    println!();

    Ok(Some(0))
}

/// Detects the parameters of a candidate and lets the user change them.
///
/// Falls back to printing the parameter table when there is no usable
/// terminal.
fn customize(
    context: &Context,
    candidate: &CommandCandidate,
    presets: &[String],
    clipboard: &mut dyn Clipboard,
) -> Result<Outcome> {
    let detector = build_detector(context.settings, candidate);
    let parameters = detector.detect_with_hints(&candidate.command, &candidate.parameters);
    let edits = process_presets(presets, &parameters)?;

    if context.interactive {
        let start = CustomizationSession::start_with_edits(
            candidate.command.clone(),
            parameters.clone(),
            edits.clone(),
        );

        match start {
            SessionStart::Resolved(outcome) => return Ok(outcome),
            SessionStart::Interactive(session) => {
                match customization::run(session, &context.options, clipboard) {
                    Err(Error::Terminal(e)) => {
                        warn!("Interactive editing unavailable, listing parameters instead: {e}");
                    }
                    result => return result,
                }
            }
        }
    }

    listing::write_parameter_table(&mut stdout(), &parameters, &edits)?;
    println!();

    Ok(Outcome::Commit(apply(&candidate.command, &parameters, &edits)))
}

/// Shows the final command and its warnings, then asks whether to run it.
fn decide(context: &Context, command: &str) -> Result<RunChoice> {
    let warnings = safety::assess(command);
    write_command_summary(&mut stdout(), command, &warnings)?;

    if context.args.dry_run {
        println!("Dry run is specified, exiting without executing.");
        return Ok(RunChoice::No);
    }

    if context.args.force || !context.settings.execution.require_confirmation {
        return Ok(RunChoice::Yes);
    }

    let can_change = context.interactive && !Detector::default().detect(command).is_empty();
    confirm_command_should_run(can_change)
}

fn run_command(settings: &Settings, candidate: &CommandCandidate, command: &str) -> Result<()> {
    let shell = settings.execution.resolve_shell();
    let working_directory = config::expand_working_directory(&candidate.working_directory);

    info!("Running with shell `{shell}`");
    execution::execute_command(execution::shell_command(
        &shell,
        command,
        working_directory.as_deref(),
    ))
}

fn copy_command(clipboard: &mut dyn Clipboard, command: &str) {
    match clipboard.copy(command) {
        Ok(()) => println!("Copied to clipboard:\n{command}"),
        Err(e) => {
            eprintln!("{e}, copy the command by hand:");
            println!("{command}");
        }
    }
}

fn handle_candidate(
    context: &Context,
    candidate: &CommandCandidate,
    clipboard: &mut dyn Clipboard,
) -> Result<Flow> {
    let mut current = candidate.clone();
    // Presets name parameters of the original command only
    let mut presets: &[String] = &context.args.parameters;

    loop {
        let outcome = customize(context, &current, presets, clipboard)?;
        presets = &[];

        match outcome {
            Outcome::Cancelled => return Ok(Flow::BackToList),
            Outcome::CopyAndExit(command) => {
                copy_command(clipboard, &command);
                return Ok(Flow::Done);
            }
            Outcome::Commit(command) => match decide(context, &command)? {
                RunChoice::Yes => {
                    run_command(context.settings, &current, &command)?;
                    return Ok(Flow::Done);
                }
                RunChoice::No => return Ok(Flow::Done),
                RunChoice::ChangeParams => current = current.with_command(command),
            },
        }
    }
}

fn execute() -> Result<()> {
    let args = Args::parse();

    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{config_path}`");
    let settings = file_handling::load_settings(&config_path)?;

    let candidates = args.candidates()?;
    let preselected = args.choice_index(candidates.len())?;

    let context = Context {
        args: &args,
        settings: &settings,
        options: SessionOptions::from_settings(&settings)?,
        interactive: !args.list && stdin().is_terminal() && stdout().is_terminal(),
    };
    debug!("Interactive: {}", context.interactive);

    let mut clipboard = SystemClipboard;

    loop {
        let Some(index) = choose_candidate(&context, &candidates, preselected)? else {
            return Ok(());
        };

        match handle_candidate(&context, &candidates[index], &mut clipboard)? {
            Flow::Done => return Ok(()),
            Flow::BackToList => {
                let has_list =
                    context.interactive && preselected.is_none() && candidates.len() > 1;
                if !has_list {
                    return Ok(());
                }
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
