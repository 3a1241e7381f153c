//! Command-line interface entry point for `pathadvisor`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use pathway_advisor::assessment::QuestionRequest;
use pathway_advisor::catalog::CourseGraph;
use pathway_advisor::config::Config;
use pathway_advisor::info;
use pathway_advisor::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let graph = CourseGraph::builtin();

    let outcome = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Catalog { pathway, course } => match (pathway.as_deref(), course.as_deref()) {
            (Some(pathway), Some(course)) => commands::catalog::run_course(&graph, pathway, course),
            (pathway, _) => commands::catalog::run(&graph, pathway),
        },
        Command::Advise {
            pathway,
            goal,
            prereq,
            status,
            grade,
            json,
        } => commands::advise::run(
            &graph,
            &commands::advise::AdviseArgs {
                pathway: &pathway,
                goal: &goal,
                prereq: &prereq,
                status,
                grade,
            },
            json,
        ),
        Command::Wizard => commands::wizard::run(&graph),
        Command::Question {
            lesson,
            difficulty,
            question_type,
            topic,
        } => commands::question::run(
            &config.ai,
            &lesson,
            &QuestionRequest {
                difficulty,
                question_type,
                topic,
            },
        ),
        Command::Quiz { lesson, answers } => {
            commands::quiz::run(&lesson, &answers, config.quiz.pass_threshold)
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {e}");
            ExitCode::FAILURE
        }
    }
}
