//! CLI argument definitions for `pathadvisor`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pathway_advisor::assessment::AnswerLetter;
use pathway_advisor::config::{parse_pass_threshold, ConfigOverrides};
use pathway_advisor::logger::Level;
use pathway_advisor::models::{GradeReport, PrereqStatus};

/// Lesson used by `question` and `quiz` when `--lesson` is omitted
pub const DEFAULT_LESSON: &str = "04_conduct_expectations_responsibilities";

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Level::from(*self).fmt(f)
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `model`, `pass_threshold`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List pathways and their courses in progression order.
    Catalog {
        /// Only show this pathway (e.g., `academic`, `physics`)
        #[arg(short, long, value_name = "ID")]
        pathway: Option<String>,

        /// Show the full prerequisite chain for one course of the pathway
        #[arg(short, long, value_name = "COURSE", requires = "pathway")]
        course: Option<String>,
    },
    /// Get a recommendation for one goal course.
    ///
    /// Example: `pathadvisor advise -p academic -g math30-1 --prereq math20-1 -s finished --grade 65-69%`
    Advise {
        /// Pathway id
        #[arg(short, long, value_name = "ID")]
        pathway: String,

        /// Goal course id
        #[arg(short, long, value_name = "COURSE")]
        goal: String,

        /// Prerequisite course id, or `none`
        #[arg(long, value_name = "COURSE", default_value = "none")]
        prereq: String,

        /// Status in the prerequisite (finished, currently-taking, no-prereq)
        #[arg(short, long, value_name = "STATUS", default_value = "no-prereq")]
        status: PrereqStatus,

        /// Reported grade band (e.g., `65-69%`, `Below 40%`, `in-progress`)
        #[arg(long, value_name = "BAND")]
        grade: Option<GradeReport>,

        /// Print the recommendation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Step through pathway, goal and prerequisite interactively.
    Wizard,
    /// Generate a practice question for a lesson.
    ///
    /// Falls back to the lesson's built-in question when the AI backend
    /// is unavailable.
    Question {
        /// Lesson id
        #[arg(long, value_name = "ID", default_value = DEFAULT_LESSON)]
        lesson: String,

        /// Difficulty (default: intermediate)
        #[arg(short, long, value_name = "LEVEL")]
        difficulty: Option<String>,

        /// Question type (default: multiple-choice)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        question_type: Option<String>,

        /// Topic (default: the lesson's default topic)
        #[arg(long, value_name = "TOPIC")]
        topic: Option<String>,
    },
    /// Score answers to a lesson's knowledge check.
    Quiz {
        /// Lesson id
        #[arg(long, value_name = "ID", default_value = DEFAULT_LESSON)]
        lesson: String,

        /// Answers in question order, comma separated (e.g., `B,C,A,D,B`)
        #[arg(short, long, value_name = "LETTERS", value_delimiter = ',')]
        answers: Vec<AnswerLetter>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "pathadvisor",
    about = "Course pathway advisor and lesson knowledge checks",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the AI API base URL
    #[arg(long = "ai-endpoint", value_name = "URL")]
    pub ai_endpoint: Option<String>,

    /// Override the AI model name
    #[arg(long = "ai-model", value_name = "MODEL")]
    pub ai_model: Option<String>,

    /// Override the AI API key
    #[arg(long = "ai-key", value_name = "KEY")]
    pub ai_key: Option<String>,

    /// Override the knowledge-check pass mark (percent)
    #[arg(long = "pass-threshold", value_name = "PERCENT", value_parser = parse_pass_threshold)]
    pub pass_threshold: Option<f32>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            ai_endpoint: self.ai_endpoint.clone(),
            ai_model: self.ai_model.clone(),
            ai_key: self.ai_key.clone(),
            pass_threshold: self.pass_threshold,
        }
    }
}
