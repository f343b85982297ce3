use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Progress file used when none is given.
pub const DEFAULT_PROGRESS_FILE: &str = "lrnres.yaml";

/// Learn an application's hotkeys by answering quiz questions.
#[derive(Debug, Parser)]
#[command(name = "hotkey-tutor")]
#[command(version, long_about = None)]
pub struct Args {
    /// YAML file with the actions and their hotkeys
    #[arg(value_name = "DEFINITION_FILE", env = "HOTKEY_TUTOR_DEFINITIONS")]
    pub definitions: PathBuf,

    /// YAML file where learning progress is kept
    #[arg(value_name = "PROGRESS_FILE", env = "HOTKEY_TUTOR_PROGRESS")]
    pub progress: Option<PathBuf>,

    /// How questions are shown and answers are read
    #[arg(short, long, value_enum, default_value_t = Mode::Plain)]
    pub mode: Mode,

    /// Log debug details
    #[arg(short, long)]
    pub debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Type answers as text, comma-separated
    Plain,
    /// Press the keys themselves
    Keys,
    /// Full-screen version of `keys`
    Screen,
}

impl Args {
    /// The progress file, and whether it was defaulted.
    #[must_use]
    pub fn progress_path(&self) -> (PathBuf, bool) {
        match &self.progress {
            Some(path) => (path.clone(), false),
            None => (PathBuf::from(DEFAULT_PROGRESS_FILE), true),
        }
    }
}
