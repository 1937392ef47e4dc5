use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::hints::ExternalHint;

/// One command suggested for the user's request.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CommandCandidate {
    pub command: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub working_directory: Option<String>,
    /// Parameter hints whose spans index into `command`.
    #[serde(default)]
    pub parameters: Vec<ExternalHint>,
}

impl CommandCandidate {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: None,
            working_directory: None,
            parameters: Vec::new(),
        }
    }

    /// Builds a candidate from command-line words, `None` when there are none.
    pub fn from_words(words: &[String]) -> Option<Self> {
        let command = words.join(" ");
        if command.trim().is_empty() {
            return None;
        }

        Some(Self::new(command))
    }

    /// The same candidate for a different command. Hints are dropped since
    /// their spans no longer line up.
    #[must_use]
    pub fn with_command(&self, command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: self.description.clone(),
            working_directory: self.working_directory.clone(),
            parameters: Vec::new(),
        }
    }
}

impl Display for CommandCandidate {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) if !description.trim().is_empty() => {
                write!(formatter, "{} ({})", self.command, description)
            }
            _ => formatter.write_str(&self.command),
        }
    }
}

/// Layouts accepted for a response file.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum CandidateFile {
    Wrapped { commands: Vec<CommandCandidate> },
    Bare(Vec<CommandCandidate>),
}

impl CandidateFile {
    pub fn into_candidates(self) -> Vec<CommandCandidate> {
        match self {
            CandidateFile::Wrapped { commands } => commands,
            CandidateFile::Bare(commands) => commands,
        }
    }
}
