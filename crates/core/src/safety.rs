//! Warnings for commands that can destroy data or the system.
//!
//! Dangerous programs only count in command position: `rm` flags `rm -rf x`,
//! `ls; rm x` and `sudo rm x`, but not `grep rm notes` or `npm run format`.
//! Redirects to harmless devices such as `/dev/null` are ignored.

use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyWarning {
    DangerousProgram(&'static str),
    CriticalPath(&'static str),
    SuspiciousPattern(&'static str),
}

impl Display for SafetyWarning {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyWarning::DangerousProgram(program) => {
                write!(formatter, "runs `{program}`, which can destroy data")
            }
            SafetyWarning::CriticalPath(path) => {
                write!(formatter, "touches the system path `{path}`")
            }
            SafetyWarning::SuspiciousPattern(description) => formatter.write_str(description),
        }
    }
}

/// Start of a command, past any wrappers that run the next word as a program.
const COMMAND_START: &str = r"(?:^|[;&|(`])\s*(?:(?:sudo|doas|xargs|nohup|exec)(?:\s+-\S+)*\s+)*";
const WORD_END: &str = r#"(?:$|[\s;&|)`"'])"#;

const DANGEROUS_PROGRAMS: [(&str, &str); 7] = [
    ("rm", r"rm"),
    ("dd", r"dd"),
    ("mkfs", r"mkfs(?:\.\w+)?"),
    ("fdisk", r"fdisk"),
    ("format", r"format"),
    ("chmod 777", r"chmod\s+(?:-\w+\s+)*0?777"),
    ("chown -R", r"chown\s+(?:-\w+\s+)*-\w*R\w*"),
];

const CRITICAL_PATHS: [&str; 9] = [
    "/etc", "/bin", "/sbin", "/usr/bin", "/usr/sbin", "/boot", "/sys", "/proc", "/dev",
];

const SUSPICIOUS_PATTERNS: [(&str, &str); 8] = [
    (r";\s*rm\b", "chains `rm` after another command"),
    (r"&&\s*rm\b", "chains `rm` after another command"),
    (r"\|\s*rm\b", "pipes into `rm`"),
    (r">\s*/dev/\w", "writes directly to a device"),
    (
        r"\b(?:curl|wget)\b[^|]*\|\s*(?:sudo\s+)?(?:ba|z|da|k)?sh\b",
        "downloads a script and runs it",
    ),
    (r"\bsudo\s+.*\brm\b.*\s-\w*(?:rf|fr)\w*", "removes files recursively as root"),
    (r"\bfind\b.*\s-delete\b", "deletes every file `find` matches"),
    (r"\bxargs\b.*\brm\b", "removes files listed by `xargs`"),
];

static HARMLESS_DEVICES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/dev/(?:null|zero|u?random|tty|stdin|stdout|stderr|fd/\d+)\b")
        .expect("static regex must compile")
});

static PROGRAM_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    DANGEROUS_PROGRAMS
        .iter()
        .map(|(program, pattern)| {
            let regex = Regex::new(&format!("(?i){COMMAND_START}{pattern}{WORD_END}"))
                .expect("static regex must compile");
            (*program, regex)
        })
        .collect()
});

static PATH_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CRITICAL_PATHS
        .iter()
        .map(|path| {
            let regex = Regex::new(&format!(
                r#"(?:^|[\s"'=>:]){}(?:$|[/\s"';|&)])"#,
                regex::escape(path)
            ))
            .expect("static regex must compile");
            (*path, regex)
        })
        .collect()
});

static CHAIN_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    SUSPICIOUS_PATTERNS
        .iter()
        .map(|(pattern, description)| {
            let regex =
                Regex::new(&format!("(?i){pattern}")).expect("static regex must compile");
            (*description, regex)
        })
        .collect()
});

/// Lists everything about `command` worth warning the user about before it runs.
pub fn assess(command: &str) -> Vec<SafetyWarning> {
    let command = HARMLESS_DEVICES.replace_all(command, "");
    let mut warnings = Vec::new();

    for (program, regex) in PROGRAM_PATTERNS.iter() {
        if regex.is_match(&command) {
            warnings.push(SafetyWarning::DangerousProgram(*program));
        }
    }

    for (path, regex) in PATH_PATTERNS.iter() {
        if regex.is_match(&command) {
            warnings.push(SafetyWarning::CriticalPath(*path));
        }
    }

    for (description, regex) in CHAIN_PATTERNS.iter() {
        let warning = SafetyWarning::SuspiciousPattern(*description);
        if regex.is_match(&command) && !warnings.contains(&warning) {
            warnings.push(warning);
        }
    }

    if !warnings.is_empty() {
        debug!("{} safety warnings for `{command}`", warnings.len());
    }

    warnings
}

pub fn is_dangerous(command: &str) -> bool {
    !assess(command).is_empty()
}
