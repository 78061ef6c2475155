//! UI context for detecting interactive vs CI environments
//!
//! Fancy output (cliclack spinners and log lines) is only used when both
//! stdin and stdout are terminals outside CI. Piped runs get plain lines.

use std::io::IsTerminal;

/// Environment variables set by common CI providers
const CI_ENV_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TEAMCITY_VERSION",
    "TF_BUILD",
];

/// Output and prompt behaviour for one command
#[derive(Debug, Clone)]
pub struct UiContext {
    interactive: bool,
    auto_yes: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        Self::from_parts(
            std::io::stdin().is_terminal(),
            std::io::stdout().is_terminal(),
            |var| std::env::var_os(var).is_some(),
        )
    }

    /// Plain-output context (tests, piped runs)
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            auto_yes: false,
        }
    }

    fn from_parts(stdin_tty: bool, stdout_tty: bool, env_set: impl Fn(&str) -> bool) -> Self {
        let in_ci = CI_ENV_VARS.iter().any(|var| env_set(var));
        Self {
            interactive: stdin_tty && stdout_tty && !in_ci,
            auto_yes: false,
        }
    }

    /// Skip the confirmation prompt (`--yes`)
    pub fn with_auto_yes(mut self, yes: bool) -> Self {
        self.auto_yes = yes;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn auto_yes(&self) -> bool {
        self.auto_yes
    }

    /// Use spinners and cliclack log lines instead of plain prefixed lines
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }
}
