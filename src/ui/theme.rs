//! cliclack theme with a per-phase accent colour

use cliclack::ThemeState;
use console::Style;

/// Accent used for bars and active symbols
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Accent {
    /// Read-only phases (scanning, diffing)
    #[default]
    Calm,
    /// The deletion phase
    Destructive,
}

impl Accent {
    fn style(self) -> Style {
        match self {
            Self::Calm => Style::new().magenta(),
            Self::Destructive => Style::new().red().bold(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NuPruneTheme {
    accent: Accent,
}

impl NuPruneTheme {
    pub fn new(accent: Accent) -> Self {
        Self { accent }
    }

    pub fn accent(&self) -> Accent {
        self.accent
    }
}

impl cliclack::Theme for NuPruneTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => self.accent.style(),
            ThemeState::Submit => self.accent.style().dim(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Submit => Style::new().green(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Active => self.accent.style(),
        }
    }
}

/// Install the default theme
pub fn init_theme() {
    set_accent(Accent::Calm);
}

/// Switch the global theme's accent, e.g. before deleting
pub fn set_accent(accent: Accent) {
    cliclack::set_theme(NuPruneTheme::new(accent));
}
