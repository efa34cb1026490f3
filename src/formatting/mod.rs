use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Detect based on terminal
    #[default]
    Auto,
    /// Force colors on
    Always,
    /// Force colors off
    Never,
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }

    /// Resolve `Auto` against the conventional environment variables.
    pub fn from_env(self) -> Self {
        if self != Self::Auto {
            return self;
        }

        // NO_COLOR per no-color.org
        if env::var("NO_COLOR").is_ok() {
            return Self::Never;
        }
        if env::var("CLICOLOR").is_ok_and(|val| val == "0") {
            return Self::Never;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|val| val == "1") {
            return Self::Always;
        }
        Self::Auto
    }

    /// Apply the mode to every `colored` string rendered afterwards.
    pub fn apply(self) {
        colored::control::set_override(self.from_env().should_use_color());
    }
}

fn detect_color_support() -> bool {
    std::io::stdout().is_terminal() && env::var("TERM").map_or(true, |term| term != "dumb")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_modes_ignore_environment() {
        assert_eq!(ColorMode::Never.from_env(), ColorMode::Never);
        assert!(ColorMode::Always.should_use_color());
        assert!(!ColorMode::Never.should_use_color());
    }
}
