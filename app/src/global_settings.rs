use std::env;

/// Color choice for diagnostic rendering, resolved from the environment the
/// same way the teacher's own `GlobalSettings::from_env` does -- trimmed to
/// the one toggle this CLI's diagnostics actually need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Always,
    Never,
}

#[derive(Debug, Clone)]
pub struct GlobalSettings {
    pub colorize: ColorChoice,
}

impl GlobalSettings {
    pub fn from_env() -> Self {
        let colorize = if env::var_os("NO_COLOR").is_some() {
            ColorChoice::Never
        } else {
            ColorChoice::Always
        };
        Self { colorize }
    }
}
