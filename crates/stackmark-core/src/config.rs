//! Runtime diagnostics configuration.
//!
//! Build switches are cargo features; this only tunes what a diagnostics
//! build does with the frames it records. A build without `diagnostics`
//! accepts the same configuration and ignores it.

pub const ECHO_ENV: &str = "STACKMARK_ECHO";
pub const TIMING_ENV: &str = "STACKMARK_TIMING";

/// Which routines emit `enters` / `exits` events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Echo {
    #[default]
    Off,
    All,
    Routines(Vec<String>),
}

impl Echo {
    /// Parses `off`, `all` or a comma-separated list of routine names.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("off") {
            return Echo::Off;
        }
        if value.eq_ignore_ascii_case("all") {
            return Echo::All;
        }
        let routines: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        if routines.is_empty() {
            Echo::Off
        } else {
            Echo::Routines(routines)
        }
    }

    pub fn selects(&self, routine: &str) -> bool {
        match self {
            Echo::Off => false,
            Echo::All => true,
            Echo::Routines(names) => names.iter().any(|name| name == routine),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    pub echo: Echo,
    /// Collect per-routine call counts and inclusive time.
    pub timing: bool,
}

impl DiagnosticsConfig {
    /// Reads `STACKMARK_ECHO` and `STACKMARK_TIMING`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`DiagnosticsConfig::from_env`], with variables supplied by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let echo = lookup(ECHO_ENV)
            .map(|value| Echo::parse(&value))
            .unwrap_or_default();
        let timing = lookup(TIMING_ENV).is_some_and(|value| parse_flag(&value));
        Self { echo, timing }
    }

    pub fn with_echo(mut self, echo: Echo) -> Self {
        self.echo = echo;
        self
    }

    pub fn with_timing(mut self, timing: bool) -> Self {
        self.timing = timing;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from<'a>(
        vars: &'a [(&'a str, &'a str)],
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn echo_parses_keywords_and_lists() {
        assert_eq!(Echo::parse(""), Echo::Off);
        assert_eq!(Echo::parse(" OFF "), Echo::Off);
        assert_eq!(Echo::parse("All"), Echo::All);
        assert_eq!(Echo::parse(" , ,"), Echo::Off);
        assert_eq!(
            Echo::parse("assemble_stiffness, solve_static,"),
            Echo::Routines(vec!["assemble_stiffness".into(), "solve_static".into()])
        );
    }

    #[test]
    fn echo_selection() {
        let echo = Echo::parse("solve_static");
        assert!(echo.selects("solve_static"));
        assert!(!echo.selects("solve"));
        assert!(Echo::All.selects("anything"));
        assert!(!Echo::Off.selects("anything"));
    }

    #[test]
    fn missing_variables_give_defaults() {
        let config = DiagnosticsConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, DiagnosticsConfig::default());
    }

    #[test]
    fn variables_are_read() {
        let config = DiagnosticsConfig::from_lookup(lookup_from(&[
            (ECHO_ENV, "all"),
            (TIMING_ENV, " Yes"),
        ]));
        assert_eq!(config.echo, Echo::All);
        assert!(config.timing);

        let config = DiagnosticsConfig::from_lookup(lookup_from(&[(TIMING_ENV, "maybe")]));
        assert!(!config.timing);
    }
}
