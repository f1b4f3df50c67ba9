//! Scanner settings that do not live in the optstring.

/// Behaviour switches for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub(crate) long_only: bool,
    pub(crate) report_errors: bool,
    pub(crate) posixly_correct: bool,
}

impl ScanConfig {
    pub fn new() -> Self {
        ScanConfig {
            long_only: false,
            report_errors: true,
            posixly_correct: false,
        }
    }

    /// Defaults, plus `posixly_correct` when `POSIXLY_CORRECT` or
    /// `POSIX_ME_HARDER` is set.
    pub fn from_env() -> Self {
        let posixly_correct =
            std::env::var_os("POSIXLY_CORRECT").is_some() || std::env::var_os("POSIX_ME_HARDER").is_some();
        Self::new().posixly_correct(posixly_correct)
    }

    /// Accept long options after a single dash, as `getopt_long_only` does.
    pub fn long_only(mut self, on: bool) -> Self {
        self.long_only = on;
        self
    }

    /// Whether callers should print diagnostics for errors (`opterr`).
    pub fn report_errors(mut self, on: bool) -> Self {
        self.report_errors = on;
        self
    }

    /// Default to stopping at the first operand instead of permuting.
    pub fn posixly_correct(mut self, on: bool) -> Self {
        self.posixly_correct = on;
        self
    }

    pub fn is_long_only(&self) -> bool {
        self.long_only
    }

    pub fn reports_errors(&self) -> bool {
        self.report_errors
    }

    pub fn is_posixly_correct(&self) -> bool {
        self.posixly_correct
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ScanConfig::default();
        assert!(!config.is_long_only());
        assert!(config.reports_errors());
        assert!(!config.is_posixly_correct());
    }

    #[test]
    fn builder_chain() {
        let config = ScanConfig::new()
            .long_only(true)
            .report_errors(false)
            .posixly_correct(true);
        assert!(config.is_long_only());
        assert!(!config.reports_errors());
        assert!(config.is_posixly_correct());
    }
}
