//! PDF validation through an external introspection tool
//!
//! The validator never parses PDF internals itself. It hands the file to a
//! probe (by default `pdfinfo`) and trusts the probe's exit status.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use super::validator::{ValidationOutcome, Validator, ValidatorError};

/// Default external tool used to probe PDFs
pub const DEFAULT_PDF_PROBE: &str = "pdfinfo";

/// Result of one successful probe launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    Passed,
    Failed(String),
}

/// Something that can answer "does this PDF parse?"
///
/// `Err` means the probe could not be run at all, not that the file is bad.
pub trait PdfProbe: Send + Sync {
    /// Name reported when the probe is unavailable
    fn name(&self) -> &str;

    fn probe(&self, path: &Path) -> io::Result<ProbeStatus>;

    /// Verify the probe can be launched. Called once before a scan.
    fn check_available(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Probe that spawns an external program with the file as its only argument
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
}

impl CommandProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn quiet_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl Default for CommandProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PDF_PROBE)
    }
}

impl PdfProbe for CommandProbe {
    fn name(&self) -> &str {
        &self.program
    }

    fn probe(&self, path: &Path) -> io::Result<ProbeStatus> {
        let status = self.quiet_command().arg(path).status()?;
        Ok(classify_exit(status))
    }

    fn check_available(&self) -> io::Result<()> {
        // Only a failed launch matters here; version flags exit non-zero on some builds
        self.quiet_command().arg("-v").status().map(|_| ())
    }
}

fn classify_exit(status: ExitStatus) -> ProbeStatus {
    if status.success() {
        ProbeStatus::Passed
    } else {
        match status.code() {
            Some(code) => ProbeStatus::Failed(format!("non-zero probe exit ({})", code)),
            None => ProbeStatus::Failed("probe terminated by signal".to_string()),
        }
    }
}

/// Validator for `.pdf` files
pub struct PdfValidator {
    probe: Box<dyn PdfProbe>,
}

impl PdfValidator {
    pub fn new(probe: Box<dyn PdfProbe>) -> Self {
        Self { probe }
    }

    /// Validator backed by an external program such as `pdfinfo`
    pub fn with_command(program: impl Into<String>) -> Self {
        Self::new(Box::new(CommandProbe::new(program)))
    }

    fn unavailable(&self, source: io::Error) -> ValidatorError {
        ValidatorError::ToolUnavailable {
            tool: self.probe.name().to_string(),
            source,
        }
    }
}

impl Default for PdfValidator {
    fn default() -> Self {
        Self::new(Box::new(CommandProbe::default()))
    }
}

impl Validator for PdfValidator {
    fn kind(&self) -> &'static str {
        "PDF"
    }

    fn validate(&self, path: &Path) -> Result<ValidationOutcome, ValidatorError> {
        match self.probe.probe(path) {
            Ok(ProbeStatus::Passed) => Ok(ValidationOutcome::Valid),
            Ok(ProbeStatus::Failed(reason)) => Ok(ValidationOutcome::invalid(reason)),
            Err(e) => Err(self.unavailable(e)),
        }
    }

    fn preflight(&self) -> Result<(), ValidatorError> {
        self.probe.check_available().map_err(|e| self.unavailable(e))
    }
}
