//! pdflatex driver — turns rendered LaTeX into a PDF on disk.
//!
//! pdflatex routinely exits nonzero for recoverable formatting warnings, so
//! the success criterion is "expected PDF exists afterwards", not the exit
//! code. Tool-missing, timeout, and missing-output are distinct fatal errors;
//! there is no retry.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::{error, warn};

const DEFAULT_PROGRAM: &str = "pdflatex";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("pdflatex not found. Please install LaTeX.")]
    ToolMissing,

    #[error("LaTeX compilation timed out")]
    Timeout,

    #[error("PDF file was not generated")]
    NoOutput,

    #[error("I/O error during compilation: {0}")]
    Io(#[from] std::io::Error),
}

/// Invokes the external LaTeX compiler with a bounded timeout.
/// The program and timeout are swappable so tests can run without a TeX
/// distribution installed.
#[derive(Debug, Clone)]
pub struct TexCompiler {
    program: String,
    timeout: Duration,
}

impl Default for TexCompiler {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TexCompiler {
    #[cfg(test)]
    pub(crate) fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Writes `latex_source` into `output_dir` and compiles it there.
    /// Returns the path of the produced PDF.
    pub async fn compile(
        &self,
        latex_source: &str,
        output_dir: &Path,
        company: &str,
        role: &str,
    ) -> Result<PathBuf, CompileError> {
        let stem = format!("cover_letter_{company}_{role}");
        let tex_path = output_dir.join(format!("{stem}.tex"));
        let pdf_path = output_dir.join(format!("{stem}.pdf"));

        tokio::fs::write(&tex_path, latex_source).await?;

        // kill_on_drop bounds the process, not just the call: dropping the
        // output future on timeout must not leave a runaway compiler writing
        // into the scratch directory.
        let run = Command::new(&self.program)
            .arg("-interaction=nonstopmode")
            .arg("-output-directory")
            .arg(output_dir)
            .arg(&tex_path)
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, run).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CompileError::ToolMissing)
            }
            Ok(Err(e)) => return Err(CompileError::Io(e)),
            Err(_) => return Err(CompileError::Timeout),
        };

        if !pdf_path.exists() {
            error!(
                "LaTeX compilation failed. Status: {}, stderr: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(CompileError::NoOutput);
        }

        if !output.status.success() {
            // Recoverable formatting warnings still produce a usable PDF.
            warn!(
                "LaTeX compilation completed with warnings. Status: {}, stderr: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(pdf_path)
    }
}
