//! Invocation context and structured error sink.
//!
//! Failures never propagate past the pipeline's public boundary; they are
//! recorded here as typed entries and flushed once per invocation as a JSON
//! report next to the output artifact.

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

pub const PARSE_REPORT_VERSION_V1: u32 = 1;
pub const PARSE_REPORT_FILE_NAME: &str = "parsing.log.json";
pub const OUTPUT_DOCUMENT_FILE_NAME: &str = "owlapi.xrdf";

/// Typed failure taxonomy of a pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Configuration,
    MasterFileMissing,
    Parse,
    OntologyCreation,
    Storage,
    Unknown,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::MasterFileMissing => "master file missing",
            ErrorKind::Parse => "parse",
            ErrorKind::OntologyCreation => "ontology creation",
            ErrorKind::Storage => "storage",
            ErrorKind::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// One recorded failure.
#[derive(Clone, Debug, Serialize)]
pub struct RecordedError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

#[derive(Serialize)]
struct ParseReportV1<'a> {
    version: u32,
    success: bool,
    errors: &'a [RecordedError],
    warnings: &'a [String],
}

/// Collects errors and warnings for one invocation; flushes exactly once.
#[derive(Debug, Default)]
pub struct ErrorSink {
    errors: Vec<RecordedError>,
    warnings: Vec<String>,
    flushed: bool,
}

impl ErrorSink {
    pub fn add_error(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.errors.push(RecordedError {
            kind,
            message: message.into(),
            trace: None,
        });
    }

    pub fn add_error_with_trace(
        &mut self,
        kind: ErrorKind,
        message: impl Into<String>,
        trace: impl Into<String>,
    ) {
        self.errors.push(RecordedError {
            kind,
            message: message.into(),
            trace: Some(trace.into()),
        });
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    #[must_use]
    pub fn errors(&self) -> &[RecordedError] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Writes the report to `path`. A second call is a no-op: the report is
    /// persisted exactly once per invocation.
    pub fn flush(&mut self, path: &Path) {
        if self.flushed {
            return;
        }
        self.flushed = true;
        let report = ParseReportV1 {
            version: PARSE_REPORT_VERSION_V1,
            success: self.errors.is_empty(),
            errors: &self.errors,
            warnings: &self.warnings,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    warn!(path = %path.display(), error = %err, "could not persist parse report");
                }
            }
            Err(err) => warn!(error = %err, "could not serialize parse report"),
        }
    }
}

/// Configuration of one pipeline invocation.
#[derive(Debug)]
pub struct InvocationContext {
    /// File to treat as the primary ontology; a bare name when an input
    /// folder is given, otherwise a path.
    pub master_file_name: String,
    pub input_repository_folder: Option<PathBuf>,
    pub output_repository_folder: PathBuf,
    /// Version marker recovered from a discovered OBO document.
    pub obo_version: Option<String>,
    pub error_sink: ErrorSink,
}

impl InvocationContext {
    pub fn new(
        master_file_name: impl Into<String>,
        output_repository_folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            master_file_name: master_file_name.into(),
            input_repository_folder: None,
            output_repository_folder: output_repository_folder.into(),
            obo_version: None,
            error_sink: ErrorSink::default(),
        }
    }

    pub fn with_input_repository(mut self, folder: impl Into<PathBuf>) -> Self {
        self.input_repository_folder = Some(folder.into());
        self
    }

    pub fn set_obo_version(&mut self, version: impl Into<String>) {
        self.obo_version = Some(version.into());
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.master_file_name.trim().is_empty() {
            return Err("master file name is empty".to_string());
        }
        if self.output_repository_folder.as_os_str().is_empty() {
            return Err("output repository folder is empty".to_string());
        }
        Ok(())
    }

    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.output_repository_folder.join(PARSE_REPORT_FILE_NAME)
    }

    #[must_use]
    pub fn output_document_path(&self) -> PathBuf {
        self.output_repository_folder.join(OUTPUT_DOCUMENT_FILE_NAME)
    }
}
