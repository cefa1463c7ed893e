use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::{decode, FileEntry, FilterPolicy, TextEncoding};
use crate::output::ReportWriter;
use crate::walker::{walk, Candidate};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub files: usize,
    pub bytes: u64,
    /// Files that were not valid UTF-8 and went through the fallback.
    pub fallback_decoded: usize,
}

/// Writes every file under `root` accepted by a policy into one report.
///
/// Any I/O failure aborts the run with the offending path in the error.
/// The report may be left partially written in that case.
#[derive(Debug, Clone)]
pub struct Exporter {
    root: PathBuf,
    output: PathBuf,
    show_progress: bool,
}

impl Exporter {
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Exporter {
            root: root.into(),
            output: output.into(),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn export(&self, policy: &FilterPolicy) -> Result<ExportSummary> {
        let file = File::create(&self.output)
            .with_context(|| format!("failed to create {}", self.output.display()))?;
        let skip = fs::canonicalize(&self.output).ok();
        self.write_report(file, walk(&self.root, policy, skip.as_deref()))
    }

    fn write_report(
        &self,
        file: File,
        candidates: impl Iterator<Item = Result<Candidate>>,
    ) -> Result<ExportSummary> {
        let mut writer = ReportWriter::new(BufWriter::new(file));

        let pb = self.progress_bar()?;
        let mut summary = ExportSummary::default();

        for candidate in candidates {
            let candidate = candidate?;
            pb.set_message(format!("Reading {}", candidate.relative));

            let (entry, encoding) = read_entry(candidate)?;
            if encoding != TextEncoding::Utf8 {
                tracing::warn!(file = %entry.path, %encoding, "file is not valid UTF-8, used fallback decoding");
                summary.fallback_decoded += 1;
            }

            writer
                .write_entry(&entry)
                .with_context(|| format!("failed to write {}", self.output.display()))?;
            tracing::debug!(file = %entry.path, "exported");
            summary.bytes += entry.content.len() as u64;
        }

        summary.files = writer.entries();
        writer
            .finish()
            .with_context(|| format!("failed to write {}", self.output.display()))?;
        pb.finish_and_clear();

        tracing::info!(
            files = summary.files,
            bytes = summary.bytes,
            fallback_decoded = summary.fallback_decoded,
            output = %self.output.display(),
            "export complete"
        );
        Ok(summary)
    }

    fn progress_bar(&self) -> Result<ProgressBar> {
        if !self.show_progress {
            return Ok(ProgressBar::hidden());
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message("Scanning files...");
        Ok(pb)
    }
}

/// Reads a candidate's bytes and decodes them through the fallback chain.
pub fn read_entry(candidate: Candidate) -> Result<(FileEntry, TextEncoding)> {
    let bytes = fs::read(&candidate.path)
        .with_context(|| format!("failed to read {}", candidate.path.display()))?;
    let decoded = decode(&bytes);

    Ok((
        FileEntry {
            path: candidate.relative,
            content: decoded.text,
        },
        decoded.encoding,
    ))
}

/// Exports the current working directory into `output_path`.
pub fn export(output_path: impl AsRef<Path>, policy: &FilterPolicy) -> Result<ExportSummary> {
    Exporter::new(".", output_path.as_ref()).export(policy)
}
