//! Summary report writing

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::pipeline::session::ScanSummary;

/// Write the final scan summary as pretty-printed JSON
///
/// # Arguments
/// * `output_path` - Path to output file
/// * `summary` - Summary returned by the finished scan
pub fn write_summary(output_path: &Path, summary: &ScanSummary) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create summary file {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary).context("Failed to write summary")?;
    writeln!(writer)?;
    writer.flush().context("Failed to flush summary file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::session::ScanCounters;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_summary() {
        let temp_file = NamedTempFile::new().unwrap();
        let summary = ScanSummary {
            root: PathBuf::from("/mnt/archive"),
            counters: ScanCounters::default(),
            delete_failures: 2,
            inconclusive: 3,
            skipped_subtrees: 1,
            cancelled: false,
            elapsed_secs: 1.5,
        };

        write_summary(temp_file.path(), &summary).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["root"], "/mnt/archive");
        assert_eq!(json["processed"], 0);
        assert_eq!(json["delete_failures"], 2);
        assert_eq!(json["inconclusive"], 3);
        assert_eq!(json["skipped_subtrees"], 1);
    }

    #[test]
    fn test_write_summary_bad_path() {
        let summary = ScanSummary {
            root: PathBuf::from("/"),
            counters: ScanCounters::default(),
            delete_failures: 0,
            inconclusive: 0,
            skipped_subtrees: 0,
            cancelled: false,
            elapsed_secs: 0.0,
        };
        assert!(write_summary(Path::new("/no/such/dir/summary.json"), &summary).is_err());
    }
}
