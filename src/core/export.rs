// LogViewer - core/export.rs
//
// Plain text, CSV and JSON export of the current search results.
// Core layer: writes to any Write trait object.

use crate::core::model::LogLine;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output format, chosen from the save dialog's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    /// Pick a format from the destination's extension; unknown extensions
    /// fall back to plain text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Self::Csv,
            Some("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Write `lines` to `writer` in the given format. Returns the number written.
pub fn export<W: Write>(
    format: ExportFormat,
    lines: &[LogLine],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Text => export_text(lines, writer, export_path),
        ExportFormat::Csv => export_csv(lines, writer, export_path),
        ExportFormat::Json => export_json(lines, writer, export_path),
    }
}

/// One line per result, without doubling the line terminators the
/// backend already includes.
pub fn export_text<W: Write>(
    lines: &[LogLine],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let io_err = |e| ExportError::Io {
        path: PathBuf::from(export_path),
        source: e,
    };
    for line in lines {
        writeln!(writer, "{}", line.display_text()).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;
    Ok(lines.len())
}

/// Writes: line (1-based position in the result), text
pub fn export_csv<W: Write>(
    lines: &[LogLine],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["line", "text"])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    for (idx, line) in lines.iter().enumerate() {
        csv_writer
            .write_record([&(idx + 1).to_string(), line.display_text()])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(lines.len())
}

/// JSON array of the raw line strings.
pub fn export_json<W: Write>(
    lines: &[LogLine],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, lines).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<LogLine> {
        vec![
            LogLine::new("ERROR disk full\n"),
            LogLine::new("WARN retry, \"quoted\"\n"),
        ]
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("out.CSV")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("out.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("out.log")), ExportFormat::Text);
        assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Text);
    }

    #[test]
    fn test_text_export_single_terminator() {
        let mut buf = Vec::new();
        let n = export_text(&lines(), &mut buf, Path::new("out.txt")).unwrap();
        assert_eq!(n, 2);
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output, "ERROR disk full\nWARN retry, \"quoted\"\n");
    }

    #[test]
    fn test_csv_export() {
        let mut buf = Vec::new();
        let n = export_csv(&lines(), &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(n, 2);
        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("line,text\n"));
        assert!(output.contains("1,ERROR disk full"));
        assert!(output.contains("2,\"WARN retry, \"\"quoted\"\"\""));
    }

    #[test]
    fn test_json_export_keeps_raw_lines() {
        let mut buf = Vec::new();
        export(ExportFormat::Json, &lines(), &mut buf, Path::new("out.json")).unwrap();
        let back: Vec<String> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back[0], "ERROR disk full\n");
    }
}
