use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use concord_protocol::MatchRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One pretty-printed JSON array.
    Json,
    /// One JSON object per line.
    Jsonl,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Jsonl => "jsonl",
        }
    }
}

/// Output name used when the corpus folder has no name of its own (`/`).
const FALLBACK_STEM: &str = "corpus";

/// `corpus/late/` -> `corpus/late.json`
///
/// `.` and `..` are resolved first so the file lands beside the folder
/// it describes.
pub fn default_output(folder: &Path, format: Format) -> PathBuf {
    let folder = match folder.components().next_back() {
        Some(Component::Normal(_)) => folder.to_path_buf(),
        _ => folder.canonicalize().unwrap_or_else(|_| folder.to_path_buf()),
    };
    match folder.file_name() {
        Some(stem) => {
            let mut name = stem.to_os_string();
            name.push(".");
            name.push(format.extension());
            folder.with_file_name(name)
        }
        None => PathBuf::from(format!("{FALLBACK_STEM}.{}", format.extension())),
    }
}

pub fn write_records<W: Write>(mut writer: W, records: &[MatchRecord], format: Format) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
        }
        Format::Jsonl => {
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn export(path: &Path, records: &[MatchRecord], format: Format) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Cannot create '{}'", path.display()))?;
    write_records(BufWriter::new(file), records, format)
        .with_context(|| format!("Cannot write records to '{}'", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "records exported");
    Ok(())
}
