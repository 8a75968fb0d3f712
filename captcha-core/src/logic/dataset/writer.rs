use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::logic::dataset::record::DatasetRecord;
use crate::logic::features::FEATURE_LAYOUT;

/// On-disk dataset formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Header row in layout order plus `label`, read by the trainer
    Csv,
    /// One JSON object per line
    Jsonl,
}

pub fn write_records<W: Write>(records: &[DatasetRecord], format: DatasetFormat, out: W) -> io::Result<()> {
    match format {
        DatasetFormat::Csv => write_csv(records, out),
        DatasetFormat::Jsonl => write_jsonl(records, out),
    }
}

pub fn write_csv<W: Write>(records: &[DatasetRecord], out: W) -> io::Result<()> {
    let mut out = BufWriter::new(out);

    writeln!(out, "{},label", FEATURE_LAYOUT.join(","))?;
    for r in records {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            r.avg_mouse_speed, r.mouse_path_entropy, r.click_delay, r.task_completion_time, r.idle_time, r.label
        )?;
    }

    out.flush()
}

pub fn write_jsonl<W: Write>(records: &[DatasetRecord], out: W) -> io::Result<()> {
    let mut out = BufWriter::new(out);

    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(out, "{}", json)?;
    }

    out.flush()
}

/// Create (or truncate) `path` and write the dataset
pub fn write_to_path(records: &[DatasetRecord], format: DatasetFormat, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_records(records, format, file)
}
