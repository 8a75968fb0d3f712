//! Dataset Module - synthetic training data
//!
//! Produces labeled rows for the offline trainer. Not part of the
//! runtime decision path.

pub mod generator;
pub mod record;
pub mod writer;


pub use generator::{SampleRanges, SyntheticGenerator, DEFAULT_BOTS, DEFAULT_HUMANS};
pub use record::{DatasetRecord, LABEL_BOT, LABEL_HUMAN};
pub use writer::{write_csv, write_jsonl, write_records, write_to_path, DatasetFormat};
