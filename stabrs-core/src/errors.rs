use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Missing required column `{column}` in header of {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("Malformed record on line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
