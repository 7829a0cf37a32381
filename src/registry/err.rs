/// Registry error type
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    /// malformed identity number or date string
    #[error("malformed field: {0}")]
    FormatError(String),
    /// identity number already registered, or course already enrolled
    #[error("duplicate: {0}")]
    DuplicateError(String),
    /// unknown person or course id
    #[error("not found: {0}")]
    NotFoundError(String),
    /// referenced faculty is not in the catalog
    #[error("invalid reference: {0}")]
    ValidationError(String),
    /// cap or faculty-mismatch rule broken
    #[error("policy violation: {0}")]
    PolicyViolation(String),
    /// failed to read a data file
    #[error("failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),
    /// csv parsing failed
    #[error("failed to parse csv: {0}")]
    CsvParseError(#[from] csv::Error),
    /// json parsing failed
    #[error("failed to parse json: {0}")]
    JsonParseError(#[from] serde_json::Error),
    /// regex related error
    #[error("failed to parse or compile a regular expression: {0}")]
    RegexError(#[from] regex::Error),
}
