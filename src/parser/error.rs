use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Expected a quoted prompt inside input(...).")]
    MalformedInput,
    #[error("Expected a parenthesized argument to print.")]
    MalformedPrint,
}
