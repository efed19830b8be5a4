use crate::parser::ClassifyError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    #[error("{0}")]
    Classify(#[from] ClassifyError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("[line {line}] {kind}")]
pub struct RuntimeError {
    #[source]
    pub kind: RuntimeErrorKind,
    pub line: u32,
}
