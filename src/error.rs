//! Crate-level error types. The CORE solver never returns a `Result` — per
//! spec §7, conflicts and SAT/UNSAT are solver *states*, not errors. Only the
//! DIMACS reader (an "external collaborator", spec §1) can fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DimacsError {
    #[error("malformed DIMACS header: {0}")]
    MalformedHeader(String),

    #[error("non-integer token {token:?} on line {line}")]
    BadToken { line: usize, token: String },

    #[error("clause starting on line {line} is missing its terminating 0")]
    MissingTerminator { line: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
