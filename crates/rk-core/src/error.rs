use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid vector length: {len} (must be positive)")]
    InvalidLength { len: usize },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Shape mismatch in {op}: lengths {left} and {right}")]
    ShapeMismatch {
        op: &'static str,
        left: usize,
        right: usize,
    },
}
