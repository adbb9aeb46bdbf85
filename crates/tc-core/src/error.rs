use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Root of {what} is not bracketed by [{lower}, {upper}]")]
    NoBracket {
        what: &'static str,
        lower: f64,
        upper: f64,
    },

    #[error(
        "Convergence failed for {what} after {iterations} iterations \
         (last iterate {last_iterate}, residual {residual:e})"
    )]
    Convergence {
        what: &'static str,
        iterations: usize,
        last_iterate: f64,
        residual: f64,
    },
}
