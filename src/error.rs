use thiserror::Error;

/// Errors produced by the change-making solvers and their input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input rejected at the boundary: negative amount, zero or duplicate
    /// denomination, empty set, or an amount above the configured limit.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No combination of the given denominations sums to `amount`.
    /// `remainder` is the sub-amount the solver could not make up.
    #[error("amount {amount} is unrepresentable with the given denominations (stuck at {remainder})")]
    Unrepresentable { amount: usize, remainder: usize },
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::Unrepresentable {
            amount: 1,
            remainder: 1,
        };
        assert_eq!(
            err.to_string(),
            "amount 1 is unrepresentable with the given denominations (stuck at 1)"
        );
        assert_eq!(
            Error::invalid_input("zero coin").to_string(),
            "invalid input: zero coin"
        );
    }
}
