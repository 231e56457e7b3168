//! Engine errors.
//!
//! Everything here is recovered locally inside the play surface: audio is
//! an enhancement, never a blocking dependency for the storytelling flow.

use thiserror::Error;

use crate::output::OutputError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine has been disposed")]
    Disposed,

    #[error(transparent)]
    Output(#[from] OutputError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_errors_convert() {
        let err: EngineError = OutputError::NoDevice.into();
        assert!(matches!(err, EngineError::Output(OutputError::NoDevice)));
        assert_eq!(err.to_string(), "no default output device");
    }
}
