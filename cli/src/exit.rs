//! Process exit codes.

use std::process::Termination;
use tubegraph_core::error::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TubegraphExit {
    /// Document written to stdout.
    Success = 0,
    /// Required `--filename` flag missing.
    Usage = 1,
    /// Input file missing, unreadable, or not a JSON array of videos.
    InvalidInput = 2,
    /// Configuration, serialization, or output failure.
    Error = 3,
}

impl TubegraphExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<ErrorCode> for TubegraphExit {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::NotFound | ErrorCode::InvalidInput => Self::InvalidInput,
            ErrorCode::Internal => Self::Error,
        }
    }
}

impl Termination for TubegraphExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            TubegraphExit::Success.code(),
            TubegraphExit::Usage.code(),
            TubegraphExit::InvalidInput.code(),
            TubegraphExit::Error.code(),
        ];
        assert_eq!(codes, [0, 1, 2, 3]);
    }

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(TubegraphExit::from(ErrorCode::NotFound), TubegraphExit::InvalidInput);
        assert_eq!(TubegraphExit::from(ErrorCode::InvalidInput), TubegraphExit::InvalidInput);
        assert_eq!(TubegraphExit::from(ErrorCode::Internal), TubegraphExit::Error);
    }
}
