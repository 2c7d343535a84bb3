use std::fmt;

/// Error codes for all Fynyl diagnostics.
///
/// Format: E#### / W#### where the first digit indicates the phase:
/// - E1xxx: program structure (normalizer)
/// - E6xxx: runtime errors
/// - W6xxx: runtime warnings; execution continues
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Structure Errors (E1xxx)
    /// Read-ahead sigil ran past the end of the program
    E1001,
    /// Unclosed `{`
    E1002,

    // Runtime Errors (E6xxx)
    /// Stack underflow
    E6001,
    /// Operand type mismatch
    E6002,
    /// Division by zero
    E6003,
    /// Index out of bounds
    E6004,
    /// Isolated call left an empty stack
    E6005,
    /// Value cannot be called
    E6006,
    /// Malformed program detected while running
    E6007,
    /// Host I/O failure
    E6008,
    /// Invalid argument value
    E6009,
    /// Other runtime error
    E6099,

    // Runtime Warnings (W6xxx)
    /// Unknown operator
    W6001,
    /// Unknown meta-combinator
    W6002,
    /// Stray token with no meaning at run time
    W6003,
}

impl ErrorCode {
    /// Check if this is a structure error (E1xxx range).
    pub fn is_structure_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Get the code as a string (e.g., "E6001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6099 => "E6099",
            ErrorCode::W6001 => "W6001",
            ErrorCode::W6002 => "W6002",
            ErrorCode::W6003 => "W6003",
        }
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
        assert_eq!(ErrorCode::E6002.as_str(), "E6002");
    }

    #[test]
    fn test_ranges() {
        assert!(ErrorCode::E1002.is_structure_error());
        assert!(!ErrorCode::E6001.is_structure_error());
        assert!(ErrorCode::W6001.is_warning());
        assert!(!ErrorCode::E6099.is_warning());
    }
}
