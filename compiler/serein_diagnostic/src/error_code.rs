use std::fmt;

/// Error codes for all Serein.Script diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Type errors
/// - E3xxx: Runtime failures
/// - E4xxx: Source backend errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unrecognized character in source
    E0002,
    /// Malformed number literal
    E0003,
    /// Unterminated char literal
    E0004,
    /// Invalid escape sequence
    E0005,
    /// Unterminated raw string literal
    E0006,
    /// Empty or multi-character char literal
    E0007,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Invalid assignment target
    E1003,
    /// Unresolvable postfix chain
    E1004,
    /// Statement lookahead limit exceeded
    E1005,
    /// Function declarations are not supported
    E1006,
    /// Expected identifier
    E1007,
    /// Call on something that is not a name
    E1008,

    // Type Errors (E2xxx)
    /// Incompatible assignment
    E2001,
    /// Invalid operand types for a binary operator
    E2002,
    /// Non-boolean condition
    E2003,
    /// Unknown member
    E2004,
    /// Unknown method or no matching overload
    E2005,
    /// Type has no indexer
    E2006,
    /// Unknown type
    E2007,
    /// Inconsistent return types across branches
    E2008,
    /// Unknown mounted function
    E2009,
    /// No matching constructor
    E2010,
    /// Assignment to a read-only member or indexer
    E2011,

    // Runtime Failures (E3xxx)
    /// Null operand in a binary operation
    E3001,
    /// Division by zero
    E3002,
    /// Non-boolean condition value
    E3003,
    /// Missing member at invocation time
    E3004,
    /// Missing method at invocation time
    E3005,
    /// Unknown mounted function at invocation time
    E3006,
    /// Member or index access on null
    E3007,
    /// Index out of range or missing key
    E3008,
    /// Value of the wrong runtime type
    E3009,
    /// Execution was cancelled
    E3010,
    /// A host function or member reported a failure
    E3011,
    /// Type could not be instantiated
    E3012,

    // Source Backend Errors (E4xxx)
    /// Type table was not built for this program
    E4001,
    /// Construct cannot be expressed in generated source
    E4002,
}

/// Pipeline phase an error code belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Lex,
    Parse,
    Type,
    Runtime,
    Codegen,
}

impl ErrorCode {
    /// Get the string representation (e.g. "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
            ErrorCode::E3010 => "E3010",
            ErrorCode::E3011 => "E3011",
            ErrorCode::E3012 => "E3012",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
        }
    }

    pub fn phase(&self) -> Phase {
        match self.as_str().as_bytes()[1] {
            b'0' => Phase::Lex,
            b'1' => Phase::Parse,
            b'2' => Phase::Type,
            b'3' => Phase::Runtime,
            _ => Phase::Codegen,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
