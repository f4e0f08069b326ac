//! Diagnostic codes for categorizing compiler errors and warnings.
//!
//! This module provides the [`DiagnosticCode`] type for uniquely identifying
//! diagnostic messages. Codes are grouped by compiler phase: `E1xxx` lexer,
//! `E2xxx` parser, `E3xxx` semantic checking, `W1xxx` style warnings.
//!
//! # Examples
//!
//! ```
//! use jotc_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.number(), 3001);
//! assert_eq!(code.as_str(), "E3001");
//! ```

/// A unique code identifying a diagnostic message
///
/// Diagnostic codes follow the format `{prefix}{number}` where:
/// - `prefix` is "E" for errors or "W" for warnings
/// - `number` is a 4-digit number (padded with zeros)
///
/// # Examples
///
/// ```
/// use jotc_util::diagnostic::DiagnosticCode;
///
/// let code = DiagnosticCode::new("E", 1001);
/// assert_eq!(code.as_str(), "E1001");
///
/// let warning = DiagnosticCode::W_REDUNDANT_CAST;
/// assert_eq!(warning.prefix(), "W");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix (e.g., "E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    /// Create a new diagnostic code
    ///
    /// # Arguments
    ///
    /// * `prefix` - The code prefix (typically "E" or "W")
    /// * `number` - The numeric identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use jotc_util::diagnostic::DiagnosticCode;
    ///
    /// let code = DiagnosticCode::new("E", 1001);
    /// assert_eq!(code.prefix(), "E");
    /// assert_eq!(code.number(), 1001);
    /// ```
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    /// Get the prefix (e.g., "E" for error, "W" for warning)
    ///
    /// # Examples
    ///
    /// ```
    /// use jotc_util::diagnostic::DiagnosticCode;
    ///
    /// assert_eq!(DiagnosticCode::E0001.prefix(), "E");
    /// assert_eq!(DiagnosticCode::W0001.prefix(), "W");
    /// ```
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Get the numeric identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use jotc_util::diagnostic::DiagnosticCode;
    ///
    /// assert_eq!(DiagnosticCode::E0001.number(), 1);
    /// assert_eq!(DiagnosticCode::W0001.number(), 1);
    /// ```
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g., "E0001", "W0001")
    ///
    /// # Examples
    ///
    /// ```
    /// use jotc_util::diagnostic::DiagnosticCode;
    ///
    /// assert_eq!(DiagnosticCode::E0001.as_str(), "E0001");
    /// assert_eq!(DiagnosticCode::W0001.as_str(), "W0001");
    /// ```
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // LEXER CODES (E1xxx)
    // =========================================================================

    /// E1001: unexpected byte that starts no valid token
    pub const E_LEXER_UNEXPECTED_CHAR: Self = Self::new("E", 1001);
    /// E1002: unterminated string or character literal
    pub const E_LEXER_UNTERMINATED_STRING: Self = Self::new("E", 1002);
    /// E1003: malformed numeric literal
    pub const E_LEXER_INVALID_NUMBER: Self = Self::new("E", 1003);

    // =========================================================================
    // PARSER CODES (E2xxx)
    // =========================================================================

    /// E2001: token did not match any production at this point
    pub const E_PARSER_UNEXPECTED_TOKEN: Self = Self::new("E", 2001);
    /// E2002: a specific token was required and a different one was found
    pub const E_PARSER_EXPECTED_TOKEN: Self = Self::new("E", 2002);
    /// E2003: input ended mid-construct
    pub const E_PARSER_UNEXPECTED_EOF: Self = Self::new("E", 2003);
    /// E2004: two struct or enum declarations share a name
    pub const E_PARSER_DUPLICATE_DEF: Self = Self::new("E", 2004);
    /// E2005: `load`/`import` path does not resolve to a readable file
    pub const E_PARSER_MISSING_PATH: Self = Self::new("E", 2005);

    // =========================================================================
    // SEMANTIC CODES (E3xxx)
    // =========================================================================

    /// E3001: expression type does not match the type required by context
    pub const E_SEMANTIC_TYPE_MISMATCH: Self = Self::new("E", 3001);
    /// E3002: identifier not bound in any enclosing scope
    pub const E_SEMANTIC_UNDEFINED_VAR: Self = Self::new("E", 3002);
    /// E3003: called name does not resolve to a function
    pub const E_SEMANTIC_UNDEFINED_FN: Self = Self::new("E", 3003);
    /// E3004: two bindings in the same scope share a name
    pub const E_SEMANTIC_DUPLICATE_DEF: Self = Self::new("E", 3004);
    /// E3005: `null` assigned or compared against a non-pointer type
    pub const E_SEMANTIC_NULL_NOT_POINTER: Self = Self::new("E", 3005);
    /// E3006: `break`/`continue` outside any enclosing loop, or depth exceeds nesting
    pub const E_SEMANTIC_INVALID_LOOP_CONTROL: Self = Self::new("E", 3006);
    /// E3007: `switch` expression has no `else` arm
    pub const E_SEMANTIC_SWITCH_NO_DEFAULT: Self = Self::new("E", 3007);
    /// E3008: two `switch` cases share a value
    pub const E_SEMANTIC_DUPLICATE_CASE: Self = Self::new("E", 3008);
    /// E3009: assignment or indexing target is not an l-value
    pub const E_SEMANTIC_NOT_ASSIGNABLE: Self = Self::new("E", 3009);
    /// E3010: a `cast` between two types that fail the castability relation
    pub const E_SEMANTIC_INVALID_CAST: Self = Self::new("E", 3010);
    /// E3011: an `int1`-underlying enum declares more than two elements
    pub const E_SEMANTIC_ENUM_INT1_OVERFLOW: Self = Self::new("E", 3011);

    // =========================================================================
    // STYLE WARNING CODES (W1xxx)
    // =========================================================================

    /// W1001: `break N;`/`continue N;` with `N == 1`, where bare `break;`/`continue;` suffices
    pub const W_REDUNDANT_LOOP_DEPTH: Self = Self::new("W", 1001);
    /// W1002: `cast` between two structurally-equal types
    pub const W_REDUNDANT_CAST: Self = Self::new("W", 1002);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Standalone constant exports for convenience
pub const E_LEXER_UNEXPECTED_CHAR: DiagnosticCode = DiagnosticCode::E_LEXER_UNEXPECTED_CHAR;
pub const E_LEXER_UNTERMINATED_STRING: DiagnosticCode = DiagnosticCode::E_LEXER_UNTERMINATED_STRING;
pub const E_LEXER_INVALID_NUMBER: DiagnosticCode = DiagnosticCode::E_LEXER_INVALID_NUMBER;
pub const E_PARSER_UNEXPECTED_TOKEN: DiagnosticCode = DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN;
pub const E_PARSER_EXPECTED_TOKEN: DiagnosticCode = DiagnosticCode::E_PARSER_EXPECTED_TOKEN;
pub const E_PARSER_UNEXPECTED_EOF: DiagnosticCode = DiagnosticCode::E_PARSER_UNEXPECTED_EOF;
pub const E_PARSER_DUPLICATE_DEF: DiagnosticCode = DiagnosticCode::E_PARSER_DUPLICATE_DEF;
pub const E_PARSER_MISSING_PATH: DiagnosticCode = DiagnosticCode::E_PARSER_MISSING_PATH;
pub const E_SEMANTIC_TYPE_MISMATCH: DiagnosticCode = DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH;
pub const E_SEMANTIC_UNDEFINED_VAR: DiagnosticCode = DiagnosticCode::E_SEMANTIC_UNDEFINED_VAR;
pub const E_SEMANTIC_UNDEFINED_FN: DiagnosticCode = DiagnosticCode::E_SEMANTIC_UNDEFINED_FN;
pub const E_SEMANTIC_DUPLICATE_DEF: DiagnosticCode = DiagnosticCode::E_SEMANTIC_DUPLICATE_DEF;
pub const E_SEMANTIC_NULL_NOT_POINTER: DiagnosticCode = DiagnosticCode::E_SEMANTIC_NULL_NOT_POINTER;
pub const E_SEMANTIC_INVALID_LOOP_CONTROL: DiagnosticCode = DiagnosticCode::E_SEMANTIC_INVALID_LOOP_CONTROL;
pub const E_SEMANTIC_SWITCH_NO_DEFAULT: DiagnosticCode = DiagnosticCode::E_SEMANTIC_SWITCH_NO_DEFAULT;
pub const E_SEMANTIC_DUPLICATE_CASE: DiagnosticCode = DiagnosticCode::E_SEMANTIC_DUPLICATE_CASE;
pub const E_SEMANTIC_NOT_ASSIGNABLE: DiagnosticCode = DiagnosticCode::E_SEMANTIC_NOT_ASSIGNABLE;
pub const E_SEMANTIC_INVALID_CAST: DiagnosticCode = DiagnosticCode::E_SEMANTIC_INVALID_CAST;
pub const E_SEMANTIC_ENUM_INT1_OVERFLOW: DiagnosticCode = DiagnosticCode::E_SEMANTIC_ENUM_INT1_OVERFLOW;
pub const W_REDUNDANT_LOOP_DEPTH: DiagnosticCode = DiagnosticCode::W_REDUNDANT_LOOP_DEPTH;
pub const W_REDUNDANT_CAST: DiagnosticCode = DiagnosticCode::W_REDUNDANT_CAST;
