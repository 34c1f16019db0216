//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_COMPOSABLE!` - Scans an operator that may be followed by `=`
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$literal` - The token's source text
/// * `$position` - The position of the token's first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $literal:expr, $position:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            literal: $literal,
            position: $position,
        }
    };
}

/// Scans an operator with a composable `=` form.
///
/// Peeks one character past the operator without consuming it. When that
/// character is `=` both are consumed and `$composed` is emitted, otherwise
/// only the operator is consumed and `$single` is emitted.
///
/// # Example
///
/// ```ignore
/// '<' => MK_COMPOSABLE!(self, TokenKind::Less, TokenKind::LessEquals),
/// ```
#[macro_export]
macro_rules! MK_COMPOSABLE {
    ($lexer:expr, $single:expr, $composed:expr) => {{
        let start = $lexer.position();
        let first = $lexer.bump();
        if $lexer.at() == Some('=') {
            $lexer.bump();
            $crate::MK_TOKEN!($composed, format!("{}=", first), start)
        } else {
            $crate::MK_TOKEN!($single, first.to_string(), start)
        }
    }};
}
