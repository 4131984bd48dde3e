//! Promo command types

/// A parsed client command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// GENERATE <count> [7|8]
    ///
    /// `count` holds whatever integer the client sent; range checking is
    /// the manager's job. `length` is `None` when the client lets the
    /// server pick per code.
    Generate { count: i64, length: Option<u8> },

    /// USE <code>
    Use { code: String },

    /// EXIT
    Exit,
}
