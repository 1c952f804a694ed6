//! Head/tail selection shared by every listing command.
//!
//! Users ask for "the first N" (`--head`) or "the last N" (`--tail`) items.
//! [`Pagination::resolve`] turns the two optional flags into exactly one
//! directive, which is forwarded to the node as the `first` / `last` query
//! parameters. The node does the actual slicing.

use eef_node_api::PageQuery;
use thiserror::Error;

/// Number of items returned when neither head nor tail is requested.
pub const DEFAULT_TAIL: u32 = 50;

/// A resolved pagination directive. Exactly one direction is ever selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// The earliest `n` items in node order.
    First(u32),
    /// The most recent `n` items in node order.
    Last(u32),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("head and tail options can't be both used at once.")]
    ConflictingArguments { head: u32, tail: u32 },
}

impl Pagination {
    /// Resolve `--head` / `--tail` into a single directive.
    ///
    /// A count of zero is treated the same as an absent flag. With neither
    /// flag present the directive defaults to `Last(DEFAULT_TAIL)`.
    pub fn resolve(head: Option<u32>, tail: Option<u32>) -> Result<Self, PaginationError> {
        let head = head.filter(|&n| n > 0);
        let tail = tail.filter(|&n| n > 0);
        match (head, tail) {
            (Some(head), Some(tail)) => Err(PaginationError::ConflictingArguments { head, tail }),
            (Some(n), None) => Ok(Pagination::First(n)),
            (None, Some(n)) => Ok(Pagination::Last(n)),
            (None, None) => Ok(Pagination::default()),
        }
    }

    pub fn first(self) -> Option<u32> {
        match self {
            Pagination::First(n) => Some(n),
            Pagination::Last(_) => None,
        }
    }

    pub fn last(self) -> Option<u32> {
        match self {
            Pagination::First(_) => None,
            Pagination::Last(n) => Some(n),
        }
    }

    /// The `(first, last)` pair sent to the node. At most one side is `Some`.
    pub fn as_pair(self) -> (Option<u32>, Option<u32>) {
        (self.first(), self.last())
    }

    /// `"first"` or `"last"`, for headings such as "Showing last 50 pools".
    pub fn label(self) -> &'static str {
        match self {
            Pagination::First(_) => "first",
            Pagination::Last(_) => "last",
        }
    }

    pub fn page_query(self) -> PageQuery {
        let (first, last) = self.as_pair();
        PageQuery { first, last }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::Last(DEFAULT_TAIL)
    }
}
