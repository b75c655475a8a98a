//! The AFF text format of a [`RecordList`](crate::chart::record::RecordList).
//!
//! An AFF chart is a header of `Key:Value` lines, a single `-` line, and one event per line:
//!
//! ```text
//! AudioOffset:248
//! -
//! timing(0,126.00,4.00);
//! (1000,2);
//! hold(1500,2000,3);
//! arc(2000,2500,0.00,1.00,s,1.00,1.00,0,none,true)[arctap(2250)];
//! camera(3000,0.00,100.00,0.00,0.00,0.00,0.00,qo,500);
//! scenecontrol(4000,trackhide);
//! ```
//!
//! Only the `AudioOffset` header key is interpreted. Line numbers in errors start from 1.

mod parse;
mod write;

use thiserror::Error;

pub use self::{parse::parse, write::write};

/// An error on reading an AFF chart.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum AffError {
    /// The input ended before the `-` line closing the header.
    #[error("header is not closed by a `-` line")]
    MissingHeaderSeparator,
    /// A header line is not of the form `Key:Value`.
    #[error("invalid header `{content}` at line {line}")]
    InvalidHeader {
        /// Line number.
        line: usize,
        /// The line.
        content: String,
    },
    /// An event line is not of the form `name(args)` with an optional arctap list.
    #[error("invalid event syntax `{content}` at line {line}")]
    InvalidSyntax {
        /// Line number.
        line: usize,
        /// The line.
        content: String,
    },
    /// The event name is not known.
    #[error("unknown event `{name}` at line {line}")]
    UnknownEvent {
        /// Line number.
        line: usize,
        /// The event name.
        name: String,
    },
    /// The event has the wrong number of arguments.
    #[error("expected {expected} arguments but found {found} at line {line}")]
    InvalidArguments {
        /// Line number.
        line: usize,
        /// Number of arguments the event takes, or the least number for variadic events.
        expected: usize,
        /// Number of arguments found.
        found: usize,
    },
    /// An argument is not a valid number or boolean.
    #[error("invalid value `{value}` at line {line}")]
    InvalidValue {
        /// Line number.
        line: usize,
        /// The argument.
        value: String,
    },
    /// An event line does not end with `;`.
    #[error("missing `;` at line {line}")]
    MissingTerminator {
        /// Line number.
        line: usize,
    },
}
