//! Chart model and timing/position engine for scrolling arc rhythm-game charts.
//!
//! A chart is a list of events (timing points, floor taps, holds, arcs with their arctaps,
//! camera moves and scene controls) placed on a millisecond timeline. This crate converts
//! that musical timeline into the scrolling *position* space used to place notes on screen
//! and to judge them, and derives secondary timing artifacts from it.
//!
//! - [`chart`] holds the typed event collections ([`chart::ChartDocument`]), the raw record
//!   layout they are imported from and exported to, and the arc geometry.
//! - [`timing`] is the transform engine: the sorted [`timing::TimingTimeline`], position/time
//!   conversions ([`timing::position::PositionTransform`]), judge timings of long notes
//!   ([`timing::judge::JudgeTimingCalculator`]) and the beat grid
//!   ([`timing::beatline::BeatGridGenerator`]).
//! - [`session::ChartSession`] ties a document to a [`config::TimingConfig`] and a playhead,
//!   and is the object handed to renderers and editors for one active chart.
//! - [`aff`] reads and writes the AFF text format; `json` (feature `json`) does the same for
//!   JSON.
//!
//! # Time domains
//!
//! Event timings are in the *chart* domain. The playback clock runs in the *playback* domain,
//! which is the chart domain shifted by the document's audio offset. Every query that takes a
//! playhead time subtracts the audio offset before looking at the timeline.
//!
//! # Example
//!
//! ```
//! use arc_chart::prelude::*;
//!
//! let source = "AudioOffset:0\n-\ntiming(0,100.00,4.00);\n(1000,2);\n";
//! let records = arc_chart::aff::parse(source).unwrap();
//! let ImportOutput { document, warnings } = ChartDocument::import(&records).unwrap();
//! assert!(warnings.is_empty());
//!
//! let mut session = ChartSession::new(document, TimingConfig::default());
//! session.tick(0);
//! assert_eq!(session.position_from_current(1000), 30000.0);
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod aff;
pub mod chart;
pub mod config;
#[cfg(feature = "json")]
#[cfg_attr(docsrs, doc(cfg(feature = "json")))]
pub mod json;
pub mod prelude;
pub mod session;
pub mod timing;
