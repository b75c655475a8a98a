use std::fmt;

use itertools::Itertools;

use crate::chart::record::{Record, RecordList};

/// Writes a record list as an AFF chart, one record per line in list order.
///
/// Every value is written so that [`parse`](super::parse) reads it back unchanged.
#[must_use]
pub fn write(records: &RecordList) -> String {
    AffChart(records).to_string()
}

struct AffChart<'a>(&'a RecordList);

impl fmt::Display for AffChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AudioOffset:{}", self.0.audio_offset)?;
        writeln!(f, "-")?;
        for record in &self.0.records {
            writeln!(f, "{}", AffLine(record))?;
        }
        Ok(())
    }
}

struct AffLine<'a>(&'a Record);

impl fmt::Display for AffLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Record::Timing {
                timing,
                bpm,
                beats_per_line,
            } => write!(
                f,
                "timing({timing},{},{});",
                AffFloat(*bpm),
                AffFloat(*beats_per_line)
            ),
            Record::Tap { timing, track } => write!(f, "({timing},{track});"),
            Record::Hold {
                timing,
                end_timing,
                track,
            } => write!(f, "hold({timing},{end_timing},{track});"),
            Record::Arc {
                timing,
                end_timing,
                x_start,
                x_end,
                y_start,
                y_end,
                line_type,
                color,
                is_void,
                arc_taps,
            } => {
                write!(
                    f,
                    "arc({timing},{end_timing},{},{},{line_type},{},{},{color},none,{is_void})",
                    AffFloat(*x_start),
                    AffFloat(*x_end),
                    AffFloat(*y_start),
                    AffFloat(*y_end),
                )?;
                if !arc_taps.is_empty() {
                    let arc_taps = arc_taps
                        .iter()
                        .format_with(",", |arc_tap, f| {
                            f(&format_args!("arctap({})", arc_tap.timing))
                        });
                    write!(f, "[{arc_taps}]")?;
                }
                f.write_str(";")
            }
            Record::Camera {
                timing,
                move_x,
                move_y,
                move_z,
                rotate_x,
                rotate_y,
                rotate_z,
                ease_type,
                duration,
            } => write!(
                f,
                "camera({timing},{},{},{},{},{},{},{ease_type},{duration});",
                AffFloat(*move_x),
                AffFloat(*move_y),
                AffFloat(*move_z),
                AffFloat(*rotate_x),
                AffFloat(*rotate_y),
                AffFloat(*rotate_z),
            ),
            Record::SceneControl {
                timing,
                kind,
                params,
            } => {
                write!(f, "scenecontrol({timing},{kind}")?;
                for param in params {
                    write!(f, ",{param}")?;
                }
                f.write_str(");")
            }
        }
    }
}

/// Two decimals when that reads back exactly, the shortest exact form otherwise.
struct AffFloat(f64);

impl fmt::Display for AffFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.2}", self.0);
        if fixed
            .parse::<f64>()
            .is_ok_and(|value| value.to_bits() == self.0.to_bits())
        {
            f.write_str(&fixed)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
