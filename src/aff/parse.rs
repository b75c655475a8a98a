use std::str::FromStr;

use super::AffError;
use crate::chart::record::{ArcTapRecord, Record, RecordList};

/// Reads an AFF chart into a record list.
///
/// Blank lines are skipped everywhere. Header keys other than `AudioOffset` are ignored; a
/// missing `AudioOffset` means `0`.
///
/// # Errors
///
/// Returns the first [`AffError`] found, scanning from the top.
pub fn parse(source: &str) -> Result<RecordList, AffError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(index, content)| (index + 1, content.trim()))
        .filter(|(_, content)| !content.is_empty());

    let mut audio_offset = 0;
    let mut header_closed = false;
    for (line, content) in lines.by_ref() {
        if content == "-" {
            header_closed = true;
            break;
        }
        let Some((key, value)) = content.split_once(':') else {
            return Err(AffError::InvalidHeader {
                line,
                content: content.to_string(),
            });
        };
        match key.trim() {
            "AudioOffset" => audio_offset = parse_value(line, value.trim())?,
            other => log::debug!("ignored header `{other}` at line {line}"),
        }
    }
    if !header_closed {
        return Err(AffError::MissingHeaderSeparator);
    }

    let records = lines
        .map(|(line, content)| parse_event(line, content))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RecordList {
        audio_offset,
        records,
    })
}

fn parse_event(line: usize, content: &str) -> Result<Record, AffError> {
    let Some(body) = content.strip_suffix(';') else {
        return Err(AffError::MissingTerminator { line });
    };
    let invalid_syntax = || AffError::InvalidSyntax {
        line,
        content: content.to_string(),
    };
    let (name, rest) = body.split_once('(').ok_or_else(invalid_syntax)?;
    let (args, tail) = rest.split_once(')').ok_or_else(invalid_syntax)?;
    let name = name.trim();
    let tail = tail.trim();
    if name != "arc" && !tail.is_empty() {
        return Err(invalid_syntax());
    }
    let args: Vec<&str> = args.split(',').map(str::trim).collect();

    let record = match name {
        "" => {
            let [timing, track] = expect_args(line, &args)?;
            Record::Tap {
                timing: parse_value(line, timing)?,
                track: parse_value(line, track)?,
            }
        }
        "timing" => {
            let [timing, bpm, beats_per_line] = expect_args(line, &args)?;
            Record::Timing {
                timing: parse_value(line, timing)?,
                bpm: parse_value(line, bpm)?,
                beats_per_line: parse_value(line, beats_per_line)?,
            }
        }
        "hold" => {
            let [timing, end_timing, track] = expect_args(line, &args)?;
            Record::Hold {
                timing: parse_value(line, timing)?,
                end_timing: parse_value(line, end_timing)?,
                track: parse_value(line, track)?,
            }
        }
        "arc" => {
            let [
                timing,
                end_timing,
                x_start,
                x_end,
                line_type,
                y_start,
                y_end,
                color,
                _hit_sound,
                is_void,
            ] = expect_args(line, &args)?;
            let arc_taps = if tail.is_empty() {
                Vec::new()
            } else {
                parse_arc_taps(line, tail).ok_or_else(invalid_syntax)??
            };
            Record::Arc {
                timing: parse_value(line, timing)?,
                end_timing: parse_value(line, end_timing)?,
                x_start: parse_value(line, x_start)?,
                x_end: parse_value(line, x_end)?,
                y_start: parse_value(line, y_start)?,
                y_end: parse_value(line, y_end)?,
                line_type: line_type.to_string(),
                color: parse_value(line, color)?,
                is_void: parse_value(line, is_void)?,
                arc_taps,
            }
        }
        "camera" => {
            let [
                timing,
                move_x,
                move_y,
                move_z,
                rotate_x,
                rotate_y,
                rotate_z,
                ease_type,
                duration,
            ] = expect_args(line, &args)?;
            Record::Camera {
                timing: parse_value(line, timing)?,
                move_x: parse_value(line, move_x)?,
                move_y: parse_value(line, move_y)?,
                move_z: parse_value(line, move_z)?,
                rotate_x: parse_value(line, rotate_x)?,
                rotate_y: parse_value(line, rotate_y)?,
                rotate_z: parse_value(line, rotate_z)?,
                ease_type: ease_type.to_string(),
                duration: parse_value(line, duration)?,
            }
        }
        "scenecontrol" => {
            let [timing, kind, params @ ..] = args.as_slice() else {
                return Err(AffError::InvalidArguments {
                    line,
                    expected: 2,
                    found: args.len(),
                });
            };
            Record::SceneControl {
                timing: parse_value(line, timing)?,
                kind: (*kind).to_string(),
                params: params.iter().map(ToString::to_string).collect(),
            }
        }
        _ => {
            return Err(AffError::UnknownEvent {
                line,
                name: name.to_string(),
            });
        }
    };
    Ok(record)
}

/// Parses `[arctap(t),...]`. `None` on a syntax error.
fn parse_arc_taps(line: usize, tail: &str) -> Option<Result<Vec<ArcTapRecord>, AffError>> {
    let inner = tail.strip_prefix('[')?.strip_suffix(']')?;
    let mut arc_taps = Vec::new();
    for item in inner.split(',') {
        let timing = item.trim().strip_prefix("arctap(")?.strip_suffix(')')?;
        match parse_value(line, timing.trim()) {
            Ok(timing) => arc_taps.push(ArcTapRecord { timing }),
            Err(e) => return Some(Err(e)),
        }
    }
    Some(Ok(arc_taps))
}

fn expect_args<'a, const N: usize>(
    line: usize,
    args: &[&'a str],
) -> Result<[&'a str; N], AffError> {
    args.try_into().map_err(|_| AffError::InvalidArguments {
        line,
        expected: N,
        found: args.len(),
    })
}

fn parse_value<T: FromStr>(line: usize, value: &str) -> Result<T, AffError> {
    value.parse().map_err(|_| AffError::InvalidValue {
        line,
        value: value.to_string(),
    })
}
