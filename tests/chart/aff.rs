use arc_chart::aff::{self, AffError};
use arc_chart::prelude::*;
use pretty_assertions::assert_eq;

use super::{SAMPLE_AFF, sample_document};

#[test]
fn write_reads_back_unchanged() {
    let records = aff::parse(SAMPLE_AFF).unwrap();
    let written = aff::write(&records);
    assert_eq!(aff::parse(&written), Ok(records));
}

#[test]
fn sample_lines_survive_a_round_trip() {
    // The sample is written with two decimals everywhere, so the only difference is the
    // dropped header key.
    let records = aff::parse(SAMPLE_AFF).unwrap();
    let expected = SAMPLE_AFF.replace("TimingPointDensityFactor:1\n", "");
    assert_eq!(aff::write(&records), expected);
}

#[test]
fn exported_document_reimports() {
    let document = sample_document();
    let written = aff::write(&document.serialize(SortMode::ByType));
    let ImportOutput {
        document: reimported,
        warnings,
    } = ChartDocument::import(&aff::parse(&written).unwrap()).unwrap();
    assert_eq!(warnings, vec![]);
    assert_eq!(
        reimported.serialize(SortMode::ByTime),
        document.serialize(SortMode::ByTime)
    );
}

#[test]
fn unrepresentable_floats_are_written_exactly() {
    let records = RecordList {
        audio_offset: 0,
        records: vec![Record::Timing {
            timing: 0,
            bpm: 174.125,
            beats_per_line: 1.0 / 3.0,
        }],
    };
    assert_eq!(aff::parse(&aff::write(&records)), Ok(records));
}

#[test]
fn error_messages_name_the_line() {
    let error = aff::parse("AudioOffset:0\n-\ntiming(0,120.00,4.00);\nhold(0,1);\n").unwrap_err();
    assert_eq!(
        error,
        AffError::InvalidArguments {
            line: 4,
            expected: 3,
            found: 2,
        }
    );
    assert_eq!(
        error.to_string(),
        "expected 3 arguments but found 2 at line 4"
    );
}
