//! Segment stream parsing: addressing modes, comments, skipping, restarts

use gcodeview_toolpath::{count_segments, segment_at, Segment, SegmentStream};
use glam::Vec4;
use proptest::prelude::*;

fn segments(text: &str) -> Vec<Segment> {
    SegmentStream::new(text.as_bytes()).collect()
}

#[test]
fn test_absolute_moves_with_extrusion() {
    let segs = segments("G90\nG1 X10 Y0 Z0\nG1 X10 Y10 Z0 E5\n");
    assert_eq!(
        segs,
        vec![
            Segment::new(Vec4::ZERO, Vec4::new(10.0, 0.0, 0.0, 0.0)),
            Segment::new(
                Vec4::new(10.0, 0.0, 0.0, 0.0),
                Vec4::new(10.0, 10.0, 0.0, 5.0)
            ),
        ]
    );
}

#[test]
fn test_relative_moves_accumulate() {
    let segs = segments("G91\nG1 X5\nG1 X5\n");
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].end.x, 5.0);
    assert_eq!(segs[1].end.x, 10.0);
}

#[test]
fn test_relative_then_absolute() {
    let segs = segments("G1 X3 Y4\nG91\nG1 X2\nG90\nG1 X7\n");
    assert_eq!(segs[1].end.x, segs[1].start.x + 2.0);
    assert_eq!(segs[1].end.y, 4.0);
    assert_eq!(segs[2].end.x, 7.0);
}

#[test]
fn test_extruder_only_relative() {
    let segs = segments("M83\nG1 X1 E0.5\nG1 X2 E0.5\nM82\nG1 X3 E4\n");
    assert_eq!(segs[0].end, Vec4::new(1.0, 0.0, 0.0, 0.5));
    assert_eq!(segs[1].end, Vec4::new(2.0, 0.0, 0.0, 1.0));
    assert_eq!(segs[2].end, Vec4::new(3.0, 0.0, 0.0, 4.0));
}

#[test]
fn test_g0_counts_as_motion() {
    let segs = segments("G0 Z5\nG00 X1\nG01 Y2\n");
    assert_eq!(segs.len(), 3);
    assert_eq!(segs[2].end, Vec4::new(1.0, 2.0, 5.0, 0.0));
}

#[test]
fn test_lowercase_exponent_numbers() {
    let segs = segments("G1 X1e2 Y2.5e1\nG1 X1E2\n");
    assert_eq!(segs[0].end, Vec4::new(100.0, 25.0, 0.0, 0.0));
    // Uppercase E is the auxiliary channel, not an exponent
    assert_eq!(segs[1].end, Vec4::new(1.0, 25.0, 0.0, 2.0));
}

#[test]
fn test_comments_are_not_scanned() {
    let segs = segments("; G1 X100\nG1 X1 ; Y50\nG1 Y2;X9\n");
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].end, Vec4::new(1.0, 0.0, 0.0, 0.0));
    assert_eq!(segs[1].end, Vec4::new(1.0, 2.0, 0.0, 0.0));
}

#[test]
fn test_unrecognized_lines_and_words_skipped() {
    let text = "\
M104 S200
G28
G2 X5 Y5 I1 J1
T0
G1 F1500 X1 Q Yabc Z2 E
  G1 X99
G1 X2Y3
";
    let segs = segments(text);
    assert_eq!(segs.len(), 2);
    // F word and bare letters skipped, Y left unchanged
    assert_eq!(segs[0].end, Vec4::new(1.0, 0.0, 2.0, 0.0));
    // Words without separating blanks still parse
    assert_eq!(segs[1].end, Vec4::new(2.0, 3.0, 2.0, 0.0));
}

#[test]
fn test_crlf_and_missing_trailing_newline() {
    let segs = segments("G1 X1\r\nG1 X2\r\nG1 X3");
    assert_eq!(segs.len(), 3);
    assert_eq!(segs[2].end.x, 3.0);
}

#[test]
fn test_motion_without_words_repeats_endpoint() {
    let segs = segments("G1 X4\nG1\n");
    assert_eq!(segs[1].start, segs[1].end);
}

#[test]
fn test_empty_buffer() {
    let mut stream = SegmentStream::new(b"");
    assert!(stream.is_exhausted());
    assert!(stream.next().is_none());
    assert_eq!(count_segments(b"; only a comment\n\n"), 0);
}

#[test]
fn test_reset_clears_modes_and_position() {
    let mut stream = SegmentStream::new(b"G91\nG1 X5\n");
    let first: Vec<_> = stream.by_ref().collect();
    assert!(stream.next().is_none());

    stream.reset();
    let second: Vec<_> = stream.collect();
    assert_eq!(first, second);
    assert_eq!(second[0].end.x, 5.0);
}

#[test]
fn test_independent_sessions_over_one_buffer() {
    let text = b"G91\nG1 X1\nG1 X1\nG1 X1\n";
    let mut a = SegmentStream::new(text);
    let mut b = SegmentStream::new(text);

    a.next();
    a.next();
    assert_eq!(b.next().map(|s| s.end.x), Some(1.0));
    assert_eq!(a.next().map(|s| s.end.x), Some(3.0));
    assert_eq!(b.next().map(|s| s.end.x), Some(2.0));
}

#[test]
fn test_segment_at() {
    let text = b"G1 X1\nG1 X2\nG1 X3\n";
    assert_eq!(segment_at(text, 1).map(|s| s.end.x), Some(2.0));
    assert!(segment_at(text, 3).is_none());
}

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (-100i32..100, -100i32..100).prop_map(|(x, e)| format!("G1 X{} E{}", x, e)),
        (-50i32..50).prop_map(|z| format!("G0 Z{}.5", z)),
        Just("G90".to_string()),
        Just("G91".to_string()),
        Just("M82".to_string()),
        Just("M83".to_string()),
        Just("; comment G1 X1".to_string()),
        Just("G4 P100".to_string()),
        Just("M106 S255".to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_replay_after_reset_is_identical(lines in prop::collection::vec(line_strategy(), 0..60)) {
        let text = lines.join("\n");
        let mut stream = SegmentStream::new(text.as_bytes());
        let first: Vec<_> = stream.by_ref().collect();
        stream.reset();
        let second: Vec<_> = stream.collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_count_matches_motion_lines(lines in prop::collection::vec(line_strategy(), 0..60)) {
        let text = lines.join("\n");
        let expected = lines
            .iter()
            .filter(|l| l.starts_with("G1 ") || l.starts_with("G0 "))
            .count();
        prop_assert_eq!(count_segments(text.as_bytes()), expected);
    }
}
