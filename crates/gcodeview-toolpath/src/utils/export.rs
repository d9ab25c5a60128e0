//! CSV export of the segment stream and the selection
//!
//! Both tables share the header `x,y,z,e,x2,y2,z2,e2,isel`. `isel` is the
//! segment's slot in the selection ring, or `-1` when it is not selected.

use crate::gcode::{Segment, SegmentStream};
use crate::selection::SelectionRing;
use gcodeview_core::{ExportError, ExportSettings, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::debug;

const HEADER: &str = "x,y,z,e,x2,y2,z2,e2,isel";

/// `isel` value for rows that are not selected
pub const NOT_SELECTED: i64 = -1;

fn write_row<W: Write>(out: &mut W, segment: &Segment, isel: i64) -> std::io::Result<()> {
    let (a, b) = (segment.start, segment.end);
    writeln!(
        out,
        "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{}",
        a.x, a.y, a.z, a.w, b.x, b.y, b.z, b.w, isel
    )
}

fn wrap(table: &'static str) -> impl Fn(std::io::Error) -> ExportError {
    move |source| ExportError::Write { table, source }
}

/// Write every segment of `buffer`; returns the number of rows written.
pub fn export_stream_csv<W: Write>(
    out: &mut W,
    buffer: &[u8],
    selection: &SelectionRing,
) -> Result<usize> {
    let err = wrap("stream");
    writeln!(out, "{}", HEADER).map_err(&err)?;

    let mut rows = 0;
    for (index, segment) in SegmentStream::new(buffer).enumerate() {
        let isel = selection
            .index_of(index)
            .map_or(NOT_SELECTED, |slot| slot as i64);
        write_row(out, &segment, isel).map_err(&err)?;
        rows += 1;
    }
    out.flush().map_err(&err)?;
    Ok(rows)
}

/// Write only the selected segments, oldest selection first.
///
/// `isel` is still the slot position. Duplicate entries produce one row each.
pub fn export_selection_csv<W: Write>(
    out: &mut W,
    buffer: &[u8],
    selection: &SelectionRing,
) -> Result<usize> {
    let err = wrap("selection");
    writeln!(out, "{}", HEADER).map_err(&err)?;

    let wanted: BTreeSet<usize> = selection.iter().map(|(_, index)| index).collect();
    let mut segments: BTreeMap<usize, Segment> = BTreeMap::new();
    if let Some(&last) = wanted.last() {
        for (index, segment) in SegmentStream::new(buffer).enumerate().take(last + 1) {
            if wanted.contains(&index) {
                segments.insert(index, segment);
            }
        }
    }

    let mut rows = 0;
    for (slot, index) in selection.iter_oldest_first() {
        // Indices past the end of the stream have no row
        if let Some(segment) = segments.get(&index) {
            write_row(out, segment, slot as i64).map_err(&err)?;
            rows += 1;
        }
    }
    out.flush().map_err(&err)?;
    Ok(rows)
}

/// Write both tables to the configured paths.
pub fn write_exports(
    settings: &ExportSettings,
    buffer: &[u8],
    selection: &SelectionRing,
) -> Result<(usize, usize)> {
    let mut stream_out = BufWriter::new(File::create(&settings.stream_csv)?);
    let all = export_stream_csv(&mut stream_out, buffer, selection)?;

    let mut selection_out = BufWriter::new(File::create(&settings.selection_csv)?);
    let selected = export_selection_csv(&mut selection_out, buffer, selection)?;

    debug!(
        "Exported {} segments to {} and {} to {}",
        all,
        settings.stream_csv.display(),
        selected,
        settings.selection_csv.display()
    );
    Ok((all, selected))
}
