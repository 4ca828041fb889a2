//! GPX 1.1 serialization

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use gpx::{Gpx, Metadata, Track, Waypoint};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::ConvertError;

pub const GPX_VERSION: &str = "1.1";
pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

/// Render a time as `2024-11-01T14:28:39.000Z`
///
/// Milliseconds are always present, finer digits are truncated. The value
/// is printed as is, the offset is not applied.
pub fn format_time(time: OffsetDateTime) -> io::Result<String> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );

    time.format(format).map_err(io::Error::other)
}

/// Serialize the document into `out`
pub fn write<W: Write>(gpx: &Gpx, out: W) -> io::Result<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("gpx");
    root.push_attribute(("version", GPX_VERSION));
    if let Some(creator) = &gpx.creator {
        root.push_attribute(("creator", creator.as_str()));
    }
    root.push_attribute(("xmlns", GPX_NAMESPACE));
    writer.write_event(Event::Start(root))?;

    if let Some(metadata) = &gpx.metadata {
        write_metadata(&mut writer, metadata)?;
    }

    for track in &gpx.tracks {
        write_track(&mut writer, track)?;
    }

    writer.write_event(Event::End(BytesEnd::new("gpx")))?;

    let mut out = writer.into_inner();
    out.flush()
}

/// Serialize the document and store it at `path`
///
/// Nothing is created when the serialization fails. A file that could
/// not be completely written is removed again.
pub fn save(gpx: &Gpx, path: &Path) -> Result<(), ConvertError> {
    let failed = |source| ConvertError::OutputWriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut doc = vec![];
    write(gpx, &mut doc).map_err(failed)?;

    let file = File::create(path).map_err(failed)?;
    let mut out = BufWriter::new(file);

    if let Err(e) = out.write_all(&doc).and_then(|_| out.flush()) {
        drop(out);
        if let Err(rm) = fs::remove_file(path) {
            warn!("Failed to remove the incomplete \"{}\": {}", path.display(), rm);
        }
        return Err(failed(e));
    }

    debug!("{} bytes written to \"{}\"", doc.len(), path.display());

    Ok(())
}

fn write_metadata<W: Write>(writer: &mut Writer<W>, metadata: &Metadata) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("metadata")))?;

    if let Some(description) = &metadata.description {
        write_text(writer, "desc", description)?;
    }
    if let Some(time) = &metadata.time {
        write_text(writer, "time", &format_time(time.clone().into())?)?;
    }

    writer.write_event(Event::End(BytesEnd::new("metadata")))
}

fn write_track<W: Write>(writer: &mut Writer<W>, track: &Track) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("trk")))?;

    for segment in &track.segments {
        writer.write_event(Event::Start(BytesStart::new("trkseg")))?;
        for point in &segment.points {
            write_point(writer, point)?;
        }
        writer.write_event(Event::End(BytesEnd::new("trkseg")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("trk")))
}

fn write_point<W: Write>(writer: &mut Writer<W>, wp: &Waypoint) -> io::Result<()> {
    let point = wp.point();
    let lat = point.y().to_string();
    let lon = point.x().to_string();

    let mut start = BytesStart::new("trkpt");
    start.push_attribute(("lat", lat.as_str()));
    start.push_attribute(("lon", lon.as_str()));
    writer.write_event(Event::Start(start))?;

    if let Some(elevation) = wp.elevation {
        write_text(writer, "ele", &elevation.to_string())?;
    }
    if let Some(time) = &wp.time {
        write_text(writer, "time", &format_time(time.clone().into())?)?;
    }
    if let Some(name) = wp.name.as_deref().filter(|n| !n.is_empty()) {
        write_text(writer, "name", name)?;
    }

    writer.write_event(Event::End(BytesEnd::new("trkpt")))
}

/// `<tag>text</tag>`, or `<tag/>` without text
fn write_text<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return writer.write_event(Event::Empty(BytesStart::new(tag)));
    }

    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))
}
