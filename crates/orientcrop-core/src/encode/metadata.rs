//! Minimal EXIF block carrying only the orientation tag.

use std::io::Cursor;

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use log::debug;

use super::EncodeError;
use crate::orientation::Orientation;

/// Serialize a TIFF-structured EXIF block with a single `Orientation` field
/// in IFD0. Big endian, as most cameras write it.
pub(crate) fn orientation_block(orientation: Orientation) -> Result<Vec<u8>, EncodeError> {
    let field = Field {
        tag: Tag::Orientation,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![u16::from(orientation.exif_value())]),
    };

    let mut writer = Writer::new();
    writer.push_field(&field);

    let mut out = Cursor::new(Vec::new());
    writer
        .write(&mut out, false)
        .map_err(|e| EncodeError::Exif(e.to_string()))?;

    let block = out.into_inner();
    debug!("EXIF block for {}: {} bytes", orientation, block.len());
    Ok(block)
}
