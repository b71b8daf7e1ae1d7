//! Fixtures shared by unit tests: tiny JPEG files carrying real EXIF blocks.

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use std::io::Cursor;
use std::path::Path;

/// Builds an EXIF block and wraps it in a minimal JPEG (SOI, APP1, EOI)
#[derive(Default)]
pub struct ExifFixture {
    fields: Vec<Field>,
}

impl ExifFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_time_original(self, value: &str) -> Self {
        self.ascii(Tag::DateTimeOriginal, value)
    }

    pub fn date_time(self, value: &str) -> Self {
        self.ascii(Tag::DateTime, value)
    }

    pub fn gps(self, lat: [u32; 3], lat_ref: &str, lon: [u32; 3], lon_ref: &str) -> Self {
        self.ascii(Tag::GPSLatitudeRef, lat_ref)
            .rationals(Tag::GPSLatitude, lat)
            .ascii(Tag::GPSLongitudeRef, lon_ref)
            .rationals(Tag::GPSLongitude, lon)
    }

    /// Latitude only, which is not enough to locate a photo
    pub fn latitude_only(self, lat: [u32; 3], lat_ref: &str) -> Self {
        self.ascii(Tag::GPSLatitudeRef, lat_ref)
            .rationals(Tag::GPSLatitude, lat)
    }

    fn ascii(mut self, tag: Tag, value: &str) -> Self {
        self.fields.push(Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![value.as_bytes().to_vec()]),
        });
        self
    }

    fn rationals(mut self, tag: Tag, dms: [u32; 3]) -> Self {
        self.fields.push(Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Rational(
                dms.iter()
                    .map(|&num| Rational { num, denom: 1 })
                    .collect(),
            ),
        });
        self
    }

    pub fn write_jpeg(&self, path: &Path) {
        let mut writer = Writer::new();
        for field in &self.fields {
            writer.push_field(field);
        }
        let mut tiff = Cursor::new(Vec::new());
        writer.write(&mut tiff, false).unwrap();
        let tiff = tiff.into_inner();

        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
        let segment_len = u16::try_from(tiff.len() + 8).unwrap();
        jpeg.extend_from_slice(&segment_len.to_be_bytes());
        jpeg.extend_from_slice(b"Exif\0\0");
        jpeg.extend_from_slice(&tiff);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);

        std::fs::write(path, jpeg).unwrap();
    }
}
