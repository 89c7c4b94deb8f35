//! JSON exports of the extracted tables. Output is pretty-printed with
//! four-space indentation and every non-ASCII character escaped, so the
//! files diff cleanly regardless of locale tooling.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use tracing::info;

use crate::db::{self, GuideTable};
use crate::parser::{FamilyRecord, Features};

pub fn export_all(conn: &Connection, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;
    export_datasheets(conn, &out_dir.join("datasheets.json"))?;
    export_guide_table(conn, GuideTable::CliCommands, &out_dir.join("cli_commands.json"))?;
    export_guide_table(conn, GuideTable::Articles, &out_dir.join("guide_articles.json"))?;
    Ok(())
}

pub fn export_datasheets(conn: &Connection, path: &Path) -> Result<()> {
    let rows = db::fetch_family_features(conn)?;
    let records: Vec<FamilyRecord> = rows
        .into_iter()
        .map(|(family, _url, features)| {
            let features: Features = serde_json::from_str(&features)
                .with_context(|| format!("corrupt feature JSON for {}", family))?;
            Ok(FamilyRecord { family, features })
        })
        .collect::<Result<_>>()?;
    write_json(path, &records)?;
    info!("Exported {} datasheet records to {}", records.len(), path.display());
    Ok(())
}

pub fn export_guide_table(conn: &Connection, table: GuideTable, path: &Path) -> Result<()> {
    let rows = db::fetch_guide_records(conn, table)?;
    let records: Vec<serde_json::Value> = rows
        .iter()
        .map(|r| serde_json::from_str(r).context("corrupt guide record JSON"))
        .collect::<Result<_>>()?;
    write_json(path, &records)?;
    info!("Exported {} guide records to {}", records.len(), path.display());
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut out = to_ascii_pretty(value)?;
    out.push('\n');
    fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Serialize with four-space indentation and `\uXXXX` escapes for every
/// character outside ASCII (surrogate pairs above the BMP).
pub fn to_ascii_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = AsciiPretty::new();
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

struct AsciiPretty<'a> {
    inner: PrettyFormatter<'a>,
}

impl AsciiPretty<'_> {
    fn new() -> Self {
        AsciiPretty {
            inner: PrettyFormatter::with_indent(b"    "),
        }
    }
}

impl Formatter for AsciiPretty<'_> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                let code = c as u32;
                if code <= 0xFFFF {
                    write!(writer, "\\u{:04x}", code)?;
                } else {
                    let v = code - 0x10000;
                    let high = 0xD800 + (v >> 10);
                    let low = 0xDC00 + (v & 0x3FF);
                    write!(writer, "\\u{:04x}\\u{:04x}", high, low)?;
                }
            }
        }
        Ok(())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object_value(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_ascii_is_escaped() {
        let v = json!({"name": "Pérez"});
        let out = to_ascii_pretty(&v).unwrap();
        assert!(out.contains(r"P\u00e9rez"));
        assert!(out.is_ascii());
    }

    #[test]
    fn astral_characters_use_surrogate_pairs() {
        let v = json!(["\u{1F600}"]);
        let out = to_ascii_pretty(&v).unwrap();
        assert!(out.contains(r"\ud83d\ude00"));
    }

    #[test]
    fn output_uses_four_space_indent() {
        let v = json!({"a": [1]});
        let out = to_ascii_pretty(&v).unwrap();
        assert_eq!(out, "{\n    \"a\": [\n        1\n    ]\n}");
    }

    #[test]
    fn ascii_passes_through_untouched() {
        let v = json!("switching capacity: 128.0");
        let out = to_ascii_pretty(&v).unwrap();
        assert_eq!(out, "\"switching capacity: 128.0\"");
    }
}
