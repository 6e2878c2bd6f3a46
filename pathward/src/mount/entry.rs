//! A single mount-table row.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Error, Result};

/// Number of whitespace-separated fields in a mount-table line.
const FIELD_COUNT: usize = 6;

/// One row of kernel mount state.
///
/// # Examples
///
/// ```
/// use pathward::mount::MountEntry;
///
/// let entry = MountEntry::parse_line("/dev/sda1 / ext4 rw,relatime 0 1", 1).unwrap();
/// assert_eq!(entry.source, "/dev/sda1");
/// assert!(entry.has_option("relatime"));
/// assert!(!entry.is_read_only());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MountEntry {
    /// Device or pseudo-filesystem name.
    pub source: String,
    /// Mount point.
    pub target: PathBuf,
    /// Filesystem type, for example `ext4` or `tmpfs`.
    pub filesystem_type: String,
    /// Comma-separated mount options.
    pub options: String,
    /// Dump frequency field.
    pub dump_frequency: u32,
    /// fsck pass number.
    pub pass_number: u32,
}

impl MountEntry {
    /// Parse one line of mount-table text.
    ///
    /// `line_number` is one-based and only used in error messages. Octal
    /// escapes such as `\040` in the source and target are decoded.
    ///
    /// # Errors
    ///
    /// Returns `MalformedMountTable` if the line does not have exactly six
    /// fields, the numeric fields are not numbers, or an escape decodes to
    /// invalid UTF-8.
    pub fn parse_line(line: &str, line_number: usize) -> Result<Self> {
        let malformed = |reason: String| Error::MalformedMountTable {
            line: line_number,
            reason,
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != FIELD_COUNT {
            return Err(malformed(format!(
                "expected {FIELD_COUNT} fields, found {}",
                fields.len()
            )));
        }

        let number = |field: &str, name: &str| {
            field
                .parse::<u32>()
                .map_err(|_| malformed(format!("{name} '{field}' is not a number")))
        };

        Ok(Self {
            source: unescape(fields[0]).map_err(&malformed)?,
            target: PathBuf::from(unescape(fields[1]).map_err(&malformed)?),
            filesystem_type: fields[2].to_string(),
            options: fields[3].to_string(),
            dump_frequency: number(fields[4], "dump frequency")?,
            pass_number: number(fields[5], "pass number")?,
        })
    }

    /// Individual mount options.
    pub fn option_list(&self) -> impl Iterator<Item = &str> {
        self.options.split(',').filter(|o| !o.is_empty())
    }

    /// Whether `name` (or `name=value`) is among the options.
    #[must_use]
    pub fn has_option(&self, name: &str) -> bool {
        self.option_list()
            .any(|o| o == name || o.split_once('=').is_some_and(|(key, _)| key == name))
    }

    /// Whether the filesystem is mounted read-only.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.has_option("ro")
    }
}

impl fmt::Display for MountEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {} type {} ({})",
            self.source,
            self.target.display(),
            self.filesystem_type,
            self.options
        )
    }
}

/// Decode the kernel's `\ooo` octal escapes.
fn unescape(field: &str) -> std::result::Result<String, String> {
    if !field.contains('\\') {
        return Ok(field.to_string());
    }

    let bytes = field.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escape = bytes.get(i + 1..i + 4).filter(|digits| {
            bytes[i] == b'\\' && digits.iter().all(|d| (b'0'..=b'7').contains(d))
        });
        match escape {
            Some(digits) => {
                let value = digits
                    .iter()
                    .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
                let byte = u8::try_from(value)
                    .map_err(|_| format!("escape \\{} is out of range", field_slice(digits)))?;
                decoded.push(byte);
                i += 4;
            }
            None => {
                decoded.push(bytes[i]);
                i += 1;
            }
        }
    }

    String::from_utf8(decoded).map_err(|_| format!("'{field}' decodes to invalid UTF-8"))
}

fn field_slice(digits: &[u8]) -> String {
    String::from_utf8_lossy(digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_line() {
        let entry = MountEntry::parse_line("/dev/sda1 / ext4 rw 0 1", 1).unwrap();
        assert_eq!(
            entry,
            MountEntry {
                source: "/dev/sda1".to_string(),
                target: PathBuf::from("/"),
                filesystem_type: "ext4".to_string(),
                options: "rw".to_string(),
                dump_frequency: 0,
                pass_number: 1,
            }
        );
    }

    #[test]
    fn test_tabs_and_repeated_spaces() {
        let entry = MountEntry::parse_line("tmpfs\t/tmp  tmpfs rw,nosuid 0 0", 2).unwrap();
        assert_eq!(entry.target, PathBuf::from("/tmp"));
        assert_eq!(entry.option_list().collect::<Vec<_>>(), vec!["rw", "nosuid"]);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = MountEntry::parse_line("/dev/sda1 / ext4 rw", 7).unwrap_err();
        match err {
            Error::MalformedMountTable { line, reason } => {
                assert_eq!(line, 7);
                assert!(reason.contains("found 4"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(MountEntry::parse_line("a b c d e f g", 1).is_err());
    }

    #[test]
    fn test_non_numeric_fields() {
        let err = MountEntry::parse_line("/dev/sda1 / ext4 rw x 1", 3).unwrap_err();
        assert!(format!("{err}").contains("dump frequency"));
        let err = MountEntry::parse_line("/dev/sda1 / ext4 rw 0 -1", 3).unwrap_err();
        assert!(format!("{err}").contains("pass number"));
    }

    #[test]
    fn test_octal_escapes() {
        let entry =
            MountEntry::parse_line(r"//nas/My\040Share /mnt/my\040share cifs rw 0 0", 1).unwrap();
        assert_eq!(entry.source, "//nas/My Share");
        assert_eq!(entry.target, PathBuf::from("/mnt/my share"));

        let entry = MountEntry::parse_line(r"/dev/sdb1 /mnt/back\134slash ext4 rw 0 0", 1).unwrap();
        assert_eq!(entry.target, PathBuf::from(r"/mnt/back\slash"));
    }

    #[test]
    fn test_incomplete_escape_kept_literally() {
        let entry = MountEntry::parse_line(r"/dev/x /mnt/a\09 ext4 rw 0 0", 1).unwrap();
        assert_eq!(entry.target, PathBuf::from(r"/mnt/a\09"));
    }

    #[test]
    fn test_options() {
        let entry = MountEntry::parse_line("/dev/sr0 /media/cd iso9660 ro,uid=1000 0 0", 1).unwrap();
        assert!(entry.is_read_only());
        assert!(entry.has_option("uid"));
        assert!(!entry.has_option("gid"));
        assert_eq!(
            entry.to_string(),
            "/dev/sr0 on /media/cd type iso9660 (ro,uid=1000)"
        );
    }

    #[test]
    fn test_serializes_decoded_fields() {
        let entry = MountEntry::parse_line(r"//nas/share /mnt/My\040Share cifs ro 0 0", 1).unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["source"], "//nas/share");
        assert_eq!(json["target"], "/mnt/My Share");
        assert_eq!(json["filesystem_type"], "cifs");
        assert_eq!(json["pass_number"], 0);
    }
}
