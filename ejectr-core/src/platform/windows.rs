use crate::command::Command;
use crate::error::{Error, Result};
use crate::volume::Volume;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const POWERSHELL: &str = "powershell.exe";
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);
const EJECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Selects removable volumes that have a drive letter, as JSON.
pub const QUERY_SCRIPT: &str = "Get-Volume | \
Where-Object {$_.DriveType -eq 'Removable' -and $_.DriveLetter -ne $null} | \
Select-Object DriveLetter, FileSystemLabel | \
ConvertTo-Json";

/// One row of `Get-Volume` output as emitted by `ConvertTo-Json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawVolume {
    #[serde(default)]
    drive_letter: Option<DriveLetter>,
    #[serde(default)]
    file_system_label: Option<String>,
}

/// `[char]` values come out as either a one-letter string or a UTF-16 code,
/// depending on the PowerShell version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DriveLetter {
    Text(String),
    Code(u32),
}

impl DriveLetter {
    fn to_char(&self) -> Option<char> {
        let letter = match self {
            DriveLetter::Text(text) => {
                let mut chars = text.trim().chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return None,
                }
            }
            DriveLetter::Code(code) => char::from_u32(*code)?,
        };
        letter.is_ascii_alphabetic().then_some(letter)
    }
}

/// `ConvertTo-Json` emits a bare object for one row and an array for several.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RawVolume>),
    One(RawVolume),
}

impl From<OneOrMany> for Vec<RawVolume> {
    fn from(rows: OneOrMany) -> Self {
        match rows {
            OneOrMany::Many(rows) => rows,
            OneOrMany::One(row) => vec![row],
        }
    }
}

/// Runs [`QUERY_SCRIPT`] through PowerShell.
pub fn list_command() -> Command {
    Command::new(POWERSHELL)
        .arg("-NoProfile")
        .arg("-NonInteractive")
        .arg("-Command")
        .arg(QUERY_SCRIPT)
        .timeout(QUERY_TIMEOUT)
}

/// Parses the JSON output of [`list_command`].
///
/// Blank output means there are no removable volumes. Rows without a usable
/// drive letter are skipped. Names are synthesized as `E: (Label)`, or `E:`
/// when the volume has no label.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the output is not the expected JSON.
pub fn parse_query(raw: &str) -> Result<Vec<Volume>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<RawVolume> = serde_json::from_str::<OneOrMany>(raw)?.into();
    let volumes = rows
        .into_iter()
        .filter_map(|row| {
            let letter = row.drive_letter.as_ref()?.to_char()?;
            let name = match row.file_system_label.as_deref() {
                Some(label) if !label.trim().is_empty() => format!("{letter}: ({label})"),
                _ => format!("{letter}:"),
            };
            Some(Volume::new(name))
        })
        .collect();

    Ok(volumes)
}

/// Recovers the drive letter from a synthesized name: everything before the
/// first colon, which must be a single ASCII letter.
pub fn drive_letter(volume: &Volume) -> Option<char> {
    let prefix = volume.name.split(':').next()?.trim();
    let mut chars = prefix.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => Some(letter),
        _ => None,
    }
}

/// `RemoveDrive.exe <letter>: -b -na`.
///
/// `-b` asks the helper for a "safe to remove" notification and `-na`
/// suppresses its about text.
///
/// # Errors
///
/// Returns [`Error::InvalidVolume`] if no drive letter can be recovered from
/// the volume name.
pub fn eject_command(volume: &Volume, remove_drive: &Path) -> Result<Command> {
    let letter = drive_letter(volume).ok_or_else(|| Error::InvalidVolume(volume.name.clone()))?;

    Ok(Command::new(remove_drive)
        .arg(format!("{letter}:"))
        .arg("-b")
        .arg("-na")
        .timeout(EJECT_TIMEOUT))
}

/// The full name, the drive form (`E:`), the bare letter and the label.
pub(crate) fn match_keys(volume: &Volume) -> Vec<&str> {
    let name = volume.name.as_str();
    let mut keys = vec![name];
    if let Some(colon) = name.find(':') {
        keys.push(&name[..=colon]);
        keys.push(&name[..colon]);
        let label = name[colon + 1..]
            .trim_start()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'));
        if let Some(label) = label {
            keys.push(label);
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn names(volumes: &[Volume]) -> Vec<&str> {
        volumes.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn synthesizes_names_with_and_without_labels() {
        let raw = r#"[
            {"DriveLetter":"E","FileSystemLabel":"Kingston"},
            {"DriveLetter":"F","FileSystemLabel":null},
            {"DriveLetter":"G","FileSystemLabel":""}
        ]"#;
        assert_eq!(names(&parse_query(raw).unwrap()), ["E: (Kingston)", "F:", "G:"]);
    }

    #[test]
    fn single_object_parses_like_a_one_element_array() {
        let object = r#"{"DriveLetter":"E","FileSystemLabel":"Kingston"}"#;
        let array = format!("[{object}]");
        assert_eq!(parse_query(object).unwrap(), parse_query(&array).unwrap());
        assert_eq!(names(&parse_query(object).unwrap()), ["E: (Kingston)"]);
    }

    #[test]
    fn accepts_numeric_drive_letters() {
        let raw = r#"{"DriveLetter":69,"FileSystemLabel":"USB"}"#;
        assert_eq!(names(&parse_query(raw).unwrap()), ["E: (USB)"]);
    }

    #[test]
    fn skips_rows_without_a_drive_letter() {
        let raw = r#"[
            {"DriveLetter":null,"FileSystemLabel":"Hidden"},
            {"FileSystemLabel":"Missing"},
            {"DriveLetter":"","FileSystemLabel":"Empty"},
            {"DriveLetter":0,"FileSystemLabel":"Nul"},
            {"DriveLetter":"H","FileSystemLabel":"Kept"}
        ]"#;
        assert_eq!(names(&parse_query(raw).unwrap()), ["H: (Kept)"]);
    }

    #[test]
    fn blank_output_yields_no_volumes() {
        assert!(parse_query("").unwrap().is_empty());
        assert!(parse_query("  \r\n").unwrap().is_empty());
        assert!(parse_query("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_output_is_a_parse_error() {
        let err = parse_query("{\"DriveLetter\":").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(matches!(parse_query("Get-Volume : error").unwrap_err(), Error::Parse(_)));
    }

    #[test]
    fn drive_letter_is_the_text_before_the_first_colon() {
        assert_eq!(drive_letter(&Volume::new("E: (Kingston)")), Some('E'));
        assert_eq!(drive_letter(&Volume::new("F:")), Some('F'));
        assert_eq!(drive_letter(&Volume::new("G: (Label: with colon)")), Some('G'));
        assert_eq!(drive_letter(&Volume::new("Untitled")), None);
        assert_eq!(drive_letter(&Volume::new(": (Odd)")), None);
    }

    #[test]
    fn eject_invokes_the_bundled_helper() {
        let helper = PathBuf::from("assets").join("RemoveDrive.exe");
        let command = eject_command(&Volume::new("E: (Kingston)"), &helper).unwrap();
        assert_eq!(command.program, helper);
        assert_eq!(command.args, ["E:", "-b", "-na"]);
        assert_eq!(command.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn eject_rejects_names_without_a_drive_letter() {
        let err = eject_command(&Volume::new("Untitled"), Path::new("RemoveDrive.exe")).unwrap_err();
        assert!(matches!(err, Error::InvalidVolume(ref name) if name == "Untitled"));
    }

    #[test]
    fn list_command_runs_the_query_script() {
        let command = list_command();
        assert_eq!(command.program.to_str(), Some("powershell.exe"));
        assert_eq!(command.args.last().map(String::as_str), Some(QUERY_SCRIPT));
        assert_eq!(command.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn match_keys_cover_every_part_of_the_name() {
        let volume = Volume::new("E: (Kingston)");
        assert_eq!(match_keys(&volume), ["E: (Kingston)", "E:", "E", "Kingston"]);
        assert_eq!(match_keys(&Volume::new("F:")), ["F:", "F:", "F"]);
    }
}
