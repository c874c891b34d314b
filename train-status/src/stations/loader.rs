//! Station table file loading.
//!
//! The table is delimited text with a header row. The delimiter (`;`, `,`
//! or tab) is taken from whichever occurs most in the header line. Columns
//! are found by header name; see the alias lists below. Coordinates are in
//! `N49,724049°` form and are normalized on load.

use std::path::Path;

use tracing::{debug, warn};

use crate::domain::{parse_latitude, parse_longitude};

use super::directory::{Station, StationDirectory};
use super::error::StationError;

/// Header names accepted for the station code column.
const CODE_HEADERS: &[&str] = &["sr70", "code", "kod", "kód", "id", "stopid", "stop_id"];

/// Header names accepted for the display name column.
const NAME_HEADERS: &[&str] = &["name", "nazev", "název", "stanice", "station", "stop_name"];

/// Header names accepted for the latitude column.
const LAT_HEADERS: &[&str] = &["lat", "latitude", "sirka", "šířka", "gps n"];

/// Header names accepted for the longitude column.
const LON_HEADERS: &[&str] = &["lon", "lng", "longitude", "delka", "délka", "gps e"];

/// Load the station directory from a file.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// legacy-encoded table still loads (with mangled accents).
pub fn load_directory(path: impl AsRef<Path>) -> Result<StationDirectory, StationError> {
    let bytes = std::fs::read(path.as_ref())?;
    let text = String::from_utf8_lossy(&bytes);
    parse_directory(&text)
}

/// Parse the station table from text.
pub fn parse_directory(text: &str) -> Result<StationDirectory, StationError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let header_line = text.lines().next().unwrap_or_default();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(header_line))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let find = |aliases: &[&str]| {
        headers
            .iter()
            .position(|h| aliases.contains(&h.to_lowercase().as_str()))
    };

    let code_col = find(CODE_HEADERS).ok_or_else(|| StationError::MissingColumn {
        column: "code",
        header: header_line.to_string(),
    })?;
    let name_col = find(NAME_HEADERS).ok_or_else(|| StationError::MissingColumn {
        column: "name",
        header: header_line.to_string(),
    })?;
    let lat_col = find(LAT_HEADERS);
    let lon_col = find(LON_HEADERS);

    let mut directory = StationDirectory::empty();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;

        let code = record.get(code_col).unwrap_or_default();
        let name = record.get(name_col).unwrap_or_default();
        if code.is_empty() || name.is_empty() {
            skipped += 1;
            continue;
        }

        let latitude = lat_col
            .and_then(|c| record.get(c))
            .and_then(parse_latitude);
        let longitude = lon_col
            .and_then(|c| record.get(c))
            .and_then(parse_longitude);

        let station = Station::named(name).with_coordinates(latitude, longitude);
        if !directory.insert(code, station) {
            debug!(code, "duplicate station code, keeping first entry");
        }
    }

    if skipped > 0 {
        warn!(skipped, "skipped station rows without code or name");
    }

    Ok(directory)
}

/// Pick the delimiter that occurs most often in the header line.
fn detect_delimiter(header_line: &str) -> u8 {
    [b';', b',', b'\t']
        .into_iter()
        .max_by_key(|&d| header_line.bytes().filter(|&b| b == d).count())
        .filter(|&d| header_line.as_bytes().contains(&d))
        .unwrap_or(b';')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;
    use std::io::Write;

    fn id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    const SEMICOLON_TABLE: &str = "\
SR70;Název;Šířka;Délka
333120;Červenka;N49,724049°;E17,076111°
33605;Olomouc hl.n.;N49,592778°;E17,278333°
34534;Broken coords;garbage;E17,1°
";

    #[test]
    fn detect_delimiters() {
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a,b,c"), b',');
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
        assert_eq!(detect_delimiter("single"), b';');
    }

    #[test]
    fn parse_semicolon_table() {
        let dir = parse_directory(SEMICOLON_TABLE).unwrap();

        assert_eq!(dir.len(), 3);
        assert_eq!(dir.name_of(&id("-SR70ST-333120")), "Červenka");

        let station = dir.get(&id("333120")).unwrap();
        assert_eq!(station.latitude, Some(49.724049));
        assert_eq!(station.longitude, Some(17.076111));
    }

    #[test]
    fn malformed_coordinate_is_absent_not_zero() {
        let dir = parse_directory(SEMICOLON_TABLE).unwrap();
        let station = dir.get(&id("34534")).unwrap();
        assert_eq!(station.latitude, None);
        assert_eq!(station.longitude, Some(17.1));
    }

    #[test]
    fn parse_comma_table_with_quoted_coordinates() {
        let text = "code,name,lat,lon\n33605,Olomouc hl.n.,\"N49,592778°\",\"E17,278333°\"\n";
        let dir = parse_directory(text).unwrap();
        assert_eq!(dir.coordinates_of(&id("33605")), (Some(49.592778), Some(17.278333)));
    }

    #[test]
    fn coordinates_columns_are_optional() {
        let dir = parse_directory("code;name\n1;One\n").unwrap();
        assert_eq!(dir.name_of(&id("1")), "One");
        assert_eq!(dir.coordinates_of(&id("1")), (None, None));
    }

    #[test]
    fn strips_byte_order_mark() {
        let dir = parse_directory("\u{feff}code;name\n1;One\n").unwrap();
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn skips_incomplete_rows() {
        let dir = parse_directory("code;name\n;Nameless\n2;\n3;Three\n").unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.name_of(&id("3")), "Three");
    }

    #[test]
    fn missing_name_column() {
        let err = parse_directory("code;something\n1;x\n").unwrap_err();
        assert!(matches!(
            err,
            StationError::MissingColumn { column: "name", .. }
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEMICOLON_TABLE.as_bytes()).unwrap();

        let dir = load_directory(file.path()).unwrap();
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn load_missing_file() {
        let err = load_directory("/nonexistent/stations.csv").unwrap_err();
        assert!(matches!(err, StationError::Io(_)));
    }
}
