//! CSV output writer.

use serde::Serialize;

use crate::core::timeline::ActivityHeatmap;
use crate::error::Result;

fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Converts report rows to CSV.
///
/// # Format
/// - Delimiter: `;`
/// - Header: the row type's field names
/// - Encoding: UTF-8
///
/// An empty slice produces an empty string; the header comes from the first row.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = writer();
    for row in rows {
        writer.serialize(row)?;
    }
    finish(writer)
}

/// Converts the activity heatmap to CSV: one `Day` column followed by one
/// column per hour bucket.
pub fn heatmap_to_csv(heatmap: &ActivityHeatmap) -> Result<String> {
    let mut writer = writer();
    if heatmap.is_empty() {
        return finish(writer);
    }

    let mut header = vec!["Day"];
    header.extend(heatmap.columns.iter().map(String::as_str));
    writer.write_record(&header)?;

    for (day, cells) in heatmap.rows.iter().zip(&heatmap.cells) {
        let mut record = vec![day.clone()];
        record.extend(cells.iter().map(usize::to_string));
        writer.write_record(&record)?;
    }

    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CountRow;
    use crate::core::timeline::DailyPoint;
    use chrono::NaiveDate;

    #[test]
    fn test_to_csv_count_rows() {
        let rows = vec![CountRow::new("Alice", 3), CountRow::new("Bob; Jr", 1)];
        let csv = to_csv(&rows).unwrap();
        assert_eq!(csv, "label;count\nAlice;3\n\"Bob; Jr\";1\n");
    }

    #[test]
    fn test_to_csv_dates() {
        let rows = vec![DailyPoint {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            count: 2,
        }];
        assert_eq!(to_csv(&rows).unwrap(), "date;count\n2024-03-01;2\n");
    }

    #[test]
    fn test_to_csv_empty() {
        assert_eq!(to_csv::<CountRow>(&[]).unwrap(), "");
    }

    #[test]
    fn test_heatmap_to_csv() {
        let heatmap = ActivityHeatmap {
            rows: vec!["Monday".into(), "Friday".into()],
            columns: vec!["09-10".into(), "23-00".into()],
            cells: vec![vec![0, 1], vec![2, 0]],
        };
        assert_eq!(
            heatmap_to_csv(&heatmap).unwrap(),
            "Day;09-10;23-00\nMonday;0;1\nFriday;2;0\n"
        );
        assert_eq!(heatmap_to_csv(&ActivityHeatmap::default()).unwrap(), "");
    }
}
