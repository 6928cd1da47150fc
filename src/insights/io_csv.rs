// Primitives for reading CSV files.

use crate::insights::{io_common::make_response, *};

/// Reads a CSV file with a header row.
///
/// Rows may have fewer or more cells than the header.
pub fn read_csv_responses(path: &str) -> InsightsResult<Vec<Response>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;

    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv_responses: header: {:?}", header);

    let mut res: Vec<Response> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is the first record
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_responses: lineno: {:?} row: {:?}", lineno, &line);
        res.push(make_response(&header, line.iter().map(|s| s.to_string())));
    }
    Ok(res)
}
