use std::path::Path;

use log::error;

use crate::insights::{io_csv::read_csv_responses, io_excel::read_excel_responses, *};

/// The format of the file holding the responses.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Provider {
    Csv,
    Xlsx,
}

impl Provider {
    pub fn from_name(name: &str) -> InsightsResult<Provider> {
        match name {
            "csv" => Ok(Provider::Csv),
            "xlsx" | "excel" => Ok(Provider::Xlsx),
            x => UnknownProviderSnafu { provider: x }.fail(),
        }
    }

    pub fn infer(path: &str) -> Provider {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => Provider::Xlsx,
            _ => Provider::Csv,
        }
    }
}

/// Reads all the responses of a file.
///
/// This never fails: a missing or unreadable file is reported in the logs and gives no responses.
pub fn read_responses(path: &str, provider: Provider, worksheet: Option<&str>) -> ResponseSet {
    if !Path::new(path).exists() {
        warn!("Response file not found: {}", path);
        return ResponseSet::default();
    }
    info!("Attempting to read response file {:?} ({:?})", path, provider);
    let res = match provider {
        Provider::Csv => read_csv_responses(path),
        Provider::Xlsx => read_excel_responses(path, worksheet),
    };
    match res {
        Ok(responses) => {
            info!("Loaded {} survey responses", responses.len());
            ResponseSet::new(responses)
        }
        Err(e) => {
            error!("Error loading survey responses from {:?}: {}", path, e);
            ResponseSet::default()
        }
    }
}

/// Pairs the cells of a row with the labels of the header.
/// Cells beyond the header are dropped, missing cells leave the question unanswered.
pub fn make_response<I>(header: &[String], cells: I) -> Response
where
    I: IntoIterator<Item = String>,
{
    Response::new(header.iter().cloned().zip(cells))
}
