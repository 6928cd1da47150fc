use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::insights::{io_common::make_response, *};

/// Reads the responses from a worksheet of an Excel workbook (as exported by Google Forms
/// or Microsoft Forms). The first row holds the questions.
pub fn read_excel_responses(path: &str, worksheet: Option<&str>) -> InsightsResult<Vec<Response>> {
    let wrange = get_range(path, worksheet)?;

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(EmptyExcelSnafu { path })?
        .iter()
        .map(cell_to_string)
        .collect();
    debug!("read_excel_responses: header: {:?}", header);

    let mut res: Vec<Response> = Vec::new();
    for (idx, row) in iter.enumerate() {
        debug!("read_excel_responses: idx: {:?} row: {:?}", idx, &row);
        res.push(make_response(&header, row.iter().map(cell_to_string)));
    }
    Ok(res)
}

/// The text of a cell. Whole numbers are written without decimals, so that
/// a rating stored as `4.0` reads as `4`.
fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTime(f) => f.to_string(),
        DataType::Empty => "".to_string(),
        _ => {
            debug!("cell_to_string: unreadable cell {:?}", cell);
            "".to_string()
        }
    }
}

fn get_range(path: &str, worksheet: Option<&str>) -> InsightsResult<Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu { path }.fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: using worksheet {:?}", worksheet_name);
                Ok(wrange.clone())
            }
            _ => TooManyWorksheetsSnafu { path }.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_as_text() {
        assert_eq!(cell_to_string(&DataType::String("Vim".to_string())), "Vim");
        assert_eq!(cell_to_string(&DataType::Float(4.0)), "4");
        assert_eq!(cell_to_string(&DataType::Float(4.5)), "4.5");
        assert_eq!(cell_to_string(&DataType::Int(5)), "5");
        assert_eq!(cell_to_string(&DataType::Bool(true)), "true");
        assert_eq!(cell_to_string(&DataType::Empty), "");
    }

    #[test]
    fn not_a_workbook() {
        let res = read_excel_responses("/nonexistent/respostas.xlsx", None);
        assert!(matches!(res, Err(InsightsError::OpeningExcel { .. })));
    }
}
