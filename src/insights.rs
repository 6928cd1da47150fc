use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_insights::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::insights::config_reader::*;
use crate::insights::io_common::{read_responses, Provider};

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod report_txt;

#[derive(Debug, Snafu)]
pub enum InsightsError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the output to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV record {lineno}: {source}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file {path} has no content"))]
    EmptyExcel { path: String },
    #[snafu(display("Cannot find the worksheet {name}"))]
    MissingWorksheet { name: String },
    #[snafu(display("The Excel file {path} has multiple worksheets, the worksheet name must be provided"))]
    TooManyWorksheets { path: String },
    #[snafu(display("No input file: use --input or set responseSource.filePath in the configuration"))]
    MissingInput {},
    #[snafu(display("Unknown input type {provider:?} (expected csv or xlsx)"))]
    UnknownProvider { provider: String },
    #[snafu(display("Unknown view {view:?} (expected insights, chart-data, themes or report)"))]
    UnknownView { view: String },
    #[snafu(display("Error rendering the report: {source}"))]
    RenderingReport { source: std::fmt::Error },
    #[snafu(display("Difference detected between the computed output and the reference"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type InsightsResult<T> = Result<T, InsightsError>;

/// What the program outputs.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum View {
    Insights,
    ChartData,
    Themes,
    Report,
}

impl View {
    pub fn parse(name: &str) -> InsightsResult<View> {
        match name {
            "insights" => Ok(View::Insights),
            "chart-data" => Ok(View::ChartData),
            "themes" => Ok(View::Themes),
            "report" => Ok(View::Report),
            x => UnknownViewSnafu { view: x }.fail(),
        }
    }

    /// The payload written in place of the view when it could not be produced.
    pub fn error_payload(&self) -> Option<JSValue> {
        match self {
            View::Insights => {
                Some(json!({"error": "Failed to load survey data. Please try again later."}))
            }
            View::ChartData => Some(json!({"error": "Failed to load chart data"})),
            View::Themes | View::Report => None,
        }
    }
}

/// The error payload for the view requested on the command line, if any.
pub fn error_payload(view_name: Option<&str>) -> Option<JSValue> {
    View::parse(view_name.unwrap_or("insights"))
        .ok()
        .and_then(|v| v.error_payload())
}

/// The entries as `[label, count]` pairs, in the order of the tally.
fn tally_to_json(tally: &Tally) -> JSValue {
    JSValue::Array(
        tally
            .entries()
            .iter()
            .map(|(name, count)| json!([name, count]))
            .collect(),
    )
}

fn top_entry_to_json(e: &TopEntry) -> JSValue {
    json!([e.label, e.count])
}

fn insights_to_json(si: &SurveyInsights) -> JSValue {
    let quotes: Vec<JSValue> = si
        .quotes
        .iter()
        .map(|q| json!({"name": q.name, "text": q.text, "avatar": q.avatar}))
        .collect();
    json!({
        "total_responses": si.total_responses,
        "survey_date": si.survey_date,
        "avg_satisfaction": si.avg_satisfaction,
        "top_ide": top_entry_to_json(&si.top_ide),
        "top_like": top_entry_to_json(&si.top_like),
        "top_dislike": top_entry_to_json(&si.top_dislike),
        "quotes": quotes,
        "report_date": si.report_date,
    })
}

fn chart_to_json(cd: &ChartData) -> JSValue {
    json!({"labels": cd.labels, "data": cd.data, "backgroundColor": cd.background_color})
}

fn series_to_json(cd: &ChartData) -> JSValue {
    json!({"labels": cd.labels, "data": cd.data})
}

fn chart_series_to_json(cs: &ChartSeries) -> JSValue {
    json!({
        "ide_chart": chart_to_json(&cs.ide_chart),
        "satisfaction_chart": chart_to_json(&cs.satisfaction_chart),
        "feedback_chart": {
            "likes": series_to_json(&cs.feedback_chart.likes),
            "dislikes": series_to_json(&cs.feedback_chart.dislikes),
        }
    })
}

fn themes_to_json(tt: &ThemeTally) -> JSValue {
    json!({"likes": tally_to_json(&tt.likes), "dislikes": tally_to_json(&tt.dislikes)})
}

/// The JSON document of a view. The text report has no JSON form.
fn build_view_js(agg: &SurveyAggregator, view: View) -> Option<JSValue> {
    match view {
        View::Insights => Some(insights_to_json(&agg.survey_insights())),
        View::ChartData => Some(chart_series_to_json(&agg.chart_series())),
        View::Themes => Some(themes_to_json(&agg.feedback_themes())),
        View::Report => None,
    }
}

/// The survey, as described by the command line and the configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
struct SurveySource {
    input_path: String,
    provider: Provider,
    excel_worksheet_name: Option<String>,
    labels: QuestionLabels,
    survey_name: Option<String>,
    survey_period: String,
}

fn resolve_source(
    args: &Args,
    config: &Option<SurveyConfig>,
    root: &Path,
) -> InsightsResult<SurveySource> {
    let source_config = config
        .as_ref()
        .map(|c| c.response_source.clone())
        .unwrap_or_default();
    let settings = config
        .as_ref()
        .map(|c| c.survey_settings.clone())
        .unwrap_or_default();

    // The command line takes precedence over the configuration.
    let input_path = match (&args.input, &source_config.file_path) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => {
            let pb: PathBuf = [root, Path::new(p)].iter().collect();
            pb.as_path().display().to_string()
        }
        (None, None) => return MissingInputSnafu {}.fail(),
    };

    let provider = match args.input_type.as_ref().or(source_config.provider.as_ref()) {
        Some(name) => Provider::from_name(name)?,
        None => Provider::infer(&input_path),
    };

    let labels = config
        .as_ref()
        .map(|c| c.questions.to_labels())
        .unwrap_or_default();

    let survey_period = args
        .survey_period
        .clone()
        .or(settings.survey_period)
        .unwrap_or_else(|| DEFAULT_SURVEY_PERIOD.to_string());

    Ok(SurveySource {
        input_path,
        provider,
        excel_worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or(source_config.excel_worksheet_name),
        labels,
        survey_name: settings.survey_name,
        survey_period,
    })
}

fn check_reference(computed: &JSValue, reference_path: &str) -> InsightsResult<()> {
    let reference = read_reference(reference_path)?;
    info!("reference: {:?}", reference);
    let pretty_reference =
        serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    let pretty_computed = serde_json::to_string_pretty(&strip_report_date(computed.clone()))
        .context(ParsingJsonSnafu {})?;
    if pretty_reference != pretty_computed {
        warn!("Found differences with the reference file {}", reference_path);
        print_diff(pretty_reference.as_str(), pretty_computed.as_str(), "\n");
        return ReferenceMismatchSnafu {}.fail();
    }
    Ok(())
}

fn write_output(out: &Option<String>, content: &str) -> InsightsResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", content);
            Ok(())
        }
        Some(path) => {
            info!("Writing output to {}", path);
            fs::write(path, content).context(WritingOutputSnafu { path })
        }
    }
}

/// Reads the survey responses and writes the requested view.
pub fn run_survey(args: &Args) -> InsightsResult<()> {
    let view = View::parse(args.view.as_deref().unwrap_or("insights"))?;

    let config: Option<SurveyConfig> = match &args.config {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    debug!("config: {:?}", config);

    // Relative paths in the configuration are relative to the configuration file.
    let root: PathBuf = match &args.config {
        Some(p) => Path::new(p)
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default(),
        None => PathBuf::new(),
    };

    let source = resolve_source(args, &config, &root)?;
    info!("source: {:?}", source);

    let responses = read_responses(
        &source.input_path,
        source.provider,
        source.excel_worksheet_name.as_deref(),
    );
    let agg = SurveyAggregator::new(responses, source.labels, &source.survey_period);
    if agg.responses().is_empty() {
        warn!("No responses found for the period {}", agg.survey_period());
    }

    let content = match build_view_js(&agg, view) {
        Some(js) => {
            if let Some(reference_path) = &args.reference {
                check_reference(&js, reference_path)?;
            }
            serde_json::to_string_pretty(&js).context(ParsingJsonSnafu {})?
        }
        None => {
            if args.reference.is_some() {
                whatever!("The report view cannot be checked against a reference");
            }
            report_txt::render_report(
                source.survey_name.as_deref(),
                &agg.survey_insights(),
                &agg.chart_series(),
            )
            .context(RenderingReportSnafu {})?
        }
    };

    write_output(&args.out, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dir() -> String {
        format!("{}/tests/sample_survey", env!("CARGO_MANIFEST_DIR"))
    }

    fn sample_args(view: &str) -> Args {
        Args {
            config: Some(format!("{}/config.json", sample_dir())),
            reference: None,
            out: None,
            input: None,
            input_type: None,
            excel_worksheet_name: None,
            view: Some(view.to_string()),
            survey_period: None,
            verbose: false,
        }
    }

    fn sample_aggregator() -> SurveyAggregator {
        let args = sample_args("insights");
        let config = Some(read_config(args.config.as_ref().unwrap()).unwrap());
        let source = resolve_source(&args, &config, Path::new(&sample_dir())).unwrap();
        let responses = read_responses(&source.input_path, source.provider, None);
        SurveyAggregator::new(responses, source.labels, &source.survey_period)
    }

    #[test]
    fn sample_insights_match_reference() {
        let mut args = sample_args("insights");
        args.reference = Some(format!("{}/expected_insights.json", sample_dir()));
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("insights.json");
        args.out = Some(out.display().to_string());
        run_survey(&args).unwrap();

        let written: JSValue =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["total_responses"], json!(6));
        assert!(written["report_date"].as_str().unwrap().contains(" de "));
    }

    #[test]
    fn sample_chart_data_match_reference() {
        let mut args = sample_args("chart-data");
        args.reference = Some(format!("{}/expected_chart_data.json", sample_dir()));
        let dir = tempfile::tempdir().unwrap();
        args.out = Some(dir.path().join("chart.json").display().to_string());
        run_survey(&args).unwrap();
    }

    #[test]
    fn reference_mismatch_fails() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("themes.json");
        fs::write(&reference, r#"{"likes": [["Clareza nos fluxos", 1]], "dislikes": []}"#).unwrap();
        let mut args = sample_args("themes");
        args.reference = Some(reference.display().to_string());
        args.out = Some(dir.path().join("out.json").display().to_string());
        let res = run_survey(&args);
        assert!(matches!(res, Err(InsightsError::ReferenceMismatch {})));
    }

    #[test]
    fn themes_json_keeps_counts() {
        let js = themes_to_json(&sample_aggregator().feedback_themes());
        assert_eq!(js["likes"][0], json!(["Clareza nos fluxos", 4]));
        assert_eq!(js["likes"][1], json!(["Protótipos navegáveis", 2]));
        assert_eq!(js["dislikes"][0], json!(["Edge cases", 3]));
        assert_eq!(js["dislikes"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn themes_json_is_ranked_by_count() {
        let labels = QuestionLabels::default();
        let mut b = survey_insights::builder::Builder::new();
        b.add_response(&[
            (labels.likes.as_str(), "zebra, zebra, zebra, apple"),
            (labels.dislikes.as_str(), "prazos, atrasos, atrasos"),
        ]);
        let js = themes_to_json(&b.build().feedback_themes());
        assert_eq!(
            js,
            json!({
                "likes": [["zebra", 3], ["apple", 1]],
                "dislikes": [["atrasos", 2], ["prazos", 1]],
            })
        );
        // The ranking survives the trip through the reference file.
        let text = serde_json::to_string_pretty(&js).unwrap();
        let reparsed: JSValue = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed["likes"][0], json!(["zebra", 3]));
    }

    #[test]
    fn command_line_overrides_configuration() {
        let mut args = sample_args("insights");
        args.input = Some("/tmp/other.xlsx".to_string());
        args.survey_period = Some("Maio 2025".to_string());
        let config = Some(read_config(args.config.as_ref().unwrap()).unwrap());
        let source = resolve_source(&args, &config, Path::new(&sample_dir())).unwrap();
        assert_eq!(source.input_path, "/tmp/other.xlsx");
        // The provider of the configuration still applies.
        assert_eq!(source.provider, Provider::Csv);
        assert_eq!(source.survey_period, "Maio 2025");
        assert_eq!(source.survey_name.as_deref(), Some("Handoff 2025"));
    }

    #[test]
    fn missing_input_is_an_error() {
        let mut args = sample_args("insights");
        args.config = None;
        let res = resolve_source(&args, &None, Path::new(""));
        assert!(matches!(res, Err(InsightsError::MissingInput {})));
    }

    #[test]
    fn missing_file_gives_fallback_insights() {
        let mut args = sample_args("insights");
        args.config = None;
        args.input = Some("/nonexistent/respostas.csv".to_string());
        let source = resolve_source(&args, &None, Path::new("")).unwrap();
        let responses = read_responses(&source.input_path, source.provider, None);
        let agg = SurveyAggregator::new(responses, source.labels, &source.survey_period);
        let js = build_view_js(&agg, View::Insights).unwrap();
        assert_eq!(js["total_responses"], json!(0));
        assert_eq!(js["avg_satisfaction"].as_f64(), Some(0.0));
        assert_eq!(js["top_ide"], json!(["Visual Studio Code", 0]));
        assert_eq!(js["top_like"], json!(["Clareza nos fluxos", 0]));
        assert_eq!(js["top_dislike"], json!(["Edge cases", 0]));
        assert_eq!(js["quotes"], json!([]));
    }

    #[test]
    fn unknown_view_and_error_payloads() {
        assert!(matches!(
            View::parse("pdf"),
            Err(InsightsError::UnknownView { .. })
        ));
        assert_eq!(
            error_payload(None),
            Some(json!({"error": "Failed to load survey data. Please try again later."}))
        );
        assert_eq!(
            error_payload(Some("chart-data")),
            Some(json!({"error": "Failed to load chart data"}))
        );
        assert_eq!(error_payload(Some("report")), None);
    }

    #[test]
    fn sample_report_is_written() {
        let mut args = sample_args("report");
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.txt");
        args.out = Some(out.display().to_string());
        run_survey(&args).unwrap();
        let report = fs::read_to_string(&out).unwrap();
        assert!(report.starts_with("Handoff 2025\n"));
        assert!(report.contains("realizada com 6 desenvolvedores frontend em Março-Abril 2025"));
        assert!(report.contains("Relatório gerado em: "));
    }

    #[test]
    fn sample_aggregator_uses_configured_period() {
        let agg = sample_aggregator();
        assert_eq!(agg.responses().len(), 6);
        assert_eq!(agg.survey_period(), "Março-Abril 2025");
    }

    #[test]
    fn report_cannot_use_reference() {
        let mut args = sample_args("report");
        args.reference = Some(format!("{}/expected_insights.json", sample_dir()));
        assert!(run_survey(&args).is_err());
    }
}
