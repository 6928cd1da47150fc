use clap::Parser;

/// This is a program to summarize the responses of a developer survey.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the description of the survey, in JSON format.
    /// For more information about the file format, read the documentation of the manual.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing a previous output of the same view in JSON format.
    /// If provided, the computed output is checked against the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the output will be written to the given
    /// location. By default, the output is written to the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The file with the survey responses. Setting this option overrides
    /// the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. By default, inferred from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default insights) What to output: insights, chart-data, themes or report.
    #[clap(long, value_parser)]
    pub view: Option<String>,

    /// The period during which the survey was run, as displayed in the insights.
    #[clap(long, value_parser)]
    pub survey_period: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
