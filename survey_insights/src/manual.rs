/*!

This is the long-form manual for `survey_insights` and the `survey-insights` program.

## Input formats

The responses are read from a spreadsheet export of the survey form. The first row contains the
questions (the column labels), every following row contains the answers of one participant.

The following formats are supported:
* `csv` Comma Separated Values, UTF-8 encoded, with the usual quoting rules
* `xlsx` Excel workbook, as exported by Google Forms or Microsoft Forms

When the input type is not given, files ending with `.xlsx` are read as Excel workbooks and
everything else as CSV.

The reading is lenient:
- a missing file is reported in the logs and treated as a survey without responses,
- a file that cannot be parsed is reported in the logs and treated as a survey without responses,
- a row with fewer cells than the header simply has no answer for the last questions,
- any answer that is missing or blank is ignored by the statistics that use it.

### `xlsx`

If the workbook has more than one worksheet, the name of the worksheet must be given with
the `excelWorksheetName` option or the `--excel-worksheet-name` flag.
Numbers are turned into text: `4.0` reads as `4`, so that ratings stored as numbers are counted.

## Questions

The statistics use seven questions. Each of them is found by the exact label of its column:

| question      | default label                                              |
|---------------|------------------------------------------------------------|
| `name`        | `Nome`                                                     |
| `ide`         | `Com quais IDEs você trabalha na frete?`                   |
| `satisfaction`| `O Dev Mode do Figma facilita o entendimento dos fluxos?`  |
| `likes`       | `Do que você MAIS GOSTA nos Handoffs?`                     |
| `dislikes`    | `Do que você MENOS GOSTA nos Handoffs?`                    |
| `feedback`    | `Fala que eu te escuto`                                    |
| `suggestions` | `Você tem alguma sugestões de melhorias para o handoff?`   |

The `likes` and `dislikes` answers are lists of items separated by commas. The `satisfaction`
answer is an integer rating; any other answer is left out of the average.

## Configuration

All the options can be grouped in a JSON file passed with `--config`. Every field is optional.
Relative paths are resolved from the directory of the configuration file.

```json
{
  "surveySettings": {
    "surveyName": "Handoff 2025",
    "surveyPeriod": "Março-Abril 2025"
  },
  "responseSource": {
    "provider": "csv",
    "filePath": "respostas.csv"
  },
  "questions": {
    "ide": "Which IDE do you use?",
    "satisfaction": "How useful is Dev Mode?"
  }
}
```

The `--input` and `--input-type` flags take precedence over the `responseSource` section.

## Views

The `--view` flag selects what is produced:
* `insights` (default): the summary of the dashboard, as JSON
* `chart-data`: the series behind the three charts (IDEs, satisfaction, feedback), as JSON
* `themes`: the five most frequent likes and dislikes, as JSON lists of `[item, count]`
  pairs, the most frequent first
* `report`: a text report with an executive summary, the charts, the key insights,
  some testimonials and the next steps

If the insights or the chart data cannot be produced, a JSON object with an `error` field is
written instead and the program exits with an error status.

The JSON views can be checked against a previous output with `--reference`. The date of the
report is not compared.

```bash
survey-insights -i respostas.csv --view chart-data --reference expected_chart_data.json
```

*/
