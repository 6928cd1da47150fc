use crate::insights::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveySettings {
    #[serde(rename = "surveyName")]
    pub survey_name: Option<String>,
    #[serde(rename = "surveyPeriod")]
    pub survey_period: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

/// The labels of the columns for each question. Missing labels use the defaults of the hand-off survey.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionsConfig {
    pub name: Option<String>,
    pub ide: Option<String>,
    pub satisfaction: Option<String>,
    pub likes: Option<String>,
    pub dislikes: Option<String>,
    pub feedback: Option<String>,
    pub suggestions: Option<String>,
}

impl QuestionsConfig {
    pub fn to_labels(&self) -> QuestionLabels {
        let d = QuestionLabels::default();
        let pick = |x: &Option<String>, default: String| x.clone().unwrap_or(default);
        QuestionLabels {
            name: pick(&self.name, d.name),
            ide: pick(&self.ide, d.ide),
            satisfaction: pick(&self.satisfaction, d.satisfaction),
            likes: pick(&self.likes, d.likes),
            dislikes: pick(&self.dislikes, d.dislikes),
            feedback: pick(&self.feedback, d.feedback),
            suggestions: pick(&self.suggestions, d.suggestions),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(rename = "surveySettings", default)]
    pub survey_settings: SurveySettings,
    #[serde(rename = "responseSource", default)]
    pub response_source: ResponseSource,
    #[serde(default)]
    pub questions: QuestionsConfig,
}

pub fn read_config(path: &str) -> InsightsResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Reads a previous output. The date of the report is removed because it changes every day.
pub fn read_reference(path: &str) -> InsightsResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(strip_report_date(js))
}

pub fn strip_report_date(mut js: JSValue) -> JSValue {
    if let Some(obj) = js.as_object_mut() {
        obj.remove("report_date");
    }
    js
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: SurveyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SurveyConfig::default());
        assert_eq!(config.questions.to_labels(), QuestionLabels::default());
    }

    #[test]
    fn partial_questions() {
        let config: SurveyConfig = serde_json::from_str(
            r#"{
                "responseSource": {"filePath": "answers.xlsx", "excelWorksheetName": "Form1"},
                "questions": {"ide": "Which IDE?", "likes": "Likes"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.response_source.file_path.as_deref(), Some("answers.xlsx"));
        assert_eq!(config.response_source.provider, None);
        let labels = config.questions.to_labels();
        assert_eq!(labels.ide, "Which IDE?");
        assert_eq!(labels.likes, "Likes");
        assert_eq!(labels.name, "Nome");
    }

    #[test]
    fn strips_report_date() {
        let js = strip_report_date(serde_json::json!({"report_date": "1 de May de 2025", "total_responses": 2}));
        assert_eq!(js, serde_json::json!({"total_responses": 2}));
    }

    #[test]
    fn missing_config_file() {
        let res = read_config("/nonexistent/config.json");
        assert!(matches!(res, Err(InsightsError::OpeningJson { .. })));
    }
}
