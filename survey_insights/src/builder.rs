pub use crate::config::*;
use crate::SurveyAggregator;

/// A builder for adding responses.
///
/// ```
/// use survey_insights::builder::Builder;
/// use survey_insights::{Question, QuestionLabels};
///
/// let labels = QuestionLabels {
///     satisfaction: "Rating".to_string(),
///     ..QuestionLabels::default()
/// };
/// let mut builder = Builder::with_labels(&labels).survey_period("Q3 2025");
///
/// builder.add_response(&[("Rating", "4")]);
/// builder.add_response(&[("Rating", "not sure")]);
///
/// let aggregator = builder.build();
/// assert_eq!(aggregator.rating_distribution(Question::Satisfaction).total_responses, 1);
/// ```
pub struct Builder {
    pub(crate) _labels: QuestionLabels,
    pub(crate) _survey_period: String,
    pub(crate) _responses: Vec<Response>,
}

impl Builder {
    /// A builder using the column labels of the hand-off survey.
    pub fn new() -> Builder {
        Builder::with_labels(&QuestionLabels::default())
    }

    pub fn with_labels(labels: &QuestionLabels) -> Builder {
        Builder {
            _labels: labels.clone(),
            _survey_period: DEFAULT_SURVEY_PERIOD.to_string(),
            _responses: Vec::new(),
        }
    }

    pub fn survey_period(self, period: &str) -> Builder {
        Builder {
            _survey_period: period.to_string(),
            ..self
        }
    }

    /// Adds the answers of one participant, as (question label, answer) pairs.
    pub fn add_response(&mut self, answers: &[(&str, &str)]) {
        self.add_response_2(Response::new(answers.iter().cloned()))
    }

    pub fn add_response_2(&mut self, response: Response) {
        self._responses.push(response);
    }

    pub fn build(self) -> SurveyAggregator {
        SurveyAggregator::new(
            ResponseSet::new(self._responses),
            self._labels,
            &self._survey_period,
        )
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}
