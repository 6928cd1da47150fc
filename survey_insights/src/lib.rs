/*!
Aggregation of survey responses.

The responses of a survey (one [`Response`] per participant, typically one row of
a Google Forms export) are summarized into a few statistics:
- preference tallies: how many participants gave each answer to a question,
- rating distributions: the counts and the mean of integer ratings,
- feedback themes: the most frequent items in comma-separated lists of likes and dislikes,
- quotes: the first few meaningful free-text answers, with the name of the participant.

```
use survey_insights::builder::Builder;
use survey_insights::Question;

let mut builder = Builder::new();
builder.add_response(&[("Nome", "Ana"), ("Com quais IDEs você trabalha na frete?", "VS Code")]);
builder.add_response(&[("Nome", "Bia"), ("Com quais IDEs você trabalha na frete?", "Vim")]);
builder.add_response(&[("Com quais IDEs você trabalha na frete?", " VS Code ")]);
let aggregator = builder.build();

let ides = aggregator.preference_tally(Question::Ide);
assert_eq!(ides.get("VS Code"), 2);
assert_eq!(aggregator.survey_insights().top_ide.label, "VS Code");
```

See the [manual] for the input formats and the command line program.
*/

pub mod builder;
mod config;
pub mod manual;

use chrono::Local;
use log::{debug, info};

pub use crate::config::*;
pub use chrono::NaiveDate;

/// Counts the non-empty answers to the question with the given label.
///
/// Answers are trimmed. No other normalization is done: different spellings are different entries.
pub fn preference_tally(responses: &[Response], label: &str) -> Tally {
    let tally: Tally = responses
        .iter()
        .map(|r| r.get(label).trim())
        .filter(|s| !s.is_empty())
        .collect();
    debug!(
        "preference_tally: {:?}: {} distinct answers",
        label,
        tally.len()
    );
    tally
}

/// Collects the integer ratings given to the question with the given label.
///
/// Only answers made of decimal digits count. Anything else (text, empty, negative numbers)
/// is skipped and does not contribute to the average.
pub fn rating_distribution(responses: &[Response], label: &str) -> RatingDistribution {
    let mut ratings: Vec<u128> = Vec::new();
    for r in responses.iter() {
        let s = r.get(label).trim();
        if !is_decimal(s) {
            continue;
        }
        match s.parse::<u128>() {
            Ok(x) => ratings.push(x),
            Err(e) => {
                debug!("rating_distribution: skipping rating {:?}: {}", s, e);
            }
        }
    }

    let mut counts: Vec<(u128, u64)> = Vec::new();
    for x in ratings.iter() {
        match counts.iter_mut().find(|(k, _)| k == x) {
            Some((_, c)) => *c += 1,
            None => counts.push((*x, 1)),
        }
    }

    let total_responses = ratings.len() as u64;
    let average = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().map(|x| *x as f64).sum::<f64>() / (total_responses as f64)
    };
    RatingDistribution {
        ratings: counts,
        average,
        total_responses,
    }
}

/// Tallies the comma-separated items of the like and dislike answers, and keeps
/// the most frequent ones for each side.
pub fn theme_tally(responses: &[Response], like_label: &str, dislike_label: &str) -> ThemeTally {
    let mut likes = Tally::new();
    let mut dislikes = Tally::new();
    for r in responses.iter() {
        for item in split_items(r.get(like_label)) {
            likes.add(item);
        }
        for item in split_items(r.get(dislike_label)) {
            dislikes.add(item);
        }
    }
    debug!(
        "theme_tally: {} distinct likes, {} distinct dislikes",
        likes.len(),
        dislikes.len()
    );
    ThemeTally {
        likes: likes.most_common(MAX_THEMES),
        dislikes: dislikes.most_common(MAX_THEMES),
    }
}

/// Picks the first quotes from participants who left a name and some meaningful text.
///
/// For each participant, the longer of the feedback and the suggestions is used.
/// The feedback is only used if it is strictly longer than the suggestions.
pub fn top_quotes(
    responses: &[Response],
    name_label: &str,
    feedback_label: &str,
    suggestions_label: &str,
) -> Vec<Quote> {
    let mut quotes: Vec<Quote> = Vec::new();
    for r in responses.iter() {
        if quotes.len() >= MAX_QUOTES {
            break;
        }
        let name = r.get(name_label).trim();
        let feedback = r.get(feedback_label).trim();
        let suggestions = r.get(suggestions_label).trim();
        if name.is_empty() || (feedback.is_empty() && suggestions.is_empty()) {
            continue;
        }
        let text = if feedback.chars().count() > suggestions.chars().count() {
            feedback
        } else {
            suggestions
        };
        if text.chars().count() <= QUOTE_MIN_CHARS {
            debug!("top_quotes: skipping short quote from {:?}", name);
            continue;
        }
        quotes.push(Quote {
            name: name.to_string(),
            text: truncate_quote(text),
            avatar: avatar_url(name),
        });
    }
    quotes
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn split_items(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(|item| item.trim()).filter(|item| !item.is_empty())
}

fn truncate_quote(text: &str) -> String {
    if text.chars().count() > QUOTE_MAX_CHARS {
        let head: String = text.chars().take(QUOTE_MAX_CHARS).collect();
        format!("{}{}", head, ELLIPSIS)
    } else {
        text.to_string()
    }
}

fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=2563EB&color=fff",
        name.replace(' ', "+")
    )
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn top_or(tally: &Tally, fallback: &str) -> TopEntry {
    match tally.top() {
        Some((label, count)) => TopEntry::new(label, count),
        None => TopEntry::new(fallback, 0),
    }
}

fn chart_data(tally: &Tally, palette: &[&str]) -> ChartData {
    ChartData {
        labels: tally.labels(),
        data: tally.counts(),
        background_color: palette.iter().map(|c| c.to_string()).collect(),
    }
}

/// Answers all the queries of the dashboard and of the report over a fixed set of responses.
///
/// The responses are never modified after construction: all the queries take `&self` and
/// return the same result when called again (except for the date of the report).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyAggregator {
    responses: ResponseSet,
    labels: QuestionLabels,
    survey_period: String,
}

impl SurveyAggregator {
    pub fn new(
        responses: ResponseSet,
        labels: QuestionLabels,
        survey_period: &str,
    ) -> SurveyAggregator {
        info!(
            "Aggregating {} survey responses for period {:?}",
            responses.len(),
            survey_period
        );
        SurveyAggregator {
            responses,
            labels,
            survey_period: survey_period.to_string(),
        }
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn survey_period(&self) -> &str {
        &self.survey_period
    }

    fn label(&self, question: Question) -> &str {
        self.labels.label(question)
    }

    pub fn preference_tally(&self, question: Question) -> Tally {
        preference_tally(self.responses.as_slice(), self.label(question))
    }

    pub fn rating_distribution(&self, question: Question) -> RatingDistribution {
        rating_distribution(self.responses.as_slice(), self.label(question))
    }

    pub fn theme_tally(&self, likes: Question, dislikes: Question) -> ThemeTally {
        theme_tally(
            self.responses.as_slice(),
            self.label(likes),
            self.label(dislikes),
        )
    }

    /// The theme tally of the like and dislike questions.
    pub fn feedback_themes(&self) -> ThemeTally {
        self.theme_tally(Question::Likes, Question::Dislikes)
    }

    pub fn top_quotes(&self) -> Vec<Quote> {
        top_quotes(
            self.responses.as_slice(),
            self.label(Question::Name),
            self.label(Question::Feedback),
            self.label(Question::Suggestions),
        )
    }

    /// The insights, dated today.
    pub fn survey_insights(&self) -> SurveyInsights {
        self.survey_insights_on(Local::now().date_naive())
    }

    /// The insights, with the report dated at the given day.
    pub fn survey_insights_on(&self, report_day: NaiveDate) -> SurveyInsights {
        let ides = self.preference_tally(Question::Ide);
        let satisfaction = self.rating_distribution(Question::Satisfaction);
        let themes = self.feedback_themes();

        SurveyInsights {
            total_responses: self.responses.len(),
            survey_date: self.survey_period.clone(),
            avg_satisfaction: round_one_decimal(satisfaction.average),
            top_ide: top_or(&ides, FALLBACK_IDE),
            top_like: top_or(&themes.likes, FALLBACK_LIKE),
            top_dislike: top_or(&themes.dislikes, FALLBACK_DISLIKE),
            quotes: self.top_quotes(),
            report_date: report_day.format(REPORT_DATE_FORMAT).to_string(),
        }
    }

    pub fn chart_series(&self) -> ChartSeries {
        let ides = self.preference_tally(Question::Ide);
        let satisfaction = self.rating_distribution(Question::Satisfaction);
        let themes = self.feedback_themes();

        let satisfaction_chart = ChartData {
            labels: satisfaction
                .ratings
                .iter()
                .map(|(k, _)| format!("Rating {}", k))
                .collect(),
            data: satisfaction.ratings.iter().map(|(_, c)| *c).collect(),
            background_color: SATISFACTION_PALETTE.iter().map(|c| c.to_string()).collect(),
        };

        let likes = themes.likes.most_common(MAX_THEMES);
        let dislikes = themes.dislikes.most_common(MAX_THEMES);
        ChartSeries {
            ide_chart: chart_data(&ides, &IDE_PALETTE),
            satisfaction_chart,
            feedback_chart: FeedbackChart {
                likes: chart_data(&likes, &[]),
                dislikes: chart_data(&dislikes, &[]),
            },
        }
    }
}
