// ********* Input data structures ***********

use std::collections::HashMap;

/// The answers of one participant, keyed by the question label (the header of the column).
///
/// Any field may be missing. Looking up a label that was not answered returns an empty string.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Response {
    fields: HashMap<String, String>,
}

impl Response {
    /// Builds a response from (label, answer) pairs. If a label appears multiple times,
    /// the last answer is kept.
    pub fn new<I, K, V>(fields: I) -> Response
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Response {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, label: &str) -> &str {
        self.fields.get(label).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All the responses of a survey, in the order of the source file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ResponseSet {
    responses: Vec<Response>,
}

impl ResponseSet {
    pub fn new(responses: Vec<Response>) -> ResponseSet {
        ResponseSet { responses }
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn as_slice(&self) -> &[Response] {
        &self.responses
    }
}

impl From<Vec<Response>> for ResponseSet {
    fn from(responses: Vec<Response>) -> ResponseSet {
        ResponseSet::new(responses)
    }
}

impl FromIterator<Response> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = Response>>(iter: I) -> ResponseSet {
        ResponseSet::new(iter.into_iter().collect())
    }
}

/// The questions of the survey that the insights are built from.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Question {
    /// The name of the participant.
    Name,
    /// The IDE the participant works with.
    Ide,
    /// A rating of the Figma Dev Mode, as an integer.
    Satisfaction,
    /// What the participant likes the most, as a comma-separated list.
    Likes,
    /// What the participant likes the least, as a comma-separated list.
    Dislikes,
    /// Free-form feedback.
    Feedback,
    /// Free-form suggestions of improvements.
    Suggestions,
}

impl Question {
    pub const ALL: [Question; 7] = [
        Question::Name,
        Question::Ide,
        Question::Satisfaction,
        Question::Likes,
        Question::Dislikes,
        Question::Feedback,
        Question::Suggestions,
    ];
}

/// Maps each question to the label of its column in the response file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionLabels {
    pub name: String,
    pub ide: String,
    pub satisfaction: String,
    pub likes: String,
    pub dislikes: String,
    pub feedback: String,
    pub suggestions: String,
}

impl QuestionLabels {
    pub fn label(&self, question: Question) -> &str {
        match question {
            Question::Name => &self.name,
            Question::Ide => &self.ide,
            Question::Satisfaction => &self.satisfaction,
            Question::Likes => &self.likes,
            Question::Dislikes => &self.dislikes,
            Question::Feedback => &self.feedback,
            Question::Suggestions => &self.suggestions,
        }
    }
}

impl Default for QuestionLabels {
    /// The column headers of the Google Forms export of the hand-off survey.
    fn default() -> Self {
        QuestionLabels {
            name: "Nome".to_string(),
            ide: "Com quais IDEs você trabalha na frete?".to_string(),
            satisfaction: "O Dev Mode do Figma facilita o entendimento dos fluxos?".to_string(),
            likes: "Do que você MAIS GOSTA nos Handoffs?".to_string(),
            dislikes: "Do que você MENOS GOSTA nos Handoffs?".to_string(),
            feedback: "Fala que eu te escuto".to_string(),
            suggestions: "Você tem alguma sugestões de melhorias para o handoff?".to_string(),
        }
    }
}

// ******** Output data structures *********

/// A counter of free-text values.
///
/// The entries are kept in the order in which each value was first seen.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Tally {
    entries: Vec<(String, u64)>,
    positions: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Tally {
        Tally::default()
    }

    pub fn add(&mut self, key: &str) {
        self.add_count(key, 1)
    }

    pub fn add_count(&mut self, key: &str, count: u64) {
        match self.positions.get(key) {
            Some(idx) => self.entries[*idx].1 += count,
            None => {
                self.positions.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), count));
            }
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.positions
            .get(key)
            .map(|idx| self.entries[*idx].1)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sum of all the counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, c)| *c).collect()
    }

    /// The entry with the highest count. Among equal counts, the first one seen wins.
    pub fn top(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (k, c) in self.entries.iter() {
            match best {
                Some((_, bc)) if bc >= *c => {}
                _ => best = Some((k.as_str(), *c)),
            }
        }
        best
    }

    /// The `n` entries with the highest counts, by decreasing count.
    /// Ties keep the order in which the values were first seen.
    pub fn most_common(&self, n: usize) -> Tally {
        let mut sorted: Vec<&(String, u64)> = self.entries.iter().collect();
        // Stable sort: equal counts stay in insertion order.
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        let mut res = Tally::new();
        for (k, c) in sorted.into_iter().take(n) {
            res.add_count(k, *c);
        }
        res
    }
}

impl<'a> FromIterator<&'a str> for Tally {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Tally {
        let mut t = Tally::new();
        for k in iter {
            t.add(k);
        }
        t
    }
}

/// The distribution of the valid integer ratings.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RatingDistribution {
    /// (rating, number of occurences), in the order the ratings were first seen.
    pub ratings: Vec<(u128, u64)>,
    /// The mean of all the valid ratings, or 0 if there are none.
    pub average: f64,
    /// The number of valid ratings.
    pub total_responses: u64,
}

/// The most frequent items mentioned as positive and as negative.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ThemeTally {
    pub likes: Tally,
    pub dislikes: Tally,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Quote {
    pub name: String,
    pub text: String,
    /// URL of a generated avatar picture for this participant.
    pub avatar: String,
}

/// A label with its count, as highlighted in the insights.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TopEntry {
    pub label: String,
    pub count: u64,
}

impl TopEntry {
    pub fn new(label: &str, count: u64) -> TopEntry {
        TopEntry {
            label: label.to_string(),
            count,
        }
    }
}

/// The summary presented on the dashboard and in the report.
#[derive(PartialEq, Debug, Clone)]
pub struct SurveyInsights {
    pub total_responses: usize,
    pub survey_date: String,
    /// Rounded to one decimal place.
    pub avg_satisfaction: f64,
    pub top_ide: TopEntry,
    pub top_like: TopEntry,
    pub top_dislike: TopEntry,
    pub quotes: Vec<Quote>,
    pub report_date: String,
}

/// A labelled series of values, with the colors to use for each position.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
    pub background_color: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FeedbackChart {
    pub likes: ChartData,
    pub dislikes: ChartData,
}

/// The data behind the three charts of the dashboard.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ChartSeries {
    pub ide_chart: ChartData,
    pub satisfaction_chart: ChartData,
    pub feedback_chart: FeedbackChart,
}

// ********* Configuration **********

/// The period during which the survey was run.
pub const DEFAULT_SURVEY_PERIOD: &str = "Março-Abril 2025";

/// Substituted when no IDE was reported.
pub const FALLBACK_IDE: &str = "Visual Studio Code";
/// Substituted when no positive item was reported.
pub const FALLBACK_LIKE: &str = "Clareza nos fluxos";
/// Substituted when no negative item was reported.
pub const FALLBACK_DISLIKE: &str = "Edge cases";

pub const IDE_PALETTE: [&str; 4] = ["#2563EB", "#3B82F6", "#60A5FA", "#93C5FD"];
pub const SATISFACTION_PALETTE: [&str; 5] = ["#EF4444", "#F97316", "#EAB308", "#22C55E", "#10B981"];

/// Number of items kept in each side of the theme tally.
pub const MAX_THEMES: usize = 5;
/// Number of quotes surfaced.
pub const MAX_QUOTES: usize = 3;
/// A quote must be strictly longer than this (in characters).
pub const QUOTE_MIN_CHARS: usize = 20;
/// Longer quotes are cut to this many characters.
pub const QUOTE_MAX_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";

pub const REPORT_DATE_FORMAT: &str = "%d de %B de %Y";
