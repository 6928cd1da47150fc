//! Plain-text rendition of the survey report.
//!
//! The sections follow the printed report: title, executive summary, methodology,
//! the three charts, the key insights, testimonials and next steps.

use std::fmt::{self, Write};

use survey_insights::{ChartData, ChartSeries, SurveyInsights};

pub const DEFAULT_TITLE: &str = "Resultado da pesquisa sobre Dev Mode";
const SUBTITLE: &str = "Feedback dos desenvolvedores para melhoria contínua";

/// Width of the longest bar of a chart, in characters.
const BAR_WIDTH: usize = 40;

const NEXT_STEPS: [&str; 5] = [
    "Implementar melhorias na documentação de edge cases nos handoffs",
    "Criar sessões de treinamento para otimização do Dev Mode do Figma",
    "Estabelecer padrões mais claros para especificações de telas e componentes",
    "Desenvolver processo de feedback contínuo entre design e desenvolvimento",
    "Organizar workshops mensais de alinhamento e melhores práticas",
];

fn heading(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    writeln!(out)
}

fn bar(count: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let len = ((count as f64) / (max as f64) * (BAR_WIDTH as f64)).round() as usize;
    // A non-zero count always gets a visible bar.
    "#".repeat(if count > 0 { len.max(1) } else { 0 })
}

/// One line per entry: label, bar and value.
fn bar_chart(entries: &[(String, u64)], suffix: impl Fn(u64) -> String) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(l, _)| l.chars().count())
        .max()
        .unwrap_or(0);
    let max = entries.iter().map(|(_, c)| *c).max().unwrap_or(0);
    entries
        .iter()
        .map(|(label, count)| {
            format!(
                "  {:<width$} | {} {}",
                label,
                bar(*count, max),
                suffix(*count),
                width = label_width
            )
        })
        .collect()
}

fn chart_entries(cd: &ChartData) -> Vec<(String, u64)> {
    cd.labels.iter().cloned().zip(cd.data.iter().cloned()).collect()
}

fn push_lines(out: &mut String, lines: &[String]) -> fmt::Result {
    for l in lines {
        writeln!(out, "{}", l)?;
    }
    Ok(())
}

/// A table with a header row, columns padded to the widest cell.
fn table(rows: &[[String; 3]]) -> Vec<String> {
    let mut widths = [0usize; 3];
    for row in rows.iter() {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    let separator = format!(
        "+-{}-+-{}-+-{}-+",
        "-".repeat(widths[0]),
        "-".repeat(widths[1]),
        "-".repeat(widths[2])
    );
    let mut lines = vec![separator.clone()];
    for (idx, row) in rows.iter().enumerate() {
        lines.push(format!(
            "| {:<w0$} | {:<w1$} | {:<w2$} |",
            row[0],
            row[1],
            row[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        ));
        if idx == 0 {
            lines.push(separator.clone());
        }
    }
    lines.push(separator);
    lines
}

pub fn render_report(
    title: Option<&str>,
    si: &SurveyInsights,
    charts: &ChartSeries,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    // Title page
    writeln!(out, "{}", title.unwrap_or(DEFAULT_TITLE))?;
    writeln!(out, "{}", SUBTITLE)?;

    heading(&mut out, "Resumo Executivo")?;
    writeln!(
        out,
        "Esta pesquisa foi realizada com {} desenvolvedores frontend em {}, \
         com o objetivo de avaliar os processos de handoff, preferências de ferramentas e a eficácia do Dev Mode do Figma. \
         Os resultados mostram uma satisfação média de {} com o Dev Mode, \
         com {} sendo a IDE mais utilizada por {} desenvolvedores.",
        si.total_responses,
        si.survey_date,
        si.avg_satisfaction,
        si.top_ide.label,
        si.top_ide.count
    )?;

    heading(&mut out, "Metodologia")?;
    writeln!(
        out,
        "A coleta de dados focou em identificar pontos de melhoria nos processos atuais e entender as necessidades \
         dos desenvolvedores para otimizar a colaboração entre design e desenvolvimento. Foram coletadas \
         {} respostas através de questionário estruturado abordando:",
        si.total_responses
    )?;
    for topic in [
        "Preferências de IDEs e ferramentas",
        "Avaliação do Dev Mode do Figma",
        "Aspectos positivos e negativos dos handoffs",
        "Sugestões de melhorias",
    ] {
        writeln!(out, "  * {}", topic)?;
    }

    heading(&mut out, "IDEs Mais Utilizadas")?;
    push_lines(
        &mut out,
        &bar_chart(&chart_entries(&charts.ide_chart), |c| c.to_string()),
    )?;

    heading(&mut out, "Satisfação com Dev Mode do Figma")?;
    let ratings = chart_entries(&charts.satisfaction_chart);
    let total: u64 = ratings.iter().map(|(_, c)| *c).sum();
    push_lines(
        &mut out,
        &bar_chart(&ratings, |c| {
            format!("{} ({:.1}%)", c, 100.0 * (c as f64) / (total.max(1) as f64))
        }),
    )?;

    heading(&mut out, "Análise de Feedback")?;
    writeln!(out, "Gostam:")?;
    push_lines(
        &mut out,
        &bar_chart(&chart_entries(&charts.feedback_chart.likes), |c| {
            format!("+{}", c)
        }),
    )?;
    writeln!(out, "Não gostam:")?;
    push_lines(
        &mut out,
        &bar_chart(&chart_entries(&charts.feedback_chart.dislikes), |c| {
            format!("-{}", c)
        }),
    )?;

    heading(&mut out, "Insights Principais")?;
    let rows = [
        [
            "Aspecto".to_string(),
            "Resultado".to_string(),
            "Impacto".to_string(),
        ],
        [
            "IDE Dominante".to_string(),
            format!("{} ({} devs)", si.top_ide.label, si.top_ide.count),
            "Padronização de ferramentas".to_string(),
        ],
        [
            "Aspecto Mais Valorizado".to_string(),
            format!("{} ({} menções)", si.top_like.label, si.top_like.count),
            "Foco em comunicação clara".to_string(),
        ],
        [
            "Principal Desafio".to_string(),
            format!("{} ({} menções)", si.top_dislike.label, si.top_dislike.count),
            "Área prioritária de melhoria".to_string(),
        ],
        [
            "Satisfação Dev Mode".to_string(),
            format!("Nota {}/5", si.avg_satisfaction),
            "Boa aceitação da ferramenta".to_string(),
        ],
    ];
    push_lines(&mut out, &table(&rows))?;

    if !si.quotes.is_empty() {
        heading(&mut out, "Depoimentos dos Desenvolvedores")?;
        for q in si.quotes.iter() {
            writeln!(out, "\"{}\"", q.text)?;
            writeln!(out, "  - {}", q.name)?;
            writeln!(out)?;
        }
    }

    heading(&mut out, "Próximos Passos")?;
    for (i, step) in NEXT_STEPS.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, step)?;
    }

    writeln!(out)?;
    writeln!(out, "Relatório gerado em: {}", si.report_date)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_insights::{builder::Builder, NaiveDate};

    fn report_for(builder: Builder) -> String {
        let agg = builder.build();
        let day = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        render_report(None, &agg.survey_insights_on(day), &agg.chart_series()).unwrap()
    }

    #[test]
    fn empty_survey_report() {
        let report = report_for(Builder::new());
        assert!(report.starts_with(DEFAULT_TITLE));
        assert!(report.contains("realizada com 0 desenvolvedores"));
        assert!(report.contains("Visual Studio Code (0 devs)"));
        assert!(report.contains("Edge cases (0 menções)"));
        assert!(!report.contains("Depoimentos dos Desenvolvedores"));
        assert!(report.contains("5. Organizar workshops"));
        assert!(report.ends_with("Relatório gerado em: 02 de May de 2025\n"));
    }

    #[test]
    fn report_with_quotes_and_charts() {
        let mut b = Builder::new();
        let labels = survey_insights::QuestionLabels::default();
        b.add_response(&[
            (labels.name.as_str(), "Ana"),
            (labels.ide.as_str(), "VS Code"),
            (labels.satisfaction.as_str(), "4"),
            (labels.likes.as_str(), "clareza"),
            (labels.feedback.as_str(), "Os handoffs estão bem mais claros"),
        ]);
        b.add_response(&[
            (labels.ide.as_str(), "VS Code"),
            (labels.satisfaction.as_str(), "5"),
        ]);
        let report = report_for(b);
        assert!(report.contains("\"Os handoffs estão bem mais claros\"\n  - Ana"));
        assert!(report.contains(&format!("  VS Code | {} 2", "#".repeat(BAR_WIDTH))));
        assert!(report.contains("1 (50.0%)"));
        assert!(report.contains("Nota 4.5/5"));
    }

    #[test]
    fn bars_are_scaled() {
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(10, 10).len(), BAR_WIDTH);
        assert_eq!(bar(5, 10).len(), BAR_WIDTH / 2);
        assert_eq!(bar(1, 1000).len(), 1);
        assert_eq!(bar(3, 0), "");
    }

    #[test]
    fn table_columns_are_aligned() {
        let rows = [
            ["a".to_string(), "bb".to_string(), "c".to_string()],
            ["ção".to_string(), "d".to_string(), "eeee".to_string()],
        ];
        let lines = table(&rows);
        assert_eq!(lines.len(), 5);
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }
}
