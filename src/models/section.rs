use crate::models::Field;

/// One titled block of the report. Section order is page order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: String,
    pub content: SectionContent,
}

/// What a section carries below its heading.
///
/// A tagged variant instead of a pair of options, so the renderer's
/// branching is exhaustive.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    /// Pre-formatted text body
    Text(String),
    /// Bar chart over a field's frequency counts
    Chart(ChartSpec),
    /// Text body followed by a chart
    TextAndChart { body: String, chart: ChartSpec },
}

/// Specification of a bar chart: the field to count and the chart title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSpec {
    pub field: Field,
    pub title: &'static str,
}

impl ReportSection {
    pub fn text(title: &str, body: String) -> Self {
        ReportSection {
            title: title.to_string(),
            content: SectionContent::Text(body),
        }
    }

    pub fn chart(title: &str, field: Field, chart_title: &'static str) -> Self {
        ReportSection {
            title: title.to_string(),
            content: SectionContent::Chart(ChartSpec {
                field,
                title: chart_title,
            }),
        }
    }
}
