pub mod charts;
pub mod io;
pub mod models;
pub mod stages;

pub use charts::render_bar_chart;
pub use io::{InputError, PdfReport, discover_font_dir, load_survey_file, load_survey_reader};
pub use models::{
    ChartSpec, Field, RacialGroup, ReportSection, ResponseTable, SectionContent, SurveyResponse,
};
pub use stages::{
    ClassifiedRow, ClassifiedTable, RenderConfig, RenderResult, build_report_sections, classify,
    execute_render, format_grouped_counts, normalize, percentage_distribution, value_counts,
};
