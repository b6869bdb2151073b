use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::charts::render_bar_chart;
use crate::io::output::PdfReport;
use crate::models::{ChartSpec, Field, RacialGroup, ReportSection, SectionContent};
use crate::stages::stage1_classify::ClassifiedTable;
use crate::stages::stage2_aggregate::{
    format_counts, format_grouped_counts, format_percentages, percentage_distribution,
    value_counts,
};

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Where the finished document is written
    pub output_path: PathBuf,
    /// Directory carrying the TTF font family; discovered when absent
    pub font_dir: Option<PathBuf>,
}

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct RenderResult {
    pub output_path: PathBuf,
    pub sections: usize,
    pub charts_rendered: usize,
}

/// Prefix of transient chart image files.
const CHART_FILE_PREFIX: &str = "retrato-chart-";

/// Build the report's sections in page order.
///
/// Pure over the classified table, so the same input always produces the
/// same document content.
pub fn build_report_sections(table: &ClassifiedTable) -> Vec<ReportSection> {
    let employed_share = percentage_distribution(table, Field::InseridoMercadoTrabalho, |row| {
        row.group == RacialGroup::PretosEPardos
    });

    vec![
        ReportSection::text(
            "Faixas Etárias dos Respondentes:",
            format_counts(&value_counts(table, Field::FaixaEtaria)),
        ),
        ReportSection::text(
            "Contagem de Raça dos Participantes:",
            format_counts(&value_counts(table, Field::GrupoRacial)),
        ),
        ReportSection::text(
            "Porcentagem de Pretos e Pardos no Mercado de Trabalho:",
            format_percentages(&employed_share),
        ),
        ReportSection::text(
            "Conhecimento sobre Racismo Estrutural (Pretos e Pardos vs Brancos e Outros):",
            format_grouped_counts(table, Field::ConhecimentoRacismoEstrutural),
        ),
        ReportSection::text(
            "Nível de Entendimento sobre Racismo Estrutural por Raça:",
            format_grouped_counts(table, Field::NivelEntendimentoRacismoEstrutural),
        ),
        ReportSection::text(
            "Sentimento de Discriminação Racial ou Conhecimento de Alguém que Tenha Sofrido:",
            format_grouped_counts(table, Field::SentiuConheceDiscriminacaoRacial),
        ),
        ReportSection::text(
            "Opinião sobre a Influência da Estrutura Social nas Oportunidades de Emprego:",
            format_grouped_counts(table, Field::OpiniaoInfluenciaEstruturaSocial),
        ),
        ReportSection::chart(
            "Métricas de Experiência de Trabalho:",
            Field::ExperienciaDiscriminacaoTrabalho,
            "Experiência de Discriminação no Mercado de Trabalho",
        ),
        ReportSection::chart(
            "Métricas de Competências:",
            Field::PossuiCompetenciasAtualizadas,
            "Competências Atualizadas",
        ),
        ReportSection::chart(
            "Métricas de Busca de Oportunidades:",
            Field::SabeBuscarOportunidades,
            "Busca de Oportunidades",
        ),
    ]
}

/// Execute Stage 3: Render the report document.
///
/// Opens the document with the fixed title and introduction, then walks the
/// sections in order: heading, body text if present, chart if present. Each
/// chart is rendered to a transient image, embedded, and removed before the
/// next section starts. Any failure aborts with no partial document.
pub fn execute_render(table: &ClassifiedTable, config: &RenderConfig) -> Result<RenderResult> {
    let sections = build_report_sections(table);
    let mut report = PdfReport::new(config.font_dir.as_deref())?;

    let mut charts_rendered = 0;
    for section in &sections {
        report.push_heading(&section.title);
        match &section.content {
            SectionContent::Text(body) => report.push_body(body),
            SectionContent::Chart(chart) => {
                render_and_embed(&mut report, table, chart)?;
                charts_rendered += 1;
            }
            SectionContent::TextAndChart { body, chart } => {
                report.push_body(body);
                render_and_embed(&mut report, table, chart)?;
                charts_rendered += 1;
            }
        }
    }

    report.write_file(&config.output_path)?;
    info!(
        "Report with {} sections ({} charts) written to {:?}",
        sections.len(),
        charts_rendered,
        config.output_path
    );

    Ok(RenderResult {
        output_path: config.output_path.clone(),
        sections: sections.len(),
        charts_rendered,
    })
}

/// Render one chart to a transient file and embed it.
///
/// The file handle removes the image when it goes out of scope, so cleanup
/// happens per chart even when rendering or embedding fails.
fn render_and_embed(
    report: &mut PdfReport,
    table: &ClassifiedTable,
    spec: &ChartSpec,
) -> Result<()> {
    let counts = value_counts(table, spec.field);
    let file = tempfile::Builder::new()
        .prefix(CHART_FILE_PREFIX)
        .suffix(".png")
        .tempfile()
        .context("failed to create transient chart file")?;

    render_bar_chart(&counts, spec.field.name(), spec.title, file.path())?;
    report.embed_chart(file.path())?;
    file.close()
        .context("failed to remove transient chart file")?;
    Ok(())
}
