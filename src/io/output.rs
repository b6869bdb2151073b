use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use genpdf::{Alignment, Document, Element, Scale, SimplePageDecorator, elements, fonts, style};
use tracing::debug;

/// Fixed document title.
pub const REPORT_TITLE: &str =
    "Relatório de Percepções e Experiências sobre Racismo Estrutural";

/// Fixed introductory paragraph, emitted before any data-derived section.
pub const REPORT_INTRO: &str = "Este relatório apresenta uma análise dos dados coletados \
    sobre a percepção e experiência de discriminação racial no mercado de trabalho. \
    O objetivo é compreender a relação entre a identidade racial dos respondentes e suas \
    experiências e opiniões sobre racismo estrutural e oportunidades de emprego.";

/// TTF family the document is set in; genpdf expects
/// `{name}-{Regular,Bold,Italic,BoldItalic}.ttf` in the font directory.
const FONT_FAMILY: &str = "LiberationSans";

const FONT_DIR_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/liberation-fonts",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts/liberation",
];

/// Scale that takes the 800 px chart raster to the fixed 180 mm embed width.
const CHART_SCALE: f64 = 2.65;

/// Find a directory carrying the report's font family.
pub fn discover_font_dir() -> Option<PathBuf> {
    for dir in FONT_DIR_CANDIDATES {
        let path = Path::new(dir);
        if path.join(format!("{FONT_FAMILY}-Regular.ttf")).exists() {
            return Some(path.to_path_buf());
        }
    }
    None
}

/// The paginated report document.
///
/// Content is appended section by section; the underlying writer breaks
/// pages automatically once content runs past the bottom margin, so nothing
/// here paginates manually.
pub struct PdfReport {
    doc: Document,
}

impl PdfReport {
    /// Open a new report document with the fixed title and introduction.
    ///
    /// `font_dir` overrides font discovery; without it the standard system
    /// font directories are probed.
    pub fn new(font_dir: Option<&Path>) -> Result<Self> {
        let font_dir = match font_dir {
            Some(dir) => dir.to_path_buf(),
            None => discover_font_dir().ok_or_else(|| {
                anyhow!("no {FONT_FAMILY} font family found; pass --font-dir")
            })?,
        };
        let family = fonts::from_files(&font_dir, FONT_FAMILY, None)
            .map_err(|e| anyhow!("failed to load fonts from {:?}: {e}", font_dir))?;

        let mut doc = Document::new(family);
        doc.set_title(REPORT_TITLE);
        doc.set_font_size(12);
        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new(REPORT_TITLE)
                .aligned(Alignment::Center)
                .styled(style::Style::new().bold().with_font_size(16)),
        );
        doc.push(elements::Break::new(1.0));
        doc.push(elements::Paragraph::new(REPORT_INTRO));
        doc.push(elements::Break::new(1.0));

        Ok(PdfReport { doc })
    }

    /// Append a bold section heading.
    pub fn push_heading(&mut self, title: &str) {
        self.doc
            .push(elements::Paragraph::new(title).styled(style::Style::new().bold()));
    }

    /// Append a pre-formatted text body as wrapped paragraphs.
    pub fn push_body(&mut self, body: &str) {
        for line in body.lines() {
            self.doc.push(elements::Paragraph::new(line));
        }
        self.doc.push(elements::Break::new(1.0));
    }

    /// Embed a chart image at the fixed body width, with trailing spacing.
    pub fn embed_chart(&mut self, image_path: &Path) -> Result<()> {
        let image = elements::Image::from_path(image_path)
            .map_err(|e| anyhow!("failed to load chart image {:?}: {e}", image_path))?
            .with_alignment(Alignment::Center)
            .with_scale(Scale::new(CHART_SCALE, CHART_SCALE));
        self.doc.push(image);
        self.doc.push(elements::Break::new(1.0));
        Ok(())
    }

    /// Finalize the document to `path`.
    pub fn write_file(self, path: &Path) -> Result<()> {
        debug!("Rendering PDF to {:?}", path);
        self.doc
            .render_to_file(path)
            .map_err(|e| anyhow!("failed to write report to {:?}: {e}", path))
    }
}
