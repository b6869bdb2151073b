//! Charting backend: frequency counts rendered as vertical bar charts.

use std::path::Path;

use anyhow::{Result, anyhow};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;

/// Fixed raster size of every chart (8x6 units at 100 px per unit).
pub const CHART_WIDTH_PX: u32 = 800;
pub const CHART_HEIGHT_PX: u32 = 600;

/// Fixed bar color (sky blue).
const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);

/// Render a frequency table as a vertical bar chart PNG at `path`.
///
/// Answers run along the x axis in the (ascending) order they arrive in,
/// counts along the y axis. An empty frequency table still renders a chart
/// with caption and axes, just without bars.
pub fn render_bar_chart(
    counts: &[(String, usize)],
    x_label: &str,
    title: &str,
    path: &Path,
) -> Result<()> {
    let root =
        BitMapBackend::new(path, (CHART_WIDTH_PX, CHART_HEIGHT_PX)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("failed to fill chart canvas: {e}"))?;

    let slots = counts.len().max(1) as i32;
    let max_count = counts
        .iter()
        .map(|&(_, count)| count)
        .max()
        .unwrap_or(0)
        .max(1) as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d((0..slots).into_segmented(), 0..max_count)
        .map_err(|e| anyhow!("failed to lay out chart: {e}"))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_label)
        .y_desc("Contagem")
        .x_labels(counts.len().max(1))
        .x_label_formatter(&|coord| match coord {
            SegmentValue::Exact(index) | SegmentValue::CenterOf(index) => {
                answer_label(counts, *index)
            }
            SegmentValue::Last => String::new(),
        })
        .draw()
        .map_err(|e| anyhow!("failed to draw chart axes: {e}"))?;

    chart
        .draw_series(counts.iter().enumerate().map(|(index, (_, count))| {
            let left = SegmentValue::Exact(index as i32);
            let right = SegmentValue::Exact(index as i32 + 1);
            Rectangle::new([(left, 0), (right, *count as i32)], BAR_COLOR.filled())
        }))
        .map_err(|e| anyhow!("failed to draw chart bars: {e}"))?;

    root.present()
        .map_err(|e| anyhow!("failed to write chart image: {e}"))?;
    Ok(())
}

fn answer_label(counts: &[(String, usize)], index: i32) -> String {
    usize::try_from(index)
        .ok()
        .and_then(|index| counts.get(index))
        .map(|(value, _)| value.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::output::discover_font_dir;

    #[test]
    fn test_render_bar_chart_writes_png() {
        if discover_font_dir().is_none() {
            eprintln!("skipping: no system font family found");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let counts = vec![
            ("Não".to_string(), 2),
            ("Sim".to_string(), 5),
            ("Às vezes".to_string(), 1),
        ];

        render_bar_chart(&counts, "inserido_mercado_trabalho", "Teste", &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_render_empty_chart() {
        if discover_font_dir().is_none() {
            eprintln!("skipping: no system font family found");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");

        render_bar_chart(&[], "faixa_etaria", "Sem respostas", &path).unwrap();
        assert!(path.exists());
    }
}
