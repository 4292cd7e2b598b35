use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use plotters::prelude::*;

use crate::color::curve_color;
use crate::data::model::DistanceTables;
use crate::figure;

/// Vector encodings the figure can be saved in, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureFormat {
    Pdf,
    Svg,
}

impl FigureFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "pdf" => Ok(FigureFormat::Pdf),
            "svg" => Ok(FigureFormat::Svg),
            other => bail!("Unsupported figure extension: .{other}"),
        }
    }
}

/// Render the log-log comparison figure to `out_path`. Dispatch by extension.
pub fn render_figure(out_path: &Path, tables: &DistanceTables, size: (u32, u32)) -> Result<()> {
    let format = FigureFormat::from_path(out_path)?;
    let svg = svg_document(tables, size)?;

    let written = match format {
        FigureFormat::Svg => std::fs::write(out_path, &svg).map_err(anyhow::Error::from),
        FigureFormat::Pdf => {
            svg_to_pdf(&svg).and_then(|pdf| std::fs::write(out_path, pdf).map_err(Into::into))
        }
    };
    written.with_context(|| format!("rendering {}", out_path.display()))?;

    log::info!("Saved figure to {}", out_path.display());
    Ok(())
}

/// The figure as an SVG document.
fn svg_document(tables: &DistanceTables, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    draw(&mut svg, tables, size).map_err(|e| anyhow!("drawing figure: {e}"))?;
    Ok(svg)
}

/// Text is converted to outlines with whatever system fonts are installed.
fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    if options.fontdb.faces().next().is_none() {
        log::warn!("No system fonts found; PDF figure will have no text");
    }

    let tree = usvg::Tree::from_str(svg, &options).context("parsing figure SVG")?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| anyhow!("converting figure to PDF: {e:?}"))
}

fn draw(
    buf: &mut String,
    tables: &DistanceTables,
    size: (u32, u32),
) -> Result<(), Box<dyn std::error::Error>> {
    let ((x0, x1), (y0, y1)) = figure::log_bounds();

    let root = SVGBackend::with_string(buf, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(figure::TITLE, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let x_ticks = figure::X_DECADES.count();
    let y_ticks = figure::Y_DECADES.count();
    chart
        .configure_mesh()
        .x_labels(x_ticks)
        .y_labels(y_ticks)
        .x_label_formatter(&|v| figure::log_axis_label(*v))
        .y_label_formatter(&|v| figure::log_axis_label(*v))
        .light_line_style(TRANSPARENT)
        .bold_line_style(BLACK.mix(0.2))
        .x_desc(figure::X_LABEL)
        .y_desc(figure::Y_LABEL)
        .draw()?;

    for table in tables.iter() {
        let color: RGBColor = curve_color(table.kind).into();
        let points = figure::curve_points(table);
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(table.kind.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmology::CosmologyParameters;
    use crate::data::model::RedshiftGrid;
    use crate::data::sampler::tabulate;

    fn tables() -> DistanceTables {
        let grid = RedshiftGrid::new(0.0, 20.0, 0.5).unwrap();
        tabulate(&grid, &CosmologyParameters::PLANCK_2013).unwrap()
    }

    #[test]
    fn writes_svg_with_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distances_in_cosmology.svg");

        render_figure(&path, &tables(), (800, 600)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Comparison of distance measures"));
        assert!(svg.contains("Comoving Distance"));
        assert!(svg.contains("Ang. Dia. Distance"));
        assert!(svg.contains("Redshift (z)"));
    }

    #[test]
    fn writes_pdf_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distances_in_cosmology.pdf");

        render_figure(&path, &tables(), (800, 600)).unwrap();

        let pdf = std::fs::read(&path).unwrap();
        assert!(pdf.starts_with(b"%PDF-"), "not a PDF header");
        assert!(pdf.len() > 1000);
    }

    #[test]
    fn figure_format_follows_extension() {
        assert_eq!(
            FigureFormat::from_path(Path::new("a.PDF")).unwrap(),
            FigureFormat::Pdf
        );
        assert_eq!(
            FigureFormat::from_path(Path::new("a.svg")).unwrap(),
            FigureFormat::Svg
        );
        assert!(FigureFormat::from_path(Path::new("a.png")).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        assert!(render_figure(&path, &tables(), (800, 600)).is_err());
        assert!(!path.exists());
    }
}
