use crate::Introduction;
use cw_core::{
    models::{Axis, Chart, Dash, LegendOrientation, Series, SeriesKind, Summary},
    ports::{ChartHost, SummaryHost},
};
use std::io::{self, Write};

// Colours handed out, by series position, to series that leave the choice to the host.
const PALETTE: [&str; 6] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3",
];

// Plot-area margins within the canvas, in pixels
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 140.0;

const FONT: &str = "font-family=\"sans-serif\" font-size=\"12\"";

/// Write the chart as pretty-printed JSON.
pub fn export_json(chart: &Chart, buffer: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *buffer, chart)?;
    writeln!(buffer)
}

/// Write the chart as a standalone SVG document.
///
/// Series are painted in order and clipped to the locked axis ranges; the
/// legend lists every series that asks for an entry.
pub fn export_svg(chart: &Chart, buffer: &mut impl Write) -> io::Result<()> {
    let canvas = Canvas::new(chart);
    let (width, height) = (chart.layout.width, chart.layout.height);

    writeln!(
        buffer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    writeln!(
        buffer,
        r#"<rect x="0" y="0" width="{width}" height="{height}" fill="white"/>"#
    )?;
    writeln!(
        buffer,
        r#"<defs><clipPath id="plot-area"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath></defs>"#,
        canvas.left,
        canvas.top,
        canvas.right - canvas.left,
        canvas.bottom - canvas.top,
    )?;
    writeln!(
        buffer,
        r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="#e5ecf6"/>"##,
        canvas.left,
        canvas.top,
        canvas.right - canvas.left,
        canvas.bottom - canvas.top,
    )?;

    canvas.write_axes(buffer)?;

    writeln!(buffer, r#"<g clip-path="url(#plot-area)">"#)?;
    for (index, series) in chart.series.values().enumerate() {
        canvas.write_series(buffer, series, index)?;
    }
    writeln!(buffer, "</g>")?;

    canvas.write_legend(buffer)?;

    writeln!(buffer, "</svg>")
}

/// Write a standalone HTML page: the introduction, the numeric summary and the chart.
pub fn export_html(
    intro: &Introduction,
    summary: &Summary,
    chart: &Chart,
    buffer: &mut impl Write,
) -> io::Result<()> {
    writeln!(buffer, "<!DOCTYPE html>")?;
    writeln!(buffer, r#"<html lang="en">"#)?;
    writeln!(buffer, "<head>")?;
    writeln!(buffer, r#"<meta charset="utf-8">"#)?;
    writeln!(buffer, "<title>{}</title>", escape(&intro.title))?;
    writeln!(buffer, "</head>")?;
    writeln!(
        buffer,
        r#"<body style="font-family: sans-serif; max-width: {}px; margin: auto;">"#,
        chart.layout.width + 20
    )?;

    writeln!(buffer, "<h2>{}</h2>", escape(&intro.title))?;
    writeln!(buffer, "<p>{}</p>", escape(&intro.body))?;
    writeln!(buffer, "<ul>")?;
    for point in &intro.points {
        writeln!(buffer, "<li>{}</li>", escape(point))?;
    }
    writeln!(buffer, "</ul>")?;

    writeln!(
        buffer,
        r#"<div style="text-align: center; font-size: 14px; line-height: 1.1;">"#
    )?;
    for (label, value) in summary.lines() {
        writeln!(
            buffer,
            "<p><strong>{}:</strong> {}</p>",
            escape(label),
            escape(&value)
        )?;
    }
    writeln!(buffer, "</div>")?;

    export_svg(chart, buffer)?;

    writeln!(buffer, "</body>")?;
    writeln!(buffer, "</html>")
}

/// A chart host that writes each chart it is given as JSON
#[derive(Debug)]
pub struct JsonWriter<W: Write>(pub W);

impl<W: Write> ChartHost for JsonWriter<W> {
    type Error = io::Error;

    fn draw(&mut self, chart: &Chart) -> Result<(), Self::Error> {
        export_json(chart, &mut self.0)
    }
}

/// A chart host that writes each chart it is given as SVG
#[derive(Debug)]
pub struct SvgWriter<W: Write>(pub W);

impl<W: Write> ChartHost for SvgWriter<W> {
    type Error = io::Error;

    fn draw(&mut self, chart: &Chart) -> Result<(), Self::Error> {
        export_svg(chart, &mut self.0)
    }
}

/// A summary host that writes each summary it is given as plain text
#[derive(Debug)]
pub struct TextWriter<W: Write>(pub W);

impl<W: Write> SummaryHost for TextWriter<W> {
    type Error = io::Error;

    fn show(&mut self, summary: &Summary) -> Result<(), Self::Error> {
        write!(self.0, "{summary}")
    }
}

/// A host for both the summary and the chart that writes a standalone HTML page.
///
/// Every redraw writes one complete document when the chart arrives, pairing
/// it with the summary shown for the same frame. A shown summary is consumed
/// by the next draw, so a chart whose summary went to another host is
/// refused rather than paired with stale figures. [`crate::Presenter::present_to`]
/// always shows the summary first.
#[derive(Debug)]
pub struct HtmlPage<W: Write> {
    writer: W,
    intro: Introduction,
    summary: Option<Summary>,
}

impl<W: Write> HtmlPage<W> {
    /// A page with the given introduction, writing into `writer`
    pub fn new(writer: W, intro: Introduction) -> Self {
        Self {
            writer,
            intro,
            summary: None,
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SummaryHost for HtmlPage<W> {
    type Error = io::Error;

    fn show(&mut self, summary: &Summary) -> Result<(), Self::Error> {
        self.summary = Some(*summary);
        Ok(())
    }
}

impl<W: Write> ChartHost for HtmlPage<W> {
    type Error = io::Error;

    fn draw(&mut self, chart: &Chart) -> Result<(), Self::Error> {
        let Some(summary) = self.summary.take() else {
            return Err(io::Error::other(
                "no summary shown for this frame before drawing the page",
            ));
        };
        export_html(&self.intro, &summary, chart, &mut self.writer)
    }
}

// Maps data coordinates onto the canvas
struct Canvas<'a> {
    chart: &'a Chart,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl<'a> Canvas<'a> {
    fn new(chart: &'a Chart) -> Self {
        Self {
            chart,
            left: MARGIN_LEFT,
            right: chart.layout.width as f64 - MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: chart.layout.height as f64 - MARGIN_BOTTOM,
        }
    }

    fn x(&self, quantity: f64) -> f64 {
        let Axis { min, max, .. } = self.chart.layout.x_axis;
        self.left + (quantity - min) / (max - min) * (self.right - self.left)
    }

    fn y(&self, price: f64) -> f64 {
        let Axis { min, max, .. } = self.chart.layout.y_axis;
        self.bottom - (price - min) / (max - min) * (self.bottom - self.top)
    }

    fn write_axes(&self, buffer: &mut impl Write) -> io::Result<()> {
        let x_axis = &self.chart.layout.x_axis;
        let y_axis = &self.chart.layout.y_axis;

        for tick in ticks(x_axis.min, x_axis.max) {
            let x = self.x(tick);
            writeln!(
                buffer,
                r#"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="white"/>"#,
                self.top, self.bottom
            )?;
            writeln!(
                buffer,
                r#"<text x="{x:.2}" y="{:.2}" text-anchor="middle" {FONT}>{tick}</text>"#,
                self.bottom + 18.0
            )?;
        }
        for tick in ticks(y_axis.min, y_axis.max) {
            let y = self.y(tick);
            writeln!(
                buffer,
                r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="white"/>"#,
                self.left, self.right
            )?;
            writeln!(
                buffer,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="end" {FONT}>{tick}</text>"#,
                self.left - 8.0,
                y + 4.0
            )?;
        }

        writeln!(
            buffer,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" {FONT}>{}</text>"#,
            (self.left + self.right) / 2.0,
            self.bottom + 42.0,
            escape(&x_axis.title)
        )?;
        let (cx, cy) = (self.left - 50.0, (self.top + self.bottom) / 2.0);
        writeln!(
            buffer,
            r#"<text x="{cx:.2}" y="{cy:.2}" text-anchor="middle" transform="rotate(-90 {cx:.2} {cy:.2})" {FONT}>{}</text>"#,
            escape(&y_axis.title)
        )
    }

    fn write_series(&self, buffer: &mut impl Write, series: &Series, index: usize) -> io::Result<()> {
        let points = series
            .points
            .iter()
            .map(|pt| format!("{:.2},{:.2}", self.x(pt.quantity), self.y(pt.price)))
            .collect::<Vec<_>>()
            .join(" ");
        let stroke = series
            .stroke
            .color
            .as_deref()
            .unwrap_or(PALETTE[index % PALETTE.len()]);

        match series.kind {
            SeriesKind::Line => writeln!(
                buffer,
                r#"<polyline points="{points}" fill="none" stroke="{}" stroke-width="2"{} opacity="{}"/>"#,
                escape(stroke),
                dasharray(series.stroke.dash),
                series.opacity
            ),
            SeriesKind::Region => {
                let fill = series
                    .fill
                    .as_ref()
                    .and_then(|fill| fill.color.as_deref())
                    .unwrap_or(PALETTE[index % PALETTE.len()]);
                writeln!(
                    buffer,
                    r#"<polygon points="{points}" fill="{}" stroke="{}" stroke-width="2"{} opacity="{}"/>"#,
                    escape(fill),
                    escape(stroke),
                    dasharray(series.stroke.dash),
                    series.opacity
                )
            }
        }
    }

    fn write_legend(&self, buffer: &mut impl Write) -> io::Result<()> {
        const SWATCH: f64 = 30.0;
        const GAP: f64 = 6.0;
        const SPACING: f64 = 20.0;
        const ROW: f64 = 20.0;
        const CHAR_WIDTH: f64 = 7.0;

        let legend = &self.chart.layout.legend;
        let entries = self.chart.series.legend_entries().collect::<Vec<_>>();
        let widths = entries
            .iter()
            .map(|(_, series)| SWATCH + GAP + series.label.chars().count() as f64 * CHAR_WIDTH)
            .collect::<Vec<_>>();

        let plot_height = self.bottom - self.top;
        let anchor_x = self.left + legend.x * (self.right - self.left);
        let anchor_y = self.bottom - legend.y * plot_height;

        let positions = match legend.orientation {
            LegendOrientation::Horizontal => {
                let total = widths.iter().sum::<f64>()
                    + SPACING * (widths.len().saturating_sub(1)) as f64;
                let mut x = anchor_x - total / 2.0;
                widths
                    .iter()
                    .map(|w| {
                        let at = (x, anchor_y);
                        x += w + SPACING;
                        at
                    })
                    .collect::<Vec<_>>()
            }
            LegendOrientation::Vertical => {
                let widest = widths.iter().cloned().fold(0.0, f64::max);
                (0..widths.len())
                    .map(|i| (anchor_x - widest / 2.0, anchor_y + i as f64 * ROW))
                    .collect::<Vec<_>>()
            }
        };

        for ((index, series), (x, y)) in entries.into_iter().zip(positions) {
            let stroke = series
                .stroke
                .color
                .as_deref()
                .unwrap_or(PALETTE[index % PALETTE.len()]);
            let mid = y + ROW / 2.0;
            match series.kind {
                SeriesKind::Line => writeln!(
                    buffer,
                    r#"<line x1="{x:.2}" y1="{mid:.2}" x2="{:.2}" y2="{mid:.2}" stroke="{}" stroke-width="2"{}/>"#,
                    x + SWATCH,
                    escape(stroke),
                    dasharray(series.stroke.dash)
                )?,
                SeriesKind::Region => {
                    let fill = series
                        .fill
                        .as_ref()
                        .and_then(|fill| fill.color.as_deref())
                        .unwrap_or(PALETTE[index % PALETTE.len()]);
                    writeln!(
                        buffer,
                        r#"<rect x="{:.2}" y="{:.2}" width="20" height="12" fill="{}" stroke="{}" opacity="{}"/>"#,
                        x + 5.0,
                        mid - 6.0,
                        escape(fill),
                        escape(stroke),
                        series.opacity
                    )?
                }
            }
            writeln!(
                buffer,
                r#"<text x="{:.2}" y="{:.2}" {FONT}>{}</text>"#,
                x + SWATCH + GAP,
                mid + 4.0,
                escape(&series.label)
            )?;
        }
        Ok(())
    }
}

fn dasharray(dash: Dash) -> &'static str {
    match dash {
        Dash::Solid => "",
        Dash::Dash => r#" stroke-dasharray="8 4""#,
        Dash::Dot => r#" stroke-dasharray="2 3""#,
    }
}

// Roughly eight round-numbered ticks spanning [min, max]
fn ticks(min: f64, max: f64) -> Vec<f64> {
    let span = max - min;
    if !(span > 0.0) || !span.is_finite() {
        return vec![min];
    }
    let raw = span / 8.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        n if n <= 1.0 => 1.0,
        n if n <= 2.0 => 2.0,
        n if n <= 5.0 => 5.0,
        _ => 10.0,
    } * magnitude;

    let first = (min / step).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
