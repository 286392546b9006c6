use crate::error::Result;
use crate::store::SeqBank;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub start: usize,
    /// Inclusive upper bound of the length range.
    pub end: usize,
    pub count: usize,
}

/// Distribution of stored sequence lengths over equal-width buckets.
#[derive(Debug, Default)]
pub struct LengthHistogram {
    pub buckets: Vec<Bucket>,
    pub total: usize,
}

/// Scans every record once and buckets the lengths. The stored encoding is
/// one byte per base, so no decoding happens here. Deterministic for a fixed
/// bank state.
pub fn length_histogram(bank: &SeqBank, nbins: usize) -> Result<LengthHistogram> {
    let nbins = nbins.max(1);
    let mut lengths = Vec::new();
    for entry in bank.lengths() {
        let (_accession, length) = entry?;
        lengths.push(length);
    }
    if lengths.is_empty() {
        return Ok(LengthHistogram::default());
    }

    let min = *lengths.iter().min().unwrap();
    let max = *lengths.iter().max().unwrap();
    let width = ((max - min) / nbins + 1).max(1);

    let mut buckets: Vec<Bucket> = (0..nbins)
        .map(|i| Bucket {
            start: min + i * width,
            end: min + (i + 1) * width - 1,
            count: 0,
        })
        .collect();
    for &length in &lengths {
        let idx = ((length - min) / width).min(nbins - 1);
        buckets[idx].count += 1;
    }
    // Trailing buckets past the observed maximum carry nothing useful.
    while buckets.len() > 1 && buckets.last().map(|b| b.count) == Some(0) {
        buckets.pop();
    }

    Ok(LengthHistogram {
        buckets,
        total: lengths.len(),
    })
}

/// Open or self-closing SVG tag with attributes kept in insertion order,
/// so the rendered markup is stable across runs.
struct SvgElement {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
}

impl SvgElement {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attributes.push((key, value.to_string()));
        self
    }

    fn render(&self, self_closing: bool) -> String {
        let mut out = format!("<{}", self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape_attr(value));
        }
        out.push_str(if self_closing { "/>" } else { ">" });
        out
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const BAR_WIDTH: usize = 18;
const BAR_GAP: usize = 2;
const PLOT_HEIGHT: usize = 240;
const LABEL_HEIGHT: usize = 40;

impl LengthHistogram {
    /// Renders the distribution as a standalone SVG bar chart.
    pub fn to_svg(&self) -> String {
        let peak = self.buckets.iter().map(|b| b.count).max().unwrap_or(0);
        let svg_width = (self.buckets.len().max(1)) * (BAR_WIDTH + BAR_GAP) + BAR_GAP;
        let svg_height = PLOT_HEIGHT + LABEL_HEIGHT;

        let mut svg =
            String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
        svg.push_str(
            &SvgElement::new("svg")
                .attr("xmlns", "http://www.w3.org/2000/svg")
                .attr("width", svg_width)
                .attr("height", svg_height)
                .attr("style", "background:#ffffff")
                .render(false),
        );
        svg.push('\n');

        for (idx, bucket) in self.buckets.iter().enumerate() {
            if peak == 0 || bucket.count == 0 {
                continue;
            }
            let bar_height = bucket.count * PLOT_HEIGHT / peak;
            let x = BAR_GAP + idx * (BAR_WIDTH + BAR_GAP);
            let y = PLOT_HEIGHT - bar_height;
            svg.push_str(
                &SvgElement::new("rect")
                    .attr("x", x)
                    .attr("y", y)
                    .attr("width", BAR_WIDTH)
                    .attr("height", bar_height)
                    .attr("fill", "#4472c4")
                    .render(true),
            );
            svg.push('\n');
            svg.push_str(
                &SvgElement::new("text")
                    .attr("x", x + BAR_WIDTH / 2)
                    .attr("y", PLOT_HEIGHT + 14)
                    .attr("font-size", 8)
                    .attr("text-anchor", "middle")
                    .render(false),
            );
            let _ = write!(svg, "{}", bucket.start);
            svg.push_str("</text>\n");
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Plain-text rendering for terminal display.
    pub fn render_text(&self) -> String {
        let peak = self.buckets.iter().map(|b| b.count).max().unwrap_or(0);
        let mut out = String::new();
        for bucket in &self.buckets {
            let bar = if peak == 0 {
                0
            } else {
                bucket.count * 50 / peak
            };
            let _ = writeln!(
                out,
                "{:>10}-{:<10} {:>8} {}",
                bucket.start,
                bucket.end,
                bucket.count,
                "#".repeat(bar)
            );
        }
        let _ = writeln!(out, "{} sequences total", self.total);
        out
    }
}
