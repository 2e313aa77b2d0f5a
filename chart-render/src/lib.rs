use dash_engine::{ChartSpec, PieChart, ScatterChart};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::str::FromStr;
use thiserror::Error;

pub const WIDTH: f64 = 720.0;
pub const HEIGHT: f64 = 420.0;

/// Categorical colours for slices and booster categories, cycled.
pub const PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {0:?}; expected `light` or `dark`")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

impl Theme {
    pub fn background(&self) -> &'static str {
        match self {
            Theme::Dark => "#0d1520",
            Theme::Light => "#ffffff",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Theme::Dark => "#e6edf7",
            Theme::Light => "#0c1625",
        }
    }

    pub fn muted(&self) -> &'static str {
        match self {
            Theme::Dark => "#7f8ba0",
            Theme::Light => "#5b6678",
        }
    }

    pub fn grid(&self) -> &'static str {
        match self {
            Theme::Dark => "rgba(255,255,255,0.08)",
            Theme::Light => "rgba(0,0,0,0.08)",
        }
    }
}

pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn render_svg(spec: &ChartSpec, theme: Theme) -> String {
    match spec {
        ChartSpec::Pie(pie) => render_pie(pie, theme),
        ChartSpec::Scatter(scatter) => render_scatter(scatter, theme),
    }
}

/// Minimal SVG sink. Coordinates are in the fixed `WIDTH x HEIGHT` viewBox.
struct SvgCanvas {
    theme: Theme,
    body: String,
}

impl SvgCanvas {
    fn begin_frame(theme: Theme, title: &str) -> Self {
        let mut canvas = Self {
            theme,
            body: String::new(),
        };
        canvas.body.push_str(&format!(
            r#"<rect x="0" y="0" width="{WIDTH}" height="{HEIGHT}" fill="{}"/>"#,
            theme.background()
        ));
        canvas.text(24.0, 32.0, title, 17.0, theme.text(), "start");
        canvas
    }

    fn text(&mut self, x: f64, y: f64, content: &str, size: f64, fill: &str, anchor: &str) {
        self.body.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" font-size="{size}" fill="{fill}" text-anchor="{anchor}">{}</text>"#,
            escape(content)
        ));
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        self.body.push_str(&format!(
            r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{stroke}"/>"#
        ));
    }

    fn legend_entry(&mut self, x: f64, y: f64, color: &str, label: &str) {
        self.body.push_str(&format!(
            r#"<rect class="legend" x="{x:.1}" y="{:.1}" width="12" height="12" fill="{color}"/>"#,
            y - 10.0
        ));
        let fill = self.theme.text();
        self.text(x + 18.0, y, label, 12.0, fill, "start");
    }

    fn no_data(&mut self, x: f64, y: f64) {
        let fill = self.theme.muted();
        self.text(x, y, "No data", 14.0, fill, "middle");
    }

    fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="100%" font-family="system-ui, sans-serif">{}</svg>"#,
            self.body
        )
    }
}

fn render_pie(pie: &PieChart, theme: Theme) -> String {
    let mut canvas = SvgCanvas::begin_frame(theme, &pie.title);
    let (cx, cy, r) = (250.0, 230.0, 150.0);
    let total = pie.total();

    if total == 0 {
        canvas.no_data(cx, cy);
    } else {
        let mut start = -PI / 2.0;
        for (idx, slice) in pie.slices.iter().enumerate() {
            if slice.value == 0 {
                continue;
            }
            let frac = slice.value as f64 / total as f64;
            let color = color_for(idx);
            if slice.value == total {
                canvas.body.push_str(&format!(
                    r#"<circle class="slice" cx="{cx}" cy="{cy}" r="{r}" fill="{color}"/>"#
                ));
            } else {
                let end = start + frac * 2.0 * PI;
                let large = if frac > 0.5 { 1 } else { 0 };
                let (x0, y0) = (cx + r * start.cos(), cy + r * start.sin());
                let (x1, y1) = (cx + r * end.cos(), cy + r * end.sin());
                canvas.body.push_str(&format!(
                    r#"<path class="slice" d="M {cx} {cy} L {x0:.2} {y0:.2} A {r} {r} 0 {large} 1 {x1:.2} {y1:.2} Z" fill="{color}" stroke="{}"/>"#,
                    theme.background()
                ));
            }
            if frac >= 0.04 {
                let mid = start + frac * PI;
                let (lx, ly) = (cx + r * 0.62 * mid.cos(), cy + r * 0.62 * mid.sin() + 4.0);
                canvas.text(lx, ly, &format!("{:.1}%", frac * 100.0), 12.0, "#ffffff", "middle");
            }
            start += frac * 2.0 * PI;
        }
    }

    for (idx, slice) in pie.slices.iter().enumerate() {
        let y = 90.0 + idx as f64 * 22.0;
        canvas.legend_entry(470.0, y, color_for(idx), &format!("{} ({})", slice.label, slice.value));
    }

    canvas.finish()
}

/// Smallest of 1, 2, 2.5, 5 times a power of ten that is `>= value`.
pub fn nice_ceil(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1_000.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    for step in [1.0, 2.0, 2.5, 5.0, 10.0] {
        let candidate = step * magnitude;
        if candidate >= value {
            return candidate;
        }
    }
    10.0 * magnitude
}

fn render_scatter(chart: &ScatterChart, theme: Theme) -> String {
    let mut canvas = SvgCanvas::begin_frame(theme, &chart.title);
    let (left, right, top, bottom) = (70.0, WIDTH - 190.0, 60.0, HEIGHT - 60.0);
    let x_max = nice_ceil(chart.max_x().unwrap_or(0.0));
    let (y_min, y_max) = (-0.25, 1.25);

    let sx = |x: f64| left + (x / x_max) * (right - left);
    let sy = |y: f64| bottom - ((y - y_min) / (y_max - y_min)) * (bottom - top);

    // Axes and grid.
    canvas.line(left, bottom, right, bottom, theme.muted());
    canvas.line(left, top, left, bottom, theme.muted());
    for i in 0..=4 {
        let v = x_max * i as f64 / 4.0;
        let x = sx(v);
        canvas.line(x, top, x, bottom, theme.grid());
        canvas.text(x, bottom + 18.0, &format!("{v:.0}"), 11.0, theme.muted(), "middle");
    }
    for v in [0.0, 1.0] {
        let y = sy(v);
        canvas.line(left, y, right, y, theme.grid());
        canvas.text(left - 10.0, y + 4.0, &format!("{v:.0}"), 11.0, theme.muted(), "end");
    }
    canvas.text((left + right) / 2.0, HEIGHT - 18.0, &chart.x_label, 12.0, theme.text(), "middle");
    canvas.body.push_str(&format!(
        r#"<text x="20" y="{:.1}" font-size="12" fill="{}" text-anchor="middle" transform="rotate(-90, 20, {:.1})">{}</text>"#,
        (top + bottom) / 2.0,
        theme.text(),
        (top + bottom) / 2.0,
        escape(&chart.y_label)
    ));

    let categories = chart.categories();
    if chart.points.is_empty() {
        canvas.no_data((left + right) / 2.0, (top + bottom) / 2.0);
    }
    for p in &chart.points {
        let idx = categories.iter().position(|c| *c == p.category).unwrap_or(0);
        let hover = match &p.hover {
            Some(h) => format!("{h}: {:.0} kg, class {}", p.x, p.y),
            None => format!("{}: {:.0} kg, class {}", p.category, p.x, p.y),
        };
        canvas.body.push_str(&format!(
            r#"<circle class="point" cx="{:.2}" cy="{:.2}" r="6" fill="{}" fill-opacity="0.85"><title>{}</title></circle>"#,
            sx(p.x),
            sy(p.y as f64),
            color_for(idx),
            escape(&hover)
        ));
    }

    if !categories.is_empty() {
        canvas.text(right + 24.0, top + 4.0, &chart.color_label, 12.0, theme.muted(), "start");
    }
    for (idx, cat) in categories.iter().enumerate() {
        canvas.legend_entry(right + 24.0, top + 28.0 + idx as f64 * 22.0, color_for(idx), cat);
    }

    canvas.finish()
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
