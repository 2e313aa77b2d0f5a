use serde::{Deserialize, Serialize};

/// Renderer-agnostic chart description handed to whatever draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(p) => &p.title,
            ChartSpec::Scatter(s) => &s.title,
        }
    }

    pub fn as_pie(&self) -> Option<&PieChart> {
        match self {
            ChartSpec::Pie(p) => Some(p),
            ChartSpec::Scatter(_) => None,
        }
    }

    pub fn as_scatter(&self) -> Option<&ScatterChart> {
        match self {
            ChartSpec::Scatter(s) => Some(s),
            ChartSpec::Pie(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    /// Zero-valued slices are kept so every expected label stays representable.
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: u8,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Distinct colour categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for p in &self.points {
            if !out.contains(&p.category.as_str()) {
                out.push(&p.category);
            }
        }
        out
    }

    pub fn max_x(&self) -> Option<f64> {
        self.points.iter().map(|p| p.x).reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, category: &str) -> ScatterPoint {
        ScatterPoint {
            x,
            y: 1,
            category: category.into(),
            hover: None,
        }
    }

    #[test]
    fn categories_first_appearance() {
        let chart = ScatterChart {
            title: "t".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            color_label: "c".into(),
            points: vec![point(1.0, "FT"), point(2.0, "v1.0"), point(9.0, "FT")],
        };
        assert_eq!(chart.categories(), vec!["FT", "v1.0"]);
        assert_eq!(chart.max_x(), Some(9.0));
    }

    #[test]
    fn tagged_json() {
        let spec = ChartSpec::Pie(PieChart {
            title: "p".into(),
            slices: vec![PieSlice {
                label: "Failure (0)".into(),
                value: 0,
            }],
        });
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "pie");
        assert_eq!(json["slices"][0]["value"], 0);
        assert_eq!(spec.title(), "p");
        assert!(spec.as_scatter().is_none());
    }
}
