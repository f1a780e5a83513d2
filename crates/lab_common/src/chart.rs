//! Chart model - what a chart message shows, independent of how it is drawn
//!
//! A view is only built when the dataset behind it has rows. Missing or
//! non-numeric values plot as zero.

use crate::chat::ChartKind;
use crate::datasets::{field_f64, field_str, DatasetBundle, Record};

/// Bar charts show at most this many leading rows
pub const BAR_ROWS: usize = 10;
/// Line charts show this many trailing rows
pub const LINE_ROWS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartShape {
    Bar,
    Line,
    Pie,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// One chart, ready for any renderer. `labels[i]` names point `i` of
/// every series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub kind: ChartKind,
    pub shape: ChartShape,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartView {
    pub fn build(kind: ChartKind, data: &DatasetBundle) -> Option<Self> {
        let rows = data.get(kind);
        if rows.is_empty() {
            return None;
        }

        let view = match kind {
            ChartKind::Reagents => bars(
                kind,
                &rows[..rows.len().min(BAR_ROWS)],
                "name",
                &[("Stock", "stock"), ("Daily Usage", "usage")],
            ),
            ChartKind::Inventory => bars(
                kind,
                &rows[..rows.len().min(BAR_ROWS)],
                "item",
                &[("Stock", "stock"), ("Threshold", "threshold")],
            ),
            ChartKind::Operations => {
                let tail = &rows[rows.len().saturating_sub(LINE_ROWS)..];
                let mut view = bars(kind, tail, "date", &[("Tests", "tests"), ("TAT (mins)", "tat")]);
                view.shape = ChartShape::Line;
                view
            }
            ChartKind::Results => {
                let normal = rows
                    .iter()
                    .filter(|r| field_str(r, "flag").as_deref() == Some("Normal"))
                    .count();
                let abnormal = rows.len() - normal;
                Self {
                    kind,
                    shape: ChartShape::Pie,
                    labels: vec!["Normal".to_string(), "Abnormal".to_string()],
                    series: vec![Series {
                        name: "Results",
                        values: vec![normal as f64, abnormal as f64],
                    }],
                }
            }
        };

        Some(view)
    }

    /// Largest value across all series, at least 1 so it can scale bars
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(1.0, f64::max)
    }

    /// Sum of the first series; pie slices are shares of this
    pub fn total(&self) -> f64 {
        self.series.first().map(|s| s.values.iter().sum()).unwrap_or(0.0)
    }
}

fn bars(
    kind: ChartKind,
    rows: &[Record],
    label_key: &str,
    fields: &[(&'static str, &str)],
) -> ChartView {
    let labels = rows
        .iter()
        .map(|r| field_str(r, label_key).unwrap_or_default())
        .collect();
    let series = fields
        .iter()
        .map(|&(name, key)| Series {
            name,
            values: rows.iter().map(|r| field_f64(r, key).unwrap_or(0.0)).collect(),
        })
        .collect();

    ChartView {
        kind,
        shape: ChartShape::Bar,
        labels,
        series,
    }
}
