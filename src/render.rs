//! Horizontal bar plot of a distribution's probabilities.
//!
//! ```text
//!                    No cancer  92.24% [=====================================   ]
//!                       Cancer   7.76% [===                                     ]
//! ```
//!
//! Works only from the read-only `(value, probability)` view.

use hashbrown::HashMap;

use crate::distribution::Distribution;

/// Width of the right-aligned value label.
const LABEL_WIDTH: usize = 29;
/// Number of `=` in a full (100%) bar.
const BAR_WIDTH: usize = 40;

/// Display options for [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotOptions {
    pub title: Option<String>,
    /// Group values by label and order by probability, highest first.
    pub sort: bool,
    /// Hide values with probability 0.
    pub filter_zero: bool,
}

impl PlotOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Self::default() }
    }

    pub fn unsorted() -> Self {
        Self { sort: false, ..Self::default() }
    }
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self { title: None, sort: true, filter_zero: true }
    }
}

/// Render `distribution` as text, one line per value, ending with a blank line.
pub fn render(distribution: &Distribution, options: &PlotOptions) -> String {
    let mut rows: Vec<(String, f64)> = Vec::new();
    let mut by_label: HashMap<String, usize> = HashMap::new();

    for (value, p) in distribution.probabilities() {
        if options.filter_zero && p == 0.0 {
            continue;
        }
        let label = value.to_string();
        if !options.sort {
            rows.push((label, p));
            continue;
        }
        match by_label.get(&label) {
            Some(&i) => rows[i].1 += p,
            None => {
                by_label.insert(label.clone(), rows.len());
                rows.push((label, p));
            }
        }
    }

    if options.sort {
        // Stable: ties keep first-seen order.
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
    }

    let mut out = String::new();
    if let Some(title) = &options.title {
        out.push_str(title);
        out.push('\n');
    }
    for (label, p) in &rows {
        out.push_str(&render_row(label, *p));
        out.push('\n');
    }
    out.push('\n');
    out
}

fn render_row(label: &str, p: f64) -> String {
    let filled = ((p * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let bar = "=".repeat(filled);
    format!("{label:>LABEL_WIDTH$} {:>6.2}% [{bar:<BAR_WIDTH$}]", p * 100.0)
}

impl Distribution {
    /// Shorthand for [`render`].
    pub fn plot(&self, options: &PlotOptions) -> String {
        render(self, options)
    }
}
