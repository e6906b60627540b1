//! Paginated results table
//!
//! One row per feature, nine columns. Values come from
//! [`ResolvedProperties`], with `N/A` for anything missing.

use crate::domain::{Feature, ResolvedProperties, WhispError};
use serde::Serialize;
use std::fmt::Write as _;

/// Column headers, left to right
pub const TABLE_HEADERS: [&str; 9] = [
    "PLOT ID",
    "COUNTRY",
    "AREA (ha)",
    "OVERALL RISK",
    "COMPLIANCE STATUS",
    "GFW LOSS",
    "JRC LOSS",
    "SBTN LOSS",
    "HIGH RISK DATASETS",
];

/// Allowed rows-per-page choices
pub const PAGE_SIZES: [usize; 3] = [10, 25, 50];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Message rendered for an empty result set
pub const EMPTY_MESSAGE: &str = "No data available";

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub plot_id: String,
    pub country: String,
    pub area: String,
    pub overall_risk: String,
    pub compliance_status: String,
    pub gfw_loss: String,
    pub jrc_loss: String,
    pub sbtn_loss: String,
    pub high_risk_datasets: String,
}

impl TableRow {
    pub fn from_properties(props: &ResolvedProperties) -> Self {
        Self {
            plot_id: props.plot_id.to_string(),
            country: props.country_display().to_string(),
            area: props.area_display(),
            overall_risk: props.risk_display().to_string(),
            compliance_status: props.compliance_display().to_string(),
            gfw_loss: props.gfw_loss_stat.clone(),
            jrc_loss: props.jrc_loss_stat.clone(),
            sbtn_loss: props.sbtn_loss_stat.clone(),
            high_risk_datasets: props.high_risk_display(),
        }
    }

    /// Cells in column order
    pub fn cells(&self) -> [&str; 9] {
        [
            &self.plot_id,
            &self.country,
            &self.area,
            &self.overall_risk,
            &self.compliance_status,
            &self.gfw_loss,
            &self.jrc_loss,
            &self.sbtn_loss,
            &self.high_risk_datasets,
        ]
    }
}

/// Results table over a full result set
#[derive(Debug, Clone)]
pub struct ResultsTable {
    rows: Vec<TableRow>,
    page_size: usize,
}

/// A single page of a [`ResultsTable`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage<'a> {
    /// 1-based page number
    pub page: usize,
    pub total_pages: usize,
    pub rows: &'a [TableRow],
}

impl TablePage<'_> {
    /// `Page p of n`
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

impl ResultsTable {
    /// Build a table with the default page size
    pub fn new(features: &[Feature]) -> Self {
        let rows = features
            .iter()
            .enumerate()
            .map(|(index, feature)| {
                TableRow::from_properties(&ResolvedProperties::resolve(feature, index))
            })
            .collect();

        Self {
            rows,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Change the page size; only 10, 25 and 50 are allowed
    pub fn with_page_size(mut self, page_size: usize) -> crate::domain::Result<Self> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(WhispError::Validation(format!(
                "Invalid page size: {page_size}. Expected one of 10, 25, 50"
            )));
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(rows / page_size)`; zero for an empty table
    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(self.page_size)
    }

    /// Rows of the 1-based `page`, clamped into the valid range
    pub fn page(&self, page: usize) -> TablePage<'_> {
        let total_pages = self.total_pages();
        let page = page.clamp(1, total_pages.max(1));
        let start = ((page - 1) * self.page_size).min(self.rows.len());
        let end = (start + self.page_size).min(self.rows.len());

        TablePage {
            page,
            total_pages,
            rows: &self.rows[start..end],
        }
    }

    /// Plain-text rendering of one page with aligned columns
    pub fn to_text(&self, page: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Results ({} records)", self.rows.len());

        if self.rows.is_empty() {
            let _ = writeln!(out, "{EMPTY_MESSAGE}");
            return out;
        }

        let page = self.page(page);
        let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.chars().count()).collect();
        for row in page.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        push_line(&mut out, &TABLE_HEADERS, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
        push_line(&mut out, &rule, &widths);
        for row in page.rows {
            push_line(&mut out, &row.cells(), &widths);
        }

        let _ = writeln!(
            out,
            "{}  (rows per page: {})",
            page.label(),
            self.page_size
        );
        out
    }
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Label/value pairs for the feature info panel
pub fn feature_details(props: &ResolvedProperties) -> Vec<(&'static str, String)> {
    vec![
        ("Plot ID", props.plot_id.to_string()),
        ("Country", props.country_display().to_string()),
        ("Area (ha)", props.area_display()),
        ("Overall Risk", props.risk_display().to_string()),
        ("Compliance Status", props.compliance_display().to_string()),
        ("GFW Loss", props.gfw_loss_stat.clone()),
        ("JRC Loss", props.jrc_loss_stat.clone()),
        ("SBTN Loss", props.sbtn_loss_stat.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn features(n: usize) -> Vec<Feature> {
        (0..n)
            .map(|i| Feature::new(json!({"properties": {"plot_id": format!("P{}", i + 1)}})))
            .collect()
    }

    #[test]
    fn test_row_from_full_feature() {
        let feature = Feature::new(json!({"properties": {
            "plot_id": "P1",
            "country_name": "Indonesia",
            "total_area_hectares": 12.345,
            "overall_compliance": {
                "overall_risk": "high",
                "compliance_status": "non-compliant",
                "high_risk_datasets": ["GFW", "JRC"]
            },
            "gfw_loss": {"gfw_loss_stat": "true"}
        }}));
        let table = ResultsTable::new(&[feature]);
        let row = &table.rows()[0];

        assert_eq!(
            row.cells(),
            ["P1", "Indonesia", "12.35", "high", "non-compliant", "true", "N/A", "N/A", "GFW, JRC"]
        );
    }

    #[test]
    fn test_missing_values_show_not_available() {
        let feature = Feature::new(json!({"properties": {"overall_compliance": {}}}));
        let table = ResultsTable::new(&[feature]);
        let row = &table.rows()[0];

        assert_eq!(row.plot_id, "1");
        assert_eq!(row.country, "N/A");
        assert_eq!(row.area, "N/A");
        assert_eq!(row.overall_risk, "N/A");
        assert_eq!(row.compliance_status, "N/A");
        assert_eq!(row.high_risk_datasets, "None");
    }

    #[test]
    fn test_unrecognized_labels_are_shown_as_sent() {
        let feature = Feature::new(json!({"properties": {
            "overall_compliance": {"overall_risk": "HIGH", "compliance_status": "pending"}
        }}));
        let props = ResolvedProperties::resolve(&feature, 0);
        let row = TableRow::from_properties(&props);

        assert_eq!(row.overall_risk, "HIGH");
        assert_eq!(row.compliance_status, "pending");

        let details = feature_details(&props);
        assert_eq!(details[3], ("Overall Risk", "HIGH".to_string()));
        assert_eq!(details[4], ("Compliance Status", "pending".to_string()));
    }

    #[test]
    fn test_pagination() {
        let table = ResultsTable::new(&features(23));
        assert_eq!(table.total_pages(), 3);

        let last = table.page(3);
        assert_eq!(last.rows.len(), 3);
        assert_eq!(last.rows[0].plot_id, "P21");
        assert_eq!(last.label(), "Page 3 of 3");

        assert_eq!(table.page(99).page, 3);
        assert_eq!(table.page(0).page, 1);

        let wide = table.with_page_size(25).unwrap();
        assert_eq!(wide.total_pages(), 1);
        assert_eq!(wide.page(1).rows.len(), 23);
    }

    #[test]
    fn test_invalid_page_size() {
        assert!(ResultsTable::new(&features(1)).with_page_size(7).is_err());
    }

    #[test]
    fn test_empty_table() {
        let table = ResultsTable::new(&[]);
        assert_eq!(table.total_pages(), 0);
        assert!(table.page(1).rows.is_empty());

        let text = table.to_text(1);
        assert!(text.contains("Results (0 records)"));
        assert!(text.contains("No data available"));
    }

    #[test]
    fn test_text_rendering() {
        let text = ResultsTable::new(&features(12)).to_text(2);
        assert!(text.starts_with("Results (12 records)\n"));
        assert!(text.contains("PLOT ID"));
        assert!(text.contains("P11"));
        assert!(!text.contains("P10 "));
        assert!(text.contains("Page 2 of 2"));
    }

    #[test]
    fn test_feature_details_order() {
        let feature = Feature::new(json!({"properties": {"plot_id": "X", "total_area_hectares": 2}}));
        let details = feature_details(&ResolvedProperties::resolve(&feature, 0));
        let labels: Vec<_> = details.iter().map(|(l, _)| *l).collect();

        assert_eq!(
            labels,
            [
                "Plot ID",
                "Country",
                "Area (ha)",
                "Overall Risk",
                "Compliance Status",
                "GFW Loss",
                "JRC Loss",
                "SBTN Loss"
            ]
        );
        assert_eq!(details[0].1, "X");
        assert_eq!(details[2].1, "2.00");
    }
}
