//! Chart datasets for the quantitative half of an analysis.
//!
//! Field names are camelCase on the wire; the front end renders these
//! directly as charts.

use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};

/// A labelled series for a single chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Category or period labels, one per point.
    pub labels: Vec<String>,
    /// Values, one per label.
    pub data: Vec<f64>,
    /// Display unit for `data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Per-point colours.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    /// Per-point growth rates in percent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub growth: Vec<f64>,
    /// Source URLs backing this dataset.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl Dataset {
    /// Create a dataset with no unit, colours, growth, or sources.
    pub fn new<L: Into<String>>(labels: impl IntoIterator<Item = L>, data: Vec<f64>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            data,
            unit: None,
            colors: Vec::new(),
            growth: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Set the display unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set per-point colours.
    pub fn with_colors<C: Into<String>>(mut self, colors: impl IntoIterator<Item = C>) -> Self {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Set per-point growth rates.
    pub fn with_growth(mut self, growth: Vec<f64>) -> Self {
        self.growth = growth;
        self
    }
}

/// Average price and market value over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSeries {
    /// Period labels.
    pub labels: Vec<String>,
    /// Average price index per period.
    pub avg_price: Vec<f64>,
    /// Market value per period.
    pub market_value: Vec<f64>,
    /// Source URLs backing this series.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// The four chart datasets of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeData {
    /// Market size by year.
    pub market_size: Dataset,
    /// Market share by player.
    pub market_share: Dataset,
    /// Share and growth by region.
    pub regional_growth: Dataset,
    /// Price and value over time.
    pub price_evolution: PriceSeries,
}

impl QuantitativeData {
    /// Validate every dataset.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Analysis`] naming the first invalid dataset.
    pub fn validate(&self) -> Result<()> {
        validate_dataset("marketSize", &self.market_size)?;
        validate_dataset("marketShare", &self.market_share)?;
        validate_dataset("regionalGrowth", &self.regional_growth)?;
        validate_price_series("priceEvolution", &self.price_evolution)
    }
}

/// Check that `dataset` can be charted.
///
/// Labels must be present and match `data` in length. Colours and growth
/// rates, when given, must match too.
///
/// # Errors
///
/// Returns [`MarketError::Analysis`] describing the mismatch.
pub fn validate_dataset(name: &str, dataset: &Dataset) -> Result<()> {
    if dataset.labels.is_empty() {
        return Err(MarketError::Analysis(format!("{name}: no labels")));
    }
    let points = dataset.labels.len();
    check_len(name, "data", dataset.data.len(), points)?;
    if !dataset.colors.is_empty() {
        check_len(name, "colors", dataset.colors.len(), points)?;
    }
    if !dataset.growth.is_empty() {
        check_len(name, "growth", dataset.growth.len(), points)?;
    }
    Ok(())
}

fn validate_price_series(name: &str, series: &PriceSeries) -> Result<()> {
    if series.labels.is_empty() {
        return Err(MarketError::Analysis(format!("{name}: no labels")));
    }
    let points = series.labels.len();
    check_len(name, "avgPrice", series.avg_price.len(), points)?;
    check_len(name, "marketValue", series.market_value.len(), points)
}

fn check_len(name: &str, field: &str, len: usize, labels: usize) -> Result<()> {
    if len == labels {
        Ok(())
    } else {
        Err(MarketError::Analysis(format!(
            "{name}: {field} has {len} values for {labels} labels"
        )))
    }
}

/// Fill in missing dataset sources from `source_urls`.
///
/// Market size takes URLs `[0..2]`, market share `[2..4]`, regional growth
/// `[4..6]`, and price evolution the last two. Datasets that already name
/// sources are left alone. Slices past the end of `source_urls` are
/// shortened or empty.
pub fn attach_sources(data: &mut QuantitativeData, source_urls: &[String]) {
    fill(&mut data.market_size.sources, slice(source_urls, 0, 2));
    fill(&mut data.market_share.sources, slice(source_urls, 2, 4));
    fill(&mut data.regional_growth.sources, slice(source_urls, 4, 6));
    let tail = source_urls.len().saturating_sub(2);
    fill(&mut data.price_evolution.sources, &source_urls[tail..]);
}

fn slice(urls: &[String], start: usize, end: usize) -> &[String] {
    let end = end.min(urls.len());
    let start = start.min(end);
    &urls[start..end]
}

fn fill(sources: &mut Vec<String>, urls: &[String]) {
    if sources.is_empty() {
        sources.extend_from_slice(urls);
    }
}
