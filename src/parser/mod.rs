pub mod error;
pub mod modes;
pub mod params;
pub mod values;

use scraper::{ElementRef, Html, Selector};

pub use error::ExtractError;
use params::ParamGroup;

use crate::record::DetailStats;

pub fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
        selector: css,
        reason: e.to_string(),
    })
}

/// Parses vehicle detail pages.
///
/// Two independent passes run over each document: the per-mode stat blocks
/// (see [`modes`]) and the parameter groups (see [`params`]). Neither
/// carries field names, so both are read purely by position.
pub struct DetailParser {
    mode_blocks: Selector,
    stat_items: Selector,
    badge: Selector,
    param_groups: Selector,
    param_names: Selector,
    param_values: Selector,
    strong: Selector,
}

impl DetailParser {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            mode_blocks: selector(".row .mt-5 > *")?,
            stat_items: selector("ul.stats li")?,
            badge: selector(".badge")?,
            param_groups: selector("ul.params")?,
            param_names: selector("span.param_name")?,
            param_values: selector("span.param_value")?,
            strong: selector("strong")?,
        })
    }

    pub fn parse(&self, markup: &str) -> Result<DetailStats, ExtractError> {
        let html = Html::parse_document(markup);
        let mut stats = DetailStats::default();
        modes::read_modes(&self.mode_blocks(&html), &mut stats)?;
        params::read_params(&self.param_groups(&html), &mut stats)?;
        Ok(stats)
    }

    /// Badge texts per mode block. Items alternate value, label; only the
    /// values are kept.
    fn mode_blocks(&self, html: &Html) -> Vec<Vec<String>> {
        html.select(&self.mode_blocks)
            .map(|block| {
                block
                    .select(&self.stat_items)
                    .step_by(2)
                    .map(|item| self.badge_text(item))
                    .collect()
            })
            .collect()
    }

    fn badge_text(&self, item: ElementRef) -> String {
        item.select(&self.badge)
            .next()
            .map(|badge| badge.text().collect::<String>())
            .unwrap_or_default()
    }

    fn param_groups(&self, html: &Html) -> Vec<ParamGroup> {
        html.select(&self.param_groups)
            .map(|group| ParamGroup {
                names: group
                    .select(&self.param_names)
                    .map(|name| self.strong_text(name))
                    .collect(),
                values: group
                    .select(&self.param_values)
                    .map(|value| self.strong_text(value))
                    .collect(),
            })
            .collect()
    }

    /// Trimmed text of the last `strong` inside `el`.
    fn strong_text(&self, el: ElementRef) -> String {
        el.select(&self.strong)
            .last()
            .map(|s| s.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }
}
