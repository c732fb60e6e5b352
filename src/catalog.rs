use scraper::{ElementRef, Html, Selector};

use crate::parser::{selector, ExtractError};
use crate::record::VehicleIdentity;

/// Path of the vehicle listing, relative to the site root.
pub const LISTING_PATH: &str = "/en/vehicles";

const GROUP_SUFFIX: &str = " all";
const COUNTRY_PREFIX: &str = "country_";
const UNKNOWN_NAME: &str = "unknown";

/// The parsed vehicle listing.
pub struct Catalog {
    html: Html,
    rows: Selector,
    vehicle: Selector,
    anchor: Selector,
}

impl Catalog {
    pub fn parse(markup: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            html: Html::parse_document(markup),
            rows: selector("tr[data-role]")?,
            vehicle: selector(".vehicle")?,
            anchor: selector("a[href]")?,
        })
    }

    /// Number of tagged rows, well-formed or not.
    pub fn row_count(&self) -> usize {
        self.html.select(&self.rows).count()
    }

    /// Vehicle identities in listing order. Rows that are not shaped like a
    /// vehicle entry are skipped.
    pub fn entries(&self) -> impl Iterator<Item = VehicleIdentity> + '_ {
        self.html
            .select(&self.rows)
            .filter_map(move |row| self.read_row(row))
    }

    fn read_row(&self, row: ElementRef) -> Option<VehicleIdentity> {
        let role = row.value().attr("data-role")?;
        let country = row.value().attr("data-country")?;
        let vehicle = row.select(&self.vehicle).next()?;
        let detail_ref = vehicle
            .select(&self.anchor)
            .next()?
            .value()
            .attr("href")
            .filter(|href| !href.is_empty())?;
        let name = vehicle.value().attr("data-sort").unwrap_or(UNKNOWN_NAME);

        Some(VehicleIdentity {
            name: strip_group_suffix(name).to_string(),
            role: strip_group_suffix(role).to_string(),
            country: country_only(country).to_string(),
            detail_ref: detail_ref.to_string(),
        })
    }
}

/// Drops the `" all"` marker the listing appends to aggregate entries.
pub fn strip_group_suffix(value: &str) -> &str {
    let mut value = value;
    while let Some(stripped) = value.strip_suffix(GROUP_SUFFIX) {
        value = stripped;
    }
    value
}

/// `"country_ussr all"` -> `"ussr"`.
pub fn country_only(value: &str) -> &str {
    let value = strip_group_suffix(value);
    value.strip_prefix(COUNTRY_PREFIX).unwrap_or(value)
}
