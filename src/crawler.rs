use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::catalog::{Catalog, LISTING_PATH};
use crate::db::RecordSink;
use crate::fetch::Fetch;
use crate::parser::DetailParser;
use crate::record::{self, DetailStats, Mode};

/// Fetches and parses a single detail page.
pub async fn vehicle_stats<F: Fetch>(
    fetcher: &F,
    parser: &DetailParser,
    reference: &str,
) -> Result<DetailStats> {
    let markup = fetcher
        .fetch(reference)
        .await
        .context("Failed to get a vehicle page")?;
    let stats = parser
        .parse(&markup)
        .with_context(|| format!("Failed to parse vehicle page {}", reference))?;
    debug!(
        reference,
        rank = stats.rank,
        modes = Mode::ALL.iter().filter(|&&m| stats.mode(m).is_some()).count(),
        "parsed"
    );
    Ok(stats)
}

/// One tick per vehicle entry; skipped listing rows are not counted.
fn progress_bar(catalog: &Catalog) -> Result<ProgressBar> {
    let pb = ProgressBar::new(catalog.entries().count() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );
    Ok(pb)
}

/// Walks the catalog and sinks one record per vehicle, in listing order.
///
/// Strictly sequential: each vehicle is fetched, parsed and stored before
/// the next fetch starts. The first error aborts the crawl; records already
/// stored stay in the sink. Returns the number of records stored.
pub async fn crawl<F: Fetch, S: RecordSink>(fetcher: &F, sink: &mut S) -> Result<u32> {
    let listing = fetcher
        .fetch(LISTING_PATH)
        .await
        .context("Failed to get a list of vehicles")?;
    let catalog = Catalog::parse(&listing).context("Failed to parse a list of vehicles")?;
    let parser = DetailParser::new()?;

    let pb = progress_bar(&catalog)?;

    let mut id: u32 = 0;
    for identity in catalog.entries() {
        let stats = vehicle_stats(fetcher, &parser, &identity.detail_ref)
            .await
            .with_context(|| format!("Vehicle {:?} ({})", identity.name, identity.detail_ref))?;
        let record = record::assemble(identity, stats, id);
        sink.store(&record).context("Failed to dump vehicle data")?;

        info!(
            id,
            reference = %record.identity.detail_ref,
            name = %record.identity.name,
            country = %record.identity.country,
            role = %record.identity.role,
            "done"
        );
        id += 1;
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Saved {} vehicles ({} listing rows)", id, catalog.row_count());
    Ok(id)
}
