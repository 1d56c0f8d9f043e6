//! Substring search and prefix suggestions over the inventory
//!
//! Search flattens the inventory to one hit per device. Locations without
//! devices never produce hits, even when their name matches.

use std::collections::HashSet;

use serde::Serialize;

use super::{Device, Region};

const MAX_SUGGESTIONS: usize = 10;
const MAX_SUGGESTIONS_PER_SOURCE: usize = 5;

/// Which part of the inventory a search term applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SearchField {
    #[default]
    Global,
    Location,
    Ip,
    Type,
}

/// A search request
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub term: String,
    pub field: SearchField,
    /// Restrict to one region (ignored for global searches)
    pub region: Option<String>,
}

/// A matching device together with where it lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub region_name: String,
    pub location_name: String,
    pub device: Device,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, field: SearchField) -> Self {
        SearchQuery {
            term: term.into(),
            field,
            region: None,
        }
    }

    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    fn applies_to(&self, region: &Region) -> bool {
        match (&self.region, self.field) {
            (_, SearchField::Global) | (None, _) => true,
            (Some(name), _) => region.name == *name,
        }
    }
}

/// Case-insensitive literal substring search
pub fn search(regions: &[Region], query: &SearchQuery) -> Vec<SearchHit> {
    let needle = query.term.trim().to_lowercase();
    let contains = |value: &str| value.to_lowercase().contains(&needle);

    let mut hits = Vec::new();
    for region in regions.iter().filter(|r| query.applies_to(r)) {
        for location in &region.locations {
            for device in &location.devices {
                let matched = match query.field {
                    SearchField::Location => contains(&location.name),
                    SearchField::Ip => contains(&device.ip),
                    SearchField::Type => contains(&device.device_type),
                    SearchField::Global => {
                        contains(&region.name)
                            || contains(&location.name)
                            || contains(&device.device_type)
                            || contains(&device.ip)
                            || contains(&device.description)
                            || contains(&device.status)
                    }
                };

                if matched {
                    hits.push(SearchHit {
                        region_name: region.name.clone(),
                        location_name: location.name.clone(),
                        device: device.clone(),
                    });
                }
            }
        }
    }

    log::debug!(
        "Search '{}' ({:?}) matched {} devices",
        query.term,
        query.field,
        hits.len()
    );
    hits
}

/// Case-insensitive prefix suggestions for autocompletion
pub fn suggest(regions: &[Region], query: &SearchQuery) -> Vec<String> {
    let prefix = query.term.trim().to_lowercase();
    if prefix.is_empty() {
        return Vec::new();
    }

    let scoped: Vec<&Region> = regions.iter().filter(|r| query.applies_to(r)).collect();
    let location_names = || {
        scoped
            .iter()
            .flat_map(|r| r.locations.iter())
            .map(|l| l.name.as_str())
    };
    let devices = || scoped.iter().flat_map(|r| r.devices());

    match query.field {
        SearchField::Location => distinct_prefixed(location_names(), &prefix, MAX_SUGGESTIONS),
        SearchField::Ip => {
            distinct_prefixed(devices().map(|d| d.ip.as_str()), &prefix, MAX_SUGGESTIONS)
        }
        SearchField::Type => distinct_prefixed(
            devices().map(|d| d.device_type.as_str()),
            &prefix,
            MAX_SUGGESTIONS,
        ),
        SearchField::Global => {
            let mut combined = Vec::new();
            combined.extend(distinct_prefixed(
                scoped.iter().map(|r| r.name.as_str()),
                &prefix,
                MAX_SUGGESTIONS_PER_SOURCE,
            ));
            combined.extend(distinct_prefixed(
                location_names(),
                &prefix,
                MAX_SUGGESTIONS_PER_SOURCE,
            ));
            combined.extend(distinct_prefixed(
                devices().map(|d| d.ip.as_str()),
                &prefix,
                MAX_SUGGESTIONS_PER_SOURCE,
            ));
            combined.extend(distinct_prefixed(
                devices().map(|d| d.device_type.as_str()),
                &prefix,
                MAX_SUGGESTIONS_PER_SOURCE,
            ));

            let mut seen = HashSet::new();
            combined.retain(|s| seen.insert(s.clone()));
            combined.truncate(MAX_SUGGESTIONS);
            combined
        }
    }
}

/// Distinct values starting with `prefix` (already lower-cased), first-seen order
fn distinct_prefixed<'a>(
    values: impl Iterator<Item = &'a str>,
    prefix: &str,
    limit: usize,
) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| v.to_lowercase().starts_with(prefix))
        .filter(|v| seen.insert(*v))
        .take(limit)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Location;

    fn sample() -> Vec<Region> {
        let mut hq = Location::new("HQ");
        hq.devices.push(Device::new("Router", "10.0.0.1", "Core", "Up"));
        hq.devices.push(Device::new("Switch", "10.0.0.2", "Access", "Down"));

        let mut branch = Location::new("Harbour Branch");
        branch
            .devices
            .push(Device::new("Firewall", "10.1.0.1", "Edge", "Up"));

        let empty = Location::new("Hangar");

        vec![
            Region::new("East", vec![hq, empty]),
            Region::new("West", vec![branch]),
        ]
    }

    #[test]
    fn test_search_by_ip_substring() {
        let hits = search(&sample(), &SearchQuery::new("0.0.", SearchField::Ip));
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.region_name == "East"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let hits = search(&sample(), &SearchQuery::new("router", SearchField::Type));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].location_name, "HQ");
    }

    #[test]
    fn test_search_term_is_literal() {
        let hits = search(&sample(), &SearchQuery::new("10.0.0.", SearchField::Ip));
        assert_eq!(hits.len(), 2);
        let hits = search(&sample(), &SearchQuery::new("10.0.0.*", SearchField::Ip));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_location_without_devices_has_no_hits() {
        let hits = search(&sample(), &SearchQuery::new("hangar", SearchField::Location));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_region_filter_ignored_for_global() {
        let query = SearchQuery::new("up", SearchField::Global).in_region("West");
        assert_eq!(search(&sample(), &query).len(), 2);

        let query = SearchQuery::new("up", SearchField::Type).in_region("West");
        assert!(search(&sample(), &query).is_empty());

        let query = SearchQuery::new("fire", SearchField::Type).in_region("West");
        assert_eq!(search(&sample(), &query).len(), 1);
    }

    #[test]
    fn test_suggest_location_prefix() {
        let suggestions = suggest(&sample(), &SearchQuery::new("ha", SearchField::Location));
        assert_eq!(suggestions, vec!["Hangar", "Harbour Branch"]);
    }

    #[test]
    fn test_suggest_global_deduplicates() {
        let suggestions = suggest(&sample(), &SearchQuery::new("10.", SearchField::Global));
        assert_eq!(suggestions, vec!["10.0.0.1", "10.0.0.2", "10.1.0.1"]);
    }

    #[test]
    fn test_suggest_empty_term() {
        assert!(suggest(&sample(), &SearchQuery::new("  ", SearchField::Global)).is_empty());
    }
}
