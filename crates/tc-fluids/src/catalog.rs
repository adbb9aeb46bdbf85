//! Fluid catalog: canonical names and aliases accepted at the registry boundary.

use crate::kind::FluidKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluidCatalogEntry {
    pub kind: FluidKind,
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
}

impl FluidCatalogEntry {
    /// Exact, case-insensitive match against id, display name or any alias.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.canonical_id.eq_ignore_ascii_case(name)
            || self.display_name.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }

    /// Substring search, used for listing fluids.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }
}

const CATALOG: [FluidCatalogEntry; FluidKind::COUNT] = [
    FluidCatalogEntry {
        kind: FluidKind::Water,
        canonical_id: "water",
        display_name: "Water",
        aliases: &["steam", "h2o"],
    },
    FluidCatalogEntry {
        kind: FluidKind::Air,
        canonical_id: "air",
        display_name: "Air",
        aliases: &["dry air"],
    },
    FluidCatalogEntry {
        kind: FluidKind::R134a,
        canonical_id: "r134a",
        display_name: "R-134a",
        aliases: &["hfc-134a", "tetrafluoroethane"],
    },
    FluidCatalogEntry {
        kind: FluidKind::R22,
        canonical_id: "r22",
        display_name: "R-22",
        aliases: &["hcfc-22", "chlorodifluoromethane"],
    },
    FluidCatalogEntry {
        kind: FluidKind::CO2,
        canonical_id: "co2",
        display_name: "CO2",
        aliases: &["r744", "r-744", "carbon dioxide"],
    },
];

pub fn catalog() -> &'static [FluidCatalogEntry] {
    &CATALOG
}

pub fn entry(kind: FluidKind) -> &'static FluidCatalogEntry {
    &CATALOG[kind.index()]
}

/// Resolve a user-supplied fluid name.
pub fn lookup(name: &str) -> Option<FluidKind> {
    CATALOG
        .iter()
        .find(|entry| entry.matches_name(name))
        .map(|entry| entry.kind)
}

pub fn filter_catalog(query: &str) -> Vec<FluidCatalogEntry> {
    CATALOG
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_ordered_by_kind_index() {
        for kind in FluidKind::ALL {
            assert_eq!(entry(kind).kind, kind);
        }
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(lookup("Steam"), Some(FluidKind::Water));
        assert_eq!(lookup("H2O"), Some(FluidKind::Water));
        assert_eq!(lookup("R744"), Some(FluidKind::CO2));
        assert_eq!(lookup("carbon dioxide"), Some(FluidKind::CO2));
        assert_eq!(lookup("r-134a"), Some(FluidKind::R134a));
        assert_eq!(lookup("nitrogen"), None);
    }

    #[test]
    fn query_filters_by_substring() {
        let hits = filter_catalog("134");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, FluidKind::R134a);
        assert_eq!(filter_catalog("").len(), FluidKind::COUNT);
    }
}
