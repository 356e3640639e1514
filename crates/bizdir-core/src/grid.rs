//! The city × category grid the ingestion job sweeps.
//!
//! Cells are enumerated cities-outer, categories-inner, in file order, so a
//! given configuration always produces the same visitation order.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl City {
    #[must_use]
    pub fn new(name: &str, lat: f64, lng: f64) -> Self {
        Self {
            name: name.to_string(),
            lat,
            lng,
        }
    }
}

/// A provider place type (e.g. `shopping_mall`) and the label stored on
/// business rows for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceCategory {
    pub tag: String,
    #[serde(default)]
    label: Option<String>,
}

impl PlaceCategory {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(tag: &str, label: &str) -> Self {
        Self {
            tag: tag.to_string(),
            label: Some(label.to_string()),
        }
    }

    /// Stored category label. Falls back to the tag with underscores
    /// replaced by spaces.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.tag.replace('_', " "),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub city: City,
    pub category: PlaceCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestGrid {
    pub cities: Vec<City>,
    pub categories: Vec<PlaceCategory>,
}

impl IngestGrid {
    /// Every (city, category) pair, cities-outer.
    #[must_use]
    pub fn cells(&self) -> Vec<GridCell> {
        self.cities
            .iter()
            .flat_map(|city| {
                self.categories.iter().map(move |category| GridCell {
                    city: city.clone(),
                    category: category.clone(),
                })
            })
            .collect()
    }

    /// Narrow the grid to the named cities and category tags. Empty filters
    /// keep everything. Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a filter names something the
    /// grid does not contain.
    pub fn restrict(&self, cities: &[String], tags: &[String]) -> Result<Self, ConfigError> {
        for wanted in cities {
            if !self
                .cities
                .iter()
                .any(|c| c.name.eq_ignore_ascii_case(wanted))
            {
                return Err(ConfigError::Validation(format!(
                    "unknown city '{wanted}'"
                )));
            }
        }
        for wanted in tags {
            if !self
                .categories
                .iter()
                .any(|c| c.tag.eq_ignore_ascii_case(wanted))
            {
                return Err(ConfigError::Validation(format!(
                    "unknown category '{wanted}'"
                )));
            }
        }

        let cities = self
            .cities
            .iter()
            .filter(|c| cities.is_empty() || cities.iter().any(|w| c.name.eq_ignore_ascii_case(w)))
            .cloned()
            .collect();
        let categories = self
            .categories
            .iter()
            .filter(|c| tags.is_empty() || tags.iter().any(|w| c.tag.eq_ignore_ascii_case(w)))
            .cloned()
            .collect();

        Ok(Self { cities, categories })
    }
}

/// Four Ghanaian cities × six everyday place types.
#[must_use]
pub fn default_grid() -> IngestGrid {
    IngestGrid {
        cities: vec![
            City::new("Accra", 5.603_7, -0.187_0),
            City::new("Kumasi", 6.688_5, -1.624_4),
            City::new("Tamale", 9.406_7, -0.839_3),
            City::new("Cape Coast", 5.131_5, -1.279_5),
        ],
        categories: ["restaurant", "store", "shopping_mall", "hotel", "beauty_salon", "cafe"]
            .into_iter()
            .map(PlaceCategory::new)
            .collect(),
    }
}

/// Load and validate a grid from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_grid(path: &Path) -> Result<IngestGrid, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::GridFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_grid(&content)
}

/// Parse and validate grid YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_grid(content: &str) -> Result<IngestGrid, ConfigError> {
    let grid: IngestGrid = serde_yaml::from_str(content)?;
    validate_grid(&grid)?;
    Ok(grid)
}

fn validate_grid(grid: &IngestGrid) -> Result<(), ConfigError> {
    if grid.cities.is_empty() {
        return Err(ConfigError::Validation(
            "grid must list at least one city".to_string(),
        ));
    }
    if grid.categories.is_empty() {
        return Err(ConfigError::Validation(
            "grid must list at least one category".to_string(),
        ));
    }

    let mut seen_cities = HashSet::new();
    for city in &grid.cities {
        if city.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "city name must be non-empty".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&city.lat) || !(-180.0..=180.0).contains(&city.lng) {
            return Err(ConfigError::Validation(format!(
                "city '{}' has out-of-range coordinates ({}, {})",
                city.name, city.lat, city.lng
            )));
        }
        if !seen_cities.insert(city.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate city: '{}'",
                city.name
            )));
        }
    }

    let mut seen_tags = HashSet::new();
    for category in &grid.categories {
        if category.tag.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category tag must be non-empty".to_string(),
            ));
        }
        if !seen_tags.insert(category.tag.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category: '{}'",
                category.tag
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_is_valid_and_ordered_cities_outer() {
        let grid = default_grid();
        validate_grid(&grid).expect("default grid validates");

        let cells = grid.cells();
        assert_eq!(cells.len(), 24);
        assert_eq!(cells[0].city.name, "Accra");
        assert_eq!(cells[0].category.tag, "restaurant");
        assert_eq!(cells[1].city.name, "Accra");
        assert_eq!(cells[1].category.tag, "store");
        assert_eq!(cells[6].city.name, "Kumasi");
        assert_eq!(cells[23].city.name, "Cape Coast");
        assert_eq!(cells[23].category.tag, "cafe");
    }

    #[test]
    fn cells_are_reproducible() {
        let grid = default_grid();
        assert_eq!(grid.cells(), grid.cells());
    }

    #[test]
    fn label_defaults_to_tag_without_underscores() {
        assert_eq!(PlaceCategory::new("shopping_mall").label(), "shopping mall");
        assert_eq!(PlaceCategory::new("cafe").label(), "cafe");
        assert_eq!(
            PlaceCategory::with_label("beauty_salon", "Beauty & Spa").label(),
            "Beauty & Spa"
        );
    }

    #[test]
    fn parse_grid_reads_cities_and_categories() {
        let yaml = r"
cities:
  - name: Accra
    lat: 5.6037
    lng: -0.1870
categories:
  - tag: restaurant
  - tag: beauty_salon
    label: salon
";
        let grid = parse_grid(yaml).expect("valid grid");
        assert_eq!(grid.cities.len(), 1);
        assert_eq!(grid.categories.len(), 2);
        assert_eq!(grid.categories[0].label(), "restaurant");
        assert_eq!(grid.categories[1].label(), "salon");
    }

    #[test]
    fn parse_grid_rejects_duplicate_city() {
        let yaml = r"
cities:
  - { name: Accra, lat: 5.6, lng: -0.18 }
  - { name: accra, lat: 5.6, lng: -0.18 }
categories:
  - tag: cafe
";
        let err = parse_grid(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate city")));
    }

    #[test]
    fn parse_grid_rejects_out_of_range_coordinates() {
        let yaml = r"
cities:
  - { name: Nowhere, lat: 95.0, lng: 0.0 }
categories:
  - tag: cafe
";
        assert!(matches!(
            parse_grid(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn parse_grid_rejects_empty_categories() {
        let yaml = r"
cities:
  - { name: Accra, lat: 5.6, lng: -0.18 }
categories: []
";
        assert!(matches!(
            parse_grid(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn parse_grid_surfaces_yaml_errors() {
        assert!(matches!(
            parse_grid("cities: [not, a, city"),
            Err(ConfigError::GridFileParse(_))
        ));
    }

    #[test]
    fn load_grid_reports_missing_file() {
        let err = load_grid(Path::new("/definitely/not/here/grid.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::GridFileIo { .. }));
    }

    #[test]
    fn restrict_narrows_grid_case_insensitively() {
        let grid = default_grid()
            .restrict(&["accra".to_string()], &["RESTAURANT".to_string()])
            .expect("known filters");
        let cells = grid.cells();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].city.name, "Accra");
        assert_eq!(cells[0].category.tag, "restaurant");
    }

    #[test]
    fn restrict_with_empty_filters_keeps_everything() {
        let grid = default_grid().restrict(&[], &[]).unwrap();
        assert_eq!(grid, default_grid());
    }

    #[test]
    fn restrict_rejects_unknown_city() {
        let err = default_grid()
            .restrict(&["Lagos".to_string()], &[])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("Lagos")));
    }
}
