//! Library operating parameters edited by the dashboard controls.

use serde::{Deserialize, Serialize};

/// Identifies one numeric field of [`LibraryParameters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterField {
    TotalStaff,
    TotalIncome,
    HoursOpen,
    TotalCollection,
    Population,
    Latitude,
    Longitude,
}

impl ParameterField {
    pub const ALL: [ParameterField; 7] = [
        ParameterField::TotalStaff,
        ParameterField::TotalIncome,
        ParameterField::HoursOpen,
        ParameterField::TotalCollection,
        ParameterField::Population,
        ParameterField::Latitude,
        ParameterField::Longitude,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ParameterField::TotalStaff => "Total Staff",
            ParameterField::TotalIncome => "Annual Income",
            ParameterField::HoursOpen => "Weekly Hours",
            ParameterField::TotalCollection => "Collection Size",
            ParameterField::Population => "Service Population",
            ParameterField::Latitude => "Latitude",
            ParameterField::Longitude => "Longitude",
        }
    }
}

/// Operating parameters of a single library.
///
/// Identifying metadata (`library_name`, `city`, `state`) is carried for
/// display only and never enters the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryParameters {
    pub total_staff: f64,
    pub total_income: f64,
    /// Weekly operating hours
    pub hours_open: f64,
    pub total_collection: f64,
    pub population: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub library_name: String,
    pub city: String,
    pub state: String,
}

impl Default for LibraryParameters {
    fn default() -> Self {
        Self {
            total_staff: 10.0,
            total_income: 500_000.0,
            hours_open: 50.0,
            total_collection: 50_000.0,
            population: 25_000.0,
            latitude: 39.5,
            longitude: -98.5,
            library_name: "My Library".to_string(),
            city: "Sample City".to_string(),
            state: "XX".to_string(),
        }
    }
}

impl LibraryParameters {
    /// Read a numeric field
    #[must_use]
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::TotalStaff => self.total_staff,
            ParameterField::TotalIncome => self.total_income,
            ParameterField::HoursOpen => self.hours_open,
            ParameterField::TotalCollection => self.total_collection,
            ParameterField::Population => self.population,
            ParameterField::Latitude => self.latitude,
            ParameterField::Longitude => self.longitude,
        }
    }

    /// Overwrite a numeric field
    pub fn set(&mut self, field: ParameterField, value: f64) {
        match field {
            ParameterField::TotalStaff => self.total_staff = value,
            ParameterField::TotalIncome => self.total_income = value,
            ParameterField::HoursOpen => self.hours_open = value,
            ParameterField::TotalCollection => self.total_collection = value,
            ParameterField::Population => self.population = value,
            ParameterField::Latitude => self.latitude = value,
            ParameterField::Longitude => self.longitude = value,
        }
    }

    /// Copy of these parameters with one field replaced
    #[must_use]
    pub fn with(&self, field: ParameterField, value: f64) -> Self {
        let mut modified = self.clone();
        modified.set(field, value);
        modified
    }

    /// Staff per 1000 residents
    #[must_use]
    pub fn staff_ratio(&self) -> f64 {
        self.total_staff / (self.population / 1000.0)
    }

    /// Collection items per resident
    #[must_use]
    pub fn collection_ratio(&self) -> f64 {
        self.total_collection / self.population
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_round_trip_every_field() {
        let mut params = LibraryParameters::default();
        for (i, field) in ParameterField::ALL.iter().enumerate() {
            let value = 100.0 + i as f64;
            params.set(*field, value);
            assert_eq!(params.get(*field), value, "{field:?}");
        }
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let params = LibraryParameters::default();
        let modified = params.with(ParameterField::HoursOpen, 72.0);

        assert_eq!(params.hours_open, 50.0);
        assert_eq!(modified.hours_open, 72.0);
        assert_eq!(modified.total_staff, params.total_staff);
        assert_eq!(modified.library_name, params.library_name);
    }

    #[test]
    fn test_reference_ratios() {
        let params = LibraryParameters::default();
        assert!((params.staff_ratio() - 0.4).abs() < 1e-12);
        assert!((params.collection_ratio() - 2.0).abs() < 1e-12);
    }
}
