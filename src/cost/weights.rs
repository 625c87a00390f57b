use std::path::Path;
use log::debug;

use super::{DeliveryMode, ZoneType};
use crate::collections::FxHashMap;
use crate::errors::RouteError;


/// Zone multipliers for each delivery mode
/// Zones missing from a mode's table cost multiplier 1
#[derive(Clone, Debug, PartialEq)]
pub struct WeightTable {
    tables: [FxHashMap<ZoneType, f64>; 3], // indexed by DeliveryMode::index
}

impl WeightTable {

    /// Table with every multiplier at 1 - all modes cost the raw length
    pub fn uniform() -> Self {
        Self {
            tables: Default::default(),
        }
    }

    /// The reference delivery table
    ///
    /// | zone          | human | motorbike | car |
    /// |---------------|-------|-----------|-----|
    /// | school_zone   | 1     | 2         | 2   |
    /// | traffic_light | 1.5   | 1.2       | 1.5 |
    /// | narrow_alley  | 3     | 2         | 1   |
    /// | intersection  | 1.2   | 1         | 1.5 |
    pub fn reference() -> Self {
        let rows = [
            (ZoneType::SchoolZone, [1.0, 2.0, 2.0]),
            (ZoneType::TrafficLight, [1.5, 1.2, 1.5]),
            (ZoneType::NarrowAlley, [3.0, 2.0, 1.0]),
            (ZoneType::Intersection, [1.2, 1.0, 1.5]),
        ];

        let mut table = Self::uniform();
        for (zone, multipliers) in rows {
            for mode in DeliveryMode::ALL {
                table.tables[mode.index()].insert(zone.clone(), multipliers[mode.index()]);
            }
        }
        table
    }

    /// Set a single multiplier, replacing any previous value
    /// Multipliers must be finite and strictly positive
    pub fn with_multiplier(mut self, mode: DeliveryMode, zone: impl Into<ZoneType>, multiplier: f64) -> Result<Self, RouteError> {
        let zone = zone.into();
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(RouteError::InvalidMultiplier { mode, zone, multiplier });
        }
        self.tables[mode.index()].insert(zone, multiplier);
        Ok(self)
    }

    /// Multiplier for a zone under a mode, 1 if the table does not name it
    pub fn multiplier(&self, mode: DeliveryMode, zone: &ZoneType) -> f64 {
        self.tables[mode.index()].get(zone).copied().unwrap_or(1.0)
    }

    /// Parse a table from TOML, one section per mode:
    ///
    /// ```toml
    /// [motorbike]
    /// school_zone = 2.0
    /// ```
    ///
    /// Modes missing from the document get an empty table
    pub fn from_toml_str(input: &str) -> Result<Self, RouteError> {
        let raw: FxHashMap<String, FxHashMap<String, f64>> = toml::from_str(input)?;

        let mut table = Self::uniform();
        for (mode_name, zones) in raw {
            let mode: DeliveryMode = mode_name.parse()?;
            for (zone, multiplier) in zones {
                table = table.with_multiplier(mode, zone, multiplier)?;
            }
        }
        debug!("loaded weight table with {} entries", table.len());
        Ok(table)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RouteError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Number of explicit (mode, zone) entries
    pub fn len(&self) -> usize {
        self.tables.iter().map(|t| t.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::reference()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reference_table_values() {
        let table = WeightTable::reference();

        assert_eq!(table.multiplier(DeliveryMode::Human, &ZoneType::SchoolZone), 1.0);
        assert_eq!(table.multiplier(DeliveryMode::Motorbike, &ZoneType::SchoolZone), 2.0);
        assert_eq!(table.multiplier(DeliveryMode::Car, &ZoneType::SchoolZone), 2.0);
        assert_eq!(table.multiplier(DeliveryMode::Human, &ZoneType::TrafficLight), 1.5);
        assert_eq!(table.multiplier(DeliveryMode::Motorbike, &ZoneType::TrafficLight), 1.2);
        assert_eq!(table.multiplier(DeliveryMode::Car, &ZoneType::TrafficLight), 1.5);
        assert_eq!(table.multiplier(DeliveryMode::Human, &ZoneType::NarrowAlley), 3.0);
        assert_eq!(table.multiplier(DeliveryMode::Motorbike, &ZoneType::NarrowAlley), 2.0);
        assert_eq!(table.multiplier(DeliveryMode::Car, &ZoneType::NarrowAlley), 1.0);
        assert_eq!(table.multiplier(DeliveryMode::Human, &ZoneType::Intersection), 1.2);
        assert_eq!(table.multiplier(DeliveryMode::Motorbike, &ZoneType::Intersection), 1.0);
        assert_eq!(table.multiplier(DeliveryMode::Car, &ZoneType::Intersection), 1.5);
        assert_eq!(table.len(), 12);
    }

    #[test]
    fn test_normal_and_unknown_zones_default_to_one() {
        let table = WeightTable::reference();

        for mode in DeliveryMode::ALL {
            assert_eq!(table.multiplier(mode, &ZoneType::Normal), 1.0);
            assert_eq!(table.multiplier(mode, &ZoneType::from("ferry")), 1.0);
        }
    }

    #[test]
    fn test_with_multiplier_overrides_one_mode() {
        let table = WeightTable::uniform()
            .with_multiplier(DeliveryMode::Car, "ferry", 4.0)
            .unwrap();

        assert_eq!(table.multiplier(DeliveryMode::Car, &ZoneType::from("ferry")), 4.0);
        assert_eq!(table.multiplier(DeliveryMode::Human, &ZoneType::from("ferry")), 1.0);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_with_multiplier_rejects_non_positive() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = WeightTable::uniform().with_multiplier(DeliveryMode::Human, ZoneType::SchoolZone, bad);
            assert!(matches!(result, Err(RouteError::InvalidMultiplier { .. })), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_from_toml_str() {
        let input = r#"
            [human]
            school_zone = 1
            narrow_alley = 2.5

            [car]
            ferry = 3.0
        "#;
        let table = WeightTable::from_toml_str(input).unwrap();

        assert_eq!(table.multiplier(DeliveryMode::Human, &ZoneType::NarrowAlley), 2.5);
        assert_eq!(table.multiplier(DeliveryMode::Human, &ZoneType::SchoolZone), 1.0);
        assert_eq!(table.multiplier(DeliveryMode::Car, &ZoneType::from("ferry")), 3.0);
        // motorbike section missing entirely
        assert_eq!(table.multiplier(DeliveryMode::Motorbike, &ZoneType::NarrowAlley), 1.0);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_mode() {
        let result = WeightTable::from_toml_str("[bicycle]\nschool_zone = 1.0\n");
        assert!(matches!(result, Err(RouteError::UnknownMode(m)) if m == "bicycle"));
    }

    #[test]
    fn test_from_toml_str_rejects_malformed_input() {
        let result = WeightTable::from_toml_str("[human]\nschool_zone = \"fast\"\n");
        assert!(matches!(result, Err(RouteError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[motorbike]\ntraffic_light = 1.2").unwrap();

        let table = WeightTable::from_file(file.path()).unwrap();
        assert_eq!(table.multiplier(DeliveryMode::Motorbike, &ZoneType::TrafficLight), 1.2);

        assert!(matches!(WeightTable::from_file("/definitely/not/here.toml"), Err(RouteError::Io(_))));
    }
}
