//! Holiday data file persistence.
//!
//! The file is a JSON object with one entry per generated year plus the
//! reserved `custom` entry for user-added days off:
//!
//! ```text
//! {
//!   "custom": { "2024-12-27": "Brückentag" },
//!   "2024": { "2024-01-01": "Neujahr", ... }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::calculation::generate_holidays;
use crate::error::{EngineError, EngineResult};
use crate::models::HolidayMap;

/// Reserved key of the user-added days off.
const CUSTOM_KEY: &str = "custom";

/// Contents of the holiday data file.
///
/// Generation only ever touches the per-year entries; `custom` is owned by
/// the user. Entries that are not a `YYYY-MM-DD` → name pair are kept
/// verbatim and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct HolidayFile {
    /// User-added days off, independent of any generated year.
    pub custom: HolidayMap,
    /// Generated holidays keyed by year.
    pub years: BTreeMap<String, HolidayMap>,
    /// Entries of `custom` or a year that could not be read as a date and
    /// name, keyed by section.
    unrecognized_entries: BTreeMap<String, Map<String, Value>>,
    /// Top-level entries that are not a holiday map.
    unrecognized: Map<String, Value>,
}

impl HolidayFile {
    /// Loads the file at `path`.
    ///
    /// A missing file is created empty. A file that is not a JSON object is
    /// replaced by an empty one, which is then returned. A `null` or missing
    /// `custom` entry counts as empty.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            let initial = Self::default();
            initial.save(path)?;
            return Ok(initial);
        }

        let raw = fs::read_to_string(path).map_err(|e| file_error(path, e))?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => Ok(Self::from_entries(entries)),
            Ok(_) => {
                warn!(path = %path.display(), "holiday file is not a JSON object, resetting it");
                reset(path)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "holiday file unreadable, resetting it"
                );
                reset(path)
            }
        }
    }

    /// Writes the file as pretty-printed JSON, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> EngineResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| file_error(path, e))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| file_error(path, e))?;
        fs::write(path, json).map_err(|e| file_error(path, e))
    }

    fn from_entries(entries: Map<String, Value>) -> Self {
        let mut file = Self::default();

        for (key, value) in entries {
            match value {
                Value::Null if key == CUSTOM_KEY => {}
                Value::Object(entries) => {
                    let (parsed, unrecognized) = split_entries(&key, entries);
                    if !unrecognized.is_empty() {
                        file.unrecognized_entries.insert(key.clone(), unrecognized);
                    }
                    if key == CUSTOM_KEY {
                        file.custom = parsed;
                    } else {
                        file.years.insert(key, parsed);
                    }
                }
                value => {
                    warn!(key = %key, "holiday file entry is not a holiday map, keeping it as is");
                    file.unrecognized.insert(key, value);
                }
            }
        }

        file
    }

    /// Returns the generated holidays of `year`.
    pub fn year(&self, year: i32) -> Option<&HolidayMap> {
        self.years.get(&year.to_string())
    }

    /// Replaces the entry of `year` with freshly generated holidays.
    pub fn ensure_year(&mut self, year: i32, region_code: &str) -> &HolidayMap {
        let key = year.to_string();
        self.unrecognized.remove(&key);
        self.unrecognized_entries.remove(&key);

        let holidays = generate_holidays(year, region_code);
        let entry = self.years.entry(key).or_default();
        *entry = holidays;
        entry
    }

    /// Adds a custom day off, replacing any entry on the same date.
    pub fn add_custom(&mut self, date: NaiveDate, name: &str) -> EngineResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidHoliday {
                message: format!("name for {date} must not be empty"),
            });
        }
        if let Some(entries) = self.unrecognized_entries.get_mut(CUSTOM_KEY) {
            entries.remove(&date.to_string());
        }
        self.custom.insert(date, name.to_string());
        Ok(())
    }

    /// Removes a generated holiday, returning its name.
    pub fn remove_from_year(&mut self, year: i32, date: NaiveDate) -> Option<String> {
        self.years.get_mut(&year.to_string())?.remove(&date)
    }

    /// Removes a custom day off, returning its name.
    pub fn remove_custom(&mut self, date: NaiveDate) -> Option<String> {
        self.custom.remove(&date)
    }

    /// Removes the day off on `date`, custom entries first.
    pub fn remove(&mut self, date: NaiveDate) -> Option<String> {
        self.remove_custom(date)
            .or_else(|| self.remove_from_year(date.year(), date))
    }

    /// Custom entries kept verbatim because they could not be read.
    pub fn unrecognized_custom(&self) -> Option<&Map<String, Value>> {
        self.unrecognized_entries.get(CUSTOM_KEY)
    }

    /// Generated holidays of `year` overlaid with the custom days off in
    /// that year. Custom names win on shared dates.
    pub fn merged_for_year(&self, year: i32) -> HolidayMap {
        let mut merged = self.year(year).cloned().unwrap_or_default();
        merged.extend(
            self.custom
                .iter()
                .filter(|(date, _)| date.year() == year)
                .map(|(date, name)| (*date, name.clone())),
        );
        merged
    }

    /// Name of the holiday or custom day off on `date`, if any.
    pub fn name_for(&self, date: NaiveDate) -> Option<&str> {
        self.custom
            .get(&date)
            .or_else(|| self.year(date.year())?.get(&date))
            .map(String::as_str)
    }
}

impl From<Value> for HolidayFile {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(entries) => Self::from_entries(entries),
            Value::Null => Self::default(),
            _ => {
                warn!("holiday data is not a JSON object, ignoring it");
                Self::default()
            }
        }
    }
}

impl From<HolidayFile> for Value {
    fn from(file: HolidayFile) -> Self {
        let mut pending = file.unrecognized_entries;
        let mut root = file.unrecognized;

        for (year, holidays) in file.years {
            let entries = section_entries(&mut pending, &year, holidays);
            root.insert(year, entries);
        }
        let custom = section_entries(&mut pending, CUSTOM_KEY, file.custom);
        root.insert(CUSTOM_KEY.to_string(), custom);

        Value::Object(root)
    }
}

/// Readable holidays of a section merged back with its unreadable entries.
fn section_entries(
    pending: &mut BTreeMap<String, Map<String, Value>>,
    key: &str,
    holidays: HolidayMap,
) -> Value {
    let mut entries = pending.remove(key).unwrap_or_default();
    entries.extend(holiday_entries(holidays));
    Value::Object(entries)
}

fn holiday_entries(holidays: HolidayMap) -> impl Iterator<Item = (String, Value)> {
    holidays
        .into_iter()
        .map(|(date, name)| (date.to_string(), Value::String(name)))
}

/// Splits raw entries into readable `date → name` pairs and the rest.
fn split_entries(section: &str, entries: Map<String, Value>) -> (HolidayMap, Map<String, Value>) {
    let mut parsed = HolidayMap::new();
    let mut unrecognized = Map::new();

    for (key, value) in entries {
        match (key.parse::<NaiveDate>(), value) {
            (Ok(date), Value::String(name)) => {
                parsed.insert(date, name);
            }
            (_, value) => {
                warn!(section, key = %key, "unrecognized holiday entry, keeping it as is");
                unrecognized.insert(key, value);
            }
        }
    }

    (parsed, unrecognized)
}

fn reset(path: &Path) -> EngineResult<HolidayFile> {
    let fallback = HolidayFile::default();
    fallback.save(path)?;
    Ok(fallback)
}

/// Generates the holidays of `year` into the file at `path`.
///
/// Performs a read-modify-write of the whole file; callers must not run it
/// concurrently against the same path.
pub fn ensure_holidays_for_year<P: AsRef<Path>>(
    path: P,
    year: i32,
    region_code: &str,
) -> EngineResult<HolidayMap> {
    let path = path.as_ref();
    let mut file = HolidayFile::load(path)?;
    let holidays = file.ensure_year(year, region_code).clone();
    file.save(path)?;

    info!(
        path = %path.display(),
        year,
        region = region_code,
        count = holidays.len(),
        "holidays generated"
    );
    Ok(holidays)
}

fn file_error(path: &Path, err: impl std::fmt::Display) -> EngineError {
    EngineError::HolidayFile {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
