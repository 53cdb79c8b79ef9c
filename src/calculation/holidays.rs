//! Public holiday generation for German federal states.
//!
//! Holidays are described by the declarative [`HOLIDAY_RULES`] table. Each
//! entry pairs a date rule with the set of regions observing it (`None` for
//! nationwide holidays). The table is evaluated in order and a later entry
//! overwrites an earlier one falling on the same date.

use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};
use tracing::debug;

use crate::models::{HolidayMap, Region};

use super::easter::easter_sunday;

/// How the date of a holiday is determined for a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    /// The same calendar date every year.
    Fixed {
        /// Month (1-12).
        month: u32,
        /// Day of month.
        day: u32,
    },
    /// A day offset from Easter Sunday.
    EasterOffset(i64),
    /// See [`repentance_day`].
    RepentanceDay,
}

impl DateRule {
    /// Resolves the rule for `year`.
    ///
    /// `easter` is the precomputed Easter Sunday of that year.
    pub fn resolve(&self, year: i32, easter: Option<NaiveDate>) -> Option<NaiveDate> {
        match *self {
            DateRule::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            DateRule::EasterOffset(days) => easter?.checked_add_signed(Duration::days(days)),
            DateRule::RepentanceDay => repentance_day(year),
        }
    }
}

/// A named holiday, its date rule and the regions observing it.
#[derive(Debug, Clone, Copy)]
pub struct HolidayRule {
    /// Holiday name.
    pub name: &'static str,
    /// Date rule.
    pub date: DateRule,
    /// Observing regions; `None` means every region.
    pub regions: Option<&'static [Region]>,
}

impl HolidayRule {
    /// Whether the holiday is observed in `region`.
    ///
    /// Nationwide holidays apply even when the region is unknown.
    pub fn applies_to(&self, region: Option<Region>) -> bool {
        match self.regions {
            None => true,
            Some(regions) => region.is_some_and(|region| regions.contains(&region)),
        }
    }
}

const fn fixed(name: &'static str, month: u32, day: u32) -> HolidayRule {
    HolidayRule {
        name,
        date: DateRule::Fixed { month, day },
        regions: None,
    }
}

const fn easter(name: &'static str, days: i64) -> HolidayRule {
    HolidayRule {
        name,
        date: DateRule::EasterOffset(days),
        regions: None,
    }
}

const fn regional(name: &'static str, date: DateRule, regions: &'static [Region]) -> HolidayRule {
    HolidayRule {
        name,
        date,
        regions: Some(regions),
    }
}

/// Holiday table in insertion order.
pub const HOLIDAY_RULES: &[HolidayRule] = &[
    fixed("Neujahr", 1, 1),
    fixed("Tag der Arbeit", 5, 1),
    fixed("Tag der Deutschen Einheit", 10, 3),
    fixed("1. Weihnachtstag", 12, 25),
    fixed("2. Weihnachtstag", 12, 26),
    fixed("Heiligabend", 12, 24),
    fixed("Silvester", 12, 31),
    easter("Karfreitag", -2),
    easter("Ostermontag", 1),
    easter("Christi Himmelfahrt", 39),
    easter("Pfingstmontag", 50),
    regional(
        "Heilige Drei Könige",
        DateRule::Fixed { month: 1, day: 6 },
        &[Region::BadenWuerttemberg, Region::Bayern, Region::SachsenAnhalt],
    ),
    regional(
        "Fronleichnam",
        DateRule::EasterOffset(60),
        &[
            Region::BadenWuerttemberg,
            Region::Bayern,
            Region::Hessen,
            Region::NordrheinWestfalen,
            Region::RheinlandPfalz,
            Region::Saarland,
        ],
    ),
    regional(
        "Reformationstag",
        DateRule::Fixed { month: 10, day: 31 },
        &[
            Region::Brandenburg,
            Region::MecklenburgVorpommern,
            Region::Sachsen,
            Region::SachsenAnhalt,
            Region::Thueringen,
            Region::SchleswigHolstein,
            Region::Bremen,
            Region::Hamburg,
            Region::Niedersachsen,
        ],
    ),
    regional(
        "Allerheiligen",
        DateRule::Fixed { month: 11, day: 1 },
        &[
            Region::BadenWuerttemberg,
            Region::Bayern,
            Region::NordrheinWestfalen,
            Region::RheinlandPfalz,
            Region::Saarland,
        ],
    ),
    regional(
        "Internationaler Frauentag",
        DateRule::Fixed { month: 3, day: 8 },
        &[Region::Berlin, Region::MecklenburgVorpommern],
    ),
    regional("Buß- und Bettag", DateRule::RepentanceDay, &[Region::Sachsen]),
];

/// Generates the public holidays of `year` for a region code.
///
/// An unrecognized code yields only the nationwide holidays.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use worktime_engine::calculation::generate_holidays;
///
/// let holidays = generate_holidays(2024, "HE");
/// let corpus_christi = NaiveDate::from_ymd_opt(2024, 5, 30).unwrap();
/// assert_eq!(holidays.get(&corpus_christi).map(String::as_str), Some("Fronleichnam"));
/// ```
pub fn generate_holidays(year: i32, region_code: &str) -> HolidayMap {
    let region = Region::parse_lenient(region_code);
    if region.is_none() {
        debug!(region_code, "unknown region, generating nationwide holidays only");
    }
    generate_holidays_for(year, region)
}

/// Generates the public holidays of `year` for an optional region.
pub fn generate_holidays_for(year: i32, region: Option<Region>) -> HolidayMap {
    let easter = easter_sunday(year);
    let mut holidays = HolidayMap::new();

    for rule in HOLIDAY_RULES.iter().filter(|rule| rule.applies_to(region)) {
        match rule.date.resolve(year, easter) {
            Some(date) => {
                holidays.insert(date, rule.name.to_string());
            }
            None => debug!(year, holiday = rule.name, "date not representable, skipped"),
        }
    }

    holidays
}

/// Day of prayer and repentance as observed in Saxony.
///
/// Takes the nearest Wednesday on or before November 23 and goes back one
/// more week from there.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use worktime_engine::calculation::repentance_day;
///
/// assert_eq!(repentance_day(2024), NaiveDate::from_ymd_opt(2024, 11, 13));
/// ```
pub fn repentance_day(year: i32) -> Option<NaiveDate> {
    let anchor = NaiveDate::from_ymd_opt(year, 11, 23)?;
    let since_wednesday = (anchor.weekday().num_days_from_monday() + 7
        - Weekday::Wed.num_days_from_monday())
        % 7;
    anchor.checked_sub_days(Days::new(u64::from(since_wednesday) + 7))
}
