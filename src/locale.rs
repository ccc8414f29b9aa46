//! Static localization tables for report labels, templates and weekday abbreviations.
//!
//! The tables are immutable statics. They are never mutated, so concurrent readers need no
//! synchronization.

/// Table header labels in column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableHeaders {
    pub date: &'static str,
    pub total_distance: &'static str,
    pub occupied_distance: &'static str,
    pub tour: &'static str,
    pub revenue: &'static str,
}

impl TableHeaders {
    /// Returns the labels as an array in column order.
    pub fn as_array(&self) -> [&'static str; 5] {
        [
            self.date,
            self.total_distance,
            self.occupied_distance,
            self.tour,
            self.revenue,
        ]
    }
}

/// Ordering of the day, month and year fields when printing a calendar date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateStyle {
    /// `31.12.2024`
    DayMonthYearDotted,
    /// `31/12/2024`
    DayMonthYearSlashed,
    /// `12/31/2024`
    MonthDayYearSlashed,
}

impl DateStyle {
    /// `chrono` format string for this style.
    pub fn pattern(self) -> &'static str {
        match self {
            DateStyle::DayMonthYearDotted => "%d.%m.%Y",
            DateStyle::DayMonthYearSlashed => "%d/%m/%Y",
            DateStyle::MonthDayYearSlashed => "%m/%d/%Y",
        }
    }
}

/// Translated strings for one supported locale.
///
/// Templates use positional placeholders (`{0}`, `{1}`, ...) filled by [`fill_template`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalizationEntry {
    pub tag: &'static str,
    pub headers: TableHeaders,
    /// Footer disclaimer; `{0}` is the generation date.
    pub footer_template: &'static str,
    /// Paragraph above the table; `{0}` is the month and `{1}` the year.
    pub preface_template: &'static str,
    pub title: &'static str,
    pub total_label: &'static str,
    pub date_style: DateStyle,
}

impl LocalizationEntry {
    /// Language family of this locale, such as `de` for `de-CH`.
    pub fn family(&self) -> &'static str {
        language_family(self.tag)
    }
}

const GERMAN_HEADERS: TableHeaders = TableHeaders {
    date: "Datum",
    total_distance: "Gesamt km",
    occupied_distance: "Besetzt km",
    tour: "Tour",
    revenue: "Tageskasse",
};

const ENGLISH_HEADERS: TableHeaders = TableHeaders {
    date: "Date",
    total_distance: "Total km",
    occupied_distance: "Occupied km",
    tour: "Tour",
    revenue: "Daily Revenue",
};

const FRENCH_HEADERS: TableHeaders = TableHeaders {
    date: "Date",
    total_distance: "Total km",
    occupied_distance: "Km occupé",
    tour: "Tour",
    revenue: "Recette",
};

const GERMAN_FOOTER: &str = "Die Angaben in diesem Dokument entsprechen dem Stand vom {0}. \
    Für Unstimmigkeiten oder Ungenauigkeiten wird keine Haftung übernommen.";
const GERMAN_PREFACE: &str = "Die nachstehende Tabelle gibt eine Übersicht über die täglichen \
    Aktivitäten im {0} {1}: gefahrene Gesamtstrecke, besetzt gefahrene Strecke, Anzahl der \
    Touren und Tageskasse.";

const ENGLISH_FOOTER: &str = "The data in this document is accurate as of {0}. \
    This platform disclaims any liability for discrepancies or inaccuracies.";
const ENGLISH_PREFACE: &str = "The table below summarizes daily operations for {0} {1}: \
    total distance covered, distance driven with passengers, number of tours and daily revenue.";

const FRENCH_FOOTER: &str = "Les données de ce document sont exactes au {0}. \
    Cette plateforme décline toute responsabilité pour les incohérences ou inexactitudes.";
const FRENCH_PREFACE: &str = "Le tableau ci-dessous résume les opérations quotidiennes de {0} {1} : \
    distance totale parcourue, distance parcourue en service, nombre de courses et recette \
    quotidienne.";

/// Every supported locale, in a stable order.
pub static LOCALES: [LocalizationEntry; 5] = [
    LocalizationEntry {
        tag: "de-DE",
        headers: GERMAN_HEADERS,
        footer_template: GERMAN_FOOTER,
        preface_template: GERMAN_PREFACE,
        title: "Tagesbericht",
        total_label: "Total",
        date_style: DateStyle::DayMonthYearDotted,
    },
    LocalizationEntry {
        tag: "de-CH",
        headers: GERMAN_HEADERS,
        footer_template: GERMAN_FOOTER,
        preface_template: GERMAN_PREFACE,
        title: "Tagesbericht",
        total_label: "Total",
        date_style: DateStyle::DayMonthYearDotted,
    },
    LocalizationEntry {
        tag: "en-US",
        headers: ENGLISH_HEADERS,
        footer_template: ENGLISH_FOOTER,
        preface_template: ENGLISH_PREFACE,
        title: "Daily report",
        total_label: "Total",
        date_style: DateStyle::MonthDayYearSlashed,
    },
    LocalizationEntry {
        tag: "en-GB",
        headers: ENGLISH_HEADERS,
        footer_template: ENGLISH_FOOTER,
        preface_template: ENGLISH_PREFACE,
        title: "Daily report",
        total_label: "Total",
        date_style: DateStyle::DayMonthYearSlashed,
    },
    LocalizationEntry {
        tag: "fr-FR",
        headers: FRENCH_HEADERS,
        footer_template: FRENCH_FOOTER,
        preface_template: FRENCH_PREFACE,
        title: "Rapport journalier",
        total_label: "Total",
        date_style: DateStyle::DayMonthYearSlashed,
    },
];

/// Tag of the locale selected whenever the requested one cannot be used.
pub const DEFAULT_LOCALE_TAG: &str = "en-US";

/// Returns the entry for `tag` if it is one of the supported locales.
pub fn lookup(tag: &str) -> Option<&'static LocalizationEntry> {
    LOCALES.iter().find(|entry| entry.tag == tag)
}

/// The fallback locale entry.
pub fn default_entry() -> &'static LocalizationEntry {
    &LOCALES[2]
}

/// Selects the localization for a report.
///
/// The requested tag is honored only when the report has at least one record and the tag is
/// supported; every other case resolves to the default locale.
pub fn resolve(tag: &str, has_records: bool) -> &'static LocalizationEntry {
    let entry = if has_records { lookup(tag) } else { None };
    match entry {
        Some(entry) => entry,
        None => {
            log::debug!(
                "locale '{}' not used (records present: {}); falling back to {}",
                tag,
                has_records,
                DEFAULT_LOCALE_TAG
            );
            default_entry()
        }
    }
}

/// Language portion of a locale tag: `en` for `en-US`, `fr` for `fr_FR`, unchanged otherwise.
pub fn language_family(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

const GERMAN_DAYS: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];
const ENGLISH_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const FRENCH_DAYS: [&str; 7] = ["Lun", "Mar", "Mer", "Jeu", "Ven", "Sam", "Dim"];

/// Weekday abbreviation for an ISO weekday number (1 = Monday ... 7 = Sunday).
///
/// Returns `None` for an unknown language family or a weekday outside `1..=7`.
pub fn day_abbreviation(family: &str, weekday: u32) -> Option<&'static str> {
    let days = match family {
        "de" => &GERMAN_DAYS,
        "en" => &ENGLISH_DAYS,
        "fr" => &FRENCH_DAYS,
        _ => return None,
    };
    let index = usize::try_from(weekday).ok()?.checked_sub(1)?;
    days.get(index).copied()
}

/// Replaces `{0}`, `{1}`, ... in `template` with the matching argument.
///
/// Placeholders without a matching argument are left as they are.
pub fn fill_template(template: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_owned(), |text, (index, value)| {
            text.replace(&format!("{{{}}}", index), value)
        })
}
