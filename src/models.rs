use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScraperError};
use crate::parsers::text::{normalize, normalize_optional};

/// Timezone the portal renders its dates in.
pub const SITE_TIMEZONE: Tz = chrono_tz::Europe::Riga;

/// Format of the date label at the start of every diary day heading, e.g. `"22.10.23."`.
pub const DAY_LABEL_FORMAT: &str = "%d.%m.%y.";

/// A hyperlink attached to a homework or subject block.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Link {
    /// The destination URL. Never a redirect wrapper.
    pub url: String,
    /// The anchor's visible text, as found in the markup.
    pub title: String,
}

impl Link {
    /// Creates a link from an already resolved destination.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Creates a link from a raw anchor `href`, unwrapping `destination_uri` redirects.
    pub fn from_href(href: &str, title: impl Into<String>) -> Self {
        crate::parsers::link::resolve(href, title)
    }
}

/// One slot of the daily lesson timetable.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LessonTime {
    /// The slot index as shown by the portal (e.g. `"1"`).
    pub index: String,
    /// The start time exactly as shown (`"08:00"`).
    pub start_time_label: String,
    /// The end time exactly as shown (`"08:40"`).
    pub end_time_label: String,
    /// Minutes since midnight at which the lesson starts.
    pub start_offset_minutes: i64,
    /// Minutes since midnight at which the lesson ends.
    pub end_offset_minutes: i64,
    /// `end_offset_minutes - start_offset_minutes`. Negative when the source data is malformed.
    pub duration_minutes: i64,
}

impl LessonTime {
    /// Builds a slot from its index and two `HH:MM` labels.
    pub fn new(
        index: impl Into<String>,
        start_time_label: impl Into<String>,
        end_time_label: impl Into<String>,
    ) -> Result<Self> {
        let start_time_label = start_time_label.into();
        let end_time_label = end_time_label.into();

        let start_offset_minutes = minutes_since_midnight(&start_time_label)?;
        let end_offset_minutes = minutes_since_midnight(&end_time_label)?;

        Ok(Self {
            index: index.into(),
            start_time_label,
            end_time_label,
            start_offset_minutes,
            end_offset_minutes,
            duration_minutes: end_offset_minutes - start_offset_minutes,
        })
    }
}

/// Converts `"HH:MM"` into `HH * 60 + MM`. Hours are not checked against a 24h clock.
fn minutes_since_midnight(label: &str) -> Result<i64> {
    let parts: Vec<&str> = label.trim().split(':').collect();

    if parts.len() != 2 {
        return Err(ScraperError::FormatError(format!(
            "Expected a HH:MM time, got: {:?}",
            label
        )));
    }

    let number = |part: &str| {
        part.parse::<i64>().map_err(|_| {
            ScraperError::FormatError(format!("Invalid time component {:?} in {:?}", part, label))
        })
    };

    Ok(number(parts[0])? * 60 + number(parts[1])?)
}

/// A free-form notice row of a diary day.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DiaryEntry {
    pub name: String,
    pub content: String,
}

impl DiaryEntry {
    pub fn new(name: &str, content: &str) -> Self {
        Self {
            name: normalize(name),
            content: normalize(content),
        }
    }
}

/// The homework assigned in a lesson.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LessonHometask {
    pub text: String,
    pub links: Vec<Link>,
}

impl LessonHometask {
    pub fn new(text: &str, links: Vec<Link>) -> Self {
        Self {
            text: normalize(text),
            links,
        }
    }
}

/// The topic covered in a lesson.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LessonSubject {
    pub text: String,
    pub links: Vec<Link>,
}

impl LessonSubject {
    pub fn new(text: &str, links: Vec<Link>) -> Self {
        Self {
            text: normalize(text),
            links,
        }
    }
}

/// A single lesson row of a diary day.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Lesson {
    /// The lesson's slot number within the day.
    pub index: String,
    /// The lesson name, without any nested annotations.
    pub name: String,
    /// Room the lesson takes place in.
    pub room: String,
    /// Homework assigned for the lesson.
    pub hometask: LessonHometask,
    /// Topic covered in the lesson.
    pub subject: LessonSubject,
    /// The mark received. `None` when the row has no score cell, `""` when the cell is empty.
    pub score: Option<String>,
}

impl Lesson {
    pub fn new(
        index: &str,
        name: &str,
        room: &str,
        hometask: LessonHometask,
        subject: LessonSubject,
        score: Option<&str>,
    ) -> Self {
        Self {
            index: normalize(index),
            name: normalize(name),
            room: normalize(room),
            hometask,
            subject,
            score: normalize_optional(score),
        }
    }
}

/// One calendar day of the diary.
///
/// A day without data has no date, no lessons and no entries. Use [`Day::no_data`]
/// and [`Day::dated`] to construct it; both keep those fields consistent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Day {
    /// The date as shown in the heading, e.g. `"22.10.23."`.
    pub date_label: Option<String>,
    /// Unix timestamp (seconds) of local midnight of `date_label` in [`SITE_TIMEZONE`].
    pub timestamp: Option<i64>,
    /// Lessons in document order.
    pub lessons: Vec<Lesson>,
    /// Notices in document order.
    pub entries: Vec<DiaryEntry>,
    /// False when the portal marked the day as having no data.
    pub has_data: bool,
}

impl Day {
    /// The "no data" sentinel day.
    pub fn no_data() -> Self {
        Self {
            date_label: None,
            timestamp: None,
            lessons: Vec::new(),
            entries: Vec::new(),
            has_data: false,
        }
    }

    /// An empty day with data, dated by a `DD.MM.YY.` label.
    pub fn dated(date_label: &str) -> Result<Self> {
        let timestamp = label_timestamp(date_label)?;

        Ok(Self {
            date_label: Some(date_label.to_string()),
            timestamp: Some(timestamp),
            lessons: Vec::new(),
            entries: Vec::new(),
            has_data: true,
        })
    }

    /// The calendar date of the day, if it has one.
    pub fn date(&self) -> Option<NaiveDate> {
        let label = self.date_label.as_deref()?;
        NaiveDate::parse_from_str(label, DAY_LABEL_FORMAT).ok()
    }
}

fn label_timestamp(date_label: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(date_label, DAY_LABEL_FORMAT).map_err(|e| {
        ScraperError::FormatError(format!("Invalid day label {:?}: {}", date_label, e))
    })?;

    SITE_TIMEZONE
        .from_local_datetime(&date.and_time(chrono::NaiveTime::MIN))
        .earliest()
        .map(|midnight| midnight.timestamp())
        .ok_or_else(|| {
            ScraperError::FormatError(format!("Day label {:?} has no local midnight", date_label))
        })
}

/// A week of the diary.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Diary {
    /// Days in the order the page lists them.
    pub days: Vec<Day>,
}

/// A student identity selectable under one login.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    /// The student's display name.
    pub name: String,
    /// Secondary line under the name (school and class).
    pub subtitle: String,
    /// Value sent as `pf_id` when switching to this profile.
    pub profile_id: String,
    /// Value sent as `TenantId` when switching to this profile.
    pub organization_id: String,
}

impl StudentProfile {
    pub fn new(name: &str, subtitle: &str, profile_id: &str, organization_id: &str) -> Self {
        Self {
            name: normalize(name),
            subtitle: normalize(subtitle),
            profile_id: profile_id.to_string(),
            organization_id: organization_id.to_string(),
        }
    }
}
