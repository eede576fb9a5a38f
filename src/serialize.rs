//! Conversion of the data model into plain JSON-compatible values.
//!
//! Every record lists its fields explicitly, in declaration order, so the output
//! shape does not depend on serde attributes or reflection.

use crate::models::{
    Day, Diary, DiaryEntry, Lesson, LessonHometask, LessonSubject, LessonTime, Link,
    StudentProfile,
};
use serde_json::{Map, Value};

/// A value that can be flattened into nested maps, arrays and primitives.
pub trait Convertible {
    fn to_plain(&self) -> Value;
}

impl<T: Convertible> Convertible for [T] {
    fn to_plain(&self) -> Value {
        Value::Array(self.iter().map(Convertible::to_plain).collect())
    }
}

impl<T: Convertible> Convertible for Vec<T> {
    fn to_plain(&self) -> Value {
        self.as_slice().to_plain()
    }
}

impl<T: Convertible> Convertible for Option<T> {
    fn to_plain(&self) -> Value {
        self.as_ref().map_or(Value::Null, Convertible::to_plain)
    }
}

impl Convertible for String {
    fn to_plain(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Convertible for bool {
    fn to_plain(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Convertible for i64 {
    fn to_plain(&self) -> Value {
        Value::from(*self)
    }
}

/// Builds a map keeping the order the fields are given in.
fn record<const N: usize>(fields: [(&str, Value); N]) -> Value {
    let map: Map<String, Value> = fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    Value::Object(map)
}

impl Convertible for Link {
    fn to_plain(&self) -> Value {
        record([("url", self.url.to_plain()), ("title", self.title.to_plain())])
    }
}

impl Convertible for LessonTime {
    fn to_plain(&self) -> Value {
        record([
            ("index", self.index.to_plain()),
            ("start_time_label", self.start_time_label.to_plain()),
            ("end_time_label", self.end_time_label.to_plain()),
            ("start_offset_minutes", self.start_offset_minutes.to_plain()),
            ("end_offset_minutes", self.end_offset_minutes.to_plain()),
            ("duration_minutes", self.duration_minutes.to_plain()),
        ])
    }
}

impl Convertible for DiaryEntry {
    fn to_plain(&self) -> Value {
        record([
            ("name", self.name.to_plain()),
            ("content", self.content.to_plain()),
        ])
    }
}

impl Convertible for LessonHometask {
    fn to_plain(&self) -> Value {
        record([("text", self.text.to_plain()), ("links", self.links.to_plain())])
    }
}

impl Convertible for LessonSubject {
    fn to_plain(&self) -> Value {
        record([("text", self.text.to_plain()), ("links", self.links.to_plain())])
    }
}

impl Convertible for Lesson {
    fn to_plain(&self) -> Value {
        record([
            ("index", self.index.to_plain()),
            ("name", self.name.to_plain()),
            ("room", self.room.to_plain()),
            ("hometask", self.hometask.to_plain()),
            ("subject", self.subject.to_plain()),
            ("score", self.score.to_plain()),
        ])
    }
}

impl Convertible for Day {
    fn to_plain(&self) -> Value {
        record([
            ("date_label", self.date_label.to_plain()),
            ("timestamp", self.timestamp.to_plain()),
            ("lessons", self.lessons.to_plain()),
            ("entries", self.entries.to_plain()),
            ("has_data", self.has_data.to_plain()),
        ])
    }
}

impl Convertible for Diary {
    fn to_plain(&self) -> Value {
        record([("days", self.days.to_plain())])
    }
}

impl Convertible for StudentProfile {
    fn to_plain(&self) -> Value {
        record([
            ("name", self.name.to_plain()),
            ("subtitle", self.subtitle.to_plain()),
            ("profile_id", self.profile_id.to_plain()),
            ("organization_id", self.organization_id.to_plain()),
        ])
    }
}

/// Flattens any convertible value; the free-function form of [`Convertible::to_plain`].
pub fn to_plain_structure<T: Convertible + ?Sized>(value: &T) -> Value {
    value.to_plain()
}
