use crate::error::{Result, ScraperError};
use crate::models::LessonTime;
use crate::parsers::text::{element_text, normalize};
use log::debug;
use scraper::{ElementRef, Html};

/// Separator between the start and end time of a slot, e.g. `"08:00 - 08:40"`.
pub const TIME_RANGE_SEPARATOR: &str = " - ";

selector!(TIMETABLE_ITEM, "div.timetible-item");
selector!(ITEM_INDEX, "div span");
selector!(ITEM_TIME, "div.time");

/// Parses an index label such as `"1. stunda"` and a range such as `"08:00 - 08:40"`.
pub fn parse_time_slot(index_label: &str, time_range_label: &str) -> Result<LessonTime> {
    let index = normalize(index_label)
        .split(' ')
        .next()
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ScraperError::FormatError(format!("Empty lesson index label: {:?}", index_label))
        })?;

    let parts: Vec<&str> = time_range_label.split(TIME_RANGE_SEPARATOR).collect();
    let [start, end] = parts.as_slice() else {
        return Err(ScraperError::FormatError(format!(
            "Expected \"HH:MM - HH:MM\", got: {:?}",
            time_range_label
        )));
    };

    LessonTime::new(index, start.trim(), end.trim())
}

/// Parses the lesson timetable page into its slots, in page order.
pub fn parse_lesson_times_from_html(html: &str) -> Result<Vec<LessonTime>> {
    let document = Html::parse_document(html);

    let times = document
        .select(&TIMETABLE_ITEM)
        .enumerate()
        .map(|(position, item)| {
            let index = index_span(item).ok_or_else(|| {
                ScraperError::ElementNotFound(format!("Index label of timetable item {}", position))
            })?;
            let time = item.select(&ITEM_TIME).next().ok_or_else(|| {
                ScraperError::ElementNotFound(format!("Time of timetable item {}", position))
            })?;

            parse_time_slot(&element_text(index), &element_text(time))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} lesson times", times.len());
    Ok(times)
}

/// The first span sitting inside a `div` nested in the item. Spans placed directly
/// in the item do not count; `select` would let the item itself satisfy `div`.
fn index_span(item: ElementRef) -> Option<ElementRef> {
    item.select(&ITEM_INDEX).find(|span| {
        span.ancestors()
            .take_while(|node| node.id() != item.id())
            .filter_map(ElementRef::wrap)
            .any(|element| element.value().name() == "div")
    })
}
