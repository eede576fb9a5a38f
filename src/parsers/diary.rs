use crate::error::{Result, ScraperError};
use crate::models::{Day, Diary, DiaryEntry, Lesson, LessonHometask, LessonSubject, Link};
use crate::parsers::link;
use crate::parsers::text::{element_text, normalize};
use log::debug;
use scraper::{ElementRef, Html, Selector};

selector!(DIARY_HOLDER, ".student-journal-lessons-table-holder");
selector!(DAY_HEADING, "h2");
selector!(DAY_TABLE_BODY, "table tbody");
selector!(NO_DATA_CELL, "tr > td.no-data");
selector!(LESSON_ROW, "tr:not(.info)");
selector!(INFO_ROW, "tr.info");
selector!(LESSON_NUMBER, ".number");
selector!(LESSON_TITLE, ".title");
selector!(LESSON_ROOM, ".room");
selector!(LESSON_HOMETASK, ".hometask");
selector!(LESSON_SUBJECT, ".subject");
selector!(LESSON_SCORE, ".score");
selector!(ANCHOR, "a");
selector!(ENTRY_NAME, ".first-column");
selector!(ENTRY_CONTENT, ".info-content");

/// Parses a weekly diary page.
///
/// The i-th `h2` heading of the diary holder belongs to the i-th `table tbody`;
/// days keep the order of the page.
pub fn parse_diary_from_html(html: &str) -> Result<Diary> {
    let document = Html::parse_document(html);

    let holder = document
        .select(&DIARY_HOLDER)
        .next()
        .ok_or_else(|| ScraperError::ElementNotFound("Diary lessons table holder".to_string()))?;

    let headings: Vec<ElementRef> = holder.select(&DAY_HEADING).collect();
    let tables: Vec<ElementRef> = holder.select(&DAY_TABLE_BODY).collect();

    if headings.len() != tables.len() {
        return Err(ScraperError::ElementNotFound(format!(
            "Matching day tables: found {} day headings but {} lesson tables",
            headings.len(),
            tables.len()
        )));
    }

    let days = tables
        .into_iter()
        .zip(headings)
        .map(|(table, heading)| parse_day(table, heading))
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed diary with {} days", days.len());
    Ok(Diary { days })
}

/// Parses one day from its `tbody` and its heading.
///
/// A table containing a `td.no-data` cell yields [`Day::no_data`] without looking
/// at anything else.
pub fn parse_day(table: ElementRef, heading: ElementRef) -> Result<Day> {
    if table.select(&NO_DATA_CELL).next().is_some() {
        return Ok(Day::no_data());
    }

    let heading_text = normalize(&element_text(heading));
    let date_label = heading_text
        .split(' ')
        .next()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ScraperError::FormatError("Day heading has no date label".to_string()))?;

    let mut day = Day::dated(date_label)?;

    for row in table.select(&LESSON_ROW) {
        day.lessons.push(parse_lesson(row)?);
    }

    for row in table.select(&INFO_ROW) {
        let name = required(row, &ENTRY_NAME, "Diary entry name")?;
        let content = required(row, &ENTRY_CONTENT, "Diary entry content")?;
        day.entries
            .push(DiaryEntry::new(&element_text(name), &element_text(content)));
    }

    Ok(day)
}

fn parse_lesson(row: ElementRef) -> Result<Lesson> {
    let number = required(row, &LESSON_NUMBER, "Lesson number")?;
    let title = required(row, &LESSON_TITLE, "Lesson title")?;
    let room = required(row, &LESSON_ROOM, "Lesson room")?;
    let hometask = required(row, &LESSON_HOMETASK, "Lesson hometask")?;
    let subject = required(row, &LESSON_SUBJECT, "Lesson subject")?;

    let score = row.select(&LESSON_SCORE).next().map(element_text);

    // Subject links are read from the hometask cell as well.
    let hometask_links = cell_links(hometask);

    Ok(Lesson::new(
        &element_text(number),
        &lesson_name(title),
        &element_text(room),
        LessonHometask::new(&element_text(hometask), hometask_links.clone()),
        LessonSubject::new(&element_text(subject), hometask_links),
        score.as_deref(),
    ))
}

/// The title cell's own text, ignoring annotation elements nested in it.
fn lesson_name(title: ElementRef) -> String {
    title
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| String::from(&**text))
        .find(|text| !text.trim().is_empty())
        .unwrap_or_default()
}

fn cell_links(cell: ElementRef) -> Vec<Link> {
    cell.select(&ANCHOR)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            Some(link::resolve(href, element_text(anchor)))
        })
        .collect()
}

fn required<'a>(row: ElementRef<'a>, selector: &Selector, what: &str) -> Result<ElementRef<'a>> {
    row.select(selector)
        .next()
        .ok_or_else(|| ScraperError::ElementNotFound(what.to_string()))
}
