use crate::error::{Result, ScraperError};
use crate::models::StudentProfile;
use crate::parsers::text::element_text;
use log::debug;
use scraper::{ElementRef, Html};

selector!(PROFILE_PANEL, "div.modal-options-item.student-item");
selector!(SWITCH_BUTTON, "button.btn-switch-student");
selector!(PROFILE_NAME, "div.modal-options-title > span");
selector!(PROFILE_SUBTITLE, "div.modal-options-choice > small");

/// Parses the profile selector page into the selectable student profiles.
///
/// Profiles are returned in page order, since a profile can be picked by index.
/// A panel missing any of its parts fails the whole parse.
pub fn parse_profiles_from_html(html: &str) -> Result<Vec<StudentProfile>> {
    let document = Html::parse_document(html);

    let profiles = document
        .select(&PROFILE_PANEL)
        .enumerate()
        .map(|(position, panel)| parse_panel(position, panel))
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} student profiles", profiles.len());
    Ok(profiles)
}

fn parse_panel(position: usize, panel: ElementRef) -> Result<StudentProfile> {
    let missing =
        |what: &str| ScraperError::ElementNotFound(format!("{} of profile panel {}", what, position));

    let button = panel
        .select(&SWITCH_BUTTON)
        .next()
        .ok_or_else(|| missing("Switch button"))?;
    let name = panel
        .select(&PROFILE_NAME)
        .next()
        .ok_or_else(|| missing("Name"))?;
    let subtitle = panel
        .select(&PROFILE_SUBTITLE)
        .next()
        .ok_or_else(|| missing("Subtitle"))?;

    let profile_id = button
        .value()
        .attr("data-pf_id")
        .ok_or_else(|| missing("data-pf_id attribute"))?;
    let organization_id = button
        .value()
        .attr("data-tenantid")
        .ok_or_else(|| missing("data-tenantid attribute"))?;

    Ok(StudentProfile::new(
        &element_text(name),
        &element_text(subtitle),
        profile_id,
        organization_id,
    ))
}
