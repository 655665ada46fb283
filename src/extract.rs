//! Read-only extraction of structured fragments from the rendered career
//! page. Everything here parses HTML the browser already fetched; nothing
//! talks to the live tab, which keeps these paths testable offline.

use crate::models::{or_not_available, CourseRow, ProgramInfo, RequirementCategory, NOT_AVAILABLE};
use scraper::{ElementRef, Html, Selector};

/// Unit display names from the unit dropdown, placeholder excluded.
pub fn list_units(document: &Html) -> Vec<String> {
    list_combo_options(document, "#comboUnidade option")
}

/// Program names from the program dropdown. Only meaningful after a unit
/// has been selected on the live page.
pub fn list_programs(document: &Html) -> Vec<String> {
    list_combo_options(document, "#comboCurso option")
}

fn list_combo_options(document: &Html, selector: &str) -> Vec<String> {
    let options = Selector::parse(selector).unwrap();
    document
        .select(&options)
        .filter(|option| {
            option
                .value()
                .attr("value")
                .is_some_and(|value| !value.trim().is_empty())
        })
        .map(element_text)
        .collect()
}

/// Duration fields from the program info panel. Each field independently
/// falls back to `N/A` when its span is absent or empty.
pub fn read_program_info(document: &Html) -> ProgramInfo {
    ProgramInfo {
        ideal_duration: span_text(document, "span.duridlhab"),
        min_duration: span_text(document, "span.durminhab"),
        max_duration: span_text(document, "span.durmaxhab"),
    }
}

fn span_text(document: &Html, selector: &str) -> String {
    let span = Selector::parse(selector).unwrap();
    document
        .select(&span)
        .next()
        .map(|el| or_not_available(&element_text(el)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Every course entry on the curriculum tab, tagged with its requirement
/// category. Rows under an unrecognized section header and rows missing
/// the expected table structure are logged and skipped; a bad row never
/// aborts the rest of the curriculum.
pub fn read_course_rows(document: &Html) -> Vec<CourseRow> {
    let course_marker = Selector::parse("a.disciplina").unwrap();
    document
        .select(&course_marker)
        .filter_map(parse_course_row)
        .collect()
}

fn parse_course_row(anchor: ElementRef<'_>) -> Option<CourseRow> {
    let code = element_text(anchor);

    let Some(row) = ancestor_element(anchor, "tr") else {
        log::warn!("course entry {} is not inside a table row, skipping", code);
        return None;
    };
    let Some(table) = ancestor_element(anchor, "table") else {
        log::warn!("course entry {} is not inside a curriculum table, skipping", code);
        return None;
    };

    let label = category_label(table)?;
    let Some(category) = RequirementCategory::from_label(&label) else {
        log::warn!(
            "unrecognized requirement category {:?} for course {}, skipping",
            label,
            code
        );
        return None;
    };

    let cell = Selector::parse("td").unwrap();
    let cells: Vec<String> = row.select(&cell).skip(1).map(|c| element_text(c)).collect();
    if cells.is_empty() {
        log::warn!("course row {} has no detail cells, skipping", code);
        return None;
    }

    let field = |index: usize| {
        cells
            .get(index)
            .map(|text| or_not_available(text))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    Some(CourseRow {
        category,
        code,
        name: field(0),
        lecture_credits: field(1),
        work_credits: field(2),
        hours: field(3),
        internship_hours: field(4),
        practicum_hours: field(5),
        advanced_hours: field(6),
    })
}

/// Section header of a curriculum table: the text of its first cell.
fn category_label(table: ElementRef<'_>) -> Option<String> {
    let cell = Selector::parse("td").unwrap();
    let label = table.select(&cell).next().map(element_text)?;
    if label.is_empty() {
        return None;
    }
    Some(label)
}

fn ancestor_element<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == name)
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
