//! # Column Layout
//!
//! Column counts, width presets and mobile stacking for sections.
//!
//! | columns | widths                                      |
//! |---------|---------------------------------------------|
//! | 1       | `100%`                                      |
//! | 2, 3    | one of the presets below                    |
//! | 4       | no `width` attribute (renderer splits 25%)  |

use crate::errors::LayoutError;
use crate::tree::{replace_child, replace_fields, FieldPatch, Replacement};
use serde::{Deserialize, Serialize};
use tracing::debug;
use woosh_compiler_mjml::ElementRegistry;
use woosh_schema::{Element, StackMode, Width, COLUMN_TAG, SECTION_TAG};

pub const MAX_COLUMNS: usize = 4;

const fn w(hundredths: u32) -> Width {
    Width::from_hundredths(hundredths)
}

const TWO_COLUMN_PRESETS: &[&[Width]] = &[
    &[w(2500), w(7500)],
    &[w(3333), w(6667)],
    &[w(5000), w(5000)],
    &[w(6667), w(3333)],
    &[w(7500), w(2500)],
];

const THREE_COLUMN_PRESETS: &[&[Width]] = &[
    &[w(3333), w(3333), w(3334)],
    &[w(5000), w(2500), w(2500)],
    &[w(2500), w(5000), w(2500)],
    &[w(2500), w(2500), w(5000)],
];

/// Width presets for a column count; empty when the count has none.
pub fn presets(columns: usize) -> &'static [&'static [Width]] {
    match columns {
        2 => TWO_COLUMN_PRESETS,
        3 => THREE_COLUMN_PRESETS,
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

fn require_section(section: &Element) -> Result<(), LayoutError> {
    if section.tag_name() == SECTION_TAG && matches!(section, Element::Container(_)) {
        Ok(())
    } else {
        Err(LayoutError::NotASection(section.tag_name().to_string()))
    }
}

/// Current `width` of each column; unparseable or missing widths are `None`.
pub fn column_widths(section: &Element) -> Vec<Option<Width>> {
    section
        .children()
        .iter()
        .filter(|child| child.tag_name() == COLUMN_TAG)
        .map(|column| column.attributes().text("width").and_then(|width| width.parse().ok()))
        .collect()
}

/// Index of the preset matching `current`, if any.
pub fn preset_index(current: &[Option<Width>]) -> Option<usize> {
    presets(current.len()).iter().position(|preset| {
        preset.len() == current.len()
            && preset
                .iter()
                .zip(current)
                .all(|(width, current)| Some(*width) == *current)
    })
}

/// Preset after (or before) the current one, wrapping around.
///
/// An unrecognized configuration counts as the first preset. Returns
/// `None` for column counts without presets.
pub fn cycle_configuration(current: &[Option<Width>], direction: Direction) -> Option<&'static [Width]> {
    let table = presets(current.len());
    if table.is_empty() {
        return None;
    }

    let index = preset_index(current).unwrap_or(0);
    let next = match direction {
        Direction::Next => (index + 1) % table.len(),
        Direction::Previous => (index + table.len() - 1) % table.len(),
    };
    Some(table[next])
}

pub fn next_configuration(current: &[Option<Width>]) -> Option<&'static [Width]> {
    cycle_configuration(current, Direction::Next)
}

pub fn previous_configuration(current: &[Option<Width>]) -> Option<&'static [Width]> {
    cycle_configuration(current, Direction::Previous)
}

/// Widths a section with `columns` columns gets, given an optional preset.
fn resolve_widths(columns: usize, preset: Option<usize>) -> Result<Vec<Option<Width>>, LayoutError> {
    match columns {
        1 => Ok(vec![Some(Width::FULL)]),
        MAX_COLUMNS => Ok(vec![None; MAX_COLUMNS]),
        _ => {
            let index = preset.unwrap_or(0);
            presets(columns)
                .get(index)
                .map(|widths| widths.iter().copied().map(Some).collect())
                .ok_or(LayoutError::UnknownPreset { columns, index })
        }
    }
}

/// Write `widths` onto the section's columns in order. `None` clears.
fn write_widths(section: &Element, widths: &[Option<Width>]) -> Element {
    let mut updated = section.clone();
    if let Some(children) = updated.children_mut() {
        let columns = children.iter_mut().filter(|child| child.tag_name() == COLUMN_TAG);
        for (column, width) in columns.zip(widths) {
            let mut rebuilt = column.as_ref().clone();
            match width {
                Some(width) => rebuilt.attributes_mut().insert("width", width.to_string()),
                None => {
                    rebuilt.attributes_mut().remove("width");
                }
            }
            *column = rebuilt.into();
        }
    }
    updated
}

/// Change a section's column count.
///
/// Columns are appended from the registry's default column or removed
/// from the end. Widths are then taken from `preset` (or the first preset)
/// for the new count. When the count is unchanged and no preset is given
/// the section is returned as is.
pub fn set_column_count(
    registry: &ElementRegistry,
    section: &Element,
    count: usize,
    preset: Option<usize>,
) -> Result<Element, LayoutError> {
    require_section(section)?;
    if !(1..=MAX_COLUMNS).contains(&count) {
        return Err(LayoutError::InvalidColumnCount(count));
    }

    let current = section.column_count();
    if current == count && preset.is_none() {
        return Ok(section.clone());
    }
    debug!(current, count, ?preset, "changing column count");

    let mut updated = section.clone();
    if count > current {
        let column = registry
            .default_schema(COLUMN_TAG)
            .ok_or(LayoutError::MissingElementType(COLUMN_TAG))?;
        let appended = vec![column; count - current];
        let len = updated.children().len();
        updated = replace_child(&updated, len, Replacement::Many(appended))?;
    }
    for _ in count..current {
        let last_column = updated
            .children()
            .iter()
            .rposition(|child| child.tag_name() == COLUMN_TAG);
        if let Some(index) = last_column {
            updated = replace_child(&updated, index, Replacement::Remove)?;
        }
    }

    let widths = resolve_widths(count, preset)?;
    updated = write_widths(&updated, &widths);

    if current != count {
        let stack = match updated.stack() {
            _ if count == 1 => None,
            Some(StackMode::TwoByTwo) if count != MAX_COLUMNS => Some(StackMode::Yes),
            other => other,
        };
        updated = replace_fields(
            &updated,
            &FieldPatch {
                stack: Some(stack),
                ..Default::default()
            },
        );
    }

    Ok(updated)
}

/// Assign explicit widths. They must cover every column and sum to 100%.
pub fn set_column_widths(section: &Element, widths: &[Width]) -> Result<Element, LayoutError> {
    require_section(section)?;
    let columns = section.column_count();
    if widths.len() != columns {
        return Err(LayoutError::WidthCount {
            expected: columns,
            actual: widths.len(),
        });
    }

    let total = Width::total(widths);
    if total != Width::FULL.hundredths() {
        return Err(LayoutError::WidthSum(Width::from_hundredths(total).to_string()));
    }

    let widths: Vec<Option<Width>> = widths.iter().copied().map(Some).collect();
    Ok(write_widths(section, &widths))
}

/// Rotate to the next or previous preset. Sections without presets are
/// returned unchanged.
pub fn cycle_column_widths(section: &Element, direction: Direction) -> Result<Element, LayoutError> {
    require_section(section)?;
    match cycle_configuration(&column_widths(section), direction) {
        Some(widths) => set_column_widths(section, widths),
        None => Ok(section.clone()),
    }
}

/// Set the mobile stacking mode, normalized against the column count.
pub fn set_stack(section: &Element, stack: StackMode) -> Result<Element, LayoutError> {
    require_section(section)?;
    let columns = section.column_count();
    let current = section.stack().unwrap_or_default();
    if current == stack && (columns > 1 || section.stack().is_none()) {
        return Ok(section.clone());
    }

    let normalized = StackMode::normalize(Some(stack), columns);
    debug!(requested = stack.as_str(), ?normalized, columns, "setting stack mode");
    Ok(replace_fields(
        section,
        &FieldPatch {
            stack: Some(normalized),
            ..Default::default()
        },
    ))
}
