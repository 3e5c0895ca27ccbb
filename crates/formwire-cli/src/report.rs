//! Tables describing what an enhancer wired.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use formwire_core::{FormEnhancer, SetupError};
use formwire_deps::{Condition, ListenTarget, Observer};
use formwire_model::{Document, NodeId};

/// `tag#id`, or `tag` with the node id when the element has no id.
pub fn describe(document: &Document, node: NodeId) -> String {
    let tag = document.tag_name(node).unwrap_or("?");
    match document.attr(node, "id") {
        Some(id) if !id.is_empty() => format!("{tag}#{id}"),
        _ => format!("{tag}({node})"),
    }
}

pub fn describe_condition(condition: &Condition) -> String {
    let values: Vec<&str> = condition.allowed.iter().map(String::as_str).collect();
    let joined = if values.is_empty() {
        "\"\"".to_string()
    } else {
        values.join(" | ")
    };
    if condition.negate {
        format!("not {joined}")
    } else {
        joined
    }
}

fn describe_target(document: &Document, target: &ListenTarget) -> String {
    match target {
        ListenTarget::Fieldset(node) => describe(document, *node),
        ListenTarget::Controls(nodes) => nodes
            .iter()
            .map(|node| describe(document, *node))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// One row per observer: element, field, condition, listening target and
/// current visibility of the element.
pub fn observer_rows(document: &Document, enhancer: &FormEnhancer) -> Vec<[String; 5]> {
    let engine = enhancer.dependencies();
    engine
        .observers()
        .iter()
        .map(|observer: &Observer| {
            let state = if engine.is_hidden(observer.element) {
                "hidden"
            } else {
                "shown"
            };
            [
                describe(document, observer.element),
                observer.field.clone(),
                describe_condition(&observer.condition),
                describe_target(document, &observer.target),
                state.to_string(),
            ]
        })
        .collect()
}

/// One row per row group: template id, container and live row count.
pub fn row_group_rows(document: &Document, enhancer: &FormEnhancer) -> Vec<[String; 3]> {
    enhancer
        .rows()
        .groups()
        .iter()
        .map(|group| {
            [
                group.template_id.clone(),
                describe(document, group.container),
                group.rows().len().to_string(),
            ]
        })
        .collect()
}

/// One row per drop zone: input, region and the files it currently holds.
pub fn drop_zone_rows(document: &Document, enhancer: &FormEnhancer) -> Vec<[String; 3]> {
    enhancer
        .drop_zones()
        .zones()
        .iter()
        .map(|zone| {
            [
                describe(document, zone.input),
                describe(document, zone.region),
                document.files(zone.input).len().to_string(),
            ]
        })
        .collect()
}

/// One row per field action: element, trigger, operation and edited field.
pub fn field_action_rows(document: &Document, enhancer: &FormEnhancer) -> Vec<[String; 4]> {
    enhancer
        .field_actions()
        .actions()
        .iter()
        .map(|action| {
            [
                describe(document, action.element),
                action.trigger.to_string(),
                action.operation.clone(),
                action.field.clone(),
            ]
        })
        .collect()
}

pub fn observer_table(document: &Document, enhancer: &FormEnhancer) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Element"),
        header_cell("Field"),
        header_cell("Shown when"),
        header_cell("Listens on"),
        header_cell("State"),
    ]);
    apply_table_style(&mut table);
    for [element, field, condition, target, state] in observer_rows(document, enhancer) {
        let state_cell = if state == "hidden" {
            Cell::new(state).fg(Color::DarkGrey)
        } else {
            Cell::new(state).fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(element),
            Cell::new(field),
            Cell::new(condition),
            Cell::new(target),
            state_cell,
        ]);
    }
    table
}

pub fn row_group_table(document: &Document, enhancer: &FormEnhancer) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Template"),
        header_cell("Container"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for row in row_group_rows(document, enhancer) {
        table.add_row(row.to_vec());
    }
    table
}

pub fn drop_zone_table(document: &Document, enhancer: &FormEnhancer) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Region"),
        header_cell("Files"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for row in drop_zone_rows(document, enhancer) {
        table.add_row(row.to_vec());
    }
    table
}

pub fn field_action_table(document: &Document, enhancer: &FormEnhancer) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Element"),
        header_cell("Trigger"),
        header_cell("Operation"),
        header_cell("Field"),
    ]);
    apply_table_style(&mut table);
    for row in field_action_rows(document, enhancer) {
        table.add_row(row.to_vec());
    }
    table
}

pub fn error_table(errors: &[SetupError]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Kind"), header_cell("Problem")]);
    apply_table_style(&mut table);
    for err in errors {
        let kind = match err {
            SetupError::Dependency(_) => "dependency",
            SetupError::Row(_) => "row template",
            SetupError::DropZone(_) => "drop zone",
        };
        let color = if err.alerts_user() {
            Color::Red
        } else {
            Color::Yellow
        };
        table.add_row(vec![
            Cell::new(kind).fg(color).add_attribute(Attribute::Bold),
            Cell::new(err.to_string()),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
