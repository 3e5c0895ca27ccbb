//! Row templates instantiated on demand.
//!
//! A `<template id="X">` inside a form is paired with the element whose id is
//! `X` plus the container suffix. The container always ends in exactly one
//! empty row: editing the trailing row's input appends the next one and
//! reveals the edited row's remove control.

use serde::Serialize;
use tracing::{debug, warn};

use formwire_model::attrs::{ROLE, ROLE_REMOVE_TEMPLATED_ROW};
use formwire_model::{Document, EnhanceOptions, NodeId};

use crate::error::{Result, RowError};

const NO_ATTRS: [(&str, &str); 0] = [];

/// Index of a registered template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupId(usize);

/// Index of an inserted row. Ids of removed rows are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RowId(usize);

/// A template and the container its rows are appended to.
#[derive(Debug, Clone)]
pub struct RowGroup {
    pub id: GroupId,
    pub template: NodeId,
    /// The template's `id` attribute.
    pub template_id: String,
    /// Element whose id is the template id plus the container suffix.
    pub container: NodeId,
    /// Live rows in container order.
    rows: Vec<RowId>,
}

impl RowGroup {
    pub fn rows(&self) -> &[RowId] {
        &self.rows
    }
}

/// One instantiated copy of a template.
#[derive(Debug, Clone)]
pub struct Row {
    pub id: RowId,
    pub group: GroupId,
    /// Element holding the cloned template content.
    pub wrapper: NodeId,
    /// First `input` of the row; its `change` drives the repeater.
    pub input: NodeId,
    /// The `[role=remove-templated-row]` control, when the template has one.
    pub remove: Option<NodeId>,
    /// Element the hidden class is toggled on to hide the remove control.
    remove_toggle: Option<NodeId>,
}

/// Listener targets of a freshly inserted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWiring {
    pub row: RowId,
    pub input: NodeId,
    pub remove: Option<NodeId>,
}

/// Outcome of [`RowRepeater::remove_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Removal {
    Removed,
    /// The trailing empty row stays in place.
    KeptTrailing,
    AlreadyRemoved,
}

/// Result of scanning one form.
#[derive(Debug, Default)]
pub struct RowSetup {
    pub groups: Vec<GroupId>,
    /// First row of each registered group.
    pub wired: Vec<RowWiring>,
    /// Templates that were skipped; no row was inserted for them.
    pub errors: Vec<RowError>,
}

/// Row groups of every enhanced form and the rows inserted into them.
#[derive(Debug, Clone)]
pub struct RowRepeater {
    options: EnhanceOptions,
    groups: Vec<RowGroup>,
    rows: Vec<Row>,
}

impl RowRepeater {
    pub fn new(options: EnhanceOptions) -> Self {
        Self {
            options,
            groups: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Register every template in `form` and insert its first row.
    pub fn discover(&mut self, document: &mut Document, form: NodeId) -> RowSetup {
        let mut setup = RowSetup::default();
        for template in document.elements_by_tag(form, "template") {
            let wired = self
                .register_template(document, template)
                .and_then(|group| {
                    setup.groups.push(group);
                    self.add_templated_row(document, group)
                });
            match wired {
                Ok(wiring) => setup.wired.push(wiring),
                Err(err) => {
                    warn!(template = %template, error = %err, "row template skipped");
                    setup.errors.push(err);
                }
            }
        }
        setup
    }

    /// Pair a template with its container. Nothing is inserted yet.
    pub fn register_template(&mut self, document: &Document, template: NodeId) -> Result<GroupId> {
        let content = document
            .template_content(template)
            .ok_or(RowError::NotATemplate(template))?;
        let template_id = document
            .attr(template, "id")
            .filter(|id| !id.is_empty())
            .ok_or(RowError::TemplateWithoutId(template))?
            .to_string();
        let container_id = self.options.container_id(&template_id);
        let container =
            document
                .element_by_id(&container_id)
                .ok_or_else(|| RowError::MissingContainer {
                    template_id: template_id.clone(),
                    container_id: container_id.clone(),
                })?;
        if document
            .find_first(content, |doc, node| doc.is_tag(node, "input"))
            .is_none()
        {
            return Err(RowError::TemplateWithoutInput(template_id));
        }

        let id = GroupId(self.groups.len());
        debug!(template = %template_id, container = %container_id, "row group registered");
        self.groups.push(RowGroup {
            id,
            template,
            template_id,
            container,
            rows: Vec::new(),
        });
        Ok(id)
    }

    /// Append a new empty row to the group's container and focus its input.
    pub fn add_templated_row(
        &mut self,
        document: &mut Document,
        group: GroupId,
    ) -> Result<RowWiring> {
        let entry = self.groups.get(group.0).ok_or(RowError::UnknownGroup(group))?;
        let (template, container) = (entry.template, entry.container);
        let content = document
            .template_content(template)
            .ok_or(RowError::NotATemplate(template))?;

        let wrapper = document.create_element(&self.options.row_wrapper_tag, NO_ATTRS);
        let fragment = document.clone_subtree(content)?;
        document.append_child(wrapper, fragment)?;
        document.append_child(container, wrapper)?;

        let input = document
            .find_first(wrapper, |doc, node| doc.is_tag(node, "input"))
            .ok_or_else(|| RowError::TemplateWithoutInput(entry.template_id.clone()))?;
        let remove = document.find_first(wrapper, |doc, node| {
            doc.attr(node, ROLE) == Some(ROLE_REMOVE_TEMPLATED_ROW)
        });
        let remove_toggle = remove.map(|control| match document.parent(control) {
            Some(parent) if parent != wrapper => parent,
            _ => control,
        });
        if let Some(toggle) = remove_toggle {
            document.add_class(toggle, &self.options.hidden_class)?;
        }
        document.focus(input)?;

        let id = RowId(self.rows.len());
        self.rows.push(Row {
            id,
            group,
            wrapper,
            input,
            remove,
            remove_toggle,
        });
        self.groups[group.0].rows.push(id);
        debug!(template = %self.groups[group.0].template_id, row = id.0, "row appended");
        Ok(RowWiring { row: id, input, remove })
    }

    /// React to a change of the row's input.
    ///
    /// Reveals the remove control and, when the row is the trailing one,
    /// appends the next empty row.
    pub fn row_changed(
        &mut self,
        document: &mut Document,
        row: RowId,
    ) -> Result<Option<RowWiring>> {
        let entry = self.rows.get(row.0).ok_or(RowError::UnknownRow(row))?;
        let (group, toggle) = (entry.group, entry.remove_toggle);
        if !self.groups[group.0].rows.contains(&row) {
            return Ok(None);
        }
        if let Some(toggle) = toggle {
            document.remove_class(toggle, &self.options.hidden_class)?;
        }
        if self.trailing_row(group) != Some(row) {
            return Ok(None);
        }
        self.add_templated_row(document, group).map(Some)
    }

    /// Detach a row from its container.
    pub fn remove_row(&mut self, document: &mut Document, row: RowId) -> Result<Removal> {
        let entry = self.rows.get(row.0).ok_or(RowError::UnknownRow(row))?;
        let (group, wrapper) = (entry.group, entry.wrapper);
        if !self.groups[group.0].rows.contains(&row) {
            return Ok(Removal::AlreadyRemoved);
        }
        if self.trailing_row(group) == Some(row) {
            debug!(row = row.0, "refusing to remove the trailing row");
            return Ok(Removal::KeptTrailing);
        }
        document.detach(wrapper)?;
        self.groups[group.0].rows.retain(|id| *id != row);
        debug!(row = row.0, "row removed");
        Ok(Removal::Removed)
    }

    pub fn groups(&self) -> &[RowGroup] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&RowGroup> {
        self.groups.get(id.0)
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.0)
    }

    /// Live rows of a group in container order.
    pub fn rows(&self, group: GroupId) -> Vec<&Row> {
        self.groups
            .get(group.0)
            .map(|entry| entry.rows.iter().map(|id| &self.rows[id.0]).collect())
            .unwrap_or_default()
    }

    pub fn trailing_row(&self, group: GroupId) -> Option<RowId> {
        self.groups
            .get(group.0)
            .and_then(|entry| entry.rows.last().copied())
    }

    pub fn remove_control_visible(&self, document: &Document, row: RowId) -> bool {
        self.rows
            .get(row.0)
            .and_then(|entry| entry.remove_toggle)
            .is_some_and(|toggle| !document.has_class(toggle, &self.options.hidden_class))
    }
}
