//! Dependency visibility engine.
//!
//! Every `(dependent element, source field)` pair declared in a form becomes
//! an [`Observer`]. An observer is evaluated once at setup and again each time
//! its listening target reports a change. Each evaluation decides visibility
//! from that one condition alone; conditions of the same element are not
//! combined, so the most recently evaluated condition determines the state.

use serde::Serialize;
use tracing::{debug, error, warn};

use formwire_model::attrs::{DATA_DEPENDS, DATA_DEPENDS_VALUE};
use formwire_model::{ControlRef, Document, EnhanceOptions, NodeId, resolve_control};

use crate::boundary::{ListenTarget, listening_target};
use crate::declaration::{Condition, parse_declaration};
use crate::error::{DependencyError, Result};
use crate::state::StateTable;

/// Index of an observer in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObserverId(usize);

/// One `(dependent element, source field)` condition.
#[derive(Debug, Clone)]
pub struct Observer {
    pub id: ObserverId,
    /// Element whose visibility the condition controls.
    pub element: NodeId,
    /// Field name as written in `data-depends`.
    pub field: String,
    /// The control or radio group the field name resolved to.
    pub control: ControlRef,
    pub condition: Condition,
    /// Where `change` listeners for this observer are attached.
    pub target: ListenTarget,
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transition {
    Shown,
    Hidden,
    Unchanged,
}

/// Result of scanning one form.
#[derive(Debug, Default)]
pub struct DependencySetup {
    pub wired: Vec<ObserverId>,
    /// One entry per element that was left unwired.
    pub errors: Vec<DependencyError>,
}

/// Observers of every enhanced form together with the hidden and
/// suppressed state they maintain.
#[derive(Debug, Clone)]
pub struct DependencyEngine {
    options: EnhanceOptions,
    observers: Vec<Observer>,
    state: StateTable,
}

impl DependencyEngine {
    pub fn new(options: EnhanceOptions) -> Self {
        Self {
            options,
            observers: Vec::new(),
            state: StateTable::new(),
        }
    }

    /// Wire every element of `form` declaring `data-depends`.
    ///
    /// A failing element is reported in [`DependencySetup::errors`] and left
    /// untouched; the remaining elements are still wired.
    pub fn initialize(&mut self, document: &mut Document, form: NodeId) -> DependencySetup {
        let mut setup = DependencySetup::default();
        for element in document.elements_with_attr(form, DATA_DEPENDS) {
            match self.register_element(document, form, element) {
                Ok(ids) => setup.wired.extend(ids),
                Err(err) => {
                    if err.alerts_user() {
                        error!(element = %element, error = %err, "dependency declaration rejected");
                    } else {
                        warn!(element = %element, error = %err, "dependency declaration skipped");
                    }
                    setup.errors.push(err);
                }
            }
        }
        setup
    }

    /// Parse, resolve and evaluate the declaration on one element.
    ///
    /// All fields are resolved before anything is wired, so an element is
    /// either fully observed or not at all.
    pub fn register_element(
        &mut self,
        document: &mut Document,
        form: NodeId,
        element: NodeId,
    ) -> Result<Vec<ObserverId>> {
        let names = document.attr(element, DATA_DEPENDS).unwrap_or_default();
        let values = document.attr(element, DATA_DEPENDS_VALUE);
        let specs = parse_declaration(names, values, &self.options).map_err(|mismatch| {
            DependencyError::ConfigurationMismatch {
                element,
                names: mismatch.names,
                values: mismatch.values,
            }
        })?;

        let mut resolved = Vec::with_capacity(specs.len());
        for spec in specs {
            let control = resolve_control(document, form, &spec.field).ok_or_else(|| {
                DependencyError::UnresolvedField {
                    element,
                    field: spec.field.clone(),
                }
            })?;
            let target = listening_target(&*document, &control);
            resolved.push((spec, control, target));
        }

        let hidden = document.has_class(element, &self.options.hidden_class);
        self.state.set_hidden(element, hidden);

        let mut ids = Vec::with_capacity(resolved.len());
        for (spec, control, target) in resolved {
            let id = ObserverId(self.observers.len());
            debug!(
                element = %element,
                field = %spec.field,
                negate = spec.condition.negate,
                targets = target.nodes().len(),
                "observing dependency"
            );
            self.observers.push(Observer {
                id,
                element,
                field: spec.field,
                control,
                condition: spec.condition,
                target,
            });
            self.evaluate(document, id)?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Re-derive visibility of the observer's element from its condition.
    pub fn evaluate(&mut self, document: &mut Document, id: ObserverId) -> Result<Transition> {
        let observer = self
            .observers
            .get(id.0)
            .ok_or(DependencyError::UnknownObserver(id))?;
        let value = observer.control.value(document);
        let visible = observer.condition.matches(&value);
        let element = observer.element;
        let hidden = self.state.is_hidden(element);

        let transition = if visible && hidden {
            self.show(document, element)?;
            Transition::Shown
        } else if !visible && !hidden {
            self.hide(document, element)?;
            Transition::Hidden
        } else {
            Transition::Unchanged
        };
        if transition != Transition::Unchanged {
            debug!(
                element = %element,
                field = %self.observers[id.0].field,
                value = %value,
                ?transition,
                "dependency changed visibility"
            );
        }
        Ok(transition)
    }

    fn show(&mut self, document: &mut Document, element: NodeId) -> Result<()> {
        self.state.set_hidden(element, false);
        document.remove_class(element, &self.options.hidden_class)?;
        for input in self.suppressible_descendants(document, element) {
            if self.state.release(input) {
                document.set_disabled(input, false)?;
            }
        }
        Ok(())
    }

    /// Disabling hidden inputs keeps them out of native required-field
    /// validation on submit.
    fn hide(&mut self, document: &mut Document, element: NodeId) -> Result<()> {
        self.state.set_hidden(element, true);
        document.add_class(element, &self.options.hidden_class)?;
        for input in self.suppressible_descendants(document, element) {
            if !document.is_disabled(input) {
                self.state.suppress(input);
                document.set_disabled(input, true)?;
            }
        }
        Ok(())
    }

    fn suppressible_descendants(&self, document: &Document, element: NodeId) -> Vec<NodeId> {
        document.find_all(element, |doc, node| {
            doc.tag_name(node)
                .is_some_and(|tag| self.options.is_suppressible(tag))
        })
    }

    pub fn observers(&self) -> &[Observer] {
        &self.observers
    }

    pub fn observer(&self, id: ObserverId) -> Option<&Observer> {
        self.observers.get(id.0)
    }

    pub fn is_hidden(&self, element: NodeId) -> bool {
        self.state.is_hidden(element)
    }

    /// Whether `input` was disabled by hiding and will be enabled on show.
    pub fn is_suppressed(&self, input: NodeId) -> bool {
        self.state.is_suppressed(input)
    }

    pub fn state(&self) -> &StateTable {
        &self.state
    }
}
