//! Page-level enhancement: discovery of every behaviour in every form and
//! event dispatch to the registered handlers.

use serde::Serialize;
use tracing::{debug, info, info_span};

use formwire_actions::{ActionId, DROP_EVENTS, DropZoneId, DropZones, FieldActions};
use formwire_deps::{DependencyEngine, ObserverId};
use formwire_model::attrs::MISMATCH_MESSAGE;
use formwire_model::{
    Document, EnhanceOptions, Event, EventType, ListenerRegistry, ModelError, NodeId,
};
use formwire_rows::{RowId, RowRepeater, RowWiring};

use crate::alerts::AlertSink;
use crate::error::{DispatchError, Result, SetupError};

/// What a registered listener does when its event arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Handler {
    Dependency(ObserverId),
    RowChange(RowId),
    RowRemove(RowId),
    FieldAction(ActionId),
    DropZone(DropZoneId),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    /// Number of handlers that ran.
    pub handled: usize,
    pub default_prevented: bool,
}

/// An enhancer together with everything that failed to wire.
#[derive(Debug)]
pub struct Initialized {
    pub enhancer: FormEnhancer,
    pub errors: Vec<SetupError>,
}

#[derive(Debug)]
pub struct FormEnhancer {
    forms: Vec<NodeId>,
    dependencies: DependencyEngine,
    rows: RowRepeater,
    zones: DropZones,
    actions: FieldActions,
    listeners: ListenerRegistry<Handler>,
}

impl FormEnhancer {
    /// Enhance every form under `root`, or `root` itself when it is a form.
    ///
    /// Per form, dependencies are wired first, then row templates, drop
    /// zones and field actions. Declarations that fail are collected in
    /// [`Initialized::errors`]; those that need the user's attention are
    /// also sent to `alerts`.
    pub fn initialize(
        document: &mut Document,
        root: NodeId,
        options: EnhanceOptions,
        alerts: &mut dyn AlertSink,
    ) -> Initialized {
        let mut enhancer = FormEnhancer {
            forms: Vec::new(),
            dependencies: DependencyEngine::new(options.clone()),
            rows: RowRepeater::new(options.clone()),
            zones: DropZones::new(options.clone()),
            actions: FieldActions::new(options),
            listeners: ListenerRegistry::new(),
        };
        let mut errors = Vec::new();

        let mut forms = document.elements_by_tag(root, "form");
        if document.is_tag(root, "form") {
            forms.insert(0, root);
        }
        for form in forms {
            enhancer.enhance_form(document, form, &mut errors);
            enhancer.forms.push(form);
        }

        for err in &errors {
            if err.alerts_user() {
                alerts.alert(MISMATCH_MESSAGE);
            }
        }
        info!(
            forms = enhancer.forms.len(),
            listeners = enhancer.listeners.len(),
            errors = errors.len(),
            "forms enhanced"
        );
        Initialized { enhancer, errors }
    }

    fn enhance_form(
        &mut self,
        document: &mut Document,
        form: NodeId,
        errors: &mut Vec<SetupError>,
    ) {
        let span = info_span!("form", form = %form);
        let _guard = span.enter();

        let setup = self.dependencies.initialize(document, form);
        for id in setup.wired {
            let Some(observer) = self.dependencies.observer(id) else {
                continue;
            };
            for &node in observer.target.nodes() {
                self.listeners.add(node, EventType::Change, Handler::Dependency(id));
            }
        }
        errors.extend(setup.errors.into_iter().map(SetupError::from));

        let setup = self.rows.discover(document, form);
        for wiring in setup.wired {
            self.wire_row(wiring);
        }
        errors.extend(setup.errors.into_iter().map(SetupError::from));

        let setup = self.zones.discover(document, form);
        for id in setup.wired {
            let Some(zone) = self.zones.zone(id) else {
                continue;
            };
            let region = zone.region;
            for event in DROP_EVENTS {
                self.listeners.add(region, event, Handler::DropZone(id));
            }
        }
        errors.extend(setup.errors.into_iter().map(SetupError::from));

        for id in self.actions.discover(document, form) {
            if let Some(action) = self.actions.action(id) {
                self.listeners.add(
                    action.element,
                    action.trigger.clone(),
                    Handler::FieldAction(id),
                );
            }
        }
    }

    fn wire_row(&mut self, wiring: RowWiring) {
        self.listeners
            .add(wiring.input, EventType::Change, Handler::RowChange(wiring.row));
        if let Some(remove) = wiring.remove {
            self.listeners
                .add(remove, EventType::Click, Handler::RowRemove(wiring.row));
        }
    }

    /// Deliver `event` to `target`, then to each ancestor while the event
    /// bubbles.
    pub fn dispatch(
        &mut self,
        document: &mut Document,
        target: NodeId,
        event: &Event,
    ) -> Result<DispatchOutcome> {
        document.element(target).ok_or(ModelError::NotAnElement(target))?;
        if !document.is_connected(target) {
            return Err(DispatchError::Detached(target));
        }
        let mut path = vec![target];
        if event.kind.bubbles() {
            path.extend(document.ancestors(target));
        }

        let mut outcome = DispatchOutcome::default();
        for node in path {
            let handlers: Vec<Handler> = self
                .listeners
                .listeners_for(node, &event.kind)
                .copied()
                .collect();
            for handler in handlers {
                outcome.handled += 1;
                outcome.default_prevented |= self.run(document, handler, event)?;
            }
        }

        self.prune(document);
        debug!(
            target = %target,
            event = %event.kind,
            handled = outcome.handled,
            default_prevented = outcome.default_prevented,
            "event dispatched"
        );
        Ok(outcome)
    }

    /// Returns whether the handler prevents the default action.
    fn run(&mut self, document: &mut Document, handler: Handler, event: &Event) -> Result<bool> {
        match handler {
            Handler::Dependency(id) => {
                self.dependencies.evaluate(document, id)?;
                Ok(false)
            }
            Handler::RowChange(row) => {
                if let Some(wiring) = self.rows.row_changed(document, row)? {
                    self.wire_row(wiring);
                }
                Ok(false)
            }
            Handler::RowRemove(row) => {
                self.rows.remove_row(document, row)?;
                Ok(true)
            }
            Handler::FieldAction(id) => {
                self.actions.apply(document, id)?;
                Ok(true)
            }
            Handler::DropZone(id) => Ok(self.zones.handle(document, id, event)?),
        }
    }

    /// Drop listeners whose target is no longer in the document.
    fn prune(&mut self, document: &Document) {
        let before = self.listeners.len();
        self.listeners
            .retain(|listener| document.is_connected(listener.target));
        let pruned = before - self.listeners.len();
        if pruned > 0 {
            debug!(pruned, "listeners of detached nodes dropped");
        }
    }

    /// Set a control's value and fire `change` on it.
    pub fn change_value(
        &mut self,
        document: &mut Document,
        target: NodeId,
        value: &str,
    ) -> Result<DispatchOutcome> {
        document.set_value(target, value)?;
        self.dispatch(document, target, &Event::change())
    }

    /// Check a checkbox or radio and fire `change` on it.
    pub fn check(&mut self, document: &mut Document, target: NodeId) -> Result<DispatchOutcome> {
        document.set_checked(target, true)?;
        self.dispatch(document, target, &Event::change())
    }

    pub fn click(&mut self, document: &mut Document, target: NodeId) -> Result<DispatchOutcome> {
        self.dispatch(document, target, &Event::click())
    }

    pub fn drop_files(
        &mut self,
        document: &mut Document,
        target: NodeId,
        files: Vec<String>,
    ) -> Result<DispatchOutcome> {
        self.dispatch(document, target, &Event::drop_files(files))
    }

    pub fn forms(&self) -> &[NodeId] {
        &self.forms
    }

    pub fn dependencies(&self) -> &DependencyEngine {
        &self.dependencies
    }

    pub fn rows(&self) -> &RowRepeater {
        &self.rows
    }

    pub fn drop_zones(&self) -> &DropZones {
        &self.zones
    }

    pub fn field_actions(&self) -> &FieldActions {
        &self.actions
    }

    pub fn listeners(&self) -> &ListenerRegistry<Handler> {
        &self.listeners
    }
}
