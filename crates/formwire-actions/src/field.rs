//! Field actions: clickable elements that edit another field's
//! string-list value and mark a target element.

use serde::Serialize;
use tracing::{debug, warn};

use formwire_model::attrs::{
    DATA_FIELD_EFFECT, DATA_FIELD_EFFECT_TARGET, DATA_FIELD_NAME, DATA_FIELD_OP,
    DATA_FIELD_TRIGGER, DATA_FIELD_VALUE,
};
use formwire_model::{Document, EnhanceOptions, EventType, NodeId};

use crate::error::{ActionError, ActionIssue};

/// Index of a registered field action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ActionId(usize);

/// Edit applied to the target field's value, named by `data-field-op`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldOperation {
    /// `remove-from-string-list`: drop every entry equal to the value.
    RemoveFromStringList,
    /// `add-to-string-list`: append the value.
    AddToStringList,
}

impl FieldOperation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "remove-from-string-list" => Some(Self::RemoveFromStringList),
            "add-to-string-list" => Some(Self::AddToStringList),
            _ => None,
        }
    }

    /// Apply the operation to a `separator` delimited list.
    pub fn apply(self, list: &str, entry: &str, separator: char) -> String {
        let mut items: Vec<&str> = list.split(separator).collect();
        match self {
            Self::RemoveFromStringList => items.retain(|item| *item != entry),
            Self::AddToStringList => {
                items.retain(|item| !item.is_empty());
                items.push(entry);
            }
        }
        items.join(&separator.to_string())
    }
}

/// Class applied to the `data-field-effect-target` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldEffect {
    /// The hidden class.
    Hide,
    /// The strike class.
    Strikethru,
}

impl FieldEffect {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hide" => Some(Self::Hide),
            "strikethru" => Some(Self::Strikethru),
            _ => None,
        }
    }
}

/// Attributes of one `data-field-op` element, as declared.
#[derive(Debug, Clone)]
pub struct FieldAction {
    pub id: ActionId,
    pub element: NodeId,
    /// `data-field-trigger`, `click` when absent or empty.
    pub trigger: EventType,
    /// Raw `data-field-op`; unknown names are reported when the action runs.
    pub operation: String,
    /// Name of the field whose value is edited.
    pub field: String,
    pub value: String,
    pub effect: Option<String>,
    /// Id of the element the effect applies to.
    pub effect_target: Option<String>,
}

/// What one run of an action did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub issues: Vec<ActionIssue>,
    /// Field whose value the operation rewrote.
    pub updated: Option<NodeId>,
}

/// Field actions of every enhanced form.
#[derive(Debug, Clone)]
pub struct FieldActions {
    options: EnhanceOptions,
    actions: Vec<FieldAction>,
}

impl FieldActions {
    pub fn new(options: EnhanceOptions) -> Self {
        Self {
            options,
            actions: Vec::new(),
        }
    }

    /// Register every `data-field-op` element of `form`.
    pub fn discover(&mut self, document: &Document, form: NodeId) -> Vec<ActionId> {
        document
            .elements_with_attr(form, DATA_FIELD_OP)
            .into_iter()
            .map(|element| self.register(document, element))
            .collect()
    }

    pub fn register(&mut self, document: &Document, element: NodeId) -> ActionId {
        let attr = |name| document.attr(element, name).unwrap_or_default().to_string();
        let trigger = document
            .attr(element, DATA_FIELD_TRIGGER)
            .filter(|name| !name.is_empty())
            .map_or(EventType::Click, EventType::from_name);
        let id = ActionId(self.actions.len());
        let action = FieldAction {
            id,
            element,
            trigger,
            operation: attr(DATA_FIELD_OP),
            field: attr(DATA_FIELD_NAME),
            value: attr(DATA_FIELD_VALUE),
            effect: document
                .attr(element, DATA_FIELD_EFFECT)
                .filter(|effect| !effect.is_empty())
                .map(str::to_string),
            effect_target: document
                .attr(element, DATA_FIELD_EFFECT_TARGET)
                .filter(|target| !target.is_empty())
                .map(str::to_string),
        };
        debug!(
            element = %element,
            op = %action.operation,
            trigger = %action.trigger,
            "field action registered"
        );
        self.actions.push(action);
        id
    }

    /// Run the action once its trigger fired.
    ///
    /// The action element hides itself; there is no way back.
    pub fn apply(
        &self,
        document: &mut Document,
        id: ActionId,
    ) -> Result<ActionOutcome, ActionError> {
        let action = self.actions.get(id.0).ok_or(ActionError::UnknownAction(id))?;
        let mut outcome = ActionOutcome::default();
        document.add_class(action.element, &self.options.hidden_class)?;

        if let Some(effect) = &action.effect
            && let Some(issue) =
                self.apply_effect(document, effect, action.effect_target.as_deref())?
        {
            outcome.issues.push(issue);
        }

        let field = document.find_first(document.root(), |doc, node| {
            doc.attr(node, "name") == Some(action.field.as_str())
        });
        match (field, FieldOperation::from_name(&action.operation)) {
            (None, _) => outcome
                .issues
                .push(ActionIssue::UnknownField(action.field.clone())),
            (Some(_), None) => outcome
                .issues
                .push(ActionIssue::UnknownOperation(action.operation.clone())),
            (Some(field), Some(operation)) => {
                let current = document.value(field).to_string();
                let next = operation.apply(&current, &action.value, self.options.list_separator);
                debug!(field = %action.field, from = %current, to = %next, "field action applied");
                document.set_value(field, &next)?;
                outcome.updated = Some(field);
            }
        }

        for issue in &outcome.issues {
            warn!(element = %action.element, %issue, "field action issue");
        }
        Ok(outcome)
    }

    fn apply_effect(
        &self,
        document: &mut Document,
        effect: &str,
        target: Option<&str>,
    ) -> Result<Option<ActionIssue>, ActionError> {
        let Some(target) = target else {
            return Ok(Some(ActionIssue::MissingEffectTarget(effect.to_string())));
        };
        let Some(node) = document.element_by_id(target) else {
            return Ok(Some(ActionIssue::UnknownEffectTarget(target.to_string())));
        };
        let class = match FieldEffect::from_name(effect) {
            Some(FieldEffect::Hide) => &self.options.hidden_class,
            Some(FieldEffect::Strikethru) => &self.options.strike_class,
            None => {
                return Ok(Some(ActionIssue::UnknownEffect {
                    effect: effect.to_string(),
                    target: target.to_string(),
                }));
            }
        };
        document.add_class(node, class)?;
        Ok(None)
    }

    pub fn actions(&self) -> &[FieldAction] {
        &self.actions
    }

    pub fn action(&self, id: ActionId) -> Option<&FieldAction> {
        self.actions.get(id.0)
    }
}
