use formwire_core::{
    AlertSink, DispatchError, FormEnhancer, Initialized, RecordedAlerts, SetupError,
};
use formwire_deps::DependencyError;
use formwire_markup::{outline, parse_document};
use formwire_model::attrs::MISMATCH_MESSAGE;
use formwire_model::{Document, EnhanceOptions, Event, EventType, NodeId};

const SIGNUP: &str = r##"
<form id="f">
  <fieldset id="kind">
    <input type="radio" name="kind" value="person" checked/>
    <input type="radio" name="kind" value="company"/>
  </fieldset>
  <div id="company" data-depends="kind" data-depends-value="company">
    <input id="vat" name="vat"/>
  </div>
  <template id="file">
    <input type="file" name="file"/>
    <span><a href="#" role="remove-templated-row">remove</a></span>
  </template>
  <div id="file-container"></div>
</form>
"##;

fn enhance(markup: &str, alerts: &mut dyn AlertSink) -> (Document, Initialized) {
    let mut document = parse_document(markup).expect("parse markup");
    let root = document.root();
    let initialized = FormEnhancer::initialize(&mut document, root, EnhanceOptions::default(), alerts);
    (document, initialized)
}

fn id(document: &Document, id: &str) -> NodeId {
    document
        .element_by_id(id)
        .unwrap_or_else(|| panic!("missing #{id}"))
}

fn by_name(document: &Document, name: &str, nth: usize) -> NodeId {
    document.find_all(document.root(), |doc, node| doc.attr(node, "name") == Some(name))[nth]
}

fn file_rows(document: &Document) -> usize {
    document.children(id(document, "file-container")).len()
}

#[test]
fn page_state_after_interaction() {
    let mut alerts = RecordedAlerts::new();
    let (mut document, initialized) = enhance(SIGNUP, &mut alerts);
    assert!(initialized.errors.is_empty());
    assert!(alerts.messages.is_empty());
    let mut enhancer = initialized.enhancer;

    let company = by_name(&document, "kind", 1);
    enhancer.check(&mut document, company).unwrap();
    let first_file = by_name(&document, "file", 0);
    enhancer.change_value(&mut document, first_file, "a.pdf").unwrap();

    let form = id(&document, "f");
    insta::assert_snapshot!(outline(&document, form), @r#"
    form#f
      fieldset#kind
        input name=kind value="person"
        input name=kind value="company" checked
      div#company
        input#vat name=vat
      template#file
      div#file-container
        div
          input name=file value="a.pdf"
          span
            a role=remove-templated-row
              "remove"
        div
          input name=file focused
          span.d-none
            a role=remove-templated-row
              "remove"
    "#);
}

#[test]
fn initial_state_hides_and_suppresses() {
    let mut alerts = RecordedAlerts::new();
    let (document, initialized) = enhance(SIGNUP, &mut alerts);
    let company = id(&document, "company");
    let vat = id(&document, "vat");

    assert!(document.has_class(company, "d-none"));
    assert!(document.is_disabled(vat));
    assert!(initialized.enhancer.dependencies().is_suppressed(vat));
    assert_eq!(file_rows(&document), 1);
    assert_eq!(initialized.enhancer.forms(), [id(&document, "f")]);
}

#[test]
fn radio_change_bubbles_to_fieldset_listener() {
    let mut alerts = RecordedAlerts::new();
    let (mut document, initialized) = enhance(SIGNUP, &mut alerts);
    let mut enhancer = initialized.enhancer;
    let company = id(&document, "company");

    let company_radio = by_name(&document, "kind", 1);
    let outcome = enhancer.check(&mut document, company_radio).unwrap();
    assert_eq!(outcome.handled, 1);
    assert!(!outcome.default_prevented);
    assert!(!document.has_class(company, "d-none"));
    assert!(!document.is_disabled(id(&document, "vat")));

    let person_radio = by_name(&document, "kind", 0);
    enhancer.check(&mut document, person_radio).unwrap();
    assert!(document.has_class(company, "d-none"));
}

#[test]
fn removing_a_row_prunes_its_listeners() {
    let mut alerts = RecordedAlerts::new();
    let (mut document, initialized) = enhance(SIGNUP, &mut alerts);
    let mut enhancer = initialized.enhancer;

    let first_file = by_name(&document, "file", 0);
    enhancer.change_value(&mut document, first_file, "a.pdf").unwrap();
    assert_eq!(file_rows(&document), 2);
    let listeners = enhancer.listeners().len();

    let remove = document.find_all(document.root(), |doc, node| {
        doc.attr(node, "role") == Some("remove-templated-row")
    })[0];
    let outcome = enhancer.click(&mut document, remove).unwrap();
    assert!(outcome.default_prevented);
    assert_eq!(file_rows(&document), 1);
    assert!(!document.is_connected(first_file));
    assert_eq!(enhancer.listeners().len(), listeners - 2);
    assert_eq!(
        enhancer.change_value(&mut document, first_file, "b.pdf"),
        Err(DispatchError::Detached(first_file))
    );

    // The remaining row is the trailing one and stays.
    let remove = document.find_all(document.root(), |doc, node| {
        doc.attr(node, "role") == Some("remove-templated-row")
    })[0];
    enhancer.click(&mut document, remove).unwrap();
    assert_eq!(file_rows(&document), 1);
}

#[test]
fn mismatch_alerts_once_and_spares_other_declarations() {
    let markup = r#"
<form id="f">
  <input name="x" value="1"/>
  <div id="bad" data-depends="x,x" data-depends-value="1"></div>
  <div id="good" data-depends="x" data-depends-value="2"></div>
</form>
"#;
    let mut alerts = RecordedAlerts::new();
    let (document, initialized) = enhance(markup, &mut alerts);

    assert_eq!(alerts.messages, [MISMATCH_MESSAGE]);
    assert!(matches!(
        initialized.errors.as_slice(),
        [SetupError::Dependency(DependencyError::ConfigurationMismatch { names: 2, values: 1, .. })]
    ));
    assert!(initialized.errors[0].alerts_user());
    assert!(document.has_class(id(&document, "good"), "d-none"));
}

#[test]
fn unresolved_field_is_logged_without_alert() {
    let markup = r#"
<form id="f">
  <div data-depends="ghost" data-depends-value="1"></div>
</form>
"#;
    let mut alerts = RecordedAlerts::new();
    let (_, initialized) = enhance(markup, &mut alerts);
    assert!(alerts.messages.is_empty());
    assert_eq!(initialized.errors.len(), 1);
    assert!(!initialized.errors[0].alerts_user());
}

#[test]
fn forms_resolve_fields_independently() {
    let markup = r#"
<div>
  <form id="a">
    <input id="a-mode" name="mode" value="on"/>
    <div id="a-dep" data-depends="mode" data-depends-value="on"></div>
  </form>
  <form id="b">
    <input id="b-mode" name="mode" value="off"/>
    <div id="b-dep" data-depends="mode" data-depends-value="on"></div>
  </form>
</div>
"#;
    let mut alerts = RecordedAlerts::new();
    let (mut document, initialized) = enhance(markup, &mut alerts);
    let mut enhancer = initialized.enhancer;
    assert_eq!(enhancer.forms().len(), 2);
    assert!(!document.has_class(id(&document, "a-dep"), "d-none"));
    assert!(document.has_class(id(&document, "b-dep"), "d-none"));

    let b_mode = id(&document, "b-mode");
    enhancer.change_value(&mut document, b_mode, "on").unwrap();
    assert!(!document.has_class(id(&document, "b-dep"), "d-none"));
    assert!(!document.has_class(id(&document, "a-dep"), "d-none"));
}

#[test]
fn root_may_be_the_form_itself() {
    let mut document = parse_document(SIGNUP).expect("parse markup");
    let form = id(&document, "f");
    let mut alerts = RecordedAlerts::new();
    let initialized =
        FormEnhancer::initialize(&mut document, form, EnhanceOptions::default(), &mut alerts);
    assert_eq!(initialized.enhancer.forms(), [form]);
    assert_eq!(initialized.enhancer.dependencies().observers().len(), 1);
}

#[test]
fn field_action_and_drop_zone_through_dispatch() {
    let markup = r##"
<form id="f">
  <input type="hidden" name="tags" value="a,b"/>
  <a id="drop-a" href="#" data-field-op="remove-from-string-list" data-field-name="tags" data-field-value="a">x</a>
  <input id="upload" type="file" data-dropzone="zone"/>
  <div id="zone"><p id="hint">Drop here</p></div>
</form>
"##;
    let mut alerts = RecordedAlerts::new();
    let (mut document, initialized) = enhance(markup, &mut alerts);
    assert!(initialized.errors.is_empty());
    let mut enhancer = initialized.enhancer;

    let action = id(&document, "drop-a");
    let outcome = enhancer.click(&mut document, action).unwrap();
    assert!(outcome.default_prevented);
    assert_eq!(document.value(by_name(&document, "tags", 0)), "b");
    assert!(document.has_class(action, "d-none"));

    let zone = id(&document, "zone");
    let hint = id(&document, "hint");
    let over = enhancer
        .dispatch(&mut document, hint, &Event::new(EventType::DragOver))
        .unwrap();
    assert!(over.default_prevented);
    assert!(document.has_class(zone, "border"));

    let dropped = enhancer
        .drop_files(&mut document, zone, vec!["report.pdf".to_string()])
        .unwrap();
    assert!(dropped.default_prevented);
    assert_eq!(document.files(id(&document, "upload")), ["report.pdf".to_string()]);
    assert!(!document.has_class(zone, "border"));
}

#[test]
fn custom_events_do_not_bubble() {
    let markup = r#"
<form id="f">
  <input name="list" value=""/>
  <div id="outer">
    <span id="inner" data-field-op="add-to-string-list" data-field-name="list"
          data-field-value="x" data-field-trigger="activate">go</span>
  </div>
</form>
"#;
    let mut alerts = RecordedAlerts::new();
    let (mut document, initialized) = enhance(markup, &mut alerts);
    let mut enhancer = initialized.enhancer;
    let activate = Event::new(EventType::from_name("activate"));

    let outer = id(&document, "outer");
    assert_eq!(enhancer.dispatch(&mut document, outer, &activate).unwrap().handled, 0);

    let inner = id(&document, "inner");
    let outcome = enhancer.dispatch(&mut document, inner, &activate).unwrap();
    assert_eq!(outcome.handled, 1);
    assert_eq!(document.value(by_name(&document, "list", 0)), "x");
}

#[test]
fn option_text_with_entity_drives_dependency() {
    let markup = r#"
<form id="f">
  <select name="meal">
    <option selected>Fish &amp; chips</option>
    <option>Salad</option>
  </select>
  <div id="sauce" data-depends="meal" data-depends-value="Fish &amp; chips"></div>
</form>
"#;
    let mut alerts = RecordedAlerts::new();
    let (mut document, initialized) = enhance(markup, &mut alerts);
    let mut enhancer = initialized.enhancer;
    let sauce = id(&document, "sauce");
    assert!(!document.has_class(sauce, "d-none"));

    let meal = by_name(&document, "meal", 0);
    enhancer.change_value(&mut document, meal, "Salad").unwrap();
    assert!(document.has_class(sauce, "d-none"));
    enhancer
        .change_value(&mut document, meal, "Fish & chips")
        .unwrap();
    assert!(!document.has_class(sauce, "d-none"));
}
