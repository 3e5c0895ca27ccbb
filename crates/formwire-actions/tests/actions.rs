use formwire_actions::{ActionIssue, DropZoneError, DropZones, FieldActions};
use formwire_markup::parse_document;
use formwire_model::{Document, EnhanceOptions, Event, EventType, NodeId};

fn load(markup: &str) -> (Document, NodeId) {
    let document = parse_document(markup).expect("parse markup");
    let form = document.element_by_id("f").expect("form");
    (document, form)
}

fn id(document: &Document, id: &str) -> NodeId {
    document
        .element_by_id(id)
        .unwrap_or_else(|| panic!("missing #{id}"))
}

const TAGS_FORM: &str = r##"
<form id="f">
  <input type="hidden" name="tags" value="red,green,blue"/>
  <span id="green-label">green</span>
  <a id="drop-green" href="#" data-field-op="remove-from-string-list" data-field-name="tags"
     data-field-value="green" data-field-effect="strikethru" data-field-effect-target="green-label">x</a>
  <a id="add-pink" href="#" data-field-op="add-to-string-list" data-field-name="tags"
     data-field-value="pink" data-field-trigger="dblclick">+</a>
</form>
"##;

#[test]
fn remove_action_rewrites_list_and_marks_target() {
    let (mut document, form) = load(TAGS_FORM);
    let mut actions = FieldActions::new(EnhanceOptions::default());
    let ids = actions.discover(&document, form);
    assert_eq!(ids.len(), 2);
    assert_eq!(actions.action(ids[0]).unwrap().trigger, EventType::Click);

    let outcome = actions.apply(&mut document, ids[0]).unwrap();
    assert!(outcome.issues.is_empty());
    let tags = outcome.updated.expect("updated field");
    assert_eq!(document.value(tags), "red,blue");
    assert!(document.has_class(id(&document, "drop-green"), "d-none"));
    assert!(document.has_class(
        id(&document, "green-label"),
        "text-decoration-line-through"
    ));
}

#[test]
fn add_action_uses_declared_trigger() {
    let (mut document, form) = load(TAGS_FORM);
    let mut actions = FieldActions::new(EnhanceOptions::default());
    let ids = actions.discover(&document, form);
    let add = actions.action(ids[1]).unwrap();
    assert_eq!(add.trigger, EventType::Custom("dblclick".to_string()));

    let outcome = actions.apply(&mut document, ids[1]).unwrap();
    assert_eq!(
        document.value(outcome.updated.unwrap()),
        "red,green,blue,pink"
    );
}

#[test]
fn unknown_field_and_effect_are_reported_not_fatal() {
    let markup = r#"
<form id="f">
  <span id="t">t</span>
  <button id="go" data-field-op="add-to-string-list" data-field-name="missing"
          data-field-value="v" data-field-effect="blink" data-field-effect-target="t">go</button>
  <input name="list" value=""/>
  <button id="bad-op" data-field-op="replace" data-field-name="list">?</button>
</form>
"#;
    let (mut document, form) = load(markup);
    let mut actions = FieldActions::new(EnhanceOptions::default());
    let ids = actions.discover(&document, form);

    let outcome = actions.apply(&mut document, ids[0]).unwrap();
    assert_eq!(
        outcome.issues,
        [
            ActionIssue::UnknownEffect {
                effect: "blink".to_string(),
                target: "t".to_string()
            },
            ActionIssue::UnknownField("missing".to_string()),
        ]
    );
    assert!(document.has_class(id(&document, "go"), "d-none"));
    assert!(outcome.updated.is_none());

    let outcome = actions.apply(&mut document, ids[1]).unwrap();
    assert_eq!(
        outcome.issues,
        [ActionIssue::UnknownOperation("replace".to_string())]
    );
}

const UPLOAD_FORM: &str = r#"
<form id="f">
  <input id="upload" type="file" name="upload" data-dropzone="zone"/>
  <div id="zone">Drop files here</div>
</form>
"#;

#[test]
fn drop_zone_highlights_and_receives_files() {
    let (mut document, form) = load(UPLOAD_FORM);
    let mut zones = DropZones::new(EnhanceOptions::default());
    let setup = zones.discover(&mut document, form);
    assert!(setup.errors.is_empty());
    let zone = setup.wired[0];
    let region = id(&document, "zone");
    assert!(document.has_class(region, "drop-zone"));

    assert!(zones
        .handle(&mut document, zone, &Event::new(EventType::DragOver))
        .unwrap());
    assert!(document.has_class(region, "border-2"));
    assert!(!zones
        .handle(&mut document, zone, &Event::new(EventType::DragLeave))
        .unwrap());
    assert!(!document.has_class(region, "border"));

    zones
        .handle(&mut document, zone, &Event::new(EventType::DragOver))
        .unwrap();
    let files = vec!["a.csv".to_string(), "b.csv".to_string()];
    assert!(zones
        .handle(&mut document, zone, &Event::drop_files(files.clone()))
        .unwrap());
    assert_eq!(document.files(id(&document, "upload")), files.as_slice());
    assert!(!document.has_class(region, "p-3"));
    assert!(document.has_class(region, "drop-zone"));
}

#[test]
fn drop_zone_without_region_is_reported() {
    let markup = r#"<form id="f"><input id="upload" type="file" data-dropzone="nowhere"/></form>"#;
    let (mut document, form) = load(markup);
    let mut zones = DropZones::new(EnhanceOptions::default());
    let setup = zones.discover(&mut document, form);
    assert_eq!(
        setup.errors,
        [DropZoneError::MissingRegion {
            input: id(&document, "upload"),
            region: "nowhere".to_string()
        }]
    );
}
