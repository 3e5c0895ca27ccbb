use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use formwire_core::{FormEnhancer, RecordedAlerts, SetupError};
use formwire_markup::{outline, parse_document, write_markup};
use formwire_model::{Document, EnhanceOptions};

use crate::cli::{CheckArgs, SimulateArgs};
use crate::report::{
    drop_zone_table, error_table, field_action_table, observer_table, row_group_table,
};
use crate::script::{StepReport, load_script, run_script};

/// A loaded and enhanced page.
pub struct Page {
    pub document: Document,
    pub enhancer: FormEnhancer,
    pub errors: Vec<SetupError>,
    pub alerts: Vec<String>,
}

pub fn load_page(path: &Path, options: EnhanceOptions) -> Result<Page> {
    let markup =
        fs::read_to_string(path).with_context(|| format!("read page {}", path.display()))?;
    enhance_markup(&markup, options).with_context(|| format!("load page {}", path.display()))
}

pub fn enhance_markup(markup: &str, options: EnhanceOptions) -> Result<Page> {
    let mut document = parse_document(markup)?;
    let mut alerts = RecordedAlerts::new();
    let root = document.root();
    let initialized = FormEnhancer::initialize(&mut document, root, options, &mut alerts);
    Ok(Page {
        document,
        enhancer: initialized.enhancer,
        errors: initialized.errors,
        alerts: alerts.messages,
    })
}

/// Print what the page wires. Returns whether any declaration failed.
pub fn run_check(args: &CheckArgs, options: EnhanceOptions) -> Result<bool> {
    let span = info_span!("check", page = %args.page.display());
    let _guard = span.enter();
    let page = load_page(&args.page, options)?;

    println!("Page: {}", args.page.display());
    println!("Forms: {}", page.enhancer.forms().len());
    for alert in &page.alerts {
        println!("Alert: {alert}");
    }
    println!("{}", observer_table(&page.document, &page.enhancer));
    if !page.enhancer.rows().groups().is_empty() {
        println!("{}", row_group_table(&page.document, &page.enhancer));
    }
    if !page.enhancer.drop_zones().zones().is_empty() {
        println!("{}", drop_zone_table(&page.document, &page.enhancer));
    }
    if !page.enhancer.field_actions().actions().is_empty() {
        println!("{}", field_action_table(&page.document, &page.enhancer));
    }
    if !page.errors.is_empty() {
        println!("{}", error_table(&page.errors));
    }
    info!(errors = page.errors.len(), "check finished");
    Ok(!page.errors.is_empty())
}

pub fn run_simulate(args: &SimulateArgs, options: EnhanceOptions) -> Result<Vec<StepReport>> {
    let span = info_span!("simulate", page = %args.page.display());
    let _guard = span.enter();
    let steps = load_script(&args.script)?;
    let mut page = load_page(&args.page, options)?;
    let reports = run_script(&mut page.document, &mut page.enhancer, &steps)?;

    for report in &reports {
        println!(
            "{} #{}: {} handler(s){}",
            report.step,
            report.target,
            report.handled,
            if report.default_prevented {
                ", default prevented"
            } else {
                ""
            }
        );
    }
    let root = page.document.root();
    print!("{}", outline(&page.document, root));
    if args.markup {
        println!("{}", write_markup(&page.document, root)?);
    }
    Ok(reports)
}
