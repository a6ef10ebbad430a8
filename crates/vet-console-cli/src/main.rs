//! Terminal front-end for the clinic console.

mod cli;
mod output;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};

use cli::{Cli, Command};
use vet_console_core::layout::{self, Route};
use vet_console_core::models::schema_for;
use vet_console_core::{
    open_screen, Backend, ConsoleConfig, ConsoleError, HttpBackend, ResourceKind, ScreenHandle,
    SortSpec,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config,
        api_url,
        command,
        ..
    } = cli;
    let backend = || connect(config.as_deref(), api_url.as_deref());

    match command {
        Command::List {
            resource,
            filters,
            sort,
            json,
        } => list(backend()?, resource, &filters, sort.as_deref(), json),
        Command::Fields { resource } => {
            println!("{}", output::describe_schema(schema_for(resource)));
            Ok(())
        }
        Command::Create { resource, values } => create(backend()?, resource, &values),
        Command::Update {
            resource,
            document_id,
            values,
        } => update(backend()?, resource, &document_id, &values),
        Command::Delete {
            resource,
            document_id,
            yes,
        } => delete(backend()?, resource, &document_id, yes),
        Command::Nav { current } => {
            print_nav(&current);
            Ok(())
        }
    }
}

fn connect(config_path: Option<&Path>, api_url: Option<&str>) -> Result<Arc<dyn Backend>> {
    let mut config = ConsoleConfig::load(config_path).context("Failed to load configuration")?;
    if let Some(url) = api_url {
        config = config.with_base_url(url)?;
    }
    info!("using backend at {}", config.base_url);
    let backend = HttpBackend::from_config(&config).context("Failed to build HTTP client")?;
    Ok(Arc::new(backend))
}

fn list(
    backend: Arc<dyn Backend>,
    resource: ResourceKind,
    filters: &[(String, String)],
    sort: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut screen = open_screen(resource, backend);
    for (key, value) in filters {
        screen.set_filter(key, value)?;
    }
    if let Some(sort) = sort {
        let spec = SortSpec::parse(sort)
            .with_context(|| format!("Invalid sort '{}', expected COLUMN[:asc|desc]", sort))?;
        screen.set_sort(Some(spec))?;
    }
    let loaded = screen.load();
    flush_notifications(screen.as_mut());
    loaded?;

    let rows = screen.rows();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{}", output::rows_table(screen.schema(), &rows));
        println!("\n{} of {} {}", rows.len(), screen.total(), resource.plural());
    }
    Ok(())
}

fn create(backend: Arc<dyn Backend>, resource: ResourceKind, values: &[(String, String)]) -> Result<()> {
    let mut screen = open_screen(resource, backend);
    screen.open_for_create()?;
    fill_and_submit(screen.as_mut(), values)
}

fn update(
    backend: Arc<dyn Backend>,
    resource: ResourceKind,
    document_id: &str,
    values: &[(String, String)],
) -> Result<()> {
    let mut screen = open_screen(resource, backend);
    let loaded = screen.load();
    flush_notifications(screen.as_mut());
    loaded?;
    screen.open_for_edit(document_id)?;
    fill_and_submit(screen.as_mut(), values)
}

fn fill_and_submit(screen: &mut dyn ScreenHandle, values: &[(String, String)]) -> Result<()> {
    for (name, value) in values {
        screen.set_form_field(name, value)?;
    }
    let submitted = screen.submit();
    flush_notifications(screen);
    if let Err(ConsoleError::Validation(_)) = &submitted {
        for error in screen.form_errors().iter() {
            eprintln!("  {}: {}", error.field, error.message);
        }
    }
    submitted?;
    Ok(())
}

fn delete(backend: Arc<dyn Backend>, resource: ResourceKind, document_id: &str, yes: bool) -> Result<()> {
    let mut screen = open_screen(resource, backend);
    let loaded = screen.load();
    flush_notifications(screen.as_mut());
    loaded?;

    screen.request_delete(document_id)?;
    if !yes && !confirm(&format!("Delete {} {}?", resource.noun(), document_id))? {
        screen.cancel_delete();
        debug!("delete of {} cancelled", document_id);
        println!("Cancelled");
        return Ok(());
    }
    let deleted = screen.confirm_delete();
    flush_notifications(screen.as_mut());
    deleted?;
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    let read = io::stdin().lock().read_line(&mut answer)?;
    if read == 0 {
        bail!("No answer on stdin; pass --yes to delete without confirmation");
    }
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn flush_notifications(screen: &mut dyn ScreenHandle) {
    for notification in screen.take_notifications() {
        eprintln!("{}", output::notification(&notification));
    }
}

fn print_nav(current: &str) {
    println!("{}", layout::APP_TITLE);
    for item in layout::navigation(Route::from_key(current)) {
        let marker = if item.selected { "*" } else { " " };
        println!(" {} {:<18} {}", marker, item.label, item.path);
    }
    println!("{}", layout::current_footer());
}
