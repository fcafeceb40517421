//! `walkaround` - CLI for vehicle walk-around inspections
//!
//! This binary records inspections against the standard checklist, manages
//! the saved history and exports inspections as PDF reports.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use clap::Parser;
use tracing::warn;
use uuid::Uuid;

use walkaround::cli::{
    CatalogCommand, Cli, Command, ConfigCommand, DeleteCommand, ExportCommand, HistoryCommand,
    InspectCommand, OutputFormat, ShowCommand,
};
use walkaround::{
    init_logging, Catalog, Config, DirectoryExportSink, Error, Record, SqliteStore,
    ValidationError, WalkAround,
};

type App = WalkAround<SqliteStore>;

const DATE_FORMAT: &str = "%d/%m/%Y";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("could not load configuration")?;

    // Execute the command
    match cli.command {
        Command::Inspect(cmd) => handle_inspect(&open(&config)?, cmd),
        Command::Catalog(cmd) => handle_catalog(&cmd),
        Command::History(cmd) => handle_history(&open(&config)?, &cmd),
        Command::Show(cmd) => handle_show(&open(&config)?, &cmd),
        Command::Delete(cmd) => handle_delete(&open(&config)?, &cmd),
        Command::Export(cmd) => handle_export(&open(&config)?, cmd),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open(config: &Config) -> Result<App> {
    WalkAround::open(config).with_context(|| {
        format!(
            "could not open inspection history at {}",
            config.database_path().display()
        )
    })
}

fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

fn checked_count(record: &Record, catalog: &Catalog) -> usize {
    catalog.items().filter(|item| record.is_completed(item)).count()
}

fn handle_inspect(app: &App, cmd: InspectCommand) -> Result<()> {
    let mut session = app.start_inspection();
    session.set_driver_name(cmd.driver);
    session.set_truck_number(cmd.truck);
    if let Some(date) = cmd.date {
        session.set_date(date.and_time(NaiveTime::MIN).and_utc());
    }
    if let Some(comments) = cmd.comments {
        session.set_comments(comments);
    }

    if cmd.all {
        for item in app.catalog().items() {
            if !session.is_checked(item) {
                session.toggle_item(item);
            }
        }
    }
    for category in &cmd.categories {
        session.toggle_all_in_category(category)?;
    }
    for item in &cmd.items {
        if !app.catalog().contains_item(item) {
            warn!("'{}' is not on the checklist", item);
        }
        if !session.is_checked(item) {
            session.toggle_item(item);
        }
    }

    let record = match app.submit(&session) {
        Ok(record) => record,
        Err(Error::Validation(ValidationError::IncompleteChecklist { missing })) => {
            eprintln!("Unchecked items:");
            for item in &missing {
                eprintln!("  [ ] {item}");
            }
            bail!(ValidationError::IncompleteChecklist { missing });
        }
        Err(e) => return Err(e.into()),
    };

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Plain | OutputFormat::Table => {
            println!(
                "Saved inspection {} for truck {} ({}/{} items)",
                short_id(record.id()),
                record.truck_number(),
                checked_count(&record, app.catalog()),
                app.catalog().item_count()
            );
        }
    }
    Ok(())
}

fn handle_catalog(cmd: &CatalogCommand) -> Result<()> {
    let catalog = Catalog::standard();
    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
        OutputFormat::Plain => {
            for category in catalog.categories() {
                println!("{}", category.name());
                for item in category.items() {
                    println!("  - {item}");
                }
            }
        }
        OutputFormat::Table => {
            println!("{:<20}  ITEM", "CATEGORY");
            for category in catalog.categories() {
                for item in category.items() {
                    println!("{:<20}  {}", category.name(), item);
                }
            }
        }
    }
    Ok(())
}

fn handle_history(app: &App, cmd: &HistoryCommand) -> Result<()> {
    let records = app.view_history()?;
    let total = app.catalog().item_count();

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        _ if records.is_empty() => println!("No saved inspections."),
        OutputFormat::Plain => {
            for (index, record) in records.iter().enumerate() {
                println!(
                    "[{}] {}  {}  {}  truck {}",
                    index,
                    short_id(record.id()),
                    record.date().format(DATE_FORMAT),
                    record.driver_name(),
                    record.truck_number()
                );
            }
        }
        OutputFormat::Table => {
            println!(
                "{:<4}{:<10}{:<12}{:<24}{:<10}ITEMS",
                "#", "ID", "DATE", "DRIVER", "TRUCK"
            );
            for (index, record) in records.iter().enumerate() {
                println!(
                    "{:<4}{:<10}{:<12}{:<24}{:<10}{}/{}",
                    index,
                    short_id(record.id()),
                    record.date().format(DATE_FORMAT).to_string(),
                    record.driver_name(),
                    record.truck_number(),
                    checked_count(record, app.catalog()),
                    total
                );
            }
        }
    }
    Ok(())
}

fn handle_show(app: &App, cmd: &ShowCommand) -> Result<()> {
    let record = app.resolve_record(&cmd.id)?;

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("Inspection {}", record.id());
    println!("Date:    {}", record.date().format(DATE_FORMAT));
    println!("Driver:  {}", record.driver_name());
    println!("Truck:   {}", record.truck_number());
    for category in app.catalog().categories() {
        let done = record.completed_in(category);
        println!();
        println!(
            "{} ({}/{})",
            category.name(),
            done.len(),
            category.items().len()
        );
        for item in category.items() {
            let mark = if done.contains(&item.as_str()) { 'x' } else { ' ' };
            println!("  [{mark}] {item}");
        }
    }
    if !record.comments().is_empty() {
        println!();
        println!("Comments:");
        for line in record.comments().lines() {
            println!("  {line}");
        }
    }
    Ok(())
}

fn handle_delete(app: &App, cmd: &DeleteCommand) -> Result<()> {
    let deleted = if cmd.indices.is_empty() {
        // Resolve everything first so one bad reference deletes nothing
        let ids = cmd
            .ids
            .iter()
            .map(|reference| app.resolve_record(reference).map(|r| r.id()))
            .collect::<Result<Vec<_>, _>>()?;
        let mut deleted = 0;
        for id in ids {
            if app.delete_record(id)? {
                deleted += 1;
            }
        }
        deleted
    } else {
        app.delete_records_at(&cmd.indices)?
    };

    println!(
        "Deleted {} inspection{}.",
        deleted,
        if deleted == 1 { "" } else { "s" }
    );
    Ok(())
}

fn handle_export(app: &App, cmd: ExportCommand) -> Result<()> {
    let record = app.resolve_record(&cmd.id)?;
    let sink = cmd
        .output
        .map_or_else(|| app.default_sink(), DirectoryExportSink::new);

    match app.share_record(record.id(), &sink)? {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => bail!(
            "could not export inspection {} to {}",
            short_id(record.id()),
            sink.dir().display()
        ),
    }
}

fn handle_status(config: &Config, json: bool) -> Result<()> {
    let app = open(config)?;
    let stats = app.stats()?;
    let records = app.view_history()?.len();

    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "records_key": config.storage.records_key,
            "records": records,
            "entries": stats.entries,
            "db_size_bytes": stats.db_size_bytes,
            "export_dir": config.export_dir(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("walkaround status");
        println!("-----------------");
        println!("Database:      {}", config.database_path().display());
        println!("Size:          {} bytes", stats.db_size_bytes);
        println!("Inspections:   {records}");
        println!("Export dir:    {}", config.export_dir().display());
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Records key:        {}", config.storage.records_key);
                println!();
                println!("[Persistence]");
                println!("  Strict:             {}", config.persistence.strict);
                println!();
                println!("[Report]");
                println!("  Author:             {}", config.report.author);
                println!("  Export dir:         {}", config.export_dir().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
