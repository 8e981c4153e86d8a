use clap::Parser;
use cli::{Args, Commands};
use error::{CliError, Result};
use logging::setup_logging;
use nu_ansi_term::Color::{Cyan, Green, Magenta};
use sqlchain::Statement;
use sqlchain_config::{
    generate_default_schema,
    schema::{schema_path, set_schema_path},
    Schema,
};
use statements::SelectOptions;
use tracing::{debug, info};
use utils::{set_color, Colored};

mod cli;
mod error;
mod literal;
mod logging;
mod statements;
mod utils;

fn print_statement(statement: &Statement, json: bool) -> Result<()> {
    if json {
        let encoded = serde_json::to_string_pretty(statement).map_err(CliError::Output)?;
        println!("{encoded}");
        return Ok(());
    }

    println!("{}", statement.sql);
    if statement.params.is_empty() {
        println!("{}", Colored(Magenta, "parameters: (none)"));
    } else {
        println!("{}", Colored(Magenta, "parameters:"));
        for (idx, value) in statement.params.iter().enumerate() {
            println!("  {} {}", Colored(Cyan, format!("{}.", idx + 1)), value);
        }
    }
    Ok(())
}

fn list_tables(schema: &Schema) {
    if schema.tables.is_empty() {
        info!("No tables declared in {}", schema_path().display());
        return;
    }
    for table in &schema.tables {
        info!("{}", Colored(Green, &table.name));
        for column in &table.columns {
            info!("  {} -> {}", Colored(Cyan, &column.field), column.column);
        }
    }
}

fn compile(schema: &Schema, command: Commands) -> Result<Option<Statement>> {
    let statement = match command {
        Commands::Init => {
            generate_default_schema()?;
            return Ok(None);
        }
        Commands::Tables => {
            list_tables(schema);
            return Ok(None);
        }
        Commands::Select {
            table,
            filter,
            sort,
            desc,
            columns,
            limit,
            offset,
        } => statements::select(
            &schema.table(&table)?.to_table(),
            SelectOptions {
                filter: &filter,
                sort: sort.as_deref(),
                descending: desc,
                columns: &columns,
                limit,
                offset,
            },
        )?,
        Commands::Count { table, filter } => {
            statements::count(&schema.table(&table)?.to_table(), &filter)?
        }
        Commands::Insert {
            table,
            records,
            replace,
        } => statements::insert(&schema.table(&table)?.to_table(), &records, replace)?,
        Commands::Update {
            table,
            assignments,
            filter,
        } => statements::update(&schema.table(&table)?.to_table(), &assignments, &filter)?,
        Commands::Delete { table, filter } => {
            statements::delete(&schema.table(&table)?.to_table(), &filter)?
        }
        Commands::Truncate { table } => schema.table(&table)?.to_table().truncate(),
    };
    Ok(Some(statement))
}

fn handle_cli() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        set_color(false);
    }

    if let Some(ref path) = args.schema {
        set_schema_path(path);
    }
    debug!(path = %schema_path().display(), "using schema");

    let schema = match args.command {
        Commands::Init => Schema::default(),
        _ => Schema::new()?,
    };

    if let Some(statement) = compile(&schema, args.command)? {
        print_statement(&statement, args.json)?;
    }
    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
