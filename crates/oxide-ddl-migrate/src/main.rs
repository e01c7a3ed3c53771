//! oxide-ddl CLI
//!
//! Command-line tool for generating SQL migrations from a desired schema.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use oxide_ddl_core::SchemaState;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_ddl_migrate::prelude::*;

/// Offline PostgreSQL migration generator.
#[derive(Parser)]
#[command(name = "oxide-ddl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Migrations directory.
    #[arg(
        short,
        long,
        env = "OXIDE_DDL_MIGRATIONS_DIR",
        default_value = "migrations"
    )]
    migrations_dir: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a migration that brings the migrations up to a schema file.
    Generate {
        /// SQL script describing the desired schema.
        #[arg(short, long, default_value = "schema.sql")]
        schema: PathBuf,

        /// Print the migration without writing it (dry run).
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the schema produced by replaying the migrations.
    Inspect {
        /// Print the schema as JSON instead of DDL.
        #[arg(long)]
        json: bool,
    },

    /// Print the statements turning one SQL script's schema into another's.
    Diff {
        /// Script describing the starting schema.
        from: PathBuf,

        /// Script describing the target schema.
        to: PathBuf,
    },

    /// List migration files in version order.
    List,
}

/// Replays the migrations directory, treating a missing directory as empty.
fn current_state(dir: &Path) -> Result<SchemaState> {
    match discover_migrations(dir) {
        Ok(migrations) => {
            info!("Replaying {} migration(s) from {}", migrations.len(), dir.display());
            replay(&migrations)
        }
        Err(MigrateError::MigrationsDirNotFound(_)) => {
            info!("No migrations directory at {}, starting empty.", dir.display());
            Ok(SchemaState::new())
        }
        Err(e) => Err(e),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Generate { schema, dry_run } => {
            let current = current_state(&cli.migrations_dir)?;
            let desired = load_schema_file(&schema)?;
            let migration = generate(&current, &desired)?;
            let writer = MigrationWriter::new(&cli.migrations_dir);

            if dry_run {
                info!("Dry run mode - migration will be printed but not written.");
                if migration.is_empty() {
                    info!("Schema is up to date.");
                } else {
                    let (path, content) = writer.prepare(&migration, Utc::now());
                    println!("Would create migration: {}", path.display());
                    println!("\n{content}");
                }
            } else {
                writer.write(&migration, Utc::now())?;
            }
        }

        Commands::Inspect { json } => {
            let migrations = discover_migrations(&cli.migrations_dir)?;
            let state = replay(&migrations)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                for statement in dump(&state) {
                    println!("{statement};\n");
                }
            }
        }

        Commands::Diff { from, to } => {
            let current = load_schema_file(&from)?;
            let desired = load_schema_file(&to)?;
            let migration = generate(&current, &desired)?;
            if migration.is_empty() {
                info!("Schemas are identical.");
            }
            for statement in &migration.up.statements {
                println!("{statement};");
            }
        }

        Commands::List => {
            let migrations = discover_migrations(&cli.migrations_dir)?;
            if migrations.is_empty() {
                info!("No migrations found in {}", cli.migrations_dir.display());
            } else {
                println!("\nMigrations:");
                println!("{:-<60}", "");
                for migration in &migrations {
                    println!(
                        " {} ({} up, {} down)",
                        migration.file_name(),
                        migration.up.len(),
                        migration.down.len()
                    );
                }
                println!();
            }
        }
    }

    Ok(())
}
