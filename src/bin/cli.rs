// Catalog - Genre, Author and Book catalog backend
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use catalog_core::catalog::view::ViewData;
use catalog_core::server::{init_tracing, start_server};
use catalog_core::storage::{queries, NewBook, NewGenre};
use catalog_core::{Config, Database, GenreController, GenreForm, Outcome};

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Catalog CLI - serve and administer the genre catalog", long_about = None)]
struct Cli {
    /// SQLite database file (overrides CATALOG_DATABASE)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (overrides CATALOG_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print all genres in name order
    Genres,
    /// Create a genre, reusing an existing one with the same name
    AddGenre {
        /// Genre name
        name: String,
    },
    /// Load a small sample catalog
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            start_server(config).await?;
        }
        Commands::Genres => {
            let genres = open(&config).await?;
            let outcome = genres.list().await?;
            if let Some(ViewData::GenreList { genre_list }) = outcome.view().map(|v| &v.data) {
                for genre in genre_list {
                    println!("{:>6}  {}", genre.id, genre.name);
                }
            }
        }
        Commands::AddGenre { name } => {
            let genres = open(&config).await?;
            match genres.create_post(GenreForm::new(name)).await? {
                Outcome::Redirect { location } => println!("{}", location),
                Outcome::Render(view) => {
                    if let ViewData::GenreForm { errors, .. } = view.data {
                        for error in errors {
                            eprintln!("{}: {}", error.field, error.message);
                        }
                    }
                    bail!("Genre was not created");
                }
            }
        }
        Commands::Seed => {
            let db = Database::new(&config.database_path).await?;
            seed(&db).await?;
            println!("Seeded catalog at {}", config.database_path.display());
        }
    }

    Ok(())
}

async fn open(config: &Config) -> anyhow::Result<GenreController<Database>> {
    let db = Database::new(&config.database_path)
        .await
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;
    Ok(GenreController::new(Arc::new(db)))
}

async fn seed(db: &Database) -> anyhow::Result<()> {
    let pool = db.pool();

    let fantasy = queries::insert_genre(pool, &NewGenre::new("Fantasy")).await?;
    queries::insert_genre(pool, &NewGenre::new("Drama")).await?;
    let sf = queries::insert_genre(pool, &NewGenre::new("Science Fiction")).await?;

    for (title, genre_id) in [
        ("The Name of the Wind", fantasy.id),
        ("The Wise Man's Fear", fantasy.id),
        ("Apes and Angels", sf.id),
        ("Death Wave", sf.id),
    ] {
        queries::insert_book(pool, &NewBook::new(title).in_genre(genre_id)).await?;
    }

    Ok(())
}
