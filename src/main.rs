// src/main.rs

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use strum::IntoEnumIterator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use veycoflash_publisher::drafts::ListingDraft;
use veycoflash_publisher::errors::AppError;
use veycoflash_publisher::models::{
    DurationUnit, ListingKind, Modality, PriceType, ProductCategory, ProductCondition, Province,
    ServiceCategory, Weekday,
};
use veycoflash_publisher::selector::ListingTypeSelector;
use veycoflash_publisher::state::{AppConfig, AppState};

#[derive(Debug, Parser)]
#[command(name = "veycoflash-publisher", version, about = "Publicación de productos y servicios")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Publica un borrador JSON de producto o servicio
    Publish {
        draft: PathBuf,
        /// Archivo de sesión (por defecto VEYCOFLASH_SESSION_FILE)
        #[arg(long)]
        session: Option<PathBuf>,
    },
    /// Muestra los valores permitidos para un tipo de publicación
    Options { tipo: ListingKind },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Inicjalizacja systemu logowania (tracing)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "veycoflash_publisher=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Publish { draft, session } => publish(&draft, session).await,
        Command::Options { tipo } => {
            print_options(tipo);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("Zakończono z błędem: {}", e);
        std::process::exit(1);
    }
}

async fn publish(draft_path: &Path, session: Option<PathBuf>) -> Result<(), AppError> {
    let mut config = AppConfig::from_env()?;
    if let Some(session_file) = session {
        config.session_file = session_file;
    }
    tracing::info!(
        "API: {}, plik sesji: {}",
        config.api_base_url,
        config.session_file.display()
    );

    let draft = ListingDraft::load(draft_path).await?;
    let base_dir = draft_path.parent().unwrap_or_else(|| Path::new("."));

    let state = AppState::from_config(&config)?;
    let mut selector = ListingTypeSelector::new(state);
    let form = selector.choose(draft.tipo);
    draft.apply_to(form, base_dir).await?;

    tracing::info!("{}", form.submit_label());
    form.submit().await
}

fn print_options(tipo: ListingKind) {
    fn line<T: std::fmt::Display>(label: &str, values: impl Iterator<Item = T>) {
        let values: Vec<String> = values.map(|v| v.to_string()).collect();
        println!("{}: {}", label, values.join(" | "));
    }

    match tipo {
        ListingKind::Producto => {
            line("categoria", ProductCategory::iter());
            line("ubicacion", Province::iter());
            line("estado", ProductCondition::iter());
        }
        ListingKind::Servicio => {
            line("categoria", ServiceCategory::iter());
            line("tipoPrecio", PriceType::iter());
            line("modalidad", Modality::iter());
            line("ciudad", Province::iter());
            line("duracion", DurationUnit::iter());
            line("diasDisponibles", Weekday::iter());
        }
    }
}
