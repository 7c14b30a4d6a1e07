use std::{collections::HashSet, fs, io, net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use axum::Router;
use clap::{Parser, Subcommand};
use docgen::{config::Config, site::Site, utils::create_new, CONFIG_FILE};
use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::new_debouncer;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(about, version)]
struct Args {
    /// site config file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// command, defaults to `build`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// generate the site
    Build,
    /// create a new minimal site
    New {
        /// name of the new site
        name: String,
    },
    /// rebuild the site whenever its inputs change
    Watch,
    /// serve the generated site
    Serve {
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// clean up the generated files
    Clean,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Build);

    if matches!(command, Commands::Serve { .. }) {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "docgen=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if let Err(err) = run(command, args.config).await {
        log::error!("Encountered error `{err:#}`");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config_path: PathBuf) -> anyhow::Result<()> {
    let load = || {
        Config::load(&config_path).with_context(|| format!("loading site config `{config_path:?}`"))
    };
    match command {
        Commands::Build => {
            Site::new(load()?).run()?;
            Ok(())
        }
        Commands::New { name } => {
            create_new(&name).with_context(|| format!("creating new site `{name}`"))
        }
        Commands::Watch => watch(Site::new(load()?)),
        Commands::Serve { port } => serve(using_serve_dir(load()?.structure.build), port).await,
        Commands::Clean => clean(load()?.structure.build),
    }
}

fn clean(out_dir: PathBuf) -> anyhow::Result<()> {
    match fs::remove_dir_all(&out_dir) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            Err(err).with_context(|| format!("removing `{out_dir:?}`"))
        }
        _ => Ok(()),
    }
}

fn watch(site: Site) -> anyhow::Result<()> {
    if let Err(err) = site.run() {
        log::error!("Build failed `{err}`");
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_secs(2), None, tx)?;

    let structure = &site.config().structure;
    for dir in [&structure.content, &structure.includes, &structure.template] {
        debouncer
            .watcher()
            .watch(dir, RecursiveMode::Recursive)
            .with_context(|| format!("watching `{dir:?}`"))?;
    }

    for res in rx {
        match res {
            Ok(events) => {
                let updated: HashSet<_> = events.into_iter().flat_map(|e| e.paths.clone()).collect();
                log::info!("Changes in: {updated:?}");
                log::info!("Rebuilding");
                if let Err(err) = site.run() {
                    log::error!("Build failed `{err}`");
                }
            }
            Err(errors) => {
                log::error!("Error received `{errors:?}`");
            }
        }
    }
    Ok(())
}

fn using_serve_dir(out_dir: PathBuf) -> Router {
    Router::new().fallback_service(ServeDir::new(out_dir))
}

async fn serve(app: Router, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.layer(TraceLayer::new_for_http())).await?;
    Ok(())
}
