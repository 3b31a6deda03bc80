use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use insect_search::{api, cli, config, error, expert, interactive, render, session};
use api::HttpCatalog;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use insect_search_common::Category;
use session::Session;
use std::future::Future;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// 通信中はスピナーを出す
async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

fn print_alert<A: api::CatalogApi>(session: &mut Session<A>) {
    if let Some(alert) = session.take_alert() {
        eprintln!("⚠ {}", alert);
    }
}

fn print_json(records: &[insect_search_common::InsectRecord]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    let base_url = config.resolve_base_url(cli.base_url.as_deref());
    let catalog = HttpCatalog::new(&base_url, config.timeout_seconds)?;

    match cli.command {
        Commands::Search { category, filters, json } => {
            let mut session = Session::new(catalog);
            session.select_category(category).await;
            session.fill_form(&filters.to_filter_state()).await;
            with_spinner("Поиск...", session.search()).await;

            print_alert(&mut session);
            if json {
                print_json(session.state().view().visible_results())?;
            } else {
                print!("{}", render::render_results(session.state()));
            }
        }

        Commands::Browse { type_filter, query, json } => {
            let mut session = Session::new(catalog);
            with_spinner("Загрузка всех насекомых...", session.browse_all()).await;
            print_alert(&mut session);

            if type_filter.is_some() || query.is_some() {
                session
                    .apply_local_filter(type_filter, query.as_deref().unwrap_or_default())
                    .await;
            }

            if json {
                print_json(session.state().view().visible_results())?;
            } else {
                print!("{}", render::render_results(session.state()));
            }
        }

        Commands::Options { category } => {
            let mut session = Session::new(catalog);
            with_spinner("Загрузка фильтров...", session.select_category(category)).await;
            print!("{}", render::render_options(category, session.state().options()));
        }

        Commands::ExpertRequest { description, location, date, additional } => {
            let request = expert::build_request(
                &description,
                location.as_deref(),
                date.as_deref(),
                additional.as_deref(),
            )?;
            match with_spinner("Отправка...", expert::submit(&catalog, &request)).await {
                Ok(message) => println!("✔ {}", message),
                Err(message) => eprintln!("✖ {}", message),
            }
        }

        Commands::Logout => {
            if expert::logout(&catalog).await {
                println!("✔ Вы вышли из учетной записи");
            } else {
                eprintln!("✖ Не удалось выйти");
            }
        }

        Commands::Interactive => {
            let mut session = Session::new(catalog);
            interactive::run(&mut session).await?;
        }

        Commands::Config { set_base_url, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(&url)?;
                config.save()?;
                println!("✔ Адрес сервера сохранен");
            }

            if show {
                println!("Настройки:");
                println!("  Сервер: {}", config.base_url);
                println!("  Используется: {}", base_url);
                println!("  Таймаут: {} с", config.timeout_seconds);
                println!("  Файл: {}", Config::config_path()?.display());
                println!("  Типы: {}", Category::ALL.map(|c| c.as_str()).join(", "));
            }
        }
    }

    Ok(())
}
