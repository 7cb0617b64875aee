use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};

use laptop_insights::config::{Command, Config, HELP};
use laptop_insights::data::loader;
use laptop_insights::pages::Page;
use laptop_insights::report;
use laptop_insights::state::Session;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = match Config::parse(std::env::args().skip(1), |k| std::env::var(k).ok())? {
        Command::Run(config) => config,
        Command::ListPages => {
            for page in Page::ALL {
                println!("{:<12} {}", page.slug(), page.title());
            }
            return Ok(());
        }
        Command::Help => {
            println!("{HELP}");
            return Ok(());
        }
    };

    // Load once; every page reads the same table.
    let table = loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    let mut session = Session::new(Arc::new(table));

    if let Some(brand) = &config.brand {
        session.select_brand(brand);
    }
    session.set_price_order(config.price_order);

    for &page in &config.pages {
        session.select_page(page);
        let views = session
            .view()
            .with_context(|| format!("computing page '{page}'"))?;
        let text = report::render_page(page.title(), &views, config.max_rows)
            .with_context(|| format!("rendering page '{page}'"))?;
        println!("{text}");
    }

    Ok(())
}
