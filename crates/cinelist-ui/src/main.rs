//! cinelist - render a page of a record list.
//!
//! Usage: `cinelist <records.json> [page-kind] [page]`

use cinelist_core::AppConfig;
use cinelist_ui::{render_page, HiddenSet, JsonFileSource, ListController, PageKind, RecordSource};

struct Args {
    path: String,
    kind: PageKind,
    page: usize,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| "usage: cinelist <records.json> [page-kind] [page]".to_string())?;
    let kind = match args.next() {
        Some(kind) => kind.parse()?,
        None => PageKind::Reviews,
    };
    let page = match args.next() {
        Some(page) => page
            .parse()
            .map_err(|e| format!("invalid page '{}': {}", page, e))?,
        None => 1,
    };
    Ok(Args { path, kind, page })
}

fn load_config() -> AppConfig {
    match AppConfig::load_default() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Using default config: {}", e);
            AppConfig::default()
        }
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let config = load_config();
    let source = JsonFileSource::new(&args.path);

    let output = rt.block_on(async {
        let records = source.load().await?;
        let controller = ListController::new(args.kind, records, &config);

        let shown = controller.on_page(args.page);
        if shown != args.page {
            tracing::warn!("Page {} does not exist, showing page {}", args.page, shown);
        }

        let mut hidden = HiddenSet::new();
        controller.paint(&mut hidden).await;
        tracing::info!("{} records hidden by filters", hidden.len());

        Ok::<_, cinelist_ui::LoadError>(render_page(
            args.kind,
            &controller.snapshot(),
            &controller.page_records(),
            config.list.page_link_siblings,
        ))
    });

    match output {
        Ok(text) => println!("{}", text),
        Err(e) => {
            tracing::error!("Failed to load {}: {}", args.path, e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
