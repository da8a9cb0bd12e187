mod app_paths;
mod blocking;
mod bracket_data;
mod db;
mod domain;
mod gateway;
mod logging;
mod settings;
mod user_brackets;
mod users;

pub fn run() {
    if let Err(err) = run_impl() {
        eprintln!("bracket-hub failed to start: {err}");
        std::process::exit(1);
    }
}

fn run_impl() -> Result<(), String> {
    let data_dir = app_paths::app_data_dir()?;
    let _log_guard = logging::init(&data_dir);

    let app_settings = settings::read(&data_dir).unwrap_or_default();
    let pool = db::init(&data_dir)?;
    let canonicalizer = domain::team_name::TeamNameCanonicalizer::bundled()?;
    let brackets = bracket_data::BracketCatalog::bundled()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build tokio runtime: {e}"))?;

    runtime.block_on(gateway::serve(
        data_dir,
        app_settings,
        pool,
        canonicalizer,
        brackets,
    ))
}
