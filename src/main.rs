use std::io::{self, Write};
use std::process::ExitCode;

use log::{error, info};

use ebike_catalog::aggregate::total_list_price;
use ebike_catalog::lmdb_store::LmdbStore;
use ebike_catalog::renderer::dump_collection;
use ebike_catalog::seed::{self, FULL_BUILD_FIELD};
use ebike_catalog::store_config::StoreConfig;
use ebike_catalog::{AppResponse, CollectionKind, Filter};

fn run(store: &LmdbStore) -> Result<(), AppResponse> {
    seed::reset(store)?;
    seed::seed_demo_catalog(store)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "All components (including groups and bike builds):")?;
    dump_collection(store, CollectionKind::Components, &Filter::All, &mut out)?;

    writeln!(out, "Manufacturers:")?;
    dump_collection(store, CollectionKind::Manufacturers, &Filter::All, &mut out)?;

    writeln!(out, "Bikes:")?;
    dump_collection(
        store,
        CollectionKind::Components,
        &Filter::equals(FULL_BUILD_FIELD, true),
        &mut out,
    )?;

    writeln!(out, "Total list price: {}", total_list_price(store)?)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let config = StoreConfig::from_env();
    info!("Using database {}", config.lmdb_dir());

    let mut store = match LmdbStore::open(&config) {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Failed to open catalog store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = run(&store);

    if let Err(e) = store.close() {
        error!("Failed to close catalog store: {}", e);
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
