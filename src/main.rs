use std::io;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gradebook::config::AppConfig;
use gradebook::roster::RosterStore;
use gradebook::session::AdminSession;
use gradebook::{sheet, student};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::load_default()?;
    let roster = startup_roster(&config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = AdminSession::new(config, roster, stdin.lock(), stdout.lock());
    session.run()
}

/// Session-start roster: the data file when it exists and its header checks
/// out, otherwise the seed sample data.
fn startup_roster(config: &AppConfig) -> RosterStore {
    let path = &config.data_file;
    if path.is_file() && sheet::validate_schema(path) {
        match sheet::import(path) {
            Ok(outcome) => {
                info!(
                    path = %path.display(),
                    loaded = outcome.records.len(),
                    skipped = outcome.skipped_rows,
                    "roster loaded from data file"
                );
                return RosterStore::from_records(outcome.records);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e,
                    "failed to load data file, falling back to sample data");
            }
        }
    } else {
        info!(path = %path.display(), "no usable data file, seeding sample roster");
    }
    RosterStore::from_records(student::sample_roster())
}
