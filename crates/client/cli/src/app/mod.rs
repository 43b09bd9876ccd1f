//! Glue code tying the data files, the engine and the terminal UI together.
mod session;
mod sheets;

use adventure_content::{DataFiles, Manifest, ManifestLoader};
use adventure_core::{Env, GameConfig, LocationId, Party, PcgRng};
use anyhow::{Context, Result};

use crate::config::CliConfig;
use crate::presentation::{TerminalPresenter, terminal};

pub use session::Session;

pub struct CliApp {
    manifest: Manifest,
    files: DataFiles,
    party: Party,
    game_config: GameConfig,
    start: LocationId,
}

impl CliApp {
    /// Reads the manifest and checks the data directory before the terminal
    /// is taken over, so setup problems print as ordinary errors.
    pub fn load(config: &CliConfig) -> Result<Self> {
        let dir = &config.data_dir;
        let manifest = ManifestLoader::load_from_dir(dir)
            .with_context(|| format!("loading adventure manifest from {}", dir.display()))?;
        let files = DataFiles::open(dir, &manifest);

        let missing = files.missing_files();
        if missing.len() == files.paths().all().len() {
            anyhow::bail!(
                "no packed data in {} (set ADVENTURE_DATA_DIR or run `cargo xtask pack`)",
                dir.display()
            );
        }
        for path in &missing {
            tracing::warn!(path = %path.display(), "data file missing");
        }

        let party = manifest.party()?;
        let game_config = manifest.game_config();
        let start = config.start_location.unwrap_or(manifest.start_location);
        tracing::info!(
            adventure = %manifest.name,
            data_dir = %dir.display(),
            byte_order = %manifest.byte_order,
            start,
            "adventure loaded"
        );

        Ok(Self {
            manifest,
            files,
            party,
            game_config,
            start,
        })
    }

    pub fn run(self) -> Result<()> {
        tracing::info!("CLI client starting...");
        let CliApp {
            manifest,
            files,
            party,
            game_config,
            start,
        } = self;

        let rng = PcgRng;
        let env = Env::from_store(&files, &rng);
        let mut session = Session::new(env, &game_config, party, start);

        let terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;
        let mut presenter = TerminalPresenter::new(terminal);
        let result = session.run(&mut presenter);

        terminal::restore()?;
        let game = session.game();
        tracing::info!(
            adventure = %manifest.name,
            turn = game.turn,
            location = game.current_location,
            "CLI client exiting"
        );
        result
    }
}
