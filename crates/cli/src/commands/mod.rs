pub mod ballots;
pub mod config;
pub mod query;

use std::sync::Arc;

use ballot_service::BallotService;
use ballotbox_config::{BallotBoxConfig, PartialBallotBoxConfig};
use ballotdb::BallotDb;
use events::{EventBus, EventSubscriber};
use primitives::{Identity, SystemClock};

use crate::{
    cli::{Args, Commands},
    result::{CliError, Result},
};

pub async fn exec(args: Args) -> Result<()> {
    telemetry::debug!("args: {:?}", args);

    let config = BallotBoxConfig::load(args.config.as_deref())?.merge(PartialBallotBoxConfig {
        db_path: args.db_path,
        ..Default::default()
    });

    let Some(cmd) = args.command else {
        return Err(CliError::NoSubcommand);
    };

    if let Commands::Config = cmd {
        return config::exec(&config);
    }

    // the db stays locked against other ballotbox processes from here until
    // `service` is dropped at the end of this function
    let service = open_service(&config)?;
    let mut events = service.subscribe();

    let output = match cmd {
        Commands::Create(opts) => ballots::create(&service, &config, opts)?,
        Commands::Vote(opts) => ballots::vote(&service, opts)?,
        Commands::End(opts) => ballots::end(&service, opts)?,
        Commands::Info(opts) => query::info(&service, opts)?,
        Commands::Options(opts) => query::options(&service, opts)?,
        Commands::Results(opts) => query::results(&service, opts)?,
        Commands::Count(opts) => query::count(&service, opts)?,
        Commands::HasVoted(opts) => query::has_voted(&service, opts)?,
        Commands::Active(opts) => query::active(&service, opts)?,
        Commands::List => query::list(&service)?,
        Commands::Config => return config::exec(&config),
    };

    // nothing is reported back until the change it describes is on disk
    if output.mutated {
        service.persist()?;
    }

    log_events(&mut events);
    print!("{}", output.text);

    Ok(())
}

/// What a command has to say, held back until its changes are saved.
#[derive(Debug)]
pub(crate) struct Output {
    pub text: String,
    pub mutated: bool,
}

impl Output {
    pub fn read(text: String) -> Self {
        Self {
            text,
            mutated: false,
        }
    }

    pub fn mutation(text: String) -> Self {
        Self {
            text,
            mutated: true,
        }
    }
}

fn open_service(config: &BallotBoxConfig) -> Result<BallotService> {
    storage_utils::create_dir(&config.data_dir)?;

    let db = BallotDb::open(&config.db_path)?;

    Ok(BallotService::new(
        Arc::new(db),
        EventBus::new(config.event_buffer_size),
        Arc::new(SystemClock),
    ))
}

/// Drains whatever the command announced. Nothing else listens in a one-shot
/// process, so the log is where events end up.
fn log_events(events: &mut EventSubscriber) {
    while let Ok(message) = events.try_recv() {
        telemetry::info!(
            event_id = %message.id,
            event = message.event.kind(),
            payload = ?message.event,
            "event emitted"
        );
    }
}

pub(crate) fn parse_identity(identity: String) -> Result<Identity> {
    Ok(Identity::new(identity)?)
}
