use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, warn};
use thiserror::Error;

use evote_client::backend::{Backend, HttpBackend};
use evote_client::model::{
    CandidateForm, CandidateSelection, Credential, Election, NewElection, Phase,
};
use evote_client::workflow::{
    AdminActions, CandidateRegistry, CastOutcome, ElectionDirectory, RegistrationFlow,
    VoteCastingProtocol,
};
use evote_client::Config;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M %Z";

/// Errors that are critical to the entire CLI run.
#[derive(Debug, Error)]
enum Error {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] figment::Error),
    #[error(transparent)]
    Client(#[from] evote_client::Error),
}

#[derive(Parser)]
#[command(
    name = "evote",
    about = "Client for the ledger-backed e-voting service",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List elections, optionally only those in a given phase.
    Elections {
        #[arg(long, value_enum)]
        phase: Option<PhaseArg>,
    },
    /// Create an election (admin).
    CreateElection {
        name: String,
        /// RFC 3339 instant, e.g. 2023-04-01T09:00:00Z.
        #[arg(long)]
        start: DateTime<Utc>,
        #[arg(long)]
        end: DateTime<Utc>,
    },
    /// End an election immediately (admin).
    EndElection { election_id: String },
    /// List the candidates standing in an election, with live tallies.
    Candidates { election_id: String },
    /// List the global candidate pool with reuse indices.
    Pool,
    /// Add a candidate to an election, new or reused from the pool (admin).
    AddCandidate {
        election_id: String,
        /// Pre-fill the form from this index into the pool listing.
        #[arg(long)]
        reuse: Option<usize>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        student_id: Option<String>,
        #[arg(long)]
        faculty: Option<String>,
        #[arg(long)]
        party: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Register as a voter for an election.
    Register {
        election_id: String,
        student_id: String,
        email: String,
    },
    /// Cast a vote.
    Vote {
        election_id: String,
        candidate_id: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the results of an election.
    Results { election_id: String },
    /// List the voter roll (admin).
    Voters,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum PhaseArg {
    Upcoming,
    Ongoing,
    Ended,
}

impl From<PhaseArg> for Phase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::Upcoming => Phase::Upcoming,
            PhaseArg::Ongoing => Phase::Ongoing,
            PhaseArg::Ended => Phase::Ended,
        }
    }
}

async fn run(args: Args) -> Result<(), Error> {
    let config = Config::load()?;
    let backend = HttpBackend::new(&config)?;

    match args.command {
        Command::Elections { phase } => list_elections(&backend, phase).await?,
        Command::CreateElection { name, start, end } => {
            let spec = NewElection {
                election_name: name,
                start_date: start,
                end_date: end,
            };
            let id = AdminActions::new(&backend).create_election(&spec).await?;
            println!("Created {id}");
        }
        Command::EndElection { election_id } => {
            let message = AdminActions::new(&backend)
                .end_election_now(&election_id, Utc::now())
                .await?;
            println!("{message}");
        }
        Command::Candidates { election_id } => {
            let registry = CandidateRegistry::new(&backend);
            let standings = registry.standings(&election_id).await?;
            if standings.is_empty() {
                println!("There are no candidates, start adding now.");
            }
            for standing in standings {
                println!(
                    "{:<24} {:<16} {:<16} {:>5}",
                    standing.candidate.name,
                    standing.candidate.faculty,
                    standing.candidate.party,
                    standing.votes
                );
            }
        }
        Command::Pool => {
            let mut registry = CandidateRegistry::new(&backend);
            let pool = registry.refresh_pool().await?;
            for (index, candidate) in pool.iter().enumerate() {
                println!(
                    "[{index}] {} ({}) — {}",
                    candidate.name, candidate.faculty, candidate.party
                );
            }
        }
        Command::AddCandidate {
            election_id,
            reuse,
            name,
            student_id,
            faculty,
            party,
            avatar,
        } => {
            let mut registry = CandidateRegistry::new(&backend);
            let selection = match reuse {
                Some(index) => {
                    registry.refresh_pool().await?;
                    CandidateSelection::Reuse(index)
                }
                None => CandidateSelection::New,
            };
            let mut form = registry.resolve_selection(selection);
            apply_overrides(&mut form, name, student_id, faculty, party, avatar);
            let message = registry.add_candidate(&form, &election_id).await?;
            println!("{message}");
        }
        Command::Register {
            election_id,
            student_id,
            email,
        } => {
            let mut flow = RegistrationFlow::new(&backend, election_id);
            let message = flow.submit(&student_id, &email).await?;
            println!("{message}");
        }
        Command::Vote {
            election_id,
            candidate_id,
            email,
            password,
        } => {
            let election = backend.election(&election_id).await?;
            let credential = Credential { email, password };
            let mut protocol = VoteCastingProtocol::new(&backend, election);
            match protocol
                .cast(&credential, &candidate_id, Utc::now())
                .await?
            {
                CastOutcome::Accepted(receipt) => println!("{}", receipt.message),
                CastOutcome::ElectionOver => {
                    println!("This election has ended; showing the results instead.");
                    show_results(&backend, protocol.election()).await?;
                }
            }
        }
        Command::Results { election_id } => {
            let election = backend.election(&election_id).await?;
            show_results(&backend, &election).await?;
        }
        Command::Voters => {
            let voters = AdminActions::new(&backend).voter_roll().await?;
            for voter in voters {
                println!(
                    "{:<12} {:<32} {}  voted: {}",
                    voter.student_id, voter.email, voter.election_id, voter.has_voted
                );
            }
        }
    }
    Ok(())
}

/// List elections; an unreachable backend renders as an empty list rather
/// than a failure.
async fn list_elections(backend: &HttpBackend, phase: Option<PhaseArg>) -> Result<(), Error> {
    let mut directory = ElectionDirectory::new(backend);
    if let Err(err) = directory.refresh().await {
        match err {
            evote_client::Error::BackendUnavailable(_) => warn!("{err}"),
            other => return Err(other.into()),
        }
    }

    let now = Utc::now();
    let elections: Vec<&Election> = match phase {
        Some(phase) => directory.filter_by_phase(phase.into(), now),
        None => directory.elections().iter().collect(),
    };
    if elections.is_empty() {
        println!("No elections.");
        return Ok(());
    }
    for election in elections {
        println!(
            "{:<24} {:<32} [{}]  {} ~ {}",
            election.election_id,
            election.election_name,
            election.phase_at(now),
            election.start_local().format(DATE_FORMAT),
            election.end_local().format(DATE_FORMAT)
        );
    }
    Ok(())
}

async fn show_results(backend: &HttpBackend, election: &Election) -> Result<(), Error> {
    let registry = CandidateRegistry::new(backend);
    let results = registry.results(election).await?;
    println!(
        "{} [{}]",
        results.election.election_name,
        results.election.phase_at(Utc::now())
    );
    for standing in &results.standings {
        println!("{:<24} {:>5}", standing.candidate.name, standing.votes);
    }
    match results.winner {
        Some(winner) => println!("Winner: {}", winner.name),
        None => println!("No winner."),
    }
    Ok(())
}

fn apply_overrides(
    form: &mut CandidateForm,
    name: Option<String>,
    student_id: Option<String>,
    faculty: Option<String>,
    party: Option<String>,
    avatar: Option<String>,
) {
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(student_id) = student_id {
        form.student_id = student_id;
    }
    if let Some(faculty) = faculty {
        form.faculty = faculty;
    }
    if let Some(party) = party {
        form.party = party;
    }
    if let Some(avatar) = avatar {
        form.avatar = avatar;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing log4rs.yaml leaves logging disabled; the CLI still works.
    if let Err(err) = log4rs::init_file("log4rs.yaml", Default::default()) {
        eprintln!("Failed to initialise logging: {err}");
    }

    let args = Args::parse();
    if let Err(err) = run(args).await {
        error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
