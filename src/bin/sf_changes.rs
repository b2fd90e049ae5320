//! Export the metadata a user changed in a Salesforce org.
//!
//! ```sh
//! sf-changes types --auth auth.json --changed-by "Jane Doe"
//! sf-changes run --auth auth.json --changed-by "Jane Doe" --member-types ApexClass,CustomObject
//! sf-changes manifest --csv output.csv
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use busbar_sf_changes::tooling::parse_member_types;
use busbar_sf_changes::{
    regenerate_manifest, ChangeSession, ClientConfig, Error, OutputPaths, RunOutcome,
    SalesforceCredentials, ToolingClient, DEFAULT_API_VERSION, DEFAULT_CSV_PATH,
    DEFAULT_PACKAGE_XML_PATH,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sf-changes", version)]
#[command(about = "Export a Salesforce user's SourceMember changes to CSV and package.xml")]
struct Cli {
    /// Salesforce API version
    #[arg(long, global = true, env = "SF_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the member types the user changed, one per line
    Types {
        #[command(flatten)]
        org: OrgArgs,
    },
    /// Query the user's changes, write the CSV and then package.xml
    Run {
        #[command(flatten)]
        org: OrgArgs,

        /// Comma-separated member types to restrict the query to
        #[arg(long, value_name = "TYPES")]
        member_types: Option<String>,

        /// CSV output file
        #[arg(long, default_value = DEFAULT_CSV_PATH)]
        csv: PathBuf,

        /// Manifest output file
        #[arg(long, default_value = DEFAULT_PACKAGE_XML_PATH)]
        package_xml: PathBuf,

        /// Print the written CSV to stdout
        #[arg(long)]
        display: bool,
    },
    /// Rebuild package.xml from a previously exported CSV
    Manifest {
        /// CSV written by `run`
        #[arg(long, default_value = DEFAULT_CSV_PATH)]
        csv: PathBuf,

        /// Manifest output file
        #[arg(long, default_value = DEFAULT_PACKAGE_XML_PATH)]
        package_xml: PathBuf,
    },
}

#[derive(Args)]
struct OrgArgs {
    /// JSON file with access_token and instance_url [default: SF_INSTANCE_URL / SF_ACCESS_TOKEN]
    #[arg(long)]
    auth: Option<PathBuf>,

    /// User who made the changes (LastModifiedBy.Name)
    #[arg(long, env = "SF_CHANGED_BY")]
    changed_by: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

impl OrgArgs {
    fn session(&self, api_version: &str) -> anyhow::Result<ChangeSession> {
        let creds = load_credentials(self.auth.as_deref())?.with_api_version(api_version);

        let mut config = ClientConfig::builder();
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        let client = ToolingClient::from_credentials_with_config(&creds, config.build())
            .map_err(Error::from)?;
        Ok(ChangeSession::new(client, self.changed_by.clone()))
    }
}

fn load_credentials(auth: Option<&Path>) -> anyhow::Result<SalesforceCredentials> {
    match auth {
        Some(path) => SalesforceCredentials::from_file(path)
            .map_err(Error::from)
            .with_context(|| format!("Failed to load auth file {}", path.display())),
        None => SalesforceCredentials::from_env()
            .map_err(Error::from)
            .context("No --auth file given and the environment has no usable credentials"),
    }
}

/// Log to stderr so stdout carries only command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "busbar_sf_changes=info,busbar_sf=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Types { org } => {
            let mut session = org.session(&cli.api_version)?;
            for member_type in session.discover_types().await? {
                println!("{member_type}");
            }
        }
        Commands::Run {
            org,
            member_types,
            csv,
            package_xml,
            display,
        } => {
            let member_types = member_types
                .as_deref()
                .map(parse_member_types)
                .unwrap_or_default();
            let session = org
                .session(&cli.api_version)?
                .with_member_types(member_types);

            match session.run(&OutputPaths::new(csv, package_xml)).await? {
                RunOutcome::Completed {
                    csv,
                    rows,
                    manifest,
                } => {
                    eprintln!("CSV file saved to {} ({rows} rows)", csv.display());
                    eprintln!("package.xml saved to {}", manifest.display());
                    if display {
                        let content = std::fs::read_to_string(&csv)
                            .with_context(|| format!("Failed to read {}", csv.display()))?;
                        print!("{content}");
                    }
                }
                RunOutcome::NoRecords => eprintln!("Warning: No records found."),
            }
        }
        Commands::Manifest { csv, package_xml } => {
            match regenerate_manifest(&csv, &package_xml, &cli.api_version)? {
                Some(_) => eprintln!("package.xml saved to {}", package_xml.display()),
                None => eprintln!("Warning: No records found in {}.", csv.display()),
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.chain().find_map(|cause| cause.downcast_ref::<Error>()) {
                Some(cause) if cause.to_string() != err.to_string() => {
                    eprintln!("Error ({}): {err}: {cause}", cause.kind_name())
                }
                Some(cause) => eprintln!("Error ({}): {err}", cause.kind_name()),
                None => eprintln!("Error: {err:#}"),
            }
            if err
                .chain()
                .filter_map(|cause| cause.downcast_ref::<Error>())
                .any(Error::is_auth_error)
            {
                eprintln!("The access token was rejected; refresh the auth file and retry.");
            }
            ExitCode::FAILURE
        }
    }
}
