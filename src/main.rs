//! Wasabi account maintenance tool
//!
//! Provisions and removes per-customer storage accounts (bucket, user,
//! scoped policy, access key) against Wasabi's S3 and IAM endpoints.

use anyhow::Result;
use clap::{ArgGroup, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wasabi_admin::backend::credentials;
use wasabi_admin::backend::identity::IdentityClient;
use wasabi_admin::backend::storage::StorageClient;
use wasabi_admin::settings::Settings;
use wasabi_admin::{account, menu};

#[derive(Parser, Debug)]
#[command(name = "wasabi-admin", version)]
#[command(about = "Wasabi user maintenance tool")]
#[command(group(ArgGroup::new("action").required(true).multiple(false)))]
struct Cli {
    /// Create a new Wasabi account
    #[arg(short = 'a', long = "add", value_name = "USERNAME", group = "action")]
    add: Option<String>,

    /// Delete an existing Wasabi account
    #[arg(short = 'd', long = "delete", value_name = "USERNAME", group = "action")]
    delete: Option<String>,

    /// Run the interactive menu
    #[arg(short = 'i', long = "interactive", group = "action")]
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout stays reserved for operator-facing output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // The SDK reads its credentials from ~/.aws; fail before any remote
    // call if the folder is absent.
    credentials::ensure_credentials_present()?;

    let settings = Settings::load()?;
    let storage = StorageClient::new(&settings.s3_endpoint, &settings.region).await?;
    let identity = IdentityClient::new(&settings.iam_endpoint).await?;

    if let Some(customer) = cli.add.as_deref() {
        account::add_account(&storage, &identity, &settings, customer).await?;
    } else if let Some(customer) = cli.delete.as_deref() {
        account::delete_account(&storage, &identity, &settings, customer).await?;
    } else {
        menu::run_menu(&storage, &identity, &settings).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_flag_parses() {
        let cli = Cli::try_parse_from(["wasabi-admin", "--add", "acme"]).unwrap();
        assert_eq!(cli.add.as_deref(), Some("acme"));
        assert!(cli.delete.is_none());
    }

    #[test]
    fn test_short_delete_flag_parses() {
        let cli = Cli::try_parse_from(["wasabi-admin", "-d", "acme"]).unwrap();
        assert_eq!(cli.delete.as_deref(), Some("acme"));
    }

    #[test]
    fn test_no_action_is_a_usage_error() {
        assert!(Cli::try_parse_from(["wasabi-admin"]).is_err());
    }

    #[test]
    fn test_add_and_delete_conflict() {
        let result = Cli::try_parse_from(["wasabi-admin", "-a", "acme", "-d", "acme"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_interactive_conflicts_with_add() {
        let result = Cli::try_parse_from(["wasabi-admin", "-i", "-a", "acme"]);
        assert!(result.is_err());
    }
}
