use camino::Utf8PathBuf;
use reqwest::Url;
use semver::Version;

use verifier::class_hash::ClassHash;
use verifier::resolver::CAIRO_EXT;

#[derive(clap::Parser)]
#[command(name = "starkscan-verifier")]
#[command(version)]
#[command(about = "Verify Starknet smart contract source code on Starkscan")]
#[command(long_about = "
A command-line tool for verifying Starknet smart contracts on the Starkscan
block explorer.

Given the contract's entry source file, the tool collects every file the
contract transitively imports across the configured search paths, bundles
the sources, submits them to the verification service and waits for the
result. It supports predefined networks (mainnet, testnet) and custom API
endpoints.

Examples:
  # Verify a contract on mainnet
  starkscan-verifier verify contracts/Token.cairo --network mainnet \\
    --class-hash 0x044dc2b3239382230d8b1e943df23b96f52eebcac93efe6e8bde92f9a2f1da18

  # Verify with extra import search paths
  CAIRO_PATH=/src/vendored starkscan-verifier verify contracts/Token.cairo \\
    --network testnet \\
    --class-hash 0x044dc2b3239382230d8b1e943df23b96f52eebcac93efe6e8bde92f9a2f1da18 \\
    --cairo-path lib:vendor/openzeppelin

  # Check verification status
  starkscan-verifier status --network mainnet --job job-id-here
")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Submit contract sources for verification
    ///
    /// Resolves the contract's transitive imports across the search
    /// paths, bundles the sources and submits them, then polls until the
    /// service reports a terminal result.
    ///
    /// Examples:
    ///   starkscan-verifier verify contracts/Token.cairo --network mainnet \
    ///     --class-hash 0x044dc2b3239382230d8b1e943df23b96f52eebcac93efe6e8bde92f9a2f1da18
    Verify(VerifyArgs),

    /// Check the status of a verification job
    ///
    /// Queries the verification service for the current status of a
    /// submitted job. The job ID is printed when you submit a
    /// verification.
    ///
    /// Examples:
    ///   starkscan-verifier status --network mainnet --job 12345678-1234-1234-1234-123456789012
    Status(StatusArgs),
}

fn entry_file_value_parser(raw: &str) -> Result<Utf8PathBuf, String> {
    if raw.is_empty() {
        return Err("Entry file path cannot be empty".to_string());
    }

    let path = Utf8PathBuf::from(raw);
    if path.extension() != Some(CAIRO_EXT) {
        return Err(format!("Entry file must have a .{CAIRO_EXT} extension"));
    }

    Ok(path)
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub network_url: Network,

    /// Entry source file of the contract, relative to the import search paths
    #[arg(
        value_name = "MAIN_FILE",
        value_hint = clap::ValueHint::FilePath,
        value_parser = entry_file_value_parser
    )]
    pub main_file: Utf8PathBuf,

    /// Class hash of the declared contract to verify
    #[arg(
        long = "class-hash",
        value_name = "HASH",
        value_parser = ClassHash::new
    )]
    pub class_hash: ClassHash,

    /// Cairo compiler version the contract was compiled with
    #[arg(
        long = "compiler-version",
        value_name = "SEMVER",
        default_value = "0.10.3",
        value_parser = Version::parse
    )]
    pub compiler_version: Version,

    /// Additional import search directories, colon separated (highest priority)
    #[arg(long = "cairo-path", value_name = "PATHS")]
    pub cairo_path: Option<String>,

    /// Directory holding the Cairo toolchain standard library (lowest priority search root)
    #[arg(
        long = "toolchain-path",
        value_name = "DIR",
        value_hint = clap::ValueHint::DirPath
    )]
    pub toolchain_path: Option<Utf8PathBuf>,
}

#[derive(clap::Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub network_url: Network,

    /// Verification job ID
    #[arg(long, value_name = "UUID")]
    pub job: String,
}

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum NetworkKind {
    /// Target the Mainnet
    Mainnet,

    /// Target the testnet
    Testnet,
}

#[derive(Clone)]
pub struct Network {
    /// Verification API endpoint URL
    pub api: Url,

    /// Block explorer URL used for report links
    pub explorer: Url,
}

impl clap::FromArgMatches for Network {
    fn from_arg_matches(matches: &clap::ArgMatches) -> Result<Self, clap::Error> {
        let api = matches
            .get_one::<Url>("url")
            .ok_or_else(|| {
                clap::Error::raw(
                    clap::error::ErrorKind::MissingRequiredArgument,
                    "API URL is required when not using predefined networks",
                )
            })?
            .clone();

        let explorer = matches
            .get_one::<Url>("explorer-url")
            .ok_or_else(|| {
                clap::Error::raw(
                    clap::error::ErrorKind::MissingRequiredArgument,
                    "Explorer URL is required when not using predefined networks",
                )
            })?
            .clone();

        Ok(Self { api, explorer })
    }

    fn from_arg_matches_mut(matches: &mut clap::ArgMatches) -> Result<Self, clap::Error> {
        Self::from_arg_matches(matches)
    }

    fn update_from_arg_matches(&mut self, matches: &clap::ArgMatches) -> Result<(), clap::Error> {
        let mut matches = matches.clone();
        self.update_from_arg_matches_mut(&mut matches)
    }

    fn update_from_arg_matches_mut(
        &mut self,
        matches: &mut clap::ArgMatches,
    ) -> Result<(), clap::Error> {
        let updated = Self::from_arg_matches(matches)?;
        self.api = updated.api;
        self.explorer = updated.explorer;
        Ok(())
    }
}

// Can't derive the default value logic, hence hand rolled instance.
// The --network selector lives here too: it is only ever consumed by the
// default_value_ifs below.
impl clap::Args for Network {
    fn augment_args(cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("network")
                .long("network")
                .help("Network to verify on (mainnet, testnet). If not specified, --url is required")
                .value_parser(clap::builder::EnumValueParser::<NetworkKind>::new()),
        )
        .arg(
            clap::Arg::new("url")
                .long("url")
                .help("API endpoint URL (required when --network is not specified)")
                .value_hint(clap::ValueHint::Url)
                .value_parser(Url::parse)
                .default_value_ifs([
                    ("network", "mainnet", "https://api.starkscan.co/api"),
                    ("network", "testnet", "https://api-testnet.starkscan.co/api"),
                ])
                .required_unless_present("network"),
        )
        .arg(
            clap::Arg::new("explorer-url")
                .long("explorer-url")
                .help("Block explorer URL used to build report links")
                .value_hint(clap::ValueHint::Url)
                .value_parser(Url::parse)
                .default_value("https://starkscan.co")
                .default_value_ifs([
                    ("network", "mainnet", "https://starkscan.co"),
                    ("network", "testnet", "https://testnet.starkscan.co"),
                ]),
        )
    }

    fn augment_args_for_update(cmd: clap::Command) -> clap::Command {
        Self::augment_args(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_file_value_parser() {
        assert!(entry_file_value_parser("contracts/Token.cairo").is_ok());
        assert!(entry_file_value_parser("").is_err());
        assert!(entry_file_value_parser("contracts/Token.sol").is_err());
        assert!(entry_file_value_parser("Token").is_err());
    }

    #[test]
    fn test_network_defaults_fill_both_urls() {
        use clap::Parser;

        let args = Args::parse_from([
            "starkscan-verifier",
            "verify",
            "contracts/Token.cairo",
            "--network",
            "testnet",
            "--class-hash",
            "0x044dc2b3239382230d8b1e943df23b96f52eebcac93efe6e8bde92f9a2f1da18",
        ]);

        match args.command {
            Commands::Verify(verify) => {
                assert_eq!(
                    verify.network_url.api.as_str(),
                    "https://api-testnet.starkscan.co/api"
                );
                assert_eq!(
                    verify.network_url.explorer.as_str(),
                    "https://testnet.starkscan.co/"
                );
            }
            Commands::Status(_) => panic!("expected verify subcommand"),
        }
    }

    #[test]
    fn test_url_required_without_network() {
        use clap::Parser;

        let result = Args::try_parse_from([
            "starkscan-verifier",
            "verify",
            "contracts/Token.cairo",
            "--class-hash",
            "0x044dc2b3239382230d8b1e943df23b96f52eebcac93efe6e8bde92f9a2f1da18",
        ]);

        assert!(result.is_err());
    }
}
