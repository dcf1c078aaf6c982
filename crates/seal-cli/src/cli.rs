use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "seal",
    about = "Sign documents and verify them against an append-only ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Data directory holding keys, documents, and the ledger
    /// [default: ./seal-data]
    #[arg(long, global = true)]
    pub root: Option<String>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the data directory layout
    Init(InitArgs),
    /// Create (or confirm) the key pair for an identity
    Keygen(KeygenArgs),
    /// Print an identity's public key PEM
    Pubkey(PubkeyArgs),
    /// Sign a file and record it in the ledger
    Sign(SignArgs),
    /// Verify a recorded document against its stored content
    Verify(VerifyArgs),
    /// Show one document record
    Show(ShowArgs),
    /// List all document records
    List(ListArgs),
    /// List identities that have a key pair
    Identities(IdentitiesArgs),
    /// Run the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct InitArgs {
    pub path: Option<String>,
}

#[derive(Args)]
pub struct KeygenArgs {
    pub identity: String,
}

#[derive(Args)]
pub struct PubkeyArgs {
    pub identity: String,
}

#[derive(Args)]
pub struct SignArgs {
    /// File to sign
    pub file: String,
    /// Signer identity (a key pair is generated on first use)
    #[arg(short, long)]
    pub identity: String,
    /// Name recorded for the document [default: the file name]
    #[arg(long)]
    pub display_name: Option<String>,
    /// Publisher label recorded alongside the signature
    #[arg(long)]
    pub publisher: Option<String>,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Look the document up by record id
    #[arg(long)]
    pub id: Option<u64>,
    /// Look the document up by stored reference
    #[arg(long = "ref", value_name = "REF")]
    pub stored_ref: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(long)]
    pub id: Option<u64>,
    #[arg(long = "ref", value_name = "REF")]
    pub stored_ref: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct IdentitiesArgs {}

#[derive(Args)]
pub struct ServeArgs {
    /// Bind address [default: 127.0.0.1:8731]
    #[arg(long)]
    pub bind: Option<String>,
    /// TOML configuration file; explicit flags override it
    #[arg(long)]
    pub config: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["seal", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init(_)));
    }

    #[test]
    fn parse_init_with_path() {
        let cli = Cli::try_parse_from(["seal", "init", "/tmp/seal"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert_eq!(args.path, Some("/tmp/seal".into()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_keygen() {
        let cli = Cli::try_parse_from(["seal", "keygen", "u1"]).unwrap();
        if let Command::Keygen(args) = cli.command {
            assert_eq!(args.identity, "u1");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_sign() {
        let cli = Cli::try_parse_from([
            "seal",
            "sign",
            "report.pdf",
            "-i",
            "u1",
            "--display-name",
            "Q3 report",
            "--publisher",
            "Alice Benton",
        ])
        .unwrap();
        if let Command::Sign(args) = cli.command {
            assert_eq!(args.file, "report.pdf");
            assert_eq!(args.identity, "u1");
            assert_eq!(args.display_name, Some("Q3 report".into()));
            assert_eq!(args.publisher, Some("Alice Benton".into()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_sign_requires_identity() {
        assert!(Cli::try_parse_from(["seal", "sign", "report.pdf"]).is_err());
    }

    #[test]
    fn parse_verify_by_id() {
        let cli = Cli::try_parse_from(["seal", "verify", "--id", "3"]).unwrap();
        if let Command::Verify(args) = cli.command {
            assert_eq!(args.id, Some(3));
            assert_eq!(args.stored_ref, None);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_verify_by_ref() {
        let cli = Cli::try_parse_from(["seal", "verify", "--ref", "abc_doc.txt"]).unwrap();
        if let Command::Verify(args) = cli.command {
            assert_eq!(args.stored_ref, Some("abc_doc.txt".into()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_show_by_id() {
        let cli = Cli::try_parse_from(["seal", "show", "--id", "1"]).unwrap();
        assert!(matches!(cli.command, Command::Show(_)));
    }

    #[test]
    fn parse_list() {
        let cli = Cli::try_parse_from(["seal", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List(_)));
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["seal", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".into()));
            assert_eq!(args.config, None);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_global_root() {
        let cli = Cli::try_parse_from(["seal", "--root", "/var/seal", "list"]).unwrap();
        assert_eq!(cli.root, Some("/var/seal".into()));
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["seal", "--format", "json", "list"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["seal", "--verbose", "list"]).unwrap();
        assert!(cli.verbose);
    }
}
