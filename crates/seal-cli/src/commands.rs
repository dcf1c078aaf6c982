use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use seal_engine::{DocSeal, DocumentKey, DocumentRecord, VerifyReport, VerifyStatus};
use seal_server::{SealServer, ServerConfig};
use seal_types::{DocumentId, SignerId, StoredRef};
use serde_json::json;

use crate::cli::*;

const DEFAULT_ROOT: &str = "./seal-data";

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        command,
        verbose: _,
        format,
        root,
    } = cli;
    let resolved_root = root.clone().unwrap_or_else(|| DEFAULT_ROOT.to_string());

    match command {
        Command::Init(args) => cmd_init(resolved_root, args, format),
        Command::Keygen(args) => cmd_keygen(&resolved_root, args, format),
        Command::Pubkey(args) => cmd_pubkey(&resolved_root, args),
        Command::Sign(args) => cmd_sign(&resolved_root, args, format),
        Command::Verify(args) => cmd_verify(&resolved_root, args, format),
        Command::Show(args) => cmd_show(&resolved_root, args, format),
        Command::List(_) => cmd_list(&resolved_root, format),
        Command::Identities(_) => cmd_identities(&resolved_root, format),
        Command::Serve(args) => cmd_serve(root, args),
    }
}

fn open_engine(root: &str) -> anyhow::Result<DocSeal> {
    DocSeal::open(root).with_context(|| format!("opening data directory {root}"))
}

fn cmd_init(root: String, args: InitArgs, format: OutputFormat) -> anyhow::Result<()> {
    let root = args.path.unwrap_or(root);
    DocSeal::open(&root).with_context(|| format!("initializing {root}"))?;
    match format {
        OutputFormat::Json => println!("{}", json!({ "root": root })),
        OutputFormat::Text => {
            println!(
                "{} Initialized data directory at {}",
                "✓".green().bold(),
                root.bold()
            );
            println!("  {}        signing key pairs (PEM)", "keys/".cyan());
            println!("  {}   stored document bytes", "documents/".cyan());
            println!("  {}   append-only record log", "ledger.log".cyan());
        }
    }
    Ok(())
}

fn cmd_keygen(root: &str, args: KeygenArgs, format: OutputFormat) -> anyhow::Result<()> {
    let identity = SignerId::parse(args.identity)?;
    let engine = open_engine(root)?;
    let pem = engine.ensure_identity(&identity)?;
    let fingerprint = seal_crypto::hash_bytes(pem.as_bytes()).to_hex();

    match format {
        OutputFormat::Json => {
            let receipt = json!({
                "identity": identity.as_str(),
                "fingerprint": fingerprint,
                "public_key_pem": pem,
            });
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        OutputFormat::Text => {
            println!(
                "{} Key pair ready for {}",
                "✓".green().bold(),
                identity.as_str().yellow()
            );
            println!("  Fingerprint: {}", fingerprint[..16].dimmed());
            println!("  Keys dir:    {}", Path::new(root).join("keys").display());
            println!(
                "  {}",
                "Private keys are stored unencrypted; restrict access to the data directory."
                    .dimmed()
            );
        }
    }
    Ok(())
}

fn cmd_pubkey(root: &str, args: PubkeyArgs) -> anyhow::Result<()> {
    let identity = SignerId::parse(args.identity)?;
    let engine = open_engine(root)?;
    match engine.public_key_pem(&identity)? {
        Some(pem) => {
            print!("{pem}");
            Ok(())
        }
        None => bail!("no key pair for {identity}; run `seal keygen {identity}` first"),
    }
}

fn cmd_sign(root: &str, args: SignArgs, format: OutputFormat) -> anyhow::Result<()> {
    let identity = SignerId::parse(args.identity)?;
    let display_name = match args.display_name {
        Some(name) => name,
        None => Path::new(&args.file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("cannot derive a display name from {}", args.file))?,
    };
    let content =
        std::fs::read(&args.file).with_context(|| format!("reading {}", args.file))?;

    let engine = open_engine(root)?;
    let record = engine.sign(&identity, &display_name, &content, args.publisher)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Text => {
            println!("{} Signed {}", "✓".green().bold(), record.display_name.bold());
            print_record_fields(&record);
        }
    }
    Ok(())
}

fn cmd_verify(root: &str, args: VerifyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let key = document_key(args.id, args.stored_ref)?;
    let engine = open_engine(root)?;
    let report = engine.verify(&key)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }
    if !report.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_show(root: &str, args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let key = document_key(args.id, args.stored_ref)?;
    let engine = open_engine(root)?;
    let Some(record) = engine.document(&key)? else {
        bail!("no document for {key}");
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Text => {
            println!("Document {}", record.display_name.bold());
            print_record_fields(&record);
        }
    }
    Ok(())
}

fn cmd_list(root: &str, format: OutputFormat) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let records = engine.documents()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No documents recorded.");
                return Ok(());
            }
            for record in &records {
                let hex = record.content_hash.to_hex();
                println!(
                    "{}  {}  {}  {}  {}",
                    format!("{:>4}", record.id.value()).yellow(),
                    hex[..12].dimmed(),
                    record.created_at.format("%Y-%m-%d %H:%M"),
                    record.signer_identity.as_str().yellow(),
                    record.display_name.bold(),
                );
            }
        }
    }
    Ok(())
}

fn cmd_identities(root: &str, format: OutputFormat) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let identities = engine.identities()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&identities)?),
        OutputFormat::Text => {
            if identities.is_empty() {
                println!("No identities.");
                return Ok(());
            }
            for identity in &identities {
                println!("{}", identity.as_str());
            }
        }
    }
    Ok(())
}

fn cmd_serve(root: Option<String>, args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            ServerConfig::load(path).with_context(|| format!("loading config {path}"))?
        }
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(root) = root {
        config.data_root = root.into();
    }

    println!(
        "Serving {} on {}",
        config.data_root.display().to_string().bold(),
        config.bind_addr.as_str().cyan(),
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(SealServer::new(config).serve())?;
    Ok(())
}

fn document_key(id: Option<u64>, stored_ref: Option<String>) -> anyhow::Result<DocumentKey> {
    match (id, stored_ref) {
        (Some(id), None) => Ok(DocumentKey::Id(DocumentId::new(id))),
        (None, Some(stored_ref)) => Ok(DocumentKey::Ref(StoredRef::parse(stored_ref)?)),
        (Some(_), Some(_)) => bail!("pass either --id or --ref, not both"),
        (None, None) => bail!("pass --id or --ref"),
    }
}

fn print_record_fields(record: &DocumentRecord) {
    println!(
        "  Record id:  {}",
        record.id.value().to_string().yellow()
    );
    println!("  Stored ref: {}", record.stored_ref.as_str().cyan());
    println!("  Signer:     {}", record.signer_identity.as_str().yellow());
    println!("  SHA-256:    {}", record.content_hash.to_hex().dimmed());
    println!("  Signature:  {} bytes", record.signature.len());
    if let Some(label) = &record.publisher_label {
        println!("  Publisher:  {label}");
    }
    println!("  Created:    {}", record.created_at.to_rfc3339());
}

fn print_report(report: &VerifyReport) {
    println!("Status: {}", status_label(report.status));
    if let Some(record) = &report.record {
        println!(
            "  Document:   {} (id {})",
            record.display_name.bold(),
            record.id.value()
        );
        match &record.publisher_label {
            Some(label) => println!(
                "  Signer:     {} ({label})",
                record.signer_identity.as_str().yellow()
            ),
            None => println!("  Signer:     {}", record.signer_identity.as_str().yellow()),
        }
        println!("  Recorded:   {}", record.content_hash.to_hex().dimmed());
    }
    if let Some(computed) = &report.computed_hash {
        println!("  Recomputed: {}", computed.to_hex().dimmed());
    }
    if let Some(hash_matches) = report.hash_matches {
        let word = if hash_matches {
            "yes".green()
        } else {
            "no".red()
        };
        println!("  Hash match: {word}");
    }
}

fn status_label(status: VerifyStatus) -> colored::ColoredString {
    match status {
        VerifyStatus::Valid => "VALID".green().bold(),
        VerifyStatus::Invalid => "INVALID".red().bold(),
        VerifyStatus::NotFound => "NOT_FOUND".yellow().bold(),
        VerifyStatus::ContentMissing => "CONTENT_MISSING".red().bold(),
    }
}
