use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use idforge::records::{self, OnboardingRecord, StaffRecord, StudentRecord};
use idforge::{export_batch, BatchFile, GeneratorConfig, Record, Studio, Template};
use log::info;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "idforge", version, about = "Generate ID cards and welcome letters as PDF")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Staff ID card
    Staff(RenderArgs),
    /// Student ID card
    Student(RenderArgs),
    /// Onboarding welcome letter
    Welcome(RenderArgs),
    /// List the form fields of a document
    Fields {
        kind: Kind,
        #[arg(long)]
        json: bool,
    },
    /// Export every record of a TOML batch file
    Batch {
        file: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Field assignment, repeatable
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,
    /// TOML file holding the record; `--set` values are applied on top
    #[arg(long)]
    record: Option<PathBuf>,
    /// Photo for the card
    #[arg(long)]
    photo: Option<PathBuf>,
    /// Output directory
    #[arg(long)]
    out: Option<PathBuf>,
    /// Letter date instead of today
    #[arg(long, value_name = "DD/MM/YYYY")]
    date: Option<String>,
    /// Print the export report as JSON
    #[arg(long)]
    json: bool,
    /// Print the displayed text of every face instead of exporting
    #[arg(long)]
    preview: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Staff,
    Student,
    Welcome,
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(p) => Ok(GeneratorConfig::from_toml_file(p)?),
        None => Ok(GeneratorConfig::default()),
    }
}

async fn run_document<R>(mut config: GeneratorConfig, args: RenderArgs) -> Result<()>
where
    R: Template + DeserializeOwned,
{
    if args.date.is_some() {
        config.letter_date = args.date.clone();
    }
    let out_dir = args.out.clone().unwrap_or_else(|| config.output_dir.clone());

    let record: R = match &args.record {
        Some(path) => {
            let s = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading record {}", path.display()))?;
            toml::from_str(&s).with_context(|| format!("parsing record {}", path.display()))?
        }
        None => R::default(),
    };

    let studio = Studio::with_record(config, record).await?;
    for assignment in &args.set {
        let (name, value) = records::parse_assignment(assignment)?;
        studio.set_named(&name, value).await?;
    }
    studio
        .load_photo(args.photo.as_deref())
        .await
        .context("loading photo")?;

    if args.preview {
        for snap in studio.text_snapshots().await? {
            println!("[{}]", snap.region);
            println!("{}", snap.text());
            println!();
        }
    } else {
        let report = studio.export(&out_dir).await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", report.path.display());
        }
    }
    studio.close().await?;
    Ok(())
}

fn print_fields<R: Record>(json: bool) -> Result<()> {
    let form = R::form();
    if json {
        println!("{}", serde_json::to_string_pretty(&form)?);
        return Ok(());
    }
    for spec in &form {
        println!("{}", field_line(spec));
    }
    Ok(())
}

fn field_line(spec: &records::FieldSpec) -> String {
    let hint = if spec.settable() {
        spec.hint
    } else {
        "set with --photo"
    };
    format!("{:<20} {:<28} {}", spec.name, spec.label, hint)
        .trim_end()
        .to_string()
}

/// The one line printed to stderr when a command fails
fn failure_message(err: &anyhow::Error) -> String {
    format!("idforge: {:#}", err)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Cmd::Staff(args) => run_document::<StaffRecord>(config, args).await,
        Cmd::Student(args) => run_document::<StudentRecord>(config, args).await,
        Cmd::Welcome(args) => run_document::<OnboardingRecord>(config, args).await,
        Cmd::Fields { kind, json } => match kind {
            Kind::Staff => print_fields::<StaffRecord>(json),
            Kind::Student => print_fields::<StudentRecord>(json),
            Kind::Welcome => print_fields::<OnboardingRecord>(json),
        },
        Cmd::Batch { file, out, json } => {
            let batch = BatchFile::from_toml_file(&file).await?;
            let out_dir = out.unwrap_or_else(|| config.output_dir.clone());
            info!("batch {} holds {} record(s)", file.display(), batch.len());
            let reports = export_batch(batch, &config, &out_dir).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!("{}", report.path.display());
                }
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{}", failure_message(&e));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_is_one_line_with_its_causes() {
        let err = anyhow::Error::new(idforge::Error::PhotoError("not an image".into()))
            .context("loading photo");
        let msg = failure_message(&err);
        assert_eq!(msg.lines().count(), 1);
        assert!(msg.starts_with("idforge: loading photo: "));
        assert!(msg.contains("not an image"));
    }

    #[test]
    fn photo_field_points_at_its_flag() {
        let lines: Vec<String> = StudentRecord::form().iter().map(field_line).collect();
        let photo = lines.iter().find(|l| l.starts_with("photo ")).unwrap();
        assert!(photo.ends_with("set with --photo"));
        assert!(lines.iter().any(|l| l.starts_with("roll_number ")));
    }
}
