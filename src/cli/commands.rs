//! CLI command definitions for dialogue-forge.
//!
//! Two commands: `generate` runs full LLM-backed sessions and exports
//! JSON records; `sample` previews the deterministic profile layer for a
//! seed without any network calls.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::catalog::pools::{
    validate_age_range, EpisodeDensity, Expressiveness, Intellect, PacingLevel, PatientHumor,
    Trust, Verbosity,
};
use crate::catalog::templates::TemplateId;
use crate::export::write_record;
use crate::fingerprint::agent_fingerprint;
use crate::llm::OpenRouterClient;
use crate::profile::{generate_profile, sample_doctor_config, ForcedProfile};
use crate::session::{run_session, SessionConfig};

/// Default model to use for all collaborator calls.
const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Default output directory for session records.
const DEFAULT_OUTPUT_DIR: &str = "./generated-sessions";

/// Synthetic patient-screening dialogue generator.
#[derive(Parser)]
#[command(name = "dialogue-forge")]
#[command(about = "Generate synthetic multi-turn depression-screening dialogues")]
#[command(version)]
#[command(
    long_about = "dialogue-forge samples a seeded patient profile and doctor persona, then runs \
                  a controller-guided doctor/patient conversation over an LLM provider until the \
                  nine-item checklist is covered.\n\nExample usage:\n  dialogue-forge generate \
                  --count 5 --seed 42 --output ./generated-sessions"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate full sessions against an OpenRouter-compatible API.
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Print the sampled patient profile, doctor config, and fingerprint
    /// for a seed as JSON, without any network calls.
    Sample(SampleArgs),
}

/// Arguments for `dialogue-forge generate`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Number of sessions to generate.
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,

    /// Base RNG seed; session i uses seed + i. Random when omitted.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// LLM model for all collaborator roles.
    #[arg(short = 'm', long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Output directory for session record JSON files.
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// OpenRouter API key (can also be set via OPENROUTER_API_KEY).
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the OpenRouter API base URL.
    #[arg(long, env = "OPENROUTER_API_BASE")]
    pub api_base: Option<String>,

    /// Maximum sessions running concurrently.
    #[arg(short = 'c', long, default_value = "4")]
    pub concurrency: usize,

    /// Per-call timeout in seconds for collaborator requests.
    #[arg(long, default_value = "90")]
    pub timeout: u64,

    /// Skip the background-writer pass; sessions fall back to the
    /// structured background summary.
    #[arg(long)]
    pub skip_background: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for `dialogue-forge sample`.
#[derive(Parser, Debug)]
pub struct SampleArgs {
    /// Seed to sample.
    #[arg(short, long, default_value = "0")]
    pub seed: u64,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Forced lever overrides shared by both commands. Forcing one lever
/// never shifts the others; each field draws from its own seed stream.
#[derive(Parser, Debug)]
pub struct OverrideArgs {
    /// Force the archetype template (e.g. NEUROTICISM_HIGH).
    #[arg(long)]
    pub template: Option<String>,

    /// Force the episode density (ULTRA_LOW, LOW, MED, HIGH).
    #[arg(long)]
    pub density: Option<String>,

    /// Force the patient pacing (LOW, MED, HIGH).
    #[arg(long)]
    pub pacing: Option<String>,

    /// Force the age range (e.g. "25-29").
    #[arg(long)]
    pub age_range: Option<String>,

    /// Force the verbosity (terse, moderate, detailed).
    #[arg(long)]
    pub verbosity: Option<String>,

    /// Force the expressiveness (flat, even, expressive).
    #[arg(long)]
    pub expressiveness: Option<String>,

    /// Force the trust posture (guarded, neutral, open).
    #[arg(long)]
    pub trust: Option<String>,

    /// Force the articulacy level (low-functioning, moderate-functioning,
    /// high-functioning).
    #[arg(long)]
    pub intellect: Option<String>,

    /// Force the patient humor level (none, occasional, frequent).
    #[arg(long)]
    pub humor: Option<String>,

    /// Force the doctor persona id (e.g. warm_validating).
    #[arg(long)]
    pub persona: Option<String>,
}

impl OverrideArgs {
    /// Validates override strings into forced profile levers.
    fn to_forced_profile(&self) -> anyhow::Result<ForcedProfile> {
        Ok(ForcedProfile {
            template: self.template.as_deref().map(TemplateId::parse).transpose()?,
            episode_density: self
                .density
                .as_deref()
                .map(EpisodeDensity::parse)
                .transpose()?,
            pacing: self.pacing.as_deref().map(PacingLevel::parse).transpose()?,
            age_range: self
                .age_range
                .as_deref()
                .map(validate_age_range)
                .transpose()?
                .map(String::from),
            verbosity: self
                .verbosity
                .as_deref()
                .map(Verbosity::parse)
                .transpose()?,
            expressiveness: self
                .expressiveness
                .as_deref()
                .map(Expressiveness::parse)
                .transpose()?,
            trust: self.trust.as_deref().map(Trust::parse).transpose()?,
            intellect: self.intellect.as_deref().map(Intellect::parse).transpose()?,
            humor: self.humor.as_deref().map(PatientHumor::parse).transpose()?,
        })
    }
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to access CLI arguments (like log_level) before
/// running commands.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Run the CLI with the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate(args) => run_generate_command(args).await,
        Commands::Sample(args) => run_sample_command(args),
    }
}

async fn run_generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    let forced = args.overrides.to_forced_profile()?;
    let base_seed = args.seed.unwrap_or_else(rand::random);
    let api_key = args
        .api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("missing API key; pass --api-key or set OPENROUTER_API_KEY"))?;

    let client = match args.api_base.clone() {
        Some(base) => OpenRouterClient::new(base, api_key, args.model.clone())?,
        None => OpenRouterClient::with_defaults(api_key, args.model.clone())?,
    };
    let client = Arc::new(client);

    let session_config = SessionConfig {
        model: args.model.clone(),
        call_timeout: Duration::from_secs(args.timeout),
        skip_background: args.skip_background,
        forced_persona: args.overrides.persona.clone(),
        ..SessionConfig::default()
    };

    info!(
        count = args.count,
        base_seed,
        model = %args.model,
        concurrency = args.concurrency,
        "starting generation run"
    );

    let semaphore = Arc::new(Semaphore::new(args.concurrency.max(1)));
    let mut tasks = Vec::with_capacity(args.count);
    for i in 0..args.count {
        let client = client.clone();
        let semaphore = semaphore.clone();
        let config = session_config.clone();
        let forced = forced.clone();
        let output = args.output.clone();
        let seed = base_seed.wrapping_add(i as u64);

        tasks.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .map_err(|e| anyhow::anyhow!("semaphore closed: {e}"))?;
            let record = run_session(client.as_ref(), seed, &forced, &config).await?;
            let path = write_record(&output, &record)?;
            Ok::<_, anyhow::Error>((seed, record.outcome, path))
        }));
    }

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    for task in futures::future::join_all(tasks).await {
        match task {
            Ok(Ok((seed, outcome, path))) => {
                succeeded += 1;
                info!(seed, outcome = ?outcome, path = %path.display(), "session exported");
            }
            Ok(Err(e)) => {
                failed += 1;
                error!(error = %e, "session failed");
            }
            Err(e) => {
                failed += 1;
                error!(error = %e, "session task panicked");
            }
        }
    }

    info!(succeeded, failed, "generation run finished");
    if succeeded == 0 && args.count > 0 {
        anyhow::bail!("all {} sessions failed", args.count);
    }
    Ok(())
}

/// JSON shape printed by `dialogue-forge sample`.
#[derive(Serialize)]
struct SamplePreview {
    seed: u64,
    fingerprint: String,
    patient: crate::profile::PatientProfile,
    doctor: crate::profile::DoctorConfig,
}

fn run_sample_command(args: SampleArgs) -> anyhow::Result<()> {
    let forced = args.overrides.to_forced_profile()?;
    let patient = generate_profile(args.seed, &forced)?;
    let doctor = sample_doctor_config(args.seed, args.overrides.persona.as_deref())?;
    let fingerprint = agent_fingerprint(&patient, &doctor);

    let preview = SamplePreview {
        seed: args.seed,
        fingerprint,
        patient,
        doctor,
    };
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_parse_known_codes() {
        let overrides = OverrideArgs {
            template: Some("NEUROTICISM_HIGH".to_string()),
            density: Some("ULTRA_LOW".to_string()),
            pacing: Some("MED".to_string()),
            age_range: Some("25-29".to_string()),
            verbosity: Some("terse".to_string()),
            expressiveness: Some("flat".to_string()),
            trust: Some("guarded".to_string()),
            intellect: Some("high-functioning".to_string()),
            humor: Some("occasional".to_string()),
            persona: None,
        };
        let forced = overrides.to_forced_profile().unwrap();
        assert_eq!(forced.template, Some(TemplateId::NeuroticismHigh));
        assert_eq!(forced.episode_density, Some(EpisodeDensity::UltraLow));
        assert_eq!(forced.humor, Some(PatientHumor::Occasional));
        assert_eq!(forced.age_range.as_deref(), Some("25-29"));
    }

    #[test]
    fn test_age_range_outside_the_fixed_brackets_is_rejected() {
        let overrides = OverrideArgs {
            template: None,
            density: None,
            pacing: None,
            age_range: Some("25-34".to_string()),
            verbosity: None,
            expressiveness: None,
            trust: None,
            intellect: None,
            humor: None,
            persona: None,
        };
        assert!(overrides.to_forced_profile().is_err());
    }

    #[test]
    fn test_unknown_override_is_rejected() {
        let overrides = OverrideArgs {
            template: Some("NOT_A_TEMPLATE".to_string()),
            density: None,
            pacing: None,
            age_range: None,
            verbosity: None,
            expressiveness: None,
            trust: None,
            intellect: None,
            humor: None,
            persona: None,
        };
        assert!(overrides.to_forced_profile().is_err());
    }

    #[test]
    fn test_cli_parses_generate_invocation() {
        let cli = Cli::parse_from([
            "dialogue-forge",
            "generate",
            "--count",
            "2",
            "--seed",
            "42",
            "--api-key",
            "test",
            "--template",
            "OPENNESS_LOW",
        ]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.count, 2);
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.overrides.template.as_deref(), Some("OPENNESS_LOW"));
            }
            _ => panic!("expected generate subcommand"),
        }
    }
}
