#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use quillshift::Config;
use quillshift::pipeline::{ContentRequest, HumanizerPreference, Pipeline, RunFlags, Tone};
use quillshift::prompt::PersonaKind;
use quillshift::rewrite::LocalRewriter;
use quillshift::rng::SeededRandom;
use quillshift::scoring::RiskScorer;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// `Quillshift` - long-form generation and humanization pipeline.
#[derive(Parser, Debug)]
#[command(name = "quillshift")]
#[command(version)]
#[command(about = "Generate, rewrite and score long-form content.", long_about = None)]
struct Cli {
    /// Explicit config file (default: ~/.quillshift/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at DEBUG instead of INFO
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full pipeline: prompt, generate, rewrite, humanize, score
    Generate {
        #[command(flatten)]
        request: RequestArgs,

        /// Humanizer to use (auto, remote_a, remote_b, local)
        #[arg(long)]
        humanizer: Option<HumanizerPreference>,

        /// Local rewrite passes before the remote stage
        #[arg(long)]
        local_passes: Option<u32>,

        /// Scores below this trigger one extra local pass (0-100)
        #[arg(long)]
        extra_pass_threshold: Option<u32>,

        /// Per-paragraph opener probability (0.0 - 1.0)
        #[arg(long)]
        opener_rate: Option<f64>,

        /// Per-sentence hedge probability (0.0 - 1.0)
        #[arg(long)]
        hedge_rate: Option<f64>,

        /// Per-paragraph question probability (0.0 - 1.0)
        #[arg(long)]
        question_rate: Option<f64>,

        /// Fix the random seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Write the final content here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the local rewriting engine over a file
    Rewrite {
        file: PathBuf,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the risk assessment of a file as JSON
    Score { file: PathBuf },

    /// Print the composed generation prompt
    Prompt {
        #[command(flatten)]
        request: RequestArgs,

        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// Article topic
    #[arg(short, long)]
    topic: String,

    #[arg(short, long, default_value = "")]
    keywords: String,

    #[arg(short, long, default_value = "")]
    audience: String,

    #[arg(long, default_value = "conversational")]
    tone: Tone,

    /// Minimum article length in words
    #[arg(long, default_value = "1200")]
    min_words: u32,

    /// Section heading, repeatable; omit to let the model choose
    #[arg(long = "heading")]
    headings: Vec<String>,

    /// Source material the article should cite
    #[arg(long)]
    references: Option<String>,

    /// Experience or expertise notes to weave in
    #[arg(long)]
    eeat: Option<String>,

    #[arg(long, default_value = "practitioner")]
    persona: PersonaKind,
}

impl From<RequestArgs> for ContentRequest {
    fn from(args: RequestArgs) -> Self {
        Self {
            keywords: args.keywords,
            target_audience: args.audience,
            tone: args.tone,
            headings: args.headings,
            references: args.references,
            eeat_hints: args.eeat,
            persona: args.persona,
            ..Self::new(args.topic, args.min_words)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load_or_init()?,
    };
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

fn read_input(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

fn seeded(seed: Option<u64>) -> SeededRandom {
    seed.map_or_else(SeededRandom::from_entropy, SeededRandom::from_seed)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            request,
            humanizer,
            local_passes,
            extra_pass_threshold,
            opener_rate,
            hedge_rate,
            question_rate,
            seed,
            output,
        } => {
            let flags = RunFlags {
                humanizer,
                local_passes,
                opener_rate,
                hedge_rate,
                question_rate,
                extra_pass_threshold,
                seed,
            };
            let pipeline = Pipeline::from_config(config)?;
            let result = pipeline.run(&request.into(), &flags).await?;
            write_or_print(output.as_deref(), &result.final_content)?;

            let summary = json!({
                "word_count": result.word_count,
                "risk_assessment": result.risk_assessment,
                "provider_used": result.provider_used,
                "model_used": result.model_used,
                "humanizer_used": result.humanizer_used,
                "humanizer_cost": result.humanizer_cost,
                "extra_pass_applied": result.extra_pass_applied,
                "stages": result.stages,
                "seed": result.seed,
            });
            eprintln!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Rewrite { file, seed, output } => {
            let text = read_input(&file)?;
            let mut rng = seeded(seed);
            let rewritten = LocalRewriter::new(config.rewrite).rewrite(&text, &mut rng);
            tracing::debug!(seed = rng.seed(), "Local rewrite finished");
            write_or_print(output.as_deref(), &rewritten)?;
        }
        Commands::Score { file } => {
            let text = read_input(&file)?;
            let assessment = RiskScorer::new(config.scoring).assess(&text);
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
        Commands::Prompt { request, seed } => {
            let pipeline = Pipeline::from_config(config)?;
            let prompt = pipeline.compose_prompt(&request.into(), &mut seeded(seed))?;
            println!("{prompt}");
        }
    }
    Ok(())
}
