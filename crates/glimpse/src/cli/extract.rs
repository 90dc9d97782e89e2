//! The `glimpse extract` command: sample keywords for one image and print
//! the ranked result.

use clap::{Args, ValueEnum};
use glimpse_core::{
    aggregate, successful_replies, Config, ExtractionReport, ImageInput, OutputFormat,
    SampleOptions, SampleOutcome, Sampler, VisionProviderFactory,
};
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the `extract` command.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Image file to describe
    #[arg(required = true)]
    pub image: PathBuf,

    /// Sampling iterations (defaults to config, normally 30)
    #[arg(short, long)]
    pub iterations: Option<u32>,

    /// How many of the most frequent keywords enter the merge pass
    #[arg(short = 'n', long = "top")]
    pub top_n: Option<usize>,

    /// Vision LLM provider
    #[arg(long, value_enum)]
    pub llm: Option<ProviderChoice>,

    /// LLM model name (provider-specific)
    #[arg(long)]
    pub llm_model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatChoice>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Selectable vision LLM providers.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ProviderChoice {
    Ollama,
    Anthropic,
    Openai,
}

impl ProviderChoice {
    fn as_str(self) -> &'static str {
        match self {
            ProviderChoice::Ollama => "ollama",
            ProviderChoice::Anthropic => "anthropic",
            ProviderChoice::Openai => "openai",
        }
    }
}

/// Selectable output formats.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatChoice {
    Text,
    Json,
    Jsonl,
}

impl From<FormatChoice> for OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Text => OutputFormat::Text,
            FormatChoice::Json => OutputFormat::Json,
            FormatChoice::Jsonl => OutputFormat::JsonLines,
        }
    }
}

/// Execute the extract command.
pub async fn execute(args: ExtractArgs, config: Config) -> anyhow::Result<()> {
    let provider_name = args
        .llm
        .map(ProviderChoice::as_str)
        .unwrap_or(config.llm.provider.as_str());
    let provider =
        VisionProviderFactory::create(provider_name, &config.llm, args.llm_model.as_deref())?;

    if !provider.is_available().await {
        tracing::warn!(
            "Provider '{}' does not look reachable — sampling may fail every iteration",
            provider.name()
        );
    }

    let image = ImageInput::load(&args.image).await?;

    let options = SampleOptions {
        iterations: args.iterations.unwrap_or(config.sampling.iterations),
        timeout_ms: config.sampling.timeout_ms,
        retry_attempts: config.sampling.retry_attempts,
        retry_delay_ms: config.sampling.retry_delay_ms,
        temperature: config.sampling.temperature,
        max_tokens: config.sampling.max_tokens,
    };
    let top_n = args.top_n.unwrap_or(config.aggregation.top_n);
    let sampler = Sampler::new(provider, options.clone());

    tracing::info!(
        "Sampling {:?} for {} iterations with {}",
        args.image,
        options.iterations,
        sampler.model()
    );

    // Progress display across the sampling loop
    let progress = if args.no_progress {
        None
    } else {
        Some(create_progress_bar(options.iterations as u64))
    };
    let mut failed: u64 = 0;
    let outcomes = sampler
        .sample(&image, |outcome| {
            if let Some(pb) = &progress {
                if matches!(outcome, SampleOutcome::Failed { .. }) {
                    failed += 1;
                    pb.set_message(format!("{failed} failed"));
                }
                pb.inc(1);
            }
        })
        .await;
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let replies = successful_replies(&outcomes);
    let succeeded = replies.len() as u32;
    let failed = outcomes.len() as u32 - succeeded;
    if failed > 0 {
        tracing::warn!("{failed} of {} sampling iterations failed", outcomes.len());
    }

    let keywords = aggregate::aggregate(&replies, top_n);
    let summary = aggregate::summary_sentence(&keywords);
    let report = ExtractionReport {
        image_path: args.image.clone(),
        model: sampler.model().to_string(),
        iterations_requested: options.iterations,
        iterations_succeeded: succeeded,
        iterations_failed: failed,
        keywords,
        summary,
    };

    let format = args
        .format
        .map(OutputFormat::from)
        .or_else(|| OutputFormat::parse(&config.output.format))
        .unwrap_or(OutputFormat::Text);
    let rendered = render_report(&report, format, config.output.pretty)?;

    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            writeln!(file, "{rendered}")?;
            tracing::info!("Output written to {:?}", path);
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Render the report in the requested format.
///
/// An empty keyword list is a valid terminal state, not an error: text mode
/// reports it in prose, the structured modes emit an empty report/stream.
fn render_report(
    report: &ExtractionReport,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Text => match &report.summary {
            Some(sentence) => format!(
                "{sentence}\n\nKeyword counts:\n{}",
                glimpse_core::render_table(&report.keywords)
            ),
            None => "No keywords extracted.".to_string(),
        },
        OutputFormat::Json => {
            if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            }
        }
        OutputFormat::JsonLines => report
            .keywords
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
    };
    Ok(rendered)
}

fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} Extracting keywords [{bar:40.cyan/blue}] {pos}/{len} iterations {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb
}
