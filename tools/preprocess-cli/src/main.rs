use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use content_model::Contents;
use embedding_provider::config::default_hashed_config;
use embedding_provider::embedder::HashedEmbedder;
use page_preprocessor::describer::StaticImageDescriber;
use page_preprocessor::summarizer::{FixedSummarizer, LeadSummarizer, TextSummarizer};
use page_preprocessor::{PagePreprocessor, PreprocessorConfig};

fn print_usage() {
    eprintln!(
        "Usage:\n\
         preprocess-cli <input.json|-> [--summary FILE] [--descriptions FILE]\n\
                        [--config FILE] [--dim N] [--pretty]\n\
         \n\
           --summary FILE        use the text in FILE as the page summary\n\
                                 (default: lead summarizer)\n\
           --descriptions FILE   JSON object mapping image URL to description\n\
           --config FILE         JSON preprocessor config overrides\n\
           --dim N               embedding dimension (default 384)\n\
         Notes: `-` reads the contents document from stdin; output JSON goes to stdout\n"
    );
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Debug, Default)]
struct CliArgs {
    input: String,
    summary: Option<PathBuf>,
    descriptions: Option<PathBuf>,
    config: Option<PathBuf>,
    dim: Option<usize>,
    pretty: bool,
}

fn flag_value<'a>(args: &'a [String], i: usize, name: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{name} requires a value"))
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut out = CliArgs::default();
    let mut input: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--summary" => {
                out.summary = Some(PathBuf::from(flag_value(args, i, "--summary")?));
                i += 2;
            }
            "--descriptions" => {
                out.descriptions = Some(PathBuf::from(flag_value(args, i, "--descriptions")?));
                i += 2;
            }
            "--config" => {
                out.config = Some(PathBuf::from(flag_value(args, i, "--config")?));
                i += 2;
            }
            "--dim" => {
                let raw = flag_value(args, i, "--dim")?;
                let dim = raw
                    .parse()
                    .map_err(|_| format!("--dim expects a number, got `{raw}`"))?;
                out.dim = Some(dim);
                i += 2;
            }
            "--pretty" => {
                out.pretty = true;
                i += 1;
            }
            other if other.starts_with("--") => return Err(format!("unknown flag `{other}`")),
            other => {
                if input.replace(other.to_string()).is_some() {
                    return Err("only one input document is accepted".into());
                }
                i += 1;
            }
        }
    }
    out.input = input.ok_or_else(|| "missing input document".to_string())?;
    Ok(out)
}

fn read_to_string(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("read stdin: {e}"))?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|e| format!("read `{path}`: {e}"))
}

fn run(args: CliArgs) -> Result<(), String> {
    let cfg = match &args.config {
        Some(path) => PreprocessorConfig::from_json_file(path).map_err(|e| e.to_string())?,
        None => PreprocessorConfig::default(),
    };

    let summarizer: Arc<dyn TextSummarizer> = match &args.summary {
        Some(path) => Arc::new(FixedSummarizer::new(read_to_string(&path.to_string_lossy())?)),
        None => Arc::new(LeadSummarizer::new(cfg.lead_ratio)),
    };

    let describer = match &args.descriptions {
        Some(path) => StaticImageDescriber::from_json(&read_to_string(&path.to_string_lossy())?)
            .map_err(|e| format!("parse descriptions: {e}"))?,
        None => StaticImageDescriber::default(),
    };

    let mut embed_cfg = default_hashed_config();
    if let Some(dim) = args.dim {
        embed_cfg.dimension = dim;
    }
    let embedder =
        HashedEmbedder::new(embed_cfg).map_err(|e| format!("embedder init failed: {e}"))?;

    let contents = Contents::from_json(&read_to_string(&args.input)?)
        .map_err(|e| format!("parse contents: {e}"))?;

    let preprocessor =
        PagePreprocessor::new(cfg, summarizer, Arc::new(embedder), Arc::new(describer))
            .map_err(|e| e.to_string())?;
    let (out, report) = preprocessor
        .preprocess_with_report(&contents)
        .map_err(|e| e.to_string())?;
    if report.dropped_sentences > 0 {
        tracing::warn!(
            dropped = report.dropped_sentences,
            "some summary sentences could not be aligned to a text block"
        );
    }

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&out)
    } else {
        serde_json::to_string(&out)
    }
    .map_err(|e| format!("serialize output: {e}"))?;
    println!("{rendered}");
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let raw: Vec<String> = env::args().skip(1).collect();
    if raw.is_empty() || raw.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return if raw.is_empty() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
    }

    let args = match parse_args(&raw) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
