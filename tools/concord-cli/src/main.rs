mod cache;
mod cli;
mod config;
mod corpus;
mod export;
mod run;
#[cfg(test)]
mod testing;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use concord_lexicon::{compile, load_compiled, load_groups, DuplicatePolicy, GroupIndex};
use concord_protocol::MatchRecord;
use concord_text::Tokens;
use concord_window::Annotator;
use tracing_subscriber::EnvFilter;

use crate::cache::{DocumentCache, FileCache, NoCache};
use crate::cli::{AnnotateArgs, Cli, Commands, CompileArgs, TokenizeArgs};
use crate::config::AnnotateConfig;
use crate::corpus::read_document;
use crate::export::{default_output, export};
use crate::run::annotate_folder;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "concord=debug" } else { "concord=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Annotate(args) => run_annotate(args),
        Commands::Compile(args) => run_compile(args),
        Commands::Tokenize(args) => run_tokenize(args),
    }
}

fn load_index(args: &AnnotateArgs, policy: DuplicatePolicy) -> Result<GroupIndex> {
    if let Some(path) = &args.lexicon {
        let bytes = fs::read(path).with_context(|| format!("Cannot read lexicon '{}'", path.display()))?;
        return load_compiled(&bytes, policy).with_context(|| format!("Cannot load lexicon '{}'", path.display()));
    }
    match &args.groups {
        Some(dir) => load_groups(dir, policy).with_context(|| format!("Cannot load wordlists from '{}'", dir.display())),
        None => bail!("either --groups or --lexicon is required"),
    }
}

fn run_annotate(args: AnnotateArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => AnnotateConfig::load(path)?,
        None => AnnotateConfig::default(),
    };
    let config = args.apply(base);
    tracing::debug!(?config, "settings");

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Cannot configure worker threads")?;
    }

    let index = load_index(&args, config.duplicate_policy)?;
    if index.is_empty() {
        tracing::warn!("no word-forms loaded; every document will yield zero records");
    }
    let annotator = Annotator::new(&index, config.window());
    let cache: Box<dyn DocumentCache> = if config.cache {
        Box::new(FileCache::new(config.context_radius))
    } else {
        Box::new(NoCache)
    };

    let mut combined: Vec<MatchRecord> = Vec::new();
    let mut failed = 0;
    for folder in &args.corpora {
        let report = annotate_folder(folder, &annotator, cache.as_ref(), config.context_radius)?;
        if args.fail_fast {
            if let Some((path, err)) = report.failures.first() {
                bail!("document '{}' failed: {}", path.display(), err);
            }
        }
        failed += report.failures.len();
        tracing::info!(
            folder = %folder.display(),
            documents = report.documents,
            failed = report.failures.len(),
            records = report.records.len(),
            "folder done"
        );

        if args.output.is_some() {
            combined.extend(report.records);
        } else {
            export(&default_output(folder, args.format), &report.records, args.format)?;
        }
    }

    if let Some(path) = &args.output {
        export(path, &combined, args.format)?;
    }
    if failed > 0 {
        tracing::warn!(failed, "some documents could not be processed");
    }
    Ok(())
}

fn run_compile(args: CompileArgs) -> Result<()> {
    let policy = if args.strict { DuplicatePolicy::Reject } else { DuplicatePolicy::LastWins };
    let index = load_groups(&args.groups, policy)
        .with_context(|| format!("Cannot load wordlists from '{}'", args.groups.display()))?;

    let bytes = compile(&index)?;
    fs::write(&args.output, bytes.as_slice())
        .with_context(|| format!("Cannot write '{}'", args.output.display()))?;

    tracing::info!(
        groups = index.groups().len(),
        bytes = bytes.len(),
        output = %args.output.display(),
        "lexicon compiled"
    );
    Ok(())
}

fn run_tokenize(args: TokenizeArgs) -> Result<()> {
    let text = read_document(&args.input)?;
    print_tokens(&args.input, &text, args.context_radius);
    Ok(())
}

fn print_tokens(path: &Path, text: &str, context_radius: usize) {
    println!("# {}", path.display());
    for (i, token) in Tokens::new(text, context_radius).enumerate() {
        println!("{i}\t{}\t{}..{}\t{}", token.text, token.char_start, token.char_end, token.context.replace('\n', " "));
    }
}
