use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::AnnotateConfig;
use crate::export::Format;

#[derive(Parser, Debug)]
#[command(author, version, about = "Finds group words in a corpus and exports their token windows")]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Annotate one or more corpus folders.
    Annotate(AnnotateArgs),
    /// Compile a wordlist tree into a binary lexicon.
    Compile(CompileArgs),
    /// Print the tokens and contexts of a single file.
    Tokenize(TokenizeArgs),
}

#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Corpus folders, one text file per document.
    #[arg(required = true, value_name = "FOLDER")]
    pub corpora: Vec<PathBuf>,

    /// Wordlist tree: <dir>/<group>/<lemma>.txt
    #[arg(long, value_name = "DIR", required_unless_present = "lexicon", conflicts_with = "lexicon")]
    pub groups: Option<PathBuf>,

    /// Lexicon produced by `concord compile`.
    #[arg(long, value_name = "FILE")]
    pub lexicon: Option<PathBuf>,

    /// JSON file with run settings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Single output file for all folders. Defaults to <folder>.<format> per folder.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    #[arg(long)]
    pub half_width: Option<usize>,

    #[arg(long)]
    pub narrow_radius: Option<usize>,

    #[arg(long)]
    pub context_radius: Option<usize>,

    #[arg(long)]
    pub marker: Option<String>,

    /// Fail if a form is listed under two different lemmas.
    #[arg(long)]
    pub strict: bool,

    /// Neither read nor write `.cache` files.
    #[arg(long)]
    pub no_cache: bool,

    /// Worker threads (defaults to one per core).
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Stop with an error on the first document that cannot be processed.
    #[arg(long)]
    pub fail_fast: bool,
}

impl AnnotateArgs {
    /// Applies command-line overrides on top of `config`.
    pub fn apply(&self, mut config: AnnotateConfig) -> AnnotateConfig {
        if let Some(v) = self.half_width {
            config.half_width = v;
        }
        if let Some(v) = self.narrow_radius {
            config.narrow_radius = v;
        }
        if let Some(v) = self.context_radius {
            config.context_radius = v;
        }
        if let Some(v) = &self.marker {
            config.marker = v.clone();
        }
        if self.strict {
            config.duplicate_policy = concord_lexicon::DuplicatePolicy::Reject;
        }
        if self.no_cache {
            config.cache = false;
        }
        config
    }
}

#[derive(Args, Debug)]
pub struct CompileArgs {
    #[arg(long, value_name = "DIR")]
    pub groups: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Fail if a form is listed under two different lemmas.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct TokenizeArgs {
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[arg(long, default_value_t = 80)]
    pub context_radius: usize,
}
