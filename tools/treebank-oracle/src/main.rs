use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use serde::Serialize;

use arbor_parser::{
    follow_oracle, parse_treebank, ParseSession, ParsedTree, ParserConfig, StateItem,
};
use arbor_protocol::{CfgTree, OracleCorpus, OracleSentence, SentenceId};
use arbor_rules::Catalogue;
use arbor_tree::LexicalContext;

const CORPUS_VERSION: u32 = 1;

#[derive(Parser)]
#[command(author, version, about = "Replays the parser oracle over a binarized treebank")]
struct Cli {
    /// Binarized bracketed trees, one per line
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// rkyv oracle corpus to write
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Also write the derived trees and dependencies as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Parser configuration (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Join leftover stack fragments instead of rejecting the derivation
    #[arg(long)]
    fragments: bool,
}

#[derive(Serialize)]
struct SentenceReport {
    id: SentenceId,
    tree: ParsedTree,
}

fn load_config(cli: &Cli) -> anyhow::Result<ParserConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {:?}", path))?
        }
        None => ParserConfig::default(),
    };
    if cli.fragments {
        config.allow_fragments = true;
    }
    Ok(config)
}

/// Runs the oracle over one reference tree and checks the derivation is loss-free.
fn replay(
    id: SentenceId,
    gold: &CfgTree,
    config: ParserConfig,
) -> anyhow::Result<(OracleSentence, ParsedTree)> {
    let words = LexicalContext::new(gold.words().to_vec());
    let session = ParseSession::new(words, Catalogue::standard(), config);
    let start = StateItem::initial_for_training(session, gold);
    let done = follow_oracle(&start, gold)?;

    let counts = done.loss_counts();
    if done.hamming_loss() != 0.0 {
        done.trace();
        bail!(
            "oracle derivation is lossy: {} precision / {} recall bracket(s) lost",
            counts.precision_lost,
            counts.recall_lost
        );
    }

    let tree = done.generate_tree()?;
    let sentence = OracleSentence {
        id,
        words: gold.words().to_vec(),
        actions: done.history(),
    };
    Ok((sentence, tree))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    println!("📖 Reading treebank from {:?}...", cli.input);
    let text = fs::read_to_string(&cli.input).with_context(|| format!("reading {:?}", cli.input))?;
    let trees = parse_treebank(&text)?;

    println!("⚙️  Replaying the oracle over {} tree(s)...", trees.len());
    let mut corpus = OracleCorpus {
        version: CORPUS_VERSION,
        sentences: Vec::with_capacity(trees.len()),
    };
    let mut reports = Vec::new();
    let mut links = 0;
    for (index, gold) in trees.iter().enumerate() {
        let id = SentenceId::new(u32::try_from(index)?);
        let (sentence, tree) =
            replay(id, gold, config).with_context(|| format!("sentence {}", index + 1))?;
        links += tree.dependencies().count();
        log::debug!("sentence {}: {} action(s)", id, sentence.actions.len());
        corpus.sentences.push(sentence);
        if cli.json.is_some() {
            reports.push(SentenceReport { id, tree });
        }
    }

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&corpus)
        .map_err(|err| anyhow::anyhow!("rkyv serialization failed: {:?}", err))?;
    let bytes = serializer.into_serializer().into_inner();
    fs::write(&cli.output, bytes)?;

    if let Some(path) = &cli.json {
        fs::write(path, serde_json::to_string_pretty(&reports)?)?;
        println!("📝 Dependency report written to {:?}", path);
    }

    println!(
        "✅ Success! {} sentence(s), {} dependency link(s); corpus written to {:?}",
        corpus.sentences.len(),
        links,
        cli.output
    );
    Ok(())
}
