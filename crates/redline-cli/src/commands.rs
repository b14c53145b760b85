use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use redline_merge::{
    accept_all, compact, diff_words, extract_plain_text, reject_all, ChangeSummary, MergeConfig,
    MergeEngine, Segment,
};
use redline_types::{Block, DiffTag, Document, Node};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    let output = match cli.command {
        Command::Words(args) => cmd_words(args, format)?,
        Command::Merge(args) => cmd_merge(args, format)?,
        Command::Text(args) => cmd_text(args, format)?,
        Command::Accept(args) => cmd_resolve(args, format, accept_all)?,
        Command::Reject(args) => cmd_resolve(args, format, reject_all)?,
        Command::Stats(args) => cmd_stats(args, format)?,
    };
    println!("{output}");
    Ok(())
}

fn cmd_words(args: WordsArgs, format: OutputFormat) -> anyhow::Result<String> {
    let old = read_text_arg(&args.old)?;
    let new = read_text_arg(&args.new)?;
    let segments = compact(diff_words(&old, &new));
    match format {
        OutputFormat::Text => Ok(render_segments(&segments)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&segments)?),
    }
}

fn cmd_merge(args: MergeArgs, format: OutputFormat) -> anyhow::Result<String> {
    let merged = merge_files(&args)?;
    match format {
        OutputFormat::Text => Ok(render_document(&merged)),
        OutputFormat::Json => Ok(merged.to_json_pretty()?),
    }
}

fn cmd_text(args: TextArgs, format: OutputFormat) -> anyhow::Result<String> {
    let text = extract_plain_text(&load_document(&args.doc)?);
    match format {
        OutputFormat::Text => Ok(text),
        OutputFormat::Json => Ok(serde_json::to_string(&text)?),
    }
}

fn cmd_resolve(
    args: ResolveArgs,
    format: OutputFormat,
    resolve: fn(&Document) -> Document,
) -> anyhow::Result<String> {
    let resolved = resolve(&load_document(&args.merged)?);
    match format {
        OutputFormat::Text => Ok(extract_plain_text(&resolved)),
        OutputFormat::Json => Ok(resolved.to_json_pretty()?),
    }
}

fn cmd_stats(args: MergeArgs, format: OutputFormat) -> anyhow::Result<String> {
    let summary = ChangeSummary::of(&merge_files(&args)?);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text if summary.is_empty() => Ok("No changes.".to_string()),
        OutputFormat::Text => Ok([
            format!(
                "{} blocks added, {} removed, {} modified",
                summary.added_blocks.to_string().green(),
                summary.removed_blocks.to_string().red(),
                summary.modified_blocks.to_string().yellow(),
            ),
            format!(
                "{} words added, {} removed",
                summary.added_words.to_string().green(),
                summary.removed_words.to_string().red(),
            ),
            format!(
                "{} chars unchanged, {} added, {} removed",
                summary.unchanged_chars, summary.added_chars, summary.removed_chars,
            ),
        ]
        .join("\n")),
    }
}

fn merge_files(args: &MergeArgs) -> anyhow::Result<Document> {
    let engine = load_engine(args.config.as_deref())?;
    let old = load_document(&args.old)?;
    let new = load_document(&args.new)?;
    Ok(engine.merge(&old, &new))
}

/// A literal argument, or the contents of a file for `@path`.
fn read_text_arg(arg: &str) -> anyhow::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {path}")),
        None => Ok(arg.to_string()),
    }
}

fn load_document(path: &Path) -> anyhow::Result<Document> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = Document::from_json(&json)
        .with_context(|| format!("invalid document {}", path.display()))?;
    debug!(path = %path.display(), blocks = doc.len(), "loaded document");
    Ok(doc)
}

fn load_engine(config: Option<&Path>) -> anyhow::Result<MergeEngine> {
    let config = match config {
        Some(path) => {
            let toml = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            MergeConfig::from_toml_str(&toml)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => MergeConfig::default(),
    };
    Ok(MergeEngine::new(config)?)
}

fn paint(tag: DiffTag, text: &str) -> String {
    match tag {
        DiffTag::Unchanged => text.to_string(),
        DiffTag::Added => text.green().underline().to_string(),
        DiffTag::Removed => text.red().strikethrough().to_string(),
    }
}

fn render_segments(segments: &[Segment]) -> String {
    segments.iter().map(|s| paint(s.tag, &s.text)).collect()
}

/// One line per text block, runs coloured by diff state.
fn render_document(doc: &Document) -> String {
    let mut lines = Vec::new();
    for block in &doc.blocks {
        render_block(block, &mut lines);
    }
    lines.join("\n")
}

fn render_block(block: &Block, lines: &mut Vec<String>) {
    let mut own_line = block.is_textblock();
    if own_line {
        lines.push(String::new());
    }
    for child in &block.children {
        match child {
            Node::Run(run) => {
                if !own_line && !run.text.is_empty() {
                    lines.push(String::new());
                    own_line = true;
                }
                if let Some(line) = lines.last_mut() {
                    line.push_str(&paint(run.diff_tag(), &run.text));
                }
            }
            Node::Block(inner) => {
                render_block(inner, lines);
                own_line = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_doc(dir: &Path, name: &str, doc: &Document) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, doc.to_json().unwrap()).unwrap();
        path
    }

    fn write_paragraphs(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
        let doc = Document::new(paragraphs.iter().map(|p| Block::paragraph(*p)).collect());
        write_doc(dir, name, &doc)
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn text_arg_literal_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.txt");
        fs::write(&path, "from file").unwrap();

        assert_eq!(read_text_arg("literal").unwrap(), "literal");
        assert_eq!(read_text_arg(&format!("@{}", path.display())).unwrap(), "from file");
        assert!(read_text_arg("@/definitely/not/here").is_err());
    }

    #[test]
    fn words_text_output() {
        plain();
        let out = cmd_words(
            WordsArgs {
                old: "the quick fox".into(),
                new: "the slow fox".into(),
            },
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(out, "the quickslow fox");
    }

    #[test]
    fn words_json_output() {
        let out = cmd_words(
            WordsArgs {
                old: "a".into(),
                new: "a b".into(),
            },
            OutputFormat::Json,
        )
        .unwrap();
        let segments: Vec<Segment> = serde_json::from_str(&out).unwrap();
        assert_eq!(segments, vec![Segment::unchanged("a"), Segment::added(" b")]);
    }

    #[test]
    fn merge_renders_one_line_per_block() {
        plain();
        let dir = tempfile::tempdir().unwrap();
        let old = write_paragraphs(dir.path(), "old.json", &["Alpha"]);
        let new = write_paragraphs(dir.path(), "new.json", &["Alpha", "Beta"]);

        let args = MergeArgs { old, new, config: None };
        assert_eq!(cmd_merge(args, OutputFormat::Text).unwrap(), "Alpha\nBeta");
    }

    #[test]
    fn merge_json_then_accept() {
        let dir = tempfile::tempdir().unwrap();
        let old = write_paragraphs(dir.path(), "old.json", &["the quick fox"]);
        let new = write_paragraphs(dir.path(), "new.json", &["the slow fox"]);

        let args = MergeArgs { old, new, config: None };
        let merged_json = cmd_merge(args, OutputFormat::Json).unwrap();
        let merged_path = dir.path().join("merged.json");
        fs::write(&merged_path, merged_json).unwrap();

        let accepted = cmd_resolve(
            ResolveArgs { merged: merged_path.clone() },
            OutputFormat::Text,
            accept_all,
        )
        .unwrap();
        assert_eq!(accepted, "the slow fox");

        let rejected = cmd_resolve(
            ResolveArgs { merged: merged_path },
            OutputFormat::Json,
            reject_all,
        )
        .unwrap();
        assert_eq!(
            Document::from_json(&rejected).unwrap(),
            Document::new(vec![Block::paragraph("the quick fox")])
        );
    }

    #[test]
    fn config_file_changes_pairing() {
        let dir = tempfile::tempdir().unwrap();
        let old = write_paragraphs(dir.path(), "old.json", &["the quick fox"]);
        let new = write_paragraphs(dir.path(), "new.json", &["the slow fox"]);
        let config = dir.path().join("redline.toml");
        fs::write(&config, "similarity_threshold = 0.9\n").unwrap();

        let args = MergeArgs { old, new, config: Some(config) };
        let out = cmd_stats(args, OutputFormat::Json).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(summary["removed_blocks"], 1);
        assert_eq!(summary["added_blocks"], 1);
        assert_eq!(summary["modified_blocks"], 0);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("redline.toml");
        fs::write(&config, "similarity_threshold = 3.0\n").unwrap();
        let err = load_engine(Some(&config)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid similarity threshold"));
    }

    #[test]
    fn invalid_document_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"type": "paragraph"}"#).unwrap();
        let err = load_document(&path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("bad.json"));
        assert!(message.contains("`doc`"));
    }

    #[test]
    fn stats_without_changes() {
        plain();
        let dir = tempfile::tempdir().unwrap();
        let doc = Document::new(vec![Block::paragraph("same")]);
        let old = write_doc(dir.path(), "old.json", &doc);
        let new = write_doc(dir.path(), "new.json", &doc);
        let out = cmd_stats(MergeArgs { old, new, config: None }, OutputFormat::Text).unwrap();
        assert_eq!(out, "No changes.");
    }

    #[test]
    fn text_command_flattens_document() {
        let dir = tempfile::tempdir().unwrap();
        let doc = Document::new(vec![Block::heading(1, "Title"), Block::paragraph("Body")]);
        let path = write_doc(dir.path(), "doc.json", &doc);
        let text = cmd_text(TextArgs { doc: path.clone() }, OutputFormat::Text).unwrap();
        assert_eq!(text, "Title\nBody");
        let json = cmd_text(TextArgs { doc: path }, OutputFormat::Json).unwrap();
        assert_eq!(json, "\"Title\\nBody\"");
    }

    #[test]
    fn container_text_renders_on_its_own_line() {
        plain();
        let doc = Document::new(vec![
            Block::paragraph("a"),
            Block::new("listItem")
                .with_run(redline_types::Run::new("b"))
                .with_child(Block::paragraph("c")),
        ]);
        assert_eq!(render_document(&doc), "a\nb\nc");
    }
}
