// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use quire::build::{run_build, BuildOptions, BuildSummary};
use quire::format;
use quire::search::{QueryOptions, SearchHit, Searcher};
use quire::types::{BookIndex, BoolMode, Field};
use quire::verify::{verify, ValidatedIndex, VerificationReport};

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("QUIRE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Index {
            book,
            output,
            hash_files,
        } => cmd_index(&book, &output, hash_files),
        Commands::Inspect { file } => cmd_inspect(&file),
        Commands::Search {
            file,
            query,
            limit,
            and,
            no_expand,
        } => cmd_search(&file, &query, limit, and, no_expand),
        Commands::Verify { file } => cmd_verify(&file),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// INDEX
// ═══════════════════════════════════════════════════════════════════════════

fn cmd_index(book: &Path, output: &Path, hash_files: bool) -> Result<()> {
    let options = BuildOptions {
        hash_files,
        progress: atty::is(atty::Stream::Stderr),
    };
    let summary = run_build(book, output, &options)
        .with_context(|| format!("failed to index {}", book.display()))?;
    print_build_summary(&summary);
    Ok(())
}

fn print_build_summary(summary: &BuildSummary) {
    if !summary.enabled {
        eprintln!("⚠️  Search is disabled in book.toml; nothing written");
        return;
    }
    for path in &summary.skipped {
        eprintln!("⚠️  Skipped unreadable chapter {}", path.display());
    }
    eprintln!();
    eprintln!("✅ Build complete");
    eprintln!(
        "   {} chapters │ {} sections │ {} terms │ {}",
        summary.chapters,
        summary.documents,
        summary.terms.body + summary.terms.breadcrumbs + summary.terms.title,
        format_size(summary.json_bytes)
    );
    for path in &summary.files {
        eprintln!("   → {}", path.display());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn brotli_size(bytes: &[u8]) -> Result<usize> {
    let mut writer = brotli::CompressorWriter::new(Vec::new(), 4096, 11, 22);
    writer.write_all(bytes).context("brotli compression failed")?;
    Ok(writer.into_inner().len())
}

fn cmd_inspect(file: &Path) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let text = String::from_utf8(bytes).context("index file is not UTF-8")?;
    let index = format::from_str(&text).with_context(|| format!("failed to parse {}", file.display()))?;
    let compressed = brotli_size(text.as_bytes())?;
    let report = verify(&index);

    title_box(&format!("QUIRE INDEX: {}", truncate_path(&file.display().to_string(), 56)));
    print_overview(&index, text.len(), compressed, &report);
    print_fields(&index);
    print_options(&index);
    section_bot();
    Ok(())
}

fn print_overview(index: &BookIndex, size: usize, compressed: usize, report: &VerificationReport) {
    let store = &index.index.document_store;
    section_top("OVERVIEW");
    row_kv("format version", &index.index.version);
    row_kv("language", &index.index.lang);
    row_kv("documents", &index.doc_count().to_string());
    row_kv("pages", &distinct_pages(index).to_string());
    row_kv(
        "stored text",
        if store.save { "yes" } else { "no (no teasers)" },
    );
    row_kv("pipeline", &index.index.pipeline.join(" → "));
    row_kv("file size", &format_size(size));
    row_kv(
        "brotli",
        &format!(
            "{} ({})",
            format_size(compressed),
            savings_colored(size, compressed)
        ),
    );
    row_kv(
        "consistency",
        &format!(
            "{} {} violations",
            status_mark(report.is_ok()),
            report.violations.len()
        ),
    );
}

fn distinct_pages(index: &BookIndex) -> usize {
    let mut pages: Vec<&str> = index
        .doc_urls
        .iter()
        .map(|url| url.split('#').next().unwrap_or(url))
        .collect();
    pages.sort_unstable();
    pages.dedup();
    pages.len()
}

fn print_fields(index: &BookIndex) {
    section_mid("FIELDS");
    row(&format!(
        " {} {} {} {}",
        pad_right(&dim("field"), 14),
        pad_left(&dim("terms"), 10),
        pad_left(&dim("nodes"), 10),
        pad_left(&dim("avg words"), 12),
    ));
    for field in Field::DECLARED {
        let root = &index.field_index(field).root;
        let words: usize = index
            .index
            .document_store
            .doc_info
            .values()
            .map(|info| *info.get(field))
            .sum();
        let avg = if index.doc_count() == 0 {
            0.0
        } else {
            words as f64 / index.doc_count() as f64
        };
        row(&format!(
            " {} {} {} {}",
            pad_right(&field_label(field.as_str()), 14),
            pad_left(&root.term_count().to_string(), 10),
            pad_left(&root.node_count().to_string(), 10),
            pad_left(&format!("{:.1}", avg), 12),
        ));
    }
}

fn print_options(index: &BookIndex) {
    let search = &index.search_options;
    section_mid("OPTIONS");
    row_kv("bool", bool_label(search.bool));
    row_kv("expand", &search.expand.to_string());
    row_kv(
        "boosts",
        &format!(
            "title {} · body {} · breadcrumbs {}",
            search.fields.title.boost, search.fields.body.boost, search.fields.breadcrumbs.boost
        ),
    );
    row_kv("limit", &index.results_options.limit_results.to_string());
    row_kv(
        "teaser words",
        &index.results_options.teaser_word_count.to_string(),
    );
}

fn bool_label(mode: BoolMode) -> &'static str {
    match mode {
        BoolMode::Or => "OR",
        BoolMode::And => "AND",
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

fn load_validated(file: &Path) -> Result<ValidatedIndex> {
    let index = format::load_path(file).with_context(|| format!("failed to load {}", file.display()))?;
    ValidatedIndex::new(index).with_context(|| format!("{} is inconsistent", file.display()))
}

fn cmd_search(file: &Path, query: &str, limit: Option<usize>, and: bool, no_expand: bool) -> Result<()> {
    let searcher = Searcher::new(load_validated(file)?)?;
    let options = QueryOptions {
        bool_mode: and.then_some(BoolMode::And),
        expand: no_expand.then_some(false),
        limit,
        ..QueryOptions::default()
    };
    let hits = searcher.search_with(query, &options);
    print_hits(query, &hits);
    Ok(())
}

fn print_hits(query: &str, hits: &[SearchHit]) {
    section_top(&format!("SEARCH \"{}\"", query));
    if hits.is_empty() {
        row(&format!(" {}", dim("no results")));
        section_bot();
        return;
    }
    for (rank, hit) in hits.iter().enumerate() {
        if rank > 0 {
            row("");
        }
        let title = if hit.title.is_empty() {
            hit.url.as_str()
        } else {
            hit.title.as_str()
        };
        row(&format!(
            " {} {} {}",
            pad_left(&format!("{}.", rank + 1), 3),
            score_value(hit.score),
            bold(title)
        ));
        row(&format!("     {}", muted(&truncate_path(&hit.url, BOX_WIDTH - 6))));
        if !hit.breadcrumbs.is_empty() {
            row(&format!("     {}", dim(&hit.breadcrumbs)));
        }
        for line in wrap(&hit.teaser, BOX_WIDTH - 6) {
            row(&format!("     {}", highlight_teaser(&line)));
        }
    }
    section_bot();
    eprintln!("{} results", hits.len());
}

// ═══════════════════════════════════════════════════════════════════════════
// VERIFY
// ═══════════════════════════════════════════════════════════════════════════

fn cmd_verify(file: &Path) -> Result<()> {
    let index = format::load_path(file).with_context(|| format!("failed to load {}", file.display()))?;
    let report = verify(&index);
    print_report(&report);
    if !report.is_ok() {
        bail!("{} failed verification with {} violations", file.display(), report.violations.len());
    }
    Ok(())
}

fn print_report(report: &VerificationReport) {
    section_top("VERIFY");
    row_kv("documents", &report.docs.to_string());
    row_kv("terms", &report.terms.to_string());
    row_kv("postings", &report.postings.to_string());
    section_mid("RESULT");
    if report.is_ok() {
        row(&format!(" {} all invariants hold", status_mark(true)));
    } else {
        for violation in &report.violations {
            row(&format!(" {} {}", status_mark(false), violation));
        }
    }
    section_bot();
}
