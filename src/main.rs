use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use etch_parse::{Block, Diagnostic, PageConfig, Severity, Token};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "etch", version, about = "Render, inspect, and lint Etch markup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RenderFormat {
    Terminal,
    Html,
    Page,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an Etch file
    Render {
        /// Path to the .etch file
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: RenderFormat,

        /// Page title (with --format page; defaults to the file stem)
        #[arg(long)]
        title: Option<String>,
    },

    /// Dump the parsed block structure of an Etch file
    Inspect {
        /// Path to the .etch file
        file: String,

        /// Emit the document tree as JSON
        #[arg(long)]
        json: bool,

        /// Also dump each textual block's inline token stream
        #[arg(long)]
        tokens: bool,
    },

    /// Lint Etch files; directories are searched for .etch entries
    Check {
        /// Files or directories to check
        paths: Vec<String>,

        /// Emit diagnostics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { file, format, title } => {
            handle_render(&file, format, title)?;
        }
        Commands::Inspect { file, json, tokens } => {
            handle_inspect(&file, json, tokens)?;
        }
        Commands::Check { paths, json } => {
            handle_check(&paths, json)?;
        }
    }

    Ok(())
}

fn read_source(file: &str) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read '{file}'"))
}

fn handle_render(file: &str, format: RenderFormat, title: Option<String>) -> Result<()> {
    let content = read_source(file)?;
    let doc = etch_parse::parse(&content);

    // Lint findings go to stderr so stdout stays clean for the payload.
    for diag in doc.lint() {
        eprintln!("{}:{}: {}: {}", file, diag.line, severity_label(diag.severity), diag.message);
    }

    let output = match format {
        RenderFormat::Terminal => doc.to_terminal(),
        RenderFormat::Html => doc.to_html(),
        RenderFormat::Page => {
            let title = title.or_else(|| {
                Path::new(file).file_stem().map(|stem| stem.to_string_lossy().into_owned())
            });
            doc.to_html_page(&PageConfig { title, lang: None })
        }
    };

    println!("{output}");
    Ok(())
}

fn handle_inspect(file: &str, json: bool, tokens: bool) -> Result<()> {
    let content = read_source(file)?;
    let doc = etch_parse::parse(&content);

    if json {
        println!("{}", doc.to_json()?);
        return Ok(());
    }

    for block in &doc.blocks {
        println!("{}", describe_block(block));
        if tokens {
            if let Some(styled) = styled_of(block) {
                println!("      {}", describe_tokens(styled));
            }
        }
    }
    Ok(())
}

fn describe_block(block: &Block) -> String {
    let label = match block {
        Block::Paragraph { text, .. } => format!("paragraph: {}", preview(text)),
        Block::Heading { level, text, .. } => format!("heading({level}): {}", preview(text)),
        Block::Code { language, text, .. } => format!(
            "code({}): {} line(s)",
            language.as_deref().unwrap_or("-"),
            text.lines().count(),
        ),
        Block::LineBreak { .. } => "line-break".to_string(),
        Block::ListItem { level, ordered, text, .. } => {
            let marker = if *ordered { "ordered" } else { "unordered" };
            format!("list-item({marker}, level {level}): {}", preview(text))
        }
    };
    format!("{:>4}  {label}", block.span().start_line)
}

/// First line of a block's text, shortened for display.
fn preview(text: &str) -> String {
    let first = text.lines().next().unwrap_or("");
    if first.chars().count() > 48 {
        let head: String = first.chars().take(47).collect();
        format!("{head}\u{2026}")
    } else {
        first.to_string()
    }
}

fn styled_of(block: &Block) -> Option<&[Token]> {
    match block {
        Block::Paragraph { styled, .. } | Block::ListItem { styled, .. } => styled.as_deref(),
        _ => None,
    }
}

/// Compact single-line rendering of a token stream: literals run together,
/// toggles and breaks appear as angle-quoted names.
fn describe_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Literal('\n') => out.push_str("\\n"),
            Token::Literal(c) => out.push(*c),
            Token::Toggle(kind) => {
                out.push_str(&format!("\u{2039}{}\u{203a}", kind.name()));
            }
            Token::ParagraphBreak => out.push_str("\u{2039}break\u{203a}"),
        }
    }
    out
}

fn handle_check(paths: &[String], json: bool) -> Result<()> {
    let files = collect_files(paths)?;
    let mut has_errors = false;
    let mut report: Vec<(String, Vec<Diagnostic>)> = Vec::new();

    for file in &files {
        let content = read_source(file)?;
        let doc = etch_parse::parse(&content);
        let diagnostics = doc.lint();
        has_errors |= diagnostics.iter().any(|d| d.severity == Severity::Error);
        report.push((file.clone(), diagnostics));
    }

    if json {
        let entries: Vec<serde_json::Value> = report
            .iter()
            .map(|(file, diags)| serde_json::json!({ "file": file, "diagnostics": diags }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (file, diags) in &report {
            if diags.is_empty() {
                println!("{}: {}", file, "OK".green());
                continue;
            }
            for diag in diags {
                let code_str = match &diag.code {
                    Some(code) => format!("[{code}] "),
                    None => String::new(),
                };
                println!(
                    "{}:{}: {}: {code_str}{}",
                    file,
                    diag.line,
                    severity_label(diag.severity),
                    diag.message,
                );
            }
        }
    }

    if has_errors {
        std::process::exit(1);
    }
    Ok(())
}

fn severity_label(severity: Severity) -> String {
    match severity {
        Severity::Error => format!("{}", "error".red().bold()),
        Severity::Warning => format!("{}", "warning".yellow().bold()),
        Severity::Info => format!("{}", "info".cyan().bold()),
    }
}

/// Expand path arguments: files pass through untouched, directories are
/// walked for `.etch` entries in filename order.
fn collect_files(paths: &[String]) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for path in paths {
        let candidate = PathBuf::from(path);
        if candidate.is_dir() {
            for entry in WalkDir::new(&candidate).min_depth(1).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "etch")
                {
                    files.push(entry.path().display().to_string());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}
