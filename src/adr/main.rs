use adr::api::{AdrApi, AdrPaths, CmdMessage, MessageLevel, NewKind};
use adr::config::AdrConfig;
use adr::editor;
use adr::error::Result;
use adr::model::{AdrStatus, Record};
use adr::store::fs::FileStore;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

struct AppContext {
    api: AdrApi<FileStore>,
    verbose: bool,
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Init { .. } => handle_init(&mut ctx),
        Commands::New {
            title,
            asr,
            revision,
            context,
            no_editor,
        } => handle_new(&mut ctx, title, asr, revision, context, no_editor),
        Commands::Link {
            source,
            target,
            reason,
        } => handle_link(&mut ctx, source, target, reason),
        Commands::Unlink { source, target } => handle_unlink(&mut ctx, source, target),
        Commands::List { desc } => handle_list(&ctx, desc),
        Commands::Find { terms, desc, full } => handle_find(&ctx, terms, desc, full),
        Commands::Sync { start_at, record } => handle_sync(&mut ctx, start_at, record),
        Commands::Proposed { id, remark } => {
            handle_status(&mut ctx, id, AdrStatus::Proposed, remark)
        }
        Commands::Final { id, remark } => handle_status(&mut ctx, id, AdrStatus::Final, remark),
        Commands::Accepted { id, remark } => {
            handle_status(&mut ctx, id, AdrStatus::Accepted, remark)
        }
        Commands::Obsolete { id, remark } => {
            handle_status(&mut ctx, id, AdrStatus::Obsolete, remark)
        }
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut config = AdrConfig::load(&cwd).unwrap_or_default();
    if let Commands::Init {
        adr_root,
        template_root,
    } = &cli.command
    {
        if let Some(adr_root) = adr_root {
            config.doc_folder = adr_root.clone();
        }
        if let Some(template_root) = template_root {
            config.template_folder = template_root.clone();
        }
    }

    let paths = AdrPaths::resolve(cwd, &config.doc_folder, &config.template_folder);
    let store = FileStore::new(paths.doc_dir.clone(), paths.template_dir.clone());
    let api = AdrApi::new(store, paths, config);

    Ok(AppContext {
        api,
        verbose: cli.verbose,
    })
}

fn handle_init(ctx: &mut AppContext) -> Result<i32> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(exit_code(result.failed()))
}

fn handle_new(
    ctx: &mut AppContext,
    title: String,
    asr: bool,
    revision: Option<String>,
    context: Option<String>,
    no_editor: bool,
) -> Result<i32> {
    let kind = match revision {
        Some(revised) => match revised.trim().parse::<u32>().ok().filter(|id| *id > 0) {
            Some(revised_id) => NewKind::Revision(revised_id),
            None => {
                println!(
                    "{}",
                    format!("'{}' is not a valid record id.", revised).red()
                );
                return Ok(1);
            }
        },
        None if asr => NewKind::Requirement,
        None => NewKind::Decision,
    };

    let result = ctx.api.new_record(kind, &title, context.as_deref())?;
    print_messages(&result.messages);
    if result.failed() {
        return Ok(1);
    }

    if !no_editor {
        if let Some(record) = result.affected.first() {
            let path = ctx.api.content_path(record)?;
            if let Err(e) = editor::open_in_editor(&path) {
                eprintln!("{}", format!("Could not open the editor: {}", e).yellow());
            }
        }
    }
    Ok(0)
}

fn handle_link(
    ctx: &mut AppContext,
    source: String,
    target: String,
    reason: Option<String>,
) -> Result<i32> {
    let result = ctx.api.link(&source, &target, reason.as_deref())?;
    print_messages(&result.messages);
    Ok(exit_code(result.failed()))
}

fn handle_unlink(ctx: &mut AppContext, source: String, target: String) -> Result<i32> {
    let result = ctx.api.unlink(&source, &target)?;
    print_messages(&result.messages);
    Ok(exit_code(result.failed()))
}

fn handle_list(ctx: &AppContext, desc: bool) -> Result<i32> {
    let result = ctx.api.list(desc)?;
    print_records(&result.listed, ctx.verbose);
    print_messages(&result.messages);
    Ok(exit_code(result.failed()))
}

fn handle_find(ctx: &AppContext, terms: Vec<String>, desc: bool, full: bool) -> Result<i32> {
    let result = ctx.api.find(&terms, desc, full)?;
    print_records(&result.listed, ctx.verbose);
    print_messages(&result.messages);
    Ok(exit_code(result.failed()))
}

fn handle_sync(ctx: &mut AppContext, start_at: u32, record: Option<u32>) -> Result<i32> {
    let result = ctx.api.sync(start_at, record)?;
    print_messages(&result.messages);
    Ok(exit_code(result.failed()))
}

fn handle_status(
    ctx: &mut AppContext,
    id: String,
    target: AdrStatus,
    remark: Option<String>,
) -> Result<i32> {
    let result = ctx.api.set_status(&id, target, remark.as_deref())?;
    print_messages(&result.messages);
    Ok(exit_code(result.failed()))
}

fn exit_code(failed: bool) -> i32 {
    if failed { 1 } else { 0 }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;

fn print_records(records: &[Record], verbose: bool) {
    for record in records {
        if verbose {
            println!("{}", record.verbose_string());
            continue;
        }

        let line = record.format_line();
        let colored_line = match record.status {
            AdrStatus::Error => truncate_to_width(&line, LINE_WIDTH).red(),
            AdrStatus::Obsolete => truncate_to_width(&line, LINE_WIDTH).dimmed(),
            _ => truncate_to_width(&line, LINE_WIDTH).normal(),
        };
        println!("{}", colored_line);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
