//! Help-text rendering (spec §4.6). Both engines hand the same field model
//! to this module; only the "Usage:" line and the closing hint differ
//! between a plain `args` engine and a `usage` engine with subcommands.

use crate::bindings::HostBridge;
use crate::buffer::{style, Style};
use crate::config::RenderConfig;
use crate::field::{Field, FieldKind};
use crate::usage_engine::UsageEntry;

use super::{wrap, RenderContext};

fn positional_signature(field: &Field) -> String {
    if field.multiple {
        format!("...{}", field.display_name)
    } else if field.required && !field.has_default {
        format!("<{}>", field.display_name)
    } else {
        format!("[{}]", field.display_name)
    }
}

fn flag_header(field: &Field, bindings: &dyn HostBridge, ctx: &RenderContext) -> String {
    let gutter = if field.required { "!" } else { " " };
    let short = match field.short {
        Some(c) => format!("-{}, ", c),
        None => "    ".to_string(),
    };
    let spelling = style(&format!("{}--{}", short, field.display_name), Style::Literal, ctx.use_color);
    let mut header = format!("{} {}", gutter, spelling);
    if !field.boolean {
        header.push(' ');
        let mut metavar = String::new();
        if field.multiple {
            metavar.push_str("...");
        }
        metavar.push_str(&field.ty.to_uppercase());
        header.push_str(&style(&metavar, Style::Metavar, ctx.use_color));
    }
    if field.has_default {
        if let Some(v) = bindings.get_scalar(&field.name) {
            header.push_str(&format!(" (default: {})", v));
        }
    }
    header
}

fn description_lines(text: &str, indent: usize, ctx: &RenderContext) -> Vec<String> {
    let width = if crate::buffer::stdout_is_tty() { 80usize.saturating_sub(indent) } else { 0 };
    let _ = ctx;
    wrap(text, width).into_iter().map(|l| format!("{}{}", " ".repeat(indent), l)).collect()
}

/// Render help for a plain `args`-engine field set (spec §4.4 step 2).
pub fn render_args_help(title: &str, fields: &[Field], bindings: &dyn HostBridge, ctx: &RenderContext) -> String {
    let mut out = String::new();
    out.push_str(title.trim());
    out.push_str("\n\n");

    let positionals: Vec<&Field> = fields.iter().filter(|f| !f.is_separator() && f.kind == FieldKind::Positional && !f.hidden).collect();
    let has_flags = fields.iter().any(|f| !f.is_separator() && f.kind == FieldKind::Flag && !f.hidden);

    out.push_str(&format!("Usage: {}", ctx.command_path.display()));
    if has_flags {
        out.push_str(" [OPTIONS]");
    }
    for p in &positionals {
        out.push(' ');
        out.push_str(&positional_signature(p));
    }
    out.push_str("\n\n");

    if !positionals.is_empty() {
        out.push_str(&style("Arguments:", Style::Section, ctx.use_color));
        out.push('\n');
        for p in &positionals {
            let sig = positional_signature(p);
            let pad = ctx.config.field_width.saturating_sub(sig.len()).max(1);
            out.push_str(&format!("  {}{}{}\n", sig, " ".repeat(pad), p.description));
        }
        out.push('\n');
    }

    render_flag_sections(&mut out, fields, bindings, ctx);

    out.push_str(&format!("Use \"{} --help\" for more information.\n", ctx.command_path.display()));
    out
}

/// Render help for a `usage`-engine invocation (spec §4.5 step 2): global
/// flags plus the visible command table.
pub fn render_usage_help(
    title: &str,
    global_fields: &[Field],
    entries: &[UsageEntry],
    bindings: &dyn HostBridge,
    ctx: &RenderContext,
) -> String {
    let mut out = String::new();
    out.push_str(title.trim());
    out.push_str("\n\n");

    let has_flags = global_fields.iter().any(|f| !f.is_separator() && f.kind == FieldKind::Flag && !f.hidden);
    out.push_str(&format!("Usage: {}", ctx.command_path.display()));
    if has_flags {
        out.push_str(" [OPTIONS]");
    }
    out.push_str(" <command>\n\n");

    render_flag_sections(&mut out, global_fields, bindings, ctx);

    let visible: Vec<&UsageEntry> = entries.iter().filter(|e| !e.hidden).collect();
    if !visible.is_empty() {
        out.push_str(&style("Commands:", Style::Section, ctx.use_color));
        out.push('\n');
        for e in &visible {
            let names: Vec<&str> = e.all_names().collect();
            let label = names.join(", ");
            let pad = ctx.config.field_width.saturating_sub(label.len()).max(1);
            out.push_str(&format!("  {}{}{}\n", label, " ".repeat(pad), e.description));
        }
        out.push('\n');
    }

    out.push_str(&format!("Use \"{} <command> --help\" for more information.\n", ctx.command_path.display()));
    out
}

/// Shared by both render entry points: walk the field list once, emitting
/// an "Options:" heading (or a custom one from a group separator) and one
/// two-line block per visible flag.
fn render_flag_sections(out: &mut String, fields: &[Field], bindings: &dyn HostBridge, ctx: &RenderContext) {
    let has_flags = fields.iter().any(|f| !f.is_separator() && f.kind == FieldKind::Flag && !f.hidden);
    if !has_flags {
        return;
    }
    out.push_str(&style("Options:", Style::Section, ctx.use_color));
    out.push('\n');
    for field in fields {
        if field.is_separator() {
            out.push_str(&format!("\n{}:\n", style(&field.description, Style::Section, ctx.use_color)));
            continue;
        }
        if field.kind != FieldKind::Flag || field.hidden {
            continue;
        }
        let header = flag_header(field, bindings, ctx);
        out.push_str(&format!("  {}\n", header));
        for line in description_lines(&field.description, 9, ctx) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push('\n');
}

/// `--argsh` version banner (spec §4.5 step 2, §6 env vars).
pub fn render_version_banner(config: &RenderConfig) -> String {
    let mut out = format!("argsh {}", config.version.as_deref().unwrap_or("unknown"));
    if let Some(sha) = &config.commit_sha {
        out.push_str(&format!(" ({})", sha));
    }
    out.push('\n');
    out
}
