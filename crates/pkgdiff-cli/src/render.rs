//! Plain-text rendering of a report.

use std::fmt::Write;

use colored::Colorize;

use pkgdiff_diff::{Hunk, MemberDiff, Report};
use pkgdiff_types::{ActionKind, LineKind};

/// Render `report` as coloured, unified-diff-like text.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    if let Some(message) = report.error() {
        let _ = writeln!(out, "{}", message.red());
        return out;
    }
    if report.member_count() == 0 {
        let _ = writeln!(out, "No changes.");
        return out;
    }

    for group in report.namespaces() {
        let namespace = if group.namespace.is_empty() {
            "(global)"
        } else {
            group.namespace.as_str()
        };
        let _ = writeln!(out, "\n{}", namespace.bold());
        for member in &group.members {
            render_member(&mut out, member);
        }
    }

    let _ = writeln!(
        out,
        "\n{} members changed in {} namespaces",
        report.member_count(),
        report.namespaces().len()
    );
    out
}

fn render_member(out: &mut String, member: &MemberDiff) {
    let marker = match member.action() {
        ActionKind::Add => "+".green().bold(),
        ActionKind::Remove => "-".red().bold(),
        ActionKind::Update => "~".yellow().bold(),
    };
    let _ = writeln!(
        out,
        "  {} {} ({}, {})",
        marker,
        member.name(),
        format!("+{}", member.insertions()).green(),
        format!("-{}", member.deletions()).red()
    );
    for hunk in member.hunks() {
        render_hunk(out, hunk);
    }
}

fn render_hunk(out: &mut String, hunk: &Hunk) {
    let _ = writeln!(out, "    {}", "@@".cyan());
    for line in hunk.lines() {
        let text = line.to_string();
        let _ = match line.kind {
            LineKind::Context => writeln!(out, "    {text}"),
            LineKind::Inserted => writeln!(out, "    {}", text.green()),
            LineKind::Deleted => writeln!(out, "    {}", text.red()),
        };
    }
}
