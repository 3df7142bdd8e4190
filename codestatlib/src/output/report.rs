//! Fixed-width text report.
//!
//! Sections, in order: header with timestamp, overall totals, composition
//! percentages, categories, directories, largest files and a footer.
//! Integers are comma-separated, percentages and kilobytes have one decimal.

use thousands::Separable;

use crate::data::stats::LineCounts;
use crate::query::queryset::{QueryItem, ReportQuerySet};

const WIDE_RULE: usize = 80;
const NARROW_RULE: usize = 40;
const FILE_RULE: usize = 100;

const CATEGORY_WIDTH: usize = 20;
const DIRECTORY_WIDTH: usize = 30;
const PATH_WIDTH: usize = 50;
const FILE_CATEGORY_WIDTH: usize = 15;

/// Format an integer with thousands separators.
pub fn format_count(n: u64) -> String {
    n.separate_with_commas()
}

/// Truncate a name to at most `max_len` characters, adding a ".." prefix if needed.
pub fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len && max_len > 2 {
        let tail: String = name.chars().skip(len - (max_len - 2)).collect();
        format!("..{}", tail)
    } else {
        name.to_string()
    }
}

fn rule(ch: char, width: usize) -> String {
    ch.to_string().repeat(width)
}

/// Header and rows of one aggregate table.
fn aggregate_table<T>(
    out: &mut Vec<String>,
    title: &str,
    label_header: &str,
    label_width: usize,
    items: &[QueryItem<T>],
    stats: impl Fn(&T) -> (u64, LineCounts),
) {
    out.push(title.to_string());
    out.push(rule('-', WIDE_RULE));
    out.push(format!(
        "{:<lw$} {:<8} {:<10} {:<10} {:<10} {:<8}",
        label_header,
        "Files",
        "Lines",
        "Code",
        "Comment",
        "Blank",
        lw = label_width
    ));
    out.push(rule('-', WIDE_RULE));

    for item in items {
        let (files, counts) = stats(&item.stats);
        out.push(format!(
            "{:<lw$} {:<8} {:<10} {:<10} {:<10} {:<8}",
            item.label,
            format_count(files),
            format_count(counts.total),
            format_count(counts.code),
            format_count(counts.comment),
            format_count(counts.blank),
            lw = label_width
        ));
    }
    out.push(String::new());
}

/// Render the full text report.
pub fn render_report(qs: &ReportQuerySet) -> String {
    let mut out: Vec<String> = Vec::new();
    let totals = qs.totals();

    out.push(rule('=', WIDE_RULE));
    out.push("Code Statistics Report".to_string());
    out.push(rule('=', WIDE_RULE));
    out.push(format!(
        "Generated: {}",
        qs.timestamp.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push(String::new());

    out.push("Overall".to_string());
    out.push(rule('-', NARROW_RULE));
    out.push(format!(
        "Files:          {:>8}",
        format_count(qs.summary.total_files)
    ));
    out.push(format!("Total lines:    {:>8}", format_count(totals.total)));
    out.push(format!("Code lines:     {:>8}", format_count(totals.code)));
    out.push(format!("Comment lines:  {:>8}", format_count(totals.comment)));
    out.push(format!("Blank lines:    {:>8}", format_count(totals.blank)));

    if totals.total > 0 {
        out.push(String::new());
        out.push("Composition".to_string());
        out.push(rule('-', NARROW_RULE));
        out.push(format!("Code:           {:>6.1}%", totals.percent(totals.code)));
        out.push(format!(
            "Comment:        {:>6.1}%",
            totals.percent(totals.comment)
        ));
        out.push(format!("Blank:          {:>6.1}%", totals.percent(totals.blank)));
    }
    out.push(String::new());

    aggregate_table(
        &mut out,
        "By category",
        "Category",
        CATEGORY_WIDTH,
        &qs.categories,
        |t| (t.files, t.counts),
    );
    aggregate_table(
        &mut out,
        "By directory",
        "Directory",
        DIRECTORY_WIDTH,
        &qs.directories,
        |t| (t.files, t.counts),
    );

    out.push(format!("Largest files (top {} by lines)", qs.top));
    out.push(rule('-', FILE_RULE));
    out.push(format!(
        "{:<pw$} {:<cw$} {:<8} {:<8} {:<8} {:<10}",
        "Path",
        "Category",
        "Lines",
        "Code",
        "Comment",
        "Size (KB)",
        pw = PATH_WIDTH,
        cw = FILE_CATEGORY_WIDTH
    ));
    out.push(rule('-', FILE_RULE));
    for file in &qs.top_files {
        out.push(format!(
            "{:<pw$} {:<cw$} {:<8} {:<8} {:<8} {:<10.1}",
            truncate_name(&file.path, PATH_WIDTH),
            file.category,
            format_count(file.counts.total),
            format_count(file.counts.code),
            format_count(file.counts.comment),
            file.size_kb(),
            pw = PATH_WIDTH,
            cw = FILE_CATEGORY_WIDTH
        ));
    }

    out.push(String::new());
    out.push(rule('=', WIDE_RULE));
    out.push(format!(
        "Report complete - {} files analyzed",
        format_count(qs.summary.total_files)
    ));
    out.push(rule('=', WIDE_RULE));

    let lines: Vec<&str> = out.iter().map(|l| l.trim_end()).collect();
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
