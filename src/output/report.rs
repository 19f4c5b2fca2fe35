//! Self-contained HTML comparison report

use chrono::{DateTime, Utc};

use crate::domain::diff::DiffTable;
use crate::domain::summary::ConversionSummary;

/// One column header of the report
#[derive(Debug, Clone)]
pub struct ReportColumn {
    pub label: String,
    pub is_base: bool,
    /// `data:` URI of a still frame
    pub thumbnail: Option<String>,
}

/// Everything the report shows
#[derive(Debug, Clone)]
pub struct ReportContent {
    pub columns: Vec<ReportColumn>,
    pub table: DiffTable,
    pub summaries: Vec<ConversionSummary>,
    pub generated_at: DateTime<Utc>,
}

const STYLE: &str = "\
body{background:#111;color:#ddd;font-family:sans-serif;margin:2rem}\
h1{color:#ef0;border-bottom:2px solid #ef0;padding-bottom:.5rem}\
h2{color:#ef0;border-left:4px solid #ef0;padding-left:12px}\
table{border-collapse:collapse;width:100%}\
th{background:#ef0;color:#000;text-align:left;padding:8px}\
td{padding:6px 8px;border-bottom:1px solid #333}\
tr.diff td{background:rgba(238,255,0,.15);color:#ef0}\
tr.same td{color:#888}\
.thumbs{display:flex;gap:1rem}\
.thumbs figure{margin:0}\
.thumbs img{max-width:320px;border:1px solid #333}\
pre{background:#1a1a1a;border:1px solid #ef0;padding:1rem;color:#ef0}";

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn column_label(column: &ReportColumn) -> String {
    if column.is_base {
        format!("{} (base)", escape(&column.label))
    } else {
        escape(&column.label)
    }
}

/// Render the report document
pub fn render_html(content: &ReportContent) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>DiffMovie comparison</title>\n");
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str("<h1>DiffMovie comparison</h1>\n");
    html.push_str(&format!(
        "<p>Generated {}</p>\n",
        content.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if content.columns.iter().any(|c| c.thumbnail.is_some()) {
        html.push_str("<div class=\"thumbs\">\n");
        for column in &content.columns {
            if let Some(uri) = &column.thumbnail {
                html.push_str(&format!(
                    "<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>\n",
                    uri,
                    escape(&column.label),
                    column_label(column)
                ));
            }
        }
        html.push_str("</div>\n");
    }

    html.push_str("<h2>Fields</h2>\n<table>\n<tr><th>field</th>");
    for column in &content.columns {
        html.push_str(&format!("<th>{}</th>", column_label(column)));
    }
    html.push_str("</tr>\n");
    for row in &content.table.rows {
        let class = if row.differing { "diff" } else { "same" };
        html.push_str(&format!("<tr class=\"{}\"><td>{}</td>", class, escape(row.key.label())));
        for value in &row.values {
            html.push_str(&format!("<td>{}</td>", escape(value)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html.push_str(&format!(
        "<p>{} of {} fields differ</p>\n",
        content.table.differing_count, content.table.total_count
    ));

    if !content.summaries.is_empty() {
        html.push_str("<h2>Conversion summaries</h2>\n");
        for summary in &content.summaries {
            html.push_str(&format!("<pre>{}</pre>\n", escape(&summary.to_string())));
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}
