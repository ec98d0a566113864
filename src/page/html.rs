//! HTML serialization of the dashboard page.

use std::fmt::Write;
use std::time::Instant;

use strum::IntoEnumIterator;

use crate::render::{AlertRow, AlertSection, Column, HostnameCell, RenderedResults, SummaryCard};

use super::controls::PageControls;

const COLUMN_COUNT: usize = 10;

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Element id of a row's hostname cell.
pub fn hostname_cell_id(section: &AlertSection, row: usize) -> String {
    format!("hostname-{}-{}", section.kind.as_str(), row)
}

/// Renders the whole page as a standalone HTML document.
pub fn render_document(
    controls: &PageControls,
    results: Option<&RenderedResults>,
    now: Instant,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<title>GPU Thermal Monitor</title>\n");
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n<div class=\"main-container\">\n");

    for banner in controls.active_banners(now) {
        let _ = writeln!(
            html,
            "<div class=\"alert alert-danger\" role=\"alert\"><i class=\"fas fa-exclamation-circle\"></i> {}</div>",
            escape_html(&banner.message)
        );
    }

    let _ = writeln!(
        html,
        "<button type=\"submit\"{}>{}</button>",
        if controls.submit.disabled { " disabled" } else { "" },
        escape_html(&controls.submit.label)
    );
    let _ = writeln!(
        html,
        "<div id=\"loadingSpinner\" style=\"display: {}\">Running analysis...</div>",
        if controls.loading { "block" } else { "none" }
    );

    if let Some(results) = results {
        let visible = controls.results_visible;
        let _ = writeln!(
            html,
            "<div id=\"resultsSection\" data-generation=\"{}\" style=\"display: {}\">",
            results.generation,
            if visible { "block" } else { "none" }
        );
        render_summary(&mut html, &results.summary);
        render_section(&mut html, &results.throttled);
        render_section(&mut html, &results.thermally_failed);
        if let Some(raw) = &results.raw_output {
            let _ = writeln!(
                html,
                "<h2>Raw Output</h2>\n<pre class=\"raw-output\">{}</pre>",
                escape_html(raw)
            );
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_summary(html: &mut String, cards: &[SummaryCard]) {
    html.push_str("<div id=\"summaryCards\" class=\"summary-cards\">\n");
    for card in cards {
        let _ = writeln!(
            html,
            "<div class=\"summary-card {}\"><h4><i class=\"fas {} {}\"></i></h4><h3>{}</h3><p class=\"text-muted\">{}</p></div>",
            card.field.css_class(),
            card.field.icon(),
            card.style.css_class(),
            escape_html(&card.value),
            card.field.label()
        );
    }
    html.push_str("</div>\n");
}

fn render_section(html: &mut String, section: &AlertSection) {
    let _ = writeln!(
        html,
        "<div id=\"{}-section\" class=\"alert-section\" style=\"display: {}\">",
        section.kind.as_str(),
        if section.visible { "block" } else { "none" }
    );
    let _ = writeln!(html, "<h2>{}</h2>", section.kind.title());
    html.push_str("<table class=\"table\">\n<thead><tr>");
    for column in Column::iter() {
        let _ = write!(html, "<th>{}</th>", column.header(section.kind));
    }
    html.push_str("</tr></thead>\n");
    let _ = writeln!(html, "<tbody id=\"{}-alerts\">", section.kind.as_str());

    if section.rows.is_empty() {
        let _ = writeln!(
            html,
            "<tr class=\"no-findings\"><td colspan=\"{COLUMN_COUNT}\" class=\"text-center text-success\">{}</td></tr>",
            section.kind.empty_message()
        );
    }
    for (index, row) in section.rows.iter().enumerate() {
        render_row(html, section, index, row);
    }

    html.push_str("</tbody>\n</table>\n</div>\n");
}

fn render_row(html: &mut String, section: &AlertSection, index: usize, row: &AlertRow) {
    html.push_str("<tr class=\"alert-row\">");
    for column in Column::iter() {
        match column {
            Column::Site | Column::Cluster | Column::Gpu => {
                let _ = write!(
                    html,
                    "<td><strong>{}</strong></td>",
                    escape_html(&row.cell_text(column))
                );
            }
            Column::Device => match &row.device {
                Some(address) => {
                    let escaped = escape_html(address);
                    let _ = write!(
                        html,
                        "<td><a class=\"device-link\" href=\"http://{escaped}/\" target=\"_blank\" rel=\"noopener\">{escaped}</a></td>"
                    );
                }
                None => {
                    let _ = write!(
                        html,
                        "<td class=\"text-muted\">{}</td>",
                        escape_html(&row.cell_text(column))
                    );
                }
            },
            Column::Hostname => {
                let class = match row.hostname {
                    HostnameCell::Pending => "text-muted hostname-loading",
                    HostnameCell::Resolved(_) => "text-info",
                };
                let _ = write!(
                    html,
                    "<td id=\"{}\"><strong class=\"{class}\">{}</strong></td>",
                    hostname_cell_id(section, index),
                    escape_html(row.hostname.text())
                );
            }
            Column::Temperature => {
                let _ = write!(
                    html,
                    "<td><strong class=\"{}\">{}</strong></td>",
                    row.temperature_style.css_class(),
                    escape_html(&row.temperature)
                );
            }
            Column::FirstSeen | Column::LastSeen => {
                let _ = write!(html, "<td>{}</td>", escape_html(&row.cell_text(column)));
            }
            Column::Duration => {
                let _ = write!(
                    html,
                    "<td><strong class=\"{}\">{}</strong></td>",
                    row.duration_style.css_class(),
                    escape_html(&row.duration)
                );
            }
            Column::Alerts => {
                let _ = write!(
                    html,
                    "<td><span class=\"badge bg-dark\">{}</span></td>",
                    row.alert_count
                );
            }
        }
    }
    html.push_str("</tr>\n");
}

const STYLE: &str = r#"<style>
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;margin:0;background:#f5f6f8;color:#212529}
.main-container{max-width:1400px;margin:0 auto;padding:24px}
.alert-danger{background:#f8d7da;color:#842029;padding:12px 16px;border-radius:6px;margin-bottom:12px}
.summary-cards{display:flex;flex-direction:row;flex-wrap:nowrap;justify-content:space-between;gap:16px;width:100%}
.summary-card{flex:1 1 0;min-width:0;background:#fff;border-radius:8px;padding:16px;text-align:center}
.table{width:100%;border-collapse:collapse;background:#fff;margin-bottom:24px}
.table th,.table td{padding:8px;border-bottom:1px solid #dee2e6;text-align:left}
.text-success{color:#198754}.text-danger{color:#dc3545}.text-warning{color:#b58105}
.text-info{color:#0aa2c0}.text-muted{color:#6c757d}.text-center{text-align:center}
.badge{display:inline-block;padding:2px 8px;border-radius:10px;background:#212529;color:#fff}
.raw-output{background:#212529;color:#e9ecef;padding:12px;overflow-x:auto}
</style>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"GPU" & 'x'</b>"#),
            "&lt;b&gt;&quot;GPU&quot; &amp; &#39;x&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("93°C"), "93°C");
    }

    #[test]
    fn test_document_without_results() {
        let controls = PageControls::default();
        let html = render_document(&controls, None, Instant::now());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Run Analysis</button>"));
        assert!(!html.contains("resultsSection"));
        assert!(html.contains("id=\"loadingSpinner\" style=\"display: none\""));
    }

    #[test]
    fn test_document_shows_banner_and_disabled_button() {
        let now = Instant::now();
        let mut controls = PageControls::default();
        controls.loading = true;
        controls.submit.disabled = true;
        controls.submit.label = "Running...".into();
        controls.raise_error("<Invalid site>", now);
        let html = render_document(&controls, None, now);
        assert!(html.contains("&lt;Invalid site&gt;"));
        assert!(html.contains("<button type=\"submit\" disabled>Running...</button>"));
        assert!(html.contains("style=\"display: block\">Running analysis"));
    }
}
