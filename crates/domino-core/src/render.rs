use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use unicode_width::UnicodeWidthStr;

use crate::config::{Config, OutputFormat};
use crate::modal::FocusMove;
use crate::session::PageView;
use crate::view::SegmentDisplay;

#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config, format: OutputFormat) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self {
            format,
            color: color && io::stdout().is_terminal(),
        })
    }

    #[tracing::instrument(skip(self, writer, page))]
    pub fn write_page<W: Write>(&self, mut writer: W, page: &PageView) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, page)?;
                writeln!(writer)?;
            }
            OutputFormat::Text => self.write_text(&mut writer, page)?,
        }
        Ok(())
    }

    fn write_text<W: Write>(&self, writer: &mut W, page: &PageView) -> anyhow::Result<()> {
        let desktop = &page.desktop.display;
        let mobile = &page.mobile;
        let affordance = &page.affordance;

        self.section(
            writer,
            "Page",
            vec![
                row("reference", &page.reference_date),
                row("revision", &page.revision.to_string()),
                row("filters", yes_no(page.has_any_filter)),
                row("tab", &page.nav.to_string()),
                row("feed", &page.feed),
                row("modal", page.modal.as_deref().unwrap_or("-")),
                row("focus", &focus_text(&page.focus)),
                row("clock", &format!("{}ms", page.clock_ms)),
            ],
        )?;

        let open_desktop = page.desktop.open_panel.map(|panel| panel.to_string());
        self.section(
            writer,
            "Desktop",
            vec![
                self.segment_row("where", &desktop.location),
                self.segment_row("when", &desktop.timeframe),
                self.segment_row("activity", &desktop.activity),
                self.segment_row("who", &desktop.group_size),
                row("minus", if desktop.minus_disabled { "disabled" } else { "enabled" }),
                row("panel", open_desktop.as_deref().unwrap_or("-")),
            ],
        )?;

        let open_mobile = mobile.open_panel.map(|panel| panel.to_string());
        self.section(
            writer,
            "Mobile",
            vec![
                row("overlay", if mobile.overlay_open { "open" } else { "closed" }),
                row("where", &mobile.summaries.location),
                row("when", &mobile.summaries.timeframe),
                row("activity", &mobile.summaries.activity),
                row("panel", open_mobile.as_deref().unwrap_or("-")),
                row("button", &applied_text(page)),
            ],
        )?;

        self.section(
            writer,
            "Affordance",
            vec![
                row("label", affordance.label),
                row("icon", affordance.icon),
                row("button", yes_no(affordance.button_visible)),
                row("action row", yes_no(affordance.action_row_visible)),
                row("bookmark", yes_no(affordance.mobile_bookmark_visible)),
                row("custom notice", yes_no(affordance.custom_filter_notice_visible)),
                row("header", affordance.active_feed_header.as_deref().unwrap_or("-")),
                row("view feed", yes_no(affordance.view_feed_visible)),
            ],
        )?;

        self.section(
            writer,
            "Share",
            vec![
                row("link", if page.share.link.is_empty() { "-" } else { page.share.link.as_str() }),
                row("message", if page.share.message_expanded { "expanded" } else { "collapsed" }),
                row("copy link", &page.share.link_button),
                row("copy message", &page.share.message_button),
            ],
        )?;

        let saved = page.saved_feeds.join(", ");
        self.section(
            writer,
            "Feed name",
            vec![
                row("value", &page.feed_form.value),
                row("count", &page.feed_form.char_count),
                row("save", if page.feed_form.save_enabled { "enabled" } else { "disabled" }),
                row("saved", if saved.is_empty() { "-" } else { saved.as_str() }),
            ],
        )?;

        Ok(())
    }

    fn section<W: Write>(&self, writer: &mut W, title: &str, rows: Vec<Vec<String>>) -> anyhow::Result<()> {
        writeln!(writer, "{}", self.paint(title, "1"))?;
        write_table(&mut *writer, vec!["Field".to_string(), "Value".to_string()], rows)?;
        writeln!(writer)?;
        Ok(())
    }

    fn segment_row(&self, name: &str, segment: &SegmentDisplay) -> Vec<String> {
        let value = if segment.has_value {
            self.paint(&segment.input, "33")
        } else {
            segment.summary.clone()
        };
        vec![name.to_string(), value]
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn row(field: &str, value: &str) -> Vec<String> {
    vec![field.to_string(), value.to_string()]
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "shown" } else { "hidden" }
}

fn focus_text(focus: &FocusMove) -> String {
    match focus {
        FocusMove::Control(id) => id.clone(),
        FocusMove::Content(id) => format!("{id} (content)"),
        FocusMove::Unchanged => "-".to_string(),
    }
}

/// The mobile search button: "Brooklyn · Hiking" over "Today · 3".
fn applied_text(page: &PageView) -> String {
    let applied = &page.mobile.applied;
    if !applied.filters_applied {
        return "-".to_string();
    }
    let top = [applied.location.as_str(), applied.activity.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    let bottom = [applied.timeframe.as_str(), applied.group_size.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    match (top.is_empty(), bottom.is_empty()) {
        (false, false) => format!("{top} / {bottom}"),
        (false, true) => top,
        _ => bottom,
    }
}

fn write_table<W: Write>(mut writer: W, headers: Vec<String>, rows: Vec<Vec<String>>) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for (header, width) in headers.iter().zip(widths.iter().copied()) {
        write!(writer, "{header:width$} ")?;
    }
    writeln!(writer)?;

    for width in widths.iter().copied() {
        write!(writer, "{:-<width$} ", "")?;
    }
    writeln!(writer)?;

    for row in rows {
        for (cell, width) in row.iter().zip(&widths) {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = width.saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_by_display_width() {
        let mut out = Vec::new();
        write_table(
            &mut out,
            vec!["Field".into(), "Value".into()],
            vec![row("where", "Zürich"), row("when", "\x1b[33m東京\x1b[0m")],
        )
        .expect("write table");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Field Value  ");
        assert_eq!(lines[1], "----- ------ ");
        assert_eq!(lines[2], "where Zürich ");
        assert!(lines[3].starts_with("when  \x1b[33m東京\x1b[0m  "));
    }

    #[test]
    fn strips_escape_sequences() {
        assert_eq!(strip_ansi("\x1b[1mPage\x1b[0m"), "Page");
    }
}
