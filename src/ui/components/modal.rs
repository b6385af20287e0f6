//! Modal overlay renderer.
//!
//! Modals are drawn last, as a framed box centered over the table. Their
//! content is first laid out as styled lines ([`modal_lines`]) so the layout
//! can be checked without a terminal.

use crate::ui::helpers::{fit, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{AddKeywordsInfo, DetailsInfo, ModalInfo, PickerEntry, TagManagerInfo};

const MAX_MODAL_WIDTH: usize = 64;
const MAX_LISTED_KEYWORDS: usize = 8;

/// How a modal line is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Normal,
    Dim,
    Accent,
    Cursor,
}

/// One line of modal content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalLine {
    pub text: String,
    pub style: LineStyle,
}

impl ModalLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn blank() -> Self {
        Self::new("", LineStyle::Normal)
    }
}

/// Title and content lines for a modal.
#[must_use]
pub fn modal_lines(modal: &ModalInfo) -> (String, Vec<ModalLine>) {
    match modal {
        ModalInfo::ConfirmRemoval { message, keywords } => {
            let mut lines = vec![ModalLine::new(message.clone(), LineStyle::Normal), ModalLine::blank()];
            lines.extend(
                keywords
                    .iter()
                    .take(MAX_LISTED_KEYWORDS)
                    .map(|k| ModalLine::new(format!("• {k}"), LineStyle::Dim)),
            );
            if keywords.len() > MAX_LISTED_KEYWORDS {
                lines.push(ModalLine::new(
                    format!("…and {} more", keywords.len() - MAX_LISTED_KEYWORDS),
                    LineStyle::Dim,
                ));
            }
            lines.push(ModalLine::blank());
            lines.push(ModalLine::new("y: remove   n: cancel", LineStyle::Accent));
            ("Remove Keywords".to_string(), lines)
        }
        ModalInfo::Details(details) => (details.keyword.clone(), details_lines(details)),
        ModalInfo::TagManager(tags) => (format!("Tags · {}", tags.keyword), tag_lines(tags)),
        ModalInfo::FilterPicker { entries } => ("Filters".to_string(), picker_lines(entries)),
        ModalInfo::AddKeywords(add) => ("Add Keywords".to_string(), add_lines(add)),
    }
}

fn add_lines(add: &AddKeywordsInfo) -> Vec<ModalLine> {
    let (country_cursor, input_cursor) = if add.country_focused { ("▏", "") } else { ("", "▏") };

    let mut lines = vec![
        ModalLine::new(format!("Device   {}", add.device), LineStyle::Normal),
        ModalLine::new(
            format!("Country  {}{country_cursor}", add.country),
            if add.country_focused { LineStyle::Accent } else { LineStyle::Normal },
        ),
        ModalLine::blank(),
    ];
    lines.extend(add.lines.iter().map(|line| {
        if line.tracked {
            ModalLine::new(format!("  {} (already tracked)", line.text), LineStyle::Dim)
        } else {
            ModalLine::new(format!("  {}", line.text), LineStyle::Normal)
        }
    }));
    lines.push(ModalLine::new(
        format!("> {}{input_cursor}", add.input),
        if add.country_focused { LineStyle::Normal } else { LineStyle::Accent },
    ));
    lines
}

fn details_lines(details: &DetailsInfo) -> Vec<ModalLine> {
    let label_width = details
        .fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<ModalLine> = details
        .fields
        .iter()
        .map(|(label, value)| {
            ModalLine::new(format!("{}  {value}", fit(label, label_width)), LineStyle::Normal)
        })
        .collect();

    lines.push(ModalLine::blank());
    if details.history.is_empty() {
        lines.push(ModalLine::new("No ranking history yet", LineStyle::Dim));
    } else {
        lines.push(ModalLine::new("History", LineStyle::Accent));
        lines.extend(
            details
                .history
                .iter()
                .map(|(date, rank)| ModalLine::new(format!("{date}  {rank}"), LineStyle::Dim)),
        );
    }
    lines
}

fn tag_lines(tags: &TagManagerInfo) -> Vec<ModalLine> {
    let current = if tags.tags.is_empty() {
        "No tags".to_string()
    } else {
        tags.tags.join(", ")
    };

    let mut lines = vec![
        ModalLine::new(current, LineStyle::Normal),
        ModalLine::blank(),
        ModalLine::new(format!("> {}▏", tags.input), LineStyle::Accent),
    ];
    if !tags.suggestions.is_empty() {
        lines.push(ModalLine::blank());
        lines.extend(
            tags.suggestions
                .iter()
                .map(|s| ModalLine::new(format!("  {s}"), LineStyle::Dim)),
        );
    }
    lines
}

fn picker_lines(entries: &[PickerEntry]) -> Vec<ModalLine> {
    if entries.is_empty() {
        return vec![ModalLine::new("No tags or countries to filter by", LineStyle::Dim)];
    }
    entries
        .iter()
        .map(|entry| {
            let mark = if entry.active { "[x]" } else { "[ ]" };
            let style = if entry.is_cursor { LineStyle::Cursor } else { LineStyle::Normal };
            ModalLine::new(format!("{mark} {}", entry.label), style)
        })
        .collect()
}

/// Draws the modal centered in a `rows` x `cols` terminal.
///
/// Content that does not fit is cut at the bottom.
pub fn render_modal(modal: &ModalInfo, theme: &Theme, rows: usize, cols: usize) {
    let (title, lines) = modal_lines(modal);

    let width = cols.saturating_sub(4).min(MAX_MODAL_WIDTH);
    let inner = width.saturating_sub(4);
    if inner == 0 || rows < 4 {
        return;
    }

    let body = lines.len().min(rows.saturating_sub(4));
    let height = body + 2;
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(width) / 2 + 1;
    let border = Theme::fg(&theme.colors.border);

    let title = truncate(&format!(" {title} "), inner + 2);
    let rule = "─".repeat((inner + 2).saturating_sub(title.chars().count()));
    position_cursor(top, left);
    print!("{border}╭{}{title}{}{border}{rule}╮", Theme::bold(), Theme::reset());
    print!("{}", Theme::reset());

    for (offset, line) in lines.iter().take(body).enumerate() {
        let style = match line.style {
            LineStyle::Normal => Theme::fg(&theme.colors.text_normal),
            LineStyle::Dim => Theme::fg(&theme.colors.text_dim),
            LineStyle::Accent => Theme::fg(&theme.colors.toolbar_accent),
            LineStyle::Cursor => format!(
                "{}{}",
                Theme::fg(&theme.colors.cursor_fg),
                Theme::bg(&theme.colors.cursor_bg)
            ),
        };
        position_cursor(top + 1 + offset, left);
        print!("{border}│ {}", Theme::reset());
        print!("{style}{}{}", fit(&line.text, inner), Theme::reset());
        print!("{border} │{}", Theme::reset());
    }

    position_cursor(top + 1 + body, left);
    print!("{border}╰{}╯{}", "─".repeat(inner + 2), Theme::reset());
}
