//! Rendering of the lookup field.
//!
//! Layout, top to bottom: the titled input box, the inline validation error,
//! the option list (only while the popup is visible), the toast line and a
//! key hint bar. All visibility decisions come from the lookup state's derived
//! predicates; nothing here stores view state between frames.

use lookup_engine::{LookupState, OptionRow};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::ui::theme::{Theme, theme_helpers as th};

static FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const HINTS: &str = "↑/↓ move · Enter select · Esc clear · Tab focus · Ctrl+C quit";

/// Draw the whole lookup screen into `area`.
pub fn draw(frame: &mut Frame, area: Rect, app: &App, theme: &dyn Theme) {
    let state = app.controller.state();
    frame.render_widget(Block::default().style(Style::default().bg(theme.roles().background)), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_input(frame, layout[0], state, app.throbber_idx, theme);

    if let Some(error) = state.error() {
        frame.render_widget(Paragraph::new(Span::styled(error.message.clone(), theme.status_error())), layout[1]);
    }

    if state.show_listbox() {
        render_options(frame, layout[2], state, theme);
    }

    if let Some(notification) = app.toast() {
        let line = Line::from(vec![
            Span::styled(format!("[{}] ", notification.title), theme.notification_style(notification.variant).add_modifier(Modifier::BOLD)),
            Span::styled(notification.message.clone(), theme.notification_style(notification.variant)),
        ]);
        frame.render_widget(Paragraph::new(line), layout[3]);
    } else if let Some(selected) = app.last_selected() {
        let line = Line::from(vec![
            Span::styled("Selected ", theme.text_muted_style()),
            Span::styled(selected.to_string(), theme.accent_emphasis_style()),
        ]);
        frame.render_widget(Paragraph::new(line), layout[3]);
    }

    frame.render_widget(Paragraph::new(Span::styled(HINTS, theme.text_muted_style())), layout[4]);
}

fn field_title(state: &LookupState) -> String {
    let config = state.config();
    let mut title = match config.icon_name.as_deref() {
        Some(icon) if !icon.is_empty() => format!("{} · {}", icon, config.field_label),
        _ => config.field_label.clone(),
    };
    if config.required {
        title.push_str(" *");
    }
    title
}

/// Build the single line shown inside the input box.
fn input_line<'a>(state: &'a LookupState, throbber_idx: usize, theme: &dyn Theme) -> Line<'a> {
    let mut spans: Vec<Span<'a>> = Vec::new();
    if state.input().is_empty() {
        let placeholder = state.config().placeholder.clone().unwrap_or_else(|| "Search...".into());
        spans.push(Span::styled(placeholder, theme.text_muted_style()));
    } else if state.selected_record().is_some() {
        spans.push(Span::styled(state.input(), theme.accent_emphasis_style()));
    } else {
        spans.push(Span::styled(state.input(), theme.text_primary_style()));
    }

    if state.is_loading() {
        let symbol = FRAMES[throbber_idx % FRAMES.len()];
        spans.push(Span::styled(format!(" {symbol}"), theme.accent_emphasis_style()));
    }
    if state.show_clear() && !state.config().read_only {
        spans.push(Span::styled("  [Esc clear]", theme.text_muted_style()));
    }
    Line::from(spans)
}

fn render_input(frame: &mut Frame, area: Rect, state: &LookupState, throbber_idx: usize, theme: &dyn Theme) {
    let block = th::block(theme, Some(Span::raw(field_title(state))), state.is_focused());
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(input_line(state, throbber_idx, theme)).block(block), area);

    if state.is_focused() && !state.is_read_only() {
        let offset = u16::try_from(state.input().width()).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

fn option_item<'a>(row: OptionRow<'a>, icon: Option<&str>, theme: &dyn Theme) -> ListItem<'a> {
    let mut spans = Vec::with_capacity(4);
    if let Some(icon) = icon {
        spans.push(Span::styled(format!("{icon} "), theme.text_muted_style()));
    }
    spans.push(Span::styled(row.label(), theme.text_primary_style()));
    let sub_label = row.sub_label();
    if !sub_label.is_empty() {
        spans.push(Span::styled(format!("  {sub_label}"), theme.text_muted_style()));
    }
    let item = ListItem::new(Line::from(spans));
    if row.is_active() { item.style(theme.selection_style()) } else { item }
}

fn render_options(frame: &mut Frame, area: Rect, state: &LookupState, theme: &dyn Theme) {
    let list = state.option_list();
    let icon = state.config().icon_name.as_deref().filter(|icon| !icon.is_empty());
    let items: Vec<ListItem> = list.rows().map(|row| option_item(row, icon, theme)).collect();
    let title = format!("{} results", list.len());
    let widget = List::new(items).block(th::block(theme, Some(Span::raw(title)), false));

    let mut list_state = ListState::default();
    list_state.select(list.active_index());
    frame.render_stateful_widget(widget, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::NordTheme;
    use lookup_engine::{LookupController, LookupKey, LookupSettings, StaticSearchService};
    use lookup_types::{FieldConfig, decode_candidates};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    async fn mounted_app(config: FieldConfig) -> App {
        let records = decode_candidates(r#"[{"Id":"a1","Name":"Acme","Industry":"Energy"},{"Id":"b2","Name":"Globex","Industry":"Retail"}]"#)
            .expect("records");
        let (events, _receiver) = mpsc::unbounded_channel();
        let mut controller =
            LookupController::new(config, LookupSettings::default(), Arc::new(StaticSearchService::new(records)), events);
        controller.focus();
        controller.mount();
        let msg = controller.next_message().await.expect("recent response");
        controller.process_message(msg);
        App::new(controller)
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 14)).expect("terminal");
        let theme = NordTheme::default();
        terminal.draw(|frame| draw(frame, frame.area(), app, &theme)).expect("draw");
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn config() -> FieldConfig {
        FieldConfig {
            sobject_name: "Account".into(),
            field_label: "Account".into(),
            subtitle: "Industry".into(),
            required: true,
            ..FieldConfig::default()
        }
    }

    #[tokio::test]
    async fn renders_options_with_sub_labels() {
        let app = mounted_app(config()).await;
        let text = screen(&app);
        assert!(text.contains("Account *"), "{text}");
        assert!(text.contains("Acme  Energy"), "{text}");
        assert!(text.contains("Globex  Retail"), "{text}");
        assert!(text.contains("2 results"), "{text}");
    }

    #[tokio::test]
    async fn selection_hides_the_option_list() {
        let mut app = mounted_app(config()).await;
        app.controller.handle_key(LookupKey::ArrowDown);
        app.controller.handle_key(LookupKey::Enter);
        let text = screen(&app);
        assert!(text.contains("Acme"), "{text}");
        assert!(!text.contains("Globex"), "{text}");
        assert!(!text.contains("results"), "{text}");
    }

    #[tokio::test]
    async fn renders_min_length_error() {
        let mut app = mounted_app(config()).await;
        app.controller.handle_key(LookupKey::Char('a'));
        let text = screen(&app);
        assert!(text.contains("Minimum 3 characters"), "{text}");
    }
}
