use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::App;
use crate::core::navigation::Route;
use crate::core::quotes::FALLBACK_QUOTE;
use crate::core::toolbar::toolbar_for;
use crate::shell::ShellState;
use crate::shell::component::Component;
use crate::shell::components::recents_list::RecentsList;
use crate::shell::components::{TitleBar, Toolbar};

pub fn draw_ui(frame: &mut Frame, app: &App, shell: &mut ShellState) {
    use Constraint::{Length, Min};
    let store = app.store();
    let route = app.current_route();
    let settings = app.settings();

    let document_name = shell.document_name(app);
    let mut toolbar = Toolbar {
        kind: if store.hide_toolbar { None } else { toolbar_for(route) },
        reader: store.reader(),
        document_name: document_name.as_deref(),
        floating: settings.floating_toolbars,
    };
    let toolbar_height = if toolbar.text().is_some() { 1 } else { 0 };

    let layout = Layout::vertical([Length(1), Length(toolbar_height), Min(0)]);
    let [title_area, toolbar_area, main_area] = layout.areas(frame.area());

    TitleBar {
        route,
        direction: store.transition_direction(),
        status_message: &shell.status_message,
    }
    .render(frame, title_area);
    toolbar.render(frame, toolbar_area);

    match route {
        Route::Home => draw_home(frame, main_area, shell.recents.entries.len()),
        Route::Recents => RecentsList::new(&mut shell.recents).render(frame, main_area),
        Route::Viewer => {
            let quote = shell.loading_quote.as_deref().unwrap_or(FALLBACK_QUOTE);
            draw_viewer(frame, main_area, app, document_name.as_deref(), quote)
        }
        Route::Settings => draw_settings(frame, main_area, app),
    }

    if let Some(prompt) = shell.prompt.as_mut() {
        prompt.render(frame, main_area);
    }
}

fn screen_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .padding(Padding::horizontal(1))
}

fn draw_home(frame: &mut Frame, area: Rect, recent_count: usize) {
    let lines = vec![
        Line::from(Span::styled(
            "A quiet place to read.",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from("o  Open a file"),
        Line::from(format!("r  Recent files ({recent_count})")),
        Line::from("s  Settings"),
        Line::from("Esc  Back / quit"),
    ];
    let home = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(screen_block(" Home "));
    frame.render_widget(home, area);
}

fn draw_viewer(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    document_name: Option<&str>,
    loading_quote: &str,
) {
    let store = app.store();
    let reader = store.reader();
    let Some(name) = document_name else {
        let empty = Paragraph::new("No document open. Press o to open one.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(screen_block(" Viewer "));
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(name.to_string(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!(
            "Page {}   Zoom {:.0}%",
            reader.page_label(),
            reader.scale * 100.0
        )),
    ];
    if let Some(path) = &store.selected_file_path {
        lines.push(Line::styled(path.clone(), Style::default().fg(Color::DarkGray)));
    }
    if reader.is_loading {
        lines.push(Line::default());
        lines.push(Line::styled(
            loading_quote.to_string(),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }
    if let Some(text) = &reader.selected_text {
        lines.push(Line::default());
        lines.push(Line::from(format!("Selected: \u{201c}{text}\u{201d}")));
    }
    lines.push(Line::default());
    lines.push(Line::styled(
        "←/→ Page  +/- Zoom  0 Reset  t Toolbar  m Menu",
        Style::default().fg(Color::DarkGray),
    ));

    let viewer = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(screen_block(" Viewer "));
    frame.render_widget(viewer, area);
}

fn draw_settings(frame: &mut Frame, area: Rect, app: &App) {
    let settings = app.settings();
    let on_off = |value: bool| if value { "on" } else { "off" };
    let lines = vec![
        Line::from(format!("Default zoom          {:.0}%   (+ / -)", settings.default_zoom * 100.0)),
        Line::from(format!(
            "Invert PDF in dark    {}    (i)",
            on_off(settings.invert_pdf_in_dark_mode)
        )),
        Line::from(format!(
            "Floating toolbars     {}    (f)",
            on_off(settings.floating_toolbars)
        )),
        Line::default(),
        Line::styled("Changes are saved immediately.", Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(lines).block(screen_block(" Settings ")), area);
}
