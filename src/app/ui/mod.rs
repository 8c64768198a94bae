pub mod help;
pub mod rows;
pub mod state;

use crate::app::ui::help::draw_help;
use crate::app::App;
use crate::pager::Controls;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Widget},
    Frame,
};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

pub trait StateRenderer {
    fn rect(&self) -> Rect;

    fn render_child<W: Widget>(&mut self, w: W, rect: Rect);
    fn render_child_stateful<W: StatefulWidget>(&mut self, w: W, state: &mut W::State, rect: Rect);

    fn render<W: Widget>(&mut self, w: W) {
        self.render_child(w, self.rect());
    }

    fn render_stateful<W: StatefulWidget>(&mut self, w: W, state: &mut W::State) {
        self.render_child_stateful(w, state, self.rect());
    }

    /// Split off a line at the top for controls, returning the rest.
    fn split_controls(&self) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(self.rect());
        (chunks[0], chunks[1])
    }
}

impl<'c, 'f> StateRenderer for RenderContext<'c, 'f> {
    #[inline]
    fn rect(&self) -> Rect {
        self.rect
    }

    fn render_child<W: Widget>(&mut self, w: W, rect: Rect) {
        self.frame.render_widget(w, rect);
    }

    fn render_child_stateful<W: StatefulWidget>(&mut self, w: W, state: &mut W::State, rect: Rect) {
        self.frame.render_stateful_widget(w, rect, state);
    }
}

struct RenderContext<'c, 'f> {
    frame: &'c mut Frame<'f>,
    rect: Rect,
}

/// A control label, dimmed while disabled.
pub fn control<'a>(label: impl Into<String>, enabled: bool) -> Span<'a> {
    let style = if enabled {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(label.into(), style)
}

/// The "← [ page ] →" line of a pager.
pub fn controls_line<'a>(controls: Controls, page: &str, suffix: String) -> Line<'a> {
    Line::from(vec![
        control(" \u{2190} ", controls.prev),
        control(format!("[ {page:>4} ]"), controls.page),
        control(" \u{2192} ", controls.next),
        Span::raw(suffix),
    ])
}

pub fn draw(frame: &mut Frame, app: &App) {
    if app.global().help {
        draw_help(frame)
    } else {
        draw_default(frame, app)
    }
}

pub fn draw_default(frame: &mut Frame, app: &App) {
    let size = frame.size();

    let logs = app.global().logs;
    let mut constraints = vec![Constraint::Length(3), Constraint::Percentage(60)];

    if logs {
        constraints.push(Constraint::Percentage(40));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    let title = draw_title(app);
    frame.render_widget(title, chunks[0]);

    app.state().render(RenderContext {
        frame: &mut *frame,
        rect: chunks[1],
    });

    if logs {
        let logs = draw_logs();
        frame.render_widget(logs, chunks[2]);
    }
}

fn draw_title<'a>(app: &App) -> Paragraph<'a> {
    Paragraph::new(format!(
        "Pagewise ({}) - {}",
        app.client().source().display(),
        app.state().name()
    ))
    .style(Style::default().fg(Color::White))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White))
            .border_type(BorderType::Plain),
    )
}

fn draw_logs<'a>() -> TuiLoggerWidget<'a> {
    TuiLoggerWidget::default()
        .output_timestamp(Some("%H:%M:%S%.3f".into()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .style_error(Style::default().fg(Color::Red))
        .style_debug(Style::default().fg(Color::Green))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_trace(Style::default().fg(Color::Gray))
        .style_info(Style::default().fg(Color::Blue))
        .block(
            Block::default()
                .title("Logs")
                .border_style(Style::default().fg(Color::White).bg(Color::Black))
                .borders(Borders::ALL),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
}
