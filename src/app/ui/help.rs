use ratatui::{style::*, text::*, widgets::*, Frame};

const KEYS: &str = r#"
 Keys:
   <Esc>   Exit the current view (or the application)
   q, <Ctrl> + c   Exit the application

   h   View this help
   l   Toggle log view

   r   Fetch page by page
   b   Browse the whole document

   ## Fetch

   <Left>, <Right>   Previous / next page
   0-9, <Backspace>  Edit the page number
   <Enter>   Fetch the page number, if valid
   +, -      Change the page length
   <Up>, <Down>   Select a row

   ## Browse

   m   Toggle random / sequential access
   <Left>, <Right>   Previous / next page (random) or item (sequential)
   <PageUp>, <PageDown>   Rewind / fast forward by a page (sequential)
   <Home>, <End>   First / last page (random)
   <Up>, <Down>   Select a row
"#;

pub fn draw_help(frame: &mut Frame) {
    let mut text = Text::from("\n");
    text.lines.push(Line::from(vec![
        Span::styled(" Pagewise", Style::default().add_modifier(Modifier::BOLD)),
        Span::from(" - "),
        Span::styled(
            "keep your place in a paged collection",
            Style::default().add_modifier(Modifier::ITALIC),
        ),
    ]));
    text.lines.extend(Text::from(KEYS).lines);

    let help = Paragraph::new(text).block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, frame.size());
}
