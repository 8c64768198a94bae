use crate::{
    app::ui::{control, rows, state::Paging, StateRenderer},
    client::Client,
    input::key::Key,
    pager::{DomainError, Moved, Navigate, Navigator},
    Mode,
};
use ratatui::{style::*, text::*, widgets::*};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::{spawn, task::JoinHandle};

/// Loads the whole document and moves through it locally.
pub struct Browse {
    _loader: JoinHandle<()>,
    ctx: Context,
}

#[derive(Debug)]
pub enum Data {
    Loading,
    Items(Vec<Value>, TableState),
    Error(anyhow::Error),
}

#[derive(Debug)]
pub struct View {
    pub mode: Mode,
    pub navigator: Navigator,
    pub page_length: usize,
    pub data: Data,
}

#[derive(Clone)]
struct Context {
    view: Arc<Mutex<View>>,
}

fn navigator(mode: Mode) -> Navigator {
    match mode {
        Mode::Random => Navigator::random_access(),
        Mode::Sequential => Navigator::sequential_access(),
    }
}

impl Browse {
    pub fn new(client: Client, mode: Mode, page_length: usize) -> Self {
        let ctx = Context {
            view: Arc::new(Mutex::new(View {
                mode,
                navigator: navigator(mode),
                page_length,
                data: Data::Loading,
            })),
        };

        let loader = {
            let ctx = ctx.clone();
            spawn(async move {
                let result = client.load_all().await;
                ctx.loaded(result.map(rows::rows_of).map_err(Into::into));
            })
        };

        Self {
            _loader: loader,
            ctx,
        }
    }

    pub fn render<R: StateRenderer>(&self, r: R) {
        self.ctx.render(r);
    }

    pub async fn on_key(&self, key: Key) {
        self.ctx.on_key(key);
    }
}

impl Context {
    fn lock(&self) -> MutexGuard<'_, View> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn loaded(&self, result: anyhow::Result<Vec<Value>>) {
        let mut view = self.lock();
        match result {
            Ok(items) => {
                log::info!("Loaded {} items", items.len());
                let page_length = view.page_length;
                if let Err(err) = view.navigator.bind(items.len(), page_length) {
                    view.data = Data::Error(err.into());
                    return;
                }
                view.data = Data::Items(items, TableState::default());
            }
            Err(err) => {
                log::warn!("Failed to load document: {err}");
                view.data = Data::Error(err);
            }
        }
    }

    fn on_key(&self, key: Key) {
        let mut view = self.lock();
        let View {
            mode,
            navigator: nav,
            page_length,
            data,
        } = &mut *view;

        let Data::Items(items, state) = data else {
            return;
        };

        if key == Key::Char('m') {
            *mode = mode.toggle();
            *nav = navigator(*mode);
            if let Err(err) = nav.bind(items.len(), *page_length) {
                log::warn!("Failed to switch to {mode:?}: {err}");
            }
            return;
        }

        match key {
            Key::Up => return state.prev(shown(nav, items.len())),
            Key::Down => return state.next(shown(nav, items.len())),
            _ => {}
        }

        if !nav.is_paginable() {
            return;
        }

        let moved: Option<Result<Moved, DomainError>> = match (key, &mut *nav) {
            (Key::Left, nav) => Some(nav.prev()),
            (Key::Right, nav) => Some(nav.next()),
            (Key::PageUp, Navigator::SequentialAccess(nav)) => Some(nav.rewind()),
            (Key::PageDown, Navigator::SequentialAccess(nav)) => Some(nav.fast_forward()),
            (Key::Home, Navigator::RandomAccess(nav)) => Some(nav.go_to(1)),
            (Key::End, Navigator::RandomAccess(nav)) => Some(nav.go_to(nav.pages().len())),
            _ => None,
        };

        match moved {
            Some(Ok(_)) => state.select(Some(0)),
            Some(Err(err)) => log::warn!("Cannot move: {err}"),
            None => {}
        }
    }

    fn render<R: StateRenderer>(&self, mut r: R) {
        let mut view = self.lock();
        let (controls_area, table_area) = r.split_controls();

        let View {
            mode,
            navigator: nav,
            data,
            ..
        } = &mut *view;

        match data {
            Data::Loading => {
                r.render_child(rows::render_table(&[], String::from("Loading")), table_area);
            }
            Data::Items(items, state) => {
                r.render_child(Paragraph::new(controls(nav, items.len())), controls_area);

                let shown: Vec<&Value> = match nav {
                    Navigator::RandomAccess(nav) => items[nav.items()].iter().collect(),
                    Navigator::SequentialAccess(nav) => {
                        nav.items().filter_map(|i| items.get(i)).collect()
                    }
                };
                let title = format!("{mode:?} access, {} items", items.len());
                r.render_child_stateful(rows::render_table(&shown, title), state, table_area);
            }
            Data::Error(err) => {
                let w = Paragraph::new(err.to_string())
                    .style(Style::default().bg(Color::Rgb(128, 0, 0)))
                    .block(
                        Block::default()
                            .title(Span::styled(
                                "Error",
                                Style::default().add_modifier(Modifier::BOLD),
                            ))
                            .borders(Borders::ALL),
                    );
                r.render_child(w, table_area);
            }
        }
    }
}

/// Number of rows currently on screen.
fn shown(nav: &Navigator, total: usize) -> usize {
    match nav {
        Navigator::RandomAccess(nav) => nav.items().len(),
        Navigator::SequentialAccess(nav) => nav.items().count().min(total),
    }
}

/// Navigation controls, or a note when everything fits on one page.
fn controls<'a>(nav: &Navigator, total: usize) -> Line<'a> {
    if !nav.is_paginable() {
        return Line::from(format!(" All {total} items fit on one page"));
    }

    match nav {
        Navigator::RandomAccess(nav) => {
            let mut spans = vec![control(" \u{2190} ", true)];
            spans.extend(nav.pages().iter().map(|&page| {
                if page == nav.current_page() {
                    Span::styled(
                        format!("[{page}]"),
                        Style::default().add_modifier(Modifier::REVERSED),
                    )
                } else {
                    Span::raw(format!(" {page} "))
                }
            }));
            spans.push(control(" \u{2192} ", true));
            Line::from(spans)
        }
        Navigator::SequentialAccess(nav) => Line::from(vec![
            control(" \u{00ab} ", true),
            control(" \u{2190} ", true),
            Span::raw(format!(" item {} of {total} ", nav.current_item() + 1)),
            control(" \u{2192} ", true),
            control(" \u{00bb} ", true),
        ]),
    }
}

#[cfg(test)]
impl Browse {
    pub(crate) fn view(&self) -> MutexGuard<'_, View> {
        self.ctx.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Args;
    use clap::Parser;
    use std::{io::Write, time::Duration};

    async fn loaded(
        mode: Mode,
        items: usize,
        page_length: usize,
    ) -> (Browse, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let values: Vec<usize> = (0..items).collect();
        write!(file, "{}", serde_json::to_string(&values).unwrap()).unwrap();

        let path = file.path().to_str().unwrap();
        let client = Client::new(Args::parse_from(["pagewise", path]));
        let browse = Browse::new(client, mode, page_length);

        for _ in 0..400 {
            if !matches!(browse.view().data, Data::Loading) {
                return (browse, file);
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("document did not load");
    }

    #[tokio::test]
    async fn random_access_wraps_pages() {
        let (browse, _file) = loaded(Mode::Random, 25, 10).await;

        browse.on_key(Key::Left).await;
        assert_eq!(browse.view().navigator.position(), Moved::Page(3));

        browse.on_key(Key::Home).await;
        assert_eq!(browse.view().navigator.position(), Moved::Page(1));
    }

    #[tokio::test]
    async fn sequential_access_strides() {
        let (browse, _file) = loaded(Mode::Sequential, 25, 10).await;

        browse.on_key(Key::PageDown).await;
        browse.on_key(Key::Right).await;
        assert_eq!(browse.view().navigator.position(), Moved::Item(11));

        browse.on_key(Key::PageUp).await;
        browse.on_key(Key::PageUp).await;
        assert_eq!(browse.view().navigator.position(), Moved::Item(16));
    }

    #[tokio::test]
    async fn single_page_does_not_move() {
        let (browse, _file) = loaded(Mode::Random, 4, 10).await;

        browse.on_key(Key::Right).await;
        let view = browse.view();
        assert!(!view.navigator.is_paginable());
        assert_eq!(view.navigator.position(), Moved::Page(1));
    }

    #[tokio::test]
    async fn toggling_mode_rebinds() {
        let (browse, _file) = loaded(Mode::Random, 25, 10).await;

        browse.on_key(Key::Char('m')).await;
        let view = browse.view();
        assert_eq!(view.mode, Mode::Sequential);
        assert!(view.navigator.is_paginable());
        assert_eq!(view.navigator.position(), Moved::Item(0));
    }
}
