use crate::{
    app::ui::{controls_line, rows, state::Paging, StateRenderer},
    client::Client,
    input::key::Key,
    pager::{
        Applied, DomainError, FetchResult, PageCallbacks, PageRequest, PageState,
        PagedFetchController, PagerConfig, Ticket,
    },
};
use ratatui::{style::*, text::*, widgets::*};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};
use tokio::{
    spawn,
    sync::mpsc::{channel, Receiver, Sender},
    task::JoinHandle,
};

/// Fetches one page at a time from the client.
pub struct Remote {
    _runner: JoinHandle<()>,
    ctx: Context,
}

#[derive(Debug)]
pub enum Data {
    Loading,
    Rows(Vec<Value>, TableState),
    Error(anyhow::Error),
}

#[derive(Debug)]
pub struct View {
    pub pager: PageState,
    pub controller: PagedFetchController,
    pub data: Data,
    /// Page number as typed
    pub input: String,
}

#[derive(Clone)]
struct Context {
    view: Arc<Mutex<View>>,
    rejected: Arc<AtomicBool>,
    tx: Sender<Msg>,
}

struct Runner {
    rx: Receiver<Msg>,
    client: Client,
    ctx: Context,
}

#[derive(Debug)]
enum Msg {
    Fetch(Ticket, PageRequest),
}

impl Remote {
    pub fn new(client: Client, config: PagerConfig) -> Result<Self, DomainError> {
        let (tx, rx) = channel::<Msg>(10);

        let rejected = Arc::new(AtomicBool::new(false));
        let callbacks = {
            let valid = rejected.clone();
            let invalid = rejected.clone();
            PageCallbacks::new()
                .on_valid_page(move |_| valid.store(false, Ordering::Relaxed))
                .on_invalid_page(move |page| {
                    log::info!("Invalid page: {page:?}");
                    invalid.store(true, Ordering::Relaxed)
                })
        };

        let initial = (config.page != 1 || config.max.is_some()).then_some(config.page);
        let mut pager = PageState::new(config, callbacks)?;
        if let Some(page) = initial {
            // a rejected initial page falls back to the first one
            if !pager.set_page(Some(page)) {
                log::warn!("Starting from page 1 instead of {page}");
            }
        }
        let input = pager.page_number().map(|p| p.to_string()).unwrap_or_default();

        let ctx = Context {
            view: Arc::new(Mutex::new(View {
                pager,
                controller: PagedFetchController::new(),
                data: Data::Loading,
                input,
            })),
            rejected,
            tx,
        };

        ctx.submit(&mut ctx.lock());

        let runner = Runner {
            rx,
            client,
            ctx: ctx.clone(),
        };

        let runner = spawn(async move {
            runner.run().await;
        });

        Ok(Remote {
            _runner: runner,
            ctx,
        })
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

    fn on_key(&self, key: Key) {
        let mut view = self.lock();

        match key {
            Key::Up | Key::Down => {
                if let Data::Rows(rows, state) = &mut view.data {
                    match key {
                        Key::Up => state.prev(rows.len()),
                        _ => state.next(rows.len()),
                    }
                }
            }
            // no navigation while a page is on its way
            _ if view.controller.in_flight() => {
                log::debug!("Fetch in flight, ignoring {key}");
            }
            Key::Enter => self.submit_if_valid(&mut view),
            Key::Left => {
                if view.pager.prev_page() {
                    self.submit(&mut view);
                }
            }
            Key::Right => {
                if view.pager.next_page() {
                    self.submit(&mut view);
                }
            }
            Key::Char(c) if c.is_ascii_digit() => {
                view.input.push(c);
                Self::page_edited(&mut view);
            }
            Key::Backspace => {
                view.input.pop();
                Self::page_edited(&mut view);
            }
            Key::Char('+') => self.change_page_length(&mut view, 1),
            Key::Char('-') => self.change_page_length(&mut view, -1),
            _ => {}
        }
    }

    fn page_edited(view: &mut View) {
        let page = view.input.parse().ok();
        view.pager.set_page(page);
    }

    fn change_page_length(&self, view: &mut View, delta: isize) {
        let length = view.pager.page_length().saturating_add_signed(delta);
        match view.pager.set_page_length(length) {
            Ok(()) => {
                // a new page length starts over from the first page
                view.pager.reset_changed();
                self.submit(view);
            }
            Err(err) => log::warn!("Keeping page length {}: {err}", view.pager.page_length()),
        }
    }

    fn submit_if_valid(&self, view: &mut View) {
        let View {
            pager, controller, ..
        } = &mut *view;

        match pager.run_if_valid(|pager| controller.build_request(pager)) {
            Some((ticket, request)) => self.send(view, ticket, request),
            None => log::warn!("Not fetching invalid page {:?}", view.pager.page_number()),
        }
    }

    fn submit(&self, view: &mut View) {
        let (ticket, request) = view.controller.build_request(&mut view.pager);
        self.send(view, ticket, request);
    }

    fn send(&self, view: &mut View, ticket: Ticket, request: PageRequest) {
        view.input = request.page.to_string();
        if let Err(err) = self.tx.try_send(Msg::Fetch(ticket, request)) {
            log::warn!("Failed to queue request: {err}");
            view.controller.abandon(ticket);
        }
    }

    fn render<R: StateRenderer>(&self, mut r: R) {
        let mut view = self.lock();
        let (controls_area, table_area) = r.split_controls();

        let mut suffix = format!(
            " of {}  ({} per page)",
            view.pager
                .max()
                .map(|max| max.to_string())
                .unwrap_or_else(|| String::from("?")),
            view.pager.page_length()
        );
        if view.controller.in_flight() {
            suffix.push_str("  loading\u{2026}");
        }
        let mut line = controls_line(view.pager.controls(), &view.input, suffix);
        if self.rejected.load(Ordering::Relaxed) {
            line.spans.push(Span::styled(
                "  invalid page, <Enter> disabled",
                Style::default().fg(Color::Yellow),
            ));
        }
        r.render_child(Paragraph::new(line), controls_area);

        let title = format!("Page {}", view.input);
        match &mut view.data {
            Data::Loading => {
                r.render_child(rows::render_table(&[], title), table_area);
            }
            Data::Rows(items, state) => {
                let items: Vec<&Value> = items.iter().collect();
                if state.selected().is_none() && !items.is_empty() {
                    state.select(Some(0));
                }
                r.render_child_stateful(rows::render_table(&items, title), state, table_area);
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

impl Runner {
    async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                Msg::Fetch(ticket, request) => self.fetch(ticket, request).await,
            }
        }
    }

    async fn fetch(&self, ticket: Ticket, request: PageRequest) {
        let result = self.client.fetch(request).await;

        let mut view = self.ctx.lock();
        match result {
            Ok(data) => {
                let View {
                    pager, controller, ..
                } = &mut *view;

                let applied = controller.apply_result(pager, ticket, FetchResult::classify(&data));
                if let Applied::Boundary(_) = applied {
                    view.input = view
                        .pager
                        .page_number()
                        .map(|p| p.to_string())
                        .unwrap_or_default();
                    view.data = Data::Rows(rows::rows_of(data), TableState::default());
                }
            }
            Err(err) => {
                log::warn!("Failed to fetch page {}: {err}", request.page);
                // the state stays as it was, navigation can be retried
                view.controller.abandon(ticket);
                view.data = Data::Error(err.into());
            }
        }
    }
}

#[cfg(test)]
impl Remote {
    pub(crate) fn view(&self) -> MutexGuard<'_, View> {
        self.ctx.lock()
    }
}
