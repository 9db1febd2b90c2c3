//! Interactive data table: search box, sortable headers and pagination.
//!
//! All row work is done by [`derive_view`]; this component only owns the
//! [`ViewState`], maps keys to [`TableAction`]s and draws the result.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Span,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row as WidgetRow, Table},
};
use tracing::debug;

use super::{
    Component,
    button::Button,
    input::{InputComp, InputCompCtrlKeys, InputMode},
};
use crate::{
    actions::{Action, ActionSender, CompAction},
    app::layer_manager::EventHandlingStatus,
    config::TableConfig,
    libs::{
        dataset::Dataset,
        table::{
            Column, DEFAULT_ITEMS_PER_PAGE, DEFAULT_ITEMS_PER_PAGE_OPTIONS, Row, SortDirection,
            TableView, ViewState, derive_view,
        },
    },
    page::WidgetExt,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

#[derive(Clone, Debug, PartialEq)]
pub enum TableAction {
    ToggleSort(String),
    SetSearchQuery(String),
    SetItemsPerPage(usize),
    SetPage(usize),
}

pub struct TableComp {
    id: u64,
    title: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
    items_per_page_options: Vec<usize>,
    state: ViewState,

    search: InputComp,
    previous: Button,
    next: Button,

    tx: ActionSender,
}

impl TableComp {
    /// The table takes `id`; its search box takes `id + 1`.
    pub fn new(id: u64, tx: ActionSender, columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let search = InputComp::new(
            id + 1,
            None::<&str>,
            "Search",
            InputCompCtrlKeys::default().with_enter_keys(vec!['/'.into()]),
            tx.clone(),
        )
        .set_auto_submit(true)
        .with_mode(InputMode::Focused);

        Self {
            id,
            title: String::new(),
            columns,
            rows,
            items_per_page_options: DEFAULT_ITEMS_PER_PAGE_OPTIONS.to_vec(),
            state: ViewState::new(DEFAULT_ITEMS_PER_PAGE),
            search,
            previous: Button::new("Previous").hotkey('h'),
            next: Button::new("Next").hotkey('l'),
            tx,
        }
    }

    pub fn from_dataset(id: u64, tx: ActionSender, dataset: Dataset) -> Self {
        Self::new(id, tx, dataset.columns, dataset.rows)
    }

    pub fn title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = title.into();
        self
    }

    /// Page sizes cycled with `p`, and the one the table starts with.
    pub fn items_per_page(mut self, options: Vec<usize>, default: usize) -> Self {
        self.items_per_page_options = options;
        self.state = ViewState::new(default);
        self
    }

    pub fn with_config(self, config: &TableConfig) -> Self {
        self.items_per_page(
            config.items_per_page_options.clone(),
            config.default_items_per_page,
        )
    }

    /// Replace the rows, keeping search, sort and page as they are.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> TableView<'_> {
        derive_view(&self.columns, &self.rows, &self.state)
    }

    /// Highlight the search box when the table has focus.
    pub fn get_focus_action(&self, focused: bool) -> Action {
        self.search.get_switch_mode_action(if focused {
            InputMode::Focused
        } else {
            InputMode::Idle
        })
    }

    /// Whether the search box is taking keys.
    pub fn is_searching(&self) -> bool {
        *self.search.mode() == InputMode::Inputting
    }

    pub fn get_help_msg(&self) -> HelpMsg {
        let search = self.search.get_help_msg();
        if self.is_searching() {
            return search;
        }
        let mut msg = search;
        msg.push(HelpEntry::new_plain(
            format!("1-{}", self.columns.len().min(9)),
            "Sort",
        ));
        msg.push(HelpEntry::new_plain("h/l", "Page"));
        msg.push(HelpEntry::new('p', "Page size"));
        msg
    }

    fn get_action(&self, action: TableAction) -> Action {
        Action::Comp((CompAction::Table(action), self.id))
    }

    fn unwrap_action(&self, action: &Action) -> Option<TableAction> {
        match action {
            Action::Comp((CompAction::Table(action), id)) if *id == self.id => Some(action.clone()),
            _ => None,
        }
    }

    /// The option after the current page size, wrapping around.
    fn next_items_per_page(&self) -> Option<usize> {
        let options = &self.items_per_page_options;
        match options
            .iter()
            .position(|&n| n == self.state.items_per_page)
        {
            Some(i) => options.get((i + 1) % options.len()).copied(),
            None => options.first().copied(),
        }
    }

    fn key_action(&self, code: KeyCode) -> Option<TableAction> {
        let view = self.view();
        match code {
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).map(|d| d as usize)?.checked_sub(1)?;
                self.columns
                    .get(index)
                    .map(|column| TableAction::ToggleSort(column.accessor.clone()))
            }
            KeyCode::Left | KeyCode::Char('h') if !view.is_first_page() => {
                Some(TableAction::SetPage(view.current_page - 1))
            }
            KeyCode::Right | KeyCode::Char('l') if !view.is_last_page() => {
                Some(TableAction::SetPage(view.current_page + 1))
            }
            KeyCode::Char('p') => self.next_items_per_page().map(TableAction::SetItemsPerPage),
            _ => None,
        }
    }

    fn apply(&mut self, action: TableAction) {
        let state = std::mem::take(&mut self.state);
        self.state = match action {
            TableAction::ToggleSort(accessor) => state.toggle_sort(accessor),
            TableAction::SetSearchQuery(query) => state.set_search_query(query),
            TableAction::SetItemsPerPage(n) => state.set_items_per_page(n),
            TableAction::SetPage(page) => state.set_page(page),
        };
        debug!(
            "Table {} now at page {} ({} per page), sort {:?}, query {:?}",
            self.id,
            self.state.current_page,
            self.state.items_per_page,
            self.state.sort,
            self.state.search_query
        );
    }
}

impl Component for TableComp {
    fn get_id(&self) -> u64 {
        self.id
    }

    fn handle_events(&self, event: &Event) -> EventHandlingStatus {
        if self.search.handle_events(event) == EventHandlingStatus::Consumed {
            return EventHandlingStatus::Consumed;
        }
        let Event::Key(key) = event else {
            return EventHandlingStatus::ShouldPropagate;
        };
        if !(key.modifiers - KeyModifiers::SHIFT).is_empty() {
            return EventHandlingStatus::ShouldPropagate;
        }
        match self.key_action(key.code) {
            Some(action) => {
                self.tx.send(self.get_action(action));
                EventHandlingStatus::Consumed
            }
            None => EventHandlingStatus::ShouldPropagate,
        }
    }

    fn update(&mut self, action: &Action) {
        self.search.update(action);
        if let Some(query) = self.search.parse_submit_action(action) {
            self.apply(TableAction::SetSearchQuery(query));
        } else if let Some(action) = self.unwrap_action(action) {
            self.apply(action);
        }
    }
}

impl WidgetExt for TableComp {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [toolbar, body, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);
        let [page_size_area, search_area] =
            Layout::horizontal([Constraint::Length(26), Constraint::Fill(1)]).areas(toolbar);

        let page_size = Paragraph::new(format!("Items per page: {}", self.state.items_per_page))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("p"),
            );
        frame.render_widget(page_size, page_size_area);
        self.search.render(frame, search_area);

        let view = derive_view(&self.columns, &self.rows, &self.state);

        let header_style = Style::default().add_modifier(Modifier::BOLD);
        let headers = self.columns.iter().map(|column| {
            let indicator = match view.sort_direction_of(&column.accessor) {
                Some(SortDirection::Ascending) => " ▲",
                Some(SortDirection::Descending) => " ▼",
                None => "",
            };
            Cell::from(Span::styled(
                format!("{}{}", column.header, indicator),
                header_style,
            ))
        });
        let header = WidgetRow::new(headers).style(header_style).height(1);

        let rows = view.page_rows.iter().map(|row| {
            WidgetRow::new(
                self.columns
                    .iter()
                    .map(|column| Cell::from(row.display(&column.accessor))),
            )
        });
        let widths = vec![Constraint::Fill(1); self.columns.len()];

        let title = if self.title.is_empty() {
            format!("{} rows", view.filtered_count)
        } else {
            format!("{} ({} rows)", self.title, view.filtered_count)
        };
        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title),
        );
        frame.render_widget(table, body);

        let [previous_area, page_area, next_area] = Layout::horizontal([
            Constraint::Length(16),
            Constraint::Fill(1),
            Constraint::Length(16),
        ])
        .areas(footer);
        self.previous.set_disabled(view.is_first_page());
        self.next.set_disabled(view.is_last_page());
        self.previous.render(frame, previous_area);
        self.next.render(frame, next_area);

        let page = Paragraph::new(format!(
            "Page {} of {}",
            view.current_page, view.total_pages
        ))
        .alignment(Alignment::Center)
        .bold()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        frame.render_widget(page, page_area);
    }
}
