//! Items screen — the inventory table with search, sort, paging, and
//! the add/edit form.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState,
};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crately_core::{Item, ItemForm, ListView, SortField, SortOrder};

use crate::action::{Action, Notification, PendingDelete};
use crate::component::Component;
use crate::theme;

/// What the keyboard is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    Browse,
    Search,
    Form,
}

/// The form field holding the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FormField {
    #[default]
    Name,
    Quantity,
    Price,
    Category,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Quantity,
            Self::Quantity => Self::Price,
            Self::Price => Self::Category,
            Self::Category => Self::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Name => Self::Category,
            Self::Quantity => Self::Name,
            Self::Price => Self::Quantity,
            Self::Category => Self::Price,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Quantity => "Quantity",
            Self::Price => "Price",
            Self::Category => "Category",
        }
    }
}

const FORM_FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::Quantity,
    FormField::Price,
    FormField::Category,
];

/// Map the sort hotkeys (column numbers) to their field.
fn sort_field_for(c: char) -> Option<SortField> {
    match c {
        '1' => Some(SortField::Id),
        '2' => Some(SortField::Name),
        '3' => Some(SortField::Quantity),
        '4' => Some(SortField::Price),
        '5' => Some(SortField::Category),
        _ => None,
    }
}

pub struct ItemsScreen {
    action_tx: Option<UnboundedSender<Action>>,
    view: ListView,
    table_state: TableState,
    mode: Mode,
    search_input: Input,
    active_field: FormField,
    name_input: Input,
    quantity_input: Input,
    price_input: Input,
    category_input: Input,
}

impl ItemsScreen {
    pub fn new() -> Self {
        Self {
            action_tx: None,
            view: ListView::new(),
            table_state: TableState::default().with_selected(0),
            mode: Mode::default(),
            search_input: Input::default(),
            active_field: FormField::default(),
            name_input: Input::default(),
            quantity_input: Input::default(),
            price_input: Input::default(),
            category_input: Input::default(),
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let page_len = self.view.visible_rows().len();
        let clamped = if page_len == 0 { 0 } else { idx.min(page_len - 1) };
        self.table_state.select(Some(clamped));
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let page_len = self.view.visible_rows().len();
        if page_len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.selected_index() as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, page_len as isize - 1);
        self.select(next as usize);
    }

    fn selected_item(&self) -> Option<Arc<Item>> {
        self.view.visible_rows().get(self.selected_index()).cloned()
    }

    fn open_create_form(&mut self) {
        self.clear_form_inputs();
        self.active_field = FormField::Name;
        self.mode = Mode::Form;
    }

    fn open_edit_form(&mut self, id: i64) {
        if let Some(item) = self.view.begin_edit(id) {
            let draft = ItemForm::from_item(&item);
            self.name_input = Input::new(draft.name);
            self.quantity_input = Input::new(draft.quantity);
            self.price_input = Input::new(draft.price);
            self.category_input = Input::new(draft.category);
            self.active_field = FormField::Name;
            self.mode = Mode::Form;
        }
    }

    fn close_form(&mut self) {
        self.clear_form_inputs();
        self.view.end_edit();
        self.mode = Mode::Browse;
    }

    fn clear_form_inputs(&mut self) {
        self.name_input.reset();
        self.quantity_input.reset();
        self.price_input.reset();
        self.category_input.reset();
    }

    fn form_draft(&self) -> ItemForm {
        ItemForm {
            name: self.name_input.value().to_owned(),
            quantity: self.quantity_input.value().to_owned(),
            price: self.price_input.value().to_owned(),
            category: self.category_input.value().to_owned(),
        }
    }

    fn active_input_mut(&mut self) -> &mut Input {
        match self.active_field {
            FormField::Name => &mut self.name_input,
            FormField::Quantity => &mut self.quantity_input,
            FormField::Price => &mut self.price_input,
            FormField::Category => &mut self.category_input,
        }
    }

    fn field_input(&self, field: FormField) -> &Input {
        match field {
            FormField::Name => &self.name_input,
            FormField::Quantity => &self.quantity_input,
            FormField::Price => &self.price_input,
            FormField::Category => &self.category_input,
        }
    }

    /// Validate the draft; on success emit the create or update action,
    /// on failure surface the first problem as an error toast. The draft
    /// stays as typed either way until the service confirms the write.
    fn submit_form(&self) -> Option<Action> {
        match self.form_draft().validate() {
            Ok(update) => Some(match self.view.editing() {
                Some(id) => Action::UpdateItem { id, update },
                None => Action::CreateItem(update),
            }),
            Err(e) => Some(Action::Notify(Notification::error(e.to_string()))),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.search_input.reset();
                self.view.set_search("");
                self.select(0);
                self.mode = Mode::Browse;
            }
            KeyCode::Enter => {
                self.mode = Mode::Browse;
            }
            _ => {
                if self
                    .search_input
                    .handle_event(&CrosstermEvent::Key(key))
                    .is_some()
                {
                    self.view.set_search(self.search_input.value());
                    self.select(0);
                }
            }
        }
        None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.close_form();
                None
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => {
                self.active_field = self.active_field.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active_field = self.active_field.prev();
                None
            }
            _ => {
                self.active_input_mut().handle_event(&CrosstermEvent::Key(key));
                None
            }
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') => {
                self.select(0);
                None
            }
            KeyCode::Char('G') => {
                let page_len = self.view.visible_rows().len();
                if page_len > 0 {
                    self.select(page_len - 1);
                }
                None
            }
            KeyCode::Char('n') | KeyCode::Right => {
                self.view.next_page();
                self.select(self.selected_index());
                None
            }
            KeyCode::Char('p') | KeyCode::Left => {
                self.view.prev_page();
                self.select(self.selected_index());
                None
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                None
            }
            KeyCode::Char('a') => {
                self.open_create_form();
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(item) = self.selected_item() {
                    self.open_edit_form(item.id);
                }
                None
            }
            KeyCode::Char('d') => self.selected_item().map(|item| {
                Action::RequestDelete(PendingDelete {
                    id: item.id,
                    name: item.name.clone(),
                })
            }),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char(c) => {
                if let Some(field) = sort_field_for(c) {
                    self.view.toggle_sort(field);
                    self.select(0);
                }
                None
            }
            _ => None,
        }
    }

    fn header_label(&self, field: SortField, label: &'static str) -> String {
        if self.view.sort_field() == field {
            let arrow = match self.view.sort_order() {
                SortOrder::Ascending => "↑",
                SortOrder::Descending => "↓",
            };
            format!("{label} {arrow}")
        } else {
            label.to_owned()
        }
    }

    fn render_search_line(&self, frame: &mut Frame, area: Rect) {
        let active = self.mode == Mode::Search;
        let label_style = if active {
            theme::field_active()
        } else {
            theme::key_hint()
        };
        let line = Line::from(vec![
            Span::styled(" / ", label_style),
            Span::styled(self.search_input.value().to_owned(), theme::table_row()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        if active {
            #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
            let cursor_x = area.x + 3 + self.search_input.visual_cursor() as u16;
            frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
        }
    }

    #[allow(clippy::as_conversions)]
    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(vec![
            Cell::from(self.header_label(SortField::Id, "ID")).style(theme::table_header()),
            Cell::from(self.header_label(SortField::Name, "Name")).style(theme::table_header()),
            Cell::from(self.header_label(SortField::Quantity, "Qty")).style(theme::table_header()),
            Cell::from(self.header_label(SortField::Price, "Price")).style(theme::table_header()),
            Cell::from(self.header_label(SortField::Category, "Category"))
                .style(theme::table_header()),
        ]);

        let rows: Vec<Row> = self
            .view
            .visible_rows()
            .iter()
            .map(|item| {
                Row::new(vec![
                    Cell::from(item.id.to_string()),
                    Cell::from(item.name.clone()),
                    Cell::from(item.quantity.to_string()),
                    Cell::from(format!("{:.2}", item.price)),
                    Cell::from(item.category.clone()),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(6),
            Constraint::Fill(2),
            Constraint::Length(7),
            Constraint::Length(10),
            Constraint::Fill(1),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected())
            .highlight_symbol("▸ ");

        let mut state = self.table_state.clone();
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let title = match self.view.editing() {
            Some(id) => format!(" Edit Item #{id} "),
            None => " Add Item ".to_owned(),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from("")];
        for field in FORM_FIELDS {
            let label_style = if field == self.active_field {
                theme::field_active()
            } else {
                theme::field_inactive()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", field.label()), label_style),
                Span::styled(
                    self.field_input(field).value().to_owned(),
                    theme::table_row(),
                ),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Enter ", theme::key_hint_key()),
            Span::styled("save  ", theme::key_hint()),
            Span::styled("Tab ", theme::key_hint_key()),
            Span::styled("next field  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]));
        frame.render_widget(Paragraph::new(lines), inner);

        // Cursor sits in the active field, after the label column.
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let cursor_x =
            inner.x + 12 + self.field_input(self.active_field).visual_cursor() as u16;
        let field_row = FORM_FIELDS
            .iter()
            .position(|f| *f == self.active_field)
            .unwrap_or(0);
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let cursor_y = inner.y + 1 + field_row as u16;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), cursor_y));
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let page_info = format!(
            " Page {} of {}",
            self.view.current_page(),
            self.view.page_count()
        );
        let hints = Line::from(vec![
            Span::styled(page_info, theme::key_hint()),
            Span::styled("   / ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("1-5 ", theme::key_hint_key()),
            Span::styled("sort  ", theme::key_hint()),
            Span::styled("n/p ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("add  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }
}

impl Component for ItemsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Search => self.handle_search_key(key),
            Mode::Form => self.handle_form_key(key),
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ItemsUpdated(items) => {
                self.view.set_snapshot(Arc::clone(items));
                self.select(self.selected_index());
            }
            Action::FormSaved => {
                if self.mode == Mode::Form {
                    self.close_form();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let shown = self.view.filtered_len();
        let total = self.view.snapshot().len();
        let title = format!(" Items ({shown}/{total}) ");
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.mode == Mode::Form {
                theme::border_default()
            } else {
                theme::border_focused()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // search line
            Constraint::Min(1),    // table or form
            Constraint::Length(1), // page + key hints
        ])
        .split(inner);

        self.render_search_line(frame, layout[0]);

        if self.mode == Mode::Form {
            self.render_form(frame, layout[1]);
        } else {
            self.render_table(frame, layout[1]);
        }

        self.render_footer(frame, layout[2]);
    }

    fn capturing_input(&self) -> bool {
        self.mode != Mode::Browse
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sort_hotkeys_cover_every_column() {
        assert_eq!(sort_field_for('1'), Some(SortField::Id));
        assert_eq!(sort_field_for('2'), Some(SortField::Name));
        assert_eq!(sort_field_for('3'), Some(SortField::Quantity));
        assert_eq!(sort_field_for('4'), Some(SortField::Price));
        assert_eq!(sort_field_for('5'), Some(SortField::Category));
        assert_eq!(sort_field_for('6'), None);
        assert_eq!(sort_field_for('q'), None);
    }

    #[test]
    fn field_cycle_wraps_both_directions() {
        let mut field = FormField::Name;
        for expected in [
            FormField::Quantity,
            FormField::Price,
            FormField::Category,
            FormField::Name,
        ] {
            field = field.next();
            assert_eq!(field, expected);
        }
        assert_eq!(FormField::Name.prev(), FormField::Category);
    }

    #[test]
    fn edit_form_is_seeded_from_the_item() {
        let mut screen = ItemsScreen::new();
        let item = Item {
            id: 7,
            name: "Pallet Jack".into(),
            quantity: 3,
            price: 249.5,
            category: "equipment".into(),
        };
        screen
            .view
            .set_snapshot(Arc::new(vec![Arc::new(item)]));

        screen.open_edit_form(7);

        assert_eq!(screen.mode, Mode::Form);
        assert_eq!(screen.view.editing(), Some(7));
        assert_eq!(screen.name_input.value(), "Pallet Jack");
        assert_eq!(screen.quantity_input.value(), "3");
        assert_eq!(screen.price_input.value(), "249.5");
        assert_eq!(screen.category_input.value(), "equipment");
    }

    #[test]
    fn submit_with_blank_field_keeps_the_form_open() {
        let mut screen = ItemsScreen::new();
        screen.open_create_form();
        screen.name_input = Input::new("Strap Kit".into());

        let action = screen.submit_form();

        assert!(matches!(action, Some(Action::Notify(_))));
        assert_eq!(screen.mode, Mode::Form);
        assert_eq!(screen.name_input.value(), "Strap Kit");
    }
}
