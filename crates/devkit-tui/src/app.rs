use devkit_shortcuts::FocusTarget;
use ratatui::widgets::ListState;

use crate::clipboard::{
    Clipboard,
    SystemClipboard,
};
use crate::tools::{
    TOOLS,
    Tool,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
}

/// Requests sent from shortcut actions to the UI loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    FocusSearch,
    SelectNext,
    SelectPrevious,
    ToggleHelp,
    Escape,
    CopySelected,
    OpenSelected,
    Quit,
}

pub struct App {
    pub query: String,
    pub focus: Focus,
    pub list_state: ListState,
    pub show_help: bool,
    pub status: Option<String>,
    pub opened: Option<&'static Tool>,
    pub should_quit: bool,
    clipboard: Box<dyn Clipboard>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_clipboard(Box::new(SystemClipboard::default()))
    }

    pub fn with_clipboard(clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            query: String::new(),
            focus: Focus::List,
            list_state: ListState::default().with_selected(Some(0)),
            show_help: false,
            status: None,
            opened: None,
            should_quit: false,
            clipboard,
        }
    }

    pub fn filtered_tools(&self) -> Vec<&'static Tool> {
        TOOLS.iter().filter(|tool| tool.matches(&self.query)).collect()
    }

    pub fn selected_tool(&self) -> Option<&'static Tool> {
        let tools = self.filtered_tools();
        self.list_state
            .selected()
            .and_then(|index| tools.get(index).copied())
    }

    /// The element the shortcut dispatcher sees as focused.
    pub fn focus_target(&self) -> FocusTarget {
        match self.focus {
            Focus::Search => FocusTarget::input()
                .with_attribute("type", "search")
                .with_parent(FocusTarget::new("header")),
            Focus::List => FocusTarget::new("ul")
                .with_attribute("role", "listbox")
                .with_parent(FocusTarget::new("main")),
        }
    }

    pub fn apply(&mut self, command: AppCommand) {
        log::debug!("Applying {command:?}");

        match command {
            AppCommand::FocusSearch => {
                self.show_help = false;
                self.focus = Focus::Search;
            }
            AppCommand::SelectNext => self.move_selection(1),
            AppCommand::SelectPrevious => self.move_selection(-1),
            AppCommand::ToggleHelp => self.show_help = !self.show_help,
            AppCommand::Escape => {
                if self.show_help {
                    self.show_help = false;
                } else if self.focus == Focus::Search {
                    self.focus = Focus::List;
                } else {
                    self.opened = None;
                    self.status = None;
                }
            }
            AppCommand::CopySelected => self.copy_selected(),
            AppCommand::OpenSelected => {
                if let Some(tool) = self.selected_tool() {
                    self.opened = Some(tool);
                    self.focus = Focus::List;
                    self.status = Some(format!("Opened {}", tool.name));
                }
            }
            AppCommand::Quit => self.should_quit = true,
        }
    }

    fn copy_selected(&mut self) {
        let Some(tool) = self.selected_tool() else {
            self.status = Some("Nothing selected".to_string());
            return;
        };

        let link = tool.link();
        self.status = Some(match self.clipboard.set_text(&link) {
            Ok(()) => format!("Copied {link}"),
            Err(e) => {
                log::error!("Copying {link} failed: {e:#}");
                format!("Copy failed: {e}")
            }
        });
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.clamp_selection();
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.clamp_selection();
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.filtered_tools().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }

        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.list_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered_tools().len();
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, Some(index)) => Some(index.min(len - 1)),
            (_, None) => Some(0),
        };
        self.list_state.select(selected);
    }
}
