//! Page regions the controller writes into.
//!
//! Regions hold structured state only. Markup is produced by the renderer,
//! which escapes every interpolated value.

use serde::Serialize;

/// Contents of the result region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultPanel {
    #[default]
    Idle,
    /// A request is in flight.
    Pending { text: String },
    Connected {
        database: String,
        host: String,
        status: String,
    },
    Saved { id: String },
    /// `hint` is set when the API could not be reached at all.
    ConnectionFailed { error: String, hint: bool },
    /// Plain error line.
    Failed { text: String },
}

impl ResultPanel {
    pub fn pending(text: impl Into<String>) -> Self {
        ResultPanel::Pending { text: text.into() }
    }

    pub fn failed(text: impl Into<String>) -> Self {
        ResultPanel::Failed { text: text.into() }
    }

    /// CSS class of the result region.
    pub fn css_class(&self) -> &'static str {
        match self {
            ResultPanel::Idle | ResultPanel::Pending { .. } => "result",
            ResultPanel::Connected { .. } | ResultPanel::Saved { .. } => "result success",
            ResultPanel::ConnectionFailed { .. } | ResultPanel::Failed { .. } => "result error",
        }
    }
}

/// One rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRow {
    /// Raw message text; escaped at render time.
    pub text: String,
    /// Formatted creation time.
    pub time: String,
}

/// Contents of the message-list region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessagePanel {
    #[default]
    Idle,
    Loading,
    List { rows: Vec<MessageRow> },
    /// The API returned an empty list.
    Empty,
    Failed { text: String },
}

/// Output surface of the controller.
pub trait View: Send {
    fn show_result(&mut self, panel: ResultPanel);

    fn show_messages(&mut self, panel: MessagePanel);

    /// Empties the message text input.
    fn clear_input(&mut self);
}

/// Page state for a single render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    pub result: ResultPanel,
    pub messages: MessagePanel,
    /// Current value of the message text input.
    pub input: String,
}

impl PageView {
    /// A page whose text input still holds what the user typed.
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }
}

impl View for PageView {
    fn show_result(&mut self, panel: ResultPanel) {
        self.result = panel;
    }

    fn show_messages(&mut self, panel: MessagePanel) {
        self.messages = panel;
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }
}
