// src/client/session.rs
use std::time::Duration;

use super::relay::RelayOutcome;

/// Delay before focusing the input after the widget opens, so the CSS
/// open transition can finish first.
pub const FOCUS_DELAY: Duration = Duration::from_millis(300);

pub const GENERIC_FALLBACK: &str = "Sorry, something went wrong. Please try again.";

pub fn offline_fallback(contact_email: &str) -> String {
    format!("I seem to be offline right now. Please reach out at {contact_email}!")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self { text: text.into(), sender }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    Idle,
    AwaitingReply,
}

/// What a document click landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Window,
    ToggleButton,
    Elsewhere,
}

/// Side effects the view should carry out after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    FocusInput { after: Duration },
}

/// One page session of the chat widget. Mutated only through the
/// transitions below; the transcript is append-only.
#[derive(Clone, Debug)]
pub struct ChatSession {
    open: bool,
    activity: Activity,
    input: String,
    typing_indicator: bool,
    transcript: Vec<ChatMessage>,
    contact_email: String,
}

impl ChatSession {
    pub fn new(contact_email: impl Into<String>) -> Self {
        Self {
            open: false,
            activity: Activity::Idle,
            input: String::new(),
            typing_indicator: false,
            transcript: Vec::new(),
            contact_email: contact_email.into(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.activity == Activity::AwaitingReply
    }

    /// Input field and send button are enabled exactly while idle.
    pub fn controls_enabled(&self) -> bool {
        !self.is_awaiting_reply()
    }

    pub fn typing_indicator_visible(&self) -> bool {
        self.typing_indicator
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn toggle(&mut self) -> Option<Effect> {
        self.open = !self.open;
        self.open.then_some(Effect::FocusInput { after: FOCUS_DELAY })
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Clicks outside the window and its toggle button close an open widget.
    pub fn click(&mut self, target: ClickTarget) {
        if self.open && target == ClickTarget::Elsewhere {
            self.close();
        }
    }

    /// Enter without shift submits; everything else is plain typing.
    pub fn is_submit_key(key: &str, shift: bool) -> bool {
        key == "Enter" && !shift
    }

    /// Start an exchange. Returns the message to relay, or `None` when the
    /// input is blank or a reply is still pending.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.is_awaiting_reply() {
            return None;
        }
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();

        self.transcript.push(ChatMessage::new(Sender::User, text.clone()));
        self.input.clear();
        self.typing_indicator = true;
        self.activity = Activity::AwaitingReply;
        Some(text)
    }

    /// Finish the pending exchange with exactly one bot message. Outcomes
    /// arriving while idle are dropped.
    pub fn resolve(&mut self, outcome: RelayOutcome) -> Option<Effect> {
        if !self.is_awaiting_reply() {
            return None;
        }
        let text = match outcome {
            RelayOutcome::Reply(reply) => reply,
            RelayOutcome::Rejected(Some(error)) => error,
            RelayOutcome::Rejected(None) => GENERIC_FALLBACK.to_string(),
            RelayOutcome::Unreachable => offline_fallback(&self.contact_email),
        };

        self.typing_indicator = false;
        self.transcript.push(ChatMessage::new(Sender::Bot, text));
        self.activity = Activity::Idle;
        Some(Effect::FocusInput { after: Duration::ZERO })
    }
}
