//! Chat state and the two event handlers that drive it: accepting a send
//! and applying the outcome of the request it started.

use crate::client::InferenceReply;
use crate::error::{ClientError, SubmitError};
use crate::format::format_reply;
use chrono::{DateTime, Local};
use strum::Display;
use uuid::Uuid;

pub const EMPTY_PROMPT_NOTICE: &str = "Please enter a message before sending.";
pub const NO_REPLY_PLACEHOLDER: &str = "No valid reply received.";
pub const ERROR_MARKER: &str = "Request error:";

pub type RequestId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Speaker {
    #[strum(to_string = "You")]
    User,
    #[strum(to_string = "Ollama")]
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Local>,
    /// Set for error replies so front ends can style them.
    pub is_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Thinking,
    Finished,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Idle => "",
            Status::Thinking => "Ollama is thinking...",
            Status::Finished => "Ollama has finished thinking",
        }
    }
}

/// An accepted send. The holder is expected to run the request and report
/// back through [`ChatSession::complete`] with the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTicket {
    pub id: RequestId,
    pub prompt: String,
}

pub type Outcome = Result<Option<InferenceReply>, ClientError>;

#[derive(Debug)]
pub struct ChatSession {
    transcript: Vec<TranscriptEntry>,
    status: Status,
    in_flight: Option<RequestId>,
    notice: Option<&'static str>,
    line_break: String,
}

impl ChatSession {
    /// `line_break` is the marker replies use for line breaks on the target surface.
    pub fn new(line_break: impl Into<String>) -> Self {
        Self {
            transcript: Vec::new(),
            status: Status::Idle,
            in_flight: None,
            notice: None,
            line_break: line_break.into(),
        }
    }

    pub fn submit(&mut self, input: &str) -> Result<SendTicket, SubmitError> {
        if self.in_flight.is_some() {
            tracing::debug!("send ignored, request already in flight");
            return Err(SubmitError::Busy);
        }

        let prompt = input.trim();
        if prompt.is_empty() {
            self.notice = Some(EMPTY_PROMPT_NOTICE);
            return Err(SubmitError::EmptyPrompt);
        }

        let id = Uuid::new_v4();
        self.push(Speaker::User, prompt.to_string(), false);
        self.status = Status::Thinking;
        self.in_flight = Some(id);
        tracing::info!(request = %id, chars = prompt.len(), "prompt accepted");

        Ok(SendTicket {
            id,
            prompt: prompt.to_string(),
        })
    }

    /// Applies a request outcome. Returns `false` if `id` is not the
    /// request currently in flight.
    pub fn complete(&mut self, id: RequestId, outcome: Outcome) -> bool {
        if self.in_flight != Some(id) {
            tracing::warn!(request = %id, "dropping completion for unknown request");
            return false;
        }

        match outcome {
            Ok(Some(InferenceReply {
                response: Some(text),
            })) => {
                let formatted = format_reply(&text, &self.line_break);
                self.push(Speaker::Assistant, formatted, false);
            }
            Ok(_) => self.push(Speaker::Assistant, NO_REPLY_PLACEHOLDER.to_string(), false),
            Err(err) => self.push(Speaker::Assistant, format!("{} {}", ERROR_MARKER, err), true),
        }

        self.in_flight = None;
        self.status = Status::Finished;
        tracing::info!(request = %id, "request completed");
        true
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn push(&mut self, speaker: Speaker, text: String, is_error: bool) {
        self.transcript.push(TranscriptEntry {
            speaker,
            text,
            at: Local::now(),
            is_error,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::HTML_LINE_BREAK;

    fn reply(text: &str) -> Outcome {
        Ok(Some(InferenceReply {
            response: Some(text.to_string()),
        }))
    }

    #[test]
    fn test_blank_input_sets_notice_only() {
        let mut session = ChatSession::new(HTML_LINE_BREAK);
        for input in ["", "   ", "\t\n "] {
            assert_eq!(session.submit(input), Err(SubmitError::EmptyPrompt));
        }
        assert_eq!(session.notice(), Some(EMPTY_PROMPT_NOTICE));
        assert!(session.transcript().is_empty());
        assert!(!session.is_busy());
        assert_eq!(session.status(), Status::Idle);

        session.dismiss_notice();
        assert_eq!(session.notice(), None);
    }

    #[test]
    fn test_submit_trims_and_records_prompt() {
        let mut session = ChatSession::new(HTML_LINE_BREAK);
        let ticket = session.submit("  hello \n").unwrap();

        assert_eq!(ticket.prompt, "hello");
        assert!(session.is_busy());
        assert_eq!(session.status(), Status::Thinking);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].speaker, Speaker::User);
        assert_eq!(session.transcript()[0].text, "hello");
    }

    #[test]
    fn test_second_send_rejected_while_in_flight() {
        let mut session = ChatSession::new(HTML_LINE_BREAK);
        let ticket = session.submit("first").unwrap();
        assert_eq!(session.submit("second"), Err(SubmitError::Busy));
        assert_eq!(session.transcript().len(), 1);

        assert!(session.complete(ticket.id, reply("done")));
        assert!(session.submit("second").is_ok());
    }

    #[test]
    fn test_reply_is_formatted() {
        let mut session = ChatSession::new(HTML_LINE_BREAK);
        let ticket = session.submit("hello").unwrap();
        session.complete(ticket.id, reply("<think>hmm\n</think>\nHi\nthere"));

        let last = session.transcript().last().unwrap();
        assert_eq!(last.speaker, Speaker::Assistant);
        assert_eq!(last.text, "Hi<br>there");
        assert!(!last.is_error);
        assert_eq!(session.status(), Status::Finished);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_no_reply_and_missing_field_share_placeholder() {
        let mut session = ChatSession::new(HTML_LINE_BREAK);

        let ticket = session.submit("a").unwrap();
        session.complete(ticket.id, Ok(None));
        assert_eq!(session.transcript().last().unwrap().text, NO_REPLY_PLACEHOLDER);

        let ticket = session.submit("b").unwrap();
        session.complete(ticket.id, Ok(Some(InferenceReply::default())));
        assert_eq!(session.transcript().last().unwrap().text, NO_REPLY_PLACEHOLDER);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_error_is_shown_and_controls_released() {
        let mut session = ChatSession::new(HTML_LINE_BREAK);
        let ticket = session.submit("hello").unwrap();
        let err = ClientError::Transport("tcp connect error: Connection refused".to_string());
        session.complete(ticket.id, Err(err));

        let last = session.transcript().last().unwrap();
        assert_eq!(
            last.text,
            "Request error: tcp connect error: Connection refused"
        );
        assert!(last.is_error);
        assert!(!session.is_busy());
        assert_eq!(session.status(), Status::Finished);
    }

    #[test]
    fn test_stale_completion_ignored() {
        let mut session = ChatSession::new(HTML_LINE_BREAK);
        let ticket = session.submit("hello").unwrap();

        assert!(!session.complete(Uuid::new_v4(), reply("stray")));
        assert!(session.is_busy());
        assert_eq!(session.transcript().len(), 1);

        assert!(session.complete(ticket.id, reply("ok")));
        assert!(!session.complete(ticket.id, reply("again")));
        assert_eq!(session.transcript().len(), 2);
    }
}
