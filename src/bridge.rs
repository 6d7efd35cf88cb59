//! Host side of the interpreter's `input()` call
//!
//! The running program asks for a line of text through an [`InputRequester`].
//! Each request travels over an mpsc channel to the session, which parks it,
//! switches to awaiting-input mode, and answers through a oneshot reply once
//! the user presses Enter.
//!
//! Only one request may be outstanding. A second concurrent call resolves to
//! an empty string immediately and leaves the first request untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// A parked request for one line of user text
#[derive(Debug)]
pub struct InputRequest {
    /// Prompt text, written to the terminal verbatim
    prompt: String,
    /// Resolver for the waiting program
    reply: oneshot::Sender<String>,
}

impl InputRequest {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Whether the caller stopped waiting (its future was dropped)
    pub fn is_abandoned(&self) -> bool {
        self.reply.is_closed()
    }

    /// Answer the request. Delivery to an abandoned caller is ignored.
    pub fn resolve(self, line: String) {
        if self.reply.send(line).is_err() {
            debug!("Input request abandoned before it was resolved");
        }
    }
}

/// Interpreter-side endpoint, handed to the interpreter at session start
#[derive(Debug, Clone)]
pub struct InputRequester {
    sender: mpsc::UnboundedSender<InputRequest>,
    outstanding: Arc<AtomicBool>,
}

/// Clears the outstanding flag when a request finishes or is cancelled
struct OutstandingGuard<'a>(&'a AtomicBool);

impl Drop for OutstandingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl InputRequester {
    /// Ask the user for one line of text.
    ///
    /// Resolves to the typed line without its trailing Enter. Resolves to an
    /// empty string if another request is already outstanding or the session
    /// has gone away.
    pub async fn request_input(&self, prompt: &str) -> String {
        if self
            .outstanding
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(
                "Rejected concurrent input request (prompt {:?}); one is already pending",
                prompt
            );
            return String::new();
        }
        let _guard = OutstandingGuard(&self.outstanding);

        let (reply, response) = oneshot::channel();
        let request = InputRequest {
            prompt: prompt.to_string(),
            reply,
        };
        if self.sender.send(request).is_err() {
            debug!("Input requested after the session closed");
            return String::new();
        }

        match response.await {
            Ok(line) => line,
            Err(_) => {
                debug!("Session dropped a pending input request");
                String::new()
            }
        }
    }

    /// Whether a request is currently outstanding
    pub fn is_pending(&self) -> bool {
        self.outstanding.load(Ordering::Acquire)
    }
}

/// Session-side endpoint receiving requests
#[derive(Debug)]
pub struct InputBridge {
    receiver: mpsc::UnboundedReceiver<InputRequest>,
    requester: InputRequester,
}

impl InputBridge {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            receiver,
            requester: InputRequester {
                sender,
                outstanding: Arc::new(AtomicBool::new(false)),
            },
        }
    }

    /// A requester for the interpreter side
    pub fn requester(&self) -> InputRequester {
        self.requester.clone()
    }

    /// Wait for the next request. Never returns `None` while the bridge lives.
    pub async fn next_request(&mut self) -> Option<InputRequest> {
        self.receiver.recv().await
    }

    /// Take a request if one is already queued
    pub fn try_next_request(&mut self) -> Option<InputRequest> {
        self.receiver.try_recv().ok()
    }
}

impl Default for InputBridge {
    fn default() -> Self {
        Self::new()
    }
}
