//! Integration Tests for Program Input
//!
//! A running statement that calls `input()` parks on the bridge while the
//! session keeps taking keystrokes.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use glassrepl::{InputBridge, Mode, SessionHandle};
use test_utils::{session_with, MockInterpreter, OutputTarget, Script};

fn asking_interpreter() -> (MockInterpreter, test_utils::MockProbe) {
    let (mock, probe) = MockInterpreter::new();
    let mock = mock
        .on(
            "name = input()",
            Script::AskInput {
                prompt: "Name? ".to_string(),
            },
        )
        .on(
            "both()",
            Script::AskTwice {
                first: "A? ".to_string(),
                second: "B? ".to_string(),
            },
        );
    (mock, probe)
}

#[tokio::test]
async fn test_typed_line_answers_input_request() {
    let (mock, probe) = asking_interpreter();
    let (mut session, display) = session_with(mock);
    let (handle, events) = SessionHandle::channel();
    handle.keystroke("name = input()\r").unwrap();
    handle.keystroke("h").unwrap();

    {
        let run = session.run(events);
        tokio::pin!(run);
        assert!(futures::poll!(run.as_mut()).is_pending());

        // the statement is parked on input() and the prompt is showing
        assert_eq!(display.current_line(), "Name? h");
        assert!(probe.answers().is_empty());

        handle.keystroke("i\r").unwrap();
        drop(handle);
        run.await;
    }

    assert_eq!(probe.answers(), vec!["hi"]);
    assert_eq!(session.mode(), Mode::Normal);
    assert!(session.pending_prompt().is_none());
    assert_eq!(
        display.lines(),
        vec![">>> name = input()", "Name? hi", "got: hi", ">>> "]
    );
    // the answer is not a statement
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn test_answer_typed_ahead_of_the_prompt() {
    let (mock, probe) = asking_interpreter();
    let (mut session, display) = session_with(mock);

    let (handle, events) = SessionHandle::channel();
    handle.keystroke("name = input()\rAda\r").unwrap();
    drop(handle);
    session.run(events).await;

    assert_eq!(probe.answers(), vec!["Ada"]);
    assert_eq!(
        display.lines(),
        vec![">>> name = input()", "Name? Ada", "got: Ada", ">>> "]
    );
}

#[tokio::test]
async fn test_concurrent_request_gets_empty_answer() {
    let (mock, probe) = asking_interpreter();
    let (mut session, display) = session_with(mock);

    let (handle, events) = SessionHandle::channel();
    handle.keystroke("both()\r").unwrap();
    handle.keystroke("hi\r").unwrap();
    drop(handle);
    session.run(events).await;

    assert_eq!(probe.answers(), vec!["hi", ""]);
    assert_eq!(
        display.lines(),
        vec![">>> both()", "A? hi", "first=hi second=", ">>> "]
    );
    assert_eq!(session.mode(), Mode::Normal);
}

#[tokio::test]
async fn test_requester_is_free_again_after_an_answer() {
    let mut bridge = InputBridge::new();
    let requester = bridge.requester();

    for expected in ["one", "two"] {
        let (answer, _) = tokio::join!(requester.request_input("? "), async {
            let request = bridge.next_request().await.expect("request queued");
            assert_eq!(request.prompt(), "? ");
            request.resolve(expected.to_string());
        });
        assert_eq!(answer, expected);
        assert!(!requester.is_pending());
    }
}

#[tokio::test]
async fn test_shutdown_while_awaiting_input() {
    let (mock, probe) = asking_interpreter();
    let (mut session, _display) = session_with(mock);

    let (handle, events) = SessionHandle::channel();
    handle.keystroke("name = input()\r").unwrap();
    handle.keystroke("Ad").unwrap();

    {
        let run = session.run(events);
        tokio::pin!(run);
        assert!(futures::poll!(run.as_mut()).is_pending());
        handle.shutdown().unwrap();
        run.await;
    }

    // the program never got an answer and its output was restored
    assert!(probe.answers().is_empty());
    assert_eq!(probe.target(), OutputTarget::Console);
    assert_eq!(session.mode(), Mode::Normal);
    assert!(session.pending_prompt().is_none());
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_closed_channel_answers_pending_request_with_empty_line() {
    let (mock, probe) = asking_interpreter();
    let (mut session, display) = session_with(mock);

    let (handle, events) = SessionHandle::channel();
    handle.keystroke("name = input()\r").unwrap();
    drop(handle);
    session.run(events).await;

    assert_eq!(probe.answers(), vec![""]);
    assert!(display.text().contains("got: "));
    assert_eq!(session.mode(), Mode::Normal);
    assert!(!session.is_busy());
    assert_eq!(display.current_line(), ">>> ");
}

#[tokio::test]
async fn test_dropped_bridge_request_resolves_empty() {
    let mut bridge = InputBridge::new();
    let requester = bridge.requester();

    let (answer, _) = tokio::join!(requester.request_input("x? "), async {
        drop(bridge.next_request().await);
    });

    assert_eq!(answer, "");
    assert!(!requester.is_pending());
}
