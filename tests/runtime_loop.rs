mod common;

use std::time::Duration;

use common::MockChannel;
use replframe::channel::ChannelEvent;
use replframe::config::PromptConfig;
use replframe::console::{Console, PythonIndent, TerminalSurface};
use replframe::input::ConsoleInput;
use replframe::runtime::drive;
use tokio::io::BufReader;
use tokio::sync::mpsc;

type TerminalConsole = Console<MockChannel, TerminalSurface<Vec<u8>>>;

fn terminal_console(channel: MockChannel) -> TerminalConsole {
    let surface = TerminalSurface::new(Vec::new(), PromptConfig::default());
    let mut console = Console::new(channel, surface, Box::new(PythonIndent::default()), 10);
    console.handle_event(ChannelEvent::Ready);
    console
}

fn written(console: &TerminalConsole) -> String {
    String::from_utf8(console.framer().surface().get_ref().clone()).unwrap()
}

#[tokio::test]
async fn input_lines_are_framed_until_eof() {
    let (tx, mut events) = mpsc::unbounded_channel();
    let channel = MockChannel {
        auto_respond: Some(tx),
        ..Default::default()
    };
    let mut console = terminal_console(channel);

    // Auto-indent is printed, not echoed back, so typed lines carry none.
    let mut input = ConsoleInput::lines(&b"if True:\nx = 1\n\nprint(x)\n"[..]);
    tokio::time::timeout(Duration::from_secs(5), drive(&mut console, &mut events, &mut input))
        .await
        .expect("loop did not finish")
        .unwrap();

    assert_eq!(
        console.framer().channel().commands,
        vec!["if True:\n    x = 1\n\n", "print(x)\n"]
    );
    assert!(!console.framer().is_busy());
    assert!(written(&console).starts_with(">>> ... "));
}

async fn run_lines(typed: &'static [u8]) -> TerminalConsole {
    let (tx, mut events) = mpsc::unbounded_channel();
    let channel = MockChannel {
        auto_respond: Some(tx),
        ..Default::default()
    };
    let mut console = terminal_console(channel);
    let mut input = ConsoleInput::lines(typed);
    tokio::time::timeout(Duration::from_secs(5), drive(&mut console, &mut events, &mut input))
        .await
        .expect("loop did not finish")
        .unwrap();
    console
}

#[tokio::test]
async fn else_branch_returns_to_block_level() {
    let console = run_lines(b"if x:\na = 1\nelse:\nb = 2\n\n").await;
    assert_eq!(
        console.framer().channel().commands,
        vec!["if x:\n    a = 1\nelse:\n    b = 2\n\n"]
    );
}

#[tokio::test]
async fn nested_try_dedents_one_level() {
    let typed: &[u8] = b"def f():\ntry:\nreturn 1\nexcept ValueError:\nreturn 2\n\n";
    let console = run_lines(typed).await;
    assert_eq!(
        console.framer().channel().commands,
        vec![concat!(
            "def f():\n",
            "    try:\n",
            "        return 1\n",
            "    except ValueError:\n",
            "        return 2\n",
            "\n",
        )]
    );
}

#[tokio::test]
async fn typed_indent_is_kept() {
    let console = run_lines(b"for i in range(2):\n  print(i)\n\n").await;
    assert_eq!(
        console.framer().channel().commands,
        vec!["for i in range(2):\n  print(i)\n\n"]
    );
}

#[tokio::test]
async fn worker_exit_ends_loop() {
    let (tx, mut events) = mpsc::unbounded_channel();
    let mut console = terminal_console(MockChannel::default());

    // Input that never yields a line.
    let (_writer, reader) = tokio::io::duplex(64);
    let mut input = ConsoleInput::lines(BufReader::new(reader));
    tx.send(ChannelEvent::Exited { code: Some(3) }).unwrap();

    tokio::time::timeout(
        Duration::from_secs(5),
        drive(&mut console, &mut events, &mut input),
    )
    .await
    .expect("loop did not finish")
    .unwrap();

    assert!(!console.is_enabled());
    assert!(written(&console).contains("! Interpreter exited with code 3\n"));
}
