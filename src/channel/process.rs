use std::process::Stdio;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::mpsc;

use super::protocol::{WorkerEvent, WorkerRequest};
use super::{ChannelError, ChannelEvent, InterpreterChannel};
use crate::config::WorkerConfig;

/// Execution status shared between the console task and the reader task.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct WorkerStatus {
    executing: bool,
    waiting_for_input: bool,
    pending_id: Option<u64>,
}

impl WorkerStatus {
    /// Applies a worker event; returns the event to forward, if any.
    ///
    /// Results for ids other than the pending one are stale and dropped.
    fn apply(&mut self, event: WorkerEvent) -> Option<ChannelEvent> {
        match &event {
            WorkerEvent::Result { id, .. } => {
                if self.pending_id != Some(*id) {
                    tracing::trace!(id, "Stale worker result dropped");
                    return None;
                }
                self.executing = false;
                self.waiting_for_input = false;
                self.pending_id = None;
            }
            WorkerEvent::InputRequested => self.waiting_for_input = true,
            _ => {}
        }
        Some(event.into_channel_event())
    }
}

/// Interpreter channel backed by a worker process speaking JSON lines.
///
/// Requests go through an unbounded queue to a writer task so `execute`
/// never blocks the console; the reader task forwards worker events to the
/// console's event queue.
pub struct ProcessChannel {
    status: Arc<Mutex<WorkerStatus>>,
    requests: mpsc::UnboundedSender<WorkerRequest>,
    next_id: u64,
}

impl ProcessChannel {
    /// Spawns the worker. Must be called from within a tokio runtime.
    pub fn spawn(
        config: &WorkerConfig,
        events: mpsc::UnboundedSender<ChannelEvent>,
    ) -> Result<Self, ChannelError> {
        let mut child = Command::new(&config.command)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ChannelError::Spawn {
                command: config.command.clone(),
                source,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ChannelError::Protocol("worker stdin not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ChannelError::Protocol("worker stdout not captured".to_string()))?;

        tracing::info!(command = %config.command, args = ?config.args, "Worker spawned");

        let status = Arc::new(Mutex::new(WorkerStatus::default()));
        let (requests, request_rx) = mpsc::unbounded_channel();

        tokio::spawn(write_requests(stdin, request_rx));
        tokio::spawn(read_events(stdout, child, Arc::clone(&status), events));

        Ok(Self {
            status,
            requests,
            next_id: 0,
        })
    }

    fn send(&self, request: WorkerRequest) -> Result<(), ChannelError> {
        self.requests
            .send(request)
            .map_err(|_| ChannelError::Disconnected)
    }
}

impl InterpreterChannel for ProcessChannel {
    fn execute(&mut self, command: String) -> Result<(), ChannelError> {
        let mut status = self.status.lock();
        if status.waiting_for_input {
            // The running program consumes this line; its own result is
            // still pending.
            status.waiting_for_input = false;
            drop(status);
            return self.send(WorkerRequest::Stdin { text: command });
        }

        self.next_id += 1;
        let id = self.next_id;
        status.executing = true;
        status.pending_id = Some(id);
        drop(status);
        self.send(WorkerRequest::Execute { id, code: command })
    }

    fn is_executing(&self) -> bool {
        self.status.lock().executing
    }

    fn is_waiting_for_input(&self) -> bool {
        self.status.lock().waiting_for_input
    }

    fn interrupt(&mut self) -> Result<(), ChannelError> {
        self.send(WorkerRequest::Interrupt)
    }
}

async fn write_requests(mut stdin: ChildStdin, mut requests: mpsc::UnboundedReceiver<WorkerRequest>) {
    while let Some(request) = requests.recv().await {
        let line = match request.to_line() {
            Ok(line) => line,
            Err(err) => {
                tracing::error!("Failed to encode worker request: {}", err);
                continue;
            }
        };
        if let Err(err) = stdin.write_all(line.as_bytes()).await {
            tracing::warn!("Worker stdin closed: {}", err);
            break;
        }
        if let Err(err) = stdin.flush().await {
            tracing::warn!("Worker stdin flush failed: {}", err);
            break;
        }
    }
}

async fn read_events(
    stdout: ChildStdout,
    mut child: Child,
    status: Arc<Mutex<WorkerStatus>>,
    events: mpsc::UnboundedSender<ChannelEvent>,
) {
    let mut lines = BufReader::new(stdout).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!("Worker stdout read failed: {}", err);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let event = match WorkerEvent::parse(&line) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!("Unparseable worker line {:?}: {}", line, err);
                continue;
            }
        };
        tracing::trace!(?event, "Worker event");
        let forwarded = status.lock().apply(event);
        if let Some(event) = forwarded {
            if events.send(event).is_err() {
                tracing::trace!("Worker event dropped (console gone)");
                return;
            }
        }
    }

    *status.lock() = WorkerStatus::default();
    let code = match child.wait().await {
        Ok(exit) => exit.code(),
        Err(err) => {
            tracing::warn!("Failed to reap worker: {}", err);
            None
        }
    };
    tracing::info!(?code, "Worker exited");
    let _ = events.send(ChannelEvent::Exited { code });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::InterpreterResponse;

    #[test]
    fn matching_result_clears_status() {
        let mut status = WorkerStatus {
            executing: true,
            waiting_for_input: false,
            pending_id: Some(2),
        };
        let event = status.apply(WorkerEvent::Result { id: 2, more: false });
        assert_eq!(
            event,
            Some(ChannelEvent::Response(InterpreterResponse { more: false }))
        );
        assert_eq!(status, WorkerStatus::default());
    }

    #[test]
    fn stale_result_is_dropped() {
        let mut status = WorkerStatus {
            executing: true,
            waiting_for_input: false,
            pending_id: Some(2),
        };
        assert_eq!(status.apply(WorkerEvent::Result { id: 1, more: false }), None);
        assert!(status.executing);
    }

    #[test]
    fn input_request_marks_waiting() {
        let mut status = WorkerStatus {
            executing: true,
            waiting_for_input: false,
            pending_id: Some(1),
        };
        let event = status.apply(WorkerEvent::InputRequested);
        assert_eq!(event, Some(ChannelEvent::InputRequested));
        assert!(status.waiting_for_input);
        assert!(status.executing);
    }

    #[cfg(unix)]
    async fn next(rx: &mut mpsc::UnboundedReceiver<ChannelEvent>) -> Option<ChannelEvent> {
        tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
            .await
            .expect("worker event timed out")
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn spawned_worker_round_trip() {
        let config = WorkerConfig {
            command: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                concat!(
                    "echo '{\"type\":\"ready\"}'; ",
                    "read line; ",
                    "echo '{\"type\":\"result\",\"id\":1,\"more\":false}'"
                )
                .to_string(),
            ],
        };
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut channel = ProcessChannel::spawn(&config, tx).unwrap();

        assert_eq!(next(&mut rx).await, Some(ChannelEvent::Ready));

        channel.execute("x = 1\n".to_string()).unwrap();
        assert!(channel.is_executing());

        assert_eq!(
            next(&mut rx).await,
            Some(ChannelEvent::Response(InterpreterResponse { more: false }))
        );
        assert!(!channel.is_executing());
        assert!(matches!(
            next(&mut rx).await,
            Some(ChannelEvent::Exited { code: Some(0) })
        ));
    }

    #[tokio::test]
    async fn spawn_failure_reports_command() {
        let config = WorkerConfig {
            command: "replframe-no-such-worker".to_string(),
            args: Vec::new(),
        };
        let (tx, _rx) = mpsc::unbounded_channel();
        match ProcessChannel::spawn(&config, tx) {
            Err(ChannelError::Spawn { command, .. }) => {
                assert_eq!(command, "replframe-no-such-worker")
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("spawn should fail"),
        }
    }
}
