// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Console progress output for a manifest run

use async_trait::async_trait;
use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, Write};

use netpol_core::application::{PolicyAck, PolicyObserver, PolicyTarget};
use netpol_core::PolicyRequest;

pub struct ConsoleReporter<W: Write + Send> {
    console: Mutex<Console<W>>,
}

struct Console<W> {
    out: W,
    line_open: bool,
    error: Option<io::Error>,
}

impl<W: Write> Console<W> {
    /// Run a write, keeping the first failure. Later writes are skipped.
    fn emit(&mut self, write: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = write(&mut self.out) {
            tracing::warn!(error = %e, "Failed to write progress output");
            self.error = Some(e);
        }
    }
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            console: Mutex::new(Console {
                out,
                line_open: false,
                error: None,
            }),
        }
    }

    /// Terminate a progress line left open by a failed policy and return
    /// the first write error, if any.
    pub fn finish(&self) -> io::Result<()> {
        let mut console = self.console.lock();
        if console.line_open {
            console.line_open = false;
            console.emit(|out| writeln!(out));
        }
        match console.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn into_inner(self) -> W {
        self.console.into_inner().out
    }
}

#[async_trait]
impl<W: Write + Send> PolicyObserver for ConsoleReporter<W> {
    async fn on_policy_started(&self, target: &PolicyTarget) {
        let mut console = self.console.lock();
        // Left open so the result lands on the same line
        console.emit(|out| {
            write!(
                out,
                "Adding network policy from {} in space {} to {} in space {}... ",
                target.source_app.bold(),
                target.source_space,
                target.dest_app.bold(),
                target.dest_space
            )?;
            out.flush()
        });
        console.line_open = true;
    }

    async fn on_policy_applied(&self, _target: &PolicyTarget, ack: &PolicyAck) {
        let mut console = self.console.lock();
        console.line_open = false;
        console.emit(|out| {
            writeln!(out, "{}", "✔ DONE".green())?;
            writeln!(out, "{}", ack.response)
        });
    }

    async fn on_policy_planned(&self, _target: &PolicyTarget, request: &PolicyRequest) {
        let mut console = self.console.lock();
        console.line_open = false;
        let body = serde_json::to_string_pretty(request).unwrap_or_default();
        console.emit(|out| {
            writeln!(out, "{}", "(dry run, not submitted)".yellow())?;
            writeln!(out, "{}", body.dimmed())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netpol_core::policy::{Destination, PortRange, Source, WirePolicy};

    fn target() -> PolicyTarget {
        PolicyTarget {
            source_app: "app-1".to_string(),
            source_space: "space-1".to_string(),
            dest_app: "app-2".to_string(),
            dest_space: "space-2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_progress_and_done_marker() {
        colored::control::set_override(false);
        let reporter = ConsoleReporter::new(Vec::new());

        reporter.on_policy_started(&target()).await;
        reporter
            .on_policy_applied(
                &target(),
                &PolicyAck {
                    response: "{}".to_string(),
                },
            )
            .await;

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            output,
            "Adding network policy from app-1 in space space-1 to app-2 in space space-2... ✔ DONE\n{}\n"
        );
    }

    #[tokio::test]
    async fn test_dry_run_prints_request() {
        colored::control::set_override(false);
        let reporter = ConsoleReporter::new(Vec::new());
        let request = PolicyRequest::single(WirePolicy {
            destination: Destination {
                id: "dest".to_string(),
                ports: PortRange { from: 80, to: 80 },
                protocol: "tcp".to_string(),
            },
            source: Source {
                id: "src".to_string(),
            },
        });

        reporter.on_policy_planned(&target(), &request).await;

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(output.starts_with("(dry run, not submitted)\n"));
        assert!(output.contains("\"id\": \"dest\""));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_finish_closes_an_interrupted_line() {
        colored::control::set_override(false);
        let reporter = ConsoleReporter::new(Vec::new());

        reporter.on_policy_started(&target()).await;
        reporter.finish().unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(output.ends_with("in space space-2... \n"));
    }

    #[tokio::test]
    async fn test_finish_without_progress_writes_nothing() {
        let reporter = ConsoleReporter::new(Vec::new());
        reporter.finish().unwrap();
        assert!(reporter.into_inner().is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let reporter = ConsoleReporter::new(ClosedPipe);

        reporter.on_policy_started(&target()).await;
        reporter
            .on_policy_applied(
                &target(),
                &PolicyAck {
                    response: "{}".to_string(),
                },
            )
            .await;

        let err = reporter.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
