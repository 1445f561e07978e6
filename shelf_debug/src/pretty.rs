// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! and durations are printed in microseconds.

use std::io::Write;

use shelf_core::reconcile::ChangeSummary;
use shelf_core::trace::{
    ApplyBeginEvent, ApplyEndEvent, ApplySummary, OperationRecord, PhaseBeginEvent, PhaseEndEvent,
    PhaseKind, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    verbose: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            verbose: false,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }

    /// Also print one line per operation record.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn nanos_to_us(nanos: u64) -> f64 {
    nanos as f64 / 1000.0
}

fn phase_name(phase: PhaseKind) -> &'static str {
    match phase {
        PhaseKind::Build => "build",
        PhaseKind::Diff => "diff",
        PhaseKind::Render => "render",
    }
}

/// Formats the non-zero counters of a summary, `-` if all are zero.
fn changes_text(c: &ChangeSummary) -> String {
    let parts: Vec<String> = [
        ("-item", c.removed_items),
        ("-section", c.removed_sections),
        ("~section", c.moved_sections),
        ("~item", c.moved_items),
        ("+section", c.inserted_sections),
        ("+item", c.inserted_items),
        ("*item", c.reloaded_items),
    ]
    .into_iter()
    .filter(|(_, n)| *n > 0)
    .map(|(label, n)| format!("{label}={n}"))
    .collect();
    if parts.is_empty() {
        "-".to_owned()
    } else {
        parts.join(" ")
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_apply_begin(&mut self, e: &ApplyBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[apply:begin] epoch={} sections={}->{} items={}->{}",
            e.epoch, e.previous_sections, e.next_sections, e.previous_items, e.next_items,
        );
    }

    fn on_apply_end(&mut self, e: &ApplyEndEvent) {
        let _ = writeln!(
            self.writer,
            "[apply:end] epoch={} ops={} {}",
            e.epoch,
            e.changes.total(),
            changes_text(&e.changes),
        );
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:begin] epoch={} {} at {:.1}µs",
            e.epoch,
            phase_name(e.phase),
            nanos_to_us(e.timestamp_nanos),
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:end] epoch={} {} at {:.1}µs",
            e.epoch,
            phase_name(e.phase),
            nanos_to_us(e.timestamp_nanos),
        );
    }

    fn on_apply_summary(&mut self, s: &ApplySummary) {
        let _ = writeln!(
            self.writer,
            "[summary] epoch={} sections={} items={} build={:.1}µs diff={:.1}µs \
             render={:.1}µs changes={}",
            s.epoch,
            s.sections,
            s.items,
            nanos_to_us(s.build_nanos),
            nanos_to_us(s.diff_nanos),
            nanos_to_us(s.render_nanos),
            changes_text(&s.changes),
        );
    }

    fn on_operations(&mut self, epoch: u64, ops: &[OperationRecord]) {
        let _ = writeln!(self.writer, "[ops] epoch={epoch} count={}", ops.len());
        if self.verbose {
            for op in ops {
                let _ = writeln!(
                    self.writer,
                    "  {:?} section#{} index={}",
                    op.kind, op.section_ordinal, op.index,
                );
            }
        }
    }
}
