// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Only phase events carry timestamps. Instant events (apply begin/end,
//! summaries, operation records) are stamped with the most recent phase
//! timestamp seen so far, which keeps them next to the phase they belong to.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last_us = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::ApplyBegin(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "ApplyBegin",
                    "cat": "Reconcile",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "epoch": e.epoch,
                        "previous_sections": e.previous_sections,
                        "previous_items": e.previous_items,
                        "next_sections": e.next_sections,
                        "next_items": e.next_items,
                    }
                }));
            }
            RecordedEvent::ApplyEnd(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "ApplyEnd",
                    "cat": "Reconcile",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "epoch": e.epoch,
                        "operations": e.changes.total(),
                    }
                }));
            }
            RecordedEvent::PhaseBegin(e) => {
                last_us = nanos_to_us(e.timestamp_nanos);
                events.push(json!({
                    "ph": "B",
                    "name": format!("{:?}", e.phase),
                    "cat": "Apply",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "epoch": e.epoch,
                    }
                }));
            }
            RecordedEvent::PhaseEnd(e) => {
                last_us = nanos_to_us(e.timestamp_nanos);
                events.push(json!({
                    "ph": "E",
                    "name": format!("{:?}", e.phase),
                    "cat": "Apply",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "epoch": e.epoch,
                    }
                }));
            }
            RecordedEvent::ApplySummary(s) => {
                let c = s.changes;
                events.push(json!({
                    "ph": "i",
                    "name": "ApplySummary",
                    "cat": "Summary",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "epoch": s.epoch,
                        "sections": s.sections,
                        "items": s.items,
                        "build_us": nanos_to_us(s.build_nanos),
                        "diff_us": nanos_to_us(s.diff_nanos),
                        "render_us": nanos_to_us(s.render_nanos),
                        "removed_items": c.removed_items,
                        "removed_sections": c.removed_sections,
                        "moved_sections": c.moved_sections,
                        "moved_items": c.moved_items,
                        "inserted_sections": c.inserted_sections,
                        "inserted_items": c.inserted_items,
                        "reloaded_items": c.reloaded_items,
                    }
                }));
            }
            RecordedEvent::Operations { epoch, records } => {
                let ops: Vec<String> = records
                    .iter()
                    .map(|r| format!("{:?}@{}:{}", r.kind, r.section_ordinal, r.index))
                    .collect();
                events.push(json!({
                    "ph": "i",
                    "name": "Operations",
                    "cat": "Rich",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "epoch": epoch,
                        "count": records.len(),
                        "operations": ops,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn nanos_to_us(nanos: u64) -> f64 {
    nanos as f64 / 1000.0
}
