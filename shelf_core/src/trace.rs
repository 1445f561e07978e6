// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for snapshot application.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Reconciler`](crate::reconcile::Reconciler) and application code call
//! while a snapshot is built, diffed, and rendered. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! [`ApplySummaryBuilder`] is a convenience helper that collects phase
//! timestamps during one application and produces an [`ApplySummary`] at the
//! end.
//!
//! Timestamps are caller-supplied nanoseconds on any monotonic clock; the
//! core never reads a clock itself.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`OperationRecord`] events and the
//!   corresponding `TraceSink` method.

use crate::reconcile::ChangeSummary;
#[cfg(feature = "trace-rich")]
use crate::reconcile::{Operation, OperationKind};
#[cfg(feature = "trace-rich")]
use crate::{item::Item, section::SectionKind};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which phase of snapshot application is being measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Snapshot construction from application data.
    Build,
    /// Reconciliation against the previously applied snapshot.
    Diff,
    /// Renderer applying the changeset.
    Render,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a reconciler starts applying a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApplyBeginEvent {
    /// Epoch the new snapshot will have once applied (1 for the first).
    pub epoch: u64,
    /// Section count of the previously applied snapshot (0 if none).
    pub previous_sections: u32,
    /// Item count of the previously applied snapshot (0 if none).
    pub previous_items: u32,
    /// Section count of the incoming snapshot.
    pub next_sections: u32,
    /// Item count of the incoming snapshot.
    pub next_items: u32,
}

/// Emitted when a reconciler finished diffing a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApplyEndEvent {
    /// Epoch of the applied snapshot.
    pub epoch: u64,
    /// Operation counts of the produced changeset.
    pub changes: ChangeSummary,
}

/// Marks the beginning of a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseBeginEvent {
    /// Epoch the phase belongs to.
    pub epoch: u64,
    /// Which phase is starting.
    pub phase: PhaseKind,
    /// Caller clock at the start of the phase, in nanoseconds.
    pub timestamp_nanos: u64,
}

/// Marks the end of a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseEndEvent {
    /// Epoch the phase belongs to.
    pub epoch: u64,
    /// Which phase is ending.
    pub phase: PhaseKind,
    /// Caller clock at the end of the phase, in nanoseconds.
    pub timestamp_nanos: u64,
}

/// Per-application summary produced by [`ApplySummaryBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApplySummary {
    /// Epoch of the applied snapshot.
    pub epoch: u64,
    /// Section count of the applied snapshot.
    pub sections: u32,
    /// Item count of the applied snapshot.
    pub items: u32,
    /// Build phase duration in nanoseconds (0 if not measured).
    pub build_nanos: u64,
    /// Diff phase duration in nanoseconds (0 if not measured).
    pub diff_nanos: u64,
    /// Render phase duration in nanoseconds (0 if not measured).
    pub render_nanos: u64,
    /// Operation counts of the changeset.
    pub changes: ChangeSummary,
}

/// A per-operation record.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationRecord {
    /// Which operation.
    pub kind: OperationKind,
    /// Ordinal of the section it touches.
    pub section_ordinal: u32,
    /// Index the operation leaves its subject at.
    pub index: u32,
}

#[cfg(feature = "trace-rich")]
impl<S: SectionKind, I: Item> From<&Operation<S, I>> for OperationRecord {
    fn from(op: &Operation<S, I>) -> Self {
        Self {
            kind: op.kind(),
            section_ordinal: saturating_u32(op.section().ordinal()),
            index: saturating_u32(op.index()),
        }
    }
}

/// Narrows a count for event payloads, capping at `u32::MAX`.
#[inline]
#[must_use]
pub fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from snapshot application.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a reconciler starts applying a snapshot.
    fn on_apply_begin(&mut self, e: &ApplyBeginEvent) {
        _ = e;
    }

    /// Called when a reconciler produced a changeset.
    fn on_apply_end(&mut self, e: &ApplyEndEvent) {
        _ = e;
    }

    /// Called at the beginning of a phase.
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        _ = e;
    }

    /// Called at the end of a phase.
    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        _ = e;
    }

    /// Called with a per-application summary.
    fn on_apply_summary(&mut self, s: &ApplySummary) {
        _ = s;
    }

    /// Called with the operations of a changeset (requires `trace-rich`
    /// feature).
    #[cfg(feature = "trace-rich")]
    fn on_operations(&mut self, epoch: u64, ops: &[OperationRecord]) {
        _ = (epoch, ops);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`ApplyBeginEvent`].
    #[inline]
    pub fn apply_begin(&mut self, e: &ApplyBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_apply_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ApplyEndEvent`].
    #[inline]
    pub fn apply_end(&mut self, e: &ApplyEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_apply_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseBeginEvent`].
    #[inline]
    pub fn phase_begin(&mut self, e: &PhaseBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseEndEvent`].
    #[inline]
    pub fn phase_end(&mut self, e: &PhaseEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ApplySummary`].
    #[inline]
    pub fn apply_summary(&mut self, s: &ApplySummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_apply_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Returns `true` if events reach a sink.
    ///
    /// Lets callers skip building rich payloads nobody will see.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits operation records (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn operations(&mut self, epoch: u64, ops: &[OperationRecord]) {
        if let Some(s) = &mut self.sink {
            s.on_operations(epoch, ops);
        }
    }
}

// ---------------------------------------------------------------------------
// ApplySummaryBuilder
// ---------------------------------------------------------------------------

/// Collects phase timestamps during one application and produces an
/// [`ApplySummary`].
#[derive(Debug)]
pub struct ApplySummaryBuilder {
    begin: ApplyBeginEvent,
    phase_starts: [Option<u64>; 3],
    phase_ends: [Option<u64>; 3],
    changes: ChangeSummary,
}

impl ApplySummaryBuilder {
    /// Starts building a summary for the given application.
    #[must_use]
    pub fn new(begin: &ApplyBeginEvent) -> Self {
        Self {
            begin: *begin,
            phase_starts: [None; 3],
            phase_ends: [None; 3],
            changes: ChangeSummary::default(),
        }
    }

    /// Records the start of a phase.
    pub fn phase_begin(&mut self, phase: PhaseKind, timestamp_nanos: u64) {
        self.phase_starts[phase_index(phase)] = Some(timestamp_nanos);
    }

    /// Records the end of a phase.
    pub fn phase_end(&mut self, phase: PhaseKind, timestamp_nanos: u64) {
        self.phase_ends[phase_index(phase)] = Some(timestamp_nanos);
    }

    /// Sets the operation counts.
    pub fn set_changes(&mut self, changes: ChangeSummary) {
        self.changes = changes;
    }

    /// Consumes the builder and produces the final [`ApplySummary`].
    #[must_use]
    pub fn finish(self) -> ApplySummary {
        ApplySummary {
            epoch: self.begin.epoch,
            sections: self.begin.next_sections,
            items: self.begin.next_items,
            build_nanos: self.phase_duration(PhaseKind::Build),
            diff_nanos: self.phase_duration(PhaseKind::Diff),
            render_nanos: self.phase_duration(PhaseKind::Render),
            changes: self.changes,
        }
    }

    fn phase_duration(&self, phase: PhaseKind) -> u64 {
        let idx = phase_index(phase);
        match (self.phase_starts[idx], self.phase_ends[idx]) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            _ => 0,
        }
    }
}

/// Maps a [`PhaseKind`] to an array index.
const fn phase_index(phase: PhaseKind) -> usize {
    match phase {
        PhaseKind::Build => 0,
        PhaseKind::Diff => 1,
        PhaseKind::Render => 2,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_begin() -> ApplyBeginEvent {
        ApplyBeginEvent {
            epoch: 3,
            previous_sections: 2,
            previous_items: 11,
            next_sections: 3,
            next_items: 16,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_apply_begin(&sample_begin());
        sink.on_apply_end(&ApplyEndEvent {
            epoch: 3,
            changes: ChangeSummary::default(),
        });
        sink.on_apply_summary(&ApplySummaryBuilder::new(&sample_begin()).finish());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        assert!(!tracer.is_active());
        tracer.apply_begin(&sample_begin());
        tracer.phase_begin(&PhaseBeginEvent {
            epoch: 3,
            phase: PhaseKind::Diff,
            timestamp_nanos: 10,
        });
    }

    #[test]
    fn summary_builder_computes_durations() {
        let mut builder = ApplySummaryBuilder::new(&sample_begin());
        builder.phase_begin(PhaseKind::Build, 1_000);
        builder.phase_end(PhaseKind::Build, 1_400);
        builder.phase_begin(PhaseKind::Diff, 1_400);
        builder.phase_end(PhaseKind::Diff, 1_650);
        builder.phase_begin(PhaseKind::Render, 1_650);
        builder.phase_end(PhaseKind::Render, 3_650);
        builder.set_changes(ChangeSummary {
            inserted_sections: 1,
            inserted_items: 5,
            ..ChangeSummary::default()
        });

        let summary = builder.finish();
        assert_eq!(summary.epoch, 3);
        assert_eq!(summary.sections, 3);
        assert_eq!(summary.items, 16);
        assert_eq!(summary.build_nanos, 400);
        assert_eq!(summary.diff_nanos, 250);
        assert_eq!(summary.render_nanos, 2_000);
        assert_eq!(summary.changes.total(), 6);
    }

    #[test]
    fn summary_builder_missing_phases_are_zero() {
        let summary = ApplySummaryBuilder::new(&sample_begin()).finish();
        assert_eq!(summary.build_nanos, 0);
        assert_eq!(summary.diff_nanos, 0);
        assert_eq!(summary.render_nanos, 0);
    }

    #[test]
    fn saturating_u32_caps() {
        assert_eq!(saturating_u32(7), 7);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(saturating_u32(usize::MAX), u32::MAX);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            epochs: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_apply_begin(&mut self, e: &ApplyBeginEvent) {
                self.epochs.push(e.epoch);
            }
        }

        let mut sink = RecordingSink { epochs: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        assert!(tracer.is_active());
        tracer.apply_begin(&sample_begin());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.epochs, &[3]);
    }
}
