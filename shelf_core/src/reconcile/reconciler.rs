// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stateful reconciler.

#[cfg(feature = "trace-rich")]
use alloc::vec::Vec;

#[cfg(feature = "trace-rich")]
use crate::trace::OperationRecord;

use super::diff::diff;
use super::ops::{ChangeSummary, Changeset};
use crate::backend::Renderer;
use crate::item::Item;
use crate::section::SectionKind;
use crate::snapshot::Snapshot;
use crate::trace::{ApplyBeginEvent, ApplyEndEvent, Tracer, saturating_u32};

/// Remembers the most recently applied snapshot and diffs each new one
/// against it.
///
/// A new reconciler holds no snapshot, so the first application yields only
/// insertions.
#[derive(Clone, Debug)]
pub struct Reconciler<S, I> {
    current: Option<Snapshot<S, I>>,
    epoch: u64,
}

impl<S, I> Default for Reconciler<S, I> {
    fn default() -> Self {
        Self {
            current: None,
            epoch: 0,
        }
    }
}

impl<S: SectionKind, I: Item> Reconciler<S, I> {
    /// Creates a reconciler with nothing applied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently applied snapshot, if any.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot<S, I>> {
        self.current.as_ref()
    }

    /// Returns the number of snapshots applied so far.
    ///
    /// [`reset`](Self::reset) does not rewind the epoch.
    #[inline]
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Diffs `snapshot` against the current one and makes it current.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot<S, I>) -> Changeset<S, I> {
        self.apply_snapshot_traced(snapshot, &mut Tracer::none())
    }

    /// Like [`apply_snapshot`](Self::apply_snapshot), reporting begin and end
    /// events (and per-operation records with `trace-rich`) to `tracer`.
    pub fn apply_snapshot_traced(
        &mut self,
        snapshot: Snapshot<S, I>,
        tracer: &mut Tracer<'_>,
    ) -> Changeset<S, I> {
        let epoch = self.epoch + 1;
        tracer.apply_begin(&self.begin_event(epoch, &snapshot));

        let changes = diff(self.current.as_ref(), &snapshot);

        #[cfg(feature = "trace-rich")]
        if tracer.is_active() {
            let records: Vec<OperationRecord> = changes.iter().map(Into::into).collect();
            tracer.operations(epoch, &records);
        }
        tracer.apply_end(&ApplyEndEvent {
            epoch,
            changes: changes.summary(),
        });

        self.current = Some(snapshot);
        self.epoch = epoch;
        changes
    }

    /// Diffs `snapshot`, hands the changeset to `renderer`, and makes the
    /// snapshot current once the renderer accepted it.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error. The previously applied snapshot then
    /// stays current and the epoch is unchanged.
    pub fn apply_to<R: Renderer<S, I>>(
        &mut self,
        snapshot: Snapshot<S, I>,
        renderer: &mut R,
    ) -> Result<ChangeSummary, R::Error> {
        let changes = diff(self.current.as_ref(), &snapshot);
        renderer.apply(&changes)?;
        self.current = Some(snapshot);
        self.epoch += 1;
        Ok(changes.summary())
    }

    /// Forgets the applied snapshot; the next application is a first load.
    pub fn reset(&mut self) {
        self.current = None;
    }

    fn begin_event(&self, epoch: u64, next: &Snapshot<S, I>) -> ApplyBeginEvent {
        let (previous_sections, previous_items) = self
            .current
            .as_ref()
            .map_or((0, 0), |s| (s.number_of_sections(), s.number_of_items()));
        ApplyBeginEvent {
            epoch,
            previous_sections: saturating_u32(previous_sections),
            previous_items: saturating_u32(previous_items),
            next_sections: saturating_u32(next.number_of_sections()),
            next_items: saturating_u32(next.number_of_items()),
        }
    }
}
