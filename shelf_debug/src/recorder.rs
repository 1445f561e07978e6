// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records, each starting with a one-byte tag.
//! [`decode`] reads them back as an iterator of [`RecordedEvent`].
//!
//! Operation records ([`on_operations`](TraceSink::on_operations)) are stored
//! as a count followed by that many fixed-size entries.

use shelf_core::reconcile::{ChangeSummary, OperationKind};
use shelf_core::trace::{
    ApplyBeginEvent, ApplyEndEvent, ApplySummary, OperationRecord, PhaseBeginEvent, PhaseEndEvent,
    PhaseKind, TraceSink, saturating_u32,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_APPLY_BEGIN: u8 = 1;
const TAG_APPLY_END: u8 = 2;
const TAG_PHASE_BEGIN: u8 = 3;
const TAG_PHASE_END: u8 = 4;
const TAG_APPLY_SUMMARY: u8 = 5;
const TAG_OPERATIONS: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_phase(&mut self, p: PhaseKind) {
        self.write_u8(match p {
            PhaseKind::Build => 0,
            PhaseKind::Diff => 1,
            PhaseKind::Render => 2,
        });
    }

    fn write_changes(&mut self, c: &ChangeSummary) {
        for v in [
            c.removed_items,
            c.removed_sections,
            c.moved_sections,
            c.moved_items,
            c.inserted_sections,
            c.inserted_items,
            c.reloaded_items,
        ] {
            self.write_u32(v);
        }
    }

    fn write_operation_kind(&mut self, k: OperationKind) {
        self.write_u8(match k {
            OperationKind::RemoveItem => 0,
            OperationKind::RemoveSection => 1,
            OperationKind::MoveSection => 2,
            OperationKind::MoveItem => 3,
            OperationKind::InsertSection => 4,
            OperationKind::InsertItem => 5,
            OperationKind::ReloadItem => 6,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_apply_begin(&mut self, e: &ApplyBeginEvent) {
        self.write_u8(TAG_APPLY_BEGIN);
        self.write_u64(e.epoch);
        self.write_u32(e.previous_sections);
        self.write_u32(e.previous_items);
        self.write_u32(e.next_sections);
        self.write_u32(e.next_items);
    }

    fn on_apply_end(&mut self, e: &ApplyEndEvent) {
        self.write_u8(TAG_APPLY_END);
        self.write_u64(e.epoch);
        self.write_changes(&e.changes);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.write_u8(TAG_PHASE_BEGIN);
        self.write_u64(e.epoch);
        self.write_phase(e.phase);
        self.write_u64(e.timestamp_nanos);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.write_u8(TAG_PHASE_END);
        self.write_u64(e.epoch);
        self.write_phase(e.phase);
        self.write_u64(e.timestamp_nanos);
    }

    fn on_apply_summary(&mut self, s: &ApplySummary) {
        self.write_u8(TAG_APPLY_SUMMARY);
        self.write_u64(s.epoch);
        self.write_u32(s.sections);
        self.write_u32(s.items);
        self.write_u64(s.build_nanos);
        self.write_u64(s.diff_nanos);
        self.write_u64(s.render_nanos);
        self.write_changes(&s.changes);
    }

    fn on_operations(&mut self, epoch: u64, ops: &[OperationRecord]) {
        let count = saturating_u32(ops.len());
        self.write_u8(TAG_OPERATIONS);
        self.write_u64(epoch);
        self.write_u32(count);
        for op in ops.iter().take(count as usize) {
            self.write_operation_kind(op.kind);
            self.write_u32(op.section_ordinal);
            self.write_u32(op.index);
        }
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// An [`ApplyBeginEvent`].
    ApplyBegin(ApplyBeginEvent),
    /// An [`ApplyEndEvent`].
    ApplyEnd(ApplyEndEvent),
    /// A [`PhaseBeginEvent`].
    PhaseBegin(PhaseBeginEvent),
    /// A [`PhaseEndEvent`].
    PhaseEnd(PhaseEndEvent),
    /// An [`ApplySummary`].
    ApplySummary(ApplySummary),
    /// Operation records for an epoch.
    Operations {
        /// Epoch of the changeset.
        epoch: u64,
        /// Records in changeset order.
        records: Vec<OperationRecord>,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag, unknown enum value, or
/// truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_phase(&mut self) -> Option<PhaseKind> {
        Some(match self.read_u8()? {
            0 => PhaseKind::Build,
            1 => PhaseKind::Diff,
            2 => PhaseKind::Render,
            _ => return None,
        })
    }

    fn read_changes(&mut self) -> Option<ChangeSummary> {
        Some(ChangeSummary {
            removed_items: self.read_u32()?,
            removed_sections: self.read_u32()?,
            moved_sections: self.read_u32()?,
            moved_items: self.read_u32()?,
            inserted_sections: self.read_u32()?,
            inserted_items: self.read_u32()?,
            reloaded_items: self.read_u32()?,
        })
    }

    fn read_operation_kind(&mut self) -> Option<OperationKind> {
        Some(match self.read_u8()? {
            0 => OperationKind::RemoveItem,
            1 => OperationKind::RemoveSection,
            2 => OperationKind::MoveSection,
            3 => OperationKind::MoveItem,
            4 => OperationKind::InsertSection,
            5 => OperationKind::InsertItem,
            6 => OperationKind::ReloadItem,
            _ => return None,
        })
    }

    fn decode_apply_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ApplyBegin(ApplyBeginEvent {
            epoch: self.read_u64()?,
            previous_sections: self.read_u32()?,
            previous_items: self.read_u32()?,
            next_sections: self.read_u32()?,
            next_items: self.read_u32()?,
        }))
    }

    fn decode_apply_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ApplyEnd(ApplyEndEvent {
            epoch: self.read_u64()?,
            changes: self.read_changes()?,
        }))
    }

    fn decode_phase_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseBegin(PhaseBeginEvent {
            epoch: self.read_u64()?,
            phase: self.read_phase()?,
            timestamp_nanos: self.read_u64()?,
        }))
    }

    fn decode_phase_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseEnd(PhaseEndEvent {
            epoch: self.read_u64()?,
            phase: self.read_phase()?,
            timestamp_nanos: self.read_u64()?,
        }))
    }

    fn decode_apply_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ApplySummary(ApplySummary {
            epoch: self.read_u64()?,
            sections: self.read_u32()?,
            items: self.read_u32()?,
            build_nanos: self.read_u64()?,
            diff_nanos: self.read_u64()?,
            render_nanos: self.read_u64()?,
            changes: self.read_changes()?,
        }))
    }

    fn decode_operations(&mut self) -> Option<RecordedEvent> {
        let epoch = self.read_u64()?;
        let count = self.read_u32()? as usize;
        // Each record is 9 bytes; a count larger than what is left means the
        // recording is truncated.
        if count > (self.data.len() - self.pos) / 9 {
            return None;
        }
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(OperationRecord {
                kind: self.read_operation_kind()?,
                section_ordinal: self.read_u32()?,
                index: self.read_u32()?,
            });
        }
        Some(RecordedEvent::Operations { epoch, records })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_APPLY_BEGIN => self.decode_apply_begin(),
            TAG_APPLY_END => self.decode_apply_end(),
            TAG_PHASE_BEGIN => self.decode_phase_begin(),
            TAG_PHASE_END => self.decode_phase_end(),
            TAG_APPLY_SUMMARY => self.decode_apply_summary(),
            TAG_OPERATIONS => self.decode_operations(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> ApplySummary {
        ApplySummary {
            epoch: 7,
            sections: 2,
            items: 11,
            build_nanos: 1_200,
            diff_nanos: 3_400,
            render_nanos: 15_000,
            changes: ChangeSummary {
                inserted_sections: 2,
                inserted_items: 11,
                ..ChangeSummary::default()
            },
        }
    }

    #[test]
    fn records_a_whole_application() {
        let mut rec = RecorderSink::new();
        let begin = ApplyBeginEvent {
            epoch: 7,
            previous_sections: 0,
            previous_items: 0,
            next_sections: 2,
            next_items: 11,
        };
        let phase_begin = PhaseBeginEvent {
            epoch: 7,
            phase: PhaseKind::Diff,
            timestamp_nanos: 2_000,
        };
        let phase_end = PhaseEndEvent {
            epoch: 7,
            phase: PhaseKind::Diff,
            timestamp_nanos: 5_400,
        };
        let end = ApplyEndEvent {
            epoch: 7,
            changes: sample_summary().changes,
        };
        rec.on_apply_begin(&begin);
        rec.on_phase_begin(&phase_begin);
        rec.on_phase_end(&phase_end);
        rec.on_apply_end(&end);
        rec.on_apply_summary(&sample_summary());

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(
            events,
            vec![
                RecordedEvent::ApplyBegin(begin),
                RecordedEvent::PhaseBegin(phase_begin),
                RecordedEvent::PhaseEnd(phase_end),
                RecordedEvent::ApplyEnd(end),
                RecordedEvent::ApplySummary(sample_summary()),
            ]
        );
    }

    #[test]
    fn operations_keep_their_order() {
        let mut rec = RecorderSink::new();
        let ops = [
            OperationRecord {
                kind: OperationKind::MoveItem,
                section_ordinal: 1,
                index: 2,
            },
            OperationRecord {
                kind: OperationKind::InsertItem,
                section_ordinal: 1,
                index: 0,
            },
        ];
        rec.on_operations(3, &ops);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        match &events[..] {
            [RecordedEvent::Operations { epoch, records }] => {
                assert_eq!(*epoch, 3);
                assert_eq!(records, &ops);
            }
            other => panic!("expected one Operations event, got {other:?}"),
        }
    }

    #[test]
    fn truncated_recording_stops_cleanly() {
        let mut rec = RecorderSink::new();
        rec.on_apply_summary(&sample_summary());
        rec.on_apply_summary(&sample_summary());
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 3];
        assert_eq!(decode(cut).count(), 1);
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        assert_eq!(decode(&[0xff, 1, 2, 3]).count(), 0);
        assert_eq!(decode(&[]).count(), 0);
    }

    #[test]
    fn unknown_phase_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_phase_end(&PhaseEndEvent {
            epoch: 1,
            phase: PhaseKind::Render,
            timestamp_nanos: 10,
        });
        rec.on_apply_summary(&sample_summary());
        let mut bytes = rec.into_bytes();
        // Phase byte follows the tag and the epoch.
        assert_eq!(bytes[9], 2);
        bytes[9] = 3;
        assert_eq!(decode(&bytes).count(), 0);
    }

    #[test]
    fn oversized_operation_count_is_rejected() {
        let mut bytes = vec![TAG_OPERATIONS];
        bytes.extend_from_slice(&1_u64.to_le_bytes());
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(decode(&bytes).count(), 0);
    }
}
