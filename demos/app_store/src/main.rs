// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! App-store listing demo that exercises reconciliation and tracing.
//!
//! Walks the listing through a scripted sequence of data changes. Each step
//! builds a snapshot, reconciles it against the previous one, and applies the
//! changeset to a [`ListView`](shelf_render::ListView). Events go to both a
//! [`PrettyPrintSink`](shelf_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](shelf_debug::recorder::RecorderSink), and the recording
//! is exported as a Chrome trace JSON file.

mod mocks;

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use kurbo::Size;
use shelf_core::app::{AppItem, AppSection, AppSnapshot, ThemeFeature};
use shelf_core::item::{Item, ItemIdAllocator};
use shelf_core::reconcile::Reconciler;
use shelf_core::snapshot::{Snapshot, SnapshotBuilder};
use shelf_core::trace::{
    ApplyBeginEvent, ApplyEndEvent, ApplySummary, ApplySummaryBuilder, OperationRecord,
    PhaseBeginEvent, PhaseEndEvent, PhaseKind, TraceSink, Tracer, saturating_u32,
};
use shelf_debug::pretty::PrettyPrintSink;
use shelf_debug::recorder::RecorderSink;
use shelf_render::ListView;

/// Visible area of the simulated list, in points.
const CONTAINER: Size = Size::new(390.0, 844.0);

/// Forwards every event to both sinks.
struct Sinks {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl TraceSink for Sinks {
    fn on_apply_begin(&mut self, e: &ApplyBeginEvent) {
        self.pretty.on_apply_begin(e);
        self.recorder.on_apply_begin(e);
    }

    fn on_apply_end(&mut self, e: &ApplyEndEvent) {
        self.pretty.on_apply_end(e);
        self.recorder.on_apply_end(e);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.pretty.on_phase_begin(e);
        self.recorder.on_phase_begin(e);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.pretty.on_phase_end(e);
        self.recorder.on_phase_end(e);
    }

    fn on_apply_summary(&mut self, s: &ApplySummary) {
        self.pretty.on_apply_summary(s);
        self.recorder.on_apply_summary(s);
    }

    fn on_operations(&mut self, epoch: u64, ops: &[OperationRecord]) {
        self.pretty.on_operations(epoch, ops);
        self.recorder.on_operations(epoch, ops);
    }
}

/// One scripted data change.
struct Step {
    label: &'static str,
    build: fn(&AppSnapshot, &mut ItemIdAllocator) -> Result<AppSnapshot, Box<dyn Error>>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let now = || u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);

    let mut sinks = Sinks {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout())).verbose(true),
        recorder: RecorderSink::new(),
    };
    let mut ids = ItemIdAllocator::new();
    let mut reconciler: Reconciler<AppSection, AppItem> = Reconciler::new();
    let mut view: ListView<AppSection, AppItem> = ListView::new();

    let steps = [
        Step {
            label: "initial load",
            build: |_, ids| Ok(mocks::initial_snapshot(ids)?),
        },
        Step {
            label: "add themed collections",
            build: add_themes,
        },
        Step {
            label: "rotate top rankings",
            build: rotate_rankings,
        },
        Step {
            label: "retitle a collection",
            build: retitle_first_theme,
        },
        Step {
            label: "drop themed collections",
            build: drop_themes,
        },
        Step {
            label: "refresh without changes",
            build: |current, _| Ok(current.clone()),
        },
    ];

    for step in steps {
        println!("== {} ==", step.label);
        let epoch = reconciler.epoch() + 1;
        let current = reconciler.current().cloned().unwrap_or_default();

        let build_start = now();
        emit_phase(&mut sinks, epoch, PhaseKind::Build, build_start, true);
        let snapshot = (step.build)(&current, &mut ids)?;
        let build_end = now();
        emit_phase(&mut sinks, epoch, PhaseKind::Build, build_end, false);

        let begin = ApplyBeginEvent {
            epoch,
            previous_sections: saturating_u32(current.number_of_sections()),
            previous_items: saturating_u32(current.number_of_items()),
            next_sections: saturating_u32(snapshot.number_of_sections()),
            next_items: saturating_u32(snapshot.number_of_items()),
        };
        let mut summary = ApplySummaryBuilder::new(&begin);
        summary.phase_begin(PhaseKind::Build, build_start);
        summary.phase_end(PhaseKind::Build, build_end);

        let diff_start = now();
        emit_phase(&mut sinks, epoch, PhaseKind::Diff, diff_start, true);
        let changes = {
            let mut tracer = Tracer::new(&mut sinks);
            reconciler.apply_snapshot_traced(snapshot, &mut tracer)
        };
        let diff_end = now();
        emit_phase(&mut sinks, epoch, PhaseKind::Diff, diff_end, false);
        summary.phase_begin(PhaseKind::Diff, diff_start);
        summary.phase_end(PhaseKind::Diff, diff_end);

        // Diff and render are timed separately, so this bypasses `apply_to`.
        // The reconciler has already advanced; a render error ends the demo
        // before that snapshot could be diffed against again.
        let render_start = now();
        emit_phase(&mut sinks, epoch, PhaseKind::Render, render_start, true);
        view.apply_changeset(&changes)?;
        let render_end = now();
        emit_phase(&mut sinks, epoch, PhaseKind::Render, render_end, false);
        summary.phase_begin(PhaseKind::Render, render_start);
        summary.phase_end(PhaseKind::Render, render_end);

        summary.set_changes(changes.summary());
        sinks.on_apply_summary(&summary.finish());
    }

    print_layout(&view);
    let stats = view.stats();
    println!(
        "cells: created={} reused={} discarded={} configurations={}",
        stats.cells_created, stats.cells_reused, stats.cells_discarded, stats.configurations,
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let mut writer = BufWriter::new(File::create(path)?);
    shelf_debug::chrome::export(sinks.recorder.as_bytes(), &mut writer)?;
    println!("Wrote {path} ({} snapshots)", reconciler.epoch());
    Ok(())
}

fn emit_phase(sinks: &mut Sinks, epoch: u64, phase: PhaseKind, timestamp_nanos: u64, begin: bool) {
    if begin {
        sinks.on_phase_begin(&PhaseBeginEvent {
            epoch,
            phase,
            timestamp_nanos,
        });
    } else {
        sinks.on_phase_end(&PhaseEndEvent {
            epoch,
            phase,
            timestamp_nanos,
        });
    }
}

fn add_themes(
    current: &AppSnapshot,
    ids: &mut ItemIdAllocator,
) -> Result<AppSnapshot, Box<dyn Error>> {
    let mut builder = SnapshotBuilder::new();
    for section in current.sections() {
        builder = builder.append_section(section.kind(), section.items().iter().cloned());
    }
    Ok(builder
        .append_section(AppSection::ThemeFeature, mocks::theme_features(ids))
        .finish_in_default_order()?)
}

fn rotate_rankings(
    current: &AppSnapshot,
    _: &mut ItemIdAllocator,
) -> Result<AppSnapshot, Box<dyn Error>> {
    Ok(Snapshot::build(current.sections().iter().map(|section| {
        let mut items = section.items().to_vec();
        if section.kind() == AppSection::RankingFeature && items.len() >= 3 {
            items[..3].rotate_right(1);
        }
        (section.kind(), items)
    }))?)
}

fn retitle_first_theme(
    current: &AppSnapshot,
    _: &mut ItemIdAllocator,
) -> Result<AppSnapshot, Box<dyn Error>> {
    let mut retitled = false;
    Ok(Snapshot::build(current.sections().iter().map(|section| {
        let items: Vec<AppItem> = section
            .items()
            .iter()
            .map(|item| match item {
                AppItem::ThemeFeature(theme) if !retitled => {
                    retitled = true;
                    ThemeFeature::new(item.id(), format!("{} (업데이트)", theme.title)).into()
                }
                other => other.clone(),
            })
            .collect();
        (section.kind(), items)
    }))?)
}

fn drop_themes(
    current: &AppSnapshot,
    _: &mut ItemIdAllocator,
) -> Result<AppSnapshot, Box<dyn Error>> {
    Ok(Snapshot::build(
        current
            .sections()
            .iter()
            .filter(|section| section.kind() != AppSection::ThemeFeature)
            .map(|section| (section.kind(), section.items().to_vec())),
    )?)
}

fn print_layout(view: &ListView<AppSection, AppItem>) {
    let mut top = 0.0;
    for section in view.sections() {
        let layout = section.kind().layout();
        let height = layout.section_height(CONTAINER, section.len());
        let header = section.metadata().header_title.unwrap_or("-");
        println!(
            "{:?} at y={top:.1} height={height:.1} header={header}",
            section.kind()
        );
        for (cell, frame) in section
            .cells()
            .iter()
            .zip(layout.item_frames(CONTAINER, section.len()))
        {
            println!(
                "  {:?} {} [{:.1}, {:.1}, {:.1}x{:.1}]",
                cell.handle(),
                cell.item().title(),
                frame.x0,
                frame.y0 + top,
                frame.width(),
                frame.height(),
            );
        }
        top += height;
    }
}
