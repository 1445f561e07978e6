// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sample listing data for the walkthrough.
//!
//! Every call allocates fresh ids, so calling a function twice yields
//! distinct items with identical text.

use shelf_core::app::{AppItem, AppSection, AppSnapshot, Feature, RankingFeature, ThemeFeature};
use shelf_core::item::ItemIdAllocator;
use shelf_core::snapshot::{ConstructionError, SnapshotBuilder};

/// Five editorial highlights.
pub(crate) fn features(ids: &mut ItemIdAllocator) -> Vec<AppItem> {
    [
        ("지금 이용 가능", "디즈니+", "닥터 후"),
        ("지금 이용 가능", "Wavve", "돌싱글즈5"),
        ("오늘 밤 22:30", "Wavve", "함부로 대해줘"),
        ("지금 이용 가능", "티빙", "졸업"),
        ("현재 진행 중", "듀오링고", "가족과 함께 언어를 배워보세요"),
    ]
    .into_iter()
    .map(|(label, title, description)| {
        Feature::new(ids.allocate(), label, title, description).into()
    })
    .collect()
}

/// Six ranking rows.
pub(crate) fn ranking_features(ids: &mut ItemIdAllocator) -> Vec<AppItem> {
    [
        ("Temu: 억만장자처럼 쇼핑하기", "어디서나 무료 배송!", false),
        ("TikTok Lite", "다채로운 즐거움 틱톡 라이트", true),
        ("GC 오토마우스", "생산성", true),
        (
            "오토클릭 - 오토매틱 클리커 (Auto Clicker)",
            "오토마우스, 자동터치, 오토클릭",
            true,
        ),
        ("삼쩜삼 - 세금 신고/환급 도우미", "잠자고 있는 내 세금 얼마일까?", false),
        ("배달요기요 - 기다림 없는 맛집 배달앱", "매일매일 할인 받는 배달앱", false),
    ]
    .into_iter()
    .map(|(title, description, in_app_purchase)| {
        RankingFeature::new(ids.allocate(), title, description, in_app_purchase).into()
    })
    .collect()
}

/// Five themed collections.
pub(crate) fn theme_features(ids: &mut ItemIdAllocator) -> Vec<AppItem> {
    [
        "필수 금융 앱 10",
        "필수 생산성 앱 10",
        "필수 엔터테인먼트 앱 10",
        "필수 사진 앱 10",
        "필수 마음챙김 앱 10",
    ]
    .into_iter()
    .map(|title| ThemeFeature::new(ids.allocate(), title).into())
    .collect()
}

/// The listing shown on first launch: highlights followed by rankings.
///
/// # Errors
///
/// Never fails in practice; ids come from a single allocator.
pub(crate) fn initial_snapshot(
    ids: &mut ItemIdAllocator,
) -> Result<AppSnapshot, ConstructionError<AppSection>> {
    SnapshotBuilder::new()
        .append_section(AppSection::Feature, features(ids))
        .append_section(AppSection::RankingFeature, ranking_features(ids))
        .finish()
}
