// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use landmark_data::{
    DEFAULT_SEARCH_LIMIT, Dataset, Searcher, UrlState, load_landmarks, organization_landmarks,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RawLandmark {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: &'static str,
    year: i32,
    organization: &'static str,
    description: &'static str,
    coordinates: [f64; 2],
    capability_id: &'static str,
    zoom_threshold: f64,
}

const ORGS: [&str; 4] = ["OpenAI", "Google Brain", "Meta AI Research", "Anthropic"];

fn landmarks_json(n: usize) -> String {
    let raw: Vec<RawLandmark> = (0..n)
        .map(|i| RawLandmark {
            id: format!("landmark-{i}"),
            name: format!("Landmark {i}"),
            kind: "paper",
            year: 2017 + (i % 8) as i32,
            organization: ORGS[i % ORGS.len()],
            description: "generated",
            coordinates: [(i * 13 % 2600) as f64, (i * 7 % 2600) as f64],
            capability_id: "generated",
            zoom_threshold: [-1.0, 0.0, 1.0][i % 3],
        })
        .collect();
    serde_json::to_string(&raw).expect("serializing generated landmarks")
}

fn bench_load(c: &mut Criterion) {
    let json = landmarks_json(200);
    c.bench_function("load_landmarks_200", |b| {
        b.iter(|| black_box(load_landmarks(black_box(&json)).map(|v| v.len())));
    });
}

fn bench_org_matching(c: &mut Criterion) {
    let landmarks = load_landmarks(&landmarks_json(200)).expect("generated landmarks are valid");
    let orgs = landmark_data::load_organizations(
        r##"[{ "id": "meta", "name": "Meta AI", "description": "", "color": "#0668E1" }]"##,
    )
    .expect("organization fixture is valid");
    c.bench_function("organization_landmarks_200", |b| {
        b.iter(|| black_box(organization_landmarks(&orgs[0], &landmarks).len()));
    });
}

fn bench_search(c: &mut Criterion) {
    let landmarks = load_landmarks(&landmarks_json(200)).expect("generated landmarks are valid");
    let data = Dataset::new(Vec::new(), landmarks, Vec::new());
    let searcher = Searcher::default();
    c.bench_function("search_200", |b| {
        b.iter(|| black_box(searcher.search(&data, black_box("landmark 42"), DEFAULT_SEARCH_LIMIT).len()));
    });
}

fn bench_url_state(c: &mut Criterion) {
    let query = "?lat=1234.57&lng=800.00&zoom=2&entity=landmark-42&entityType=landmark&org=openai";
    c.bench_function("url_state_parse_and_encode", |b| {
        b.iter(|| black_box(UrlState::parse(black_box(query)).to_query()));
    });
}

criterion_group!(
    benches,
    bench_load,
    bench_org_matching,
    bench_search,
    bench_url_state
);
criterion_main!(benches);
