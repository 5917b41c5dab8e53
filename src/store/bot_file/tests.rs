// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::rstest;

use super::{load_bot, save_bot, StoreError, WriteDurability};
use crate::model::fixtures::bot_linear_flow;

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!(
            "triton-{prefix}-{}-{nanos}-{counter}",
            std::process::id()
        ));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[rstest]
#[case::best_effort(WriteDurability::BestEffort)]
#[case::durable(WriteDurability::Durable)]
fn save_and_load_roundtrips(#[case] durability: WriteDurability) {
    let tmp = TempDir::new("roundtrip");
    let path = tmp.path().join("bot.json");
    let bot = bot_linear_flow();

    save_bot(&path, &bot, durability).expect("save");
    let loaded = load_bot(&path).expect("load");

    assert_eq!(loaded, bot);
}

#[test]
fn save_overwrites_an_existing_file_atomically() {
    let tmp = TempDir::new("overwrite");
    let path = tmp.path().join("bot.json");
    let mut bot = bot_linear_flow();

    save_bot(&path, &bot, WriteDurability::BestEffort).expect("first save");
    bot.set_name("Renamed");
    bot.bump_rev();
    save_bot(&path, &bot, WriteDurability::BestEffort).expect("second save");

    let loaded = load_bot(&path).expect("load");
    assert_eq!(loaded.name(), "Renamed");
    assert_eq!(loaded.rev(), 1);

    // No temp litter left behind.
    let leftovers = fs::read_dir(tmp.path())
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn save_creates_missing_parent_directories() {
    let tmp = TempDir::new("nested");
    let path = tmp.path().join("deeply/nested/bot.json");

    save_bot(&path, &bot_linear_flow(), WriteDurability::BestEffort).expect("save");
    assert!(path.is_file());
}

#[test]
fn load_missing_file_is_an_io_error() {
    let tmp = TempDir::new("missing");
    let path = tmp.path().join("absent.json");

    let err = load_bot(&path).expect_err("missing file");
    let StoreError::Io { path: err_path, .. } = err else {
        panic!("expected io error, got {err}");
    };
    assert_eq!(err_path, path);
}

#[test]
fn load_rejects_malformed_json() {
    let tmp = TempDir::new("malformed");
    let path = tmp.path().join("bot.json");
    fs::write(&path, b"{ not json").expect("write");

    let err = load_bot(&path).expect_err("malformed json");
    assert!(matches!(err, StoreError::Json { .. }), "got {err}");
}

#[test]
fn load_rejects_a_document_that_violates_invariants() {
    let tmp = TempDir::new("invalid");
    let path = tmp.path().join("bot.json");
    let bot = bot_linear_flow();

    save_bot(&path, &bot, WriteDurability::BestEffort).expect("save");

    // Corrupt on disk: point a block at a step the index does not have.
    let contents = fs::read_to_string(&path).expect("read");
    let mut value: serde_json::Value = serde_json::from_str(&contents).expect("json");
    value["graph"]["blocks"]["by_id"]["b:hello"]["step_ids"][0] =
        serde_json::Value::String("s:ghost".to_owned());
    fs::write(&path, serde_json::to_string(&value).expect("serialize")).expect("rewrite");

    let err = load_bot(&path).expect_err("invalid document");
    assert!(matches!(err, StoreError::Invalid { .. }), "got {err}");
}

#[test]
fn saved_json_tags_steps_by_type() {
    let tmp = TempDir::new("tagged");
    let path = tmp.path().join("bot.json");

    save_bot(&path, &bot_linear_flow(), WriteDurability::BestEffort).expect("save");
    let contents = fs::read_to_string(&path).expect("read");

    assert!(contents.contains("\"type\": \"start\""));
    assert!(contents.contains("\"type\": \"choice_input\""));
}
