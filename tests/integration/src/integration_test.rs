//! End-to-end save flow
//!
//! Exercises path resolution, header building and a writer that lays the
//! header out the way `.safetensors` files do: an 8-byte little-endian
//! length followed by a JSON object whose `__metadata__` entry holds the
//! string-to-string header.

use ckpt_fs::{FilenameMode, resolve};
use ckpt_meta::{HeaderMap, MetadataMode, build};
use ckpt_save::{
    ArtifactWriter, SaveInputs, SaveOptions, SavePipeline, SaveSession, WriterError,
};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Writes a header-only artifact in the safetensors layout.
struct HeaderOnlyWriter;

impl ArtifactWriter for HeaderOnlyWriter {
    fn write_artifact(&mut self, path: &Path, header: &HeaderMap) -> Result<(), WriterError> {
        let body = serde_json::to_vec(&json!({ "__metadata__": header }))?;
        let mut bytes = (body.len() as u64).to_le_bytes().to_vec();
        bytes.extend_from_slice(&body);
        fs::write(path, bytes)?;
        Ok(())
    }
}

fn read_metadata(path: &Path) -> Map<String, Value> {
    let bytes = fs::read(path).unwrap();
    let mut len = [0u8; 8];
    len.copy_from_slice(&bytes[..8]);
    let len = u64::from_le_bytes(len) as usize;
    let header: Value = serde_json::from_slice(&bytes[8..8 + len]).unwrap();
    match header.get("__metadata__") {
        Some(Value::Object(map)) => map.clone(),
        other => panic!("missing __metadata__: {:?}", other),
    }
}

#[test]
fn test_components_compose_without_the_pipeline() {
    let temp = TempDir::new().unwrap();

    let resolved = resolve(temp.path(), "manual", FilenameMode::SmartCounter, None).unwrap();
    let header = build(
        MetadataMode::Replace,
        None,
        None,
        false,
        r#"{"format": "pt", "step": 1200}"#,
    )
    .unwrap();
    HeaderOnlyWriter
        .write_artifact(&resolved.path, &header)
        .unwrap();

    let metadata = read_metadata(&resolved.path);
    assert_eq!(metadata["format"], json!("pt"));
    assert_eq!(metadata["step"], json!("1200"));
}

#[test]
fn test_merge_save_embeds_string_only_header() {
    let temp = TempDir::new().unwrap();
    let pipeline = SavePipeline::new(temp.path());
    let options = SaveOptions::parse(
        r#"
filename_prefix = "checkpoints/MyModel"
metadata_mode = "merge_minimal"
metadata_json = '{"author": "Alex", "training": {"epochs": 80}, "prompt": "OVERRIDE"}'
prompt_override = "a photo of a cat"
"#,
        ckpt_save::ConfigFormat::Toml,
    )
    .unwrap();
    let extra = match json!({"workflow": {"links": [[1, 2]]}, "seed": 42}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    let inputs = SaveInputs {
        prompt: Some(json!({"3": {"class_type": "KSampler"}})),
        extra_info: Some(extra),
    };

    let report = pipeline
        .save(&options, &inputs, None, &mut HeaderOnlyWriter)
        .unwrap();

    let metadata = read_metadata(&report.path);
    assert!(metadata.values().all(Value::is_string));
    assert_eq!(metadata["prompt"], json!("OVERRIDE"));
    assert_eq!(metadata["author"], json!("Alex"));
    assert_eq!(metadata["training"], json!("{\"epochs\": 80}"));
    assert_eq!(metadata["workflow"], json!("{\"links\": [[1, 2]]}"));
    assert_eq!(metadata["seed"], json!("42"));
    assert_eq!(report.prompt(), "OVERRIDE");
}

#[test]
fn test_session_saves_are_monotonic() {
    let temp = TempDir::new().unwrap();
    let mut session = SaveSession::new(SavePipeline::new(temp.path()));
    let options = SaveOptions {
        filename_prefix: "loras/style".into(),
        ..SaveOptions::default()
    };
    let inputs = SaveInputs::default();

    let mut names = Vec::new();
    for _ in 0..4 {
        let report = session
            .save(&options, &inputs, &mut HeaderOnlyWriter)
            .unwrap();
        names.push(report.path.file_name().unwrap().to_string_lossy().into_owned());
    }
    assert_eq!(
        names,
        vec![
            "style.safetensors",
            "style_00001_.safetensors",
            "style_00002_.safetensors",
            "style_00003_.safetensors",
        ]
    );

    // Deleting the newest file must not make the next save reuse its name
    fs::remove_file(temp.path().join("loras").join("style_00003_.safetensors")).unwrap();
    let next = session
        .save(&options, &inputs, &mut HeaderOnlyWriter)
        .unwrap();
    assert_eq!(next.counter, Some(4));
}

#[test]
fn test_overwrite_mode_replaces_header() {
    let temp = TempDir::new().unwrap();
    let pipeline = SavePipeline::new(temp.path());
    let mut options = SaveOptions {
        filename_prefix: "final".into(),
        filename_mode: FilenameMode::NoCounterOverwrite,
        metadata_json: r#"{"rev": 1}"#.into(),
        ..SaveOptions::default()
    };

    let first = pipeline
        .save(&options, &SaveInputs::default(), None, &mut HeaderOnlyWriter)
        .unwrap();
    options.metadata_json = r#"{"rev": 2}"#.into();
    let second = pipeline
        .save(&options, &SaveInputs::default(), None, &mut HeaderOnlyWriter)
        .unwrap();

    assert_eq!(first.path, second.path);
    assert!(!first.replaced_existing);
    assert!(second.replaced_existing);
    assert_eq!(read_metadata(&second.path)["rev"], json!("2"));
}
