//! Shared helpers for the end-to-end tests

#![allow(dead_code)]

use weerun::{Argument, Outcome, RunConfig, Runner};

/// Import declarations for the whole WeeWasm import table
pub const IMPORTS: &str = r#"
  (import "weewasm" "puti" (func $puti (param i32)))
  (import "weewasm" "putd" (func $putd (param f64)))
  (import "weewasm" "obj.new" (func $new (result externref)))
  (import "weewasm" "obj.get" (func $get (param externref externref) (result externref)))
  (import "weewasm" "obj.set" (func $set (param externref externref externref)))
  (import "weewasm" "obj.box_i32" (func $box_i32 (param i32) (result externref)))
  (import "weewasm" "obj.box_f64" (func $box_f64 (param f64) (result externref)))
  (import "weewasm" "i32.unbox" (func $unbox_i32 (param externref) (result i32)))
  (import "weewasm" "f64.unbox" (func $unbox_f64 (param externref) (result f64)))
  (import "weewasm" "obj.eq" (func $eq (param externref externref) (result i32)))
"#;

/// Wrap function definitions in a module that imports the full table
pub fn module(body: &str) -> String {
    format!("(module\n{}\n{}\n)", IMPORTS, body)
}

/// Result of running a module in memory
pub struct Run {
    pub outcome: Outcome,
    pub stdout: String,
    pub objects: usize,
}

pub fn run_with(body: &str, args: &[&str]) -> Run {
    let runner = Runner::new(RunConfig::default()).expect("engine");
    let module = runner.compile(module(body)).expect("module compiles");
    let args = Argument::parse_all(args, "d");
    let report = runner.run(&module, &args, Vec::new()).expect("module runs");

    Run {
        outcome: report.outcome,
        stdout: String::from_utf8(report.sink).expect("utf8 output"),
        objects: report.objects,
    }
}

pub fn run(body: &str) -> Run {
    run_with(body, &[])
}

/// Encode a module as a binary wasm file
pub fn binary(body: &str) -> Vec<u8> {
    wat::parse_str(module(body)).expect("valid wat")
}
