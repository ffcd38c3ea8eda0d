//! Module runner - load, instantiate against the import table, call `main`
//!
//! Load and instantiation failures are `HarnessError`s. Anything that goes
//! wrong once `main` is running is a trap and comes back as
//! `Outcome::Trap` together with whatever the program already printed.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};
use wasmtime::{Engine, Linker, Module, Store, Trap, Val};
use weewasm_runtime::BridgeError;

use crate::args::{coerce, Argument};
use crate::config::RunConfig;
use crate::error::HarnessError;
use crate::imports::{self, from_extern, HostState};
use crate::output::ResultValue;

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Returned(Vec<ResultValue>),
    Trap(String),
}

impl Outcome {
    pub fn is_trap(&self) -> bool {
        matches!(self, Outcome::Trap(_))
    }
}

/// Result of one run, handing the output sink back to the caller
#[derive(Debug)]
pub struct RunReport<W> {
    pub outcome: Outcome,
    pub sink: W,
    /// Objects allocated during the run
    pub objects: usize,
}

pub struct Runner {
    engine: Engine,
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Result<Self, HarnessError> {
        let mut engine_config = wasmtime::Config::new();
        engine_config
            .wasm_reference_types(true)
            .wasm_backtrace(config.engine.backtraces);
        if let Some(stack) = config.engine.max_wasm_stack {
            engine_config.max_wasm_stack(stack);
        }

        let engine =
            Engine::new(&engine_config).map_err(|e| HarnessError::Engine(format!("{:#}", e)))?;
        Ok(Self { engine, config })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Read and compile a module file (binary or text format)
    pub fn load(&self, path: &Path) -> Result<Module, HarnessError> {
        let module = Module::from_file(&self.engine, path)
            .map_err(|e| HarnessError::compile(path.display().to_string(), &e))?;
        info!(path = %path.display(), "module loaded");
        Ok(module)
    }

    /// Compile a module from bytes (binary or text format)
    pub fn compile(&self, source: impl AsRef<[u8]>) -> Result<Module, HarnessError> {
        Module::new(&self.engine, source).map_err(|e| HarnessError::compile("<memory>", &e))
    }

    /// Instantiate `module` and call its entry export with `args`
    pub fn run<W>(&self, module: &Module, args: &[Argument], sink: W) -> Result<RunReport<W>, HarnessError>
    where
        W: Write + Send + 'static,
    {
        let entry = self.config.harness.entry.as_str();
        let _span = tracing::debug_span!("run", entry).entered();

        let mut store = Store::new(&self.engine, HostState::new(sink));
        let mut linker = Linker::new(&self.engine);
        imports::register(&mut linker).map_err(|e| HarnessError::Engine(format!("{:#}", e)))?;

        let instance = linker
            .instantiate(&mut store, module)
            .map_err(|e| HarnessError::Instantiate(format!("{:#}", e)))?;
        let func = instance
            .get_func(&mut store, entry)
            .ok_or_else(|| HarnessError::MissingEntry(entry.to_string()))?;

        let ty = func.ty(&store);
        let params = coerce(entry, ty.params(), args)?;
        let mut results = vec![Val::I32(0); ty.results().len()];
        debug!(params = params.len(), results = results.len(), "calling entry point");

        let outcome = match func.call(&mut store, &params, &mut results) {
            Ok(()) => Outcome::Returned(results.iter().map(result_value).collect()),
            Err(err) => {
                let description = self.describe_trap(&err);
                debug!(%description, "run trapped");
                Outcome::Trap(description)
            }
        };

        let state = store.into_data();
        Ok(RunReport {
            outcome,
            objects: state.heap.len(),
            sink: state.out,
        })
    }

    fn describe_trap(&self, err: &anyhow::Error) -> String {
        if self.config.engine.backtraces {
            return format!("{:#}", err);
        }
        if let Some(bridge) = err.downcast_ref::<BridgeError>() {
            return bridge.to_string();
        }
        if let Some(trap) = err.downcast_ref::<Trap>() {
            return trap.to_string();
        }
        format!("{:#}", err)
    }
}

fn result_value(val: &Val) -> ResultValue {
    match val {
        Val::I32(v) => ResultValue::I32(*v),
        Val::I64(v) => ResultValue::I64(*v),
        Val::F32(bits) => ResultValue::F32(f32::from_bits(*bits)),
        Val::F64(bits) => ResultValue::F64(f64::from_bits(*bits)),
        Val::ExternRef(r) => match from_extern(r.clone()) {
            Ok(reference) => ResultValue::Ref(reference),
            Err(_) => ResultValue::Opaque("foreign reference"),
        },
        Val::FuncRef(_) => ResultValue::Opaque("funcref"),
        _ => ResultValue::Opaque("v128"),
    }
}
