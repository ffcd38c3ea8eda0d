//! Host import table - the bridge functions compiled WeeWasm code calls
//!
//! Every reference crosses the engine boundary inside an `externref` that
//! carries a `Reference`; the null reference is the engine's null externref.
//! Bridge errors are returned to the engine as host errors, which become
//! traps that unwind the whole run.

use std::io::Write;

use wasmtime::{Caller, ExternRef, Linker};
use weewasm_runtime::logging::{log_bridge_call, log_bridge_error};
use weewasm_runtime::numeric::format_number;
use weewasm_runtime::{
    box_f64, box_i32, ref_eq, unbox_f64, unbox_i32, BridgeError, BridgeResult, Heap, Reference,
};

/// Import module name compiled WeeWasm programs use
pub const IMPORT_MODULE: &str = "weewasm";

/// Per-run host state: the object heap and the program's output sink
pub struct HostState<W> {
    pub heap: Heap,
    pub out: W,
}

impl<W: Write> HostState<W> {
    pub fn new(out: W) -> Self {
        Self {
            heap: Heap::new(),
            out,
        }
    }
}

/// Carry a reference across the engine boundary
pub fn to_extern(reference: Reference) -> Option<ExternRef> {
    match reference {
        Reference::Null => None,
        other => Some(ExternRef::new(other)),
    }
}

/// Decode a reference handed back by the engine
pub fn from_extern(value: Option<ExternRef>) -> BridgeResult<Reference> {
    match value {
        None => Ok(Reference::Null),
        Some(r) => r
            .data()
            .downcast_ref::<Reference>()
            .copied()
            .ok_or(BridgeError::FOREIGN_REFERENCE),
    }
}

/// Turn a bridge result into an engine result, logging the failure
#[inline]
fn bridged<T>(name: &'static str, result: BridgeResult<T>) -> anyhow::Result<T> {
    result.map_err(|e| {
        log_bridge_error(name, &e);
        anyhow::Error::from(e)
    })
}

/// Register the full import table on a linker
pub fn register<W>(linker: &mut Linker<HostState<W>>) -> anyhow::Result<()>
where
    W: Write + Send + 'static,
{
    linker.func_wrap(
        IMPORT_MODULE,
        "puti",
        |mut caller: Caller<'_, HostState<W>>, v: i32| -> anyhow::Result<()> {
            log_bridge_call("puti");
            write!(caller.data_mut().out, "{}", v)?;
            Ok(())
        },
    )?;

    linker.func_wrap(
        IMPORT_MODULE,
        "putd",
        |mut caller: Caller<'_, HostState<W>>, v: f64| -> anyhow::Result<()> {
            log_bridge_call("putd");
            write!(caller.data_mut().out, "{}", format_number(v))?;
            Ok(())
        },
    )?;

    linker.func_wrap(
        IMPORT_MODULE,
        "obj.new",
        |mut caller: Caller<'_, HostState<W>>| -> Option<ExternRef> {
            log_bridge_call("obj.new");
            to_extern(caller.data_mut().heap.new_object())
        },
    )?;

    linker.func_wrap(
        IMPORT_MODULE,
        "obj.get",
        |caller: Caller<'_, HostState<W>>,
         target: Option<ExternRef>,
         key: Option<ExternRef>|
         -> anyhow::Result<Option<ExternRef>> {
            log_bridge_call("obj.get");
            let result = from_extern(target).and_then(|target| {
                let key = from_extern(key)?;
                caller.data().heap.get(target, key)
            });
            bridged("obj.get", result).map(to_extern)
        },
    )?;

    linker.func_wrap(
        IMPORT_MODULE,
        "obj.set",
        |mut caller: Caller<'_, HostState<W>>,
         target: Option<ExternRef>,
         key: Option<ExternRef>,
         value: Option<ExternRef>|
         -> anyhow::Result<()> {
            log_bridge_call("obj.set");
            let result = from_extern(target).and_then(|target| {
                let key = from_extern(key)?;
                let value = from_extern(value)?;
                caller.data_mut().heap.set(target, key, value)
            });
            bridged("obj.set", result)
        },
    )?;

    linker.func_wrap(IMPORT_MODULE, "obj.box_i32", |v: i32| -> Option<ExternRef> {
        log_bridge_call("obj.box_i32");
        to_extern(box_i32(v))
    })?;

    linker.func_wrap(IMPORT_MODULE, "obj.box_f64", |v: f64| -> Option<ExternRef> {
        log_bridge_call("obj.box_f64");
        to_extern(box_f64(v))
    })?;

    linker.func_wrap(
        IMPORT_MODULE,
        "i32.unbox",
        |r: Option<ExternRef>| -> anyhow::Result<i32> {
            log_bridge_call("i32.unbox");
            bridged("i32.unbox", from_extern(r).and_then(unbox_i32))
        },
    )?;

    linker.func_wrap(
        IMPORT_MODULE,
        "f64.unbox",
        |r: Option<ExternRef>| -> anyhow::Result<f64> {
            log_bridge_call("f64.unbox");
            bridged("f64.unbox", from_extern(r).and_then(unbox_f64))
        },
    )?;

    linker.func_wrap(
        IMPORT_MODULE,
        "obj.eq",
        |a: Option<ExternRef>, b: Option<ExternRef>| -> anyhow::Result<i32> {
            log_bridge_call("obj.eq");
            let result = from_extern(a).and_then(|a| Ok(ref_eq(a, from_extern(b)?)));
            bridged("obj.eq", result).map(i32::from)
        },
    )?;

    Ok(())
}
