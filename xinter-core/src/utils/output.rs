use std::{fmt::Display, sync::{Arc, RwLock}};

use crate::environment::prelude::Value;
use super::error::Error;

/// Everything a session writes to its user.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Value of a `log` statement.
    Log(Value),
    /// Calc mode echo of a bare expression statement.
    Result(Value),
    /// Acknowledgement of a session command.
    Status(String),
    /// Developer mode tracing.
    Trace(String),
    Error(Error),
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Output::Log(value) => write!(f, "{value}"),
            Output::Result(value) => write!(f, "Result: {value}"),
            Output::Status(text) | Output::Trace(text) => write!(f, "{text}"),
            Output::Error(error) => write!(f, "{}", error.pretty_string()),
        }
    }
}

pub trait OutputEmitterIO {
    fn emit_output(&self, output: Output);
}

#[derive(Debug, Clone, Copy)]
pub struct NullOutputEmitterIO;

impl OutputEmitterIO for NullOutputEmitterIO {
    fn emit_output(&self, _output: Output) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorOutputEmitterIO {
    pub outputs: Arc<RwLock<Vec<Output>>>
}

impl VectorOutputEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Output> {
        let mut outputs = self.write_lock();
        std::mem::take(&mut *outputs)
    }

    pub fn reset(&self) {
        let mut outputs = self.write_lock();
        outputs.clear();
    }

    /// Rendered lines, without traces.
    pub fn lines(&self) -> Vec<String> {
        self.outputs.read()
            .expect("Vector lock poisoned")
            .iter()
            .filter(|output| !matches!(output, Output::Trace(_)))
            .map(|output| output.to_string())
            .collect()
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Output>> {
        self.outputs.write().expect("Vector lock poisoned")
    }
}

impl OutputEmitterIO for VectorOutputEmitterIO {
    fn emit_output(&self, output: Output) {
        let mut outputs = self.write_lock();

        outputs.push(output);
    }
}
