//! Runs a test vector through a concrete execution path.
//!
//! [`EngineExecutor`] is the "this repo's own core" executor: it seeds a
//! fresh `ApplicationEngine` from the vector's pre-state and runs the
//! vector's script to completion. [`Executor`] is the seam a reference
//! implementation would plug into for true differential testing (running
//! the same vector through, say, a C# or Go node over RPC/FFI and
//! comparing outcomes); no such reference is wired up here, so
//! [`ReferenceExecutor`] exists only to document the seam and returns
//! [`crate::DiffError::NotImplemented`].

use crate::vector::TestVector;
use crate::{DiffError, Result};
use neo_core::UInt160;
use neo_smart_contract::application_engine::{ApplicationEngine, NotificationEvent};
use neo_smart_contract::contract_state::ContractState;
use neo_smart_contract::TriggerType;
use neo_vm::Script;

/// The observed outcome of running a vector's script.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    /// "HALT" or "FAULT".
    pub state: String,

    /// Final result stack, bottom to top, each item as its canonical bytes.
    pub stack: Vec<Vec<u8>>,

    /// Gas consumed by the run.
    pub gas_consumed: i64,

    /// Fault message, present only when `state == "FAULT"`.
    pub exception: Option<String>,

    /// Notifications emitted during the run, as `(contract, event_name)`.
    pub notifications: Vec<(UInt160, String)>,
}

/// Something that can run a [`TestVector`] and report what happened.
pub trait Executor {
    fn run(&self, vector: &TestVector) -> Result<ExecutionOutcome>;
}

/// Runs vectors through this repository's own `ApplicationEngine`.
pub struct EngineExecutor;

impl EngineExecutor {
    pub fn new() -> Self {
        Self
    }

    fn seed_pre_state(engine: &mut ApplicationEngine, vector: &TestVector) -> Result<()> {
        for (index, (contract_hex, storage)) in vector.pre_state.iter().enumerate() {
            let hash_bytes = hex::decode(contract_hex)?;
            let hash = UInt160::from_bytes(&hash_bytes)
                .map_err(|e| DiffError::InvalidVector(format!("bad contract hash: {}", e)))?;

            // Contract IDs for seeded pre-state vectors only need to be stable
            // and distinct within this run, not globally meaningful.
            let id = -(index as i32) - 1;
            engine.add_contract(ContractState::new_native(id, hash, contract_hex.clone()));

            let context = engine
                .get_native_storage_context(&hash)
                .map_err(|e| DiffError::Execution(e.to_string()))?;
            for (key_hex, value_hex) in storage {
                let key = hex::decode(key_hex)?;
                let value = hex::decode(value_hex)?;
                engine
                    .put_storage_item(&context, &key, &value)
                    .map_err(|e| DiffError::Execution(e.to_string()))?;
            }
        }
        Ok(())
    }

    fn drain_result_stack(engine: &mut ApplicationEngine) -> Vec<Vec<u8>> {
        let mut items = Vec::new();
        while let Ok(item) = engine.pop_result_stack() {
            match item.as_bytes() {
                Ok(bytes) => items.push(bytes),
                Err(_) => break,
            }
        }
        items.reverse();
        items
    }
}

impl Default for EngineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for EngineExecutor {
    fn run(&self, vector: &TestVector) -> Result<ExecutionOutcome> {
        let script_bytes = hex::decode(&vector.script)?;
        let script = Script::new(script_bytes, true)
            .map_err(|e| DiffError::InvalidVector(format!("bad script: {}", e)))?;

        let mut engine = ApplicationEngine::new(TriggerType::Application, vector.gas_limit);
        Self::seed_pre_state(&mut engine, vector)?;

        let vm_state = engine
            .execute(script)
            .map_err(|e| DiffError::Execution(e.to_string()))?;

        let state = if vm_state.is_halt() {
            "HALT"
        } else if vm_state.is_fault() {
            "FAULT"
        } else {
            "BREAK"
        }
        .to_string();

        let stack = if vm_state.is_fault() {
            Vec::new()
        } else {
            Self::drain_result_stack(&mut engine)
        };

        let notifications: Vec<(UInt160, String)> = engine
            .notifications()
            .iter()
            .map(|n: &NotificationEvent| (n.contract, n.event_name.clone()))
            .collect();

        Ok(ExecutionOutcome {
            state,
            stack,
            gas_consumed: engine.gas_consumed(),
            exception: if vm_state.is_fault() {
                Some("VM execution fault".to_string())
            } else {
                None
            },
            notifications,
        })
    }
}

/// Seam for a reference implementation executor (e.g. an external node
/// driven over RPC or FFI). Not implemented in this repository.
pub struct ReferenceExecutor;

impl Executor for ReferenceExecutor {
    fn run(&self, _vector: &TestVector) -> Result<ExecutionOutcome> {
        Err(DiffError::NotImplemented(
            "no reference implementation is wired up; implement Executor to add one",
        ))
    }
}
