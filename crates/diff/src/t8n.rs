//! State-transition ("t8n") tool: takes a pre-state allocation, an
//! environment, and a list of transactions (each one a raw script, in the
//! spirit of this repo's scope), runs each through a fresh
//! `ApplicationEngine` against the allocation, and emits the post-state
//! allocation plus a receipt per transaction.

use crate::{DiffError, Result};
use neo_core::UInt160;
use neo_smart_contract::application_engine::ApplicationEngine;
use neo_smart_contract::contract_state::ContractState;
use neo_smart_contract::TriggerType;
use neo_vm::Script;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pre/post-state allocation: contract hash (hex) -> storage map (hex/hex).
pub type Alloc = BTreeMap<String, BTreeMap<String, String>>;

/// Execution environment for the batch (kept minimal: only what the core
/// actually consumes today).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Env {
    #[serde(default)]
    pub current_block: u32,
    #[serde(default = "default_gas_limit")]
    pub gas_limit_per_tx: i64,
}

fn default_gas_limit() -> i64 {
    20_000_000_00000000
}

/// One entry in the `txs.json` input: a hex-encoded script to run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TxInput {
    pub name: String,
    pub script: String,
}

/// One entry in the emitted receipt list.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub name: String,
    pub status: String,
    pub gas_used: i64,
    pub error: Option<String>,
}

/// Full t8n output: post-state allocation plus receipts.
#[derive(Debug, Clone, Serialize)]
pub struct T8nOutput {
    pub alloc: Alloc,
    pub receipts: Vec<Receipt>,
}

/// Runs every transaction in `txs` against `alloc`/`env` in order, applying
/// each transaction's storage writes before the next one starts (sequential,
/// no overlap -- matching the spec's single-writer persistence model).
pub fn run_t8n(alloc: Alloc, env: &Env, txs: &[TxInput]) -> Result<T8nOutput> {
    let mut receipts = Vec::with_capacity(txs.len());

    let mut engine = ApplicationEngine::new(TriggerType::Application, env.gas_limit_per_tx);
    seed_alloc(&mut engine, &alloc)?;

    for tx in txs {
        let script_bytes = hex::decode(&tx.script)?;
        let script = match Script::new(script_bytes, true) {
            Ok(script) => script,
            Err(e) => {
                receipts.push(Receipt {
                    name: tx.name.clone(),
                    status: "INVALID".to_string(),
                    gas_used: 0,
                    error: Some(e.to_string()),
                });
                continue;
            }
        };

        let gas_before = engine.gas_consumed();
        match engine.execute(script) {
            Ok(state) => {
                let gas_used = engine.gas_consumed() - gas_before;
                receipts.push(Receipt {
                    name: tx.name.clone(),
                    status: if state.is_halt() { "HALT" } else { "FAULT" }.to_string(),
                    gas_used,
                    error: None,
                });
            }
            Err(e) => {
                receipts.push(Receipt {
                    name: tx.name.clone(),
                    status: "ERROR".to_string(),
                    gas_used: engine.gas_consumed() - gas_before,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let alloc_out = export_alloc(&mut engine, &alloc)?;
    Ok(T8nOutput {
        alloc: alloc_out,
        receipts,
    })
}

fn seed_alloc(engine: &mut ApplicationEngine, alloc: &Alloc) -> Result<()> {
    for (index, (contract_hex, storage)) in alloc.iter().enumerate() {
        let hash_bytes = hex::decode(contract_hex)?;
        let hash = UInt160::from_bytes(&hash_bytes)
            .map_err(|e| DiffError::InvalidVector(format!("bad contract hash: {}", e)))?;
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

fn export_alloc(engine: &mut ApplicationEngine, alloc: &Alloc) -> Result<Alloc> {
    use neo_smart_contract::application_engine::FindOptions;

    let mut out = Alloc::new();
    for contract_hex in alloc.keys() {
        let hash_bytes = hex::decode(contract_hex)?;
        let hash = UInt160::from_bytes(&hash_bytes)
            .map_err(|e| DiffError::InvalidVector(format!("bad contract hash: {}", e)))?;
        let context = engine
            .get_native_storage_context(&hash)
            .map_err(|e| DiffError::Execution(e.to_string()))?;

        let mut keys_iter = engine.find_storage_entries(&context, &[], FindOptions::KEYS_ONLY);
        let mut values_iter = engine.find_storage_entries(&context, &[], FindOptions::VALUES_ONLY);
        let mut storage = BTreeMap::new();
        while keys_iter.next() && values_iter.next() {
            if let (Some(key), Some(value)) = (keys_iter.value(), values_iter.value()) {
                storage.insert(hex::encode(key), hex::encode(value));
            }
        }
        out.insert(contract_hex.clone(), storage);
    }
    Ok(out)
}
