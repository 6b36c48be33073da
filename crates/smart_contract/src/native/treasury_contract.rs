//! Treasury contract native implementation.
//!
//! Gated on `Hardfork::HF_Faun`: before activation every method rejects,
//! matching the other natives' "not yet deployed" behavior. Once active,
//! the contract accepts NEP-11/NEP-17 payment callbacks (as no-ops, the
//! treasury itself never rejects an incoming transfer) and advertises the
//! supported extension standards.

use crate::application_engine::ApplicationEngine;
use crate::native::{NativeContract, NativeMethod};
use crate::{Error, Result};
use neo_config::SECONDS_PER_BLOCK;
use neo_core::hardfork::Hardfork;
use neo_core::UInt160;

/// The Treasury native contract.
pub struct TreasuryContract {
    hash: UInt160,
    methods: Vec<NativeMethod>,
}

impl TreasuryContract {
    /// Standards advertised once `HF_Faun` is active.
    pub const SUPPORTED_STANDARDS: &'static [&'static str] = &["NEP-26", "NEP-27", "NEP-30"];

    /// Creates a new Treasury contract.
    pub fn new() -> Self {
        let hash = UInt160::from_bytes(&[
            0xf3, 0x07, 0x61, 0x43, 0x3a, 0x95, 0xfc, 0x5a, 0x1d, 0x8e, 0x25, 0x59, 0x4b, 0x63,
            0x08, 0x10, 0xd9, 0x44, 0xd9, 0x9c,
        ])
        .expect("Operation failed");

        let methods = vec![
            NativeMethod::safe("supportedStandards".to_string(), 1 << SECONDS_PER_BLOCK),
            NativeMethod::unsafe_method("onNEP17Payment".to_string(), 1 << 15, 0x01),
            NativeMethod::unsafe_method("onNEP11Payment".to_string(), 1 << 15, 0x01),
            NativeMethod::unsafe_method("verify".to_string(), 1 << 15, 0x01),
        ];

        Self { hash, methods }
    }

    fn require_active(&self, engine: &ApplicationEngine) -> Result<()> {
        let height = engine.persisting_block().map(|b| b.index()).unwrap_or(0);
        if !neo_core::hardfork::is_hardfork_enabled(Hardfork::HF_Faun, height) {
            return Err(Error::NativeContractError(
                "Treasury is not active at this block height".to_string(),
            ));
        }
        Ok(())
    }

    fn invoke_method(
        &self,
        engine: &mut ApplicationEngine,
        method: &str,
        args: &[Vec<u8>],
    ) -> Result<Vec<u8>> {
        self.require_active(engine)?;

        match method {
            "supportedStandards" => self.supported_standards(),
            "onNEP17Payment" => self.on_nep17_payment(),
            "onNEP11Payment" => self.on_nep11_payment(),
            "verify" => self.verify(engine, args),
            _ => Err(Error::NativeContractError(format!(
                "Unknown method: {}",
                method
            ))),
        }
    }

    fn supported_standards(&self) -> Result<Vec<u8>> {
        Ok(Self::SUPPORTED_STANDARDS.join(",").into_bytes())
    }

    /// NEP-17 payments are accepted unconditionally; the treasury never rejects GAS/NEP-17 deposits.
    fn on_nep17_payment(&self) -> Result<Vec<u8>> {
        Ok(vec![])
    }

    /// NEP-11 payments are accepted unconditionally; the treasury never rejects NFT deposits.
    fn on_nep11_payment(&self) -> Result<Vec<u8>> {
        Ok(vec![])
    }

    /// Withdrawals from the treasury require committee witness.
    fn verify(&self, engine: &mut ApplicationEngine, _args: &[Vec<u8>]) -> Result<Vec<u8>> {
        let approved = engine.check_committee_witness()?;
        Ok(vec![if approved { 1 } else { 0 }])
    }
}

impl NativeContract for TreasuryContract {
    fn hash(&self) -> UInt160 {
        self.hash
    }

    fn name(&self) -> &str {
        "Treasury"
    }

    fn methods(&self) -> &[NativeMethod] {
        &self.methods
    }

    fn invoke(
        &self,
        engine: &mut ApplicationEngine,
        method: &str,
        args: &[Vec<u8>],
    ) -> Result<Vec<u8>> {
        self.invoke_method(engine, method, args)
    }
}

impl Default for TreasuryContract {
    fn default() -> Self {
        Self::new()
    }
}
