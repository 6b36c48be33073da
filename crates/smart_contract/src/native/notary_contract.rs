//! Notary contract native implementation.
//!
//! The Notary contract holds GAS deposits that back the P2P notary
//! assisted-signature service: accounts lock GAS until a given block
//! height, and the locked amount may only be extended, never reduced,
//! until that height passes.

use crate::application_engine::ApplicationEngine;
use crate::native::{NativeContract, NativeMethod};
use crate::{Error, Result};
use neo_config::{ADDRESS_SIZE, SECONDS_PER_BLOCK};
use neo_core::UInt160;

/// A single account's notary deposit (matches C# Notary.Deposit exactly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deposit {
    amount: i64,
    till: u32,
}

impl Deposit {
    fn to_bytes(self) -> Vec<u8> {
        let mut data = Vec::with_capacity(12);
        data.extend_from_slice(&self.amount.to_le_bytes());
        data.extend_from_slice(&self.till.to_le_bytes());
        data
    }

    fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }
        let amount = i64::from_le_bytes(data[0..8].try_into().ok()?);
        let till = u32::from_le_bytes(data[8..12].try_into().ok()?);
        Some(Self { amount, till })
    }
}

/// The Notary native contract.
pub struct NotaryContract {
    hash: UInt160,
    methods: Vec<NativeMethod>,
}

impl NotaryContract {
    /// Maximum number of blocks a deposit's till-height may be extended by in a single call.
    pub const MAX_NOT_VALID_BEFORE_DELTA: u32 = 140;

    pub const MAX_NOT_VALID_BEFORE_DELTA_KEY: &'static [u8] = b"MaxNotValidBeforeDelta";

    fn deposit_key(account: &UInt160) -> Vec<u8> {
        let mut key = b"Deposit".to_vec();
        key.extend_from_slice(account.as_bytes());
        key
    }

    /// Creates a new Notary contract.
    pub fn new() -> Self {
        let hash = UInt160::from_bytes(&[
            0xc1, 0xe1, 0x4f, 0x19, 0xc3, 0xe6, 0x08, 0x16, 0xad, 0x20, 0x06, 0x07, 0x97, 0x77,
            0x0f, 0x50, 0xa7, 0xba, 0x0b, 0x47,
        ])
        .expect("Operation failed");

        let methods = vec![
            NativeMethod::safe("balanceOf".to_string(), 1 << SECONDS_PER_BLOCK),
            NativeMethod::safe("expirationOf".to_string(), 1 << SECONDS_PER_BLOCK),
            NativeMethod::unsafe_method("lockDepositUntil".to_string(), 1 << 17, 0x01),
            NativeMethod::unsafe_method("withdraw".to_string(), 1 << 17, 0x01),
            NativeMethod::safe(
                "getMaxNotValidBeforeDelta".to_string(),
                1 << SECONDS_PER_BLOCK,
            ),
            NativeMethod::unsafe_method(
                "setMaxNotValidBeforeDelta".to_string(),
                1 << SECONDS_PER_BLOCK,
                0x01,
            ),
        ];

        Self { hash, methods }
    }

    fn invoke_method(
        &self,
        engine: &mut ApplicationEngine,
        method: &str,
        args: &[Vec<u8>],
    ) -> Result<Vec<u8>> {
        match method {
            "balanceOf" => self.balance_of(engine, args),
            "expirationOf" => self.expiration_of(engine, args),
            "lockDepositUntil" => self.lock_deposit_until(engine, args),
            "withdraw" => self.withdraw(engine, args),
            "getMaxNotValidBeforeDelta" => self.get_max_not_valid_before_delta(engine),
            "setMaxNotValidBeforeDelta" => self.set_max_not_valid_before_delta(engine, args),
            _ => Err(Error::NativeContractError(format!(
                "Unknown method: {}",
                method
            ))),
        }
    }

    fn account_arg(args: &[Vec<u8>], index: usize) -> Result<UInt160> {
        let bytes = args.get(index).ok_or_else(|| {
            Error::NativeContractError("Missing account argument".to_string())
        })?;
        if bytes.len() != ADDRESS_SIZE {
            return Err(Error::NativeContractError(
                "Invalid account hash length (must be ADDRESS_SIZE bytes)".to_string(),
            ));
        }
        Ok(UInt160::from_bytes(bytes)?)
    }

    fn get_deposit(&self, engine: &mut ApplicationEngine, account: &UInt160) -> Result<Deposit> {
        let context = engine.get_native_storage_context(&self.hash)?;
        match engine.get_storage_item(&context, &Self::deposit_key(account)) {
            Some(data) => Deposit::from_bytes(&data).ok_or_else(|| {
                Error::NativeContractError("Corrupted notary deposit record".to_string())
            }),
            None => Ok(Deposit { amount: 0, till: 0 }),
        }
    }

    fn put_deposit(
        &self,
        engine: &mut ApplicationEngine,
        account: &UInt160,
        deposit: Deposit,
    ) -> Result<()> {
        let context = engine.get_native_storage_context(&self.hash)?;
        if deposit.amount == 0 {
            engine.put_storage_item(&context, &Self::deposit_key(account), &[])?;
        } else {
            engine.put_storage_item(&context, &Self::deposit_key(account), &deposit.to_bytes())?;
        }
        Ok(())
    }

    fn balance_of(&self, engine: &mut ApplicationEngine, args: &[Vec<u8>]) -> Result<Vec<u8>> {
        let account = Self::account_arg(args, 0)?;
        let deposit = self.get_deposit(engine, &account)?;
        Ok(deposit.amount.to_le_bytes().to_vec())
    }

    fn expiration_of(&self, engine: &mut ApplicationEngine, args: &[Vec<u8>]) -> Result<Vec<u8>> {
        let account = Self::account_arg(args, 0)?;
        let deposit = self.get_deposit(engine, &account)?;
        Ok(deposit.till.to_le_bytes().to_vec())
    }

    /// Deposits or tops up GAS for `account`, extending the lock to `till` if
    /// and only if `till` is at or beyond the account's current lock. A lock
    /// height may never shrink (matches C# Notary.LockDepositUntil exactly).
    fn lock_deposit_until(
        &self,
        engine: &mut ApplicationEngine,
        args: &[Vec<u8>],
    ) -> Result<Vec<u8>> {
        let account = Self::account_arg(args, 0)?;

        let till_bytes = args.get(1).ok_or_else(|| {
            Error::NativeContractError("lockDepositUntil requires a till-height argument".to_string())
        })?;
        if till_bytes.len() < 4 {
            return Err(Error::NativeContractError(
                "Invalid till-height argument".to_string(),
            ));
        }
        let till = u32::from_le_bytes(till_bytes[0..4].try_into().unwrap_or([0u8; 4]));

        let amount_delta = args
            .get(2)
            .map(|bytes| {
                if bytes.len() >= 8 {
                    i64::from_le_bytes(bytes[0..8].try_into().unwrap_or([0u8; 8]))
                } else {
                    0
                }
            })
            .unwrap_or(0);

        let mut deposit = self.get_deposit(engine, &account)?;

        if till < deposit.till {
            return Err(Error::NativeContractError(
                "Deposit lock height can never be reduced".to_string(),
            ));
        }

        if amount_delta < 0 {
            return Err(Error::NativeContractError(
                "Deposit amount delta cannot be negative".to_string(),
            ));
        }

        deposit.amount = deposit
            .amount
            .checked_add(amount_delta)
            .ok_or_else(|| Error::NativeContractError("Deposit amount overflow".to_string()))?;
        deposit.till = till;

        self.put_deposit(engine, &account, deposit)?;
        Ok(vec![1])
    }

    /// Withdraws the full deposit for `account`. Only permitted once the
    /// current block height is at or past the deposit's locked till-height.
    fn withdraw(&self, engine: &mut ApplicationEngine, args: &[Vec<u8>]) -> Result<Vec<u8>> {
        let account = Self::account_arg(args, 0)?;
        let deposit = self.get_deposit(engine, &account)?;

        if deposit.amount == 0 {
            return Err(Error::NativeContractError(
                "Account has no notary deposit".to_string(),
            ));
        }

        let current_height = engine.persisting_block().map(|b| b.index()).unwrap_or(0);
        if current_height < deposit.till {
            return Err(Error::NativeContractError(
                "Deposit is still locked".to_string(),
            ));
        }

        self.put_deposit(
            engine,
            &account,
            Deposit {
                amount: 0,
                till: 0,
            },
        )?;
        Ok(deposit.amount.to_le_bytes().to_vec())
    }

    fn get_max_not_valid_before_delta(&self, engine: &mut ApplicationEngine) -> Result<Vec<u8>> {
        let context = engine.get_native_storage_context(&self.hash)?;
        match engine.get_storage_item(&context, Self::MAX_NOT_VALID_BEFORE_DELTA_KEY) {
            Some(data) if data.len() >= 4 => {
                Ok(u32::from_le_bytes(data[0..4].try_into().unwrap_or([0u8; 4]))
                    .to_le_bytes()
                    .to_vec())
            }
            _ => Ok(Self::MAX_NOT_VALID_BEFORE_DELTA.to_le_bytes().to_vec()),
        }
    }

    fn set_max_not_valid_before_delta(
        &self,
        engine: &mut ApplicationEngine,
        args: &[Vec<u8>],
    ) -> Result<Vec<u8>> {
        if !engine.check_committee_witness()? {
            return Err(Error::NativeContractError(
                "setMaxNotValidBeforeDelta requires committee witness".to_string(),
            ));
        }

        let value_bytes = args.get(0).ok_or_else(|| {
            Error::NativeContractError(
                "setMaxNotValidBeforeDelta requires value argument".to_string(),
            )
        })?;
        if value_bytes.len() < 4 {
            return Err(Error::NativeContractError(
                "Invalid delta argument".to_string(),
            ));
        }
        let value = u32::from_le_bytes(value_bytes[0..4].try_into().unwrap_or([0u8; 4]));

        let context = engine.get_native_storage_context(&self.hash)?;
        engine.put_storage_item(
            &context,
            Self::MAX_NOT_VALID_BEFORE_DELTA_KEY,
            &value.to_le_bytes(),
        )?;
        Ok(vec![1])
    }
}

impl NativeContract for NotaryContract {
    fn hash(&self) -> UInt160 {
        self.hash
    }

    fn name(&self) -> &str {
        "Notary"
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

impl Default for NotaryContract {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_vm::TriggerType;

    #[test]
    fn test_notary_contract_creation() {
        let notary = NotaryContract::new();
        assert_eq!(notary.name(), "Notary");
        assert!(!notary.methods().is_empty());
    }

    #[test]
    fn test_balance_of_unset_account() {
        let notary = NotaryContract::new();
        let mut engine = ApplicationEngine::new(TriggerType::Application, 10_000_000);
        let args = vec![vec![0u8; ADDRESS_SIZE]];
        let result = notary.balance_of(&mut engine, &args).unwrap();
        assert_eq!(i64::from_le_bytes(result.try_into().unwrap()), 0);
    }

    #[test]
    fn test_lock_cannot_shrink() {
        let notary = NotaryContract::new();
        let mut engine = ApplicationEngine::new(TriggerType::Application, 10_000_000);
        let account = vec![1u8; ADDRESS_SIZE];

        let first = vec![account.clone(), 100u32.to_le_bytes().to_vec(), 10i64.to_le_bytes().to_vec()];
        notary.lock_deposit_until(&mut engine, &first).unwrap();

        let shrink = vec![account, 50u32.to_le_bytes().to_vec(), 0i64.to_le_bytes().to_vec()];
        assert!(notary.lock_deposit_until(&mut engine, &shrink).is_err());
    }
}
