// =============================================================================
// Loan Executor State
// =============================================================================
// Executor is the "personal caller-owned contract": a PDA that implements
// the flash-loan receiver capability and gates every queued operation behind
// an owner check.
// =============================================================================

use anchor_lang::prelude::*;

/// PDA seeds: ["executor", owner_pubkey]. One per owner.
#[account]
#[derive(InitSpace)]
pub struct Executor {
    /// The account authorized to queue and run operation scripts through
    /// this executor.
    pub owner: Pubkey,

    pub bump: u8,
}

/// A single step of a script: call `target` with `data`, attaching `value`
/// lamports if nonzero. `account_metas` is this Solana program's
/// generalization of "call target with data" to Solana's explicit-account
/// CPI model - the engine has no ambient memory to resolve a callee's
/// accounts from its address alone, unlike the host model the distilled
/// operation shape was drawn from.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct Operation {
    pub target: Pubkey,
    pub account_metas: Vec<OperationAccountMeta>,
    pub data: Vec<u8>,
    pub value: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct OperationAccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}
