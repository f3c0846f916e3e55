// =============================================================================
// Loan Executor Constants
// =============================================================================

/// Seed for a per-owner Executor PDA. Full seed: ["executor", owner_pubkey].
pub const EXECUTOR_SEED: &[u8] = b"executor";

/// Maximum number of operations a single script may chain. Bounded so the
/// instruction's compute budget and transaction size stay predictable.
pub const MAX_SCRIPT_OPERATIONS: usize = 10;

/// Maximum accounts a single operation may address.
pub const MAX_OPERATION_ACCOUNTS: usize = 8;
