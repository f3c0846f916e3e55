// =============================================================================
// Loan Executor Error Codes
// =============================================================================

use anchor_lang::prelude::*;

#[error_code]
pub enum LoanExecutorError {
    /// Caller does not match the Executor's recorded owner.
    #[msg("Only the executor's owner can perform this action")]
    NotOwner,

    /// A script was submitted with zero operations.
    #[msg("Script must contain at least one operation")]
    EmptyScript,

    /// A script exceeded MAX_SCRIPT_OPERATIONS.
    #[msg("Script has too many operations")]
    TooManyOperations,

    /// An operation's account_metas exceeded MAX_OPERATION_ACCOUNTS.
    #[msg("Operation references too many accounts")]
    TooManyOperationAccounts,

    /// An operation referenced a pubkey absent from remaining_accounts.
    #[msg("Operation account was not supplied")]
    MissingOperationAccount,

    /// A script operation's CPI returned an error; the first failure is
    /// propagated verbatim and the whole flash-loan transaction reverts.
    #[msg("A script operation failed")]
    OperationFailed,
}
