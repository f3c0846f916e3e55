// =============================================================================
// Loan Executor
// =============================================================================
// A personal, caller-owned program that implements FlashVault's flash-loan
// receiver capability: it queues an operation script, borrows through
// FlashVault with itself as receiver, and runs the script against the
// proceeds before repaying the loan - all within one FlashVault flash_loan
// transaction.
// =============================================================================

pub mod constants;
pub mod error;
pub mod instructions;
pub mod script;
pub mod state;

use anchor_lang::prelude::*;

pub use constants::*;
pub use error::*;
pub use instructions::*;
pub use state::*;

declare_id!("ExecRvLgkCNq3wqfMtGUZtQoTiKj8TfnsZzBuEGKxvYt");

#[program]
pub mod loan_executor {
    use super::*;

    /// Create a personal Executor PDA owned by the caller.
    pub fn initialize_executor(ctx: Context<InitializeExecutor>) -> Result<()> {
        instructions::initialize_executor::handler_initialize_executor(ctx)
    }

    /// Owner-only: borrow through FlashVault and run `script` against the
    /// proceeds, using an already-initialized Executor.
    pub fn execute_flash_loan(ctx: Context<ExecuteFlashLoan>, amount: u64, script: Vec<Operation>) -> Result<()> {
        instructions::execute_flash_loan::handler_execute_flash_loan(ctx, amount, script)
    }

    /// Factory: create an Executor and run a script against it in one call.
    pub fn create_and_execute(ctx: Context<CreateAndExecute>, amount: u64, script: Vec<Operation>) -> Result<()> {
        instructions::create_and_execute::handler_create_and_execute(ctx, amount, script)
    }

    /// The flash-loan receiver capability FlashVault CPIs into mid-loan.
    pub fn on_flash_loan(
        ctx: Context<OnFlashLoan>,
        asset: Pubkey,
        amount: u64,
        fee: u64,
        params: Vec<u8>,
    ) -> Result<bool> {
        instructions::on_flash_loan::handler_on_flash_loan(ctx, asset, amount, fee, params)
    }
}
