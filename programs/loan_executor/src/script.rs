// =============================================================================
// Script Execution
// =============================================================================
// Runs an ordered list of Operations, invoking each target program in turn
// and aborting the whole flash-loan unit on the first failure - the CPI
// error propagates verbatim via `?`, and Solana's atomic transaction model
// takes care of unwinding every state change made so far.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke;
use anchor_lang::solana_program::system_instruction;

use crate::constants::{MAX_OPERATION_ACCOUNTS, MAX_SCRIPT_OPERATIONS};
use crate::error::LoanExecutorError;
use crate::state::Operation;

/// Execute every operation in `script` against `account_infos` (the
/// transaction's remaining_accounts), in order. `executor` is the signer
/// used for any operation's native-SOL `value` transfer.
pub fn run_script<'info>(
    script: &[Operation],
    account_infos: &[AccountInfo<'info>],
    executor: &AccountInfo<'info>,
    executor_signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    require!(!script.is_empty(), LoanExecutorError::EmptyScript);
    require!(script.len() <= MAX_SCRIPT_OPERATIONS, LoanExecutorError::TooManyOperations);

    for op in script {
        require!(
            op.account_metas.len() <= MAX_OPERATION_ACCOUNTS,
            LoanExecutorError::TooManyOperationAccounts
        );

        if op.value > 0 {
            let transfer_ix = system_instruction::transfer(executor.key, &op.target, op.value);
            invoke(&transfer_ix, &[executor.clone()]).map_err(|_| error!(LoanExecutorError::OperationFailed))?;
        }

        let mut metas = Vec::with_capacity(op.account_metas.len());
        let mut infos = Vec::with_capacity(op.account_metas.len());
        for meta in &op.account_metas {
            let info = account_infos
                .iter()
                .find(|ai| ai.key == &meta.pubkey)
                .ok_or(error!(LoanExecutorError::MissingOperationAccount))?;
            metas.push(if meta.is_writable {
                AccountMeta::new(meta.pubkey, meta.is_signer)
            } else {
                AccountMeta::new_readonly(meta.pubkey, meta.is_signer)
            });
            infos.push(info.clone());
        }

        let ix = Instruction {
            program_id: op.target,
            accounts: metas,
            data: op.data.clone(),
        };

        if executor_signer_seeds.is_empty() {
            invoke(&ix, &infos).map_err(|_| error!(LoanExecutorError::OperationFailed))?;
        } else {
            anchor_lang::solana_program::program::invoke_signed(&ix, &infos, executor_signer_seeds)
                .map_err(|_| error!(LoanExecutorError::OperationFailed))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OperationAccountMeta;

    fn op(target: Pubkey, metas: Vec<OperationAccountMeta>) -> Operation {
        Operation { target, account_metas: metas, data: vec![], value: 0 }
    }

    #[test]
    fn empty_script_is_rejected_before_any_invoke() {
        let key = Pubkey::new_unique();
        let (mut lamports, mut data, owner) = (0u64, Vec::new(), Pubkey::default());
        let executor = AccountInfo::new(&key, true, false, &mut lamports, &mut data, &owner, false, 0);

        let result = run_script(&[], &[], &executor, &[]);
        assert!(result.unwrap_err().to_string().contains("at least one operation"));
    }

    #[test]
    fn script_past_the_operation_cap_is_rejected() {
        let key = Pubkey::new_unique();
        let (mut lamports, mut data, owner) = (0u64, Vec::new(), Pubkey::default());
        let executor = AccountInfo::new(&key, true, false, &mut lamports, &mut data, &owner, false, 0);

        let script: Vec<Operation> =
            (0..=MAX_SCRIPT_OPERATIONS).map(|_| op(Pubkey::new_unique(), vec![])).collect();

        let result = run_script(&script, &[], &executor, &[]);
        assert!(result.unwrap_err().to_string().contains("too many operations"));
    }

    #[test]
    fn operation_past_the_account_cap_is_rejected() {
        let key = Pubkey::new_unique();
        let (mut lamports, mut data, owner) = (0u64, Vec::new(), Pubkey::default());
        let executor = AccountInfo::new(&key, true, false, &mut lamports, &mut data, &owner, false, 0);

        let metas: Vec<OperationAccountMeta> = (0..=MAX_OPERATION_ACCOUNTS)
            .map(|_| OperationAccountMeta { pubkey: Pubkey::new_unique(), is_signer: false, is_writable: false })
            .collect();
        let script = vec![op(Pubkey::new_unique(), metas)];

        let result = run_script(&script, &[], &executor, &[]);
        assert!(result.unwrap_err().to_string().contains("too many accounts"));
    }

    #[test]
    fn operation_referencing_an_unsupplied_account_is_rejected() {
        let key = Pubkey::new_unique();
        let (mut lamports, mut data, owner) = (0u64, Vec::new(), Pubkey::default());
        let executor = AccountInfo::new(&key, true, false, &mut lamports, &mut data, &owner, false, 0);

        let missing = Pubkey::new_unique();
        let metas = vec![OperationAccountMeta { pubkey: missing, is_signer: false, is_writable: false }];
        let script = vec![op(Pubkey::new_unique(), metas)];

        let result = run_script(&script, &[], &executor, &[]);
        assert!(result.unwrap_err().to_string().contains("account was not supplied"));
    }
}
