// =============================================================================
// Receiver Callback
// =============================================================================
// Builds and invokes the CPI into a caller-supplied receiver program inside
// flash_loan / multi_flash_loan. The receiver is addressed the same way an
// Anchor client would address it: an 8-byte sighash discriminator derived
// from the instruction's name, followed by Borsh-encoded arguments.
//
// There is no interface-support query on Solana - a receiver that doesn't
// implement the expected instruction simply fails the CPI, which we surface
// as ReceiverCallFailed.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke;

use crate::error::FlashVaultError;

fn sighash(instruction_name: &str) -> [u8; 8] {
    let preimage = format!("global:{}", instruction_name);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    discriminator
}

/// Invoke `on_flash_loan(asset, amount, fee, params)` on `receiver_program`.
/// `receiver_accounts` are the receiver's own accounts, passed through
/// verbatim from the caller's `remaining_accounts` in account-metas order
/// matching `account_infos`.
pub fn invoke_on_flash_loan<'info>(
    receiver_program: &AccountInfo<'info>,
    receiver_account_metas: Vec<AccountMeta>,
    receiver_account_infos: &[AccountInfo<'info>],
    asset: Pubkey,
    amount: u64,
    fee: u64,
    params: Vec<u8>,
) -> Result<()> {
    let mut data = sighash("on_flash_loan").to_vec();
    data.extend(AnchorSerialize::try_to_vec(&(asset, amount, fee, params)).map_err(|_| error!(FlashVaultError::ReceiverCallFailed))?);

    let ix = Instruction {
        program_id: *receiver_program.key,
        accounts: receiver_account_metas,
        data,
    };

    invoke(&ix, receiver_account_infos).map_err(|_| error!(FlashVaultError::ReceiverCallFailed))?;
    Ok(())
}

/// Invoke `on_multi_flash_loan(assets[], amounts[], fees[], params)` on
/// `receiver_program`.
pub fn invoke_on_multi_flash_loan<'info>(
    receiver_program: &AccountInfo<'info>,
    receiver_account_metas: Vec<AccountMeta>,
    receiver_account_infos: &[AccountInfo<'info>],
    assets: Vec<Pubkey>,
    amounts: Vec<u64>,
    fees: Vec<u64>,
    params: Vec<u8>,
) -> Result<()> {
    let mut data = sighash("on_multi_flash_loan").to_vec();
    data.extend(
        AnchorSerialize::try_to_vec(&(assets, amounts, fees, params))
            .map_err(|_| error!(FlashVaultError::ReceiverCallFailed))?,
    );

    let ix = Instruction {
        program_id: *receiver_program.key,
        accounts: receiver_account_metas,
        data,
    };

    invoke(&ix, receiver_account_infos).map_err(|_| error!(FlashVaultError::ReceiverCallFailed))?;
    Ok(())
}

/// Build the AccountMeta list for a slice of remaining accounts, mirroring
/// each account's own is_signer/is_writable flags - the receiver program
/// declares its own account constraints, we just forward what the caller
/// supplied.
pub fn account_metas_from_infos(infos: &[AccountInfo]) -> Vec<AccountMeta> {
    infos
        .iter()
        .map(|info| {
            if info.is_writable {
                AccountMeta::new(*info.key, info.is_signer)
            } else {
                AccountMeta::new_readonly(*info.key, info.is_signer)
            }
        })
        .collect()
}
