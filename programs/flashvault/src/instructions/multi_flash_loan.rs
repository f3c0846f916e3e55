// =============================================================================
// Multi Flash Loan Instruction
// =============================================================================
// Same shape as flash_loan, but borrows several assets atomically in one
// receiver callback. `ctx.remaining_accounts` must be laid out as:
//   1. N (pool, vault, receiver_asset_account) triples, one per asset, in
//      the order of `assets`
//   2. the receiver program account
//   3. whatever extra accounts the receiver's on_multi_flash_loan needs
// Every asset must individually satisfy post_balance >= pre_balance +
// total_fee_i, or the whole transaction reverts - there is no partial
// settlement.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::FlashVaultError;
use crate::events::FlashLoaned;
use crate::receiver;
use crate::state::{Engine, Pool};
use crate::token_util;

#[derive(Accounts)]
pub struct MultiFlashLoan<'info> {
    pub borrower: Signer<'info>,

    #[account(mut, seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, Engine>,

    pub token_program: Program<'info, Token>,
    // Pools, vaults, receiver destination accounts, the receiver program,
    // and the receiver's extra accounts are all supplied via
    // remaining_accounts per the layout documented above.
}

struct Leg<'a, 'info> {
    pool_ai: &'a AccountInfo<'info>,
    vault_ai: &'a AccountInfo<'info>,
    amount: u64,
    total_fee: u64,
    pre_vault_amount: u64,
}

// See ReentrancyStatus's doc comment: this guard documents intent rather
// than enforcing it, since Solana's runtime already rejects the nested
// call this brackets.
pub fn handler_multi_flash_loan(
    ctx: Context<MultiFlashLoan>,
    assets: Vec<Pubkey>,
    amounts: Vec<u64>,
    params: Vec<u8>,
) -> Result<()> {
    ctx.accounts.engine.enter()?;
    let result = run(&ctx, assets, amounts, params);
    ctx.accounts.engine.exit();
    result
}

fn run(ctx: &Context<MultiFlashLoan>, assets: Vec<Pubkey>, amounts: Vec<u64>, params: Vec<u8>) -> Result<()> {
    require!(!assets.is_empty(), FlashVaultError::EmptyAssetList);
    require!(assets.len() == amounts.len(), FlashVaultError::LengthMismatch);

    let n = assets.len();
    require!(ctx.remaining_accounts.len() > 3 * n, FlashVaultError::LengthMismatch);

    let legs_accounts = &ctx.remaining_accounts[..3 * n];
    let receiver_program = &ctx.remaining_accounts[3 * n];
    let receiver_accounts = &ctx.remaining_accounts[3 * n + 1..];

    let mgmt_pct = ctx.accounts.engine.management_fee_percentage;
    let mut legs = Vec::with_capacity(n);

    for i in 0..n {
        let pool_ai = &legs_accounts[3 * i];
        let vault_ai = &legs_accounts[3 * i + 1];
        let dest_ai = &legs_accounts[3 * i + 2];

        let (expected_pool, _) = Pubkey::find_program_address(&[POOL_SEED, assets[i].as_ref()], ctx.program_id);
        require!(pool_ai.key() == expected_pool, FlashVaultError::InvalidAsset);

        let pool: Account<Pool> = Account::try_from(pool_ai)?;
        require!(vault_ai.key() == pool.vault, FlashVaultError::InvalidAsset);
        let vault: Account<TokenAccount> = Account::try_from(vault_ai)?;

        require!(amounts[i] > 0, FlashVaultError::InvalidAmount);
        require!(amounts[i] <= pool.total_liquidity, FlashVaultError::InsufficientLiquidity);

        let (lp_fee, mgmt_fee) = pool.compute_flash_loan_fees(amounts[i], mgmt_pct)?;
        let total_fee = lp_fee.checked_add(mgmt_fee).ok_or(error!(FlashVaultError::MathOverflow))?;

        let pool_bump = pool.bump;
        let asset_key = assets[i];
        let pool_seeds: &[&[u8]] = &[POOL_SEED, asset_key.as_ref(), &[pool_bump]];
        let signer_seeds: &[&[&[u8]]] = &[pool_seeds];
        let dest_account: Account<TokenAccount> = Account::try_from(dest_ai)?;

        token_util::transfer_from_vault(
            &ctx.accounts.token_program,
            &vault,
            &dest_account,
            pool_ai.clone(),
            signer_seeds,
            amounts[i],
        )?;

        legs.push(Leg {
            pool_ai,
            vault_ai,
            amount: amounts[i],
            total_fee,
            pre_vault_amount: vault.amount,
        });
    }

    let receiver_metas = receiver::account_metas_from_infos(receiver_accounts);
    receiver::invoke_on_multi_flash_loan(
        receiver_program,
        receiver_metas,
        receiver_accounts,
        assets.clone(),
        amounts.clone(),
        legs.iter().map(|l| l.total_fee).collect(),
        params,
    )?;

    let clock = Clock::get()?;
    for (i, leg) in legs.iter().enumerate() {
        let mut vault: Account<TokenAccount> = Account::try_from(leg.vault_ai)?;
        vault.reload()?;
        let required = leg
            .pre_vault_amount
            .checked_add(leg.total_fee)
            .ok_or(error!(FlashVaultError::MathOverflow))?;
        require!(vault.amount >= required, FlashVaultError::NotRepaid);

        let mut pool: Account<Pool> = Account::try_from(leg.pool_ai)?;
        let (lp_fee, mgmt_fee) = pool.compute_flash_loan_fees(leg.amount, mgmt_pct)?;
        pool.total_liquidity = pool.total_liquidity.checked_add(lp_fee).ok_or(error!(FlashVaultError::MathOverflow))?;
        pool.collected_management_fee = pool
            .collected_management_fee
            .checked_add(mgmt_fee)
            .ok_or(error!(FlashVaultError::MathOverflow))?;
        pool.exit(ctx.program_id)?;

        emit!(FlashLoaned {
            borrower: ctx.accounts.borrower.key(),
            receiver: receiver_program.key(),
            asset: assets[i],
            amount: leg.amount,
            fee: leg.total_fee,
            timestamp: clock.unix_timestamp,
        });
    }

    msg!("Multi flash loan across {} assets settled", n);

    Ok(())
}
