// =============================================================================
// Fee Governance Instructions
// =============================================================================
// Share-weighted voting on a pool's LP fee: vote_for_lp_fee moves a voter's
// shares between fee_votes buckets, propose_lp_fee_change snapshots a strict
// plurality winner behind a timelock, execute_lp_fee_change applies it once
// the timelock has elapsed and the winner condition still holds.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::*;
use crate::error::FlashVaultError;
use crate::events::{LPFeeChanged, ProposalCreated, ProposalExecuted, VoteCast};
use crate::state::{Pool, Position};

#[derive(Accounts)]
pub struct VoteForLpFee<'info> {
    pub voter: Signer<'info>,

    pub asset_mint: Account<'info, Mint>,

    #[account(mut, seeds = [POOL_SEED, asset_mint.key().as_ref()], bump = pool.bump)]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), voter.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == voter.key() @ FlashVaultError::NotOwner,
    )]
    pub position: Account<'info, Position>,
}

pub fn handler_vote_for_lp_fee(ctx: Context<VoteForLpFee>, bps: u16) -> Result<()> {
    require!(position_has_shares(&ctx.accounts.position), FlashVaultError::NothingToWithdraw);
    require!((1..=MAX_LP_FEE_BPS).contains(&bps), FlashVaultError::BpsOutOfRange);

    let shares = ctx.accounts.position.shares;
    let prev = ctx.accounts.position.vote_selection_bps;

    if prev != 0 {
        let idx = Pool::bps_index(prev);
        ctx.accounts.pool.fee_votes[idx] = ctx
            .accounts
            .pool
            .fee_votes[idx]
            .checked_sub(shares)
            .ok_or(error!(FlashVaultError::MathUnderflow))?;
    }

    let idx = Pool::bps_index(bps);
    ctx.accounts.pool.fee_votes[idx] = ctx
        .accounts
        .pool
        .fee_votes[idx]
        .checked_add(shares)
        .ok_or(error!(FlashVaultError::MathOverflow))?;

    ctx.accounts.position.vote_selection_bps = bps;

    let clock = Clock::get()?;
    emit!(VoteCast {
        asset: ctx.accounts.asset_mint.key(),
        voter: ctx.accounts.voter.key(),
        bps,
        voter_shares: shares,
        timestamp: clock.unix_timestamp,
    });

    msg!("Vote recorded: {} shares for {} bps", shares, bps);

    Ok(())
}

fn position_has_shares(position: &Position) -> bool {
    position.shares > 0
}

#[derive(Accounts)]
pub struct ProposeLpFeeChange<'info> {
    pub proposer: Signer<'info>,

    pub asset_mint: Account<'info, Mint>,

    #[account(mut, seeds = [POOL_SEED, asset_mint.key().as_ref()], bump = pool.bump)]
    pub pool: Account<'info, Pool>,
}

pub fn handler_propose_lp_fee_change(ctx: Context<ProposeLpFeeChange>, bps: u16) -> Result<()> {
    require!((1..=MAX_LP_FEE_BPS).contains(&bps), FlashVaultError::BpsOutOfRange);
    require!(ctx.accounts.pool.is_strict_winner(bps), FlashVaultError::ProposalNoLongerWinning);
    require!(bps != ctx.accounts.pool.effective_lp_fee_bps(), FlashVaultError::ProposalNoLongerWinning);

    let clock = Clock::get()?;
    let execution_block = clock
        .slot
        .checked_add(PROPOSAL_DELAY_BLOCKS)
        .ok_or(error!(FlashVaultError::MathOverflow))?;

    let idx = Pool::bps_index(bps);
    ctx.accounts.pool.proposed_fee_exec_block[idx] = execution_block;

    emit!(ProposalCreated {
        asset: ctx.accounts.asset_mint.key(),
        bps,
        execution_block,
        timestamp: clock.unix_timestamp,
    });

    msg!("Proposal created for bps {} executable at slot {}", bps, execution_block);

    Ok(())
}

#[derive(Accounts)]
pub struct ExecuteLpFeeChange<'info> {
    pub executor: Signer<'info>,

    pub asset_mint: Account<'info, Mint>,

    #[account(mut, seeds = [POOL_SEED, asset_mint.key().as_ref()], bump = pool.bump)]
    pub pool: Account<'info, Pool>,
}

pub fn handler_execute_lp_fee_change(ctx: Context<ExecuteLpFeeChange>, bps: u16) -> Result<()> {
    require!((1..=MAX_LP_FEE_BPS).contains(&bps), FlashVaultError::BpsOutOfRange);

    let idx = Pool::bps_index(bps);
    let execution_block = ctx.accounts.pool.proposed_fee_exec_block[idx];
    require!(execution_block > 0, FlashVaultError::NoProposal);

    let clock = Clock::get()?;
    require!(clock.slot >= execution_block, FlashVaultError::ProposalNotReady);
    require!(ctx.accounts.pool.is_strict_winner(bps), FlashVaultError::ProposalNoLongerWinning);

    let old_bps = ctx.accounts.pool.effective_lp_fee_bps();
    ctx.accounts.pool.lp_fee_bps = bps;
    ctx.accounts.pool.proposed_fee_exec_block[idx] = 0;

    emit!(ProposalExecuted {
        asset: ctx.accounts.asset_mint.key(),
        old_bps,
        new_bps: bps,
        timestamp: clock.unix_timestamp,
    });

    msg!("Proposal executed: lp_fee_bps {} -> {}", old_bps, bps);

    Ok(())
}

#[derive(Accounts)]
pub struct SetLpFee<'info> {
    #[account(constraint = owner.key() == engine.owner @ FlashVaultError::NotOwner)]
    pub owner: Signer<'info>,

    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, crate::state::Engine>,

    pub asset_mint: Account<'info, Mint>,

    #[account(mut, seeds = [POOL_SEED, asset_mint.key().as_ref()], bump = pool.bump)]
    pub pool: Account<'info, Pool>,
}

pub fn handler_set_lp_fee(ctx: Context<SetLpFee>, bps: u16) -> Result<()> {
    require!((1..=MAX_LP_FEE_BPS).contains(&bps), FlashVaultError::BpsOutOfRange);

    let old_bps = ctx.accounts.pool.effective_lp_fee_bps();
    ctx.accounts.pool.lp_fee_bps = bps;

    let clock = Clock::get()?;
    emit!(LPFeeChanged {
        asset: ctx.accounts.asset_mint.key(),
        old_bps,
        new_bps: bps,
        timestamp: clock.unix_timestamp,
    });

    msg!("Owner set lp_fee_bps {} -> {}", old_bps, bps);

    Ok(())
}
