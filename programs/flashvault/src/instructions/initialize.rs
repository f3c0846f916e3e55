// =============================================================================
// Initialize Instruction
// =============================================================================
// One-shot setup of the Engine singleton. Sets the caller as owner and
// records the engine-wide management fee split. Fails closed on replay via
// both the Anchor `init` constraint (same PDA can't be created twice) and
// an explicit is_initialized flag for a named error instead of a generic
// account-in-use failure.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FlashVaultError;
use crate::events::EngineInitialized;
use crate::state::{Engine, ReentrancyStatus};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = 8 + Engine::INIT_SPACE,
        seeds = [ENGINE_SEED],
        bump
    )]
    pub engine: Account<'info, Engine>,

    pub system_program: Program<'info, System>,
}

pub fn handler_initialize(ctx: Context<Initialize>, management_fee_percentage: u16) -> Result<()> {
    require!(
        (MIN_MGMT_FEE_PCT..=MAX_MGMT_FEE_PCT).contains(&management_fee_percentage),
        FlashVaultError::FeeOutOfRange
    );

    let engine = &mut ctx.accounts.engine;
    engine.owner = ctx.accounts.owner.key();
    engine.is_initialized = true;
    engine.management_fee_percentage = management_fee_percentage;
    engine.reentrancy_status = ReentrancyStatus::NotEntered;
    engine.deposited_assets = vec![];
    engine.bump = ctx.bumps.engine;

    let clock = Clock::get()?;
    emit!(EngineInitialized {
        owner: engine.owner,
        management_fee_percentage,
        timestamp: clock.unix_timestamp,
    });

    msg!("FlashVault engine initialized");
    msg!("Owner: {}", engine.owner);
    msg!("Management fee percentage: {}", management_fee_percentage);

    Ok(())
}
