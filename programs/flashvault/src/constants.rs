// =============================================================================
// FlashVault Protocol Constants
// =============================================================================
// This file contains all the magic numbers and configuration values for the
// FlashVault flash-loan lending engine. Keeping them here makes it easy to
// adjust parameters and ensures consistency across the codebase.
// =============================================================================

// =============================================================================
// FEE CONFIGURATION (in basis points - 1 BPS = 0.01%)
// =============================================================================

/// Fee charged on a flash loan when a pool has never had its fee set directly
/// or by a won vote.
pub const DEFAULT_LP_FEE_BPS: u16 = 1;

/// Upper bound on any pool's LP fee, whether admin-set or vote-won.
pub const MAX_LP_FEE_BPS: u16 = 100;

/// `MAX_LP_FEE_BPS` as an array length for the per-bps vote/proposal tallies.
pub const MAX_LP_FEE_BPS_USIZE: usize = MAX_LP_FEE_BPS as usize;

/// Denominator for LP fee basis-point math: fee = amount * bps / this.
pub const FEE_BPS_DENOMINATOR: u64 = 10_000;

/// Lower bound on the engine-wide management fee percentage (1.00% of the LP fee).
pub const MIN_MGMT_FEE_PCT: u16 = 100;

/// Upper bound on the engine-wide management fee percentage (5.00% of the LP fee).
pub const MAX_MGMT_FEE_PCT: u16 = 500;

/// Denominator for the management fee formula: amount * lp_bps * mgmt_pct / this.
pub const MGMT_FEE_DENOMINATOR: u128 = 100_000_000;

// =============================================================================
// DEPOSIT / GOVERNANCE BOUNDS
// =============================================================================

/// Minimum accepted deposit, in the asset's base units. Guards against dust
/// positions and the first-deposit share-price inflation attack.
pub const MINIMUM_DEPOSIT: u64 = 1_000;

/// Number of slots a fee proposal must wait before it becomes executable.
pub const PROPOSAL_DELAY_BLOCKS: u64 = 10;

// =============================================================================
// ENUMERABLE SET CAPACITY
// =============================================================================
// deposited_assets / deposited_assets_by_account are bounded vectors rather
// than hash sets: the chain has no native map type, and these lists exist for
// enumeration convenience, not hot-path accounting. Off-chain indexers derive
// the authoritative activity history from emitted events.
// =============================================================================

/// Maximum number of distinct assets the engine will track for enumeration.
pub const MAX_TRACKED_ASSETS: usize = 64;

/// Maximum number of distinct assets a single account's index will track.
pub const MAX_TRACKED_ASSETS_PER_ACCOUNT: usize = 32;

// =============================================================================
// PDA SEEDS
// =============================================================================
// PDAs (Program Derived Addresses) are special addresses that only this program
// can sign for. We use them to create accounts that are "owned" by the program.
// Seeds are like a recipe for finding the PDA - same seeds = same address.
// =============================================================================

/// Seed for the singleton Engine account PDA. Full seed: ["engine"].
pub const ENGINE_SEED: &[u8] = b"engine";

/// Seed for a per-asset Pool account PDA. Full seed: ["pool", asset_mint_pubkey].
pub const POOL_SEED: &[u8] = b"pool";

/// Seed for a pool's vault token account PDA. Full seed: ["vault", pool_pubkey].
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for a per-account, per-pool Position PDA.
/// Full seed: ["position", pool_pubkey, owner_pubkey]
pub const POSITION_SEED: &[u8] = b"position";

/// Seed for a per-account asset enumeration index PDA.
/// Full seed: ["account_index", owner_pubkey]
pub const ACCOUNT_INDEX_SEED: &[u8] = b"account_index";
