// =============================================================================
// Instructions Module
// =============================================================================
// Each file holds one or a few closely related Anchor instructions: the
// "API" of the FlashVault program.
// =============================================================================

pub mod admin;
pub mod deposit;
pub mod flash_loan;
pub mod governance;
pub mod initialize;
pub mod multi_flash_loan;
pub mod views;
pub mod withdraw;
pub mod withdraw_fees;

pub use admin::*;
pub use deposit::*;
pub use flash_loan::*;
pub use governance::*;
pub use initialize::*;
pub use multi_flash_loan::*;
pub use views::*;
pub use withdraw::*;
pub use withdraw_fees::*;
