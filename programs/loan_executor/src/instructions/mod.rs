pub mod create_and_execute;
pub mod execute_flash_loan;
pub mod initialize_executor;
pub mod on_flash_loan;

pub use create_and_execute::*;
pub use execute_flash_loan::*;
pub use initialize_executor::*;
pub use on_flash_loan::*;
