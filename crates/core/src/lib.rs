pub mod money;
pub mod receipt;
pub mod transaction;

pub use money::Amount;
pub use receipt::ReceiptFile;
pub use transaction::PurchaseTransaction;
