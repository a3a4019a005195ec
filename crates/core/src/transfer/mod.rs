//! Transfer draft and payout method domain types.

pub mod types;

pub use types::{
    BankRail, ContactKind, Country, MobileNetwork, PayoutMethod, RecipientDetails, Schedule,
    ScheduleMode, SourceAccount, TransferDraft, WalletProvider,
};
