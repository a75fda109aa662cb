pub mod account;
pub mod asset_id;
pub mod money;
