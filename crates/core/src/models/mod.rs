pub mod ledger;
pub mod nav;
pub mod settings;
pub mod table;
pub mod tick;
