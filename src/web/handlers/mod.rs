pub mod history;
pub mod verify;
