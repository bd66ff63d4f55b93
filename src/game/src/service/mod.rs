pub mod opponent;
pub mod round_machine;
