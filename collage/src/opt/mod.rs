pub mod nudge;
pub mod packer;
