pub mod defaults;
pub mod jj;
