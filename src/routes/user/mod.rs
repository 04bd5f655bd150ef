mod me;

pub use me::*;
