pub mod rfi;
pub mod search;

pub use rfi::{clipper_chain, detrender_chain, expected_chain_len, iter_sigma, transform_chain};
pub use search::{frb_injector, nfreq1k_3tree, nfreq1k_7tree};
