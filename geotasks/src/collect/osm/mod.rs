pub mod models;
#[cfg(feature = "reqwest")]
pub mod nominatim_collect;
