pub mod address;
pub mod gateways;
pub mod usecases;

pub mod entities {
    pub use geoscout_entities::{geo::*, record::*};
}
