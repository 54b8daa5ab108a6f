mod geocode_records;
mod resolve_address;


pub use self::{geocode_records::*, resolve_address::*};

mod prelude {
    pub use crate::{entities::*, gateways::geocode::GeoCodingGateway};
}
