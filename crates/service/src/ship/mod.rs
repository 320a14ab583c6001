//! Ship registry domain: payload shapes, validation, rating, the listing
//! specification, the repository seam and the orchestrating service.

pub mod domain;
pub mod rating;
pub mod repository;
pub mod service;
pub mod specification;
pub mod validator;

pub use domain::{merge_field, ShipPayload, ShipRecord};
pub use repository::{SeaOrmShipRepository, ShipRepository};
pub use service::ShipService;
pub use specification::{ShipFilter, ShipOrder};
