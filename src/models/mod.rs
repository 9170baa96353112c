pub mod lookup;
pub mod number_policy;
pub mod plans;

pub use lookup::{LookupRequest, LookupResult};
pub use number_policy::NumberPolicy;
pub use plans::{PlanCategory, PlansResponse};
