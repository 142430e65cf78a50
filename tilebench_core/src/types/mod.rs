mod result_set;
mod strategy;
mod summary;
mod trial_result;

pub use result_set::ResultSet;
pub use strategy::Strategy;
pub use summary::Summary;
pub use trial_result::TrialResult;
