pub mod dataset;
pub mod decision;
pub mod features;
pub mod model;
pub mod rules;
