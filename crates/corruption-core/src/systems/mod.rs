//! ECS Systems
//!
//! The two stage systems, the decision rules they apply to each agent, and
//! the aggregate statistics computed between stages.

pub mod aggregate;
pub mod corrupt;
pub mod decision;
pub mod procreate;

pub use aggregate::{corruption_index, income_bounds, national_income, social_capital, total_capital};
pub use corrupt::corrupt_stage;
pub use decision::{
    advance_generation, choose_dishonesty, draw_initial_capital, draw_risk_aversion, earn_income,
    inherited_capital, Decision,
};
pub use procreate::procreate_stage;
