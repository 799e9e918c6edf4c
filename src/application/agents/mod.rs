pub mod analysis_worker;
pub mod user_agent;
